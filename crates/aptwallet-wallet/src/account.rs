//! Single-signer ed25519 account.

use crate::error::WalletError;
use crate::keys;
use aptwallet_types::AccountAddress;
use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use std::fmt;

/// Signing account: private key plus its derived address.
#[derive(Clone)]
pub struct Account {
    signing_key: SigningKey,
    address: AccountAddress,
}

impl Account {
    pub fn from_private_key(private_key: &[u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(private_key);
        let address =
            AccountAddress::from_ed25519_public_key(&signing_key.verifying_key().to_bytes());
        Self {
            signing_key,
            address,
        }
    }

    /// Derive the account at `path` (e.g. `m/44'/637'/0'/0'/0'`) from a mnemonic.
    pub fn from_derive_path(path: &str, mnemonic: &str) -> Result<Self, WalletError> {
        let key = keys::private_key_from_mnemonic(mnemonic, path)?;
        Ok(Self::from_private_key(&key))
    }

    /// Derive account `index` along the standard path.
    pub fn from_mnemonic(mnemonic: &str, index: u32) -> Result<Self, WalletError> {
        Self::from_derive_path(&keys::derivation_path(index), mnemonic)
    }

    pub fn address(&self) -> AccountAddress {
        self.address
    }

    pub fn public_key(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    pub fn public_key_hex(&self) -> String {
        format!("0x{}", hex::encode(self.public_key()))
    }

    pub fn private_key(&self) -> [u8; 32] {
        self.signing_key.to_bytes()
    }

    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        self.signing_key.sign(message).to_bytes()
    }

    /// Sign the UTF-8 bytes of `message`; returns `0x`-prefixed hex.
    pub fn sign_message(&self, message: &str) -> String {
        format!("0x{}", hex::encode(self.sign(message.as_bytes())))
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Check an ed25519 signature made by [`Account::sign`].
pub fn verify_signature(public_key: &[u8; 32], message: &[u8], signature: &[u8; 64]) -> bool {
    let Ok(key) = VerifyingKey::from_bytes(public_key) else {
        return false;
    };
    let sig = ed25519_dalek::Signature::from_bytes(signature);
    key.verify(message, &sig).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHRASE: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_address_matches_public_key() {
        let account = Account::from_private_key(&[1u8; 32]);
        assert_eq!(
            account.address(),
            AccountAddress::from_ed25519_public_key(&account.public_key())
        );
        assert_eq!(account.private_key(), [1u8; 32]);
    }

    #[test]
    fn test_from_mnemonic_uses_standard_path() {
        let a = Account::from_mnemonic(PHRASE, 0).unwrap();
        let b = Account::from_derive_path("m/44'/637'/0'/0'/0'", PHRASE).unwrap();
        assert_eq!(a.address(), b.address());
        assert_ne!(a.address(), Account::from_mnemonic(PHRASE, 1).unwrap().address());
    }

    #[test]
    fn test_sign_and_verify() {
        let account = Account::from_private_key(&[9u8; 32]);
        let sig = account.sign(b"hello");
        assert!(verify_signature(&account.public_key(), b"hello", &sig));
        assert!(!verify_signature(&account.public_key(), b"hellO", &sig));
    }

    #[test]
    fn test_sign_message_hex() {
        let account = Account::from_private_key(&[9u8; 32]);
        let hex_sig = account.sign_message("hello");
        assert!(hex_sig.starts_with("0x"));
        assert_eq!(hex_sig.len(), 2 + 128);
        assert_eq!(hex_sig, format!("0x{}", hex::encode(account.sign(b"hello"))));
    }

    #[test]
    fn test_debug_hides_key() {
        let account = Account::from_private_key(&[0xaa; 32]);
        let dbg = format!("{:?}", account);
        assert!(!dbg.contains(&hex::encode([0xaa; 32])));
    }
}
