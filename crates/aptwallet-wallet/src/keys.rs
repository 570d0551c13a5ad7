//! Mnemonic handling and SLIP-0010 ed25519 key derivation.
//!
//! Accounts live at `m/44'/637'/{index}'/0'/0'`. Every level is hardened, as
//! ed25519 derivation requires.

use crate::error::WalletError;
use aptwallet_types::constants::COIN_TYPE;
use bip39::{Language, Mnemonic};
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha512;

type HmacSha512 = Hmac<Sha512>;

/// Offset marking a hardened child index.
const HARDENED_OFFSET: u32 = 0x8000_0000;

/// HMAC key for the SLIP-0010 ed25519 master node.
const ED25519_CURVE: &[u8] = b"ed25519 seed";

/// Entropy for a fresh 12-word phrase.
const MNEMONIC_ENTROPY_BYTES: usize = 16;

/// Generate a new 12-word English mnemonic from OS randomness.
pub fn generate_mnemonic() -> Result<String, WalletError> {
    let mut entropy = [0u8; MNEMONIC_ENTROPY_BYTES];
    rand::rngs::OsRng.fill_bytes(&mut entropy);
    let mnemonic = Mnemonic::from_entropy_in(Language::English, &entropy)
        .map_err(|e| WalletError::InvalidMnemonic(e.to_string()))?;
    Ok(mnemonic.to_string())
}

/// Whether `phrase` is a valid English BIP-39 mnemonic (word list + checksum).
pub fn validate_mnemonic(phrase: &str) -> bool {
    parse_mnemonic(phrase).is_ok()
}

fn parse_mnemonic(phrase: &str) -> Result<Mnemonic, WalletError> {
    Mnemonic::parse_in_normalized(Language::English, phrase.trim())
        .map_err(|e| WalletError::InvalidMnemonic(e.to_string()))
}

/// Standard derivation path for account `index`.
pub fn derivation_path(index: u32) -> String {
    format!("m/44'/{}'/{}'/0'/0'", COIN_TYPE, index)
}

/// Parse `m/44'/637'/a'/b'/c'` into hardened child indices.
pub fn parse_derivation_path(path: &str) -> Result<Vec<u32>, WalletError> {
    let invalid = || WalletError::InvalidPath(path.to_string());

    let mut parts = path.split('/');
    if parts.next() != Some("m") {
        return Err(invalid());
    }

    let mut indices = Vec::with_capacity(5);
    for part in parts {
        let digits = part.strip_suffix('\'').ok_or_else(invalid)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let index: u32 = digits.parse().map_err(|_| invalid())?;
        if index >= HARDENED_OFFSET {
            return Err(invalid());
        }
        indices.push(index);
    }

    if indices.len() != 5 || indices[0] != 44 || indices[1] != COIN_TYPE {
        return Err(invalid());
    }
    Ok(indices)
}

/// A node in the SLIP-0010 tree.
struct ExtendedKey {
    key: [u8; 32],
    chain_code: [u8; 32],
}

impl ExtendedKey {
    fn from_hmac(mac: HmacSha512) -> Self {
        let out = mac.finalize().into_bytes();
        let mut key = [0u8; 32];
        let mut chain_code = [0u8; 32];
        key.copy_from_slice(&out[..32]);
        chain_code.copy_from_slice(&out[32..]);
        Self { key, chain_code }
    }

    fn master(seed: &[u8]) -> Result<Self, WalletError> {
        let mut mac = HmacSha512::new_from_slice(ED25519_CURVE)
            .map_err(|e| WalletError::KeyDerivation(e.to_string()))?;
        mac.update(seed);
        Ok(Self::from_hmac(mac))
    }

    fn child(&self, index: u32) -> Result<Self, WalletError> {
        let mut mac = HmacSha512::new_from_slice(&self.chain_code)
            .map_err(|e| WalletError::KeyDerivation(e.to_string()))?;
        mac.update(&[0u8]);
        mac.update(&self.key);
        mac.update(&(index | HARDENED_OFFSET).to_be_bytes());
        Ok(Self::from_hmac(mac))
    }
}

/// Derive the 32-byte ed25519 private key at `path` from a raw seed.
pub fn derive_private_key(seed: &[u8], path: &str) -> Result<[u8; 32], WalletError> {
    let indices = parse_derivation_path(path)?;
    let mut node = ExtendedKey::master(seed)?;
    for index in indices {
        node = node.child(index)?;
    }
    Ok(node.key)
}

/// Derive the private key at `path` from a mnemonic (empty passphrase).
pub fn private_key_from_mnemonic(phrase: &str, path: &str) -> Result<[u8; 32], WalletError> {
    let mnemonic = parse_mnemonic(phrase)?;
    let seed = mnemonic.to_seed("");
    derive_private_key(&seed, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHRASE: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_generate_mnemonic_is_valid() {
        let phrase = generate_mnemonic().unwrap();
        assert_eq!(phrase.split_whitespace().count(), 12);
        assert!(validate_mnemonic(&phrase));
        assert_ne!(phrase, generate_mnemonic().unwrap());
    }

    #[test]
    fn test_validate_mnemonic() {
        assert!(validate_mnemonic(PHRASE));
        assert!(validate_mnemonic(&format!("  {}  ", PHRASE)));
        // Bad checksum word.
        assert!(!validate_mnemonic(
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon"
        ));
        assert!(!validate_mnemonic("not a seed phrase"));
    }

    #[test]
    fn test_derivation_path() {
        assert_eq!(derivation_path(0), "m/44'/637'/0'/0'/0'");
        assert_eq!(derivation_path(3), "m/44'/637'/3'/0'/0'");
    }

    #[test]
    fn test_parse_derivation_path() {
        assert_eq!(
            parse_derivation_path("m/44'/637'/2'/0'/1'").unwrap(),
            vec![44, 637, 2, 0, 1]
        );
        for bad in [
            "",
            "m",
            "44'/637'/0'/0'/0'",
            "m/44'/637'/0'/0/0'",
            "m/44'/60'/0'/0'/0'",
            "m/44'/637'/0'/0'",
            "m/44'/637'/0'/0'/0'/0'",
            "m/44'/637'/x'/0'/0'",
            "m/44'/637'/2147483648'/0'/0'",
        ] {
            assert!(parse_derivation_path(bad).is_err(), "{}", bad);
        }
    }

    #[test]
    fn test_slip10_vector_1_master() {
        // SLIP-0010 ed25519 test vector 1, chain m.
        let seed = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        let master = ExtendedKey::master(&seed).unwrap();
        assert_eq!(
            hex::encode(master.key),
            "2b4be7f19ee27bbf30c667b642d5f4aa69fd169872f8fc3059c08ebae2eb19e7"
        );
        assert_eq!(
            hex::encode(master.chain_code),
            "90046a93de5380a72b5e45010748567d5ea02bbf6522f979e05c0d8d8ca9fffb"
        );
    }

    #[test]
    fn test_slip10_vector_1_child() {
        // SLIP-0010 ed25519 test vector 1, chain m/0H.
        let seed = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        let child = ExtendedKey::master(&seed).unwrap().child(0).unwrap();
        assert_eq!(
            hex::encode(child.key),
            "68e0fe46dfb67e368c75379acec591dad19df3cde26e63b93a8e704f1dade7a3"
        );
        assert_eq!(
            hex::encode(child.chain_code),
            "8b59aa11380b624e81507a27fedda59fea6d0b779a778918a2fd3590e16e9c69"
        );
    }

    #[test]
    fn test_accounts_differ_by_index() {
        let a = private_key_from_mnemonic(PHRASE, &derivation_path(0)).unwrap();
        let b = private_key_from_mnemonic(PHRASE, &derivation_path(1)).unwrap();
        assert_ne!(a, b);
        assert_eq!(a, private_key_from_mnemonic(PHRASE, &derivation_path(0)).unwrap());
    }

    #[test]
    fn test_invalid_mnemonic_rejected() {
        let err = private_key_from_mnemonic("foo bar", &derivation_path(0)).unwrap_err();
        assert!(matches!(err, WalletError::InvalidMnemonic(_)));
    }
}
