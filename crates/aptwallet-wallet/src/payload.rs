//! Entry function payloads for coin and token operations.
//!
//! u64 arguments are passed as decimal strings; `vector<u8>` arguments as
//! `0x`-prefixed hex.

use aptwallet_rpc::types::EntryFunctionPayload;
use aptwallet_types::constants::functions;
use aptwallet_types::AccountAddress;
use serde_json::Value;

fn addr(a: &AccountAddress) -> Value {
    Value::from(a.to_hex_literal())
}

fn u64_arg(n: u64) -> Value {
    Value::from(n.to_string())
}

fn str_arg(s: &str) -> Value {
    Value::from(s)
}

/// Transfer native coins, creating the recipient account if needed.
pub fn aptos_transfer(recipient: &AccountAddress, amount: u64) -> EntryFunctionPayload {
    EntryFunctionPayload::new(
        functions::APTOS_ACCOUNT_TRANSFER,
        vec![],
        vec![addr(recipient), u64_arg(amount)],
    )
}

/// Transfer `amount` of `coin_type` to a recipient registered for it.
pub fn coin_transfer(coin_type: &str, recipient: &AccountAddress, amount: u64) -> EntryFunctionPayload {
    EntryFunctionPayload::new(
        functions::COIN_TRANSFER,
        vec![coin_type.to_string()],
        vec![addr(recipient), u64_arg(amount)],
    )
}

/// Register a coin store for `coin_type` under the signer.
pub fn register_coin(coin_type: &str) -> EntryFunctionPayload {
    EntryFunctionPayload::new(functions::MANAGED_COIN_REGISTER, vec![coin_type.to_string()], vec![])
}

pub fn create_collection(name: &str, description: &str, uri: &str, maximum: u64) -> EntryFunctionPayload {
    EntryFunctionPayload::new(
        functions::CREATE_COLLECTION,
        vec![],
        vec![
            str_arg(name),
            str_arg(description),
            str_arg(uri),
            u64_arg(maximum),
            // description, uri, maximum are immutable
            Value::from(vec![false, false, false]),
        ],
    )
}

/// Parameters for minting a token definition.
#[derive(Debug, Clone)]
pub struct NewToken {
    pub collection: String,
    pub name: String,
    pub description: String,
    pub supply: u64,
    pub uri: String,
    pub maximum: u64,
    pub royalty_payee: AccountAddress,
    pub royalty_points_denominator: u64,
    pub royalty_points_numerator: u64,
    pub property_keys: Vec<String>,
    /// Raw BCS-encoded property values.
    pub property_values: Vec<Vec<u8>>,
    pub property_types: Vec<String>,
}

impl NewToken {
    /// Token with unlimited maximum, no royalty and no properties.
    pub fn new(
        creator: &AccountAddress,
        collection: &str,
        name: &str,
        description: &str,
        supply: u64,
        uri: &str,
    ) -> Self {
        Self {
            collection: collection.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            supply,
            uri: uri.to_string(),
            maximum: aptwallet_types::constants::MAX_U64,
            royalty_payee: *creator,
            royalty_points_denominator: 0,
            royalty_points_numerator: 0,
            property_keys: Vec::new(),
            property_values: Vec::new(),
            property_types: Vec::new(),
        }
    }
}

pub fn create_token(token: &NewToken) -> EntryFunctionPayload {
    let values: Vec<Value> = token
        .property_values
        .iter()
        .map(|v| Value::from(format!("0x{}", hex::encode(v))))
        .collect();
    EntryFunctionPayload::new(
        functions::CREATE_TOKEN,
        vec![],
        vec![
            str_arg(&token.collection),
            str_arg(&token.name),
            str_arg(&token.description),
            u64_arg(token.supply),
            u64_arg(token.maximum),
            str_arg(&token.uri),
            addr(&token.royalty_payee),
            u64_arg(token.royalty_points_denominator),
            u64_arg(token.royalty_points_numerator),
            // maximum, uri, royalty, description, properties are immutable
            Value::from(vec![false; 5]),
            Value::from(token.property_keys.clone()),
            Value::Array(values),
            Value::from(token.property_types.clone()),
        ],
    )
}

/// Offer `amount` of a token to `receiver`, who must claim it.
pub fn offer_token(
    receiver: &AccountAddress,
    creator: &AccountAddress,
    collection: &str,
    name: &str,
    property_version: u64,
    amount: u64,
) -> EntryFunctionPayload {
    EntryFunctionPayload::new(
        functions::OFFER_TOKEN,
        vec![],
        vec![
            addr(receiver),
            addr(creator),
            str_arg(collection),
            str_arg(name),
            u64_arg(property_version),
            u64_arg(amount),
        ],
    )
}

/// Claim a token offered by `sender`.
pub fn claim_token(
    sender: &AccountAddress,
    creator: &AccountAddress,
    collection: &str,
    name: &str,
    property_version: u64,
) -> EntryFunctionPayload {
    EntryFunctionPayload::new(
        functions::CLAIM_TOKEN,
        vec![],
        vec![
            addr(sender),
            addr(creator),
            str_arg(collection),
            str_arg(name),
            u64_arg(property_version),
        ],
    )
}

pub fn opt_in_direct_transfer(opt_in: bool) -> EntryFunctionPayload {
    EntryFunctionPayload::new(functions::OPT_IN_DIRECT_TRANSFER, vec![], vec![Value::from(opt_in)])
}

/// Send tokens directly to a receiver that has opted in.
pub fn transfer_with_opt_in(
    creator: &AccountAddress,
    collection: &str,
    name: &str,
    property_version: u64,
    receiver: &AccountAddress,
    amount: u64,
) -> EntryFunctionPayload {
    EntryFunctionPayload::new(
        functions::TRANSFER_WITH_OPT_IN,
        vec![],
        vec![
            addr(creator),
            str_arg(collection),
            str_arg(name),
            u64_arg(property_version),
            addr(receiver),
            u64_arg(amount),
        ],
    )
}
