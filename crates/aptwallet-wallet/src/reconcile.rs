//! Token ownership from a token store's deposit and withdraw event logs.
//!
//! Each log is folded into per-token aggregates (occurrence count and the
//! sequence number of the last occurrence processed). The two tallies are then
//! joined on the token's canonical key, in the order tokens were first seen
//! (deposit log first, then withdraw log).
//!
//! All state lives inside a single [`reconcile`] call.

use aptwallet_types::{Event, TokenId};
use serde::{Serialize, Serializer};
use std::collections::{HashMap, HashSet};
use std::fmt;
use thiserror::Error;

/// Which of the two logs an event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSide {
    Deposit,
    Withdraw,
}

impl fmt::Display for LogSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogSide::Deposit => f.write_str("deposit"),
            LogSide::Withdraw => f.write_str("withdraw"),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReconcileError {
    #[error("invalid {side} event at index {index}: {reason}")]
    InvalidEventFormat {
        side: LogSide,
        index: usize,
        reason: String,
    },
}

/// Net holding of one token position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenOwnership {
    #[serde(rename = "data")]
    pub identifier: TokenId,
    /// Sequence number of the last deposit processed; `None` if never deposited.
    #[serde(serialize_with = "sequence_as_string")]
    pub deposit_sequence_number: Option<u64>,
    /// Sequence number of the last withdrawal processed; `None` if never withdrawn.
    #[serde(serialize_with = "sequence_as_string")]
    pub withdraw_sequence_number: Option<u64>,
    /// Deposits minus withdrawals.
    #[serde(rename = "difference")]
    pub net_count: i64,
}

/// Outcome of [`reconcile`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconciliationResult {
    #[serde(rename = "token_ids")]
    pub entries: Vec<TokenOwnership>,
    #[serde(serialize_with = "sequence_as_number")]
    pub max_deposit_sequence_number: Option<u64>,
    #[serde(serialize_with = "sequence_as_number")]
    pub max_withdraw_sequence_number: Option<u64>,
}

impl ReconciliationResult {
    /// Entries whose event history implies the account still holds the token.
    pub fn held(&self) -> impl Iterator<Item = &TokenOwnership> {
        self.entries.iter().filter(|e| e.net_count > 0)
    }
}

/// Wire rendering of an optional sequence number: decimal, or `"-1"`.
pub fn sequence_label(seq: Option<u64>) -> String {
    match seq {
        Some(n) => n.to_string(),
        None => "-1".to_string(),
    }
}

fn sequence_as_string<S: Serializer>(seq: &Option<u64>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&sequence_label(*seq))
}

fn sequence_as_number<S: Serializer>(seq: &Option<u64>, s: S) -> Result<S::Ok, S::Error> {
    match seq {
        Some(n) => s.serialize_u64(*n),
        None => s.serialize_i64(-1),
    }
}

struct Aggregate {
    /// Occurrences in one log; bounded by the log's length.
    count: i64,
    last_sequence_number: u64,
    identifier: TokenId,
}

/// One log folded by canonical token key.
#[derive(Default)]
struct Tally {
    by_key: HashMap<String, Aggregate>,
    max_sequence_number: Option<u64>,
}

impl Tally {
    fn record(&mut self, key: &str, sequence_number: u64, identifier: TokenId) {
        match self.by_key.get_mut(key) {
            Some(agg) => {
                agg.count += 1;
                agg.last_sequence_number = sequence_number;
            }
            None => {
                self.by_key.insert(
                    key.to_string(),
                    Aggregate {
                        count: 1,
                        last_sequence_number: sequence_number,
                        identifier,
                    },
                );
            }
        }
        self.max_sequence_number = Some(
            self.max_sequence_number
                .map_or(sequence_number, |m| m.max(sequence_number)),
        );
    }
}

/// Validate one event and pull out its sequence number and token id.
fn parse_event(side: LogSide, index: usize, event: &Event) -> Result<(u64, TokenId), ReconcileError> {
    let invalid = |reason: String| ReconcileError::InvalidEventFormat {
        side,
        index,
        reason,
    };

    let raw_seq = event
        .sequence_number
        .as_deref()
        .ok_or_else(|| invalid("missing sequence_number".to_string()))?;
    if raw_seq.is_empty() || !raw_seq.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(format!("sequence_number {:?} is not a u64", raw_seq)));
    }
    let seq: u64 = raw_seq
        .parse()
        .map_err(|_| invalid(format!("sequence_number {:?} is not a u64", raw_seq)))?;

    let raw_id = event
        .data
        .get("id")
        .ok_or_else(|| invalid("missing data.id".to_string()))?;
    let id: TokenId = serde_json::from_value(raw_id.clone())
        .map_err(|e| invalid(format!("data.id is not a token id: {}", e)))?;

    Ok((seq, id))
}

fn fold(
    side: LogSide,
    events: &[Event],
    tally: &mut Tally,
    order: &mut Vec<String>,
    seen: &mut HashSet<String>,
) -> Result<(), ReconcileError> {
    for (index, event) in events.iter().enumerate() {
        let (seq, id) = parse_event(side, index, event)?;
        let key = id
            .canonical_key()
            .map_err(|e| ReconcileError::InvalidEventFormat {
                side,
                index,
                reason: format!("token id has no canonical form: {}", e),
            })?;
        if seen.insert(key.clone()) {
            order.push(key.clone());
        }
        tally.record(&key, seq, id);
    }
    Ok(())
}

/// Compute net token ownership from a deposit log and a withdraw log.
///
/// Output has one entry per distinct token id across both logs, ordered by
/// first appearance (deposits scanned before withdrawals). A malformed event
/// in either log fails the whole call.
pub fn reconcile(
    deposit_events: &[Event],
    withdraw_events: &[Event],
) -> Result<ReconciliationResult, ReconcileError> {
    let mut deposits = Tally::default();
    let mut withdrawals = Tally::default();
    let mut order = Vec::new();
    let mut seen = HashSet::new();

    fold(LogSide::Deposit, deposit_events, &mut deposits, &mut order, &mut seen)?;
    fold(LogSide::Withdraw, withdraw_events, &mut withdrawals, &mut order, &mut seen)?;

    let mut entries = Vec::with_capacity(order.len());
    for key in &order {
        let dep = deposits.by_key.get(key);
        let wd = withdrawals.by_key.get(key);
        let identifier = match (dep, wd) {
            (Some(agg), _) | (None, Some(agg)) => agg.identifier.clone(),
            (None, None) => continue,
        };
        let dep_count = dep.map_or(0, |a| a.count);
        let wd_count = wd.map_or(0, |a| a.count);
        entries.push(TokenOwnership {
            identifier,
            deposit_sequence_number: dep.map(|a| a.last_sequence_number),
            withdraw_sequence_number: wd.map(|a| a.last_sequence_number),
            net_count: dep_count - wd_count,
        });
    }

    Ok(ReconciliationResult {
        entries,
        max_deposit_sequence_number: deposits.max_sequence_number,
        max_withdraw_sequence_number: withdrawals.max_sequence_number,
    })
}
