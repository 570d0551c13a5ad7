//! Core types and constants for aptwallet.
//!
//! This crate provides the foundational types used across the workspace:
//! network presets, account addresses, token identifiers, and the raw event
//! shape returned by the node.

pub mod address;
pub mod constants;
pub mod event;
pub mod token;

pub use address::{AccountAddress, AddressError};
pub use constants::Network;
pub use event::Event;
pub use token::{TokenDataId, TokenId};
