//! Core data model of the Beowulf chain: accounts, keys, authorities,
//! operations and transactions, together with the canonical binary
//! encoding the node hashes and signs.

mod account;
mod asset;
mod authority;
mod config;
pub mod encoding;
mod error;
mod hash;
mod history;
mod key;
pub mod operation;
pub mod timestamp;
mod transaction;

pub use {
  account::AccountName,
  asset::Asset,
  authority::Authority,
  config::{Charset, Config},
  encoding::ByteEncodable,
  error::Error,
  hash::{BlockId, Ripemd160, TransactionId},
  history::{AccountHistory, AppliedOperation},
  key::{PublicKey, DEFAULT_ADDRESS_PREFIX},
  operation::{
    AccountCreateOperation,
    AccountUpdateOperation,
    KeyRole,
    Operation,
    Principal,
    RegularOperation,
    RequiredAuthorities,
    TransferOperation,
    TransferToVestingOperation,
    ValidationType,
    VirtualOperation,
    WithdrawVestingOperation,
  },
  transaction::{BlockReference, Transaction},
};
