//! Operations are the individual actions carried by transactions.
//!
//! They come in two flavours. Regular operations are authored and signed by
//! users, they have a canonical encoding and demand signatures from a set
//! of principals. Virtual operations are ledger events produced by the
//! node itself (rewards, vesting payouts, ...). They only ever show up in
//! node responses, are never broadcast, encode to nothing and require no
//! authority.

mod account;
mod transfer;
mod vesting;
mod virtual_ops;

pub use {
  account::{AccountCreateOperation, AccountUpdateOperation},
  transfer::{TransferOperation, TransferToVestingOperation},
  vesting::WithdrawVestingOperation,
  virtual_ops::{FillVestingWithdrawOperation, ProducerRewardOperation},
};
use {
  crate::{AccountName, Asset, ByteEncodable, Config, Error, PublicKey},
  serde::{Deserialize, Serialize},
  std::{collections::BTreeMap, io::Write},
};

/// Category of key a principal must sign with.
///
/// Ordered by strength, an owner signature also satisfies an active
/// requirement.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
  Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum KeyRole {
  Active,
  Owner,
}

/// Something that can produce a signature for an operation.
#[derive(
  Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Principal {
  Account(AccountName),
  Key(PublicKey),
}

/// Principals whose signatures are needed, with the role each of them
/// has to sign in.
pub type RequiredAuthorities = BTreeMap<Principal, KeyRole>;

/// Adds a requirement, keeping the stronger role when the principal is
/// already required.
pub fn require(
  into: &mut RequiredAuthorities,
  principal: impl Into<Principal>,
  role: KeyRole,
) {
  into
    .entry(principal.into())
    .and_modify(|existing| *existing = (*existing).max(role))
    .or_insert(role);
}

impl From<AccountName> for Principal {
  fn from(account: AccountName) -> Self {
    Principal::Account(account)
  }
}

impl From<PublicKey> for Principal {
  fn from(key: PublicKey) -> Self {
    Principal::Key(key)
  }
}

/// How thoroughly an operation checks itself before it is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationType {
  #[default]
  All,
  SkipAssetValidation,
  SkipValidation,
}

impl ValidationType {
  pub(crate) fn checks_assets(self) -> bool {
    self == ValidationType::All
  }

  pub(crate) fn checks_fields(self) -> bool {
    self != ValidationType::SkipValidation
  }
}

/// Capability shared by every user-authored operation.
///
/// The byte encoding of an operation starts with the varint id of its kind
/// followed by its fields in wire order.
pub trait OperationBody: ByteEncodable {
  /// Position of this operation kind in the chain's operation variant.
  fn id(&self) -> u32;

  /// Merges every principal whose signature this operation demands
  /// into `into`.
  fn required_authorities(&self, into: &mut RequiredAuthorities);

  fn validate(&self, validation: ValidationType) -> Result<(), Error>;
}

/// Operations users can sign and broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum RegularOperation {
  #[serde(rename = "transfer_operation")]
  Transfer(TransferOperation),

  #[serde(rename = "transfer_to_vesting_operation")]
  TransferToVesting(TransferToVestingOperation),

  #[serde(rename = "withdraw_vesting_operation")]
  WithdrawVesting(WithdrawVestingOperation),

  #[serde(rename = "account_update_operation")]
  AccountUpdate(AccountUpdateOperation),

  #[serde(rename = "account_create_operation")]
  AccountCreate(AccountCreateOperation),
}

impl RegularOperation {
  fn body(&self) -> &dyn OperationBody {
    match self {
      Self::Transfer(op) => op,
      Self::TransferToVesting(op) => op,
      Self::WithdrawVesting(op) => op,
      Self::AccountUpdate(op) => op,
      Self::AccountCreate(op) => op,
    }
  }

  pub fn id(&self) -> u32 {
    self.body().id()
  }

  /// Merges the requirements of this operation into `base` and returns the
  /// merged set.
  pub fn required_authorities(
    &self,
    mut base: RequiredAuthorities,
  ) -> RequiredAuthorities {
    self.body().required_authorities(&mut base);
    base
  }

  pub fn validate(&self, validation: ValidationType) -> Result<(), Error> {
    self.body().validate(validation)
  }
}

impl ByteEncodable for RegularOperation {
  fn write_bytes(
    &self,
    config: &Config,
    out: &mut dyn Write,
  ) -> Result<(), Error> {
    self.body().write_bytes(config, out)
  }
}

/// Ledger events produced by the node.
///
/// None of the wrapped types can be constructed outside of this crate,
/// they are only obtained by deserializing node responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum VirtualOperation {
  #[serde(rename = "fill_vesting_withdraw_operation")]
  FillVestingWithdraw(FillVestingWithdrawOperation),

  #[serde(rename = "producer_reward_operation")]
  ProducerReward(ProducerRewardOperation),
}

/// Any operation that can appear in a block or in account history.
///
/// Only regular operations can be placed in a [`crate::Transaction`], the
/// split between the two kinds is decided once by this tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Operation {
  Regular(RegularOperation),
  Virtual(VirtualOperation),
}

impl Operation {
  pub fn is_virtual(&self) -> bool {
    matches!(self, Operation::Virtual(_))
  }

  /// Principals that must sign this operation merged into `base`.
  ///
  /// Virtual operations are never authorized by anyone, so they return
  /// `None` whatever the base is.
  pub fn required_authorities(
    &self,
    base: RequiredAuthorities,
  ) -> Option<RequiredAuthorities> {
    match self {
      Operation::Regular(op) => Some(op.required_authorities(base)),
      Operation::Virtual(_) => None,
    }
  }

  /// Virtual operations are valid by construction since only the node
  /// produces them.
  pub fn validate(&self, validation: ValidationType) -> Result<(), Error> {
    match self {
      Operation::Regular(op) => op.validate(validation),
      Operation::Virtual(_) => Ok(()),
    }
  }
}

impl ByteEncodable for Operation {
  /// Virtual operations are never broadcast and encode to an empty
  /// byte sequence.
  fn write_bytes(
    &self,
    config: &Config,
    out: &mut dyn Write,
  ) -> Result<(), Error> {
    match self {
      Operation::Regular(op) => op.write_bytes(config, out),
      Operation::Virtual(_) => Ok(()),
    }
  }
}

impl From<RegularOperation> for Operation {
  fn from(op: RegularOperation) -> Self {
    Operation::Regular(op)
  }
}

fn check_asset_non_negative(field: &str, asset: &Asset) -> Result<(), Error> {
  if asset.amount() < 0 {
    return Err(Error::InvalidParameter(format!(
      "{field} must not be negative, got {asset}"
    )));
  }
  Ok(())
}

fn check_asset_positive(field: &str, asset: &Asset) -> Result<(), Error> {
  if asset.amount() <= 0 {
    return Err(Error::InvalidParameter(format!(
      "{field} must be positive, got {asset}"
    )));
  }
  Ok(())
}

fn check_length(field: &str, value: &str, max: usize) -> Result<(), Error> {
  if value.len() > max {
    return Err(Error::InvalidParameter(format!(
      "{field} is {} bytes long, at most {max} are allowed",
      value.len()
    )));
  }
  Ok(())
}
