use {
  crate::{AccountName, Asset},
  serde::{Deserialize, Serialize},
};

/// Emitted by the node each time a scheduled vesting withdrawal pays out.
///
/// There is no public constructor: only the chain creates these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillVestingWithdrawOperation {
  from_account: AccountName,
  to_account: AccountName,
  withdrawn: Asset,
  deposited: Asset,
}

impl FillVestingWithdrawOperation {
  pub fn from_account(&self) -> &AccountName {
    &self.from_account
  }

  pub fn to_account(&self) -> &AccountName {
    &self.to_account
  }

  pub fn withdrawn(&self) -> &Asset {
    &self.withdrawn
  }

  pub fn deposited(&self) -> &Asset {
    &self.deposited
  }
}

/// Block production reward paid to a supernode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProducerRewardOperation {
  producer: AccountName,
  vesting_shares: Asset,
}

impl ProducerRewardOperation {
  pub fn producer(&self) -> &AccountName {
    &self.producer
  }

  pub fn vesting_shares(&self) -> &Asset {
    &self.vesting_shares
  }
}
