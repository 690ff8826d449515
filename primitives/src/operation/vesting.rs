use {
  super::{
    check_asset_non_negative,
    require,
    KeyRole,
    OperationBody,
    RequiredAuthorities,
    ValidationType,
  },
  crate::{encoding, AccountName, Asset, ByteEncodable, Config, Error},
  serde::{Deserialize, Serialize},
  std::io::Write,
};

/// Starts converting vesting shares back to liquid tokens. The payouts
/// show up later as `fill_vesting_withdraw_operation` virtual operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawVestingOperation {
  pub account: AccountName,
  pub vesting_shares: Asset,
  pub fee: Asset,
}

impl ByteEncodable for WithdrawVestingOperation {
  fn write_bytes(
    &self,
    config: &Config,
    out: &mut dyn Write,
  ) -> Result<(), Error> {
    encoding::write_varuint(out, self.id() as u64)?;
    self.account.write_bytes(config, out)?;
    self.vesting_shares.write_bytes(config, out)?;
    self.fee.write_bytes(config, out)
  }
}

impl OperationBody for WithdrawVestingOperation {
  fn id(&self) -> u32 {
    2
  }

  fn required_authorities(&self, into: &mut RequiredAuthorities) {
    require(into, self.account.clone(), KeyRole::Active);
  }

  fn validate(&self, validation: ValidationType) -> Result<(), Error> {
    // zero shares cancels a pending withdrawal
    if validation.checks_assets() {
      check_asset_non_negative("vesting_shares", &self.vesting_shares)?;
      check_asset_non_negative("fee", &self.fee)?;
    }
    Ok(())
  }
}
