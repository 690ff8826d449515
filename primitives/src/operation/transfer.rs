use {
  super::{
    check_asset_non_negative,
    check_asset_positive,
    check_length,
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

pub const MAX_MEMO_LENGTH: usize = 2048;

/// Moves liquid tokens from one account to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferOperation {
  pub from: AccountName,
  pub to: AccountName,
  pub amount: Asset,
  pub fee: Asset,
  #[serde(default)]
  pub memo: String,
}

impl ByteEncodable for TransferOperation {
  fn write_bytes(
    &self,
    config: &Config,
    out: &mut dyn Write,
  ) -> Result<(), Error> {
    encoding::write_varuint(out, self.id() as u64)?;
    self.from.write_bytes(config, out)?;
    self.to.write_bytes(config, out)?;
    self.amount.write_bytes(config, out)?;
    self.fee.write_bytes(config, out)?;
    encoding::write_str(out, &self.memo, config.charset)
  }
}

impl OperationBody for TransferOperation {
  fn id(&self) -> u32 {
    0
  }

  fn required_authorities(&self, into: &mut RequiredAuthorities) {
    require(into, self.from.clone(), KeyRole::Active);
  }

  fn validate(&self, validation: ValidationType) -> Result<(), Error> {
    if validation.checks_assets() {
      check_asset_positive("amount", &self.amount)?;
      check_asset_non_negative("fee", &self.fee)?;
    }
    if validation.checks_fields() {
      check_length("memo", &self.memo, MAX_MEMO_LENGTH)?;
    }
    Ok(())
  }
}

/// Converts liquid tokens into vesting shares of the receiving account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferToVestingOperation {
  pub from: AccountName,
  pub to: AccountName,
  pub amount: Asset,
  pub fee: Asset,
}

impl ByteEncodable for TransferToVestingOperation {
  fn write_bytes(
    &self,
    config: &Config,
    out: &mut dyn Write,
  ) -> Result<(), Error> {
    encoding::write_varuint(out, self.id() as u64)?;
    self.from.write_bytes(config, out)?;
    self.to.write_bytes(config, out)?;
    self.amount.write_bytes(config, out)?;
    self.fee.write_bytes(config, out)
  }
}

impl OperationBody for TransferToVestingOperation {
  fn id(&self) -> u32 {
    1
  }

  fn required_authorities(&self, into: &mut RequiredAuthorities) {
    require(into, self.from.clone(), KeyRole::Active);
  }

  fn validate(&self, validation: ValidationType) -> Result<(), Error> {
    if validation.checks_assets() {
      check_asset_positive("amount", &self.amount)?;
      check_asset_non_negative("fee", &self.fee)?;
    }
    Ok(())
  }
}
