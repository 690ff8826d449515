use {
  super::{
    check_asset_non_negative,
    check_length,
    require,
    KeyRole,
    OperationBody,
    RequiredAuthorities,
    ValidationType,
  },
  crate::{
    encoding,
    AccountName,
    Asset,
    Authority,
    ByteEncodable,
    Config,
    Error,
  },
  serde::{Deserialize, Serialize},
  std::io::Write,
  tracing::debug,
};

pub const MAX_JSON_METADATA_LENGTH: usize = 8192;

/// Refuses authorities nobody could ever satisfy. An account whose owner
/// authority is impossible can never be used or recovered again.
fn check_possible(field: &str, authority: &Authority) -> Result<(), Error> {
  if authority.is_impossible() {
    debug!("rejecting impossible {field} authority: {authority:?}");
    return Err(Error::InvalidParameter(format!(
      "{field} authority is impossible to satisfy"
    )));
  }
  Ok(())
}

/// Metadata is free-form, but whatever is set has to be a JSON document.
fn check_json_metadata(value: &str) -> Result<(), Error> {
  check_length("json_metadata", value, MAX_JSON_METADATA_LENGTH)?;
  if value.is_empty() {
    return Ok(());
  }
  match serde_json::from_str::<serde_json::Value>(value) {
    Ok(_) => Ok(()),
    Err(e) => Err(Error::InvalidParameter(format!(
      "json_metadata is not valid JSON: {e}"
    ))),
  }
}

/// Creates a new account, paid for by `creator`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountCreateOperation {
  pub fee: Asset,
  pub creator: AccountName,
  pub new_account_name: AccountName,
  pub owner: Authority,
  #[serde(default)]
  pub json_metadata: String,
}

impl ByteEncodable for AccountCreateOperation {
  fn write_bytes(
    &self,
    config: &Config,
    out: &mut dyn Write,
  ) -> Result<(), Error> {
    encoding::write_varuint(out, self.id() as u64)?;
    self.fee.write_bytes(config, out)?;
    self.creator.write_bytes(config, out)?;
    self.new_account_name.write_bytes(config, out)?;
    self.owner.write_bytes(config, out)?;
    encoding::write_str(out, &self.json_metadata, config.charset)
  }
}

impl OperationBody for AccountCreateOperation {
  fn id(&self) -> u32 {
    7
  }

  fn required_authorities(&self, into: &mut RequiredAuthorities) {
    require(into, self.creator.clone(), KeyRole::Active);
  }

  fn validate(&self, validation: ValidationType) -> Result<(), Error> {
    if validation.checks_assets() {
      check_asset_non_negative("fee", &self.fee)?;
    }
    if validation.checks_fields() {
      check_possible("owner", &self.owner)?;
      check_json_metadata(&self.json_metadata)?;
    }
    Ok(())
  }
}

/// Changes the owner authority and/or metadata of an existing account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountUpdateOperation {
  pub account: AccountName,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub owner: Option<Authority>,
  #[serde(default)]
  pub json_metadata: String,
  pub fee: Asset,
}

impl ByteEncodable for AccountUpdateOperation {
  fn write_bytes(
    &self,
    config: &Config,
    out: &mut dyn Write,
  ) -> Result<(), Error> {
    encoding::write_varuint(out, self.id() as u64)?;
    self.account.write_bytes(config, out)?;
    self.owner.write_bytes(config, out)?;
    encoding::write_str(out, &self.json_metadata, config.charset)?;
    self.fee.write_bytes(config, out)
  }
}

impl OperationBody for AccountUpdateOperation {
  fn id(&self) -> u32 {
    3
  }

  /// Replacing the owner authority takes the current owner, anything
  /// else the active key.
  fn required_authorities(&self, into: &mut RequiredAuthorities) {
    let role = match self.owner {
      Some(_) => KeyRole::Owner,
      None => KeyRole::Active,
    };
    require(into, self.account.clone(), role);
  }

  fn validate(&self, validation: ValidationType) -> Result<(), Error> {
    if validation.checks_assets() {
      check_asset_non_negative("fee", &self.fee)?;
    }
    if validation.checks_fields() {
      if let Some(owner) = &self.owner {
        check_possible("owner", owner)?;
      }
      check_json_metadata(&self.json_metadata)?;
    }
    Ok(())
  }
}
