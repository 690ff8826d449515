use {
  crate::{encoding, AccountName, ByteEncodable, Config, Error, PublicKey},
  serde::{Deserialize, Serialize},
  std::{collections::BTreeMap, io::Write},
  tracing::trace,
};

/// Weighted set of accounts and keys that must jointly reach a threshold
/// before an action is authorized.
///
/// Every principal contributes its weight when it signs. The authority is
/// satisfied once the sum of the contributing weights is at least
/// `weight_threshold`. The threshold is never lower than one, and it is
/// checked on every mutation rather than when the authority is encoded.
///
/// The weight maps can only be read through immutable views and changed
/// through the explicit mutators below.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "AuthorityRepr", into = "AuthorityRepr")]
pub struct Authority {
  weight_threshold: u64,
  account_auths: BTreeMap<AccountName, u16>,
  key_auths: BTreeMap<PublicKey, u16>,
}

impl Default for Authority {
  fn default() -> Self {
    Self {
      weight_threshold: 1,
      account_auths: BTreeMap::new(),
      key_auths: BTreeMap::new(),
    }
  }
}

impl Authority {
  /// Empty authority with a threshold of one.
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_threshold(weight_threshold: u64) -> Result<Self, Error> {
    let mut authority = Self::default();
    authority.set_weight_threshold(weight_threshold)?;
    Ok(authority)
  }

  pub fn weight_threshold(&self) -> u64 {
    self.weight_threshold
  }

  pub fn set_weight_threshold(&mut self, value: u64) -> Result<(), Error> {
    if value < 1 {
      return Err(Error::InvalidParameter(
        "Weight threshold must not be lower than 1".into(),
      ));
    }
    self.weight_threshold = value;
    Ok(())
  }

  pub fn account_auths(&self) -> &BTreeMap<AccountName, u16> {
    &self.account_auths
  }

  pub fn key_auths(&self) -> &BTreeMap<PublicKey, u16> {
    &self.key_auths
  }

  /// Adds or replaces the weight of an account, returning the
  /// previous weight if any.
  pub fn add_account_auth(
    &mut self,
    account: AccountName,
    weight: u16,
  ) -> Option<u16> {
    self.account_auths.insert(account, weight)
  }

  pub fn remove_account_auth(&mut self, account: &AccountName) -> Option<u16> {
    self.account_auths.remove(account)
  }

  /// Adds or replaces the weight of a key, returning the
  /// previous weight if any.
  pub fn add_key_auth(&mut self, key: PublicKey, weight: u16) -> Option<u16> {
    self.key_auths.insert(key, weight)
  }

  pub fn remove_key_auth(&mut self, key: &PublicKey) -> Option<u16> {
    self.key_auths.remove(key)
  }

  /// True when no account or key is listed.
  pub fn is_empty(&self) -> bool {
    self.account_auths.is_empty() && self.key_auths.is_empty()
  }

  /// True when even the signatures of every listed principal together
  /// cannot reach the threshold.
  ///
  /// Broadcasting such an authority as the owner of an account would
  /// lock that account forever.
  pub fn is_impossible(&self) -> bool {
    self.total_weight() < self.weight_threshold
  }

  fn total_weight(&self) -> u64 {
    self
      .account_auths
      .values()
      .chain(self.key_auths.values())
      .map(|w| *w as u64)
      .sum()
  }
}

impl ByteEncodable for Authority {
  /// `threshold (u32 LE) ++ account auths ++ key auths`, each map as a
  /// varint count followed by `principal ++ weight (u16 LE)` entries in
  /// canonical order.
  ///
  /// The threshold only has 32 bits on the wire. A larger threshold is
  /// rejected instead of being truncated.
  fn write_bytes(
    &self,
    config: &Config,
    out: &mut dyn Write,
  ) -> Result<(), Error> {
    let threshold = u32::try_from(self.weight_threshold)
      .map_err(|_| Error::ThresholdOutOfRange(self.weight_threshold))?;
    trace!(
      "encoding authority with threshold {threshold}, {} accounts, {} keys",
      self.account_auths.len(),
      self.key_auths.len()
    );

    out.write_all(&encoding::encode_u32_le(threshold))?;
    encoding::write_weighted(out, config, &self.account_auths)?;
    encoding::write_weighted(out, config, &self.key_auths)?;
    Ok(())
  }
}

/// Shape of an authority in node responses: the weight maps
/// are arrays of `[principal, weight]` pairs.
#[derive(Serialize, Deserialize)]
struct AuthorityRepr {
  weight_threshold: u64,
  #[serde(default)]
  account_auths: Vec<(AccountName, u16)>,
  #[serde(default)]
  key_auths: Vec<(PublicKey, u16)>,
}

impl TryFrom<AuthorityRepr> for Authority {
  type Error = Error;

  fn try_from(repr: AuthorityRepr) -> Result<Self, Self::Error> {
    let mut authority = Authority::with_threshold(repr.weight_threshold)?;
    for (account, weight) in repr.account_auths {
      if authority.account_auths.contains_key(&account) {
        return Err(Error::InvalidParameter(format!(
          "account {account} listed more than once"
        )));
      }
      authority.add_account_auth(account, weight);
    }
    for (key, weight) in repr.key_auths {
      if authority.key_auths.contains_key(&key) {
        return Err(Error::InvalidParameter(format!(
          "key {key} listed more than once"
        )));
      }
      authority.add_key_auth(key, weight);
    }
    Ok(authority)
  }
}

impl From<Authority> for AuthorityRepr {
  fn from(authority: Authority) -> Self {
    Self {
      weight_threshold: authority.weight_threshold,
      account_auths: authority.account_auths.into_iter().collect(),
      key_auths: authority.key_auths.into_iter().collect(),
    }
  }
}
