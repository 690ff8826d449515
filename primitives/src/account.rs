use {
  crate::{encoding, ByteEncodable, Config, Error},
  serde::{Deserialize, Serialize},
  std::{
    fmt::{Debug, Display},
    io::Write,
    str::FromStr,
  },
};

pub const MIN_ACCOUNT_NAME_LENGTH: usize = 3;
pub const MAX_ACCOUNT_NAME_LENGTH: usize = 16;

/// Name of an account on chain.
///
/// Names are between 3 and 16 characters long and made of dot-separated
/// segments. Every segment is at least 3 characters, starts with a lowercase
/// letter, ends with a lowercase letter or digit, and in between only
/// contains lowercase letters, digits and hyphens.
///
/// Ordering is lexicographic on the name, which is also the order in which
/// account names are encoded inside authorities.
#[derive(
  Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct AccountName(String);

impl AccountName {
  pub fn new(name: impl Into<String>) -> Result<Self, Error> {
    let name = name.into();
    match validate(&name) {
      Ok(()) => Ok(Self(name)),
      Err(reason) => Err(Error::InvalidAccountName(name, reason)),
    }
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

fn validate(name: &str) -> Result<(), &'static str> {
  if name.len() < MIN_ACCOUNT_NAME_LENGTH {
    return Err("too short");
  }
  if name.len() > MAX_ACCOUNT_NAME_LENGTH {
    return Err("too long");
  }

  for segment in name.split('.') {
    let bytes = segment.as_bytes();
    if bytes.len() < MIN_ACCOUNT_NAME_LENGTH {
      return Err("each segment must be at least 3 characters");
    }
    if !bytes[0].is_ascii_lowercase() {
      return Err("each segment must start with a lowercase letter");
    }
    let last = bytes[bytes.len() - 1];
    if !(last.is_ascii_lowercase() || last.is_ascii_digit()) {
      return Err("each segment must end with a lowercase letter or digit");
    }
    if !bytes
      .iter()
      .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-')
    {
      return Err("only lowercase letters, digits and hyphens are allowed");
    }
  }
  Ok(())
}

impl ByteEncodable for AccountName {
  fn write_bytes(
    &self,
    config: &Config,
    out: &mut dyn Write,
  ) -> Result<(), Error> {
    encoding::write_str(out, &self.0, config.charset)
  }
}

impl AsRef<str> for AccountName {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

impl Display for AccountName {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.0)
  }
}

impl Debug for AccountName {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "account({})", self.0)
  }
}

impl FromStr for AccountName {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::new(s)
  }
}

impl TryFrom<String> for AccountName {
  type Error = Error;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    Self::new(value)
  }
}

impl From<AccountName> for String {
  fn from(name: AccountName) -> Self {
    name.0
  }
}

#[cfg(test)]
mod tests {
  use crate::{AccountName, ByteEncodable, Config};

  #[test]
  fn valid_names() {
    let valid = ["bob", "beowulf", "alice-01", "init.miner", "abc.def.ghi"];
    for name in valid {
      assert!(name.parse::<AccountName>().is_ok(), "{name}");
    }
  }

  #[test]
  fn invalid_names() {
    for name in [
      "",
      "ab",
      "Alice",
      "1abc",
      "abc-",
      "abc.de",
      "averyveryverylongname",
      "ali_ce",
      "abc..def",
      ".abc",
    ] {
      assert!(name.parse::<AccountName>().is_err(), "{name}");
    }
  }

  #[test]
  fn encodes_as_length_prefixed_string() {
    let name: AccountName = "beowulf".parse().unwrap();
    assert_eq!(name.to_bytes(&Config::default()).unwrap(), b"\x07beowulf");
  }

  #[test]
  fn serde_validates() {
    let name: AccountName = serde_json::from_str("\"alice\"").unwrap();
    assert_eq!(name.as_str(), "alice");
    assert!(serde_json::from_str::<AccountName>("\"Al\"").is_err());
    assert_eq!(serde_json::to_string(&name).unwrap(), "\"alice\"");
  }
}
