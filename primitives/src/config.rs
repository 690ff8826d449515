use {
  crate::{Error, PublicKey},
  std::{borrow::Cow, fmt::Display, str::FromStr},
};

/// Character set used to turn string fields into bytes.
///
/// Must stay fixed for the lifetime of a signing session, otherwise
/// signatures issued before and after the change cover different bytes
/// for the same logical string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Charset {
  #[default]
  Utf8,
  Ascii,
  Latin1,
}

impl Charset {
  /// Encodes a string in this character set. Characters that have no
  /// representation are an error, never replaced.
  pub fn encode<'s>(&self, s: &'s str) -> Result<Cow<'s, [u8]>, Error> {
    match self {
      Charset::Utf8 => Ok(Cow::Borrowed(s.as_bytes())),
      Charset::Ascii => match s.chars().find(|c| !c.is_ascii()) {
        Some(c) => Err(Error::Unrepresentable(c, *self)),
        None => Ok(Cow::Borrowed(s.as_bytes())),
      },
      Charset::Latin1 => s
        .chars()
        .map(|c| match u8::try_from(u32::from(c)) {
          Ok(b) => Ok(b),
          Err(_) => Err(Error::Unrepresentable(c, *self)),
        })
        .collect::<Result<Vec<u8>, _>>()
        .map(Cow::Owned),
    }
  }
}

impl Display for Charset {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(match self {
      Charset::Utf8 => "UTF-8",
      Charset::Ascii => "US-ASCII",
      Charset::Latin1 => "ISO-8859-1",
    })
  }
}

impl FromStr for Charset {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_uppercase().replace('_', "-").as_str() {
      "UTF-8" | "UTF8" => Ok(Charset::Utf8),
      "US-ASCII" | "ASCII" => Ok(Charset::Ascii),
      "ISO-8859-1" | "LATIN1" | "LATIN-1" => Ok(Charset::Latin1),
      _ => Err(Error::InvalidParameter(format!("unknown charset {s}"))),
    }
  }
}

/// Context every encoding entry point receives.
///
/// Encoding is a pure function of the value and this context, there is
/// no process-wide configuration.
#[derive(Debug, Clone)]
pub struct Config {
  /// Character set applied to every string field.
  pub charset: Charset,

  /// Prefix of the textual form of public keys, e.g. `BEO` on mainnet.
  pub address_prefix: String,

  /// Identifier of the target network. It is prepended to the
  /// serialized transaction when computing the digest to sign.
  pub chain_id: [u8; 32],
}

impl Default for Config {
  fn default() -> Self {
    Self {
      charset: Charset::Utf8,
      address_prefix: crate::key::DEFAULT_ADDRESS_PREFIX.into(),
      chain_id: [0u8; 32],
    }
  }
}

impl Config {
  /// Builds a public key from its compressed point and renders it with
  /// this network's address prefix.
  pub fn public_key(&self, compressed: &[u8]) -> Result<PublicKey, Error> {
    PublicKey::from_compressed(compressed, &self.address_prefix)
  }
}
