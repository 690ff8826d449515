use {
  crate::{ByteEncodable, Config, Error, Ripemd160},
  serde::{Deserialize, Serialize},
  std::{
    cmp::Ordering,
    fmt::{Debug, Display},
    hash::{Hash, Hasher},
    io::Write,
    str::FromStr,
  },
};

pub const DEFAULT_ADDRESS_PREFIX: &str = "BEO";

const COMPRESSED_KEY_LEN: usize = 33;
const CHECKSUM_LEN: usize = 4;

/// A compressed secp256k1 public key together with its textual address.
///
/// The address is `prefix ++ base58(key ++ checksum)` where the checksum is
/// the first four bytes of the RIPEMD-160 of the key. Equality, hashing and
/// ordering all go through the address, because that is the order in which
/// keys are encoded inside authorities. On the wire the key is written as
/// its raw 33 bytes.
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PublicKey {
  key: [u8; COMPRESSED_KEY_LEN],
  address: String,
}

impl PublicKey {
  /// Wraps a SEC1 compressed key, rendering its address with `prefix`.
  pub fn from_compressed(key: &[u8], prefix: &str) -> Result<Self, Error> {
    let key: [u8; COMPRESSED_KEY_LEN] = key.try_into().map_err(|_| {
      Error::InvalidPublicKey(hex::encode(key), "expected 33 compressed bytes")
    })?;

    // SEC1 also knows 33-byte compact points (tag 0x05), which the chain
    // does not accept
    if !matches!(key[0], 0x02 | 0x03) {
      return Err(Error::InvalidPublicKey(
        hex::encode(key),
        "expected a compressed point tag",
      ));
    }
    if k256::PublicKey::from_sec1_bytes(&key).is_err() {
      return Err(Error::InvalidPublicKey(
        hex::encode(key),
        "not a point on secp256k1",
      ));
    }

    let mut payload = key.to_vec();
    payload.extend_from_slice(&checksum(&key));
    let address = format!("{prefix}{}", bs58::encode(payload).into_string());

    Ok(Self { key, address })
  }

  /// Parses an address such as `BEO5p78k...`.
  ///
  /// The prefix is the leading run of ASCII letters. The base58 body of
  /// a compressed key always starts with a digit, so the split is
  /// unambiguous.
  pub fn from_address(address: &str) -> Result<Self, Error> {
    let invalid = |reason| Error::InvalidPublicKey(address.to_owned(), reason);

    let split = address
      .find(|c: char| !c.is_ascii_alphabetic())
      .ok_or_else(|| invalid("missing key body"))?;
    let (prefix, body) = address.split_at(split);
    if prefix.is_empty() {
      return Err(invalid("missing address prefix"));
    }

    let payload = bs58::decode(body)
      .into_vec()
      .map_err(|_| invalid("malformed base58"))?;
    if payload.len() != COMPRESSED_KEY_LEN + CHECKSUM_LEN {
      return Err(invalid("unexpected length"));
    }

    let (key, check) = payload.split_at(COMPRESSED_KEY_LEN);
    if checksum(key) != check {
      return Err(invalid("checksum mismatch"));
    }

    Self::from_compressed(key, prefix)
  }

  /// Same key rendered for a network with a different address prefix.
  pub fn with_prefix(&self, prefix: &str) -> Self {
    let mut payload = self.key.to_vec();
    payload.extend_from_slice(&checksum(&self.key));
    Self {
      key: self.key,
      address: format!("{prefix}{}", bs58::encode(payload).into_string()),
    }
  }

  pub fn address(&self) -> &str {
    &self.address
  }

  pub fn prefix(&self) -> &str {
    let split = self
      .address
      .find(|c: char| !c.is_ascii_alphabetic())
      .unwrap_or(self.address.len());
    &self.address[..split]
  }

  pub fn as_bytes(&self) -> &[u8; COMPRESSED_KEY_LEN] {
    &self.key
  }
}

fn checksum(key: &[u8]) -> [u8; CHECKSUM_LEN] {
  let digest = Ripemd160::digest(key);
  [digest[0], digest[1], digest[2], digest[3]]
}

impl ByteEncodable for PublicKey {
  fn write_bytes(&self, _: &Config, out: &mut dyn Write) -> Result<(), Error> {
    out.write_all(&self.key)?;
    Ok(())
  }
}

impl PartialEq for PublicKey {
  fn eq(&self, other: &Self) -> bool {
    self.address == other.address
  }
}

impl Eq for PublicKey {}

impl Hash for PublicKey {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.address.hash(state);
  }
}

impl PartialOrd for PublicKey {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for PublicKey {
  fn cmp(&self, other: &Self) -> Ordering {
    self.address.cmp(&other.address)
  }
}

impl Display for PublicKey {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.address)
  }
}

impl Debug for PublicKey {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "pubkey({})", self.address)
  }
}

impl FromStr for PublicKey {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::from_address(s)
  }
}

impl TryFrom<String> for PublicKey {
  type Error = Error;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    Self::from_address(&value)
  }
}

impl From<PublicKey> for String {
  fn from(key: PublicKey) -> Self {
    key.address
  }
}

#[cfg(test)]
mod tests {
  use crate::{ByteEncodable, Config, Error, PublicKey};

  const G: &str =
    "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
  const G_ADDRESS: &str =
    "BEO5p78kHbL33Rn3JWkTWRE2B9uz6gy4r1KbfAKLNQGE3ovMBS5bu";

  #[test]
  fn address_roundtrip() -> anyhow::Result<()> {
    let key = PublicKey::from_compressed(&hex::decode(G)?, "BEO")?;
    assert_eq!(key.address(), G_ADDRESS);
    assert_eq!(key.prefix(), "BEO");

    let parsed: PublicKey = G_ADDRESS.parse()?;
    assert_eq!(parsed, key);
    assert_eq!(parsed.as_bytes().as_slice(), hex::decode(G)?.as_slice());
    Ok(())
  }

  #[test]
  fn other_prefixes() -> anyhow::Result<()> {
    let key: PublicKey = G_ADDRESS.parse()?;
    let test = key.with_prefix("TEST");
    assert_eq!(
      test.address(),
      "TEST5p78kHbL33Rn3JWkTWRE2B9uz6gy4r1KbfAKLNQGE3ovMBS5bu"
    );
    assert_eq!(test.prefix(), "TEST");
    assert_ne!(test, key);
    assert_eq!(test.address().parse::<PublicKey>()?, test);
    Ok(())
  }

  #[test]
  fn rejects_malformed_addresses() {
    // flipped last character breaks the checksum
    let tampered = "BEO5p78kHbL33Rn3JWkTWRE2B9uz6gy4r1KbfAKLNQGE3ovMBS5bv";
    for address in [
      tampered,
      "BEO",
      "5p78kHbL33Rn3JWkTWRE2B9uz6gy4r1KbfAKLNQGE3ovMBS5bu",
      "BEO5p78kHbL33Rn3",
      "BEO0OIl",
    ] {
      let parsed = address.parse::<PublicKey>();
      assert!(
        matches!(parsed, Err(Error::InvalidPublicKey(..))),
        "{address}"
      );
    }
  }

  #[test]
  fn rejects_points_off_the_curve() {
    let mut bytes = hex::decode(G).unwrap();
    assert!(PublicKey::from_compressed(&bytes[..32], "BEO").is_err());

    for tag in [0x00, 0x04, 0x05, 0x06] {
      bytes[0] = tag;
      assert!(
        matches!(
          PublicKey::from_compressed(&bytes, "BEO"),
          Err(Error::InvalidPublicKey(..))
        ),
        "tag {tag:#04x}"
      );
    }

    // the other parity of G is a valid point too
    bytes[0] = 0x03;
    let odd = PublicKey::from_compressed(&bytes, "BEO").unwrap();
    assert_eq!(odd.to_bytes(&Config::default()).unwrap()[0], 0x03);
    assert_eq!(odd.address().parse::<PublicKey>().unwrap(), odd);
  }

  #[test]
  fn encodes_raw_key() -> anyhow::Result<()> {
    let key: PublicKey = G_ADDRESS.parse()?;
    assert_eq!(key.to_bytes(&Config::default())?, hex::decode(G)?);
    Ok(())
  }
}
