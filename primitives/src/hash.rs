use {
  crate::{ByteEncodable, Config, Error},
  multihash::{Code, MultihashDigest},
  serde::{de, Deserialize, Deserializer, Serialize, Serializer},
  std::{
    fmt::{Debug, Display},
    io::Write,
    ops::Deref,
    str::FromStr,
  },
};

/// A 20-byte hash as used by the chain for block and transaction ids.
///
/// The textual form is lowercase hex in the hash's native byte order.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Ripemd160([u8; Ripemd160::LEN]);

/// Block ids embed the block number in their first four bytes.
pub type BlockId = Ripemd160;

/// Transaction ids are the leading 20 bytes of the SHA-256 of the
/// serialized transaction.
pub type TransactionId = Ripemd160;

impl Ripemd160 {
  pub const LEN: usize = 20;

  pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
    let inner: [u8; Self::LEN] = bytes.try_into().map_err(|_| {
      Error::InvalidHash(format!(
        "expected {} bytes, got {}",
        Self::LEN,
        bytes.len()
      ))
    })?;
    Ok(Self(inner))
  }

  pub fn from_hex(s: &str) -> Result<Self, Error> {
    Self::from_bytes(&hex::decode(s)?)
  }

  pub fn to_hex(&self) -> String {
    hex::encode(self.0)
  }

  /// RIPEMD-160 digest of `data`.
  pub fn digest(data: &[u8]) -> Self {
    let mut inner = [0u8; Self::LEN];
    inner.copy_from_slice(Code::Ripemd160.digest(data).digest());
    Self(inner)
  }

  /// Big-endian integer formed by the first four bytes.
  ///
  /// Note that this reads the bytes in the opposite order of
  /// [`Ripemd160::ref_block_prefix`]. For block ids this is the
  /// block number.
  pub fn leading_prefix_u32(&self) -> u32 {
    u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
  }

  /// Little-endian integer formed by bytes 4..8, the value transactions
  /// carry as `ref_block_prefix` when referencing this block id.
  pub fn ref_block_prefix(&self) -> u32 {
    u32::from_le_bytes([self.0[4], self.0[5], self.0[6], self.0[7]])
  }
}

impl ByteEncodable for Ripemd160 {
  fn write_bytes(&self, _: &Config, out: &mut dyn Write) -> Result<(), Error> {
    out.write_all(&self.0)?;
    Ok(())
  }
}

impl AsRef<[u8]> for Ripemd160 {
  fn as_ref(&self) -> &[u8] {
    &self.0
  }
}

impl Deref for Ripemd160 {
  type Target = [u8];

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl Display for Ripemd160 {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.to_hex())
  }
}

impl Debug for Ripemd160 {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "ripemd160({})", self.to_hex())
  }
}

impl FromStr for Ripemd160 {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::from_hex(s)
  }
}

impl Serialize for Ripemd160 {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&self.to_hex())
  }
}

impl<'de> Deserialize<'de> for Ripemd160 {
  fn deserialize<D: Deserializer<'de>>(
    deserializer: D,
  ) -> Result<Self, D::Error> {
    let s = String::deserialize(deserializer)?;
    Self::from_hex(&s).map_err(de::Error::custom)
  }
}
