use {
  crate::{
    encoding,
    operation::{RegularOperation, RequiredAuthorities, ValidationType},
    BlockId,
    ByteEncodable,
    Config,
    Error,
    TransactionId,
  },
  multihash::{Code, MultihashDigest},
  serde::{Deserialize, Serialize},
  std::io::Write,
  time::OffsetDateTime,
  tracing::debug,
};

/// Ties a transaction to a recent block so it cannot be replayed on a
/// fork that does not contain that block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockReference {
  /// Lower 16 bits of the referenced block number.
  pub ref_block_num: u16,

  /// Bytes 4..8 of the referenced block id, read as little-endian.
  pub ref_block_prefix: u32,
}

impl From<&BlockId> for BlockReference {
  fn from(block_id: &BlockId) -> Self {
    Self {
      ref_block_num: (block_id.leading_prefix_u32() & 0xffff) as u16,
      ref_block_prefix: block_id.ref_block_prefix(),
    }
  }
}

/// A list of user-authored operations that are signed and broadcast
/// together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
  ref_block_num: u16,
  ref_block_prefix: u32,

  /// Time after which the network rejects the transaction.
  #[serde(with = "crate::timestamp")]
  expiration: OffsetDateTime,

  /// Only regular operations can be broadcast, virtual ones
  /// have no place here.
  operations: Vec<RegularOperation>,
}

impl Transaction {
  pub fn new(reference: BlockReference, expiration: OffsetDateTime) -> Self {
    Self {
      ref_block_num: reference.ref_block_num,
      ref_block_prefix: reference.ref_block_prefix,
      expiration,
      operations: vec![],
    }
  }

  pub fn push(&mut self, operation: RegularOperation) -> &mut Self {
    self.operations.push(operation);
    self
  }

  pub fn operations(&self) -> &[RegularOperation] {
    &self.operations
  }

  pub fn expiration(&self) -> OffsetDateTime {
    self.expiration
  }

  pub fn set_expiration(&mut self, expiration: OffsetDateTime) {
    self.expiration = expiration;
  }

  pub fn ref_block_num(&self) -> u16 {
    self.ref_block_num
  }

  pub fn ref_block_prefix(&self) -> u32 {
    self.ref_block_prefix
  }

  pub fn block_reference(&self) -> BlockReference {
    BlockReference {
      ref_block_num: self.ref_block_num,
      ref_block_prefix: self.ref_block_prefix,
    }
  }

  /// Every principal that must sign this transaction, with the
  /// strongest role any of its operations demands from it.
  pub fn required_authorities(&self) -> RequiredAuthorities {
    self
      .operations
      .iter()
      .fold(RequiredAuthorities::new(), |acc, op| {
        op.required_authorities(acc)
      })
  }

  /// Checks run before a transaction is signed and broadcast.
  pub fn validate(&self, validation: ValidationType) -> Result<(), Error> {
    if self.operations.is_empty() {
      return Err(Error::InvalidParameter(
        "A transaction needs at least one operation".into(),
      ));
    }
    for op in &self.operations {
      op.validate(validation)?;
    }
    Ok(())
  }

  /// Leading 20 bytes of the SHA-256 of the canonical encoding.
  pub fn id(&self, config: &Config) -> Result<TransactionId, Error> {
    let bytes = self.to_bytes(config)?;
    let digest = Code::Sha2_256.digest(&bytes);
    TransactionId::from_bytes(&digest.digest()[..TransactionId::LEN])
  }

  /// SHA-256 of `chain_id ++ encoding`, the message signers sign.
  pub fn signing_digest(&self, config: &Config) -> Result<[u8; 32], Error> {
    let mut message = config.chain_id.to_vec();
    self.write_bytes(config, &mut message)?;

    let mut digest = [0u8; 32];
    digest.copy_from_slice(Code::Sha2_256.digest(&message).digest());
    Ok(digest)
  }
}

impl ByteEncodable for Transaction {
  /// `ref_block_num (u16 LE) ++ ref_block_prefix (u32 LE) ++ expiration
  /// (u32 LE unix seconds) ++ operations ++ extensions`. No extensions are
  /// supported, so their count is always zero.
  fn write_bytes(
    &self,
    config: &Config,
    out: &mut dyn Write,
  ) -> Result<(), Error> {
    let expiration = u32::try_from(self.expiration.unix_timestamp())
      .map_err(|_| {
        Error::InvalidParameter(format!(
          "expiration {} cannot be expressed in 32 bits",
          self.expiration
        ))
      })?;
    debug!(
      "encoding transaction with {} operations, expiring at {expiration}",
      self.operations.len()
    );

    out.write_all(&encoding::encode_u16_le(self.ref_block_num))?;
    out.write_all(&encoding::encode_u32_le(self.ref_block_prefix))?;
    out.write_all(&encoding::encode_u32_le(expiration))?;
    encoding::write_varuint(out, self.operations.len() as u64)?;
    for op in &self.operations {
      op.write_bytes(config, out)?;
    }
    encoding::write_varuint(out, 0)
  }
}
