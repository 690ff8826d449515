use {crate::Charset, thiserror::Error};

#[derive(Debug, Error)]
pub enum Error {
  #[error("Invalid parameter: {0}")]
  InvalidParameter(String),

  #[error("Invalid transaction encoding: {0}")]
  InvalidTransactionEncoding(#[from] std::io::Error),

  #[error("Invalid hash: {0}")]
  InvalidHash(String),

  #[error("Invalid varint: {0}")]
  InvalidVarint(#[from] unsigned_varint::decode::Error),

  #[error("Invalid account name '{0}': {1}")]
  InvalidAccountName(String, &'static str),

  #[error("Invalid public key '{0}': {1}")]
  InvalidPublicKey(String, &'static str),

  #[error("Invalid asset '{0}': {1}")]
  InvalidAsset(String, &'static str),

  #[error("Character {0:?} cannot be represented in {1}")]
  Unrepresentable(char, Charset),

  #[error(
    "Weight threshold {0} does not fit into the 32 bits reserved for it on \
     the wire"
  )]
  ThresholdOutOfRange(u64),
}

impl From<hex::FromHexError> for Error {
  fn from(e: hex::FromHexError) -> Self {
    Error::InvalidHash(e.to_string())
  }
}
