use {
  beowulf_primitives::{Charset, Config, ValidationType},
  clap::{Parser, Subcommand, ValueEnum},
  std::path::PathBuf,
};

/// Beowulf transaction toolkit
///
/// Produces the canonical bytes, ids and signing digests of authorities
/// and transactions described as node-style JSON.
#[derive(Debug, Parser)]
pub struct CliOptions {
  /// Character set used for string fields
  #[clap(long, default_value = "UTF-8", value_name = "CHARSET")]
  charset: Charset,

  /// Prefix of public key addresses on the target network
  #[clap(long, default_value = "BEO", value_name = "PREFIX")]
  address_prefix: String,

  /// Hex encoded 32 byte chain id, all zeroes when omitted
  #[clap(long, value_name = "HEX")]
  chain_id: Option<String>,

  #[clap(subcommand)]
  pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
  /// Encodes an authority and reports whether it can be satisfied
  EncodeAuthority {
    /// JSON file holding the authority, `-` for stdin
    path: PathBuf,
  },

  /// Validates and encodes a transaction, printing its id, signing
  /// digest and required signers
  EncodeTransaction {
    /// JSON file holding the transaction, `-` for stdin
    path: PathBuf,

    #[clap(long, value_enum, default_value = "all")]
    validation: Validation,
  },

  /// Derives the block reference fields from a block id
  BlockRef {
    /// Hex encoded 20 byte block id
    block_id: String,
  },

  /// Renders a compressed public key as an address
  Address {
    /// Hex encoded 33 byte compressed secp256k1 point
    key: String,
  },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Validation {
  All,
  SkipAssets,
  None,
}

impl From<Validation> for ValidationType {
  fn from(value: Validation) -> Self {
    match value {
      Validation::All => ValidationType::All,
      Validation::SkipAssets => ValidationType::SkipAssetValidation,
      Validation::None => ValidationType::SkipValidation,
    }
  }
}

impl CliOptions {
  /// Encoding context assembled from the global flags.
  pub fn config(&self) -> anyhow::Result<Config> {
    let mut chain_id = [0u8; 32];
    if let Some(hex_id) = &self.chain_id {
      let bytes = hex::decode(hex_id)?;
      if bytes.len() != chain_id.len() {
        anyhow::bail!("chain id must be 32 bytes, got {}", bytes.len());
      }
      chain_id.copy_from_slice(&bytes);
    }

    Ok(Config {
      charset: self.charset,
      address_prefix: self.address_prefix.clone(),
      chain_id,
    })
  }
}
