use {
  crate::cli::{CliOptions, Command},
  beowulf_primitives::{
    Authority,
    BlockId,
    BlockReference,
    ByteEncodable,
    Principal,
    Transaction,
  },
  clap::Parser,
  serde::de::DeserializeOwned,
  std::{fs, io::Read, path::Path},
  tracing::{info, subscriber::set_global_default},
  tracing_subscriber::{EnvFilter, FmtSubscriber},
};

mod cli;

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
  let content = if path.as_os_str() == "-" {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    buffer
  } else {
    fs::read_to_string(path)?
  };
  Ok(serde_json::from_str(&content)?)
}

fn main() -> anyhow::Result<()> {
  set_global_default(
    FmtSubscriber::builder()
      .with_env_filter(EnvFilter::from_default_env())
      .with_writer(std::io::stderr)
      .finish(),
  )?;

  let opts = CliOptions::parse();
  info!("Options: {opts:?}");
  let config = opts.config()?;

  match opts.command {
    Command::EncodeAuthority { path } => {
      let authority: Authority = read_json(&path)?;
      if authority.is_impossible() {
        info!("authority can never reach its threshold: {authority:?}");
      }
      println!("bytes: {}", hex::encode(authority.to_bytes(&config)?));
      println!("empty: {}", authority.is_empty());
      println!("impossible: {}", authority.is_impossible());
    }
    Command::EncodeTransaction { path, validation } => {
      let transaction: Transaction = read_json(&path)?;
      transaction.validate(validation.into())?;
      info!(
        "transaction with {} operations is valid",
        transaction.operations().len()
      );

      println!("bytes: {}", hex::encode(transaction.to_bytes(&config)?));
      println!("id: {}", transaction.id(&config)?);
      println!(
        "digest: {}",
        hex::encode(transaction.signing_digest(&config)?)
      );
      for (principal, role) in transaction.required_authorities() {
        let signer = match principal {
          Principal::Account(account) => account.to_string(),
          Principal::Key(key) => {
            key.with_prefix(&config.address_prefix).to_string()
          }
        };
        println!("signer: {signer} ({role:?})");
      }
    }
    Command::BlockRef { block_id } => {
      let block_id: BlockId = block_id.parse()?;
      let reference = BlockReference::from(&block_id);
      println!("block: {}", block_id.leading_prefix_u32());
      println!("ref_block_num: {}", reference.ref_block_num);
      println!("ref_block_prefix: {}", reference.ref_block_prefix);
    }
    Command::Address { key } => {
      let key = config.public_key(&hex::decode(key)?)?;
      println!("{key}");
    }
  }

  Ok(())
}
