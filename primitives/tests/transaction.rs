mod common;
use {
  beowulf_primitives::{
    AccountUpdateOperation,
    Authority,
    BlockId,
    BlockReference,
    ByteEncodable,
    Config,
    KeyRole,
    Principal,
    RegularOperation,
    Transaction,
    TransferOperation,
    ValidationType,
  },
  common::{key, name},
  time::macros::datetime,
};

fn transfer(from: &str, to: &str, amount: &str) -> RegularOperation {
  RegularOperation::Transfer(TransferOperation {
    from: name(from),
    to: name(to),
    amount: amount.parse().unwrap(),
    fee: "0.00000 W".parse().unwrap(),
    memo: String::new(),
  })
}

fn owner_change(account: &str) -> RegularOperation {
  let mut owner = Authority::new();
  owner.add_key_auth(key(2), 1);
  RegularOperation::AccountUpdate(AccountUpdateOperation {
    account: name(account),
    owner: Some(owner),
    json_metadata: String::new(),
    fee: "0.01000 W".parse().unwrap(),
  })
}

fn head_block() -> BlockReference {
  let id: BlockId = "0001e240a1b2c3d4e5f60718293a4b5c6d7e8f90".parse().unwrap();
  BlockReference::from(&id)
}

#[test]
fn strongest_role_wins() {
  let mut tx = Transaction::new(head_block(), datetime!(2019-01-01 0:00 UTC));
  tx.push(transfer("alice", "bob", "1.00000 BWF"))
    .push(owner_change("alice"))
    .push(transfer("bob", "alice", "0.50000 BWF"));

  let required = tx.required_authorities();
  assert_eq!(required.len(), 2);
  assert_eq!(
    required.get(&Principal::Account(name("alice"))),
    Some(&KeyRole::Owner)
  );
  assert_eq!(
    required.get(&Principal::Account(name("bob"))),
    Some(&KeyRole::Active)
  );
}

#[test]
fn operation_order_changes_the_id() -> anyhow::Result<()> {
  let config = Config::default();
  let expiration = datetime!(2019-01-01 0:00 UTC);

  let mut first = Transaction::new(head_block(), expiration);
  first
    .push(transfer("alice", "bob", "1.00000 BWF"))
    .push(transfer("bob", "alice", "0.50000 BWF"));

  let mut second = Transaction::new(head_block(), expiration);
  second
    .push(transfer("bob", "alice", "0.50000 BWF"))
    .push(transfer("alice", "bob", "1.00000 BWF"));

  assert_eq!(first.required_authorities(), second.required_authorities());
  assert_ne!(first.id(&config)?, second.id(&config)?);
  Ok(())
}

#[test]
fn validation_levels() {
  let mut tx = Transaction::new(head_block(), datetime!(2019-01-01 0:00 UTC));
  tx.push(transfer("alice", "bob", "-1.00000 BWF"));

  assert!(tx.validate(ValidationType::All).is_err());
  assert!(tx.validate(ValidationType::SkipAssetValidation).is_ok());
  assert!(tx.validate(ValidationType::SkipValidation).is_ok());
}

#[test]
fn json_roundtrip() -> anyhow::Result<()> {
  let mut tx = Transaction::new(head_block(), datetime!(2019-01-01 0:00 UTC));
  tx.push(transfer("alice", "bob", "1.00000 BWF"))
    .push(owner_change("alice"));

  let json = serde_json::to_value(&tx)?;
  assert_eq!(json["ref_block_num"], 0xe240);
  assert_eq!(json["ref_block_prefix"], 0xd4c3b2a1u32);
  assert_eq!(json["expiration"], "2019-01-01T00:00:00");
  assert_eq!(json["operations"][0]["type"], "transfer_operation");
  assert_eq!(json["operations"][1]["type"], "account_update_operation");
  assert_eq!(
    json["operations"][1]["value"]["owner"]["key_auths"][0][0],
    common::KEYS[2]
  );

  let back: Transaction = serde_json::from_value(json)?;
  assert_eq!(back, tx);

  let config = Config::default();
  assert_eq!(back.to_bytes(&config)?, tx.to_bytes(&config)?);
  Ok(())
}
