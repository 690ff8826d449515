mod common;
use {
  beowulf_primitives::{Authority, ByteEncodable, Config, Error},
  common::{key, name, permutations},
  std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
  },
};

fn hash_of(authority: &Authority) -> u64 {
  let mut hasher = DefaultHasher::new();
  authority.hash(&mut hasher);
  hasher.finish()
}

#[test]
fn insertion_order_is_irrelevant() -> anyhow::Result<()> {
  let config = Config::default();
  let accounts = [("alice", 1), ("bob", 2), ("carol", 3), ("dave", 4)];
  let keys = [(0, 5), (1, 6), (2, 7)];

  let mut reference = Authority::with_threshold(3)?;
  for (account, weight) in accounts {
    reference.add_account_auth(name(account), weight);
  }
  for (index, weight) in keys {
    reference.add_key_auth(key(index), weight);
  }
  let reference_bytes = reference.to_bytes(&config)?;

  for account_order in permutations(&accounts) {
    for key_order in permutations(&keys) {
      let mut authority = Authority::with_threshold(3)?;
      for (index, weight) in key_order.iter().copied() {
        authority.add_key_auth(key(index), weight);
      }
      for (account, weight) in account_order.iter().copied() {
        authority.add_account_auth(name(account), weight);
      }

      assert_eq!(authority, reference);
      assert_eq!(hash_of(&authority), hash_of(&reference));
      assert_eq!(authority.to_bytes(&config)?, reference_bytes);
    }
  }
  Ok(())
}

#[test]
fn any_difference_breaks_equality() -> anyhow::Result<()> {
  let mut a = Authority::new();
  a.add_account_auth(name("alice"), 1);
  a.add_key_auth(key(0), 1);

  let mut threshold = a.clone();
  threshold.set_weight_threshold(2)?;
  assert_ne!(a, threshold);

  let mut weight = a.clone();
  weight.add_account_auth(name("alice"), 2);
  assert_ne!(a, weight);

  let mut extra = a.clone();
  extra.add_key_auth(key(1), 1);
  assert_ne!(a, extra);

  let mut removed = extra.clone();
  removed.remove_key_auth(&key(1));
  assert_eq!(a, removed);
  assert_eq!(hash_of(&a), hash_of(&removed));
  Ok(())
}

#[test]
fn impossibility_boundary() -> anyhow::Result<()> {
  let mut authority = Authority::with_threshold(10)?;
  authority.add_account_auth(name("alice"), 4);
  authority.add_key_auth(key(0), 5);
  assert!(authority.is_impossible());
  assert!(!authority.is_empty());

  authority.add_key_auth(key(1), 1);
  assert!(!authority.is_impossible());

  authority.remove_account_auth(&name("alice"));
  assert!(authority.is_impossible());
  Ok(())
}

#[test]
fn threshold_never_drops_below_one() {
  assert!(matches!(
    Authority::with_threshold(0),
    Err(Error::InvalidParameter(_))
  ));

  let mut authority = Authority::new();
  assert_eq!(authority.weight_threshold(), 1);
  assert!(authority.set_weight_threshold(0).is_err());
  assert_eq!(authority.weight_threshold(), 1);
  assert!(authority.is_empty());
  assert!(authority.is_impossible());
}

#[test]
fn single_account_layout() -> anyhow::Result<()> {
  let mut authority = Authority::new();
  authority.add_account_auth(name("alice"), 1);
  assert_eq!(
    hex::encode(authority.to_bytes(&Config::default())?),
    "010000000105616c696365010000"
  );
  Ok(())
}

#[test]
fn node_json_shape() -> anyhow::Result<()> {
  let json = format!(
    r#"{{
      "weight_threshold": 2,
      "account_auths": [["bob", 1], ["alice", 1]],
      "key_auths": [["{}", 2]]
    }}"#,
    common::KEYS[0]
  );
  let authority: Authority = serde_json::from_str(&json)?;
  assert_eq!(authority.weight_threshold(), 2);
  assert_eq!(authority.account_auths().len(), 2);
  assert_eq!(authority.key_auths().get(&key(0)), Some(&2));

  // pairs come back in canonical order
  let value = serde_json::to_value(&authority)?;
  assert_eq!(value["account_auths"][0][0], "alice");
  assert_eq!(value["account_auths"][1][0], "bob");
  assert_eq!(value["key_auths"][0][0], common::KEYS[0]);

  let duplicated = r#"{
    "weight_threshold": 1,
    "account_auths": [["alice", 1], ["alice", 2]]
  }"#;
  assert!(serde_json::from_str::<Authority>(duplicated).is_err());

  let zero = r#"{"weight_threshold": 0}"#;
  assert!(serde_json::from_str::<Authority>(zero).is_err());
  Ok(())
}
