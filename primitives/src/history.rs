use {
  crate::{Operation, TransactionId},
  serde::{
    de::{self, Unexpected, Visitor},
    Deserialize,
    Deserializer,
    Serialize,
  },
  std::collections::BTreeMap,
  time::OffsetDateTime,
};

/// An operation as it was applied to the ledger, together with its
/// position in the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedOperation {
  /// All zeroes for virtual operations.
  pub trx_id: TransactionId,
  pub block: u32,
  pub trx_in_block: u32,
  pub op_in_trx: u32,
  pub virtual_op: u64,
  #[serde(with = "crate::timestamp")]
  pub timestamp: OffsetDateTime,
  pub op: Operation,
}

impl AppliedOperation {
  pub fn is_virtual(&self) -> bool {
    self.op.is_virtual()
  }
}

/// Operations touching an account, keyed by their sequence number in
/// that account's history.
///
/// Nodes return the history as an array of `[sequence, operation]` pairs.
/// Depending on the node, the sequence is a JSON number or a decimal
/// string, both are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
  from = "Vec<(Sequence, AppliedOperation)>",
  into = "Vec<(Sequence, AppliedOperation)>"
)]
pub struct AccountHistory(BTreeMap<u64, AppliedOperation>);

impl AccountHistory {
  pub fn get(&self, sequence: u64) -> Option<&AppliedOperation> {
    self.0.get(&sequence)
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// Entries in ascending sequence order.
  pub fn iter(&self) -> impl Iterator<Item = (&u64, &AppliedOperation)> {
    self.0.iter()
  }

  /// Highest sequence number seen so far, used to page further back.
  pub fn last_sequence(&self) -> Option<u64> {
    self.0.keys().next_back().copied()
  }

  pub fn virtual_operations(
    &self,
  ) -> impl Iterator<Item = &AppliedOperation> + '_ {
    self.0.values().filter(|op| op.is_virtual())
  }
}

impl From<Vec<(Sequence, AppliedOperation)>> for AccountHistory {
  fn from(entries: Vec<(Sequence, AppliedOperation)>) -> Self {
    Self(entries.into_iter().map(|(seq, op)| (seq.0, op)).collect())
  }
}

impl From<AccountHistory> for Vec<(Sequence, AppliedOperation)> {
  fn from(history: AccountHistory) -> Self {
    history
      .0
      .into_iter()
      .map(|(seq, op)| (Sequence(seq), op))
      .collect()
  }
}

/// History sequence number, written as a number and read from either a
/// number or a decimal string.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(transparent)]
struct Sequence(u64);

impl<'de> Deserialize<'de> for Sequence {
  fn deserialize<D: Deserializer<'de>>(
    deserializer: D,
  ) -> Result<Self, D::Error> {
    struct SequenceVisitor;

    impl<'de> Visitor<'de> for SequenceVisitor {
      type Value = Sequence;

      fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str("a sequence number or a decimal string")
      }

      fn visit_u64<E: de::Error>(self, value: u64) -> Result<Sequence, E> {
        Ok(Sequence(value))
      }

      fn visit_i64<E: de::Error>(self, value: i64) -> Result<Sequence, E> {
        u64::try_from(value)
          .map(Sequence)
          .map_err(|_| E::invalid_value(Unexpected::Signed(value), &self))
      }

      fn visit_str<E: de::Error>(self, value: &str) -> Result<Sequence, E> {
        value
          .trim()
          .parse()
          .map(Sequence)
          .map_err(|_| E::invalid_value(Unexpected::Str(value), &self))
      }
    }

    deserializer.deserialize_any(SequenceVisitor)
  }
}
