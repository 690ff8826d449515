//! Canonical binary encoding of protocol values.
//!
//! These bytes are what gets hashed and signed, so the layout here must
//! match the chain's native serializer bit for bit: fixed-width integers
//! are little-endian, every length and count is an unsigned LEB128 varint,
//! and weighted collections are emitted in a canonical key order that is
//! independent of how the collection was built.

use {
  crate::{Charset, Config, Error},
  std::io::Write,
  tracing::trace,
};

/// Implemented by every value that can appear inside a signable
/// transaction.
///
/// Composite values write their children in the wire order of the chain's
/// schema, which is not necessarily the declaration order of struct fields.
pub trait ByteEncodable {
  /// Writes the canonical representation of the value into `out`.
  ///
  /// On error `out` may hold a partial encoding which must be discarded.
  fn write_bytes(&self, config: &Config, out: &mut dyn Write)
    -> Result<(), Error>;

  /// Canonical representation of the value as an owned buffer.
  fn to_bytes(&self, config: &Config) -> Result<Vec<u8>, Error> {
    let mut out = Vec::new();
    self.write_bytes(config, &mut out)?;
    Ok(out)
  }
}

impl<T: ByteEncodable> ByteEncodable for Option<T> {
  /// Presence flag byte followed by the value when present.
  fn write_bytes(
    &self,
    config: &Config,
    out: &mut dyn Write,
  ) -> Result<(), Error> {
    match self {
      None => write_bool(out, false),
      Some(value) => {
        write_bool(out, true)?;
        value.write_bytes(config, out)
      }
    }
  }
}

pub fn encode_bool(value: bool) -> [u8; 1] {
  [value as u8]
}

pub fn encode_i16_le(value: i16) -> [u8; 2] {
  value.to_le_bytes()
}

pub fn encode_u16_le(value: u16) -> [u8; 2] {
  value.to_le_bytes()
}

pub fn encode_i32_le(value: i32) -> [u8; 4] {
  value.to_le_bytes()
}

pub fn encode_u32_le(value: u32) -> [u8; 4] {
  value.to_le_bytes()
}

pub fn encode_i64_le(value: i64) -> [u8; 8] {
  value.to_le_bytes()
}

pub fn encode_u64_le(value: u64) -> [u8; 8] {
  value.to_le_bytes()
}

/// Unsigned LEB128: seven payload bits per byte, least significant group
/// first, high bit set on every byte but the last. Zero is a single zero
/// byte and `u64::MAX` takes ten bytes.
pub fn encode_varuint(value: u64) -> Vec<u8> {
  let mut buf = unsigned_varint::encode::u64_buffer();
  unsigned_varint::encode::u64(value, &mut buf).to_vec()
}

pub fn encode_varuint32(value: u32) -> Vec<u8> {
  let mut buf = unsigned_varint::encode::u32_buffer();
  unsigned_varint::encode::u32(value, &mut buf).to_vec()
}

/// Decodes a varint from the front of `bytes` and returns it together
/// with the remaining input.
pub fn decode_varuint(bytes: &[u8]) -> Result<(u64, &[u8]), Error> {
  Ok(unsigned_varint::decode::u64(bytes)?)
}

/// `varint(len) ++ bytes` of a string in the given charset.
///
/// An absent string encodes to nothing at all, not even a length byte.
/// Whether absence is acceptable is up to the field being encoded.
pub fn encode_length_prefixed(
  value: Option<&str>,
  charset: Charset,
) -> Result<Vec<u8>, Error> {
  let mut out = Vec::new();
  if let Some(value) = value {
    write_str(&mut out, value, charset)?;
  }
  Ok(out)
}

pub fn write_bool(out: &mut dyn Write, value: bool) -> Result<(), Error> {
  out.write_all(&encode_bool(value))?;
  Ok(())
}

pub fn write_varuint(out: &mut dyn Write, value: u64) -> Result<(), Error> {
  let mut buf = unsigned_varint::encode::u64_buffer();
  out.write_all(unsigned_varint::encode::u64(value, &mut buf))?;
  Ok(())
}

pub fn write_str(
  out: &mut dyn Write,
  value: &str,
  charset: Charset,
) -> Result<(), Error> {
  let bytes = charset.encode(value)?;
  write_varuint(out, bytes.len() as u64)?;
  out.write_all(&bytes)?;
  Ok(())
}

/// Writes a weight-bearing mapping in canonical order.
///
/// Keys are sorted by their `Ord` implementation, which for account names
/// is the name and for public keys is the textual address form. The output
/// only depends on the set of pairs, never on the iteration order of the
/// source collection.
pub fn write_weighted<'k, K>(
  out: &mut dyn Write,
  config: &Config,
  entries: impl IntoIterator<Item = (&'k K, &'k u16)>,
) -> Result<(), Error>
where
  K: ByteEncodable + Ord + 'k,
{
  let mut sorted: Vec<_> = entries.into_iter().collect();
  sorted.sort_by(|(a, _), (b, _)| a.cmp(b));
  trace!("writing {} weighted entries", sorted.len());

  write_varuint(out, sorted.len() as u64)?;
  for (key, weight) in sorted {
    key.write_bytes(config, out)?;
    out.write_all(&encode_u16_le(*weight))?;
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use {
    super::*,
    crate::{AccountName, Charset, Config},
    std::collections::HashMap,
  };

  #[test]
  fn varint_roundtrip_and_lengths() {
    let cases: [(u64, usize); 9] = [
      (0, 1),
      (1, 1),
      (127, 1),
      (128, 2),
      (16383, 2),
      (16384, 3),
      ((1 << 31) - 1, 5),
      (u32::MAX as u64, 5),
      (i64::MAX as u64, 9),
    ];

    for (value, len) in cases {
      let encoded = encode_varuint(value);
      assert_eq!(encoded.len(), len, "length of {value}");
      let (decoded, rest) = decode_varuint(&encoded).unwrap();
      assert_eq!(decoded, value);
      assert!(rest.is_empty());
    }

    assert_eq!(encode_varuint(0), vec![0x00]);
    assert_eq!(encode_varuint(127), vec![0x7f]);
    assert_eq!(encode_varuint(128), vec![0x80, 0x01]);
    assert_eq!(encode_varuint(u64::MAX).len(), 10);
    assert_eq!(encode_varuint32(u32::MAX), vec![0xff, 0xff, 0xff, 0xff, 0x0f]);
    assert_eq!(encode_varuint32(300), encode_varuint(300));
  }

  #[test]
  fn varint_decode_rejects_truncated() {
    assert!(decode_varuint(&[0x80]).is_err());
    assert!(decode_varuint(&[]).is_err());
  }

  #[test]
  fn fixed_width_little_endian() {
    assert_eq!(encode_bool(false), [0x00]);
    assert_eq!(encode_bool(true), [0x01]);
    assert_eq!(encode_i32_le(1), [0x01, 0x00, 0x00, 0x00]);
    assert_eq!(encode_i16_le(-1), [0xff, 0xff]);
    assert_eq!(encode_u16_le(0xffff), [0xff, 0xff]);
    assert_eq!(encode_u32_le(0x01020304), [0x04, 0x03, 0x02, 0x01]);
    assert_eq!(encode_i64_le(-2), [
      0xfe, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff
    ]);
    assert_eq!(encode_u64_le(1 << 56), [0, 0, 0, 0, 0, 0, 0, 0x01]);
  }

  #[test]
  fn length_prefixed_strings() {
    assert_eq!(
      encode_length_prefixed(Some("memo"), Charset::Utf8).unwrap(),
      vec![0x04, b'm', b'e', b'm', b'o']
    );
    assert_eq!(
      encode_length_prefixed(Some(""), Charset::Utf8).unwrap(),
      vec![0x00]
    );
    assert!(encode_length_prefixed(None, Charset::Utf8).unwrap().is_empty());

    // length counts encoded bytes, not characters
    let umlaut = encode_length_prefixed(Some("ü"), Charset::Utf8).unwrap();
    assert_eq!(umlaut[0], 2);
    assert_eq!(
      encode_length_prefixed(Some("ü"), Charset::Latin1).unwrap(),
      vec![0x01, 0xfc]
    );
    assert!(encode_length_prefixed(Some("ü"), Charset::Ascii).is_err());

    let long = "x".repeat(200);
    let encoded = encode_length_prefixed(Some(&long), Charset::Utf8).unwrap();
    assert_eq!(&encoded[..2], &[0xc8, 0x01]);
    assert_eq!(encoded.len(), 202);
  }

  #[test]
  fn weighted_entries_are_sorted() {
    let config = Config::default();
    let carol: AccountName = "carol".parse().unwrap();
    let alice: AccountName = "alice".parse().unwrap();
    let bob: AccountName = "bob".parse().unwrap();

    let mut forward = HashMap::new();
    forward.insert(carol.clone(), 3u16);
    forward.insert(alice.clone(), 1);
    forward.insert(bob.clone(), 2);

    let mut out = vec![];
    write_weighted(&mut out, &config, &forward).unwrap();

    let mut expected = vec![0x03];
    expected.extend_from_slice(&[5, b'a', b'l', b'i', b'c', b'e', 1, 0]);
    expected.extend_from_slice(&[3, b'b', b'o', b'b', 2, 0]);
    expected.extend_from_slice(&[5, b'c', b'a', b'r', b'o', b'l', 3, 0]);
    assert_eq!(out, expected);
  }
}
