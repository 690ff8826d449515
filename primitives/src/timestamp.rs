//! Timestamps as the node formats them: `2019-01-01T00:00:00`, always
//! UTC and without an offset suffix.

use {
  serde::{de, Deserialize, Deserializer, Serializer},
  time::{
    format_description::FormatItem,
    macros::format_description,
    OffsetDateTime,
    PrimitiveDateTime,
    UtcOffset,
  },
};

const CHAIN_FORMAT: &[FormatItem<'static>] =
  format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

pub fn format(value: &OffsetDateTime) -> Result<String, time::error::Format> {
  value.to_offset(UtcOffset::UTC).format(CHAIN_FORMAT)
}

pub fn parse(value: &str) -> Result<OffsetDateTime, time::error::Parse> {
  Ok(PrimitiveDateTime::parse(value, CHAIN_FORMAT)?.assume_utc())
}

pub fn serialize<S: Serializer>(
  value: &OffsetDateTime,
  serializer: S,
) -> Result<S::Ok, S::Error> {
  let formatted = format(value).map_err(serde::ser::Error::custom)?;
  serializer.serialize_str(&formatted)
}

pub fn deserialize<'de, D: Deserializer<'de>>(
  deserializer: D,
) -> Result<OffsetDateTime, D::Error> {
  let s = String::deserialize(deserializer)?;
  parse(&s).map_err(de::Error::custom)
}
