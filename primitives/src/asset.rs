use {
  crate::{encoding, ByteEncodable, Config, Error},
  serde::{Deserialize, Serialize},
  std::{fmt::Display, io::Write, str::FromStr},
};

pub const MAX_SYMBOL_LENGTH: usize = 7;
pub const MAX_PRECISION: u8 = 14;

/// An amount of some token, e.g. `1.00000 BWF`.
///
/// The amount is kept as an integer count of the smallest unit, so
/// `1.00000 BWF` is stored as `100000` with precision `5`.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Asset {
  amount: i64,
  precision: u8,
  symbol: String,
}

impl Asset {
  pub fn new(
    amount: i64,
    precision: u8,
    symbol: impl Into<String>,
  ) -> Result<Self, Error> {
    let symbol = symbol.into();
    if precision > MAX_PRECISION {
      return Err(Error::InvalidAsset(symbol, "precision too large"));
    }
    if symbol.is_empty() || symbol.len() > MAX_SYMBOL_LENGTH {
      return Err(Error::InvalidAsset(symbol, "symbol must be 1 to 7 letters"));
    }
    if !symbol.bytes().all(|b| b.is_ascii_uppercase()) {
      return Err(Error::InvalidAsset(
        symbol,
        "symbol must be uppercase ASCII letters",
      ));
    }
    Ok(Self {
      amount,
      precision,
      symbol,
    })
  }

  pub fn amount(&self) -> i64 {
    self.amount
  }

  pub fn precision(&self) -> u8 {
    self.precision
  }

  pub fn symbol(&self) -> &str {
    &self.symbol
  }
}

impl ByteEncodable for Asset {
  /// `amount (i64 LE) ++ precision (u8) ++ symbol` where the symbol is
  /// zero-padded to seven bytes.
  fn write_bytes(&self, _: &Config, out: &mut dyn Write) -> Result<(), Error> {
    let mut symbol = [0u8; MAX_SYMBOL_LENGTH];
    symbol[..self.symbol.len()].copy_from_slice(self.symbol.as_bytes());

    out.write_all(&encoding::encode_i64_le(self.amount))?;
    out.write_all(&[self.precision])?;
    out.write_all(&symbol)?;
    Ok(())
  }
}

impl Display for Asset {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let sign = if self.amount < 0 { "-" } else { "" };
    let abs = self.amount.unsigned_abs();
    if self.precision == 0 {
      return write!(f, "{sign}{abs} {}", self.symbol);
    }
    let scale = 10u64.pow(self.precision as u32);
    write!(
      f,
      "{sign}{}.{:0width$} {}",
      abs / scale,
      abs % scale,
      self.symbol,
      width = self.precision as usize
    )
  }
}

impl FromStr for Asset {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let invalid = |reason| Error::InvalidAsset(s.to_owned(), reason);

    let mut parts = s.split_whitespace();
    let (number, symbol) = match (parts.next(), parts.next(), parts.next()) {
      (Some(number), Some(symbol), None) => (number, symbol),
      _ => return Err(invalid("expected '<amount> <SYMBOL>'")),
    };

    let (negative, digits) = match number.strip_prefix('-') {
      Some(rest) => (true, rest),
      None => (false, number),
    };
    let (integral, fraction) = digits.split_once('.').unwrap_or((digits, ""));
    if integral.is_empty()
      || !integral.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit())
      || (digits.contains('.') && fraction.is_empty())
    {
      return Err(invalid("malformed amount"));
    }

    let precision =
      u8::try_from(fraction.len()).map_err(|_| invalid("precision too large"))?;
    let magnitude: i64 = format!("{integral}{fraction}")
      .parse()
      .map_err(|_| invalid("amount out of range"))?;

    Asset::new(
      if negative { -magnitude } else { magnitude },
      precision,
      symbol,
    )
  }
}

impl TryFrom<String> for Asset {
  type Error = Error;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    value.parse()
  }
}

impl From<Asset> for String {
  fn from(asset: Asset) -> Self {
    asset.to_string()
  }
}
