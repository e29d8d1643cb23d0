use {
  serde::{Deserialize, Serialize},
  std::{
    fmt::{Debug, Display},
    str::FromStr,
  },
  thiserror::Error,
};

/// Number of decimal places between a whole token and its base unit.
pub const DECIMALS: usize = 18;

/// Base units in one whole token.
pub const SCALE: u128 = 1_000_000_000_000_000_000;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
  #[error("amount is empty")]
  Empty,

  #[error("invalid character {0:?} in amount")]
  InvalidDigit(char),

  #[error("amount has {0} fractional digits, at most 18 are allowed")]
  TooManyDecimals(usize),

  #[error("amount does not fit in 128 bits of base units")]
  Overflow,
}

/// A quantity of the ledger currency, stored in base units.
///
/// Displayed as a decimal with 18 fractional digits, trailing zeros
/// trimmed but always at least one digit after the point (`1.0`, `0.5`).
#[derive(
  Copy,
  Clone,
  Default,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
)]
pub struct Amount(u128);

impl Amount {
  pub const ZERO: Amount = Amount(0);

  pub const fn from_base_units(units: u128) -> Self {
    Self(units)
  }

  pub const fn base_units(&self) -> u128 {
    self.0
  }

  /// Whole tokens, mostly useful in tests and fixtures.
  pub const fn from_tokens(tokens: u64) -> Self {
    Self(tokens as u128 * SCALE)
  }

  pub fn is_zero(&self) -> bool {
    self.0 == 0
  }

  pub fn checked_add(self, other: Amount) -> Option<Amount> {
    self.0.checked_add(other.0).map(Amount)
  }

  pub fn checked_sub(self, other: Amount) -> Option<Amount> {
    self.0.checked_sub(other.0).map(Amount)
  }
}

impl Display for Amount {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let whole = self.0 / SCALE;
    let fraction = self.0 % SCALE;
    if fraction == 0 {
      write!(f, "{whole}.0")
    } else {
      let digits = format!("{fraction:018}");
      write!(f, "{whole}.{}", digits.trim_end_matches('0'))
    }
  }
}

impl Debug for Amount {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "amount({self})")
  }
}

impl FromStr for Amount {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let (whole, fraction) = s.split_once('.').unwrap_or((s, ""));
    if whole.is_empty() && fraction.is_empty() {
      return Err(Error::Empty);
    }

    let mut chars = whole.chars().chain(fraction.chars());
    if let Some(c) = chars.find(|c| !c.is_ascii_digit()) {
      return Err(Error::InvalidDigit(c));
    }

    if fraction.len() > DECIMALS {
      return Err(Error::TooManyDecimals(fraction.len()));
    }

    let whole = digits_value(whole)?;
    let fraction = digits_value(fraction)?
      * 10u128.pow((DECIMALS - fraction.len()) as u32);

    whole
      .checked_mul(SCALE)
      .and_then(|w| w.checked_add(fraction))
      .map(Amount)
      .ok_or(Error::Overflow)
  }
}

fn digits_value(digits: &str) -> Result<u128, Error> {
  digits.bytes().try_fold(0u128, |acc, b| {
    acc
      .checked_mul(10)
      .and_then(|acc| acc.checked_add((b - b'0') as u128))
      .ok_or(Error::Overflow)
  })
}
