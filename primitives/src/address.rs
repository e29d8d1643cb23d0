use {
  ed25519_dalek::PublicKey,
  multihash::MultihashDigest,
  serde::{Deserialize, Serialize},
  std::{
    fmt::{Debug, Display},
    ops::Deref,
    str::FromStr,
  },
  thiserror::Error,
};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
  #[error("invalid address length {0}, expected 40 hex characters")]
  InvalidLength(usize),

  #[error("invalid address encoding: {0}")]
  InvalidHex(#[from] hex::FromHexError),
}

impl Eq for Error {}

/// Identifies an externally owned account on the ledger.
///
/// Addresses are the first 20 bytes of the SHA3-256 digest of the
/// account's ed25519 public key. They are rendered as `0x`-prefixed
/// lowercase hex and parsed regardless of letter case, so two address
/// strings that differ only in case compare equal once parsed.
#[derive(
  Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Address([u8; 20]);

impl Address {
  pub const fn new(bytes: [u8; 20]) -> Self {
    Self(bytes)
  }

  /// Abbreviated form used in page headers, e.g. `0x1a2b...9f0e`.
  pub fn short(&self) -> String {
    let full = self.to_string();
    format!("{}...{}", &full[..6], &full[full.len() - 4..])
  }
}

impl AsRef<[u8]> for Address {
  fn as_ref(&self) -> &[u8] {
    &self.0
  }
}

impl Deref for Address {
  type Target = [u8];

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl Display for Address {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "0x{}", hex::encode(self.0))
  }
}

impl Debug for Address {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "address(0x{})", hex::encode(self.0))
  }
}

impl From<Address> for String {
  fn from(addr: Address) -> Self {
    addr.to_string()
  }
}

impl FromStr for Address {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let digits = s
      .strip_prefix("0x")
      .or_else(|| s.strip_prefix("0X"))
      .unwrap_or(s);

    if digits.len() != 40 {
      return Err(Error::InvalidLength(digits.len()));
    }

    let mut bytes = [0u8; 20];
    hex::decode_to_slice(digits, &mut bytes)?;
    Ok(Self(bytes))
  }
}

impl TryFrom<&str> for Address {
  type Error = Error;

  fn try_from(value: &str) -> Result<Self, Self::Error> {
    FromStr::from_str(value)
  }
}

impl From<&PublicKey> for Address {
  fn from(p: &PublicKey) -> Self {
    let digest = multihash::Code::Sha3_256.digest(p.as_bytes());
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&digest.digest()[..20]);
    Self(bytes)
  }
}

impl From<PublicKey> for Address {
  fn from(p: PublicKey) -> Self {
    Self::from(&p)
  }
}
