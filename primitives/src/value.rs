use {
  crate::Address,
  serde::{Deserialize, Serialize},
  thiserror::Error,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
  #[error("expected {expected} return values, got {found}")]
  Arity { expected: usize, found: usize },

  #[error("return value {position} should be {expected}, got {found}")]
  Type {
    position: usize,
    expected: &'static str,
    found: &'static str,
  },

  #[error("return value {position} is out of range")]
  OutOfRange { position: usize },
}

/// A single value returned by a contract read call.
///
/// Contract calls return ordered tuples of loosely typed values; callers
/// decode them positionally into their own typed records using the
/// `expect_*` accessors, which fail on any type mismatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
  Address(Address),
  String(String),
  Uint(u128),
  Bool(bool),
}

impl Value {
  pub fn kind(&self) -> &'static str {
    match self {
      Value::Address(_) => "address",
      Value::String(_) => "string",
      Value::Uint(_) => "uint",
      Value::Bool(_) => "bool",
    }
  }

  pub fn expect_address(self, position: usize) -> Result<Address, DecodeError> {
    match self {
      Value::Address(a) => Ok(a),
      other => Err(other.mismatch(position, "address")),
    }
  }

  pub fn expect_string(self, position: usize) -> Result<String, DecodeError> {
    match self {
      Value::String(s) => Ok(s),
      other => Err(other.mismatch(position, "string")),
    }
  }

  pub fn expect_uint(self, position: usize) -> Result<u128, DecodeError> {
    match self {
      Value::Uint(v) => Ok(v),
      other => Err(other.mismatch(position, "uint")),
    }
  }

  pub fn expect_bool(self, position: usize) -> Result<bool, DecodeError> {
    match self {
      Value::Bool(b) => Ok(b),
      other => Err(other.mismatch(position, "bool")),
    }
  }

  fn mismatch(&self, position: usize, expected: &'static str) -> DecodeError {
    DecodeError::Type {
      position,
      expected,
      found: self.kind(),
    }
  }
}

impl From<Address> for Value {
  fn from(a: Address) -> Self {
    Value::Address(a)
  }
}

impl From<&str> for Value {
  fn from(s: &str) -> Self {
    Value::String(s.to_owned())
  }
}

impl From<String> for Value {
  fn from(s: String) -> Self {
    Value::String(s)
  }
}

impl From<u128> for Value {
  fn from(v: u128) -> Self {
    Value::Uint(v)
  }
}

impl From<u64> for Value {
  fn from(v: u64) -> Self {
    Value::Uint(v as u128)
  }
}

impl From<bool> for Value {
  fn from(b: bool) -> Self {
    Value::Bool(b)
  }
}
