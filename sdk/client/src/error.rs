use {
  crate::form::FormError,
  crowdfund_primitives::{ContractError, DecodeError},
  thiserror::Error,
};

/// Failures while reading campaigns from the ledger.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
  #[error("reading the campaign count failed: {0}")]
  Count(#[source] ContractError),

  #[error("reading campaign {id} failed: {source}")]
  Campaign {
    id: u64,
    #[source]
    source: ContractError,
  },

  #[error("campaign {id} has an unexpected shape: {source}")]
  Decode {
    id: u64,
    #[source]
    source: DecodeError,
  },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
  #[error("no compatible wallet is available")]
  WalletUnavailable,

  #[error("wallet authorization was rejected")]
  UserRejected,

  #[error("transaction signing was declined")]
  TransactionRejected,

  #[error("ledger error: {0}")]
  Chain(String),

  #[error(transparent)]
  Fetch(#[from] FetchError),

  #[error("wallet is not connected")]
  NotConnected,

  #[error(transparent)]
  InvalidInput(#[from] FormError),
}
