use {
  crate::{Address, SignedTransaction, Transaction},
  thiserror::Error,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WalletError {
  #[error("wallet is not available")]
  Unavailable,

  #[error("request rejected by the user")]
  Rejected,

  #[error("wallet does not hold keys for {0}")]
  UnknownAccount(Address),
}

/// A signer holding the user's keys.
#[allow(async_fn_in_trait)]
pub trait Wallet {
  /// Asks the user to authorize this client. Returns the accounts the
  /// user exposes, ordered by preference; the first one is active.
  async fn request_accounts(&self) -> Result<Vec<Address>, WalletError>;

  /// Asks the user to approve and sign a transaction. The wallet assigns
  /// the transaction nonce.
  async fn sign(&self, tx: Transaction)
    -> Result<SignedTransaction, WalletError>;
}
