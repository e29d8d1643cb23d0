use {
  crate::{Receipt, SignedTransaction, TxHash, Value},
  thiserror::Error,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContractError {
  #[error("campaign {0} does not exist")]
  NotFound(u64),

  #[error("execution reverted: {0}")]
  Reverted(String),

  #[error("transaction signature is invalid: {0}")]
  InvalidSignature(String),

  #[error("transaction {0} is already known")]
  AlreadyKnown(String),

  #[error("transaction {0} was never submitted")]
  UnknownTransaction(String),

  #[error("ledger is unreachable: {0}")]
  Transport(String),
}

/// The function surface of the crowdfunding contract.
///
/// Read calls return raw positional values exactly as the contract
/// produces them. Write calls are signed transactions; `submit` hands
/// one to the ledger and returns its hash, `await_receipt` resolves once
/// the transaction was included in a block.
#[allow(async_fn_in_trait)]
pub trait Contract {
  /// Number of campaigns ever created. Campaign ids are `0..count`.
  async fn campaign_count(&self) -> Result<u64, ContractError>;

  /// Returns the tuple `(creator, title, description, evidenceUrl,
  /// fundingGoal, deadline, amountRaised, isCompleted)` for a campaign.
  async fn campaign_details(&self, id: u64)
    -> Result<Vec<Value>, ContractError>;

  /// Submits a signed transaction for inclusion. Transactions that would
  /// revert against the current state are refused at this point.
  async fn submit(&self, tx: SignedTransaction) -> Result<TxHash, ContractError>;

  /// Waits, without a time limit, until the transaction is mined.
  async fn await_receipt(&self, hash: TxHash) -> Result<Receipt, ContractError>;
}
