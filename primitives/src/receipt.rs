use {
  crate::{b58::ToBase58String, Address, Amount, TxHash},
  serde::{Deserialize, Serialize},
  std::fmt::Debug,
};

/// Outcome of executing a mined transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
  Success,
  Reverted(String),
}

/// Logs emitted by the contract while executing a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
  CampaignCreated {
    id: u64,
    creator: Address,
    funding_goal: Amount,
    deadline: u64,
  },
  ContributionMade {
    id: u64,
    contributor: Address,
    amount: Amount,
  },
  FundsWithdrawn {
    id: u64,
    creator: Address,
    amount: Amount,
  },
}

/// Proof that a transaction was included in a block.
///
/// A receipt exists for reverted transactions as well, their status
/// carries the revert reason and they emit no events.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
  pub hash: TxHash,
  pub block: u64,
  pub status: Status,
  pub events: Vec<Event>,
}

impl Receipt {
  pub fn is_success(&self) -> bool {
    matches!(self.status, Status::Success)
  }
}

impl Debug for Receipt {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Receipt")
      .field("hash", &self.hash.to_b58())
      .field("block", &self.block)
      .field("status", &self.status)
      .field("events", &self.events)
      .finish()
  }
}
