use {
  crowdfund_primitives::{Timestamp, TxHash},
  std::fmt::Debug,
};

/// A batch of transactions mined together at one timestamp.
#[derive(Clone)]
pub struct Block {
  pub height: u64,
  pub timestamp: Timestamp,
  pub transactions: Vec<TxHash>,
}

impl Debug for Block {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    use crowdfund_primitives::ToBase58String;
    f.debug_struct("Block")
      .field("height", &self.height)
      .field("timestamp", &self.timestamp)
      .field(
        "transactions",
        &self.transactions.iter().map(|h| h.to_b58()).collect::<Vec<_>>(),
      )
      .finish()
  }
}
