mod block;
mod chain;
mod mempool;
mod node;
mod wallet;
mod watcher;

pub use {
  block::Block,
  chain::{CampaignState, Revert},
  node::DevNode,
  wallet::DevWallet,
};
use {crowdfund_primitives::Timestamp, std::time::Duration};

/// When the development ledger mines pending transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockProduction {
  /// Every accepted transaction is mined in its own block before
  /// `submit` returns.
  Instant,

  /// A background task mines everything pending once per interval.
  Interval(Duration),
}

#[derive(Debug, Clone)]
pub struct Config {
  pub production: BlockProduction,

  /// Fixes the ledger clock at this Unix timestamp instead of following
  /// the wall clock. Tests use it to get reproducible deadlines.
  pub genesis_time: Option<Timestamp>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      production: BlockProduction::Interval(Duration::from_secs(2)),
      genesis_time: None,
    }
  }
}
