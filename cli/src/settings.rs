use {
  clap::Parser,
  crowdfund_devnode::{BlockProduction, Config},
  crowdfund_primitives::Timestamp,
  humantime::Duration,
};

/// Crowdfunding Client
///
/// Interactive crowdfunding front-end running against an in-process
/// development ledger with a local wallet.
#[derive(Debug, Parser)]
pub struct SystemSettings {
  /// Block production interval, 0s mines every transaction on submit
  #[clap(long, short = 't', value_name = "DURATION", default_value = "2s")]
  block_time: Duration,

  /// Number of accounts in the development wallet
  #[clap(long, short, value_name = "COUNT", default_value = "3")]
  accounts: usize,

  /// Start without a wallet, as if none was installed
  #[clap(long)]
  no_wallet: bool,

  /// Fixed ledger start time in unix seconds instead of the wall clock
  #[clap(long, value_name = "TIMESTAMP")]
  genesis: Option<Timestamp>,
}

impl SystemSettings {
  pub fn ledger(&self) -> Config {
    let block_time: std::time::Duration = self.block_time.into();
    Config {
      production: if block_time.is_zero() {
        BlockProduction::Instant
      } else {
        BlockProduction::Interval(block_time)
      },
      genesis_time: self.genesis,
    }
  }

  pub fn accounts(&self) -> Option<usize> {
    (!self.no_wallet).then_some(self.accounts)
  }
}
