#![allow(dead_code)]

use {
  crowdfund_client::LedgerClient,
  crowdfund_devnode::{BlockProduction, Config, DevNode, DevWallet},
  crowdfund_primitives::{
    Address,
    Amount,
    Contract,
    ContractError,
    Receipt,
    SignedTransaction,
    Timestamp,
    TxHash,
    Value,
  },
  rand::Rng,
  std::{
    sync::atomic::{AtomicBool, Ordering},
    time::Duration,
  },
};

pub const GENESIS: Timestamp = 1_800_000_000;

/// A read-only contract serving a fixed list of campaign tuples.
///
/// Every read sleeps for a random few milliseconds so that concurrent
/// fetches complete out of order. Reads of `fail_at` fail, and
/// `shape_override` replaces the tuple returned for one id.
#[derive(Default)]
pub struct MockContract {
  pub campaigns: Vec<Vec<Value>>,
  pub fail_at: Option<u64>,
  pub shape_override: Option<(u64, Vec<Value>)>,
}

impl MockContract {
  pub fn with_campaigns(count: u64) -> Self {
    Self {
      campaigns: (0..count)
        .map(|i| campaign(&format!("campaign {i}"), 10, i % 10, false))
        .collect(),
      ..Default::default()
    }
  }
}

async fn jitter() {
  let millis = rand::thread_rng().gen_range(0..8);
  tokio::time::sleep(Duration::from_millis(millis)).await;
}

impl Contract for MockContract {
  async fn campaign_count(&self) -> Result<u64, ContractError> {
    jitter().await;
    Ok(self.campaigns.len() as u64)
  }

  async fn campaign_details(
    &self,
    id: u64,
  ) -> Result<Vec<Value>, ContractError> {
    jitter().await;
    if self.fail_at == Some(id) {
      return Err(ContractError::Transport("connection reset".into()));
    }
    if let Some((at, values)) = &self.shape_override {
      if *at == id {
        return Ok(values.clone());
      }
    }
    self
      .campaigns
      .get(id as usize)
      .cloned()
      .ok_or(ContractError::NotFound(id))
  }

  async fn submit(
    &self,
    _: SignedTransaction,
  ) -> Result<TxHash, ContractError> {
    Err(ContractError::Transport("read-only mock".into()))
  }

  async fn await_receipt(&self, _: TxHash) -> Result<Receipt, ContractError> {
    Err(ContractError::Transport("read-only mock".into()))
  }
}

pub fn creator() -> Address {
  "0x1234567890abcdef1234567890abcdef12345678".parse().unwrap()
}

/// A `getCampaignDetails` tuple with whole-token amounts.
pub fn campaign(
  title: &str,
  goal: u64,
  raised: u64,
  completed: bool,
) -> Vec<Value> {
  vec![
    creator().into(),
    title.into(),
    format!("description of {title}").into(),
    format!("https://example.org/{}", title.replace(' ', "-")).into(),
    Amount::from_tokens(goal).base_units().into(),
    (GENESIS + 86_400).into(),
    Amount::from_tokens(raised).base_units().into(),
    completed.into(),
  ]
}

/// A client over the mock contract, without a wallet.
pub fn mock_client(
  contract: MockContract,
) -> LedgerClient<DevWallet, MockContract> {
  LedgerClient::new(None, contract)
}

/// A dev ledger that mines on submit, starting at [`GENESIS`].
pub fn instant_node() -> DevNode {
  DevNode::start(Config {
    production: BlockProduction::Instant,
    genesis_time: Some(GENESIS),
  })
}

/// The dev ledger with switchable faults on the client side of the
/// connection. The ledger itself keeps working while reads or receipt
/// lookups fail.
pub struct FaultyNode {
  pub node: DevNode,
  fail_reads: AtomicBool,
  fail_receipts: AtomicBool,
}

impl FaultyNode {
  pub fn new(node: DevNode) -> Self {
    Self {
      node,
      fail_reads: AtomicBool::new(false),
      fail_receipts: AtomicBool::new(false),
    }
  }

  pub fn fail_reads(&self, fail: bool) {
    self.fail_reads.store(fail, Ordering::SeqCst);
  }

  pub fn fail_receipts(&self, fail: bool) {
    self.fail_receipts.store(fail, Ordering::SeqCst);
  }

  fn unreachable_if(&self, flag: &AtomicBool) -> Result<(), ContractError> {
    if flag.load(Ordering::SeqCst) {
      return Err(ContractError::Transport("connection lost".into()));
    }
    Ok(())
  }
}

impl Contract for FaultyNode {
  async fn campaign_count(&self) -> Result<u64, ContractError> {
    self.unreachable_if(&self.fail_reads)?;
    self.node.campaign_count().await
  }

  async fn campaign_details(
    &self,
    id: u64,
  ) -> Result<Vec<Value>, ContractError> {
    self.unreachable_if(&self.fail_reads)?;
    self.node.campaign_details(id).await
  }

  async fn submit(
    &self,
    tx: SignedTransaction,
  ) -> Result<TxHash, ContractError> {
    self.node.submit(tx).await
  }

  async fn await_receipt(
    &self,
    hash: TxHash,
  ) -> Result<Receipt, ContractError> {
    self.unreachable_if(&self.fail_receipts)?;
    self.node.await_receipt(hash).await
  }
}

/// Drains every transition published so far.
pub fn drain<T: Clone>(
  rx: &mut tokio::sync::broadcast::Receiver<T>,
) -> Vec<T> {
  std::iter::from_fn(|| rx.try_recv().ok()).collect()
}
