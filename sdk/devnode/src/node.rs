use {
  crate::{
    chain::{CampaignState, Chain, Clock},
    mempool::Mempool,
    watcher::ReceiptWatcher,
    Block,
    BlockProduction,
    Config,
  },
  crowdfund_primitives::{
    Contract,
    ContractError,
    Receipt,
    SignedTransaction,
    Timestamp,
    ToBase58String,
    TxHash,
    Value,
  },
  parking_lot::{Mutex, RwLock},
  std::{
    sync::{Arc, Weak},
    time::Duration,
  },
  tokio::time::{interval_at, Instant, MissedTickBehavior},
  tracing::{debug, info},
};

struct Inner {
  chain: RwLock<Chain>,
  mempool: Mutex<Mempool>,
  height: Mutex<u64>,
  watcher: ReceiptWatcher,
  production: BlockProduction,
}

impl Inner {
  fn produce_block(&self) -> Block {
    let (block, receipts) = {
      let mut height = self.height.lock();
      let mut mempool = self.mempool.lock();
      let mut chain = self.chain.write();
      *height += 1;
      mempool.produce(&mut chain, *height)
    };

    if block.transactions.is_empty() {
      debug!("produced empty block {}", block.height);
    } else {
      info!(
        "produced block {} with {} transactions",
        block.height,
        block.transactions.len()
      );
    }

    for receipt in receipts {
      debug!("{receipt:?}");
      self.watcher.deliver(receipt);
    }

    block
  }
}

/// A single-node, in-process crowdfunding ledger for local use, tests
/// and demos. Cloning yields another handle to the same ledger.
#[derive(Clone)]
pub struct DevNode {
  inner: Arc<Inner>,
}

impl DevNode {
  /// Creates the ledger. With interval block production this spawns the
  /// block producer on the current tokio runtime; it stops once every
  /// handle to the node is dropped.
  pub fn start(config: Config) -> Self {
    let inner = Arc::new(Inner {
      chain: RwLock::new(Chain::new(Clock::new(config.genesis_time))),
      mempool: Mutex::new(Mempool::default()),
      height: Mutex::new(0),
      watcher: ReceiptWatcher::default(),
      production: config.production,
    });

    if let BlockProduction::Interval(block_time) = config.production {
      spawn_block_producer(Arc::downgrade(&inner), block_time);
    }

    info!("devnode started with {:?} block production", config.production);
    Self { inner }
  }

  /// Current ledger time.
  pub fn now(&self) -> Timestamp {
    self.inner.chain.read().now()
  }

  /// Moves ledger time forward.
  pub fn advance(&self, by: Duration) {
    self.inner.chain.write().advance(by);
    info!("ledger time advanced by {}s to {}", by.as_secs(), self.now());
  }

  pub fn height(&self) -> u64 {
    *self.inner.height.lock()
  }

  pub fn pending(&self) -> usize {
    self.inner.mempool.lock().len()
  }

  /// Mines all pending transactions right away.
  pub fn mine(&self) -> Block {
    self.inner.produce_block()
  }

  pub fn campaign(&self, id: u64) -> Option<CampaignState> {
    self.inner.chain.read().campaign(id).cloned()
  }
}

fn spawn_block_producer(inner: Weak<Inner>, block_time: Duration) {
  tokio::spawn(async move {
    let mut interval = interval_at(Instant::now() + block_time, block_time);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
      interval.tick().await;
      match inner.upgrade() {
        Some(inner) => {
          inner.produce_block();
        }
        None => {
          debug!("devnode dropped, block producer exiting");
          break;
        }
      }
    }
  });
}

impl Contract for DevNode {
  async fn campaign_count(&self) -> Result<u64, ContractError> {
    Ok(self.inner.chain.read().campaign_count())
  }

  async fn campaign_details(
    &self,
    id: u64,
  ) -> Result<Vec<Value>, ContractError> {
    self
      .inner
      .chain
      .read()
      .campaign(id)
      .map(CampaignState::to_values)
      .ok_or(ContractError::NotFound(id))
  }

  async fn submit(&self, tx: SignedTransaction) -> Result<TxHash, ContractError> {
    let hash = *tx.hash();
    tx.verify()
      .map_err(|e| ContractError::InvalidSignature(e.to_string()))?;

    // dry run against the current state, the same way a
    // gas estimate would fail for a reverting call.
    self
      .inner
      .chain
      .read()
      .check(&tx.transaction)
      .map_err(|revert| ContractError::Reverted(revert.to_string()))?;

    let call = tx.transaction.call.name();
    if !self.inner.mempool.lock().consume(tx) {
      return Err(ContractError::AlreadyKnown(hash.to_b58()));
    }
    info!("accepted {call} transaction {}", hash.to_b58());

    if let BlockProduction::Instant = self.inner.production {
      self.inner.produce_block();
    }

    Ok(hash)
  }

  async fn await_receipt(&self, hash: TxHash) -> Result<Receipt, ContractError> {
    if !self.inner.mempool.lock().is_known(&hash) {
      return Err(ContractError::UnknownTransaction(hash.to_b58()));
    }

    self
      .inner
      .watcher
      .await_receipt(hash)
      .await
      .map_err(|e| ContractError::Transport(e.to_string()))
  }
}

#[cfg(test)]
mod tests {
  use {
    super::*,
    crate::DevWallet,
    crowdfund_primitives::{Amount, Call, Status, Transaction, Wallet},
  };

  const GENESIS: Timestamp = 1_700_000_000;

  fn create_campaign(wallet: &DevWallet, duration: u64) -> Transaction {
    Transaction::new(
      wallet.accounts()[0],
      Call::CreateCampaign {
        title: "Library".into(),
        description: "Books for the village".into(),
        evidence_url: String::new(),
        funding_goal: Amount::from_tokens(3),
        duration,
      },
      Amount::ZERO,
    )
  }

  fn instant() -> DevNode {
    DevNode::start(Config {
      production: BlockProduction::Instant,
      genesis_time: Some(GENESIS),
    })
  }

  #[tokio::test]
  async fn instant_mining_confirms_on_submit() -> anyhow::Result<()> {
    let node = instant();
    let wallet = DevWallet::new(1);

    let signed = wallet.sign(create_campaign(&wallet, 60)).await?;
    let hash = node.submit(signed).await?;
    assert_eq!(node.pending(), 0);
    assert_eq!(node.height(), 1);

    let receipt = node.await_receipt(hash).await?;
    assert_eq!(receipt.status, Status::Success);
    assert_eq!(node.campaign_count().await?, 1);
    assert_eq!(node.campaign_details(0).await?.len(), 8);
    Ok(())
  }

  #[tokio::test]
  async fn interval_mining_confirms_later() -> anyhow::Result<()> {
    let node = DevNode::start(Config {
      production: BlockProduction::Interval(Duration::from_millis(20)),
      genesis_time: Some(GENESIS),
    });
    let wallet = DevWallet::new(1);

    let signed = wallet.sign(create_campaign(&wallet, 60)).await?;
    let hash = node.submit(signed).await?;
    let receipt = node.await_receipt(hash).await?;
    assert!(receipt.is_success());
    assert!(receipt.block >= 1);
    assert_eq!(node.campaign_count().await?, 1);
    Ok(())
  }

  #[tokio::test]
  async fn reverting_call_refused_on_submit() -> anyhow::Result<()> {
    let node = instant();
    let wallet = DevWallet::new(1);

    let signed = wallet.sign(create_campaign(&wallet, 0)).await?;
    assert!(matches!(
      node.submit(signed).await,
      Err(ContractError::Reverted(_))
    ));
    assert_eq!(node.height(), 0);
    Ok(())
  }

  #[tokio::test]
  async fn duplicate_submission_refused() -> anyhow::Result<()> {
    let node = instant();
    let wallet = DevWallet::new(1);

    let signed = wallet.sign(create_campaign(&wallet, 60)).await?;
    let hash = node.submit(signed.clone()).await?;
    assert!(matches!(
      node.submit(signed).await,
      Err(ContractError::AlreadyKnown(_))
    ));
    assert_eq!(node.campaign_count().await?, 1);

    // receipts stay available after the first lookup
    let first = node.await_receipt(hash).await?;
    assert_eq!(node.await_receipt(hash).await?, first);
    Ok(())
  }

  #[tokio::test]
  async fn forged_sender_refused() -> anyhow::Result<()> {
    let node = instant();
    let wallet = DevWallet::new(2);
    let accounts = wallet.accounts();

    let mut signed = wallet.sign(create_campaign(&wallet, 60)).await?;
    signed.transaction =
      Transaction::new(accounts[1], signed.transaction.call.clone(), Amount::ZERO);
    assert!(matches!(
      node.submit(signed).await,
      Err(ContractError::InvalidSignature(_))
    ));
    Ok(())
  }

  #[tokio::test]
  async fn state_change_between_submit_and_mine_reverts() -> anyhow::Result<()>
  {
    let node = DevNode::start(Config {
      production: BlockProduction::Interval(Duration::from_secs(3600)),
      genesis_time: Some(GENESIS),
    });
    let wallet = DevWallet::new(1);
    let creator = wallet.accounts()[0];

    node.submit(wallet.sign(create_campaign(&wallet, 60)).await?).await?;
    node.mine();

    let contribution = Transaction::new(
      creator,
      Call::Contribute { id: 0 },
      Amount::from_tokens(1),
    );
    let hash = node.submit(wallet.sign(contribution).await?).await?;
    node.advance(Duration::from_secs(120));
    node.mine();

    let receipt = node.await_receipt(hash).await?;
    assert!(matches!(receipt.status, Status::Reverted(_)));
    assert!(receipt.events.is_empty());
    assert_eq!(node.campaign(0).unwrap().amount_raised, Amount::ZERO);
    Ok(())
  }

  #[tokio::test]
  async fn unknown_transaction() {
    use multihash::MultihashDigest;
    let node = instant();
    let hash = multihash::Code::Sha3_256.digest(b"nothing");
    assert!(matches!(
      node.await_receipt(hash).await,
      Err(ContractError::UnknownTransaction(_))
    ));
  }
}
