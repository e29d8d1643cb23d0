use {
  crate::{chain::Chain, Block},
  crowdfund_primitives::{Receipt, SignedTransaction, Status, TxHash},
  std::collections::HashSet,
};

/// Transactions accepted by the node and waiting to be mined.
///
/// `known` holds every hash ever accepted and is never pruned. It is the
/// replay protection of the devnode: a confirmed transaction submitted
/// again is refused instead of executing twice.
#[derive(Default)]
pub struct Mempool {
  txs: Vec<SignedTransaction>,
  known: HashSet<TxHash>,
}

impl Mempool {
  /// Queues a transaction. Returns false if a transaction with the same
  /// hash was ever seen before.
  pub fn consume(&mut self, tx: SignedTransaction) -> bool {
    if !self.known.insert(*tx.hash()) {
      return false;
    }
    self.txs.push(tx);
    true
  }

  pub fn is_known(&self, hash: &TxHash) -> bool {
    self.known.contains(hash)
  }

  pub fn len(&self) -> usize {
    self.txs.len()
  }

  /// Executes all pending transactions in submission order on top of
  /// the chain state and returns the resulting block with one receipt
  /// per transaction. Transactions that revert at this point are still
  /// included, with a reverted status.
  pub fn produce(
    &mut self,
    chain: &mut Chain,
    height: u64,
  ) -> (Block, Vec<Receipt>) {
    let txs = std::mem::take(&mut self.txs);
    let timestamp = chain.now();
    let mut hashes = Vec::with_capacity(txs.len());
    let mut receipts = Vec::with_capacity(txs.len());

    for tx in txs {
      let hash = *tx.hash();
      let (status, events) = match chain.execute(&tx.transaction) {
        Ok(events) => (Status::Success, events),
        Err(revert) => (Status::Reverted(revert.to_string()), vec![]),
      };
      hashes.push(hash);
      receipts.push(Receipt {
        hash,
        block: height,
        status,
        events,
      });
    }

    let block = Block {
      height,
      timestamp,
      transactions: hashes,
    };

    (block, receipts)
  }
}
