use {
  crowdfund_primitives::{Receipt, TxHash},
  dashmap::{mapref::entry::Entry, DashMap},
  tokio::sync::oneshot::{self, error::RecvError, Sender},
  tracing::error,
};

enum WatchlistValue {
  Waiting(Vec<Sender<Receipt>>),
  Mined(Receipt),
}

/// Connects mined receipts with the callers waiting for them.
///
/// A receipt may be delivered before anyone asked for it (instant
/// mining) or after (interval mining); both orders resolve the same way
/// because delivery and registration go through the same map entry.
///
/// Mined receipts are kept for the life of the node, the way a ledger
/// keeps its receipts, so a hash can be awaited any number of times.
/// Memory therefore grows with every mined transaction, which bounds
/// the devnode to local sessions.
#[derive(Default)]
pub struct ReceiptWatcher {
  watchlist: DashMap<TxHash, WatchlistValue>,
}

impl ReceiptWatcher {
  pub fn deliver(&self, receipt: Receipt) {
    match self.watchlist.entry(receipt.hash) {
      Entry::Occupied(mut entry) => {
        let previous = std::mem::replace(
          entry.get_mut(),
          WatchlistValue::Mined(receipt.clone()),
        );
        if let WatchlistValue::Waiting(signals) = previous {
          for signal in signals {
            if signal.send(receipt.clone()).is_err() {
              error!("Failed signalling awaited receipt {receipt:?}");
            }
          }
        }
      }
      Entry::Vacant(entry) => {
        entry.insert(WatchlistValue::Mined(receipt));
      }
    }
  }

  pub async fn await_receipt(&self, hash: TxHash) -> Result<Receipt, RecvError> {
    let rx = {
      match self.watchlist.entry(hash) {
        Entry::Occupied(mut entry) => match entry.get_mut() {
          WatchlistValue::Mined(receipt) => return Ok(receipt.clone()),
          WatchlistValue::Waiting(signals) => {
            let (tx, rx) = oneshot::channel();
            signals.push(tx);
            rx
          }
        },
        Entry::Vacant(entry) => {
          let (tx, rx) = oneshot::channel();
          entry.insert(WatchlistValue::Waiting(vec![tx]));
          rx
        }
      }
    };
    rx.await
  }
}
