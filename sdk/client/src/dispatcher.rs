use {
  crate::{
    client::{LedgerClient, NewCampaign},
    error::{Error, FetchError},
    repository::CampaignRepository,
  },
  crowdfund_primitives::{Amount, Contract, Receipt, Wallet},
  tokio::sync::{broadcast, watch},
  tracing::{debug, info, warn},
};

const TRANSITIONS_CAPACITY: usize = 16;

/// Progress of the user action currently being dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionState {
  Idle,
  Submitting,
  Confirming,
  Success,
  Failed,
}

/// A state-changing request made by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
  Create(NewCampaign),
  Contribute { id: u64, amount: Amount },
  Withdraw { id: u64 },
}

impl Action {
  pub fn name(&self) -> &'static str {
    match self {
      Action::Create(_) => "create campaign",
      Action::Contribute { .. } => "contribute",
      Action::Withdraw { .. } => "withdraw",
    }
  }
}

/// A confirmed action together with the outcome of the repository
/// rebuild that followed it.
///
/// The transaction is final once confirmed; a failed rebuild only means
/// the local snapshot is stale and must not be read as a failed action.
#[derive(Debug)]
pub struct Confirmed {
  pub receipt: Receipt,
  pub refresh: Result<usize, FetchError>,
}

/// Runs user actions against the ledger: submit, wait for the
/// transaction to be mined, then rebuild the repository.
///
/// Every dispatch walks `Idle → Submitting → Confirming → Success` or
/// ends early in `Failed`, and always settles back in `Idle`. Success is
/// decided by the receipt alone; the rebuild runs after it. Nothing is
/// retried. The current state is observable through [`Self::subscribe`],
/// every single transition through [`Self::transitions`].
pub struct Dispatcher {
  state: watch::Sender<ActionState>,
  transitions: broadcast::Sender<ActionState>,
}

impl Default for Dispatcher {
  fn default() -> Self {
    Self::new()
  }
}

impl Dispatcher {
  pub fn new() -> Self {
    let (state, _) = watch::channel(ActionState::Idle);
    let (transitions, _) = broadcast::channel(TRANSITIONS_CAPACITY);
    Self { state, transitions }
  }

  pub fn state(&self) -> ActionState {
    *self.state.borrow()
  }

  /// Latest state only. Intermediate states may be skipped.
  pub fn subscribe(&self) -> watch::Receiver<ActionState> {
    self.state.subscribe()
  }

  /// Every state entered after this call, in order.
  pub fn transitions(&self) -> broadcast::Receiver<ActionState> {
    self.transitions.subscribe()
  }

  pub async fn dispatch<W: Wallet, C: Contract>(
    &self,
    client: &LedgerClient<W, C>,
    repository: &mut CampaignRepository,
    action: Action,
  ) -> Result<Confirmed, Error> {
    let name = action.name();
    self.transition(ActionState::Submitting);

    let receipt = match self.confirm(client, action).await {
      Ok(receipt) => receipt,
      Err(e) => {
        self.transition(ActionState::Failed);
        self.transition(ActionState::Idle);
        return Err(e);
      }
    };

    info!("{name} succeeded");
    self.transition(ActionState::Success);
    let refresh = repository.rebuild(client).await;
    if let Err(e) = &refresh {
      warn!("{name} confirmed but the campaign list is stale: {e}");
    }

    self.transition(ActionState::Idle);
    Ok(Confirmed { receipt, refresh })
  }

  async fn confirm<W: Wallet, C: Contract>(
    &self,
    client: &LedgerClient<W, C>,
    action: Action,
  ) -> Result<Receipt, Error> {
    let pending = match action {
      Action::Create(fields) => client.submit_create(fields).await?,
      Action::Contribute { id, amount } => {
        client.submit_contribute(id, amount).await?
      }
      Action::Withdraw { id } => client.submit_withdraw(id).await?,
    };

    self.transition(ActionState::Confirming);
    pending.await_confirmation().await
  }

  fn transition(&self, next: ActionState) {
    let previous = self.state.send_replace(next);
    // no subscribers is fine
    let _ = self.transitions.send(next);
    debug!("action state {previous:?} -> {next:?}");
  }
}
