use {
  crate::{
    client::LedgerClient,
    dispatcher::{Action, ActionState, Dispatcher},
    error::Error,
    form::{parse_contribution, CreateCampaignForm},
    record::CampaignRecord,
    repository::CampaignRepository,
    view::Page,
  },
  crowdfund_primitives::{Address, Contract, Receipt, Wallet},
  time::OffsetDateTime,
  tracing::{error, info},
};

/// Application state of the crowdfunding front-end.
///
/// All state changes go through the methods below, each taking
/// `&mut self`, so at most one action or rebuild is in flight at any
/// time. Failures are returned to the caller and also kept as the last
/// error shown on the page.
pub struct App<W, C> {
  client: LedgerClient<W, C>,
  repository: CampaignRepository,
  dispatcher: Dispatcher,
  create_form: CreateCampaignForm,
  loading: bool,
  last_error: Option<Error>,
}

impl<W, C> App<W, C> {
  pub fn new(client: LedgerClient<W, C>) -> Self {
    Self {
      client,
      repository: CampaignRepository::default(),
      dispatcher: Dispatcher::new(),
      create_form: CreateCampaignForm::default(),
      loading: true,
      last_error: None,
    }
  }

  pub fn client(&self) -> &LedgerClient<W, C> {
    &self.client
  }

  pub fn account(&self) -> Option<Address> {
    self.client.account()
  }

  pub fn campaigns(&self) -> &[CampaignRecord] {
    self.repository.campaigns()
  }

  pub fn repository(&self) -> &CampaignRepository {
    &self.repository
  }

  pub fn action_state(&self) -> ActionState {
    self.dispatcher.state()
  }

  pub fn dispatcher(&self) -> &Dispatcher {
    &self.dispatcher
  }

  pub fn is_loading(&self) -> bool {
    self.loading
  }

  pub fn last_error(&self) -> Option<&Error> {
    self.last_error.as_ref()
  }

  pub fn create_form(&self) -> &CreateCampaignForm {
    &self.create_form
  }

  pub fn create_form_mut(&mut self) -> &mut CreateCampaignForm {
    &mut self.create_form
  }

  /// Renders the current state for the connected account.
  pub fn page(&self, now: OffsetDateTime) -> Page {
    Page::new(
      self.client.account(),
      self.loading,
      self.repository.campaigns(),
      self.last_error.as_ref().map(ToString::to_string),
      now,
    )
  }

  fn record<T>(&mut self, result: Result<T, Error>) -> Result<T, Error> {
    match result {
      Ok(value) => {
        self.last_error = None;
        Ok(value)
      }
      Err(e) => {
        error!("{e}");
        self.last_error = Some(e.clone());
        Err(e)
      }
    }
  }
}

impl<W, C: Contract> App<W, C> {
  /// Rebuilds the campaign repository from the ledger.
  pub async fn refresh(&mut self) -> Result<usize, Error> {
    let result = self
      .repository
      .rebuild(&self.client)
      .await
      .map_err(Error::from);
    self.loading = false;
    self.record(result)
  }
}

impl<W: Wallet, C: Contract> App<W, C> {
  /// Connects the wallet and loads campaigns on success.
  pub async fn connect(&mut self) -> Result<Address, Error> {
    let result = self.client.connect().await;
    let account = self.record(result)?;
    self.refresh().await?;
    Ok(account)
  }

  /// Submits the campaign typed into the create form. The form is
  /// cleared once the campaign is confirmed.
  pub async fn create_campaign(&mut self) -> Result<Receipt, Error> {
    let fields = match self.create_form.validate() {
      Ok(fields) => fields,
      Err(e) => return self.record(Err(e.into())),
    };

    let receipt = self.dispatch(Action::Create(fields)).await?;
    self.create_form.reset();
    info!("campaign created, form cleared");
    Ok(receipt)
  }

  pub async fn contribute(
    &mut self,
    id: u64,
    amount: &str,
  ) -> Result<Receipt, Error> {
    let amount = match parse_contribution(amount) {
      Ok(amount) => amount,
      Err(e) => return self.record(Err(e.into())),
    };
    self.dispatch(Action::Contribute { id, amount }).await
  }

  pub async fn withdraw(&mut self, id: u64) -> Result<Receipt, Error> {
    self.dispatch(Action::Withdraw { id }).await
  }

  /// A confirmed action is a success even when the rebuild after it
  /// failed. That failure is logged and shown as the last error only.
  async fn dispatch(&mut self, action: Action) -> Result<Receipt, Error> {
    let result = self
      .dispatcher
      .dispatch(&self.client, &mut self.repository, action)
      .await;
    let confirmed = self.record(result)?;

    match confirmed.refresh {
      Ok(_) => self.loading = false,
      Err(e) => {
        let e = Error::from(e);
        error!("{e}");
        self.last_error = Some(e);
      }
    }
    Ok(confirmed.receipt)
  }
}
