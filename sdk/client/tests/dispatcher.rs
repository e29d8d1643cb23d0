mod common;

use {
  common::{drain, instant_node, FaultyNode, GENESIS},
  crowdfund_client::{
    Action,
    ActionState,
    App,
    CampaignRepository,
    CreateCampaignForm,
    Dispatcher,
    Error,
    LedgerClient,
    NewCampaign,
  },
  crowdfund_devnode::{DevNode, DevWallet},
  crowdfund_primitives::{Amount, Contract, SECONDS_PER_DAY},
  std::time::Duration,
};

fn new_campaign(title: &str, goal: u64, days: u64) -> NewCampaign {
  NewCampaign {
    title: title.into(),
    description: format!("{title} for everyone"),
    evidence_url: format!("https://example.org/{title}"),
    funding_goal: Amount::from_tokens(goal),
    duration: days * SECONDS_PER_DAY,
  }
}

async fn connected(node: &DevNode) -> anyhow::Result<App<DevWallet, DevNode>> {
  let client = LedgerClient::new(Some(DevWallet::new(3)), node.clone());
  let mut app = App::new(client);
  app.connect().await?;
  Ok(app)
}

fn wallet(app: &App<DevWallet, DevNode>) -> &DevWallet {
  app.client().wallet().unwrap()
}

#[tokio::test]
async fn dispatch_walks_the_state_machine() -> anyhow::Result<()> {
  let node = instant_node();
  let mut client = LedgerClient::new(Some(DevWallet::new(1)), node.clone());
  client.connect().await?;

  let dispatcher = Dispatcher::new();
  let mut transitions = dispatcher.transitions();
  let mut repository = CampaignRepository::default();

  let confirmed = dispatcher
    .dispatch(
      &client,
      &mut repository,
      Action::Create(new_campaign("well", 4, 10)),
    )
    .await?;
  assert!(confirmed.receipt.is_success());
  assert_eq!(confirmed.refresh, Ok(1));
  assert_eq!(drain(&mut transitions), vec![
    ActionState::Submitting,
    ActionState::Confirming,
    ActionState::Success,
    ActionState::Idle,
  ]);
  assert_eq!(dispatcher.state(), ActionState::Idle);
  assert_eq!(repository.len(), 1);
  assert_eq!(repository.generation(), 1);
  Ok(())
}

#[tokio::test]
async fn declined_signature_fails_while_submitting() -> anyhow::Result<()> {
  let node = instant_node();
  let mut client = LedgerClient::new(Some(DevWallet::new(1)), node.clone());
  client.connect().await?;
  client.wallet().unwrap().refuse_signing(true);

  let dispatcher = Dispatcher::new();
  let mut transitions = dispatcher.transitions();
  let mut repository = CampaignRepository::default();

  let err = dispatcher
    .dispatch(
      &client,
      &mut repository,
      Action::Create(new_campaign("well", 4, 10)),
    )
    .await
    .unwrap_err();
  assert_eq!(err, Error::TransactionRejected);
  assert_eq!(drain(&mut transitions), vec![
    ActionState::Submitting,
    ActionState::Failed,
    ActionState::Idle,
  ]);
  assert_eq!(repository.generation(), 0);
  Ok(())
}

#[tokio::test]
async fn lost_receipt_fails_while_confirming() -> anyhow::Result<()> {
  let node = instant_node();
  let contract = FaultyNode::new(node.clone());
  contract.fail_receipts(true);
  let mut client = LedgerClient::new(Some(DevWallet::new(1)), contract);
  client.connect().await?;

  let dispatcher = Dispatcher::new();
  let mut transitions = dispatcher.transitions();
  let mut repository = CampaignRepository::default();

  let err = dispatcher
    .dispatch(
      &client,
      &mut repository,
      Action::Create(new_campaign("well", 4, 10)),
    )
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Chain(_)));
  assert_eq!(drain(&mut transitions), vec![
    ActionState::Submitting,
    ActionState::Confirming,
    ActionState::Failed,
    ActionState::Idle,
  ]);
  assert_eq!(repository.generation(), 0);
  Ok(())
}

#[tokio::test]
async fn confirmed_create_survives_failed_rebuild() -> anyhow::Result<()> {
  let node = instant_node();
  let contract = FaultyNode::new(node.clone());
  let client = LedgerClient::new(Some(DevWallet::new(1)), contract);
  let mut app = App::new(client);
  app.connect().await?;
  let generation = app.repository().generation();

  let form = app.create_form_mut();
  form.title = "clinic".into();
  form.description = "medicine".into();
  form.evidence = "https://example.org/clinic".into();
  form.funding_goal = "3".into();
  form.duration_days = "14".into();

  app.client().contract().fail_reads(true);
  let mut transitions = app.dispatcher().transitions();
  let receipt = app.create_campaign().await?;

  assert!(receipt.is_success());
  assert_eq!(node.campaign_count().await?, 1);
  assert_eq!(drain(&mut transitions), vec![
    ActionState::Submitting,
    ActionState::Confirming,
    ActionState::Success,
    ActionState::Idle,
  ]);

  // the form is cleared so the campaign is not submitted twice
  assert_eq!(app.create_form(), &CreateCampaignForm::default());
  assert!(matches!(app.last_error(), Some(Error::Fetch(_))));
  assert_eq!(app.repository().generation(), generation);

  app.client().contract().fail_reads(false);
  assert_eq!(app.refresh().await?, 1);
  assert!(app.last_error().is_none());
  Ok(())
}

#[tokio::test]
async fn connect_loads_campaigns() -> anyhow::Result<()> {
  let node = instant_node();
  let mut app = connected(&node).await?;
  assert!(!app.is_loading());
  assert!(app.campaigns().is_empty());
  assert_eq!(app.account(), Some(wallet(&app).accounts()[0]));

  app.contribute(0, "1").await.unwrap_err();
  assert!(app.last_error().is_some());
  Ok(())
}

#[tokio::test]
async fn create_adds_one_campaign_at_highest_id() -> anyhow::Result<()> {
  let node = instant_node();
  let mut app = connected(&node).await?;

  for (i, title) in ["library", "garden"].into_iter().enumerate() {
    let form = app.create_form_mut();
    form.title = title.into();
    form.description = "books".into();
    form.evidence = "https://example.org".into();
    form.funding_goal = "1.5".into();
    form.duration_days = "7".into();

    app.create_campaign().await?;
    assert_eq!(app.campaigns().len(), i + 1);

    let created = app.campaigns().last().unwrap();
    assert_eq!(created.id, i as u64);
    assert_eq!(created.title, title);
    assert_eq!(created.creator, app.account().unwrap());
    assert_eq!(
      created.deadline.unix_timestamp() as u64,
      GENESIS + 7 * SECONDS_PER_DAY
    );
    assert!(app.create_form().title.is_empty());
  }
  assert_eq!(app.action_state(), ActionState::Idle);
  assert!(app.last_error().is_none());
  Ok(())
}

#[tokio::test]
async fn invalid_form_is_not_submitted() -> anyhow::Result<()> {
  let node = instant_node();
  let mut app = connected(&node).await?;
  app.create_form_mut().title = "only a title".into();

  let err = app.create_campaign().await.unwrap_err();
  assert!(matches!(err, Error::InvalidInput(_)));
  assert_eq!(app.create_form().title, "only a title");
  assert_eq!(node.height(), 0);
  Ok(())
}

#[tokio::test]
async fn rejected_contribution_leaves_repository_untouched(
) -> anyhow::Result<()> {
  let node = instant_node();
  let mut app = connected(&node).await?;
  app
    .dispatcher()
    .dispatch(
      app.client(),
      &mut CampaignRepository::default(),
      Action::Create(new_campaign("orchard", 5, 20)),
    )
    .await?;
  app.refresh().await?;
  let before = app.campaigns().to_vec();
  let generation = app.repository().generation();
  let height = node.height();

  wallet(&app).refuse_signing(true);
  let mut transitions = app.dispatcher().transitions();
  let err = app.contribute(0, "1.25").await.unwrap_err();

  assert_eq!(err, Error::TransactionRejected);
  assert_eq!(app.last_error(), Some(&Error::TransactionRejected));
  assert_eq!(app.campaigns(), before.as_slice());
  assert_eq!(app.repository().generation(), generation);
  assert_eq!(drain(&mut transitions), vec![
    ActionState::Submitting,
    ActionState::Failed,
    ActionState::Idle,
  ]);
  assert_eq!(node.height(), height);
  assert_eq!(node.campaign(0).unwrap().amount_raised, Amount::ZERO);
  Ok(())
}

#[tokio::test]
async fn contributing_after_deadline_is_a_chain_error() -> anyhow::Result<()> {
  let node = instant_node();
  let mut client = LedgerClient::new(Some(DevWallet::new(2)), node.clone());
  client.connect().await?;
  let mut repository = CampaignRepository::default();
  let dispatcher = Dispatcher::new();

  dispatcher
    .dispatch(
      &client,
      &mut repository,
      Action::Create(new_campaign("bridge", 10, 1)),
    )
    .await?;

  node.advance(Duration::from_secs(SECONDS_PER_DAY));
  let err = dispatcher
    .dispatch(&client, &mut repository, Action::Contribute {
      id: 0,
      amount: Amount::from_tokens(1),
    })
    .await
    .unwrap_err();

  assert!(matches!(err, Error::Chain(_)));
  assert_eq!(repository.generation(), 1);
  assert_eq!(dispatcher.state(), ActionState::Idle);
  Ok(())
}

#[tokio::test]
async fn only_creator_withdraws() -> anyhow::Result<()> {
  let node = instant_node();
  let mut app = connected(&node).await?;
  let creator = app.account().unwrap();

  let form = app.create_form_mut();
  form.title = "roof".into();
  form.description = "new roof".into();
  form.evidence = "https://example.org/roof".into();
  form.funding_goal = "2".into();
  form.duration_days = "30".into();
  app.create_campaign().await?;

  // a backer funds the whole goal
  wallet(&app).select(1);
  app.connect().await?;
  assert_ne!(app.account(), Some(creator));
  app.contribute(0, "2").await?;
  assert!(matches!(app.withdraw(0).await, Err(Error::Chain(_))));
  assert!(!app.campaigns()[0].is_completed);

  wallet(&app).select(0);
  app.connect().await?;
  assert_eq!(app.account(), Some(creator));
  app.withdraw(0).await?;

  let record = &app.campaigns()[0];
  assert!(record.is_completed);
  assert_eq!(record.amount_raised, Amount::from_tokens(2));
  assert!(app.last_error().is_none());
  Ok(())
}

#[tokio::test]
async fn missing_wallet_is_unavailable() -> anyhow::Result<()> {
  let node = instant_node();
  let mut app: App<DevWallet, DevNode> =
    App::new(LedgerClient::new(None, node.clone()));

  assert_eq!(app.connect().await, Err(Error::WalletUnavailable));
  assert!(app.is_loading());

  // reads still work without a wallet
  assert_eq!(app.refresh().await?, 0);
  assert!(!app.is_loading());
  assert_eq!(app.withdraw(0).await, Err(Error::WalletUnavailable));
  Ok(())
}

#[tokio::test]
async fn refused_authorization_is_user_rejected() -> anyhow::Result<()> {
  let node = instant_node();
  let wallet = DevWallet::new(1);
  wallet.refuse_authorization(true);
  let mut app = App::new(LedgerClient::new(Some(wallet), node));

  assert_eq!(app.connect().await, Err(Error::UserRejected));
  assert_eq!(app.account(), None);
  assert_eq!(app.last_error(), Some(&Error::UserRejected));
  Ok(())
}
