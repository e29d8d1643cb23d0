use {
  crate::{
    command::{Command, Line, Toggle},
    settings::SystemSettings,
  },
  clap::Parser,
  crowdfund_client::{App, LedgerClient},
  crowdfund_devnode::{DevNode, DevWallet},
  std::io::Write,
  time::OffsetDateTime,
  tokio::io::{stdin, AsyncBufReadExt, BufReader},
  tracing::info,
  tracing_subscriber::EnvFilter,
};

mod command;
mod settings;

type CrowdfundApp = App<DevWallet, DevNode>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // configure logging, RUST_LOG overrides the default level
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info")),
    )
    .with_writer(std::io::stderr)
    .init();

  // gather CLI parameters
  let settings = SystemSettings::parse();
  info!("startup settings: {settings:#?}");

  let node = DevNode::start(settings.ledger());
  let wallet = settings.accounts().map(DevWallet::new);
  let mut app = App::new(LedgerClient::new(wallet, node.clone()));

  // campaigns are readable before any wallet is connected
  if app.refresh().await.is_ok() {
    print_page(&app, &node)?;
  }

  let mut lines = BufReader::new(stdin()).lines();
  loop {
    print!("> ");
    std::io::stdout().flush()?;

    let Some(line) = lines.next_line().await? else {
      break;
    };

    let command = match Line::parse_line(&line) {
      Ok(Some(command)) => command,
      Ok(None) => continue,
      Err(usage) => {
        println!("{usage}");
        continue;
      }
    };

    if command == Command::Quit {
      break;
    }
    execute(&mut app, &node, command).await?;
  }

  info!("bye");
  Ok(())
}

/// Runs one command. Action failures are already logged and kept on the
/// page by the app, so only I/O errors end the session.
async fn execute(
  app: &mut CrowdfundApp,
  node: &DevNode,
  command: Command,
) -> anyhow::Result<()> {
  match command {
    Command::Connect => {
      if let Ok(account) = app.connect().await {
        println!("connected as {account}");
      }
    }
    Command::List => {}
    Command::Refresh => {
      let _ = app.refresh().await;
    }
    Command::Create {
      title,
      description,
      evidence,
      goal,
      days,
    } => {
      let form = app.create_form_mut();
      form.title = title;
      form.description = description;
      form.evidence = evidence;
      form.funding_goal = goal;
      form.duration_days = days;
      if let Ok(receipt) = app.create_campaign().await {
        println!("campaign created in block {}", receipt.block);
      }
    }
    Command::Contribute { id, amount } => {
      if let Ok(receipt) = app.contribute(id, &amount).await {
        println!("contributed {amount} POL in block {}", receipt.block);
      }
    }
    Command::Withdraw { id } => {
      if let Ok(receipt) = app.withdraw(id).await {
        println!("funds withdrawn in block {}", receipt.block);
      }
    }
    Command::Switch { index } => {
      let Some(wallet) = app.client().wallet() else {
        println!("no wallet available");
        return Ok(());
      };
      if wallet.select(index).is_none() {
        println!("wallet has no account {index}");
        return Ok(());
      }
      let _ = app.connect().await;
    }
    Command::Advance { by } => {
      node.advance(by.into());
    }
    Command::RejectSigning { mode } => match app.client().wallet() {
      Some(wallet) => wallet.refuse_signing(mode == Toggle::On),
      None => println!("no wallet available"),
    },
    Command::Quit => return Ok(()),
  }

  print_page(app, node)
}

fn print_page(app: &CrowdfundApp, node: &DevNode) -> anyhow::Result<()> {
  let now = i64::try_from(node.now())?;
  let now = OffsetDateTime::from_unix_timestamp(now)?;
  print!("{}", app.page(now));
  Ok(())
}
