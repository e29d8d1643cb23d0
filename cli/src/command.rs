use {
  clap::{Parser, Subcommand, ValueEnum},
  humantime::Duration,
};

/// One line typed at the prompt.
#[derive(Debug, Parser)]
#[command(no_binary_name = true, disable_version_flag = true)]
pub struct Line {
  #[command(subcommand)]
  pub command: Command,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Command {
  /// Connect the wallet and load campaigns
  Connect,

  /// Show all campaigns
  List,

  /// Reload campaigns from the ledger
  Refresh,

  /// Start a new campaign
  Create {
    #[arg(long)]
    title: String,

    #[arg(long)]
    description: String,

    #[arg(long)]
    evidence: String,

    /// Funding goal in POL
    #[arg(long)]
    goal: String,

    /// Campaign duration in whole days
    #[arg(long)]
    days: String,
  },

  /// Send POL to a campaign
  Contribute { id: u64, amount: String },

  /// Withdraw the raised funds of your campaign
  Withdraw { id: u64 },

  /// Make another wallet account the active one
  Switch { index: usize },

  /// Move ledger time forward, e.g. `advance 2days`
  Advance { by: Duration },

  /// Make the wallet decline every signing request
  RejectSigning { mode: Toggle },

  /// Leave the client
  #[command(alias = "exit")]
  Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
  On,
  Off,
}

impl Line {
  /// Splits and parses a prompt line. Returns `Ok(None)` for blank
  /// lines. Parse failures carry clap's usage message.
  pub fn parse_line(line: &str) -> Result<Option<Command>, String> {
    let tokens = tokenize(line)?;
    if tokens.is_empty() {
      return Ok(None);
    }
    Line::try_parse_from(tokens)
      .map(|line| Some(line.command))
      .map_err(|e| e.to_string())
  }
}

/// Whitespace separated words; single or double quotes group words.
fn tokenize(line: &str) -> Result<Vec<String>, String> {
  let mut tokens = vec![];
  let mut current = String::new();
  let mut in_token = false;
  let mut quote = None;

  for c in line.chars() {
    match (quote, c) {
      (Some(q), c) if c == q => quote = None,
      (Some(_), c) => current.push(c),
      (None, '"' | '\'') => {
        quote = Some(c);
        in_token = true;
      }
      (None, c) if c.is_whitespace() => {
        if in_token {
          tokens.push(std::mem::take(&mut current));
          in_token = false;
        }
      }
      (None, c) => {
        current.push(c);
        in_token = true;
      }
    }
  }

  if quote.is_some() {
    return Err("unterminated quote".into());
  }
  if in_token {
    tokens.push(current);
  }
  Ok(tokens)
}
