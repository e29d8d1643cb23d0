use {
  crate::record::CampaignRecord,
  crowdfund_primitives::{Address, Amount},
  std::fmt::Display,
  time::OffsetDateTime,
};

/// Label of the native ledger currency.
pub const CURRENCY: &str = "POL";

const BAR_WIDTH: usize = 20;

/// A campaign accepts contributions while it is open and before its
/// deadline.
pub fn is_contributable(record: &CampaignRecord, now: OffsetDateTime) -> bool {
  !record.is_completed && record.deadline > now
}

/// Only the creator may withdraw, once the campaign ended or reached its
/// goal, and only once. Addresses compare by value, so letter case of
/// their textual form does not matter.
pub fn is_withdrawable(
  record: &CampaignRecord,
  viewer: Option<&Address>,
  now: OffsetDateTime,
) -> bool {
  let Some(viewer) = viewer else {
    return false;
  };
  !record.is_completed
    && (record.deadline <= now || goal_reached(record))
    && *viewer == record.creator
}

pub fn goal_reached(record: &CampaignRecord) -> bool {
  record.amount_raised >= record.funding_goal
}

/// Share of the goal raised so far, rounded to the nearest percent and
/// capped at 100. A zero goal counts as fully funded.
pub fn progress_percent(raised: Amount, goal: Amount) -> u8 {
  let (raised, goal) = (raised.base_units(), goal.base_units());
  if goal == 0 {
    return 100;
  }

  let percent = match raised.checked_mul(100) {
    Some(scaled) => {
      let half_up = scaled % goal >= goal - goal / 2;
      scaled / goal + u128::from(half_up)
    }
    None => (raised as f64 / goal as f64 * 100.0).round() as u128,
  };
  percent.min(100) as u8
}

/// Everything one campaign card shows, resolved for a viewer and time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignCard {
  pub id: u64,
  pub title: String,
  pub description: String,
  pub evidence_url: String,
  pub funding_goal: Amount,
  pub amount_raised: Amount,
  pub progress: u8,
  pub goal_reached: bool,
  pub deadline: OffsetDateTime,
  pub ended: bool,
  pub completed: bool,
  pub can_contribute: bool,
  pub can_withdraw: bool,
}

impl CampaignCard {
  pub fn new(
    record: &CampaignRecord,
    viewer: Option<&Address>,
    now: OffsetDateTime,
  ) -> Self {
    Self {
      id: record.id,
      title: record.title.clone(),
      description: record.description.clone(),
      evidence_url: record.evidence_url.clone(),
      funding_goal: record.funding_goal,
      amount_raised: record.amount_raised,
      progress: progress_percent(record.amount_raised, record.funding_goal),
      goal_reached: goal_reached(record),
      deadline: record.deadline,
      ended: record.deadline <= now,
      completed: record.is_completed,
      can_contribute: is_contributable(record, now),
      can_withdraw: is_withdrawable(record, viewer, now),
    }
  }
}

impl Display for CampaignCard {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "[{}] {}", self.id, self.title)?;
    if self.goal_reached {
      write!(f, "  (Goal reached)")?;
    }
    if self.completed {
      write!(f, "  (Completed)")?;
    }
    writeln!(f)?;
    writeln!(f, "    {}", self.description)?;
    if !self.evidence_url.is_empty() {
      writeln!(f, "    Evidence: {}", self.evidence_url)?;
    }
    writeln!(
      f,
      "    Target: {} {CURRENCY}   Raised: {} {CURRENCY}",
      self.funding_goal, self.amount_raised
    )?;

    let filled = usize::from(self.progress) * BAR_WIDTH / 100;
    writeln!(
      f,
      "    [{}{}] {}%",
      "#".repeat(filled),
      "-".repeat(BAR_WIDTH - filled),
      self.progress
    )?;

    let verb = if self.ended { "Ended" } else { "Ends" };
    write!(f, "    {verb} {}", self.deadline.date())?;

    let mut actions = vec![];
    if self.can_contribute {
      actions.push(format!("contribute {}", self.id));
    }
    if self.can_withdraw {
      actions.push(format!("withdraw {}", self.id));
    }
    if !actions.is_empty() {
      write!(f, "\n    Actions: {}", actions.join(", "))?;
    }
    Ok(())
  }
}

/// The whole campaign page as seen by the connected account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
  pub account: Option<Address>,
  pub loading: bool,
  pub cards: Vec<CampaignCard>,
  pub last_error: Option<String>,
}

impl Page {
  pub fn new(
    account: Option<Address>,
    loading: bool,
    campaigns: &[CampaignRecord],
    last_error: Option<String>,
    now: OffsetDateTime,
  ) -> Self {
    Self {
      account,
      loading,
      cards: campaigns
        .iter()
        .map(|r| CampaignCard::new(r, account.as_ref(), now))
        .collect(),
      last_error,
    }
  }
}

impl Display for Page {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match &self.account {
      Some(account) => writeln!(f, "Connected: {}", account.short())?,
      None => writeln!(f, "Not connected. Use `connect` to link a wallet.")?,
    }

    if self.loading {
      writeln!(f, "Loading campaigns...")?;
    } else if self.cards.is_empty() {
      writeln!(f, "No campaigns yet.")?;
    } else {
      for card in &self.cards {
        writeln!(f, "{card}")?;
      }
    }

    if let Some(error) = &self.last_error {
      writeln!(f, "Error: {error}")?;
    }
    Ok(())
  }
}
