use {
  crowdfund_primitives::{
    Address,
    Amount,
    Call,
    Event,
    Timestamp,
    Transaction,
    Value,
  },
  std::time::{Duration, SystemTime, UNIX_EPOCH},
  thiserror::Error,
};

/// Reasons the development contract refuses a call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Revert {
  #[error("duration must be greater than zero")]
  InvalidDuration,

  #[error("funding goal must be greater than zero")]
  InvalidGoal,

  #[error("campaign {0} does not exist")]
  UnknownCampaign(u64),

  #[error("contribution must be greater than zero")]
  EmptyContribution,

  #[error("campaign {0} is completed")]
  Completed(u64),

  #[error("campaign {0} has ended")]
  Ended(u64),

  #[error("only the creator of campaign {0} can withdraw")]
  NotCreator(u64),

  #[error("campaign {0} is still running and below its goal")]
  NotWithdrawable(u64),

  #[error("raised amount overflow")]
  Overflow,

  #[error("withdrawFunds does not accept value")]
  UnexpectedValue,
}

/// On-ledger state of a single campaign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignState {
  pub creator: Address,
  pub title: String,
  pub description: String,
  pub evidence_url: String,
  pub funding_goal: Amount,
  pub deadline: Timestamp,
  pub amount_raised: Amount,
  pub is_completed: bool,
}

impl CampaignState {
  /// Encodes the campaign the way `getCampaignDetails` returns it.
  pub fn to_values(&self) -> Vec<Value> {
    vec![
      self.creator.into(),
      self.title.clone().into(),
      self.description.clone().into(),
      self.evidence_url.clone().into(),
      self.funding_goal.base_units().into(),
      self.deadline.into(),
      self.amount_raised.base_units().into(),
      self.is_completed.into(),
    ]
  }
}

/// Ledger time. Either follows the wall clock or starts at a fixed
/// genesis timestamp; in both cases it can be moved forward.
#[derive(Debug, Clone, Default)]
pub struct Clock {
  genesis: Option<Timestamp>,
  offset: u64,
}

impl Clock {
  pub fn new(genesis: Option<Timestamp>) -> Self {
    Self { genesis, offset: 0 }
  }

  pub fn now(&self) -> Timestamp {
    let base = self.genesis.unwrap_or_else(|| {
      SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
    });
    base + self.offset
  }

  pub fn advance(&mut self, by: Duration) {
    self.offset += by.as_secs();
  }
}

/// Campaign storage of the development contract.
#[derive(Debug, Default)]
pub struct Chain {
  campaigns: Vec<CampaignState>,
  clock: Clock,
}

impl Chain {
  pub fn new(clock: Clock) -> Self {
    Self {
      campaigns: vec![],
      clock,
    }
  }

  pub fn now(&self) -> Timestamp {
    self.clock.now()
  }

  pub fn advance(&mut self, by: Duration) {
    self.clock.advance(by);
  }

  pub fn campaign_count(&self) -> u64 {
    self.campaigns.len() as u64
  }

  pub fn campaign(&self, id: u64) -> Option<&CampaignState> {
    self.campaigns.get(id as usize)
  }

  /// Verifies that a transaction would succeed against the current
  /// state without applying it.
  pub fn check(&self, tx: &Transaction) -> Result<(), Revert> {
    let now = self.now();
    match &tx.call {
      Call::CreateCampaign {
        funding_goal,
        duration,
        ..
      } => {
        if *duration == 0 {
          return Err(Revert::InvalidDuration);
        }
        if funding_goal.is_zero() {
          return Err(Revert::InvalidGoal);
        }
      }
      Call::Contribute { id } => {
        let campaign = self.existing(*id)?;
        if tx.value.is_zero() {
          return Err(Revert::EmptyContribution);
        }
        if campaign.is_completed {
          return Err(Revert::Completed(*id));
        }
        if campaign.deadline <= now {
          return Err(Revert::Ended(*id));
        }
        campaign
          .amount_raised
          .checked_add(tx.value)
          .ok_or(Revert::Overflow)?;
      }
      Call::WithdrawFunds { id } => {
        let campaign = self.existing(*id)?;
        if !tx.value.is_zero() {
          return Err(Revert::UnexpectedValue);
        }
        if campaign.creator != tx.from {
          return Err(Revert::NotCreator(*id));
        }
        if campaign.is_completed {
          return Err(Revert::Completed(*id));
        }
        let ended = campaign.deadline <= now;
        let funded = campaign.amount_raised >= campaign.funding_goal;
        if !ended && !funded {
          return Err(Revert::NotWithdrawable(*id));
        }
      }
    }
    Ok(())
  }

  /// Checks and applies a transaction, returning the emitted events.
  /// A reverted transaction leaves the state untouched.
  pub fn execute(&mut self, tx: &Transaction) -> Result<Vec<Event>, Revert> {
    self.check(tx)?;
    let now = self.now();

    let event = match &tx.call {
      Call::CreateCampaign {
        title,
        description,
        evidence_url,
        funding_goal,
        duration,
      } => {
        let id = self.campaign_count();
        let deadline = now.saturating_add(*duration);
        self.campaigns.push(CampaignState {
          creator: tx.from,
          title: title.clone(),
          description: description.clone(),
          evidence_url: evidence_url.clone(),
          funding_goal: *funding_goal,
          deadline,
          amount_raised: Amount::ZERO,
          is_completed: false,
        });
        Event::CampaignCreated {
          id,
          creator: tx.from,
          funding_goal: *funding_goal,
          deadline,
        }
      }
      Call::Contribute { id } => {
        let campaign = &mut self.campaigns[*id as usize];
        campaign.amount_raised = campaign
          .amount_raised
          .checked_add(tx.value)
          .ok_or(Revert::Overflow)?;
        Event::ContributionMade {
          id: *id,
          contributor: tx.from,
          amount: tx.value,
        }
      }
      Call::WithdrawFunds { id } => {
        let campaign = &mut self.campaigns[*id as usize];
        campaign.is_completed = true;
        Event::FundsWithdrawn {
          id: *id,
          creator: campaign.creator,
          amount: campaign.amount_raised,
        }
      }
    };

    Ok(vec![event])
  }

  fn existing(&self, id: u64) -> Result<&CampaignState, Revert> {
    self.campaign(id).ok_or(Revert::UnknownCampaign(id))
  }
}
