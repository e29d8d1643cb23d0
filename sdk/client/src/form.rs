use {
  crate::client::NewCampaign,
  crowdfund_primitives::{Amount, AmountError, SCALE, SECONDS_PER_DAY},
  thiserror::Error,
};

/// Smallest accepted funding goal, 0.01 tokens.
pub const MIN_FUNDING_GOAL: Amount = Amount::from_base_units(SCALE / 100);

/// Longest accepted campaign, about a century.
pub const MAX_DURATION_DAYS: u64 = 36_500;

/// Smallest accepted contribution, 0.001 tokens.
pub const MIN_CONTRIBUTION: Amount = Amount::from_base_units(SCALE / 1000);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
  #[error("{0} is required")]
  Required(&'static str),

  #[error("{field} is not a valid amount: {source}")]
  Amount {
    field: &'static str,
    #[source]
    source: AmountError,
  },

  #[error("{field} must be at least {min}")]
  BelowMinimum { field: &'static str, min: Amount },

  #[error("duration must be a whole number of days, from 1 to 36500")]
  InvalidDuration,
}

/// User input of the "create campaign" form, kept as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateCampaignForm {
  pub title: String,
  pub description: String,
  pub evidence: String,
  pub funding_goal: String,
  pub duration_days: String,
}

impl CreateCampaignForm {
  /// Checks the input and converts it to contract arguments. The goal
  /// becomes base units and the duration becomes seconds.
  pub fn validate(&self) -> Result<NewCampaign, FormError> {
    let title = required("title", &self.title)?;
    let description = required("description", &self.description)?;
    let evidence_url = required("evidence", &self.evidence)?;
    let funding_goal =
      parse_amount("funding goal", &self.funding_goal, MIN_FUNDING_GOAL)?;

    let days: u64 = self
      .duration_days
      .trim()
      .parse()
      .map_err(|_| FormError::InvalidDuration)?;
    if !(1..=MAX_DURATION_DAYS).contains(&days) {
      return Err(FormError::InvalidDuration);
    }
    let duration = days * SECONDS_PER_DAY;

    Ok(NewCampaign {
      title,
      description,
      evidence_url,
      funding_goal,
      duration,
    })
  }

  pub fn reset(&mut self) {
    *self = Self::default();
  }
}

/// Parses the amount typed into a campaign's contribution field.
pub fn parse_contribution(input: &str) -> Result<Amount, FormError> {
  parse_amount("contribution", input, MIN_CONTRIBUTION)
}

fn required(field: &'static str, value: &str) -> Result<String, FormError> {
  let value = value.trim();
  if value.is_empty() {
    return Err(FormError::Required(field));
  }
  Ok(value.to_owned())
}

fn parse_amount(
  field: &'static str,
  input: &str,
  min: Amount,
) -> Result<Amount, FormError> {
  let input = input.trim();
  if input.is_empty() {
    return Err(FormError::Required(field));
  }
  let amount: Amount = input
    .parse()
    .map_err(|source| FormError::Amount { field, source })?;
  if amount < min {
    return Err(FormError::BelowMinimum { field, min });
  }
  Ok(amount)
}
