use {
  crowdfund_primitives::{Address, Amount, DecodeError, Value},
  time::OffsetDateTime,
};

/// 9999-12-31T23:59:59Z, the latest instant `OffsetDateTime` holds.
const LATEST_DEADLINE: i64 = 253_402_300_799;

/// The `getCampaignDetails` return tuple with every position typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCampaign {
  pub creator: Address,
  pub title: String,
  pub description: String,
  pub evidence_url: String,
  pub funding_goal: u128,
  pub deadline: u128,
  pub amount_raised: u128,
  pub is_completed: bool,
}

impl RawCampaign {
  pub const ARITY: usize = 8;

  /// Decodes the positional contract return values. Any difference in
  /// length or in the type of a position is an error.
  pub fn decode(values: Vec<Value>) -> Result<Self, DecodeError> {
    let [
      creator,
      title,
      description,
      evidence_url,
      funding_goal,
      deadline,
      amount_raised,
      is_completed,
    ]: [Value; Self::ARITY] = values.try_into().map_err(|v: Vec<Value>| {
      DecodeError::Arity {
        expected: Self::ARITY,
        found: v.len(),
      }
    })?;

    Ok(Self {
      creator: creator.expect_address(0)?,
      title: title.expect_string(1)?,
      description: description.expect_string(2)?,
      evidence_url: evidence_url.expect_string(3)?,
      funding_goal: funding_goal.expect_uint(4)?,
      deadline: deadline.expect_uint(5)?,
      amount_raised: amount_raised.expect_uint(6)?,
      is_completed: is_completed.expect_bool(7)?,
    })
  }
}

/// Point-in-time snapshot of one campaign, as shown to the user.
///
/// Records are never updated in place. The repository replaces all of
/// them whenever it is rebuilt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignRecord {
  pub id: u64,
  pub creator: Address,
  pub title: String,
  pub description: String,
  pub evidence_url: String,
  pub funding_goal: Amount,
  pub amount_raised: Amount,
  pub deadline: OffsetDateTime,
  pub is_completed: bool,
}

impl CampaignRecord {
  pub fn decode(id: u64, values: Vec<Value>) -> Result<Self, DecodeError> {
    Self::from_raw(id, RawCampaign::decode(values)?)
  }

  /// Deadlines past the last representable date are clamped to it.
  /// Such a campaign is still open for every practical purpose.
  pub fn from_raw(id: u64, raw: RawCampaign) -> Result<Self, DecodeError> {
    let secs = i64::try_from(raw.deadline)
      .unwrap_or(i64::MAX)
      .min(LATEST_DEADLINE);
    let deadline = OffsetDateTime::from_unix_timestamp(secs)
      .map_err(|_| DecodeError::OutOfRange { position: 5 })?;

    Ok(Self {
      id,
      creator: raw.creator,
      title: raw.title,
      description: raw.description,
      evidence_url: raw.evidence_url,
      funding_goal: Amount::from_base_units(raw.funding_goal),
      amount_raised: Amount::from_base_units(raw.amount_raised),
      deadline,
      is_completed: raw.is_completed,
    })
  }
}
