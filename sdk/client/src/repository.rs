use {
  crate::{client::LedgerClient, error::FetchError, record::CampaignRecord},
  crowdfund_primitives::Contract,
  futures::future::try_join_all,
  tracing::info,
};

/// Client-side view of all campaigns, indexed by id.
///
/// The repository is never patched. Each rebuild reads the campaign
/// count, fetches every campaign concurrently, and swaps the whole
/// snapshot in one assignment once all of them decoded. If any read
/// fails the previous snapshot stays in place.
#[derive(Debug, Default)]
pub struct CampaignRepository {
  campaigns: Vec<CampaignRecord>,
  generation: u64,
}

impl CampaignRepository {
  pub fn campaigns(&self) -> &[CampaignRecord] {
    &self.campaigns
  }

  pub fn get(&self, id: u64) -> Option<&CampaignRecord> {
    self.campaigns.get(id as usize)
  }

  pub fn len(&self) -> usize {
    self.campaigns.len()
  }

  pub fn is_empty(&self) -> bool {
    self.campaigns.is_empty()
  }

  /// Number of successful rebuilds so far.
  pub fn generation(&self) -> u64 {
    self.generation
  }

  /// Re-reads every campaign from the ledger and returns how many there
  /// are. Fetches run concurrently on the calling task and may complete
  /// in any order; the snapshot keeps id order.
  pub async fn rebuild<W, C: Contract>(
    &mut self,
    client: &LedgerClient<W, C>,
  ) -> Result<usize, FetchError> {
    let count = client.enumerate_count().await?;
    let campaigns =
      try_join_all((0..count).map(|id| client.fetch_campaign(id))).await?;

    self.campaigns = campaigns;
    self.generation += 1;
    info!(
      "campaign repository rebuilt with {count} campaigns (generation {})",
      self.generation
    );
    Ok(self.campaigns.len())
  }
}
