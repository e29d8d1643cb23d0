use {
  crate::{
    error::{Error, FetchError},
    record::CampaignRecord,
  },
  crowdfund_primitives::{
    Address,
    Amount,
    Call,
    Contract,
    Receipt,
    Status,
    ToBase58String,
    Transaction,
    TxHash,
    Wallet,
    WalletError,
  },
  tracing::{debug, info},
};

/// Arguments of a new campaign, already converted to ledger units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCampaign {
  pub title: String,
  pub description: String,
  pub evidence_url: String,
  pub funding_goal: Amount,

  /// Campaign lifetime in seconds.
  pub duration: u64,
}

/// Typed access to the crowdfunding contract on behalf of a wallet.
///
/// Reads go straight to the contract. Writes are built here, signed by
/// the wallet for the connected account and handed to the contract,
/// yielding a [`PendingTransaction`].
pub struct LedgerClient<W, C> {
  wallet: Option<W>,
  contract: C,
  account: Option<Address>,
}

impl<W, C> LedgerClient<W, C> {
  /// `wallet` is `None` when no compatible wallet is installed.
  pub fn new(wallet: Option<W>, contract: C) -> Self {
    Self {
      wallet,
      contract,
      account: None,
    }
  }

  pub fn wallet(&self) -> Option<&W> {
    self.wallet.as_ref()
  }

  pub fn contract(&self) -> &C {
    &self.contract
  }

  /// The active account, once connected.
  pub fn account(&self) -> Option<Address> {
    self.account
  }
}

impl<W: Wallet, C> LedgerClient<W, C> {
  /// Requests wallet authorization and makes the first exposed account
  /// the active one.
  pub async fn connect(&mut self) -> Result<Address, Error> {
    let wallet = self.wallet.as_ref().ok_or(Error::WalletUnavailable)?;
    let accounts = wallet.request_accounts().await.map_err(|e| match e {
      WalletError::Rejected => Error::UserRejected,
      WalletError::Unavailable | WalletError::UnknownAccount(_) => {
        Error::WalletUnavailable
      }
    })?;

    let account = *accounts.first().ok_or(Error::WalletUnavailable)?;
    self.account = Some(account);
    info!("connected account {account}");
    Ok(account)
  }
}

impl<W, C: Contract> LedgerClient<W, C> {
  pub async fn enumerate_count(&self) -> Result<u64, FetchError> {
    self
      .contract
      .campaign_count()
      .await
      .map_err(FetchError::Count)
  }

  pub async fn fetch_campaign(
    &self,
    id: u64,
  ) -> Result<CampaignRecord, FetchError> {
    let values = self
      .contract
      .campaign_details(id)
      .await
      .map_err(|source| FetchError::Campaign { id, source })?;
    debug!("fetched campaign {id}");
    CampaignRecord::decode(id, values)
      .map_err(|source| FetchError::Decode { id, source })
  }
}

impl<W: Wallet, C: Contract> LedgerClient<W, C> {
  /// No validation happens here; the contract is the authority on
  /// whether the campaign arguments are acceptable.
  pub async fn submit_create(
    &self,
    fields: NewCampaign,
  ) -> Result<PendingTransaction<'_, C>, Error> {
    self
      .submit(
        Call::CreateCampaign {
          title: fields.title,
          description: fields.description,
          evidence_url: fields.evidence_url,
          funding_goal: fields.funding_goal,
          duration: fields.duration,
        },
        Amount::ZERO,
      )
      .await
  }

  /// The amount travels as the transaction value.
  pub async fn submit_contribute(
    &self,
    id: u64,
    amount: Amount,
  ) -> Result<PendingTransaction<'_, C>, Error> {
    self.submit(Call::Contribute { id }, amount).await
  }

  pub async fn submit_withdraw(
    &self,
    id: u64,
  ) -> Result<PendingTransaction<'_, C>, Error> {
    self.submit(Call::WithdrawFunds { id }, Amount::ZERO).await
  }

  async fn submit(
    &self,
    call: Call,
    value: Amount,
  ) -> Result<PendingTransaction<'_, C>, Error> {
    let wallet = self.wallet.as_ref().ok_or(Error::WalletUnavailable)?;
    let from = self.account.ok_or(Error::NotConnected)?;
    let name = call.name();

    let signed = wallet
      .sign(Transaction::new(from, call, value))
      .await
      .map_err(|e| match e {
        WalletError::Rejected => Error::TransactionRejected,
        WalletError::Unavailable => Error::WalletUnavailable,
        WalletError::UnknownAccount(_) => Error::NotConnected,
      })?;

    let hash = self
      .contract
      .submit(signed)
      .await
      .map_err(|e| Error::Chain(e.to_string()))?;

    info!("submitted {name} transaction {}", hash.to_b58());
    Ok(PendingTransaction {
      hash,
      name,
      contract: &self.contract,
    })
  }
}

/// A submitted transaction whose outcome is not known yet.
pub struct PendingTransaction<'c, C> {
  hash: TxHash,
  name: &'static str,
  contract: &'c C,
}

impl<'c, C: Contract> PendingTransaction<'c, C> {
  pub fn hash(&self) -> &TxHash {
    &self.hash
  }

  /// Suspends until the transaction is mined. A reverted transaction is
  /// reported as [`Error::Chain`]; its effects are assumed not to have
  /// happened.
  pub async fn await_confirmation(self) -> Result<Receipt, Error> {
    let receipt = self
      .contract
      .await_receipt(self.hash)
      .await
      .map_err(|e| Error::Chain(e.to_string()))?;

    match &receipt.status {
      Status::Success => {
        info!(
          "{} transaction {} confirmed in block {}",
          self.name,
          self.hash.to_b58(),
          receipt.block
        );
        Ok(receipt)
      }
      Status::Reverted(reason) => Err(Error::Chain(format!(
        "{} transaction reverted: {reason}",
        self.name
      ))),
    }
  }
}
