use {
  crowdfund_primitives::{
    Address,
    SignedTransaction,
    Transaction,
    Wallet,
    WalletError,
  },
  ed25519_dalek::{Keypair, PublicKey, SecretKey},
  multihash::MultihashDigest,
  parking_lot::Mutex,
  std::sync::atomic::{AtomicBool, AtomicU64, Ordering},
  tracing::{info, warn},
};

/// A development wallet holding a fixed set of well-known keys.
///
/// Keys are derived deterministically from their index, so the same
/// accounts exist across runs. The active account is returned first from
/// `request_accounts`. Authorization and signing can be switched to
/// refuse every request, which simulates the user pressing "reject".
pub struct DevWallet {
  keys: Vec<Keypair>,
  active: Mutex<usize>,
  refuse_authorization: AtomicBool,
  refuse_signing: AtomicBool,
  nonce: AtomicU64,
}

impl DevWallet {
  pub fn new(accounts: usize) -> Self {
    Self {
      keys: (0..accounts.max(1)).map(derive_keypair).collect(),
      active: Mutex::new(0),
      refuse_authorization: AtomicBool::new(false),
      refuse_signing: AtomicBool::new(false),
      nonce: AtomicU64::new(0),
    }
  }

  /// All accounts, active account first, the rest in index order.
  pub fn accounts(&self) -> Vec<Address> {
    let active = *self.active.lock();
    let all = self.keys.iter().map(|k| Address::from(&k.public));
    std::iter::once(Address::from(&self.keys[active].public))
      .chain(
        all
          .enumerate()
          .filter(|(i, _)| *i != active)
          .map(|(_, addr)| addr),
      )
      .collect()
  }

  /// Makes the account at `index` the active one.
  pub fn select(&self, index: usize) -> Option<Address> {
    let key = self.keys.get(index)?;
    *self.active.lock() = index;
    let address = Address::from(&key.public);
    info!("dev wallet switched to account {index} ({address})");
    Some(address)
  }

  pub fn refuse_authorization(&self, refuse: bool) {
    self.refuse_authorization.store(refuse, Ordering::SeqCst);
  }

  pub fn refuse_signing(&self, refuse: bool) {
    self.refuse_signing.store(refuse, Ordering::SeqCst);
  }

  fn keypair(&self, address: &Address) -> Option<&Keypair> {
    self
      .keys
      .iter()
      .find(|k| Address::from(&k.public) == *address)
  }
}

impl Wallet for DevWallet {
  async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
    if self.refuse_authorization.load(Ordering::SeqCst) {
      warn!("dev wallet refused account authorization");
      return Err(WalletError::Rejected);
    }
    Ok(self.accounts())
  }

  async fn sign(
    &self,
    tx: Transaction,
  ) -> Result<SignedTransaction, WalletError> {
    if self.refuse_signing.load(Ordering::SeqCst) {
      warn!("dev wallet refused to sign {}", tx.call.name());
      return Err(WalletError::Rejected);
    }

    let keypair = self
      .keypair(&tx.from)
      .ok_or(WalletError::UnknownAccount(tx.from))?;
    let nonce = self.nonce.fetch_add(1, Ordering::SeqCst);
    Ok(tx.with_nonce(nonce).sign(keypair))
  }
}

fn derive_keypair(index: usize) -> Keypair {
  let seed = format!("crowdfund-devnode-account-{index}");
  let digest = multihash::Code::Sha3_256.digest(seed.as_bytes());
  let secret = SecretKey::from_bytes(digest.digest())
    .expect("sha3-256 digests are 32 bytes long");
  let public = PublicKey::from(&secret);
  Keypair { secret, public }
}
