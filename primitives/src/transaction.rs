use {
  crate::{b58::ToBase58String, Address, Amount},
  ed25519_dalek::{Keypair, PublicKey, Signature, Signer, Verifier},
  multihash::{Hasher, Multihash, MultihashDigest, Sha3_256},
  once_cell::sync::OnceCell,
  serde::{Deserialize, Serialize},
  std::fmt::Debug,
  thiserror::Error,
};

/// Uniquely identifies a transaction. SHA3-256 of its signed contents.
pub type TxHash = Multihash;

#[derive(Debug, Error)]
pub enum VerifyError {
  #[error("transaction sender {0} does not match the signing key")]
  SenderMismatch(Address),

  #[error("invalid signature: {0}")]
  Signature(#[from] ed25519_dalek::SignatureError),
}

/// State-changing entrypoints of the crowdfunding contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Call {
  /// Opens a new campaign owned by the sender. The duration is in
  /// seconds, counted from the timestamp of the block that includes it.
  CreateCampaign {
    title: String,
    description: String,
    evidence_url: String,
    funding_goal: Amount,
    duration: u64,
  },

  /// Adds the transaction value to the raised amount of a campaign.
  Contribute { id: u64 },

  /// Pays out the raised amount of a campaign to its creator.
  WithdrawFunds { id: u64 },
}

impl Call {
  pub fn name(&self) -> &'static str {
    match self {
      Call::CreateCampaign { .. } => "createCampaign",
      Call::Contribute { .. } => "contribute",
      Call::WithdrawFunds { .. } => "withdrawFunds",
    }
  }
}

/// An unsigned request to invoke the contract.
///
/// The value is transferred along with the call and is not one of its
/// arguments. The nonce is assigned by the wallet at signing time so that
/// two otherwise identical requests produce distinct hashes.
#[derive(Clone, Serialize, Deserialize)]
pub struct Transaction {
  pub from: Address,
  pub call: Call,
  pub value: Amount,
  pub nonce: u64,

  #[serde(skip)]
  hash_cache: OnceCell<TxHash>,
}

impl Transaction {
  pub fn new(from: Address, call: Call, value: Amount) -> Self {
    Self {
      from,
      call,
      value,
      nonce: 0,
      hash_cache: OnceCell::new(),
    }
  }

  pub fn with_nonce(self, nonce: u64) -> Self {
    Self {
      nonce,
      hash_cache: OnceCell::new(),
      ..self
    }
  }

  /// Hash of the transaction contents. This is also the message
  /// signed by the sender.
  pub fn hash(&self) -> &TxHash {
    self.hash_cache.get_or_init(|| {
      let mut hasher = Sha3_256::default();
      hasher.update(self.from.as_ref());
      hasher.update(&encode(&self.call));
      hasher.update(&self.value.base_units().to_le_bytes());
      hasher.update(&self.nonce.to_le_bytes());
      multihash::Code::Sha3_256
        .wrap(hasher.finalize())
        .expect("sha3-256 digest fits in a multihash")
    })
  }

  pub fn sign(self, keypair: &Keypair) -> SignedTransaction {
    let signature = keypair.sign(&self.hash().to_bytes());
    SignedTransaction {
      transaction: self,
      signer: keypair.public,
      signature,
    }
  }
}

impl Debug for Transaction {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Transaction")
      .field("from", &self.from)
      .field("call", &self.call)
      .field("value", &self.value)
      .field("nonce", &self.nonce)
      .field("hash", &self.hash().to_b58())
      .finish()
  }
}

/// A transaction together with the signature of its sender.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedTransaction {
  pub transaction: Transaction,
  pub signer: PublicKey,
  pub signature: Signature,
}

impl SignedTransaction {
  pub fn hash(&self) -> &TxHash {
    self.transaction.hash()
  }

  /// Checks that the signature is valid for the transaction hash and
  /// that the signing key owns the sender address.
  pub fn verify(&self) -> Result<(), VerifyError> {
    if Address::from(&self.signer) != self.transaction.from {
      return Err(VerifyError::SenderMismatch(self.transaction.from));
    }
    self
      .signer
      .verify(&self.hash().to_bytes(), &self.signature)
      .map_err(VerifyError::from)
  }
}

fn encode(call: &Call) -> Vec<u8> {
  rmp_serde::to_vec(call).expect("call arguments are always serializable")
}
