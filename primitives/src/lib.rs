mod address;
mod amount;
mod b58;
mod contract;
mod receipt;
mod transaction;
mod value;
mod wallet;

pub use {
  address::{Address, Error as AddressError},
  amount::{Amount, Error as AmountError, DECIMALS, SCALE},
  b58::ToBase58String,
  contract::{Contract, ContractError},
  receipt::{Event, Receipt, Status},
  transaction::{
    Call,
    SignedTransaction,
    Transaction,
    TxHash,
    VerifyError,
  },
  value::{DecodeError, Value},
  wallet::{Wallet, WalletError},
};

/// Seconds since the Unix epoch, as reported by the ledger.
pub type Timestamp = u64;

/// Seconds in one day, used to convert campaign durations entered in days.
pub const SECONDS_PER_DAY: u64 = 86_400;
