//! Client side of the crowdfunding ledger.
//!
//! [`LedgerClient`] talks to the wallet and the contract,
//! [`CampaignRepository`] keeps a consistent snapshot of all campaigns,
//! [`Dispatcher`] drives user actions to confirmation and [`App`] ties
//! them together with the forms and the rendered [`Page`].

mod app;
mod client;
mod dispatcher;
mod error;
mod form;
mod record;
mod repository;
mod view;

pub use {
  app::App,
  client::{LedgerClient, NewCampaign, PendingTransaction},
  dispatcher::{Action, ActionState, Confirmed, Dispatcher},
  error::{Error, FetchError},
  form::{
    parse_contribution,
    CreateCampaignForm,
    FormError,
    MAX_DURATION_DAYS,
    MIN_CONTRIBUTION,
    MIN_FUNDING_GOAL,
  },
  record::{CampaignRecord, RawCampaign},
  repository::CampaignRepository,
  view::{
    goal_reached,
    is_contributable,
    is_withdrawable,
    progress_percent,
    CampaignCard,
    Page,
    CURRENCY,
  },
};
