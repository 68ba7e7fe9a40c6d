//! Billing simulation over meter readings.
//!
//! A billing run takes a contract, its meter readings and the tariffs the
//! contract is priced with, and produces a [`BillingDocument`]:
//!
//! 1. Readings are captured in date order by [`MeterReadingLog`]
//! 2. The consumption between the first and last reading is priced
//! 3. Base prices are charged per billed month
//! 4. Installments already paid are credited
//!
//! [`BillingLedger`] numbers the documents and tracks their lifecycle.
//!
//! [`BillingDocument`]: crate::models::BillingDocument

mod ledger;
mod readings;
mod simulation;

pub use ledger::BillingLedger;
pub use readings::MeterReadingLog;
pub use simulation::{MIN_READINGS_FOR_BILLING, simulate_billing};
