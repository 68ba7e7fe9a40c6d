//! Billing models.
//!
//! Contracts, meter readings and the billing documents produced by a
//! billing simulation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A supply contract for one metering point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    /// Contract number.
    pub id: String,
    /// The business partner holding the contract.
    pub partner: String,
    /// Supply address.
    pub address: String,
    /// First day of supply.
    pub start_date: NaiveDate,
    /// The product name, e.g. "Electricity Basic".
    pub product: String,
    /// The installed meter.
    pub device_id: String,
}

/// How a meter reading was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingType {
    /// Read by the utility.
    Reading,
    /// Reported by the customer.
    SelfReading,
    /// Estimated by the system.
    Estimate,
}

/// A meter reading on a given date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeterReading {
    /// The reading date.
    pub date: NaiveDate,
    /// The meter value.
    pub value: Decimal,
    /// How the value was obtained.
    pub reading_type: ReadingType,
}

/// The kind of a billing position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionType {
    /// Energy charged by consumption (flat or tiered).
    Consumption,
    /// Periodic base fee.
    BasePrice,
    /// Installments already paid, credited against the bill.
    Installment,
}

/// A single position on a billing document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingPosition {
    /// The kind of position.
    pub position_type: PositionType,
    /// The tariff this position was priced with, absent for installments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tariff_id: Option<String>,
    /// Human-readable description.
    pub description: String,
    /// Quantity billed (consumption, months or installments).
    pub quantity: Decimal,
    /// Price per quantity unit.
    pub unit_price: Decimal,
    /// The position amount.
    pub amount: Decimal,
}

/// Lifecycle status of a billing document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingStatus {
    /// A preview that has not been invoiced.
    Simulation,
    /// Invoiced to the customer.
    Invoiced,
    /// Reversed after invoicing.
    Cancelled,
}

/// A billing document for one contract and billing period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingDocument {
    /// Document number, e.g. "R001".
    pub id: String,
    /// The billed contract.
    pub contract_id: String,
    /// Date of the first reading.
    pub from_date: NaiveDate,
    /// Date of the last reading.
    pub to_date: NaiveDate,
    /// Readings used, sorted by date.
    pub readings: Vec<MeterReading>,
    /// Last reading value minus first reading value.
    pub consumption: Decimal,
    /// The priced positions.
    pub positions: Vec<BillingPosition>,
    /// Sum of all position amounts; negative means a credit.
    pub total_amount: Decimal,
    /// Lifecycle status.
    pub status: BillingStatus,
}
