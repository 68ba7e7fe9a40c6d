//! Request types for the Tariff Engine API.
//!
//! This module defines the JSON request structures for the `/calculate` and
//! `/billing/simulate` endpoints and the query of `/tariffs`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::BillingConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{Contract, MeterReading, ReadingType};

/// Largest accepted consumption quantity or meter value.
pub const MAX_QUANTITY: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0); // 1_000_000_000_000

/// Largest accepted installment amount.
pub const MAX_INSTALLMENT_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Largest accepted number of billed months or paid installments.
pub const MAX_BILLING_MONTHS: u32 = 1200;

fn check_decimal(field: &str, value: Decimal, max: Decimal) -> EngineResult<()> {
    let message = if value < Decimal::ZERO {
        format!("must not be negative, got {}", value)
    } else if value > max {
        format!("must not exceed {}, got {}", max, value)
    } else {
        return Ok(());
    };
    Err(EngineError::InvalidRequest {
        field: field.to_string(),
        message,
    })
}

fn check_count(field: &str, value: u32) -> EngineResult<()> {
    if value > MAX_BILLING_MONTHS {
        return Err(EngineError::InvalidRequest {
            field: field.to_string(),
            message: format!("must not exceed {}, got {}", MAX_BILLING_MONTHS, value),
        });
    }
    Ok(())
}

/// Request body for the `/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceCalculationRequest {
    /// The quantity to price, e.g. kWh.
    pub consumption_quantity: Decimal,
    /// Tariff ids in the order their line items should appear.
    pub selected_tariffs: Vec<String>,
    /// If set, tariffs not valid on this date are skipped.
    #[serde(default)]
    pub active_on: Option<NaiveDate>,
}

impl PriceCalculationRequest {
    /// Checks that the quantity lies in `[0, MAX_QUANTITY]`.
    pub fn validate(&self) -> EngineResult<()> {
        check_decimal("consumption_quantity", self.consumption_quantity, MAX_QUANTITY)
    }
}

/// Query parameters of the `/tariffs` endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TariffQuery {
    /// If set, only tariffs valid on this date are listed.
    #[serde(default)]
    pub active_on: Option<NaiveDate>,
}

/// Request body for the `/billing/simulate` endpoint.
///
/// The optional billing fields override the configured billing defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingSimulationRequest {
    /// The contract to bill.
    pub contract: ContractRequest,
    /// Meter readings of the billing period, in any order.
    pub readings: Vec<MeterReadingRequest>,
    /// Tariff ids the contract is priced with.
    pub selected_tariffs: Vec<String>,
    /// Number of billed months.
    #[serde(default)]
    pub billing_months: Option<u32>,
    /// Amount of one installment.
    #[serde(default)]
    pub installment_amount: Option<Decimal>,
    /// Number of installments paid.
    #[serde(default)]
    pub installments_paid: Option<u32>,
}

impl BillingSimulationRequest {
    /// Checks that no meter value exceeds `MAX_QUANTITY`.
    ///
    /// Negative values are left to the reading log, which reports them as
    /// invalid readings.
    pub fn validate_readings(&self) -> EngineResult<()> {
        match self.readings.iter().find(|r| r.value > MAX_QUANTITY) {
            Some(reading) => Err(EngineError::InvalidRequest {
                field: "readings".to_string(),
                message: format!(
                    "value {} on {} must not exceed {}",
                    reading.value, reading.date, MAX_QUANTITY
                ),
            }),
            None => Ok(()),
        }
    }

    /// Applies the request overrides to the configured defaults.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` if the months or installment count exceed
    /// `MAX_BILLING_MONTHS`, or the installment amount is outside
    /// `[0, MAX_INSTALLMENT_AMOUNT]`.
    pub fn billing_config(&self, defaults: &BillingConfig) -> EngineResult<BillingConfig> {
        let config = BillingConfig {
            billing_months: self.billing_months.unwrap_or(defaults.billing_months),
            installment_amount: self.installment_amount.unwrap_or(defaults.installment_amount),
            installments_paid: self.installments_paid.unwrap_or(defaults.installments_paid),
        };
        check_count("billing_months", config.billing_months)?;
        check_count("installments_paid", config.installments_paid)?;
        check_decimal(
            "installment_amount",
            config.installment_amount,
            MAX_INSTALLMENT_AMOUNT,
        )?;
        Ok(config)
    }
}

/// Contract information in a billing request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractRequest {
    /// Contract number.
    pub id: String,
    /// The business partner holding the contract.
    pub partner: String,
    /// Supply address.
    #[serde(default)]
    pub address: String,
    /// First day of supply.
    pub start_date: NaiveDate,
    /// The product name.
    #[serde(default)]
    pub product: String,
    /// The installed meter.
    pub device_id: String,
}

/// A meter reading in a billing request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeterReadingRequest {
    /// The reading date.
    pub date: NaiveDate,
    /// The meter value.
    pub value: Decimal,
    /// How the value was obtained; a regular reading if omitted.
    #[serde(default = "default_reading_type")]
    pub reading_type: ReadingType,
}

fn default_reading_type() -> ReadingType {
    ReadingType::Reading
}

impl From<ContractRequest> for Contract {
    fn from(req: ContractRequest) -> Self {
        Contract {
            id: req.id,
            partner: req.partner,
            address: req.address,
            start_date: req.start_date,
            product: req.product,
            device_id: req.device_id,
        }
    }
}

impl From<MeterReadingRequest> for MeterReading {
    fn from(req: MeterReadingRequest) -> Self {
        MeterReading {
            date: req.date,
            value: req.value,
            reading_type: req.reading_type,
        }
    }
}
