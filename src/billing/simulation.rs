//! Billing simulation.
//!
//! Turns a contract's meter readings and tariffs into a billing document:
//! consumption is priced through the calculator, base prices are charged per
//! billed month, and installments already paid are credited.

use rust_decimal::Decimal;

use crate::calculation::calculate_price;
use crate::config::BillingConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    BillingDocument, BillingPosition, BillingStatus, Contract, PositionType, TariffDefinition,
    TariffKind,
};

use super::MeterReadingLog;

/// The minimum number of readings needed to derive a consumption.
pub const MIN_READINGS_FOR_BILLING: usize = 2;

/// Decimal places of the average unit price shown for tiered positions.
const AVERAGE_PRICE_SCALE: u32 = 4;

/// Simulates a billing run for one contract.
///
/// The consumption is [`MeterReadingLog::consumption`]. Every tariff is
/// priced through [`calculate_price`]:
/// - consumption tariffs bill the consumption at their rate
/// - tiered tariffs bill the consumption with the band walk; the unit price
///   shown is the average rate
/// - base prices are multiplied by `config.billing_months`
///
/// An installment credit of `installments_paid × -installment_amount` is
/// added when installments were paid. The document has status
/// [`BillingStatus::Simulation`].
///
/// # Errors
///
/// - `InsufficientReadings` with fewer than two readings
/// - `AmountOverflow` if a position or the total leaves the decimal range
///
/// # Examples
///
/// ```
/// use tariff_engine::billing::{MeterReadingLog, simulate_billing};
/// use tariff_engine::config::BillingConfig;
/// use tariff_engine::models::{Contract, MeterReading, RateStep, ReadingType, TariffDefinition, TariffKind};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let date = |m, d| NaiveDate::from_ymd_opt(2025, m, d).unwrap();
/// let contract = Contract {
///     id: "V001".to_string(),
///     partner: "Max Mustermann".to_string(),
///     address: "Main Street 1, 12345 Town".to_string(),
///     start_date: date(1, 1),
///     product: "Electricity Basic".to_string(),
///     device_id: "Z001".to_string(),
/// };
/// let readings = MeterReadingLog::from_readings(vec![
///     MeterReading { date: date(1, 1), value: Decimal::from(45280), reading_type: ReadingType::Reading },
///     MeterReading { date: date(12, 31), value: Decimal::from(49280), reading_type: ReadingType::Reading },
/// ]).unwrap();
/// let energy = TariffDefinition {
///     id: "T001".to_string(),
///     name: "Energy price".to_string(),
///     kind: TariffKind::Consumption,
///     valid_from: date(1, 1),
///     valid_to: date(12, 31),
///     rate_steps: vec![RateStep::flat(Decimal::from_str("0.35").unwrap(), "€/kWh")],
/// };
/// let config = BillingConfig::default();
///
/// let document = simulate_billing("R001", &contract, &readings, [&energy], &config).unwrap();
/// assert_eq!(document.consumption, Decimal::from(4000));
/// assert_eq!(document.total_amount, Decimal::from_str("1400.00").unwrap());
/// ```
pub fn simulate_billing<'a, I>(
    document_id: impl Into<String>,
    contract: &Contract,
    readings: &MeterReadingLog,
    tariffs: I,
    config: &BillingConfig,
) -> EngineResult<BillingDocument>
where
    I: IntoIterator<Item = &'a TariffDefinition>,
{
    let (Some(consumption), [first, .., last]) = (readings.consumption(), readings.readings())
    else {
        return Err(EngineError::InsufficientReadings {
            required: MIN_READINGS_FOR_BILLING,
            found: readings.len(),
        });
    };

    let tariffs: Vec<&TariffDefinition> = tariffs.into_iter().collect();
    let calculation = calculate_price(consumption, tariffs.iter().copied());
    let months = Decimal::from(config.billing_months);

    let mut positions: Vec<BillingPosition> = tariffs
        .iter()
        .zip(calculation.line_items)
        .map(|(tariff, line)| -> EngineResult<BillingPosition> {
            let position = match tariff.kind {
                TariffKind::Consumption => BillingPosition {
                    position_type: PositionType::Consumption,
                    tariff_id: Some(tariff.id.clone()),
                    description: tariff.name.clone(),
                    quantity: consumption,
                    unit_price: tariff.primary_step().map_or(Decimal::ZERO, |s| s.rate),
                    amount: line.amount,
                },
                TariffKind::Tiered => {
                    let unit_price = if consumption > Decimal::ZERO {
                        (line.amount / consumption).round_dp(AVERAGE_PRICE_SCALE)
                    } else {
                        Decimal::ZERO
                    };
                    let description = if line.description.is_empty() {
                        tariff.name.clone()
                    } else {
                        format!("{}\n{}", tariff.name, line.description)
                    };
                    BillingPosition {
                        position_type: PositionType::Consumption,
                        tariff_id: Some(tariff.id.clone()),
                        description,
                        quantity: consumption,
                        unit_price,
                        amount: line.amount,
                    }
                }
                TariffKind::BasePrice => BillingPosition {
                    position_type: PositionType::BasePrice,
                    tariff_id: Some(tariff.id.clone()),
                    description: tariff.name.clone(),
                    quantity: months,
                    unit_price: line.amount,
                    amount: line
                        .amount
                        .checked_mul(months)
                        .ok_or_else(|| overflow(format!("charging {} per month", tariff.id)))?,
                },
            };
            Ok(position)
        })
        .collect::<EngineResult<_>>()?;

    if config.installments_paid > 0 {
        let count = Decimal::from(config.installments_paid);
        let amount = (-config.installment_amount)
            .checked_mul(count)
            .ok_or_else(|| overflow("crediting installments".to_string()))?;
        positions.push(BillingPosition {
            position_type: PositionType::Installment,
            tariff_id: None,
            description: "Installments paid".to_string(),
            quantity: count,
            unit_price: -config.installment_amount,
            amount,
        });
    }

    let total_amount = positions
        .iter()
        .try_fold(Decimal::ZERO, |total, p| total.checked_add(p.amount))
        .ok_or_else(|| overflow("totalling positions".to_string()))?;

    Ok(BillingDocument {
        id: document_id.into(),
        contract_id: contract.id.clone(),
        from_date: first.date,
        to_date: last.date,
        readings: readings.readings().to_vec(),
        consumption,
        positions,
        total_amount,
        status: BillingStatus::Simulation,
    })
}

fn overflow(context: String) -> EngineError {
    EngineError::AmountOverflow { context }
}
