//! Meter reading capture.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::MeterReading;

/// The meter readings of one device, kept in date order.
///
/// Values never decrease in date order, so the derived consumption is never
/// negative.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeterReadingLog {
    readings: Vec<MeterReading>,
}

impl MeterReadingLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records readings one after another, stopping at the first rejection.
    pub fn from_readings<I>(readings: I) -> EngineResult<Self>
    where
        I: IntoIterator<Item = MeterReading>,
    {
        let mut log = Self::new();
        for reading in readings {
            log.record(reading)?;
        }
        Ok(log)
    }

    /// Records a reading.
    ///
    /// # Errors
    ///
    /// Returns `InvalidReading` if the value is negative, lower than an
    /// earlier reading, or higher than a later one.
    pub fn record(&mut self, reading: MeterReading) -> EngineResult<()> {
        if reading.value < Decimal::ZERO {
            return Err(EngineError::InvalidReading {
                date: reading.date,
                message: format!("value {} must not be negative", reading.value),
            });
        }
        // Insert after any reading on the same date to keep capture order.
        let index = self.readings.partition_point(|r| r.date <= reading.date);

        if let Some(previous) = index.checked_sub(1).map(|i| &self.readings[i]) {
            if reading.value < previous.value {
                return Err(EngineError::InvalidReading {
                    date: reading.date,
                    message: format!(
                        "value {} is lower than the previous reading {} on {}",
                        reading.value, previous.value, previous.date
                    ),
                });
            }
        }
        if let Some(next) = self.readings.get(index) {
            if reading.value > next.value {
                return Err(EngineError::InvalidReading {
                    date: reading.date,
                    message: format!(
                        "value {} is higher than the later reading {} on {}",
                        reading.value, next.value, next.date
                    ),
                });
            }
        }

        self.readings.insert(index, reading);
        Ok(())
    }

    /// Returns the reading with the latest date.
    pub fn latest(&self) -> Option<&MeterReading> {
        self.readings.last()
    }

    /// Returns the readings in date order.
    pub fn readings(&self) -> &[MeterReading] {
        &self.readings
    }

    /// Returns the number of readings.
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// Returns true if no reading was recorded.
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Returns last value minus first value, `None` with fewer than two readings.
    pub fn consumption(&self) -> Option<Decimal> {
        match (self.readings.first(), self.readings.last()) {
            (Some(first), Some(last)) if self.readings.len() >= 2 => Some(last.value - first.value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReadingType;
    use chrono::NaiveDate;

    fn reading(y: i32, m: u32, d: u32, value: i64) -> MeterReading {
        MeterReading {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            value: Decimal::from(value),
            reading_type: ReadingType::Reading,
        }
    }

    #[test]
    fn test_record_keeps_date_order() {
        let mut log = MeterReadingLog::new();
        log.record(reading(2025, 1, 1, 45280)).unwrap();
        log.record(reading(2025, 12, 31, 49280)).unwrap();

        assert_eq!(log.len(), 2);
        assert_eq!(log.consumption(), Some(Decimal::from(4000)));
        assert_eq!(log.latest().unwrap().value, Decimal::from(49280));
    }

    #[test]
    fn test_lower_value_is_rejected() {
        let mut log = MeterReadingLog::new();
        log.record(reading(2025, 1, 1, 45280)).unwrap();

        match log.record(reading(2025, 6, 30, 45000)) {
            Err(EngineError::InvalidReading { date, message }) => {
                assert_eq!(date, NaiveDate::from_ymd_opt(2025, 6, 30).unwrap());
                assert!(message.contains("lower than the previous reading"));
            }
            other => panic!("Expected InvalidReading, got {:?}", other),
        }
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_backdated_reading_must_fit_between_neighbours() {
        let mut log = MeterReadingLog::new();
        log.record(reading(2025, 1, 1, 45280)).unwrap();
        log.record(reading(2025, 12, 31, 49280)).unwrap();

        let err = log.record(reading(2025, 6, 30, 50000)).unwrap_err();
        assert!(err.to_string().contains("higher than the later reading"));

        log.record(reading(2025, 6, 30, 47000)).unwrap();
        let values: Vec<Decimal> = log.readings().iter().map(|r| r.value).collect();
        assert_eq!(
            values,
            vec![Decimal::from(45280), Decimal::from(47000), Decimal::from(49280)]
        );
    }

    #[test]
    fn test_equal_value_is_accepted() {
        let mut log = MeterReadingLog::new();
        log.record(reading(2025, 1, 1, 45280)).unwrap();
        log.record(reading(2025, 2, 1, 45280)).unwrap();

        assert_eq!(log.consumption(), Some(Decimal::ZERO));
    }

    #[test]
    fn test_negative_value_is_rejected() {
        let mut log = MeterReadingLog::new();
        assert!(log.record(reading(2025, 1, 1, -1)).is_err());
    }

    #[test]
    fn test_single_reading_has_no_consumption() {
        let log = MeterReadingLog::from_readings(vec![reading(2025, 1, 1, 45280)]).unwrap();
        assert_eq!(log.consumption(), None);
    }

    #[test]
    fn test_from_readings_stops_at_rejection() {
        let result = MeterReadingLog::from_readings(vec![
            reading(2025, 1, 1, 45280),
            reading(2025, 3, 1, 46000),
            reading(2025, 4, 1, 45900),
        ]);

        assert!(matches!(result, Err(EngineError::InvalidReading { .. })));
    }
}
