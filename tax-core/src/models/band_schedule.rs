use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a band table does not describe a progressive schedule.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BandScheduleError {
    /// The schedule has no bands at all.
    #[error("band schedule is empty")]
    Empty,

    /// A band rate is outside the 0–100 percentage range.
    #[error("band '{label}' has rate {rate}, expected a percentage between 0 and 100")]
    InvalidRate { label: String, rate: Decimal },

    /// A band's capacity is negative.
    #[error("band '{label}' has negative capacity {capacity}")]
    NegativeCapacity { label: String, capacity: Decimal },

    /// A band has a lower rate than the band before it.
    #[error("band '{label}' has rate {rate}, lower than the preceding rate {previous}")]
    DescendingRate {
        label: String,
        rate: Decimal,
        previous: Decimal,
    },

    /// An open-ended band appears before the end of the schedule.
    #[error("band '{0}' is open-ended but is not the last band")]
    OpenBandNotLast(String),
}

/// A band definition: how much income is taxed at `rate` percent.
///
/// `capacity` of `None` marks the open-ended top band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandSpec {
    pub label: String,
    pub rate: Decimal,
    pub capacity: Option<Decimal>,
}

impl BandSpec {
    pub fn bounded(
        label: impl Into<String>,
        rate: Decimal,
        capacity: Decimal,
    ) -> Self {
        Self {
            label: label.into(),
            rate,
            capacity: Some(capacity),
        }
    }

    pub fn open(
        label: impl Into<String>,
        rate: Decimal,
    ) -> Self {
        Self {
            label: label.into(),
            rate,
            capacity: None,
        }
    }
}

/// A validated progressive band table, ordered by ascending rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BandSchedule {
    bands: Vec<BandSpec>,
}

impl BandSchedule {
    /// Validates `bands` and wraps them in a schedule.
    ///
    /// # Errors
    ///
    /// Returns [`BandScheduleError`] if the table is empty, a rate is not a
    /// percentage, a capacity is negative, rates decrease, or an open-ended
    /// band is followed by another band.
    pub fn new(bands: Vec<BandSpec>) -> Result<Self, BandScheduleError> {
        if bands.is_empty() {
            return Err(BandScheduleError::Empty);
        }

        let last = bands.len() - 1;
        let mut previous: Option<Decimal> = None;

        for (i, spec) in bands.iter().enumerate() {
            if spec.rate < Decimal::ZERO || spec.rate > dec!(100) {
                return Err(BandScheduleError::InvalidRate {
                    label: spec.label.clone(),
                    rate: spec.rate,
                });
            }

            if let Some(prev) = previous {
                if spec.rate < prev {
                    return Err(BandScheduleError::DescendingRate {
                        label: spec.label.clone(),
                        rate: spec.rate,
                        previous: prev,
                    });
                }
            }

            match spec.capacity {
                Some(capacity) if capacity < Decimal::ZERO => {
                    return Err(BandScheduleError::NegativeCapacity {
                        label: spec.label.clone(),
                        capacity,
                    });
                }
                None if i != last => {
                    return Err(BandScheduleError::OpenBandNotLast(spec.label.clone()));
                }
                _ => {}
            }

            previous = Some(spec.rate);
        }

        Ok(Self { bands })
    }

    /// The personal income bands under the Nigeria Tax Act 2025.
    pub fn nigeria_tax_act_2025() -> Self {
        Self {
            bands: vec![
                BandSpec::bounded("First ₦800,000", dec!(0), dec!(800000)),
                BandSpec::bounded("Next ₦2,200,000", dec!(15), dec!(2200000)),
                BandSpec::bounded("Next ₦9,000,000", dec!(18), dec!(9000000)),
                BandSpec::bounded("Next ₦13,000,000", dec!(21), dec!(13000000)),
                BandSpec::bounded("Next ₦25,000,000", dec!(23), dec!(25000000)),
                BandSpec::open("Above ₦50,000,000", dec!(25)),
            ],
        }
    }

    pub fn bands(&self) -> &[BandSpec] {
        &self.bands
    }

    /// Sum of all band capacities, or `None` when the top band is open-ended.
    pub fn total_capacity(&self) -> Option<Decimal> {
        self.bands
            .iter()
            .try_fold(Decimal::ZERO, |acc, spec| spec.capacity.map(|c| acc + c))
    }
}

impl Default for BandSchedule {
    fn default() -> Self {
        Self::nigeria_tax_act_2025()
    }
}
