//! Rehabilitation duration estimator.
//!
//! # Responsibility
//! - Map a set of substances and a start date to an estimated end date and
//!   program-length category.
//!
//! # Invariants
//! - The worst-case substance governs: duration is the maximum, not a sum.
//! - End date is start date plus whole calendar days.
//! - An empty substance set is an input error, never a silent default.

use crate::model::substance::SubstanceDurationTable;
use chrono::{Days, NaiveDate};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Upper bound (inclusive) of the short-term band.
pub const SHORT_TERM_MAX_DAYS: u32 = 30;
/// Upper bound (inclusive) of the long-term band.
pub const LONG_TERM_MAX_DAYS: u32 = 90;

/// Program-length category derived from the estimated duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgramLength {
    ShortTerm,
    LongTerm,
    ExtendedCare,
}

impl ProgramLength {
    /// Category for a duration in days. Band upper bounds are inclusive.
    pub fn for_days(days: u32) -> Self {
        if days <= SHORT_TERM_MAX_DAYS {
            Self::ShortTerm
        } else if days <= LONG_TERM_MAX_DAYS {
            Self::LongTerm
        } else {
            Self::ExtendedCare
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::ShortTerm => "short-term",
            Self::LongTerm => "long-term",
            Self::ExtendedCare => "extended care",
        }
    }

    /// Display band shown next to the estimate.
    pub fn band(self) -> &'static str {
        match self {
            Self::ShortTerm => "Short-term rehab (28–30 days)",
            Self::LongTerm => "Long-term rehab (60–90 days)",
            Self::ExtendedCare => "Extended care (6 months or longer)",
        }
    }

    /// Guidance note for reviewers.
    pub fn note(self) -> &'static str {
        match self {
            Self::ShortTerm => {
                "Suitable for individuals with milder substance use or early-stage addiction."
            }
            Self::LongTerm => "For severe addictions needing intensive treatment and support.",
            Self::ExtendedCare => {
                "For individuals with complex needs or ongoing therapy requirements."
            }
        }
    }
}

impl Display for ProgramLength {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Estimator output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RehabEstimate {
    pub duration_days: u32,
    pub end_date: NaiveDate,
    pub program: ProgramLength,
    /// Number of substances considered.
    pub substance_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EstimateError {
    NoSubstances,
    DateOutOfRange { start: NaiveDate, days: u32 },
}

impl Display for EstimateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoSubstances => f.write_str("at least one substance is required for an estimate"),
            Self::DateOutOfRange { start, days } => {
                write!(f, "end date out of range: {start} + {days} days")
            }
        }
    }
}

impl Error for EstimateError {}

/// Estimates the program end date for `substances` starting at `start`.
///
/// # Errors
/// - `NoSubstances` when `substances` is empty.
/// - `DateOutOfRange` when the end date overflows the calendar.
pub fn estimate_rehab<S: AsRef<str>>(
    table: &SubstanceDurationTable,
    substances: &[S],
    start: NaiveDate,
) -> Result<RehabEstimate, EstimateError> {
    let duration_days = substances
        .iter()
        .map(|name| table.days_for(name.as_ref()))
        .max()
        .ok_or(EstimateError::NoSubstances)?;

    let end_date = start
        .checked_add_days(Days::new(u64::from(duration_days)))
        .ok_or(EstimateError::DateOutOfRange {
            start,
            days: duration_days,
        })?;

    Ok(RehabEstimate {
        duration_days,
        end_date,
        program: ProgramLength::for_days(duration_days),
        substance_count: substances.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::{estimate_rehab, EstimateError, ProgramLength};
    use crate::model::substance::SubstanceDurationTable;
    use chrono::NaiveDate;

    fn date(text: &str) -> NaiveDate {
        NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn single_substance_estimate() {
        let table = SubstanceDurationTable::default();
        let estimate = estimate_rehab(&table, &["Alcohol"], date("2025-07-01")).unwrap();
        assert_eq!(estimate.duration_days, 30);
        assert_eq!(estimate.end_date, date("2025-07-31"));
        assert_eq!(estimate.program.label(), "short-term");
    }

    #[test]
    fn worst_substance_governs() {
        let table = SubstanceDurationTable::default();
        let estimate = estimate_rehab(&table, &["Heroin", "Dagga"], date("2025-01-01")).unwrap();
        assert_eq!(estimate.duration_days, 50);
        assert_eq!(estimate.end_date, date("2025-02-20"));
        assert_eq!(estimate.program, ProgramLength::LongTerm);
        assert_eq!(estimate.substance_count, 2);
    }

    #[test]
    fn empty_substances_are_rejected() {
        let table = SubstanceDurationTable::default();
        let none: [&str; 0] = [];
        let err = estimate_rehab(&table, &none, date("2025-01-01")).unwrap_err();
        assert_eq!(err, EstimateError::NoSubstances);
    }

    #[test]
    fn overflowing_end_date_is_rejected() {
        let table = SubstanceDurationTable::default();
        let err = estimate_rehab(&table, &["Heroin"], NaiveDate::MAX).unwrap_err();
        assert!(matches!(err, EstimateError::DateOutOfRange { days: 50, .. }));
    }

    #[test]
    fn band_boundaries_are_inclusive() {
        assert_eq!(ProgramLength::for_days(30), ProgramLength::ShortTerm);
        assert_eq!(ProgramLength::for_days(31), ProgramLength::LongTerm);
        assert_eq!(ProgramLength::for_days(90), ProgramLength::LongTerm);
        assert_eq!(ProgramLength::for_days(91), ProgramLength::ExtendedCare);
        assert_eq!(ProgramLength::ExtendedCare.to_string(), "extended care");
    }
}
