//! Substance duration lookup table.
//!
//! # Responsibility
//! - Map a substance name to its estimated program length in days.
//!
//! # Invariants
//! - Lookup never fails; unknown substances resolve to `DEFAULT_SUBSTANCE_DAYS`.
//! - Names are compared trimmed and case-insensitively.

use std::collections::HashMap;

/// Program days assumed for substances missing from the table.
pub const DEFAULT_SUBSTANCE_DAYS: u32 = 30;

const DEFAULT_DURATIONS: &[(&str, u32)] = &[
    ("Alcohol", 30),
    ("Dagga", 20),
    ("Opioids", 45),
    ("Cocaine", 40),
    ("Benzene", 25),
    ("Heroin", 50),
    ("Ecstasy", 35),
    ("Inhalants", 20),
    ("Mandrax", 30),
    ("Hookah Pipes", 15),
    ("CAT", 40),
];

/// Substance name to day-count mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstanceDurationTable {
    days_by_name: HashMap<String, u32>,
    default_days: u32,
}

impl SubstanceDurationTable {
    /// Builds a table from `(name, days)` pairs and a fallback duration.
    pub fn new<I, N>(entries: I, default_days: u32) -> Self
    where
        I: IntoIterator<Item = (N, u32)>,
        N: AsRef<str>,
    {
        let days_by_name = entries
            .into_iter()
            .map(|(name, days)| (normalize_substance_name(name.as_ref()), days))
            .collect();
        Self {
            days_by_name,
            default_days,
        }
    }

    /// Fallback duration for unknown substances.
    pub fn default_days(&self) -> u32 {
        self.default_days
    }

    /// Returns the duration for `name`, or the fallback when unknown.
    pub fn days_for(&self, name: &str) -> u32 {
        self.days_by_name
            .get(&normalize_substance_name(name))
            .copied()
            .unwrap_or(self.default_days)
    }

    /// Whether `name` has an explicit entry.
    pub fn contains(&self, name: &str) -> bool {
        self.days_by_name
            .contains_key(&normalize_substance_name(name))
    }
}

impl Default for SubstanceDurationTable {
    fn default() -> Self {
        Self::new(DEFAULT_DURATIONS.iter().copied(), DEFAULT_SUBSTANCE_DAYS)
    }
}

fn normalize_substance_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::{SubstanceDurationTable, DEFAULT_SUBSTANCE_DAYS};

    #[test]
    fn default_table_matches_program_durations() {
        let table = SubstanceDurationTable::default();
        assert_eq!(table.days_for("Heroin"), 50);
        assert_eq!(table.days_for("Hookah Pipes"), 15);
        assert_eq!(table.days_for("CAT"), 40);
    }

    #[test]
    fn lookup_is_trimmed_and_case_insensitive() {
        let table = SubstanceDurationTable::default();
        assert_eq!(table.days_for("  dagga "), 20);
        assert!(table.contains("hookah pipes"));
    }

    #[test]
    fn unknown_substance_uses_default() {
        let table = SubstanceDurationTable::default();
        assert_eq!(table.days_for("Caffeine"), DEFAULT_SUBSTANCE_DAYS);
        assert!(!table.contains("Caffeine"));
    }
}
