use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use soberpath_core::{estimate_rehab, EstimateError, ProgramLength, SubstanceDurationTable};

const KNOWN: &[&str] = &[
    "Alcohol",
    "Dagga",
    "Opioids",
    "Cocaine",
    "Benzene",
    "Heroin",
    "Ecstasy",
    "Inhalants",
    "Mandrax",
    "Hookah Pipes",
    "CAT",
];

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn alcohol_from_first_of_july() {
    let estimate = estimate_rehab(
        &SubstanceDurationTable::default(),
        &["Alcohol"],
        date(2025, 7, 1),
    )
    .unwrap();
    assert_eq!(estimate.duration_days, 30);
    assert_eq!(estimate.end_date, date(2025, 7, 31));
    assert_eq!(estimate.program.label(), "short-term");
}

#[test]
fn heroin_and_dagga_take_the_longer_duration() {
    let estimate = estimate_rehab(
        &SubstanceDurationTable::default(),
        &["Heroin".to_string(), "Dagga".to_string()],
        date(2025, 1, 1),
    )
    .unwrap();
    assert_eq!(estimate.duration_days, 50);
    assert_eq!(estimate.end_date, date(2025, 2, 20));
    assert_eq!(estimate.program.label(), "long-term");
}

#[test]
fn unknown_and_differently_cased_substances() {
    let table = SubstanceDurationTable::default();
    assert_eq!(table.days_for("Kratom"), 30);
    assert_eq!(table.days_for("  hookah pipes "), 15);
    assert!(!table.contains("Kratom"));

    let estimate = estimate_rehab(&table, &["kratom", "dagga"], date(2024, 2, 20)).unwrap();
    assert_eq!(estimate.duration_days, 30);
    assert_eq!(estimate.end_date, date(2024, 3, 21));
}

#[test]
fn custom_table_reaches_extended_care() {
    let table = SubstanceDurationTable::new([("Fentanyl", 180)], 30);
    let estimate = estimate_rehab(&table, &["Fentanyl"], date(2025, 1, 1)).unwrap();
    assert_eq!(estimate.program, ProgramLength::ExtendedCare);
    assert_eq!(estimate.end_date, date(2025, 6, 30));
    assert_eq!(
        estimate.program.band(),
        "Extended care (6 months or longer)"
    );
}

#[test]
fn empty_substance_set_is_an_error() {
    let none: Vec<String> = Vec::new();
    let err = estimate_rehab(&SubstanceDurationTable::default(), &none, date(2025, 1, 1))
        .unwrap_err();
    assert_eq!(err, EstimateError::NoSubstances);
}

fn substance_set() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop_oneof![
            prop::sample::select(KNOWN).prop_map(str::to_string),
            "[a-z]{3,12}",
        ],
        1..6,
    )
}

fn start_date() -> impl Strategy<Value = NaiveDate> {
    (0u64..40_000).prop_map(|offset| date(1990, 1, 1) + Days::new(offset))
}

proptest! {
    #[test]
    fn duration_is_the_maximum_of_substance_days(
        substances in substance_set(),
        start in start_date(),
    ) {
        let table = SubstanceDurationTable::default();
        let estimate = estimate_rehab(&table, &substances, start).unwrap();
        let expected = substances.iter().map(|name| table.days_for(name)).max().unwrap();
        prop_assert_eq!(estimate.duration_days, expected);
        prop_assert_eq!(estimate.end_date, start + Days::new(u64::from(expected)));
        prop_assert_eq!(estimate.program, ProgramLength::for_days(expected));
    }

    #[test]
    fn adding_a_substance_never_shortens_the_program(
        substances in substance_set(),
        extra in prop::sample::select(KNOWN),
        start in start_date(),
    ) {
        let table = SubstanceDurationTable::default();
        let before = estimate_rehab(&table, &substances, start).unwrap();
        let mut more = substances.clone();
        more.push(extra.to_string());
        let after = estimate_rehab(&table, &more, start).unwrap();
        prop_assert!(after.duration_days >= before.duration_days);
        prop_assert!(after.end_date >= before.end_date);
    }

    #[test]
    fn substance_order_does_not_matter(
        substances in substance_set(),
        start in start_date(),
    ) {
        let table = SubstanceDurationTable::default();
        let forward = estimate_rehab(&table, &substances, start).unwrap();
        let mut reversed = substances.clone();
        reversed.reverse();
        let backward = estimate_rehab(&table, &reversed, start).unwrap();
        prop_assert_eq!(forward, backward);
    }
}
