//! # Ruleset Properties
//!
//! End-to-end checks of the public API: the reference values every
//! municipality relies on, purity of the four calculators, and loading
//! rulebooks from disk.

use std::io::Write;

use chrono::{Datelike, NaiveDate};
use mdl_core::{Age, ClassId, PriorLicense};
use mdl_rules::{
    eligibility, expiration_date, fee, validity, RejectionReason, Rulebook, RulebookError,
    VALIDITY_YEARS,
};
use proptest::prelude::*;
use tempfile::NamedTempFile;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn id(s: &str) -> ClassId {
    ClassId::parse(s).unwrap()
}

fn age(years: u32) -> Age {
    Age::from_years(years)
}

fn today() -> NaiveDate {
    date(2026, 10, 19)
}

// ─── Reference values ────────────────────────────────────────────────

#[test]
fn test_reference_validity_values() {
    assert_eq!(validity(age(20), true).years(), 1);
    assert_eq!(validity(age(20), false).years(), 3);
    assert_eq!(validity(age(46), false).years(), 5);
    assert_eq!(validity(age(47), false).years(), 4);
    assert_eq!(validity(age(71), false).years(), 1);
}

#[test]
fn test_reference_fee_values() {
    assert_eq!(fee(&id("B"), 5, false).amount, 48);
    assert_eq!(fee(&id("B"), 5, true).amount, 43);
    assert_eq!(fee(&id("UNKNOWN"), 5, false), fee(&id("A"), 5, false));
}

#[test]
fn test_unrecognized_class_names_price_as_class_a() {
    for name in ["CLASE_B", "b/2", "Clase B"] {
        assert_eq!(fee(&id(name), 5, false), fee(&id("A"), 5, false), "{name}");
        assert_eq!(fee(&id(name), 3, true), fee(&id("A"), 3, true), "{name}");
    }
}

#[test]
fn test_reference_eligibility_values() {
    let catalog = Rulebook::standard().catalog();
    let b = catalog.get(&id("B")).unwrap();
    let c = catalog.get(&id("C")).unwrap();

    assert!(eligibility(age(17), b, &[], today()).is_eligible());
    assert_eq!(
        eligibility(age(16), b, &[], today()).reason(),
        Some(RejectionReason::BelowMinimumAge)
    );
    assert_eq!(
        eligibility(age(70), c, &[], today()).reason(),
        Some(RejectionReason::FirstProfessionalAfterAgeLimit)
    );
}

#[test]
fn test_reference_expiration_value() {
    let expiry = expiration_date(date(1990, 6, 15), 5, today()).unwrap();
    assert_eq!(expiry.year(), today().year() + 5);
    assert_eq!(expiry.month(), 6);
    assert_eq!(expiry.day(), 15);
}

#[test]
fn test_professional_path_with_established_class_b() {
    let catalog = Rulebook::standard().catalog();
    let d = catalog.get(&id("D")).unwrap();
    let prior = [PriorLicense::new(id("B"), date(2012, 2, 3))];
    assert!(eligibility(age(40), d, &prior, today()).is_eligible());
}

// ─── Purity ──────────────────────────────────────────────────────────

fn arb_class() -> impl Strategy<Value = ClassId> {
    prop_oneof![
        Just("A"),
        Just("B"),
        Just("C"),
        Just("D"),
        Just("E"),
        Just("X"),
        Just("A.1"),
    ]
    .prop_map(id)
}

proptest! {
    #[test]
    fn validity_is_deterministic(a in 0u32..130, first in any::<bool>()) {
        prop_assert_eq!(validity(age(a), first), validity(age(a), first));
        prop_assert!(VALIDITY_YEARS.contains(&validity(age(a), first).years()));
    }

    #[test]
    fn fee_is_deterministic(class in arb_class(), years in 0u32..10, renewal in any::<bool>()) {
        let first = fee(&class, years, renewal);
        prop_assert_eq!(first, fee(&class, years, renewal));
        prop_assert!(first.amount >= 1);
    }

    #[test]
    fn renewal_never_costs_more(class in arb_class(), years in 0u32..10) {
        prop_assert!(fee(&class, years, true).amount <= fee(&class, years, false).amount);
    }

    #[test]
    fn eligibility_is_deterministic(a in 0u32..100, class in prop_oneof![Just("A"), Just("B"), Just("C"), Just("E")]) {
        let requested = Rulebook::standard().catalog().get(&id(class)).unwrap().clone();
        let prior = [PriorLicense::new(id("B"), date(2020, 1, 1))];
        prop_assert_eq!(
            eligibility(age(a), &requested, &prior, today()),
            eligibility(age(a), &requested, &prior, today())
        );
    }

    #[test]
    fn expiration_is_deterministic_and_lands_on_birthday(
        birth in (1930i32..2026, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| date(y, m, d)),
        years in prop::sample::select(VALIDITY_YEARS.to_vec()),
    ) {
        let a = expiration_date(birth, years, today()).unwrap();
        prop_assert_eq!(a, expiration_date(birth, years, today()).unwrap());
        prop_assert_eq!((a.month(), a.day()), (birth.month(), birth.day()));
        prop_assert_eq!(a.year(), today().year() + years as i32);
    }
}

// ─── Rulebook files ──────────────────────────────────────────────────

/// Write `content` to a named temp file with the given suffix. The file is
/// removed when the handle drops.
fn write_rulebook(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("mdl-rulebook-")
        .suffix(suffix)
        .tempfile()
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_yaml_rulebook() {
    let file = write_rulebook(
        ".yaml",
        r#"
administrative_surcharge: 12
renewal_discount_percent: 15
duplicate_fee: 6
classes:
  - id: A
    min_age: 18
    fees: { 1: 20, 5: 60 }
  - id: C
    min_age: 21
    professional: true
    fees: { 1: 40, 3: 70 }
"#,
    );

    let rb = Rulebook::load(file.path()).unwrap();

    assert_eq!(rb.catalog().len(), 2);
    assert_eq!(rb.fee(&id("C"), 3, false).amount, 82);
    // 72 × 0.85 = 61.2 → 61
    assert_eq!(rb.fee(&id("A"), 5, true).amount, 61);
    assert_eq!(rb.catalog().professional_ids(), vec!["C"]);
}

#[test]
fn test_load_json_rulebook_roundtrips_standard() {
    let json = serde_json::to_string_pretty(&Rulebook::standard().to_file()).unwrap();
    let file = write_rulebook(".json", &json);

    let rb = Rulebook::load(file.path()).unwrap();
    assert_eq!(&rb, Rulebook::standard());
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Rulebook::load(&dir.path().join("rules.yaml")).unwrap_err();
    assert!(matches!(err, RulebookError::FileNotFound { .. }));
}

#[test]
fn test_load_unsupported_extension() {
    let file = write_rulebook(".toml", "x = 1");
    let err = Rulebook::load(file.path()).unwrap_err();
    assert!(matches!(err, RulebookError::UnsupportedFormat { .. }));
}

#[test]
fn test_load_malformed_yaml_reports_path() {
    let file = write_rulebook(".yml", "classes: [unterminated");
    let err = Rulebook::load(file.path()).unwrap_err();
    assert!(matches!(err, RulebookError::YamlParse { .. }));
    assert!(err.to_string().contains("mdl-rulebook-"));
}
