//! # Eligibility Checker
//!
//! Decides whether a holder may be granted a license class. Rules run in a
//! fixed order and the first failure is reported:
//!
//! 1. The holder meets the class's minimum age.
//! 2. Professional classes: nobody over 65 gets a first professional license.
//! 3. Professional classes: the holder has held a Class B license.
//! 4. Professional classes: that Class B license is at least one year old.
//!
//! A rejection is an ordinary [`Eligibility`] value, not an error.

use chrono::{Months, NaiveDate};
use mdl_core::{Age, PriorLicense};
use serde::{Deserialize, Serialize};

use crate::catalog::LicenseClass;

/// Class a professional license requires as a prerequisite.
pub const PREREQUISITE_CLASS: &str = "B";

/// Months the prerequisite class must have been held.
pub const PREREQUISITE_HOLDING_MONTHS: u32 = 12;

/// Oldest age at which a first professional license may be granted.
pub const FIRST_PROFESSIONAL_AGE_LIMIT: u32 = 65;

/// Why a holder was found ineligible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// Younger than the class minimum.
    BelowMinimumAge,
    /// Over the age limit with no professional license on record.
    FirstProfessionalAfterAgeLimit,
    /// No Class B license on record.
    MissingPrerequisiteClass,
    /// Class B license issued less than a year ago.
    PrerequisiteHeldTooBriefly,
}

impl RejectionReason {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::BelowMinimumAge => "below_minimum_age",
            Self::FirstProfessionalAfterAgeLimit => "first_professional_after_age_limit",
            Self::MissingPrerequisiteClass => "missing_prerequisite_class",
            Self::PrerequisiteHeldTooBriefly => "prerequisite_held_too_briefly",
        }
    }

    /// Human-readable explanation.
    pub fn message(&self) -> &'static str {
        match self {
            Self::BelowMinimumAge => "below minimum age for class",
            Self::FirstProfessionalAfterAgeLimit => "no first-time professional license after 65",
            Self::MissingPrerequisiteClass => "missing prerequisite Class B license",
            Self::PrerequisiteHeldTooBriefly => "Class B license held less than one year",
        }
    }
}

impl std::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Outcome of an eligibility check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Eligibility {
    /// Every rule passed.
    Eligible,
    /// The first rule that failed.
    Rejected {
        /// Failing rule.
        reason: RejectionReason,
    },
}

impl Eligibility {
    /// Whether the holder qualifies.
    pub fn is_eligible(&self) -> bool {
        matches!(self, Self::Eligible)
    }

    /// Whether the holder was turned down.
    pub fn is_rejected(&self) -> bool {
        !self.is_eligible()
    }

    /// The rejection reason, if any.
    pub fn reason(&self) -> Option<RejectionReason> {
        match self {
            Self::Eligible => None,
            Self::Rejected { reason } => Some(*reason),
        }
    }

    fn reject(reason: RejectionReason) -> Self {
        Self::Rejected { reason }
    }
}

/// Check whether a holder of `age` with `prior_licenses` may be granted
/// `requested` on `today`.
///
/// `professional_classes` names the classes whose prior possession exempts
/// an older holder from the first-professional-license age limit.
pub fn check_eligibility(
    age: Age,
    requested: &LicenseClass,
    prior_licenses: &[PriorLicense],
    professional_classes: &[&str],
    today: NaiveDate,
) -> Eligibility {
    if age.years() < requested.min_age {
        return Eligibility::reject(RejectionReason::BelowMinimumAge);
    }
    if !requested.is_professional {
        return Eligibility::Eligible;
    }

    let holds_professional = prior_licenses
        .iter()
        .any(|p| professional_classes.contains(&p.class_id.as_str()));
    if age.years() > FIRST_PROFESSIONAL_AGE_LIMIT && !holds_professional {
        return Eligibility::reject(RejectionReason::FirstProfessionalAfterAgeLimit);
    }

    let Some(first_b) = mdl_core::holder::earliest_of(prior_licenses, PREREQUISITE_CLASS) else {
        return Eligibility::reject(RejectionReason::MissingPrerequisiteClass);
    };
    if !held_long_enough(first_b, today) {
        return Eligibility::reject(RejectionReason::PrerequisiteHeldTooBriefly);
    }

    Eligibility::Eligible
}

/// Whether a license issued on `issued_on` has been held for the full
/// prerequisite period by `today`. Issued exactly one year ago counts.
fn held_long_enough(issued_on: NaiveDate, today: NaiveDate) -> bool {
    match issued_on.checked_add_months(Months::new(PREREQUISITE_HOLDING_MONTHS)) {
        Some(eligible_from) => eligible_from <= today,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdl_core::ClassId;

    const PROFESSIONAL: [&str; 3] = ["C", "D", "E"];

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2026, 10, 19)
    }

    fn class(id: &str, min_age: u32, is_professional: bool) -> LicenseClass {
        LicenseClass {
            id: ClassId::parse(id).unwrap(),
            min_age,
            is_professional,
            description: String::new(),
        }
    }

    fn prior(id: &str, issued_on: NaiveDate) -> PriorLicense {
        PriorLicense::new(ClassId::parse(id).unwrap(), issued_on)
    }

    fn check(age: u32, requested: &LicenseClass, prior: &[PriorLicense]) -> Eligibility {
        check_eligibility(Age::from_years(age), requested, prior, &PROFESSIONAL, today())
    }

    // ── Minimum age ──────────────────────────────────────────────────

    #[test]
    fn test_class_b_at_minimum_age() {
        assert!(check(17, &class("B", 17, false), &[]).is_eligible());
    }

    #[test]
    fn test_class_b_below_minimum_age() {
        let result = check(16, &class("B", 17, false), &[]);
        assert_eq!(result.reason(), Some(RejectionReason::BelowMinimumAge));
        assert_eq!(result.reason().unwrap().message(), "below minimum age for class");
    }

    #[test]
    fn test_minimum_age_checked_before_professional_rules() {
        let result = check(19, &class("C", 21, true), &[]);
        assert_eq!(result.reason(), Some(RejectionReason::BelowMinimumAge));
    }

    // ── Professional age limit ───────────────────────────────────────

    #[test]
    fn test_first_professional_after_65_rejected() {
        let result = check(70, &class("C", 21, true), &[]);
        assert_eq!(
            result.reason(),
            Some(RejectionReason::FirstProfessionalAfterAgeLimit)
        );
        assert_eq!(
            result.reason().unwrap().to_string(),
            "no first-time professional license after 65"
        );
    }

    #[test]
    fn test_age_limit_waived_with_prior_professional_license() {
        let prior = [prior("B", date(1990, 1, 1)), prior("D", date(1995, 1, 1))];
        assert!(check(70, &class("C", 21, true), &prior).is_eligible());
    }

    #[test]
    fn test_exactly_65_not_subject_to_age_limit() {
        let prior = [prior("B", date(2000, 1, 1))];
        assert!(check(65, &class("E", 21, true), &prior).is_eligible());
    }

    #[test]
    fn test_age_limit_checked_before_prerequisite() {
        let prior = [prior("B", date(2026, 9, 1))];
        assert_eq!(
            check(66, &class("C", 21, true), &prior).reason(),
            Some(RejectionReason::FirstProfessionalAfterAgeLimit)
        );
    }

    // ── Class B prerequisite ─────────────────────────────────────────

    #[test]
    fn test_missing_class_b() {
        let prior = [prior("A", date(2010, 1, 1))];
        assert_eq!(
            check(30, &class("D", 21, true), &prior).reason(),
            Some(RejectionReason::MissingPrerequisiteClass)
        );
    }

    #[test]
    fn test_class_b_held_less_than_a_year() {
        let prior = [prior("B", date(2026, 1, 1))];
        assert_eq!(
            check(30, &class("C", 21, true), &prior).reason(),
            Some(RejectionReason::PrerequisiteHeldTooBriefly)
        );
    }

    #[test]
    fn test_class_b_held_exactly_one_year() {
        let prior = [prior("B", date(2025, 10, 19))];
        assert!(check(30, &class("C", 21, true), &prior).is_eligible());
    }

    #[test]
    fn test_earliest_class_b_counts() {
        let prior = [prior("B", date(2026, 8, 1)), prior("B", date(2015, 8, 1))];
        assert!(check(30, &class("C", 21, true), &prior).is_eligible());
    }

    #[test]
    fn test_non_professional_skips_prerequisites() {
        assert!(check(70, &class("A", 17, false), &[]).is_eligible());
    }

    // ── Serialization ────────────────────────────────────────────────

    #[test]
    fn test_eligibility_serialization() {
        let rejected = Eligibility::reject(RejectionReason::MissingPrerequisiteClass);
        let json = serde_json::to_string(&rejected).unwrap();
        assert_eq!(json, r#"{"status":"rejected","reason":"missing_prerequisite_class"}"#);
        let eligible = serde_json::to_string(&Eligibility::Eligible).unwrap();
        assert_eq!(eligible, r#"{"status":"eligible"}"#);
    }

    #[test]
    fn test_reason_codes_match_serde() {
        for reason in [
            RejectionReason::BelowMinimumAge,
            RejectionReason::FirstProfessionalAfterAgeLimit,
            RejectionReason::MissingPrerequisiteClass,
            RejectionReason::PrerequisiteHeldTooBriefly,
        ] {
            let json = serde_json::to_string(&reason).unwrap();
            assert_eq!(json, format!("\"{}\"", reason.code()));
        }
    }
}
