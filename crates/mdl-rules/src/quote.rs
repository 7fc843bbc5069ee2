//! # Issuance Quotes
//!
//! Combines the calculators into the three counter workflows:
//!
//! - **Original**: a class the holder does not yet have. Eligibility is
//!   checked; the validity is probationary when the holder has never held
//!   any license.
//! - **Renewal**: replaces an expiring license of the same class.
//!   Eligibility is re-checked and the renewal discount applies.
//! - **Duplicate**: reprints a lost or damaged license. No eligibility
//!   check, a flat fee, and the expiry of the license being copied.

use chrono::NaiveDate;
use mdl_core::{Age, ClassId, LicenseHolder};
use serde::{Deserialize, Serialize};

use crate::eligibility::Eligibility;
use crate::error::RulesError;
use crate::fees::FeeBreakdown;
use crate::rulebook::Rulebook;
use crate::validity::Validity;

/// The workflow a quote is prepared for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssuanceKind {
    /// First license of a class.
    Original,
    /// Renewal of an existing license.
    Renewal,
    /// Replacement copy of an existing license.
    Duplicate,
}

impl IssuanceKind {
    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Renewal => "renewal",
            Self::Duplicate => "duplicate",
        }
    }
}

impl std::fmt::Display for IssuanceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input to [`Rulebook::quote`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// The applicant.
    pub holder: LicenseHolder,
    /// Requested class.
    pub class_id: ClassId,
    /// Workflow.
    pub kind: IssuanceKind,
    /// Expiry of the license being copied; required for duplicates.
    #[serde(default)]
    pub current_expiry: Option<NaiveDate>,
}

impl QuoteRequest {
    /// A request with no current expiry.
    pub fn new(holder: LicenseHolder, class_id: ClassId, kind: IssuanceKind) -> Self {
        Self {
            holder,
            class_id,
            kind,
            current_expiry: None,
        }
    }
}

/// Priced outcome of a request.
///
/// When eligibility fails, `validity`, `fee` and `expires_on` are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Workflow.
    pub kind: IssuanceKind,
    /// Requested class.
    pub class_id: ClassId,
    /// Holder's age on the evaluation date.
    pub age: Age,
    /// Eligibility outcome.
    pub eligibility: Eligibility,
    /// Validity period; absent for duplicates and rejections.
    pub validity: Option<Validity>,
    /// Itemized fee; absent for rejections.
    pub fee: Option<FeeBreakdown>,
    /// New expiry; absent for rejections.
    pub expires_on: Option<NaiveDate>,
}

impl Quote {
    /// Whether the license can be issued as quoted.
    pub fn is_issuable(&self) -> bool {
        self.eligibility.is_eligible() && self.fee.is_some() && self.expires_on.is_some()
    }
}

impl Rulebook {
    /// Price `request` as of `today`.
    ///
    /// # Errors
    ///
    /// - [`RulesError::Validation`] for a birth date after `today`.
    /// - [`RulesError::UnknownClass`] if the class is not in the catalog.
    /// - [`RulesError::MissingCurrentExpiry`] for a duplicate without an expiry.
    pub fn quote(&self, request: &QuoteRequest, today: NaiveDate) -> Result<Quote, RulesError> {
        let holder = &request.holder;
        let age = holder.age_on(today)?;
        let class = self.require_class(&request.class_id)?;

        if request.kind == IssuanceKind::Duplicate {
            let expires_on = request
                .current_expiry
                .ok_or_else(|| RulesError::MissingCurrentExpiry(request.class_id.clone()))?;
            tracing::debug!(holder = %holder.id, class = %class.id, "quoted duplicate");
            return Ok(Quote {
                kind: request.kind,
                class_id: class.id.clone(),
                age,
                eligibility: Eligibility::Eligible,
                validity: None,
                fee: Some(self.fees().duplicate()),
                expires_on: Some(expires_on),
            });
        }

        let eligibility = self.eligibility(age, class, &holder.prior_licenses, today);
        if let Some(reason) = eligibility.reason() {
            tracing::info!(
                holder = %holder.id,
                class = %class.id,
                kind = %request.kind,
                reason = reason.code(),
                "holder not eligible"
            );
            return Ok(Quote {
                kind: request.kind,
                class_id: class.id.clone(),
                age,
                eligibility,
                validity: None,
                fee: None,
                expires_on: None,
            });
        }

        let is_renewal = request.kind == IssuanceKind::Renewal;
        let is_first_time = !is_renewal && holder.is_first_license();
        let validity = self.validity(age, is_first_time);
        let fee = self.fee(&class.id, validity.years(), is_renewal);
        let expires_on = self.expiration_date(holder.birth_date, validity, today)?;

        tracing::debug!(
            holder = %holder.id,
            class = %class.id,
            kind = %request.kind,
            years = validity.years(),
            amount = fee.amount,
            %expires_on,
            "quoted issuance"
        );
        Ok(Quote {
            kind: request.kind,
            class_id: class.id.clone(),
            age,
            eligibility,
            validity: Some(validity),
            fee: Some(fee),
            expires_on: Some(expires_on),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eligibility::RejectionReason;
    use mdl_core::HolderId;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2026, 10, 19)
    }

    fn id(s: &str) -> ClassId {
        ClassId::parse(s).unwrap()
    }

    fn holder(birth: NaiveDate) -> LicenseHolder {
        LicenseHolder::new(HolderId::parse("30111222").unwrap(), birth)
    }

    fn quote(request: &QuoteRequest) -> Result<Quote, RulesError> {
        Rulebook::standard().quote(request, today())
    }

    #[test]
    fn test_original_first_license_for_teenager() {
        let req = QuoteRequest::new(holder(date(2008, 3, 1)), id("B"), IssuanceKind::Original);
        let q = quote(&req).unwrap();
        assert!(q.is_issuable());
        assert_eq!(q.age.years(), 18);
        assert_eq!(q.validity.unwrap().years(), 1);
        assert_eq!(q.fee.unwrap().amount, 28);
        assert_eq!(q.expires_on, Some(date(2027, 3, 1)));
    }

    #[test]
    fn test_original_second_class_is_not_first_time() {
        let h = holder(date(2008, 3, 1)).with_prior(id("A"), date(2025, 4, 1));
        let q = quote(&QuoteRequest::new(h, id("B"), IssuanceKind::Original)).unwrap();
        assert_eq!(q.validity.unwrap().years(), 3);
        assert_eq!(q.fee.unwrap().amount, 38);
    }

    #[test]
    fn test_renewal_applies_discount() {
        let h = holder(date(1990, 6, 15)).with_prior(id("B"), date(2010, 7, 1));
        let q = quote(&QuoteRequest::new(h, id("B"), IssuanceKind::Renewal)).unwrap();
        assert_eq!(q.validity.unwrap().years(), 5);
        let fee = q.fee.unwrap();
        assert_eq!(fee.amount, 43);
        assert_eq!(fee.renewal_discount, 5);
        assert_eq!(q.expires_on, Some(date(2031, 6, 15)));
    }

    #[test]
    fn test_rejected_quote_has_no_price() {
        let req = QuoteRequest::new(holder(date(1956, 1, 1)), id("C"), IssuanceKind::Original);
        let q = quote(&req).unwrap();
        assert!(!q.is_issuable());
        assert_eq!(
            q.eligibility.reason(),
            Some(RejectionReason::FirstProfessionalAfterAgeLimit)
        );
        assert!(q.fee.is_none());
        assert!(q.expires_on.is_none());
    }

    #[test]
    fn test_duplicate_keeps_expiry() {
        let mut req = QuoteRequest::new(holder(date(1990, 6, 15)), id("B"), IssuanceKind::Duplicate);
        req.current_expiry = Some(date(2029, 6, 15));
        let q = quote(&req).unwrap();
        assert!(q.is_issuable());
        assert_eq!(q.expires_on, Some(date(2029, 6, 15)));
        assert_eq!(q.fee.unwrap().amount, 8);
        assert!(q.validity.is_none());
    }

    #[test]
    fn test_duplicate_requires_expiry() {
        let req = QuoteRequest::new(holder(date(1990, 6, 15)), id("B"), IssuanceKind::Duplicate);
        assert_eq!(quote(&req), Err(RulesError::MissingCurrentExpiry(id("B"))));
    }

    #[test]
    fn test_unknown_class_is_an_error() {
        let req = QuoteRequest::new(holder(date(1990, 6, 15)), id("Z"), IssuanceKind::Original);
        assert_eq!(quote(&req), Err(RulesError::UnknownClass(id("Z"))));
    }

    #[test]
    fn test_future_birth_date_is_validation_error() {
        let req = QuoteRequest::new(holder(date(2030, 1, 1)), id("B"), IssuanceKind::Original);
        assert!(matches!(quote(&req), Err(RulesError::Validation(_))));
    }

    #[test]
    fn test_quote_serializes() {
        let req = QuoteRequest::new(holder(date(1990, 6, 15)), id("b"), IssuanceKind::Original);
        let json = serde_json::to_value(quote(&req).unwrap()).unwrap();
        assert_eq!(json["kind"], "original");
        assert_eq!(json["class_id"], "B");
        assert_eq!(json["validity"], 5);
        assert_eq!(json["eligibility"]["status"], "eligible");
        assert_eq!(json["expires_on"], "2031-06-15");
    }
}
