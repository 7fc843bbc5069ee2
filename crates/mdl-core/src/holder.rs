//! # License Holder Model
//!
//! The holder record ("titular") is owned by the host application; the
//! rules only read it. A holder carries a birth date and the history of
//! licenses previously granted to them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::identity::{ClassId, HolderId};
use crate::temporal::{age_on, Age};

/// A license of some class previously granted to the holder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorLicense {
    /// Class of the earlier license.
    pub class_id: ClassId,
    /// Date it was first issued.
    pub issued_on: NaiveDate,
}

impl PriorLicense {
    /// Convenience constructor.
    pub fn new(class_id: ClassId, issued_on: NaiveDate) -> Self {
        Self {
            class_id,
            issued_on,
        }
    }
}

/// A registered license holder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseHolder {
    /// National document number.
    pub id: HolderId,
    /// Date of birth.
    pub birth_date: NaiveDate,
    /// Licenses held before this request, in any order.
    #[serde(default)]
    pub prior_licenses: Vec<PriorLicense>,
}

impl LicenseHolder {
    /// A holder with no license history.
    pub fn new(id: HolderId, birth_date: NaiveDate) -> Self {
        Self {
            id,
            birth_date,
            prior_licenses: Vec::new(),
        }
    }

    /// Builder-style helper to append a prior license.
    pub fn with_prior(mut self, class_id: ClassId, issued_on: NaiveDate) -> Self {
        self.prior_licenses.push(PriorLicense::new(class_id, issued_on));
        self
    }

    /// Age in whole years on `today`.
    pub fn age_on(&self, today: NaiveDate) -> Result<Age, ValidationError> {
        age_on(self.birth_date, today)
    }

    /// Whether this would be the holder's first license of any class.
    pub fn is_first_license(&self) -> bool {
        self.prior_licenses.is_empty()
    }

    /// Whether the holder has ever held a license of any of `classes`.
    pub fn holds_any(&self, classes: &[&str]) -> bool {
        self.prior_licenses
            .iter()
            .any(|p| classes.contains(&p.class_id.as_str()))
    }

    /// Earliest issue date among prior licenses of `class`.
    pub fn earliest_of(&self, class: &str) -> Option<NaiveDate> {
        earliest_of(&self.prior_licenses, class)
    }
}

/// Earliest issue date among `licenses` of `class`.
pub fn earliest_of(licenses: &[PriorLicense], class: &str) -> Option<NaiveDate> {
    licenses
        .iter()
        .filter(|p| p.class_id.as_str() == class)
        .map(|p| p.issued_on)
        .min()
}
