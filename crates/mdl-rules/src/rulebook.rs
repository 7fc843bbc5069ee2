//! # Rulebook — Class Catalog and Fee Schedule as One Value
//!
//! A [`Rulebook`] bundles everything the calculators consult: the class
//! catalog, per-class fee tables, the administrative surcharge, the renewal
//! discount and the duplicate fee. The built-in rulebook is a lazily
//! initialised static; municipalities with different tariffs load their own
//! from a YAML or JSON file.
//!
//! ## File Format
//!
//! ```yaml
//! administrative_surcharge: 8
//! renewal_discount_percent: 10
//! duplicate_fee: 8
//! classes:
//!   - id: A
//!     min_age: 17
//!     professional: false
//!     description: Motorcycles and mopeds
//!     fees: { 1: 15, 3: 25, 4: 30, 5: 35 }
//! ```
//!
//! ## Structural Rules
//!
//! Enforced by [`Rulebook::from_file`] so that fee lookups never fail:
//!
//! - class ids are unique and class `A` (the fee fallback) is present;
//! - every fee table has a 1-year entry (the period fallback);
//! - every fee-table key is a supported validity period;
//! - the renewal discount is at most 100 percent.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::LazyLock;

use chrono::NaiveDate;
use mdl_core::{Age, ClassId, PriorLicense, ValidationError};
use serde::{Deserialize, Serialize};

use crate::catalog::{ClassCatalog, LicenseClass};
use crate::eligibility::{check_eligibility, Eligibility};
use crate::error::{RulebookError, RulebookResult, RulesError};
use crate::expiration::calculate_expiration_date;
use crate::fees::{
    FeeBreakdown, FeeSchedule, FeeTable, FALLBACK_FEE_CLASS, FALLBACK_VALIDITY_YEARS,
    STANDARD_DUPLICATE_FEE,
};
use crate::validity::{calculate_validity, Validity, VALIDITY_YEARS};

static STANDARD: LazyLock<Rulebook> = LazyLock::new(|| Rulebook {
    catalog: ClassCatalog::standard(),
    fees: FeeSchedule::standard(),
});

/// One class entry of a rulebook file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassEntry {
    /// Class identifier.
    pub id: ClassId,
    /// Minimum age.
    pub min_age: u32,
    /// Professional class flag.
    #[serde(default)]
    pub professional: bool,
    /// Description of the vehicles covered.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Base costs keyed by validity years.
    pub fees: FeeTable,
}

/// On-disk representation of a rulebook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulebookFile {
    /// Surcharge added to every issuance.
    pub administrative_surcharge: u32,
    /// Renewal discount in percent.
    pub renewal_discount_percent: u32,
    /// Flat fee for duplicates.
    #[serde(default = "default_duplicate_fee")]
    pub duplicate_fee: u32,
    /// Class definitions with their fee tables.
    pub classes: Vec<ClassEntry>,
}

fn default_duplicate_fee() -> u32 {
    STANDARD_DUPLICATE_FEE
}

/// The active licensing rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rulebook {
    catalog: ClassCatalog,
    fees: FeeSchedule,
}

impl Rulebook {
    /// The built-in rulebook.
    pub fn standard() -> &'static Rulebook {
        &STANDARD
    }

    /// Load a rulebook from a `.yaml`, `.yml` or `.json` file.
    pub fn load(path: &Path) -> RulebookResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RulebookError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                RulebookError::Io(e)
            }
        })?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let file: RulebookFile = match extension.as_deref() {
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str(&content).map_err(|e| RulebookError::YamlParse {
                    path: path.to_path_buf(),
                    source: e,
                })?
            }
            Some("json") => {
                serde_json::from_str(&content).map_err(|e| RulebookError::JsonParse {
                    path: path.to_path_buf(),
                    source: e,
                })?
            }
            _ => {
                return Err(RulebookError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        };

        let rulebook = Self::from_file(file)?;
        tracing::info!(
            path = %path.display(),
            classes = rulebook.catalog.len(),
            "loaded rulebook"
        );
        Ok(rulebook)
    }

    /// Validate a parsed rulebook file and build the rulebook.
    pub fn from_file(file: RulebookFile) -> RulebookResult<Self> {
        if file.renewal_discount_percent > 100 {
            return Err(RulebookError::Invalid(format!(
                "renewal_discount_percent must be at most 100, got {}",
                file.renewal_discount_percent
            )));
        }

        let mut seen = BTreeSet::new();
        let mut classes = Vec::with_capacity(file.classes.len());
        let mut tables = BTreeMap::new();
        for entry in file.classes {
            if !seen.insert(entry.id.clone()) {
                return Err(RulebookError::Invalid(format!(
                    "class {} is defined more than once",
                    entry.id
                )));
            }
            if !entry.fees.contains_key(&FALLBACK_VALIDITY_YEARS) {
                return Err(RulebookError::Invalid(format!(
                    "class {} has no {FALLBACK_VALIDITY_YEARS}-year fee entry",
                    entry.id
                )));
            }
            if let Some(bad) = entry.fees.keys().find(|y| !VALIDITY_YEARS.contains(y)) {
                return Err(RulebookError::Invalid(format!(
                    "class {} has a fee for unsupported validity period {bad}",
                    entry.id
                )));
            }
            tables.insert(entry.id.clone(), entry.fees);
            classes.push(LicenseClass {
                id: entry.id,
                min_age: entry.min_age,
                is_professional: entry.professional,
                description: entry.description,
            });
        }
        if !seen.contains(FALLBACK_FEE_CLASS) {
            return Err(RulebookError::Invalid(format!(
                "class {FALLBACK_FEE_CLASS} is required as the fee fallback"
            )));
        }

        tracing::debug!(classes = classes.len(), "validated rulebook");
        Ok(Self {
            catalog: ClassCatalog::new(classes),
            fees: FeeSchedule::from_parts(
                tables,
                file.administrative_surcharge,
                file.renewal_discount_percent,
                file.duplicate_fee,
            ),
        })
    }

    /// Convert back into the on-disk representation.
    pub fn to_file(&self) -> RulebookFile {
        RulebookFile {
            administrative_surcharge: self.fees.administrative_surcharge(),
            renewal_discount_percent: self.fees.renewal_discount_percent(),
            duplicate_fee: self.fees.duplicate_fee(),
            classes: self
                .catalog
                .iter()
                .map(|c| ClassEntry {
                    id: c.id.clone(),
                    min_age: c.min_age,
                    professional: c.is_professional,
                    description: c.description.clone(),
                    fees: self.fees.table(c.id.as_str()).cloned().unwrap_or_default(),
                })
                .collect(),
        }
    }

    /// Render as YAML in the file format above.
    pub fn to_yaml(&self) -> RulebookResult<String> {
        Ok(serde_yaml::to_string(&self.to_file())?)
    }

    /// The class catalog.
    pub fn catalog(&self) -> &ClassCatalog {
        &self.catalog
    }

    /// The fee schedule.
    pub fn fees(&self) -> &FeeSchedule {
        &self.fees
    }

    /// Look up a class, failing with [`RulesError::UnknownClass`].
    pub fn require_class(&self, id: &ClassId) -> Result<&LicenseClass, RulesError> {
        self.catalog.require(id)
    }

    /// Validity period for `age`. See [`calculate_validity`].
    pub fn validity(&self, age: Age, is_first_time: bool) -> Validity {
        calculate_validity(age, is_first_time)
    }

    /// Itemized fee for `class` and `validity_years`, with fallbacks.
    pub fn fee(&self, class: &ClassId, validity_years: u32, is_renewal: bool) -> FeeBreakdown {
        self.fees.calculate(class.as_str(), validity_years, is_renewal)
    }

    /// Eligibility of a holder for `requested` on `today`.
    pub fn eligibility(
        &self,
        age: Age,
        requested: &LicenseClass,
        prior_licenses: &[PriorLicense],
        today: NaiveDate,
    ) -> Eligibility {
        let professional = self.catalog.professional_ids();
        check_eligibility(age, requested, prior_licenses, &professional, today)
    }

    /// Expiration date for a license issued on `today`.
    pub fn expiration_date(
        &self,
        birth_date: NaiveDate,
        validity: Validity,
        today: NaiveDate,
    ) -> Result<NaiveDate, ValidationError> {
        calculate_expiration_date(birth_date, validity.years(), today)
    }
}
