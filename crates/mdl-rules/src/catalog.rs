//! # License Class Catalog
//!
//! The set of license classes the municipality issues, with the minimum
//! age for each and whether it is a professional class. Professional
//! classes carry the extra prerequisites checked in
//! [`eligibility`](crate::eligibility).
//!
//! | class | min age | professional | covers |
//! |-------|---------|--------------|--------|
//! | A | 17 | no  | motorcycles and mopeds |
//! | B | 17 | no  | cars and light vans |
//! | C | 21 | yes | trucks |
//! | D | 21 | yes | passenger transport |
//! | E | 21 | yes | articulated vehicles and heavy machinery |

use std::collections::BTreeMap;

use mdl_core::ClassId;
use serde::{Deserialize, Serialize};

use crate::error::RulesError;

/// A license class definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseClass {
    /// Class identifier.
    pub id: ClassId,
    /// Minimum age in whole years.
    pub min_age: u32,
    /// Professional classes require a prior Class B license.
    pub is_professional: bool,
    /// Human-readable description of the vehicles covered.
    #[serde(default)]
    pub description: String,
}

/// Row of the built-in class table: `(id, min_age, is_professional, description)`.
pub(crate) type StandardClassRow = (&'static str, u32, bool, &'static str);

/// Built-in class table.
pub(crate) const STANDARD_CLASSES: [StandardClassRow; 5] = [
    ("A", 17, false, "Motorcycles and mopeds"),
    ("B", 17, false, "Cars and light vans"),
    ("C", 21, true, "Trucks"),
    ("D", 21, true, "Passenger transport"),
    ("E", 21, true, "Articulated vehicles and heavy machinery"),
];

/// Immutable catalog of license classes, keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassCatalog {
    classes: BTreeMap<ClassId, LicenseClass>,
}

impl ClassCatalog {
    /// Build a catalog from class definitions. Later duplicates replace earlier ones;
    /// rulebook validation rejects duplicates before this point.
    pub fn new(classes: impl IntoIterator<Item = LicenseClass>) -> Self {
        Self {
            classes: classes.into_iter().map(|c| (c.id.clone(), c)).collect(),
        }
    }

    /// The built-in catalog.
    pub(crate) fn standard() -> Self {
        Self::new(STANDARD_CLASSES.iter().filter_map(|(id, min_age, prof, desc)| {
            ClassId::parse(id).ok().map(|id| LicenseClass {
                id,
                min_age: *min_age,
                is_professional: *prof,
                description: (*desc).to_string(),
            })
        }))
    }

    /// Look up a class.
    pub fn get(&self, id: &ClassId) -> Option<&LicenseClass> {
        self.classes.get(id)
    }

    /// Look up a class, failing with [`RulesError::UnknownClass`].
    pub fn require(&self, id: &ClassId) -> Result<&LicenseClass, RulesError> {
        self.get(id).ok_or_else(|| RulesError::UnknownClass(id.clone()))
    }

    /// Whether the catalog defines `id`.
    pub fn contains(&self, id: &ClassId) -> bool {
        self.classes.contains_key(id)
    }

    /// All classes in id order.
    pub fn iter(&self) -> impl Iterator<Item = &LicenseClass> {
        self.classes.values()
    }

    /// Ids of the professional classes.
    pub fn professional_ids(&self) -> Vec<&str> {
        self.iter()
            .filter(|c| c.is_professional)
            .map(|c| c.id.as_str())
            .collect()
    }

    /// Number of classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
