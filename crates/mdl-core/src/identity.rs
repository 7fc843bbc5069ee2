//! # Domain Identity Newtypes
//!
//! Newtype wrappers for the identifiers the licensing rules operate on.
//! You cannot pass a `HolderId` where a `ClassId` is expected, and neither
//! can be constructed from an empty string.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Identifier of a license class (e.g. `A`, `B`, `C`).
///
/// Normalized at construction: surrounding whitespace is trimmed and the
/// identifier is upper-cased, so `" b "` and `"B"` name the same class.
/// Unknown-but-well-formed identifiers are valid `ClassId`s; whether they
/// exist in a catalog is the rules crate's concern.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClassId(String);

impl ClassId {
    /// Parse and normalize a class identifier.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::EmptyClassId`] for empty or whitespace-only input.
    /// - [`ValidationError::InvalidClassId`] if the identifier contains
    ///   control characters.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyClassId);
        }
        if trimmed.chars().any(char::is_control) {
            return Err(ValidationError::InvalidClassId(s.to_string()));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// The normalized identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Ord/Eq/Hash are derived from the inner string, so map lookups by `&str` agree.
impl std::borrow::Borrow<str> for ClassId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl FromStr for ClassId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ClassId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ClassId> for String {
    fn from(id: ClassId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ClassId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// National document number of a license holder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HolderId(String);

impl HolderId {
    /// Construct a holder id, trimming whitespace.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyHolderId);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Access the inner document number.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for HolderId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HolderId> for String {
    fn from(id: HolderId) -> Self {
        id.0
    }
}

impl std::fmt::Display for HolderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "holder:{}", self.0)
    }
}

/// Unique identifier for an issued license document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LicenseId(pub Uuid);

impl LicenseId {
    /// Generate a new random license identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for LicenseId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for LicenseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "license:{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_id_normalizes_case_and_whitespace() {
        let id = ClassId::parse("  b ").unwrap();
        assert_eq!(id.as_str(), "B");
        assert_eq!(id, ClassId::parse("B").unwrap());
    }

    #[test]
    fn test_class_id_accepts_subclass_notation() {
        assert_eq!(ClassId::parse("a.1").unwrap().as_str(), "A.1");
        assert_eq!(ClassId::parse("d-2").unwrap().as_str(), "D-2");
    }

    #[test]
    fn test_class_id_rejects_empty() {
        assert_eq!(ClassId::parse(""), Err(ValidationError::EmptyClassId));
        assert_eq!(ClassId::parse("   "), Err(ValidationError::EmptyClassId));
    }

    #[test]
    fn test_class_id_rejects_control_characters() {
        assert!(matches!(
            ClassId::parse("B\u{7}"),
            Err(ValidationError::InvalidClassId(_))
        ));
        assert!(matches!(
            ClassId::parse("B\nC"),
            Err(ValidationError::InvalidClassId(_))
        ));
    }

    #[test]
    fn test_class_id_accepts_free_form_names() {
        assert_eq!(ClassId::parse("clase_b").unwrap().as_str(), "CLASE_B");
        assert_eq!(ClassId::parse(" B 1 ").unwrap().as_str(), "B 1");
    }

    #[test]
    fn test_class_id_from_str() {
        let id: ClassId = "c".parse().unwrap();
        assert_eq!(id.to_string(), "C");
    }

    #[test]
    fn test_class_id_serde_validates() {
        let id: ClassId = serde_json::from_str("\"e\"").unwrap();
        assert_eq!(id.as_str(), "E");
        assert!(serde_json::from_str::<ClassId>("\"\"").is_err());
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"E\"");
    }

    #[test]
    fn test_holder_id_rejects_empty() {
        assert_eq!(HolderId::parse(" "), Err(ValidationError::EmptyHolderId));
        assert_eq!(HolderId::parse(" 30111222 ").unwrap().as_str(), "30111222");
    }

    #[test]
    fn test_holder_id_display() {
        let id = HolderId::parse("30111222").unwrap();
        assert_eq!(id.to_string(), "holder:30111222");
    }

    #[test]
    fn test_license_ids_are_unique() {
        assert_ne!(LicenseId::new(), LicenseId::new());
        assert!(LicenseId::new().to_string().starts_with("license:"));
    }
}
