//! # Fee Schedule
//!
//! Base costs per `(class, validity years)`, a fixed administrative
//! surcharge added to every issuance, and a percentage discount applied on
//! renewals. All amounts are integer currency units.
//!
//! ## Lookup Fallbacks
//!
//! - A class without a fee table is charged from class `A`'s table.
//! - A validity period missing from a table is charged at the 1-year entry.
//!
//! Rulebook validation guarantees both fallbacks resolve, so a fee lookup
//! never fails.
//!
//! ## Rounding
//!
//! The renewal discount is computed in integer arithmetic and rounded half
//! up: `48 × 0.9 = 43.2 → 43`, `45 × 0.9 = 40.5 → 41`.

use std::collections::BTreeMap;

use mdl_core::ClassId;
use serde::{Deserialize, Serialize};

/// Class whose table prices classes that have none.
pub const FALLBACK_FEE_CLASS: &str = "A";

/// Validity period whose entry prices periods missing from a table.
pub const FALLBACK_VALIDITY_YEARS: u32 = 1;

/// Administrative surcharge of the built-in schedule.
pub const STANDARD_ADMINISTRATIVE_SURCHARGE: u32 = 8;

/// Renewal discount of the built-in schedule, in percent.
pub const STANDARD_RENEWAL_DISCOUNT_PERCENT: u32 = 10;

/// Fee for a duplicate of an existing license.
pub const STANDARD_DUPLICATE_FEE: u32 = 8;

/// Built-in base costs, `(class, [(years, cost)])`.
pub(crate) const STANDARD_FEES: [(&str, [(u32, u32); 4]); 5] = [
    ("A", [(1, 15), (3, 25), (4, 30), (5, 35)]),
    ("B", [(1, 20), (3, 30), (4, 35), (5, 40)]),
    ("C", [(1, 30), (3, 45), (4, 50), (5, 55)]),
    ("D", [(1, 35), (3, 50), (4, 55), (5, 60)]),
    ("E", [(1, 40), (3, 55), (4, 60), (5, 65)]),
];

/// Base cost table for one class, keyed by validity years.
pub type FeeTable = BTreeMap<u32, u32>;

/// Itemized cost of an issuance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    /// Base cost from the schedule.
    pub base: u32,
    /// Administrative surcharge.
    pub administrative_surcharge: u32,
    /// Amount taken off by the renewal discount (0 when not a renewal).
    pub renewal_discount: u32,
    /// Total payable.
    pub amount: u32,
}

/// The fee schedule of a rulebook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeSchedule {
    tables: BTreeMap<ClassId, FeeTable>,
    administrative_surcharge: u32,
    renewal_discount_percent: u32,
    duplicate_fee: u32,
}

impl FeeSchedule {
    /// Assemble a schedule. Callers outside the crate go through
    /// [`Rulebook`](crate::Rulebook), which validates the fallbacks first.
    pub(crate) fn from_parts(
        tables: BTreeMap<ClassId, FeeTable>,
        administrative_surcharge: u32,
        renewal_discount_percent: u32,
        duplicate_fee: u32,
    ) -> Self {
        Self {
            tables,
            administrative_surcharge,
            renewal_discount_percent,
            duplicate_fee,
        }
    }

    /// The built-in schedule.
    pub(crate) fn standard() -> Self {
        let tables = STANDARD_FEES
            .iter()
            .filter_map(|(class, rows)| {
                ClassId::parse(class)
                    .ok()
                    .map(|id| (id, rows.iter().copied().collect::<FeeTable>()))
            })
            .collect();
        Self::from_parts(
            tables,
            STANDARD_ADMINISTRATIVE_SURCHARGE,
            STANDARD_RENEWAL_DISCOUNT_PERCENT,
            STANDARD_DUPLICATE_FEE,
        )
    }

    /// The fee table for `class`, without fallback.
    pub fn table(&self, class: &str) -> Option<&FeeTable> {
        self.tables.get(class)
    }

    /// All tables in class order.
    pub fn tables(&self) -> &BTreeMap<ClassId, FeeTable> {
        &self.tables
    }

    /// Administrative surcharge added to every issuance.
    pub fn administrative_surcharge(&self) -> u32 {
        self.administrative_surcharge
    }

    /// Renewal discount in percent.
    pub fn renewal_discount_percent(&self) -> u32 {
        self.renewal_discount_percent
    }

    /// Flat fee for a duplicate.
    pub fn duplicate_fee(&self) -> u32 {
        self.duplicate_fee
    }

    /// Base cost for `(class, years)` with both fallbacks applied.
    pub fn base_cost(&self, class: &str, years: u32) -> u32 {
        self.tables
            .get(class)
            .or_else(|| self.tables.get(FALLBACK_FEE_CLASS))
            .and_then(|table| {
                table
                    .get(&years)
                    .or_else(|| table.get(&FALLBACK_VALIDITY_YEARS))
            })
            .copied()
            // Validated schedules always resolve; an empty schedule charges only the surcharge.
            .unwrap_or(0)
    }

    /// Itemized cost of issuing `class` for `years`.
    pub fn calculate(&self, class: &str, years: u32, is_renewal: bool) -> FeeBreakdown {
        let base = self.base_cost(class, years);
        let subtotal = base.saturating_add(self.administrative_surcharge);
        let amount = if is_renewal {
            apply_discount(subtotal, self.renewal_discount_percent)
        } else {
            subtotal
        };
        FeeBreakdown {
            base,
            administrative_surcharge: self.administrative_surcharge,
            renewal_discount: subtotal - amount,
            amount,
        }
    }

    /// Cost of a duplicate: the flat duplicate fee, no surcharge or discount.
    pub fn duplicate(&self) -> FeeBreakdown {
        FeeBreakdown {
            base: self.duplicate_fee,
            administrative_surcharge: 0,
            renewal_discount: 0,
            amount: self.duplicate_fee,
        }
    }
}

/// Take `percent` off `amount`, rounding the result half up.
///
/// `percent` is capped at 100.
pub fn apply_discount(amount: u32, percent: u32) -> u32 {
    let keep = u64::from(100 - percent.min(100));
    let scaled = u64::from(amount) * keep;
    // (x + 50) / 100 rounds half up for non-negative x.
    u32::try_from((scaled + 50) / 100).unwrap_or(amount)
}
