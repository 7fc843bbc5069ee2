//! # License Lifecycle
//!
//! Models an issued driver's license from the counter to the end of its
//! life. Renewals and duplicates do not mutate a license in place: they
//! supersede it and issue a successor that links back to it.
//!
//! ## States
//!
//! ```text
//! (issue) ──▶ Valid ──▶ Suspended ──▶ Valid (reinstatement)
//!               │           │
//!               │           └──▶ Revoked (terminal)
//!               │
//!               ├──▶ Revoked (terminal)
//!               ├──▶ Superseded (terminal; renewal or duplicate issued)
//!               └──▶ Expired ──▶ Superseded (renewal only)
//! ```
//!
//! Every license is created from a [`Quote`]: the quote carries the
//! eligibility outcome, price and expiry the ruleset computed, so the
//! lifecycle never re-derives them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use mdl_core::{ClassId, HolderId, LicenseId, Timestamp};
use mdl_rules::{IssuanceKind, Quote};

// ─── License State ───────────────────────────────────────────────────

/// The lifecycle state of a license.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LicenseState {
    /// In force.
    Valid,
    /// Temporarily withdrawn.
    Suspended,
    /// Past its expiry date. Can still be renewed.
    Expired,
    /// Replaced by a renewal or duplicate (terminal).
    Superseded,
    /// Permanently withdrawn (terminal).
    Revoked,
}

impl LicenseState {
    /// Whether this state admits no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Superseded | Self::Revoked)
    }
}

impl std::fmt::Display for LicenseState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Valid => "VALID",
            Self::Suspended => "SUSPENDED",
            Self::Expired => "EXPIRED",
            Self::Superseded => "SUPERSEDED",
            Self::Revoked => "REVOKED",
        };
        f.write_str(s)
    }
}

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors that can occur during license issuance and transitions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LicenseError {
    /// Attempted transition is not valid from the current state.
    #[error("invalid license transition: {from} -> {to}")]
    InvalidTransition {
        /// Current state.
        from: LicenseState,
        /// Attempted target state.
        to: LicenseState,
    },

    /// License is in a terminal state.
    #[error("license is in terminal state {state}")]
    TerminalState {
        /// The terminal state.
        state: LicenseState,
    },

    /// The quote does not permit issuance.
    #[error("quote is not issuable: {reason}")]
    NotIssuable {
        /// Why.
        reason: String,
    },

    /// The quote was prepared for a different workflow.
    #[error("expected a {expected} quote, got {actual}")]
    KindMismatch {
        /// Workflow the operation needs.
        expected: IssuanceKind,
        /// Workflow the quote was prepared for.
        actual: IssuanceKind,
    },

    /// The quote is for a different class than the license.
    #[error("quote for class {quoted} cannot replace a class {held} license")]
    ClassMismatch {
        /// Class of the existing license.
        held: ClassId,
        /// Class in the quote.
        quoted: ClassId,
    },

    /// Expiry requested before the expiry date has passed.
    #[error("license expires on {expires_on}, not yet expired on {today}")]
    NotYetExpired {
        /// Recorded expiry.
        expires_on: NaiveDate,
        /// Evaluation date.
        today: NaiveDate,
    },
}

// ─── Transition Evidence ─────────────────────────────────────────────

/// Evidence for a license lifecycle transition.
#[derive(Debug, Clone)]
pub struct LicenseTransitionEvidence {
    /// Reason for the transition.
    pub reason: String,
    /// Operator account that performed it.
    pub actor: Option<String>,
}

impl LicenseTransitionEvidence {
    /// Evidence with a reason and no actor.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            actor: None,
        }
    }

    /// Attach the operator.
    pub fn by(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }
}

/// Record of a license state transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseTransitionRecord {
    /// State before the transition.
    pub from_state: LicenseState,
    /// State after the transition.
    pub to_state: LicenseState,
    /// When the transition occurred.
    pub timestamp: Timestamp,
    /// Reason for the transition.
    pub reason: String,
    /// Operator, if recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
}

// ─── License ─────────────────────────────────────────────────────────

/// An issued driver's license.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    /// Document identifier.
    pub id: LicenseId,
    /// Holder the license was issued to.
    pub holder_id: HolderId,
    /// License class.
    pub class_id: ClassId,
    /// Workflow that produced this document.
    pub kind: IssuanceKind,
    /// Current lifecycle state.
    pub state: LicenseState,
    /// Issue date.
    pub issued_on: NaiveDate,
    /// Expiry date.
    pub expires_on: NaiveDate,
    /// Amount charged.
    pub fee: u32,
    /// License this one replaced, for renewals and duplicates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predecessor: Option<LicenseId>,
    /// Ordered log of all state transitions.
    pub transitions: Vec<LicenseTransitionRecord>,
}

impl License {
    /// Issue a first license of a class from an `original` quote.
    pub fn issue(holder_id: HolderId, quote: &Quote, today: NaiveDate) -> Result<Self, LicenseError> {
        require_kind(quote, IssuanceKind::Original)?;
        let license = Self::from_quote(holder_id, quote, today, None)?;
        tracing::info!(
            license = %license.id,
            holder = %license.holder_id,
            class = %license.class_id,
            expires_on = %license.expires_on,
            "issued license"
        );
        Ok(license)
    }

    /// Renew this license (VALID or EXPIRED → SUPERSEDED) and return the successor.
    pub fn renew(
        &mut self,
        quote: &Quote,
        evidence: LicenseTransitionEvidence,
        today: NaiveDate,
    ) -> Result<Self, LicenseError> {
        require_kind(quote, IssuanceKind::Renewal)?;
        self.require_class(quote)?;
        self.require_not_terminal()?;
        if !matches!(self.state, LicenseState::Valid | LicenseState::Expired) {
            return Err(LicenseError::InvalidTransition {
                from: self.state,
                to: LicenseState::Superseded,
            });
        }
        let successor = Self::from_quote(self.holder_id.clone(), quote, today, Some(self.id))?;
        self.do_transition(LicenseState::Superseded, evidence);
        tracing::info!(
            license = %self.id,
            successor = %successor.id,
            expires_on = %successor.expires_on,
            "renewed license"
        );
        Ok(successor)
    }

    /// Replace this license with a copy (VALID → SUPERSEDED). The copy keeps
    /// the original expiry date.
    pub fn duplicate(
        &mut self,
        quote: &Quote,
        evidence: LicenseTransitionEvidence,
        today: NaiveDate,
    ) -> Result<Self, LicenseError> {
        require_kind(quote, IssuanceKind::Duplicate)?;
        self.require_class(quote)?;
        self.require_state(LicenseState::Valid, LicenseState::Superseded)?;
        let mut successor = Self::from_quote(self.holder_id.clone(), quote, today, Some(self.id))?;
        successor.expires_on = self.expires_on;
        self.do_transition(LicenseState::Superseded, evidence);
        tracing::info!(license = %self.id, successor = %successor.id, "issued duplicate");
        Ok(successor)
    }

    /// Suspend the license (VALID → SUSPENDED).
    pub fn suspend(&mut self, evidence: LicenseTransitionEvidence) -> Result<(), LicenseError> {
        self.require_state(LicenseState::Valid, LicenseState::Suspended)?;
        self.do_transition(LicenseState::Suspended, evidence);
        Ok(())
    }

    /// Reinstate a suspended license (SUSPENDED → VALID).
    pub fn reinstate(&mut self, evidence: LicenseTransitionEvidence) -> Result<(), LicenseError> {
        self.require_state(LicenseState::Suspended, LicenseState::Valid)?;
        self.do_transition(LicenseState::Valid, evidence);
        Ok(())
    }

    /// Revoke the license permanently (VALID or SUSPENDED → REVOKED).
    pub fn revoke(&mut self, evidence: LicenseTransitionEvidence) -> Result<(), LicenseError> {
        self.require_not_terminal()?;
        if !matches!(self.state, LicenseState::Valid | LicenseState::Suspended) {
            return Err(LicenseError::InvalidTransition {
                from: self.state,
                to: LicenseState::Revoked,
            });
        }
        self.do_transition(LicenseState::Revoked, evidence);
        Ok(())
    }

    /// Mark the license expired (VALID → EXPIRED). Only after `expires_on`.
    pub fn expire(
        &mut self,
        evidence: LicenseTransitionEvidence,
        today: NaiveDate,
    ) -> Result<(), LicenseError> {
        self.require_state(LicenseState::Valid, LicenseState::Expired)?;
        if today <= self.expires_on {
            return Err(LicenseError::NotYetExpired {
                expires_on: self.expires_on,
                today,
            });
        }
        self.do_transition(LicenseState::Expired, evidence);
        Ok(())
    }

    /// Whether the license authorizes driving on `today`.
    ///
    /// A license is good through the end of its expiry day.
    pub fn is_valid_on(&self, today: NaiveDate) -> bool {
        self.state == LicenseState::Valid && today >= self.issued_on && today <= self.expires_on
    }

    /// Whether the license is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    fn from_quote(
        holder_id: HolderId,
        quote: &Quote,
        today: NaiveDate,
        predecessor: Option<LicenseId>,
    ) -> Result<Self, LicenseError> {
        if let Some(reason) = quote.eligibility.reason() {
            return Err(LicenseError::NotIssuable {
                reason: reason.message().to_string(),
            });
        }
        let (Some(fee), Some(expires_on)) = (quote.fee, quote.expires_on) else {
            return Err(LicenseError::NotIssuable {
                reason: "quote carries no fee or expiry".to_string(),
            });
        };
        Ok(Self {
            id: LicenseId::new(),
            holder_id,
            class_id: quote.class_id.clone(),
            kind: quote.kind,
            state: LicenseState::Valid,
            issued_on: today,
            expires_on,
            fee: fee.amount,
            predecessor,
            transitions: Vec::new(),
        })
    }

    fn require_class(&self, quote: &Quote) -> Result<(), LicenseError> {
        if quote.class_id != self.class_id {
            return Err(LicenseError::ClassMismatch {
                held: self.class_id.clone(),
                quoted: quote.class_id.clone(),
            });
        }
        Ok(())
    }

    fn require_not_terminal(&self) -> Result<(), LicenseError> {
        if self.state.is_terminal() {
            return Err(LicenseError::TerminalState { state: self.state });
        }
        Ok(())
    }

    /// Validate that the license is in the expected state.
    fn require_state(&self, expected: LicenseState, target: LicenseState) -> Result<(), LicenseError> {
        self.require_not_terminal()?;
        if self.state != expected {
            return Err(LicenseError::InvalidTransition {
                from: self.state,
                to: target,
            });
        }
        Ok(())
    }

    fn do_transition(&mut self, to: LicenseState, evidence: LicenseTransitionEvidence) {
        tracing::debug!(license = %self.id, from = %self.state, %to, "license transition");
        self.transitions.push(LicenseTransitionRecord {
            from_state: self.state,
            to_state: to,
            timestamp: Timestamp::now(),
            reason: evidence.reason,
            actor: evidence.actor,
        });
        self.state = to;
    }
}

fn require_kind(quote: &Quote, expected: IssuanceKind) -> Result<(), LicenseError> {
    if quote.kind != expected {
        return Err(LicenseError::KindMismatch {
            expected,
            actual: quote.kind,
        });
    }
    Ok(())
}

// ─── Tests ───────────────────────────────────────────────────────────
