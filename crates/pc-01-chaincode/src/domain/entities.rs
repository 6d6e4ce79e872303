//! # Domain Entities
//!
//! Invocation-scoped data: who is calling, what they asked for and what
//! came out.

use super::privilege::{FunctionGroup, PrivilegeLevel};
use serde::Serialize;
use shared_types::GlobalSetting;
use std::fmt;

// =============================================================================
// INVOCATION CONTEXT
// =============================================================================

/// Caller facts supplied by the host with every invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationContext {
    /// Authenticated principal (the caller's ledger address).
    pub principal: String,
    /// Operating region/tenant tag, if the host knows one.
    pub region: Option<String>,
    /// Host transaction id, used for log correlation.
    pub tx_id: String,
}

impl InvocationContext {
    /// Context without a region tag.
    pub fn new(principal: impl Into<String>, tx_id: impl Into<String>) -> Self {
        Self {
            principal: principal.into(),
            region: None,
            tx_id: tx_id.into(),
        }
    }

    /// Attach a region tag.
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }
}

/// The caller after identity resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    /// Caller address.
    pub principal: String,
    /// Resolved privilege level.
    pub privilege: PrivilegeLevel,
    /// Resolved operating region.
    pub region: String,
}

// =============================================================================
// SUPPLY STATUS
// =============================================================================

/// In-memory mirror of the mutable fields of [`GlobalSetting`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SupplyStatus {
    /// Tokens ever issued.
    pub total_supply: i64,
    /// Tokens not yet assigned to any user.
    pub unassigned_supply: i64,
}

impl SupplyStatus {
    /// Copy the supply fields out of a stored record.
    pub fn from_setting(setting: &GlobalSetting) -> Self {
        Self {
            total_supply: setting.total_supply,
            unassigned_supply: setting.unassigned_supply,
        }
    }

    /// Overwrite the supply fields of a stored record.
    pub fn apply_to(&self, setting: &mut GlobalSetting) {
        setting.total_supply = self.total_supply;
        setting.unassigned_supply = self.unassigned_supply;
    }

    /// `0 <= unassigned_supply <= total_supply`.
    pub fn is_consistent(&self) -> bool {
        self.unassigned_supply >= 0 && self.unassigned_supply <= self.total_supply
    }

    /// Tokens held by users.
    pub fn assigned_supply(&self) -> i64 {
        self.total_supply - self.unassigned_supply
    }
}

// =============================================================================
// OUTCOMES
// =============================================================================

/// Successful result of an invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvokeOutcome {
    /// A handler ran and these user records were written.
    Dispatched {
        /// Full function name.
        function: String,
        /// Ids of the user records written back.
        updated_users: Vec<String>,
    },
    /// The privilege check passed but the group has no handlers yet.
    Unimplemented {
        /// Group that was addressed.
        group: FunctionGroup,
    },
}

/// Per-invocation state machine, recorded on the invocation span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationStage {
    /// Invocation received.
    Start,
    /// Settings cache is loaded.
    CacheReady,
    /// Caller passed the privilege check.
    PrivilegeChecked,
    /// Routed to a handler (or an explicit stub).
    Dispatched,
    /// Rejected by the privilege policy.
    Denied,
    /// Any other failure.
    Failed,
}

impl fmt::Display for InvocationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::CacheReady => "cache_ready",
            Self::PrivilegeChecked => "privilege_checked",
            Self::Dispatched => "dispatched",
            Self::Denied => "denied",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// One audit entry, produced for every privilege denial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRecord {
    /// Host transaction id.
    pub tx_id: String,
    /// Caller that was denied.
    pub principal: String,
    /// Function the caller attempted.
    pub function: String,
    /// Human-readable description.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supply_status_mirror() {
        let mut setting = GlobalSetting {
            total_supply: 1_000,
            unassigned_supply: 400,
            ..GlobalSetting::default()
        };
        let mut status = SupplyStatus::from_setting(&setting);
        assert_eq!(status.assigned_supply(), 600);

        status.unassigned_supply = 300;
        status.apply_to(&mut setting);
        assert_eq!(setting.unassigned_supply, 300);
        assert_eq!(setting.total_supply, 1_000);
    }

    #[test]
    fn test_supply_consistency() {
        assert!(SupplyStatus { total_supply: 5, unassigned_supply: 5 }.is_consistent());
        assert!(!SupplyStatus { total_supply: 5, unassigned_supply: 6 }.is_consistent());
        assert!(!SupplyStatus { total_supply: 5, unassigned_supply: -1 }.is_consistent());
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(InvocationStage::PrivilegeChecked.to_string(), "privilege_checked");
        assert_eq!(InvocationStage::Denied.to_string(), "denied");
    }

    #[test]
    fn test_context_builder() {
        let ctx = InvocationContext::new("alice", "tx-1").with_region("eu");
        assert_eq!(ctx.region.as_deref(), Some("eu"));
    }
}
