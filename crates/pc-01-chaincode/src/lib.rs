//! # PC-01 Chaincode - Token Ledger Contract
//!
//! **Subsystem ID:** 1
//!
//! ## Purpose
//!
//! The contract process behind the Pai-Chain token ledger. A ledger host
//! calls `init`, `invoke` and `query`; every `invoke` runs the same gate:
//!
//! ```text
//! invoke(ctx, function, args)
//!   -> settings cache ensure_loaded
//!   -> identity resolution
//!   -> function group decode (4-byte prefix)
//!   -> privilege check (denials audited)
//!   -> group switch: ADMN / MANG stubs, USER registry, QURY via query()
//! ```
//!
//! ## Function Groups
//!
//! | Prefix | Required privilege | Routing |
//! |--------|--------------------|---------|
//! | `ADMN` | Admin | not implemented yet |
//! | `MANG` | Manager | not implemented yet |
//! | `USER` | Delegate | `UserTxRegistry` by full name |
//! | `QURY` | Delegate | `query` entry point only |
//!
//! ## Layout
//!
//! | Layer | Location |
//! |-------|----------|
//! | Settings cache | `domain/settings_cache.rs` |
//! | Privilege policy | `domain/privilege.rs` |
//! | Router | `service.rs` |
//! | `USER*` handlers | `handlers/` |
//! | Ports | `ports/inbound.rs`, `ports/outbound.rs` |
//! | In-memory store, audit, identity | `adapters/` |

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod adapters;
pub mod domain;
pub mod handlers;
pub mod ports;
pub mod service;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::domain::entities::{
        AuditRecord, CallerIdentity, InvocationContext, InvocationStage, InvokeOutcome,
        SupplyStatus,
    };
    pub use crate::domain::errors::{ChaincodeError, StoreError};
    pub use crate::domain::privilege::{
        required_privilege, required_privilege_for, verify, FunctionGroup, PrivilegeLevel,
    };
    pub use crate::domain::settings_cache::{CacheView, GlobalSettingsCache};

    pub use crate::handlers::{
        FundHandler, RegisterPublicKeyHandler, UserTx, UserTxRegistry, UserTxScope, UserUpdates,
    };

    pub use crate::ports::inbound::ChaincodeApi;
    pub use crate::ports::outbound::{AuditSink, IdentityResolver, KeyValueStore};

    pub use crate::adapters::{
        BootstrapIdentityResolver, InMemoryStore, MemoryAuditSink, TracingAuditSink,
    };

    pub use crate::service::{
        create_test_service, ChaincodeConfig, PaiChaincode, ServiceStats, UserView,
    };
}

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 1;

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "Chaincode";
