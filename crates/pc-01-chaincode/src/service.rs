//! # Chaincode Service
//!
//! The function dispatch router. Every invocation follows the same path:
//!
//! 1. Make sure the global settings cache is loaded
//! 2. Resolve the caller's identity
//! 3. Decode the function group from the name prefix
//! 4. Check the caller's privilege against the group (denials are audited)
//! 5. Route to the group's handlers
//!
//! `USER*` functions run through the [`UserTxRegistry`]; the records they
//! return are written back under `user:<id>`. `ADMN*` and `MANG*` pass the
//! privilege gate but have no handlers yet and report
//! [`InvokeOutcome::Unimplemented`].

use crate::adapters::{BootstrapIdentityResolver, MemoryAuditSink};
use crate::domain::entities::{
    AuditRecord, CallerIdentity, InvocationContext, InvocationStage, InvokeOutcome,
};
use crate::domain::errors::ChaincodeError;
use crate::domain::privilege::{self, FunctionGroup};
use crate::domain::settings_cache::GlobalSettingsCache;
use crate::handlers::{load_user, UserTx, UserTxRegistry, UserTxScope};
use crate::ports::inbound::ChaincodeApi;
use crate::ports::outbound::{AuditSink, IdentityResolver, KeyValueStore};

use pai_telemetry::log_tx_event;
use serde::{Deserialize, Serialize};
use shared_types::functions::{QUERY_GLOBAL, QUERY_USER};
use shared_types::{canonical_address, UserData, GLOBAL_SETTING_KEY, USER_KEY_PREFIX};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, error, field, instrument, warn, Span};

/// Chaincode configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChaincodeConfig {
    /// Store key of the global settings record.
    pub settings_key: String,
    /// Prefix of per-user record keys.
    pub user_key_prefix: String,
}

impl Default for ChaincodeConfig {
    fn default() -> Self {
        Self {
            settings_key: GLOBAL_SETTING_KEY.to_string(),
            user_key_prefix: USER_KEY_PREFIX.to_string(),
        }
    }
}

/// Counters for the chaincode service.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ServiceStats {
    /// `invoke` calls received.
    pub invocations: u64,
    /// Invocations routed to a handler or an explicit stub.
    pub dispatched: u64,
    /// Invocations rejected by the privilege policy.
    pub denied: u64,
    /// Invocations that failed for any other reason.
    pub failed: u64,
    /// `query` calls received.
    pub queries: u64,
}

#[derive(Debug, Default)]
struct AtomicStats {
    invocations: AtomicU64,
    dispatched: AtomicU64,
    denied: AtomicU64,
    failed: AtomicU64,
    queries: AtomicU64,
}

impl AtomicStats {
    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> ServiceStats {
        ServiceStats {
            invocations: self.invocations.load(Ordering::Relaxed),
            dispatched: self.dispatched.load(Ordering::Relaxed),
            denied: self.denied.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            queries: self.queries.load(Ordering::Relaxed),
        }
    }
}

/// JSON shape of a `QURY_USER` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserView {
    /// User address.
    pub id: String,
    /// Operating region.
    pub region: String,
    /// Token balance.
    pub balance: u64,
    /// Hex of the registered public key.
    pub public_key: Option<String>,
    /// Hex digest of the last accepted fund message.
    pub last_tx_digest: Option<String>,
}

impl From<&UserData> for UserView {
    fn from(user: &UserData) -> Self {
        Self {
            id: user.id.clone(),
            region: user.region.clone(),
            balance: user.balance,
            public_key: user.public_key.as_ref().map(hex::encode),
            last_tx_digest: user.last_tx_digest.map(hex::encode),
        }
    }
}

/// The chaincode: settings cache, privilege gate and function router.
pub struct PaiChaincode<I: IdentityResolver, A: AuditSink> {
    config: ChaincodeConfig,
    cache: GlobalSettingsCache,
    identity: I,
    audit: A,
    registry: UserTxRegistry,
    stats: AtomicStats,
}

impl<I: IdentityResolver, A: AuditSink> PaiChaincode<I, A> {
    /// Create a chaincode with the built-in `USER*` handlers.
    pub fn new(identity: I, audit: A, config: ChaincodeConfig) -> Self {
        Self {
            cache: GlobalSettingsCache::new(config.settings_key.clone()),
            config,
            identity,
            audit,
            registry: UserTxRegistry::with_defaults(),
            stats: AtomicStats::default(),
        }
    }

    /// Replace the handler registry.
    #[must_use]
    pub fn with_registry(mut self, registry: UserTxRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Add or replace one `USER*` handler.
    pub fn register_user_tx(&mut self, function: impl Into<String>, handler: impl UserTx + 'static) {
        self.registry.register(function, handler);
    }

    /// The settings cache.
    pub fn cache(&self) -> &GlobalSettingsCache {
        &self.cache
    }

    /// The audit sink.
    pub fn audit(&self) -> &A {
        &self.audit
    }

    /// Configuration in use.
    pub fn config(&self) -> &ChaincodeConfig {
        &self.config
    }

    /// Current counters.
    pub fn stats(&self) -> ServiceStats {
        self.stats.snapshot()
    }

    fn enter_stage(stage: InvocationStage) {
        Span::current().record("stage", field::display(stage));
    }

    fn route(
        &self,
        store: &dyn KeyValueStore,
        ctx: &InvocationContext,
        function: &str,
        args: &[String],
    ) -> Result<InvokeOutcome, ChaincodeError> {
        let view = self.cache.ensure_loaded(store)?;
        Self::enter_stage(InvocationStage::CacheReady);

        let caller = self.identity.resolve(ctx, &view.security)?;
        let group = FunctionGroup::parse(function)?;
        let required = group.required_privilege();

        if !privilege::verify(caller.privilege, required) {
            Self::enter_stage(InvocationStage::Denied);
            AtomicStats::bump(&self.stats.denied);
            self.audit.record(AuditRecord {
                tx_id: ctx.tx_id.clone(),
                principal: caller.principal.clone(),
                function: function.to_string(),
                message: format!(
                    "call function <{function}> without required privilege {required:?}"
                ),
            });
            return Err(ChaincodeError::PermissionDenied {
                function: function.to_string(),
                principal: caller.principal,
            });
        }
        Self::enter_stage(InvocationStage::PrivilegeChecked);

        match group {
            FunctionGroup::Admin | FunctionGroup::Manage => {
                warn!(%group, function, "function group has no handlers yet");
                Self::enter_stage(InvocationStage::Dispatched);
                Ok(InvokeOutcome::Unimplemented { group })
            }
            FunctionGroup::User => self.dispatch_user(store, &caller, function, args),
            FunctionGroup::Query => Err(ChaincodeError::UnroutableFunction(function.to_string())),
        }
    }

    fn dispatch_user(
        &self,
        store: &dyn KeyValueStore,
        caller: &CallerIdentity,
        function: &str,
        args: &[String],
    ) -> Result<InvokeOutcome, ChaincodeError> {
        let handler = self
            .registry
            .get(function)
            .ok_or_else(|| ChaincodeError::UnroutableFunction(function.to_string()))?;

        let prefix = self.config.user_key_prefix.as_str();
        let record = load_user(store, prefix, &caller.principal)?
            .unwrap_or_else(|| UserData::new(&caller.principal, &caller.region));

        let scope = UserTxScope {
            caller,
            record: &record,
            store,
            settings: &self.cache,
            user_key_prefix: prefix,
        };
        let updates = handler.handle_user_tx(&scope, args)?;

        // Caller's own record is written last.
        let (own, others): (Vec<_>, Vec<_>) = updates
            .into_iter()
            .partition(|(id, _)| *id == caller.principal);

        let mut updated_users = Vec::with_capacity(own.len() + others.len());
        for (id, user) in others.into_iter().chain(own) {
            store.put(&format!("{prefix}{id}"), shared_types::encode(&user)?)?;
            updated_users.push(id);
        }

        Self::enter_stage(InvocationStage::Dispatched);
        debug!(function, updated = updated_users.len(), "user function dispatched");
        Ok(InvokeOutcome::Dispatched {
            function: function.to_string(),
            updated_users,
        })
    }

    fn to_json<T: Serialize>(value: &T) -> Result<Vec<u8>, ChaincodeError> {
        serde_json::to_vec(value).map_err(|e| ChaincodeError::Encode(e.to_string()))
    }
}

impl<I: IdentityResolver, A: AuditSink> ChaincodeApi for PaiChaincode<I, A> {
    fn init(
        &self,
        _store: &dyn KeyValueStore,
        ctx: &InvocationContext,
        _args: &[String],
    ) -> Result<Vec<u8>, ChaincodeError> {
        debug!(tx_id = %ctx.tx_id, "init");
        Ok(Vec::new())
    }

    #[instrument(
        name = "invoke",
        skip(self, store, ctx, args),
        fields(tx_id = %ctx.tx_id, principal = %ctx.principal, stage = %InvocationStage::Start)
    )]
    fn invoke(
        &self,
        store: &dyn KeyValueStore,
        ctx: &InvocationContext,
        function: &str,
        args: &[String],
    ) -> Result<InvokeOutcome, ChaincodeError> {
        AtomicStats::bump(&self.stats.invocations);

        let result = self.route(store, ctx, function, args);
        match &result {
            Ok(_) => AtomicStats::bump(&self.stats.dispatched),
            Err(ChaincodeError::PermissionDenied { principal, .. }) => {
                log_tx_event!(warn, "chaincode", "invocation denied", ctx.tx_id, %principal, function);
            }
            Err(err) => {
                Self::enter_stage(InvocationStage::Failed);
                AtomicStats::bump(&self.stats.failed);
                if err.is_fatal() {
                    error!(error = %err, "invocation failed");
                } else {
                    warn!(error = %err, "invocation failed");
                }
            }
        }
        result
    }

    #[instrument(name = "query", skip(self, store, ctx, args), fields(tx_id = %ctx.tx_id))]
    fn query(
        &self,
        store: &dyn KeyValueStore,
        ctx: &InvocationContext,
        function: &str,
        args: &[String],
    ) -> Result<Vec<u8>, ChaincodeError> {
        AtomicStats::bump(&self.stats.queries);
        let view = self.cache.ensure_loaded(store)?;

        match function {
            QUERY_GLOBAL => Self::to_json(&view.status),
            QUERY_USER => {
                let [id] = args else {
                    return Err(ChaincodeError::InvalidArguments(format!(
                        "{QUERY_USER} takes exactly one user id, got {}",
                        args.len()
                    )));
                };
                let id = canonical_address(id);
                let user = load_user(store, &self.config.user_key_prefix, &id)?
                    .ok_or(ChaincodeError::UserNotFound(id))?;
                Self::to_json(&UserView::from(&user))
            }
            other => Err(ChaincodeError::UnroutableFunction(other.to_string())),
        }
    }
}

impl<I: IdentityResolver, A: AuditSink> std::fmt::Debug for PaiChaincode<I, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaiChaincode")
            .field("config", &self.config)
            .field("cache_loaded", &self.cache.is_loaded())
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

/// Chaincode wired with bootstrap identity resolution and an in-memory
/// audit trail.
pub fn create_test_service() -> PaiChaincode<BootstrapIdentityResolver, MemoryAuditSink> {
    PaiChaincode::new(
        BootstrapIdentityResolver,
        MemoryAuditSink::new(),
        ChaincodeConfig::default(),
    )
}
