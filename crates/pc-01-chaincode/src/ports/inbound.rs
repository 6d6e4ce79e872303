//! # Driving Ports (API - Inbound)
//!
//! The three entry points a ledger host calls on a contract process.

use crate::domain::entities::{InvocationContext, InvokeOutcome};
use crate::domain::errors::ChaincodeError;
use crate::ports::outbound::KeyValueStore;

/// Contract entry points.
///
/// The store is the host's view of ledger state for this one invocation,
/// so it is passed per call rather than owned by the service.
pub trait ChaincodeApi: Send + Sync {
    /// Deployment hook. The deployment record itself is written by the
    /// deployer, so this does nothing.
    fn init(
        &self,
        store: &dyn KeyValueStore,
        ctx: &InvocationContext,
        args: &[String],
    ) -> Result<Vec<u8>, ChaincodeError>;

    /// Execute a state-changing function behind the privilege gate.
    fn invoke(
        &self,
        store: &dyn KeyValueStore,
        ctx: &InvocationContext,
        function: &str,
        args: &[String],
    ) -> Result<InvokeOutcome, ChaincodeError>;

    /// Execute a read-only `QURY*` function; returns JSON bytes.
    fn query(
        &self,
        store: &dyn KeyValueStore,
        ctx: &InvocationContext,
        function: &str,
        args: &[String],
    ) -> Result<Vec<u8>, ChaincodeError>;
}
