//! # Identity Resolution
//!
//! Derives the caller's privilege from the security bootstrap stored in
//! the global settings record.

use crate::domain::entities::{CallerIdentity, InvocationContext};
use crate::domain::errors::ChaincodeError;
use crate::domain::privilege::PrivilegeLevel;
use crate::ports::outbound::IdentityResolver;
use shared_types::{canonical_address, SecurityBootstrap};

/// Maps bootstrap-listed principals to Admin or Manager. Everyone else is a
/// Delegate acting for itself.
#[derive(Debug, Default, Clone, Copy)]
pub struct BootstrapIdentityResolver;

impl IdentityResolver for BootstrapIdentityResolver {
    fn resolve(
        &self,
        ctx: &InvocationContext,
        bootstrap: &SecurityBootstrap,
    ) -> Result<CallerIdentity, ChaincodeError> {
        let principal = canonical_address(&ctx.principal);
        if principal.is_empty() {
            return Err(ChaincodeError::Identity("empty principal".into()));
        }

        let listed = |list: &[String]| list.iter().any(|p| canonical_address(p) == principal);
        let privilege = if listed(&bootstrap.admin_principals) {
            PrivilegeLevel::Admin
        } else if listed(&bootstrap.manager_principals) {
            PrivilegeLevel::Manager
        } else {
            PrivilegeLevel::Delegate
        };

        let region = ctx
            .region
            .clone()
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| bootstrap.default_region.clone());

        Ok(CallerIdentity {
            principal,
            privilege,
            region,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bootstrap() -> SecurityBootstrap {
        SecurityBootstrap {
            admin_principals: vec!["root".into()],
            manager_principals: vec!["ops".into(), "root".into()],
            default_region: "global".into(),
        }
    }

    #[test]
    fn test_privilege_from_bootstrap() {
        let resolver = BootstrapIdentityResolver;
        let level = |who: &str| {
            resolver
                .resolve(&InvocationContext::new(who, "tx"), &bootstrap())
                .unwrap()
                .privilege
        };

        assert_eq!(level("root"), PrivilegeLevel::Admin);
        assert_eq!(level("ops"), PrivilegeLevel::Manager);
        assert_eq!(level("alice"), PrivilegeLevel::Delegate);
    }

    #[test]
    fn test_principal_case_is_folded() {
        let resolver = BootstrapIdentityResolver;
        let caller = resolver
            .resolve(&InvocationContext::new(" ROOT ", "tx"), &bootstrap())
            .unwrap();
        assert_eq!(caller.principal, "root");
        assert_eq!(caller.privilege, PrivilegeLevel::Admin);

        let caller = resolver
            .resolve(&InvocationContext::new("0EDB12AF", "tx"), &bootstrap())
            .unwrap();
        assert_eq!(caller.principal, "0edb12af");
    }

    #[test]
    fn test_region_fallback() {
        let resolver = BootstrapIdentityResolver;

        let caller = resolver
            .resolve(&InvocationContext::new("alice", "tx"), &bootstrap())
            .unwrap();
        assert_eq!(caller.region, "global");

        let ctx = InvocationContext::new("alice", "tx").with_region("eu-1");
        assert_eq!(resolver.resolve(&ctx, &bootstrap()).unwrap().region, "eu-1");
    }

    #[test]
    fn test_empty_principal_rejected() {
        let resolver = BootstrapIdentityResolver;
        assert!(matches!(
            resolver.resolve(&InvocationContext::new("  ", "tx"), &bootstrap()),
            Err(ChaincodeError::Identity(_))
        ));
    }
}
