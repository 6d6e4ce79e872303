//! # Function Naming Convention
//!
//! Every invocable function name starts with a 4-byte group prefix. The
//! remaining characters name the operation inside that group.

/// Length of the group prefix in bytes.
pub const FUNC_PREFIX_LEN: usize = 4;

/// Administrative functions.
pub const ADMIN_FUNCS: &str = "ADMN";
/// Management functions.
pub const MANAGE_FUNCS: &str = "MANG";
/// Per-user transactions.
pub const USER_FUNCS: &str = "USER";
/// Read-only queries.
pub const QUERY_FUNCS: &str = "QURY";

/// Transfer tokens from the caller to another address.
pub const USER_FUND: &str = "USER_FUND";
/// Register the caller's public key.
pub const USER_REG_PUBLIC_KEY: &str = "USER_REGPUBKEY";
/// Authorize another chaincode to act for the caller. Reserved, no handler yet.
pub const USER_AUTH_CHAINCODE: &str = "USER_AUTHCHAINCODE";

/// Read the global supply status.
pub const QUERY_GLOBAL: &str = "QURY_GLOBAL";
/// Read one user record.
pub const QUERY_USER: &str = "QURY_USER";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_carry_their_prefix() {
        for name in [USER_FUND, USER_REG_PUBLIC_KEY, USER_AUTH_CHAINCODE] {
            assert_eq!(&name[..FUNC_PREFIX_LEN], USER_FUNCS);
        }
        for name in [QUERY_GLOBAL, QUERY_USER] {
            assert_eq!(&name[..FUNC_PREFIX_LEN], QUERY_FUNCS);
        }
    }

    #[test]
    fn test_prefixes_are_prefix_len() {
        for prefix in [ADMIN_FUNCS, MANAGE_FUNCS, USER_FUNCS, QUERY_FUNCS] {
            assert_eq!(prefix.len(), FUNC_PREFIX_LEN);
        }
    }
}
