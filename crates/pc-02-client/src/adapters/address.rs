//! Ledger address validation.

use crate::ports::outbound::AddressValidator;
use shared_crypto::ADDRESS_LEN;

/// Accepts exactly `2 * ADDRESS_LEN` hex digits, either case.
#[derive(Debug, Default, Clone, Copy)]
pub struct HexAddressValidator;

impl AddressValidator for HexAddressValidator {
    fn validate(&self, address: &str) -> Result<(), String> {
        let expected = ADDRESS_LEN * 2;
        if address.len() != expected {
            return Err(format!(
                "{address:?} has {} characters, expected {expected}",
                address.len()
            ));
        }
        if !address.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("{address:?} is not hex"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_addresses() {
        let validator = HexAddressValidator;
        assert!(validator.validate(&"ab".repeat(20)).is_ok());
        assert!(validator.validate(&"AB".repeat(20)).is_ok());
        assert!(validator.validate("abc").is_err());
        assert!(validator.validate(&"zz".repeat(20)).is_err());
        assert!(validator.validate("").is_err());
    }
}
