//! # Domain Layer
//!
//! Pure chaincode logic: privilege policy, settings cache, invocation
//! entities and errors.

pub mod entities;
pub mod errors;
pub mod privilege;
pub mod settings_cache;

pub use entities::*;
pub use errors::*;
pub use privilege::*;
pub use settings_cache::*;
