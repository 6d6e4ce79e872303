//! # Domain Layer
//!
//! Client-side transaction construction and its errors.

pub mod builder;
pub mod entities;
pub mod errors;

pub use builder::*;
pub use entities::*;
pub use errors::*;
