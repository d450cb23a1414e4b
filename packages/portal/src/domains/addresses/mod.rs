//! Address domain - verification of member postal addresses
//!
//! The validator calls the external verification service through
//! `BaseAddressVerifier` and turns its result codes into a `ValidationResult`.

pub mod codes;
pub mod validator;

pub use validator::{AddressValidator, ValidationResult};
