// Member Portal - save workflow core
//
// Address verification and section save orchestration for the member portal.
// External services (address verification, member data API, auth tokens) sit
// behind kernel traits so workflows can be exercised with mocks.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;

pub use config::*;
