//! Kernel module - external service infrastructure and dependencies.

pub mod deps;
pub mod member_api_client;
pub mod test_dependencies;
pub mod traits;

pub use deps::{MelissaAdapter, PortalDeps, StaticTokenProvider};
pub use member_api_client::MemberApiClient;
pub use test_dependencies::TestDependencies;
pub use traits::*;
