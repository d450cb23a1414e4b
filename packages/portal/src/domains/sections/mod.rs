//! Sections domain - saving one part of the member record at a time
//!
//! Flow: EditableSection (edit copy + snapshot) → SectionSaveCoordinator::save
//!   → required fields → address verification → member API → commit or rollback

pub mod coordinator;
pub mod errors;
pub mod guard;
pub mod models;
pub mod section;

pub use coordinator::SectionSaveCoordinator;
pub use errors::{AddressCorrection, SaveError};
pub use guard::SavingSections;
pub use models::{EditableSection, SaveMode, SaveOutcome, SavePhase, SectionSnapshot};
pub use section::Section;
