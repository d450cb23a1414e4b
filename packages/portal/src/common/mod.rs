// Common types and utilities shared across the application

pub mod address;
pub mod field_errors;
pub mod section_data;
pub mod utils;

pub use address::{Address, AddressKind};
pub use field_errors::FieldErrorMap;
pub use section_data::{clean_section_data, is_filled, SectionData};
