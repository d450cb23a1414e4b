use serde::Serialize;
use std::collections::BTreeMap;

use super::section_data::{is_filled, SectionData};
use super::utils::humanize_field;

/// Field name to user-facing message for one save attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrorMap(BTreeMap<String, String>);

impl FieldErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Errors for every required field that is not filled in.
    pub fn from_required<S: AsRef<str>>(data: &SectionData, required_fields: &[S]) -> Self {
        let mut errors = Self::new();
        for field in required_fields {
            let field = field.as_ref();
            if !is_filled(data.get(field)) {
                errors.insert_required(field);
            }
        }
        errors
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    /// Record the standard "is required" message for a field.
    pub fn insert_required(&mut self, field: &str) {
        self.insert(field, format!("{} is required", humanize_field(field)));
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}
