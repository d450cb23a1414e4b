use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::models::SavePhase;
use super::section::Section;

/// Sections with a save in flight, keyed by section.
///
/// The lock is never held across an await point.
#[derive(Clone, Default)]
pub struct SavingSections {
    in_flight: Arc<Mutex<HashMap<Section, SavePhase>>>,
}

impl SavingSections {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Section, SavePhase>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Claim `section`, or `None` if a save for it is already running.
    pub fn try_begin(&self, section: Section) -> Option<SavingGuard> {
        let mut in_flight = self.lock();
        if in_flight.contains_key(&section) {
            return None;
        }
        in_flight.insert(section, SavePhase::Validating);
        Some(SavingGuard {
            sections: self.clone(),
            section,
        })
    }

    pub fn phase(&self, section: Section) -> Option<SavePhase> {
        self.lock().get(&section).copied()
    }
}

/// Releases the section when dropped, on every exit path.
pub struct SavingGuard {
    sections: SavingSections,
    section: Section,
}

impl SavingGuard {
    pub fn advance(&self, phase: SavePhase) {
        self.sections.lock().insert(self.section, phase);
    }
}

impl Drop for SavingGuard {
    fn drop(&mut self) {
        self.sections.lock().remove(&self.section);
    }
}
