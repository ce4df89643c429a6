//! In-memory per-user itinerary store.
//!
//! A guarded map replaces the unlocked global state a quick prototype would
//! use: the server handles requests concurrently, and the "no two attractions
//! share a name" invariant needs mutual exclusion around mutations. Lifetime
//! is the process lifetime; nothing is persisted.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::models::Attraction;
use crate::Result;
use crate::TripdeskError;

/// User id applied when the client does not supply one.
pub const DEFAULT_USER_ID: &str = "default_user";

/// Shared map from user id to that user's ordered attraction list.
#[derive(Debug, Default)]
pub struct ItineraryStore {
    itineraries: Mutex<HashMap<String, Vec<Attraction>>>,
}

impl ItineraryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A poisoned lock only means another handler panicked mid-mutation;
    /// the map itself is still usable, so recover the guard.
    fn guard(&self) -> MutexGuard<'_, HashMap<String, Vec<Attraction>>> {
        self.itineraries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current itinerary for a user, in insertion order. Empty for unknown
    /// users.
    pub fn list(&self, user_id: &str) -> Vec<Attraction> {
        let itineraries = self.guard();
        itineraries.get(user_id).cloned().unwrap_or_default()
    }

    /// Append an attraction to a user's itinerary, creating it on first use.
    ///
    /// Names are unique per itinerary (case-sensitive exact match); adding a
    /// name that already exists fails with `Duplicate` and leaves the store
    /// unchanged. Returns the new itinerary length.
    pub fn add(&self, user_id: &str, attraction: Attraction) -> Result<usize> {
        if attraction.name.is_empty() {
            return Err(TripdeskError::validation("attraction name is required"));
        }

        let mut itineraries = self.guard();
        let itinerary = itineraries.entry(user_id.to_string()).or_default();

        if itinerary.iter().any(|a| a.name == attraction.name) {
            return Err(TripdeskError::duplicate(format!(
                "'{}' is already in the itinerary",
                attraction.name
            )));
        }

        itinerary.push(attraction);
        Ok(itinerary.len())
    }

    /// Remove every attraction matching `name` exactly from a user's
    /// itinerary (in practice a single entry, names being unique).
    ///
    /// Fails with `NotFound` when the user has no itinerary or nothing
    /// matches; the store is unchanged in both cases. Returns the new
    /// itinerary length.
    pub fn remove(&self, user_id: &str, name: &str) -> Result<usize> {
        let mut itineraries = self.guard();

        let Some(itinerary) = itineraries.get_mut(user_id) else {
            return Err(TripdeskError::not_found(format!(
                "no itinerary for user '{user_id}'"
            )));
        };

        let before = itinerary.len();
        itinerary.retain(|a| a.name != name);
        if itinerary.len() == before {
            return Err(TripdeskError::not_found(format!(
                "'{name}' is not in the itinerary"
            )));
        }

        Ok(itinerary.len())
    }
}
