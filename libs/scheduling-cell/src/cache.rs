use std::collections::HashMap;
use std::sync::RwLock;

use chrono::NaiveDate;
use tracing::debug;
use uuid::Uuid;

use crate::models::DayAvailability;

/// In-process availability cache keyed by `(specialist, date)`.
///
/// There is no TTL: writers invalidate the entries their mutation
/// affects. Degraded results (fetch failures) are never stored, so a
/// retry actually refetches.
#[derive(Default)]
pub struct AvailabilityCache {
    entries: RwLock<HashMap<(Uuid, NaiveDate), DayAvailability>>,
}

impl AvailabilityCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, specialist_id: Uuid, date: NaiveDate) -> Option<DayAvailability> {
        self.entries
            .read()
            .ok()?
            .get(&(specialist_id, date))
            .cloned()
    }

    pub fn store(&self, availability: &DayAvailability) {
        if availability.is_degraded() {
            return;
        }
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(
                (availability.specialist_id, availability.date),
                availability.clone(),
            );
        }
    }

    pub fn invalidate(&self, specialist_id: Uuid, date: NaiveDate) {
        if let Ok(mut entries) = self.entries.write() {
            if entries.remove(&(specialist_id, date)).is_some() {
                debug!("Invalidated availability for {} on {}", specialist_id, date);
            }
        }
    }

    /// Drops every cached day for one specialist. Used after a weekly
    /// plan replacement, which affects all dates.
    pub fn invalidate_specialist(&self, specialist_id: Uuid) {
        if let Ok(mut entries) = self.entries.write() {
            entries.retain(|(cached, _), _| *cached != specialist_id);
        }
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(specialist_id: Uuid, date: NaiveDate) -> DayAvailability {
        DayAvailability {
            specialist_id,
            date,
            slots: Vec::new(),
            reason: None,
            load_error: None,
        }
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    #[test]
    fn test_store_and_get_round_trip() {
        let cache = AvailabilityCache::new();
        let specialist = Uuid::new_v4();
        let availability = day(specialist, date(2));

        assert!(cache.get(specialist, date(2)).is_none());
        cache.store(&availability);
        assert_eq!(cache.get(specialist, date(2)), Some(availability));
    }

    #[test]
    fn test_degraded_results_are_not_cached() {
        let cache = AvailabilityCache::new();
        let specialist = Uuid::new_v4();
        let mut availability = day(specialist, date(2));
        availability.load_error = Some("connection refused".to_string());

        cache.store(&availability);
        assert!(cache.get(specialist, date(2)).is_none());
    }

    #[test]
    fn test_invalidate_removes_only_that_day() {
        let cache = AvailabilityCache::new();
        let specialist = Uuid::new_v4();
        cache.store(&day(specialist, date(2)));
        cache.store(&day(specialist, date(3)));

        cache.invalidate(specialist, date(2));
        assert!(cache.get(specialist, date(2)).is_none());
        assert!(cache.get(specialist, date(3)).is_some());
    }

    #[test]
    fn test_invalidate_specialist_keeps_other_specialists() {
        let cache = AvailabilityCache::new();
        let one = Uuid::new_v4();
        let other = Uuid::new_v4();
        cache.store(&day(one, date(2)));
        cache.store(&day(one, date(3)));
        cache.store(&day(other, date(2)));

        cache.invalidate_specialist(one);
        assert!(cache.get(one, date(2)).is_none());
        assert!(cache.get(one, date(3)).is_none());
        assert!(cache.get(other, date(2)).is_some());
        assert_eq!(cache.len(), 1);
    }
}
