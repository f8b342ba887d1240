//! In-memory schedule item store.
//!
//! The store is the single owner of the live item collection. Items keep
//! insertion order; per-day views are derived on demand.

use std::collections::HashSet;

use tracing::debug;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::schedule::{DayOfWeek, NewScheduleItem, ScheduleItem};

#[derive(Debug, Clone, Default)]
pub struct ScheduleStore {
    items: Vec<ScheduleItem>,
}

impl ScheduleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from previously exported items, keeping their ids.
    ///
    /// # Errors
    /// Fails on the first invalid item or repeated id.
    pub fn from_items(items: impl IntoIterator<Item = ScheduleItem>) -> Result<Self, ValidationError> {
        let mut seen = HashSet::new();
        let mut collected = Vec::new();
        for item in items {
            item.item.validate()?;
            if !seen.insert(item.id.clone()) {
                return Err(ValidationError::DuplicateId(item.id));
            }
            collected.push(item);
        }
        Ok(Self { items: collected })
    }

    /// Validate, assign a fresh id, and append.
    ///
    /// # Errors
    /// Returns the validation error; the store is unchanged.
    pub fn add(&mut self, new_item: NewScheduleItem) -> Result<&ScheduleItem, ValidationError> {
        new_item.validate()?;
        let id = Uuid::new_v4().to_string();
        debug_assert!(self.get(&id).is_none(), "uuid collision");
        debug!(%id, title = %new_item.title, day = %new_item.day, "schedule item added");
        self.items.push(ScheduleItem { id, item: new_item });
        let last = self.items.len() - 1;
        Ok(&self.items[last])
    }

    /// Add several items at once; nothing is added unless all are valid.
    pub fn add_all(&mut self, new_items: Vec<NewScheduleItem>) -> Result<Vec<ScheduleItem>, ValidationError> {
        for item in &new_items {
            item.validate()?;
        }
        let mut added = Vec::with_capacity(new_items.len());
        for item in new_items {
            added.push(self.add(item)?.clone());
        }
        Ok(added)
    }

    /// Remove by id. An unknown id is a no-op.
    pub fn remove(&mut self, id: &str) -> Option<ScheduleItem> {
        let pos = self.items.iter().position(|i| i.id == id)?;
        let removed = self.items.remove(pos);
        debug!(%id, title = %removed.item.title, "schedule item removed");
        Some(removed)
    }

    pub fn get(&self, id: &str) -> Option<&ScheduleItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Items of one day, ascending by start time. Equal start times keep
    /// insertion order.
    pub fn list_by_day(&self, day: DayOfWeek) -> Vec<ScheduleItem> {
        sorted_for_day(&self.items, day)
    }

    /// All items in insertion order.
    pub fn items(&self) -> &[ScheduleItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

pub(crate) fn sorted_for_day(items: &[ScheduleItem], day: DayOfWeek) -> Vec<ScheduleItem> {
    let mut selected: Vec<ScheduleItem> = items.iter().filter(|i| i.day() == day).cloned().collect();
    // sort_by_key is stable
    selected.sort_by_key(|i| i.start_time().minutes_since_midnight());
    selected
}
