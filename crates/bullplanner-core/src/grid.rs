//! Weekly grid projection.
//!
//! Partitions the item collection into seven day columns, each ordered by
//! start time. The projection holds no state of its own and is rebuilt from
//! the store whenever the view changes, both while editing and while a
//! review session is adding items.

use serde::Serialize;

use crate::schedule::{DayOfWeek, ScheduleItem};
use crate::store::sorted_for_day;

/// One column of the grid.
#[derive(Debug, Clone, Serialize)]
pub struct DayColumn {
    pub day: DayOfWeek,
    pub items: Vec<ScheduleItem>,
}

impl DayColumn {
    /// Empty columns render as a placeholder, not an error.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WeeklyGrid {
    columns: Vec<DayColumn>,
}

impl WeeklyGrid {
    pub fn project(items: &[ScheduleItem]) -> Self {
        let columns = DayOfWeek::ALL
            .into_iter()
            .map(|day| DayColumn {
                day,
                items: sorted_for_day(items, day),
            })
            .collect();
        Self { columns }
    }

    pub fn day(&self, day: DayOfWeek) -> &DayColumn {
        &self.columns[day.index()]
    }

    /// Columns Monday through Sunday.
    pub fn iter(&self) -> impl Iterator<Item = &DayColumn> {
        self.columns.iter()
    }

    pub fn total_items(&self) -> usize {
        self.columns.iter().map(|c| c.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_items() == 0
    }
}
