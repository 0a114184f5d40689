//! Sort, column and filter state of a single table

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::column::{Column, ColumnKey};
use super::sort::{compare_rows, SortDirection, SortableRow};
use super::tables::{FilterFlag, IndexFilter};
use crate::error::{KapoviewError, Result};

/// A single recognised change to a table's options
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableOptionUpdate<C> {
    /// Replace the column list (order and visibility) wholesale
    Columns(Vec<Column<C>>),
    ColumnVisibility { name: C, visible: bool },
    MoveColumn { name: C, index: usize },
    Filter { flag: FilterFlag, value: bool },
    FilterKey(IndexFilter),
    PageSize(u32),
}

/// Options of one named table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableState<C> {
    sort_key: Option<C>,
    sort_direction: Option<SortDirection>,
    secondary_sort_key: Option<C>,
    secondary_sort_direction: Option<SortDirection>,
    columns: Vec<Column<C>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    filters: BTreeMap<FilterFlag, bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    filter_key: Option<IndexFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    page_size: Option<u32>,
}

impl<C: ColumnKey> TableState<C> {
    /// Unsorted table with the given columns
    pub fn new(columns: Vec<Column<C>>) -> Self {
        Self {
            sort_key: None,
            sort_direction: None,
            secondary_sort_key: None,
            secondary_sort_direction: None,
            columns,
            filters: BTreeMap::new(),
            filter_key: None,
            page_size: None,
        }
    }

    pub fn sorted_by(mut self, key: C, direction: SortDirection) -> Self {
        self.sort_key = Some(key);
        self.sort_direction = Some(direction);
        self
    }

    /// Tie-break ordering applied after the primary sort
    pub fn then_by(mut self, key: C, direction: SortDirection) -> Self {
        self.secondary_sort_key = Some(key);
        self.secondary_sort_direction = Some(direction);
        self
    }

    /// Declare the filter toggles this table supports, all off
    pub fn with_filters(mut self, flags: &[FilterFlag]) -> Self {
        self.filters = flags.iter().map(|flag| (*flag, false)).collect();
        self
    }

    pub fn with_filter_key(mut self, filter_key: IndexFilter) -> Self {
        self.filter_key = Some(filter_key);
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn sort_key(&self) -> Option<C> {
        self.sort_key
    }

    pub fn sort_direction(&self) -> Option<SortDirection> {
        self.sort_direction
    }

    pub fn secondary_sort_key(&self) -> Option<C> {
        self.secondary_sort_key
    }

    pub fn secondary_sort_direction(&self) -> Option<SortDirection> {
        self.secondary_sort_direction
    }

    pub fn columns(&self) -> &[Column<C>] {
        &self.columns
    }

    pub fn column(&self, name: C) -> Option<&Column<C>> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn visible_columns(&self) -> impl Iterator<Item = &Column<C>> {
        self.columns.iter().filter(|c| c.is_visible)
    }

    pub fn filters(&self) -> &BTreeMap<FilterFlag, bool> {
        &self.filters
    }

    /// `None` when the table has no such toggle
    pub fn filter(&self, flag: FilterFlag) -> Option<bool> {
        self.filters.get(&flag).copied()
    }

    pub fn filter_key(&self) -> Option<IndexFilter> {
        self.filter_key
    }

    pub fn page_size(&self) -> Option<u32> {
        self.page_size
    }

    /// Sort by `key`
    ///
    /// Without an explicit direction, re-selecting the current key flips the
    /// direction and selecting another key keeps the current direction. A
    /// column's fixed direction overrides both. The secondary sort is left
    /// as it is.
    pub fn set_sort(&mut self, key: C, direction: Option<SortDirection>) -> Result<SortDirection> {
        let fixed = self.sortable_column(key)?.fixed_sort_direction;
        let current = self.sort_direction.unwrap_or_default();

        let resolved = match (fixed, direction) {
            (Some(fixed), _) => fixed,
            (None, Some(explicit)) => explicit,
            (None, None) if self.sort_key == Some(key) => current.flip(),
            (None, None) => current,
        };

        self.sort_key = Some(key);
        self.sort_direction = Some(resolved);
        log::debug!("sort set to {} {}", key.as_str(), resolved.as_str());
        Ok(resolved)
    }

    /// Set the tie-break ordering; it may not repeat the primary key
    pub fn set_secondary_sort(
        &mut self,
        key: C,
        direction: Option<SortDirection>,
    ) -> Result<SortDirection> {
        if self.sort_key == Some(key) {
            return Err(KapoviewError::sort(format!(
                "'{}' is already the primary sort",
                key.as_str()
            )));
        }
        let fixed = self.sortable_column(key)?.fixed_sort_direction;

        let resolved = match (fixed, direction) {
            (Some(fixed), _) => fixed,
            (None, Some(explicit)) => explicit,
            (None, None) if self.secondary_sort_key == Some(key) => self
                .secondary_sort_direction
                .unwrap_or_default()
                .flip(),
            (None, None) => SortDirection::default(),
        };

        self.secondary_sort_key = Some(key);
        self.secondary_sort_direction = Some(resolved);
        Ok(resolved)
    }

    pub fn clear_secondary_sort(&mut self) {
        self.secondary_sort_key = None;
        self.secondary_sort_direction = None;
    }

    /// Apply one option change
    pub fn apply_update(&mut self, update: TableOptionUpdate<C>) -> Result<()> {
        match update {
            TableOptionUpdate::Columns(columns) => {
                let mut seen = HashSet::new();
                if let Some(dup) = columns.iter().find(|c| !seen.insert(c.name)) {
                    return Err(KapoviewError::update(format!(
                        "column '{}' listed twice",
                        dup.name.as_str()
                    )));
                }
                self.columns = columns;
                self.drop_invalid_sort();
            }
            TableOptionUpdate::ColumnVisibility { name, visible } => {
                let column = self.modifiable_column_mut(name)?;
                column.is_visible = visible;
            }
            TableOptionUpdate::MoveColumn { name, index } => {
                self.modifiable_column_mut(name)?;
                let from = self
                    .columns
                    .iter()
                    .position(|c| c.name == name)
                    .ok_or_else(|| missing_column(name))?;
                let column = self.columns.remove(from);
                let to = index.min(self.columns.len());
                self.columns.insert(to, column);
            }
            TableOptionUpdate::Filter { flag, value } => match self.filters.get_mut(&flag) {
                Some(current) => *current = value,
                None => {
                    return Err(KapoviewError::update(format!(
                        "filter '{}' does not apply to this table",
                        flag.as_str()
                    )))
                }
            },
            TableOptionUpdate::FilterKey(filter_key) => match self.filter_key.as_mut() {
                Some(current) => *current = filter_key,
                None => {
                    return Err(KapoviewError::update(
                        "this table has no filter selection",
                    ))
                }
            },
            TableOptionUpdate::PageSize(page_size) => {
                if page_size == 0 {
                    return Err(KapoviewError::update("page size must be at least 1"));
                }
                match self.page_size.as_mut() {
                    Some(current) => *current = page_size,
                    None => return Err(KapoviewError::update("this table is not paged")),
                }
            }
        }
        Ok(())
    }

    /// Order rows by the primary sort, then the secondary sort
    pub fn sort_rows<R: SortableRow<C>>(&self, rows: &mut [R]) {
        let Some(primary) = self.sort_key else {
            return;
        };
        let primary_dir = self.sort_direction.unwrap_or_default();
        let secondary = self
            .secondary_sort_key
            .map(|key| (key, self.secondary_sort_direction.unwrap_or_default()));

        rows.sort_by(|a, b| {
            compare_rows(a, b, primary, primary_dir).then_with(|| match secondary {
                Some((key, dir)) => compare_rows(a, b, key, dir),
                None => std::cmp::Ordering::Equal,
            })
        });
    }

    /// Bring rehydrated state in line with the current build's defaults
    ///
    /// Columns added since the state was saved are appended, duplicate
    /// columns are dropped, filter toggles follow the defaults' set and
    /// sort keys that no longer point at a sortable column are cleared.
    pub fn reconcile_with(&mut self, defaults: &TableState<C>) {
        let mut seen = HashSet::new();
        self.columns.retain(|c| seen.insert(c.name));
        for column in &defaults.columns {
            if !seen.contains(&column.name) {
                log::debug!("appending new column '{}'", column.name.as_str());
                self.columns.push(column.clone());
            }
        }

        self.filters = defaults
            .filters
            .iter()
            .map(|(flag, default)| (*flag, self.filters.get(flag).copied().unwrap_or(*default)))
            .collect();

        self.filter_key = defaults.filter_key.map(|d| self.filter_key.unwrap_or(d));
        self.page_size = defaults
            .page_size
            .map(|d| self.page_size.filter(|n| *n > 0).unwrap_or(d));

        self.drop_invalid_sort();
    }

    fn drop_invalid_sort(&mut self) {
        if !self.sort_key.is_some_and(|key| self.is_sortable(key)) {
            self.sort_key = None;
            self.sort_direction = None;
        } else if self.sort_direction.is_none() {
            self.sort_direction = Some(SortDirection::default());
        }

        if !self.secondary_sort_key.is_some_and(|key| self.is_sortable(key)) {
            self.clear_secondary_sort();
        } else if self.secondary_sort_direction.is_none() {
            self.secondary_sort_direction = Some(SortDirection::default());
        }
    }

    fn is_sortable(&self, key: C) -> bool {
        self.column(key).is_some_and(|c| c.is_sortable)
    }

    fn sortable_column(&self, key: C) -> Result<&Column<C>> {
        let column = self.column(key).ok_or_else(|| missing_column(key))?;
        if !column.is_sortable {
            return Err(KapoviewError::sort(format!(
                "column '{}' is not sortable",
                key.as_str()
            )));
        }
        Ok(column)
    }

    fn modifiable_column_mut(&mut self, name: C) -> Result<&mut Column<C>> {
        let column = self
            .columns
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| missing_column(name))?;
        if !column.is_modifiable {
            return Err(KapoviewError::update(format!(
                "column '{}' cannot be changed",
                name.as_str()
            )));
        }
        Ok(column)
    }
}

fn missing_column<C: ColumnKey>(key: C) -> KapoviewError {
    KapoviewError::update(format!("column '{}' is not in this table", key.as_str()))
}
