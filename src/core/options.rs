//! All table options, with typed and name-keyed access

use serde::Serialize;

use super::column::ColumnKey;
use super::sort::SortDirection;
use super::table::{TableOptionUpdate, TableState};
use super::tables::{
    BlocklistColumn, BlocklistTable, FilterFlag, HistoryColumn, HistoryTable, IndexFilter,
    IssueColumn, IssueTable, QueueColumn, QueueTable, SearchResultColumn, SearchResults,
    TableKind, TableName, VolumeIndex, VolumeIndexColumn,
};
use crate::error::{KapoviewError, Result};

/// Run `$body` with `$kind` bound to the table type named by `$name`
macro_rules! for_table {
    ($name:expr, $kind:ident => $body:expr) => {
        match $name {
            $crate::core::tables::TableName::VolumeIndex => {
                type $kind = $crate::core::tables::VolumeIndex;
                $body
            }
            $crate::core::tables::TableName::IssueTable => {
                type $kind = $crate::core::tables::IssueTable;
                $body
            }
            $crate::core::tables::TableName::QueueTable => {
                type $kind = $crate::core::tables::QueueTable;
                $body
            }
            $crate::core::tables::TableName::SearchResults => {
                type $kind = $crate::core::tables::SearchResults;
                $body
            }
            $crate::core::tables::TableName::HistoryTable => {
                type $kind = $crate::core::tables::HistoryTable;
                $body
            }
            $crate::core::tables::TableName::BlocklistTable => {
                type $kind = $crate::core::tables::BlocklistTable;
                $body
            }
        }
    };
}

pub(crate) use for_table;

/// Option change addressed by column name, as typed on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamedUpdate {
    ColumnVisibility { column: String, visible: bool },
    MoveColumn { column: String, index: usize },
    Filter { flag: FilterFlag, value: bool },
    FilterKey(IndexFilter),
    PageSize(u32),
}

/// Options of every named table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableOptions {
    pub volume_index: TableState<VolumeIndexColumn>,
    pub issue_table: TableState<IssueColumn>,
    pub queue_table: TableState<QueueColumn>,
    pub search_results: TableState<SearchResultColumn>,
    pub history_table: TableState<HistoryColumn>,
    pub blocklist_table: TableState<BlocklistColumn>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            volume_index: VolumeIndex::defaults(),
            issue_table: IssueTable::defaults(),
            queue_table: QueueTable::defaults(),
            search_results: SearchResults::defaults(),
            history_table: HistoryTable::defaults(),
            blocklist_table: BlocklistTable::defaults(),
        }
    }
}

impl TableOptions {
    pub fn table<T: TableKind>(&self) -> &TableState<T::Column> {
        T::state(self)
    }

    pub fn table_mut<T: TableKind>(&mut self) -> &mut TableState<T::Column> {
        T::state_mut(self)
    }

    pub fn set_sort<T: TableKind>(
        &mut self,
        key: T::Column,
        direction: Option<SortDirection>,
    ) -> Result<SortDirection> {
        T::state_mut(self).set_sort(key, direction)
    }

    pub fn set_table_option<T: TableKind>(
        &mut self,
        update: TableOptionUpdate<T::Column>,
    ) -> Result<()> {
        T::state_mut(self).apply_update(update)
    }

    /// Restore one table to its defaults
    pub fn reset_table(&mut self, name: TableName) {
        for_table!(name, K => *K::state_mut(self) = K::defaults());
    }

    pub fn set_sort_by_name(
        &mut self,
        name: TableName,
        column: &str,
        direction: Option<SortDirection>,
    ) -> Result<SortDirection> {
        for_table!(name, K => {
            let key = parse_column::<K>(column)?;
            K::state_mut(self).set_sort(key, direction)
        })
    }

    pub fn update_by_name(&mut self, name: TableName, update: NamedUpdate) -> Result<()> {
        for_table!(name, K => {
            let update = resolve_update::<K>(update)?;
            K::state_mut(self).apply_update(update)
        })
    }

    pub fn summary(&self, name: TableName) -> TableSummary {
        for_table!(name, K => TableSummary::of::<K>(K::state(self)))
    }
}

fn parse_column<T: TableKind>(column: &str) -> Result<T::Column> {
    T::Column::parse(column)
        .ok_or_else(|| KapoviewError::unknown_column(T::NAME.as_str(), column))
}

fn resolve_update<T: TableKind>(update: NamedUpdate) -> Result<TableOptionUpdate<T::Column>> {
    Ok(match update {
        NamedUpdate::ColumnVisibility { column, visible } => TableOptionUpdate::ColumnVisibility {
            name: parse_column::<T>(&column)?,
            visible,
        },
        NamedUpdate::MoveColumn { column, index } => TableOptionUpdate::MoveColumn {
            name: parse_column::<T>(&column)?,
            index,
        },
        NamedUpdate::Filter { flag, value } => TableOptionUpdate::Filter { flag, value },
        NamedUpdate::FilterKey(filter_key) => TableOptionUpdate::FilterKey(filter_key),
        NamedUpdate::PageSize(page_size) => TableOptionUpdate::PageSize(page_size),
    })
}

/// Type-erased view of a table's options, for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSummary {
    pub table: TableName,
    pub sort_key: Option<&'static str>,
    pub sort_direction: Option<SortDirection>,
    pub secondary_sort_key: Option<&'static str>,
    pub secondary_sort_direction: Option<SortDirection>,
    pub columns: Vec<ColumnSummary>,
    pub filters: Vec<(FilterFlag, bool)>,
    pub filter_key: Option<IndexFilter>,
    pub page_size: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSummary {
    pub name: &'static str,
    pub is_visible: bool,
    pub is_modifiable: bool,
    pub is_sortable: bool,
    pub fixed_sort_direction: Option<SortDirection>,
}

impl TableSummary {
    fn of<T: TableKind>(state: &TableState<T::Column>) -> Self {
        Self {
            table: T::NAME,
            sort_key: state.sort_key().map(|k| k.as_str()),
            sort_direction: state.sort_direction(),
            secondary_sort_key: state.secondary_sort_key().map(|k| k.as_str()),
            secondary_sort_direction: state.secondary_sort_direction(),
            columns: state
                .columns()
                .iter()
                .map(|c| ColumnSummary {
                    name: c.name.as_str(),
                    is_visible: c.is_visible,
                    is_modifiable: c.is_modifiable,
                    is_sortable: c.is_sortable,
                    fixed_sort_direction: c.fixed_sort_direction,
                })
                .collect(),
            filters: state.filters().iter().map(|(f, v)| (*f, *v)).collect(),
            filter_key: state.filter_key(),
            page_size: state.page_size(),
        }
    }
}
