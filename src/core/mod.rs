//! Core module - Selection model and table option state

pub mod column;
pub mod options;
pub mod selection;
pub mod sort;
pub mod table;
pub mod tables;

pub use column::{Column, ColumnIcon, ColumnKey};
pub use options::{ColumnSummary, NamedUpdate, TableOptions, TableSummary};
pub use selection::{BulkSelection, ItemId, RangeFallback, SelectAction, SelectState};
pub use sort::{compare_rows, SortDirection, SortValue, SortableRow};
pub use table::{TableOptionUpdate, TableState};
pub use tables::{
    BlocklistColumn, BlocklistTable, FilterFlag, HistoryColumn, HistoryTable, IndexFilter,
    IssueColumn, IssueTable, QueueColumn, QueueTable, SearchResultColumn, SearchResults,
    TableKind, TableName, VolumeIndex, VolumeIndexColumn,
};
