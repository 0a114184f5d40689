//! The named tables, their column sets and shipped defaults

use std::fmt;

use serde::{Deserialize, Serialize};

use super::column::{Column, ColumnKey};
use super::options::TableOptions;
use super::sort::SortDirection;
use super::table::TableState;

/// Names of the independently configured tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TableName {
    VolumeIndex,
    IssueTable,
    QueueTable,
    SearchResults,
    HistoryTable,
    BlocklistTable,
}

impl TableName {
    pub const ALL: [TableName; 6] = [
        TableName::VolumeIndex,
        TableName::IssueTable,
        TableName::QueueTable,
        TableName::SearchResults,
        TableName::HistoryTable,
        TableName::BlocklistTable,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TableName::VolumeIndex => "volumeIndex",
            TableName::IssueTable => "issueTable",
            TableName::QueueTable => "queueTable",
            TableName::SearchResults => "searchResults",
            TableName::HistoryTable => "historyTable",
            TableName::BlocklistTable => "blocklistTable",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|name| name.as_str() == s)
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Boolean filter toggles offered by some tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterFlag {
    HideDownloaded,
    HideUnmonitored,
    HideUnmatched,
}

impl FilterFlag {
    pub const ALL: [FilterFlag; 3] = [
        FilterFlag::HideDownloaded,
        FilterFlag::HideUnmonitored,
        FilterFlag::HideUnmatched,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterFlag::HideDownloaded => "hideDownloaded",
            FilterFlag::HideUnmonitored => "hideUnmonitored",
            FilterFlag::HideUnmatched => "hideUnmatched",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|flag| flag.as_str() == s)
    }
}

/// Volume index filter menu selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexFilter {
    #[default]
    #[serde(alias = "")]
    All,
    Monitored,
    Unmonitored,
    Continuing,
    Ended,
    Wanted,
}

impl IndexFilter {
    pub const ALL: [IndexFilter; 6] = [
        IndexFilter::All,
        IndexFilter::Monitored,
        IndexFilter::Unmonitored,
        IndexFilter::Continuing,
        IndexFilter::Ended,
        IndexFilter::Wanted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IndexFilter::All => "all",
            IndexFilter::Monitored => "monitored",
            IndexFilter::Unmonitored => "unmonitored",
            IndexFilter::Continuing => "continuing",
            IndexFilter::Ended => "ended",
            IndexFilter::Wanted => "wanted",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|filter| filter.as_str() == s)
    }
}

crate::column_names! {
    /// Columns of the volume library table
    pub enum VolumeIndexColumn {
        Monitored => "monitored",
        Title => "title",
        Year => "year",
        Publisher => "publisher",
        IssuesDownloadedMonitored => "issuesDownloadedMonitored",
        IssueCountMonitored => "issueCountMonitored",
        Folder => "folder",
        TotalSize => "totalSize",
        MonitorNewIssues => "monitorNewIssues",
        Actions => "actions",
    }
}

crate::column_names! {
    /// Columns of a volume's issue list
    pub enum IssueColumn {
        Monitored => "monitored",
        IssueNumber => "issueNumber",
        Title => "title",
        Path => "path",
        RelativePath => "relativePath",
        Size => "size",
        ReleaseGroup => "releaseGroup",
        Status => "status",
        Actions => "actions",
    }
}

crate::column_names! {
    /// Columns of the download queue
    pub enum QueueColumn {
        Drag => "drag",
        Priority => "priority",
        Status => "status",
        Title => "title",
        SourceName => "sourceName",
        Size => "size",
        Speed => "speed",
        TimeLeft => "timeLeft",
        Progress => "progress",
        Actions => "actions",
    }
}

crate::column_names! {
    /// Columns of interactive search results
    pub enum SearchResultColumn {
        Match => "match",
        IssueNumber => "issueNumber",
        DisplayTitle => "displayTitle",
        Filesize => "filesize",
        Pages => "pages",
        Releaser => "releaser",
        ScanType => "scanType",
        Resolution => "resolution",
        Dpi => "dpi",
        Source => "source",
        MatchRejections => "matchRejections",
        Actions => "actions",
    }
}

crate::column_names! {
    /// Columns of the download history
    pub enum HistoryColumn {
        Source => "source",
        VolumeId => "volumeId",
        IssueId => "issueId",
        WebLink => "webLink",
        WebTitle => "webTitle",
        WebSubTitle => "webSubTitle",
        FileTitle => "fileTitle",
        DownloadedAt => "downloadedAt",
        Success => "success",
        Actions => "actions",
    }
}

crate::column_names! {
    /// Columns of the blocklist
    pub enum BlocklistColumn {
        Source => "source",
        VolumeId => "volumeId",
        IssueId => "issueId",
        DownloadLink => "downloadLink",
        WebLink => "webLink",
        WebTitle => "webTitle",
        WebSubTitle => "webSubTitle",
        Reason => "reason",
        AddedAt => "addedAt",
        Actions => "actions",
    }
}

/// Static description of one named table
pub trait TableKind {
    type Column: ColumnKey;

    const NAME: TableName;

    /// Options a table starts with before any user change
    fn defaults() -> TableState<Self::Column>;

    fn state(options: &TableOptions) -> &TableState<Self::Column>;

    fn state_mut(options: &mut TableOptions) -> &mut TableState<Self::Column>;
}

pub struct VolumeIndex;
pub struct IssueTable;
pub struct QueueTable;
pub struct SearchResults;
pub struct HistoryTable;
pub struct BlocklistTable;

impl TableKind for VolumeIndex {
    type Column = VolumeIndexColumn;
    const NAME: TableName = TableName::VolumeIndex;

    fn defaults() -> TableState<VolumeIndexColumn> {
        use VolumeIndexColumn::*;
        TableState::new(vec![
            Column::new(Monitored).locked(),
            Column::new(Title).locked(),
            Column::new(Year).locked(),
            Column::new(Publisher).locked(),
            Column::new(IssuesDownloadedMonitored).locked(),
            Column::new(IssueCountMonitored).locked().hidden(),
            Column::new(Folder).locked().hidden(),
            Column::new(TotalSize).locked().hidden(),
            Column::new(MonitorNewIssues).locked().hidden(),
            Column::new(Actions).locked().unsortable().without_label(),
        ])
        .sorted_by(Title, SortDirection::Ascending)
        .then_by(Title, SortDirection::Ascending)
        .with_filter_key(IndexFilter::All)
        .with_page_size(20)
    }

    fn state(options: &TableOptions) -> &TableState<VolumeIndexColumn> {
        &options.volume_index
    }

    fn state_mut(options: &mut TableOptions) -> &mut TableState<VolumeIndexColumn> {
        &mut options.volume_index
    }
}

impl TableKind for IssueTable {
    type Column = IssueColumn;
    const NAME: TableName = TableName::IssueTable;

    fn defaults() -> TableState<IssueColumn> {
        use IssueColumn::*;
        TableState::new(vec![
            Column::new(Monitored).locked().without_label(),
            Column::new(IssueNumber),
            Column::new(Title),
            Column::new(Path).hidden(),
            Column::new(RelativePath).hidden(),
            Column::new(Size).hidden(),
            Column::new(ReleaseGroup).hidden(),
            Column::new(Status),
            Column::new(Actions).locked().unsortable().without_label(),
        ])
        .sorted_by(IssueNumber, SortDirection::Descending)
    }

    fn state(options: &TableOptions) -> &TableState<IssueColumn> {
        &options.issue_table
    }

    fn state_mut(options: &mut TableOptions) -> &mut TableState<IssueColumn> {
        &mut options.issue_table
    }
}

impl TableKind for QueueTable {
    type Column = QueueColumn;
    const NAME: TableName = TableName::QueueTable;

    fn defaults() -> TableState<QueueColumn> {
        use QueueColumn::*;
        TableState::new(vec![
            Column::new(Drag).locked().unsortable().without_label(),
            Column::new(Priority),
            Column::new(Status),
            Column::new(Title),
            Column::new(SourceName),
            Column::new(Size),
            Column::new(Speed),
            Column::new(TimeLeft),
            Column::new(Progress),
            Column::new(Actions).locked().unsortable().without_label(),
        ])
        .sorted_by(Priority, SortDirection::Ascending)
    }

    fn state(options: &TableOptions) -> &TableState<QueueColumn> {
        &options.queue_table
    }

    fn state_mut(options: &mut TableOptions) -> &mut TableState<QueueColumn> {
        &mut options.queue_table
    }
}

impl TableKind for SearchResults {
    type Column = SearchResultColumn;
    const NAME: TableName = TableName::SearchResults;

    fn defaults() -> TableState<SearchResultColumn> {
        use SearchResultColumn::*;
        TableState::new(vec![
            Column::new(Match).locked(),
            Column::new(IssueNumber).locked(),
            Column::new(DisplayTitle).locked(),
            Column::new(Filesize).locked(),
            Column::new(Pages).locked(),
            Column::new(Releaser).locked(),
            Column::new(ScanType).locked(),
            Column::new(Resolution).locked(),
            Column::new(Dpi).locked(),
            Column::new(Source).locked(),
            Column::new(MatchRejections)
                .locked()
                .icon("danger", "Rejections")
                .fixed_direction(SortDirection::Ascending),
            Column::new(Actions).locked().unsortable().without_label(),
        ])
        .sorted_by(IssueNumber, SortDirection::Ascending)
        .with_filters(&FilterFlag::ALL)
    }

    fn state(options: &TableOptions) -> &TableState<SearchResultColumn> {
        &options.search_results
    }

    fn state_mut(options: &mut TableOptions) -> &mut TableState<SearchResultColumn> {
        &mut options.search_results
    }
}

impl TableKind for HistoryTable {
    type Column = HistoryColumn;
    const NAME: TableName = TableName::HistoryTable;

    fn defaults() -> TableState<HistoryColumn> {
        use HistoryColumn::*;
        TableState::new(vec![
            Column::new(Source).locked().unsortable().width(95),
            Column::new(VolumeId).locked().unsortable().hidden().width(75),
            Column::new(IssueId).locked().unsortable().hidden().width(75),
            Column::new(WebLink).locked().unsortable(),
            Column::new(WebTitle).locked().unsortable(),
            Column::new(WebSubTitle).locked().unsortable(),
            Column::new(FileTitle).locked().unsortable(),
            Column::new(DownloadedAt).locked().unsortable().width(180),
            Column::new(Success).locked().unsortable().width(85),
            Column::new(Actions)
                .locked()
                .unsortable()
                .without_label()
                .width(30),
        ])
    }

    fn state(options: &TableOptions) -> &TableState<HistoryColumn> {
        &options.history_table
    }

    fn state_mut(options: &mut TableOptions) -> &mut TableState<HistoryColumn> {
        &mut options.history_table
    }
}

impl TableKind for BlocklistTable {
    type Column = BlocklistColumn;
    const NAME: TableName = TableName::BlocklistTable;

    fn defaults() -> TableState<BlocklistColumn> {
        use BlocklistColumn::*;
        TableState::new(vec![
            Column::new(Source).locked().unsortable().width(95),
            Column::new(VolumeId).locked().unsortable().width(75),
            Column::new(IssueId).locked().unsortable().width(75),
            Column::new(DownloadLink).locked().unsortable(),
            Column::new(WebLink).locked().unsortable(),
            Column::new(WebTitle).locked().unsortable(),
            Column::new(WebSubTitle).locked().unsortable(),
            Column::new(Reason).locked().unsortable(),
            Column::new(AddedAt).locked().unsortable().width(180),
            Column::new(Actions)
                .locked()
                .unsortable()
                .without_label()
                .width(75),
        ])
    }

    fn state(options: &TableOptions) -> &TableState<BlocklistColumn> {
        &options.blocklist_table
    }

    fn state_mut(options: &mut TableOptions) -> &mut TableState<BlocklistColumn> {
        &mut options.blocklist_table
    }
}
