//! Table option persistence
//!
//! Saves and restores every table's options to `table_options.json`, one
//! entry per table name. Selection state is never written here.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::core::options::for_table;
use crate::core::{
    NamedUpdate, SortDirection, TableKind, TableName, TableOptionUpdate, TableOptions,
    TableState, TableSummary,
};
use crate::error::{KapoviewError, Result};

const STATE_FILENAME: &str = "table_options.json";

/// Table options backed by a JSON file
#[derive(Debug)]
pub struct TableOptionStore {
    options: TableOptions,
    path: PathBuf,
    autosave: bool,
}

impl TableOptionStore {
    /// Default state file (`<data dir>/kapoview/table_options.json`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|p| p.join("kapoview").join(STATE_FILENAME))
    }

    /// Store with shipped defaults, not yet read from `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            options: TableOptions::default(),
            path: path.into(),
            autosave: true,
        }
    }

    /// Open the store at `path`; a missing file yields the defaults
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let options = load_options(&path)?;
        Ok(Self {
            options,
            path,
            autosave: true,
        })
    }

    /// Write after every successful change (default: on)
    pub fn with_autosave(mut self, autosave: bool) -> Self {
        self.autosave = autosave;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn table<T: TableKind>(&self) -> &TableState<T::Column> {
        self.options.table::<T>()
    }

    pub fn summary(&self, name: TableName) -> TableSummary {
        self.options.summary(name)
    }

    pub fn set_sort<T: TableKind>(
        &mut self,
        key: T::Column,
        direction: Option<SortDirection>,
    ) -> Result<SortDirection> {
        let resolved = self.options.set_sort::<T>(key, direction)?;
        self.changed()?;
        Ok(resolved)
    }

    pub fn set_table_option<T: TableKind>(
        &mut self,
        update: TableOptionUpdate<T::Column>,
    ) -> Result<()> {
        self.options.set_table_option::<T>(update)?;
        self.changed()
    }

    pub fn set_sort_by_name(
        &mut self,
        name: TableName,
        column: &str,
        direction: Option<SortDirection>,
    ) -> Result<SortDirection> {
        let resolved = self.options.set_sort_by_name(name, column, direction)?;
        self.changed()?;
        Ok(resolved)
    }

    pub fn update_by_name(&mut self, name: TableName, update: NamedUpdate) -> Result<()> {
        self.options.update_by_name(name, update)?;
        self.changed()
    }

    pub fn reset_table(&mut self, name: TableName) -> Result<()> {
        self.options.reset_table(name);
        self.changed()
    }

    pub fn reset_all(&mut self) -> Result<()> {
        self.options = TableOptions::default();
        self.changed()
    }

    /// Write the state file atomically
    pub fn save(&self) -> Result<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let json = serde_json::to_string_pretty(&self.options)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.write_all(b"\n")?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        log::debug!("table options saved to {}", self.path.display());
        Ok(())
    }

    fn changed(&self) -> Result<()> {
        if self.autosave {
            self.save()
        } else {
            Ok(())
        }
    }
}

/// Load options from `path`, falling back to defaults when it does not exist
pub fn load_options(path: &Path) -> Result<TableOptions> {
    if !path.exists() {
        log::debug!("no table options at {}, using defaults", path.display());
        return Ok(TableOptions::default());
    }
    let content = fs::read_to_string(path)?;
    parse_options(&content, path)
}

/// Rehydrate options from the state file's JSON
///
/// Each table entry is decoded on its own: an entry that no longer fits
/// the current column set is replaced by that table's defaults, and
/// unknown table names are skipped.
pub fn parse_options(content: &str, path: &Path) -> Result<TableOptions> {
    let value: Value = serde_json::from_str(content)?;
    let Value::Object(mut entries) = value else {
        return Err(KapoviewError::persist(
            path,
            "expected a JSON object keyed by table name",
        ));
    };

    let mut options = TableOptions::default();
    for name in TableName::ALL {
        if let Some(entry) = entries.remove(name.as_str()) {
            for_table!(name, K => rehydrate::<K>(&mut options, entry));
        }
    }
    for unknown in entries.keys() {
        log::debug!("ignoring stored options for unknown table '{}'", unknown);
    }

    Ok(options)
}

fn rehydrate<T: TableKind>(options: &mut TableOptions, entry: Value) {
    match serde_json::from_value::<TableState<T::Column>>(entry) {
        Ok(mut state) => {
            state.reconcile_with(&T::defaults());
            *options.table_mut::<T>() = state;
        }
        Err(e) => {
            log::warn!("discarding stored options for {}: {}", T::NAME, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        FilterFlag, IssueColumn, IssueTable, SearchResults, VolumeIndex, VolumeIndexColumn,
    };
    use tempfile::TempDir;

    fn state_path(dir: &TempDir) -> PathBuf {
        dir.path().join("nested").join(STATE_FILENAME)
    }

    #[test]
    fn test_open_missing_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let store = TableOptionStore::open(state_path(&temp)).unwrap();
        assert_eq!(store.options(), &TableOptions::default());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = state_path(&temp);

        let mut store = TableOptionStore::new(&path);
        store
            .set_sort::<VolumeIndex>(VolumeIndexColumn::Year, Some(SortDirection::Descending))
            .unwrap();
        store
            .set_table_option::<IssueTable>(TableOptionUpdate::ColumnVisibility {
                name: IssueColumn::Path,
                visible: true,
            })
            .unwrap();
        store
            .set_table_option::<SearchResults>(TableOptionUpdate::Filter {
                flag: FilterFlag::HideUnmonitored,
                value: true,
            })
            .unwrap();

        let reopened = TableOptionStore::open(&path).unwrap();
        assert_eq!(reopened.options(), store.options());

        let volumes = reopened.table::<VolumeIndex>();
        assert_eq!(volumes.sort_key(), Some(VolumeIndexColumn::Year));
        assert_eq!(volumes.sort_direction(), Some(SortDirection::Descending));
        assert_eq!(volumes.secondary_sort_key(), Some(VolumeIndexColumn::Title));
    }

    #[test]
    fn test_file_is_keyed_by_table_name() {
        let temp = TempDir::new().unwrap();
        let path = state_path(&temp);
        TableOptionStore::new(&path).save().unwrap();

        let value: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let object = value.as_object().unwrap();
        for name in TableName::ALL {
            assert!(object.contains_key(name.as_str()), "missing {}", name);
        }
        assert_eq!(object["volumeIndex"]["sortKey"], "title");
        assert_eq!(object["volumeIndex"]["sortDirection"], "ascending");
    }

    #[test]
    fn test_autosave_off_does_not_write() {
        let temp = TempDir::new().unwrap();
        let path = state_path(&temp);
        let mut store = TableOptionStore::new(&path).with_autosave(false);
        store.reset_table(TableName::QueueTable).unwrap();
        assert!(!path.exists());
        store.save().unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_invalid_entry_falls_back_per_table() {
        let content = r#"{
            "volumeIndex": { "sortKey": "bogus" },
            "queueTable": {
                "sortKey": "speed",
                "sortDirection": "descending",
                "secondarySortKey": null,
                "secondarySortDirection": null,
                "columns": [
                    { "name": "speed", "isVisible": true, "isModifiable": true, "isSortable": true }
                ]
            },
            "someRemovedTable": {}
        }"#;
        let options = parse_options(content, Path::new("state.json")).unwrap();

        assert_eq!(options.volume_index, VolumeIndex::defaults());
        let queue = &options.queue_table;
        assert_eq!(queue.sort_key(), Some(crate::core::QueueColumn::Speed));
        // Columns missing from the stored list are appended from defaults
        assert_eq!(queue.columns().len(), 10);
        assert_eq!(queue.columns()[0].name, crate::core::QueueColumn::Speed);
    }

    #[test]
    fn test_non_object_is_error() {
        let err = parse_options("[1, 2]", Path::new("state.json")).unwrap_err();
        assert!(matches!(err, KapoviewError::Persist { .. }));

        let err = parse_options("not json", Path::new("state.json")).unwrap_err();
        assert!(matches!(err, KapoviewError::Json(_)));
    }

    #[test]
    fn test_reset_all() {
        let temp = TempDir::new().unwrap();
        let path = state_path(&temp);
        let mut store = TableOptionStore::new(&path);
        store
            .set_sort_by_name(TableName::IssueTable, "title", None)
            .unwrap();
        store.reset_all().unwrap();

        let reopened = TableOptionStore::open(&path).unwrap();
        assert_eq!(reopened.options(), &TableOptions::default());
    }
}
