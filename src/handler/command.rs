//! CLI command execution
//!
//! Runs a parsed [`Command`] against the table option store or the
//! selection model and writes the result to `out`.

use std::io::{Read, Write};

use crate::app::{Command, Config, TableOptionStore};
use crate::core::{
    BulkSelection, ItemId, NamedUpdate, SelectState, SortDirection, TableName, TableSummary,
};
use crate::error::Result;

use super::script::parse_script;

/// Execute `config.command`
///
/// `input` is only read by `select`.
pub fn execute<R: Read, W: Write>(config: &Config, input: &mut R, out: &mut W) -> Result<()> {
    match &config.command {
        Command::Help | Command::Version => Ok(()),
        Command::Tables => {
            for name in TableName::ALL {
                writeln!(out, "{}", name)?;
            }
            Ok(())
        }
        Command::Show { table } => {
            let store = open_store(config)?;
            write_summary(out, &store.summary(*table), config.json)
        }
        Command::Sort {
            table,
            column,
            direction,
        } => {
            let mut store = open_store(config)?;
            let resolved = store.set_sort_by_name(*table, column, *direction)?;
            finish(config, &store, out, *table, || {
                format!("{} sorted by {} {}", table, column, resolved.as_str())
            })
        }
        Command::Column {
            table,
            column,
            visible,
        } => {
            let mut store = open_store(config)?;
            store.update_by_name(
                *table,
                NamedUpdate::ColumnVisibility {
                    column: column.clone(),
                    visible: *visible,
                },
            )?;
            finish(config, &store, out, *table, || {
                let state = if *visible { "shown" } else { "hidden" };
                format!("{} column {} {}", table, column, state)
            })
        }
        Command::Move {
            table,
            column,
            index,
        } => {
            let mut store = open_store(config)?;
            store.update_by_name(
                *table,
                NamedUpdate::MoveColumn {
                    column: column.clone(),
                    index: *index,
                },
            )?;
            finish(config, &store, out, *table, || {
                format!("{} column {} moved to {}", table, column, index)
            })
        }
        Command::Filter { table, flag, value } => {
            let mut store = open_store(config)?;
            store.update_by_name(
                *table,
                NamedUpdate::Filter {
                    flag: *flag,
                    value: *value,
                },
            )?;
            finish(config, &store, out, *table, || {
                format!("{} {} {}", table, flag.as_str(), on_off(*value))
            })
        }
        Command::FilterKey(filter) => {
            let table = TableName::VolumeIndex;
            let mut store = open_store(config)?;
            store.update_by_name(table, NamedUpdate::FilterKey(*filter))?;
            finish(config, &store, out, table, || {
                format!("{} filter key {}", table, filter.as_str())
            })
        }
        Command::PageSize(size) => {
            let table = TableName::VolumeIndex;
            let mut store = open_store(config)?;
            store.update_by_name(table, NamedUpdate::PageSize(*size))?;
            finish(config, &store, out, table, || {
                format!("{} page size {}", table, size)
            })
        }
        Command::Reset(Some(table)) => {
            let mut store = open_store(config)?;
            store.reset_table(*table)?;
            finish(config, &store, out, *table, || format!("{} reset", table))
        }
        Command::Reset(None) => {
            let mut store = open_store(config)?;
            store.reset_all()?;
            writeln!(out, "all tables reset")?;
            Ok(())
        }
        Command::Select => {
            let mut script = String::new();
            input.read_to_string(&mut script)?;
            run_select(config, &script, out)
        }
    }
}

fn open_store(config: &Config) -> Result<TableOptionStore> {
    let store = TableOptionStore::open(&config.state_file)?.with_autosave(config.autosave);
    if !config.autosave {
        log::info!("autosave is off; changes will not be written");
    }
    Ok(store)
}

/// Report a successful change: the table summary with `--json`, else one line
fn finish<W: Write>(
    config: &Config,
    store: &TableOptionStore,
    out: &mut W,
    table: TableName,
    message: impl FnOnce() -> String,
) -> Result<()> {
    if config.json {
        write_summary(out, &store.summary(table), true)
    } else {
        writeln!(out, "{}", message())?;
        Ok(())
    }
}

fn run_select<W: Write>(config: &Config, script: &str, out: &mut W) -> Result<()> {
    let script = parse_script(script)?;
    let mut state = SelectState::<ItemId>::with_range_fallback(config.range_fallback);
    for action in script.actions {
        state.apply(action);
    }

    let bulk = BulkSelection::from_state(&state, &script.items);
    if config.json {
        writeln!(out, "{}", serde_json::to_string(&bulk)?)?;
    } else {
        for id in &bulk.ids {
            writeln!(out, "{}", id)?;
        }
    }
    log::debug!(
        "selection: {} selected, checkbox {:?}",
        state.selected_count(),
        state.checkbox_value()
    );
    Ok(())
}

fn write_summary<W: Write>(out: &mut W, summary: &TableSummary, json: bool) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(summary)?)?;
        return Ok(());
    }

    writeln!(out, "{}", summary.table)?;
    writeln!(
        out,
        "  sort: {}",
        describe_sort(summary.sort_key, summary.sort_direction)
    )?;
    writeln!(
        out,
        "  secondary sort: {}",
        describe_sort(summary.secondary_sort_key, summary.secondary_sort_direction)
    )?;

    writeln!(out, "  columns:")?;
    let width = summary
        .columns
        .iter()
        .map(|c| c.name.len())
        .max()
        .unwrap_or(0);
    for column in &summary.columns {
        let mut traits = vec![if column.is_visible { "visible" } else { "hidden" }];
        if !column.is_modifiable {
            traits.push("locked");
        }
        if !column.is_sortable {
            traits.push("unsortable");
        }
        if let Some(direction) = column.fixed_sort_direction {
            traits.push(match direction {
                SortDirection::Ascending => "always ascending",
                SortDirection::Descending => "always descending",
            });
        }
        writeln!(
            out,
            "    {:<width$}  {}",
            column.name,
            traits.join(", "),
            width = width
        )?;
    }

    if !summary.filters.is_empty() {
        writeln!(out, "  filters:")?;
        for (flag, value) in &summary.filters {
            writeln!(out, "    {} {}", flag.as_str(), on_off(*value))?;
        }
    }
    if let Some(filter_key) = summary.filter_key {
        writeln!(out, "  filter key: {}", filter_key.as_str())?;
    }
    if let Some(page_size) = summary.page_size {
        writeln!(out, "  page size: {}", page_size)?;
    }
    Ok(())
}

fn describe_sort(key: Option<&str>, direction: Option<SortDirection>) -> String {
    match key {
        Some(key) => format!("{} {}", key, direction.unwrap_or_default().as_str()),
        None => "none".to_string(),
    }
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}
