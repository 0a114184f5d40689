//! Multi-item selection model
//!
//! Tracks which rows of an ordered collection are selected. The current
//! item order is handed in by the list view on every transition that needs
//! it and is never stored here; only the per-id flags and the shift-click
//! anchor survive between calls.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a selectable row
///
/// Backend rows are keyed by integer ids; a few views (import proposals,
/// file previews) key rows by string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Int(i64),
    Str(String),
}

impl From<i64> for ItemId {
    fn from(id: i64) -> Self {
        ItemId::Int(id)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        ItemId::Str(id.to_string())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        ItemId::Str(id)
    }
}

impl FromStr for ItemId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<i64>() {
            Ok(n) => ItemId::Int(n),
            Err(_) => ItemId::Str(s.to_string()),
        })
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Int(n) => write!(f, "{}", n),
            ItemId::Str(s) => f.write_str(s),
        }
    }
}

/// Behavior of a shift-click whose anchor or target is missing from the items
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeFallback {
    /// Toggle only the clicked item and move the anchor to it
    #[default]
    Single,
    /// Leave the selection and the anchor untouched
    Ignore,
}

/// A selection transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectAction<K> {
    Reset,
    UpdateItems {
        items: Vec<K>,
    },
    SelectAll {
        items: Vec<K>,
    },
    UnselectAll {
        items: Vec<K>,
    },
    /// `is_selected: None` flips the item's current value
    ToggleSelected {
        id: K,
        is_selected: Option<bool>,
        shift_key: bool,
        items: Vec<K>,
    },
    RemoveItem {
        id: K,
    },
}

/// Selection state for one list view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectState<K: Eq + Hash> {
    selected_state: HashMap<K, bool>,
    last_toggled: Option<K>,
    all_selected: bool,
    all_unselected: bool,
    range_fallback: RangeFallback,
}

impl<K: Eq + Hash> Default for SelectState<K> {
    fn default() -> Self {
        Self {
            selected_state: HashMap::new(),
            last_toggled: None,
            all_selected: false,
            all_unselected: true,
            range_fallback: RangeFallback::default(),
        }
    }
}

impl<K> SelectState<K>
where
    K: Clone + Eq + Hash + fmt::Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty state with a non-default shift-click fallback
    pub fn with_range_fallback(range_fallback: RangeFallback) -> Self {
        Self {
            range_fallback,
            ..Self::default()
        }
    }

    pub fn range_fallback(&self) -> RangeFallback {
        self.range_fallback
    }

    /// Per-id selection flags
    pub fn selected_state(&self) -> &HashMap<K, bool> {
        &self.selected_state
    }

    /// Current shift-click anchor
    pub fn last_toggled(&self) -> Option<&K> {
        self.last_toggled.as_ref()
    }

    /// True when at least one item is tracked and every tracked item is selected
    pub fn all_selected(&self) -> bool {
        self.all_selected
    }

    /// True when no tracked item is selected
    pub fn all_unselected(&self) -> bool {
        self.all_unselected
    }

    /// Value for a tri-state "select all" checkbox; `None` means mixed
    pub fn checkbox_value(&self) -> Option<bool> {
        if self.all_selected {
            Some(true)
        } else if self.all_unselected {
            Some(false)
        } else {
            None
        }
    }

    pub fn is_selected(&self, id: &K) -> bool {
        self.selected_state.get(id).copied().unwrap_or(false)
    }

    pub fn selected_count(&self) -> usize {
        self.selected_state.values().filter(|v| **v).count()
    }

    /// Ids whose flag is set, in no particular order
    pub fn selected_ids(&self) -> Vec<K> {
        self.selected_state
            .iter()
            .filter(|(_, selected)| **selected)
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Ids whose flag is set, in the order of `items`
    pub fn selected_ids_in(&self, items: &[K]) -> Vec<K> {
        items
            .iter()
            .filter(|id| self.is_selected(id))
            .cloned()
            .collect()
    }

    /// Dispatch a transition
    pub fn apply(&mut self, action: SelectAction<K>) {
        match action {
            SelectAction::Reset => self.reset(),
            SelectAction::UpdateItems { items } => self.update_items(&items),
            SelectAction::SelectAll { items } => self.select_all(&items),
            SelectAction::UnselectAll { items } => self.unselect_all(&items),
            SelectAction::ToggleSelected {
                id,
                is_selected,
                shift_key,
                items,
            } => self.toggle_selected(id, is_selected, shift_key, &items),
            SelectAction::RemoveItem { id } => self.remove_item(&id),
        }
    }

    /// Forget every flag and the anchor
    pub fn reset(&mut self) {
        self.selected_state.clear();
        self.last_toggled = None;
        self.refresh_all_flags();
    }

    /// Reconcile the flags with a new item collection
    ///
    /// Ids that persist keep their flag, new ids start unselected and ids
    /// that disappeared are dropped. Calling it twice with the same items is
    /// the same as calling it once.
    pub fn update_items(&mut self, items: &[K]) {
        let mut next = HashMap::with_capacity(items.len());
        for id in items {
            let selected = self.is_selected(id);
            next.insert(id.clone(), selected);
        }
        let dropped = self.selected_state.len().saturating_sub(next.len());
        self.selected_state = next;

        if let Some(anchor) = &self.last_toggled {
            if !self.selected_state.contains_key(anchor) {
                self.last_toggled = None;
            }
        }

        if dropped > 0 {
            log::debug!("selection reconciled: {} stale id(s) dropped", dropped);
        }
        self.refresh_all_flags();
    }

    pub fn select_all(&mut self, items: &[K]) {
        self.set_all(items, true);
    }

    pub fn unselect_all(&mut self, items: &[K]) {
        self.set_all(items, false);
    }

    /// Toggle one item, or a range of items when `shift_key` is held
    ///
    /// The range runs from the previous anchor to `id`, inclusive and in
    /// either direction, and takes the value the clicked item receives. The
    /// clicked item always becomes the next anchor.
    pub fn toggle_selected(
        &mut self,
        id: K,
        is_selected: Option<bool>,
        shift_key: bool,
        items: &[K],
    ) {
        let value = is_selected.unwrap_or_else(|| !self.is_selected(&id));

        let anchor = if shift_key {
            self.last_toggled.clone().filter(|anchor| *anchor != id)
        } else {
            None
        };

        match anchor {
            None => {
                self.selected_state.insert(id.clone(), value);
            }
            Some(anchor) => {
                let anchor_index = items.iter().position(|item| *item == anchor);
                let target_index = items.iter().position(|item| *item == id);

                match (anchor_index, target_index) {
                    (Some(a), Some(b)) => {
                        let (lower, upper) = (a.min(b), a.max(b));
                        for item in &items[lower..=upper] {
                            self.selected_state.insert(item.clone(), value);
                        }
                    }
                    _ => match self.range_fallback {
                        RangeFallback::Single => {
                            self.selected_state.insert(id.clone(), value);
                        }
                        RangeFallback::Ignore => {
                            log::debug!(
                                "shift-select ignored: {:?} or {:?} not in current items",
                                anchor,
                                id
                            );
                            return;
                        }
                    },
                }
            }
        }

        self.last_toggled = Some(id);
        self.refresh_all_flags();
    }

    pub fn remove_item(&mut self, id: &K) {
        self.selected_state.remove(id);
        if self.last_toggled.as_ref() == Some(id) {
            self.last_toggled = None;
        }
        self.refresh_all_flags();
    }

    fn set_all(&mut self, items: &[K], value: bool) {
        self.selected_state = items.iter().map(|id| (id.clone(), value)).collect();
        self.last_toggled = None;
        self.refresh_all_flags();
    }

    fn refresh_all_flags(&mut self) {
        let any_selected = self.selected_state.values().any(|v| *v);
        let any_unselected = self.selected_state.values().any(|v| !*v);
        self.all_selected = !self.selected_state.is_empty() && !any_unselected;
        self.all_unselected = !any_selected;
    }
}

/// Body of a bulk-action request built from a selection snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkSelection<K> {
    pub ids: Vec<K>,
}

impl<K> BulkSelection<K>
where
    K: Clone + Eq + Hash + fmt::Debug,
{
    /// Snapshot the selected ids in item order
    pub fn from_state(state: &SelectState<K>, items: &[K]) -> Self {
        Self {
            ids: state.selected_ids_in(items),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
