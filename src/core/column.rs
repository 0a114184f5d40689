//! Column descriptors and per-table column name sets

use std::fmt;
use std::hash::Hash;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::sort::SortDirection;

/// A closed set of column names belonging to one table
pub trait ColumnKey:
    Copy + Eq + Hash + Ord + fmt::Debug + Serialize + DeserializeOwned + 'static
{
    /// Every column name, in declaration order
    const ALL: &'static [Self];

    /// Name as used in persisted state and on the command line
    fn as_str(&self) -> &'static str;

    fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == s)
    }
}

/// Declare a column name enum with its wire names
#[macro_export]
macro_rules! column_names {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        $vis enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $crate::core::column::ColumnKey for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::core::column::ColumnKey::as_str(self))
            }
        }
    };
}

/// Icon shown in place of a header label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnIcon {
    pub name: String,
    pub title: String,
}

/// One column of a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column<C> {
    pub name: C,
    pub is_visible: bool,
    /// Whether the user may toggle visibility or move the column
    pub is_modifiable: bool,
    pub is_sortable: bool,
    /// Forces this direction whenever the column becomes the sort key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_sort_direction: Option<SortDirection>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub hide_header_label: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<ColumnIcon>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl<C> Column<C> {
    /// Visible, modifiable, sortable column
    pub fn new(name: C) -> Self {
        Self {
            name,
            is_visible: true,
            is_modifiable: true,
            is_sortable: true,
            fixed_sort_direction: None,
            hide_header_label: false,
            width: None,
            icon: None,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.is_visible = false;
        self
    }

    pub fn locked(mut self) -> Self {
        self.is_modifiable = false;
        self
    }

    pub fn unsortable(mut self) -> Self {
        self.is_sortable = false;
        self
    }

    pub fn without_label(mut self) -> Self {
        self.hide_header_label = true;
        self
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn fixed_direction(mut self, direction: SortDirection) -> Self {
        self.fixed_sort_direction = Some(direction);
        self
    }

    pub fn icon(mut self, name: &str, title: &str) -> Self {
        self.icon = Some(ColumnIcon {
            name: name.to_string(),
            title: title.to_string(),
        });
        self
    }
}
