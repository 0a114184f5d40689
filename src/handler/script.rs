//! Selection gesture scripts
//!
//! One gesture per line, replayed against a [`SelectState`]:
//!
//! ```text
//! items 1 2 3 4     # current items, in display order
//! toggle 2          # click
//! toggle 3 off      # click with an explicit value
//! shift 4           # shift-click
//! all | none | remove 3 | reset
//! ```
//!
//! [`SelectState`]: crate::core::SelectState

use crate::core::{ItemId, SelectAction};
use crate::error::{KapoviewError, Result};

/// A parsed script: the gestures in order, and the item list left at the end
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectScript {
    pub actions: Vec<SelectAction<ItemId>>,
    pub items: Vec<ItemId>,
}

/// Parse a gesture script
///
/// Every gesture that needs the item order carries the item list declared
/// by the most recent `items` line. `remove` also takes the id out of that
/// list.
pub fn parse_script(input: &str) -> Result<SelectScript> {
    let mut script = SelectScript::default();

    for (index, raw) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = match raw.find('#') {
            Some(pos) => &raw[..pos],
            None => raw,
        };
        let mut words = line.split_whitespace();
        let Some(gesture) = words.next() else {
            continue;
        };
        let args: Vec<&str> = words.collect();

        let action = match gesture {
            "items" => {
                script.items = args.iter().map(|word| item_id(word)).collect();
                SelectAction::UpdateItems {
                    items: script.items.clone(),
                }
            }
            "toggle" | "shift" => {
                let (id, is_selected) = match args.as_slice() {
                    [id] => (item_id(id), None),
                    [id, value] => (item_id(id), Some(parse_value(line_no, value)?)),
                    _ => {
                        return Err(KapoviewError::script(
                            line_no,
                            format!("usage: {} <id> [on|off]", gesture),
                        ))
                    }
                };
                SelectAction::ToggleSelected {
                    id,
                    is_selected,
                    shift_key: gesture == "shift",
                    items: script.items.clone(),
                }
            }
            "all" => {
                no_args(line_no, gesture, &args)?;
                SelectAction::SelectAll {
                    items: script.items.clone(),
                }
            }
            "none" => {
                no_args(line_no, gesture, &args)?;
                SelectAction::UnselectAll {
                    items: script.items.clone(),
                }
            }
            "remove" => {
                let [id] = args.as_slice() else {
                    return Err(KapoviewError::script(line_no, "usage: remove <id>"));
                };
                let id = item_id(id);
                script.items.retain(|item| *item != id);
                SelectAction::RemoveItem { id }
            }
            "reset" => {
                no_args(line_no, gesture, &args)?;
                SelectAction::Reset
            }
            other => {
                return Err(KapoviewError::script(
                    line_no,
                    format!("unknown gesture '{}'", other),
                ))
            }
        };
        script.actions.push(action);
    }

    Ok(script)
}

fn item_id(word: &str) -> ItemId {
    let Ok(id) = word.parse::<ItemId>();
    id
}

fn parse_value(line_no: usize, word: &str) -> Result<bool> {
    match word {
        "on" => Ok(true),
        "off" => Ok(false),
        other => Err(KapoviewError::script(
            line_no,
            format!("expected 'on' or 'off', got '{}'", other),
        )),
    }
}

fn no_args(line_no: usize, gesture: &str, args: &[&str]) -> Result<()> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(KapoviewError::script(
            line_no,
            format!("'{}' takes no arguments", gesture),
        ))
    }
}
