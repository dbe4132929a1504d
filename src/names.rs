//! Name list parsing.
//!
//! Turns pasted free text into ordered name lists and pool items.

use std::collections::HashSet;

use crate::state::pool::SelectableItem;

/// Characters that separate names in free text.
const NAME_DELIMITERS: [char; 5] = ['\n', ',', ';', '|', '\t'];

/// Split text on newlines, commas, semicolons, pipes or tabs.
///
/// Names are trimmed, empty entries dropped, and duplicates removed keeping
/// the first occurrence.
pub fn parse_names(input: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    input
        .split(|c: char| NAME_DELIMITERS.contains(&c))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(*s))
        .map(str::to_string)
        .collect()
}

/// Parse one item per line, `name|group`.
///
/// A missing or blank group means the item is drafted alone.
pub fn parse_items(input: &str) -> Vec<SelectableItem> {
    input
        .lines()
        .filter_map(|line| {
            let mut parts = line.split('|').map(str::trim);
            let name = parts.next().filter(|n| !n.is_empty())?;
            let group = parts.next().filter(|g| !g.is_empty());
            Some(match group {
                Some(group) => SelectableItem::grouped(name, group),
                None => SelectableItem::new(name),
            })
        })
        .collect()
}
