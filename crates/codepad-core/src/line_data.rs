//! Per-line metadata.
//!
//! A [`LineData`] record can be attached to any logical line of a
//! [`Document`](crate::Document). It carries an opaque host payload, an optional background
//! color and a set of tags, which lets hosts treat the editor like a list of addressable items
//! (e.g. a log viewer that maps lines back to records).

use crate::theme::Color;
use std::collections::{BTreeMap, BTreeSet};

/// Metadata attached to a single line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineData {
    /// Host-defined payload (plain text or JSON; the core never interprets it).
    pub payload: Option<String>,
    /// Optional background color for the line.
    pub bg_color: Option<Color>,
    /// Free-form tags.
    pub tags: BTreeSet<String>,
}

impl LineData {
    /// Create a record with a payload and optional background color.
    pub fn new(payload: Option<String>, bg_color: Option<Color>) -> Self {
        Self {
            payload,
            bg_color,
            tags: BTreeSet::new(),
        }
    }

    /// Add a tag.
    pub fn add_tag(&mut self, tag: impl Into<String>) {
        self.tags.insert(tag.into());
    }

    /// Remove a tag (no-op if absent).
    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.remove(tag);
    }

    /// Returns `true` if the tag is present.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

/// Keep line-keyed entries on their lines after an edit that started on `start_line`, removed
/// `removed` line breaks and inserted `inserted` ones.
///
/// Entries of lines merged away by the edit are dropped.
pub(crate) fn shift_lines<V>(
    lines: &mut BTreeMap<usize, V>,
    start_line: usize,
    removed: usize,
    inserted: usize,
) {
    if removed == 0 && inserted == 0 {
        return;
    }
    let tail = lines.split_off(&(start_line + 1));
    for (line, value) in tail {
        if line <= start_line + removed {
            continue;
        }
        lines.insert(line - removed + inserted, value);
    }
}
