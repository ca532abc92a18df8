//! Display model for the detail panel, derived from a catalog record.

use crate::catalog::SpaceshipRecord;

pub const BADGES: [&str; 2] = ["Nave Espacial", "Activa"];
/// Buttons on the panel. Pressing them has no effect beyond a debug log.
pub const ACTIONS: [&str; 2] = ["Explorar Nave", "Ver Planos"];

pub const DESCRIPTION_HEADING: &str = "Descripción";
pub const SPECS_HEADING: &str = "Especificaciones Técnicas";
pub const HISTORY_HEADING: &str = "Historia";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecRow {
    pub label: String,
    pub value: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub title: &'static str,
    pub badges: [&'static str; 2],
    pub description: &'static str,
    /// Same order as the record's specs.
    pub specs: Vec<SpecRow>,
    pub history: &'static str,
    pub actions: [&'static str; 2],
}

impl DetailView {
    pub fn from_record(record: &SpaceshipRecord) -> Self {
        Self {
            title: record.name,
            badges: BADGES,
            description: record.description,
            specs: record
                .specs
                .iter()
                .map(|s| SpecRow { label: humanize_label(s.key), value: s.value })
                .collect(),
            history: record.history,
            actions: ACTIONS,
        }
    }
}

/// Put a space before every ASCII uppercase letter, then trim: `"topSpeed"` -> `"top Speed"`.
pub fn humanize_label(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            out.push(' ');
        }
        out.push(ch);
    }
    out.trim().to_string()
}

/// Uppercase the first letter of each space-separated word.
pub fn capitalize_words(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if at_word_start {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        at_word_start = ch.is_whitespace();
    }
    out
}
