//! Course color assignment
//!
//! Colors are handed out in the order courses are first seen in the input,
//! cycling through the palette. The same input order always gives the same
//! colors; reordering the input can move colors between courses.

use super::entry::ScheduleEntry;
use serde::Serialize;
use std::collections::HashMap;

/// Palette used when the configuration doesn't provide one
pub const DEFAULT_PALETTE: [&str; 8] = [
    "#3b82f6", // blue
    "#10b981", // green
    "#8b5cf6", // purple
    "#f59e0b", // amber
    "#ef4444", // red
    "#ec4899", // pink
    "#6366f1", // indigo
    "#14b8a6", // teal
];

pub fn default_palette() -> Vec<String> {
    DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect()
}

/// Course id to color for one rendering of a schedule listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CourseColors {
    colors: HashMap<String, String>,
}

impl CourseColors {
    /// Assign colors in first-seen order. An empty palette assigns nothing.
    pub fn assign<'a, I, S>(entries: I, palette: &[S]) -> Self
    where
        I: IntoIterator<Item = &'a ScheduleEntry>,
        S: AsRef<str>,
    {
        let mut colors = HashMap::new();
        if palette.is_empty() {
            return Self { colors };
        }

        for entry in entries {
            if colors.contains_key(&entry.course_id) {
                continue;
            }
            let color = palette[colors.len() % palette.len()].as_ref().to_string();
            colors.insert(entry.course_id.clone(), color);
        }

        Self { colors }
    }

    pub fn get(&self, course_id: &str) -> Option<&str> {
        self.colors.get(course_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
