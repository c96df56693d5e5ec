//! Day-set codec
//!
//! Weekday indices follow the backend numbering: 0 = Sunday ... 6 = Saturday.
//! The wire form is a comma-delimited string of digits ("1,3,5"); legacy
//! single-day records carry one integer instead.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use thiserror::Error;
use tracing::debug;

pub const DAYS_IN_WEEK: usize = 7;

/// Monday-first column order used by the schedule screens, Sunday last
pub const DISPLAY_ORDER: [u8; DAYS_IN_WEEK] = [1, 2, 3, 4, 5, 6, 0];

/// Separator between weekday labels in a formatted day-set
pub const DAY_SEPARATOR: &str = " / ";

/// A day token that could not be turned into a weekday index.
///
/// Never surfaced to callers of [`DaySet::decode`]: bad tokens are dropped.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DayTokenError {
    #[error("Malformed day token: {token:?}")]
    Malformed { token: String },

    #[error("Day index out of range: {value}")]
    OutOfRange { value: i64 },
}

/// Parse a single day token ("3", " 5 ") into a weekday index
pub fn parse_day_token(token: &str) -> Result<u8, DayTokenError> {
    let token = token.trim();
    let value: i64 = token.parse().map_err(|_| DayTokenError::Malformed {
        token: token.to_string(),
    })?;
    day_index(value)
}

fn day_index(value: i64) -> Result<u8, DayTokenError> {
    u8::try_from(value)
        .ok()
        .filter(|day| usize::from(*day) < DAYS_IN_WEEK)
        .ok_or(DayTokenError::OutOfRange { value })
}

/// How weekday names are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayNameStyle {
    #[default]
    Full,
    Short,
}

/// Get the display name of a weekday index
pub fn day_name(day: u8, style: DayNameStyle) -> &'static str {
    match (day, style) {
        (0, DayNameStyle::Full) => "Sunday",
        (1, DayNameStyle::Full) => "Monday",
        (2, DayNameStyle::Full) => "Tuesday",
        (3, DayNameStyle::Full) => "Wednesday",
        (4, DayNameStyle::Full) => "Thursday",
        (5, DayNameStyle::Full) => "Friday",
        (6, DayNameStyle::Full) => "Saturday",
        (0, DayNameStyle::Short) => "Sun",
        (1, DayNameStyle::Short) => "Mon",
        (2, DayNameStyle::Short) => "Tue",
        (3, DayNameStyle::Short) => "Wed",
        (4, DayNameStyle::Short) => "Thu",
        (5, DayNameStyle::Short) => "Fri",
        (6, DayNameStyle::Short) => "Sat",
        (_, DayNameStyle::Full) => "Unknown",
        (_, DayNameStyle::Short) => "?",
    }
}

/// The set of weekdays a schedule recurs on.
///
/// Iteration follows the order days were first inserted, which is what
/// [`DaySet::format`] renders. Equality and hashing only look at membership,
/// so `{3,1}` equals `{1,3}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<u8>", into = "Vec<u8>")]
pub struct DaySet {
    days: Vec<u8>,
}

impl DaySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the wire representation of an entry's weekdays.
    ///
    /// `days_of_week` wins when present and non-empty; otherwise the legacy
    /// `day_of_week` integer yields a singleton; otherwise the set is empty.
    pub fn decode(days_of_week: Option<&str>, day_of_week: Option<i64>) -> Self {
        match (days_of_week.filter(|s| !s.is_empty()), day_of_week) {
            (Some(text), _) => Self::parse(text),
            (None, Some(day)) => Self::from_tokens([day.to_string()]),
            (None, None) => Self::new(),
        }
    }

    /// Parse a comma-delimited day string, dropping tokens that are not weekday indices
    pub fn parse(text: &str) -> Self {
        Self::from_tokens(text.split(','))
    }

    /// Build a set from individual day tokens, dropping bad ones
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for token in tokens {
            match parse_day_token(token.as_ref()) {
                Ok(day) => {
                    set.insert(day);
                }
                Err(e) => debug!("Dropping day token: {}", e),
            }
        }
        set
    }

    /// Serialize to the wire form: sorted, de-duplicated, comma-joined
    pub fn encode(&self) -> String {
        self.sorted()
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Render weekday names in iteration order, joined by " / "
    pub fn format(&self, style: DayNameStyle) -> String {
        self.days
            .iter()
            .map(|&d| day_name(d, style))
            .collect::<Vec<_>>()
            .join(DAY_SEPARATOR)
    }

    /// Add a day. Returns false if it was already present or is not a weekday index.
    pub fn insert(&mut self, day: u8) -> bool {
        if usize::from(day) >= DAYS_IN_WEEK || self.contains(day) {
            return false;
        }
        self.days.push(day);
        true
    }

    /// Remove a day. Returns false if it was not present.
    pub fn remove(&mut self, day: u8) -> bool {
        let before = self.days.len();
        self.days.retain(|&d| d != day);
        self.days.len() != before
    }

    pub fn contains(&self, day: u8) -> bool {
        self.days.contains(&day)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Days in insertion order
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.days.iter().copied()
    }

    /// Days in calendar order (Sunday first)
    pub fn sorted(&self) -> Vec<u8> {
        let mut days = self.days.clone();
        days.sort_unstable();
        days
    }

    fn mask(&self) -> u8 {
        self.days.iter().fold(0u8, |mask, &d| mask | (1u8 << d))
    }
}

impl PartialEq for DaySet {
    fn eq(&self, other: &Self) -> bool {
        self.mask() == other.mask()
    }
}

impl Eq for DaySet {}

impl Hash for DaySet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.mask().hash(state);
    }
}

impl FromIterator<u8> for DaySet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = Self::new();
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl From<Vec<u8>> for DaySet {
    fn from(days: Vec<u8>) -> Self {
        days.into_iter().collect()
    }
}

impl From<DaySet> for Vec<u8> {
    fn from(set: DaySet) -> Self {
        set.days
    }
}

/// Days as clients send them: the delimited wire string or a list of indices
#[derive(Deserialize)]
#[serde(untagged)]
enum DaysInput {
    Text(String),
    List(Vec<i64>),
}

/// Deserialize either `"1,3"` or `[1, 3]`, dropping bad days like [`DaySet::parse`]
pub fn deserialize_days<'de, D>(deserializer: D) -> Result<DaySet, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match DaysInput::deserialize(deserializer)? {
        DaysInput::Text(text) => DaySet::parse(&text),
        DaysInput::List(days) => DaySet::from_tokens(days.iter().map(|d| d.to_string())),
    })
}

impl fmt::Display for DaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_multi_day_string() {
        let set = DaySet::decode(Some("1, 3,5"), None);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![1, 3, 5]);
    }

    #[test]
    fn test_decode_drops_malformed_tokens() {
        let set = DaySet::decode(Some("1,x,,3, wed ,9,-1"), None);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_decode_prefers_multi_day_field() {
        let set = DaySet::decode(Some("2,4"), Some(6));
        assert_eq!(set, DaySet::parse("2,4"));
    }

    #[test]
    fn test_decode_legacy_single_day() {
        assert_eq!(DaySet::decode(None, Some(0)), DaySet::parse("0"));
        assert_eq!(DaySet::decode(Some(""), Some(4)), DaySet::parse("4"));
        assert!(DaySet::decode(None, Some(7)).is_empty());
    }

    #[test]
    fn test_decode_absent_is_empty() {
        assert!(DaySet::decode(None, None).is_empty());
    }

    #[test]
    fn test_encode_sorts_and_dedups() {
        let set = DaySet::parse("5,1,3,1");
        assert_eq!(set.encode(), "1,3,5");
        assert_eq!(DaySet::new().encode(), "");
    }

    #[test]
    fn test_round_trip_every_subset() {
        for mask in 0u8..128 {
            let set: DaySet = (0u8..7).filter(|&d| mask & (1u8 << d) != 0).collect();
            assert_eq!(DaySet::parse(&set.encode()), set, "mask {:07b}", mask);
        }
    }

    #[test]
    fn test_equality_ignores_order() {
        assert_eq!(DaySet::parse("3,1"), DaySet::parse("1,3"));
        assert_ne!(DaySet::parse("1,3"), DaySet::parse("1,3,5"));
    }

    #[test]
    fn test_format_keeps_iteration_order() {
        let set = DaySet::parse("3,1");
        assert_eq!(set.format(DayNameStyle::Full), "Wednesday / Monday");
        assert_eq!(set.format(DayNameStyle::Short), "Wed / Mon");
    }

    #[test]
    fn test_insert_and_remove() {
        let mut set = DaySet::new();
        assert!(set.insert(2));
        assert!(!set.insert(2));
        assert!(!set.insert(7));
        assert!(set.remove(2));
        assert!(!set.remove(2));
        assert!(set.is_empty());
    }

    #[test]
    fn test_parse_day_token_errors() {
        assert_eq!(
            parse_day_token("mon"),
            Err(DayTokenError::Malformed {
                token: "mon".to_string()
            })
        );
        assert_eq!(
            parse_day_token("12"),
            Err(DayTokenError::OutOfRange { value: 12 })
        );
        assert_eq!(parse_day_token(" 6 "), Ok(6));
    }

    #[derive(Debug, Deserialize)]
    struct Form {
        #[serde(deserialize_with = "deserialize_days")]
        days: DaySet,
    }

    #[test]
    fn test_deserialize_days_accepts_both_forms() {
        let text: Form = serde_json::from_str(r#"{"days": "3,1,x"}"#).unwrap();
        assert_eq!(text.days.iter().collect::<Vec<_>>(), vec![3, 1]);

        let list: Form = serde_json::from_str(r#"{"days": [5, -1, 9, 2]}"#).unwrap();
        assert_eq!(list.days.iter().collect::<Vec<_>>(), vec![5, 2]);

        let empty: Form = serde_json::from_str(r#"{"days": ""}"#).unwrap();
        assert!(empty.days.is_empty());
    }

    #[test]
    fn test_serde_as_list() {
        let set: DaySet = serde_json::from_str("[5, 1, 9]").unwrap();
        assert_eq!(serde_json::to_string(&set).unwrap(), "[5,1]");
    }
}
