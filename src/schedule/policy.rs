//! Day-count policy
//!
//! Each tenant decides how many distinct weekdays a schedule must occupy.
//! Selection is lenient while the user clicks (extra days are ignored) and
//! strict on submit (the count must match exactly).

use super::days::DaySet;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

/// Required number of weekdays per schedule, always within 1..=7
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DayCountPolicy(u8);

impl DayCountPolicy {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 7;

    pub fn new(days: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&days).then_some(Self(days))
    }

    /// Coerce a raw tenant setting. Absent, unparseable or out-of-range values give 1.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Self::default();
        };

        match raw.parse::<u8>().ok().and_then(Self::new) {
            Some(policy) => policy,
            None => {
                warn!("Invalid days-per-week setting {:?}, defaulting to 1", raw);
                Self::default()
            }
        }
    }

    pub fn required(&self) -> usize {
        usize::from(self.0)
    }
}

impl Default for DayCountPolicy {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

/// Why a day selection was rejected on submit
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select at least one day")]
    EmptySelection,

    #[error("Please select exactly {required} day(s) per week ({actual} selected)")]
    CountMismatch { required: usize, actual: usize },
}

/// Strict submit-time check of a day selection
pub fn validate(selected: &DaySet, policy: DayCountPolicy) -> Result<(), ValidationError> {
    if selected.is_empty() {
        return Err(ValidationError::EmptySelection);
    }
    if selected.len() != policy.required() {
        return Err(ValidationError::CountMismatch {
            required: policy.required(),
            actual: selected.len(),
        });
    }
    Ok(())
}

/// Interactive toggle of one day.
///
/// Removing a selected day always works. Adding only works while fewer than
/// the required number of days are selected; past the cap the click is ignored.
pub fn toggle(current: &DaySet, day: u8, policy: DayCountPolicy) -> DaySet {
    let mut next = current.clone();
    if !next.remove(day) && next.len() < policy.required() {
        next.insert(day);
    }
    next
}

/// Day picker state for one create/edit form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySelector {
    policy: DayCountPolicy,
    selected: DaySet,
    locked: bool,
}

impl DaySelector {
    /// Picker for a new schedule
    pub fn create(policy: DayCountPolicy) -> Self {
        Self {
            policy,
            selected: DaySet::new(),
            locked: false,
        }
    }

    /// Picker for a new schedule with some days already chosen.
    ///
    /// The selection is taken as-is, even past the cap, so submit can judge it.
    pub fn restore(policy: DayCountPolicy, selected: DaySet) -> Self {
        Self {
            policy,
            selected,
            locked: false,
        }
    }

    /// Picker for an existing schedule.
    ///
    /// Without `allow_day_edit` the existing days are frozen and exempt from the policy.
    pub fn edit(policy: DayCountPolicy, existing: DaySet, allow_day_edit: bool) -> Self {
        Self {
            policy,
            selected: existing,
            locked: !allow_day_edit,
        }
    }

    /// Toggle a day. Returns true if the selection changed.
    pub fn toggle(&mut self, day: u8) -> bool {
        if self.locked {
            return false;
        }
        let next = toggle(&self.selected, day, self.policy);
        let changed = next != self.selected;
        self.selected = next;
        changed
    }

    /// True while another day may be added
    pub fn can_add(&self) -> bool {
        !self.locked && self.selected.len() < self.policy.required()
    }

    /// Days still needed to satisfy the policy
    pub fn remaining(&self) -> usize {
        self.policy.required().saturating_sub(self.selected.len())
    }

    /// Final check before the schedule is saved
    pub fn submit(&self) -> Result<&DaySet, ValidationError> {
        if !self.locked {
            validate(&self.selected, self.policy)?;
        }
        Ok(&self.selected)
    }

    pub fn selected(&self) -> &DaySet {
        &self.selected
    }

    pub fn into_selected(self) -> DaySet {
        self.selected
    }

    pub fn policy(&self) -> DayCountPolicy {
        self.policy
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }
}
