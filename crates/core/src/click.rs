//! Click counter outcomes.
//!
//! A click is reported as successful even when the store refused the write.
//! The caller (usually a download redirect) must never be blocked on the
//! counter, so a rejected write degrades to a best-effort count instead of an
//! error. [`ClickOutcome`] keeps the two cases apart so the difference stays
//! visible in responses and logs.

/// Note attached to responses whose count was not durably stored.
pub const BEST_EFFORT_NOTE: &str = "Click recorded locally";

/// Result of a click increment on an existing item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The store applied the increment; `click_count` is the stored value.
    Recorded { click_count: i64 },
    /// The write failed; `click_count` is the last read value plus one.
    BestEffort { click_count: i64 },
}

impl ClickOutcome {
    /// Build the fallback outcome from the count read after a failed write.
    pub fn best_effort_from(current: i64) -> Self {
        ClickOutcome::BestEffort {
            click_count: current.max(0).saturating_add(1),
        }
    }

    pub fn click_count(&self) -> i64 {
        match *self {
            ClickOutcome::Recorded { click_count } | ClickOutcome::BestEffort { click_count } => {
                click_count
            }
        }
    }

    pub fn is_recorded(&self) -> bool {
        matches!(self, ClickOutcome::Recorded { .. })
    }

    /// Human-readable note for responses, present only for best-effort counts.
    pub fn note(&self) -> Option<&'static str> {
        match self {
            ClickOutcome::Recorded { .. } => None,
            ClickOutcome::BestEffort { .. } => Some(BEST_EFFORT_NOTE),
        }
    }
}
