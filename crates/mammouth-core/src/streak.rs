//! Daily GM check-in streak.
//!
//! A check-in either starts the streak, is ignored because one already
//! happened on the same calendar day, continues the streak from the
//! previous day, or resets it to 1 after a skipped day.
//!
//! Calendar days are taken in the time zone of the `now` instant passed to
//! [`StreakEngine::check_in`], so callers decide what "local" means
//! (`chrono::Local` in the CLI, fixed offsets in tests).

use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Result of a single check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckInOutcome {
    /// No previous check-in; streak starts at 1.
    First,
    /// Same calendar day as the previous check-in; nothing changes.
    AlreadyCheckedIn,
    /// Previous check-in was yesterday; streak + 1.
    Continued,
    /// Gap too large; streak back to 1.
    Reset,
}

impl CheckInOutcome {
    /// Whether the state was modified.
    pub fn is_mutation(&self) -> bool {
        !matches!(self, CheckInOutcome::AlreadyCheckedIn)
    }

    /// Event-log wording.
    pub fn message(&self) -> &'static str {
        match self {
            CheckInOutcome::First => "First GM sent. Streak = 1",
            CheckInOutcome::AlreadyCheckedIn => "You already said GM today.",
            CheckInOutcome::Continued => "New consecutive day, streak +1",
            CheckInOutcome::Reset => "Streak lost, back to 1",
        }
    }
}

/// Check-in rules.
#[derive(Debug, Clone)]
pub struct StreakEngine {
    /// Upper bound of the elapsed time for a "yesterday" check-in.
    yesterday_window: Duration,
}

impl StreakEngine {
    pub fn new() -> Self {
        Self {
            yesterday_window: Duration::hours(36),
        }
    }

    pub fn with_window(yesterday_window: Duration) -> Self {
        Self { yesterday_window }
    }

    pub fn yesterday_window(&self) -> Duration {
        self.yesterday_window
    }

    /// Decide what a check-in at `now` does, without mutating anything.
    pub fn classify<Tz: TimeZone>(
        &self,
        last: Option<&DateTime<Utc>>,
        now: &DateTime<Tz>,
    ) -> CheckInOutcome {
        let Some(last) = last else {
            return CheckInOutcome::First;
        };
        let last = last.with_timezone(&now.timezone());

        if same_day(&last, now) {
            CheckInOutcome::AlreadyCheckedIn
        } else if self.is_yesterday(&last, now) {
            CheckInOutcome::Continued
        } else {
            CheckInOutcome::Reset
        }
    }

    /// Apply a check-in at `now` to `state`.
    pub fn check_in<Tz: TimeZone>(&self, state: &mut AppState, now: &DateTime<Tz>) -> CheckInOutcome {
        let outcome = self.classify(state.last_gm_date.as_ref(), now);

        match outcome {
            CheckInOutcome::First | CheckInOutcome::Reset => state.gm_streak = 1,
            CheckInOutcome::Continued => state.gm_streak = state.gm_streak.saturating_add(1),
            CheckInOutcome::AlreadyCheckedIn => {}
        }
        if outcome.is_mutation() {
            state.last_gm_date = Some(now.with_timezone(&Utc));
        }

        tracing::debug!(?outcome, streak = state.gm_streak, "check-in evaluated");
        outcome
    }

    /// True when the last check-in falls on the calendar day of `now`.
    pub fn checked_in_today<Tz: TimeZone>(&self, state: &AppState, now: &DateTime<Tz>) -> bool {
        state
            .last_gm_date
            .as_ref()
            .is_some_and(|last| same_day(&last.with_timezone(&now.timezone()), now))
    }

    /// `last` counts as yesterday of `now` when the gap is positive, within
    /// the window, and the day-of-month differs.
    ///
    /// Only the day-of-month is compared, not the full date, so a late
    /// check-in followed by one just after midnight two days later still
    /// lands inside the window and counts as consecutive.
    fn is_yesterday<Tz: TimeZone>(&self, last: &DateTime<Tz>, now: &DateTime<Tz>) -> bool {
        let gap = now.clone().signed_duration_since(last.clone());
        gap > Duration::zero() && gap <= self.yesterday_window && last.day() != now.day()
    }
}

impl Default for StreakEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Same local year, month and day-of-month.
pub fn same_day<Tz: TimeZone>(a: &DateTime<Tz>, b: &DateTime<Tz>) -> bool {
    a.year() == b.year() && a.month() == b.month() && a.day() == b.day()
}
