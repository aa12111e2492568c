//! Two-option poll tally.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteChoice {
    Yes,
    No,
}

impl VoteChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteChoice::Yes => "yes",
            VoteChoice::No => "no",
        }
    }
}

impl fmt::Display for VoteChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a raw choice is neither `yes` nor `no`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid vote choice: {0:?}")]
pub struct InvalidChoice(pub String);

impl FromStr for VoteChoice {
    type Err = InvalidChoice;

    /// Exact, case-sensitive match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yes" => Ok(VoteChoice::Yes),
            "no" => Ok(VoteChoice::No),
            other => Err(InvalidChoice(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteOutcome {
    Recorded(VoteChoice),
    /// Unknown choice; neither counter changed.
    Ignored(String),
}

/// Derived percentages. Each side is rounded on its own, so the two do not
/// always add up to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollSummary {
    pub pct_yes: u32,
    pub pct_no: u32,
    pub total: u64,
}

pub fn vote(state: &mut AppState, choice: VoteChoice) {
    match choice {
        VoteChoice::Yes => state.poll_yes = state.poll_yes.saturating_add(1),
        VoteChoice::No => state.poll_no = state.poll_no.saturating_add(1),
    }
}

/// Vote from an untrusted string; invalid choices are ignored.
pub fn vote_raw(state: &mut AppState, raw: &str) -> VoteOutcome {
    match raw.parse::<VoteChoice>() {
        Ok(choice) => {
            vote(state, choice);
            VoteOutcome::Recorded(choice)
        }
        Err(InvalidChoice(raw)) => {
            tracing::debug!(choice = %raw, "ignoring invalid vote choice");
            VoteOutcome::Ignored(raw)
        }
    }
}

pub fn reset(state: &mut AppState) {
    state.poll_yes = 0;
    state.poll_no = 0;
}

pub fn percentages(state: &AppState) -> PollSummary {
    let yes = u64::from(state.poll_yes);
    let no = u64::from(state.poll_no);
    let total = yes + no;

    if total == 0 {
        return PollSummary {
            pct_yes: 0,
            pct_no: 0,
            total,
        };
    }

    let pct = |count: u64| ((count as f64 / total as f64) * 100.0).round() as u32;
    PollSummary {
        pct_yes: pct(yes),
        pct_no: pct(no),
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tally(yes: u32, no: u32) -> AppState {
        AppState {
            poll_yes: yes,
            poll_no: no,
            ..AppState::default()
        }
    }

    #[test]
    fn parse_choice_is_exact() {
        assert_eq!("yes".parse::<VoteChoice>(), Ok(VoteChoice::Yes));
        assert_eq!("no".parse::<VoteChoice>(), Ok(VoteChoice::No));
        assert!("Yes".parse::<VoteChoice>().is_err());
        assert!(" no".parse::<VoteChoice>().is_err());
        assert_eq!(VoteChoice::Yes.to_string(), "yes");
    }

    #[test]
    fn invalid_choice_is_ignored() {
        let mut state = tally(2, 3);
        assert_eq!(
            vote_raw(&mut state, "maybe"),
            VoteOutcome::Ignored("maybe".to_string())
        );
        assert_eq!((state.poll_yes, state.poll_no), (2, 3));
    }

    #[test]
    fn vote_increments_matching_counter() {
        let mut state = AppState::default();
        assert_eq!(vote_raw(&mut state, "yes"), VoteOutcome::Recorded(VoteChoice::Yes));
        vote(&mut state, VoteChoice::No);
        vote(&mut state, VoteChoice::No);
        assert_eq!((state.poll_yes, state.poll_no), (1, 2));
    }

    #[test]
    fn reset_zeroes_both() {
        let mut state = tally(5, 8);
        reset(&mut state);
        assert_eq!((state.poll_yes, state.poll_no), (0, 0));
    }

    #[test]
    fn percentages_of_empty_poll() {
        assert_eq!(
            percentages(&tally(0, 0)),
            PollSummary {
                pct_yes: 0,
                pct_no: 0,
                total: 0
            }
        );
    }

    #[test]
    fn percentages_round_each_side() {
        let summary = percentages(&tally(1, 2));
        assert_eq!((summary.pct_yes, summary.pct_no, summary.total), (33, 67, 3));

        // 1/8 = 12.5% rounds up, 7/8 = 87.5% rounds up: 101 in total.
        let summary = percentages(&tally(1, 7));
        assert_eq!((summary.pct_yes, summary.pct_no), (13, 88));
    }

    #[test]
    fn percentages_one_sided() {
        let summary = percentages(&tally(0, 4));
        assert_eq!((summary.pct_yes, summary.pct_no), (0, 100));
    }

    #[test]
    fn total_does_not_overflow() {
        let summary = percentages(&tally(u32::MAX, u32::MAX));
        assert_eq!(summary.total, 2 * u64::from(u32::MAX));
        assert_eq!((summary.pct_yes, summary.pct_no), (50, 50));
    }

    proptest! {
        #[test]
        fn counts_are_order_independent(votes in proptest::collection::vec(any::<bool>(), 0..200)) {
            let mut state = AppState::default();
            for &is_yes in &votes {
                vote(&mut state, if is_yes { VoteChoice::Yes } else { VoteChoice::No });
            }
            let n = votes.iter().filter(|v| **v).count() as u32;
            let m = votes.len() as u32 - n;
            prop_assert_eq!((state.poll_yes, state.poll_no), (n, m));

            reset(&mut state);
            prop_assert_eq!((state.poll_yes, state.poll_no), (0, 0));
        }

        #[test]
        fn percentages_stay_in_bounds(yes in 0u32..100_000, no in 0u32..100_000) {
            let summary = percentages(&tally(yes, no));
            prop_assert!(summary.pct_yes <= 100);
            prop_assert!(summary.pct_no <= 100);
            if summary.total > 0 {
                let sum = summary.pct_yes + summary.pct_no;
                prop_assert!((99..=101).contains(&sum));
            }
        }
    }
}
