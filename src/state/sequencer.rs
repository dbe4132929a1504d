//! Snake-order turn sequencing.
//!
//! Turn order runs forward through the participant list, then backward,
//! then forward again. At each end of the list the boundary participant
//! picks twice in a row before the direction reverses:
//!
//! ```text
//! N = 3:  0 1 2 | 2 1 0 | 0 1 2 | ...
//!         round 1  round 2  round 3
//! ```
//!
//! A pending skip applies one extra step with the same rules, so a skip
//! that lands on a boundary flips direction and bumps the round again.

use std::fmt;

/// Direction of travel through the participant list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Reverse,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Reverse => "reverse",
        }
    }

    pub fn flipped(&self) -> Self {
        match self {
            Self::Forward => Self::Reverse,
            Self::Reverse => Self::Forward,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whose turn it is, which way the order is running, and the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnState {
    pub index: usize,
    pub direction: Direction,
    /// Current round (1-indexed)
    pub round: u32,
}

impl Default for TurnState {
    fn default() -> Self {
        Self::start()
    }
}

impl TurnState {
    /// First pick of the draft.
    pub fn start() -> Self {
        Self {
            index: 0,
            direction: Direction::Forward,
            round: 1,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "index": self.index,
            "direction": self.direction.as_str(),
            "round": self.round
        })
    }
}

/// Computes snake-order turns for a fixed number of participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnSequencer {
    participants: usize,
}

impl TurnSequencer {
    pub fn new(participants: usize) -> Self {
        Self { participants }
    }

    pub fn participants(&self) -> usize {
        self.participants
    }

    /// Advance one position, reversing at either end of the list.
    pub fn step(&self, state: TurnState) -> TurnState {
        if self.participants == 0 {
            return state;
        }

        let last = self.participants - 1;
        match state.direction {
            Direction::Forward if state.index >= last => TurnState {
                index: last,
                direction: Direction::Reverse,
                round: state.round + 1,
            },
            Direction::Forward => TurnState {
                index: state.index + 1,
                ..state
            },
            Direction::Reverse if state.index == 0 => TurnState {
                index: 0,
                direction: Direction::Forward,
                round: state.round + 1,
            },
            Direction::Reverse => TurnState {
                index: state.index - 1,
                ..state
            },
        }
    }

    /// The turn after a pick, applying one extra step when `skip` is set.
    pub fn next(&self, state: TurnState, skip: bool) -> TurnState {
        let next = self.step(state);
        if skip {
            self.step(next)
        } else {
            next
        }
    }

    /// The next `count` turns starting at `start` (inclusive), assuming no
    /// skips.
    pub fn order(&self, start: TurnState, count: usize) -> impl Iterator<Item = TurnState> + '_ {
        std::iter::successors(Some(start), move |s| Some(self.step(*s))).take(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn indices(n: usize, picks: usize) -> Vec<usize> {
        TurnSequencer::new(n)
            .order(TurnState::start(), picks)
            .map(|s| s.index)
            .collect()
    }

    /// 0..N-1 then N-1..0: the boundary index repeats once.
    fn expected_two_rounds(n: usize) -> Vec<usize> {
        (0..n).chain((0..n).rev()).collect()
    }

    #[test]
    fn test_snake_order_small_sizes() {
        for n in [1, 2, 3, 5] {
            assert_eq!(indices(n, 2 * n), expected_two_rounds(n), "n = {}", n);
        }
    }

    #[test]
    fn test_boundary_repeats_three_rounds() {
        assert_eq!(indices(3, 9), vec![0, 1, 2, 2, 1, 0, 0, 1, 2]);
    }

    #[test]
    fn test_single_participant_rounds() {
        let seq = TurnSequencer::new(1);
        let rounds: Vec<u32> = seq.order(TurnState::start(), 4).map(|s| s.round).collect();
        assert_eq!(rounds, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_round_and_direction_flip_at_boundary() {
        let seq = TurnSequencer::new(3);
        let state = TurnState {
            index: 2,
            direction: Direction::Forward,
            round: 1,
        };

        let next = seq.step(state);
        assert_eq!(next.index, 2);
        assert_eq!(next.direction, Direction::Reverse);
        assert_eq!(next.round, 2);
    }

    #[test]
    fn test_skip_mid_list() {
        let seq = TurnSequencer::new(4);
        let next = seq.next(TurnState::start(), true);
        assert_eq!(
            next,
            TurnState {
                index: 2,
                direction: Direction::Forward,
                round: 1,
            }
        );
    }

    #[test]
    fn test_skip_across_forward_boundary() {
        // Two participants, second one picks a group: the boundary repeat
        // is the pick that gets skipped.
        let seq = TurnSequencer::new(2);
        let state = TurnState {
            index: 1,
            direction: Direction::Forward,
            round: 1,
        };

        let next = seq.next(state, true);
        assert_eq!(
            next,
            TurnState {
                index: 0,
                direction: Direction::Reverse,
                round: 2,
            }
        );
    }

    #[test]
    fn test_skip_landing_on_boundary_flips_twice() {
        let seq = TurnSequencer::new(3);
        let state = TurnState {
            index: 1,
            direction: Direction::Reverse,
            round: 2,
        };

        // 1 -> 0, then the skip step reverses at the start of the list.
        let next = seq.next(state, true);
        assert_eq!(
            next,
            TurnState {
                index: 0,
                direction: Direction::Forward,
                round: 3,
            }
        );
    }

    #[test]
    fn test_zero_participants_is_stable() {
        let seq = TurnSequencer::new(0);
        assert_eq!(seq.next(TurnState::start(), true), TurnState::start());
    }

    #[test]
    fn test_direction_helpers() {
        assert_eq!(Direction::Forward.flipped(), Direction::Reverse);
        assert_eq!(format!("{}", Direction::Reverse), "reverse");
    }

    proptest! {
        #[test]
        fn prop_snake_two_rounds(n in 1usize..12) {
            prop_assert_eq!(indices(n, 2 * n), expected_two_rounds(n));
        }

        #[test]
        fn prop_index_in_bounds_and_round_monotonic(
            n in 1usize..8,
            skips in proptest::collection::vec(any::<bool>(), 1..64),
        ) {
            let seq = TurnSequencer::new(n);
            let mut state = TurnState::start();
            for skip in skips {
                let next = seq.next(state, skip);
                prop_assert!(next.index < n);
                prop_assert!(next.round >= state.round);
                if !skip && next.direction != state.direction {
                    prop_assert!(next.index == 0 || next.index == n - 1);
                }
                state = next;
            }
        }
    }
}
