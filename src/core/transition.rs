use crate::models::{PairState, PreferenceKind};

/// Storage effect required to move a pair into the requested kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Pair already holds the requested kind
    Unchanged,
    /// No row exists yet; insert one
    Create,
    /// Row of the opposite kind exists; it is removed and replaced
    Replace,
}

impl Transition {
    /// Whether the store must write a row
    pub fn changes_state(self) -> bool {
        !matches!(self, Transition::Unchanged)
    }
}

/// Decide the transition for a like/dislike request
///
/// Every arm lands the pair in exactly the requested state, so repeating a
/// call is always a no-op.
#[inline]
pub fn plan_transition(current: PairState, requested: PreferenceKind) -> Transition {
    match (current, requested) {
        (PairState::None, _) => Transition::Create,
        (PairState::Liked, PreferenceKind::Like) | (PairState::Disliked, PreferenceKind::Dislike) => {
            Transition::Unchanged
        }
        (PairState::Liked, PreferenceKind::Dislike) | (PairState::Disliked, PreferenceKind::Like) => {
            Transition::Replace
        }
    }
}
