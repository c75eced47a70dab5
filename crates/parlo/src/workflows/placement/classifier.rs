use super::domain::{Band, LexicalSelection};

/// Derives the coarse band from the words a learner marked as known.
///
/// Any tier C word wins over any tier B word; a selection with neither
/// lands in the beginner band, including an empty selection.
pub fn classify(selection: &LexicalSelection) -> Band {
    if !selection.tier_c.is_empty() {
        Band::Advanced
    } else if !selection.tier_b.is_empty() {
        Band::Intermediate
    } else {
        Band::Beginner
    }
}
