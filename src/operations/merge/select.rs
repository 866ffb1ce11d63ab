/// Whether the merge keeps the union of all outlines or cuts the later
/// outlines out of the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    Union,
    Subtract,
}

/// Position of an outline in the merge input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetRole {
    /// The first outline.
    Base,
    /// Any later outline.
    Other,
}

impl SetRole {
    #[must_use]
    pub fn of(index: usize) -> Self {
        if index == 0 {
            Self::Base
        } else {
            Self::Other
        }
    }
}

/// Where a split piece lies relative to another outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceRelation {
    Inside,
    Outside,
}

/// Decision about a split piece, judged against one other outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeepDecision {
    Keep,
    KeepReversed,
    Discard,
}

/// Decides the fate of a piece from one outline against another outline.
///
/// | Piece from | Other  | Relation | Union   | Subtract      |
/// |------------|--------|----------|---------|---------------|
/// | Base       | Other  | Outside  | keep    | keep          |
/// | Base       | Other  | Inside   | discard | discard       |
/// | Other      | Base   | Outside  | keep    | discard       |
/// | Other      | Base   | Inside   | discard | keep reversed |
/// | Other      | Other  | Outside  | keep    | keep reversed |
/// | Other      | Other  | Inside   | discard | keep reversed |
///
/// Cutouts are kept reversed so they wind against the base outline.
#[allow(clippy::match_same_arms)]
#[must_use]
pub fn should_keep_piece(
    mode: MergeMode,
    source: SetRole,
    other: SetRole,
    relation: PieceRelation,
) -> KeepDecision {
    match (mode, source, other, relation) {
        (MergeMode::Union, _, _, PieceRelation::Outside) => KeepDecision::Keep,
        (MergeMode::Union, _, _, PieceRelation::Inside) => KeepDecision::Discard,

        (MergeMode::Subtract, SetRole::Base, _, PieceRelation::Outside) => KeepDecision::Keep,
        (MergeMode::Subtract, SetRole::Base, _, PieceRelation::Inside) => KeepDecision::Discard,

        (MergeMode::Subtract, SetRole::Other, SetRole::Base, PieceRelation::Outside) => {
            KeepDecision::Discard
        }
        (MergeMode::Subtract, SetRole::Other, SetRole::Base, PieceRelation::Inside) => {
            KeepDecision::KeepReversed
        }

        // Cutouts never trim each other.
        (MergeMode::Subtract, SetRole::Other, SetRole::Other, _) => KeepDecision::KeepReversed,
    }
}

/// Folds the decisions against every other outline into one. Any discard
/// wins, then any reversal.
#[must_use]
pub fn combine(decisions: impl IntoIterator<Item = KeepDecision>) -> KeepDecision {
    let mut result = KeepDecision::Keep;
    for decision in decisions {
        match decision {
            KeepDecision::Discard => return KeepDecision::Discard,
            KeepDecision::KeepReversed => result = KeepDecision::KeepReversed,
            KeepDecision::Keep => {}
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_discards_inside_pieces() {
        for source in [SetRole::Base, SetRole::Other] {
            assert_eq!(
                should_keep_piece(MergeMode::Union, source, SetRole::Other, PieceRelation::Inside),
                KeepDecision::Discard
            );
            assert_eq!(
                should_keep_piece(MergeMode::Union, source, SetRole::Base, PieceRelation::Outside),
                KeepDecision::Keep
            );
        }
    }

    #[test]
    fn subtract_keeps_cutout_inside_base_reversed() {
        assert_eq!(
            should_keep_piece(
                MergeMode::Subtract,
                SetRole::Other,
                SetRole::Base,
                PieceRelation::Inside
            ),
            KeepDecision::KeepReversed
        );
        assert_eq!(
            should_keep_piece(
                MergeMode::Subtract,
                SetRole::Other,
                SetRole::Base,
                PieceRelation::Outside
            ),
            KeepDecision::Discard
        );
    }

    #[test]
    fn subtract_removes_base_inside_cutout() {
        assert_eq!(
            should_keep_piece(
                MergeMode::Subtract,
                SetRole::Base,
                SetRole::Other,
                PieceRelation::Inside
            ),
            KeepDecision::Discard
        );
    }

    #[test]
    fn discard_wins_when_combining() {
        assert_eq!(
            combine([KeepDecision::KeepReversed, KeepDecision::Discard]),
            KeepDecision::Discard
        );
        assert_eq!(
            combine([KeepDecision::Keep, KeepDecision::KeepReversed]),
            KeepDecision::KeepReversed
        );
        assert_eq!(combine([]), KeepDecision::Keep);
    }
}
