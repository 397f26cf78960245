//! The human solving technique catalogue.
//!
//! Each technique implements the [`Strategy`] trait. Detection inspects the
//! current [`SolveGrid`] and, on a match, produces a [`Deduction`] recording
//! the causing cells, implicated houses, effects, and an interpolated
//! difficulty. Detection never mutates cell state; the only grid mutation a
//! strategy performs is updating the per-house search cache.

use std::fmt::Debug;

use notewise_core::{House, Position};

pub use self::{
    amend_notes::AmendNotes, box_line::BoxLineReduction, chain::SinglesChaining, fish::Fish,
    hidden_tuple::HiddenTuple, naked_tuple::NakedTuple, pointing::PointingTuple,
    simplify_notes::SimplifyNotes,
};
use crate::{Deduction, SolveGrid, StrategyKind};

mod amend_notes;
mod box_line;
mod chain;
mod fish;
mod hidden_tuple;
mod naked_tuple;
mod pointing;
mod simplify_notes;

/// How a detection pass treats multiple instances of the same technique.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Return the first instance found in scan order.
    First,
    /// Require every instance on the board to share one cause-cell set, and
    /// reject the technique otherwise. Used to pick unambiguous practice
    /// drills.
    Drill,
}

/// A detectable human solving technique.
pub trait Strategy: Debug {
    /// Returns the catalogue identifier of this technique.
    fn kind(&self) -> StrategyKind;

    /// Returns a boxed clone of the technique.
    fn clone_box(&self) -> BoxedStrategy;

    /// Scans the grid for instances of this technique.
    ///
    /// `stop_at_first` lets a scan bail out at the first instance; a full
    /// scan returns every instance in scan order. The grid is only mutated
    /// through its search cache marks.
    fn instances(&self, grid: &mut SolveGrid, stop_at_first: bool) -> Vec<Deduction>;

    /// Detects the technique under the given mode.
    ///
    /// Returns `None` when the technique does not apply, or (in
    /// [`SearchMode::Drill`]) when its instances are ambiguous.
    fn find(&self, grid: &mut SolveGrid, mode: SearchMode) -> Option<Deduction> {
        match mode {
            SearchMode::First => self.instances(grid, true).into_iter().next(),
            SearchMode::Drill => drill_unique(self.instances(grid, false)),
        }
    }
}

/// A boxed technique.
pub type BoxedStrategy = Box<dyn Strategy>;

impl Clone for BoxedStrategy {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Returns the full technique catalogue in ascending difficulty order.
///
/// The order doubles as the tie-break: when several techniques match at
/// once, the earlier one wins. It matches [`StrategyKind::ALL`] exactly.
#[must_use]
pub fn full_catalogue() -> Vec<BoxedStrategy> {
    vec![
        Box::new(AmendNotes::new()),
        Box::new(SimplifyNotes::new()),
        Box::new(NakedTuple::new(1)),
        Box::new(HiddenTuple::new(1)),
        Box::new(NakedTuple::new(2)),
        Box::new(HiddenTuple::new(2)),
        Box::new(PointingTuple::new(2)),
        Box::new(NakedTuple::new(3)),
        Box::new(PointingTuple::new(3)),
        Box::new(HiddenTuple::new(3)),
        Box::new(BoxLineReduction::new()),
        Box::new(NakedTuple::new(4)),
        Box::new(HiddenTuple::new(4)),
        Box::new(NakedTuple::new(5)),
        Box::new(HiddenTuple::new(5)),
        Box::new(NakedTuple::new(6)),
        Box::new(HiddenTuple::new(6)),
        Box::new(NakedTuple::new(7)),
        Box::new(HiddenTuple::new(7)),
        Box::new(NakedTuple::new(8)),
        Box::new(HiddenTuple::new(8)),
        Box::new(Fish::x_wing()),
        Box::new(Fish::swordfish()),
        Box::new(SinglesChaining::new()),
    ]
}

/// Collapses a full instance scan into a drill result.
///
/// All instances must resolve to the same cause-cell set; a second distinct
/// instance makes the technique ambiguous as a practice drill.
fn drill_unique(instances: Vec<Deduction>) -> Option<Deduction> {
    let mut iter = instances.into_iter();
    let first = iter.next()?;
    let cause = first.cause_set();
    iter.all(|other| other.cause_set() == cause).then_some(first)
}

/// Interpolation input for tuple difficulties: how spread out the causing
/// cells are within their house, in `0.0..=1.0`.
///
/// Along a row or column this is the index distance between the outermost
/// cause cells over the maximum distance 8. Within a box it combines the
/// row and column spreads (each at most 2) over their maximum sum 4.
fn spread_ratio(house: House, cause: &[Position]) -> f64 {
    let minmax = |values: &mut dyn Iterator<Item = u8>| -> (u8, u8) {
        values.fold((8, 0), |(min, max), v| (min.min(v), max.max(v)))
    };
    match house {
        House::Row(_) => {
            let (min, max) = minmax(&mut cause.iter().map(|pos| pos.col()));
            f64::from(max.saturating_sub(min)) / 8.0
        }
        House::Column(_) => {
            let (min, max) = minmax(&mut cause.iter().map(|pos| pos.row()));
            f64::from(max.saturating_sub(min)) / 8.0
        }
        House::Box(_) => {
            let (min_r, max_r) = minmax(&mut cause.iter().map(|pos| pos.row()));
            let (min_c, max_c) = minmax(&mut cause.iter().map(|pos| pos.col()));
            f64::from(max_r.saturating_sub(min_r) + max_c.saturating_sub(min_c)) / 4.0
        }
    }
}

/// Interpolation input for hidden singles: the fraction of the 81-cell note
/// field occupied by the causing cells' notes. More surrounding noise makes
/// the lone position harder to spot.
fn notes_field_ratio(grid: &SolveGrid, cause: &[Position]) -> f64 {
    let total: usize = cause.iter().map(|&pos| grid.notes(pos).len()).sum();
    #[expect(clippy::cast_precision_loss)]
    let ratio = total as f64 / 81.0;
    ratio
}

#[cfg(test)]
mod tests {
    use notewise_core::{House, Position};

    use super::*;

    #[test]
    fn test_catalogue_matches_kind_order() {
        let catalogue = full_catalogue();
        assert_eq!(catalogue.len(), StrategyKind::COUNT);
        for (strategy, kind) in catalogue.iter().zip(StrategyKind::ALL) {
            assert_eq!(strategy.kind(), kind);
        }
    }

    #[test]
    fn test_drill_unique_rejects_distinct_cause_sets() {
        let a = Deduction::new(StrategyKind::NakedPair)
            .with_cause([Position::new(0, 0), Position::new(0, 1)]);
        let b = Deduction::new(StrategyKind::NakedPair)
            .with_cause([Position::new(0, 1), Position::new(0, 0)]);
        let c = Deduction::new(StrategyKind::NakedPair)
            .with_cause([Position::new(5, 5), Position::new(5, 6)]);

        assert!(drill_unique(vec![]).is_none());
        assert!(drill_unique(vec![a.clone()]).is_some());
        // Cause order does not matter, only the set.
        assert!(drill_unique(vec![a.clone(), b]).is_some());
        assert!(drill_unique(vec![a, c]).is_none());
    }

    #[test]
    fn test_spread_ratio_row() {
        let adjacent = [Position::new(3, 4), Position::new(3, 5)];
        let extremes = [Position::new(3, 0), Position::new(3, 8)];
        assert!((spread_ratio(House::Row(3), &adjacent) - 0.125).abs() < 1e-9);
        assert!((spread_ratio(House::Row(3), &extremes) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_spread_ratio_box() {
        let corner_pair = [Position::new(0, 0), Position::new(2, 2)];
        assert!((spread_ratio(House::Box(0), &corner_pair) - 1.0).abs() < 1e-9);
        let same_cell = [Position::new(1, 1), Position::new(1, 1)];
        assert!(spread_ratio(House::Box(0), &same_cell).abs() < 1e-9);
    }

    #[test]
    fn test_notes_field_ratio() {
        let grid = SolveGrid::empty();
        let cause = [Position::new(0, 0), Position::new(0, 1)];
        assert!((notes_field_ratio(&grid, &cause) - 18.0 / 81.0).abs() < 1e-9);
    }
}
