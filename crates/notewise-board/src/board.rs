//! Validated, solved, and scored puzzles.

use derive_more::{Display, Error, From};
use notewise_core::{DigitGrid, House, ParseGridError};
use notewise_solver::{
    Deduction, SolveGrid, Solver, SolverError, StrategyKind,
    strategy::{AmendNotes, SearchMode, SimplifyNotes, Strategy, full_catalogue},
};
use rand::{RngExt as _, SeedableRng as _};
use rand_pcg::Pcg64Mcg;

use crate::{refutation, uniqueness::Completions};

/// An error rejecting a candidate puzzle.
///
/// All validation happens during [`Board::analyze`]; no partial board is
/// ever exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From)]
pub enum BoardError {
    /// The puzzle text is not a valid 81-cell grid.
    #[display("invalid puzzle text: {_0}")]
    #[from]
    Parse(ParseGridError),
    /// The puzzle has no empty cells left to solve.
    #[display("board is already solved")]
    AlreadySolved,
    /// A value appears twice within one house.
    #[display("duplicate value in {house}")]
    Duplicate {
        /// The offending house.
        house: House,
    },
    /// Backtracking found no completion.
    #[display("puzzle has no solution")]
    Unsolvable,
    /// Backtracking found a second completion.
    #[display("puzzle has multiple solutions")]
    MultipleSolutions,
    /// The stepping solver stalled on a validated puzzle.
    ///
    /// Uniqueness is proven before solving starts, so this indicates a gap
    /// in the technique catalogue rather than bad input.
    #[display("solver stalled: {_0}")]
    #[from]
    Solver(SolverError),
}

/// A validated puzzle annotated with solvability metadata.
///
/// Construction fully validates, solves, and scores the puzzle; the board
/// is immutable afterward. The randomized parts of scoring are driven by
/// the caller-supplied seed, so results are reproducible.
#[derive(Debug, Clone)]
pub struct Board {
    puzzle: DigitGrid,
    solution: DigitGrid,
    used: [bool; StrategyKind::COUNT],
    drills: [bool; StrategyKind::COUNT],
    difficulty: u16,
    steps: usize,
    seed: u64,
}

impl Board {
    /// Validates, solves, and scores a textual puzzle.
    ///
    /// The input is an 81-symbol row-major grid where `'0'` (or `'.'` /
    /// `'_'`) marks an empty cell. `seed` drives the bounded noise in the
    /// difficulty score and the refutation estimator.
    ///
    /// # Errors
    ///
    /// Returns a [`BoardError`] when the text does not parse, the grid has
    /// no empty cells, a house holds a duplicate value, or the puzzle does
    /// not have exactly one solution.
    pub fn analyze(text: &str, seed: u64) -> Result<Self, BoardError> {
        let puzzle: DigitGrid = text.parse()?;
        if puzzle.empty_count() == 0 {
            return Err(BoardError::AlreadySolved);
        }
        if let Some(house) = puzzle.duplicate_house() {
            return Err(BoardError::Duplicate { house });
        }
        let solution = match crate::uniqueness::count_completions(&puzzle) {
            Completions::None => return Err(BoardError::Unsolvable),
            Completions::Multiple => return Err(BoardError::MultipleSolutions),
            Completions::Unique(solution) => solution,
        };

        let mut grid = SolveGrid::from_givens(&puzzle);
        grid.set_reference_solution(solution);
        let mut solver = Solver::new(grid);

        let mut used = [false; StrategyKind::COUNT];
        let mut simple_sum = 0u64;
        let mut hard_sum = 0u64;
        let mut steps = 0usize;
        while let Some(hint) = solver.next_step()? {
            let kind = hint.kind();
            let difficulty = hint.deduction().difficulty();
            log::debug!("step {}: {kind} (difficulty {difficulty})", steps + 1);
            used[kind.index()] = true;
            if kind.is_simple() {
                simple_sum += u64::from(difficulty);
            } else {
                hard_sum += u64::from(difficulty);
            }
            steps += 1;
        }
        debug_assert_eq!(solver.grid().to_digit_grid(), solution);

        close_prerequisites(&mut used);
        let difficulty = normalize_difficulty(simple_sum, hard_sum, steps, seed);
        log::debug!("solved in {steps} steps, difficulty {difficulty}");

        let mut drills = [false; StrategyKind::COUNT];
        let mut drill_grid = SolveGrid::from_givens(&puzzle);
        skip_note_maintenance(&mut drill_grid);
        for candidate in drill_candidates(&mut drill_grid) {
            drills[candidate.kind().index()] = true;
        }

        Ok(Self {
            puzzle,
            solution,
            used,
            drills,
            difficulty,
            steps,
            seed,
        })
    }

    /// Validates, solves, and scores a puzzle with a freshly drawn seed.
    ///
    /// Convenience over [`analyze`](Self::analyze) for callers that do not
    /// need reproducible scores.
    ///
    /// # Errors
    ///
    /// Same as [`analyze`](Self::analyze).
    pub fn analyze_with_random_seed(text: &str) -> Result<Self, BoardError> {
        Self::analyze(text, rand::rng().random())
    }

    /// Returns the starting grid.
    #[must_use]
    pub const fn puzzle(&self) -> &DigitGrid {
        &self.puzzle
    }

    /// Returns the unique solution.
    #[must_use]
    pub const fn solution(&self) -> &DigitGrid {
        &self.solution
    }

    /// Returns `true` if solving used the technique, or a technique it is a
    /// logical prerequisite of.
    #[must_use]
    pub const fn uses(&self, kind: StrategyKind) -> bool {
        self.used[kind.index()]
    }

    /// Returns the used techniques in catalogue order.
    pub fn used_kinds(&self) -> impl Iterator<Item = StrategyKind> + '_ {
        StrategyKind::ALL.into_iter().filter(|kind| self.uses(*kind))
    }

    /// Returns `true` if the technique is usable as an unambiguous
    /// first-move practice drill.
    #[must_use]
    pub const fn is_drill(&self, kind: StrategyKind) -> bool {
        self.drills[kind.index()]
    }

    /// Returns the drill-eligible techniques in catalogue order.
    pub fn drill_kinds(&self) -> impl Iterator<Item = StrategyKind> + '_ {
        StrategyKind::ALL.into_iter().filter(|kind| self.is_drill(*kind))
    }

    /// Returns the normalized difficulty, always within 1-1000.
    #[must_use]
    pub const fn difficulty(&self) -> u16 {
        self.difficulty
    }

    /// Returns the number of deduction steps the solve took.
    #[must_use]
    pub const fn step_count(&self) -> usize {
        self.steps
    }

    /// Computes the randomized refutation score as a secondary difficulty
    /// signal, reusing this board's seed.
    #[must_use]
    pub fn refutation_score(&self) -> u64 {
        refutation::score(&self.puzzle, &self.solution, self.seed)
    }
}

/// Marks every logical prerequisite of a used technique as used.
fn close_prerequisites(used: &mut [bool; StrategyKind::COUNT]) {
    for kind in StrategyKind::ALL {
        if !used[kind.index()] {
            continue;
        }
        let mut current = kind;
        while let Some(previous) = current.prerequisite() {
            used[previous.index()] = true;
            current = previous;
        }
    }
}

/// Collapses per-step difficulties into the final 1-1000 score.
///
/// The three lightweight techniques contribute at most 10% of the harder
/// techniques' total, the per-step mean is stretched by a solve-length
/// factor, seeded noise within 5% is applied, and the result is rescaled
/// against the hardest possible single step.
fn normalize_difficulty(simple_sum: u64, hard_sum: u64, steps: usize, seed: u64) -> u16 {
    if steps == 0 {
        return 1;
    }
    let capped_simple = simple_sum.min(hard_sum / 10);
    let total = hard_sum + capped_simple;

    #[expect(clippy::cast_precision_loss)]
    let mean = total as f64 / steps as f64;
    #[expect(clippy::cast_precision_loss)]
    let length_factor = 1.0 + steps as f64 / 100.0;
    let mut rng = Pcg64Mcg::seed_from_u64(seed);
    let noise = rng.random_range(0.95..=1.05);

    let raw = mean * length_factor * noise;
    let scaled = raw / f64::from(StrategyKind::MAX_STEP_DIFFICULTY) * 1000.0;
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let clamped = scaled.round().clamp(1.0, 1000.0) as u16;
    clamped
}

/// Applies note-maintenance steps until neither corrective technique
/// matches, leaving the grid at the first "real" decision point.
fn skip_note_maintenance(grid: &mut SolveGrid) {
    let amend = AmendNotes::new();
    let simplify = SimplifyNotes::new();
    loop {
        if let Some(step) = amend.find(grid, SearchMode::First) {
            grid.apply(&step);
        } else if let Some(step) = simplify.find(grid, SearchMode::First) {
            grid.apply(&step);
        } else {
            break;
        }
    }
}

/// Selects the techniques usable as practice drills at the current state.
///
/// A technique qualifies when every instance on the board shares one cause
/// set ([`SearchMode::Drill`]), and is excluded again when an already
/// selected prerequisite's cause cells overlap its own: such a candidate is
/// really the simpler pattern in disguise.
fn drill_candidates(grid: &mut SolveGrid) -> Vec<Deduction> {
    let mut selected: Vec<Deduction> = Vec::new();
    for strategy in full_catalogue() {
        if matches!(
            strategy.kind(),
            StrategyKind::AmendNotes | StrategyKind::SimplifyNotes
        ) {
            continue;
        }
        let Some(candidate) = strategy.find(grid, SearchMode::Drill) else {
            continue;
        };
        let cause = candidate.cause_set();
        let shadowed = selected.iter().any(|included| {
            is_prerequisite_of(included.kind(), candidate.kind())
                && included.cause_set().iter().any(|pos| cause.contains(pos))
        });
        if !shadowed {
            selected.push(candidate);
        }
    }
    selected
}

/// Returns `true` if `ancestor` sits on `kind`'s prerequisite chain.
fn is_prerequisite_of(ancestor: StrategyKind, kind: StrategyKind) -> bool {
    let mut current = kind;
    while let Some(previous) = current.prerequisite() {
        if previous == ancestor {
            return true;
        }
        current = previous;
    }
    false
}

#[cfg(test)]
mod tests {
    use notewise_core::{CandidateSet, Digit, Position};
    use proptest::prelude::*;

    use super::*;

    const PUZZLE: &str =
        "310084002200150006570003010423708095760030000009562030050006070007000900000001500";
    const SOLVED: &str =
        "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

    fn keep_only(grid: &mut SolveGrid, pos: Position, values: &[u8]) {
        let keep: CandidateSet = values.iter().map(|&v| Digit::new(v)).collect();
        grid.set_notes(pos, keep);
    }

    #[test]
    fn test_analyze_reference_puzzle() {
        let board = Board::analyze(PUZZLE, 7).unwrap();
        assert_eq!(board.solution().to_string(), SOLVED);
        assert!(board.uses(StrategyKind::NakedSingle));
        assert!((1..=1000).contains(&board.difficulty()));
        assert!(board.step_count() > 0);
    }

    #[test]
    fn test_rejects_already_solved() {
        assert_eq!(
            Board::analyze(SOLVED, 0).unwrap_err(),
            BoardError::AlreadySolved
        );
    }

    #[test]
    fn test_rejects_duplicates() {
        let mut text: Vec<u8> = PUZZLE.bytes().collect();
        // Row 0 already holds a 3; add another.
        text[2] = b'3';
        let text = String::from_utf8(text).unwrap();
        assert_eq!(
            Board::analyze(&text, 0).unwrap_err(),
            BoardError::Duplicate {
                house: House::Row(0)
            }
        );
    }

    #[test]
    fn test_rejects_ambiguous_puzzle() {
        let empty = "0".repeat(81);
        assert_eq!(
            Board::analyze(&empty, 0).unwrap_err(),
            BoardError::MultipleSolutions
        );
    }

    #[test]
    fn test_rejects_bad_text() {
        assert!(matches!(
            Board::analyze("not a puzzle", 0),
            Err(BoardError::Parse(_))
        ));
        assert!(matches!(
            Board::analyze(&"x".repeat(81), 0),
            Err(BoardError::Parse(_))
        ));
    }

    #[test]
    fn test_prerequisite_closure() {
        let mut used = [false; StrategyKind::COUNT];
        used[StrategyKind::HiddenTriplet.index()] = true;
        close_prerequisites(&mut used);
        for kind in [
            StrategyKind::NakedTriplet,
            StrategyKind::NakedPair,
            StrategyKind::NakedSingle,
        ] {
            assert!(used[kind.index()], "{kind} should be implied");
        }
        assert!(!used[StrategyKind::HiddenPair.index()]);
    }

    #[test]
    fn test_difficulty_normalization_bounds() {
        assert_eq!(normalize_difficulty(0, 0, 0, 0), 1);
        // Pure simple solves collapse to the floor.
        assert_eq!(normalize_difficulty(500, 0, 40, 1), 1);
        // Heavy solves saturate at the ceiling.
        assert_eq!(normalize_difficulty(0, 180 * 400, 400, 2), 1000);
        for seed in 0..20 {
            let score = normalize_difficulty(30, 900, 45, seed);
            assert!((1..=1000).contains(&score));
        }
    }

    #[test]
    fn test_drill_exclusion_shadows_compound_pattern() {
        // A naked single at `a` and a naked pair over `a` and `b`: the pair
        // is the single in disguise, so only the single survives.
        let a = Position::new(0, 0);
        let b = Position::new(0, 4);
        let mut grid = SolveGrid::empty();
        keep_only(&mut grid, a, &[9]);
        keep_only(&mut grid, b, &[8, 9]);

        let kinds: Vec<_> = drill_candidates(&mut grid)
            .into_iter()
            .map(|candidate| candidate.kind())
            .collect();
        assert!(kinds.contains(&StrategyKind::NakedSingle));
        assert!(!kinds.contains(&StrategyKind::NakedPair));
    }

    #[test]
    fn test_disjoint_drills_coexist() {
        let mut grid = SolveGrid::empty();
        keep_only(&mut grid, Position::new(0, 0), &[9]);
        keep_only(&mut grid, Position::new(8, 3), &[1, 2]);
        keep_only(&mut grid, Position::new(8, 7), &[1, 2]);

        let kinds: Vec<_> = drill_candidates(&mut grid)
            .into_iter()
            .map(|candidate| candidate.kind())
            .collect();
        assert!(kinds.contains(&StrategyKind::NakedSingle));
        assert!(kinds.contains(&StrategyKind::NakedPair));
    }

    proptest! {
        #[test]
        fn prop_normalized_difficulty_stays_in_range(
            simple_sum in 0u64..10_000,
            hard_sum in 0u64..200_000,
            steps in 0usize..500,
            seed in any::<u64>(),
        ) {
            let score = normalize_difficulty(simple_sum, hard_sum, steps, seed);
            prop_assert!((1..=1000).contains(&score));
        }

        #[test]
        fn prop_normalized_difficulty_is_deterministic_per_seed(seed in any::<u64>()) {
            let first = normalize_difficulty(30, 900, 45, seed);
            let second = normalize_difficulty(30, 900, 45, seed);
            prop_assert_eq!(first, second);
        }
    }
}
