//! Randomized what-if difficulty estimation.
//!
//! A puzzle is harder when wrong guesses take longer to disprove. The
//! refutation score measures that directly: for a random sample of empty
//! cells, place each *incorrect* candidate and count how many rounds of
//! singles propagation it takes to reach a contradiction. The counts are
//! averaged over [`TRIALS`] independent randomized passes, so the score is
//! a pure function of puzzle, solution, and seed.

use notewise_core::{CandidateSet, Digit, DigitGrid, House, Position};
use rand::{RngExt as _, SeedableRng as _, seq::SliceRandom as _};
use rand_pcg::Pcg64Mcg;

/// Number of independent randomized trials averaged per score.
pub const TRIALS: u32 = 30;

/// Propagation rounds after which a refutation attempt is abandoned.
const MAX_ROUNDS: u64 = 20;

/// Probability of skipping a cell within a trial.
const SKIP_PROBABILITY: f64 = 0.5;

/// Computes the refutation score of a puzzle.
///
/// The result is the floor of the mean refutation effort over [`TRIALS`]
/// randomized trials. It is a non-negative count of propagation rounds,
/// independent of the board's 1-1000 difficulty scale.
#[must_use]
pub fn score(puzzle: &DigitGrid, solution: &DigitGrid, seed: u64) -> u64 {
    let mut rng = Pcg64Mcg::seed_from_u64(seed);
    let mut total = 0u64;
    for round in 0..TRIALS {
        let effort = trial(puzzle, solution, &mut rng);
        log::trace!("refutation trial {round}: effort {effort}");
        total += effort;
    }
    total / u64::from(TRIALS)
}

fn trial(puzzle: &DigitGrid, solution: &DigitGrid, rng: &mut Pcg64Mcg) -> u64 {
    let mut cells: Vec<_> = Position::all()
        .filter(|&pos| puzzle.get(pos).is_none())
        .collect();
    cells.shuffle(rng);

    let base = Propagator::new(puzzle);
    let mut effort = 0u64;
    for pos in cells {
        if rng.random_bool(SKIP_PROBABILITY) {
            continue;
        }
        let truth = solution.get(pos);
        for digit in base.candidates(pos) {
            if Some(digit) == truth {
                continue;
            }
            let mut what_if = *puzzle;
            what_if.set(pos, Some(digit));
            effort += Propagator::new(&what_if).rounds_to_contradiction();
        }
    }
    effort
}

/// Candidate-mask state for cheap singles propagation.
struct Propagator {
    candidates: [CandidateSet; 81],
    values: DigitGrid,
}

impl Propagator {
    fn new(grid: &DigitGrid) -> Self {
        let mut this = Self {
            candidates: [CandidateSet::FULL; 81],
            values: *grid,
        };
        for pos in Position::all() {
            if grid.get(pos).is_some() {
                this.candidates[pos.index()] = CandidateSet::EMPTY;
                continue;
            }
            let mut blocked = CandidateSet::new();
            for house in House::of(pos) {
                for peer in house.cells() {
                    if let Some(value) = grid.get(peer) {
                        blocked.insert(value);
                    }
                }
            }
            this.candidates[pos.index()] = !blocked;
        }
        this
    }

    fn candidates(&self, pos: Position) -> CandidateSet {
        self.candidates[pos.index()]
    }

    fn place(&mut self, pos: Position, digit: Digit) {
        self.values.set(pos, Some(digit));
        self.candidates[pos.index()] = CandidateSet::EMPTY;
        for house in House::of(pos) {
            for peer in house.cells() {
                self.candidates[peer.index()].remove(digit);
            }
        }
    }

    /// Returns `true` on an empty cell with no candidates or a house where
    /// a value has nowhere left to go.
    fn contradicted(&self) -> bool {
        for pos in Position::all() {
            if self.values.get(pos).is_none() && self.candidates[pos.index()].is_empty() {
                return true;
            }
        }
        for house in House::ALL {
            let mut placed = CandidateSet::new();
            let mut possible = CandidateSet::new();
            for pos in house.cells() {
                if let Some(value) = self.values.get(pos) {
                    placed.insert(value);
                } else {
                    possible |= self.candidates[pos.index()];
                }
            }
            if !(placed | possible).is_superset(CandidateSet::FULL) {
                return true;
            }
        }
        false
    }

    /// Applies one full round of naked and hidden singles.
    fn propagate_round(&mut self) -> bool {
        let mut changed = false;
        for pos in Position::all() {
            if self.values.get(pos).is_none()
                && let Some(digit) = self.candidates[pos.index()].as_single()
            {
                self.place(pos, digit);
                changed = true;
            }
        }
        for house in House::ALL {
            let mut placed = CandidateSet::new();
            for pos in house.cells() {
                if let Some(value) = self.values.get(pos) {
                    placed.insert(value);
                }
            }
            for digit in !placed {
                let mut home = None;
                for pos in house.cells() {
                    if self.values.get(pos).is_none() && self.candidates[pos.index()].contains(digit)
                    {
                        if home.is_some() {
                            home = None;
                            break;
                        }
                        home = Some(pos);
                    }
                }
                if let Some(home) = home {
                    self.place(home, digit);
                    changed = true;
                }
            }
        }
        changed
    }

    /// Counts propagation rounds until a contradiction appears.
    ///
    /// Returns [`MAX_ROUNDS`] when the wrong placement survives the entire
    /// budget (or completes the grid), treating it as maximally hard to
    /// refute.
    fn rounds_to_contradiction(&mut self) -> u64 {
        for round in 0..MAX_ROUNDS {
            if self.contradicted() {
                return round;
            }
            if !self.propagate_round() {
                return MAX_ROUNDS;
            }
        }
        MAX_ROUNDS
    }
}
