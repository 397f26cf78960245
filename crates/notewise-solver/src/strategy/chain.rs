use notewise_core::{CandidateSet, Digit, House, Position};

use crate::{
    Deduction, SolveGrid, StrategyKind,
    strategy::{BoxedStrategy, Strategy},
};

/// Simple coloring over conjugate pairs of a single value.
///
/// When a house contains exactly two candidate cells for a value, the two
/// form a conjugate pair: exactly one of them holds the value. Chaining
/// those pairs two-colors each connected component, and the colors are
/// mutually exclusive, which yields two eliminations:
///
/// - *color trap*: a candidate cell outside the chain that sees both colors
///   can never hold the value;
/// - *color wrap*: if two cells of one color share a house, that entire
///   color is false.
#[derive(Debug, Default, Clone, Copy)]
pub struct SinglesChaining {}

/// Two-colored connected component of the conjugate-pair graph.
struct Component {
    colored: Vec<(Position, bool)>,
    link_houses: Vec<House>,
}

impl SinglesChaining {
    /// Creates a new `SinglesChaining` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }

    fn conjugate_links(grid: &SolveGrid, digit: Digit) -> Vec<(Position, Position, House)> {
        let mut links = Vec::new();
        for house in House::ALL {
            let mut homes = house
                .cells()
                .into_iter()
                .filter(|&pos| grid.is_empty(pos) && grid.notes(pos).contains(digit));
            if let (Some(a), Some(b), None) = (homes.next(), homes.next(), homes.next()) {
                links.push((a, b, house));
            }
        }
        links
    }

    /// Colors the conjugate-pair graph one component at a time.
    fn components(links: &[(Position, Position, House)]) -> Vec<Component> {
        let mut neighbors: Vec<Vec<usize>> = vec![Vec::new(); 81];
        for &(a, b, _) in links {
            neighbors[a.index()].push(b.index());
            neighbors[b.index()].push(a.index());
        }

        let mut color = [None::<bool>; 81];
        let mut components = Vec::new();
        for &(start, _, _) in links {
            if color[start.index()].is_some() {
                continue;
            }
            let mut colored = Vec::new();
            let mut queue = vec![start.index()];
            color[start.index()] = Some(true);
            while let Some(index) = queue.pop() {
                let tint = color[index].unwrap_or(true);
                #[expect(clippy::cast_possible_truncation)]
                colored.push((Position::from_index(index as u8), tint));
                for &next in &neighbors[index] {
                    if color[next].is_none() {
                        color[next] = Some(!tint);
                        queue.push(next);
                    }
                }
            }
            let members: Vec<_> = colored.iter().map(|&(pos, _)| pos).collect();
            let link_houses = links
                .iter()
                .filter(|(a, _, _)| members.contains(a))
                .map(|&(_, _, house)| house)
                .collect();
            components.push(Component {
                colored,
                link_houses,
            });
        }
        components
    }

    /// Cells of one color that clash within a house, disproving the color.
    fn wrapped_color(component: &Component) -> Option<bool> {
        for (i, &(a, tint_a)) in component.colored.iter().enumerate() {
            for &(b, tint_b) in &component.colored[i + 1..] {
                if tint_a == tint_b && a.sees(b) {
                    return Some(tint_a);
                }
            }
        }
        None
    }

    fn eliminate(
        &self,
        grid: &SolveGrid,
        digit: Digit,
        component: &Component,
    ) -> Option<Deduction> {
        let single = CandidateSet::from_digit(digit);
        let mut eliminations = Vec::new();

        if let Some(wrapped) = Self::wrapped_color(component) {
            for &(pos, tint) in &component.colored {
                if tint == wrapped {
                    eliminations.push((pos, single));
                }
            }
        } else {
            for pos in Position::all() {
                if !grid.is_empty(pos)
                    || !grid.notes(pos).contains(digit)
                    || component.colored.iter().any(|&(member, _)| member == pos)
                {
                    continue;
                }
                let sees_tint = |wanted: bool| {
                    component
                        .colored
                        .iter()
                        .any(|&(member, tint)| tint == wanted && pos.sees(member))
                };
                if sees_tint(true) && sees_tint(false) {
                    eliminations.push((pos, single));
                }
            }
        }

        if eliminations.is_empty() {
            return None;
        }
        #[expect(clippy::cast_precision_loss)]
        let ratio = (component.colored.len() as f64 - 4.0) / 12.0;
        Some(
            Deduction::new(self.kind())
                .with_cause(component.colored.iter().map(|&(pos, _)| pos))
                .with_houses(component.link_houses.iter().copied())
                .with_eliminations(eliminations)
                .with_difficulty_ratio(ratio),
        )
    }
}

impl Strategy for SinglesChaining {
    fn kind(&self) -> StrategyKind {
        StrategyKind::SinglesChaining
    }

    fn clone_box(&self) -> BoxedStrategy {
        Box::new(*self)
    }

    fn instances(&self, grid: &mut SolveGrid, stop_at_first: bool) -> Vec<Deduction> {
        let mut found = Vec::new();
        for digit in Digit::ALL {
            let links = Self::conjugate_links(grid, digit);
            if links.is_empty() {
                continue;
            }
            for component in Self::components(&links) {
                if component.colored.len() < 4 {
                    continue;
                }
                if let Some(deduction) = self.eliminate(grid, digit, &component) {
                    found.push(deduction);
                    if stop_at_first {
                        return found;
                    }
                }
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::SearchMode;

    fn digit(value: u8) -> Digit {
        Digit::new(value)
    }

    /// Restricts `value` in the given house to the listed cells.
    fn confine(grid: &mut SolveGrid, value: Digit, house: House, homes: &[Position]) {
        for pos in house.cells() {
            if !homes.contains(&pos) && grid.notes(pos).contains(value) {
                grid.remove_note(pos, value);
            }
        }
    }

    #[test]
    fn test_color_trap_elimination() {
        // Conjugate chain for 4: (0,0)-(0,8) in row 0, (0,8)-(8,8) in
        // column 8, (8,8)-(8,0) in row 8. Colors alternate, so (0,0) and
        // (8,0) carry opposite colors; any outside candidate seeing both,
        // like the rest of column 0, cannot hold 4.
        let mut grid = SolveGrid::empty();
        let corners = [
            Position::new(0, 0),
            Position::new(0, 8),
            Position::new(8, 8),
            Position::new(8, 0),
        ];
        confine(&mut grid, digit(4), House::Row(0), &corners[0..2]);
        confine(&mut grid, digit(4), House::Column(8), &corners[1..3]);
        confine(&mut grid, digit(4), House::Row(8), &corners[2..4]);

        let step = SinglesChaining::new().find(&mut grid, SearchMode::First).unwrap();
        assert_eq!(step.kind(), StrategyKind::SinglesChaining);
        assert_eq!(step.cause_set().len(), 4);
        assert!(
            step.eliminations()
                .iter()
                .any(|&(pos, _)| pos == Position::new(4, 0))
        );
        // Chain members are never their own victims.
        assert!(
            step.eliminations()
                .iter()
                .all(|&(pos, _)| !corners.contains(&pos))
        );
    }

    #[test]
    fn test_two_isolated_pairs_do_not_chain() {
        let mut grid = SolveGrid::empty();
        confine(
            &mut grid,
            digit(4),
            House::Row(0),
            &[Position::new(0, 0), Position::new(0, 4)],
        );
        // A lone conjugate pair colors only two cells, below the minimum
        // chain length.
        assert!(
            SinglesChaining::new()
                .find(&mut grid, SearchMode::First)
                .is_none()
        );
    }
}
