use itertools::Itertools;
use log::{trace, warn};

use crate::error::{Error, Result};
use crate::game::game_state::Game;
use crate::model::{Solution, SolveReport};

/// One candidate assignment: K rows, each row pairing one element of every
/// category against the anchor category's fixed ordering.
pub type World = Vec<Vec<usize>>;

/// Every possible world. The first category's order is the enumeration
/// axis; every other category contributes all K! permutations, so the
/// product yields (K!)^(M-1) worlds for M categories of size K.
pub fn world_iter(game: &Game) -> Box<dyn Iterator<Item = World>> {
    let anchor: Vec<usize> = game.fellows(0).to_vec();
    let k = anchor.len();

    if game.n_kinds() == 1 {
        let world: World = anchor.into_iter().map(|e| vec![e]).collect();
        return Box::new(std::iter::once(world));
    }

    let permutation_sets: Vec<Vec<Vec<usize>>> = (1..game.n_kinds())
        .map(|kind| game.fellows(kind).to_vec().into_iter().permutations(k).collect())
        .collect();

    Box::new(
        permutation_sets
            .into_iter()
            .map(|permutations| permutations.into_iter())
            .multi_cartesian_product()
            .map(move |combo| {
                (0..k)
                    .map(|i| {
                        let mut row = Vec::with_capacity(combo.len() + 1);
                        row.push(anchor[i]);
                        row.extend(combo.iter().map(|permutation| permutation[i]));
                        row
                    })
                    .collect()
            }),
    )
}

/// Connects each row's elements: the transitive merge of `relate` makes
/// relating the first element to each of the rest sufficient.
pub fn realize_world(game: &mut Game, world: &World) -> Result<()> {
    for row in world {
        for &element in &row[1..] {
            game.relate(row[0], element)?;
        }
    }
    Ok(())
}

/// Exhaustive search: generate each world, realize it, validate every clue,
/// record it as a solution if they all hold, and reset before the next
/// trial. A graph conflict aborts only that trial; other evaluation errors
/// abort the search.
pub fn find_solutions(game: &mut Game) -> Result<SolveReport> {
    let mut report = SolveReport::default();

    game.reset_relationships();
    for world in world_iter(game) {
        report.worlds_tested += 1;
        match realize_world(game, &world) {
            Ok(()) => {
                if game.validate_all_clues()? {
                    trace!(
                        target: "solver",
                        "world {} is a solution",
                        report.worlds_tested
                    );
                    report.solutions.push(Solution { rows: world });
                }
            }
            Err(Error::GraphConflict { kind, left, right }) => {
                warn!(
                    target: "solver",
                    "world {} aborted on conflicting `{}` relationships (`{}` vs `{}`)",
                    report.worlds_tested, kind, left, right
                );
                report.conflicts += 1;
            }
            Err(error) => {
                game.reset_relationships();
                return Err(error);
            }
        }
        game.reset_relationships();
    }

    trace!(
        target: "solver",
        "{} world(s) tested, {} solution(s), {} conflict(s)",
        report.worlds_tested,
        report.solutions.len(),
        report.conflicts
    );
    Ok(report)
}
