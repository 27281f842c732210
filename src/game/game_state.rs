use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use log::trace;

use crate::error::{Error, Result};
use crate::game::evaluator;
use crate::model::{Clue, Element, PuzzleDefinition, Rule, Solution};

/// A loaded puzzle: the element arena, its category and id indices, and the
/// compiled clues. `kinds`/`sets`/`keys` are fixed after load; only the
/// relationship links inside elements mutate while solving.
#[derive(Debug, Clone)]
pub struct Game {
    kinds: Vec<String>,
    elements: Vec<Element>,
    sets: Vec<Vec<usize>>,
    keys: HashMap<String, usize>,
    clues: Vec<Clue>,
}

impl Game {
    pub fn load(path: impl AsRef<Path>) -> Result<Game> {
        let contents = fs::read_to_string(path)?;
        let definition: PuzzleDefinition = serde_json::from_str(&contents)?;
        Game::from_definition(&definition)
    }

    pub fn from_definition(definition: &PuzzleDefinition) -> Result<Game> {
        if definition.kinds.is_empty() {
            return Err(Error::MalformedPuzzle("no categories defined".to_string()));
        }

        let n_kinds = definition.kinds.len();
        let mut kinds = Vec::with_capacity(n_kinds);
        let mut elements = Vec::new();
        let mut sets = Vec::with_capacity(n_kinds);
        let mut keys = HashMap::new();

        for (kind, kind_def) in definition.kinds.iter().enumerate() {
            if kind_def.things.is_empty() {
                return Err(Error::MalformedPuzzle(format!(
                    "category `{}` has no things",
                    kind_def.name
                )));
            }
            kinds.push(kind_def.name.clone());

            let mut members = Vec::with_capacity(kind_def.things.len());
            for id in &kind_def.things {
                let index = elements.len();
                if keys.insert(id.clone(), index).is_some() {
                    return Err(Error::MalformedPuzzle(format!("duplicate id `{id}`")));
                }
                elements.push(Element::new(id.clone(), kind, index, n_kinds));
                members.push(index);
            }
            sets.push(members);
        }

        let size = sets[0].len();
        if let Some(kind) = sets.iter().position(|members| members.len() != size) {
            return Err(Error::MalformedPuzzle(format!(
                "category `{}` has {} things, expected {}",
                kinds[kind],
                sets[kind].len(),
                size
            )));
        }

        let clues = definition
            .clues
            .iter()
            .map(|nodes| {
                let rules = nodes
                    .iter()
                    .map(|node| Rule::compile(node, &keys, &kinds))
                    .collect::<Result<Vec<Rule>>>()?;
                Ok(Clue::new(rules))
            })
            .collect::<Result<Vec<Clue>>>()?;

        Ok(Game {
            kinds,
            elements,
            sets,
            keys,
            clues,
        })
    }

    pub fn kinds(&self) -> &[String] {
        &self.kinds
    }

    pub fn n_kinds(&self) -> usize {
        self.kinds.len()
    }

    pub fn kind_name(&self, kind: usize) -> &str {
        &self.kinds[kind]
    }

    pub fn element(&self, index: usize) -> &Element {
        &self.elements[index]
    }

    pub fn keys(&self) -> &HashMap<String, usize> {
        &self.keys
    }

    pub fn lookup(&self, id: &str) -> Result<usize> {
        self.keys
            .get(id)
            .copied()
            .ok_or_else(|| Error::UnknownId(id.to_string()))
    }

    /// All members of a category, in definition order. These are the
    /// fellows of every element of that category.
    pub fn fellows(&self, kind: usize) -> &[usize] {
        &self.sets[kind]
    }

    pub fn clues(&self) -> &[Clue] {
        &self.clues
    }

    /// Clears every element's relationships back to `{own kind: self}`.
    /// Must run between solver trials; leftover links corrupt later trials.
    pub fn reset_relationships(&mut self) {
        for element in self.elements.iter_mut() {
            element.reset();
        }
    }

    /// Merges the relationship components of `a` and `b`: walks everything
    /// reachable from either, folds all their links into one kind->element
    /// view, and writes that view onto every element reached. Relating
    /// `Person<->Venue` and then `Person<->Food` thereby implies
    /// `Venue<->Food`.
    ///
    /// Two reachable elements disagreeing on a kind mapping is a conflict,
    /// reported as an error rather than overwritten.
    pub fn relate(&mut self, a: usize, b: usize) -> Result<()> {
        let mut visited = HashSet::new();
        let mut queue = vec![a, b];
        while let Some(e) = queue.pop() {
            if !visited.insert(e) {
                continue;
            }
            for (_, linked) in self.elements[e].linked() {
                if !visited.contains(&linked) {
                    queue.push(linked);
                }
            }
        }

        let mut merged: Vec<Option<usize>> = vec![None; self.kinds.len()];
        for &e in &visited {
            for (kind, linked) in self.elements[e].linked() {
                match merged[kind] {
                    None => merged[kind] = Some(linked),
                    Some(existing) if existing == linked => {}
                    Some(existing) => {
                        return Err(Error::GraphConflict {
                            kind: self.kinds[kind].clone(),
                            left: self.elements[existing].id.clone(),
                            right: self.elements[linked].id.clone(),
                        });
                    }
                }
            }
        }

        trace!(
            target: "graph",
            "relate {} <-> {}: merged {} element(s)",
            self.elements[a].id,
            self.elements[b].id,
            visited.len()
        );

        for &e in &visited {
            self.elements[e].adopt(&merged);
        }
        Ok(())
    }

    /// True iff any pair in the list is mutually related under each other's
    /// kind. For two elements this is an exact "paired" check; for more it
    /// is existential over all pairs.
    pub fn are_linked(&self, elements: &[usize]) -> bool {
        for (i, &a) in elements.iter().enumerate() {
            for &b in &elements[i + 1..] {
                let ea = &self.elements[a];
                let eb = &self.elements[b];
                if ea.get(eb.kind) == Some(b) && eb.get(ea.kind) == Some(a) {
                    return true;
                }
            }
        }
        false
    }

    /// True iff every rule of the clue holds; stops at the first failure.
    pub fn validate_clue(&self, clue: &Clue) -> Result<bool> {
        for rule in &clue.rules {
            if !evaluator::evaluate(rule, self)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    pub fn validate_all_clues(&self) -> Result<bool> {
        for clue in &self.clues {
            if !self.validate_clue(clue)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Orders each clue's rules, then the clues themselves, cheapest checks
    /// first, so validation fails as early as possible.
    pub fn optimize_clues(&mut self) {
        for clue in self.clues.iter_mut() {
            clue.optimize_rules();
        }
        self.clues.sort_by_key(Clue::get_complexity);
    }

    /// Formats one solution as a small table, category names as the header.
    pub fn format_solution(&self, solution: &Solution) -> String {
        let mut widths: Vec<usize> = self.kinds.iter().map(String::len).collect();
        for row in &solution.rows {
            for (col, &e) in row.iter().enumerate() {
                widths[col] = widths[col].max(self.elements[e].id.len());
            }
        }

        let mut out = String::new();
        for (col, kind) in self.kinds.iter().enumerate() {
            out.push_str(&format!("{:<width$} ", kind, width = widths[col]));
        }
        out.push('\n');
        out.push_str(&"-".repeat(widths.iter().sum::<usize>() + widths.len()));
        out.push('\n');
        for row in &solution.rows {
            for (col, &e) in row.iter().enumerate() {
                out.push_str(&format!("{:<width$} ", self.elements[e].id, width = widths[col]));
            }
            out.push('\n');
        }
        out
    }
}
