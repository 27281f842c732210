mod clue;
mod element;
mod puzzle;
mod rule;
mod solution;
mod symbol;

pub use clue::Clue;
pub use element::Element;
pub use puzzle::{KindDefinition, PuzzleDefinition, RuleNode};
pub use rule::{
    parse_op, AdjacentDir, ArithOp, CombinatorOp, OrderOp, ParsedOp, PredicateOp, Rule, SortKey,
};
pub use solution::{Solution, SolveReport};
pub use symbol::Symbol;
