/// One valid world: K rows, each row holding one element index from every
/// category in category order, anchored on the first category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub rows: Vec<Vec<usize>>,
}

/// Outcome of a full search. Conflicted trials indicate an internal
/// invariant violation and are reported distinctly from "no solution found".
#[derive(Debug, Default)]
pub struct SolveReport {
    pub solutions: Vec<Solution>,
    pub worlds_tested: usize,
    pub conflicts: usize,
}
