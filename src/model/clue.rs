use crate::model::rule::Rule;

/// An ordered sequence of rule trees; all must hold for the clue to hold.
/// Rule order is mutable, subject to the cost-based optimizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Clue {
    pub rules: Vec<Rule>,
}

impl Clue {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn get_complexity(&self) -> usize {
        self.rules.iter().map(Rule::get_complexity).sum()
    }

    /// Reorders this clue's rules cheapest-first so validation fails as
    /// early as possible. Boolean results are unaffected.
    pub fn optimize_rules(&mut self) {
        for rule in self.rules.iter_mut() {
            rule.optimize();
        }
        self.rules.sort_by_key(|rule| rule.get_complexity());
    }
}
