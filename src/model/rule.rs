use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::model::puzzle::RuleNode;
use crate::model::symbol::Symbol;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Numeric,
    Alpha,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderOp {
    Less,
    LessEq,
    Greater,
    GreaterEq,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdjacentDir {
    Either,
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PredicateOp {
    Link,
    Same,
    Order(SortKey, OrderOp),
    Adjacent(SortKey, AdjacentDir),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombinatorOp {
    Or,
    And,
    Xor,
    Nand,
    /// N-ary none-of. `not` and bare `!` are aliases, not unary negation.
    Nor,
}

/// A parsed operator tag, before argument shapes are known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedOp {
    Predicate { op: PredicateOp, negated: bool },
    Arithmetic { op: ArithOp, negated: bool },
    Combinator(CombinatorOp),
}

/// Maps an operator tag from clue text to its typed form. A leading `!`
/// negates a predicate or arithmetic tag.
pub fn parse_op(tag: &str) -> Result<ParsedOp> {
    use AdjacentDir::*;
    use SortKey::*;

    match tag {
        "or" => return Ok(ParsedOp::Combinator(CombinatorOp::Or)),
        "and" => return Ok(ParsedOp::Combinator(CombinatorOp::And)),
        "xor" => return Ok(ParsedOp::Combinator(CombinatorOp::Xor)),
        "nand" => return Ok(ParsedOp::Combinator(CombinatorOp::Nand)),
        "nor" | "not" | "!" => return Ok(ParsedOp::Combinator(CombinatorOp::Nor)),
        _ => {}
    }

    let (negated, base) = match tag.strip_prefix('!') {
        Some(rest) => (true, rest),
        None => (false, tag),
    };

    let op = match base {
        "link" => PredicateOp::Link,
        "same" => PredicateOp::Same,
        "<" => PredicateOp::Order(Numeric, OrderOp::Less),
        "<=" => PredicateOp::Order(Numeric, OrderOp::LessEq),
        ">" => PredicateOp::Order(Numeric, OrderOp::Greater),
        ">=" => PredicateOp::Order(Numeric, OrderOp::GreaterEq),
        "<A" => PredicateOp::Order(Alpha, OrderOp::Less),
        "<=A" => PredicateOp::Order(Alpha, OrderOp::LessEq),
        ">A" => PredicateOp::Order(Alpha, OrderOp::Greater),
        ">=A" => PredicateOp::Order(Alpha, OrderOp::GreaterEq),
        "adj" => PredicateOp::Adjacent(Numeric, Either),
        "adj<" => PredicateOp::Adjacent(Numeric, Ascending),
        "adj>" => PredicateOp::Adjacent(Numeric, Descending),
        "adjA" => PredicateOp::Adjacent(Alpha, Either),
        "adj<A" => PredicateOp::Adjacent(Alpha, Ascending),
        "adj>A" => PredicateOp::Adjacent(Alpha, Descending),
        "+" => return Ok(ParsedOp::Arithmetic { op: ArithOp::Add, negated }),
        "-" => return Ok(ParsedOp::Arithmetic { op: ArithOp::Sub, negated }),
        "*" => return Ok(ParsedOp::Arithmetic { op: ArithOp::Mul, negated }),
        "/" => return Ok(ParsedOp::Arithmetic { op: ArithOp::Div, negated }),
        _ => {
            return Err(Error::MalformedRule(format!("unknown operator `{tag}`")));
        }
    };

    Ok(ParsedOp::Predicate { op, negated })
}

/// One node of a boolean expression tree: a predicate over symbols, an
/// arithmetic comparison, or a combinator over child rules. Immutable after
/// construction except for subrule ordering, which the optimizer permutes.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    Predicate {
        op: PredicateOp,
        negated: bool,
        terms: Vec<Symbol>,
    },
    Arithmetic {
        op: ArithOp,
        negated: bool,
        expected: f64,
        terms: Vec<Symbol>,
    },
    Combinator {
        op: CombinatorOp,
        subrules: Vec<Rule>,
    },
}

impl Rule {
    /// Compiles a rule node from the puzzle definition, failing fast on any
    /// malformed shape: unknown tags, a predicate given nested rules, a
    /// combinator given symbol strings, arithmetic without its leading
    /// number literal.
    pub fn compile(
        node: &RuleNode,
        keys: &HashMap<String, usize>,
        kinds: &[String],
    ) -> Result<Rule> {
        match parse_op(&node.func)? {
            ParsedOp::Combinator(op) => {
                if node.args.is_empty() {
                    return Err(Error::MalformedRule(format!(
                        "combinator `{}` has no subrules",
                        node.func
                    )));
                }
                let subrules = node
                    .args
                    .iter()
                    .map(|arg| {
                        let child: RuleNode =
                            serde_json::from_value(arg.clone()).map_err(|_| {
                                Error::MalformedRule(format!(
                                    "combinator `{}` expects nested rules",
                                    node.func
                                ))
                            })?;
                        Rule::compile(&child, keys, kinds)
                    })
                    .collect::<Result<Vec<Rule>>>()?;
                Ok(Rule::Combinator { op, subrules })
            }
            ParsedOp::Arithmetic { op, negated } => {
                let expected = node
                    .args
                    .first()
                    .and_then(|v| v.as_f64())
                    .ok_or_else(|| {
                        Error::MalformedRule(format!(
                            "arithmetic `{}` expects a leading number literal",
                            node.func
                        ))
                    })?;
                let terms = compile_terms(&node.func, &node.args[1..], keys, kinds)?;
                if terms.is_empty() {
                    return Err(Error::MalformedRule(format!(
                        "arithmetic `{}` has no operands",
                        node.func
                    )));
                }
                Ok(Rule::Arithmetic {
                    op,
                    negated,
                    expected,
                    terms,
                })
            }
            ParsedOp::Predicate { op, negated } => {
                let terms = compile_terms(&node.func, &node.args, keys, kinds)?;
                if terms.len() < 2 {
                    return Err(Error::MalformedRule(format!(
                        "predicate `{}` needs at least two symbols",
                        node.func
                    )));
                }
                Ok(Rule::Predicate { op, negated, terms })
            }
        }
    }

    /// Evaluation cost estimate: every node costs 1, link predicates cost an
    /// extra 1 for their pairwise linkage scan.
    pub fn get_complexity(&self) -> usize {
        match self {
            Rule::Predicate { op, .. } => match op {
                PredicateOp::Link => 2,
                _ => 1,
            },
            Rule::Arithmetic { .. } => 1,
            Rule::Combinator { subrules, .. } => {
                1 + subrules.iter().map(Rule::get_complexity).sum::<usize>()
            }
        }
    }

    /// Reorders combinator subrules cheapest-first, recursively. All
    /// combinators are commutative, so results are unaffected.
    pub fn optimize(&mut self) {
        if let Rule::Combinator { subrules, .. } = self {
            for rule in subrules.iter_mut() {
                rule.optimize();
            }
            subrules.sort_by_key(|rule| rule.get_complexity());
        }
    }
}

fn compile_terms(
    func: &str,
    args: &[serde_json::Value],
    keys: &HashMap<String, usize>,
    kinds: &[String],
) -> Result<Vec<Symbol>> {
    args.iter()
        .map(|arg| {
            let text = arg.as_str().ok_or_else(|| {
                Error::MalformedRule(format!("`{func}` expects symbol strings, got {arg}"))
            })?;
            Symbol::compile(text, keys, kinds)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fixture() -> (HashMap<String, usize>, Vec<String>) {
        let keys = HashMap::from([
            ("Leon".to_string(), 0),
            ("Yvette".to_string(), 1),
            ("Ham".to_string(), 2),
            ("Pork".to_string(), 3),
        ]);
        let kinds = vec!["Person".to_string(), "Food".to_string()];
        (keys, kinds)
    }

    fn node(value: serde_json::Value) -> RuleNode {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_parse_op_predicates() {
        assert_eq!(
            parse_op("link").unwrap(),
            ParsedOp::Predicate {
                op: PredicateOp::Link,
                negated: false
            }
        );
        assert_eq!(
            parse_op("!link").unwrap(),
            ParsedOp::Predicate {
                op: PredicateOp::Link,
                negated: true
            }
        );
        assert_eq!(
            parse_op("!<=A").unwrap(),
            ParsedOp::Predicate {
                op: PredicateOp::Order(SortKey::Alpha, OrderOp::LessEq),
                negated: true
            }
        );
        assert_eq!(
            parse_op("adj>A").unwrap(),
            ParsedOp::Predicate {
                op: PredicateOp::Adjacent(SortKey::Alpha, AdjacentDir::Descending),
                negated: false
            }
        );
    }

    #[test]
    fn test_parse_op_arithmetic_and_combinators() {
        assert_eq!(
            parse_op("!/").unwrap(),
            ParsedOp::Arithmetic {
                op: ArithOp::Div,
                negated: true
            }
        );
        assert_eq!(
            parse_op("nor").unwrap(),
            ParsedOp::Combinator(CombinatorOp::Nor)
        );
        // `not` and bare `!` alias `nor`
        assert_eq!(parse_op("not").unwrap(), parse_op("nor").unwrap());
        assert_eq!(parse_op("!").unwrap(), parse_op("nor").unwrap());
    }

    #[test]
    fn test_parse_op_unknown_tag() {
        assert!(matches!(
            parse_op("between"),
            Err(Error::MalformedRule(_))
        ));
    }

    #[test]
    fn test_compile_predicate() {
        let (keys, kinds) = fixture();
        let rule = Rule::compile(
            &node(json!({"func": "link", "args": ["Leon", "Ham"]})),
            &keys,
            &kinds,
        )
        .unwrap();
        assert!(matches!(
            rule,
            Rule::Predicate {
                op: PredicateOp::Link,
                negated: false,
                ..
            }
        ));
    }

    #[test]
    fn test_compile_nested_combinator() {
        let (keys, kinds) = fixture();
        let rule = Rule::compile(
            &node(json!({"func": "nor", "args": [
                {"func": "link", "args": ["Leon", "Ham"]},
                {"func": "link", "args": ["Yvette", "Pork"]},
            ]})),
            &keys,
            &kinds,
        )
        .unwrap();
        match rule {
            Rule::Combinator { op, subrules } => {
                assert_eq!(op, CombinatorOp::Nor);
                assert_eq!(subrules.len(), 2);
            }
            other => panic!("expected combinator, got {other:?}"),
        }
    }

    #[test]
    fn test_compile_combinator_rejects_symbol_args() {
        let (keys, kinds) = fixture();
        let result = Rule::compile(
            &node(json!({"func": "or", "args": ["Leon", "Ham"]})),
            &keys,
            &kinds,
        );
        assert!(matches!(result, Err(Error::MalformedRule(_))));
    }

    #[test]
    fn test_compile_predicate_rejects_nested_rules() {
        let (keys, kinds) = fixture();
        let result = Rule::compile(
            &node(json!({"func": "link", "args": [{"func": "same", "args": ["Leon", "Ham"]}]})),
            &keys,
            &kinds,
        );
        assert!(matches!(result, Err(Error::MalformedRule(_))));
    }

    #[test]
    fn test_compile_arithmetic_requires_leading_number() {
        let (keys, kinds) = fixture();
        let result = Rule::compile(
            &node(json!({"func": "+", "args": ["Leon", "Ham"]})),
            &keys,
            &kinds,
        );
        assert!(matches!(result, Err(Error::MalformedRule(_))));

        let rule = Rule::compile(
            &node(json!({"func": "+", "args": [3, "Leon", "Ham"]})),
            &keys,
            &kinds,
        )
        .unwrap();
        match rule {
            Rule::Arithmetic {
                op,
                negated,
                expected,
                terms,
            } => {
                assert_eq!(op, ArithOp::Add);
                assert!(!negated);
                assert_eq!(expected, 3.0);
                assert_eq!(terms.len(), 2);
            }
            other => panic!("expected arithmetic, got {other:?}"),
        }
    }

    #[test]
    fn test_compile_unknown_id_fails() {
        let (keys, kinds) = fixture();
        let result = Rule::compile(
            &node(json!({"func": "link", "args": ["Leon", "Turkey"]})),
            &keys,
            &kinds,
        );
        assert!(matches!(result, Err(Error::UnknownId(_))));
    }

    #[test]
    fn test_complexity_weights_link() {
        let (keys, kinds) = fixture();
        let link = Rule::compile(
            &node(json!({"func": "link", "args": ["Leon", "Ham"]})),
            &keys,
            &kinds,
        )
        .unwrap();
        let same = Rule::compile(
            &node(json!({"func": "same", "args": ["Leon", "Yvette"]})),
            &keys,
            &kinds,
        )
        .unwrap();
        assert_eq!(link.get_complexity(), 2);
        assert_eq!(same.get_complexity(), 1);

        let combined = Rule::Combinator {
            op: CombinatorOp::Or,
            subrules: vec![link, same],
        };
        assert_eq!(combined.get_complexity(), 4);
    }

    #[test]
    fn test_optimize_sorts_subrules_cheapest_first() {
        let (keys, kinds) = fixture();
        let mut rule = Rule::compile(
            &node(json!({"func": "or", "args": [
                {"func": "link", "args": ["Leon", "Ham"]},
                {"func": "same", "args": ["Leon", "Yvette"]},
            ]})),
            &keys,
            &kinds,
        )
        .unwrap();
        rule.optimize();
        match rule {
            Rule::Combinator { subrules, .. } => {
                assert_eq!(subrules[0].get_complexity(), 1);
                assert_eq!(subrules[1].get_complexity(), 2);
            }
            other => panic!("expected combinator, got {other:?}"),
        }
    }
}
