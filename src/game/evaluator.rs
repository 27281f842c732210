use crate::error::{Error, Result};
use crate::game::game_state::Game;
use crate::model::{AdjacentDir, ArithOp, CombinatorOp, OrderOp, PredicateOp, Rule, SortKey, Symbol};

/// Tolerance for arithmetic comparisons; quotients divide integers and land
/// on inexact floats.
const ARITH_EPSILON: f64 = 0.001;

/// Resolves a symbol to an element index: a bare id directly, `Id::Kind`
/// through one relationship hop. A missing hop is an error, never a silent
/// `false` — after full realization every hop exists, so this only fires on
/// unrealized graphs or puzzle-definition defects.
pub fn resolve(symbol: &Symbol, game: &Game) -> Result<usize> {
    match symbol.hop() {
        None => Ok(symbol.base()),
        Some(kind) => {
            let base = game.element(symbol.base());
            base.get(kind).ok_or_else(|| Error::MissingRelationship {
                id: base.id.clone(),
                kind: game.kind_name(kind).to_string(),
            })
        }
    }
}

/// Evaluates a rule tree against the game's current relationship state.
pub fn evaluate(rule: &Rule, game: &Game) -> Result<bool> {
    match rule {
        Rule::Predicate { op, negated, terms } => {
            let ts = resolve_all(terms, game)?;
            let holds = match op {
                PredicateOp::Link => game.are_linked(&ts),
                PredicateOp::Same => ts.windows(2).all(|pair| pair[0] == pair[1]),
                PredicateOp::Order(key, ord) => match key {
                    SortKey::Numeric => {
                        let values = numeric_values(&ts, game)?;
                        ordered(&values, *ord)
                    }
                    SortKey::Alpha => {
                        let values: Vec<String> =
                            ts.iter().map(|&e| game.element(e).alpha_value()).collect();
                        ordered(&values, *ord)
                    }
                },
                PredicateOp::Adjacent(key, dir) => adjacent(&ts, *key, *dir, game)?,
            };
            Ok(holds != *negated)
        }
        Rule::Arithmetic {
            op,
            negated,
            expected,
            terms,
        } => {
            let ts = resolve_all(terms, game)?;
            let values = numeric_values(&ts, game)?;
            let mut acc = values[0] as f64;
            for &value in &values[1..] {
                let value = value as f64;
                acc = match op {
                    ArithOp::Add => acc + value,
                    ArithOp::Sub => acc - value,
                    ArithOp::Mul => acc * value,
                    ArithOp::Div => {
                        if value == 0.0 {
                            return Err(Error::DivisionByZero);
                        }
                        acc / value
                    }
                };
            }
            let holds = (acc - expected).abs() < ARITH_EPSILON;
            Ok(holds != *negated)
        }
        Rule::Combinator { op, subrules } => match op {
            CombinatorOp::Or => {
                for rule in subrules {
                    if evaluate(rule, game)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            CombinatorOp::And => {
                for rule in subrules {
                    if !evaluate(rule, game)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            CombinatorOp::Xor => {
                let mut count = 0;
                for rule in subrules {
                    if evaluate(rule, game)? {
                        count += 1;
                    }
                }
                Ok(count == 1)
            }
            CombinatorOp::Nand => {
                for rule in subrules {
                    if !evaluate(rule, game)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            CombinatorOp::Nor => {
                for rule in subrules {
                    if evaluate(rule, game)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
        },
    }
}

fn resolve_all(terms: &[Symbol], game: &Game) -> Result<Vec<usize>> {
    terms.iter().map(|symbol| resolve(symbol, game)).collect()
}

fn numeric_values(elements: &[usize], game: &Game) -> Result<Vec<i64>> {
    elements
        .iter()
        .map(|&e| game.element(e).numeric_value())
        .collect()
}

fn ordered<T: PartialOrd>(values: &[T], ord: OrderOp) -> bool {
    values.windows(2).all(|pair| match ord {
        OrderOp::Less => pair[0] < pair[1],
        OrderOp::LessEq => pair[0] <= pair[1],
        OrderOp::Greater => pair[0] > pair[1],
        OrderOp::GreaterEq => pair[0] >= pair[1],
    })
}

/// Positions of consecutive terms within the first term's category, sorted
/// by the given key, must differ by exactly 1 (in the required direction).
fn adjacent(ts: &[usize], key: SortKey, dir: AdjacentDir, game: &Game) -> Result<bool> {
    let first_kind = game.element(ts[0]).kind;
    let fellows = game.fellows(first_kind);

    let sorted: Vec<usize> = match key {
        SortKey::Numeric => {
            let mut keyed: Vec<(i64, usize)> = fellows
                .iter()
                .map(|&f| game.element(f).numeric_value().map(|v| (v, f)))
                .collect::<Result<_>>()?;
            keyed.sort();
            keyed.into_iter().map(|(_, f)| f).collect()
        }
        SortKey::Alpha => {
            let mut keyed: Vec<(String, usize)> = fellows
                .iter()
                .map(|&f| (game.element(f).alpha_value(), f))
                .collect();
            keyed.sort();
            keyed.into_iter().map(|(_, f)| f).collect()
        }
    };

    let position = |e: usize| -> Result<isize> {
        sorted
            .iter()
            .position(|&f| f == e)
            .map(|p| p as isize)
            .ok_or_else(|| Error::KindMismatch {
                id: game.element(e).id.clone(),
                kind: game.kind_name(first_kind).to_string(),
            })
    };

    for pair in ts.windows(2) {
        let a = position(pair[0])?;
        let b = position(pair[1])?;
        let holds = match dir {
            AdjacentDir::Either => (b - a).abs() == 1,
            AdjacentDir::Ascending => b - a == 1,
            AdjacentDir::Descending => a - b == 1,
        };
        if !holds {
            return Ok(false);
        }
    }
    Ok(true)
}
