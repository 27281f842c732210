pub mod evaluator;
pub mod game_state;
pub mod solver;

pub use game_state::Game;
pub use solver::find_solutions;

#[cfg(test)]
pub mod tests {
    use std::sync::Once;

    use test_context::TestContext;

    use crate::model::{KindDefinition, PuzzleDefinition};

    static INIT_LOGGER: Once = Once::new();

    pub struct UsingLogger {
        _value: String,
    }

    impl TestContext for UsingLogger {
        fn setup() -> UsingLogger {
            INIT_LOGGER.call_once(|| {
                env_logger::init();
            });

            UsingLogger {
                _value: "Hello, World!".to_string(),
            }
        }

        fn teardown(self) {
            // Perform any teardown you wish.
        }
    }

    /// Builds a clueless puzzle definition from (category, things) pairs.
    pub fn definition(kinds: &[(&str, &[&str])]) -> PuzzleDefinition {
        PuzzleDefinition {
            kinds: kinds
                .iter()
                .map(|(name, things)| KindDefinition {
                    name: name.to_string(),
                    things: things.iter().map(|t| t.to_string()).collect(),
                })
                .collect(),
            clues: vec![],
        }
    }
}
