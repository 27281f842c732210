use serde::{Deserialize, Serialize};

/// On-disk puzzle description: categories of items plus clue rule trees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzleDefinition {
    pub kinds: Vec<KindDefinition>,
    pub clues: Vec<Vec<RuleNode>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KindDefinition {
    pub name: String,
    pub things: Vec<String>,
}

/// One node of a clue rule tree as written in the puzzle file. For
/// predicate tags `args` holds symbol strings; for arithmetic tags a leading
/// number literal then symbol strings; for combinator tags nested nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleNode {
    pub func: String,
    pub args: Vec<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definition_round_trips() {
        let text = r#"{
            "kinds": [
                { "name": "Person", "things": ["A", "B"] },
                { "name": "Color", "things": ["Red", "Blue"] }
            ],
            "clues": [
                [ { "func": "link", "args": ["A", "Red"] } ],
                [ { "func": "nor", "args": [ { "func": "link", "args": ["B", "Red"] } ] } ]
            ]
        }"#;
        let def: PuzzleDefinition = serde_json::from_str(text).unwrap();
        assert_eq!(def.kinds.len(), 2);
        assert_eq!(def.kinds[1].things, vec!["Red", "Blue"]);
        assert_eq!(def.clues.len(), 2);
        assert_eq!(def.clues[1][0].func, "nor");
    }
}
