use std::collections::HashMap;

use crate::error::{Error, Result};

/// Separator between an element id and a relationship hop in clue text.
const HOP_SEPARATOR: &str = "::";

/// A reference expression from clue text: either a bare element id, or
/// `Id::Kind` denoting the element related to `Id` under category `Kind`.
/// Exactly one hop is supported; chained lookups are rejected at load.
#[derive(Clone, PartialEq, Eq)]
pub struct Symbol {
    text: String,
    base: usize,
    hop: Option<usize>,
}

impl Symbol {
    /// Compiles the textual form against the puzzle's id and category
    /// indices. Unknown names fail here, before any solving begins.
    pub fn compile(text: &str, keys: &HashMap<String, usize>, kinds: &[String]) -> Result<Symbol> {
        let mut parts = text.split(HOP_SEPARATOR);
        let base_name = parts.next().unwrap_or_default();
        let hop_name = parts.next();
        if parts.next().is_some() {
            return Err(Error::MalformedRule(format!(
                "symbol `{text}` chains more than one relationship hop"
            )));
        }

        let base = *keys
            .get(base_name)
            .ok_or_else(|| Error::UnknownId(base_name.to_string()))?;
        let hop = match hop_name {
            None => None,
            Some(kind_name) => Some(
                kinds
                    .iter()
                    .position(|name| name == kind_name)
                    .ok_or_else(|| Error::UnknownKind(kind_name.to_string()))?,
            ),
        };

        Ok(Symbol {
            text: text.to_string(),
            base,
            hop,
        })
    }

    pub fn base(&self) -> usize {
        self.base
    }

    pub fn hop(&self) -> Option<usize> {
        self.hop
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl std::fmt::Debug for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}
