use std::path::Path;

use serde::{Deserialize, Serialize};

use painter_core::Operation;

use crate::parser::{ParseError, ScriptParser};

/// One inbound payload: a named block of script text.
///
/// A script is the unit of submission. It parses to a single
/// [`Operation::List`] so the whole batch is posted, or rejected, at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub name: String,
    pub source: String,
}

impl Script {
    pub fn new(name: &str, source: &str) -> Self {
        Self {
            name: name.to_string(),
            source: source.to_string(),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ParseError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        Ok(Self {
            name: path.display().to_string(),
            source,
        })
    }

    pub fn parse(&self, parser: &ScriptParser) -> Result<Operation, ParseError> {
        let ops = parser.parse_str(&self.source)?;
        log::debug!("script {}: {} operations", self.name, ops.len());
        Ok(Operation::List(ops))
    }
}
