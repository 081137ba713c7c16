//! Engine configuration loaded from JSON.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ChessResult;
use crate::search::board_scoring::{BoardScorer, MaterialScorer, PieceSquareScorer};
use crate::search::iterative_deepening::SearchConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationKind {
    Material,
    #[default]
    PieceSquare,
}

impl EvaluationKind {
    pub fn scorer(self) -> Box<dyn BoardScorer> {
        match self {
            EvaluationKind::Material => Box::new(MaterialScorer),
            EvaluationKind::PieceSquare => Box::new(PieceSquareScorer),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub search: SearchConfig,
    pub evaluation: EvaluationKind,
}

impl EngineConfig {
    pub fn from_json_str(text: &str) -> ChessResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> ChessResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> ChessResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
