use serde::Deserialize;

use crate::ai::{FirstLegalMoveSelector, HeuristicSelector, HeuristicWeights, MoveSelector};
use crate::error::ConfigError;

/// Which selector drives computer-held seats.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComputerStrategy {
    #[default]
    Heuristic,
    FirstLegal,
}

/// Registry settings. Every field is optional when deserialized.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    pub heuristic: HeuristicWeights,
    pub computer: ComputerStrategy,
}

impl RegistryConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.heuristic.validate()
    }

    pub fn build_selector(&self) -> Box<dyn MoveSelector> {
        match self.computer {
            ComputerStrategy::Heuristic => Box::new(HeuristicSelector::new(self.heuristic)),
            ComputerStrategy::FirstLegal => Box::new(FirstLegalMoveSelector),
        }
    }
}
