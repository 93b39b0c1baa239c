use serde::{Deserialize, Serialize};
use std::fmt;

/// Light phase governing which move probability applies to a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LightPhase {
    #[default]
    Green,
    Red,
}

impl LightPhase {
    /// Returns the other phase
    pub fn toggled(&self) -> Self {
        match self {
            LightPhase::Green => LightPhase::Red,
            LightPhase::Red => LightPhase::Green,
        }
    }

    pub fn is_red(&self) -> bool {
        matches!(self, LightPhase::Red)
    }

    /// Display label ("Green" / "Red")
    pub fn label(&self) -> &'static str {
        match self {
            LightPhase::Green => "Green",
            LightPhase::Red => "Red",
        }
    }
}

impl fmt::Display for LightPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
