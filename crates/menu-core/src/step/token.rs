use serde::{Deserialize, Serialize};
use std::fmt;

/// Identificador de un paso.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlowStep {
    Meat,
    Variation,
    /// Paso de respaldo con las opciones inline del producto.
    Addon,
    /// Paso por grupo de opciones enlazado.
    Group(String),
}

impl FlowStep {
    pub fn parse(token: &str) -> Self {
        match token {
            "Meat" => FlowStep::Meat,
            "Variation" => FlowStep::Variation,
            "Addon" => FlowStep::Addon,
            other => FlowStep::Group(other.to_string()),
        }
    }

    pub fn token(&self) -> &str {
        match self {
            FlowStep::Meat => "Meat",
            FlowStep::Variation => "Variation",
            FlowStep::Addon => "Addon",
            FlowStep::Group(id) => id,
        }
    }

    pub fn group_id(&self) -> Option<&str> {
        match self {
            FlowStep::Group(id) => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for FlowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
