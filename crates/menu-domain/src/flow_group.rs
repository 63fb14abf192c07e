use serde::{Deserialize, Serialize};

/// Modo de precio/filtrado del flujo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum FlowMode {
    #[default]
    AlaCarte,
    Combo,
}

/// Disparador a nivel de categoría: los productos cuya categoría aparece en
/// `triggers` entran al flujo guiado comenzando por `Variation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowGroup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub triggers: Vec<String>,
    #[serde(default)]
    pub enable_combo_option: bool,
    #[serde(default)]
    pub ala_carte_steps: Vec<String>,
    #[serde(default)]
    pub combo_steps: Vec<String>,
}

impl FlowGroup {
    pub fn new(id: impl Into<String>, name: impl Into<String>, triggers: Vec<String>) -> Self {
        Self { id: id.into(),
               name: name.into(),
               triggers,
               enable_combo_option: false,
               ala_carte_steps: vec![],
               combo_steps: vec![] }
    }

    pub fn triggered_by(&self, category: &str) -> bool {
        self.triggers.iter().any(|t| t == category)
    }

    /// Lista declarada de pasos para el modo dado.
    pub fn declared_steps(&self, mode: FlowMode) -> &[String] {
        match mode {
            FlowMode::AlaCarte => &self.ala_carte_steps,
            FlowMode::Combo => &self.combo_steps,
        }
    }
}
