use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::{DomainError, FlowMode, MenuItemOption};

/// Modo en que un grupo aparece como paso del flujo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum DisplayMode {
    #[default]
    Both,
    Combo,
    AlaCarte,
}

impl DisplayMode {
    /// `true` si el grupo debe mostrarse en el modo indicado.
    pub fn allows(self, mode: FlowMode) -> bool {
        match self {
            DisplayMode::Both => true,
            DisplayMode::Combo => mode == FlowMode::Combo,
            DisplayMode::AlaCarte => mode == FlowMode::AlaCarte,
        }
    }
}

/// Grupo de opciones enlazado a uno o más productos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionGroup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub options: Vec<MenuItemOption>,
    #[serde(default)]
    pub is_required: bool,
    /// 0 = sin límite, 1 = elección única (reemplaza).
    #[serde(default)]
    pub max_selection: u32,
    #[serde(default)]
    pub display_mode: DisplayMode,
    #[serde(default)]
    pub is_customization: bool,
    #[serde(default)]
    pub allow_quantity: bool,
}

impl OptionGroup {
    pub fn new(id: impl Into<String>, name: impl Into<String>, options: Vec<MenuItemOption>) -> Self {
        Self { id: id.into(),
               name: name.into(),
               options,
               is_required: false,
               max_selection: 0,
               display_mode: DisplayMode::Both,
               is_customization: false,
               allow_quantity: false }
    }

    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    pub fn max(mut self, max_selection: u32) -> Self {
        self.max_selection = max_selection;
        self
    }

    pub fn display(mut self, mode: DisplayMode) -> Self {
        self.display_mode = mode;
        self
    }

    pub fn customization(mut self) -> Self {
        self.is_customization = true;
        self
    }

    pub fn with_quantity(mut self) -> Self {
        self.allow_quantity = true;
        self
    }

    pub fn is_single_choice(&self) -> bool {
        self.max_selection == 1
    }

    /// Límite efectivo (None = ilimitado).
    pub fn limit(&self) -> Option<usize> {
        (self.max_selection > 0).then_some(self.max_selection as usize)
    }

    pub fn option(&self, name: &str) -> Option<&MenuItemOption> {
        self.options.iter().find(|o| o.name == name)
    }

    /// Los nombres de opción deben ser únicos dentro del grupo.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        for opt in &self.options {
            if !seen.insert(opt.name.as_str()) {
                return Err(DomainError::ValidationError(format!("Opción duplicada '{}' en grupo {}", opt.name, self.id)));
            }
        }
        Ok(())
    }
}
