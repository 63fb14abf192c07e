//! Reglas de selección sobre el buffer de trabajo.
//!
//! Las operaciones nunca fallan: una selección no permitida (máximo
//! alcanzado, incremento en un grupo sin cantidades, decremento de algo no
//! seleccionado) se descarta y se informa como `Rejected`.
use log::debug;
use menu_domain::{MenuItemOption, OptionGroup};
use serde::{Deserialize, Serialize};

/// Restricciones del paso activo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionRules {
    /// `None` = ilimitado.
    pub limit: Option<usize>,
    pub single_choice: bool,
    pub allow_quantity: bool,
    pub required: bool,
}

impl SelectionRules {
    pub fn for_group(group: &OptionGroup) -> Self {
        Self { limit: group.limit(),
               single_choice: group.is_single_choice(),
               allow_quantity: group.allow_quantity,
               required: group.is_required }
    }

    /// Elección única obligatoria (paso `Meat`).
    pub fn single_required() -> Self {
        Self { limit: Some(1),
               single_choice: true,
               allow_quantity: false,
               required: true }
    }

    pub fn unlimited() -> Self {
        Self::default()
    }

    fn at_limit(&self, count: usize) -> bool {
        self.limit.is_some_and(|max| count >= max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionOutcome {
    Applied,
    Rejected,
}

/// Selección binaria: reemplaza en elección única, alterna en el resto.
pub fn toggle(buffer: &mut Vec<MenuItemOption>, option: &MenuItemOption, rules: &SelectionRules) -> SelectionOutcome {
    if rules.single_choice {
        *buffer = vec![option.clone()];
        return SelectionOutcome::Applied;
    }
    if let Some(pos) = buffer.iter().position(|s| s.name == option.name) {
        buffer.retain(|s| s.name != option.name);
        debug!("toggle: '{}' deseleccionada (pos {})", option.name, pos);
        return SelectionOutcome::Applied;
    }
    if rules.at_limit(buffer.len()) {
        debug!("toggle: máximo alcanzado, '{}' descartada", option.name);
        return SelectionOutcome::Rejected;
    }
    buffer.push(option.clone());
    SelectionOutcome::Applied
}

/// Agrega otra instancia de la opción (grupos con cantidades).
pub fn increment(buffer: &mut Vec<MenuItemOption>, option: &MenuItemOption, rules: &SelectionRules) -> SelectionOutcome {
    if !rules.allow_quantity || rules.at_limit(buffer.len()) {
        return SelectionOutcome::Rejected;
    }
    buffer.push(option.clone());
    SelectionOutcome::Applied
}

/// Quita una instancia de la opción.
pub fn decrement(buffer: &mut Vec<MenuItemOption>, option: &MenuItemOption) -> SelectionOutcome {
    match buffer.iter().position(|s| s.name == option.name) {
        Some(pos) => {
            buffer.remove(pos);
            SelectionOutcome::Applied
        }
        None => SelectionOutcome::Rejected,
    }
}

/// Cantidad de instancias seleccionadas de una opción.
pub fn count_of(buffer: &[MenuItemOption], name: &str) -> usize {
    buffer.iter().filter(|s| s.name == name).count()
}
