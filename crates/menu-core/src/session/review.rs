use menu_domain::MenuItemOption;
use serde::{Deserialize, Serialize};

/// Fila de la pantalla de revisión con su acción "Change".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewLine {
    /// Índice a usar con `jump_to_step`.
    pub step_index: usize,
    pub group_id: String,
    pub group_name: String,
    pub selections: Vec<MenuItemOption>,
    /// Nombres unidos por coma, o `Required` / `No Thanks` si está vacío.
    pub summary: String,
}
