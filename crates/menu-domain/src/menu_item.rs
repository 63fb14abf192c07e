use serde::{Deserialize, Serialize};

use crate::{FlowMode, MenuItemOption};

/// Producto del menú. Sólo lectura para el motor de flujo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combo_price: Option<f64>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub meat_type: String,
    #[serde(default)]
    pub description: String,
    /// Orden de pasos cuando existen grupos enlazados.
    #[serde(default)]
    pub linked_option_group_ids: Vec<String>,
    /// Opciones inline (paso `Addon` de respaldo).
    #[serde(default)]
    pub options: Vec<MenuItemOption>,
    #[serde(default)]
    pub is_hidden: bool,
}

impl MenuItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self { id: id.into(),
               name: name.into(),
               price,
               combo_price: None,
               category: String::new(),
               meat_type: String::new(),
               description: String::new(),
               linked_option_group_ids: vec![],
               options: vec![],
               is_hidden: false }
    }

    pub fn with_combo_price(mut self, price: f64) -> Self {
        self.combo_price = Some(price);
        self
    }

    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_meat(mut self, meat: impl Into<String>) -> Self {
        self.meat_type = meat.into();
        self
    }

    pub fn linked_to<I, S>(mut self, group_ids: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        self.linked_option_group_ids = group_ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_options(mut self, options: Vec<MenuItemOption>) -> Self {
        self.options = options;
        self
    }

    pub fn has_linked_groups(&self) -> bool {
        !self.linked_option_group_ids.is_empty()
    }

    pub fn has_inline_options(&self) -> bool {
        !self.options.is_empty()
    }

    /// Precio base según modo: `combo_price` sólo si está definido.
    pub fn base_price(&self, mode: FlowMode) -> f64 {
        match (mode, self.combo_price) {
            (FlowMode::Combo, Some(p)) => p,
            _ => self.price,
        }
    }

    /// Tipo de carne "fijo" del producto (vacío o `All` = sin filtro).
    pub fn meat_filter(&self) -> Option<&str> {
        match self.meat_type.as_str() {
            "" | "All" => None,
            m => Some(m),
        }
    }
}
