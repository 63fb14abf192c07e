use serde::{Deserialize, Serialize};

/// Clase de opción: suma al pedido (`addon`) o sólo anota una preferencia.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum OptionType {
    #[default]
    Addon,
    Preference,
}

/// Opción seleccionable dentro de un grupo.
///
/// El `name` actúa como identidad dentro del grupo. La igualdad es por valor
/// completo (todos los campos), que es la que usa el carrito para fusionar
/// líneas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemOption {
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(rename = "type", default)]
    pub option_type: OptionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub is_combo_trigger: bool,
}

impl MenuItemOption {
    pub fn addon(name: impl Into<String>, price: f64) -> Self {
        Self { name: name.into(),
               price,
               option_type: OptionType::Addon,
               image_url: None,
               description: None,
               is_combo_trigger: false }
    }

    pub fn preference(name: impl Into<String>) -> Self {
        Self { option_type: OptionType::Preference,
               ..Self::addon(name, 0.0) }
    }

    /// Marca la opción como disparador de modo combo.
    pub fn combo_trigger(mut self) -> Self {
        self.is_combo_trigger = true;
        self
    }

    pub fn is_addon(&self) -> bool {
        self.option_type == OptionType::Addon
    }
}

/// Suma de precios de un conjunto de opciones.
pub fn sum_prices<'a, I>(options: I) -> f64
    where I: IntoIterator<Item = &'a MenuItemOption>
{
    options.into_iter().map(|o| o.price).sum()
}
