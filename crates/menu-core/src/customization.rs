//! Sub-editor de personalización.
//!
//! Reúne los grupos `is_customization` enlazados al producto y produce una
//! única opción `addon` sintética con el nombre y el precio del producto
//! personalizado. Cada grupo aplica sus propias reglas de máximo y
//! cantidades.
use menu_domain::{sum_prices, Catalog, MenuItem, MenuItemOption, OptionGroup};

use crate::errors::FlowError;
use crate::selection::{self, SelectionOutcome, SelectionRules};

#[derive(Debug, Clone)]
pub struct CustomizationDraft<'c> {
    item: &'c MenuItem,
    groups: Vec<&'c OptionGroup>,
    picks: Vec<Vec<MenuItemOption>>, // paralelo a `groups`
}

impl<'c> CustomizationDraft<'c> {
    pub fn open(catalog: &'c Catalog, item: &'c MenuItem) -> Self {
        let groups: Vec<&OptionGroup> = catalog.customization_groups(item).collect();
        let picks = vec![Vec::new(); groups.len()];
        Self { item,
               groups,
               picks }
    }

    pub fn item(&self) -> &'c MenuItem {
        self.item
    }

    pub fn groups(&self) -> &[&'c OptionGroup] {
        &self.groups
    }

    pub fn has_groups(&self) -> bool {
        !self.groups.is_empty()
    }

    fn slot(&self, group_id: &str, option_name: &str) -> Result<(usize, MenuItemOption, SelectionRules), FlowError> {
        let pos = self.groups
                      .iter()
                      .position(|g| g.id == group_id)
                      .ok_or_else(|| FlowError::UnknownGroup(group_id.to_string()))?;
        let group = self.groups[pos];
        let option = group.option(option_name)
                          .cloned()
                          .ok_or_else(|| FlowError::UnknownOption(option_name.to_string()))?;
        Ok((pos, option, SelectionRules::for_group(group)))
    }

    pub fn toggle(&mut self, group_id: &str, option: &str) -> Result<SelectionOutcome, FlowError> {
        let (pos, option, rules) = self.slot(group_id, option)?;
        Ok(selection::toggle(&mut self.picks[pos], &option, &rules))
    }

    pub fn increment(&mut self, group_id: &str, option: &str) -> Result<SelectionOutcome, FlowError> {
        let (pos, option, rules) = self.slot(group_id, option)?;
        Ok(selection::increment(&mut self.picks[pos], &option, &rules))
    }

    pub fn decrement(&mut self, group_id: &str, option: &str) -> Result<SelectionOutcome, FlowError> {
        let (pos, option, _) = self.slot(group_id, option)?;
        Ok(selection::decrement(&mut self.picks[pos], &option))
    }

    /// Selecciones del grupo; vacío si el grupo no pertenece al producto.
    pub fn selected(&self, group_id: &str) -> &[MenuItemOption] {
        self.groups
            .iter()
            .position(|g| g.id == group_id)
            .map(|pos| self.picks[pos].as_slice())
            .unwrap_or(&[])
    }

    pub fn selections(&self) -> impl Iterator<Item = &MenuItemOption> + '_ {
        self.picks.iter().flatten()
    }

    /// Precio del producto personalizado (precio à la carte + deltas).
    pub fn price(&self) -> f64 {
        self.item.price + sum_prices(self.selections())
    }

    /// Sintetiza la opción `"<item> (<a>, <b>)"`.
    pub fn finish(self) -> MenuItemOption {
        let names: Vec<&str> = self.selections().map(|o| o.name.as_str()).collect();
        let name = if names.is_empty() {
            self.item.name.clone()
        } else {
            format!("{} ({})", self.item.name, names.join(", "))
        };
        MenuItemOption::addon(name, self.price())
    }
}
