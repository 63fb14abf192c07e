//! Catálogo en memoria: productos, grupos de opciones, categorías de carne y
//! flow groups.
//!
//! El motor de flujo sólo lo lee; las mutaciones pertenecen al back office.
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::{DomainError, FlowGroup, MenuItem, MenuItemOption, OptionGroup};

/// Categoría de carne usada por el paso `Meat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeatCategory {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default)]
    pub items: Vec<MenuItem>,
    #[serde(default)]
    pub option_groups: Vec<OptionGroup>,
    #[serde(default)]
    pub meat_categories: Vec<MeatCategory>,
    #[serde(default)]
    pub flow_groups: Vec<FlowGroup>,
}

impl Catalog {
    pub fn new(items: Vec<MenuItem>, option_groups: Vec<OptionGroup>) -> Self {
        Self { items,
               option_groups,
               meat_categories: vec![],
               flow_groups: vec![] }
    }

    pub fn with_meat_categories<I, S>(mut self, names: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        self.meat_categories = names.into_iter()
                                    .map(|n| MeatCategory { name: n.into(),
                                                            tag_color: None })
                                    .collect();
        self
    }

    pub fn with_flow_group(mut self, group: FlowGroup) -> Self {
        self.flow_groups.push(group);
        self
    }

    /// Parsea y valida un catálogo JSON.
    pub fn from_json_str(raw: &str) -> Result<Self, DomainError> {
        let catalog: Catalog = serde_json::from_str(raw)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Ids de producto y de grupo únicos; nombres de opción únicos por grupo.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut ids = HashSet::new();
        for item in &self.items {
            if !ids.insert(item.id.as_str()) {
                return Err(DomainError::ValidationError(format!("Producto duplicado: {}", item.id)));
            }
        }
        let mut group_ids = HashSet::new();
        for group in &self.option_groups {
            if !group_ids.insert(group.id.as_str()) {
                return Err(DomainError::ValidationError(format!("Grupo duplicado: {}", group.id)));
            }
            group.validate()?;
        }
        for item in &self.items {
            for gid in self.missing_groups(item) {
                warn!("grupo enlazado '{}' no existe (producto {}); se omite", gid, item.id);
            }
        }
        Ok(())
    }

    pub fn item(&self, id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn group(&self, id: &str) -> Option<&OptionGroup> {
        self.option_groups.iter().find(|g| g.id == id)
    }

    /// Primer flow group cuyo trigger coincide con la categoría del producto.
    pub fn flow_group_for(&self, item: &MenuItem) -> Option<&FlowGroup> {
        self.flow_groups.iter().find(|g| g.triggered_by(&item.category))
    }

    /// Grupos enlazados que existen en el catálogo, en el orden del producto.
    /// Los ids que no resuelven se omiten en silencio; ver `missing_groups`.
    pub fn linked_groups<'a>(&'a self, item: &'a MenuItem) -> impl Iterator<Item = &'a OptionGroup> + 'a {
        item.linked_option_group_ids.iter().filter_map(move |gid| self.group(gid))
    }

    /// Ids enlazados por `item` que no existen en el catálogo.
    pub fn missing_groups<'a>(&self, item: &'a MenuItem) -> Vec<&'a str> {
        item.linked_option_group_ids
            .iter()
            .filter(|gid| self.group(gid).is_none())
            .map(String::as_str)
            .collect()
    }

    pub fn customization_groups<'a>(&'a self, item: &'a MenuItem) -> impl Iterator<Item = &'a OptionGroup> + 'a {
        self.linked_groups(item).filter(|g| g.is_customization)
    }

    /// Alternativas para el paso `Variation`: misma categoría, mismo tipo de
    /// carne si hay filtro, excluyendo el propio producto y los ocultos.
    pub fn variations<'a>(&'a self, item: &MenuItem, meat_filter: Option<&str>) -> Vec<&'a MenuItem> {
        self.items
            .iter()
            .filter(|i| {
                i.category == item.category
                && i.id != item.id
                && !i.is_hidden
                && meat_filter.map_or(true, |m| i.meat_type == m)
            })
            .collect()
    }

    /// Opciones del paso `Meat`: una preferencia sin costo por categoría.
    pub fn meat_options(&self) -> Vec<MenuItemOption> {
        self.meat_categories.iter().map(|c| MenuItemOption::preference(c.name.clone())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        Catalog::new(vec![MenuItem::new("b1", "Classic", 10.0).in_category("Burgers").with_meat("Beef").linked_to(["size", "ghost"]),
                          MenuItem::new("b2", "Double", 12.0).in_category("Burgers").with_meat("Beef"),
                          MenuItem::new("b3", "Crispy", 11.0).in_category("Burgers").with_meat("Chicken"),
                          MenuItem { is_hidden: true,
                                     ..MenuItem::new("b4", "Secret", 9.0).in_category("Burgers").with_meat("Beef") },],
                     vec![OptionGroup::new("size", "Size", vec![MenuItemOption::addon("Regular", 0.0)])])
    }

    #[test]
    fn linked_groups_skip_unresolvable_ids() {
        let catalog = sample();
        let item = catalog.item("b1").unwrap();
        let ids: Vec<&str> = catalog.linked_groups(item).map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["size"]);
        assert_eq!(catalog.missing_groups(item), vec!["ghost"]);
        assert!(catalog.missing_groups(catalog.item("b2").unwrap()).is_empty());
    }

    #[test]
    fn variations_respect_meat_filter_and_visibility() {
        let catalog = sample();
        let item = catalog.item("b1").unwrap();
        let all: Vec<&str> = catalog.variations(item, None).iter().map(|i| i.id.as_str()).collect();
        assert_eq!(all, vec!["b2", "b3"]);
        let beef: Vec<&str> = catalog.variations(item, Some("Beef")).iter().map(|i| i.id.as_str()).collect();
        assert_eq!(beef, vec!["b2"]);
    }

    #[test]
    fn validate_rejects_duplicate_items() {
        let mut catalog = sample();
        catalog.items.push(MenuItem::new("b1", "Clone", 1.0));
        assert!(matches!(catalog.validate(), Err(DomainError::ValidationError(_))));
    }

    #[test]
    fn meat_options_are_free_preferences() {
        let catalog = sample().with_meat_categories(["Beef", "Chicken"]);
        let opts = catalog.meat_options();
        assert_eq!(opts.len(), 2);
        assert!(opts.iter().all(|o| o.price == 0.0 && !o.is_addon()));
    }
}
