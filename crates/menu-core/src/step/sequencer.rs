//! Secuenciador de pasos: función pura `(producto, modo, flow group) -> tokens`.
//!
//! Reglas:
//! - Con flow group: `[Meat]? Variation` + un token por grupo enlazado cuyo
//!   `display_mode` admite el modo actual.
//! - Sin flow group y con grupos enlazados: un token por grupo. Mientras el
//!   modo sea à la carte no se filtra (el modo aún no se conoce); en combo se
//!   filtra por `display_mode`.
//! - Sin grupos enlazados pero con opciones inline: `Addon`.
//! - Sin nada: lista vacía (alta directa al carrito).
//!
//! Los grupos de personalización nunca forman parte de la secuencia, y los ids
//! que no existen en el catálogo se omiten.
use log::warn;
use menu_domain::{Catalog, FlowGroup, FlowMode, MenuItem};
use serde_json::json;

use super::FlowStep;
use crate::constants::SEQUENCER_VERSION;
use crate::hashing::hash_value;

/// Entrada del secuenciador.
#[derive(Debug, Clone, Copy)]
pub struct SequenceRequest<'a> {
    pub item: &'a MenuItem,
    pub mode: FlowMode,
    pub flow_group: Option<&'a FlowGroup>,
    /// `true` si el filtro de carne ya viene fijado (omite el paso `Meat`).
    pub meat_preset: bool,
}

pub fn compute_steps(catalog: &Catalog, req: &SequenceRequest<'_>) -> Vec<FlowStep> {
    let mut steps = Vec::new();
    let item = req.item;

    if let Some(fg) = req.flow_group {
        let wants_meat = fg.declared_steps(req.mode).iter().any(|s| s == "Meat");
        if wants_meat && !req.meat_preset {
            steps.push(FlowStep::Meat);
        }
        steps.push(FlowStep::Variation);
        steps.extend(catalog.linked_groups(item)
                            .filter(|g| !g.is_customization && g.display_mode.allows(req.mode))
                            .map(|g| FlowStep::Group(g.id.clone())));
        return steps;
    }

    if item.has_linked_groups() {
        steps.extend(catalog.linked_groups(item)
                            .filter(|g| !g.is_customization)
                            .filter(|g| req.mode == FlowMode::AlaCarte || g.display_mode.allows(req.mode))
                            .map(|g| FlowStep::Group(g.id.clone())));
    } else if item.has_inline_options() {
        steps.push(FlowStep::Addon);
    }
    steps
}

/// Combina los pasos ya visitados (con su índice fijo) con la secuencia
/// recalculada: cada posición libre toma el siguiente token no visitado.
pub fn merge_visited(visited: &[(usize, FlowStep)], computed: Vec<FlowStep>) -> Vec<FlowStep> {
    let mut remaining = computed.into_iter()
                                .filter(|t| !visited.iter().any(|(_, v)| v == t));
    let mut out = Vec::new();
    let mut index = 0;
    loop {
        if let Some((_, step)) = visited.iter().find(|(i, _)| *i == index) {
            out.push(step.clone());
        } else if let Some(step) = remaining.next() {
            out.push(step);
        } else {
            // El historial es contiguo, así que no quedan huecos por llenar.
            // Si aun así los hay, los visitados restantes van al final.
            let mut rest: Vec<&(usize, FlowStep)> = visited.iter().filter(|(i, _)| *i > index).collect();
            if !rest.is_empty() {
                warn!("secuencia con hueco en el paso {index}; {} pasos visitados quedan al final", rest.len());
                rest.sort_by_key(|(i, _)| *i);
                out.extend(rest.into_iter().map(|(_, step)| step.clone()));
            }
            break;
        }
        index += 1;
    }
    out
}

/// Hash estable de una lista de pasos.
pub fn sequence_hash(steps: &[FlowStep]) -> String {
    let tokens: Vec<&str> = steps.iter().map(FlowStep::token).collect();
    hash_value(&json!({ "version": SEQUENCER_VERSION, "steps": tokens }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use menu_domain::{DisplayMode, MenuItemOption, OptionGroup};

    fn catalog() -> Catalog {
        Catalog::new(vec![MenuItem::new("burger", "Burger", 10.0).with_combo_price(15.0)
                                                               .in_category("Burgers")
                                                               .linked_to(["size", "side", "drink", "custom", "gone"]),
                          MenuItem::new("fries", "Fries", 4.0).with_options(vec![MenuItemOption::addon("Cheese", 1.0)]),
                          MenuItem::new("water", "Water", 1.0)],
                     vec![OptionGroup::new("size", "Size", vec![]).required().max(1),
                          OptionGroup::new("side", "Side", vec![]).display(DisplayMode::AlaCarte),
                          OptionGroup::new("drink", "Drink", vec![]).display(DisplayMode::Combo),
                          OptionGroup::new("custom", "Custom", vec![]).customization()])
    }

    fn tokens(steps: &[FlowStep]) -> Vec<&str> {
        steps.iter().map(FlowStep::token).collect()
    }

    #[test]
    fn direct_flow_is_unfiltered_until_combo() {
        let c = catalog();
        let item = c.item("burger").unwrap();
        let ala = compute_steps(&c, &SequenceRequest { item, mode: FlowMode::AlaCarte, flow_group: None, meat_preset: false });
        assert_eq!(tokens(&ala), vec!["size", "side", "drink"]);
        let combo = compute_steps(&c, &SequenceRequest { item, mode: FlowMode::Combo, flow_group: None, meat_preset: false });
        assert_eq!(tokens(&combo), vec!["size", "drink"]);
    }

    #[test]
    fn flow_group_starts_with_variation_and_filters() {
        let c = catalog();
        let item = c.item("burger").unwrap();
        let mut fg = FlowGroup::new("fg", "Burgers", vec!["Burgers".into()]);
        let steps = compute_steps(&c, &SequenceRequest { item, mode: FlowMode::AlaCarte, flow_group: Some(&fg), meat_preset: true });
        assert_eq!(tokens(&steps), vec!["Variation", "size", "side"]);

        fg.ala_carte_steps = vec!["Meat".into(), "Variation".into()];
        let with_meat = compute_steps(&c, &SequenceRequest { item, mode: FlowMode::AlaCarte, flow_group: Some(&fg), meat_preset: false });
        assert_eq!(tokens(&with_meat), vec!["Meat", "Variation", "size", "side"]);
        let preset = compute_steps(&c, &SequenceRequest { item, mode: FlowMode::AlaCarte, flow_group: Some(&fg), meat_preset: true });
        assert_eq!(tokens(&preset)[0], "Variation");
    }

    #[test]
    fn inline_options_fall_back_to_addon_and_empty_items_have_no_steps() {
        let c = catalog();
        let fries = compute_steps(&c, &SequenceRequest { item: c.item("fries").unwrap(), mode: FlowMode::AlaCarte, flow_group: None, meat_preset: false });
        assert_eq!(fries, vec![FlowStep::Addon]);
        let water = compute_steps(&c, &SequenceRequest { item: c.item("water").unwrap(), mode: FlowMode::AlaCarte, flow_group: None, meat_preset: false });
        assert!(water.is_empty());
    }

    #[test]
    fn merge_keeps_visited_positions() {
        let visited = vec![(0, FlowStep::Group("size".into())), (1, FlowStep::Group("side".into()))];
        let computed = vec![FlowStep::Group("size".into()), FlowStep::Group("drink".into())];
        let merged = merge_visited(&visited, computed);
        assert_eq!(tokens(&merged), vec!["size", "side", "drink"]);
    }

    #[test]
    fn merge_fills_gaps_in_order() {
        let visited = vec![(0, FlowStep::Variation), (2, FlowStep::Group("b".into()))];
        let computed = vec![FlowStep::Variation, FlowStep::Group("a".into()), FlowStep::Group("b".into()), FlowStep::Group("c".into())];
        assert_eq!(tokens(&merge_visited(&visited, computed)), vec!["Variation", "a", "b", "c"]);
    }

    #[test]
    fn merge_keeps_visited_tokens_when_nothing_fills_a_gap() {
        let visited = vec![(0, FlowStep::Variation), (3, FlowStep::Group("b".into()))];
        let computed = vec![FlowStep::Variation, FlowStep::Group("a".into())];
        assert_eq!(tokens(&merge_visited(&visited, computed)), vec!["Variation", "a", "b"]);
    }

    #[test]
    fn sequence_hash_changes_with_tokens() {
        let a = sequence_hash(&[FlowStep::Variation]);
        let b = sequence_hash(&[FlowStep::Variation, FlowStep::Addon]);
        assert_ne!(a, b);
        assert_eq!(a, sequence_hash(&[FlowStep::Variation]));
    }
}
