use menu_domain::{Catalog, CartItem, DisplayMode, DomainError, FlowMode, MenuItemOption};
use uuid::Uuid;

const CATALOG_JSON: &str = r##"{
  "items": [
    {"id": "classic", "name": "Classic Burger", "price": 10, "comboPrice": 15,
     "category": "Burgers", "meatType": "Beef",
     "linkedOptionGroupIds": ["size", "drink"]},
    {"id": "fries", "name": "Fries", "price": 4,
     "options": [{"name": "Cheese", "price": 1.5, "type": "addon"}]}
  ],
  "optionGroups": [
    {"id": "size", "name": "Size", "isRequired": true, "maxSelection": 1,
     "options": [{"name": "Regular", "price": 0, "type": "addon"},
                 {"name": "Large", "price": 2, "type": "addon"}]},
    {"id": "drink", "name": "Drink", "displayMode": "combo",
     "options": [{"name": "Cola", "price": 0, "type": "addon", "isComboTrigger": true}]}
  ],
  "meatCategories": [{"name": "Beef", "tagColor": "#1A1A1A"}],
  "flowGroups": [{"id": "fg", "name": "Burgers", "triggers": ["Burgers"], "enableComboOption": true,
                  "alaCarteSteps": ["Variation"], "comboSteps": ["Variation"]}]
}"##;

#[test]
fn parses_storefront_catalog_json() {
    let catalog = Catalog::from_json_str(CATALOG_JSON).expect("catalog should parse");
    let classic = catalog.item("classic").expect("classic exists");
    assert_eq!(classic.combo_price, Some(15.0));
    assert_eq!(classic.linked_option_group_ids, vec!["size", "drink"]);

    let drink = catalog.group("drink").expect("drink group");
    assert_eq!(drink.display_mode, DisplayMode::Combo);
    assert!(drink.options[0].is_combo_trigger);

    let fg = catalog.flow_group_for(classic).expect("flow group triggers on Burgers");
    assert!(fg.enable_combo_option);
    assert_eq!(fg.declared_steps(FlowMode::Combo), ["Variation".to_string()]);

    let fries = catalog.item("fries").unwrap();
    assert!(catalog.flow_group_for(fries).is_none());
    assert!(fries.has_inline_options());
}

#[test]
fn duplicate_option_names_fail_catalog_validation() {
    let raw = r#"{"optionGroups": [{"id": "g", "name": "G",
                   "options": [{"name": "A", "type": "addon"}, {"name": "A", "type": "addon"}]}]}"#;
    let err = Catalog::from_json_str(raw).unwrap_err();
    assert!(matches!(err, DomainError::ValidationError(_)));
}

#[test]
fn malformed_json_is_a_serialization_error() {
    let err = Catalog::from_json_str("{\"items\": 3}").unwrap_err();
    assert!(matches!(err, DomainError::SerializationError(_)));
}

#[test]
fn cart_item_totals_include_options_and_quantity() {
    let line = CartItem { uuid: Uuid::new_v4(),
                          menu_item_id: "classic".into(),
                          name: "Classic Burger".into(),
                          price: 15.0,
                          selected_options: vec![MenuItemOption::addon("Large", 2.0), MenuItemOption::addon("Egg", 1.5)],
                          qty: 2,
                          is_combo: true };
    assert_eq!(line.unit_total(), 18.5);
    assert_eq!(line.line_total(), 37.0);
}

#[test]
fn same_grouping_is_order_sensitive() {
    let a = MenuItemOption::addon("A", 1.0);
    let b = MenuItemOption::addon("B", 1.0);
    let line = CartItem { uuid: Uuid::new_v4(),
                          menu_item_id: "x".into(),
                          name: "X".into(),
                          price: 1.0,
                          selected_options: vec![a.clone(), b.clone()],
                          qty: 1,
                          is_combo: false };
    assert!(line.same_grouping("x", &[a.clone(), b.clone()], false));
    assert!(!line.same_grouping("x", &[b, a.clone()], false));
    assert!(!line.same_grouping("x", &[a], true));
}
