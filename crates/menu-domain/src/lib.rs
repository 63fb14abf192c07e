// menu-domain library entry point
pub mod cart_item;
pub mod catalog;
pub mod error;
pub mod flow_group;
pub mod menu_item;
pub mod option;
pub mod option_group;

pub use cart_item::CartItem;
pub use catalog::{Catalog, MeatCategory};
pub use error::DomainError;
pub use flow_group::{FlowGroup, FlowMode};
pub use menu_item::MenuItem;
pub use option::{sum_prices, MenuItemOption, OptionType};
pub use option_group::{DisplayMode, OptionGroup};
