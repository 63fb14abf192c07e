//! menu-cart: carrito con fusión de líneas y edición en sitio.
pub mod cart;
pub mod error;

pub use cart::{grouped_options, Cart};
pub use error::CartError;
