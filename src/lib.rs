//! menuflow
//!
//! Librería de la tienda:
//! - `config`: configuración desde entorno (.env).
//! - `errors`: error de aplicación que agrupa dominio, flujo y carrito.
//! - `storefront`: cola única de acciones sobre el carrito y el flujo activo.
//!
//! El motor vive en `menu-core`; el catálogo en `menu-domain`; el carrito en
//! `menu-cart`.

pub mod config;
pub mod errors;
pub mod storefront;

pub use config::AppConfig;
pub use errors::AppError;
pub use storefront::{preview_steps, render_cart, Action, CustomizationPick, Dispatched, Storefront};
