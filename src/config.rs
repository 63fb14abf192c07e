//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) una sola vez y expone `AppConfig`.
//!
//! - `MENUFLOW_CATALOG`: ruta al catálogo JSON.
//! - `MENUFLOW_CURRENCY`: prefijo de moneda para mostrar precios (`RM`).
//! - `MENUFLOW_LOG`: filtro de logging (`info`).
use std::env;
use std::fs;
use std::path::PathBuf;

use dotenvy::dotenv;
use log::debug;
use menu_domain::Catalog;
use once_cell::sync::Lazy;

use crate::errors::AppError;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

pub const DEFAULT_CURRENCY: &str = "RM";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub catalog_path: Option<PathBuf>,
    pub currency: String,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { catalog_path: None,
               currency: DEFAULT_CURRENCY.to_string(),
               log_filter: DEFAULT_LOG_FILTER.to_string() }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Lazy::force(&DOTENV_LOADED);
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construye la configuración desde una fuente de variables arbitraria.
    pub fn from_lookup<F>(get: F) -> Self
        where F: Fn(&str) -> Option<String>
    {
        let non_empty = |key: &str| get(key).filter(|v| !v.trim().is_empty());
        Self { catalog_path: non_empty("MENUFLOW_CATALOG").map(PathBuf::from),
               currency: non_empty("MENUFLOW_CURRENCY").unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
               log_filter: non_empty("MENUFLOW_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()) }
    }

    /// Reemplaza la ruta del catálogo (p.ej. desde `--catalog`).
    pub fn with_catalog(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.catalog_path = path;
        }
        self
    }

    pub fn load_catalog(&self) -> Result<Catalog, AppError> {
        let path = self.catalog_path
                       .as_ref()
                       .ok_or_else(|| AppError::Config("MENUFLOW_CATALOG no definido".into()))?;
        debug!("cargando catálogo desde {}", path.display());
        let raw = fs::read_to_string(path)?;
        Ok(Catalog::from_json_str(&raw)?)
    }

    pub fn format_price(&self, amount: f64) -> String {
        format!("{} {:.2}", self.currency, amount)
    }
}
