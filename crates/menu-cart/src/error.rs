use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum CartError {
    #[error("cart line {0} not found")] UnknownLine(Uuid),
    #[error("menu item '{0}' no longer exists in the catalog")] StaleItem(String),
}
