use menu_cart::CartError;
use menu_core::FlowError;
use menu_domain::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error de dominio: {0}")]
    Domain(#[from] DomainError),
    #[error("Error de flujo: {0}")]
    Flow(#[from] FlowError),
    #[error("Error de carrito: {0}")]
    Cart(#[from] CartError),
    #[error("Error en IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Script inválido: {0}")]
    Script(#[from] serde_json::Error),
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error("No hay un flujo abierto")]
    NoActiveFlow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_variant_from() {
        let err: AppError = FlowError::InvalidStepIndex(4).into();
        assert_eq!(err.to_string(), "Error de flujo: invalid step index 4");
    }

    #[test]
    fn test_io_variant_from() {
        let io_err = std::io::Error::other("falló IO");
        let err: AppError = io_err.into();
        assert_eq!(err.to_string(), "Error en IO: falló IO");
    }

    #[test]
    fn test_domain_variant_from() {
        let err: AppError = DomainError::ValidationError("id duplicado".into()).into();
        assert_eq!(err.to_string(), "Error de dominio: Error de validación: id duplicado");
    }

    #[test]
    fn test_config_variant_format() {
        let err = AppError::Config("mala configuración".into());
        assert_eq!(err.to_string(), "Error de configuración: mala configuración");
    }
}
