use thiserror::Error;

/// Errores del modelo de catálogo.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Error de validación: {0}")]
    ValidationError(String),

    #[error("Error de serialización: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::SerializationError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_variant_format() {
        let err = DomainError::ValidationError("grupo inválido".into());
        assert_eq!(err.to_string(), "Error de validación: grupo inválido");
    }

    #[test]
    fn test_serialization_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: DomainError = serde_err.into();
        assert!(err.to_string().starts_with("Error de serialización:"));
    }
}
