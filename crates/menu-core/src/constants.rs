//! Constantes del motor de flujo.

/// Versión lógica del secuenciador. Entra en el `sequence_hash` para que un
/// cambio de reglas produzca hashes distintos aunque los tokens coincidan.
pub const SEQUENCER_VERSION: &str = "S1.0";

/// Texto de resumen para un paso requerido sin selección.
pub const SUMMARY_REQUIRED: &str = "Required";

/// Texto de resumen para un paso opcional sin selección.
pub const SUMMARY_NONE: &str = "No Thanks";
