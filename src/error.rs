//! # Errores del Servidor
//! src/error.rs
//!
//! Error de nivel superior. Cada capa tiene su propio enum
//! ([`ParseError`], [`FrameError`], [`StoreError`], [`ConfigError`]) y solo
//! lo que escapa de una conexión o del arranque termina acá.

use std::io;
use thiserror::Error;

pub use crate::config::ConfigError;
pub use crate::http::{FrameError, ParseError};
pub use crate::store::StoreError;

/// Errores del servidor
#[derive(Debug, Error)]
pub enum ServerError {
    /// No se pudo abrir el listener
    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    /// Error de transporte en una conexión
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}
