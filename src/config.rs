//! # Configuración del Servidor
//! src/config.rs
//!
//! Configuración del servidor con soporte para argumentos CLI y variables de
//! entorno. Se parsea una vez al arrancar y después es de solo lectura: cada
//! conexión la recibe dentro de un `Arc`.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./file_echo_server --directory /tmp/files --port 4221 --read-timeout-ms 2000
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=8080 SERVE_DIR=/srv/files LOG_LEVEL=debug ./file_echo_server
//! ```

use clap::Parser;
use log::{info, LevelFilter};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::http::framing::DEFAULT_MAX_REQUEST_BYTES;

/// Mínimo aceptado para `--max-request-bytes`
pub const MIN_REQUEST_BYTES: usize = 1024;

/// Errores de validación de la configuración
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Read timeout must be > 0")]
    ZeroReadTimeout,

    #[error("Write timeout must be > 0")]
    ZeroWriteTimeout,

    #[error("Max request size must be >= {min} bytes (got {got})")]
    RequestLimitTooSmall { min: usize, got: usize },

    #[error("Unknown log level: {0:?}")]
    InvalidLogLevel(String),

    #[error("Directory does not exist: {0}")]
    DirectoryNotFound(String),
}

/// Configuración del servidor
#[derive(Debug, Clone, Parser)]
#[command(name = "file_echo_server")]
#[command(about = "Servidor HTTP minimalista: echo, user-agent y archivos")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Host/IP en el que escucha
    #[arg(long, default_value = "0.0.0.0", env = "HTTP_HOST")]
    pub host: String,

    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "4221", env = "HTTP_PORT")]
    pub port: u16,

    /// Directorio desde donde se sirven y guardan los archivos de /files/
    #[arg(short, long, default_value = ".", env = "SERVE_DIR")]
    pub directory: String,

    // === Timeouts ===

    /// Timeout de lectura por conexión en milisegundos
    #[arg(long = "read-timeout-ms", default_value = "5000", env = "READ_TIMEOUT_MS")]
    pub read_timeout_ms: u64,

    /// Timeout de escritura por conexión en milisegundos
    #[arg(long = "write-timeout-ms", default_value = "5000", env = "WRITE_TIMEOUT_MS")]
    pub write_timeout_ms: u64,

    // === Límites ===

    /// Tamaño máximo de un request completo (head + body) en bytes
    #[arg(long = "max-request-bytes", default_value_t = DEFAULT_MAX_REQUEST_BYTES, env = "MAX_REQUEST_BYTES")]
    pub max_request_bytes: usize,

    // === Logging ===

    /// Nivel de log: off, error, warn, info, debug, trace
    #[arg(long = "log-level", default_value = "info", env = "LOG_LEVEL")]
    pub log_level: String,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use file_echo_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "0.0.0.0:4221");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.write_timeout_ms)
    }

    /// Convierte `log_level` al filtro de `log`
    pub fn log_level_filter(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level
            .parse::<LevelFilter>()
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }

    /// Valida la configuración
    ///
    /// Retorna el primer valor inválido encontrado.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.read_timeout_ms == 0 {
            return Err(ConfigError::ZeroReadTimeout);
        }
        if self.write_timeout_ms == 0 {
            return Err(ConfigError::ZeroWriteTimeout);
        }

        if self.max_request_bytes < MIN_REQUEST_BYTES {
            return Err(ConfigError::RequestLimitTooSmall {
                min: MIN_REQUEST_BYTES,
                got: self.max_request_bytes,
            });
        }

        self.log_level_filter()?;

        if !Path::new(&self.directory).is_dir() {
            return Err(ConfigError::DirectoryNotFound(self.directory.clone()));
        }

        Ok(())
    }

    /// Registra un resumen de la configuración
    pub fn print_summary(&self) {
        info!("🌐 Address:       {}", self.address());
        info!("📁 Directory:     {}", self.directory);
        info!(
            "⏱  Timeouts:      read {} ms / write {} ms",
            self.read_timeout_ms, self.write_timeout_ms
        );
        info!("📦 Max request:   {} bytes", self.max_request_bytes);
        info!("📝 Log level:     {}", self.log_level);
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4221,
            directory: ".".to_string(),
            read_timeout_ms: 5_000,
            write_timeout_ms: 5_000,
            max_request_bytes: DEFAULT_MAX_REQUEST_BYTES,
            log_level: "info".to_string(),
        }
    }
}
