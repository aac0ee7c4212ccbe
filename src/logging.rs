//! # Logging
//! src/logging.rs
//!
//! Inicializa el backend de `log` con `simplelog`, escribiendo a stderr.

use log::{LevelFilter, SetLoggerError};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

/// Configuración de formato: timestamp RFC 3339 y nombre del thread
fn prepare_logger_config() -> simplelog::Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_thread_level(LevelFilter::Info)
        .set_target_level(LevelFilter::Off)
        .build()
}

/// Instala el logger global
///
/// Solo puede haber un logger por proceso: una segunda llamada retorna
/// `Err` y el logger original sigue activo.
pub fn init_logger(level: LevelFilter) -> Result<(), SetLoggerError> {
    TermLogger::init(
        level,
        prepare_logger_config(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
}
