//! # File Echo Server - Entry Point
//! src/main.rs
//!
//! Parsea la configuración, inicializa el logging y corre el loop de accept
//! hasta que el proceso termine.

use file_echo_server::config::Config;
use file_echo_server::logging;
use file_echo_server::server::Server;
use log::{error, LevelFilter};

fn main() {
    let config = Config::new();

    let level = config.log_level_filter().unwrap_or(LevelFilter::Info);
    if let Err(e) = logging::init_logger(level) {
        eprintln!("No se pudo inicializar el logger: {}", e);
    }

    config.print_summary();

    let server = match Server::from_config(&config) {
        Ok(server) => server,
        Err(e) => {
            error!("💥 Error fatal: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run() {
        error!("💥 Error fatal: {}", e);
        std::process::exit(1);
    }
}
