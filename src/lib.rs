//! # File Echo Server
//! src/lib.rs
//!
//! Servidor HTTP minimalista implementado desde cero: acepta conexiones TCP,
//! lee exactamente un request por conexión, lo despacha según método y path,
//! escribe la response y cierra.
//!
//! ## Arquitectura
//!
//! - `http`: framing, parsing de requests y construcción de responses
//! - `server`: listener TCP y ciclo de vida de cada conexión
//! - `router`: despacho por `(método, path)`
//! - `commands`: handlers de cada ruta
//! - `store`: lectura/escritura de archivos para `/files/`
//! - `config`: argumentos CLI y variables de entorno
//! - `error`, `logging`: ambiente común
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use file_echo_server::config::Config;
//! use file_echo_server::server::Server;
//!
//! let config = Config::default();
//! let server = Server::from_config(&config).expect("Error al iniciar servidor");
//! server.run().expect("Error en el loop de accept");
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod router;
pub mod server;
pub mod store;
