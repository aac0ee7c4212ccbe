//! # Comandos del Servidor
//!
//! Handlers de cada ruta. Todos tienen la firma [`crate::router::Handler`]:
//! reciben el contexto de la ruta (store + parámetro) y el request, y
//! retornan una Response.
//!
//! - **basic**: `/`, `/echo/<texto>`, `/user-agent`
//! - **files**: `GET` y `POST` de `/files/<nombre>`

pub mod basic;
pub mod files;

// Re-exportar funciones útiles
pub use basic::*;
pub use files::*;
