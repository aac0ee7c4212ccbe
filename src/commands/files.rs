//! # Comandos de Archivos
//! src/commands/files.rs
//!
//! - `GET /files/<nombre>`: lee del store (404 si no se puede leer)
//! - `POST /files/<nombre>`: escribe el body en el store (500 si falla)
//!
//! Un nombre inválido (`..`, ruta absoluta, ...) se responde con 400 en
//! ambos casos, antes de tocar el store.

use crate::http::{Request, Response, StatusCode};
use crate::router::RouteContext;
use crate::store::StoreError;
use log::{debug, error, warn};

/// Handler para `GET /files/<nombre>`
///
/// # Ejemplo de response
/// ```text
/// HTTP/1.1 200 OK
/// Content-Type: application/octet-stream
/// Content-Length: 2
///
/// hi
/// ```
pub fn read_file_handler(ctx: &RouteContext<'_>, _req: &Request) -> Response {
    match ctx.store.read(ctx.param) {
        Ok(contents) => Response::new(StatusCode::Ok)
            .with_header("Content-Type", "application/octet-stream")
            .with_body_bytes(contents),
        Err(StoreError::InvalidName(name)) => {
            warn!("Nombre de archivo rechazado: {:?}", name);
            Response::new(StatusCode::BadRequest)
        }
        Err(StoreError::NotFound(name)) => {
            debug!("Archivo no encontrado: {}", name);
            Response::new(StatusCode::NotFound)
        }
        Err(e) => {
            error!("No se pudo leer {:?}: {}", ctx.param, e);
            Response::new(StatusCode::NotFound)
        }
    }
}

/// Handler para `POST /files/<nombre>`
///
/// Reemplaza el archivo completo con el body del request. Dos POST
/// concurrentes al mismo nombre no se coordinan: gana el último.
pub fn write_file_handler(ctx: &RouteContext<'_>, req: &Request) -> Response {
    match ctx.store.write(ctx.param, req.body()) {
        Ok(()) => {
            debug!("Escritos {} bytes en {}", req.body().len(), ctx.param);
            Response::new(StatusCode::Created)
        }
        Err(StoreError::InvalidName(name)) => {
            warn!("Nombre de archivo rechazado: {:?}", name);
            Response::new(StatusCode::BadRequest)
        }
        Err(e) => {
            error!("No se pudo escribir {:?}: {}", ctx.param, e);
            Response::new(StatusCode::InternalServerError)
        }
    }
}
