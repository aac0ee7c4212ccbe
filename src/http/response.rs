//! # Construcción de Respuestas
//! src/http/response.rs
//!
//! API para construir respuestas y convertirlas a bytes para enviar al cliente.
//!
//! ## Formato de una respuesta
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/plain\r\n
//! Content-Length: 5\r\n
//! \r\n
//! hello
//! ```
//!
//! ## Ejemplo de uso
//!
//! ```
//! use file_echo_server::http::{Response, StatusCode};
//!
//! let response = Response::new(StatusCode::Ok)
//!     .with_header("Content-Type", "text/plain")
//!     .with_body("hello");
//!
//! let bytes = response.to_bytes();
//! assert!(bytes.ends_with(b"\r\n\r\nhello"));
//! ```

use super::{Headers, StatusCode};
use serde::Serialize;

/// Versión usada cuando no se especifica otra
pub const DEFAULT_VERSION: &str = "HTTP/1.1";

/// Representa una respuesta completa
#[derive(Debug, Clone)]
pub struct Response {
    version: String,

    status: StatusCode,

    /// Headers en orden de inserción
    headers: Headers,

    /// Cuerpo de la respuesta (puede ser vacío)
    body: Vec<u8>,
}

/// Cuerpo JSON de las respuestas de error: `{"error": "..."}`
#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl Response {
    /// Crea una nueva respuesta con el código de estado especificado
    ///
    /// Por defecto, la respuesta no tiene headers ni body.
    pub fn new(status: StatusCode) -> Self {
        Self {
            version: DEFAULT_VERSION.to_string(),
            status,
            headers: Headers::new(),
            body: Vec::new(),
        }
    }

    /// Cambia la versión de la status line
    pub fn with_version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    /// Agrega un header a la respuesta
    ///
    /// Si el header ya existe, se sobrescribe en su posición original.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Establece el cuerpo de la respuesta desde un string
    ///
    /// Automáticamente calcula y agrega el header `Content-Length`, también
    /// cuando el body está vacío (`Content-Length: 0`).
    pub fn with_body(self, body: &str) -> Self {
        self.with_body_bytes(body.as_bytes().to_vec())
    }

    /// Establece el cuerpo de la respuesta desde bytes
    ///
    /// # Ejemplo
    /// ```
    /// use file_echo_server::http::{Response, StatusCode};
    ///
    /// let response = Response::new(StatusCode::Ok)
    ///     .with_body_bytes(vec![0x00, 0xFF]);
    /// assert_eq!(response.headers().get("Content-Length"), Some("2"));
    /// ```
    pub fn with_body_bytes(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self.headers
            .insert("Content-Length", &self.body.len().to_string());
        self
    }

    /// Respuesta `text/plain` con `Content-Length`
    pub fn text(status: StatusCode, body: &str) -> Self {
        Self::new(status)
            .with_header("Content-Type", "text/plain")
            .with_body(body)
    }

    /// Respuesta de error con mensaje JSON
    ///
    /// Formato del JSON: `{"error":"mensaje"}`
    ///
    /// # Ejemplo
    /// ```
    /// use file_echo_server::http::{Response, StatusCode};
    ///
    /// let response = Response::error_json(StatusCode::BadRequest, "Invalid header: \"x\"");
    /// assert_eq!(response.body(), br#"{"error":"Invalid header: \"x\""}"#);
    /// ```
    pub fn error_json(status: StatusCode, message: &str) -> Self {
        let body = serde_json::to_string(&ErrorBody { error: message }).unwrap_or_default();
        Self::new(status)
            .with_header("Content-Type", "application/json")
            .with_body(&body)
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    ///
    /// - Status line: `HTTP/1.1 200 OK\r\n`
    /// - Headers: `Header-Name: Value\r\n` en orden de inserción
    /// - Línea vacía: `\r\n` (siempre, aunque no haya headers)
    /// - Body: bytes tal cual, sin terminador final
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(64 + self.body.len());

        // 1. Status line
        let status_line = format!("{} {}\r\n", self.version, self.status);
        result.extend_from_slice(status_line.as_bytes());

        // 2. Headers
        for (name, value) in self.headers.iter() {
            let header_line = format!("{}: {}\r\n", name, value);
            result.extend_from_slice(header_line.as_bytes());
        }

        // 3. Línea vacía que separa headers del body
        result.extend_from_slice(b"\r\n");

        // 4. Body (si existe)
        result.extend_from_slice(&self.body);

        result
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
