//! # Módulo HTTP
//!
//! Codec del protocolo, sin librerías de alto nivel:
//!
//! - Framing de un mensaje sobre el socket
//! - Decodificación de requests
//! - Construcción y codificación de responses
//! - Status codes
//!
//! Un mensaje por conexión: sin keep-alive, sin chunked encoding, sin
//! pipelining.
//!
//! ### Formato de Request
//!
//! ```text
//! GET /echo/hola HTTP/1.1\r\n
//! User-Agent: curl/8.4.0\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/plain\r\n
//! Content-Length: 4\r\n
//! \r\n
//! hola
//! ```

pub mod framing;   // Lectura de un mensaje completo
pub mod headers;   // Mapa ordenado de headers
pub mod request;   // Parsing de requests
pub mod response;  // Construcción de responses
pub mod status;    // Códigos de estado

// Re-exportamos los tipos principales para facilitar su uso
pub use framing::{read_message, FrameError};
pub use headers::Headers;
pub use request::{Method, ParseError, Request};
pub use response::Response;
pub use status::StatusCode;
