//! # Decodificación de Requests
//! src/http/request.rs
//!
//! Convierte el buffer crudo de una conexión en un [`Request`] estructurado.
//!
//! ## Formato de un Request
//!
//! ```text
//! POST /files/note.txt HTTP/1.1\r\n
//! Host: localhost:4221\r\n
//! Content-Length: 2\r\n
//! \r\n
//! hi
//! ```
//!
//! ## Componentes
//!
//! 1. **Request Line**: `METHOD SP PATH SP VERSION` (exactamente tres tokens)
//! 2. **Headers**: `Name: Value`, separados en la primera ocurrencia de `": "`
//! 3. **Línea vacía**: `\r\n\r\n` termina el head, es obligatoria
//! 4. **Body**: bytes crudos, sin reinterpretar

use super::framing::{find_head_end, HEAD_TERMINATOR};
use super::Headers;
use thiserror::Error;

/// Métodos HTTP
///
/// Cualquier token se decodifica; el router decide si está permitido.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub enum Method {
    /// GET - Obtener un recurso
    GET,

    /// POST - Enviar datos a un recurso
    POST,

    /// Cualquier otro token (PATCH, DELETE, ...)
    Other(String),
}

impl Method {
    /// Convierte el método a string
    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::Other(token) => token,
        }
    }
}

impl From<&str> for Method {
    fn from(token: &str) -> Self {
        match token {
            "GET" => Method::GET,
            "POST" => Method::POST,
            other => Method::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Request vacío
    #[error("Empty request")]
    EmptyRequest,

    /// Falta la línea vacía que separa head y body
    #[error("Missing blank line after headers")]
    MissingHeadTerminator,

    /// El head no es UTF-8
    #[error("Request head is not valid UTF-8")]
    InvalidEncoding,

    /// La request line no tiene tres tokens no vacíos
    #[error("Invalid request line: {0:?}")]
    InvalidRequestLine(String),

    /// El path no empieza con `/`
    #[error("Invalid request path: {0:?}")]
    InvalidPath(String),

    /// La versión no tiene la forma `HTTP/x`
    #[error("Invalid HTTP version: {0:?}")]
    InvalidVersion(String),

    /// Header sin separador `": "`
    #[error("Invalid header: {0:?}")]
    InvalidHeader(String),
}

/// Representa un request parseado
///
/// Se construye una vez por conexión y no se modifica después.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: Method,

    /// Path tal como llegó (ej: "/echo/hola"), sin URL-decoding
    path: String,

    version: String,

    headers: Headers,

    body: Vec<u8>,
}

impl Request {
    /// Crea un request sin headers ni body, versión `HTTP/1.1`
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            version: "HTTP/1.1".to_string(),
            headers: Headers::new(),
            body: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn with_body(mut self, body: &[u8]) -> Self {
        self.body = body.to_vec();
        self
    }

    /// Parsea un request desde bytes
    ///
    /// # Retorna
    ///
    /// * `Ok(Request)` - Request parseado exitosamente
    /// * `Err(ParseError)` - Request malformado
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use file_echo_server::http::Request;
    ///
    /// let raw = b"GET /user-agent HTTP/1.1\r\nUser-Agent: curl/8.4.0\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.path(), "/user-agent");
    /// assert_eq!(request.header("User-Agent"), Some("curl/8.4.0"));
    /// assert!(request.body().is_empty());
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        if buffer.iter().all(u8::is_ascii_whitespace) {
            return Err(ParseError::EmptyRequest);
        }

        // 1. Separar head y body en la primera línea vacía
        let head_end = find_head_end(buffer).ok_or(ParseError::MissingHeadTerminator)?;
        let head = std::str::from_utf8(&buffer[..head_end])
            .map_err(|_| ParseError::InvalidEncoding)?;
        let body = buffer[head_end + HEAD_TERMINATOR.len()..].to_vec();

        // 2. Request line
        let mut lines = head.split("\r\n");
        let request_line = lines.next().unwrap_or_default();
        let (method, path, version) = Self::parse_request_line(request_line)?;

        // 3. Headers
        let headers = Self::parse_headers(lines)?;

        Ok(Request {
            method,
            path,
            version,
            headers,
            body,
        })
    }

    /// Parsea la request line
    ///
    /// Formato: `GET /path HTTP/1.1`, separado por espacios simples.
    fn parse_request_line(line: &str) -> Result<(Method, String, String), ParseError> {
        let parts: Vec<&str> = line.split(' ').collect();

        if parts.len() != 3 || parts.iter().any(|part| part.is_empty()) {
            return Err(ParseError::InvalidRequestLine(line.to_string()));
        }

        let path = parts[1];
        if !path.starts_with('/') {
            return Err(ParseError::InvalidPath(path.to_string()));
        }

        let version = parts[2];
        if version.len() <= "HTTP/".len() || !version.starts_with("HTTP/") {
            return Err(ParseError::InvalidVersion(version.to_string()));
        }

        Ok((Method::from(parts[0]), path.to_string(), version.to_string()))
    }

    /// Parsea los headers
    ///
    /// Cada línea se corta en la primera ocurrencia de `": "`; el valor queda
    /// intacto (sin trim). Si un nombre se repite, gana el último.
    fn parse_headers<'a>(lines: impl Iterator<Item = &'a str>) -> Result<Headers, ParseError> {
        let mut headers = Headers::new();

        for line in lines {
            match line.split_once(": ") {
                Some((name, value)) if !name.is_empty() => {
                    headers.insert(name, value);
                }
                _ => return Err(ParseError::InvalidHeader(line.to_string())),
            }
        }

        Ok(headers)
    }

    /// Serializa el request en formato de red
    ///
    /// Es la operación inversa de [`Request::parse`].
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::new();

        let request_line = format!("{} {} {}\r\n", self.method, self.path, self.version);
        result.extend_from_slice(request_line.as_bytes());

        for (name, value) in self.headers.iter() {
            result.extend_from_slice(format!("{}: {}\r\n", name, value).as_bytes());
        }

        result.extend_from_slice(b"\r\n");
        result.extend_from_slice(&self.body);

        result
    }

    // === Métodos públicos para acceder a los campos ===

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Obtiene un header por nombre exacto (sensible a mayúsculas)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
