//! # Framing de Mensajes
//! src/http/framing.rs
//!
//! Lee del socket exactamente un mensaje completo: el head hasta la línea
//! vacía y, si viene `Content-Length`, esa cantidad de bytes de body.
//!
//! Un solo `read()` no alcanza: el cliente puede mandar el head y el body
//! en segmentos TCP distintos, o un body más grande que cualquier buffer
//! fijo. Por eso se lee en un loop hasta completar el frame.

use std::io::{self, Read};
use thiserror::Error;

/// Separador entre head y body
pub const HEAD_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Límite por defecto para un mensaje completo (8 MiB)
pub const DEFAULT_MAX_REQUEST_BYTES: usize = 8 * 1024 * 1024;

/// Tamaño de cada lectura individual
const READ_CHUNK: usize = 4096;

/// Errores al leer un mensaje del socket
#[derive(Debug, Error)]
pub enum FrameError {
    /// Error de transporte (incluye timeouts)
    #[error("I/O error while reading request: {0}")]
    Io(#[from] io::Error),

    /// El mensaje supera el límite configurado
    #[error("Request exceeds {limit} bytes")]
    TooLarge { limit: usize },

    #[error("Invalid Content-Length: {0:?}")]
    InvalidContentLength(String),

    /// El peer cerró antes de enviar la línea vacía
    #[error("Connection closed before end of headers")]
    UnterminatedHead,

    /// El peer cerró antes de completar el body declarado
    #[error("Body truncated: expected {expected} bytes, received {received}")]
    TruncatedBody { expected: usize, received: usize },
}

/// Busca la posición donde empieza `\r\n\r\n`
pub fn find_head_end(buffer: &[u8]) -> Option<usize> {
    buffer
        .windows(HEAD_TERMINATOR.len())
        .position(|window| window == HEAD_TERMINATOR)
}

/// Lee un mensaje completo
///
/// # Retorna
///
/// * `Ok(Some(bytes))` - head + body, listo para [`crate::http::Request::parse`]
/// * `Ok(None)` - el peer cerró sin enviar ningún byte
/// * `Err(FrameError)` - error de transporte o mensaje malformado
///
/// Los bytes que lleguen después del body declarado se descartan.
///
/// # Ejemplo
/// ```
/// use file_echo_server::http::framing::read_message;
///
/// let mut input: &[u8] = b"POST /files/a HTTP/1.1\r\nContent-Length: 2\r\n\r\nhiEXTRA";
/// let message = read_message(&mut input, 1024).unwrap().unwrap();
/// assert!(message.ends_with(b"\r\n\r\nhi"));
/// ```
pub fn read_message<R: Read>(reader: &mut R, limit: usize) -> Result<Option<Vec<u8>>, FrameError> {
    let mut buffer = Vec::with_capacity(READ_CHUNK);
    let mut chunk = [0u8; READ_CHUNK];
    let mut scanned = 0;

    // 1. Leer hasta encontrar la línea vacía
    let head_end = loop {
        if let Some(pos) = find_head_end(&buffer[scanned..]) {
            break scanned + pos;
        }
        if buffer.len() > limit {
            return Err(FrameError::TooLarge { limit });
        }
        // El terminador puede quedar partido entre dos lecturas
        scanned = buffer.len().saturating_sub(HEAD_TERMINATOR.len() - 1);

        let n = read_chunk(reader, &mut chunk)?;
        if n == 0 {
            if buffer.is_empty() {
                return Ok(None);
            }
            return Err(FrameError::UnterminatedHead);
        }
        buffer.extend_from_slice(&chunk[..n]);
    };

    // 2. Sin Content-Length el body es lo que llegó junto al head
    let body_start = head_end + HEAD_TERMINATOR.len();
    let expected = match declared_content_length(&buffer[..head_end])? {
        Some(length) => length,
        None => {
            if buffer.len() > limit {
                return Err(FrameError::TooLarge { limit });
            }
            return Ok(Some(buffer));
        }
    };

    let total = body_start
        .checked_add(expected)
        .filter(|total| *total <= limit)
        .ok_or(FrameError::TooLarge { limit })?;

    // 3. Completar el body
    while buffer.len() < total {
        let n = read_chunk(reader, &mut chunk)?;
        if n == 0 {
            return Err(FrameError::TruncatedBody {
                expected,
                received: buffer.len() - body_start,
            });
        }
        buffer.extend_from_slice(&chunk[..n]);
    }

    buffer.truncate(total);
    Ok(Some(buffer))
}

/// Una lectura, reintentando si la syscall fue interrumpida
fn read_chunk<R: Read>(reader: &mut R, chunk: &mut [u8]) -> io::Result<usize> {
    loop {
        match reader.read(chunk) {
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            other => return other,
        }
    }
}

/// Extrae `Content-Length` del head
///
/// Para el framing el nombre se compara sin distinguir mayúsculas; la
/// request line se ignora. Si aparece varias veces, gana la última.
fn declared_content_length(head: &[u8]) -> Result<Option<usize>, FrameError> {
    let mut declared = None;

    for line in head.split(|&b| b == b'\n').skip(1) {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        let Some(colon) = line.iter().position(|&b| b == b':') else {
            continue;
        };
        if !line[..colon].eq_ignore_ascii_case(b"Content-Length") {
            continue;
        }

        let raw = String::from_utf8_lossy(&line[colon + 1..]);
        let length = raw
            .trim()
            .parse::<usize>()
            .map_err(|_| FrameError::InvalidContentLength(raw.trim().to_string()))?;
        declared = Some(length);
    }

    Ok(declared)
}
