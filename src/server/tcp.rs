//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Servidor TCP que maneja múltiples conexiones simultáneas usando threads.
//! Cada conexión se procesa en su propio thread y atiende exactamente un
//! request:
//!
//! ```text
//! accept → read → decode → route → encode → write → close
//! ```
//!
//! Cualquier error queda contenido en su conexión: el loop de accept nunca
//! se detiene por un cliente. El `TcpStream` se libera al salir de
//! `handle_connection` por cualquier camino.
//!
//! Los timeouts de lectura y escritura son deadlines de toda la fase, no de
//! cada `read()`: un cliente que manda un byte cada tanto no retiene el
//! thread más allá de `read_timeout`.

use crate::config::Config;
use crate::error::ServerError;
use crate::http::{framing, FrameError, Request, Response, StatusCode};
use crate::router::Router;
use crate::store::{ByteStore, FsStore};
use log::{debug, error, info, log, warn, Level};
use std::io::{self, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Máximo de bytes descartados antes de cerrar tras un request malformado
const DRAIN_LIMIT: u64 = 1024 * 1024;

/// Tiempo máximo dedicado a descartar ese input
const DRAIN_TIMEOUT: Duration = Duration::from_secs(1);

/// `TcpStream` con un deadline absoluto para todas sus operaciones
///
/// Antes de cada `read`/`write` ajusta el timeout del socket al tiempo que
/// queda; vencido el deadline falla con `io::ErrorKind::TimedOut`.
struct DeadlineStream<'a> {
    stream: &'a TcpStream,
    deadline: Instant,
}

impl<'a> DeadlineStream<'a> {
    fn new(stream: &'a TcpStream, budget: Duration) -> Self {
        Self {
            stream,
            deadline: Instant::now() + budget,
        }
    }

    fn remaining(&self) -> io::Result<Duration> {
        let remaining = self.deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Err(io::Error::new(io::ErrorKind::TimedOut, "connection deadline exceeded"));
        }
        Ok(remaining)
    }
}

impl Read for DeadlineStream<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.stream.set_read_timeout(Some(self.remaining()?))?;
        let mut stream = self.stream;
        stream.read(buf)
    }
}

impl Write for DeadlineStream<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.stream.set_write_timeout(Some(self.remaining()?))?;
        let mut stream = self.stream;
        stream.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut stream = self.stream;
        stream.flush()
    }
}

/// Estado compartido (de solo lectura) por todas las conexiones
pub struct ConnectionContext {
    pub router: Router,
    pub store: Arc<dyn ByteStore>,
    pub read_timeout: Duration,
    pub write_timeout: Duration,
    pub max_request_bytes: usize,
}

impl ConnectionContext {
    pub fn new(config: &Config, store: Arc<dyn ByteStore>) -> Self {
        Self {
            router: Router::standard(),
            store,
            read_timeout: config.read_timeout(),
            write_timeout: config.write_timeout(),
            max_request_bytes: config.max_request_bytes,
        }
    }
}

/// Servidor concurrente, un thread por conexión
pub struct Server {
    context: Arc<ConnectionContext>,
    listener: TcpListener,
}

impl Server {
    /// Abre el listener con el store del directorio configurado
    pub fn from_config(config: &Config) -> Result<Self, ServerError> {
        let store: Arc<dyn ByteStore> = Arc::new(FsStore::new(&config.directory));
        Self::bind(config, store)
    }

    /// Abre el listener con un store arbitrario
    ///
    /// Con `port = 0` el sistema elige un puerto libre; ver [`Server::local_addr`].
    pub fn bind(config: &Config, store: Arc<dyn ByteStore>) -> Result<Self, ServerError> {
        config.validate()?;

        let address = config.address();
        let listener = TcpListener::bind(&address)
            .map_err(|source| ServerError::Bind { address, source })?;

        Ok(Self {
            context: Arc::new(ConnectionContext::new(config, store)),
            listener,
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Loop de accept; solo retorna si el listener deja de producir conexiones
    pub fn run(&self) -> Result<(), ServerError> {
        info!("[+] Servidor escuchando en {}", self.local_addr()?);
        info!("[*] Modo concurrente: un thread por conexion");

        for stream in self.listener.incoming() {
            match stream {
                Ok(stream) => self.spawn_connection(stream),
                Err(e) => {
                    error!("❌ Error al aceptar conexión: {}", e);
                }
            }
        }

        Ok(())
    }

    fn spawn_connection(&self, stream: TcpStream) {
        let context = Arc::clone(&self.context);
        let peer = stream
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        debug!("Nueva conexión desde {}", peer);

        let spawned = thread::Builder::new()
            .name(format!("conn-{}", peer))
            .spawn(move || {
                if let Err(e) = Self::handle_connection(stream, &context) {
                    warn!("❌ Conexión {} abortada: {}", peer, e);
                }
            });

        // Si no hay thread el closure se descarta y el socket se cierra
        if let Err(e) = spawned {
            error!("❌ No se pudo crear el thread de la conexión: {}", e);
        }
    }

    /// Atiende una conexión completa
    ///
    /// - Request válido: se responde según el router
    /// - Request malformado: 400 con `{"error": ...}`
    /// - Peer que cierra sin enviar nada: no se responde
    /// - Error de transporte o timeout: se cierra sin responder
    ///
    /// La lectura completa del request tiene `read_timeout` como deadline y
    /// la escritura de la respuesta tiene `write_timeout`.
    pub fn handle_connection(stream: TcpStream, ctx: &ConnectionContext) -> Result<(), ServerError> {
        let start = Instant::now();

        // Reading
        let mut reader = DeadlineStream::new(&stream, ctx.read_timeout);
        let raw = match framing::read_message(&mut reader, ctx.max_request_bytes) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("Conexión cerrada sin datos");
                return Ok(());
            }
            Err(FrameError::Io(e)) => return Err(e.into()),
            Err(e) => {
                warn!("Request malformado: {}", e);
                let response = Response::error_json(StatusCode::BadRequest, &e.to_string());
                Self::write_response(&stream, ctx, &response)?;
                // Puede quedar input sin leer; se descarta para que el cierre
                // no termine en RST y el cliente reciba el 400
                stream.shutdown(Shutdown::Write)?;
                Self::drain(&stream);
                return Ok(());
            }
        };

        // Decoding + Routing
        let response = match Request::parse(&raw) {
            Ok(request) => {
                let response = ctx.router.route(&request, ctx.store.as_ref());
                let level = if response.status().is_server_error() {
                    Level::Error
                } else {
                    Level::Info
                };
                log!(
                    level,
                    "{} {} -> {} ({:.2}ms)",
                    request.method(),
                    request.path(),
                    response.status(),
                    start.elapsed().as_secs_f64() * 1000.0
                );
                response
            }
            Err(e) => {
                warn!("Parse error: {}", e);
                Response::error_json(StatusCode::BadRequest, &e.to_string())
            }
        };

        // Writing
        Self::write_response(&stream, ctx, &response)
    }

    fn write_response(stream: &TcpStream, ctx: &ConnectionContext, response: &Response) -> Result<(), ServerError> {
        let mut writer = DeadlineStream::new(stream, ctx.write_timeout);
        writer.write_all(&response.to_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Descarta lo que el cliente siga enviando, hasta EOF o los límites
    fn drain(stream: &TcpStream) {
        let mut pending = DeadlineStream::new(stream, DRAIN_TIMEOUT).take(DRAIN_LIMIT);
        if let Err(e) = io::copy(&mut pending, &mut io::sink()) {
            debug!("Input descartado de forma parcial: {}", e);
        }
    }
}
