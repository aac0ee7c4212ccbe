//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Mapea `(método, path)` a handlers.
//!
//! ## Arquitectura
//!
//! ```text
//! Request → Router → Handler → Response
//! ```
//!
//! Los patrones son literales: `Exact("/")` o `Prefix("/echo/")`. Lo que
//! queda después del prefijo se pasa tal cual al handler como parámetro
//! (sin URL-decoding).
//!
//! - Método que ninguna ruta registra → 405 Method Not Allowed
//! - Método conocido pero path sin ruta → 404 Not Found

use crate::commands;
use crate::http::{Method, Request, Response, StatusCode};
use crate::store::ByteStore;

/// Lo que recibe un handler además del request
pub struct RouteContext<'a> {
    /// Store para las rutas `/files/`
    pub store: &'a dyn ByteStore,

    /// Sufijo del path después del prefijo de la ruta (vacío en rutas exactas)
    pub param: &'a str,
}

/// Tipo de función handler
pub type Handler = fn(&RouteContext<'_>, &Request) -> Response;

/// Patrón literal de una ruta
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    Exact(&'static str),
    Prefix(&'static str),
}

impl Pattern {
    /// Si el path coincide, retorna el parámetro
    ///
    /// # Ejemplo
    /// ```
    /// use file_echo_server::router::Pattern;
    ///
    /// assert_eq!(Pattern::Prefix("/echo/").matches("/echo/abc"), Some("abc"));
    /// assert_eq!(Pattern::Exact("/").matches("/abc"), None);
    /// ```
    pub fn matches<'p>(&self, path: &'p str) -> Option<&'p str> {
        match self {
            Pattern::Exact(expected) => (path == *expected).then_some(""),
            Pattern::Prefix(prefix) => path.strip_prefix(prefix),
        }
    }
}

struct Route {
    method: Method,
    pattern: Pattern,
    handler: Handler,
}

/// Router con rutas evaluadas en orden de registro
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    /// Crea un nuevo router vacío
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Router con las rutas del servidor
    ///
    /// | Método | Patrón         | Handler               |
    /// |--------|----------------|-----------------------|
    /// | GET    | `/`            | 200 sin body          |
    /// | GET    | `/echo/`*      | devuelve el sufijo    |
    /// | GET    | `/user-agent`* | devuelve `User-Agent` |
    /// | GET    | `/files/`*     | lee del store         |
    /// | POST   | `/files/`*     | escribe en el store   |
    pub fn standard() -> Self {
        let mut router = Self::new();
        router.register(Method::GET, Pattern::Exact("/"), commands::root_handler);
        router.register(Method::GET, Pattern::Prefix("/echo/"), commands::echo_handler);
        router.register(Method::GET, Pattern::Prefix("/user-agent"), commands::user_agent_handler);
        router.register(Method::GET, Pattern::Prefix("/files/"), commands::read_file_handler);
        router.register(Method::POST, Pattern::Prefix("/files/"), commands::write_file_handler);
        router
    }

    /// Registra una ruta con su handler
    ///
    /// # Ejemplo
    /// ```
    /// use file_echo_server::router::{Pattern, RouteContext, Router};
    /// use file_echo_server::http::{Method, Request, Response, StatusCode};
    ///
    /// fn health_handler(_ctx: &RouteContext<'_>, _req: &Request) -> Response {
    ///     Response::new(StatusCode::Ok)
    /// }
    ///
    /// let mut router = Router::new();
    /// router.register(Method::GET, Pattern::Exact("/health"), health_handler);
    /// ```
    pub fn register(&mut self, method: Method, pattern: Pattern, handler: Handler) {
        self.routes.push(Route {
            method,
            pattern,
            handler,
        });
    }

    /// Encuentra y ejecuta el handler apropiado para un request
    ///
    /// Si ninguna ruta acepta el método responde 405; si el método existe
    /// pero el path no coincide responde 404. Un POST fuera de `/files/` es
    /// entonces un 404 y no escribe nada en el store.
    pub fn route(&self, request: &Request, store: &dyn ByteStore) -> Response {
        let method = request.method();

        if !self.routes.iter().any(|route| &route.method == method) {
            return Response::new(StatusCode::MethodNotAllowed);
        }

        for route in self.routes.iter().filter(|route| &route.method == method) {
            if let Some(param) = route.pattern.matches(request.path()) {
                let ctx = RouteContext { store, param };
                return (route.handler)(&ctx, request);
            }
        }

        Response::new(StatusCode::NotFound)
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::standard()
    }
}
