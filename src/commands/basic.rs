//! # Comandos Básicos
//! src/commands/basic.rs
//!
//! - `GET /`: 200 sin headers ni body
//! - `GET /echo/<texto>`: devuelve `<texto>` como text/plain
//! - `GET /user-agent`: devuelve el header `User-Agent`

use crate::http::{Request, Response, StatusCode};
use crate::router::RouteContext;

/// Handler para `GET /`
///
/// Sin body y sin `Content-Length`.
pub fn root_handler(_ctx: &RouteContext<'_>, _req: &Request) -> Response {
    Response::new(StatusCode::Ok)
}

/// Handler para `GET /echo/<texto>`
///
/// El texto se devuelve tal cual llegó en el path, sin URL-decoding.
///
/// # Ejemplo de response
/// ```text
/// HTTP/1.1 200 OK
/// Content-Type: text/plain
/// Content-Length: 5
///
/// hello
/// ```
pub fn echo_handler(ctx: &RouteContext<'_>, _req: &Request) -> Response {
    Response::text(StatusCode::Ok, ctx.param)
}

/// Handler para `GET /user-agent`
///
/// La búsqueda es exacta: un header `user-agent` en minúsculas no cuenta.
/// Si falta, el body queda vacío con `Content-Length: 0`.
pub fn user_agent_handler(_ctx: &RouteContext<'_>, req: &Request) -> Response {
    let user_agent = req.header("User-Agent").unwrap_or_default();
    Response::text(StatusCode::Ok, user_agent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn make_request(raw: &[u8]) -> Request {
        Request::parse(raw).unwrap()
    }

    fn call(handler: crate::router::Handler, param: &str, req: &Request) -> Response {
        let store = MemoryStore::new();
        let ctx = RouteContext { store: &store, param };
        handler(&ctx, req)
    }

    #[test]
    fn test_root_handler() {
        let request = make_request(b"GET / HTTP/1.1\r\n\r\n");
        let response = call(root_handler, "", &request);

        assert_eq!(response.status(), StatusCode::Ok);
        assert!(response.headers().is_empty());
        assert_eq!(response.to_bytes(), b"HTTP/1.1 200 OK\r\n\r\n");
    }

    #[test]
    fn test_echo_handler() {
        let request = make_request(b"GET /echo/hello HTTP/1.1\r\n\r\n");
        let response = call(echo_handler, "hello", &request);

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.headers().get("Content-Type"), Some("text/plain"));
        assert_eq!(response.headers().get("Content-Length"), Some("5"));
        assert_eq!(response.body(), b"hello");
    }

    #[test]
    fn test_echo_handler_empty_suffix() {
        let request = make_request(b"GET /echo/ HTTP/1.1\r\n\r\n");
        let response = call(echo_handler, "", &request);

        assert_eq!(response.headers().get("Content-Length"), Some("0"));
        assert!(response.body().is_empty());
    }

    #[test]
    fn test_echo_handler_is_not_decoded() {
        let request = make_request(b"GET /echo/a%20b/c HTTP/1.1\r\n\r\n");
        let response = call(echo_handler, "a%20b/c", &request);

        assert_eq!(response.body(), b"a%20b/c");
        assert_eq!(response.headers().get("Content-Length"), Some("7"));
    }

    #[test]
    fn test_user_agent_handler() {
        let request = make_request(b"GET /user-agent HTTP/1.1\r\nUser-Agent: test-client/1\r\n\r\n");
        let response = call(user_agent_handler, "", &request);

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.body(), b"test-client/1");
        assert_eq!(response.headers().get("Content-Length"), Some("13"));
    }

    #[test]
    fn test_user_agent_handler_lowercase_header_ignored() {
        let request = make_request(b"GET /user-agent HTTP/1.1\r\nuser-agent: test-client/1\r\n\r\n");
        let response = call(user_agent_handler, "", &request);

        assert!(response.body().is_empty());
        assert_eq!(response.headers().get("Content-Length"), Some("0"));
    }
}
