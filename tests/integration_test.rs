//! Tests de integración para el servidor
//! tests/integration_test.rs
//!
//! Cada test levanta su propio servidor en `127.0.0.1:0` con un directorio
//! temporal como store y le habla por TCP.

use file_echo_server::config::Config;
use file_echo_server::server::Server;
use file_echo_server::store::{ByteStore, FsStore};
use std::io::{Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

/// Helper: levanta un servidor y retorna su dirección
///
/// El `TempDir` debe vivir mientras dure el test.
fn start_server() -> (SocketAddr, TempDir) {
    let dir = TempDir::new().expect("tempdir");

    let mut config = Config::default();
    config.host = "127.0.0.1".to_string();
    config.port = 0;
    config.directory = dir.path().to_string_lossy().into_owned();
    config.read_timeout_ms = 2_000;

    let store: Arc<dyn ByteStore> = Arc::new(FsStore::new(dir.path()));
    let server = Server::bind(&config, store).expect("bind");
    let addr = server.local_addr().expect("local addr");

    thread::spawn(move || server.run());

    (addr, dir)
}

/// Helper: envía bytes crudos y retorna la response completa
fn send_raw(addr: SocketAddr, raw: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).expect("connect");
    stream.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
    stream.set_write_timeout(Some(Duration::from_secs(5))).unwrap();

    stream.write_all(raw).expect("write");
    stream.flush().unwrap();

    // El servidor cierra después de responder
    let mut response = Vec::new();
    stream.read_to_end(&mut response).expect("read");
    response
}

fn send(addr: SocketAddr, raw: &str) -> String {
    String::from_utf8_lossy(&send_raw(addr, raw.as_bytes())).into_owned()
}

/// Helper: extrae el body de una response
fn extract_body(response: &str) -> &str {
    match response.find("\r\n\r\n") {
        Some(pos) => &response[pos + 4..],
        None => "",
    }
}

#[test]
fn test_root() {
    let (addr, _dir) = start_server();
    let response = send(addr, "GET / HTTP/1.1\r\nHost: localhost:4221\r\n\r\n");
    assert_eq!(response, "HTTP/1.1 200 OK\r\n\r\n");
}

#[test]
fn test_echo() {
    let (addr, _dir) = start_server();
    let response = send(addr, "GET /echo/hello HTTP/1.1\r\n\r\n");

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(response.contains("Content-Type: text/plain\r\n"));
    assert!(response.contains("Content-Length: 5\r\n"));
    assert_eq!(extract_body(&response), "hello");
}

#[test]
fn test_echo_empty_suffix() {
    let (addr, _dir) = start_server();
    let response = send(addr, "GET /echo/ HTTP/1.1\r\n\r\n");

    assert!(response.contains("Content-Length: 0\r\n"));
    assert_eq!(extract_body(&response), "");
}

#[test]
fn test_user_agent() {
    let (addr, _dir) = start_server();
    let response = send(addr, "GET /user-agent HTTP/1.1\r\nHost: x\r\nUser-Agent: test-client/1\r\n\r\n");

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(response.contains("Content-Length: 13\r\n"));
    assert_eq!(extract_body(&response), "test-client/1");
}

#[test]
fn test_user_agent_lowercase_not_matched() {
    let (addr, _dir) = start_server();
    let response = send(addr, "GET /user-agent HTTP/1.1\r\nuser-agent: test-client/1\r\n\r\n");

    assert!(response.contains("Content-Length: 0\r\n"));
    assert_eq!(extract_body(&response), "");
}

#[test]
fn test_post_then_get_file() {
    let (addr, dir) = start_server();

    let response = send(addr, "POST /files/note.txt HTTP/1.1\r\nContent-Length: 2\r\n\r\nhi");
    assert_eq!(response, "HTTP/1.1 201 Created\r\n\r\n");
    assert_eq!(std::fs::read(dir.path().join("note.txt")).unwrap(), b"hi");

    let response = send(addr, "GET /files/note.txt HTTP/1.1\r\n\r\n");
    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(response.contains("Content-Type: application/octet-stream\r\n"));
    assert!(response.contains("Content-Length: 2\r\n"));
    assert_eq!(extract_body(&response), "hi");
}

#[test]
fn test_get_missing_file() {
    let (addr, _dir) = start_server();
    let response = send(addr, "GET /files/missing.txt HTTP/1.1\r\n\r\n");
    assert_eq!(response, "HTTP/1.1 404 Not Found\r\n\r\n");
}

#[test]
fn test_path_traversal_rejected() {
    let (addr, dir) = start_server();

    let response = send(addr, "GET /files/../../etc/passwd HTTP/1.1\r\n\r\n");
    assert_eq!(response, "HTTP/1.1 400 Bad Request\r\n\r\n");

    let response = send(addr, "POST /files/../escape.txt HTTP/1.1\r\nContent-Length: 1\r\n\r\nx");
    assert_eq!(response, "HTTP/1.1 400 Bad Request\r\n\r\n");
    assert!(!dir.path().parent().unwrap().join("escape.txt").exists());
}

#[test]
fn test_method_not_allowed() {
    let (addr, _dir) = start_server();
    let response = send(addr, "PATCH / HTTP/1.1\r\n\r\n");
    assert_eq!(response, "HTTP/1.1 405 Method Not Allowed\r\n\r\n");
}

#[test]
fn test_not_found() {
    let (addr, _dir) = start_server();
    let response = send(addr, "GET /nope HTTP/1.1\r\n\r\n");
    assert_eq!(response, "HTTP/1.1 404 Not Found\r\n\r\n");
}

#[test]
fn test_malformed_request_gets_400() {
    let (addr, _dir) = start_server();

    let response = send(addr, "GET /\r\n\r\n");
    assert!(response.starts_with("HTTP/1.1 400 Bad Request\r\n"));
    assert!(response.contains("Content-Type: application/json\r\n"));
    assert!(extract_body(&response).starts_with(r#"{"error":"#));

    let response = send(addr, "GET / HTTP/1.1\r\nBroken header\r\n\r\n");
    assert!(response.starts_with("HTTP/1.1 400 Bad Request\r\n"));
}

#[test]
fn test_large_body_in_several_writes() {
    let (addr, _dir) = start_server();
    let body: Vec<u8> = (0..50_000u32).map(|i| (i % 251) as u8).collect();

    let mut stream = TcpStream::connect(addr).unwrap();
    stream.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
    let head = format!("POST /files/big.bin HTTP/1.1\r\nContent-Length: {}\r\n\r\n", body.len());
    stream.write_all(head.as_bytes()).unwrap();
    for part in body.chunks(7_000) {
        stream.write_all(part).unwrap();
        stream.flush().unwrap();
        thread::sleep(Duration::from_millis(5));
    }
    let mut response = Vec::new();
    stream.read_to_end(&mut response).unwrap();
    assert_eq!(response, b"HTTP/1.1 201 Created\r\n\r\n");

    let response = send_raw(addr, b"GET /files/big.bin HTTP/1.1\r\n\r\n");
    let head_end = response.windows(4).position(|w| w == b"\r\n\r\n").unwrap();
    let head = String::from_utf8_lossy(&response[..head_end]);
    assert!(head.contains("Content-Length: 50000"));
    assert_eq!(&response[head_end + 4..], &body[..]);
}

#[test]
fn test_silent_client_does_not_block_others() {
    let (addr, _dir) = start_server();

    // Cliente que conecta y no envía nada
    let idle = TcpStream::connect(addr).unwrap();

    // Cliente que conecta y cierra inmediatamente
    let closed = TcpStream::connect(addr).unwrap();
    closed.shutdown(Shutdown::Both).unwrap();

    let response = send(addr, "GET /echo/still-alive HTTP/1.1\r\n\r\n");
    assert_eq!(extract_body(&response), "still-alive");

    drop(idle);
}

#[test]
fn test_concurrent_requests() {
    let (addr, _dir) = start_server();

    let handles: Vec<_> = (0..16)
        .map(|i| {
            thread::spawn(move || {
                let response = send(addr, &format!("GET /echo/client-{} HTTP/1.1\r\n\r\n", i));
                assert_eq!(extract_body(&response), format!("client-{}", i));
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
