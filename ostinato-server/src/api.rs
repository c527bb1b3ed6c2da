//! HTTP surface for ingesting and querying activity records.
//!
//! Uses `std::net::TcpListener` — no external HTTP framework needed.
//! Endpoints:
//!
//! - `GET /`          — embedded homepage (renders the window client-side)
//! - `POST /PostEvent` — ingest one activity record (JSON body)
//! - `GET /GetEvents`  — the live window as a JSON array (oldest first)
//!
//! The store is passed in as an explicit `Arc` handle; the surface owns no
//! state of its own beyond the snapshot path it writes after every
//! accepted record.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use ostinato::{ActivityRecord, RingStore};

/// Embedded homepage, served at `/`.
const INDEX_HTML: &str = include_str!("../assets/index.html");

/// Largest request body accepted before the request is dropped.
const MAX_BODY_BYTES: usize = 1 << 20;

/// Runs the HTTP server (blocking — intended to own the main thread).
///
/// Each accepted connection is handled on its own thread; all of them
/// share the one store, whose internal lock serializes every operation.
pub fn serve(listener: TcpListener, store: Arc<RingStore<ActivityRecord>>, snapshot_path: PathBuf) {
    for stream in listener.incoming() {
        let stream = match stream {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!("accept error: {e}");
                continue;
            }
        };

        // Set a short read timeout so we don't block forever on slow clients
        let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(5)));

        let store = Arc::clone(&store);
        let snapshot_path = snapshot_path.clone();
        thread::spawn(move || {
            if let Err(e) = handle_request(&stream, &store, &snapshot_path) {
                tracing::debug!("request error: {e}");
            }
        });
    }
}

/// Parses an HTTP request and dispatches to the appropriate handler.
fn handle_request(
    stream: &TcpStream,
    store: &RingStore<ActivityRecord>,
    snapshot_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;

    // Parse: "METHOD /path?query HTTP/1.x"
    let parts: Vec<&str> = request_line.split_whitespace().collect();
    if parts.len() < 2 {
        return send_json(stream, 400, r#"{"error":"bad request"}"#);
    }
    let method = parts[0];

    let path = match parts[1].split_once('?') {
        Some((p, _query)) => p,
        None => parts[1],
    };

    // Drain headers, keeping the one we need for the body
    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line)?;
        if line.trim().is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':')
            && name.eq_ignore_ascii_case("content-length")
        {
            content_length = value.trim().parse().unwrap_or(0);
        }
    }

    tracing::debug!("{method} {path}");

    match (method, path) {
        ("GET", "/") => send_response(stream, 200, "text/html; charset=utf-8", INDEX_HTML),
        ("POST", "/PostEvent") => {
            if content_length > MAX_BODY_BYTES {
                return send_json(stream, 400, r#"{"error":"body too large"}"#);
            }
            let mut body = vec![0u8; content_length];
            reader.read_exact(&mut body)?;
            handle_ingest(stream, store, snapshot_path, &body)
        }
        ("GET", "/GetEvents") => handle_query(stream, store),
        (_, "/PostEvent") | (_, "/GetEvents") => {
            send_json(stream, 405, r#"{"error":"method not allowed"}"#)
        }
        _ => send_json(stream, 404, r#"{"error":"not found"}"#),
    }
}

/// `POST /PostEvent` — appends one record and snapshots the window.
///
/// A body that does not decode as an activity record is discarded without
/// mutating the store. A failed snapshot write is logged and the request
/// still succeeds: the append was accepted, and the on-disk state simply
/// lags until the next save.
fn handle_ingest(
    stream: &TcpStream,
    store: &RingStore<ActivityRecord>,
    snapshot_path: &Path,
    body: &[u8],
) -> Result<(), Box<dyn std::error::Error>> {
    let record: ActivityRecord = match serde_json::from_slice(body) {
        Ok(record) => record,
        Err(e) => {
            tracing::warn!("discarding malformed ingest body: {e}");
            return send_json(stream, 400, r#"{"error":"malformed activity record"}"#);
        }
    };

    store.append(record);
    tracing::debug!(count = store.len(), "accepted activity record");

    if let Err(e) = store.save(snapshot_path) {
        tracing::warn!("snapshot save failed: {e}");
    }

    send_json(stream, 200, r#"{"status":"ok"}"#)
}

/// `GET /GetEvents` — returns the live window, oldest first.
fn handle_query(
    stream: &TcpStream,
    store: &RingStore<ActivityRecord>,
) -> Result<(), Box<dyn std::error::Error>> {
    let window = store.get();
    let body = serde_json::to_string(&window)?;
    send_json(stream, 200, &body)
}

/// Sends an HTTP response with the given content type.
fn send_response(
    mut stream: &TcpStream,
    status: u16,
    content_type: &str,
    body: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let status_text = match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        _ => "Unknown",
    };

    write!(
        stream,
        "HTTP/1.1 {status} {status_text}\r\n\
         Content-Type: {content_type}\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\
         \r\n\
         {body}",
        body.len(),
    )?;

    Ok(())
}

/// Sends a JSON HTTP response.
fn send_json(
    stream: &TcpStream,
    status: u16,
    json: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    send_response(stream, status, "application/json", json)
}
