//! Minimal HTTP/1.1 stand-in for the lookup/download proxy.
//!
//! `GET /api-proxy/<encoded page>` answers with a canned JSON body;
//! `GET /download-proxy?...` serves a static media body and honors
//! `Range: bytes=N-` unless told not to; `GET /thumbnail-proxy?id=..` serves
//! a canned image and `GET /` answers the reachability check. Every request
//! head is recorded.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ProxyOptions {
    /// Status for the lookup endpoint.
    pub lookup_status: u16,
    /// Body for the lookup endpoint.
    pub lookup_body: String,
    /// Status for the download endpoint when no error is forced.
    pub download_status: u16,
    /// If false, Range is ignored and the full body is sent with 200.
    pub support_ranges: bool,
    /// Status for `/thumbnail-proxy`.
    pub thumbnail_status: u16,
    /// Body for `/thumbnail-proxy`.
    pub thumbnail_body: Vec<u8>,
    /// Status for `/`.
    pub root_status: u16,
}

impl Default for ProxyOptions {
    fn default() -> Self {
        Self {
            lookup_status: 200,
            lookup_body: r#"{"post_id":"s_test","post_info":{"title":"A Cat Walking!! (v2)"}}"#
                .to_string(),
            download_status: 200,
            support_ranges: true,
            thumbnail_status: 200,
            thumbnail_body: b"\xff\xd8\xff\xe0 jpeg bytes".to_vec(),
            root_status: 200,
        }
    }
}

pub struct ProxyServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl ProxyServer {
    /// Raw request heads received so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Starts the server on an ephemeral port. Runs until the process exits.
pub fn start(media: Vec<u8>, opts: ProxyOptions) -> ProxyServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let media = Arc::new(media);
    let opts = Arc::new(opts);
    let requests = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let media = Arc::clone(&media);
            let opts = Arc::clone(&opts);
            let log = Arc::clone(&log);
            thread::spawn(move || handle(stream, &media, &opts, &log));
        }
    });
    ProxyServer {
        base_url: format!("http://127.0.0.1:{}", port),
        requests,
    }
}

fn read_head(stream: &mut TcpStream) -> Option<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    String::from_utf8(buf).ok()
}

fn handle(mut stream: TcpStream, media: &[u8], opts: &ProxyOptions, log: &Mutex<Vec<String>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let head = match read_head(&mut stream) {
        Some(h) => h,
        None => return,
    };
    log.lock().unwrap().push(head.clone());

    let target = head
        .lines()
        .next()
        .and_then(|l| l.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();

    if target.starts_with("/api-proxy/") {
        respond(
            &mut stream,
            opts.lookup_status,
            &[("Content-Type", "application/json".to_string())],
            opts.lookup_body.as_bytes(),
        );
    } else if target.starts_with("/download-proxy") {
        serve_media(&mut stream, &head, media, opts);
    } else if target.starts_with("/thumbnail-proxy") {
        let body: &[u8] = if opts.thumbnail_status == 200 {
            &opts.thumbnail_body
        } else {
            b"no thumbnail"
        };
        respond(
            &mut stream,
            opts.thumbnail_status,
            &[("Content-Type", "image/jpeg".to_string())],
            body,
        );
    } else if target == "/" {
        respond(&mut stream, opts.root_status, &[], b"ok");
    } else {
        respond(&mut stream, 404, &[], b"not found");
    }
}

fn serve_media(stream: &mut TcpStream, head: &str, media: &[u8], opts: &ProxyOptions) {
    if opts.download_status != 200 {
        respond(stream, opts.download_status, &[], b"upstream error");
        return;
    }
    let total = media.len();
    let range_start = if opts.support_ranges {
        parse_range_start(head)
    } else {
        None
    };
    match range_start {
        Some(start) if start >= total => {
            respond(
                stream,
                416,
                &[("Content-Range", format!("bytes */{}", total))],
                b"",
            );
        }
        Some(start) => {
            respond(
                stream,
                206,
                &[(
                    "Content-Range",
                    format!("bytes {}-{}/{}", start, total - 1, total),
                )],
                &media[start..],
            );
        }
        None => respond(stream, 200, &[("Content-Type", "video/mp4".to_string())], media),
    }
}

fn parse_range_start(head: &str) -> Option<usize> {
    head.lines().find_map(|line| {
        let (name, value) = line.split_once(':')?;
        if !name.trim().eq_ignore_ascii_case("range") {
            return None;
        }
        let spec = value.trim().strip_prefix("bytes=")?;
        let (start, _) = spec.split_once('-')?;
        start.trim().parse().ok()
    })
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        206 => "Partial Content",
        404 => "Not Found",
        416 => "Range Not Satisfiable",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        502 => "Bad Gateway",
        _ => "Status",
    }
}

fn respond(stream: &mut TcpStream, status: u16, headers: &[(&str, String)], body: &[u8]) {
    let mut response = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n",
        status,
        reason(status),
        body.len()
    );
    for (k, v) in headers {
        response.push_str(&format!("{}: {}\r\n", k, v));
    }
    response.push_str("\r\n");
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(body);
    let _ = stream.flush();
}
