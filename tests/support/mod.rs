//! Shared harness for integration tests: a scripted local asset server and
//! throwaway site directories.

#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// One scripted response.
#[derive(Debug, Clone)]
struct Asset {
    status: u16,
    content_type: Option<String>,
    body: Vec<u8>,
}

type Routes = Arc<Mutex<HashMap<String, Asset>>>;

/// Local HTTP server answering GET requests from a route table.
///
/// Unknown paths answer 404. Every request is counted per path.
pub struct AssetServer {
    address: String,
    routes: Routes,
    hits: Arc<Mutex<HashMap<String, usize>>>,
    shutdown: Arc<AtomicBool>,
    thread: Option<thread::JoinHandle<()>>,
}

impl AssetServer {
    /// Start a server bound to `127.0.0.1:*`.
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind asset server");
        listener
            .set_nonblocking(true)
            .expect("nonblocking listener");
        let addr = listener.local_addr().expect("asset server addr");

        let routes: Routes = Arc::default();
        let hits: Arc<Mutex<HashMap<String, usize>>> = Arc::default();
        let shutdown = Arc::new(AtomicBool::new(false));

        let served_routes = Arc::clone(&routes);
        let served_hits = Arc::clone(&hits);
        let shutdown_flag = Arc::clone(&shutdown);
        let thread = thread::spawn(move || {
            while !shutdown_flag.load(Ordering::Relaxed) {
                match listener.accept() {
                    Ok((mut stream, _)) => {
                        let _ = handle_request(&mut stream, &served_routes, &served_hits);
                    }
                    Err(_) => thread::sleep(Duration::from_millis(10)),
                }
            }
        });

        Self {
            address: format!("http://{addr}"),
            routes,
            hits,
            shutdown,
            thread: Some(thread),
        }
    }

    /// Absolute URL of `path` on this server.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.address)
    }

    pub fn serve(&self, path: &str, content_type: &str, body: &[u8]) {
        self.routes.lock().expect("routes").insert(
            path.to_string(),
            Asset {
                status: 200,
                content_type: Some(content_type.to_string()),
                body: body.to_vec(),
            },
        );
    }

    pub fn serve_json(&self, path: &str, value: &serde_json::Value) {
        self.serve(path, "application/json", value.to_string().as_bytes());
    }

    pub fn fail(&self, path: &str, status: u16) {
        self.routes.lock().expect("routes").insert(
            path.to_string(),
            Asset {
                status,
                content_type: None,
                body: Vec::new(),
            },
        );
    }

    /// Number of requests seen for `path`.
    pub fn hits(&self, path: &str) -> usize {
        self.hits
            .lock()
            .expect("hits")
            .get(path)
            .copied()
            .unwrap_or(0)
    }
}

impl Drop for AssetServer {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(host) = self.address.strip_prefix("http://") {
            let _ = TcpStream::connect(host).and_then(|s| s.shutdown(Shutdown::Both));
        }
        if let Some(join) = self.thread.take() {
            let _ = join.join();
        }
    }
}

fn handle_request(
    stream: &mut TcpStream,
    routes: &Routes,
    hits: &Mutex<HashMap<String, usize>>,
) -> Result<(), String> {
    stream
        .set_nonblocking(false)
        .map_err(|e| format!("failed setting blocking stream: {e}"))?;
    stream
        .set_read_timeout(Some(Duration::from_secs(5)))
        .map_err(|e| format!("failed setting read timeout: {e}"))?;

    let path = read_request_path(stream)?;
    *hits
        .lock()
        .map_err(|_| "hits lock poisoned".to_string())?
        .entry(path.clone())
        .or_default() += 1;

    let asset = routes
        .lock()
        .map_err(|_| "routes lock poisoned".to_string())?
        .get(&path)
        .cloned()
        .unwrap_or(Asset {
            status: 404,
            content_type: None,
            body: b"not found".to_vec(),
        });

    let reason = match asset.status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    };
    let mut head = format!(
        "HTTP/1.1 {} {reason}\r\nContent-Length: {}\r\nConnection: close\r\n",
        asset.status,
        asset.body.len()
    );
    if let Some(content_type) = &asset.content_type {
        head.push_str(&format!("Content-Type: {content_type}\r\n"));
    }
    head.push_str("\r\n");
    stream
        .write_all(head.as_bytes())
        .and_then(|_| stream.write_all(&asset.body))
        .and_then(|_| stream.flush())
        .map_err(|e| format!("failed writing response: {e}"))?;
    let _ = stream.shutdown(Shutdown::Both);
    Ok(())
}

/// Read request headers and return the request path.
fn read_request_path(stream: &mut TcpStream) -> Result<String, String> {
    let mut buffer = Vec::<u8>::new();
    let mut temp = [0u8; 1024];
    while !buffer.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = stream
            .read(&mut temp)
            .map_err(|e| format!("failed reading request bytes: {e}"))?;
        if n == 0 {
            break;
        }
        buffer.extend_from_slice(&temp[..n]);
    }
    let head = String::from_utf8_lossy(&buffer);
    let request_line = head.lines().next().unwrap_or_default();
    let mut parts = request_line.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("GET"), Some(path)) => Ok(path.to_string()),
        _ => Err(format!("unsupported request line `{request_line}`")),
    }
}

/// Temporary directory holding a GUI site on disk; removed on drop.
pub struct TempSite {
    root: PathBuf,
}

impl TempSite {
    pub fn new(label: &str) -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        let root = std::env::temp_dir().join(format!(
            "sss-guis-it-{label}-{}-{}-{nanos}",
            std::process::id(),
            COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        fs::create_dir_all(&root).expect("create temp site");
        Self { root }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(&path, content).expect("write site file");
        path
    }
}

impl Drop for TempSite {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}

/// Build a list-form structure document.
pub fn structure(types: &[&str], widgets: serde_json::Value, main: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "types": types,
        "widgets": widgets,
        "main": main,
    })
}
