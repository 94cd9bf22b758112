//! Request/Error File Logging
//!
//! Writes one log file per day under a configured directory, with
//! bracketed timestamp and tag prefixes:
//!
//! ```text
//! [2025-08-24 13:05:42] [REQUEST] 203.0.113.9 POST /login
//! [2025-08-24 13:05:42] [ERROR] 203.0.113.9 POST /login -> 401
//! ```
//!
//! The log is an injected component, not a global: handlers and
//! middleware receive a [`RequestLog`] handle and write through it.
//! Write failures never fail the request; they are reported via
//! `tracing` instead.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use chrono::{Local, NaiveDate};

use crate::client::extract_client_ip;

// ============================================================================
// RequestLog
// ============================================================================

/// Daily-rolling request/error log
///
/// Cheap to clone; all clones share the same file handle. The file is
/// named `YYYYMMDD.log` and rolls over on the first write after the
/// local date changes.
#[derive(Clone)]
pub struct RequestLog {
    inner: Arc<Mutex<LogFile>>,
}

struct LogFile {
    dir: PathBuf,
    day: NaiveDate,
    file: File,
}

impl RequestLog {
    /// Open the log for today, creating the directory if needed
    pub fn open(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        let day = Local::now().date_naive();
        let file = open_day_file(&dir, day)?;

        Ok(Self {
            inner: Arc::new(Mutex::new(LogFile { dir, day, file })),
        })
    }

    /// Record an incoming request
    pub fn request(&self, addr: &str, method: &str, path: &str) {
        self.write_line("REQUEST", &format!("{} {} {}", addr, method, path));
    }

    /// Record a request that finished with an error status
    pub fn error(&self, addr: &str, method: &str, path: &str, status: u16) {
        self.write_line("ERROR", &format!("{} {} {} -> {}", addr, method, path, status));
    }

    fn write_line(&self, tag: &str, message: &str) {
        let now = Local::now();
        let line = format!("[{}] [{}] {}\n", now.format("%Y-%m-%d %H:%M:%S"), tag, message);

        let mut inner = match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        // Roll to a new file on the first write after midnight
        let today = now.date_naive();
        if today != inner.day {
            match open_day_file(&inner.dir, today) {
                Ok(file) => {
                    inner.file = file;
                    inner.day = today;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to roll request log file");
                    return;
                }
            }
        }

        if let Err(e) = inner.file.write_all(line.as_bytes()) {
            tracing::warn!(error = %e, "Failed to write request log");
        }
    }
}

fn open_day_file(dir: &Path, day: NaiveDate) -> std::io::Result<File> {
    let path = dir.join(format!("{}.log", day.format("%Y%m%d")));
    OpenOptions::new().create(true).append(true).open(path)
}

// ============================================================================
// Middleware
// ============================================================================

/// Log every request, and additionally log error responses
///
/// Mounted outermost so that rejections from inner layers (e.g. the
/// session gate) still produce an `[ERROR]` line.
pub async fn access_log(State(log): State<RequestLog>, req: Request, next: Next) -> Response {
    let direct_ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip());
    let addr = extract_client_ip(req.headers(), direct_ip)
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| "-".to_string());
    let method = req.method().to_string();
    let path = req.uri().path().to_string();

    log.request(&addr, &method, &path);

    let response = next.run(req).await;

    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        log.error(&addr, &method, &path, status.as_u16());
    }

    response
}

// ============================================================================
// Tests
// ============================================================================
