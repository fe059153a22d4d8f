#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, NaiveDateTime};
use sheetclock::errors::{AppError, AppResult};
use sheetclock::models::attendance::COLUMNS;
use sheetclock::sheets::range::column_index;
use sheetclock::sheets::{SheetRange, SheetService, ValueRange};
use std::cell::RefCell;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread;

pub fn sc() -> Command {
    cargo_bin_cmd!("sheetclock")
}

/// Unique journal path inside the system temp dir, removed if present
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_sheetclock.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Write a config file into the temp dir and return its path
pub fn setup_test_config(name: &str, yaml: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_sheetclock.conf", name));
    let p = path.to_string_lossy().to_string();
    fs::write(&p, yaml).expect("write test config");
    p
}

/// Temp config path that does not exist yet
pub fn missing_config(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_sheetclock.conf", name));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

pub fn at(date: (i32, u32, u32), h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(date.0, date.1, date.2)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap()
}

/// In-memory spreadsheet: one Vec of rows per tab, header included.
#[derive(Default)]
pub struct MemorySheets {
    pub tabs: RefCell<HashMap<String, Vec<Vec<String>>>>,
    pub appends: RefCell<Vec<(String, Vec<String>)>>,
    pub batches: RefCell<Vec<Vec<ValueRange>>>,
}

impl MemorySheets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tab with the standard header and the given data rows.
    pub fn with_tab(self, name: &str, rows: &[&[&str]]) -> Self {
        let mut all = vec![COLUMNS.iter().map(|c| c.to_string()).collect::<Vec<_>>()];
        all.extend(
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect::<Vec<_>>()),
        );
        self.tabs.borrow_mut().insert(name.to_string(), all);
        self
    }

    /// Tab rows as stored, header included.
    pub fn tab(&self, name: &str) -> Vec<Vec<String>> {
        self.tabs.borrow().get(name).cloned().unwrap_or_default()
    }

    /// One cell of a tab by 1-based row and column letter.
    pub fn cell(&self, name: &str, col: char, row: usize) -> String {
        self.tab(name)
            .get(row - 1)
            .and_then(|r| r.get(column_index(col)).cloned())
            .unwrap_or_default()
    }

    fn missing(tab: &str) -> AppError {
        AppError::Api {
            status: 400,
            message: format!("Unable to parse range: '{}'!A:F", tab),
        }
    }
}

/// The service omits trailing empty cells.
fn trim_trailing(mut row: Vec<String>) -> Vec<String> {
    while row.last().is_some_and(|c| c.is_empty()) {
        row.pop();
    }
    row
}

impl SheetService for MemorySheets {
    fn get_values(&self, range: &SheetRange) -> AppResult<Vec<Vec<String>>> {
        let tabs = self.tabs.borrow();
        let rows = tabs.get(&range.tab).ok_or_else(|| Self::missing(&range.tab))?;
        let first = column_index(range.first_col);
        let last = column_index(range.last_col);

        Ok(rows
            .iter()
            .map(|r| {
                let slice: Vec<String> = r.iter().skip(first).take(last - first + 1).cloned().collect();
                trim_trailing(slice)
            })
            .collect())
    }

    fn append_row(&self, range: &SheetRange, row: &[String]) -> AppResult<()> {
        let mut tabs = self.tabs.borrow_mut();
        let rows = tabs
            .get_mut(&range.tab)
            .ok_or_else(|| Self::missing(&range.tab))?;
        rows.push(trim_trailing(row.to_vec()));
        self.appends
            .borrow_mut()
            .push((range.tab.clone(), row.to_vec()));
        Ok(())
    }

    fn batch_update(&self, data: &[ValueRange]) -> AppResult<()> {
        let mut tabs = self.tabs.borrow_mut();
        for vr in data {
            let rows = tabs
                .get_mut(&vr.range.tab)
                .ok_or_else(|| Self::missing(&vr.range.tab))?;
            let start_row = vr.range.row.expect("batch updates target rows") - 1;
            let first = column_index(vr.range.first_col);

            for (dr, values) in vr.values.iter().enumerate() {
                let r = start_row + dr;
                if rows.len() <= r {
                    rows.resize(r + 1, Vec::new());
                }
                for (dc, v) in values.iter().enumerate() {
                    let c = first + dc;
                    if rows[r].len() <= c {
                        rows[r].resize(c + 1, String::new());
                    }
                    rows[r][c] = v.clone();
                }
            }
        }
        self.batches.borrow_mut().push(data.to_vec());
        Ok(())
    }
}

/// RSA key used to sign test JWTs; never valid against a real endpoint.
pub const TEST_KEY_PEM: &str = include_str!("fixtures/test_service_account_key.pem");

/// One request as received by [`FakeGoogle`].
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub target: String,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl Recorded {
    pub fn is_token(&self) -> bool {
        self.target.starts_with("/token")
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

type Responder = dyn Fn(&Recorded) -> (u16, String) + Send + Sync;

/// Local HTTP server standing in for both the OAuth token endpoint and the
/// Sheets API. Token requests get `access_token` `tok-<n>`; everything else
/// is answered by the responder.
pub struct FakeGoogle {
    pub addr: String,
    pub requests: Arc<Mutex<Vec<Recorded>>>,
}

impl FakeGoogle {
    pub fn start<F>(expires_in: u64, responder: F) -> Self
    where
        F: Fn(&Recorded) -> (u16, String) + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let responder: Arc<Responder> = Arc::new(responder);

        let log = Arc::clone(&requests);
        thread::spawn(move || {
            let mut tokens = 0;
            for stream in listener.incoming().flatten() {
                let Some(req) = read_request(&stream) else {
                    continue;
                };
                let (status, body) = if req.is_token() {
                    tokens += 1;
                    (
                        200,
                        format!(r#"{{"access_token":"tok-{tokens}","expires_in":{expires_in},"token_type":"Bearer"}}"#),
                    )
                } else {
                    responder(&req)
                };
                log.lock().unwrap().push(req);
                write_response(stream, status, &body);
            }
        });

        Self { addr, requests }
    }

    pub fn api_base(&self) -> String {
        format!("http://{}/v4", self.addr)
    }

    pub fn token_uri(&self) -> String {
        format!("http://{}/token", self.addr)
    }

    /// Write a service account key file whose token_uri points here.
    pub fn key_file(&self, name: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("{}_sheetclock_key.json", name));
        let key = serde_json::json!({
            "type": "service_account",
            "client_email": "clock@sheetclock-test.iam.gserviceaccount.com",
            "private_key": TEST_KEY_PEM,
            "token_uri": self.token_uri(),
        });
        fs::write(&path, key.to_string()).unwrap();
        path
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn token_exchanges(&self) -> usize {
        self.requests().iter().filter(|r| r.is_token()).count()
    }

    /// Requests that reached the Sheets API, in order.
    pub fn api_requests(&self) -> Vec<Recorded> {
        self.requests().into_iter().filter(|r| !r.is_token()).collect()
    }
}

fn read_request(stream: &TcpStream) -> Option<Recorded> {
    let mut reader = BufReader::new(stream);

    let mut line = String::new();
    reader.read_line(&mut line).ok()?;
    let mut parts = line.split_whitespace();
    let method = parts.next()?.to_string();
    let target = parts.next()?.to_string();

    let mut headers = HashMap::new();
    loop {
        let mut h = String::new();
        reader.read_line(&mut h).ok()?;
        let h = h.trim_end();
        if h.is_empty() {
            break;
        }
        if let Some((k, v)) = h.split_once(':') {
            headers.insert(k.trim().to_ascii_lowercase(), v.trim().to_string());
        }
    }

    let len: usize = headers
        .get("content-length")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    let mut body = vec![0u8; len];
    reader.read_exact(&mut body).ok()?;

    Some(Recorded {
        method,
        target,
        headers,
        body: String::from_utf8_lossy(&body).to_string(),
    })
}

fn write_response(mut stream: TcpStream, status: u16, body: &str) {
    let reason = if status < 400 { "OK" } else { "Error" };
    let resp = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(resp.as_bytes()).ok();
    stream.flush().ok();
}
