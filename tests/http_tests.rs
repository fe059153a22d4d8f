use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use sheetclock::core::attendance::read_table;
use sheetclock::core::clock::{ClockLogic, ClockOutOutcome, ClockSettings};
use sheetclock::errors::AppError;
use sheetclock::sheets::{HttpSheets, SheetRange, SheetService};

mod common;
use common::{FakeGoogle, Recorded, at};

const DAY: (i32, u32, u32) = (2024, 3, 4);
const SHEET_ID: &str = "sheet-1";

fn sheets_for(google: &FakeGoogle, name: &str) -> HttpSheets {
    HttpSheets::new(&google.api_base(), SHEET_ID, &google.key_file(name), 5).unwrap()
}

fn values_body(rows: serde_json::Value) -> (u16, String) {
    (200, serde_json::json!({ "range": "ignored", "values": rows }).to_string())
}

/// Jye has one closed and one open row; writes just succeed.
fn jye_open_shift(req: &Recorded) -> (u16, String) {
    if req.method == "GET" {
        values_body(serde_json::json!([
            ["Date", "Start Time", "Alcohol Check", "End Time", "Hours Worked", "Early Pick Up"],
            ["2024/03/01", "09:00:00 AM", "0.00mg", "05:00:00 PM", 8],
            ["2024/03/04", "09:00:00 AM", "0.00mg"]
        ]))
    } else {
        (200, "{}".to_string())
    }
}

#[test]
fn test_get_values_request_and_cell_rendering() {
    let google = FakeGoogle::start(3600, jye_open_shift);
    let sheets = sheets_for(&google, "http_get");

    let rows = sheets.get_values(&SheetRange::attendance("O'Brien Jr")).unwrap();

    let api = google.api_requests();
    assert_eq!(api.len(), 1);
    assert_eq!(api[0].method, "GET");
    assert_eq!(
        api[0].target,
        "/v4/spreadsheets/sheet-1/values/%27O%27%27Brien%20Jr%27%21A%3AF"
    );
    assert_eq!(api[0].headers["authorization"], "Bearer tok-1");

    // numeric cells come back as text
    assert_eq!(rows[1][4], "8");
    assert_eq!(rows[2].len(), 3);
}

#[test]
fn test_clock_out_sends_one_batch_update() {
    let google = FakeGoogle::start(3600, jye_open_shift);
    let sheets = sheets_for(&google, "http_clock_out");

    let outcome = ClockLogic::clock_out(
        &sheets,
        &ClockSettings::default(),
        "Jye",
        at(DAY, 17, 30, 0),
    )
    .unwrap();
    assert!(matches!(outcome, ClockOutOutcome::Closed { row: 3, .. }));

    let api = google.api_requests();
    assert_eq!(api.len(), 2);
    assert_eq!(api[1].method, "POST");
    assert_eq!(api[1].target, "/v4/spreadsheets/sheet-1/values:batchUpdate");

    let body = api[1].json();
    assert_eq!(body["valueInputOption"], "USER_ENTERED");
    assert_eq!(
        body["data"],
        serde_json::json!([
            { "range": "'Jye'!D3", "values": [["05:30:00 PM"]] },
            { "range": "'Jye'!E3", "values": [["8.50"]] }
        ])
    );

    // read and write share one token
    assert_eq!(google.token_exchanges(), 1);
    assert!(api.iter().all(|r| r.headers["authorization"] == "Bearer tok-1"));
}

#[test]
fn test_clock_in_appends_with_user_entered_values() {
    let google = FakeGoogle::start(3600, jye_open_shift);
    let sheets = sheets_for(&google, "http_clock_in");

    ClockLogic::clock_in(&sheets, &ClockSettings::default(), "Jye", at(DAY, 9, 0, 0)).unwrap();

    let api = google.api_requests();
    assert_eq!(api.len(), 1);
    assert_eq!(api[0].method, "POST");
    assert_eq!(
        api[0].target,
        "/v4/spreadsheets/sheet-1/values/%27Jye%27%21A%3AF:append?valueInputOption=USER_ENTERED&insertDataOption=INSERT_ROWS"
    );
    assert_eq!(
        api[0].json(),
        serde_json::json!({
            "values": [["2024/03/04", "09:00:00 AM", "0.00mg", "", "", ""]]
        })
    );
}

#[test]
fn test_token_exchange_uses_signed_jwt_grant() {
    let google = FakeGoogle::start(3600, jye_open_shift);
    let sheets = sheets_for(&google, "http_jwt");

    sheets.get_values(&SheetRange::attendance("Jye")).unwrap();

    let token_req = google
        .requests()
        .into_iter()
        .find(Recorded::is_token)
        .unwrap();
    assert_eq!(token_req.method, "POST");

    let form: std::collections::HashMap<String, String> = token_req
        .body
        .split('&')
        .filter_map(|kv| kv.split_once('='))
        .map(|(k, v)| (k.to_string(), urlencoding::decode(v).unwrap().to_string()))
        .collect();
    assert_eq!(
        form["grant_type"],
        "urn:ietf:params:oauth:grant-type:jwt-bearer"
    );

    let parts: Vec<&str> = form["assertion"].split('.').collect();
    assert_eq!(parts.len(), 3);

    let header: serde_json::Value =
        serde_json::from_slice(&URL_SAFE_NO_PAD.decode(parts[0]).unwrap()).unwrap();
    assert_eq!(header["alg"], "RS256");

    let claims: serde_json::Value =
        serde_json::from_slice(&URL_SAFE_NO_PAD.decode(parts[1]).unwrap()).unwrap();
    assert_eq!(claims["iss"], "clock@sheetclock-test.iam.gserviceaccount.com");
    assert_eq!(claims["aud"], google.token_uri());
    assert_eq!(claims["scope"], "https://www.googleapis.com/auth/spreadsheets");
    assert!(!parts[2].is_empty());
}

#[test]
fn test_token_is_cached_between_calls() {
    let google = FakeGoogle::start(3600, jye_open_shift);
    let sheets = sheets_for(&google, "http_cached");

    sheets.get_values(&SheetRange::attendance("Jye")).unwrap();
    sheets.get_values(&SheetRange::attendance("Harry")).unwrap();

    assert_eq!(google.token_exchanges(), 1);
}

#[test]
fn test_token_close_to_expiry_is_refreshed() {
    // less than the two minute margin left: every call needs a new token
    let google = FakeGoogle::start(90, jye_open_shift);
    let sheets = sheets_for(&google, "http_refresh");

    sheets.get_values(&SheetRange::attendance("Jye")).unwrap();
    sheets.get_values(&SheetRange::attendance("Jye")).unwrap();

    assert_eq!(google.token_exchanges(), 2);
    let api = google.api_requests();
    assert_eq!(api[0].headers["authorization"], "Bearer tok-1");
    assert_eq!(api[1].headers["authorization"], "Bearer tok-2");
}

#[test]
fn test_api_error_status_is_reported() {
    let google = FakeGoogle::start(3600, |_req: &Recorded| {
        (
            400,
            r#"{"error":{"code":400,"message":"Unable to parse range: 'Bob'!A:F"}}"#.to_string(),
        )
    });
    let sheets = sheets_for(&google, "http_error");

    let err = sheets.get_values(&SheetRange::attendance("Bob")).unwrap_err();
    match err {
        AppError::Api { status, message } => {
            assert_eq!(status, 400);
            assert!(message.contains("Unable to parse range"));
        }
        other => panic!("unexpected error: {other}"),
    }

    let read = read_table(&sheets, "Bob");
    assert!(read.table.is_empty());
    assert_eq!(
        read.warning.as_deref(),
        Some("Error loading data for Bob. Make sure their sheet exists.")
    );
}
