//! Google Sheets API v4 client (blocking).

use super::credentials::{ServiceAccount, TokenProvider};
use super::{SheetRange, SheetService, ValueRange};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com/v4";

pub struct HttpSheets {
    client: Client,
    api_base: String,
    spreadsheet_id: String,
    tokens: TokenProvider,
}

/// Body of a `values.get` response.
#[derive(Deserialize)]
struct ValuesResponse {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

impl HttpSheets {
    pub fn new(
        api_base: &str,
        spreadsheet_id: &str,
        credentials: &Path,
        timeout_secs: u64,
    ) -> AppResult<Self> {
        if spreadsheet_id.trim().is_empty() {
            return Err(AppError::Config(
                "spreadsheet_id is not set (edit the config file or pass --spreadsheet)".into(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        let account = ServiceAccount::from_file(credentials)?;

        Ok(Self {
            tokens: TokenProvider::new(client.clone(), account),
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            spreadsheet_id: spreadsheet_id.to_string(),
        })
    }

    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        Self::new(
            &cfg.api_base,
            &cfg.spreadsheet_id,
            &cfg.credentials_path(),
            cfg.timeout_secs,
        )
    }

    fn values_url(&self, range: &SheetRange) -> String {
        format!(
            "{}/spreadsheets/{}/values/{}",
            self.api_base,
            self.spreadsheet_id,
            urlencoding::encode(&range.to_a1())
        )
    }

    fn check(resp: Response) -> AppResult<Response> {
        if resp.status().is_success() {
            return Ok(resp);
        }
        let status = resp.status().as_u16();
        let message = resp.text().unwrap_or_default();
        warn!(status, body = %message, "Sheets API error");
        Err(AppError::Api { status, message })
    }
}

/// Render a JSON cell as the text the sheet shows.
fn cell_text(v: serde_json::Value) -> String {
    match v {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl SheetService for HttpSheets {
    fn get_values(&self, range: &SheetRange) -> AppResult<Vec<Vec<String>>> {
        let token = self.tokens.access_token()?;
        debug!(range = %range, "reading values");

        let resp = self
            .client
            .get(self.values_url(range))
            .bearer_auth(&token)
            .send()?;

        let body: ValuesResponse = Self::check(resp)?
            .json()
            .map_err(|e| AppError::Response(e.to_string()))?;

        Ok(body
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect())
    }

    fn append_row(&self, range: &SheetRange, row: &[String]) -> AppResult<()> {
        let token = self.tokens.access_token()?;
        debug!(range = %range, "appending row");

        let url = format!("{}:append", self.values_url(range));
        let body = serde_json::json!({ "values": [row] });

        let resp = self
            .client
            .post(url)
            .query(&[
                ("valueInputOption", "USER_ENTERED"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .bearer_auth(&token)
            .json(&body)
            .send()?;

        Self::check(resp)?;
        Ok(())
    }

    fn batch_update(&self, data: &[ValueRange]) -> AppResult<()> {
        let token = self.tokens.access_token()?;
        debug!(ranges = data.len(), "batch update");

        let url = format!(
            "{}/spreadsheets/{}/values:batchUpdate",
            self.api_base, self.spreadsheet_id
        );
        let data_json: Vec<serde_json::Value> = data
            .iter()
            .map(|vr| {
                serde_json::json!({
                    "range": vr.range.to_a1(),
                    "values": vr.values,
                })
            })
            .collect();
        let body = serde_json::json!({
            "valueInputOption": "USER_ENTERED",
            "data": data_json,
        });

        let resp = self
            .client
            .post(url)
            .bearer_auth(&token)
            .json(&body)
            .send()?;

        Self::check(resp)?;
        Ok(())
    }
}
