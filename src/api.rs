// API client module: a small blocking HTTP client for the department /
// payroll backend. Each operation issues exactly one request and folds
// every possible outcome into an `ApiResult`, so callers never see a
// reqwest error or a panic.

use crate::config::ClientConfig;
use crate::error::{ApiFailure, ConfigError};
use crate::model::{self, EmployeeRecord};
use reqwest::blocking::{Client, Response};
use reqwest::{Method, StatusCode};
use serde_json::{json, Map, Value};
use tracing::{debug, warn};
use url::Url;

/// Outcome of every backend operation.
///
/// - `Ok(Some(payload))`: success with data (parsed JSON, or the raw text
///   as a JSON string when the body is not JSON)
/// - `Ok(None)`: success with nothing to show
/// - `Err(failure)`: transport or HTTP failure, `failure.to_string()` is
///   the message
pub type ApiResult = Result<Option<Value>, ApiFailure>;

/// Message carried by the synthetic payload produced for `204 No Content`.
pub const NO_CONTENT_MESSAGE: &str = "operation completed";

/// Blocking API client holding a reqwest client and the base URL every
/// operation path is appended to.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Build a client from an explicit configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        // The blocking builder defaults to a 30s timeout; pass ours through
        // so `None` really means no timeout.
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(ApiClient {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `POST departamentos/{dept}/colaboradores` with the serialized record.
    pub fn add_employee(&self, department: &str, record: &EmployeeRecord) -> ApiResult {
        let url = self.endpoint(department, &["colaboradores"])?;
        let body = model::serialize(record);
        self.execute(Method::POST, url, Some(&body))
    }

    /// `GET departamentos/{dept}/colaboradores`.
    pub fn list_employees(&self, department: &str) -> ApiResult {
        let url = self.endpoint(department, &["colaboradores"])?;
        self.execute(Method::GET, url, None)
    }

    /// `GET departamentos/{dept}/folha-salarial`. The summary is returned
    /// as-is; its schema belongs to the backend.
    pub fn compute_payroll(&self, department: &str) -> ApiResult {
        let url = self.endpoint(department, &["folha-salarial"])?;
        self.execute(Method::GET, url, None)
    }

    /// `DELETE departamentos/{dept}/colaboradores/{id}`.
    pub fn remove_employee(&self, department: &str, id: i64) -> ApiResult {
        let id = id.to_string();
        let url = self.endpoint(department, &["colaboradores", &id])?;
        self.execute(Method::DELETE, url, None)
    }

    /// Build `departamentos/{department}/{rest..}` on top of the base URL.
    /// Segments are percent-encoded, so a department named `a/b` stays a
    /// single segment.
    ///
    /// `.` and `..` are refused: URL normalization drops them (encoded or
    /// not), which would address a different resource.
    fn endpoint(&self, department: &str, rest: &[&str]) -> Result<Url, ApiFailure> {
        if department == "." || department == ".." {
            warn!(department, "refusing dot-segment department name");
            return Err(ApiFailure::InvalidDepartment(department.to_string()));
        }
        let mut url = self.base_url.clone();
        // `ClientConfig::new` rejects cannot-be-a-base URLs, so this is Ok.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .push("departamentos")
                .push(department)
                .extend(rest);
        }
        Ok(url)
    }

    fn execute(&self, method: Method, url: Url, body: Option<&Map<String, Value>>) -> ApiResult {
        debug!(%method, %url, "sending request");
        let mut request = self.client.request(method.clone(), url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }

        let result = request
            .send()
            .map_err(|err| ApiFailure::transport(&err))
            .and_then(read_response);

        match &result {
            Ok(payload) => debug!(%method, %url, has_payload = payload.is_some(), "request succeeded"),
            Err(failure) => warn!(%method, %url, error = %failure, "request failed"),
        }
        result
    }
}

fn read_response(response: Response) -> ApiResult {
    let status = response.status();
    if is_error_status(status) {
        // Best effort: the error body is only used for the message.
        let body = response.text().unwrap_or_default();
        return normalize(status, &body);
    }
    let body = response.text().map_err(|err| ApiFailure::transport(&err))?;
    normalize(status, &body)
}

fn is_error_status(status: StatusCode) -> bool {
    status.is_client_error() || status.is_server_error()
}

/// Collapse a received status and body into an `ApiResult`.
///
/// 1. 4xx/5xx is a failure carrying the status and body text.
/// 2. 204 is a success with a synthetic `{success, message}` payload.
/// 3. A non-empty body is parsed as JSON; text that is not JSON is kept as
///    a JSON string. A literal `null` counts as no data.
/// 4. An empty body is a success without payload.
pub fn normalize(status: StatusCode, body: &str) -> ApiResult {
    if is_error_status(status) {
        return Err(ApiFailure::Status {
            status,
            body: body.trim().to_string(),
        });
    }
    if status == StatusCode::NO_CONTENT {
        return Ok(Some(json!({ "success": true, "message": NO_CONTENT_MESSAGE })));
    }

    let body = body.trim();
    if body.is_empty() {
        return Ok(None);
    }
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Null) => Ok(None),
        Ok(value) => Ok(Some(value)),
        // The reference server answers POST/DELETE with plain-text
        // confirmations; those are successes, kept verbatim.
        Err(_) => Ok(Some(Value::String(body.to_string()))),
    }
}
