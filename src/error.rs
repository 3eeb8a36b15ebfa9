// Error types shared by the record model, the HTTP adapter and the
// configuration layer. Every failure the library can produce is one of
// these enums; `anyhow` is only used by the binary and the menu loop.

use reqwest::StatusCode;
use thiserror::Error;

/// Raised by `model::build_record` before any request is made.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("invalid employee id {0:?}: expected an integer")]
    InvalidId(String),

    #[error("unknown employee type {0:?}: expected efetivo, autonomo or estagiario")]
    UnknownKind(String),

    #[error("missing value for field {0}")]
    MissingField(&'static str),

    #[error("invalid value {value:?} for field {field}: expected a number")]
    InvalidNumber { field: &'static str, value: String },
}

/// Failure half of an `ApiResult`. The `Display` output is the message
/// shown to the operator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiFailure {
    /// DNS, connect, timeout or body read failures.
    #[error("connection failed: {0}")]
    Transport(String),

    /// Department name that cannot be expressed as a single path segment.
    #[error("invalid department name {0:?}")]
    InvalidDepartment(String),

    /// The backend answered with a 4xx/5xx status.
    #[error("{}", status_message(.status, .body))]
    Status { status: StatusCode, body: String },
}

impl ApiFailure {
    /// Builds a transport failure carrying the whole source chain.
    pub(crate) fn transport(err: &reqwest::Error) -> Self {
        let mut message = err.to_string();
        let mut source = std::error::Error::source(err);
        while let Some(cause) = source {
            let text = cause.to_string();
            if !message.contains(&text) {
                message.push_str(": ");
                message.push_str(&text);
            }
            source = cause.source();
        }
        ApiFailure::Transport(message)
    }

    /// HTTP status of an API failure, `None` for transport failures.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiFailure::Transport(_) | ApiFailure::InvalidDepartment(_) => None,
            ApiFailure::Status { status, .. } => Some(*status),
        }
    }
}

fn status_message(status: &StatusCode, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        status.to_string()
    } else {
        format!("{} - {}", status, body)
    }
}

/// Errors raised while building a `ClientConfig`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid base URL {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("base URL {0:?} cannot carry path segments")]
    UnsupportedBaseUrl(String),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_message_includes_trimmed_body() {
        let failure = ApiFailure::Status {
            status: StatusCode::NOT_FOUND,
            body: "Departamento nao encontrado\n".into(),
        };
        assert_eq!(failure.to_string(), "404 Not Found - Departamento nao encontrado");
        assert_eq!(failure.status(), Some(StatusCode::NOT_FOUND));
    }

    #[test]
    fn status_message_without_body() {
        let failure = ApiFailure::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: String::new(),
        };
        assert_eq!(failure.to_string(), "500 Internal Server Error");
    }

    #[test]
    fn invalid_department_message_names_it() {
        let failure = ApiFailure::InvalidDepartment("..".into());
        assert_eq!(failure.to_string(), "invalid department name \"..\"");
        assert_eq!(failure.status(), None);
    }

    #[test]
    fn transport_message_is_prefixed() {
        let failure = ApiFailure::Transport("tcp connect error".into());
        assert!(failure.to_string().starts_with("connection failed:"));
        assert_eq!(failure.status(), None);
    }
}
