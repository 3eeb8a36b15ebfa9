// Library root
// -----------
// This crate exposes the library surface of the SGRH command-line client.
// The binary (`main.rs`) wires these modules into the interactive CLI.
//
// Module responsibilities:
// - `model`: employee records (salaried, hourly, intern), parsing of raw
//   operator input and the wire serializer.
// - `api`: blocking HTTP client; one request per operation, every outcome
//   folded into an `ApiResult`.
// - `config`: explicit client configuration (base URL, timeout).
// - `error`: validation, API and configuration error types.
// - `cli` / `logger`: argument parsing and tracing setup for the binary.
// - `ui`: the terminal menu that delegates to `model` and `api`.
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logger;
pub mod model;
pub mod ui;

pub use api::{ApiClient, ApiResult};
pub use config::ClientConfig;
pub use error::{ApiFailure, ConfigError, ValidationError};
pub use model::{build_record, serialize, EmployeeRecord, PayKind, Payable, Payment};
