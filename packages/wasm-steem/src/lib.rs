//! wasm-steem: WASM module for Steem signing-request handling
//!
//! This crate provides:
//! - Operation schema registry (field types, defaults, required authority)
//! - Operation payload coercion for display and signing
//! - Required signing authority resolution
//! - Canonical `steem://sign/...` URIs and legacy link transcoding
//! - Host environment detection
//!
//! # Architecture
//!
//! The crate follows a two-layer architecture:
//! - **Core layer** (`src/*.rs`): Pure Rust logic, no WASM dependencies
//! - **WASM layer** (`src/wasm/*.rs`): Thin wrappers with `#[wasm_bindgen]`

pub mod authority;
pub mod b64u;
pub mod coerce;
pub mod environment;
pub mod error;
pub mod legacy;
pub mod processor;
pub mod registry;
pub mod types;
pub mod uri;
pub mod wasm;

// Re-export main types for convenience
pub use authority::resolve_authority;
pub use coerce::coerce;
pub use environment::{detect, HostEnvironment, HostHints};
pub use error::WasmSteemError;
pub use legacy::{transcode, CanonicalRequest, TranscodeError};
pub use processor::{process_operation, process_transaction};
pub use registry::{FieldSpec, FieldType, OperationRegistry, OperationSchema};
pub use types::{
    Authority, ConversionContext, FieldValue, NamedOperation, Operation, Payload, ProcessedOperation,
    Transaction, TransactionEnvelope,
};
pub use uri::{resolve_callback, CallbackContext, RequestParams, SigningRequest};
