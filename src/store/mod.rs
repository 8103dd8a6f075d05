//! # Parameter Store
//!
//! Boundary to the remote secure key-value store that holds secret
//! parameters. [`ParameterStore`] is the async interface lifecycle handlers
//! are built against; the in-memory and JSON-file backends serve local runs
//! and tests.
//!
//! # Security Considerations
//!
//! - Values travel as [`SecretString`](crate::model::SecretString) and are
//!   never logged
//! - Reads always return decrypted values; callers decide what to expose
//! - The JSON-file backend stores plaintext and is for development only

pub mod client;
pub mod error;
pub mod file;
pub mod memory;

pub use client::{
    Parameter, ParameterPage, ParameterStore, ParameterSummary, PutParameter, SECURE_STRING,
};
pub use error::{Result, StoreError};
pub use file::JsonFileParameterStore;
pub use memory::{InMemoryParameterStore, DEFAULT_PAGE_SIZE};
