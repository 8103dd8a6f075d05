//! # paramsecret
//!
//! Lifecycle controller for the `Surnet::ParameterStore::Secret` resource
//! type. An infrastructure-as-code host invokes Create, Read, Update, Delete
//! or List with a desired state; the controller reconciles it against a
//! secure parameter store.
//!
//! ## Architecture
//!
//! ```text
//! HandlerRequest → ResourceHandler ─┬→ planner (password action, tag delta)
//!                                   └→ ParameterStore (get / put / tags / delete / list)
//!                → ProgressEvent
//! ```
//!
//! ## Core Components
//!
//! - **password**: policy-driven password generator on a CSPRNG
//! - **planner**: generate / reuse / accept-input decision and tag delta
//! - **store**: async parameter store boundary with local backends
//! - **handler**: validation and sequencing of the five lifecycle actions
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use paramsecret::handler::{HandlerRequest, ResourceHandler, SecretParameterHandler};
//! use paramsecret::model::{PasswordOptions, ResourceModel};
//! use paramsecret::store::InMemoryParameterStore;
//!
//! # async fn run() {
//! let handler = SecretParameterHandler::new(InMemoryParameterStore::new());
//! let desired = ResourceModel {
//!     password_options: Some(PasswordOptions::default().with_length(32)),
//!     ..ResourceModel::stub("/app/db-password")
//! };
//! let event = handler.invoke(&HandlerRequest::create(desired)).await;
//! assert!(event.is_success());
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod handler;
pub mod model;
pub mod observability;
pub mod password;
pub mod planner;
pub mod store;

pub use config::Config;
pub use errors::{Error, HandlerError, Result};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
