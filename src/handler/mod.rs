//! # Lifecycle Handlers
//!
//! The host invokes one lifecycle action per call. A [`ResourceHandler`]
//! exposes the five actions; [`ResourceHandler::invoke`] dispatches a
//! [`HandlerRequest`] to the right one and folds any [`HandlerError`] into a
//! failed [`ProgressEvent`] so the host always receives a classified result.
//!
//! Handlers hold no state between calls. Every fact they need is fetched
//! from the store during the call.

pub mod progress;
pub mod request;
pub mod secret;

pub use progress::{OperationStatus, ProgressEvent};
pub use request::{Action, HandlerRequest};
pub use secret::SecretParameterHandler;

use async_trait::async_trait;
use tracing::{warn, Instrument};

use crate::errors::HandlerError;

/// Result of a single lifecycle action.
pub type HandlerResult = std::result::Result<ProgressEvent, HandlerError>;

/// The five lifecycle actions of a resource type.
#[async_trait]
pub trait ResourceHandler: Send + Sync {
    async fn create(&self, request: &HandlerRequest) -> HandlerResult;

    async fn read(&self, request: &HandlerRequest) -> HandlerResult;

    async fn update(&self, request: &HandlerRequest) -> HandlerResult;

    async fn delete(&self, request: &HandlerRequest) -> HandlerResult;

    async fn list(&self, request: &HandlerRequest) -> HandlerResult;

    /// Dispatches `request` by action and reports failures as a progress event.
    async fn invoke(&self, request: &HandlerRequest) -> ProgressEvent {
        let span = crate::operation_span!(request.action, request.resource_name().unwrap_or("-"));

        async {
            let result = match request.action {
                Action::Create => self.create(request).await,
                Action::Read => self.read(request).await,
                Action::Update => self.update(request).await,
                Action::Delete => self.delete(request).await,
                Action::List => self.list(request).await,
            };

            result.unwrap_or_else(|error| {
                warn!(
                    error = %error,
                    error_code = %error.code(),
                    phase = ?error.phase(),
                    "Lifecycle operation failed"
                );
                ProgressEvent::failed(&error)
            })
        }
        .instrument(span)
        .await
    }
}
