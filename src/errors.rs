use thiserror::Error;
use uuid::Uuid;

/// Error type that captures common subscription bookkeeping failures.
#[derive(Debug, Error)]
pub enum SubscriptionError {
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid subscription: {0}")]
    InvalidSubscription(String),
    #[error("Unknown subscription: {0}")]
    UnknownSubscription(Uuid),
}
