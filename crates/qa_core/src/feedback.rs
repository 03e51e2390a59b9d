//! Feedback rating for a completed exchange.

use serde::{Deserialize, Serialize};

/// Reader rating attached to a finished exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Good,
    Bad,
}
