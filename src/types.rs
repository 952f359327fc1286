// Catalog types and the crate-wide error

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Settlement currency shown for a service price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    USDC,
    SOL,
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Currency::USDC => write!(f, "USDC"),
            Currency::SOL => write!(f, "SOL"),
        }
    }
}

/// Fixed set of catalog categories, declared in classification priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Tokens,
    AI,
    Gaming,
    Social,
    Data,
    Development,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Tokens,
        Category::AI,
        Category::Gaming,
        Category::Social,
        Category::Data,
        Category::Development,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Tokens => "Tokens",
            Category::AI => "AI",
            Category::Gaming => "Gaming",
            Category::Social => "Social",
            Category::Data => "Data",
            Category::Development => "Development",
            Category::Other => "Other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Human-readable amount with two fraction digits, e.g. "1.50"
    pub amount: String,
    pub currency: Currency,
    pub network: String,
}

/// The registry reports no health signal, so anything parsed is `Online`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Online,
}

/// One payment-gated resource in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub name: String,
    pub description: String,
    pub endpoint: String,
    pub price: Price,
    pub category: Category,
    pub status: ServiceStatus,
    /// Raw `accepts` entries, passed through untouched
    pub accepted_payment_options: Vec<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Discovery error: {0}")]
    Discovery(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Discovery(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (
            status,
            Json(serde_json::json!({
                "success": false,
                "error": self.to_string(),
            })),
        )
            .into_response()
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;
