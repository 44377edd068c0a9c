//! Quote result shapes.

use serde::{Deserialize, Serialize};

/// Price used whenever a quote cannot be obtained.
pub const FALLBACK_PRICE: &str = "0";

/// Outcome of a lookup: the value, or the reason there is none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedData<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ParsedData<T> {
    pub fn data(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(error.into()),
        }
    }
}

impl ParsedData<String> {
    /// The fallback price together with the reason it was used.
    pub fn fallback(error: impl Into<String>) -> Self {
        Self {
            data: Some(FALLBACK_PRICE.to_string()),
            error: Some(error.into()),
        }
    }
}

/// Ticker body returned by the exchange. Error bodies carry no `price`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct TickerPrice {
    #[serde(default)]
    pub price: Option<String>,
}

/// Numeric NEAR price for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearPrice {
    pub near_price: f64,
    pub error: Option<String>,
}

impl NearPrice {
    /// Convert a lookup result. Any error yields zero, whatever `data` holds.
    pub fn from_parsed(parsed: ParsedData<String>) -> Self {
        if let Some(error) = parsed.error {
            return Self {
                near_price: 0.0,
                error: Some(error),
            };
        }

        let raw = parsed.data.unwrap_or_else(|| FALLBACK_PRICE.to_string());
        match raw.trim().parse::<f64>() {
            Ok(near_price) => Self {
                near_price,
                error: None,
            },
            Err(_) => Self {
                near_price: 0.0,
                error: Some(format!("Invalid NEAR price: {raw:?}")),
            },
        }
    }
}
