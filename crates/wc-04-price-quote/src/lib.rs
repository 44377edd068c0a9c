//! # WC-04 Price Quote
//!
//! NEAR/USDT spot price for wallet UIs. Lookups never fail; anything that
//! goes wrong is logged and reported as a price of `"0"`.
//!
//! ```ignore
//! use wc_04_price_quote::PriceQuoteClient;
//!
//! let price = PriceQuoteClient::new().near_price().await;
//! println!("1 NEAR = {} USDT", price.near_price);
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used))]

mod client;
mod error;
mod types;

pub use client::{PriceQuoteClient, BINANCE_NEAR_USDT_URL};
pub use error::QuoteError;
pub use types::{NearPrice, ParsedData, FALLBACK_PRICE};
