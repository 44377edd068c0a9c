//! Service layer: the mounted wallet context.

mod context;

pub use context::WalletContext;
