//! Domain layer: mount properties and the observable snapshot.

mod props;
mod snapshot;

pub use props::ContextProps;
pub use snapshot::WalletContextSnapshot;
