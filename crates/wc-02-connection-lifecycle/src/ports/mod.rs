//! Ports layer: inbound API and outbound collaborator traits.

pub mod inbound;
pub mod outbound;

pub use inbound::{AccountsCallback, SelectorComponents, WalletConnectionApi};
pub use outbound::{
    HideListener, ModalFactory, ModalOptions, SelectionModal, SelectorFactory, SelectorOptions,
    Wallet, WalletSelector,
};
