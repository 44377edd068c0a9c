//! Wallet registry: identifier to setup function lookup.
//!
//! `build` validates every identifier before invoking any setup function,
//! so a failed call produces no modules at all. Output order and length
//! always match the input.

use std::collections::HashMap;

use shared_types::{WalletModule, WalletModuleFactory, WalletSetupOptions};
use tracing::{debug, warn};

use super::modules::{
    setup_bitte_wallet, setup_here_wallet, setup_hot_wallet, setup_intear_wallet,
    setup_meteor_wallet, setup_my_near_wallet, setup_okx_wallet,
};
use super::WalletId;
use crate::error::{RegistryError, RegistryResult};

/// Wallets loaded when the caller names none.
pub const DEFAULT_SUPPORTED_WALLETS: [WalletId; 3] =
    [WalletId::Meteor, WalletId::MyNear, WalletId::Here];

/// The primary wallet on its own.
pub const DEFAULT_BITTE_WALLETS: [WalletId; 1] = [WalletId::Bitte];

/// Setup function signature shared by every wallet.
pub type SetupFn = fn(WalletSetupOptions) -> WalletModuleFactory;

/// Per-wallet overrides keyed by identifier.
pub type WalletOverrides = HashMap<WalletId, WalletSetupOptions>;

/// One registered wallet.
#[derive(Debug, Clone)]
pub struct WalletRegistryEntry {
    pub id: WalletId,
    pub setup: SetupFn,
    pub default_options: WalletSetupOptions,
}

impl WalletRegistryEntry {
    /// Entry with empty default options.
    pub fn new(id: WalletId, setup: SetupFn) -> Self {
        Self {
            id,
            setup,
            default_options: WalletSetupOptions::default(),
        }
    }

    /// Builder-style method to set the default options.
    pub fn with_default_options(mut self, options: WalletSetupOptions) -> Self {
        self.default_options = options;
        self
    }
}

/// Lookup table from wallet identifier to setup function.
#[derive(Debug, Clone, Default)]
pub struct WalletRegistry {
    entries: HashMap<WalletId, WalletRegistryEntry>,
}

impl WalletRegistry {
    /// Registry with no wallets.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry with every built-in wallet.
    #[must_use]
    pub fn builtin() -> Self {
        let entries = [
            WalletRegistryEntry::new(WalletId::Bitte, setup_bitte_wallet),
            WalletRegistryEntry::new(WalletId::Meteor, setup_meteor_wallet),
            WalletRegistryEntry::new(WalletId::Here, setup_here_wallet),
            WalletRegistryEntry::new(WalletId::MyNear, setup_my_near_wallet),
            WalletRegistryEntry::new(WalletId::Intear, setup_intear_wallet),
            WalletRegistryEntry::new(WalletId::Okx, setup_okx_wallet),
            WalletRegistryEntry::new(WalletId::Hot, setup_hot_wallet),
        ];

        Self {
            entries: entries.into_iter().map(|entry| (entry.id, entry)).collect(),
        }
    }

    /// Add an entry. Fails if the identifier is already registered.
    pub fn register(&mut self, entry: WalletRegistryEntry) -> RegistryResult<()> {
        if self.entries.contains_key(&entry.id) {
            return Err(RegistryError::DuplicateEntry(entry.id));
        }
        self.entries.insert(entry.id, entry);
        Ok(())
    }

    /// Look up a registered wallet.
    #[must_use]
    pub fn get(&self, id: WalletId) -> Option<&WalletRegistryEntry> {
        self.entries.get(&id)
    }

    #[must_use]
    pub fn contains(&self, id: WalletId) -> bool {
        self.entries.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Default wallet set used when the caller specifies none.
    #[must_use]
    pub fn list_defaults(&self) -> Vec<WalletId> {
        DEFAULT_SUPPORTED_WALLETS.to_vec()
    }

    /// Check every identifier is registered without running any setup.
    pub fn validate(&self, ids: &[WalletId]) -> RegistryResult<()> {
        match ids.iter().find(|id| !self.contains(**id)) {
            Some(missing) => {
                warn!(wallet = %missing, "Unsupported wallet requested");
                Err(RegistryError::UnsupportedWallet(missing.to_string()))
            }
            None => Ok(()),
        }
    }

    /// Build one module per identifier, in input order.
    ///
    /// An override for an identifier replaces that entry's default options
    /// entirely.
    pub fn build(
        &self,
        ids: &[WalletId],
        overrides: Option<&WalletOverrides>,
    ) -> RegistryResult<Vec<WalletModuleFactory>> {
        self.validate(ids)?;

        let mut modules = Vec::with_capacity(ids.len());
        for id in ids {
            let entry = self
                .get(*id)
                .ok_or_else(|| RegistryError::UnsupportedWallet(id.to_string()))?;

            let options = overrides
                .and_then(|map| map.get(id))
                .cloned()
                .unwrap_or_else(|| entry.default_options.clone());

            let module = (entry.setup)(options);
            debug!(wallet = %id, module = module.id(), "Wallet module built");
            modules.push(module);
        }

        Ok(modules)
    }

    /// Parse identifiers, then build.
    pub fn build_from_names(
        &self,
        names: &[&str],
        overrides: Option<&WalletOverrides>,
    ) -> RegistryResult<Vec<WalletModuleFactory>> {
        let ids = names
            .iter()
            .map(|name| {
                name.parse::<WalletId>().inspect_err(|_| {
                    warn!(wallet = %name, "Unsupported wallet requested");
                })
            })
            .collect::<RegistryResult<Vec<_>>>()?;

        self.build(&ids, overrides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{ModuleDescriptor, WalletKind, WalletMetadata};
    use std::sync::atomic::{AtomicUsize, Ordering};

    static CUSTOM_SETUP_CALLS: AtomicUsize = AtomicUsize::new(0);

    fn counting_setup(options: WalletSetupOptions) -> WalletModuleFactory {
        CUSTOM_SETUP_CALLS.fetch_add(1, Ordering::SeqCst);
        ModuleDescriptor::new(
            "counting-wallet",
            WalletMetadata::new("Counting", WalletKind::Injected),
            options,
        )
        .into_factory()
    }

    #[test]
    fn test_list_defaults() {
        let registry = WalletRegistry::builtin();
        assert_eq!(
            registry.list_defaults(),
            vec![WalletId::Meteor, WalletId::MyNear, WalletId::Here]
        );
        assert_eq!(DEFAULT_BITTE_WALLETS, [WalletId::Bitte]);
    }

    #[test]
    fn test_builtin_registers_every_wallet() {
        let registry = WalletRegistry::builtin();
        assert_eq!(registry.len(), WalletId::all().len());
        for id in WalletId::all() {
            assert!(registry.contains(*id));
        }
    }

    #[test]
    fn test_build_preserves_order_and_length() {
        let registry = WalletRegistry::builtin();
        let ids = [WalletId::Here, WalletId::Bitte, WalletId::Okx];
        let modules = registry.build(&ids, None).unwrap();

        let module_ids: Vec<&str> = modules.iter().map(|m| m.id()).collect();
        assert_eq!(module_ids, vec!["here-wallet", "bitte-wallet", "okx-wallet"]);
    }

    #[test]
    fn test_build_empty_list() {
        let registry = WalletRegistry::builtin();
        assert!(registry.build(&[], None).unwrap().is_empty());
    }

    #[test]
    fn test_build_duplicates_are_kept() {
        let registry = WalletRegistry::builtin();
        let modules = registry.build(&[WalletId::Hot, WalletId::Hot], None).unwrap();
        assert_eq!(modules.len(), 2);
    }

    #[test]
    fn test_override_replaces_defaults_for_that_wallet_only() {
        let registry = WalletRegistry::builtin();
        let mut overrides = WalletOverrides::new();
        overrides.insert(
            WalletId::Bitte,
            WalletSetupOptions::with_wallet_url("https://example.org"),
        );

        let modules = registry
            .build(&[WalletId::Bitte, WalletId::Meteor], Some(&overrides))
            .unwrap();

        assert_eq!(
            modules[0].options().wallet_url.as_deref(),
            Some("https://example.org")
        );
        assert!(modules[1].options().wallet_url.is_none());
    }

    #[test]
    fn test_build_unsupported_runs_no_setup() {
        let mut registry = WalletRegistry::empty();
        registry
            .register(WalletRegistryEntry::new(WalletId::Meteor, counting_setup))
            .unwrap();

        let before = CUSTOM_SETUP_CALLS.load(Ordering::SeqCst);
        let err = registry
            .build(&[WalletId::Meteor, WalletId::Okx], None)
            .unwrap_err();

        assert_eq!(err, RegistryError::UnsupportedWallet("okx".to_string()));
        assert_eq!(CUSTOM_SETUP_CALLS.load(Ordering::SeqCst), before);
    }

    #[test]
    fn test_build_from_names_rejects_unknown() {
        let registry = WalletRegistry::builtin();
        let err = registry
            .build_from_names(&["meteor", "phantom"], None)
            .unwrap_err();
        assert_eq!(err, RegistryError::UnsupportedWallet("phantom".to_string()));

        let modules = registry.build_from_names(&["mynear"], None).unwrap();
        assert_eq!(modules[0].id(), "my-near-wallet");
    }

    #[test]
    fn test_register_duplicate_fails() {
        let mut registry = WalletRegistry::builtin();
        let err = registry
            .register(WalletRegistryEntry::new(WalletId::Hot, counting_setup))
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateEntry(WalletId::Hot));
    }

    #[test]
    fn test_entry_default_options_used_without_override() {
        let mut registry = WalletRegistry::empty();
        registry
            .register(
                WalletRegistryEntry::new(WalletId::Intear, setup_intear_wallet)
                    .with_default_options(WalletSetupOptions::with_wallet_url("https://intear.example")),
            )
            .unwrap();

        let modules = registry.build(&[WalletId::Intear], None).unwrap();
        assert_eq!(
            modules[0].options().wallet_url.as_deref(),
            Some("https://intear.example")
        );
    }

    #[test]
    fn test_validate() {
        let registry = WalletRegistry::empty();
        assert!(registry.validate(&[]).is_ok());
        assert!(registry.validate(&[WalletId::Bitte]).is_err());
    }
}
