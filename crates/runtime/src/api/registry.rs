//! Provider registry for managing action providers.
//!
//! The [`ProviderRegistry`] maps combatants to decision sources.
//!
//! # Design
//!
//! - **Side defaults**: one provider for the player's allies, one for enemies
//! - **Combatant overrides**: a single combatant can be bound to its own provider
//! - **Fallback chain**: combatant override → side default

use std::collections::HashMap;
use std::sync::Arc;

use game_core::{CombatantId, Side};

use super::{ActionProvider, ProviderKind, Result, RuntimeError};

/// Registry for managing action providers with per-combatant overrides.
///
/// # Architecture
///
/// ```text
/// ProviderRegistry
/// ├── providers: HashMap<ProviderKind, Provider>  (side defaults)
/// └── overrides: HashMap<CombatantId, Provider>   (sparse bindings)
/// ```
#[derive(Default)]
pub struct ProviderRegistry {
    providers: HashMap<ProviderKind, Arc<dyn ActionProvider>>,
    overrides: HashMap<CombatantId, Arc<dyn ActionProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the default provider for one side.
    ///
    /// If a provider already exists for this kind, it will be replaced.
    pub fn register(&mut self, kind: ProviderKind, provider: impl ActionProvider + 'static) {
        self.providers.insert(kind, Arc::new(provider));
    }

    /// Bind one combatant to its own provider.
    pub fn bind(&mut self, combatant: CombatantId, provider: impl ActionProvider + 'static) {
        self.overrides.insert(combatant, Arc::new(provider));
    }

    /// Unbind a combatant, reverting it to its side's provider.
    pub fn unbind(&mut self, combatant: CombatantId) -> bool {
        self.overrides.remove(&combatant).is_some()
    }

    pub fn has(&self, kind: ProviderKind) -> bool {
        self.providers.contains_key(&kind)
    }

    /// Get the provider for a combatant on `side`.
    ///
    /// # Errors
    ///
    /// Returns `RuntimeError::ProviderNotSet` if the combatant has no override
    /// and its side has no registered provider.
    ///
    /// # Returns
    ///
    /// Returns an Arc clone of the provider, so the caller can hold it across
    /// awaits without borrowing the registry.
    pub fn get_for(&self, combatant: CombatantId, side: Side) -> Result<Arc<dyn ActionProvider>> {
        if let Some(provider) = self.overrides.get(&combatant) {
            return Ok(Arc::clone(provider));
        }
        let kind = ProviderKind::for_side(side);
        self.providers
            .get(&kind)
            .cloned()
            .ok_or(RuntimeError::ProviderNotSet { kind })
    }
}
