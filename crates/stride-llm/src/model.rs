//! Model tiers and the adaptive promotion slot.
//!
//! A run starts on the short-context model and is promoted to the
//! long-context model once the transcript's running token count crosses the
//! configured threshold. The promotion is one-directional: there is no path
//! back to the short tier within a run.

use serde::{Deserialize, Serialize};

/// One concrete model configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelConfig {
    /// Provider model identifier.
    pub name: String,
    /// Maximum context window in tokens.
    pub context_window: u64,
}

impl ModelConfig {
    /// Create a model config.
    pub fn new(name: impl Into<String>, context_window: u64) -> Self {
        Self {
            name: name.into(),
            context_window,
        }
    }
}

/// Which tier of the pair is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelTier {
    /// The cheaper, smaller-window model a run starts on.
    ShortContext,
    /// The larger-window model a run escalates to.
    LongContext,
}

/// The short/long model pair plus the promotion threshold.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelPair {
    /// Model used while the transcript is small.
    pub short_context: ModelConfig,
    /// Model used once the threshold is crossed.
    pub long_context: ModelConfig,
    /// Token count above which the run must use the long-context model.
    /// The comparison is strict: a count equal to the threshold does not
    /// promote.
    pub switch_threshold: u64,
}

/// The active-model cell owned by one run.
///
/// The step executor consults the slot before every planning call; nothing
/// else writes to it. Promotion happens at most once per run.
#[derive(Clone, Debug)]
pub struct ModelSlot {
    pair: ModelPair,
    tier: ModelTier,
}

impl ModelSlot {
    /// Create a slot starting on the short-context tier.
    #[must_use]
    pub fn new(pair: ModelPair) -> Self {
        Self {
            pair,
            tier: ModelTier::ShortContext,
        }
    }

    /// The currently active tier.
    #[must_use]
    pub fn tier(&self) -> ModelTier {
        self.tier
    }

    /// The currently active model config.
    #[must_use]
    pub fn active(&self) -> &ModelConfig {
        match self.tier {
            ModelTier::ShortContext => &self.pair.short_context,
            ModelTier::LongContext => &self.pair.long_context,
        }
    }

    /// The configured pair.
    #[must_use]
    pub fn pair(&self) -> &ModelPair {
        &self.pair
    }

    /// Promote to the long-context tier if `used_tokens` strictly exceeds
    /// the threshold and the slot is still on the short tier.
    ///
    /// Returns `true` only on the transition itself. Once promoted, further
    /// calls are no-ops regardless of the count.
    pub fn promote_if_over(&mut self, used_tokens: u64) -> bool {
        if self.tier == ModelTier::LongContext {
            return false;
        }
        if used_tokens > self.pair.switch_threshold {
            self.tier = ModelTier::LongContext;
            return true;
        }
        false
    }
}
