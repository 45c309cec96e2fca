//! # ascension - Threshold-Gated Difficulty Modifiers
//!
//! A rule engine for difficulty-scaling ("ascension") rules in a turn-based
//! roguelike. It provides:
//! - **Declarative** rules: threshold, event, predicate, pure transform
//! - **Deterministic** application in ascending-threshold order
//! - **Idempotent** health bonuses, guarded per entity instance
//! - **Fault-isolated** dispatch: a failing rule never aborts the host's event
//!
//! ## Core Concepts
//!
//! ### Dispatch Pipeline
//!
//! ```text
//! host hook → [EventContext] → [Dispatcher] → rules_for(kind)
//!           → gate / predicate / guard → transform
//! ```
//!
//! 1. **Adapters** ([`Ascension`]) wrap host data into an [`EventContext`]
//! 2. **Registry** ([`RuleRegistry`]) returns the event's rules, threshold ascending
//! 3. **Dispatcher** ([`Dispatcher`]) filters by [`DifficultyState`], predicate and
//!    [`ApplicationGuard`], then applies each transform in turn
//! 4. The mutated entity, or a write to [`SharedState`], flows back to the host
//!
//! ## Example
//!
//! ```rust
//! use ascension::*;
//! use ascension::entity::{Monster, MonsterCategory};
//!
//! let mut engine = Ascension::standard()?;
//! engine.start_run(DifficultyState::new(true, 67));
//!
//! let mut cultist = Monster::new("Cultist", MonsterCategory::Normal, 100);
//! engine.monster_init(EntityId(1), &mut cultist);
//!
//! // ×1.10 at level 61, then ×1.15 at level 67
//! assert_eq!(cultist.max_health, 127);
//! # Ok::<(), RegistryError>(())
//! ```
//!
//! ## Modules
//!
//! - [`id`] - Rule, shared-value and entity identifiers
//! - [`difficulty`] - Hard-mode flag and ascension level
//! - [`entity`] - Entity shapes and event contexts
//! - [`transform`] - Pure rule transforms
//! - [`predicate`] - Entity predicates
//! - [`rule`] - Modifier rules
//! - [`registry`] - Event-indexed rule registry
//! - [`dispatcher`] - Rule evaluation and run state
//! - [`guard`] - Per-entity application guard
//! - [`shared`] - Shared cross-rule values
//! - [`report`] - Dispatch breakdowns
//! - [`hooks`] - Host-facing hook surface
//! - [`rules`] - Standard rule catalogue
//! - [`numeric`] - Exact integer scaling
//! - [`error`] - Error types

pub mod difficulty;
pub mod dispatcher;
pub mod entity;
pub mod error;
pub mod guard;
pub mod hooks;
pub mod id;
pub mod numeric;
pub mod predicate;
pub mod registry;
pub mod report;
pub mod rule;
pub mod rules;
pub mod shared;
pub mod transform;

// Re-export main types for convenience
pub use difficulty::{DifficultyState, MAX_LEVEL};
pub use dispatcher::{Dispatcher, RunState};
pub use entity::{Entity, EventContext, EventKind};
pub use error::{ConfigError, RegistryError, RuleError};
pub use guard::ApplicationGuard;
pub use hooks::Ascension;
pub use id::{EntityId, RuleId, SharedKey};
pub use registry::RuleRegistry;
pub use report::{AppliedRule, DispatchReport};
pub use rule::{IdempotencyScope, ModifierRule};
pub use shared::{SharedState, SPECIAL_BATTLE_CHANCE};

// Re-export transforms
pub use transform::{
    AddHealth, FnTransform, Mutation, RaiseDamage, RaisePurgeCost, ReduceMaxHealth,
    RuleTransform, ScaleHealth, ScalePrice, SetShared,
};
