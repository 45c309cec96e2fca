//! Rule dispatcher module.
//!
//! Provides `Dispatcher`, which evaluates the registered rules for one event
//! occurrence, and `RunState`, the explicit per-run state it reads and
//! writes (difficulty, application guard, shared table).

use crate::difficulty::DifficultyState;
use crate::entity::EventContext;
use crate::guard::ApplicationGuard;
use crate::id::EntityId;
use crate::registry::RuleRegistry;
use crate::report::DispatchReport;
use crate::rule::{IdempotencyScope, ModifierRule};
use crate::shared::SharedState;
use crate::transform::Mutation;

/// State owned by one run.
///
/// The difficulty is fixed for the run's duration; the guard and shared
/// table are emptied at every run boundary.
#[derive(Debug, Clone, Default)]
pub struct RunState {
    difficulty: DifficultyState,
    guard: ApplicationGuard,
    shared: SharedState,
}

impl RunState {
    /// Create run state at `difficulty` with an empty guard and shared table.
    pub fn new(difficulty: DifficultyState) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
    }

    /// Begin a new run at `difficulty`, discarding the previous run's state.
    pub fn start_run(&mut self, difficulty: DifficultyState) {
        *self = Self::new(difficulty);
    }

    /// End the current run. Hard mode is off until the next `start_run`.
    pub fn end_run(&mut self) {
        *self = Self::default();
    }

    /// Get the difficulty fixed for this run.
    pub fn difficulty(&self) -> DifficultyState {
        self.difficulty
    }

    /// Get the application guard for this run.
    pub fn guard(&self) -> &ApplicationGuard {
        &self.guard
    }

    /// Get the shared value table for this run.
    pub fn shared(&self) -> &SharedState {
        &self.shared
    }

    /// Drop guard entries for an entity the host destroyed.
    pub fn forget_entity(&mut self, entity: EntityId) {
        self.guard.forget(entity);
    }
}

/// Evaluates rules against event occurrences.
///
/// # Examples
///
/// ```rust
/// use ascension::*;
/// use ascension::entity::PriceCategory;
/// use ascension::numeric::Scale;
/// use ascension::transform::ScalePrice;
///
/// let registry = RuleRegistry::from_rules(vec![ModifierRule::new(
///     "card_price_up",
///     49,
///     EventKind::GetCardPrice,
///     ScalePrice::new(Scale::percent(110)),
/// )])?;
/// let dispatcher = Dispatcher::new(registry);
/// let mut state = RunState::new(DifficultyState::new(true, 49));
///
/// let ctx = EventContext::price(EventKind::GetCardPrice, PriceCategory::Card, 50);
/// let out = dispatcher.dispatch(&mut state, ctx);
/// assert_eq!(out.entity.as_price().map(|p| p.result), Some(55));
/// # Ok::<(), RegistryError>(())
/// ```
#[derive(Debug, Default)]
pub struct Dispatcher {
    registry: RuleRegistry,
}

impl Dispatcher {
    /// Create a dispatcher over `registry`.
    pub fn new(registry: RuleRegistry) -> Self {
        Self { registry }
    }

    /// Get the registry this dispatcher evaluates.
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Apply every eligible rule for `context.kind` and return the result.
    pub fn dispatch(&self, state: &mut RunState, context: EventContext) -> EventContext {
        self.dispatch_traced(state, context).0
    }

    /// Like [`Dispatcher::dispatch`], also returning a breakdown of the rules
    /// that applied, were suppressed, or failed.
    ///
    /// Rules run in ascending threshold order. A rule applies when the run is
    /// in hard mode, the level meets its threshold, its predicate accepts the
    /// current entity, and (for guarded rules) it has not yet run against
    /// this entity. A predicate or transform that fails (or panics) is
    /// logged, recorded in the report and skipped; it never aborts the
    /// dispatch.
    pub fn dispatch_traced(
        &self,
        state: &mut RunState,
        mut context: EventContext,
    ) -> (EventContext, DispatchReport) {
        let mut report = DispatchReport::new(context.kind);

        if !state.difficulty.enabled() {
            return (context, report);
        }
        let level = state.difficulty.level();

        for rule in self.registry.rules_for(context.kind) {
            if level < rule.min_level() {
                // Sorted ascending: nothing after this can unlock either.
                tracing::trace!(rule = %rule.id(), level, "threshold not met");
                break;
            }
            match rule.matches(&context.entity) {
                Ok(true) => {}
                Ok(false) => {
                    tracing::trace!(rule = %rule.id(), "predicate rejected entity");
                    continue;
                }
                Err(err) => {
                    tracing::warn!(
                        rule = %rule.id(),
                        event = %context.kind,
                        error = %err,
                        "predicate failed, skipping"
                    );
                    report.add_failed(rule.id().clone(), err.to_string());
                    continue;
                }
            }
            if self.is_suppressed(state, rule, context.identity) {
                tracing::debug!(
                    rule = %rule.id(),
                    entity = ?context.identity,
                    "already applied, skipping"
                );
                report.add_suppressed(rule.id().clone());
                continue;
            }

            match rule.transform(&context.entity) {
                Ok(mutation) => {
                    match mutation {
                        Mutation::Replace(entity) => context.entity = entity,
                        Mutation::SetShared { key, value } => state.shared.set(key, value),
                    }
                    if rule.scope() == IdempotencyScope::PerEntityPerRun {
                        self.mark(state, rule, context.identity);
                    }
                    tracing::debug!(
                        rule = %rule.id(),
                        effect = %rule.description(),
                        event = %context.kind,
                        "applied rule"
                    );
                    report.add_applied(rule.id().clone(), rule.description());
                }
                Err(err) => {
                    tracing::warn!(
                        rule = %rule.id(),
                        event = %context.kind,
                        error = %err,
                        "rule failed, skipping"
                    );
                    report.add_failed(rule.id().clone(), err.to_string());
                }
            }
        }

        (context, report)
    }

    fn is_suppressed(
        &self,
        state: &RunState,
        rule: &ModifierRule,
        identity: Option<EntityId>,
    ) -> bool {
        match (rule.scope(), identity) {
            (IdempotencyScope::PerEntityPerRun, Some(entity)) => {
                state.guard.has_applied(entity, rule.id())
            }
            _ => false,
        }
    }

    fn mark(&self, state: &mut RunState, rule: &ModifierRule, identity: Option<EntityId>) {
        match identity {
            Some(entity) => state.guard.mark_applied(entity, rule.id().clone()),
            None => tracing::warn!(
                rule = %rule.id(),
                "guarded rule applied to an entity without identity; re-entry cannot be detected"
            ),
        }
    }
}
