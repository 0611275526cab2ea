//! Level builder - turns a change list into ordered reload passes
//!
//! The builder walks up the nesting hierarchy one level at a time:
//!
//! ```text
//! INIT          current = hosts(changes), next = hosts(current)
//! LEVEL-ACTIVE  while current is not empty:
//!                   pass    = current - next
//!                   current = next
//!                   next    = hosts(current)
//! DONE
//! ```
//!
//! Removing `next` from `current` keeps a host out of a pass when it will be
//! reloaded again one level up. Once the walk is complete the plan is settled
//! so that a host only stays in the furthest pass it reaches; hierarchies of
//! uneven depth can otherwise repeat a host two or more levels apart.
//!
//! There is no cycle detection. A cyclic hierarchy never empties `current`, and
//! the walk stops when it would need more than [`MAX_PASSES`] passes.

use std::collections::HashSet;
use std::time::Instant;

use super::hosts::HostResolver;
use crate::core::models::{Family, Identity, ReloadPass, ReloadPlan, RootFamily};

/// Maximum number of passes a plan may contain
pub const MAX_PASSES: usize = 20;

/// Mutable state of the level walk
#[derive(Debug, Clone, Default)]
pub struct LevelState {
    /// Hosts at the level being scheduled
    pub current_level: Vec<RootFamily>,
    /// Hosts one level further up
    pub next_level: Vec<RootFamily>,
    /// Number of passes produced so far
    pub pass_counter: usize,
}

/// How a level walk ended
#[derive(Debug, Clone)]
pub enum LevelOutcome {
    /// The walk reached the top of the hierarchy
    Settled(ReloadPlan),
    /// The walk needed more than [`MAX_PASSES`] passes
    BoundExceeded {
        /// Passes produced before stopping
        passes: usize,
        /// Hosts still waiting to be scheduled
        pending: Vec<RootFamily>,
    },
}

impl LevelOutcome {
    /// The plan, if the walk settled
    #[must_use]
    pub fn plan(self) -> Option<ReloadPlan> {
        match self {
            Self::Settled(plan) => Some(plan),
            Self::BoundExceeded { .. } => None,
        }
    }
}

/// Builds reload plans over a resolver
#[derive(Debug, Clone, Copy)]
pub struct LevelBuilder<'a> {
    resolver: &'a HostResolver,
}

impl<'a> LevelBuilder<'a> {
    /// Create a builder over an indexed resolver
    #[must_use]
    pub const fn new(resolver: &'a HostResolver) -> Self {
        Self { resolver }
    }

    /// Resolve the first two levels for a change list
    #[must_use]
    pub fn init<F: Family>(&self, changes: &[F]) -> LevelState {
        let current_level = self.resolver.resolve(changes);
        let next_level = self.resolver.resolve(&current_level);
        LevelState {
            current_level,
            next_level,
            pass_counter: 0,
        }
    }

    /// Produce the pass for `state.current_level` and move one level up
    pub fn step(&self, state: &mut LevelState) -> ReloadPass {
        let started = Instant::now();

        let (families, deferred) = difference(&state.current_level, &state.next_level);
        let index = state.pass_counter;

        state.current_level = std::mem::take(&mut state.next_level);
        state.next_level = self.resolver.resolve(&state.current_level);
        state.pass_counter += 1;

        ReloadPass {
            index,
            families,
            deferred,
            elapsed: started.elapsed(),
        }
    }

    /// Walk the hierarchy above `changes` and return the settled plan
    ///
    /// An empty change list yields an empty plan.
    #[must_use]
    pub fn plan<F: Family>(&self, changes: &[F]) -> LevelOutcome {
        let mut state = self.init(changes);
        log::debug!(
            "Level walk starts with {} direct host(s), {} next level host(s)",
            state.current_level.len(),
            state.next_level.len()
        );

        let mut plan = ReloadPlan::default();
        while !state.current_level.is_empty() {
            if state.pass_counter >= MAX_PASSES {
                log::error!(
                    "Exceeded maximum number of passes ({MAX_PASSES}) with {} host(s) pending",
                    state.current_level.len()
                );
                return LevelOutcome::BoundExceeded {
                    passes: state.pass_counter,
                    pending: state.current_level,
                };
            }

            let pass = self.step(&mut state);
            log::debug!(
                "Pass {}: {} host(s), {} deferred, next level {}",
                pass.index,
                pass.families.len(),
                pass.deferred,
                state.current_level.len()
            );
            plan.passes.push(pass);
        }

        settle(&mut plan);
        LevelOutcome::Settled(plan)
    }
}

/// `current - next` by identity, plus the number of removed entries
fn difference(current: &[RootFamily], next: &[RootFamily]) -> (Vec<RootFamily>, usize) {
    let upper: HashSet<Identity> = next.iter().map(Family::identity).collect();
    let (deferred, kept): (Vec<&RootFamily>, Vec<&RootFamily>) =
        current.iter().partition(|family| upper.contains(&family.identity()));
    (kept.into_iter().cloned().collect(), deferred.len())
}

/// Keep each identity only in the last pass that contains it
///
/// Passes emptied here stay in the plan so indices remain contiguous.
pub fn settle(plan: &mut ReloadPlan) {
    let mut later: HashSet<Identity> = HashSet::new();

    for pass in plan.passes.iter_mut().rev() {
        let before = pass.families.len();
        pass.families.retain(|family| !later.contains(&family.identity()));
        pass.deferred += before - pass.families.len();
        later.extend(pass.families.iter().map(Family::identity));
    }
}
