//! # Weighted Round-Robin Selection
//!
//! A smooth weighted selector: over time each instance is chosen with
//! frequency proportional to `weight / total_weight`, and selections are
//! interleaved rather than clustered in bursts. Weights are live — they can
//! be changed at any moment with [`WeightedRoundRobinBalancer::set_weight`]
//! without rebuilding any state.
//!
//! ## Algorithm
//!
//! Each instance carries an accumulated *credit* alongside its configured
//! raw weight. Every selection round:
//!
//! 1. each instance's raw weight is added to its credit (and to a running
//!    `total_weight`), so heavier instances accumulate faster;
//! 2. the pool is scanned once and the **last** instance in iteration order
//!    whose credit is strictly positive wins the round;
//! 3. the winner is charged `total_weight`, spending its lead so it is not
//!    immediately reselected.
//!
//! The later-index-wins scan is a fixed tie-break policy, not an
//! implementation accident: it determines how equal-credit instances share
//! rounds and is pinned by tests. An instance with weight 0 accumulates no
//! credit and is never selected while any other instance carries weight.
//!
//! ## Concurrency
//!
//! Pool, raw weights and credits are guarded by a single
//! [`parking_lot::RwLock`] as one atomic unit per operation. `select`
//! mutates credit state on every call, so it takes the write lock; only
//! [`count`](crate::Balancer::count) and
//! [`weight_of`](WeightedRoundRobinBalancer::weight_of) run under the
//! shared read lock.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::balancer::{Balancer, BalancerBuilder};
use crate::instance::{InstanceId, WeightedInstance};

/// Weight applied when a declared or updated weight falls outside
/// [`MIN_WEIGHT`]`..=`[`MAX_WEIGHT`].
pub const DEFAULT_WEIGHT: u32 = 10;

/// Smallest accepted weight. A weight of 0 is legal and means "never
/// selected" until raised.
pub const MIN_WEIGHT: u32 = 0;

/// Largest accepted weight.
pub const MAX_WEIGHT: u32 = 100;

/// Out-of-range weights are replaced with the default, never rejected.
fn normalize_weight(weight: u32) -> u32 {
    if (MIN_WEIGHT..=MAX_WEIGHT).contains(&weight) {
        weight
    } else {
        DEFAULT_WEIGHT
    }
}

/// Registry state guarded as a single unit: every registered ID has exactly
/// one `raw_weights` entry, while `credits` entries are created lazily on
/// first accumulation and removed when the owning instance is deregistered.
struct WeightedState<I> {
    instances: Vec<I>,
    raw_weights: HashMap<InstanceId, u32>,
    credits: HashMap<InstanceId, i64>,
}

/// Weighted round-robin balancer, safe for concurrent use.
///
/// All operations are internally serialized by one read/write lock, so the
/// balancer can be shared across threads behind an `Arc`.
pub struct WeightedRoundRobinBalancer<I> {
    state: RwLock<WeightedState<I>>,
}

impl<I: WeightedInstance + Clone> WeightedRoundRobinBalancer<I> {
    /// Set the raw weight for `id`, normalizing out-of-range values to
    /// [`DEFAULT_WEIGHT`] exactly as registration does.
    ///
    /// The weight is stored even when `id` is not currently registered; the
    /// entry stays inert for selection until an instance with that ID
    /// arrives, and registration replaces it with the instance's declared
    /// weight.
    pub fn set_weight(&self, id: &InstanceId, weight: u32) {
        let weight = normalize_weight(weight);
        let mut state = self.state.write();
        state.raw_weights.insert(id.clone(), weight);
        debug!(instance_id = %id, weight, "set instance weight");
    }

    /// Current raw weight for `id`, including inert entries stored via
    /// [`set_weight`](Self::set_weight) for IDs that are not registered.
    pub fn weight_of(&self, id: &InstanceId) -> Option<u32> {
        self.state.read().raw_weights.get(id).copied()
    }
}

impl<I: WeightedInstance + Clone> Balancer<I> for WeightedRoundRobinBalancer<I> {
    fn select(&self) -> Option<I> {
        // Credit bookkeeping writes on every call, so this nominal read
        // path must hold the lock exclusively.
        let mut state = self.state.write();
        let WeightedState {
            instances,
            raw_weights,
            credits,
        } = &mut *state;

        if instances.is_empty() {
            return None;
        }

        let mut total_weight: i64 = 0;
        for instance in instances.iter() {
            let weight = i64::from(raw_weights.get(instance.id()).copied().unwrap_or(0));
            total_weight += weight;
            *credits.entry(instance.id().clone()).or_insert(0) += weight;
        }

        // Fixed tie-break: the last instance in iteration order holding
        // strictly positive credit wins the round. When every weight is 0
        // no credit is ever positive and nothing is selected.
        let mut selected = None;
        let mut winner = 0;
        for (index, instance) in instances.iter().enumerate() {
            if credits.get(instance.id()).copied().unwrap_or(0) > 0 {
                selected = Some(instance.clone());
                winner = index;
            }
        }

        // The winning slot spends the whole round's weight. With no winner
        // this charges slot 0 with a total of 0, which is harmless.
        if let Some(credit) = credits.get_mut(instances[winner].id()) {
            *credit -= total_weight;
        }

        if let Some(instance) = &selected {
            trace!(instance_id = %instance.id(), total_weight, "selected instance");
        }
        selected
    }

    fn register_instance(&self, instance: I) {
        let weight = normalize_weight(instance.weight());

        let mut state = self.state.write();
        if state
            .instances
            .iter()
            .any(|existing| existing.id() == instance.id())
        {
            return;
        }

        debug!(instance_id = %instance.id(), weight, "registered instance");
        state.raw_weights.insert(instance.id().clone(), weight);
        state.instances.push(instance);
    }

    fn deregister_instance(&self, id: &InstanceId) {
        let mut state = self.state.write();

        // Weight and credit entries go unconditionally: this also clears
        // inert state stored by set_weight for IDs that never registered,
        // and guarantees a later re-registration starts fresh.
        state.credits.remove(id);
        state.raw_weights.remove(id);

        if let Some(position) = state.instances.iter().position(|instance| instance.id() == id) {
            state.instances.remove(position);
            debug!(instance_id = %id, "deregistered instance");
        }
    }

    fn count(&self) -> usize {
        self.state.read().instances.len()
    }
}

/// Builder for [`WeightedRoundRobinBalancer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedRoundRobinBuilder;

impl WeightedRoundRobinBuilder {
    pub fn new() -> Self {
        Self
    }
}

impl<I: WeightedInstance + Clone> BalancerBuilder<I> for WeightedRoundRobinBuilder {
    type Output = WeightedRoundRobinBalancer<I>;

    fn build(&self) -> Self::Output {
        WeightedRoundRobinBalancer {
            state: RwLock::new(WeightedState {
                instances: Vec::new(),
                raw_weights: HashMap::new(),
                credits: HashMap::new(),
            }),
        }
    }
}
