//! # Plain Round-Robin Selection
//!
//! The simplest policy: visit every instance exactly once per cycle, in
//! registration order, wrapping back to the first after the last. This
//! variant carries no weights and no lock — it is a deliberate
//! simplicity/performance trade-off for single-threaded hot paths.
//!
//! ## Concurrency
//!
//! The cursor and pool live in [`Cell`]/[`RefCell`], which makes the type
//! `!Sync`: the compiler rejects sharing it across threads. Callers that
//! need concurrent selection either wrap it in their own mutex or use
//! [`WeightedRoundRobinBalancer`](crate::weighted::WeightedRoundRobinBalancer),
//! which synchronizes internally.

use std::cell::{Cell, RefCell};

use tracing::{debug, trace};

use crate::balancer::{Balancer, BalancerBuilder};
use crate::instance::{Instance, InstanceId};

/// Round-robin balancer over an ordered pool of instances.
///
/// Selection order is registration order. Removing the currently-pointed-at
/// instance shifts subsequent selection by one position; this drift is
/// accepted rather than corrected, the cursor simply keeps counting modulo
/// the new pool size.
pub struct RoundRobinBalancer<I> {
    instances: RefCell<Vec<I>>,
    /// Index of the last selected slot; `None` until the first selection.
    cursor: Cell<Option<usize>>,
}

impl<I: Instance + Clone> Balancer<I> for RoundRobinBalancer<I> {
    fn select(&self) -> Option<I> {
        let instances = self.instances.borrow();
        if instances.is_empty() {
            return None;
        }

        let next = self
            .cursor
            .get()
            .map_or(0, |last| (last + 1) % instances.len());
        self.cursor.set(Some(next));

        let selected = &instances[next];
        trace!(instance_id = %selected.id(), index = next, "selected instance");
        Some(selected.clone())
    }

    fn register_instance(&self, instance: I) {
        let mut instances = self.instances.borrow_mut();
        if instances.iter().any(|existing| existing.id() == instance.id()) {
            return;
        }
        debug!(instance_id = %instance.id(), "registered instance");
        instances.push(instance);
    }

    fn deregister_instance(&self, id: &InstanceId) {
        let mut instances = self.instances.borrow_mut();
        if let Some(position) = instances.iter().position(|instance| instance.id() == id) {
            instances.remove(position);
            debug!(instance_id = %id, "deregistered instance");
        }
    }

    fn count(&self) -> usize {
        self.instances.borrow().len()
    }
}

/// Builder for [`RoundRobinBalancer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundRobinBuilder;

impl RoundRobinBuilder {
    pub fn new() -> Self {
        Self
    }
}

impl<I: Instance + Clone> BalancerBuilder<I> for RoundRobinBuilder {
    type Output = RoundRobinBalancer<I>;

    fn build(&self) -> Self::Output {
        RoundRobinBalancer {
            instances: RefCell::new(Vec::new()),
            cursor: Cell::new(None),
        }
    }
}
