//! # Balancer Contracts
//!
//! The uniform capability set shared by every balancer variant, plus the
//! builder contract used to construct them. Keeping the contract behind a
//! trait lets callers swap selection policies without touching the code
//! that owns the instance lifecycle.
//!
//! Every operation is total over its input domain: empty pools, duplicate
//! registrations and unknown IDs all resolve to defined silent outcomes,
//! never to errors. That keeps the selection hot path branch-free for
//! callers — there is no `Result` to unwrap on every request.

use crate::instance::{Instance, InstanceId};

/// Capability set shared by every balancer variant.
///
/// Selection returns an owned instance, so implementations bound `I` by
/// [`Clone`]; callers typically register cheap-to-clone handles such as
/// `Arc`-wrapped backends.
pub trait Balancer<I: Instance> {
    /// Select one instance, or `None` when the pool is empty.
    fn select(&self) -> Option<I>;

    /// Register an instance. No-op when an instance with the same ID is
    /// already present; the original registration is retained.
    fn register_instance(&self, instance: I);

    /// Remove the instance with the given ID. No-op when absent.
    fn deregister_instance(&self, id: &InstanceId);

    /// Number of currently registered instances.
    fn count(&self) -> usize;
}

/// Constructs balancers of one variant, optionally pre-populated.
pub trait BalancerBuilder<I: Instance> {
    /// The balancer variant this builder produces.
    type Output: Balancer<I>;

    /// Build an empty balancer.
    fn build(&self) -> Self::Output;

    /// Build a balancer pre-populated with `instances`, registered in
    /// iteration order. Duplicate IDs are silently dropped, keeping the
    /// first occurrence.
    fn instances_of(&self, instances: impl IntoIterator<Item = I>) -> Self::Output {
        let balancer = self.build();
        for instance in instances {
            balancer.register_instance(instance);
        }
        balancer
    }
}
