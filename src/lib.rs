//! # Instance Balancer - Load-Distribution Selection Primitives
//!
//! A reusable selection primitive: pick one member of a dynamic pool of
//! interchangeable instances (backend servers, workers) on each request,
//! according to a load-distribution policy. This crate is not a service
//! mesh — it performs no health checking, network calls, discovery or
//! retries. Callers own the instance lifecycle, register and deregister
//! instances, and interpret the returned selection.
//!
//! ## Variants
//!
//! 1. **Plain round-robin** ([`RoundRobinBalancer`]): visits every instance
//!    once per cycle in registration order. No lock; the type is `!Sync`,
//!    so the compiler enforces the single-threaded-owner model.
//! 2. **Weighted round-robin** ([`WeightedRoundRobinBalancer`]): smooth,
//!    proportionally-weighted distribution with live weight mutation, safe
//!    for concurrent use via one internal read/write lock.
//!
//! Both variants share the [`Balancer`] capability set and are constructed
//! through [`BalancerBuilder`] implementations, optionally pre-populated
//! from a batch of instances.
//!
//! ## Error Handling
//!
//! There is no error type in this crate. Every boundary condition resolves
//! to a defined silent outcome: selecting from an empty pool returns
//! `None`, duplicate registrations and unknown IDs are no-ops, and
//! out-of-range weights are normalized to [`DEFAULT_WEIGHT`] rather than
//! rejected.
//!
//! ## Usage Example
//!
//! ```
//! use instance_balancer::{
//!     Balancer, BalancerBuilder, Instance, InstanceId, RoundRobinBuilder,
//! };
//!
//! #[derive(Clone)]
//! struct Backend {
//!     id: InstanceId,
//! }
//!
//! impl Instance for Backend {
//!     fn id(&self) -> &InstanceId {
//!         &self.id
//!     }
//! }
//!
//! let balancer = RoundRobinBuilder::new().instances_of([
//!     Backend { id: InstanceId::new("a") },
//!     Backend { id: InstanceId::new("b") },
//! ]);
//!
//! assert_eq!(balancer.select().map(|b| b.id.to_string()).as_deref(), Some("a"));
//! assert_eq!(balancer.select().map(|b| b.id.to_string()).as_deref(), Some("b"));
//! assert_eq!(balancer.select().map(|b| b.id.to_string()).as_deref(), Some("a"));
//! ```

/// Shared capability traits: the uniform balancer contract and the builder
/// contract used to construct either variant.
pub mod balancer;

/// Instance identity: the opaque ID type and the capability traits callers
/// implement on their own domain objects.
pub mod instance;

/// Plain round-robin selection, the single-threaded baseline.
pub mod round_robin;

/// Weighted round-robin selection with a concurrent-safe registry.
pub mod weighted;

pub use balancer::{Balancer, BalancerBuilder};
pub use instance::{Instance, InstanceId, WeightedInstance};
pub use round_robin::{RoundRobinBalancer, RoundRobinBuilder};
pub use weighted::{
    WeightedRoundRobinBalancer, WeightedRoundRobinBuilder, DEFAULT_WEIGHT, MAX_WEIGHT, MIN_WEIGHT,
};
