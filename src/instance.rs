//! # Instance Abstractions
//!
//! The balancers in this crate are generic over the caller's own domain
//! objects. Anything that can report a stable identifier can be balanced;
//! the weighted variant additionally asks the object for its initial weight.
//! The registry never constructs or destroys instances — it only tracks
//! identity (and weight), so callers keep full ownership of the lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier for a registered instance.
///
/// IDs are assigned by the caller and must be unique among the instances
/// registered with a single balancer; registering a second instance with an
/// ID that is already present is a silent no-op (first registration wins).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(String);

impl InstanceId {
    /// Create an ID from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// View the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for InstanceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for InstanceId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl AsRef<str> for InstanceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Capability implemented by anything a balancer can hand out.
pub trait Instance {
    /// Stable identifier, unique within one balancer's lifetime.
    fn id(&self) -> &InstanceId;
}

/// Extends [`Instance`] with the initial weight used by the weighted
/// balancer.
///
/// The declared weight is read once, at registration time. Values outside
/// [`MIN_WEIGHT`]`..=`[`MAX_WEIGHT`] are replaced with [`DEFAULT_WEIGHT`]
/// rather than rejected; later changes go through
/// [`WeightedRoundRobinBalancer::set_weight`].
///
/// [`MIN_WEIGHT`]: crate::weighted::MIN_WEIGHT
/// [`MAX_WEIGHT`]: crate::weighted::MAX_WEIGHT
/// [`DEFAULT_WEIGHT`]: crate::weighted::DEFAULT_WEIGHT
/// [`WeightedRoundRobinBalancer::set_weight`]: crate::weighted::WeightedRoundRobinBalancer::set_weight
pub trait WeightedInstance: Instance {
    /// Declared initial weight for this instance.
    fn weight(&self) -> u32;
}
