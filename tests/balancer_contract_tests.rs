//! # Balancer Contract Integration Tests
//!
//! Exercises the shared balancer contract across both variants through the
//! public API only: builder pre-population, selection ordering, duplicate
//! and unknown-ID handling, weight normalization, and the weighted
//! distribution guarantees.

use std::collections::HashMap;

use instance_balancer::{
    Balancer, BalancerBuilder, Instance, InstanceId, RoundRobinBuilder, WeightedInstance,
    WeightedRoundRobinBuilder, DEFAULT_WEIGHT, MAX_WEIGHT,
};

/// Test double implementing both instance capabilities.
#[derive(Debug, Clone)]
struct TestInstance {
    id: InstanceId,
    weight: u32,
}

impl Instance for TestInstance {
    fn id(&self) -> &InstanceId {
        &self.id
    }
}

impl WeightedInstance for TestInstance {
    fn weight(&self) -> u32 {
        self.weight
    }
}

fn instance(id: &str) -> TestInstance {
    weighted_instance(id, DEFAULT_WEIGHT)
}

fn weighted_instance(id: &str, weight: u32) -> TestInstance {
    TestInstance {
        id: InstanceId::new(id),
        weight,
    }
}

fn selected_id(balancer: &impl Balancer<TestInstance>) -> Option<String> {
    balancer.select().map(|i| i.id().to_string())
}

#[test]
fn round_robin_builder_builds_empty_balancer() {
    let balancer: instance_balancer::RoundRobinBalancer<TestInstance> =
        RoundRobinBuilder::new().build();
    assert_eq!(balancer.count(), 0);
    assert!(balancer.select().is_none());
}

#[test]
fn round_robin_cycles_through_registration_order() {
    let balancer =
        RoundRobinBuilder::new().instances_of(["1", "2", "3"].map(instance));
    assert_eq!(selected_id(&balancer).as_deref(), Some("1"));
    assert_eq!(selected_id(&balancer).as_deref(), Some("2"));
    assert_eq!(selected_id(&balancer).as_deref(), Some("3"));
    assert_eq!(selected_id(&balancer).as_deref(), Some("1"));
}

#[test]
fn round_robin_register_and_deregister_adjust_count() {
    let balancer = RoundRobinBuilder::new().instances_of(["1", "2", "3"].map(instance));
    balancer.register_instance(instance("4"));
    assert_eq!(balancer.count(), 4);
    balancer.deregister_instance(&InstanceId::new("1"));
    assert_eq!(balancer.count(), 3);
    balancer.deregister_instance(&InstanceId::new("unknown"));
    assert_eq!(balancer.count(), 3);
}

#[test]
fn round_robin_duplicate_registration_keeps_count_and_position() {
    let balancer = RoundRobinBuilder::new().instances_of(["1", "2"].map(instance));
    balancer.register_instance(instance("1"));
    assert_eq!(balancer.count(), 2);
    assert_eq!(selected_id(&balancer).as_deref(), Some("1"));
    assert_eq!(selected_id(&balancer).as_deref(), Some("2"));
    assert_eq!(selected_id(&balancer).as_deref(), Some("1"));
}

#[test]
fn weighted_builder_builds_empty_balancer() {
    let balancer: instance_balancer::WeightedRoundRobinBalancer<TestInstance> =
        WeightedRoundRobinBuilder::new().build();
    assert_eq!(balancer.count(), 0);
    assert!(balancer.select().is_none());
}

#[test]
fn weighted_builder_pre_populates_in_order() {
    let balancer =
        WeightedRoundRobinBuilder::new().instances_of(["1", "2", "3"].map(instance));
    assert_eq!(balancer.count(), 3);
    assert!(balancer.select().is_some());
}

#[test]
fn weighted_builder_drops_duplicate_ids() {
    let balancer = WeightedRoundRobinBuilder::new().instances_of([
        weighted_instance("1", 10),
        weighted_instance("2", 20),
        weighted_instance("1", 90),
    ]);
    assert_eq!(balancer.count(), 2);
    // First occurrence wins, including its weight.
    assert_eq!(balancer.weight_of(&InstanceId::new("1")), Some(10));
}

#[test]
fn weighted_zero_weight_instance_is_never_selected() {
    let balancer = WeightedRoundRobinBuilder::new().instances_of([
        weighted_instance("1", 0),
        weighted_instance("2", 2),
        weighted_instance("3", 3),
    ]);
    for _ in 0..100 {
        let id = selected_id(&balancer).expect("pool carries positive weight");
        assert_ne!(id, "1");
    }
}

#[test]
fn weighted_set_weight_flips_the_entire_pool() {
    let balancer = WeightedRoundRobinBuilder::new().instances_of([
        weighted_instance("1", 0),
        weighted_instance("2", 2),
        weighted_instance("3", 3),
    ]);
    balancer.set_weight(&InstanceId::new("1"), MAX_WEIGHT);
    balancer.set_weight(&InstanceId::new("2"), 0);
    balancer.set_weight(&InstanceId::new("3"), 0);
    for _ in 0..100 {
        assert_eq!(selected_id(&balancer).as_deref(), Some("1"));
    }
}

#[test]
fn weighted_out_of_range_registration_weight_becomes_default() {
    let balancer =
        WeightedRoundRobinBuilder::new().instances_of([weighted_instance("1", 150)]);
    assert_eq!(balancer.weight_of(&InstanceId::new("1")), Some(DEFAULT_WEIGHT));
}

#[test]
fn weighted_distribution_is_proportional_over_whole_cycles() {
    let balancer = WeightedRoundRobinBuilder::new().instances_of([
        weighted_instance("1", 1),
        weighted_instance("2", 2),
        weighted_instance("3", 3),
    ]);
    let mut counts: HashMap<String, usize> = HashMap::new();
    for _ in 0..600 {
        let id = selected_id(&balancer).expect("pool carries positive weight");
        *counts.entry(id).or_insert(0) += 1;
    }
    assert_eq!(counts.get("1"), Some(&100));
    assert_eq!(counts.get("2"), Some(&200));
    assert_eq!(counts.get("3"), Some(&300));
}

#[test]
fn weighted_heavy_instance_dominates_mixed_pool() {
    // Nine default-weight instances plus one at the maximum; the heavy one
    // must win more rounds than any default-weight peer.
    let mut instances: Vec<_> = (1..=9)
        .map(|i| weighted_instance(&i.to_string(), DEFAULT_WEIGHT))
        .collect();
    instances.push(weighted_instance("10", MAX_WEIGHT));
    let balancer = WeightedRoundRobinBuilder::new().instances_of(instances);

    let mut counts: HashMap<String, usize> = HashMap::new();
    for _ in 0..190 {
        let id = selected_id(&balancer).expect("pool carries positive weight");
        *counts.entry(id).or_insert(0) += 1;
    }
    // total weight 190: the max-weight instance owns 100 of 190 rounds.
    assert_eq!(counts.get("10"), Some(&100));
    for i in 1..=9 {
        assert_eq!(counts.get(&i.to_string()), Some(&10));
    }
}
