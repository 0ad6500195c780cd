//! Integration tests for the network intelligence adapter.

use rstest::{fixture, rstest};
use std::collections::BTreeMap;
use threadmap::network::{
    AdapterConfig, AdapterWarning, NetworkIntel, NodeInfluence, OperationPlan, PlanStep,
    RiskNode, WeakLink, network_to_chain,
};
use threadmap_core::domain::{ActorType, Entity, EntityKind};

fn node(name: &str, role: &str, score: f64) -> NodeInfluence {
    NodeInfluence {
        node: name.to_string(),
        role: role.to_string(),
        influence_score: score,
    }
}

fn step(name: &str, role: &str, score: f64) -> PlanStep {
    PlanStep {
        node: name.to_string(),
        role: Some(role.to_string()),
        influence_score: Some(score),
    }
}

#[fixture]
fn intel() -> NetworkIntel {
    let mut communities = BTreeMap::new();
    communities.insert(
        "0".to_string(),
        vec!["alice".to_string(), "bob".to_string(), "carol".to_string()],
    );
    communities.insert("1".to_string(), vec!["dave".to_string(), "eve".to_string()]);

    NetworkIntel {
        nodes: vec![
            node("alice", "hub", 0.92),
            node("bob", "amplifier", 0.41),
            node("carol", "peripheral", 0.1),
            node("dave", "bridge", 0.55),
            node("eve", "lurker", 0.2),
            node("grace", "gatekeeper", 0.0),
        ],
        communities,
    }
}

#[fixture]
fn plan() -> OperationPlan {
    OperationPlan {
        entry_points: vec![step("alice", "hub", 0.92), step("dave", "bridge", 0.55)],
        amplification_chain: vec![step("bob", "amplifier", 0.41)],
        weak_links: vec![WeakLink {
            node: "dave".to_string(),
            is_spof: true,
            fragmentation_if_removed: 0.4,
        }],
        risk_nodes: vec![RiskNode {
            node: "grace".to_string(),
            reason: "Connects to both communities".to_string(),
        }],
        estimated_reach_pct: 0.35,
    }
}

fn default_config() -> AdapterConfig {
    AdapterConfig::default()
}

// ========== Intel Only ==========

#[rstest]
fn test_basic_conversion(intel: NetworkIntel) {
    let import = network_to_chain(&intel, None, "Network Operation", &default_config()).unwrap();
    assert_eq!(import.chain.name(), "Network Operation");
    assert_eq!(import.chain.id(), "network-operation");
    assert!(!import.chain.is_empty());
    assert_eq!(import.chain.relationship_count(), 0);
}

#[rstest]
fn test_actors_created_for_positive_influence(intel: NetworkIntel) {
    let import = network_to_chain(&intel, None, "Op", &default_config()).unwrap();
    let actors = import.chain.get_entities_by_type(EntityKind::Actor);

    assert_eq!(actors.len(), 5);
    assert!(import.chain.get_entity("actor-grace").is_none());
    assert!(import.warnings.contains(&AdapterWarning::NonPositiveInfluence {
        node: "grace".to_string(),
        score: 0.0,
    }));
}

#[rstest]
#[case::hub("actor-alice", ActorType::State)]
#[case::amplifier("actor-bob", ActorType::Automated)]
#[case::peripheral("actor-carol", ActorType::Hacktivist)]
#[case::bridge("actor-dave", ActorType::Proxy)]
#[case::unmapped("actor-eve", ActorType::Proxy)]
fn test_actor_types(intel: NetworkIntel, #[case] id: &str, #[case] expected: ActorType) {
    let import = network_to_chain(&intel, None, "Op", &default_config()).unwrap();
    match import.chain.get_entity(id) {
        Some(Entity::Actor(actor)) => assert_eq!(actor.actor_type, expected),
        other => panic!("expected actor {id}, got {other:?}"),
    }
}

#[rstest]
fn test_unmapped_role_warns(intel: NetworkIntel) {
    let import = network_to_chain(&intel, None, "Op", &default_config()).unwrap();
    assert!(import.warnings.contains(&AdapterWarning::UnmappedRole {
        node: "eve".to_string(),
        role: "lurker".to_string(),
    }));
}

#[test]
fn test_repeated_node_reports_replacement() {
    let intel = NetworkIntel {
        nodes: vec![node("alice", "hub", 0.9), node("alice", "amplifier", 0.4)],
        communities: BTreeMap::new(),
    };
    let import = network_to_chain(&intel, None, "Op", &default_config()).unwrap();

    assert_eq!(import.chain.get_entities_by_type(EntityKind::Actor).len(), 1);
    assert!(import.warnings.contains(&AdapterWarning::DuplicateEntity {
        entity_id: "actor-alice".to_string(),
        replaced_kind: EntityKind::Actor,
    }));
    // Lower-influence entry is inserted last and wins
    match import.chain.get_entity("actor-alice") {
        Some(Entity::Actor(actor)) => assert_eq!(actor.actor_type, ActorType::Automated),
        other => panic!("expected actor, got {other:?}"),
    }
}

#[rstest]
fn test_distinct_nodes_report_no_replacement(intel: NetworkIntel, plan: OperationPlan) {
    let import = network_to_chain(&intel, Some(&plan), "Op", &default_config()).unwrap();
    assert!(
        !import
            .warnings
            .iter()
            .any(|w| matches!(w, AdapterWarning::DuplicateEntity { .. }))
    );
}

#[rstest]
fn test_max_actors_limits_top_nodes(intel: NetworkIntel) {
    let config = AdapterConfig {
        max_actors: 2,
        ..Default::default()
    };
    let import = network_to_chain(&intel, None, "Op", &config).unwrap();
    let mut ids: Vec<String> = import
        .chain
        .get_entities_by_type(EntityKind::Actor)
        .iter()
        .map(|e| e.id().to_string())
        .collect();
    ids.sort();
    assert_eq!(ids, vec!["actor-alice", "actor-dave"]);
}

#[rstest]
fn test_communities_as_infrastructure(intel: NetworkIntel) {
    let import = network_to_chain(&intel, None, "Op", &default_config()).unwrap();
    match import.chain.get_entity("community-0") {
        Some(Entity::Infrastructure(infra)) => {
            assert_eq!(infra.name, "Community 0 (3 members)");
            assert_eq!(infra.reach_estimate.as_deref(), Some("3"));
            assert_eq!(infra.detection_difficulty, 0.3);
        }
        other => panic!("expected infrastructure, got {other:?}"),
    }
    assert_eq!(
        import
            .chain
            .get_entities_by_type(EntityKind::Infrastructure)
            .len(),
        2
    );
}

// ========== With Plan ==========

#[rstest]
fn test_plan_entities(intel: NetworkIntel, plan: OperationPlan) {
    let import = network_to_chain(&intel, Some(&plan), "Test Op", &default_config()).unwrap();
    let chain = &import.chain;

    assert_eq!(chain.name(), "Test Op");
    assert_eq!(chain.get_entities_by_type(EntityKind::Action).len(), 3);
    assert!(chain.contains("target-network"));
    assert!(chain.contains("weakness-0"));
    assert!(chain.contains("risk-0"));
    assert!(chain.contains("effect-reach"));
}

#[rstest]
fn test_plan_chain_is_valid_dag(intel: NetworkIntel, plan: OperationPlan) {
    let import = network_to_chain(&intel, Some(&plan), "Op", &default_config()).unwrap();
    let chain = &import.chain;

    assert!(chain.is_valid_dag());
    assert_eq!(chain.relationship_count(), 3);
    let order = chain.get_chain().unwrap();
    let pos = |id: &str| order.iter().position(|x| x == id).unwrap();
    assert!(pos("entry-0") < pos("entry-1"));
    assert!(pos("entry-1") < pos("amplify-0"));
    assert!(pos("amplify-0") < pos("effect-reach"));
}

#[rstest]
fn test_effect_severity_is_reach_fraction(intel: NetworkIntel, plan: OperationPlan) {
    let import = network_to_chain(&intel, Some(&plan), "Op", &default_config()).unwrap();
    match import.chain.get_entity("effect-reach") {
        Some(Entity::Effect(effect)) => {
            assert_eq!(effect.severity, 0.35);
            assert_eq!(effect.reversibility, 0.7);
            assert_eq!(effect.name, "Network penetration (35% reach)");
        }
        other => panic!("expected effect, got {other:?}"),
    }
}

#[rstest]
fn test_entry_actions_link_existing_actors(intel: NetworkIntel, plan: OperationPlan) {
    let import = network_to_chain(&intel, Some(&plan), "Op", &default_config()).unwrap();
    let entry = import
        .chain
        .get_entity("entry-0")
        .and_then(Entity::as_action)
        .unwrap();
    assert_eq!(entry.actor_id.as_ref().map(|id| id.as_str()), Some("actor-alice"));
    assert_eq!(entry.success_probability, 0.92);

    let amplify = import
        .chain
        .get_entity("amplify-0")
        .and_then(Entity::as_action)
        .unwrap();
    assert_eq!(amplify.success_probability, 0.6);
}

#[rstest]
fn test_entry_success_is_capped(intel: NetworkIntel) {
    let plan = OperationPlan {
        entry_points: vec![step("alice", "hub", 0.99), PlanStep {
            node: "zed".to_string(),
            role: None,
            influence_score: None,
        }],
        ..Default::default()
    };
    let import = network_to_chain(&intel, Some(&plan), "Op", &default_config()).unwrap();
    let chain = &import.chain;

    let capped = chain.get_entity("entry-0").and_then(Entity::as_action).unwrap();
    assert_eq!(capped.success_probability, 0.95);

    let unknown = chain.get_entity("entry-1").and_then(Entity::as_action).unwrap();
    assert_eq!(unknown.success_probability, 0.5);
    assert!(unknown.actor_id.is_none());
    assert!(unknown.description.contains("unknown"));
}

#[rstest]
fn test_reach_out_of_range_is_clamped(intel: NetworkIntel, mut plan: OperationPlan) {
    plan.estimated_reach_pct = 1.7;
    let import = network_to_chain(&intel, Some(&plan), "Op", &default_config()).unwrap();

    match import.chain.get_entity("effect-reach") {
        Some(Entity::Effect(effect)) => assert_eq!(effect.severity, 1.0),
        other => panic!("expected effect, got {other:?}"),
    }
    assert!(import.warnings.iter().any(|w| matches!(
        w,
        AdapterWarning::ClampedValue { entity_id, field, .. }
            if entity_id == "effect-reach" && field == "severity"
    )));
}

#[rstest]
fn test_plan_without_actions_warns(intel: NetworkIntel) {
    let plan = OperationPlan {
        estimated_reach_pct: 0.1,
        ..Default::default()
    };
    let import = network_to_chain(&intel, Some(&plan), "Op", &default_config()).unwrap();

    assert!(import.chain.contains("effect-reach"));
    assert!(!import.chain.contains("target-network"));
    assert!(import.warnings.contains(&AdapterWarning::EffectWithoutAction));
}

#[test]
fn test_intel_deserializes_with_defaults() {
    let intel: NetworkIntel = serde_json::from_str(
        r#"{"nodes": [{"node": "alice", "role": "hub", "influence_score": 0.9}],
            "communities": {"0": ["alice", "bob"]}}"#,
    )
    .unwrap();
    let plan: OperationPlan = serde_json::from_str(
        r#"{"entry_points": [{"node": "alice"}], "estimated_reach_pct": 0.2}"#,
    )
    .unwrap();

    let import = network_to_chain(&intel, Some(&plan), "From Json", &default_config()).unwrap();
    assert!(import.chain.is_valid_dag());
    assert_eq!(import.chain.id(), "from-json");
}
