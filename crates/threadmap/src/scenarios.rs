//! Reference operations built from public reporting.

use threadmap_core::domain::{
    Action, ActionDomain, Actor, ActorType, Capability, CapabilityType, EdgeType, Effect,
    EffectType, Entity, Infrastructure, InfrastructureType, Narrative, NarrativeType,
    Relationship, Target,
};
use threadmap_core::{HybridChain, Result};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

/// APT28 hack-and-leak operation against the DNC, 2016.
///
/// GRU Unit 26165 runs the intrusion (spearphishing, then exfiltration with
/// X-Agent) and Unit 74455 stages the release through DCLeaks, driving a
/// corruption narrative that media adopt. Eleven entities covering all seven
/// kinds, nine relationships, acyclic.
pub fn apt28_2016() -> Result<HybridChain> {
    let mut chain = HybridChain::new(
        "chain-apt28-election-2016",
        "APT28 DNC Hack and Leak Operation",
        "Hybrid operation combining cyber intrusion (GRU Unit 26165) with information \
         operations (GRU Unit 74455) to interfere in the 2016 US presidential election. \
         Publicly attributed by US IC, Mueller investigation, and multiple cybersecurity firms.",
    );

    let entities: Vec<Entity> = vec![
        Actor {
            capabilities: strings(&[
                "spearphishing",
                "credential-harvesting",
                "lateral-movement",
                "exfiltration",
            ]),
            known_aliases: strings(&["Fancy Bear", "APT28", "Sofacy", "Pawn Storm"]),
            attribution_confidence: 0.95,
            ..Actor::new("actor-unit-26165", "GRU Unit 26165", ActorType::State)
        }
        .into(),
        Actor {
            capabilities: strings(&[
                "persona-creation",
                "media-placement",
                "narrative-ops",
                "platform-manipulation",
            ]),
            known_aliases: strings(&["Sandworm adjacency"]),
            attribution_confidence: 0.90,
            ..Actor::new("actor-unit-74455", "GRU Unit 74455", ActorType::State)
        }
        .into(),
        Action {
            description: "Targeted phishing campaign against DNC/DCCC staff to harvest email \
                          credentials."
                .to_string(),
            domain: ActionDomain::Cyber,
            attack_ids: strings(&["T1566.002"]),
            actor_id: Some("actor-unit-26165".into()),
            platform_id: Some("infra-email".into()),
            duration_hours: Some(168.0),
            success_probability: 0.3,
            detection_surface: strings(&["email-gateway-logs", "url-click-tracking"]),
            ..Action::new("action-spearphish", "Spearphishing credential harvester")
        }
        .into(),
        Action {
            description: "Access compromised accounts, exfiltrate emails and documents."
                .to_string(),
            domain: ActionDomain::Cyber,
            attack_ids: strings(&["T1114.002", "T1048"]),
            actor_id: Some("actor-unit-26165".into()),
            platform_id: Some("infra-email".into()),
            duration_hours: Some(720.0),
            success_probability: 0.8,
            detection_surface: strings(&["unusual-login-location", "bulk-download-patterns"]),
            ..Action::new("action-exfiltrate", "Email compromise and exfiltration")
        }
        .into(),
        Action {
            description: "Timed release of selected documents via personas to maximize \
                          narrative impact."
                .to_string(),
            domain: ActionDomain::Hybrid,
            attack_ids: strings(&["T1567"]),
            disarm_ids: strings(&["T0085", "TA06"]),
            sct_codes: strings(&["SCT-006", "SCT-001", "SCT-002"]),
            actor_id: Some("actor-unit-74455".into()),
            duration_hours: Some(2160.0),
            success_probability: 0.7,
            ..Action::new("action-selective-release", "Staged document release")
        }
        .into(),
        Capability {
            description: "Custom GRU backdoor for persistent access and exfiltration.".to_string(),
            ..Capability::new("cap-xagent", "X-Agent implant", CapabilityType::Tooling)
        }
        .into(),
        Infrastructure {
            detection_difficulty: 0.3,
            ..Infrastructure::new(
                "infra-email",
                "Campaign email systems",
                InfrastructureType::Email,
            )
        }
        .into(),
        Infrastructure {
            description: "GRU-operated leak website using synthetic persona.".to_string(),
            detection_difficulty: 0.6,
            ..Infrastructure::new("infra-dcleaks", "DCLeaks.com", InfrastructureType::Media)
        }
        .into(),
        Narrative {
            description: "Selective release of emails to paint DNC leadership as corrupt and \
                          biased."
                .to_string(),
            target_audience: Some("US voting public, media".to_string()),
            sct_codes: strings(&["SCT-002", "SCT-006"]),
            platforms: strings(&["infra-dcleaks", "infra-twitter"]),
            ..Narrative::new(
                "narrative-corruption",
                "DNC corruption narrative",
                NarrativeType::Leak,
            )
        }
        .into(),
        Target {
            target_type: "organization".to_string(),
            description: "Primary target of cyber intrusion and subsequent information \
                          operations."
                .to_string(),
            vulnerabilities: strings(&["email-security", "insider-communications-sensitivity"]),
            ..Target::new("target-dnc", "Democratic National Committee")
        }
        .into(),
        Effect {
            description: "Leaked documents become major news stories, shaping election \
                          discourse."
                .to_string(),
            severity: 0.8,
            reversibility: 0.1,
            ..Effect::new(
                "effect-narrative-adoption",
                "Narrative adoption by media and public",
                EffectType::NarrativeAdoption,
            )
        }
        .into(),
    ];
    for entity in entities {
        chain.add_entity(entity);
    }

    let relationships = [
        // Intrusion
        ("actor-unit-26165", "action-spearphish", EdgeType::Triggers, "Unit 26165 executes phishing"),
        ("action-spearphish", "action-exfiltrate", EdgeType::Dependency, "Credentials enable access"),
        ("cap-xagent", "action-exfiltrate", EdgeType::Enables, "X-Agent used for persistent access"),
        ("action-exfiltrate", "action-selective-release", EdgeType::Dependency, "Exfiltrated docs fed to release"),
        ("action-spearphish", "target-dnc", EdgeType::Dependency, "DNC targeted by phishing"),
        // Information operation
        ("actor-unit-74455", "action-selective-release", EdgeType::Triggers, "Unit 74455 runs leak ops"),
        ("action-selective-release", "narrative-corruption", EdgeType::Triggers, "Releases drive narrative"),
        ("infra-dcleaks", "action-selective-release", EdgeType::Enables, "DCLeaks hosts released docs"),
        // Effect
        ("narrative-corruption", "effect-narrative-adoption", EdgeType::Amplifies, "Narrative adopted by media"),
    ];
    for (source, target, edge_type, description) in relationships {
        chain.add_relationship(
            Relationship::new(source, target, edge_type).with_description(description),
        )?;
    }

    Ok(chain)
}
