//! Domain types for hybrid operation chains.
//!
//! A chain is built from seven entity kinds (Actor, Action, Capability,
//! Infrastructure, Narrative, Target, Effect) joined by typed relationships.
//! [`Entity`] is a closed sum type: every consumer matches on it
//! exhaustively, so adding a variant is a compile error everywhere it matters.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Unique identifier for an entity.
///
/// Ids share one namespace across all entity kinds.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub String);

impl EntityId {
    /// Create a new entity ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Borrow<str> for EntityId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for EntityId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for EntityId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Generates `as_str` and `Display` for a fieldless enum whose serde form is
/// the same snake_case string.
macro_rules! string_enum {
    ($ty:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $ty {
            /// The serialized name of this value.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

/// Kind of actor executing an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorType {
    /// Government or military unit
    State,
    /// Deniable cut-out acting for another actor
    Proxy,
    /// Ideologically motivated group
    Hacktivist,
    /// Financially motivated group
    Criminal,
    /// Bot network or scripted persona
    Automated,
    /// Insider with legitimate access
    Insider,
}

string_enum!(ActorType {
    State => "state",
    Proxy => "proxy",
    Hacktivist => "hacktivist",
    Criminal => "criminal",
    Automated => "automated",
    Insider => "insider",
});

/// Domain an action operates in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionDomain {
    /// Technical intrusion or network activity
    #[default]
    Cyber,
    /// Information or influence activity
    Cognitive,
    /// Kinetic or physical-world activity
    Physical,
    /// Mixed cyber and cognitive activity
    Hybrid,
}

string_enum!(ActionDomain {
    Cyber => "cyber",
    Cognitive => "cognitive",
    Physical => "physical",
    Hybrid => "hybrid",
});

/// Category of a capability flowing between actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityType {
    /// Vulnerability exploit
    Exploit,
    /// Malware, implants, or other tools
    Tooling,
    /// Operator tradecraft
    Tradecraft,
    /// Access to a system or community
    Access,
    /// Collected data
    Data,
}

string_enum!(CapabilityType {
    Exploit => "exploit",
    Tooling => "tooling",
    Tradecraft => "tradecraft",
    Access => "access",
    Data => "data",
});

/// Category of infrastructure an operation runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InfrastructureType {
    /// Social media platform
    SocialMedia,
    /// Email systems
    Email,
    /// Messaging platform
    Messaging,
    /// Server or hosting
    Server,
    /// Domain name
    Domain,
    /// Physical site
    Physical,
    /// Media outlet
    Media,
    /// Government system
    Government,
}

string_enum!(InfrastructureType {
    SocialMedia => "social_media",
    Email => "email",
    Messaging => "messaging",
    Server => "server",
    Domain => "domain",
    Physical => "physical",
    Media => "media",
    Government => "government",
});

/// Category of an information operation narrative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeType {
    /// Deliberately false content
    Disinformation,
    /// Slanted persuasive content
    Propaganda,
    /// Release of obtained material
    Leak,
    /// Boosting existing content
    Amplification,
    /// Shaping interpretation of events
    Framing,
}

string_enum!(NarrativeType {
    Disinformation => "disinformation",
    Propaganda => "propaganda",
    Leak => "leak",
    Amplification => "amplification",
    Framing => "framing",
});

/// Category of an operation outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectType {
    /// Audience changes behavior
    BehavioralChange,
    /// Data lost or stolen
    DataLoss,
    /// Adversary gained access
    AccessGained,
    /// Target reputation harmed
    ReputationDamage,
    /// Target operations disrupted
    OperationalDisruption,
    /// Audience adopted the narrative
    NarrativeAdoption,
}

string_enum!(EffectType {
    BehavioralChange => "behavioral_change",
    DataLoss => "data_loss",
    AccessGained => "access_gained",
    ReputationDamage => "reputation_damage",
    OperationalDisruption => "operational_disruption",
    NarrativeAdoption => "narrative_adoption",
});

/// Type of relationship between two entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeType {
    /// Target cannot proceed without source
    #[default]
    Dependency,
    /// Source makes target possible
    Enables,
    /// Source boosts target's reach
    Amplifies,
    /// Source sets target in motion
    Triggers,
}

string_enum!(EdgeType {
    Dependency => "dependency",
    Enables => "enables",
    Amplifies => "amplifies",
    Triggers => "triggers",
});

/// Tag identifying which variant an [`Entity`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// See [`Actor`]
    Actor,
    /// See [`Action`]
    Action,
    /// See [`Capability`]
    Capability,
    /// See [`Infrastructure`]
    Infrastructure,
    /// See [`Narrative`]
    Narrative,
    /// See [`Target`]
    Target,
    /// See [`Effect`]
    Effect,
}

impl EntityKind {
    /// All kinds in canonical order.
    pub const ALL: [EntityKind; 7] = [
        EntityKind::Actor,
        EntityKind::Action,
        EntityKind::Capability,
        EntityKind::Infrastructure,
        EntityKind::Narrative,
        EntityKind::Target,
        EntityKind::Effect,
    ];

    /// Human-readable variant name (e.g. "Infrastructure").
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Actor => "Actor",
            EntityKind::Action => "Action",
            EntityKind::Capability => "Capability",
            EntityKind::Infrastructure => "Infrastructure",
            EntityKind::Narrative => "Narrative",
            EntityKind::Target => "Target",
            EntityKind::Effect => "Effect",
        }
    }
}

string_enum!(EntityKind {
    Actor => "actor",
    Action => "action",
    Capability => "capability",
    Infrastructure => "infrastructure",
    Narrative => "narrative",
    Target => "target",
    Effect => "effect",
});

fn default_half() -> f64 {
    0.5
}

fn default_target_type() -> String {
    "organization".to_string()
}

/// An entity that executes operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Unique identifier
    pub id: EntityId,

    /// Display name
    pub name: String,

    /// Kind of actor
    pub actor_type: ActorType,

    /// Free-form capability tags
    #[serde(default)]
    pub capabilities: Vec<String>,

    /// Other names the actor is tracked under
    #[serde(default)]
    pub known_aliases: Vec<String>,

    /// Confidence in attribution (0.0 to 1.0)
    #[serde(default = "default_half")]
    pub attribution_confidence: f64,
}

impl Actor {
    /// Create an actor with default optional fields
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>, actor_type: ActorType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            actor_type,
            capabilities: Vec::new(),
            known_aliases: Vec::new(),
            attribution_confidence: default_half(),
        }
    }
}

/// A single operation step: technical, cognitive, or hybrid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Unique identifier
    pub id: EntityId,

    /// Display name
    pub name: String,

    /// What the step does
    #[serde(default)]
    pub description: String,

    /// Domain the step operates in
    #[serde(default)]
    pub domain: ActionDomain,

    /// MITRE ATT&CK technique identifiers
    #[serde(default)]
    pub attack_ids: Vec<String>,

    /// DISARM framework identifiers
    #[serde(default)]
    pub disarm_ids: Vec<String>,

    /// Social-cognitive technique codes
    #[serde(default)]
    pub sct_codes: Vec<String>,

    /// Actor performing the step (informational, not an edge)
    #[serde(default)]
    pub actor_id: Option<EntityId>,

    /// Infrastructure the step runs on (informational, not an edge)
    #[serde(default)]
    pub platform_id: Option<EntityId>,

    /// Tool names the step relies on
    #[serde(default)]
    pub tools: Vec<String>,

    /// How long the step takes, in hours
    #[serde(default)]
    pub duration_hours: Option<f64>,

    /// Likelihood the step succeeds (0.0 to 1.0)
    #[serde(default = "default_half")]
    pub success_probability: f64,

    /// Observables a defender could detect
    #[serde(default)]
    pub detection_surface: Vec<String>,
}

impl Action {
    /// Create an action with default optional fields
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            domain: ActionDomain::default(),
            attack_ids: Vec::new(),
            disarm_ids: Vec::new(),
            sct_codes: Vec::new(),
            actor_id: None,
            platform_id: None,
            tools: Vec::new(),
            duration_hours: None,
            success_probability: default_half(),
            detection_surface: Vec::new(),
        }
    }
}

/// A resource or capability that flows between actions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capability {
    /// Unique identifier
    pub id: EntityId,

    /// Display name
    pub name: String,

    /// Category of capability
    pub capability_type: CapabilityType,

    /// What the capability provides
    #[serde(default)]
    pub description: String,

    /// Whether the capability degrades over time
    #[serde(default)]
    pub perishable: bool,

    /// Useful lifetime in hours, for perishable capabilities
    #[serde(default)]
    pub ttl_hours: Option<f64>,
}

impl Capability {
    /// Create a capability with default optional fields
    pub fn new(
        id: impl Into<EntityId>,
        name: impl Into<String>,
        capability_type: CapabilityType,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            capability_type,
            description: String::new(),
            perishable: false,
            ttl_hours: None,
        }
    }
}

/// A platform or infrastructure where operations execute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Infrastructure {
    /// Unique identifier
    pub id: EntityId,

    /// Display name
    pub name: String,

    /// Category of infrastructure
    pub infra_type: InfrastructureType,

    /// What the infrastructure is
    #[serde(default)]
    pub description: String,

    /// Free-form audience size estimate
    #[serde(default)]
    pub reach_estimate: Option<String>,

    /// How hard activity here is to detect (0.0 to 1.0)
    #[serde(default = "default_half")]
    pub detection_difficulty: f64,
}

impl Infrastructure {
    /// Create an infrastructure entity with default optional fields
    pub fn new(
        id: impl Into<EntityId>,
        name: impl Into<String>,
        infra_type: InfrastructureType,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            infra_type,
            description: String::new(),
            reach_estimate: None,
            detection_difficulty: default_half(),
        }
    }
}

/// A cognitive or information operation narrative thread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Narrative {
    /// Unique identifier
    pub id: EntityId,

    /// Display name
    pub name: String,

    /// Category of narrative
    pub narrative_type: NarrativeType,

    /// What the narrative claims
    #[serde(default)]
    pub description: String,

    /// Intended audience
    #[serde(default)]
    pub target_audience: Option<String>,

    /// Social-cognitive technique codes
    #[serde(default)]
    pub sct_codes: Vec<String>,

    /// Infrastructure ids the narrative is pushed through
    #[serde(default)]
    pub platforms: Vec<String>,
}

impl Narrative {
    /// Create a narrative with default optional fields
    pub fn new(
        id: impl Into<EntityId>,
        name: impl Into<String>,
        narrative_type: NarrativeType,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            narrative_type,
            description: String::new(),
            target_audience: None,
            sct_codes: Vec::new(),
            platforms: Vec::new(),
        }
    }
}

/// A target of operations: individual, organization, or population
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    /// Unique identifier
    pub id: EntityId,

    /// Display name
    pub name: String,

    /// "individual", "organization", or "population"
    #[serde(default = "default_target_type")]
    pub target_type: String,

    /// Who or what the target is
    #[serde(default)]
    pub description: String,

    /// Weaknesses the operation exploits
    #[serde(default)]
    pub vulnerabilities: Vec<String>,
}

impl Target {
    /// Create an organization target with default optional fields
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            target_type: default_target_type(),
            description: String::new(),
            vulnerabilities: Vec::new(),
        }
    }
}

/// An outcome or impact of the operation chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    /// Unique identifier
    pub id: EntityId,

    /// Display name
    pub name: String,

    /// Category of outcome
    pub effect_type: EffectType,

    /// What happened
    #[serde(default)]
    pub description: String,

    /// How bad the outcome is (0.0 to 1.0)
    #[serde(default = "default_half")]
    pub severity: f64,

    /// 0.0 is permanent, 1.0 is trivially reversible
    #[serde(default = "default_half")]
    pub reversibility: f64,
}

impl Effect {
    /// Create an effect with default optional fields
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>, effect_type: EffectType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            effect_type,
            description: String::new(),
            severity: default_half(),
            reversibility: default_half(),
        }
    }
}

/// A node in a hybrid operation chain.
///
/// Serialized with an explicit `"type"` tag so decoding dispatches through
/// this one enum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Entity {
    /// Operator
    Actor(Actor),
    /// Operation step
    Action(Action),
    /// Resource or capability
    Capability(Capability),
    /// Platform
    Infrastructure(Infrastructure),
    /// Information operation thread
    Narrative(Narrative),
    /// Who is targeted
    Target(Target),
    /// Outcome
    Effect(Effect),
}

impl Entity {
    /// Unique identifier of the entity
    pub fn id(&self) -> &EntityId {
        match self {
            Entity::Actor(e) => &e.id,
            Entity::Action(e) => &e.id,
            Entity::Capability(e) => &e.id,
            Entity::Infrastructure(e) => &e.id,
            Entity::Narrative(e) => &e.id,
            Entity::Target(e) => &e.id,
            Entity::Effect(e) => &e.id,
        }
    }

    /// Display name of the entity
    pub fn name(&self) -> &str {
        match self {
            Entity::Actor(e) => &e.name,
            Entity::Action(e) => &e.name,
            Entity::Capability(e) => &e.name,
            Entity::Infrastructure(e) => &e.name,
            Entity::Narrative(e) => &e.name,
            Entity::Target(e) => &e.name,
            Entity::Effect(e) => &e.name,
        }
    }

    /// Which variant this entity is
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Actor(_) => EntityKind::Actor,
            Entity::Action(_) => EntityKind::Action,
            Entity::Capability(_) => EntityKind::Capability,
            Entity::Infrastructure(_) => EntityKind::Infrastructure,
            Entity::Narrative(_) => EntityKind::Narrative,
            Entity::Target(_) => EntityKind::Target,
            Entity::Effect(_) => EntityKind::Effect,
        }
    }

    /// Non-empty description, if the variant carries one
    pub fn description(&self) -> Option<&str> {
        let text = match self {
            Entity::Actor(_) => return None,
            Entity::Action(e) => &e.description,
            Entity::Capability(e) => &e.description,
            Entity::Infrastructure(e) => &e.description,
            Entity::Narrative(e) => &e.description,
            Entity::Target(e) => &e.description,
            Entity::Effect(e) => &e.description,
        };
        (!text.is_empty()).then_some(text.as_str())
    }

    /// Node weight for critical path computation.
    ///
    /// Actions weigh their duration in hours; every other kind weighs 0.
    pub fn duration_hours(&self) -> f64 {
        match self {
            Entity::Action(action) => action.duration_hours.unwrap_or(0.0),
            Entity::Actor(_)
            | Entity::Capability(_)
            | Entity::Infrastructure(_)
            | Entity::Narrative(_)
            | Entity::Target(_)
            | Entity::Effect(_) => 0.0,
        }
    }

    /// The inner action, if this entity is one
    pub fn as_action(&self) -> Option<&Action> {
        match self {
            Entity::Action(action) => Some(action),
            _ => None,
        }
    }

    /// Validate field ranges before the entity enters a chain.
    ///
    /// Returns a description of the first violation found. The chain itself
    /// does not call this; loaders and adapters do.
    pub fn validate(&self) -> Result<(), String> {
        if self.id().as_str().trim().is_empty() {
            return Err("Entity id cannot be empty".to_string());
        }
        if self.name().trim().is_empty() {
            return Err(format!("Entity '{}' has an empty name", self.id()));
        }

        let checked = match self {
            Entity::Actor(actor) => {
                check_unit("attribution_confidence", actor.attribution_confidence)
            }
            Entity::Action(action) => {
                check_unit("success_probability", action.success_probability)?;
                check_hours("duration_hours", action.duration_hours)
            }
            Entity::Capability(capability) => check_hours("ttl_hours", capability.ttl_hours),
            Entity::Infrastructure(infra) => {
                check_unit("detection_difficulty", infra.detection_difficulty)
            }
            Entity::Narrative(_) | Entity::Target(_) => Ok(()),
            Entity::Effect(effect) => {
                check_unit("severity", effect.severity)?;
                check_unit("reversibility", effect.reversibility)
            }
        };
        checked.map_err(|e| format!("Entity '{}': {e}", self.id()))
    }
}

fn check_unit(field: &str, value: f64) -> Result<(), String> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(format!("{field} must be between 0.0 and 1.0 (got {value})"))
    }
}

fn check_hours(field: &str, value: Option<f64>) -> Result<(), String> {
    match value {
        Some(hours) if !hours.is_finite() || hours < 0.0 => Err(format!(
            "{field} must be a non-negative number of hours (got {hours})"
        )),
        _ => Ok(()),
    }
}

impl From<Actor> for Entity {
    fn from(e: Actor) -> Self {
        Entity::Actor(e)
    }
}

impl From<Action> for Entity {
    fn from(e: Action) -> Self {
        Entity::Action(e)
    }
}

impl From<Capability> for Entity {
    fn from(e: Capability) -> Self {
        Entity::Capability(e)
    }
}

impl From<Infrastructure> for Entity {
    fn from(e: Infrastructure) -> Self {
        Entity::Infrastructure(e)
    }
}

impl From<Narrative> for Entity {
    fn from(e: Narrative) -> Self {
        Entity::Narrative(e)
    }
}

impl From<Target> for Entity {
    fn from(e: Target) -> Self {
        Entity::Target(e)
    }
}

impl From<Effect> for Entity {
    fn from(e: Effect) -> Self {
        Entity::Effect(e)
    }
}

/// Directed edge between two entities in a chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    /// Entity the edge starts from
    pub source_id: EntityId,

    /// Entity the edge points to
    pub target_id: EntityId,

    /// Type of relationship
    #[serde(default)]
    pub edge_type: EdgeType,

    /// Capability or resource carried along the edge
    #[serde(default)]
    pub resource_id: Option<EntityId>,

    /// Free-text explanation
    #[serde(default)]
    pub description: String,
}

impl Relationship {
    /// Create a relationship with no resource and no description
    pub fn new(
        source_id: impl Into<EntityId>,
        target_id: impl Into<EntityId>,
        edge_type: EdgeType,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            target_id: target_id.into(),
            edge_type,
            resource_id: None,
            description: String::new(),
        }
    }

    /// Attach a free-text description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Attach a resource reference
    #[must_use]
    pub fn with_resource(mut self, resource_id: impl Into<EntityId>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_defaults() {
        let action = Action::new("x", "X");
        assert_eq!(action.success_probability, 0.5);
        assert!(action.attack_ids.is_empty());
        assert_eq!(action.domain, ActionDomain::Cyber);
    }

    #[test]
    fn every_kind_round_trips_through_its_entity() {
        let entities: Vec<Entity> = vec![
            Actor::new("a", "A", ActorType::State).into(),
            Action::new("b", "B").into(),
            Capability::new("c", "C", CapabilityType::Exploit).into(),
            Infrastructure::new("d", "D", InfrastructureType::Server).into(),
            Narrative::new("e", "E", NarrativeType::Leak).into(),
            Target::new("f", "F").into(),
            Effect::new("g", "G", EffectType::DataLoss).into(),
        ];

        let kinds: Vec<EntityKind> = entities.iter().map(Entity::kind).collect();
        assert_eq!(kinds, EntityKind::ALL.to_vec());
    }

    #[test]
    fn only_actions_carry_duration() {
        let action: Entity = Action {
            duration_hours: Some(12.0),
            ..Action::new("a", "A")
        }
        .into();
        let untimed: Entity = Action::new("b", "B").into();
        let target: Entity = Target::new("t", "T").into();

        assert_eq!(action.duration_hours(), 12.0);
        assert_eq!(untimed.duration_hours(), 0.0);
        assert_eq!(target.duration_hours(), 0.0);
    }

    #[test]
    fn serialized_entity_carries_type_tag() {
        let entity: Entity = Narrative::new("n", "N", NarrativeType::Framing).into();
        let value = serde_json::to_value(&entity).unwrap();
        assert_eq!(value["type"], "narrative");
        assert_eq!(value["narrative_type"], "framing");

        let decoded: Entity = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, entity);
    }

    #[test]
    fn missing_optional_fields_use_defaults() {
        let json = r#"{"type": "effect", "id": "e", "name": "E", "effect_type": "data_loss"}"#;
        let entity: Entity = serde_json::from_str(json).unwrap();
        match entity {
            Entity::Effect(effect) => {
                assert_eq!(effect.severity, 0.5);
                assert_eq!(effect.reversibility, 0.5);
            }
            other => panic!("expected effect, got {other:?}"),
        }
    }

    #[test]
    fn unknown_type_tag_is_rejected() {
        let json = r#"{"type": "weapon", "id": "w", "name": "W"}"#;
        assert!(serde_json::from_str::<Entity>(json).is_err());
    }

    #[test]
    fn validate_rejects_out_of_range_scores() {
        let effect: Entity = Effect {
            severity: 1.5,
            ..Effect::new("e", "E", EffectType::DataLoss)
        }
        .into();
        let err = effect.validate().unwrap_err();
        assert!(err.contains("severity"));

        let action: Entity = Action {
            duration_hours: Some(-1.0),
            ..Action::new("a", "A")
        }
        .into();
        assert!(action.validate().unwrap_err().contains("duration_hours"));

        let nan: Entity = Actor {
            attribution_confidence: f64::NAN,
            ..Actor::new("x", "X", ActorType::Proxy)
        }
        .into();
        assert!(nan.validate().is_err());
    }

    #[test]
    fn validate_rejects_blank_identity() {
        let blank_id: Entity = Target::new("  ", "T").into();
        assert!(blank_id.validate().is_err());

        let blank_name: Entity = Target::new("t", "").into();
        assert!(blank_name.validate().is_err());

        let ok: Entity = Target::new("t", "T").into();
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn description_is_none_when_empty() {
        let bare: Entity = Target::new("t", "T").into();
        assert_eq!(bare.description(), None);

        let described: Entity = Target {
            description: "Victim".to_string(),
            ..Target::new("t", "T")
        }
        .into();
        assert_eq!(described.description(), Some("Victim"));
    }

    #[test]
    fn relationship_defaults_to_dependency() {
        let json = r#"{"source_id": "a", "target_id": "b"}"#;
        let rel: Relationship = serde_json::from_str(json).unwrap();
        assert_eq!(rel.edge_type, EdgeType::Dependency);
        assert_eq!(rel.resource_id, None);
        assert_eq!(rel.description, "");
    }
}
