//! Markdown analysis report.

use threadmap_core::HybridChain;
use threadmap_core::analysis::{find_chokepoints, intervention_ranking, narrative_threads};
use threadmap_core::domain::{EntityId, EntityKind};

/// Controls how much of each ranked section the report shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Entries in "Top Intervention Points"
    pub top_interventions: usize,
    /// Entries in "Chokepoints"
    pub top_chokepoints: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            top_interventions: 5,
            top_chokepoints: 5,
        }
    }
}

/// Render a report with default options.
pub fn to_markdown(chain: &HybridChain) -> String {
    to_markdown_with(chain, &ReportOptions::default())
}

/// Render a report.
///
/// Sections that need a valid DAG are replaced by a note when the chain
/// contains a cycle; the rest of the report is still produced.
pub fn to_markdown_with(chain: &HybridChain, options: &ReportOptions) -> String {
    let mut lines = vec![
        format!("# ThreadMap Report: {}", chain.name()),
        String::new(),
        format!("**Chain ID:** `{}`", chain.id()),
        String::new(),
    ];
    if !chain.description().is_empty() {
        lines.push(chain.description().to_string());
        lines.push(String::new());
    }

    entities_section(chain, &mut lines);
    relationships_section(chain, &mut lines);
    critical_path_section(chain, &mut lines);
    interventions_section(chain, options.top_interventions, &mut lines);
    chokepoints_section(chain, options.top_chokepoints, &mut lines);
    narratives_section(chain, &mut lines);

    lines.join("\n")
}

fn entities_section(chain: &HybridChain, lines: &mut Vec<String>) {
    lines.push("## Entities".to_string());
    lines.push(String::new());

    for kind in EntityKind::ALL {
        let entities = chain.get_entities_by_type(kind);
        if entities.is_empty() {
            continue;
        }
        lines.push(format!("### {}s ({})", kind.label(), entities.len()));
        lines.push(String::new());
        for entity in entities {
            let mut line = format!("- **{}** (`{}`)", entity.name(), entity.id());
            if let Some(description) = entity.description() {
                line.push_str(": ");
                line.push_str(description);
            }
            lines.push(line);
        }
        lines.push(String::new());
    }
}

fn relationships_section(chain: &HybridChain, lines: &mut Vec<String>) {
    lines.push("## Relationships".to_string());
    lines.push(String::new());
    for rel in chain.relationships() {
        lines.push(format!(
            "- `{}` →[{}]→ `{}`",
            rel.source_id, rel.edge_type, rel.target_id
        ));
    }
    lines.push(String::new());
}

fn critical_path_section(chain: &HybridChain, lines: &mut Vec<String>) {
    lines.push("## Critical Path".to_string());
    lines.push(String::new());
    match chain.get_critical_path() {
        Ok(path) => {
            lines.push(join_path(&path));
            lines.push(String::new());
            lines.push(format!(
                "**Total duration:** {} hours",
                chain.path_duration(&path)
            ));
        }
        Err(e) => {
            tracing::warn!(chain_id = %chain.id(), error = %e, "Critical path omitted from report");
            lines.push(format!("_Unavailable: {e}_"));
        }
    }
    lines.push(String::new());
}

fn interventions_section(chain: &HybridChain, limit: usize, lines: &mut Vec<String>) {
    lines.push("## Top Intervention Points".to_string());
    lines.push(String::new());
    for (rank, point) in intervention_ranking(chain).iter().take(limit).enumerate() {
        lines.push(format!(
            "{}. **{}** (`{}`): score {}, downstream impact {}",
            rank + 1,
            point.name,
            point.node_id,
            point.score,
            point.downstream_impact
        ));
    }
    lines.push(String::new());
}

fn chokepoints_section(chain: &HybridChain, limit: usize, lines: &mut Vec<String>) {
    lines.push("## Chokepoints".to_string());
    lines.push(String::new());
    for chokepoint in find_chokepoints(chain, limit) {
        lines.push(format!(
            "- `{}`: {} downstream nodes",
            chokepoint.node_id, chokepoint.downstream_count
        ));
    }
    lines.push(String::new());
}

fn narratives_section(chain: &HybridChain, lines: &mut Vec<String>) {
    let threads = narrative_threads(chain);
    if threads.is_empty() {
        return;
    }
    lines.push("## Narrative Threads".to_string());
    lines.push(String::new());
    for thread in &threads {
        lines.push(format!("- {}", join_path(thread)));
    }
    lines.push(String::new());
}

fn join_path(path: &[EntityId]) -> String {
    path.iter()
        .map(|id| format!("`{id}`"))
        .collect::<Vec<_>>()
        .join(" → ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use threadmap_core::domain::{
        Action, Actor, ActorType, EdgeType, Narrative, NarrativeType, Relationship, Target,
    };

    fn leak_chain() -> HybridChain {
        let mut chain = HybridChain::new("leak", "Leak Op", "Steal then publish");
        chain.add_entity(Actor::new("a", "Unit", ActorType::State));
        chain.add_entity(Action {
            duration_hours: Some(10.0),
            description: "Take the files".to_string(),
            ..Action::new("steal", "Steal")
        });
        chain.add_entity(Narrative::new("n", "Story", NarrativeType::Leak));
        chain.add_entity(Target::new("t", "Public"));
        for (from, to) in [("a", "steal"), ("steal", "n"), ("n", "t")] {
            chain
                .add_relationship(Relationship::new(from, to, EdgeType::Enables))
                .unwrap();
        }
        chain
    }

    #[test]
    fn report_has_every_section() {
        let report = to_markdown(&leak_chain());

        assert!(report.starts_with("# ThreadMap Report: Leak Op"));
        assert!(report.contains("**Chain ID:** `leak`"));
        assert!(report.contains("Steal then publish"));
        assert!(report.contains("### Actions (1)"));
        assert!(report.contains("- **Steal** (`steal`): Take the files"));
        assert!(report.contains("- `a` →[enables]→ `steal`"));
        assert!(report.contains("`a` → `steal` → `n` → `t`"));
        assert!(report.contains("**Total duration:** 10 hours"));
        assert!(report.contains("## Top Intervention Points"));
        assert!(report.contains("## Chokepoints"));
        assert!(report.contains("## Narrative Threads"));
    }

    #[test]
    fn kinds_without_entities_are_skipped() {
        let report = to_markdown(&leak_chain());
        assert!(!report.contains("### Effects"));
    }

    #[test]
    fn limits_apply_to_ranked_sections() {
        let options = ReportOptions {
            top_interventions: 1,
            top_chokepoints: 2,
        };
        let report = to_markdown_with(&leak_chain(), &options);
        assert!(report.contains("1. **Steal** (`steal`): score 6, downstream impact 2"));
        assert!(!report.contains("2. **"));
        let chokepoints = report
            .lines()
            .filter(|l| l.ends_with("downstream nodes"))
            .count();
        assert_eq!(chokepoints, 2);
    }

    #[test]
    fn cyclic_chain_still_renders() {
        let mut chain = leak_chain();
        chain
            .add_relationship(Relationship::new("t", "a", EdgeType::Triggers))
            .unwrap();

        let report = to_markdown(&chain);
        assert!(report.contains("## Critical Path"));
        assert!(report.contains("_Unavailable: "));
        assert!(report.contains("## Top Intervention Points"));
    }
}
