//! Color and styling helpers for CLI output.
//!
//! Semantic Color Theme:
//!   - Success:   green   (saved files, valid DAG)
//!   - Warning:   yellow  (adapter warnings, missing sections)
//!   - Error:     red     (cycles)
//!   - Info:      cyan    (entity ids, path arrows)
//!   - Muted:     dimmed  (field labels)
//!   - Emphasis:  bold    (section headers)

use colored::Colorize;
use threadmap_core::domain::EntityKind;

use super::OutputConfig;

/// Apply semantic "success" color (green) to text.
pub fn success(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.green().to_string()
}

/// Apply semantic "error" color (red) to text.
pub fn error(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.red().to_string()
}

/// Apply semantic "warning" color (yellow) to text.
pub fn warning(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.yellow().to_string()
}

/// Apply semantic "info" color (cyan) to text.
pub fn info(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.cyan().to_string()
}

/// Apply dimmed style to text.
pub(crate) fn dimmed(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

/// Apply bold style to text (for section headers).
pub(crate) fn bold(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.bold().to_string()
}

/// Colorize an entity kind tag.
///
/// Actors red, actions, capabilities and infrastructure blue, narratives
/// magenta, targets yellow, effects bold green.
pub(crate) fn colorize_kind(kind: EntityKind, config: &OutputConfig) -> String {
    let text = kind.as_str();
    if !config.use_colors {
        return text.to_string();
    }
    match kind {
        EntityKind::Actor => text.red().to_string(),
        EntityKind::Action | EntityKind::Capability | EntityKind::Infrastructure => {
            text.blue().to_string()
        }
        EntityKind::Narrative => text.magenta().to_string(),
        EntityKind::Target => text.yellow().to_string(),
        EntityKind::Effect => text.green().bold().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colored::control::set_override;
    use std::sync::{Mutex, MutexGuard};

    static GLOBAL_STATE_MUTEX: Mutex<()> = Mutex::new(());

    struct ColorGuard<'a> {
        _guard: MutexGuard<'a, ()>,
    }

    impl ColorGuard<'_> {
        fn new() -> Self {
            let guard = GLOBAL_STATE_MUTEX.lock().unwrap();
            set_override(true);
            Self { _guard: guard }
        }
    }

    impl Drop for ColorGuard<'_> {
        fn drop(&mut self) {
            set_override(false);
        }
    }

    fn plain() -> OutputConfig {
        OutputConfig { use_colors: false }
    }

    #[test]
    fn test_no_color_returns_plain_text() {
        let config = plain();
        assert_eq!(success("ok", &config), "ok");
        assert_eq!(error("bad", &config), "bad");
        assert_eq!(warning("hmm", &config), "hmm");
        assert_eq!(info("id", &config), "id");
        assert_eq!(bold("Title", &config), "Title");
        assert_eq!(dimmed("label", &config), "label");
    }

    #[test]
    fn test_kind_text_without_color() {
        assert_eq!(colorize_kind(EntityKind::Narrative, &plain()), "narrative");
    }

    #[test]
    fn test_kind_colors() {
        let _colors = ColorGuard::new();
        let config = OutputConfig { use_colors: true };

        assert_eq!(colorize_kind(EntityKind::Actor, &config), "actor".red().to_string());
        for kind in [EntityKind::Action, EntityKind::Capability, EntityKind::Infrastructure] {
            assert_eq!(colorize_kind(kind, &config), kind.as_str().blue().to_string());
        }
        assert_eq!(
            colorize_kind(EntityKind::Narrative, &config),
            "narrative".magenta().to_string()
        );
        assert_eq!(colorize_kind(EntityKind::Target, &config), "target".yellow().to_string());
        assert_eq!(
            colorize_kind(EntityKind::Effect, &config),
            "effect".green().bold().to_string()
        );
        assert!(colorize_kind(EntityKind::Actor, &config).contains("\x1b["));
    }
}
