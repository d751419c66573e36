use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use jinny_ai::{Message, MessageRole};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Static instruction turn prepended to every conversation.
pub struct Rule {
    pub role: MessageRole,
    pub content: String,
}

impl Rule {
    pub fn to_message(&self) -> Message {
        Message::new(self.role, self.content.clone())
    }
}

/// Resolves a relative rules path against the repository working copy.
pub fn resolve_rules_path(workspace_dir: &Path, rules_file: &Path) -> PathBuf {
    if rules_file.is_absolute() {
        rules_file.to_path_buf()
    } else {
        workspace_dir.join(rules_file)
    }
}

/// Loads rules from `path`. A missing file yields an empty rule set.
pub fn load_rules(path: &Path) -> Result<Vec<Rule>> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == ErrorKind::NotFound => {
            tracing::info!(
                path = %path.display(),
                "rules file not found; using an empty rules list"
            );
            return Ok(Vec::new());
        }
        Err(error) => {
            return Err(error)
                .with_context(|| format!("failed to read rules file {}", path.display()))
        }
    };
    let rules = parse_rules(&raw);
    tracing::info!(path = %path.display(), count = rules.len(), "loaded rules");
    Ok(rules)
}

/// Parses `role: content` lines. Blank lines are ignored; lines without a
/// separator or with an unknown role are skipped with a warning.
pub fn parse_rules(raw: &str) -> Vec<Rule> {
    let mut rules = Vec::new();
    for (index, line) in raw.lines().enumerate() {
        let line_number = index + 1;
        if line.trim().is_empty() {
            continue;
        }
        let Some((role, content)) = line.split_once(':') else {
            tracing::warn!(line = line_number, "skipping rule line without ':' separator");
            continue;
        };
        let Some(role) = MessageRole::parse(role) else {
            tracing::warn!(
                line = line_number,
                role = role.trim(),
                "skipping rule line with unknown role"
            );
            continue;
        };
        rules.push(Rule {
            role,
            content: content.trim().to_string(),
        });
    }
    rules
}
