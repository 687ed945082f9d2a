//! Reconciliation commands
//!
//! Every command acts on the line under the cursor of a named view and is
//! executed by [`apply`](crate::apply::apply).

use serde::{Deserialize, Serialize};

/// Command enum for the three reconciliation actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Command {
    /// Append the current line to the view's other source, then drop it from the view
    Copy { view: String },

    /// Remove every copy of the current line from the view's own source, then
    /// drop it from the view
    Kill { view: String },

    /// Move the view's own source cursor to the first copy of the current line
    Visit { view: String },
}

impl Command {
    /// Name of the view the command acts on
    pub fn view(&self) -> &str {
        match self {
            Command::Copy { view } | Command::Kill { view } | Command::Visit { view } => view,
        }
    }

    /// Operation name used for logging boundaries
    pub fn op_name(&self) -> &'static str {
        match self {
            Command::Copy { .. } => "copy",
            Command::Kill { .. } => "kill",
            Command::Visit { .. } => "visit",
        }
    }

    /// Build a command from an action keyword (`copy`, `kill`, `visit`)
    pub fn parse(action: &str, view: impl Into<String>) -> Option<Self> {
        let view = view.into();
        match action {
            "copy" => Some(Command::Copy { view }),
            "kill" => Some(Command::Kill { view }),
            "visit" => Some(Command::Visit { view }),
            _ => None,
        }
    }

    /// Whether executing the command can change source or view content
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Command::Visit { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_action_keywords() {
        assert_eq!(
            Command::parse("copy", "A"),
            Some(Command::Copy {
                view: "A".to_string()
            })
        );
        assert_eq!(Command::parse("kill", "B").unwrap().view(), "B");
        assert_eq!(Command::parse("visit", "A").unwrap().op_name(), "visit");
        assert_eq!(Command::parse("yank", "A"), None);
    }

    #[test]
    fn test_only_visit_is_read_only() {
        assert!(Command::parse("copy", "A").unwrap().is_mutating());
        assert!(Command::parse("kill", "A").unwrap().is_mutating());
        assert!(!Command::parse("visit", "A").unwrap().is_mutating());
    }

    #[test]
    fn test_serialized_shape() {
        let cmd = Command::Kill {
            view: "A".to_string(),
        };
        let json = serde_json::to_string(&cmd).unwrap();
        assert_eq!(json, r#"{"action":"kill","view":"A"}"#);
    }
}
