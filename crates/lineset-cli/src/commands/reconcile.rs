//! Reconcile command
//!
//! Usage: lineset reconcile <A> <B> --script <FILE> [--mode multiset|set] [--write]
//!
//! Script format, one action per line:
//!
//! ```text
//! # comments and blank lines are ignored
//! copy A some line text
//! kill B another line
//! visit A third line
//! ```
//!
//! Everything after the view name (and one separating space) is the exact
//! line text, spaces included.

use clap::Args;
use lineset_core::ops::view_ops::find_in_view;
use lineset_core::render::render_view;
use lineset_core::{
    apply, compare, Command, CompareOptions, DiffMode, ReconcileOutcome, SourceId, Workspace,
};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::load_pair;

#[derive(Debug, Args)]
pub struct ReconcileArgs {
    /// First file (views: A)
    pub a: PathBuf,

    /// Second file (views: B)
    pub b: PathBuf,

    /// Script of actions to apply
    #[arg(long)]
    pub script: PathBuf,

    /// How repeated lines are counted
    #[arg(long, default_value = "multiset")]
    pub mode: DiffMode,

    /// Write both reconciled files back in place
    #[arg(long)]
    pub write: bool,
}

/// One parsed script action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptStep {
    /// 1-based line number in the script
    pub line_no: usize,
    pub command: Command,
    /// Exact text of the view line to act on
    pub text: String,
}

/// Parse a reconcile script
pub fn parse_script(script: &str) -> Result<Vec<ScriptStep>, String> {
    let mut steps = Vec::new();
    // Split on '\n' only: a trailing '\r' belongs to the line text
    for (index, raw) in script.split('\n').enumerate() {
        let line_no = index + 1;
        if raw.trim().is_empty() || raw.trim_start().starts_with('#') {
            continue;
        }

        let mut parts = raw.splitn(3, ' ');
        let action = parts.next().unwrap_or_default();
        let view = parts
            .next()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| format!("script line {}: missing view name", line_no))?;
        let text = parts.next().unwrap_or_default();

        let command = Command::parse(action, view)
            .ok_or_else(|| format!("script line {}: unknown action '{}'", line_no, action))?;

        steps.push(ScriptStep {
            line_no,
            command,
            text: text.to_string(),
        });
    }
    Ok(steps)
}

/// Execute reconcile command
pub fn execute(args: ReconcileArgs) -> Result<(), Box<dyn std::error::Error>> {
    let script = fs::read_to_string(&args.script)?;
    let steps = parse_script(&script)?;

    let mut ws = Workspace::new();
    let (a, b) = load_pair(&mut ws, &args.a, &args.b)?;
    let options = CompareOptions::default().with_mode(args.mode);
    compare(&mut ws, &a, &b, &options)?;

    for step in steps {
        let view = step.command.view().to_string();
        if find_in_view(&mut ws, &view, &step.text)?.is_none() {
            return Err(format!(
                "script line {}: line not listed in view {}",
                step.line_no, view
            )
            .into());
        }

        let outcome = apply(&mut ws, step.command)?;
        println!("{}: {}", step.line_no, describe(&ws, &outcome));
    }

    print!("{}", render_view(&ws, "A")?);
    print!("{}", render_view(&ws, "B")?);

    if args.write {
        atomic_write(&args.a, ws.get_source(&a)?.text().as_bytes())?;
        atomic_write(&args.b, ws.get_source(&b)?.text().as_bytes())?;
        println!("✓ Wrote {} and {}", args.a.display(), args.b.display());
    }

    Ok(())
}

fn describe(ws: &Workspace, outcome: &ReconcileOutcome) -> String {
    let source_name = |id: &SourceId| {
        ws.get_source(id)
            .map(|s| s.name.clone())
            .unwrap_or_else(|_| id.to_string())
    };
    match outcome {
        ReconcileOutcome::Copied { target, .. } => {
            format!("{} into {}", outcome.summary(), source_name(target))
        }
        ReconcileOutcome::Killed { source, .. } => {
            format!("{} from {}", outcome.summary(), source_name(source))
        }
        ReconcileOutcome::Visited { source, .. } | ReconcileOutcome::VisitMiss { source } => {
            format!("{} in {}", outcome.summary(), source_name(source))
        }
    }
}

/// Replace a file's content via a temp file in the same directory and a rename
///
/// The replacement keeps the permissions of the file it replaces.
fn atomic_write(target: &Path, content: &[u8]) -> std::io::Result<()> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = tempfile::NamedTempFile::new_in(dir)?;
    temp.write_all(content)?;
    temp.flush()?;
    if let Ok(metadata) = fs::metadata(target) {
        temp.as_file().set_permissions(metadata.permissions())?;
    }
    temp.persist(target).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_script() {
        let script = "# header\n\ncopy A x\nkill B two words \nvisit A\n";

        let steps = parse_script(script).unwrap();

        assert_eq!(steps.len(), 3);
        assert_eq!(
            steps[0],
            ScriptStep {
                line_no: 3,
                command: Command::Copy {
                    view: "A".to_string()
                },
                text: "x".to_string(),
            }
        );
        // Trailing space is part of the line text
        assert_eq!(steps[1].text, "two words ");
        assert_eq!(steps[2].text, "");
    }

    #[test]
    fn test_parse_script_errors_name_the_line() {
        let err = parse_script("copy A x\nmove A y\n").unwrap_err();
        assert!(err.contains("script line 2"));

        let err = parse_script("copy\n").unwrap_err();
        assert!(err.contains("missing view name"));
    }

    #[test]
    fn test_parse_script_keeps_carriage_return_in_text() {
        let steps = parse_script("copy A x\r\nkill B y\r\n").unwrap();

        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].text, "x\r");
        assert_eq!(steps[1].text, "y\r");
        assert_eq!(steps[1].line_no, 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_atomic_write_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let target = dir.path().join("a.txt");
        fs::write(&target, "old\n").unwrap();
        fs::set_permissions(&target, fs::Permissions::from_mode(0o644)).unwrap();

        atomic_write(&target, b"new\n").unwrap();

        let mode = fs::metadata(&target).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
        assert_eq!(fs::read_to_string(&target).unwrap(), "new\n");
    }

    #[test]
    fn test_atomic_write_replaces_content() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("a.txt");
        fs::write(&target, "old\n").unwrap();

        atomic_write(&target, b"new\n").unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "new\n");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
