use std::path::PathBuf;
use std::time::Duration;

/// How the external diff program is run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Program to run; the two pipe paths are appended to `args`
    pub program: String,

    /// Arguments placed before the pipe paths
    pub args: Vec<String>,

    /// Bound on the wait for the program to exit
    pub timeout: Duration,

    /// Exit codes treated as success (`diff` exits 1 when inputs differ)
    pub accept_status: Vec<i32>,

    /// Bytes per write to a pipe
    pub chunk_size: usize,

    /// Directory in which the scoped pipe directory is created
    /// (system temp dir when `None`)
    pub pipe_parent: Option<PathBuf>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            program: "diff".to_string(),
            args: vec!["--side-by-side".to_string()],
            timeout: Duration::from_secs(30),
            accept_status: vec![0, 1],
            chunk_size: 8 * 1024,
            pipe_parent: None,
        }
    }
}

impl BridgeConfig {
    /// Run `program` with no extra arguments, other settings at their defaults
    pub fn for_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            ..Self::default()
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_accept_status(mut self, codes: Vec<i32>) -> Self {
        self.accept_status = codes;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_pipe_parent(mut self, dir: impl Into<PathBuf>) -> Self {
        self.pipe_parent = Some(dir.into());
        self
    }

    /// Whether the exit `code` counts as a successful run
    pub fn accepts(&self, code: Option<i32>) -> bool {
        code.is_some_and(|c| self.accept_status.contains(&c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_follow_diff_convention() {
        let config = BridgeConfig::default();
        assert_eq!(config.program, "diff");
        assert!(config.accepts(Some(0)));
        assert!(config.accepts(Some(1)));
        assert!(!config.accepts(Some(2)));
        // Killed by a signal
        assert!(!config.accepts(None));
    }

    #[test]
    fn test_for_program_drops_default_args() {
        let config = BridgeConfig::for_program("cat").with_timeout(Duration::from_millis(50));
        assert!(config.args.is_empty());
        assert_eq!(config.timeout, Duration::from_millis(50));
        assert_eq!(config.chunk_size, 8 * 1024);
    }
}
