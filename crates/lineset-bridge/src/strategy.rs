use lineset_core::errors::Result;

/// Text of one side of an aligned diff
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
    /// Display name of the source
    pub name: String,
    pub text: String,
}

impl SourceText {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Result of an aligned diff run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedDiff {
    /// Name of the strategy that produced the output
    pub strategy: String,

    /// Exit code of the external program, if one ran and exited normally
    pub exit_code: Option<i32>,

    /// Combined output: stdout followed by stderr
    pub output: String,
}

/// A way to obtain a side-by-side alignment of two texts
///
/// Implementations only read the texts they are given.
pub trait AlignedDiffStrategy {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Produce the aligned diff of `a` against `b`
    ///
    /// # Errors
    ///
    /// Implementations report process failures as `BridgeProcessFailure` and
    /// an exceeded time bound as `BridgeTimeout`.
    fn aligned(&self, a: &SourceText, b: &SourceText) -> Result<AlignedDiff>;
}
