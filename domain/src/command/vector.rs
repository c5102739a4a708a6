//! Command vector — the fully-resolved argv for one external invocation

use serde::{Deserialize, Serialize};

/// Ordered argv tokens for a process invocation.
///
/// The program path and every argument are discrete elements handed to the
/// OS as literal argv — there is no shell interpretation layer anywhere
/// between a [`CommandVector`] and the spawned process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandVector {
    program: String,
    args: Vec<String>,
}

impl CommandVector {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl std::fmt::Display for CommandVector {
    /// Space-joined rendering for logs only — never fed back to a shell.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}
