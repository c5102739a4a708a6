//! Raw passthrough tool
//!
//! `run_gam` is the escape hatch for GAM operations without a dedicated
//! tool. Its single free-text parameter is tokenized with POSIX word
//! splitting — never a shell — and goes through the same validation,
//! execution, and formatting pipeline as every other tool.

use gam_domain::{ParamKind, RiskLevel, ToolDefinition, ToolParameter};

pub const RUN_GAM: &str = "run_gam";

pub fn run_gam_definition() -> ToolDefinition {
    ToolDefinition::new(
        RUN_GAM,
        "Execute a raw GAM command (for advanced users). \
         The command is tokenized, not shell-evaluated.",
        RiskLevel::Mutating,
        &[],
    )
    .with_parameter(
        ToolParameter::new(
            "command",
            "The full GAM command to execute (with or without the leading 'gam')",
            true,
        )
        .with_kind(ParamKind::FreeText),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use gam_domain::{ToolCall, build_command};

    #[test]
    fn test_run_gam_tokenizes() {
        let call = ToolCall::new(RUN_GAM).with_arg("command", "gam print users maxresults 1");
        let vector = build_command(&run_gam_definition(), &call, "/usr/local/bin/gam").unwrap();

        assert_eq!(vector.program(), "/usr/local/bin/gam");
        assert_eq!(vector.args(), ["print", "users", "maxresults", "1"]);
    }
}
