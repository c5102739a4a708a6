//! Command builder — maps a validated tool call onto an argv vector
//!
//! [`build_command`] is the only way a caller-supplied value becomes part of
//! a command line. Every value lands in the vector as one or more discrete
//! argv elements, never interpolated into a shell string, so arguments
//! containing `;`, `&&`, quotes, or whitespace stay inert.
//!
//! Emission order is deterministic: base tokens first, then parameters in
//! the order the schema declares them — independent of the iteration order
//! of the argument map. GAM keyword arguments are order-insensitive, but a
//! stable vector keeps invocations reproducible and testable.

use crate::core::error::ValidationError;
use crate::tool::entities::{ArgStyle, ParamKind, ToolCall, ToolDefinition, ToolParameter};

use super::vector::CommandVector;

/// Build the argv for `call` against `def`, with `program` as the executable.
///
/// Validation failures are returned before any token for the offending
/// parameter is emitted; the caller must not spawn anything on `Err`.
pub fn build_command(
    def: &ToolDefinition,
    call: &ToolCall,
    program: &str,
) -> Result<CommandVector, ValidationError> {
    // Reject argument keys the schema does not declare.
    for key in call.arguments.keys() {
        if !def.parameters.iter().any(|p| &p.name == key) {
            return Err(ValidationError::unknown_parameter(key));
        }
    }

    let mut args: Vec<String> = def.base_tokens.clone();

    // Schema-declared order, regardless of map iteration order.
    for param in &def.parameters {
        let tokens = match call.arguments.get(&param.name) {
            Some(value) => render_value(param, value)?,
            None => match (&param.default, param.required) {
                (Some(default), _) => vec![default.clone()],
                (None, true) => {
                    return Err(ValidationError::missing_required(&param.name));
                }
                (None, false) => continue,
            },
        };

        match &param.style {
            ArgStyle::Positional => args.extend(tokens),
            ArgStyle::Keyword(words) => {
                args.extend(words.split_whitespace().map(String::from));
                args.extend(tokens);
            }
        }
    }

    args.extend(def.trailing_tokens.iter().cloned());

    Ok(CommandVector::new(program, args))
}

/// Render one supplied value into its argv token(s) per the parameter kind.
fn render_value(
    param: &ToolParameter,
    value: &serde_json::Value,
) -> Result<Vec<String>, ValidationError> {
    match &param.kind {
        ParamKind::Text => scalar_to_string(value)
            .map(|s| vec![s])
            .ok_or_else(|| ValidationError::invalid_value(&param.name, "expected a string")),
        ParamKind::Integer => match value {
            serde_json::Value::Number(n) if n.is_i64() || n.is_u64() => {
                Ok(vec![n.to_string()])
            }
            serde_json::Value::String(s) if s.parse::<i64>().is_ok() => Ok(vec![s.clone()]),
            _ => Err(ValidationError::invalid_value(
                &param.name,
                "expected an integer",
            )),
        },
        ParamKind::Flag => match value {
            serde_json::Value::Bool(b) => Ok(vec![b.to_string()]),
            serde_json::Value::String(s) if s == "true" || s == "false" => Ok(vec![s.clone()]),
            _ => Err(ValidationError::invalid_value(
                &param.name,
                "expected a boolean",
            )),
        },
        ParamKind::Enum { allowed } => {
            let supplied = value.as_str().ok_or_else(|| {
                ValidationError::invalid_enum(&param.name, allowed)
            })?;
            allowed
                .iter()
                .find(|a| a.eq_ignore_ascii_case(supplied))
                .map(|canonical| vec![canonical.clone()])
                .ok_or_else(|| ValidationError::invalid_enum(&param.name, allowed))
        }
        ParamKind::FreeText => {
            let text = value.as_str().ok_or_else(|| {
                ValidationError::invalid_value(&param.name, "expected a string")
            })?;
            tokenize_free_text(&param.name, text)
        }
    }
}

/// Split free text into argv tokens with POSIX word splitting.
///
/// Quoting is honored but nothing is expanded or interpreted; `;`, `&&`,
/// `|`, and friends come out as (parts of) literal tokens. A leading `gam`
/// token is dropped — the executable path already is the GAM binary.
fn tokenize_free_text(field: &str, text: &str) -> Result<Vec<String>, ValidationError> {
    let mut tokens = shell_words::split(text)
        .map_err(|e| ValidationError::invalid_value(field, e.to_string()))?;

    if tokens
        .first()
        .is_some_and(|t| t.eq_ignore_ascii_case("gam"))
    {
        tokens.remove(0);
    }

    if tokens.is_empty() {
        return Err(ValidationError::invalid_value(field, "command is empty"));
    }

    Ok(tokens)
}

fn scalar_to_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::entities::RiskLevel;

    fn list_users_def() -> ToolDefinition {
        ToolDefinition::new(
            "list_users",
            "List users in the domain",
            RiskLevel::ReadOnly,
            &["print", "users"],
        )
        .with_parameter(
            ToolParameter::new("fields", "Comma-separated fields", false).with_keyword("fields"),
        )
        .with_parameter(ToolParameter::new("query", "Filter query", false).with_keyword("query"))
        .with_parameter(
            ToolParameter::new("suspended", "Filter by suspension", false)
                .with_kind(ParamKind::Flag)
                .with_keyword("issuspended"),
        )
        .with_parameter(
            ToolParameter::new("max_results", "Maximum results", false)
                .with_kind(ParamKind::Integer)
                .with_keyword("maxresults"),
        )
    }

    #[test]
    fn test_base_tokens_only() {
        let vector = build_command(&list_users_def(), &ToolCall::new("list_users"), "gam").unwrap();
        assert_eq!(vector.args(), ["print", "users"]);
    }

    #[test]
    fn test_keyword_parameters_in_schema_order() {
        // Supplied in reverse of the declared order; output must not care.
        let call = ToolCall::new("list_users")
            .with_arg("max_results", 5)
            .with_arg("suspended", true)
            .with_arg("fields", "primaryemail,suspended");
        let vector = build_command(&list_users_def(), &call, "gam").unwrap();

        assert_eq!(
            vector.args(),
            [
                "print",
                "users",
                "fields",
                "primaryemail,suspended",
                "issuspended",
                "true",
                "maxresults",
                "5",
            ]
        );
    }

    #[test]
    fn test_order_stable_across_insertion_orders() {
        let a = ToolCall::new("list_users")
            .with_arg("fields", "primaryemail")
            .with_arg("query", "orgUnitPath='/Sales'")
            .with_arg("max_results", 10);
        let b = ToolCall::new("list_users")
            .with_arg("max_results", 10)
            .with_arg("query", "orgUnitPath='/Sales'")
            .with_arg("fields", "primaryemail");

        let def = list_users_def();
        assert_eq!(
            build_command(&def, &a, "gam").unwrap(),
            build_command(&def, &b, "gam").unwrap()
        );
    }

    #[test]
    fn test_missing_required() {
        let def = ToolDefinition::new("get_user_info", "Info", RiskLevel::ReadOnly, &["info", "user"])
            .with_parameter(ToolParameter::new("email", "Email", true));

        let err = build_command(&def, &ToolCall::new("get_user_info"), "gam").unwrap_err();
        assert_eq!(err, ValidationError::missing_required("email"));
    }

    #[test]
    fn test_unknown_parameter() {
        let call = ToolCall::new("list_users").with_arg("bogus", "x");
        let err = build_command(&list_users_def(), &call, "gam").unwrap_err();
        assert_eq!(err, ValidationError::unknown_parameter("bogus"));
    }

    #[test]
    fn test_default_emitted_when_absent() {
        let def = ToolDefinition::new("create_user", "Create", RiskLevel::Mutating, &["create", "user"])
            .with_parameter(ToolParameter::new("email", "Email", true))
            .with_parameter(
                ToolParameter::new("password", "Password", false)
                    .with_keyword("password")
                    .with_default("random"),
            );

        let call = ToolCall::new("create_user").with_arg("email", "new@example.com");
        let vector = build_command(&def, &call, "gam").unwrap();
        assert_eq!(
            vector.args(),
            ["create", "user", "new@example.com", "password", "random"]
        );
    }

    #[test]
    fn test_enum_case_insensitive_emits_canonical() {
        let def = ToolDefinition::new("add_group_member", "Add", RiskLevel::Mutating, &["update", "group"])
            .with_parameter(ToolParameter::new("group_email", "Group", true))
            .with_parameter(ToolParameter::new("member_email", "Member", true))
            .with_parameter(
                ToolParameter::new("role", "Role", false)
                    .with_kind(ParamKind::Enum {
                        allowed: vec!["member".into(), "manager".into(), "owner".into()],
                    })
                    .with_default("member"),
            );

        let call = ToolCall::new("add_group_member")
            .with_arg("group_email", "g@example.com")
            .with_arg("member_email", "m@example.com")
            .with_arg("role", "OWNER");
        let vector = build_command(&def, &call, "gam").unwrap();
        assert!(vector.args().contains(&"owner".to_string()));

        let bad = ToolCall::new("add_group_member")
            .with_arg("group_email", "g@example.com")
            .with_arg("member_email", "m@example.com")
            .with_arg("role", "admin");
        let err = build_command(&def, &bad, "gam").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidEnumValue { .. }));
    }

    #[test]
    fn test_value_with_shell_metacharacters_stays_one_token() {
        let call = ToolCall::new("list_users").with_arg("query", "name:John; rm -rf /");
        let vector = build_command(&list_users_def(), &call, "gam").unwrap();

        // One argv element, exactly as supplied.
        assert_eq!(
            vector.args(),
            ["print", "users", "query", "name:John; rm -rf /"]
        );
    }

    fn run_gam_def() -> ToolDefinition {
        ToolDefinition::new("run_gam", "Raw GAM command", RiskLevel::Mutating, &[])
            .with_parameter(
                ToolParameter::new("command", "The full GAM command", true)
                    .with_kind(ParamKind::FreeText),
            )
    }

    #[test]
    fn test_free_text_tokenization() {
        let call = ToolCall::new("run_gam").with_arg("command", "print users maxresults 1");
        let vector = build_command(&run_gam_def(), &call, "gam").unwrap();
        assert_eq!(vector.args(), ["print", "users", "maxresults", "1"]);
    }

    #[test]
    fn test_free_text_drops_leading_gam() {
        let call = ToolCall::new("run_gam").with_arg("command", "gam print orgs");
        let vector = build_command(&run_gam_def(), &call, "gam").unwrap();
        assert_eq!(vector.args(), ["print", "orgs"]);
    }

    #[test]
    fn test_free_text_metacharacters_stay_literal() {
        let call = ToolCall::new("run_gam").with_arg("command", "print users ; echo pwned && id");
        let vector = build_command(&run_gam_def(), &call, "gam").unwrap();
        assert_eq!(
            vector.args(),
            ["print", "users", ";", "echo", "pwned", "&&", "id"]
        );
    }

    #[test]
    fn test_free_text_honors_quoting() {
        let call = ToolCall::new("run_gam")
            .with_arg("command", r#"update ou "/Sales/West Coast" description test"#);
        let vector = build_command(&run_gam_def(), &call, "gam").unwrap();
        assert_eq!(
            vector.args(),
            ["update", "ou", "/Sales/West Coast", "description", "test"]
        );
    }

    #[test]
    fn test_free_text_unbalanced_quote() {
        let call = ToolCall::new("run_gam").with_arg("command", r#"print users query "unclosed"#);
        let err = build_command(&run_gam_def(), &call, "gam").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { .. }));
    }

    #[test]
    fn test_free_text_empty_command() {
        let call = ToolCall::new("run_gam").with_arg("command", "gam");
        let err = build_command(&run_gam_def(), &call, "gam").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { .. }));
    }

    #[test]
    fn test_trailing_tokens_after_parameters() {
        let def = ToolDefinition::new(
            "suspend_user",
            "Suspend a user account",
            RiskLevel::Destructive,
            &["update", "user"],
        )
        .with_parameter(ToolParameter::new("email", "Email", true))
        .with_trailing(&["suspended", "on"]);

        let call = ToolCall::new("suspend_user").with_arg("email", "x@example.com");
        let vector = build_command(&def, &call, "gam").unwrap();
        assert_eq!(
            vector.args(),
            ["update", "user", "x@example.com", "suspended", "on"]
        );
    }

    #[test]
    fn test_multi_word_keyword() {
        let def = ToolDefinition::new(
            "remove_group_member",
            "Remove a member",
            RiskLevel::Mutating,
            &["update", "group"],
        )
        .with_parameter(ToolParameter::new("group_email", "Group", true))
        .with_parameter(
            ToolParameter::new("member_email", "Member", true).with_keyword("remove member"),
        );

        let call = ToolCall::new("remove_group_member")
            .with_arg("group_email", "g@example.com")
            .with_arg("member_email", "m@example.com");
        let vector = build_command(&def, &call, "gam").unwrap();
        assert_eq!(
            vector.args(),
            [
                "update",
                "group",
                "g@example.com",
                "remove",
                "member",
                "m@example.com"
            ]
        );
    }

    #[test]
    fn test_integer_rejects_non_numeric() {
        let call = ToolCall::new("list_users").with_arg("max_results", "lots");
        let err = build_command(&list_users_def(), &call, "gam").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { .. }));
    }
}
