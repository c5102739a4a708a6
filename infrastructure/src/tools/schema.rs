//! JSON Schema tool converter.
//!
//! Produces the `inputSchema` objects advertised in `tools/list`, mapping
//! [`ParamKind`] to JSON Schema types. Destructive tools additionally
//! advertise a required boolean `confirm` property so MCP clients know the
//! call will be rejected without it.

use gam_application::CONFIRM_PARAM;
use gam_domain::{ParamKind, ToolDefinition, ToolSpec};

/// Convert one tool definition to its MCP tool descriptor.
pub fn tool_to_schema(tool: &ToolDefinition) -> serde_json::Value {
    let mut properties = serde_json::Map::new();
    let mut required = Vec::new();

    for param in &tool.parameters {
        let mut prop = serde_json::Map::new();
        let schema_type = match &param.kind {
            ParamKind::Text | ParamKind::FreeText => "string",
            ParamKind::Integer => "integer",
            ParamKind::Flag => "boolean",
            ParamKind::Enum { allowed } => {
                prop.insert("enum".to_string(), serde_json::json!(allowed));
                "string"
            }
        };
        prop.insert("type".to_string(), serde_json::json!(schema_type));
        prop.insert(
            "description".to_string(),
            serde_json::json!(param.description),
        );
        if let Some(default) = &param.default {
            prop.insert("default".to_string(), serde_json::json!(default));
        }
        properties.insert(param.name.clone(), serde_json::Value::Object(prop));

        if param.required {
            required.push(serde_json::json!(param.name));
        }
    }

    if tool.is_destructive() {
        properties.insert(
            CONFIRM_PARAM.to_string(),
            serde_json::json!({
                "type": "boolean",
                "description": "Must be true. This operation is destructive and cannot be undone.",
            }),
        );
        required.push(serde_json::json!(CONFIRM_PARAM));
    }

    serde_json::json!({
        "name": tool.name,
        "description": tool.description,
        "inputSchema": {
            "type": "object",
            "properties": properties,
            "required": required,
        }
    })
}

/// Convert the whole spec, sorted by tool name for a stable listing.
pub fn all_tools_schema(spec: &ToolSpec) -> Vec<serde_json::Value> {
    let mut tools: Vec<&ToolDefinition> = spec.all().collect();
    tools.sort_by(|a, b| a.name.cmp(&b.name));
    tools.into_iter().map(tool_to_schema).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{default_tool_spec, groups, users};

    #[test]
    fn test_list_users_schema() {
        let schema = tool_to_schema(&users::list_users_definition());

        assert_eq!(schema["name"], "list_users");
        assert_eq!(schema["inputSchema"]["type"], "object");
        assert_eq!(
            schema["inputSchema"]["properties"]["max_results"]["type"],
            "integer"
        );
        assert_eq!(
            schema["inputSchema"]["properties"]["suspended"]["type"],
            "boolean"
        );
        // Nothing is required and no confirm on a read-only tool.
        assert_eq!(schema["inputSchema"]["required"].as_array().unwrap().len(), 0);
        assert!(schema["inputSchema"]["properties"].get("confirm").is_none());
    }

    #[test]
    fn test_destructive_tool_advertises_confirm() {
        let schema = tool_to_schema(&users::suspend_user_definition());

        let confirm = &schema["inputSchema"]["properties"]["confirm"];
        assert_eq!(confirm["type"], "boolean");

        let required = schema["inputSchema"]["required"].as_array().unwrap();
        assert!(required.contains(&serde_json::json!("email")));
        assert!(required.contains(&serde_json::json!("confirm")));
    }

    #[test]
    fn test_enum_parameter_lists_allowed_values() {
        let schema = tool_to_schema(&groups::add_group_member_definition());
        let role = &schema["inputSchema"]["properties"]["role"];

        assert_eq!(role["type"], "string");
        assert_eq!(role["enum"], serde_json::json!(["member", "manager", "owner"]));
        assert_eq!(role["default"], "member");
    }

    #[test]
    fn test_all_tools_schema_sorted_and_complete() {
        let spec = default_tool_spec();
        let tools = all_tools_schema(&spec);

        assert_eq!(tools.len(), spec.len());
        let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert!(names.contains(&"run_gam"));
    }
}
