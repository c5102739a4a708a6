//! Organizational unit tools

use gam_domain::{RiskLevel, ToolDefinition, ToolParameter};

pub const LIST_ORG_UNITS: &str = "list_org_units";
pub const CREATE_ORG_UNIT: &str = "create_org_unit";

/// `gam print orgs`
pub fn list_org_units_definition() -> ToolDefinition {
    ToolDefinition::new(
        LIST_ORG_UNITS,
        "List all organizational units in the domain.",
        RiskLevel::ReadOnly,
        &["print", "orgs"],
    )
}

/// `gam create org <path> [description ...]`
pub fn create_org_unit_definition() -> ToolDefinition {
    ToolDefinition::new(
        CREATE_ORG_UNIT,
        "Create a new organizational unit.",
        RiskLevel::Mutating,
        &["create", "org"],
    )
    .with_parameter(ToolParameter::new(
        "path",
        "The OU path (e.g., \"/Sales/West Coast\")",
        true,
    ))
    .with_parameter(
        ToolParameter::new("description", "Optional description", false)
            .with_keyword("description"),
    )
}
