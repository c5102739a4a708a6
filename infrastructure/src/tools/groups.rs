//! Group management tools

use gam_domain::{ParamKind, RiskLevel, ToolDefinition, ToolParameter};

pub const LIST_GROUPS: &str = "list_groups";
pub const GET_GROUP_INFO: &str = "get_group_info";
pub const LIST_GROUP_MEMBERS: &str = "list_group_members";
pub const ADD_GROUP_MEMBER: &str = "add_group_member";
pub const REMOVE_GROUP_MEMBER: &str = "remove_group_member";
pub const CREATE_GROUP: &str = "create_group";

/// `gam print groups [fields ...]`
pub fn list_groups_definition() -> ToolDefinition {
    ToolDefinition::new(
        LIST_GROUPS,
        "List all groups in the domain. Returns a CSV-formatted list.",
        RiskLevel::ReadOnly,
        &["print", "groups"],
    )
    .with_parameter(
        ToolParameter::new(
            "fields",
            "Comma-separated fields (e.g., \"email,name,description,directmemberscount\")",
            false,
        )
        .with_keyword("fields"),
    )
}

/// `gam info group <email>`
pub fn get_group_info_definition() -> ToolDefinition {
    ToolDefinition::new(
        GET_GROUP_INFO,
        "Get detailed information about a group.",
        RiskLevel::ReadOnly,
        &["info", "group"],
    )
    .with_parameter(ToolParameter::new(
        "group_email",
        "The group's email address",
        true,
    ))
}

/// `gam print group-members group <email>`
pub fn list_group_members_definition() -> ToolDefinition {
    ToolDefinition::new(
        LIST_GROUP_MEMBERS,
        "List all members of a group.",
        RiskLevel::ReadOnly,
        &["print", "group-members", "group"],
    )
    .with_parameter(ToolParameter::new(
        "group_email",
        "The group's email address",
        true,
    ))
}

/// `gam update group <group> add <role> <member>`
pub fn add_group_member_definition() -> ToolDefinition {
    ToolDefinition::new(
        ADD_GROUP_MEMBER,
        "Add a member to a group.",
        RiskLevel::Mutating,
        &["update", "group"],
    )
    .with_parameter(ToolParameter::new(
        "group_email",
        "The group's email address",
        true,
    ))
    .with_parameter(
        ToolParameter::new("role", "Member role (MEMBER, MANAGER, or OWNER)", false)
            .with_kind(ParamKind::Enum {
                allowed: vec!["member".into(), "manager".into(), "owner".into()],
            })
            .with_keyword("add")
            .with_default("member"),
    )
    .with_parameter(ToolParameter::new(
        "member_email",
        "The email of the user to add",
        true,
    ))
}

/// `gam update group <group> remove member <member>`
pub fn remove_group_member_definition() -> ToolDefinition {
    ToolDefinition::new(
        REMOVE_GROUP_MEMBER,
        "Remove a member from a group.",
        RiskLevel::Mutating,
        &["update", "group"],
    )
    .with_parameter(ToolParameter::new(
        "group_email",
        "The group's email address",
        true,
    ))
    .with_parameter(
        ToolParameter::new("member_email", "The email of the user to remove", true)
            .with_keyword("remove member"),
    )
}

/// `gam create group <email> name ... [description ...]`
pub fn create_group_definition() -> ToolDefinition {
    ToolDefinition::new(
        CREATE_GROUP,
        "Create a new group.",
        RiskLevel::Mutating,
        &["create", "group"],
    )
    .with_parameter(ToolParameter::new(
        "email",
        "The new group's email address",
        true,
    ))
    .with_parameter(
        ToolParameter::new("name", "Display name for the group", true).with_keyword("name"),
    )
    .with_parameter(
        ToolParameter::new("description", "Optional description", false)
            .with_keyword("description"),
    )
}
