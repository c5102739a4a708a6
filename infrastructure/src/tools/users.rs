//! User management tools

use gam_domain::{ParamKind, RiskLevel, ToolDefinition, ToolParameter};

pub const LIST_USERS: &str = "list_users";
pub const GET_USER_INFO: &str = "get_user_info";
pub const CREATE_USER: &str = "create_user";
pub const SUSPEND_USER: &str = "suspend_user";
pub const UNSUSPEND_USER: &str = "unsuspend_user";
pub const RESET_PASSWORD: &str = "reset_password";
pub const MOVE_USER_TO_OU: &str = "move_user_to_ou";
pub const SIGN_OUT_USER: &str = "sign_out_user";
pub const REVOKE_TOKENS: &str = "revoke_tokens";

/// `gam print users [fields ...] [query ...] [issuspended ...] [maxresults ...]`
pub fn list_users_definition() -> ToolDefinition {
    ToolDefinition::new(
        LIST_USERS,
        "List users in the Google Workspace domain. Returns a CSV-formatted list.",
        RiskLevel::ReadOnly,
        &["print", "users"],
    )
    .with_parameter(
        ToolParameter::new(
            "fields",
            "Comma-separated fields to include (e.g., \"primaryemail,fullname,suspended,lastlogintime\")",
            false,
        )
        .with_keyword("fields"),
    )
    .with_parameter(
        ToolParameter::new(
            "query",
            "Filter query (e.g., \"orgUnitPath='/Sales'\" or \"givenname:John\")",
            false,
        )
        .with_keyword("query"),
    )
    .with_parameter(
        ToolParameter::new(
            "suspended",
            "Filter by suspension status (true=only suspended, false=only active)",
            false,
        )
        .with_kind(ParamKind::Flag)
        .with_keyword("issuspended"),
    )
    .with_parameter(
        ToolParameter::new("max_results", "Maximum number of users to return", false)
            .with_kind(ParamKind::Integer)
            .with_keyword("maxresults"),
    )
}

/// `gam info user <email>`
pub fn get_user_info_definition() -> ToolDefinition {
    ToolDefinition::new(
        GET_USER_INFO,
        "Get detailed information about a specific user.",
        RiskLevel::ReadOnly,
        &["info", "user"],
    )
    .with_parameter(ToolParameter::new("email", "The user's email address", true))
}

/// `gam create user <email> firstname ... lastname ... password ... [org ...]`
pub fn create_user_definition() -> ToolDefinition {
    ToolDefinition::new(
        CREATE_USER,
        "Create a new user in Google Workspace.",
        RiskLevel::Mutating,
        &["create", "user"],
    )
    .with_parameter(ToolParameter::new("email", "The new user's email address", true))
    .with_parameter(
        ToolParameter::new("first_name", "User's first name", true).with_keyword("firstname"),
    )
    .with_parameter(
        ToolParameter::new("last_name", "User's last name", true).with_keyword("lastname"),
    )
    .with_parameter(
        ToolParameter::new("password", "Password (random if not specified)", false)
            .with_keyword("password")
            .with_default("random"),
    )
    .with_parameter(
        ToolParameter::new("org_unit", "Organizational unit path (e.g., \"/Sales\")", false)
            .with_keyword("org"),
    )
}

/// `gam update user <email> suspended on`
pub fn suspend_user_definition() -> ToolDefinition {
    ToolDefinition::new(
        SUSPEND_USER,
        "Suspend a user account, locking them out until reactivated.",
        RiskLevel::Destructive,
        &["update", "user"],
    )
    .with_parameter(ToolParameter::new("email", "The user's email address", true))
    .with_trailing(&["suspended", "on"])
}

/// `gam update user <email> suspended off`
pub fn unsuspend_user_definition() -> ToolDefinition {
    ToolDefinition::new(
        UNSUSPEND_USER,
        "Reactivate a suspended user account.",
        RiskLevel::Mutating,
        &["update", "user"],
    )
    .with_parameter(ToolParameter::new("email", "The user's email address", true))
    .with_trailing(&["suspended", "off"])
}

/// `gam update user <email> password <pw> [notify ...]`
pub fn reset_password_definition() -> ToolDefinition {
    ToolDefinition::new(
        RESET_PASSWORD,
        "Reset a user's password. The old password stops working immediately.",
        RiskLevel::Destructive,
        &["update", "user"],
    )
    .with_parameter(ToolParameter::new("email", "The user's email address", true))
    .with_parameter(
        ToolParameter::new("password", "New password (random if not specified)", false)
            .with_keyword("password")
            .with_default("random"),
    )
    .with_parameter(
        ToolParameter::new("notify_email", "Email to send the new password to", false)
            .with_keyword("notify"),
    )
}

/// `gam update user <email> org <path>`
pub fn move_user_to_ou_definition() -> ToolDefinition {
    ToolDefinition::new(
        MOVE_USER_TO_OU,
        "Move a user to a different organizational unit.",
        RiskLevel::Mutating,
        &["update", "user"],
    )
    .with_parameter(ToolParameter::new("email", "The user's email address", true))
    .with_parameter(
        ToolParameter::new(
            "org_unit",
            "Target organizational unit path (e.g., \"/Sales/West\")",
            true,
        )
        .with_keyword("org"),
    )
}

/// `gam user <email> signout`
pub fn sign_out_user_definition() -> ToolDefinition {
    ToolDefinition::new(
        SIGN_OUT_USER,
        "Sign out a user from all sessions. Cannot be undone.",
        RiskLevel::Destructive,
        &["user"],
    )
    .with_parameter(ToolParameter::new("email", "The user's email address", true))
    .with_trailing(&["signout"])
}

/// `gam user <email> deprovision`
pub fn revoke_tokens_definition() -> ToolDefinition {
    ToolDefinition::new(
        REVOKE_TOKENS,
        "Revoke all OAuth tokens and app passwords for a user. Cannot be undone.",
        RiskLevel::Destructive,
        &["user"],
    )
    .with_parameter(ToolParameter::new("email", "The user's email address", true))
    .with_trailing(&["deprovision"])
}
