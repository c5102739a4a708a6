//! GAM tool catalog
//!
//! The static table of Google Workspace administration tools this server
//! exposes, grouped by area. Built once at startup; read-only thereafter.

pub mod groups;
pub mod orgunits;
pub mod raw;
pub mod schema;
pub mod users;

use gam_domain::ToolSpec;

/// Build the full tool specification.
pub fn default_tool_spec() -> ToolSpec {
    ToolSpec::new()
        // User management
        .register(users::list_users_definition())
        .register(users::get_user_info_definition())
        .register(users::create_user_definition())
        .register(users::suspend_user_definition())
        .register(users::unsuspend_user_definition())
        .register(users::reset_password_definition())
        .register(users::move_user_to_ou_definition())
        // Security
        .register(users::sign_out_user_definition())
        .register(users::revoke_tokens_definition())
        // Groups
        .register(groups::list_groups_definition())
        .register(groups::get_group_info_definition())
        .register(groups::list_group_members_definition())
        .register(groups::add_group_member_definition())
        .register(groups::remove_group_member_definition())
        .register(groups::create_group_definition())
        // Organizational units
        .register(orgunits::list_org_units_definition())
        .register(orgunits::create_org_unit_definition())
        // Escape hatch
        .register(raw::run_gam_definition())
}
