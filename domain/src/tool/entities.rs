//! Tool domain entities

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Risk level of a tool operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Read-only operations (e.g., list_users, get_user_info)
    ReadOnly,
    /// Operations that change directory state but can be undone
    /// (e.g., create_group, move_user_to_ou)
    Mutating,
    /// Operations with irreversible real-world effect
    /// (e.g., sign_out_user, revoke_tokens)
    Destructive,
}

impl RiskLevel {
    pub fn as_str(&self) -> &str {
        match self {
            RiskLevel::ReadOnly => "read-only",
            RiskLevel::Mutating => "mutating",
            RiskLevel::Destructive => "destructive",
        }
    }

    /// Destructive tools demand an explicit `confirm: true` argument
    /// before any process is spawned.
    pub fn requires_confirmation(&self) -> bool {
        matches!(self, RiskLevel::Destructive)
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a parameter value is typed and validated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    /// Arbitrary string, rendered as a single argv element
    Text,
    /// Integer, rendered as its decimal string
    Integer,
    /// Boolean, rendered as `true` / `false`
    Flag,
    /// Closed set of allowed values; matching is case-insensitive and the
    /// canonical (declared) form is emitted
    Enum { allowed: Vec<String> },
    /// A whole subcommand, tokenized into discrete argv elements with
    /// POSIX word splitting (no shell expansion)
    FreeText,
}

/// How a parameter is rendered into the command vector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgStyle {
    /// Value token(s) only, e.g. the email in `info user <email>`
    Positional,
    /// Keyword token(s) followed by the value, e.g. `fields <value>` or
    /// `remove member <email>` (whitespace-separated words become separate
    /// argv tokens)
    Keyword(String),
}

/// Parameter specification for a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParameter {
    /// Parameter name
    pub name: String,
    /// Parameter description
    pub description: String,
    /// Whether this parameter is required
    pub required: bool,
    /// Value kind
    pub kind: ParamKind,
    /// Rendering style
    pub style: ArgStyle,
    /// Default value emitted when the parameter is absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
            kind: ParamKind::Text,
            style: ArgStyle::Positional,
            default: None,
        }
    }

    pub fn with_kind(mut self, kind: ParamKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.style = ArgStyle::Keyword(keyword.into());
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// Definition of a tool exposed to callers.
///
/// Couples the caller-facing schema (name, description, parameters) with the
/// invocation template: the fixed leading GAM tokens in [`base_tokens`](Self::base_tokens),
/// followed by parameter tokens in schema-declared order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique name of the tool (e.g., "list_users")
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Risk level of this tool
    pub risk_level: RiskLevel,
    /// Fixed leading tokens of the GAM subcommand (e.g., `["print", "users"]`)
    pub base_tokens: Vec<String>,
    /// Parameter specifications, in emission order
    pub parameters: Vec<ToolParameter>,
    /// Fixed tokens emitted after all parameters
    /// (e.g., `["suspended", "on"]` for suspend_user)
    pub trailing_tokens: Vec<String>,
    /// Per-tool timeout override in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl ToolDefinition {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        risk_level: RiskLevel,
        base_tokens: &[&str],
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            risk_level,
            base_tokens: base_tokens.iter().map(|t| t.to_string()).collect(),
            parameters: Vec::new(),
            trailing_tokens: Vec::new(),
            timeout_secs: None,
        }
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn with_trailing(mut self, tokens: &[&str]) -> Self {
        self.trailing_tokens = tokens.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn is_destructive(&self) -> bool {
        self.risk_level.requires_confirmation()
    }
}

/// Specification of available tools — the static, read-only registry
#[derive(Debug, Clone, Default)]
pub struct ToolSpec {
    tools: HashMap<String, ToolDefinition>,
}

impl ToolSpec {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    pub fn register(mut self, tool: ToolDefinition) -> Self {
        self.tools.insert(tool.name.clone(), tool);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.get(name)
    }

    pub fn all(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn destructive_tools(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.values().filter(|t| t.is_destructive())
    }
}

/// A single call attempt: tool name plus supplied arguments.
///
/// Created per incoming call and discarded after producing a result;
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the tool to call
    pub tool_name: String,
    /// Arguments passed to the tool
    pub arguments: HashMap<String, serde_json::Value>,
}

impl ToolCall {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments: HashMap::new(),
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    /// Get a string argument
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(|v| v.as_str())
    }

    /// Get an optional bool argument
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.arguments.get(key).and_then(|v| v.as_bool())
    }

    /// Remove an argument, returning its value if present
    pub fn take_arg(&mut self, key: &str) -> Option<serde_json::Value> {
        self.arguments.remove(key)
    }
}
