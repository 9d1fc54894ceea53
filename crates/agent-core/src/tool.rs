//! Tool System
//!
//! Capability references attached to an agent definition, and the schema and
//! registry types a hosting runtime uses to resolve them.
//!
//! Two kinds of capability exist:
//!
//! - **Builtin** tools run inside the model service (e.g. search grounding).
//!   A definition only declares them.
//! - **Function** tools are implemented and executed by the host. The
//!   [`Tool`] trait only exposes their schema, looked up by name in a
//!   [`ToolRegistry`].

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;

/// Tools provided by the model service itself
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinTool {
    /// Web search grounding
    GoogleSearch,
}

impl BuiltinTool {
    /// Wire name, as referenced from instructions
    pub const fn name(self) -> &'static str {
        match self {
            Self::GoogleSearch => "google_search",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::GoogleSearch => "Search the web and ground the response in the results",
        }
    }

    /// Entry for the `tools` array of a generate-content request
    pub fn declaration(self) -> Value {
        match self {
            Self::GoogleSearch => json!({ "google_search": {} }),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "google_search" => Some(Self::GoogleSearch),
            _ => None,
        }
    }
}

impl std::fmt::Display for BuiltinTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Reference from an agent definition to a capability
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "name", rename_all = "snake_case")]
pub enum ToolRef {
    /// Executed by the model service
    Builtin(BuiltinTool),

    /// Executed by the host, resolved by name
    Function(String),
}

impl ToolRef {
    pub fn function(name: impl Into<String>) -> Self {
        Self::Function(name.into())
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Builtin(tool) => tool.name(),
            Self::Function(name) => name,
        }
    }

    pub const fn is_builtin(&self) -> bool {
        matches!(self, Self::Builtin(_))
    }
}

impl From<BuiltinTool> for ToolRef {
    fn from(tool: BuiltinTool) -> Self {
        Self::Builtin(tool)
    }
}

/// Parameter definition for tool schema
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParameterSchema {
    pub name: String,

    /// JSON Schema type (string, number, boolean, object, array)
    #[serde(rename = "type")]
    pub param_type: String,

    pub description: String,

    #[serde(default)]
    pub required: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// Enum of allowed values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
}

/// Tool definition schema (for model function calling)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Unique tool identifier
    pub name: String,

    /// Human-readable description (shown to the model)
    pub description: String,

    pub parameters: Vec<ParameterSchema>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub has_side_effects: bool,
}

impl ToolSchema {
    /// Render as a function declaration with a JSON Schema parameter object
    pub fn to_function_declaration(&self) -> Value {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();

        for param in &self.parameters {
            let mut property = json!({
                "type": param.param_type,
                "description": param.description,
            });
            if let Some(values) = &param.enum_values {
                property["enum"] = json!(values);
            }
            properties.insert(param.name.clone(), property);

            if param.required {
                required.push(param.name.clone());
            }
        }

        json!({
            "name": self.name,
            "description": self.description,
            "parameters": {
                "type": "object",
                "properties": properties,
                "required": required,
            }
        })
    }
}

/// Host-implemented function tool
///
/// Hosts own execution; a definition only needs the schema to declare the
/// function to the model.
pub trait Tool: Send + Sync {
    /// Get the tool's schema for model function calling
    fn schema(&self) -> ToolSchema;
}

/// Registry of host function tools
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a new tool, replacing any tool with the same name
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        self.register_boxed(Arc::new(tool));
    }

    pub fn register_boxed(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.schema().name;
        if self.tools.insert(name.clone(), tool).is_some() {
            tracing::warn!(tool = %name, "Replaced previously registered tool");
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Registered tool names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn schemas(&self) -> Vec<ToolSchema> {
        self.names()
            .into_iter()
            .filter_map(|name| self.tools.get(name))
            .map(|tool| tool.schema())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
