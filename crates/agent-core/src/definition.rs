//! Agent Definition
//!
//! The declarative record a hosting runtime consumes: which model to call,
//! which capabilities to expose to it, and the instruction injected into
//! every invocation. A definition is validated once at construction and never
//! mutated afterwards, so it can be shared freely across conversation
//! handlers.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::collections::HashSet;
use std::sync::Arc;

use crate::error::{AgentError, Result};
use crate::instruction::{self, Placeholder};
use crate::tool::{BuiltinTool, Tool, ToolRef, ToolRegistry};

/// Names the runtime reserves for non-agent turn authors
pub const RESERVED_NAMES: [&str; 1] = ["user"];

/// Declarative agent configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentDefinition {
    name: String,

    /// Model selector (e.g., "gemini-2.0-flash")
    model: String,

    #[serde(default)]
    description: String,

    #[serde(default)]
    instruction: String,

    /// Attached capabilities, in declaration order
    #[serde(default)]
    tools: Vec<ToolRef>,
}

impl AgentDefinition {
    pub fn builder(name: impl Into<String>, model: impl Into<String>) -> DefinitionBuilder {
        DefinitionBuilder::new(name, model)
    }

    /// Parse a definition exported by another host and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let definition: Self = serde_json::from_str(json)?;
        definition.validate()?;
        Ok(definition)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn tools(&self) -> &[ToolRef] {
        &self.tools
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(ToolRef::name).collect()
    }

    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.iter().any(|t| t.name() == name)
    }

    /// State placeholders the host must supply when rendering the instruction
    pub fn placeholders(&self) -> Vec<Placeholder> {
        instruction::placeholders(&self.instruction)
    }

    pub fn render_instruction(&self, state: &Map<String, Value>) -> Result<String> {
        instruction::render(&self.instruction, state)
    }

    /// Check the construction invariants
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AgentError::Config("Agent name must not be empty".into()));
        }
        if !instruction::is_identifier(&self.name) {
            return Err(AgentError::Config(format!(
                "Agent name '{}' must start with a letter or underscore and contain only letters, digits and underscores",
                self.name
            )));
        }
        if RESERVED_NAMES.contains(&self.name.as_str()) {
            return Err(AgentError::Config(format!(
                "Agent name '{}' is reserved",
                self.name
            )));
        }
        if self.model.trim().is_empty() {
            return Err(AgentError::Config("Model must not be empty".into()));
        }

        let mut seen = HashSet::new();
        for tool in &self.tools {
            if tool.name().is_empty() {
                return Err(AgentError::Config("Tool name must not be empty".into()));
            }
            if !seen.insert(tool.name()) {
                return Err(AgentError::Config(format!(
                    "Tool '{}' is attached more than once",
                    tool.name()
                )));
            }
        }

        Ok(())
    }

    /// Bind the definition's capabilities to a host registry
    ///
    /// Builtin tools pass through; every function tool must be registered.
    pub fn resolve(&self, registry: &ToolRegistry) -> Result<ResolvedAgent<'_>> {
        let mut builtins = Vec::new();
        let mut functions = Vec::new();

        for tool in &self.tools {
            match tool {
                ToolRef::Builtin(builtin) => builtins.push(*builtin),
                ToolRef::Function(name) => {
                    let resolved = registry
                        .get(name)
                        .ok_or_else(|| AgentError::ToolNotFound(name.clone()))?;
                    functions.push(resolved);
                }
            }
        }

        tracing::debug!(
            agent = %self.name,
            builtins = builtins.len(),
            functions = functions.len(),
            "Resolved agent capabilities"
        );

        Ok(ResolvedAgent {
            definition: self,
            builtins,
            functions,
        })
    }
}

/// A definition whose capabilities have been bound to a host
pub struct ResolvedAgent<'a> {
    definition: &'a AgentDefinition,
    builtins: Vec<BuiltinTool>,
    functions: Vec<Arc<dyn Tool>>,
}

impl ResolvedAgent<'_> {
    pub const fn definition(&self) -> &AgentDefinition {
        self.definition
    }

    pub fn builtins(&self) -> &[BuiltinTool] {
        &self.builtins
    }

    pub fn functions(&self) -> &[Arc<dyn Tool>] {
        &self.functions
    }

    /// Entries for the `tools` array of a generate-content request
    pub fn tool_declarations(&self) -> Vec<Value> {
        let mut declarations: Vec<Value> = self
            .builtins
            .iter()
            .map(|b| b.declaration())
            .collect();

        if !self.functions.is_empty() {
            let functions: Vec<Value> = self
                .functions
                .iter()
                .map(|f| f.schema().to_function_declaration())
                .collect();
            declarations.push(json!({ "function_declarations": functions }));
        }

        declarations
    }
}

/// Builder for [`AgentDefinition`]
pub struct DefinitionBuilder {
    definition: AgentDefinition,
}

impl DefinitionBuilder {
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            definition: AgentDefinition {
                name: name.into(),
                model: model.into(),
                description: String::new(),
                instruction: String::new(),
                tools: Vec::new(),
            },
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.definition.description = description.into();
        self
    }

    /// Set the instruction, stripping indentation from multi-line literals
    #[must_use]
    pub fn instruction(mut self, instruction: impl AsRef<str>) -> Self {
        self.definition.instruction = instruction::dedent(instruction.as_ref());
        self
    }

    #[must_use]
    pub fn tool(mut self, tool: impl Into<ToolRef>) -> Self {
        self.definition.tools.push(tool.into());
        self
    }

    #[must_use]
    pub fn tools<I, T>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ToolRef>,
    {
        self.definition.tools.extend(tools.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> Result<AgentDefinition> {
        let definition = self.definition;

        if let Err(e) = definition.validate() {
            tracing::warn!(agent = %definition.name, error = %e, "Rejected agent definition");
            return Err(e);
        }

        tracing::debug!(
            agent = %definition.name,
            model = %definition.model,
            tools = ?definition.tool_names(),
            "Built agent definition"
        );

        Ok(definition)
    }
}
