//! # agent-core
//!
//! Provider-agnostic agent definitions for hosting runtimes.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     AgentDefinition                          │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────┐  │
//! │  │ Instruction │  │  ToolRefs   │  │   Model selector    │  │
//! │  │  Template   │  │ (builtin /  │  │   ("gemini-...")    │  │
//! │  └─────────────┘  │  function)  │  └─────────────────────┘  │
//! │                   └──────┬──────┘                           │
//! └──────────────────────────┼──────────────────────────────────┘
//!                            │ resolve()
//!                  ┌─────────▼─────────┐
//!                  │   ToolRegistry    │  (host-owned)
//!                  └───────────────────┘
//! ```
//!
//! A definition is pure data. Model invocation, tool execution and
//! conversation state belong to the host that consumes it.

pub mod definition;
pub mod error;
pub mod instruction;
pub mod tool;

pub use definition::{AgentDefinition, DefinitionBuilder, ResolvedAgent};
pub use error::{AgentError, Result};
pub use instruction::Placeholder;
pub use tool::{BuiltinTool, ParameterSchema, Tool, ToolRef, ToolRegistry, ToolSchema};
