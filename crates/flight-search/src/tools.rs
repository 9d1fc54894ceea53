//! Attached Capabilities
//!
//! The agent uses a single capability: web search grounding, executed by the
//! model service. Nothing here runs a search.

use agent_core::{BuiltinTool, ToolRef};

/// Web search, referenced by name from the instruction
pub const GOOGLE_SEARCH: BuiltinTool = BuiltinTool::GoogleSearch;

/// Capabilities attached to the flight search agent, in declaration order
pub fn capabilities() -> Vec<ToolRef> {
    vec![GOOGLE_SEARCH.into()]
}
