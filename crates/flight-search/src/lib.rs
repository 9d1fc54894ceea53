//! # flight-search
//!
//! Flight search agent that finds direct flights between two cities.
//!
//! The crate only declares the agent. A hosting runtime imports [`agent()`],
//! resolves its capabilities and drives the model:
//!
//! ```text
//! ┌──────────────────────────┐      ┌─────────────────────────────┐
//! │  flight_search_agent     │      │  Hosting runtime            │
//! │  model: gemini-2.0-flash │ ───▶ │  model calls, tool dispatch │
//! │  tools: [google_search]  │      │  sessions, streaming        │
//! └──────────────────────────┘      └─────────────────────────────┘
//! ```
//!
//! ```rust,ignore
//! let resolved = flight_search::agent().resolve(&host_tools)?;
//! let request_tools = resolved.tool_declarations();
//! ```

pub mod tools;

use std::sync::LazyLock;

use agent_core::{AgentDefinition, Result};

pub use agent_core;

/// Agent identifier
pub const AGENT_NAME: &str = "flight_search_agent";

/// Model selector, see <https://ai.google.dev/gemini-api/docs/models>
pub const MODEL: &str = "gemini-2.0-flash";

pub const DESCRIPTION: &str = "Flight search agent for finding direct flights between cities";

/// Instruction injected into every model invocation
pub const FLIGHT_SEARCH_PROMPT: &str = r"You are a helpful flight search assistant that helps users find direct flights between two cities.

Your main capabilities:
- Search for direct flights between any two cities using google_search
- Provide flight schedules, airlines, and pricing information when available
- Help users compare different flight options
- Suggest alternative dates if direct flights are not available on requested dates

When a user asks about flights:
1. Identify the departure and destination cities
2. Use google_search to find direct flight information
3. Look for specific details like:
   - Airlines that operate direct flights on this route
   - Flight duration
   - Typical departure times
   - Price ranges when available
   - Booking websites or airline direct booking

If no direct flights exist between the cities, inform the user and suggest:
- Common connecting cities for this route
- Alternative airports nearby

Always be helpful and provide accurate, up-to-date information based on your search results.
Keep responses concise but informative.";

// The literals are fixed at compile time and checked by the tests below, so
// construction cannot fail at runtime.
static AGENT: LazyLock<AgentDefinition> = LazyLock::new(|| {
    build_agent().expect("flight search agent literals form a valid definition")
});

/// Construct the flight search agent from its literals
pub fn build_agent() -> Result<AgentDefinition> {
    AgentDefinition::builder(AGENT_NAME, MODEL)
        .description(DESCRIPTION)
        .instruction(FLIGHT_SEARCH_PROMPT)
        .tools(tools::capabilities())
        .build()
}

/// The module-level agent, constructed on first use
pub fn agent() -> &'static AgentDefinition {
    &AGENT
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_core::{AgentError, BuiltinTool, ToolRef, ToolRegistry};

    #[test]
    fn test_agent_literals() {
        let agent = agent();

        assert_eq!(agent.name(), "flight_search_agent");
        assert_eq!(agent.model(), "gemini-2.0-flash");
        assert_eq!(
            agent.description(),
            "Flight search agent for finding direct flights between cities"
        );
    }

    #[test]
    fn test_single_search_capability() {
        assert_eq!(
            agent().tools(),
            &[ToolRef::Builtin(BuiltinTool::GoogleSearch)]
        );
        assert_eq!(agent().tool_names(), vec!["google_search"]);
    }

    #[test]
    fn test_instruction_is_complete() {
        let instruction = agent().instruction();

        assert!(!instruction.trim().is_empty());
        assert!(agent().placeholders().is_empty());
        assert!(!instruction.contains('{') && !instruction.contains('}'));
        assert!(instruction.starts_with("You are a helpful flight search assistant"));
        assert!(instruction.contains("google_search"));
        assert!(instruction.contains("Alternative airports nearby"));
    }

    #[test]
    fn test_construction_is_idempotent() {
        let first = build_agent().unwrap();
        let second = build_agent().unwrap();

        assert_eq!(first, second);
        assert_eq!(&first, agent());
        assert!(std::ptr::eq(agent(), agent()));
    }

    #[test]
    fn test_end_to_end_resolution() {
        let agent = AgentDefinition::builder("flight_search_agent", "gemini-2.0-flash")
            .description(DESCRIPTION)
            .instruction(FLIGHT_SEARCH_PROMPT)
            .tool(tools::GOOGLE_SEARCH)
            .build()
            .unwrap();

        assert_eq!(agent.name(), AGENT_NAME);
        assert_eq!(agent.model(), MODEL);
        assert_eq!(agent.tool_names(), vec!["google_search"]);

        let resolved = agent.resolve(&ToolRegistry::new()).unwrap();
        assert_eq!(
            resolved.tool_declarations(),
            vec![serde_json::json!({ "google_search": {} })]
        );
    }

    #[test]
    fn test_exported_definition() {
        let json = agent().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["name"], AGENT_NAME);
        assert_eq!(value["model"], MODEL);
        assert_eq!(
            value["tools"],
            serde_json::json!([{ "type": "builtin", "name": "google_search" }])
        );
        assert_eq!(&agent_core::AgentDefinition::from_json(&json).unwrap(), agent());
    }

    #[test]
    fn test_rejects_renamed_to_reserved() {
        let result = AgentDefinition::builder("user", MODEL)
            .tools(tools::capabilities())
            .build();
        assert!(matches!(result, Err(AgentError::Config(_))));
    }

    #[tokio::test]
    async fn test_shared_across_handlers() {
        let handles: Vec<_> = (0..8)
            .map(|_| tokio::spawn(async { agent().name().len() }))
            .collect();

        for handle in handles {
            assert_eq!(handle.await.unwrap(), AGENT_NAME.len());
        }
    }
}
