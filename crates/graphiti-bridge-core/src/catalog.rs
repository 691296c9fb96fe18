//! # Built-in Tool Catalog
//!
//! The three Graphiti tools, served from `tools/list` whenever the backend
//! cannot provide its own list.

use serde_json::{Value, json};

/// Static description of one callable tool.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    /// JSON-Schema-like object describing the tool arguments.
    pub input_schema: Value,
}

impl ToolDescriptor {
    /// Wire form: `{name, description, inputSchema}`.
    pub fn to_value(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "inputSchema": self.input_schema,
        })
    }
}

/// `add_episode`, `search` and `get_episodes`, in that order.
pub fn builtin_tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor {
            name: "add_episode",
            description: "Add an episode (memory fragment) to the knowledge graph",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string", "description": "Episode name" },
                    "episode_body": { "type": "string", "description": "Episode content" },
                    "episode_type": {
                        "type": "string",
                        "description": "Episode type",
                        "default": "text"
                    },
                    "source_description": {
                        "type": "string",
                        "description": "Source description",
                        "default": "MCP"
                    }
                },
                "required": ["name", "episode_body"]
            }),
        },
        ToolDescriptor {
            name: "search",
            description: "Search episodes in the knowledge graph",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": { "type": "string", "description": "Search query" },
                    "num_results": {
                        "type": "integer",
                        "description": "Number of results to return",
                        "default": 5
                    }
                },
                "required": ["query"]
            }),
        },
        ToolDescriptor {
            name: "get_episodes",
            description: "List stored episodes",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "limit": {
                        "type": "integer",
                        "description": "Maximum number of episodes to return",
                        "default": 100
                    }
                }
            }),
        },
    ]
}

/// The built-in catalog as a JSON array.
pub fn builtin_tools_value() -> Value {
    Value::Array(builtin_tools().iter().map(ToolDescriptor::to_value).collect())
}
