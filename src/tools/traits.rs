//! Tool descriptor and the named-variant helper shared by tool names and enum arguments.

use serde::{Deserialize, Serialize};

/// Definition of a tool as advertised to the calling agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

impl ToolDefinition {
    /// Field names listed under the schema's `required` key.
    pub fn required_fields(&self) -> Vec<&str> {
        self.input_schema["required"]
            .as_array()
            .map(|fields| fields.iter().filter_map(|f| f.as_str()).collect())
            .unwrap_or_default()
    }
}

/// A closed set of variants with stable wire names.
pub trait NamedVariant: Sized + Copy + 'static {
    /// Every variant, in the order they are advertised.
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;

    fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == s)
    }

    fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|v| v.as_str()).collect()
    }
}
