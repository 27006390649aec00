//! The static tool catalog advertised via `tools/list`.

use super::args::{ExtractFormat, SummaryStyle, DEFAULT_SUMMARY_LENGTH};
use super::traits::{NamedVariant, ToolDefinition};
use crate::config::LlmConfig;
use serde_json::json;

/// Every tool this server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    Summarize,
    Draft,
    Classify,
    Extract,
    Transform,
    Complete,
    Status,
}

impl NamedVariant for ToolName {
    const ALL: &'static [Self] = &[
        Self::Summarize,
        Self::Draft,
        Self::Classify,
        Self::Extract,
        Self::Transform,
        Self::Complete,
        Self::Status,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Summarize => "local_summarize",
            Self::Draft => "local_draft",
            Self::Classify => "local_classify",
            Self::Extract => "local_extract",
            Self::Transform => "local_transform",
            Self::Complete => "local_complete",
            Self::Status => "local_status",
        }
    }
}

impl ToolName {
    /// Text returned when the backend answers without any content.
    pub fn fallback_text(self) -> Option<&'static str> {
        match self {
            Self::Summarize => Some("Summary generation failed"),
            Self::Draft => Some("Draft generation failed"),
            Self::Classify => Some("Classification failed"),
            Self::Extract => Some("Extraction failed"),
            Self::Transform => Some("Transformation failed"),
            Self::Complete => Some("Completion failed"),
            Self::Status => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tool definitions
// ---------------------------------------------------------------------------

/// Build the list of tool definitions exposed to the calling agent.
pub fn tool_definitions(config: &LlmConfig) -> Vec<ToolDefinition> {
    ToolName::ALL
        .iter()
        .map(|tool| definition(*tool, config))
        .collect()
}

fn definition(tool: ToolName, config: &LlmConfig) -> ToolDefinition {
    let (description, input_schema) = match tool {
        ToolName::Summarize => (
            "Summarize text using a local LLM. Use for long documents, research notes, or any content that needs condensing.\n\n\
             DELEGATION GUIDANCE: Use this when you need to summarize content that doesn't require your full reasoning - bulk file summarization, extracting key points from research, condensing meeting notes.",
            json!({
                "type": "object",
                "properties": {
                    "text": {
                        "type": "string",
                        "description": "The text to summarize"
                    },
                    "style": {
                        "type": "string",
                        "enum": SummaryStyle::names(),
                        "description": "Summary style (default: brief)"
                    },
                    "max_length": {
                        "type": "number",
                        "description": format!("Approximate max words for summary (default: {})", DEFAULT_SUMMARY_LENGTH)
                    },
                    "focus": {
                        "type": "string",
                        "description": "Optional focus area - what aspects to emphasize"
                    }
                },
                "required": ["text"]
            }),
        ),
        ToolName::Draft => (
            "Generate an initial draft using a local LLM that you can then refine.\n\n\
             DELEGATION GUIDANCE: Use this for boilerplate content, initial drafts, template-based generation. Review and refine the output yourself - the local model does the grunt work, you do the quality control.",
            json!({
                "type": "object",
                "properties": {
                    "task": {
                        "type": "string",
                        "description": "What to draft (e.g., 'email response', 'README section', 'function docstring')"
                    },
                    "context": {
                        "type": "string",
                        "description": "Context and requirements for the draft"
                    },
                    "format": {
                        "type": "string",
                        "description": "Desired format (e.g., 'markdown', 'plain text', 'code comment')"
                    },
                    "tone": {
                        "type": "string",
                        "description": "Desired tone (e.g., 'professional', 'casual', 'technical')"
                    }
                },
                "required": ["task", "context"]
            }),
        ),
        ToolName::Classify => (
            "Classify text into categories using a local LLM.\n\n\
             DELEGATION GUIDANCE: Use for sorting, tagging, organizing content. Good for batch classification tasks where the categories are clear-cut.",
            json!({
                "type": "object",
                "properties": {
                    "text": {
                        "type": "string",
                        "description": "The text to classify"
                    },
                    "categories": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "List of possible categories"
                    },
                    "allow_multiple": {
                        "type": "boolean",
                        "description": "Allow multiple category assignments (default: false)"
                    },
                    "explain": {
                        "type": "boolean",
                        "description": "Include brief explanation for classification (default: false)"
                    }
                },
                "required": ["text", "categories"]
            }),
        ),
        ToolName::Extract => (
            "Extract structured information from text using a local LLM.\n\n\
             DELEGATION GUIDANCE: Use for parsing documents, extracting specific fields, converting unstructured text to structured data.",
            json!({
                "type": "object",
                "properties": {
                    "text": {
                        "type": "string",
                        "description": "The text to extract from"
                    },
                    "fields": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Fields to extract (e.g., ['name', 'email', 'date', 'amount'])"
                    },
                    "output_format": {
                        "type": "string",
                        "enum": ExtractFormat::names(),
                        "description": "Output format (default: json)"
                    }
                },
                "required": ["text", "fields"]
            }),
        ),
        ToolName::Transform => (
            "Transform text according to instructions using a local LLM.\n\n\
             DELEGATION GUIDANCE: Use for formatting changes, style conversions, simple rewrites. Good for mechanical transformations that don't require deep reasoning.",
            json!({
                "type": "object",
                "properties": {
                    "text": {
                        "type": "string",
                        "description": "The text to transform"
                    },
                    "instruction": {
                        "type": "string",
                        "description": "How to transform the text (e.g., 'convert to bullet points', 'make more concise', 'add markdown formatting')"
                    }
                },
                "required": ["text", "instruction"]
            }),
        ),
        ToolName::Complete => (
            "Raw completion using local LLM for maximum flexibility.\n\n\
             DELEGATION GUIDANCE: Use when other tools don't fit. You control the prompt entirely. Good for custom tasks that don't match predefined patterns.",
            json!({
                "type": "object",
                "properties": {
                    "prompt": {
                        "type": "string",
                        "description": "The prompt for the local model"
                    },
                    "system": {
                        "type": "string",
                        "description": "Optional system message to set context/behavior"
                    },
                    "max_tokens": {
                        "type": "number",
                        "description": format!("Maximum tokens to generate (default: {})", config.default_max_tokens)
                    },
                    "temperature": {
                        "type": "number",
                        "description": format!("Temperature for generation (default: {})", config.default_temperature)
                    }
                },
                "required": ["prompt"]
            }),
        ),
        ToolName::Status => (
            "Check the status of the local LLM and available models.",
            json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        ),
    };

    ToolDefinition {
        name: tool.as_str().into(),
        description: description.into(),
        input_schema,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_seven_tools_in_order() {
        let names: Vec<String> = tool_definitions(&LlmConfig::default())
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(
            names,
            [
                "local_summarize",
                "local_draft",
                "local_classify",
                "local_extract",
                "local_transform",
                "local_complete",
                "local_status",
            ]
        );
    }

    #[test]
    fn listing_is_stable() {
        let config = LlmConfig::default();
        assert_eq!(tool_definitions(&config), tool_definitions(&config));
    }

    #[test]
    fn enum_values_come_from_variants() {
        let defs = tool_definitions(&LlmConfig::default());
        let summarize = &defs[0];
        assert_eq!(
            summarize.input_schema["properties"]["style"]["enum"],
            json!(["brief", "detailed", "bullet_points", "executive"])
        );
        let extract = &defs[3];
        assert_eq!(
            extract.input_schema["properties"]["output_format"]["enum"],
            json!(["json", "yaml", "markdown_table"])
        );
    }

    #[test]
    fn complete_schema_documents_configured_defaults() {
        let config = LlmConfig {
            default_max_tokens: 512,
            default_temperature: 0.2,
            ..LlmConfig::default()
        };
        let defs = tool_definitions(&config);
        let props = &defs[5].input_schema["properties"];
        assert_eq!(
            props["max_tokens"]["description"],
            "Maximum tokens to generate (default: 512)"
        );
        assert_eq!(
            props["temperature"]["description"],
            "Temperature for generation (default: 0.2)"
        );
    }

    #[test]
    fn definition_serializes_with_input_schema_key() {
        let defs = tool_definitions(&LlmConfig::default());
        let value = serde_json::to_value(&defs[6]).unwrap();
        assert_eq!(value["name"], "local_status");
        assert_eq!(value["inputSchema"]["type"], "object");
        assert!(value.get("input_schema").is_none());
    }

    #[test]
    fn only_status_lacks_a_fallback() {
        for tool in ToolName::ALL {
            assert_eq!(tool.fallback_text().is_none(), *tool == ToolName::Status);
        }
    }
}
