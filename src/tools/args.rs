//! Per-tool argument validation.
//!
//! Arguments arrive as an untyped JSON bag. Each tool parses it into a typed
//! struct up front, so a missing or mistyped field fails before any prompt is
//! built or any request leaves the process. `null` counts as absent, and empty
//! strings in optional text fields count as absent too.

use super::registry::ToolName;
use super::traits::NamedVariant;
use crate::error::ValidationError;
use serde_json::{Map, Value};

pub const DEFAULT_SUMMARY_LENGTH: u32 = 150;

// ---------------------------------------------------------------------------
// Enumerated argument values
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryStyle {
    Brief,
    Detailed,
    BulletPoints,
    Executive,
}

impl NamedVariant for SummaryStyle {
    const ALL: &'static [Self] = &[
        Self::Brief,
        Self::Detailed,
        Self::BulletPoints,
        Self::Executive,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Brief => "brief",
            Self::Detailed => "detailed",
            Self::BulletPoints => "bullet_points",
            Self::Executive => "executive",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractFormat {
    Json,
    Yaml,
    MarkdownTable,
}

impl NamedVariant for ExtractFormat {
    const ALL: &'static [Self] = &[Self::Json, Self::Yaml, Self::MarkdownTable];

    fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::MarkdownTable => "markdown_table",
        }
    }
}

// ---------------------------------------------------------------------------
// Reader
// ---------------------------------------------------------------------------

/// Typed accessors over one tool's argument bag.
pub struct ArgReader<'a> {
    tool: &'static str,
    map: Option<&'a Map<String, Value>>,
}

impl<'a> ArgReader<'a> {
    pub fn new(tool: ToolName, args: &'a Value) -> Result<Self, ValidationError> {
        let tool = tool.as_str();
        match args {
            Value::Null => Ok(Self { tool, map: None }),
            Value::Object(map) => Ok(Self {
                tool,
                map: Some(map),
            }),
            _ => Err(ValidationError::NotAnObject { tool }),
        }
    }

    fn get(&self, field: &str) -> Option<&'a Value> {
        self.map
            .and_then(|m| m.get(field))
            .filter(|v| !v.is_null())
    }

    fn wrong_type(&self, field: &'static str, expected: &'static str) -> ValidationError {
        ValidationError::WrongType {
            tool: self.tool,
            field,
            expected,
        }
    }

    fn missing(&self, field: &'static str) -> ValidationError {
        ValidationError::Missing {
            tool: self.tool,
            field,
        }
    }

    pub fn required_str(&self, field: &'static str) -> Result<String, ValidationError> {
        let value = self.get(field).ok_or_else(|| self.missing(field))?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| self.wrong_type(field, "a string"))
    }

    pub fn optional_str(&self, field: &'static str) -> Result<Option<String>, ValidationError> {
        match self.get(field) {
            None => Ok(None),
            Some(Value::String(s)) if s.is_empty() => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(self.wrong_type(field, "a string")),
        }
    }

    pub fn required_str_list(&self, field: &'static str) -> Result<Vec<String>, ValidationError> {
        let value = self.get(field).ok_or_else(|| self.missing(field))?;
        let items = value
            .as_array()
            .ok_or_else(|| self.wrong_type(field, "an array of strings"))?;
        items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| self.wrong_type(field, "an array of strings"))
            })
            .collect()
    }

    pub fn optional_bool(&self, field: &'static str) -> Result<Option<bool>, ValidationError> {
        match self.get(field) {
            None => Ok(None),
            Some(v) => v
                .as_bool()
                .map(Some)
                .ok_or_else(|| self.wrong_type(field, "a boolean")),
        }
    }

    /// A non-negative whole number. `100.0` is accepted, `100.5` is not.
    pub fn optional_uint(&self, field: &'static str) -> Result<Option<u32>, ValidationError> {
        const EXPECTED: &str = "a non-negative integer";
        let Some(v) = self.get(field) else {
            return Ok(None);
        };
        let n = v
            .as_u64()
            .or_else(|| {
                v.as_f64()
                    .filter(|f| *f >= 0.0 && f.fract() == 0.0)
                    .map(|f| f as u64)
            })
            .ok_or_else(|| self.wrong_type(field, EXPECTED))?;
        u32::try_from(n)
            .map(Some)
            .map_err(|_| self.wrong_type(field, EXPECTED))
    }

    pub fn optional_number(&self, field: &'static str) -> Result<Option<f64>, ValidationError> {
        match self.get(field) {
            None => Ok(None),
            Some(v) => v
                .as_f64()
                .map(Some)
                .ok_or_else(|| self.wrong_type(field, "a number")),
        }
    }

    pub fn optional_choice<T: NamedVariant>(
        &self,
        field: &'static str,
    ) -> Result<Option<T>, ValidationError> {
        let Some(raw) = self.optional_str(field)? else {
            return Ok(None);
        };
        T::parse(&raw)
            .map(Some)
            .ok_or_else(|| ValidationError::UnknownVariant {
                tool: self.tool,
                field,
                value: raw,
                allowed: T::names().join(", "),
            })
    }
}

// ---------------------------------------------------------------------------
// Typed argument structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SummarizeArgs {
    pub text: String,
    pub style: SummaryStyle,
    pub max_length: u32,
    pub focus: Option<String>,
}

impl SummarizeArgs {
    pub fn parse(args: &Value) -> Result<Self, ValidationError> {
        let r = ArgReader::new(ToolName::Summarize, args)?;
        let max_length = r
            .optional_uint("max_length")?
            .unwrap_or(DEFAULT_SUMMARY_LENGTH);
        if max_length == 0 {
            return Err(r.wrong_type("max_length", "a positive integer"));
        }
        Ok(Self {
            text: r.required_str("text")?,
            style: r.optional_choice("style")?.unwrap_or(SummaryStyle::Brief),
            max_length,
            focus: r.optional_str("focus")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DraftArgs {
    pub task: String,
    pub context: String,
    pub format: Option<String>,
    pub tone: Option<String>,
}

impl DraftArgs {
    pub fn parse(args: &Value) -> Result<Self, ValidationError> {
        let r = ArgReader::new(ToolName::Draft, args)?;
        Ok(Self {
            task: r.required_str("task")?,
            context: r.required_str("context")?,
            format: r.optional_str("format")?,
            tone: r.optional_str("tone")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassifyArgs {
    pub text: String,
    pub categories: Vec<String>,
    pub allow_multiple: bool,
    pub explain: bool,
}

impl ClassifyArgs {
    pub fn parse(args: &Value) -> Result<Self, ValidationError> {
        let r = ArgReader::new(ToolName::Classify, args)?;
        Ok(Self {
            text: r.required_str("text")?,
            categories: r.required_str_list("categories")?,
            allow_multiple: r.optional_bool("allow_multiple")?.unwrap_or(false),
            explain: r.optional_bool("explain")?.unwrap_or(false),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractArgs {
    pub text: String,
    pub fields: Vec<String>,
    pub output_format: ExtractFormat,
}

impl ExtractArgs {
    pub fn parse(args: &Value) -> Result<Self, ValidationError> {
        let r = ArgReader::new(ToolName::Extract, args)?;
        Ok(Self {
            text: r.required_str("text")?,
            fields: r.required_str_list("fields")?,
            output_format: r
                .optional_choice("output_format")?
                .unwrap_or(ExtractFormat::Json),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransformArgs {
    pub text: String,
    pub instruction: String,
}

impl TransformArgs {
    pub fn parse(args: &Value) -> Result<Self, ValidationError> {
        let r = ArgReader::new(ToolName::Transform, args)?;
        Ok(Self {
            text: r.required_str("text")?,
            instruction: r.required_str("instruction")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompleteArgs {
    pub prompt: String,
    pub system: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f64>,
}

impl CompleteArgs {
    pub fn parse(args: &Value) -> Result<Self, ValidationError> {
        let r = ArgReader::new(ToolName::Complete, args)?;
        Ok(Self {
            prompt: r.required_str("prompt")?,
            system: r.optional_str("system")?,
            max_tokens: r.optional_uint("max_tokens")?,
            temperature: r.optional_number("temperature")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn summarize_defaults() {
        let args = SummarizeArgs::parse(&json!({ "text": "hello" })).unwrap();
        assert_eq!(args.style, SummaryStyle::Brief);
        assert_eq!(args.max_length, 150);
        assert_eq!(args.focus, None);
    }

    #[test]
    fn null_and_empty_optionals_are_absent() {
        let args = SummarizeArgs::parse(&json!({
            "text": "hello",
            "style": null,
            "max_length": null,
            "focus": ""
        }))
        .unwrap();
        assert_eq!(args.style, SummaryStyle::Brief);
        assert_eq!(args.max_length, 150);
        assert_eq!(args.focus, None);
    }

    #[test]
    fn whole_float_lengths_are_accepted() {
        let args = SummarizeArgs::parse(&json!({ "text": "t", "max_length": 100.0 })).unwrap();
        assert_eq!(args.max_length, 100);

        let err = SummarizeArgs::parse(&json!({ "text": "t", "max_length": 12.5 })).unwrap_err();
        assert!(matches!(err, ValidationError::WrongType { field: "max_length", .. }));
    }

    #[test]
    fn zero_summary_length_is_rejected() {
        let err = SummarizeArgs::parse(&json!({ "text": "t", "max_length": 0 })).unwrap_err();
        assert_eq!(
            err.to_string(),
            "local_summarize: argument 'max_length' must be a positive integer"
        );
    }

    #[test]
    fn unknown_style_lists_allowed_values() {
        let err = SummarizeArgs::parse(&json!({ "text": "t", "style": "haiku" })).unwrap_err();
        assert_eq!(
            err.to_string(),
            "local_summarize: argument 'style' has unsupported value 'haiku' \
             (expected one of: brief, detailed, bullet_points, executive)"
        );
    }

    #[test]
    fn missing_required_field() {
        let err = DraftArgs::parse(&json!({ "task": "email" })).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Missing {
                tool: "local_draft",
                field: "context"
            }
        );
    }

    #[test]
    fn category_list_must_hold_strings() {
        let err = ClassifyArgs::parse(&json!({ "text": "t", "categories": ["a", 2] })).unwrap_err();
        assert_eq!(
            err.to_string(),
            "local_classify: argument 'categories' must be an array of strings"
        );

        let err = ClassifyArgs::parse(&json!({ "text": "t", "categories": "a,b" })).unwrap_err();
        assert!(matches!(err, ValidationError::WrongType { field: "categories", .. }));
    }

    #[test]
    fn classify_flags_default_false() {
        let args = ClassifyArgs::parse(&json!({ "text": "t", "categories": ["a"] })).unwrap();
        assert!(!args.allow_multiple);
        assert!(!args.explain);

        let err = ClassifyArgs::parse(&json!({ "text": "t", "categories": ["a"], "explain": "yes" }))
            .unwrap_err();
        assert!(matches!(err, ValidationError::WrongType { field: "explain", .. }));
    }

    #[test]
    fn extract_format_parses() {
        let args = ExtractArgs::parse(&json!({
            "text": "t",
            "fields": ["name"],
            "output_format": "markdown_table"
        }))
        .unwrap();
        assert_eq!(args.output_format, ExtractFormat::MarkdownTable);
    }

    #[test]
    fn complete_keeps_explicit_zero_temperature() {
        let args = CompleteArgs::parse(&json!({ "prompt": "hi", "temperature": 0 })).unwrap();
        assert_eq!(args.temperature, Some(0.0));
        assert_eq!(args.max_tokens, None);
    }

    #[test]
    fn null_bag_is_empty_and_scalars_are_rejected() {
        let err = TransformArgs::parse(&Value::Null).unwrap_err();
        assert!(matches!(err, ValidationError::Missing { field: "text", .. }));

        let err = TransformArgs::parse(&json!("text")).unwrap_err();
        assert_eq!(err, ValidationError::NotAnObject { tool: "local_transform" });
    }

    #[test]
    fn variant_names_parse_back() {
        for style in SummaryStyle::ALL {
            assert_eq!(SummaryStyle::parse(style.as_str()), Some(*style));
        }
        for format in ExtractFormat::ALL {
            assert_eq!(ExtractFormat::parse(format.as_str()), Some(*format));
        }
    }
}
