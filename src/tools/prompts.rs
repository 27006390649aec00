//! Prompt construction for each tool.
//!
//! Builders are pure: the same arguments and config always produce the same
//! request. Sampling temperatures are fixed per tool except for
//! `local_complete`, which honors the caller and then the configured default.

use super::args::*;
use crate::config::LlmConfig;
use crate::types::{ChatMessage, CompletionRequest};

const SUMMARIZE_TEMPERATURE: f64 = 0.3;
const DRAFT_TEMPERATURE: f64 = 0.7;
const CLASSIFY_TEMPERATURE: f64 = 0.1;
const EXTRACT_TEMPERATURE: f64 = 0.1;
const TRANSFORM_TEMPERATURE: f64 = 0.3;

const CLASSIFY_MAX_TOKENS: u32 = 50;
const CLASSIFY_EXPLAINED_MAX_TOKENS: u32 = 200;

fn request(
    config: &LlmConfig,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f64,
) -> CompletionRequest {
    CompletionRequest {
        model: config.default_model.clone(),
        messages,
        max_tokens,
        temperature,
    }
}

fn style_instruction(style: SummaryStyle, max_length: u32) -> String {
    match style {
        SummaryStyle::Brief => {
            format!("Provide a concise summary in approximately {max_length} words.")
        }
        SummaryStyle::Detailed => format!(
            "Provide a thorough summary covering all main points in approximately {max_length} words."
        ),
        SummaryStyle::BulletPoints => format!(
            "Summarize as bullet points (aim for {} key points).",
            max_length.div_ceil(20)
        ),
        SummaryStyle::Executive => format!(
            "Provide an executive summary with key takeaways and action items in approximately {max_length} words."
        ),
    }
}

fn format_instruction(format: ExtractFormat) -> &'static str {
    match format {
        ExtractFormat::Json => "Output as valid JSON object.",
        ExtractFormat::Yaml => "Output as YAML.",
        ExtractFormat::MarkdownTable => "Output as a markdown table.",
    }
}

pub fn summarize(config: &LlmConfig, args: &SummarizeArgs) -> CompletionRequest {
    let mut system = format!(
        "You are a precise summarization assistant. {}",
        style_instruction(args.style, args.max_length)
    );
    if let Some(focus) = &args.focus {
        system.push_str("\nFocus especially on: ");
        system.push_str(focus);
    }

    request(
        config,
        vec![
            ChatMessage::system(system),
            ChatMessage::user(format!("Summarize the following text:\n\n{}", args.text)),
        ],
        args.max_length
            .saturating_mul(2)
            .min(config.default_max_tokens),
        SUMMARIZE_TEMPERATURE,
    )
}

pub fn draft(config: &LlmConfig, args: &DraftArgs) -> CompletionRequest {
    let format = args
        .format
        .as_deref()
        .map(|f| format!("Format: {f}"))
        .unwrap_or_default();
    let tone = args
        .tone
        .as_deref()
        .map(|t| format!("Tone: {t}"))
        .unwrap_or_default();
    let system = format!(
        "You are a drafting assistant. Generate initial drafts that can be refined later. {format} {tone}"
    );

    request(
        config,
        vec![
            ChatMessage::system(system.trim()),
            ChatMessage::user(format!(
                "Task: {}\n\nContext:\n{}\n\nGenerate a draft:",
                args.task, args.context
            )),
        ],
        config.default_max_tokens,
        DRAFT_TEMPERATURE,
    )
}

pub fn classify(config: &LlmConfig, args: &ClassifyArgs) -> CompletionRequest {
    let multiple = if args.allow_multiple {
        "You may assign multiple categories if appropriate."
    } else {
        "Assign exactly one category."
    };
    let explain = if args.explain {
        "Provide a brief explanation for your classification."
    } else {
        "Only output the category name(s), nothing else."
    };
    let system = format!(
        "You are a classification assistant. Classify text into one of these categories: {}. {} {}",
        args.categories.join(", "),
        multiple,
        explain
    );

    request(
        config,
        vec![
            ChatMessage::system(system),
            ChatMessage::user(format!("Classify this text:\n\n{}", args.text)),
        ],
        if args.explain {
            CLASSIFY_EXPLAINED_MAX_TOKENS
        } else {
            CLASSIFY_MAX_TOKENS
        },
        CLASSIFY_TEMPERATURE,
    )
}

pub fn extract(config: &LlmConfig, args: &ExtractArgs) -> CompletionRequest {
    let system = format!(
        "You are a data extraction assistant. Extract the following fields from text: {}. {} \
         If a field is not found, use null or \"not found\".",
        args.fields.join(", "),
        format_instruction(args.output_format)
    );

    request(
        config,
        vec![
            ChatMessage::system(system),
            ChatMessage::user(format!("Extract information from this text:\n\n{}", args.text)),
        ],
        config.default_max_tokens,
        EXTRACT_TEMPERATURE,
    )
}

pub fn transform(config: &LlmConfig, args: &TransformArgs) -> CompletionRequest {
    request(
        config,
        vec![
            ChatMessage::system(
                "You are a text transformation assistant. Apply the requested transformation precisely.",
            ),
            ChatMessage::user(format!(
                "Instruction: {}\n\nText to transform:\n{}",
                args.instruction, args.text
            )),
        ],
        config.default_max_tokens,
        TRANSFORM_TEMPERATURE,
    )
}

/// Raw passthrough. A zero `max_tokens` falls back to the default; a zero
/// `temperature` is kept.
pub fn complete(config: &LlmConfig, args: &CompleteArgs) -> CompletionRequest {
    let mut messages = Vec::with_capacity(2);
    if let Some(system) = &args.system {
        messages.push(ChatMessage::system(system.as_str()));
    }
    messages.push(ChatMessage::user(args.prompt.as_str()));

    request(
        config,
        messages,
        args.max_tokens
            .filter(|n| *n > 0)
            .unwrap_or(config.default_max_tokens),
        args.temperature.unwrap_or(config.default_temperature),
    )
}
