//! Renderer module
//!
//! Renders ResultSet to the structured output formats: jsonl, json, md, raw

use crate::core::model::{Kind, ResultItem, ResultSet};
use std::io::Write;

/// Structured output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Jsonl,
    Json,
    Markdown,
    Raw,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            "raw" => Ok(OutputFormat::Raw),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl RenderConfig {
    /// Create a new render config with default options
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            pretty: false,
        }
    }

    /// Create a new render config with pretty option
    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }
}

/// Renderer for result sets
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    #[allow(dead_code)]
    pub fn new(format: OutputFormat) -> Self {
        Self {
            config: RenderConfig::new(format),
        }
    }

    /// Create a new renderer with render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render a result set to a string
    pub fn render(&self, result_set: &ResultSet) -> String {
        match self.config.format {
            OutputFormat::Jsonl => self.render_jsonl(result_set),
            OutputFormat::Json => self.render_json(result_set),
            OutputFormat::Markdown => self.render_markdown(result_set),
            OutputFormat::Raw => self.render_raw(result_set),
        }
    }

    /// Render to a writer, followed by a newline
    pub fn render_to<W: Write>(&self, result_set: &ResultSet, mut writer: W) -> std::io::Result<()> {
        let output = self.render(result_set);
        writeln!(writer, "{}", output)
    }

    /// Render as JSON Lines (one JSON object per line)
    fn render_jsonl(&self, result_set: &ResultSet) -> String {
        result_set
            .items
            .iter()
            .filter_map(|item| {
                if self.config.pretty {
                    serde_json::to_string_pretty(item).ok()
                } else {
                    serde_json::to_string(item).ok()
                }
            })
            .collect::<Vec<_>>()
            .join(if self.config.pretty { "\n\n" } else { "\n" })
    }

    /// Render as a single JSON array
    fn render_json(&self, result_set: &ResultSet) -> String {
        if self.config.pretty {
            serde_json::to_string_pretty(&result_set.items).unwrap_or_else(|_| "[]".to_string())
        } else {
            serde_json::to_string(&result_set.items).unwrap_or_else(|_| "[]".to_string())
        }
    }

    /// Render as Markdown
    fn render_markdown(&self, result_set: &ResultSet) -> String {
        let mut output = String::new();

        // Group by kind
        let mut summaries = Vec::new();
        let mut files = Vec::new();
        let mut matches = Vec::new();
        let mut errors = Vec::new();

        for item in &result_set.items {
            match item.kind {
                Kind::Summary => summaries.push(item),
                Kind::File => files.push(item),
                Kind::Match => matches.push(item),
                Kind::Error => errors.push(item),
            }
        }

        if !summaries.is_empty() {
            output.push_str("## Summary\n\n");
            for item in summaries {
                render_data_md(&mut output, item);
            }
            output.push('\n');
        }

        if !errors.is_empty() {
            output.push_str("## Errors\n\n");
            for item in errors {
                for error in &item.errors {
                    output.push_str(&format!("- **{}**: {}\n", error.code, error.message));
                }
            }
            output.push('\n');
        }

        if !files.is_empty() {
            output.push_str("## Files\n\n");
            for item in files {
                if let Some(path) = &item.path {
                    output.push_str(&format!("- `{}`", path));
                    if let Some(count) = item.count {
                        output.push_str(&format!(" ({} occurrences)", count));
                    }
                    output.push('\n');
                    if item.data.is_some() {
                        render_data_md(&mut output, item);
                    }
                }
            }
            output.push('\n');
        }

        if !matches.is_empty() {
            output.push_str("## Matches\n\n");
            let mut current: Option<&str> = None;
            for item in matches {
                let path = item.path.as_deref();
                if path != current {
                    if current.is_some() {
                        output.push_str("```\n\n");
                    }
                    output.push_str(&format!("### `{}`\n\n```\n", path.unwrap_or("?")));
                    current = path;
                }
                if let Some(excerpt) = &item.excerpt {
                    if let Some(line) = item.line {
                        output.push_str(&format!("line {:>7}: ", line));
                    }
                    output.push_str(excerpt);
                    output.push('\n');
                }
            }
            output.push_str("```\n");
        }

        output
    }

    /// Render as raw output: excerpts only, one per line
    fn render_raw(&self, result_set: &ResultSet) -> String {
        result_set
            .items
            .iter()
            .filter_map(|item| item.excerpt.clone())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Write the fields of a data payload as a Markdown list
fn render_data_md(output: &mut String, item: &ResultItem) {
    let Some(serde_json::Value::Object(fields)) = &item.data else {
        return;
    };

    for (key, value) in fields {
        let value = match value {
            serde_json::Value::String(s) => format!("`{}`", s),
            other => other.to_string(),
        };
        output.push_str(&format!("- **{}**: {}\n", key, value));
    }
}
