//! Stage and format selection for inspecting the conversion pipeline
//!
//! A processing spec is written `<stage>-<format>`:
//!
//! | spec            | output                                   |
//! |-----------------|------------------------------------------|
//! | `token-simple`  | one token per line, `Display` form       |
//! | `token-json`    | tokens as pretty JSON                    |
//! | `ast-json`      | expression tree as pretty JSON           |
//! | `ast-yaml`      | expression tree as YAML                  |
//! | `ast-treeviz`   | expression tree drawn with box characters |
//! | `markup-text`   | normalized markup                        |
//! | `word-text`     | the word equation                        |

use crate::chem::lexer::{tokenize, Token};
use crate::chem::parser::{parse, to_treeviz_str};
use crate::chem::pipeline::Converter;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Represents the processing stage (what data to extract)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    Token,
    Ast,
    Markup,
    Word,
}

/// Represents the output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Simple,
    Json,
    Yaml,
    Treeviz,
    Text,
}

/// Represents a complete processing specification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingSpec {
    pub stage: ProcessingStage,
    pub format: OutputFormat,
}

/// Errors that can occur during processing
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    #[error("Invalid stage: {0}")]
    InvalidStage(String),
    #[error("Invalid format type: {0}")]
    InvalidFormatType(String),
    #[error("Format '{format}' is not available for the {stage} stage")]
    Unsupported { stage: String, format: String },
    #[error("File not found: {0}")]
    FileNotFound(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ProcessingStage {
    pub fn as_str(self) -> &'static str {
        match self {
            ProcessingStage::Token => "token",
            ProcessingStage::Ast => "ast",
            ProcessingStage::Markup => "markup",
            ProcessingStage::Word => "word",
        }
    }

    /// Formats that make sense for this stage
    pub fn formats(self) -> &'static [OutputFormat] {
        match self {
            ProcessingStage::Token => &[OutputFormat::Simple, OutputFormat::Json],
            ProcessingStage::Ast => &[OutputFormat::Json, OutputFormat::Yaml, OutputFormat::Treeviz],
            ProcessingStage::Markup | ProcessingStage::Word => &[OutputFormat::Text],
        }
    }
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Simple => "simple",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Treeviz => "treeviz",
            OutputFormat::Text => "text",
        }
    }
}

impl ProcessingSpec {
    /// Parse a format string like "token-simple" or "ast-treeviz"
    pub fn from_string(format_str: &str) -> Result<Self, ProcessingError> {
        let Some((stage, format)) = format_str.split_once('-') else {
            return Err(ProcessingError::InvalidFormat(format_str.to_string()));
        };

        let stage = match stage {
            "token" => ProcessingStage::Token,
            "ast" => ProcessingStage::Ast,
            "markup" => ProcessingStage::Markup,
            "word" => ProcessingStage::Word,
            other => return Err(ProcessingError::InvalidStage(other.to_string())),
        };

        let format = match format {
            "simple" => OutputFormat::Simple,
            "json" => OutputFormat::Json,
            "yaml" => OutputFormat::Yaml,
            "treeviz" => OutputFormat::Treeviz,
            "text" => OutputFormat::Text,
            other => return Err(ProcessingError::InvalidFormatType(other.to_string())),
        };

        if !stage.formats().contains(&format) {
            return Err(ProcessingError::Unsupported {
                stage: stage.as_str().to_string(),
                format: format.as_str().to_string(),
            });
        }

        Ok(ProcessingSpec { stage, format })
    }

    /// Get all available processing specifications
    pub fn available_specs() -> Vec<ProcessingSpec> {
        [
            ProcessingStage::Token,
            ProcessingStage::Ast,
            ProcessingStage::Markup,
            ProcessingStage::Word,
        ]
        .into_iter()
        .flat_map(|stage| {
            stage
                .formats()
                .iter()
                .map(move |&format| ProcessingSpec { stage, format })
        })
        .collect()
    }
}

impl std::fmt::Display for ProcessingSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.stage.as_str(), self.format.as_str())
    }
}

/// Get all available format strings
pub fn available_formats() -> Vec<String> {
    ProcessingSpec::available_specs()
        .into_iter()
        .map(|spec| spec.to_string())
        .collect()
}

/// Run markup through the pipeline up to the requested stage.
///
/// Tokens and trees are produced from the normalized markup, the same input
/// the word equation is built from.
pub fn process_source(
    source: &str,
    spec: &ProcessingSpec,
    converter: &Converter,
) -> Result<String, ProcessingError> {
    log::debug!("processing {} bytes as {}", source.len(), spec);
    let normalized = converter.normalize(source);

    match spec.stage {
        ProcessingStage::Token => format_tokens(&tokenize(&normalized), spec.format),
        ProcessingStage::Ast => {
            let tree = parse(&tokenize(&normalized));
            match spec.format {
                OutputFormat::Json => Ok(serde_json::to_string_pretty(&tree)?),
                OutputFormat::Yaml => Ok(serde_yaml::to_string(&tree)?),
                OutputFormat::Treeviz => Ok(to_treeviz_str(&tree)),
                other => Err(unsupported(spec.stage, other)),
            }
        }
        ProcessingStage::Markup => Ok(normalized),
        ProcessingStage::Word => Ok(converter.convert(source)),
    }
}

/// Process a markup file according to the given specification
pub fn process_file<P: AsRef<Path>>(
    file_path: P,
    spec: &ProcessingSpec,
    converter: &Converter,
) -> Result<String, ProcessingError> {
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(ProcessingError::FileNotFound(file_path.display().to_string()));
    }
    let content = fs::read_to_string(file_path)?;
    process_source(&content, spec, converter)
}

/// Format tokens according to the specified format
fn format_tokens(tokens: &[Token], format: OutputFormat) -> Result<String, ProcessingError> {
    match format {
        OutputFormat::Simple => {
            let mut result = String::new();
            for token in tokens {
                result.push_str(&token.to_string());
                result.push('\n');
            }
            Ok(result)
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(tokens)?),
        other => Err(unsupported(ProcessingStage::Token, other)),
    }
}

fn unsupported(stage: ProcessingStage, format: OutputFormat) -> ProcessingError {
    ProcessingError::Unsupported {
        stage: stage.as_str().to_string(),
        format: format.as_str().to_string(),
    }
}
