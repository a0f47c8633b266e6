//! Flowview Error Types with Error Codes
//!
//! Error code ranges:
//! - FLOW-000-009: Workflow input errors (parse, file, item validation)
//! - FLOW-010-019: Graph operation errors
//! - FLOW-020-029: Graph invariant violations
//! - FLOW-030-039: Config errors
//! - FLOW-090-099: IO/serde conversions

use miette::Diagnostic;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FlowViewError>;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

/// All error variants are part of the public API.
///
/// Implements both `thiserror::Error` for std error compatibility
/// and `miette::Diagnostic` for fancy terminal error display.
#[derive(Error, Debug, Diagnostic)]
pub enum FlowViewError {
    // ═══════════════════════════════════════════
    // WORKFLOW INPUT ERRORS (000-009)
    // ═══════════════════════════════════════════
    #[error("[FLOW-001] Failed to parse workflow: {details}")]
    #[diagnostic(
        code(flowview::parse_error),
        help("Check the file is a list of {{id, parent}} items")
    )]
    ParseError { details: String },

    #[error("[FLOW-002] Workflow file not found: {path}")]
    #[diagnostic(code(flowview::workflow_not_found), help("Check the file path exists"))]
    WorkflowNotFound { path: String },

    #[error("[FLOW-003] Invalid workflow item at position {index}: {reason}")]
    #[diagnostic(
        code(flowview::invalid_item),
        help("Every item needs a non-empty id and a parent id or \"#\"")
    )]
    InvalidItem { index: usize, reason: String },

    #[error("[FLOW-004] Unsupported workflow format: {extension}")]
    #[diagnostic(
        code(flowview::unsupported_format),
        help("Use a .yaml, .yml or .json workflow file")
    )]
    UnsupportedFormat { extension: String },

    // ═══════════════════════════════════════════
    // GRAPH OPERATION ERRORS (010-019)
    // ═══════════════════════════════════════════
    #[error("[FLOW-010] Unknown node '{id}': not visible and not in the loaded workflow")]
    #[diagnostic(
        code(flowview::unknown_node),
        help("Load the fragment that defines this step before toggling it")
    )]
    UnknownNode { id: String },

    // ═══════════════════════════════════════════
    // GRAPH INVARIANT VIOLATIONS (020-029)
    // ═══════════════════════════════════════════
    #[error("[FLOW-020] Dangling link after mutation: '{child}' references hidden parent '{parent}'")]
    #[diagnostic(
        code(flowview::dangling_link),
        help("This is an engine bug; please report the operation sequence that produced it")
    )]
    DanglingLink { child: String, parent: String },

    // ═══════════════════════════════════════════
    // CONFIG ERRORS (030-039)
    // ═══════════════════════════════════════════
    #[error("[FLOW-030] Config error: {reason}")]
    #[diagnostic(
        code(flowview::config_error),
        help("Check ~/.config/flowview/config.toml for syntax errors")
    )]
    ConfigError { reason: String },

    // ═══════════════════════════════════════════
    // IO / SERDE ERRORS (090-099)
    // ═══════════════════════════════════════════
    #[error("[FLOW-090] IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("[FLOW-091] JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("[FLOW-092] YAML parse error: {0}")]
    #[diagnostic(
        code(flowview::yaml_parse),
        help("Check YAML syntax: indentation must be consistent")
    )]
    YamlParse(#[from] serde_yaml::Error),
}

impl FlowViewError {
    /// Get the error code (e.g., "FLOW-001")
    pub fn code(&self) -> &'static str {
        match self {
            Self::ParseError { .. } => "FLOW-001",
            Self::WorkflowNotFound { .. } => "FLOW-002",
            Self::InvalidItem { .. } => "FLOW-003",
            Self::UnsupportedFormat { .. } => "FLOW-004",
            Self::UnknownNode { .. } => "FLOW-010",
            Self::DanglingLink { .. } => "FLOW-020",
            Self::ConfigError { .. } => "FLOW-030",
            Self::IoError(_) => "FLOW-090",
            Self::JsonError(_) => "FLOW-091",
            Self::YamlParse(_) => "FLOW-092",
        }
    }
}

impl FixSuggestion for FlowViewError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            FlowViewError::ParseError { .. } => {
                Some("Check the file is a list of {id, parent} items")
            }
            FlowViewError::WorkflowNotFound { .. } => Some("Check the file path exists"),
            FlowViewError::InvalidItem { .. } => {
                Some("Every item needs a non-empty id and a parent id or \"#\"")
            }
            FlowViewError::UnsupportedFormat { .. } => {
                Some("Use a .yaml, .yml or .json workflow file")
            }
            FlowViewError::UnknownNode { .. } => {
                Some("Load the fragment that defines this step before toggling it")
            }
            FlowViewError::DanglingLink { .. } => {
                Some("Engine invariant bug; report the operation sequence")
            }
            FlowViewError::ConfigError { .. } => {
                Some("Check ~/.config/flowview/config.toml for syntax errors")
            }
            FlowViewError::IoError(_) => Some("Check file path and permissions"),
            FlowViewError::JsonError(_) => Some("Check JSON syntax"),
            FlowViewError::YamlParse(_) => Some("Check YAML syntax: indentation and quoting"),
        }
    }
}
