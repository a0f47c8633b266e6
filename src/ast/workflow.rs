//! Workflow Types - item records and fragments
//!
//! The external format is deliberately flat: a sequence of
//! `{id, parent, text?}` records, where `parent == "#"` marks a root.
//!
//! ```yaml
//! - id: samtools
//!   parent: "#"
//! - id: bcftools
//!   parent: samtools
//! ```
//!
//! Multi-parent steps are encoded as repeated ids with different parents;
//! the engine resolves those into extra-parent edges at expand time.

use serde::{Deserialize, Serialize};

use crate::error::{FlowViewError, Result};

/// Parent value marking a root item
pub const ROOT_SENTINEL: &str = "#";

/// One workflow step record as supplied by the outside world
///
/// Immutable input data; the engine copies what it needs into its own
/// arena and never hands these back out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowItem {
    /// Step identifier, unique within a fragment
    pub id: String,
    /// Id of the single structural parent, or `"#"` for a root
    pub parent: String,
    /// Display label; falls back to the id when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl WorkflowItem {
    /// Create an item with a structural parent
    pub fn new(id: impl Into<String>, parent: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent: parent.into(),
            text: None,
        }
    }

    /// Create a root item (`parent == "#"`)
    pub fn root(id: impl Into<String>) -> Self {
        Self::new(id, ROOT_SENTINEL)
    }

    /// Attach a display label
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Whether this record marks a root
    pub fn is_root(&self) -> bool {
        self.parent == ROOT_SENTINEL
    }

    /// Label shown for this step (id when no explicit label is set)
    pub fn display_text(&self) -> &str {
        self.text.as_deref().unwrap_or(&self.id)
    }
}

/// A batch of workflow items: a whole file or one drop-event payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkflowFragment {
    pub items: Vec<WorkflowItem>,
}

impl WorkflowFragment {
    /// Build a fragment from items, without validation
    pub fn new(items: Vec<WorkflowItem>) -> Self {
        Self { items }
    }

    /// Parse a fragment from YAML and validate every item
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let fragment: WorkflowFragment = serde_yaml::from_str(yaml)?;
        fragment.validate()?;
        Ok(fragment)
    }

    /// Parse a fragment from JSON and validate every item
    pub fn from_json_str(json: &str) -> Result<Self> {
        let fragment: WorkflowFragment = serde_json::from_str(json)?;
        fragment.validate()?;
        Ok(fragment)
    }

    /// Validate item records
    ///
    /// Rejects empty ids, empty parents, and self-parenting. Repeated ids
    /// are legal (multi-parent encoding); repeated identical records are
    /// tolerated and collapse to one edge downstream.
    pub fn validate(&self) -> Result<()> {
        for (index, item) in self.items.iter().enumerate() {
            if item.id.is_empty() {
                return Err(FlowViewError::InvalidItem {
                    index,
                    reason: "empty id".to_string(),
                });
            }
            if item.parent.is_empty() {
                return Err(FlowViewError::InvalidItem {
                    index,
                    reason: format!("item '{}' has an empty parent", item.id),
                });
            }
            if item.parent == item.id {
                return Err(FlowViewError::InvalidItem {
                    index,
                    reason: format!("item '{}' is its own parent", item.id),
                });
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Ids of root-marked items, in record order
    pub fn root_ids(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter(|i| i.is_root())
            .map(|i| i.id.as_str())
            .collect()
    }
}
