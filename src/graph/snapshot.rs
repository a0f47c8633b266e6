//! GraphSnapshot - read-only output for the rendering collaborator
//!
//! A snapshot is taken at the moment a mutation finishes and owns its data,
//! so later render ticks never observe a half-applied change. The renderer
//! keeps its own position/velocity state per node id; the snapshot never
//! carries any.

use std::sync::Arc;

use colored::Colorize;
use serde::Serialize;

use crate::error::Result;

use super::model::{GraphModel, Link};

/// One visible node as handed to the renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeView {
    pub id: Arc<str>,
    /// Display label
    pub text: Arc<str>,
    /// Renderers typically badge pinned nodes
    pub pinned_open: bool,
}

/// Visible nodes in stable order plus index links between them
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<NodeView>,
    /// `source` indexes the parent, `target` the child
    pub links: Vec<Link>,
}

impl GraphSnapshot {
    /// Capture the current visible state of a model
    pub(crate) fn capture(model: &GraphModel) -> Self {
        let nodes = model
            .visible_ids()
            .iter()
            .filter_map(|id| model.node(id))
            .map(|node| NodeView {
                id: Arc::clone(&node.id),
                text: Arc::clone(&node.text),
                pinned_open: node.pinned_open,
            })
            .collect();

        Self {
            nodes,
            links: model.links().to_vec(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Serialize for a JSON-consuming renderer
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Human-readable rendering for the terminal
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!(
            "{} ({} nodes, {} links)\n",
            "Visible graph".cyan().bold(),
            self.nodes.len(),
            self.links.len()
        ));

        for (index, node) in self.nodes.iter().enumerate() {
            let pin = if node.pinned_open {
                " [pinned]".yellow().to_string()
            } else {
                String::new()
            };
            out.push_str(&format!("  {:>3}  {}{}\n", index, node.text, pin));
        }

        if !self.links.is_empty() {
            out.push_str(&format!("{}\n", "Links".cyan().bold()));
            for link in &self.links {
                out.push_str(&format!(
                    "  {} -> {}\n",
                    self.nodes[link.source].id, self.nodes[link.target].id
                ));
            }
        }

        out
    }
}
