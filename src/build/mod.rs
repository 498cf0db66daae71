//! Conversion from HTML nodes, or directly from Markdown events, to the
//! document model.
//!
//! Both node builders map one node to at most one model value. A node that
//! can't be classified contributes nothing; it is never an error.

mod block;
mod events;
mod inline;

use crate::block::Block;
use crate::config::LimitsConfig;
use crate::inline::Inline;
use crate::node::Node;

/// Walks an HTML tree (or a Markdown event stream) and builds blocks and
/// inlines from it.
#[derive(Debug, Clone, Copy)]
pub struct Builder {
    max_depth: usize,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new(&LimitsConfig::default())
    }
}

impl Builder {
    pub fn new(limits: &LimitsConfig) -> Self {
        Self {
            max_depth: limits.max_depth,
        }
    }

    /// Builds every block it can from `nodes`, in order.
    pub fn blocks(&self, nodes: &[Node]) -> Vec<Block> {
        self.blocks_at(nodes, 0)
    }

    pub fn block(&self, node: &Node) -> Option<Block> {
        self.block_at(node, 0)
    }

    /// Builds every inline it can from `nodes`, in order.
    pub fn inlines(&self, nodes: &[Node]) -> Vec<Inline> {
        self.inlines_at(nodes, 0)
    }

    pub fn inline(&self, node: &Node) -> Option<Inline> {
        self.inline_at(node, 0)
    }

    fn within_limit(&self, node: &Node, depth: usize) -> bool {
        if depth <= self.max_depth {
            return true;
        }
        log::debug!(
            "Dropping {:?} nested {} levels deep (limit {})",
            node,
            depth,
            self.max_depth
        );
        false
    }

    fn blocks_at(&self, nodes: &[Node], depth: usize) -> Vec<Block> {
        nodes
            .iter()
            .filter_map(|node| self.block_at(node, depth))
            .collect()
    }

    fn inlines_at(&self, nodes: &[Node], depth: usize) -> Vec<Inline> {
        nodes
            .iter()
            .filter_map(|node| self.inline_at(node, depth))
            .collect()
    }
}
