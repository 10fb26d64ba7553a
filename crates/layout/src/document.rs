//! Serialized form of a layout tree.
//!
//! Documents are plain JSON. A [`NodeTemplate`] doubles as the unit of
//! template instantiation: grafting a template under a parent always assigns
//! fresh uids, loading a document keeps the stored ones.

use crate::{LayoutError, LayoutTree, NodeId, NodeUid, UiNode};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use theme::ColorRole;

/// A whole layout: the root canvas and its subtrees.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutDocument {
    /// Root canvas size in layout units.
    pub root_size: Vec2,
    #[serde(default = "default_scale")]
    pub scale_factor: f32,
    #[serde(default)]
    pub nodes: Vec<NodeTemplate>,
}

/// One node and its children.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<NodeUid>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub anchor_min: Vec2,
    #[serde(default)]
    pub anchor_max: Vec2,
    #[serde(default)]
    pub anchored_position: Vec2,
    #[serde(default)]
    pub size_delta: Vec2,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<ColorRole>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeTemplate>,
}

fn default_scale() -> f32 {
    1.0
}

fn default_active() -> bool {
    true
}

impl LayoutDocument {
    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, LayoutError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl NodeTemplate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            uid: None,
            name: name.into(),
            anchor_min: Vec2::ZERO,
            anchor_max: Vec2::ZERO,
            anchored_position: Vec2::ZERO,
            size_delta: Vec2::ZERO,
            active: true,
            fill: None,
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: NodeTemplate) -> Self {
        self.children.push(child);
        self
    }

    fn to_node(&self, keep_uid: bool) -> UiNode {
        let mut node = UiNode::new(self.name.clone())
            .with_anchors(self.anchor_min, self.anchor_max)
            .with_anchored_position(self.anchored_position)
            .with_size_delta(self.size_delta)
            .with_active(self.active);
        node.fill = self.fill;
        if let (true, Some(uid)) = (keep_uid, self.uid) {
            node.uid = uid;
        }
        node
    }

    fn from_node(tree: &LayoutTree, id: NodeId) -> Option<Self> {
        let node = tree.get(id)?;
        Some(Self {
            uid: Some(node.uid),
            name: node.name.clone(),
            anchor_min: node.anchor_min(),
            anchor_max: node.anchor_max(),
            anchored_position: node.anchored_position(),
            size_delta: node.size_delta(),
            active: node.active,
            fill: node.fill,
            children: tree
                .children_of(id)
                .iter()
                .filter_map(|&child| Self::from_node(tree, child))
                .collect(),
        })
    }
}

impl LayoutTree {
    pub fn from_document(document: &LayoutDocument) -> Result<Self, LayoutError> {
        let mut tree = Self::new(document.root_size, document.scale_factor);
        let root = tree.root();
        for template in &document.nodes {
            tree.graft(root, template, true)?;
        }
        Ok(tree)
    }

    pub fn to_document(&self) -> LayoutDocument {
        LayoutDocument {
            root_size: self.root_size(),
            scale_factor: self.scale_factor(),
            nodes: self
                .children_of(self.root())
                .iter()
                .filter_map(|&child| NodeTemplate::from_node(self, child))
                .collect(),
        }
    }

    /// Instantiate a template under `parent` with fresh uids. Returns the
    /// handle of the template's top node.
    pub fn instantiate(
        &mut self,
        parent: NodeId,
        template: &NodeTemplate,
    ) -> Result<NodeId, LayoutError> {
        self.graft(parent, template, false)
    }

    fn graft(
        &mut self,
        parent: NodeId,
        template: &NodeTemplate,
        keep_uid: bool,
    ) -> Result<NodeId, LayoutError> {
        let id = self.insert(parent, template.to_node(keep_uid))?;
        for child in &template.children {
            self.graft(id, child, keep_uid)?;
        }
        Ok(id)
    }
}
