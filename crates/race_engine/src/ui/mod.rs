//! On-screen text elements
//!
//! The engine keeps text state only; a renderer (or the headless log output)
//! reads it back each frame.

use crate::ecs::Color;
use std::collections::BTreeMap;

/// Identifier for a UI node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UiNodeId(pub u64);

/// Anchor point for UI positioning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Top-left corner
    TopLeft,
    /// Top-right corner
    TopRight,
    /// Center of screen
    Center,
}

/// UI text label
#[derive(Debug, Clone, PartialEq)]
pub struct UiText {
    /// Text content to display
    pub text: String,
    /// Offset from the anchor in normalized screen units
    pub position: (f32, f32),
    /// Anchor point for positioning
    pub anchor: Anchor,
    /// Relative text scale
    pub scale: f32,
    /// Text color
    pub color: Color,
    /// Whether this element is visible
    pub visible: bool,
}

impl UiText {
    /// Create a white label at the given anchor
    pub fn new(text: impl Into<String>, anchor: Anchor, position: (f32, f32)) -> Self {
        Self {
            text: text.into(),
            position,
            anchor,
            scale: 1.0,
            color: Color::rgb(1.0, 1.0, 1.0),
            visible: true,
        }
    }

    /// Set the text scale
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Set the text color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

/// Central UI management system
pub struct UiManager {
    nodes: BTreeMap<UiNodeId, UiText>,
    next_id: u64,
}

impl UiManager {
    /// Create a new UI manager
    pub fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
            next_id: 0,
        }
    }

    /// Add text to the UI
    pub fn add_text(&mut self, text: UiText) -> UiNodeId {
        let id = UiNodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, text);
        id
    }

    /// Replace the string shown by a text node
    ///
    /// Returns `false` if the node does not exist.
    pub fn set_text(&mut self, id: UiNodeId, text: impl Into<String>) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.text = text.into();
                true
            }
            None => false,
        }
    }

    /// Get a text node
    pub fn get_text(&self, id: UiNodeId) -> Option<&UiText> {
        self.nodes.get(&id)
    }

    /// Remove a node
    pub fn remove(&mut self, id: UiNodeId) -> Option<UiText> {
        self.nodes.remove(&id)
    }

    /// Visible text nodes in creation order
    pub fn visible_texts(&self) -> impl Iterator<Item = &UiText> {
        self.nodes.values().filter(|node| node.visible)
    }

    /// Remove all nodes
    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}

impl Default for UiManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_update_text() {
        let mut ui = UiManager::new();
        let id = ui.add_text(UiText::new("You: 0", Anchor::TopLeft, (0.03, 0.05)));
        assert!(ui.set_text(id, "You: 3"));
        assert_eq!(ui.get_text(id).map(|t| t.text.as_str()), Some("You: 3"));

        ui.remove(id);
        assert!(!ui.set_text(id, "You: 4"));
    }

    #[test]
    fn test_visible_texts_in_creation_order() {
        let mut ui = UiManager::new();
        ui.add_text(UiText::new("first", Anchor::TopLeft, (0.0, 0.0)));
        let hidden = ui.add_text(UiText::new("hidden", Anchor::Center, (0.0, 0.0)));
        ui.add_text(UiText::new("last", Anchor::TopRight, (0.0, 0.0)));
        if let Some(node) = ui.nodes.get_mut(&hidden) {
            node.visible = false;
        }

        let texts: Vec<_> = ui.visible_texts().map(|t| t.text.clone()).collect();
        assert_eq!(texts, vec!["first".to_string(), "last".to_string()]);
    }
}
