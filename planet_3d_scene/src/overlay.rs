//! Page overlay state driven by the scene.
//!
//! The host page owns the real navigation bar, title and menu. This module
//! only holds the values the entrance timeline animates and the menu flag,
//! which the host mirrors onto its own elements.

use crate::error::Result;
use crate::engine_bail;

pub const NAV: &str = "nav";
pub const TITLE: &str = "title";

/// Index of an element inside its `Overlay`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayElementId(usize);

/// Animated properties of one overlay element
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayElement {
    name: String,
    /// Vertical offset in percent of the element's own height
    offset_y_percent: f32,
    opacity: f32,
}

impl OverlayElement {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn offset_y_percent(&self) -> f32 {
        self.offset_y_percent
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }
}

/// Shared `active` flag of the navigation toggle and the menu it collapses.
///
/// Both elements carry the class at the same time, so one flag describes both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuToggle {
    active: bool,
}

impl MenuToggle {
    /// Flip the flag and return the new value
    pub fn toggle(&mut self) -> bool {
        self.active = !self.active;
        self.active
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Class list the host applies to the toggle and the menu
    pub fn class_name(&self) -> &'static str {
        if self.active { "active" } else { "" }
    }
}

/// Overlay elements plus the menu toggle
#[derive(Debug, Clone)]
pub struct Overlay {
    elements: Vec<OverlayElement>,
    menu: MenuToggle,
}

impl Overlay {
    /// `nav` and `title` at rest (no offset, fully opaque), menu closed
    pub fn new() -> Self {
        let mut overlay = Self { elements: Vec::new(), menu: MenuToggle::default() };
        overlay.add_element(NAV);
        overlay.add_element(TITLE);
        overlay
    }

    /// Register an element, or return the existing one with that name
    pub fn add_element(&mut self, name: &str) -> OverlayElementId {
        if let Some(id) = self.find(name) {
            return id;
        }
        self.elements.push(OverlayElement {
            name: name.to_string(),
            offset_y_percent: 0.0,
            opacity: 1.0,
        });
        OverlayElementId(self.elements.len() - 1)
    }

    pub fn find(&self, name: &str) -> Option<OverlayElementId> {
        self.elements.iter().position(|e| e.name == name).map(OverlayElementId)
    }

    pub fn element(&self, id: OverlayElementId) -> Option<&OverlayElement> {
        self.elements.get(id.0)
    }

    pub fn element_by_name(&self, name: &str) -> Option<&OverlayElement> {
        self.find(name).and_then(|id| self.element(id))
    }

    pub fn elements(&self) -> &[OverlayElement] {
        &self.elements
    }

    pub fn set_offset_y(&mut self, id: OverlayElementId, percent: f32) -> Result<()> {
        self.element_mut(id)?.offset_y_percent = percent;
        Ok(())
    }

    /// Opacity is clamped to [0, 1]
    pub fn set_opacity(&mut self, id: OverlayElementId, opacity: f32) -> Result<()> {
        self.element_mut(id)?.opacity = opacity.clamp(0.0, 1.0);
        Ok(())
    }

    pub fn menu(&self) -> &MenuToggle {
        &self.menu
    }

    pub fn menu_mut(&mut self) -> &mut MenuToggle {
        &mut self.menu
    }

    fn element_mut(&mut self, id: OverlayElementId) -> Result<&mut OverlayElement> {
        match self.elements.get_mut(id.0) {
            Some(element) => Ok(element),
            None => engine_bail!(InvalidResource; "planet3d::Overlay",
                "Unknown overlay element id {}", id.0),
        }
    }
}

impl Default for Overlay {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "overlay_tests.rs"]
mod tests;
