// SPDX-License-Identifier: GPL-3.0-only

//! Navigation and theme display context
//!
//! The shell around the capture view tracks which side panel is open and
//! which theme gradient is selected. Both are consumed for display only —
//! nothing here feeds back into capture logic.

use crate::constants::gradients;
use serde::{Deserialize, Serialize};

/// Which shell panel is currently open
///
/// The panels slide over the capture view; at most one is open at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    /// Capture view front and center
    #[default]
    Closed,
    /// Friends/home panel (slides from the right)
    Home,
    /// Profile panel (slides from the left)
    Profile,
    /// History panel (slides from the bottom)
    Bottom,
}

/// Navigation state for the shell
#[derive(Debug, Clone, Copy, Default)]
pub struct NavigationState {
    open: Panel,
}

impl NavigationState {
    /// Open a panel, replacing any currently open one
    pub fn open(&mut self, panel: Panel) {
        self.open = panel;
    }

    /// Return to the capture view
    pub fn close(&mut self) {
        self.open = Panel::Closed;
    }

    /// The open panel
    pub fn current(&self) -> Panel {
        self.open
    }

    pub fn is_home_open(&self) -> bool {
        self.open == Panel::Home
    }

    pub fn is_profile_open(&self) -> bool {
        self.open == Panel::Profile
    }

    pub fn is_bottom_open(&self) -> bool {
        self.open == Panel::Bottom
    }
}

/// A top/bottom gradient color pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeGradient {
    pub top: String,
    pub bottom: String,
}

impl Default for ThemeGradient {
    fn default() -> Self {
        let (top, bottom) = gradients::SUGGESTED[0];
        Self {
            top: top.to_string(),
            bottom: bottom.to_string(),
        }
    }
}

impl ThemeGradient {
    /// The suggested gradients shown in the customize sheet
    pub fn suggested() -> Vec<ThemeGradient> {
        gradients::SUGGESTED
            .iter()
            .map(|(top, bottom)| ThemeGradient {
                top: top.to_string(),
                bottom: bottom.to_string(),
            })
            .collect()
    }
}

/// Theme selection with a display-side notification callback
pub struct ThemeSelector {
    selected: ThemeGradient,
    on_select: Option<Box<dyn Fn(&ThemeGradient) + Send>>,
}

impl std::fmt::Debug for ThemeSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeSelector")
            .field("selected", &self.selected)
            .field("on_select", &self.on_select.is_some())
            .finish()
    }
}

impl Default for ThemeSelector {
    fn default() -> Self {
        Self {
            selected: ThemeGradient::default(),
            on_select: None,
        }
    }
}

impl ThemeSelector {
    /// Register the display-side callback invoked on selection
    pub fn on_select(mut self, callback: impl Fn(&ThemeGradient) + Send + 'static) -> Self {
        self.on_select = Some(Box::new(callback));
        self
    }

    /// Select a gradient (suggested or user-custom) and notify the display
    pub fn select(&mut self, gradient: ThemeGradient) {
        if let Some(callback) = &self.on_select {
            callback(&gradient);
        }
        self.selected = gradient;
    }

    /// The selected gradient
    pub fn selected(&self) -> &ThemeGradient {
        &self.selected
    }
}
