use owo_colors::OwoColorize;
use satwatch_route_core::summary::Safety;

use crate::ui::Style;

/// Color helper with a single policy shared across commands.
///
/// Notes:
/// - All functions return `String` to avoid borrow-to-temporary issues (E0716).
/// - Colors are applied only if `style.color == true`.
pub struct Colors {
    pub enabled: bool,
}

impl Colors {
    pub fn new(style: &Style) -> Self {
        Self {
            enabled: style.color,
        }
    }

    #[inline]
    pub fn ok(&self, s: impl AsRef<str>) -> String {
        let s = s.as_ref();
        if self.enabled {
            s.green().to_string()
        } else {
            s.to_string()
        }
    }

    #[inline]
    pub fn err(&self, s: impl AsRef<str>) -> String {
        let s = s.as_ref();
        if self.enabled {
            s.red().to_string()
        } else {
            s.to_string()
        }
    }

    #[inline]
    pub fn warn(&self, s: impl AsRef<str>) -> String {
        let s = s.as_ref();
        if self.enabled {
            s.yellow().to_string()
        } else {
            s.to_string()
        }
    }

    #[inline]
    pub fn info(&self, s: impl AsRef<str>) -> String {
        let s = s.as_ref();
        if self.enabled {
            s.cyan().to_string()
        } else {
            s.to_string()
        }
    }

    #[inline]
    pub fn dim(&self, s: impl AsRef<str>) -> String {
        let s = s.as_ref();
        if self.enabled {
            s.bright_black().to_string()
        } else {
            s.to_string()
        }
    }

    // Domain-specific helpers (policy)
    #[inline]
    pub fn key(&self, s: impl AsRef<str>) -> String {
        self.info(s)
    }

    #[inline]
    pub fn hazard_name(&self, s: impl AsRef<str>) -> String {
        // hazard location = red
        self.err(s)
    }

    /// Clear = green, caution = yellow.
    pub fn safety(&self, safety: &Safety, txt: impl AsRef<str>) -> String {
        match safety {
            Safety::Clear => self.ok(txt),
            Safety::Caution { .. } => self.warn(txt),
        }
    }
}
