//! # ViewPort
//!
//! The display surface the core renders into: one content container that is
//! replaced wholesale on every render, a navigation bar with at most one
//! active link, and the favorite control of the current detail view.

/// A display surface.
pub trait ViewPort {
    /// Replace the entire container content.
    fn render(&mut self, html: &str);

    /// Mark the nav link whose `href` equals `target` as active, clearing
    /// any other. `None` clears all.
    fn set_active_nav(&mut self, target: Option<&str>);

    /// Swap the favorite control of the current detail view in place.
    fn update_favorite_control(&mut self, html: &str);
}

/// One recorded viewport call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Render(String),
    ActiveNav(Option<String>),
    FavoriteControl(String),
}

/// A viewport that records every call.
///
/// Used by tests, the CLI `view` command and the HTTP server, which all need
/// the final markup rather than a live display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturingViewPort {
    frames: Vec<Frame>,
}

impl CapturingViewPort {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call, oldest first.
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Current container content: the last full render, or `""`.
    #[must_use]
    pub fn content(&self) -> &str {
        self.frames
            .iter()
            .rev()
            .find_map(|f| match f {
                Frame::Render(html) => Some(html.as_str()),
                _ => None,
            })
            .unwrap_or("")
    }

    /// Currently active nav link.
    #[must_use]
    pub fn active_nav(&self) -> Option<&str> {
        self.frames
            .iter()
            .rev()
            .find_map(|f| match f {
                Frame::ActiveNav(target) => Some(target.as_deref()),
                _ => None,
            })
            .flatten()
    }

    /// Number of full renders so far.
    #[must_use]
    pub fn render_count(&self) -> usize {
        self.frames
            .iter()
            .filter(|f| matches!(f, Frame::Render(_)))
            .count()
    }

    /// The last in-place favorite control update, if any.
    #[must_use]
    pub fn favorite_control(&self) -> Option<&str> {
        self.frames.iter().rev().find_map(|f| match f {
            Frame::FavoriteControl(html) => Some(html.as_str()),
            _ => None,
        })
    }

    /// Drop all recorded frames.
    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

impl ViewPort for CapturingViewPort {
    fn render(&mut self, html: &str) {
        self.frames.push(Frame::Render(html.to_string()));
    }

    fn set_active_nav(&mut self, target: Option<&str>) {
        self.frames.push(Frame::ActiveNav(target.map(str::to_string)));
    }

    fn update_favorite_control(&mut self, html: &str) {
        self.frames.push(Frame::FavoriteControl(html.to_string()));
    }
}
