//! Caller-owned layout state.
//!
//! A [`LayoutSession`] holds the inputs of the most recent layout pass and its
//! result. Any change to events, window or container reruns the full pass and
//! replaces the stored [`Layout`] wholesale; nothing is patched incrementally.

use crate::error::Result;
use crate::event::{DisplayWindow, Event};
use crate::geometry::{self, Layout, LayoutOptions, Rect};

#[derive(Debug, Clone)]
pub struct LayoutSession {
    events: Vec<Event>,
    window: DisplayWindow,
    container: Rect,
    options: LayoutOptions,
    current: Layout,
}

impl LayoutSession {
    /// Start a session with no events; the initial layout is empty.
    pub fn new(window: DisplayWindow, container: Rect, options: LayoutOptions) -> Self {
        Self {
            events: Vec::new(),
            window,
            container,
            options,
            current: Layout::default(),
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn window(&self) -> &DisplayWindow {
        &self.window
    }

    pub fn container(&self) -> &Rect {
        &self.container
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// The result of the last pass. Empty after a failed pass.
    pub fn current(&self) -> &Layout {
        &self.current
    }

    /// Replace the event set and recompute.
    pub fn set_events(&mut self, events: Vec<Event>) -> Result<&Layout> {
        self.events = events;
        self.refresh()
    }

    /// Change the visible time range and recompute.
    pub fn set_window(&mut self, window: DisplayWindow) -> Result<&Layout> {
        self.window = window;
        self.refresh()
    }

    /// Change the container rectangle and recompute.
    pub fn resize(&mut self, container: Rect) -> Result<&Layout> {
        self.container = container;
        self.refresh()
    }

    pub fn set_options(&mut self, options: LayoutOptions) -> Result<&Layout> {
        self.options = options;
        self.refresh()
    }

    /// Rerun the pass over the current inputs.
    ///
    /// On failure the stored layout is cleared and the error returned.
    pub fn refresh(&mut self) -> Result<&Layout> {
        match geometry::compute_layout(&self.events, &self.window, &self.container, &self.options)
        {
            Ok(layout) => {
                self.current = layout;
                Ok(&self.current)
            }
            Err(err) => {
                tracing::warn!(error = %err, events = self.events.len(), "layout pass failed");
                self.current = Layout::default();
                Err(err)
            }
        }
    }
}
