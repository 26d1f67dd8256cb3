//! Expandable text widget model.
//!
//! `ExpandableText` is the stateful shell around the pure truncation engine.
//! It owns what the host tells it (source text, configuration, width hints,
//! click handler) and what it shows (`DisplayText`). Nothing computed during
//! a pass (layouts, line counts, cut offsets) survives the pass.
//!
//! Width arrives late. When text is set before the host has measured the
//! widget and no future-width hint exists, the widget shows the source as is
//! and registers a single one-shot layout listener. The next `on_layout`
//! call runs it once; setting text again while a listener is pending replaces
//! that listener, so there is never more than one deferred recomputation per
//! text-set.
//!
//! States:
//! * `Shrunk`: truncated to `max_lines` with ellipsis + expand icon (or the
//!   verbatim source when it fits).
//! * `Expanded`: the whole source followed by the shrink icon.
//!
//! Clicks: the host registers its handler once through `set_on_click`. A
//! click toggles the state (when there is something to toggle) and then calls
//! the handler. The widget never swaps or inspects the handler.
//!
//! Invariants (after every public call):
//! * `deferred.is_some()` iff the observer holds exactly one pending listener.
//! * `display` was computed from the current `source` and `config`, or is the
//!   verbatim source while deferred.

use core_events::{LayoutEvent, LayoutObserver, ListenerId};
use core_text::{LineBreaker, Measure};
use core_truncate::{
    Argb, ColorRange, DisplayText, TruncateError, TruncationConfig, compute_display_text,
    expanded_display_text,
};
use tracing::{debug, info};

mod layout;
pub use layout::{Padding, WidthHints};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpandState {
    #[default]
    Shrunk,
    Expanded,
}

/// Passed to the host click handler after the widget handled the click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickEvent {
    pub state: ExpandState,
    pub toggled: bool,
}

type ClickHandler = Box<dyn FnMut(&ClickEvent)>;

pub struct ExpandableText<M, B> {
    config: TruncationConfig,
    measure: M,
    breaker: B,
    source: String,
    hints: WidthHints,
    state: ExpandState,
    display: DisplayText,
    observer: LayoutObserver<ExpandableText<M, B>>,
    deferred: Option<ListenerId>,
    on_click: Option<ClickHandler>,
}

impl<M, B> std::fmt::Debug for ExpandableText<M, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpandableText")
            .field("config", &self.config)
            .field("hints", &self.hints)
            .field("state", &self.state)
            .field("display", &self.display)
            .field("deferred", &self.deferred)
            .field("on_click", &self.on_click.is_some())
            .finish_non_exhaustive()
    }
}

impl<M, B> ExpandableText<M, B>
where
    M: Measure + 'static,
    B: LineBreaker + 'static,
{
    pub fn new(config: TruncationConfig, measure: M, breaker: B) -> Self {
        Self {
            config,
            measure,
            breaker,
            source: String::new(),
            hints: WidthHints::default(),
            state: ExpandState::Shrunk,
            display: DisplayText::default(),
            observer: LayoutObserver::new(),
            deferred: None,
            on_click: None,
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.source = text.into();
        self.refresh();
    }

    /// Update path for recycled list rows: the row's future width is known
    /// even though this instance has not been laid out for it yet.
    pub fn update_for_recycler(&mut self, text: impl Into<String>, future_width: u32) {
        self.hints.future = future_width;
        self.set_text(text);
    }

    pub fn set_max_lines(&mut self, text: impl Into<String>, max_lines: usize) {
        self.config = std::mem::take(&mut self.config).with_max_lines(max_lines);
        self.set_text(text);
    }

    pub fn set_special_color(&mut self, start: usize, len: usize, color: Argb) {
        self.config.special_color = Some(ColorRange { start, len, color });
        self.refresh();
    }

    pub fn set_config(&mut self, config: TruncationConfig) {
        self.config = config;
        self.refresh();
    }

    pub fn set_padding(&mut self, padding: Padding) {
        self.hints.padding = padding;
        if !self.has_pending_layout() {
            self.refresh();
        }
    }

    pub fn set_on_click<F>(&mut self, handler: F)
    where
        F: FnMut(&ClickEvent) + 'static,
    {
        self.on_click = Some(Box::new(handler));
    }

    /// Host layout pass finished with the widget `width` wide.
    ///
    /// Pending one-shot listeners run first (and only once). Without a
    /// pending listener the text is recomputed only if the width changed.
    pub fn on_layout(&mut self, width: u32) {
        let changed = self.hints.measured != width;
        self.hints.measured = width;

        let listeners = self.observer.take_pending();
        if listeners.is_empty() {
            if changed && self.state == ExpandState::Shrunk {
                self.refresh();
            }
            return;
        }
        let event = LayoutEvent::new(width);
        for listener in listeners {
            listener(self, &event);
        }
    }

    /// Handle a click: toggle when possible, then notify the host handler.
    pub fn click(&mut self) -> ClickEvent {
        let toggled = self.toggle();
        let event = ClickEvent {
            state: self.state,
            toggled,
        };
        if let Some(handler) = self.on_click.as_mut() {
            handler(&event);
        }
        event
    }

    /// Shrunk → Expanded when the text is actually truncated; Expanded →
    /// Shrunk when the shrink affordance is shown. Returns whether it toggled.
    pub fn toggle(&mut self) -> bool {
        let next = match self.state {
            ExpandState::Shrunk if self.display.is_truncated() => ExpandState::Expanded,
            ExpandState::Expanded if self.config.show_shrink_icon => ExpandState::Shrunk,
            _ => return false,
        };
        debug!(target: "widget", from = ?self.state, to = ?next, "toggle");
        self.state = next;
        self.refresh();
        true
    }

    pub fn display(&self) -> &DisplayText {
        &self.display
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn config(&self) -> &TruncationConfig {
        &self.config
    }

    pub fn state(&self) -> ExpandState {
        self.state
    }

    pub fn is_expanded(&self) -> bool {
        self.state == ExpandState::Expanded
    }

    pub fn has_pending_layout(&self) -> bool {
        self.deferred.is_some()
    }

    pub fn width_budget(&self) -> Option<u32> {
        self.hints.budget()
    }

    fn refresh(&mut self) {
        if self.state == ExpandState::Expanded {
            self.cancel_deferred();
            self.display = expanded_display_text(&self.source, &self.config);
            return;
        }
        let Some(width) = self.hints.budget() else {
            self.defer();
            return;
        };
        match compute_display_text(
            &self.source,
            width,
            &self.config,
            &self.measure,
            &self.breaker,
        ) {
            Ok(display) => {
                self.cancel_deferred();
                self.display = display;
            }
            Err(TruncateError::DeferredLayout) => self.defer(),
        }
    }

    fn defer(&mut self) {
        self.display = DisplayText::verbatim(&self.source);
        if self.source.is_empty() {
            self.cancel_deferred();
            return;
        }
        self.cancel_deferred();
        let id = self.observer.register_once(|widget: &mut Self, ev: &LayoutEvent| {
            widget.deferred = None;
            debug!(target: "widget", width = ev.width, "deferred_layout_fired");
            widget.refresh();
        });
        self.deferred = Some(id);
        info!(
            target: "widget",
            source_len = self.source.len(),
            future_width = self.hints.future,
            "layout_deferred"
        );
    }

    fn cancel_deferred(&mut self) {
        if let Some(id) = self.deferred.take() {
            self.observer.remove(id);
        }
    }
}
