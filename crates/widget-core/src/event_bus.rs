//! Event queue between the widget controller and the host renderer.
//!
//! Single-threaded (WASM constraint), interior mutability via RefCell.
//! Events are buffered until the renderer drains them.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use widget_types::event::WidgetEvent;

/// Shared event bus, clone-cheap via Rc.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Rc<RefCell<VecDeque<WidgetEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&self, event: WidgetEvent) {
        self.inner.borrow_mut().push_back(event);
    }

    /// Take every pending event, oldest first.
    pub fn drain(&self) -> Vec<WidgetEvent> {
        self.inner.borrow_mut().drain(..).collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.inner.borrow().is_empty()
    }
}
