use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, KeyboardEvent, Window};

use crate::error::PageError;
use crate::listener::EventListener;

/// Fires once, on the first Tab key.
#[derive(Debug, Default)]
pub struct TabLatch {
    seen: bool,
}

impl TabLatch {
    pub fn observe(&mut self, key: &str) -> bool {
        if self.seen || key != "Tab" {
            return false;
        }
        self.seen = true;
        true
    }
}

/// Marks the document root once the visitor starts navigating by keyboard,
/// so focus outlines are shown only to them.
pub struct TabWatch {
    _slot: Rc<RefCell<Option<EventListener>>>,
}

impl TabWatch {
    pub fn install(window: &Window, root: &Element, tabbing_class: &'static str) -> Result<Self, PageError> {
        let slot: Rc<RefCell<Option<EventListener>>> = Rc::default();
        let weak = Rc::downgrade(&slot);
        let root = root.clone();
        let mut latch = TabLatch::default();

        let listener = EventListener::new(window, "keydown", move |event: Event| {
            let Some(key) = event.dyn_ref::<KeyboardEvent>().map(|e| e.key()) else {
                return;
            };
            if !latch.observe(&key) {
                return;
            }
            let _ = root.class_list().add_1(tabbing_class);
            debug!("Keyboard navigation detected");
            if let Some(slot) = weak.upgrade() {
                if let Some(listener) = slot.borrow().as_ref() {
                    listener.detach();
                }
            }
        })?;
        *slot.borrow_mut() = Some(listener);
        Ok(Self { _slot: slot })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_on_the_first_tab_only() {
        let mut latch = TabLatch::default();
        assert!(latch.observe("Tab"));
        assert!(!latch.observe("Tab"));
    }

    #[test]
    fn other_keys_do_not_count() {
        let mut latch = TabLatch::default();
        assert!(!latch.observe("Enter"));
        assert!(!latch.observe("tab"));
        assert!(!latch.observe("Shift"));
        assert!(latch.observe("Tab"));
    }
}
