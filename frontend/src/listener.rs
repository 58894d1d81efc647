use std::cell::Cell;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, NodeList};

use crate::error::PageError;

/// An attached DOM event listener. The listener is removed from its target
/// when this guard is dropped.
pub struct EventListener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
    attached: Cell<bool>,
}

impl EventListener {
    pub fn new<T, F>(target: &T, event: &'static str, handler: F) -> Result<Self, PageError>
    where
        T: AsRef<EventTarget>,
        F: FnMut(Event) + 'static,
    {
        let target = target.as_ref().clone();
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target,
            event,
            callback,
            attached: Cell::new(true),
        })
    }

    /// Stops delivering events but keeps the closure alive, so a handler may
    /// detach its own listener while it runs.
    pub fn detach(&self) {
        if self.attached.replace(false) {
            let _ = self
                .target
                .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
        }
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Collects the elements of a `NodeList`, skipping non-element nodes.
pub fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}
