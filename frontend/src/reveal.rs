use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{
    Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};

use crate::config::{PageConfig, Selectors};
use crate::error::PageError;
use crate::header::leading_int;
use crate::listener::elements;
use crate::timer::Scheduler;

/// Skill percentage from a `data-skill` value. Missing or unreadable values
/// count as 0; the result is clamped to 0..=100.
pub fn parse_skill(raw: Option<&str>) -> u8 {
    raw.and_then(leading_int)
        .map(|value| value.clamp(0, 100) as u8)
        .unwrap_or(0)
}

pub fn skill_width(percent: u8) -> String {
    format!("{}%", percent)
}

/// Remembers which elements were already revealed. An element reveals on its
/// first intersecting report and never again.
#[derive(Debug)]
pub struct RevealLatch<K> {
    revealed: Vec<K>,
}

impl<K> Default for RevealLatch<K> {
    fn default() -> Self {
        Self { revealed: Vec::new() }
    }
}

impl<K: PartialEq + Clone> RevealLatch<K> {
    pub fn observe(&mut self, key: &K, intersecting: bool) -> bool {
        if !intersecting || self.revealed.contains(key) {
            return false;
        }
        self.revealed.push(key.clone());
        true
    }
}

/// Schedules one bar fill. Bars of a section share the same delay.
pub fn schedule_fill<S, F>(scheduler: &S, delay_ms: u32, percent: u8, apply: F) -> S::Handle
where
    S: Scheduler,
    F: FnOnce(String) + 'static,
{
    scheduler.schedule(delay_ms, Box::new(move || apply(skill_width(percent))))
}

fn fill_bars<S: Scheduler>(section: &Element, scheduler: &S, selectors: &Selectors, delay_ms: u32) -> Vec<S::Handle> {
    let Ok(bars) = section.query_selector_all(selectors.skill_bar) else {
        return Vec::new();
    };
    elements(&bars)
        .into_iter()
        .filter_map(|bar| {
            let percent = parse_skill(bar.get_attribute(selectors.skill_attr).as_deref());
            let inner = bar
                .query_selector(selectors.skill_fill)
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())?;
            Some(schedule_fill(scheduler, delay_ms, percent, move |width| {
                let _ = inner.style().set_property("width", &width);
            }))
        })
        .collect()
}

/// Adds the reveal class to sections as they scroll into view and fills
/// their skill bars. Disconnects the observer when dropped.
pub struct RevealAnimator<S: Scheduler> {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
    _fills: Rc<RefCell<Vec<S::Handle>>>,
}

impl<S: Scheduler> RevealAnimator<S> {
    pub fn install(document: &Document, scheduler: S, config: &PageConfig) -> Result<Option<Self>, PageError> {
        let sections = elements(&document.query_selector_all(config.selectors.reveal)?);
        if sections.is_empty() {
            debug!("No {} sections, reveal disabled", config.selectors.reveal);
            return Ok(None);
        }

        let fills: Rc<RefCell<Vec<S::Handle>>> = Rc::default();
        let pending = Rc::clone(&fills);
        let selectors = config.selectors;
        let in_view = config.classes.in_view;
        let delay_ms = config.timings.skill_fill_delay_ms;
        let mut latch = RevealLatch::<Element>::default();

        let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let section = entry.target();
                if !latch.observe(&section, entry.is_intersecting()) {
                    continue;
                }
                let _ = section.class_list().add_1(in_view);
                pending
                    .borrow_mut()
                    .extend(fill_bars(&section, &scheduler, &selectors, delay_ms));
                observer.unobserve(&section);
            }
        }) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let options = IntersectionObserverInit::new();
        options.set_root_margin(config.layout.reveal_root_margin);
        options.set_threshold(&JsValue::from_f64(config.layout.reveal_threshold));
        let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
        for section in &sections {
            observer.observe(section);
        }
        debug!("Observing {} reveal sections", sections.len());

        Ok(Some(Self {
            observer,
            _callback: callback,
            _fills: fills,
        }))
    }
}

impl<S: Scheduler> Drop for RevealAnimator<S> {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
