use std::rc::Rc;

use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlElement, Window};

use crate::config::{Layout, PageConfig};
use crate::error::PageError;
use crate::listener::EventListener;
use crate::timer::{Debouncer, Scheduler};

/// Integer prefix of a string, the way `parseInt` reads it: leading
/// whitespace, an optional sign, then digits. Returns `None` without digits.
pub fn leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() {
        return None;
    }
    let value = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

pub fn px(height: i32) -> String {
    format!("{}px", height)
}

/// Header height used for scroll offsets. A measured header wins; otherwise
/// the published CSS variable, and `fallback` when that is missing or zero.
pub fn resolve_header_height(measured: Option<i32>, css_var: Option<&str>, fallback: f64) -> f64 {
    match measured {
        Some(height) => f64::from(height),
        None => css_var
            .and_then(leading_int)
            .filter(|value| *value != 0)
            .map(|value| value as f64)
            .unwrap_or(fallback),
    }
}

/// Keeps the fixed header from covering the top of the page.
pub struct HeaderSync {
    window: Window,
    header: Option<HtmlElement>,
    root: Option<HtmlElement>,
    body: HtmlElement,
    layout: Layout,
}

impl HeaderSync {
    pub fn new(window: &Window, document: &Document, config: &PageConfig) -> Result<Self, PageError> {
        let header = document
            .get_element_by_id(config.selectors.header_id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        if header.is_none() {
            debug!("No #{} element, header sync disabled", config.selectors.header_id);
        }
        let root = document
            .document_element()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        let body = document.body().ok_or(PageError::NoBody)?;

        Ok(Self {
            window: window.clone(),
            header,
            root,
            body,
            layout: config.layout,
        })
    }

    /// Measures the header and writes its height into the CSS variable and
    /// the body's top padding.
    pub fn publish(&self) {
        let Some(header) = &self.header else {
            return;
        };
        let value = px(header.offset_height());
        if let Some(root) = &self.root {
            let _ = root.style().set_property(self.layout.header_var, &value);
        }
        let _ = self.body.style().set_property("padding-top", &value);
        debug!("Header height published: {}", value);
    }

    /// Re-measures the header for scroll offset calculations.
    pub fn height(&self) -> f64 {
        let measured = self.header.as_ref().map(|header| header.offset_height());
        let css_var = match (&measured, &self.root) {
            (None, Some(root)) => self
                .window
                .get_computed_style(root)
                .ok()
                .flatten()
                .and_then(|style| style.get_property_value(self.layout.header_var).ok()),
            _ => None,
        };
        resolve_header_height(measured, css_var.as_deref(), self.layout.fallback_header_height)
    }
}

/// Publishes the height now, again after every resize burst settles, and
/// right away on orientation change.
pub fn install<S: Scheduler>(
    sync: &Rc<HeaderSync>,
    window: &Window,
    scheduler: S,
    debounce_ms: u32,
) -> Result<Vec<EventListener>, PageError> {
    sync.publish();

    let mut debouncer = Debouncer::new(scheduler, debounce_ms);
    let on_resize = {
        let sync = Rc::clone(sync);
        move |_: Event| {
            let sync = Rc::clone(&sync);
            debouncer.trigger(move || sync.publish());
        }
    };
    let on_orientation = {
        let sync = Rc::clone(sync);
        move |_: Event| sync.publish()
    };

    Ok(vec![
        EventListener::new(window, "resize", on_resize)?,
        EventListener::new(window, "orientationchange", on_orientation)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_int_reads_like_parse_int() {
        assert_eq!(leading_int("64px"), Some(64));
        assert_eq!(leading_int("  80"), Some(80));
        assert_eq!(leading_int("-5px"), Some(-5));
        assert_eq!(leading_int("+7"), Some(7));
        assert_eq!(leading_int("12.9"), Some(12));
        assert_eq!(leading_int("px"), None);
        assert_eq!(leading_int(""), None);
        assert_eq!(leading_int("-"), None);
    }

    #[test]
    fn measured_height_wins() {
        assert_eq!(resolve_header_height(Some(64), Some("90px"), 72.0), 64.0);
        assert_eq!(resolve_header_height(Some(0), None, 72.0), 0.0);
    }

    #[test]
    fn css_variable_is_used_without_a_header() {
        assert_eq!(resolve_header_height(None, Some(" 88px"), 72.0), 88.0);
    }

    #[test]
    fn falls_back_to_the_constant() {
        assert_eq!(resolve_header_height(None, None, 72.0), 72.0);
        assert_eq!(resolve_header_height(None, Some(""), 72.0), 72.0);
        assert_eq!(resolve_header_height(None, Some("0px"), 72.0), 72.0);
        assert_eq!(resolve_header_height(None, Some("auto"), 72.0), 72.0);
    }

    #[test]
    fn heights_are_written_in_pixels() {
        assert_eq!(px(72), "72px");
        assert_eq!(px(0), "0px");
    }
}
