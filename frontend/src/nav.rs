use log::debug;
use web_sys::{Document, Element, Event, HtmlElement};

use crate::config::PageConfig;
use crate::error::PageError;
use crate::listener::EventListener;

const ARIA_EXPANDED: &str = "aria-expanded";

/// Open/closed state of the mobile menu as carried by `aria-expanded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavState {
    open: bool,
}

impl NavState {
    pub fn from_aria(value: Option<&str>) -> Self {
        Self {
            open: value == Some("true"),
        }
    }

    pub fn is_open(self) -> bool {
        self.open
    }

    pub fn toggled(self) -> Self {
        Self { open: !self.open }
    }

    pub fn aria_value(self) -> &'static str {
        if self.open {
            "true"
        } else {
            "false"
        }
    }
}

pub fn find_toggle(document: &Document, config: &PageConfig) -> Option<Element> {
    document.query_selector(config.selectors.nav_toggle).ok().flatten()
}

/// Closes the mobile menu if it is open.
pub fn close(body: &HtmlElement, toggle: Option<&Element>, open_class: &str) {
    let list = body.class_list();
    if !list.contains(open_class) {
        return;
    }
    let _ = list.remove_1(open_class);
    if let Some(toggle) = toggle {
        let _ = toggle.set_attribute(ARIA_EXPANDED, NavState::default().aria_value());
    }
}

pub fn install(
    document: &Document,
    body: &HtmlElement,
    config: &PageConfig,
) -> Result<Option<EventListener>, PageError> {
    let Some(toggle) = find_toggle(document, config) else {
        debug!("No {} control, mobile nav disabled", config.selectors.nav_toggle);
        return Ok(None);
    };

    let body = body.clone();
    let open_class = config.classes.nav_open;
    let control = toggle.clone();
    let listener = EventListener::new(&toggle, "click", move |_: Event| {
        let state = NavState::from_aria(control.get_attribute(ARIA_EXPANDED).as_deref()).toggled();
        let _ = control.set_attribute(ARIA_EXPANDED, state.aria_value());
        let _ = body.class_list().toggle(open_class);
        debug!("Mobile nav open: {}", state.is_open());
    })?;
    Ok(Some(listener))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_literal_true_means_open() {
        assert!(NavState::from_aria(Some("true")).is_open());
        assert!(!NavState::from_aria(Some("false")).is_open());
        assert!(!NavState::from_aria(Some("TRUE")).is_open());
        assert!(!NavState::from_aria(None).is_open());
    }

    #[test]
    fn toggling_flips_the_attribute_value() {
        let closed = NavState::from_aria(None);
        assert_eq!(closed.toggled().aria_value(), "true");
        assert_eq!(closed.toggled().toggled().aria_value(), "false");
    }
}
