use std::rc::Rc;

use log::debug;
use web_sys::{Document, Event, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

use crate::config::PageConfig;
use crate::error::PageError;
use crate::header::HeaderSync;
use crate::listener::{elements, EventListener};
use crate::nav;

/// Fragment id of a same-page link. Bare `#` and other hrefs yield `None`.
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Document offset to scroll to so the target sits `margin` below the header.
pub fn scroll_top(target_top: f64, page_offset: f64, header_height: f64, margin: f64) -> f64 {
    target_top + page_offset - (header_height + margin)
}

pub fn install(
    window: &Window,
    document: &Document,
    body: &HtmlElement,
    header: &Rc<HeaderSync>,
    config: &PageConfig,
) -> Result<Vec<EventListener>, PageError> {
    let anchors = elements(&document.query_selector_all(config.selectors.anchors)?);
    debug!("Smooth scroll on {} anchors", anchors.len());

    let config = *config;
    anchors
        .into_iter()
        .map(|anchor| {
            let window = window.clone();
            let document = document.clone();
            let body = body.clone();
            let header = Rc::clone(header);
            let link = anchor.clone();
            EventListener::new(&anchor, "click", move |event: Event| {
                let Some(href) = link.get_attribute("href") else {
                    return;
                };
                let Some(target) = anchor_target(&href).and_then(|id| document.get_element_by_id(id)) else {
                    return;
                };
                event.prevent_default();

                let page_offset = window.page_y_offset().unwrap_or(0.0);
                let top = scroll_top(
                    target.get_bounding_client_rect().top(),
                    page_offset,
                    header.height(),
                    config.layout.scroll_margin,
                );
                let options = ScrollToOptions::new();
                options.set_top(top);
                options.set_behavior(ScrollBehavior::Smooth);
                window.scroll_to_with_scroll_to_options(&options);

                let toggle = nav::find_toggle(&document, &config);
                nav::close(&body, toggle.as_ref(), config.classes.nav_open);
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_page_links_resolve_to_their_fragment() {
        assert_eq!(anchor_target("#about"), Some("about"));
        assert_eq!(anchor_target("#skills-2"), Some("skills-2"));
    }

    #[test]
    fn bare_hash_and_other_links_are_ignored() {
        assert_eq!(anchor_target("#"), None);
        assert_eq!(anchor_target(""), None);
        assert_eq!(anchor_target("/projects#top"), None);
        assert_eq!(anchor_target("https://example.com"), None);
    }

    #[test]
    fn target_lands_below_header_and_margin() {
        assert_eq!(scroll_top(500.0, 1_000.0, 64.0, 12.0), 1_424.0);
        assert_eq!(scroll_top(-200.0, 900.0, 72.0, 12.0), 616.0);
    }
}
