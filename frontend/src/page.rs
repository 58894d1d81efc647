use std::rc::Rc;

use chrono::{Datelike, Local};
use log::{debug, info};
use web_sys::Document;

use crate::a11y::TabWatch;
use crate::config::PageConfig;
use crate::error::PageError;
use crate::header::{self, HeaderSync};
use crate::listener::EventListener;
use crate::reveal::RevealAnimator;
use crate::timer::BrowserScheduler;
use crate::{contact, nav, scroll};

pub fn year_label(date: impl Datelike) -> String {
    date.year().to_string()
}

fn stamp_year(document: &Document, config: &PageConfig) {
    if let Some(year) = document.get_element_by_id(config.selectors.year_id) {
        year.set_text_content(Some(&year_label(Local::now())));
    }
}

/// Owns everything wired into the page. Dropping it detaches all listeners,
/// disconnects the reveal observer and cancels pending timers.
pub struct PageController {
    _listeners: Vec<EventListener>,
    _reveal: Option<RevealAnimator<BrowserScheduler>>,
    _tab_watch: TabWatch,
}

impl PageController {
    pub fn install(config: &PageConfig) -> Result<Self, PageError> {
        let window = web_sys::window().ok_or(PageError::NoWindow)?;
        let document = window.document().ok_or(PageError::NoDocument)?;
        let body = document.body().ok_or(PageError::NoBody)?;
        let root = document.document_element().ok_or(PageError::NoRoot)?;
        let scheduler = BrowserScheduler;

        stamp_year(&document, config);

        let header = Rc::new(HeaderSync::new(&window, &document, config)?);
        let mut listeners = header::install(&header, &window, scheduler, config.timings.resize_debounce_ms)?;
        listeners.extend(nav::install(&document, &body, config)?);
        listeners.extend(scroll::install(&window, &document, &body, &header, config)?);
        listeners.extend(contact::install(&document, scheduler, config)?);
        let reveal = RevealAnimator::install(&document, scheduler, config)?;
        let tab_watch = TabWatch::install(&window, &root, config.classes.tabbing)?;

        info!("Page interactions ready ({} listeners)", listeners.len());
        Ok(Self {
            _listeners: listeners,
            _reveal: reveal,
            _tab_watch: tab_watch,
        })
    }
}

impl Drop for PageController {
    fn drop(&mut self) {
        debug!("Tearing down page interactions");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn year_label_is_the_calendar_year() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        assert_eq!(year_label(date), "2026");
    }
}
