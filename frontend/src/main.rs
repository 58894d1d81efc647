use std::cell::RefCell;

use log::{error, info};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Event, PageTransitionEvent};

mod a11y;
mod config;
mod contact;
mod error;
mod header;
mod listener;
mod nav;
mod page;
mod reveal;
mod scroll;
mod timer;

use config::PageConfig;
use error::PageError;
use page::PageController;

thread_local! {
    static PAGE: RefCell<Option<PageController>> = RefCell::new(None);
}

fn mount() {
    if PAGE.with(|page| page.borrow().is_some()) {
        return;
    }
    match PageController::install(&PageConfig::default()) {
        Ok(controller) => PAGE.with(|page| *page.borrow_mut() = Some(controller)),
        Err(err) => error!("Failed to set up page interactions: {}", err),
    }
}

fn unmount() {
    // Take first so the controller drops outside the borrow.
    let controller = PAGE.with(|page| page.borrow_mut().take());
    drop(controller);
}

fn run() -> Result<(), PageError> {
    let window = web_sys::window().ok_or(PageError::NoWindow)?;
    let document = window.document().ok_or(PageError::NoDocument)?;

    if document.ready_state() == "loading" {
        let on_ready = Closure::once_into_js(mount);
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
    } else {
        mount();
    }

    // Lifecycle hooks live as long as the page itself.
    let on_hide = Closure::wrap(Box::new(move |_: Event| unmount()) as Box<dyn FnMut(Event)>);
    window.add_event_listener_with_callback("pagehide", on_hide.as_ref().unchecked_ref())?;
    on_hide.forget();

    // Pages restored from the back/forward cache never see DOMContentLoaded again.
    let on_show = Closure::wrap(Box::new(move |event: Event| {
        let restored = event
            .dyn_ref::<PageTransitionEvent>()
            .map_or(false, |event| event.persisted());
        if restored {
            mount();
        }
    }) as Box<dyn FnMut(Event)>);
    window.add_event_listener_with_callback("pageshow", on_show.as_ref().unchecked_ref())?;
    on_show.forget();

    Ok(())
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting page interactions");
    if let Err(err) = run() {
        error!("Page interactions unavailable: {}", err);
    }
}
