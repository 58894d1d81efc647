use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlButtonElement, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement};

use crate::config::{FormCopy, PageConfig, Selectors, Timings};
use crate::error::PageError;
use crate::listener::EventListener;
use crate::timer::Scheduler;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactFields {
    pub fn new(name: &str, email: &str, message: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            message: message.trim().to_string(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.email.is_empty() && !self.message.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Submitting,
    Failed,
    Sent,
}

impl FormState {
    /// A send is under way and its timers still have to run.
    pub fn in_flight(self) -> bool {
        matches!(self, FormState::Submitting | FormState::Sent)
    }
}

/// What the submission flow needs from the form on the page.
pub trait FormView {
    fn fields(&self) -> ContactFields;
    fn set_button(&self, enabled: bool, label: &str);
    fn set_status(&self, text: &str);
    fn reset(&self);
}

/// Simulated submission: nothing leaves the page, the form only walks through
/// its states on fixed timers.
pub struct ContactFlow<S: Scheduler, V: FormView> {
    state: FormState,
    view: V,
    scheduler: S,
    copy: FormCopy,
    timings: Timings,
    idle_label: String,
    timer: Option<S::Handle>,
}

impl<S: Scheduler, V: FormView + 'static> ContactFlow<S, V> {
    pub fn new(view: V, scheduler: S, config: &PageConfig, idle_label: String) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            state: FormState::Idle,
            view,
            scheduler,
            copy: config.copy,
            timings: config.timings,
            idle_label,
            timer: None,
        }))
    }

    pub fn submit(this: &Rc<RefCell<Self>>) {
        let mut flow = this.borrow_mut();
        if flow.state().in_flight() {
            debug!("Contact form busy ({:?}), submit ignored", flow.state());
            return;
        }

        flow.state = FormState::Submitting;
        flow.view.set_button(false, flow.copy.sending_label);
        flow.view.set_status("");

        if !flow.view.fields().is_complete() {
            flow.state = FormState::Failed;
            flow.view.set_status(flow.copy.incomplete);
            flow.view.set_button(true, &flow.idle_label);
            flow.state = FormState::Idle;
            debug!("Contact form incomplete");
            return;
        }

        let weak = Rc::downgrade(this);
        let handle = flow.scheduler.schedule(
            flow.timings.form_sent_delay_ms,
            Box::new(move || {
                if let Some(flow) = weak.upgrade() {
                    Self::mark_sent(&flow);
                }
            }),
        );
        flow.timer = Some(handle);
    }

    fn mark_sent(this: &Rc<RefCell<Self>>) {
        let mut flow = this.borrow_mut();
        flow.state = FormState::Sent;
        flow.view.set_button(false, flow.copy.sent_label);
        flow.view.set_status(flow.copy.thanks);
        info!("Contact message accepted");

        let weak = Rc::downgrade(this);
        let handle = flow.scheduler.schedule(
            flow.timings.form_reset_delay_ms,
            Box::new(move || {
                if let Some(flow) = weak.upgrade() {
                    flow.borrow_mut().finish();
                }
            }),
        );
        flow.timer = Some(handle);
    }
}

impl<S: Scheduler, V: FormView> ContactFlow<S, V> {
    pub fn state(&self) -> FormState {
        self.state
    }

    fn finish(&mut self) {
        self.view.set_button(true, &self.idle_label);
        self.view.reset();
        self.view.set_status("");
        self.state = FormState::Idle;
        self.timer = None;
    }
}

impl<S: Scheduler, V: FormView> Drop for ContactFlow<S, V> {
    // Pending timers die with the flow, so the control must not stay busy.
    fn drop(&mut self) {
        match self.state {
            FormState::Sent => self.finish(),
            FormState::Submitting => {
                self.view.set_button(true, &self.idle_label);
                self.view.set_status("");
                self.state = FormState::Idle;
            }
            FormState::Idle | FormState::Failed => {}
        }
    }
}

/// The contact form as it exists in the page markup.
pub struct DomFormView {
    document: Document,
    form: HtmlFormElement,
    button: HtmlButtonElement,
    status: Option<Element>,
    selectors: Selectors,
}

impl DomFormView {
    fn field(&self, id: &str) -> String {
        let Some(el) = self.document.get_element_by_id(id) else {
            return String::new();
        };
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else {
            String::new()
        }
    }
}

impl FormView for DomFormView {
    fn fields(&self) -> ContactFields {
        ContactFields::new(
            &self.field(self.selectors.name_id),
            &self.field(self.selectors.email_id),
            &self.field(self.selectors.message_id),
        )
    }

    fn set_button(&self, enabled: bool, label: &str) {
        self.button.set_disabled(!enabled);
        self.button.set_text_content(Some(label));
    }

    fn set_status(&self, text: &str) {
        if let Some(status) = &self.status {
            status.set_text_content(Some(text));
        }
    }

    fn reset(&self) {
        self.form.reset();
    }
}

pub fn install<S: Scheduler>(
    document: &Document,
    scheduler: S,
    config: &PageConfig,
) -> Result<Option<EventListener>, PageError> {
    let selectors = config.selectors;
    let Some(form) = document
        .get_element_by_id(selectors.form_id)
        .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
    else {
        debug!("No #{} form, contact flow disabled", selectors.form_id);
        return Ok(None);
    };

    let button = document
        .get_element_by_id(selectors.send_button_id)
        .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok());
    let flow = button.map(|button| {
        let idle_label = button
            .text_content()
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| config.copy.idle_label.to_string());
        let view = DomFormView {
            document: document.clone(),
            form: form.clone(),
            button,
            status: document.get_element_by_id(selectors.status_id),
            selectors,
        };
        ContactFlow::new(view, scheduler, config, idle_label)
    });

    let listener = EventListener::new(&form, "submit", move |event: Event| {
        event.prevent_default();
        if let Some(flow) = &flow {
            ContactFlow::submit(flow);
        }
    })?;
    Ok(Some(listener))
}
