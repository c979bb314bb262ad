//! Newsletter and contact forms. Nothing is sent anywhere: a submit shows a
//! success banner, closes the surrounding modal and clears the fields.

use std::rc::Rc;

use log::{debug, info};
use web_sys::{Event, HtmlFormElement, HtmlInputElement};

use crate::components::alerts::{Notifier, Severity};
use crate::dom::{self, Listener};
use crate::error::PageError;
use crate::toolkit::DialogController;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Newsletter,
    Contact,
}

impl FormKind {
    pub const ALL: [FormKind; 2] = [FormKind::Newsletter, FormKind::Contact];

    pub fn form_id(self) -> &'static str {
        match self {
            FormKind::Newsletter => "newsletterForm",
            FormKind::Contact => "contactForm",
        }
    }

    pub fn modal_id(self) -> &'static str {
        match self {
            FormKind::Newsletter => "newsletterModal",
            FormKind::Contact => "contactModal",
        }
    }

    pub fn name_field(self) -> &'static str {
        match self {
            FormKind::Newsletter => "subscriberName",
            FormKind::Contact => "contactName",
        }
    }

    pub fn email_field(self) -> Option<&'static str> {
        match self {
            FormKind::Newsletter => Some("subscriberEmail"),
            FormKind::Contact => None,
        }
    }

    pub fn success_message(self, name: &str) -> String {
        match self {
            FormKind::Newsletter => format!("Thank you, {}! You've been subscribed successfully.", name),
            FormKind::Contact => format!("Thank you, {}! Your message has been sent.", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormEntry {
    pub name: String,
    pub email: Option<String>,
}

impl FormEntry {
    fn read(kind: FormKind) -> Self {
        let value = |id: &str| dom::by_id_as::<HtmlInputElement>(id).map(|input| input.value());
        Self {
            name: value(kind.name_field()).unwrap_or_default(),
            email: kind.email_field().and_then(value),
        }
    }
}

/// Announces the submission and closes the form's dialog.
/// Returns whether a dialog controller was found to close.
pub fn submit<D, N>(kind: FormKind, entry: &FormEntry, dialogs: &D, notifier: &N) -> bool
where
    D: DialogController + ?Sized,
    N: Notifier + ?Sized,
{
    notifier.notify(Severity::Success, &kind.success_message(&entry.name));
    let closed = dialogs.hide(kind.modal_id());
    if !closed {
        debug!("No open dialog controller for #{}", kind.modal_id());
    }
    closed
}

pub fn wire(dialogs: Rc<dyn DialogController>, notifier: Rc<dyn Notifier>) -> Result<Vec<Listener>, PageError> {
    let mut listeners = Vec::new();
    for kind in FormKind::ALL {
        let Some(form) = dom::by_id_as::<HtmlFormElement>(kind.form_id()) else {
            debug!("No #{} on this page", kind.form_id());
            continue;
        };
        let dialogs = dialogs.clone();
        let notifier = notifier.clone();
        let target = form.clone();
        listeners.push(Listener::new(&form, "submit", move |e: Event| {
            e.prevent_default();
            let entry = FormEntry::read(kind);
            info!("Simulated {:?} submission (email given: {})", kind, entry.email.is_some());
            submit(kind, &entry, dialogs.as_ref(), notifier.as_ref());
            target.reset();
        })?);
    }
    Ok(listeners)
}
