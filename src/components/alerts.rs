use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::debug;
use yew::prelude::*;

/// Bootstrap contextual tag of a banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Primary,
    Secondary,
    Success,
    Info,
    Warning,
    Danger,
    Light,
    Dark,
}

impl Severity {
    pub fn tag(self) -> &'static str {
        match self {
            Severity::Primary => "primary",
            Severity::Secondary => "secondary",
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
            Severity::Light => "light",
            Severity::Dark => "dark",
        }
    }

    /// Unknown tags fall back to `Info`.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "primary" => Severity::Primary,
            "secondary" => Severity::Secondary,
            "success" => Severity::Success,
            "light" => Severity::Light,
            "dark" => Severity::Dark,
            "warning" => Severity::Warning,
            "danger" | "error" => Severity::Danger,
            _ => Severity::Info,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait Notifier {
    fn notify(&self, severity: Severity, message: &str);
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    Expired,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerState {
    Visible,
    Dismissed(DismissReason),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub id: usize,
    pub alert: Alert,
    pub state: BannerState,
}

impl Banner {
    /// Moves a visible banner to `Dismissed`. Returns false if it already was.
    pub fn dismiss(&mut self, reason: DismissReason) -> bool {
        match self.state {
            BannerState::Visible => {
                self.state = BannerState::Dismissed(reason);
                true
            }
            BannerState::Dismissed(_) => false,
        }
    }
}

/// Action the banner's lifetime timer dispatches when it fires.
pub fn expiry(id: usize) -> AlertAction {
    AlertAction::Dismiss(id, DismissReason::Expired)
}

/// Action the banner's close button dispatches.
pub fn close(id: usize) -> AlertAction {
    AlertAction::Dismiss(id, DismissReason::Closed)
}

pub enum AlertAction {
    Push(Alert),
    Dismiss(usize, DismissReason),
}

/// Banners currently on screen, oldest first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AlertsState {
    pub banners: Vec<Banner>,
    next_id: usize,
}

impl Reducible for AlertsState {
    type Action = AlertAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            AlertAction::Push(alert) => {
                next.banners.push(Banner {
                    id: next.next_id,
                    alert,
                    state: BannerState::Visible,
                });
                next.next_id += 1;
            }
            AlertAction::Dismiss(id, reason) => {
                let Some(banner) = next.banners.iter_mut().find(|b| b.id == id) else {
                    return self;
                };
                if !banner.dismiss(reason) {
                    return self;
                }
                debug!("Banner {} dismissed ({:?})", id, reason);
                next.banners.retain(|b| b.state == BannerState::Visible);
            }
        }
        next.into()
    }
}

#[derive(Default)]
struct ChannelInner {
    sink: Option<Callback<Alert>>,
    pending: Vec<Alert>,
}

/// Hands alerts to the mounted [`AlertStack`], holding them until it mounts.
#[derive(Clone, Default)]
pub struct AlertChannel {
    inner: Rc<RefCell<ChannelInner>>,
}

impl PartialEq for AlertChannel {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl AlertChannel {
    pub fn connect(&self, sink: Callback<Alert>) {
        let pending = {
            let mut inner = self.inner.borrow_mut();
            inner.sink = Some(sink.clone());
            std::mem::take(&mut inner.pending)
        };
        for alert in pending {
            sink.emit(alert);
        }
    }

    pub fn disconnect(&self) {
        self.inner.borrow_mut().sink = None;
    }

    #[cfg(test)]
    pub fn pending(&self) -> usize {
        self.inner.borrow().pending.len()
    }
}

impl Notifier for AlertChannel {
    fn notify(&self, severity: Severity, message: &str) {
        let alert = Alert {
            severity,
            message: message.to_string(),
        };
        let sink = self.inner.borrow().sink.clone();
        match sink {
            Some(sink) => sink.emit(alert),
            None => {
                debug!("Holding alert until the overlay layer mounts");
                self.inner.borrow_mut().pending.push(alert);
            }
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct AlertStackProps {
    pub channel: AlertChannel,
    pub lifetime_ms: u32,
}

#[function_component(AlertStack)]
pub fn alert_stack(props: &AlertStackProps) -> Html {
    let alerts = use_reducer(AlertsState::default);

    {
        let alerts = alerts.clone();
        use_effect_with_deps(
            move |channel: &AlertChannel| {
                let channel = channel.clone();
                channel.connect(Callback::from(move |alert: Alert| {
                    alerts.dispatch(AlertAction::Push(alert));
                }));
                move || channel.disconnect()
            },
            props.channel.clone(),
        );
    }

    let on_dismiss = {
        let alerts = alerts.clone();
        Callback::from(move |action: AlertAction| alerts.dispatch(action))
    };

    html! {
        <>
            { for alerts.banners.iter().map(|banner| html! {
                <AlertBanner
                    key={banner.id}
                    banner={banner.clone()}
                    lifetime_ms={props.lifetime_ms}
                    on_dismiss={on_dismiss.clone()}
                />
            }) }
        </>
    }
}

#[derive(Properties, PartialEq)]
pub struct AlertBannerProps {
    pub banner: Banner,
    pub lifetime_ms: u32,
    pub on_dismiss: Callback<AlertAction>,
}

#[function_component(AlertBanner)]
pub fn alert_banner(props: &AlertBannerProps) -> Html {
    let id = props.banner.id;

    // Dropping the timeout on unmount cancels it when the banner was closed first.
    {
        let on_dismiss = props.on_dismiss.clone();
        use_effect_with_deps(
            move |(_, lifetime_ms): &(usize, u32)| {
                let timeout = Timeout::new(*lifetime_ms, move || on_dismiss.emit(expiry(id)));
                move || drop(timeout)
            },
            (id, props.lifetime_ms),
        );
    }

    let on_close = {
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_: MouseEvent| on_dismiss.emit(close(id)))
    };

    let severity_class = format!("alert-{}", props.banner.alert.severity.tag());

    html! {
        <div
            class={classes!(
                "alert", severity_class, "alert-dismissible", "fade", "show",
                "position-fixed", "top-0", "start-50", "translate-middle-x", "mt-3"
            )}
            style="z-index: 9999; min-width: 300px;"
            role="alert"
        >
            { props.banner.alert.message.clone() }
            <button type="button" class="btn-close" aria-label="Close" onclick={on_close}></button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert(message: &str) -> Alert {
        Alert {
            severity: Severity::Success,
            message: message.to_string(),
        }
    }

    fn push(state: Rc<AlertsState>, message: &str) -> Rc<AlertsState> {
        state.reduce(AlertAction::Push(alert(message)))
    }

    #[test]
    fn severity_tags() {
        assert_eq!(Severity::from_tag("success"), Severity::Success);
        assert_eq!(Severity::from_tag(" Danger "), Severity::Danger);
        assert_eq!(Severity::from_tag("bogus"), Severity::Info);
        assert_eq!(Severity::Warning.tag(), "warning");
    }

    #[test]
    fn every_bootstrap_variant_keeps_its_tag() {
        for tag in ["primary", "secondary", "success", "info", "warning", "danger", "light", "dark"] {
            assert_eq!(Severity::from_tag(tag).tag(), tag);
        }
    }

    #[test]
    fn banner_expires_after_default_lifetime() {
        assert_eq!(crate::config::PageConfig::default().alert_lifetime_ms, 5_000);

        let state = push(Rc::new(AlertsState::default()), "Thank you, Ada!");
        let id = state.banners[0].id;
        let state = state.reduce(expiry(id));
        assert!(state.banners.is_empty());
    }

    #[test]
    fn close_button_dismisses_before_timer() {
        let state = push(push(Rc::new(AlertsState::default()), "a"), "b");
        let first = state.banners[0].id;
        let closed = state.reduce(close(first));
        assert_eq!(closed.banners.len(), 1);
        let expired = closed.clone().reduce(expiry(first));
        assert!(Rc::ptr_eq(&closed, &expired));
    }

    #[test]
    fn banners_stack_without_dedup() {
        let state = Rc::new(AlertsState::default());
        let state = push(state, "saved");
        let state = push(state, "saved");
        assert_eq!(state.banners.len(), 2);
        assert_ne!(state.banners[0].id, state.banners[1].id);
        assert!(state.banners.iter().all(|b| b.state == BannerState::Visible));
    }

    #[test]
    fn dismiss_removes_only_that_banner() {
        let state = push(push(Rc::new(AlertsState::default()), "first"), "second");
        let first = state.banners[0].id;
        let state = state.reduce(AlertAction::Dismiss(first, DismissReason::Closed));
        assert_eq!(state.banners.len(), 1);
        assert_eq!(state.banners[0].alert.message, "second");
    }

    #[test]
    fn expiry_after_manual_close_is_a_no_op() {
        let state = push(Rc::new(AlertsState::default()), "hello");
        let id = state.banners[0].id;
        let closed = state.reduce(AlertAction::Dismiss(id, DismissReason::Closed));
        let expired = closed.clone().reduce(AlertAction::Dismiss(id, DismissReason::Expired));
        assert!(Rc::ptr_eq(&closed, &expired));
    }

    #[test]
    fn banner_dismisses_once() {
        let mut banner = Banner {
            id: 0,
            alert: alert("x"),
            state: BannerState::Visible,
        };
        assert!(banner.dismiss(DismissReason::Expired));
        assert!(!banner.dismiss(DismissReason::Closed));
        assert_eq!(banner.state, BannerState::Dismissed(DismissReason::Expired));
    }

    #[test]
    fn channel_buffers_until_connected() {
        let channel = AlertChannel::default();
        channel.notify(Severity::Info, "early");
        channel.notify(Severity::Success, "also early");
        assert_eq!(channel.pending(), 2);

        let received = Rc::new(RefCell::new(Vec::new()));
        let sink = {
            let received = received.clone();
            Callback::from(move |alert: Alert| received.borrow_mut().push(alert.message))
        };
        channel.connect(sink);
        channel.notify(Severity::Info, "late");

        assert_eq!(channel.pending(), 0);
        assert_eq!(*received.borrow(), vec!["early", "also early", "late"]);
    }

    #[test]
    fn disconnected_channel_buffers_again() {
        let channel = AlertChannel::default();
        channel.connect(Callback::from(|_: Alert| ()));
        channel.disconnect();
        channel.notify(Severity::Info, "queued");
        assert_eq!(channel.pending(), 1);
    }
}
