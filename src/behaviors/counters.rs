use gloo_timers::future::TimeoutFuture;
use log::debug;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::behaviors::observer::OneShotObserver;
use crate::config::PageConfig;
use crate::dom;
use crate::error::PageError;

pub const COUNTERS: &str = ".stat-box h3";

/// Counters only animate whole, non-negative numbers; anything else keeps its text.
pub fn parse_target(text: &str) -> Option<u64> {
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Values shown while counting from 0 to `target`, rounded up, never past
/// the target and always ending exactly on it.
#[derive(Debug, Clone)]
pub struct CounterAnimation {
    count: f64,
    target: u64,
    increment: f64,
    done: bool,
}

impl CounterAnimation {
    pub fn new(target: u64, steps: u32) -> Self {
        Self {
            count: 0.0,
            target,
            increment: target as f64 / f64::from(steps.max(1)),
            done: false,
        }
    }
}

impl Iterator for CounterAnimation {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.done {
            return None;
        }
        let target = self.target as f64;
        if self.count < target {
            self.count += self.increment;
            let shown = (self.count.ceil() as u64).min(self.target);
            if shown == self.target {
                self.done = true;
            }
            Some(shown)
        } else {
            self.done = true;
            Some(self.target)
        }
    }
}

fn animate(counter: Element, steps: u32, tick_ms: u32) {
    let original = counter.text_content().unwrap_or_default();
    let Some(target) = parse_target(&original) else {
        return;
    };
    let original = original.trim().to_string();
    spawn_local(async move {
        let mut values = CounterAnimation::new(target, steps).peekable();
        while let Some(value) = values.next() {
            counter.set_text_content(Some(&value.to_string()));
            if values.peek().is_some() {
                TimeoutFuture::new(tick_ms).await;
            }
        }
        counter.set_text_content(Some(&original));
    });
}

pub fn wire(config: &PageConfig) -> Result<Option<OneShotObserver>, PageError> {
    let counters: Vec<Element> = dom::query_all(COUNTERS)
        .into_iter()
        .filter(|el| parse_target(&el.text_content().unwrap_or_default()).is_some())
        .collect();
    if counters.is_empty() {
        return Ok(None);
    }
    let (steps, tick_ms) = (config.counter_steps, config.counter_tick_ms);
    let observer = OneShotObserver::new(None, move |element| {
        animate(element.clone(), steps, tick_ms);
    })?;
    observer.observe_all(&counters);
    debug!("Animating {} counters", counters.len());
    Ok(Some(observer))
}
