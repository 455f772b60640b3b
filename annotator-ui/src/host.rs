use dioxus::dioxus_core::Task;
use dioxus::prelude::spawn;
use gloo_timers::future::TimeoutFuture;

/// Side effects the state machines need from the page.
pub trait PageHost {
    /// Stops the ticker when dropped.
    type Ticker;

    /// Milliseconds since the epoch.
    fn now_ms(&self) -> f64;

    /// Call `on_tick` with the current time every `period_ms` until the
    /// returned handle is dropped.
    fn start_ticker(&self, period_ms: u32, on_tick: Box<dyn FnMut(f64)>) -> Self::Ticker;

    /// Blocking notification.
    fn alert(&self, message: &str);

    /// Blocking yes/no question. Anything but an explicit yes is a no.
    fn confirm(&self, message: &str) -> bool;

    fn reload(&self);

    fn navigate(&self, location: &str);
}

/// [`PageHost`] backed by the browser window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrowserHost;

/// Progress ticker running as a Dioxus task.
pub struct TaskTicker(Task);

impl Drop for TaskTicker {
    fn drop(&mut self) {
        self.0.cancel();
    }
}

impl PageHost for BrowserHost {
    type Ticker = TaskTicker;

    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }

    fn start_ticker(&self, period_ms: u32, mut on_tick: Box<dyn FnMut(f64)>) -> TaskTicker {
        TaskTicker(spawn(async move {
            loop {
                TimeoutFuture::new(period_ms).await;
                on_tick(js_sys::Date::now());
            }
        }))
    }

    fn alert(&self, message: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.alert_with_message(message) {
            dioxus_logger::tracing::error!("alert failed: {:?}", e);
        }
    }

    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }

    fn reload(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.location().reload() {
            dioxus_logger::tracing::error!("reload failed: {:?}", e);
        }
    }

    fn navigate(&self, location: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.location().set_href(location) {
            dioxus_logger::tracing::error!("navigation to {} failed: {:?}", location, e);
        }
    }
}
