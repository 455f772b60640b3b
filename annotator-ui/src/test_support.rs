//! Scripted backend and page host for driving the state machines natively.

use async_trait::async_trait;
use futures::channel::oneshot;
use shared_types::ActionResponse;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use crate::api::{ApiCall, Backend};
use crate::error::ActionError;
use crate::host::PageHost;

#[derive(Default)]
pub struct MockBackend {
    pub calls: RefCell<Vec<ApiCall>>,
    responses: RefCell<VecDeque<Result<ActionResponse, ActionError>>>,
    gate: RefCell<Option<oneshot::Receiver<()>>>,
}

impl MockBackend {
    pub fn replying(response: Result<ActionResponse, ActionError>) -> Self {
        let backend = Self::default();
        backend.push(response);
        backend
    }

    pub fn push(&self, response: Result<ActionResponse, ActionError>) {
        self.responses.borrow_mut().push_back(response);
    }

    /// Hold the next request in flight until the returned sender fires.
    pub fn hold_next(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.gate.borrow_mut() = Some(rx);
        tx
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

#[async_trait(?Send)]
impl Backend for MockBackend {
    async fn send(&self, call: ApiCall) -> Result<ActionResponse, ActionError> {
        self.calls.borrow_mut().push(call);
        let gate = self.gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ActionError::Network("no scripted response".into())))
    }
}

type TickSlot = Rc<RefCell<Option<Box<dyn FnMut(f64)>>>>;

pub struct MockHost {
    pub now: Cell<f64>,
    pub confirm_answer: Cell<bool>,
    pub alerts: RefCell<Vec<String>>,
    pub confirms: RefCell<Vec<String>>,
    pub reloads: Cell<usize>,
    pub navigations: RefCell<Vec<String>>,
    pub tickers_started: Cell<usize>,
    active_tickers: Rc<Cell<usize>>,
    tick: TickSlot,
}

impl Default for MockHost {
    fn default() -> Self {
        Self {
            now: Cell::new(1_000_000.0),
            confirm_answer: Cell::new(true),
            alerts: RefCell::default(),
            confirms: RefCell::default(),
            reloads: Cell::new(0),
            navigations: RefCell::default(),
            tickers_started: Cell::new(0),
            active_tickers: Rc::new(Cell::new(0)),
            tick: Rc::new(RefCell::new(None)),
        }
    }
}

impl MockHost {
    pub fn declining() -> Self {
        let host = Self::default();
        host.confirm_answer.set(false);
        host
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }

    /// Fire the live ticker, if any, at the current time.
    pub fn fire_tick(&self) {
        if let Some(on_tick) = self.tick.borrow_mut().as_mut() {
            on_tick(self.now.get());
        }
    }

    pub fn active_tickers(&self) -> usize {
        self.active_tickers.get()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }
}

pub struct MockTicker {
    active: Rc<Cell<usize>>,
    slot: TickSlot,
}

impl Drop for MockTicker {
    fn drop(&mut self) {
        self.active.set(self.active.get() - 1);
        self.slot.borrow_mut().take();
    }
}

impl PageHost for MockHost {
    type Ticker = MockTicker;

    fn now_ms(&self) -> f64 {
        self.now.get()
    }

    fn start_ticker(&self, _period_ms: u32, on_tick: Box<dyn FnMut(f64)>) -> MockTicker {
        self.tickers_started.set(self.tickers_started.get() + 1);
        self.active_tickers.set(self.active_tickers.get() + 1);
        *self.tick.borrow_mut() = Some(on_tick);
        MockTicker {
            active: self.active_tickers.clone(),
            slot: self.tick.clone(),
        }
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }

    fn confirm(&self, message: &str) -> bool {
        self.confirms.borrow_mut().push(message.to_string());
        self.confirm_answer.get()
    }

    fn reload(&self) {
        self.reloads.set(self.reloads.get() + 1);
    }

    fn navigate(&self, location: &str) {
        self.navigations.borrow_mut().push(location.to_string());
    }
}
