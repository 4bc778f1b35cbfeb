use std::{cell::RefCell, rc::Rc, time::Duration};

/// Identifies one scheduled countdown tick.
///
/// Ids are never reused within a session, so a tick that fires after being superseded can be told
/// apart from the live one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TickId(pub u64);

/// One-shot delayed callbacks for the countdown.
///
/// When a scheduled tick expires the host calls [`crate::Session::on_tick`] with its id. A
/// cancelled tick must not be delivered.
pub trait TickScheduler {
    /// Deliver `id` once, after `delay`.
    fn schedule(&mut self, id: TickId, delay: Duration);
    /// Drop a scheduled tick. Unknown or already-delivered ids are ignored.
    fn cancel(&mut self, id: TickId);
}

#[derive(Debug, Default)]
struct ManualState {
    now: Duration,
    pending: Vec<(Duration, TickId)>,
    scheduled: u64,
    cancelled: u64,
}

/// Virtual-clock scheduler driven explicitly by the host.
///
/// Clones share one clock, so a test (or headless driver) can keep a handle while the session owns
/// another.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    state: Rc<RefCell<ManualState>>,
}

impl ManualScheduler {
    /// Scheduler at virtual time zero with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    /// Pending tick ids, earliest first.
    pub fn pending(&self) -> Vec<TickId> {
        let mut pending = self.state.borrow().pending.clone();
        pending.sort();
        pending.into_iter().map(|(_, id)| id).collect()
    }

    /// Time left until the earliest pending tick.
    pub fn next_due_in(&self) -> Option<Duration> {
        let st = self.state.borrow();
        st.pending
            .iter()
            .map(|(due, _)| due.saturating_sub(st.now))
            .min()
    }

    /// Move the clock forward and return the ticks that became due, in due order.
    ///
    /// Returned ticks are removed from the pending set; the caller is expected to deliver them.
    pub fn advance(&self, by: Duration) -> Vec<TickId> {
        let mut st = self.state.borrow_mut();
        st.now += by;
        let now = st.now;

        let mut due: Vec<(Duration, TickId)> = Vec::new();
        st.pending.retain(|&(at, id)| {
            if at <= now {
                due.push((at, id));
                false
            } else {
                true
            }
        });
        due.sort();
        due.into_iter().map(|(_, id)| id).collect()
    }

    /// Total ticks ever scheduled.
    pub fn scheduled_count(&self) -> u64 {
        self.state.borrow().scheduled
    }

    /// Total ticks cancelled while still pending.
    pub fn cancelled_count(&self) -> u64 {
        self.state.borrow().cancelled
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule(&mut self, id: TickId, delay: Duration) {
        let mut st = self.state.borrow_mut();
        let due = st.now + delay;
        st.pending.push((due, id));
        st.scheduled += 1;
    }

    fn cancel(&mut self, id: TickId) {
        let mut st = self.state.borrow_mut();
        let before = st.pending.len();
        st.pending.retain(|&(_, p)| p != id);
        if st.pending.len() != before {
            st.cancelled += 1;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/timer.rs"]
mod tests;
