use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use slotmap::{SlotMap, new_key_type};

use crate::scheduler::Scheduler;

new_key_type! {
    /// Handle returned by [`Timers::set_interval`] and [`Timers::set_timeout`].
    pub struct TimerId;
}

// Intervals shorter than this are clamped so `advance` always makes progress.
const MIN_PERIOD: Duration = Duration::from_millis(1);

struct TimerEntry {
    due: Duration,
    period: Option<Duration>,
    seq: u64,
    callback: Rc<dyn Fn()>,
}

/// Timers ordered by due time, then by registration order.
#[derive(Default)]
pub(crate) struct TimerQueue {
    entries: SlotMap<TimerId, TimerEntry>,
    next_seq: u64,
}

impl TimerQueue {
    fn insert(&mut self, due: Duration, period: Option<Duration>, callback: Rc<dyn Fn()>) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert(TimerEntry {
            due,
            period,
            seq,
            callback,
        })
    }

    fn remove(&mut self, id: TimerId) -> bool {
        self.entries.remove(id).is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Takes the earliest timer due at or before `deadline`. Intervals are
    /// rescheduled one period later; timeouts are removed.
    pub(crate) fn pop_due(&mut self, deadline: Duration) -> Option<(Duration, Rc<dyn Fn()>)> {
        let (id, due) = self
            .entries
            .iter()
            .filter(|(_, e)| e.due <= deadline)
            .min_by_key(|(_, e)| (e.due, e.seq))
            .map(|(id, e)| (id, e.due))?;

        let entry = &mut self.entries[id];
        let callback = entry.callback.clone();
        match entry.period {
            Some(period) => entry.due += period,
            None => {
                self.entries.remove(id);
            }
        }
        Some((due, callback))
    }
}

/// Timer API on the runtime's virtual clock.
///
/// Time only moves when [`Runtime::advance`](crate::Runtime::advance) is
/// called; each firing is handled like a user event and followed by a flush.
#[derive(Clone)]
pub struct Timers {
    scheduler: Scheduler,
}

impl Timers {
    pub(crate) fn new(scheduler: Scheduler) -> Self {
        Self { scheduler }
    }

    pub fn set_interval(&self, period: Duration, f: impl Fn() + 'static) -> TimerId {
        let period = period.max(MIN_PERIOD);
        let due = self.scheduler.now() + period;
        let id = self
            .scheduler
            .with_timers(|t| t.insert(due, Some(period), Rc::new(f)));
        log::trace!("interval {id:?} every {period:?}, first at {due:?}");
        id
    }

    pub fn set_timeout(&self, delay: Duration, f: impl FnOnce() + 'static) -> TimerId {
        let due = self.scheduler.now() + delay;
        let once = RefCell::new(Some(f));
        let callback = Rc::new(move || {
            if let Some(f) = once.borrow_mut().take() {
                f();
            }
        });
        let id = self.scheduler.with_timers(|t| t.insert(due, None, callback));
        log::trace!("timeout {id:?} at {due:?}");
        id
    }

    /// Cancels a timer. Returns `false` if it already fired (timeouts) or was
    /// cleared before.
    pub fn clear(&self, id: TimerId) -> bool {
        let removed = self.scheduler.with_timers(|t| t.remove(id));
        if removed {
            log::trace!("cleared timer {id:?}");
        }
        removed
    }

    pub fn active(&self) -> usize {
        self.scheduler.with_timers(|t| t.len())
    }
}
