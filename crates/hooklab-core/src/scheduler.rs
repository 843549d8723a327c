use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use crate::runtime::InstanceKey;
use crate::timer::TimerQueue;
use crate::view::ViewId;

/// Shared event-loop state.
///
/// State setters, timers and node handles hold a clone so they can queue
/// work without borrowing the [`Runtime`](crate::Runtime).
#[derive(Clone, Default)]
pub struct Scheduler {
    inner: Rc<SchedulerInner>,
}

#[derive(Default)]
struct SchedulerInner {
    dirty: RefCell<Vec<InstanceKey>>,
    timers: RefCell<TimerQueue>,
    now: Cell<Duration>,
    focused: Cell<Option<(InstanceKey, ViewId)>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a render of `key`. Repeated calls before the next flush collapse
    /// into one render.
    pub fn mark_dirty(&self, key: InstanceKey) {
        let mut dirty = self.inner.dirty.borrow_mut();
        if !dirty.contains(&key) {
            dirty.push(key);
        }
    }

    pub fn is_dirty(&self, key: InstanceKey) -> bool {
        self.inner.dirty.borrow().contains(&key)
    }

    pub fn has_pending_renders(&self) -> bool {
        !self.inner.dirty.borrow().is_empty()
    }

    pub(crate) fn take_dirty(&self) -> Vec<InstanceKey> {
        std::mem::take(&mut *self.inner.dirty.borrow_mut())
    }

    /// Current time on the virtual clock.
    pub fn now(&self) -> Duration {
        self.inner.now.get()
    }

    pub(crate) fn set_now(&self, now: Duration) {
        self.inner.now.set(now);
    }

    pub(crate) fn with_timers<R>(&self, f: impl FnOnce(&mut TimerQueue) -> R) -> R {
        f(&mut self.inner.timers.borrow_mut())
    }

    pub fn focus(&self, instance: InstanceKey, id: ViewId) {
        log::trace!("focus moved to node {id} of {instance:?}");
        self.inner.focused.set(Some((instance, id)));
    }

    pub fn focused(&self) -> Option<(InstanceKey, ViewId)> {
        self.inner.focused.get()
    }

    /// Drops queued renders and focus that belong to an unmounted instance.
    pub(crate) fn forget(&self, instance: InstanceKey) {
        self.inner.dirty.borrow_mut().retain(|k| *k != instance);
        if matches!(self.inner.focused.get(), Some((owner, _)) if owner == instance) {
            self.inner.focused.set(None);
        }
    }
}
