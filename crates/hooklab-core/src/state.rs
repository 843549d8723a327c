use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::cx::Cx;
use crate::runtime::InstanceKey;
use crate::scheduler::Scheduler;

enum Update<T> {
    Replace(T),
    Apply(Box<dyn FnOnce(&T) -> T>),
}

struct StateSlot<T> {
    value: RefCell<T>,
    queue: RefCell<Vec<Update<T>>>,
    owner: InstanceKey,
    scheduler: Scheduler,
    composer_pending: Rc<Cell<bool>>,
}

/// Handle to a state slot of one instance.
///
/// `get` returns the value the last render committed. Writes are queued on
/// the slot and folded, in order, when the owner next renders; every write
/// marks the owner dirty, so a handler that writes several times (to one slot
/// or many) still causes exactly one render.
pub struct State<T: 'static> {
    slot: Rc<StateSlot<T>>,
}

impl<T: 'static> State<T> {
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.slot.value.borrow().clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.slot.value.borrow())
    }

    pub fn set(&self, value: T) {
        self.enqueue(Update::Replace(value));
    }

    /// Queues an updater. It receives the result of every write queued before
    /// it, not the value this handle saw when it was captured.
    pub fn update(&self, f: impl FnOnce(&T) -> T + 'static) {
        self.enqueue(Update::Apply(Box::new(f)));
    }

    /// Writes still waiting for the next render.
    pub fn pending(&self) -> usize {
        self.slot.queue.borrow().len()
    }

    pub fn owner(&self) -> InstanceKey {
        self.slot.owner
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.slot, &other.slot)
    }

    fn enqueue(&self, update: Update<T>) {
        self.slot.queue.borrow_mut().push(update);
        self.slot.composer_pending.set(true);
        self.slot.scheduler.mark_dirty(self.slot.owner);
    }

    /// Folds queued writes into the stored value. Returns how many applied.
    fn process(&self) -> usize {
        let updates = std::mem::take(&mut *self.slot.queue.borrow_mut());
        let applied = updates.len();
        for update in updates {
            let next = match update {
                Update::Replace(v) => v,
                Update::Apply(f) => f(&self.slot.value.borrow()),
            };
            *self.slot.value.borrow_mut() = next;
        }
        applied
    }
}

impl<T: 'static> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
        }
    }
}

impl<T: 'static> PartialEq for State<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for State<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("value", &*self.slot.value.borrow())
            .field("pending", &self.pending())
            .finish()
    }
}

impl Cx<'_> {
    /// Declares a state slot. `init` runs on the first render only.
    pub fn use_state<T: 'static>(&mut self, init: impl FnOnce() -> T) -> State<T> {
        let owner = self.instance();
        let scheduler = self.scheduler().clone();
        let composer_pending = self.pending_flag();
        let state = self.remember(|| State {
            slot: Rc::new(StateSlot {
                value: RefCell::new(init()),
                queue: RefCell::new(Vec::new()),
                owner,
                scheduler,
                composer_pending,
            }),
        });
        let applied = state.process();
        if applied > 0 {
            log::trace!("state slot folded {applied} queued writes");
        }
        (*state).clone()
    }
}
