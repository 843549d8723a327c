use std::cell::{Cell, RefCell};
use std::rc::Rc;

use smallvec::SmallVec;

use crate::cx::Cx;

#[derive(Clone)]
pub struct Dispose(Rc<RefCell<Option<Box<dyn FnOnce()>>>>);

impl Dispose {
    pub fn new(f: impl FnOnce() + 'static) -> Self {
        Self(Rc::new(RefCell::new(Some(Box::new(f)))))
    }

    /// Runs at most once (safe to call multiple times).
    pub fn run(&self) {
        let f = self.0.borrow_mut().take();
        if let Some(f) = f {
            f()
        }
    }
}

/// Cleanup to return from an effect action.
pub fn on_cleanup(f: impl FnOnce() + 'static) -> Option<Dispose> {
    Some(Dispose::new(f))
}

/// Lifecycle of one effect record.
///
/// `Unmounted -> Mounted` on the first commit, `Mounted -> Mounted` on a
/// dependency change (cleanup, then the action again), `Mounted -> Disposed`
/// on teardown. `Disposed` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectPhase {
    Unmounted,
    Mounted,
    Disposed,
}

pub(crate) struct EffectRecord {
    phase: Cell<EffectPhase>,
    cleanup: RefCell<Option<Dispose>>,
    runs: Cell<u64>,
}

impl EffectRecord {
    fn new() -> Self {
        Self {
            phase: Cell::new(EffectPhase::Unmounted),
            cleanup: RefCell::new(None),
            runs: Cell::new(0),
        }
    }

    pub(crate) fn phase(&self) -> EffectPhase {
        self.phase.get()
    }

    fn run_cleanup(&self) {
        let cleanup = self.cleanup.borrow_mut().take();
        if let Some(d) = cleanup {
            d.run();
        }
    }

    fn run_action(&self, action: Box<dyn FnOnce() -> Option<Dispose>>) {
        if self.phase.get() == EffectPhase::Disposed {
            return;
        }
        let cleanup = action();
        *self.cleanup.borrow_mut() = cleanup;
        self.phase.set(EffectPhase::Mounted);
        self.runs.set(self.runs.get() + 1);
    }

    /// Runs the last cleanup once and moves to `Disposed`.
    pub(crate) fn teardown(&self) {
        if self.phase.get() == EffectPhase::Disposed {
            return;
        }
        self.run_cleanup();
        self.phase.set(EffectPhase::Disposed);
        log::trace!("effect disposed after {} runs", self.runs.get());
    }
}

pub(crate) struct PendingEffect {
    record: Rc<EffectRecord>,
    action: Box<dyn FnOnce() -> Option<Dispose>>,
}

/// Work produced by one render, applied when the render commits.
#[derive(Default)]
pub(crate) struct CommitQueue {
    pub(crate) effects: SmallVec<[PendingEffect; 4]>,
    pub(crate) registered: Vec<Rc<EffectRecord>>,
}

/// Runs due cleanups, then due actions, each in registration order.
/// Returns how many actions ran.
pub(crate) fn run_effects(effects: SmallVec<[PendingEffect; 4]>) -> usize {
    for pending in &effects {
        if pending.record.phase() == EffectPhase::Mounted {
            pending.record.run_cleanup();
        }
    }
    let ran = effects.len();
    for pending in effects {
        pending.record.run_action(pending.action);
    }
    ran
}

struct EffectSlot<D> {
    record: Rc<EffectRecord>,
    deps: RefCell<Option<D>>,
}

// The slot goes away on unmount or when a render stops calling the hook.
impl<D> Drop for EffectSlot<D> {
    fn drop(&mut self) {
        self.record.teardown();
    }
}

impl Cx<'_> {
    /// Registers a side effect that runs after this render commits if `deps`
    /// differ from the previous commit's (or this is the first commit).
    ///
    /// The action may return a cleanup, which runs before the next action of
    /// this effect and when the instance unmounts.
    pub fn use_effect<D>(&mut self, deps: D, action: impl FnOnce() -> Option<Dispose> + 'static)
    where
        D: PartialEq + 'static,
    {
        let mut fresh = false;
        let slot = self.remember(|| {
            fresh = true;
            EffectSlot::<D> {
                record: Rc::new(EffectRecord::new()),
                deps: RefCell::new(None),
            }
        });
        if fresh {
            self.commit.registered.push(slot.record.clone());
        }

        let changed = slot.deps.borrow().as_ref() != Some(&deps);
        if changed {
            *slot.deps.borrow_mut() = Some(deps);
            self.commit.effects.push(PendingEffect {
                record: slot.record.clone(),
                action: Box::new(action),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispose_runs_once() {
        let hits = Rc::new(Cell::new(0));
        let d = Dispose::new({
            let hits = hits.clone();
            move || hits.set(hits.get() + 1)
        });
        let d2 = d.clone();
        d.run();
        d2.run();
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_record_phases() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let record = EffectRecord::new();
        assert_eq!(record.phase(), EffectPhase::Unmounted);

        let l = log.clone();
        record.run_action(Box::new(move || {
            l.borrow_mut().push("run");
            let l = l.clone();
            on_cleanup(move || l.borrow_mut().push("cleanup"))
        }));
        assert_eq!(record.phase(), EffectPhase::Mounted);

        record.teardown();
        record.teardown();
        assert_eq!(record.phase(), EffectPhase::Disposed);

        // a disposed record never runs its action again
        let l = log.clone();
        record.run_action(Box::new(move || {
            l.borrow_mut().push("late");
            None
        }));
        assert_eq!(*log.borrow(), vec!["run", "cleanup"]);
    }
}
