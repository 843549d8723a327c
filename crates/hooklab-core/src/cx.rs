use std::rc::Rc;

use crate::effects::CommitQueue;
use crate::runtime::{Composer, InstanceKey};
use crate::scheduler::Scheduler;
use crate::timer::Timers;

/// Render context handed to a component.
///
/// Every `use_*` hook takes the next slot of the instance's [`Composer`], so
/// hooks must be called in the same order on every render.
pub struct Cx<'a> {
    composer: &'a mut Composer,
    pub(crate) commit: &'a mut CommitQueue,
    instance: InstanceKey,
    scheduler: &'a Scheduler,
}

impl<'a> Cx<'a> {
    pub(crate) fn new(
        composer: &'a mut Composer,
        commit: &'a mut CommitQueue,
        instance: InstanceKey,
        scheduler: &'a Scheduler,
    ) -> Self {
        Self {
            composer,
            commit,
            instance,
            scheduler,
        }
    }

    /// Context for a nested component that keeps its slots in `composer`
    /// but commits with this instance.
    pub(crate) fn reborrow<'b>(&'b mut self, composer: &'b mut Composer) -> Cx<'b> {
        Cx {
            composer,
            commit: &mut *self.commit,
            instance: self.instance,
            scheduler: self.scheduler,
        }
    }

    pub fn instance(&self) -> InstanceKey {
        self.instance
    }

    pub fn scheduler(&self) -> &Scheduler {
        self.scheduler
    }

    pub(crate) fn pending_flag(&self) -> Rc<std::cell::Cell<bool>> {
        self.composer.pending_flag()
    }

    pub fn timers(&self) -> Timers {
        Timers::new(self.scheduler.clone())
    }

    /// Order-based slot: the Nth call in a render returns the Nth value.
    pub fn remember<T: 'static>(&mut self, init: impl FnOnce() -> T) -> Rc<T> {
        self.composer.remember(init)
    }

    /// Key-based slot, stable across conditional branches.
    pub fn remember_with_key<T: 'static>(
        &mut self,
        key: impl Into<String>,
        init: impl FnOnce() -> T,
    ) -> Rc<T> {
        self.composer.remember_with_key(key, init)
    }
}
