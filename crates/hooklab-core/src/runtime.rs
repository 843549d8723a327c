use std::any::Any;
use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use slotmap::{SlotMap, new_key_type};
use web_time::Instant;

use crate::cell::NodeHandle;
use crate::cx::Cx;
use crate::effects::{CommitQueue, EffectPhase, EffectRecord, run_effects};
use crate::error::RuntimeError;
use crate::scheduler::Scheduler;
use crate::timer::Timers;
use crate::view::{View, ViewKind, snap_to_step};

new_key_type! {
    /// Identifies a mounted instance.
    pub struct InstanceKey;
}

pub type Component = Rc<dyn Fn(&mut Cx<'_>) -> View>;

/// Per-instance slot storage.
#[derive(Default)]
pub struct Composer {
    pub slots: Vec<Box<dyn Any>>,
    pub cursor: usize,
    pub keyed_slots: HashMap<String, Box<dyn Any>>,
    passes: u64,
    // set by writes to state declared in this composer
    pending: Rc<Cell<bool>>,
}

impl Composer {
    pub fn begin(&mut self) {
        self.cursor = 0;
        self.pending.set(false);
    }

    /// Whether state declared here has been written since the last `begin`.
    pub fn has_pending_writes(&self) -> bool {
        self.pending.get()
    }

    pub(crate) fn pending_flag(&self) -> Rc<Cell<bool>> {
        self.pending.clone()
    }

    /// Closes a render pass. A slot count that differs from the previous pass
    /// means hooks were called conditionally; effects in dropped slots are
    /// torn down.
    pub fn end(&mut self, owner: &str) {
        if self.passes > 0 && self.cursor != self.slots.len() {
            log::warn!(
                "{owner}: rendered {} slots, previous render had {}. \
                 Hooks must be called in the same order on every render.",
                self.cursor,
                self.slots.len()
            );
        }
        self.slots.truncate(self.cursor);
        self.passes += 1;
    }

    /// Slot-based remember (sequential composition only)
    pub fn remember<T: 'static>(&mut self, init: impl FnOnce() -> T) -> Rc<T> {
        let cursor = self.cursor;
        self.cursor += 1;

        if cursor >= self.slots.len() {
            let rc: Rc<T> = Rc::new(init());
            self.slots.push(Box::new(rc.clone()));
            return rc;
        }

        if let Some(rc) = self.slots[cursor].downcast_ref::<Rc<T>>() {
            rc.clone()
        } else {
            log::warn!(
                "remember: slot {} type changed; replacing. \
                 If this is due to conditional rendering, prefer remember_with_key.",
                cursor
            );
            let rc: Rc<T> = Rc::new(init());
            self.slots[cursor] = Box::new(rc.clone());
            rc
        }
    }

    /// Key-based remember
    pub fn remember_with_key<T: 'static>(
        &mut self,
        key: impl Into<String>,
        init: impl FnOnce() -> T,
    ) -> Rc<T> {
        let key = key.into();

        if let Some(existing) = self.keyed_slots.get(&key) {
            if let Some(rc) = existing.downcast_ref::<Rc<T>>() {
                return rc.clone();
            } else {
                log::warn!(
                    "remember_with_key: key '{}' reused with a different type; replacing.",
                    key
                );
            }
        }

        let rc: Rc<T> = Rc::new(init());
        self.keyed_slots.insert(key, Box::new(rc.clone()));
        rc
    }
}

struct Instance {
    name: String,
    component: Component,
    composer: Composer,
    effects: Vec<Rc<EffectRecord>>,
    view: Option<View>,
    renders: u64,
}

#[derive(Clone, Debug)]
pub struct RuntimeOptions {
    /// Render passes one flush may take before it gives up. Effects that keep
    /// writing state on every commit hit this limit.
    pub max_update_depth: usize,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            max_update_depth: 50,
        }
    }
}

/// Reported to observers after every commit.
#[derive(Debug)]
pub struct RenderInfo<'a> {
    pub instance: InstanceKey,
    pub name: &'a str,
    pub render: u64,
    pub duration: Duration,
    pub effects_run: usize,
}

pub trait RenderObserver {
    fn on_render(&self, info: &RenderInfo<'_>);
}

/// An input event addressed to a control by key or label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Interaction {
    Click(String),
    Slide(String, i64),
    Input(String, String),
}

impl Interaction {
    pub fn target(&self) -> &str {
        match self {
            Interaction::Click(t) | Interaction::Slide(t, _) | Interaction::Input(t, _) => t,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Interaction::Click(_) => "click",
            Interaction::Slide(..) => "slide",
            Interaction::Input(..) => "input",
        }
    }
}

/// Owns mounted instances and drives render, commit, effects and timers on
/// a single thread.
pub struct Runtime {
    instances: SlotMap<InstanceKey, Instance>,
    scheduler: Scheduler,
    options: RuntimeOptions,
    observers: Vec<Rc<dyn RenderObserver>>,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    pub fn new() -> Self {
        Self::with_options(RuntimeOptions::default())
    }

    pub fn with_options(options: RuntimeOptions) -> Self {
        Self {
            instances: SlotMap::with_key(),
            scheduler: Scheduler::new(),
            options,
            observers: Vec::new(),
        }
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn timers(&self) -> Timers {
        Timers::new(self.scheduler.clone())
    }

    pub fn observe(&mut self, observer: Rc<dyn RenderObserver>) {
        self.observers.push(observer);
    }

    pub fn mount(
        &mut self,
        name: impl Into<String>,
        component: impl Fn(&mut Cx<'_>) -> View + 'static,
    ) -> Result<InstanceKey, RuntimeError> {
        self.mount_component(name, Rc::new(component))
    }

    /// Inserts an instance and runs its first render and commit.
    pub fn mount_component(
        &mut self,
        name: impl Into<String>,
        component: Component,
    ) -> Result<InstanceKey, RuntimeError> {
        let name = name.into();
        log::debug!("mounting {name}");
        let key = self.instances.insert(Instance {
            name,
            component,
            composer: Composer::default(),
            effects: Vec::new(),
            view: None,
            renders: 0,
        });
        self.scheduler.mark_dirty(key);
        self.flush()?;
        Ok(key)
    }

    /// Tears down every effect of the instance in registration order, then
    /// drops it. Writes still queued for it are discarded.
    pub fn unmount(&mut self, key: InstanceKey) -> Result<(), RuntimeError> {
        let instance = self
            .instances
            .remove(key)
            .ok_or(RuntimeError::UnknownInstance(key))?;
        log::debug!(
            "unmounting {} after {} renders, {} effects",
            instance.name,
            instance.renders,
            instance.effects.len()
        );
        for record in &instance.effects {
            record.teardown();
        }
        self.scheduler.forget(key);
        // cleanups may have written to other instances
        self.flush()?;
        Ok(())
    }

    pub fn is_mounted(&self, key: InstanceKey) -> bool {
        self.instances.contains_key(key)
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    pub fn name(&self, key: InstanceKey) -> Option<&str> {
        self.instances.get(key).map(|i| i.name.as_str())
    }

    /// Last committed view.
    pub fn view(&self, key: InstanceKey) -> Option<&View> {
        self.instances.get(key).and_then(|i| i.view.as_ref())
    }

    pub fn render_count(&self, key: InstanceKey) -> Option<u64> {
        self.instances.get(key).map(|i| i.renders)
    }

    /// The focused node, if it belongs to `key`.
    pub fn focused(&self, key: InstanceKey) -> Option<&View> {
        let (owner, id) = self.scheduler.focused()?;
        if owner != key {
            return None;
        }
        self.view(key)?.find_id(id)
    }

    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers().active()
    }

    pub fn click(&mut self, key: InstanceKey, target: &str) -> Result<(), RuntimeError> {
        self.dispatch(key, Interaction::Click(target.to_string()))
    }

    pub fn slide(&mut self, key: InstanceKey, target: &str, value: i64) -> Result<(), RuntimeError> {
        self.dispatch(key, Interaction::Slide(target.to_string(), value))
    }

    pub fn input(
        &mut self,
        key: InstanceKey,
        target: &str,
        text: impl Into<String>,
    ) -> Result<(), RuntimeError> {
        self.dispatch(key, Interaction::Input(target.to_string(), text.into()))
    }

    /// Runs the control's handler, then flushes. Effects of the resulting
    /// render have run by the time this returns.
    pub fn dispatch(&mut self, key: InstanceKey, interaction: Interaction) -> Result<(), RuntimeError> {
        let instance = self
            .instances
            .get(key)
            .ok_or(RuntimeError::UnknownInstance(key))?;
        let target = interaction.target();
        let node = instance
            .view
            .as_ref()
            .and_then(|v| v.find(target))
            .ok_or_else(|| RuntimeError::NoSuchControl {
                instance: instance.name.clone(),
                target: target.to_string(),
            })?;

        let handler: Box<dyn FnOnce()> = match (&node.kind, &interaction) {
            (ViewKind::Button { on_click, .. }, Interaction::Click(_)) => {
                let cb = on_click.clone();
                Box::new(move || cb.emit(()))
            }
            (
                ViewKind::Slider {
                    min,
                    max,
                    step,
                    on_change,
                    ..
                },
                Interaction::Slide(_, raw),
            ) => {
                let value = snap_to_step(*raw, *min, *max, *step);
                let cb = on_change.clone();
                Box::new(move || cb.emit(value))
            }
            (ViewKind::TextField { on_input, .. }, Interaction::Input(_, text)) => {
                let cb = on_input.clone();
                let text = text.clone();
                Box::new(move || cb.emit(text))
            }
            _ => {
                return Err(RuntimeError::NotInteractive {
                    target: target.to_string(),
                    interaction: interaction.kind(),
                });
            }
        };

        log::debug!("{} <- {interaction:?}", instance.name);
        handler();
        self.flush()?;
        Ok(())
    }

    /// Runs `f` as one event: its writes are batched, then flushed.
    pub fn batch<R>(&mut self, f: impl FnOnce() -> R) -> Result<R, RuntimeError> {
        let out = f();
        self.flush()?;
        Ok(out)
    }

    /// Renders dirty instances until none are left. Each pass renders every
    /// dirty instance once and runs its effects before the next pass.
    /// Returns the number of renders.
    pub fn flush(&mut self) -> Result<usize, RuntimeError> {
        let mut passes = 0;
        let mut renders = 0;
        loop {
            let dirty = self.scheduler.take_dirty();
            if dirty.is_empty() {
                break;
            }
            passes += 1;
            if passes > self.options.max_update_depth {
                // leave the unrendered work queued for the next flush
                for key in dirty {
                    self.scheduler.mark_dirty(key);
                }
                return Err(RuntimeError::UpdateDepthExceeded {
                    limit: self.options.max_update_depth,
                });
            }
            for key in dirty {
                if !self.instances.contains_key(key) {
                    log::debug!("dropping render for unmounted instance {key:?}");
                    continue;
                }
                self.render(key)?;
                renders += 1;
            }
        }
        if renders > 0 {
            log::trace!("flush: {renders} renders in {passes} passes");
        }
        Ok(renders)
    }

    /// Moves the virtual clock forward, firing due timers in order. Each
    /// firing is its own event and is followed by a flush.
    ///
    /// If a flush fails, the clock stays at the due time of the timer that
    /// caused it; timers due after that have not fired.
    pub fn advance(&mut self, by: Duration) -> Result<usize, RuntimeError> {
        let deadline = self.scheduler.now() + by;
        let mut fired = 0;
        while let Some((due, callback)) = self.scheduler.with_timers(|t| t.pop_due(deadline)) {
            self.scheduler.set_now(due);
            callback();
            fired += 1;
            self.flush()?;
        }
        self.scheduler.set_now(deadline);
        Ok(fired)
    }

    fn render(&mut self, key: InstanceKey) -> Result<(), RuntimeError> {
        let instance = self
            .instances
            .get_mut(key)
            .ok_or(RuntimeError::UnknownInstance(key))?;
        let started = Instant::now();
        let component = instance.component.clone();
        let mut commit = CommitQueue::default();

        instance.composer.begin();
        let mut view = {
            let mut cx = Cx::new(&mut instance.composer, &mut commit, key, &self.scheduler);
            component(&mut cx)
        };
        instance.composer.end(&instance.name);

        // commit
        view.assign_ids(&mut 1);
        let scheduler = &self.scheduler;
        view.walk(&mut |node| {
            if let ViewKind::TextField {
                node_ref: Some(r), ..
            } = &node.kind
            {
                r.set(Some(NodeHandle::new(key, node.id, scheduler.clone())));
            }
        });
        instance.view = Some(view);
        instance.renders += 1;

        let CommitQueue {
            effects,
            registered,
        } = commit;
        instance.effects.retain(|r| r.phase() != EffectPhase::Disposed);
        instance.effects.extend(registered);
        let effects_run = run_effects(effects);

        let info = RenderInfo {
            instance: key,
            name: &instance.name,
            render: instance.renders,
            duration: started.elapsed(),
            effects_run,
        };
        log::debug!(
            "rendered {} #{} in {:?} ({} effects)",
            info.name,
            info.render,
            info.duration,
            info.effects_run
        );
        for observer in &self.observers {
            observer.on_render(&info);
        }
        Ok(())
    }
}
