use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::cx::Cx;
use crate::runtime::InstanceKey;
use crate::scheduler::Scheduler;
use crate::view::ViewId;

/// Render-persistent storage that never schedules a render.
///
/// Reads always see the latest write, including writes made earlier in the
/// same render pass.
pub struct MutableCell<T>(Rc<RefCell<T>>);

impl<T> MutableCell<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(value)))
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.0.borrow().clone()
    }

    pub fn set(&self, value: T) {
        *self.0.borrow_mut() = value;
    }

    pub fn replace(&self, value: T) -> T {
        self.0.replace(value)
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.0.borrow())
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.0.borrow_mut())
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for MutableCell<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> PartialEq for MutableCell<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<T: fmt::Debug> fmt::Debug for MutableCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MutableCell").field(&*self.0.borrow()).finish()
    }
}

/// Handle to a committed view node, written into a [`NodeRef`] at commit.
#[derive(Clone)]
pub struct NodeHandle {
    instance: InstanceKey,
    id: ViewId,
    scheduler: Scheduler,
}

impl NodeHandle {
    pub(crate) fn new(instance: InstanceKey, id: ViewId, scheduler: Scheduler) -> Self {
        Self {
            instance,
            id,
            scheduler,
        }
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    /// Moves focus to this node. Does not render.
    pub fn focus(&self) {
        self.scheduler.focus(self.instance, self.id);
    }

    pub fn is_focused(&self) -> bool {
        self.scheduler.focused() == Some((self.instance, self.id))
    }
}

impl fmt::Debug for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeHandle")
            .field("instance", &self.instance)
            .field("id", &self.id)
            .finish()
    }
}

pub type NodeRef = MutableCell<Option<NodeHandle>>;

impl Cx<'_> {
    pub fn use_ref<T: 'static>(&mut self, init: impl FnOnce() -> T) -> MutableCell<T> {
        (*self.remember(|| MutableCell::new(init()))).clone()
    }

    /// A [`NodeRef`] to attach to a text field with
    /// [`View::node_ref`](crate::View::node_ref).
    pub fn use_node_ref(&mut self) -> NodeRef {
        self.use_ref(|| None)
    }
}
