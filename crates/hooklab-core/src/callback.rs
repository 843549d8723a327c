use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::cx::Cx;
use crate::runtime::Composer;
use crate::view::View;

/// A shared handler whose equality is pointer identity.
///
/// Two clones of the same `Callback` compare equal; two callbacks built from
/// identical closures do not. That is what lets [`Cx::memo_child`] skip a
/// child whose props only differ by a freshly created handler.
pub struct Callback<A = (), R = ()> {
    f: Rc<dyn Fn(A) -> R>,
}

impl<A: 'static, R: 'static> Callback<A, R> {
    pub fn new(f: impl Fn(A) -> R + 'static) -> Self {
        Self { f: Rc::new(f) }
    }

    pub fn emit(&self, arg: A) -> R {
        (self.f)(arg)
    }
}

impl<A, R> Callback<A, R> {
    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.f), Rc::as_ptr(&other.f))
    }
}

impl<A, R> Clone for Callback<A, R> {
    fn clone(&self) -> Self {
        Self { f: self.f.clone() }
    }
}

impl<A, R> PartialEq for Callback<A, R> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<A, R> fmt::Debug for Callback<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback({:p})", Rc::as_ptr(&self.f) as *const ())
    }
}

struct CallbackEntry<D, A, R> {
    deps: D,
    callback: Callback<A, R>,
}

struct ChildSlot<P> {
    props: Option<P>,
    composer: Composer,
    view: Option<View>,
    renders: u64,
}

impl Cx<'_> {
    /// Returns last render's callback while `deps` is unchanged; otherwise
    /// wraps `f` in a new one.
    pub fn use_callback<D, A, R>(&mut self, deps: D, f: impl Fn(A) -> R + 'static) -> Callback<A, R>
    where
        D: PartialEq + 'static,
        A: 'static,
        R: 'static,
    {
        let slot = self.remember(|| RefCell::new(None::<CallbackEntry<D, A, R>>));
        let mut entry = slot.borrow_mut();
        if let Some(e) = entry.as_ref()
            && e.deps == deps
        {
            return e.callback.clone();
        }
        let callback = Callback::new(f);
        *entry = Some(CallbackEntry {
            deps,
            callback: callback.clone(),
        });
        callback
    }

    /// Renders a child component with its own slots, but only when `props`
    /// differ from the previous render's props or the child's own state was
    /// written. Otherwise the child's last view is reused and its hooks do
    /// not run.
    pub fn memo_child<P>(&mut self, props: P, render: impl FnOnce(&mut Cx<'_>, &P) -> View) -> View
    where
        P: PartialEq + 'static,
    {
        let slot = self.remember(|| {
            RefCell::new(ChildSlot::<P> {
                props: None,
                composer: Composer::default(),
                view: None,
                renders: 0,
            })
        });
        let mut child = slot.borrow_mut();
        if child.props.as_ref() == Some(&props)
            && !child.composer.has_pending_writes()
            && let Some(view) = &child.view
        {
            log::trace!("memo child skipped after {} renders", child.renders);
            return view.clone();
        }

        let child = &mut *child;
        child.composer.begin();
        let view = {
            let mut cx = self.reborrow(&mut child.composer);
            render(&mut cx, &props)
        };
        child.composer.end("memo child");
        child.props = Some(props);
        child.view = Some(view.clone());
        child.renders += 1;
        view
    }
}
