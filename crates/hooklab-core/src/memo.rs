use std::cell::RefCell;

use crate::cx::Cx;

struct MemoEntry<D, T> {
    deps: D,
    value: T,
}

impl Cx<'_> {
    /// Returns the cached value while `deps` equals the previous render's
    /// `deps`; otherwise runs `compute` and caches its result.
    ///
    /// Pass `()` to compute once for the lifetime of the instance.
    pub fn use_memo<D, T>(&mut self, deps: D, compute: impl FnOnce() -> T) -> T
    where
        D: PartialEq + 'static,
        T: Clone + 'static,
    {
        let slot = self.remember(|| RefCell::new(None::<MemoEntry<D, T>>));
        if let Some(entry) = slot.borrow().as_ref()
            && entry.deps == deps
        {
            return entry.value.clone();
        }
        let value = compute();
        *slot.borrow_mut() = Some(MemoEntry {
            deps,
            value: value.clone(),
        });
        value
    }
}
