//! # State, memo, effects, refs and callbacks
//!
//! hooklab runs each demo page as an *instance*: a component function that is
//! called again on every render and keeps its data in order-based slots.
//! There are five primitives, all reached through the [`Cx`] handed to the
//! component:
//!
//! - `use_state`: a slot whose setter schedules a re-render.
//! - `use_memo`: a cached value recomputed only when its dependencies change.
//! - `use_effect`: a side effect that runs after commit, with cleanup.
//! - `use_ref`: a mutable cell that never schedules a render.
//! - `use_callback`: a [`Callback`] whose identity is stable across renders.
//!
//! ## State
//!
//! ```rust
//! use hooklab_core::*;
//!
//! fn counter(cx: &mut Cx<'_>) -> View {
//!     let count = cx.use_state(|| 0);
//!     let bump = {
//!         let count = count.clone();
//!         move || {
//!             // updaters see the latest queued value, so this adds 2
//!             count.update(|c| c + 1);
//!             count.update(|c| c + 1);
//!         }
//!     };
//!     View::new(ViewKind::Button {
//!         text: format!("Count = {}", count.get()),
//!         on_click: Callback::new(move |()| bump()),
//!     })
//! }
//!
//! let mut rt = Runtime::new();
//! let page = rt.mount("counter", counter).unwrap();
//! rt.click(page, "Count = 0").unwrap();
//! assert_eq!(rt.render_count(page), Some(2));
//! ```
//!
//! Slots are order-based: the Nth hook call in a render always refers to the
//! Nth slot. Writes made inside one handler are batched into a single render.
//!
//! ## Dependencies
//!
//! `use_memo`, `use_effect` and `use_callback` take a dependency value,
//! usually a tuple. It is compared with `PartialEq` against the value from
//! the previous render; tuples compare element by element. `()` never
//! changes, so it means "once per instance".
//!
//! ## Effects and cleanup
//!
//! ```rust
//! use hooklab_core::*;
//! use std::time::Duration;
//!
//! fn ticker(cx: &mut Cx<'_>) -> View {
//!     let ticks = cx.use_state(|| 0u32);
//!     let timers = cx.timers();
//!     cx.use_effect((), {
//!         let ticks = ticks.clone();
//!         move || {
//!             let id = timers.set_interval(Duration::from_secs(1), move || ticks.update(|t| t + 1));
//!             on_cleanup(move || {
//!                 timers.clear(id);
//!             })
//!         }
//!     });
//!     View::new(ViewKind::Text { text: format!("{}s", ticks.get()) })
//! }
//!
//! let mut rt = Runtime::new();
//! let page = rt.mount("ticker", ticker).unwrap();
//! rt.advance(Duration::from_secs(3)).unwrap();
//! assert_eq!(rt.view(page).and_then(|v| v.text()), Some("3s"));
//! rt.unmount(page).unwrap();
//! assert_eq!(rt.pending_timers(), 0);
//! ```
//!
//! Effects never run inside the handler that caused a write. They run after
//! the render commits and before the next event is processed: all due
//! cleanups first, then all due actions, both in registration order.

pub mod callback;
pub mod cell;
pub mod cx;
pub mod effects;
pub mod error;
pub mod memo;
pub mod prelude;
pub mod runtime;
pub mod scheduler;
pub mod state;
pub mod timer;
pub mod view;

pub use callback::*;
pub use cell::*;
pub use cx::*;
pub use effects::*;
pub use error::*;
pub use prelude::*;
pub use runtime::*;
pub use scheduler::*;
pub use state::*;
pub use timer::*;
pub use view::*;
