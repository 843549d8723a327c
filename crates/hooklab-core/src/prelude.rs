pub use crate::callback::Callback;
pub use crate::cell::{MutableCell, NodeHandle, NodeRef};
pub use crate::cx::Cx;
pub use crate::effects::{Dispose, EffectPhase, on_cleanup};
pub use crate::error::RuntimeError;
pub use crate::runtime::{
    Component, InstanceKey, Interaction, RenderInfo, RenderObserver, Runtime, RuntimeOptions,
};
pub use crate::state::State;
pub use crate::timer::{TimerId, Timers};
pub use crate::view::{View, ViewId, ViewKind};
