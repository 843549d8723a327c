mod plus_three;
mod use_callback;
mod use_effect;
mod use_memo;
mod use_ref;
mod use_state;

pub use plus_three::PlusThreePage;
pub use use_callback::{ActionButtonProps, UseCallbackPage, Variant};
pub use use_effect::UseEffectPage;
pub use use_memo::{FibStats, UseMemoPage, expensive_fibonacci, fib_stats};
pub use use_ref::UseRefPage;
pub use use_state::UseStatePage;

use hooklab_core::View;
use hooklab_ui::{Column, Text};

/// Eyebrow, headline and blurb shared by every page.
pub(crate) fn Header(eyebrow: &str, title: &str, blurb: &str) -> View {
    Column(vec![Text(eyebrow), Text(title), Text(blurb)]).key("header")
}
