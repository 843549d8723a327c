#![allow(non_snake_case)]
//! Widgets and layout containers.
//!
//! Each constructor returns a plain [`View`]; handlers are wrapped in
//! [`Callback`]s so the runtime can dispatch interactions to them.

use hooklab_core::*;

pub fn Column(children: Vec<View>) -> View {
    View::new(ViewKind::Column).with_children(children)
}

pub fn Row(children: Vec<View>) -> View {
    View::new(ViewKind::Row).with_children(children)
}

/// Titled group of views, the equivalent of a bordered panel.
pub fn Card(title: impl Into<String>, children: Vec<View>) -> View {
    View::new(ViewKind::Card {
        title: title.into(),
    })
    .with_children(children)
}

pub fn Text(text: impl Into<String>) -> View {
    View::new(ViewKind::Text { text: text.into() })
}

pub fn Button(text: impl Into<String>, on_click: impl Fn() + 'static) -> View {
    CallbackButton(text, Callback::new(move |()| on_click()))
}

/// Button whose handler is an existing [`Callback`], so its identity is
/// preserved (see `Cx::use_callback`).
pub fn CallbackButton(text: impl Into<String>, on_click: Callback) -> View {
    View::new(ViewKind::Button {
        text: text.into(),
        on_click,
    })
}

/// Integer range input. `range` is inclusive; values delivered to
/// `on_change` are already snapped to `step` and clamped into `range`.
pub fn Slider(
    value: i64,
    range: (i64, i64),
    step: i64,
    label: impl Into<String>,
    on_change: impl Fn(i64) + 'static,
) -> View {
    let (min, max) = range;
    if !(min..=max).contains(&value) {
        log::warn!("Slider value {value} outside {min}..={max}");
    }
    View::new(ViewKind::Slider {
        value,
        min,
        max,
        step: step.max(1),
        label: label.into(),
        on_change: Callback::new(on_change),
    })
}

/// Controlled single-line input: `on_input` receives the full new text.
pub fn TextField(
    value: impl Into<String>,
    label: impl Into<String>,
    on_input: impl Fn(String) + 'static,
) -> View {
    text_input(value.into(), label.into(), String::new(), false, on_input)
}

pub fn TextFieldWithHint(
    value: impl Into<String>,
    label: impl Into<String>,
    placeholder: impl Into<String>,
    on_input: impl Fn(String) + 'static,
) -> View {
    text_input(value.into(), label.into(), placeholder.into(), false, on_input)
}

/// Multi-line variant of [`TextField`].
pub fn TextArea(
    value: impl Into<String>,
    label: impl Into<String>,
    on_input: impl Fn(String) + 'static,
) -> View {
    text_input(value.into(), label.into(), String::new(), true, on_input)
}

fn text_input(
    value: String,
    label: String,
    placeholder: String,
    multiline: bool,
    on_input: impl Fn(String) + 'static,
) -> View {
    View::new(ViewKind::TextField {
        value,
        label,
        placeholder,
        multiline,
        on_input: Callback::new(on_input),
        node_ref: None,
    })
}

/// `percent` is clamped to 0..=100.
pub fn ProgressBar(percent: i64, label: impl Into<String>) -> View {
    View::new(ViewKind::ProgressBar {
        percent: percent.clamp(0, 100) as u8,
        label: label.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar_clamps() {
        let v = ProgressBar(140, "Progress");
        assert!(matches!(v.kind, ViewKind::ProgressBar { percent: 100, .. }));
        let v = ProgressBar(-3, "Progress");
        assert!(matches!(v.kind, ViewKind::ProgressBar { percent: 0, .. }));
    }

    #[test]
    fn test_button_keeps_callback_identity() {
        let cb = Callback::new(|()| {});
        let a = CallbackButton("a", cb.clone());
        match a.kind {
            ViewKind::Button { on_click, .. } => assert_eq!(on_click, cb),
            other => panic!("expected button, got {other:?}"),
        }
    }

    #[test]
    fn test_outline() {
        let v = Column(vec![
            Text("Title"),
            Row(vec![Button("Go", || {})]),
            ProgressBar(50, "Progress"),
        ]);
        assert_eq!(
            v.to_string(),
            "Column\n  Title\n  Row\n    [Go]\n  Progress [##########          ] 50%\n"
        );
    }
}
