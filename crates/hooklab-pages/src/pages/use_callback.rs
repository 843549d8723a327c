use hooklab_core::{Callback, Cx, View};
use hooklab_ui::{Button, CallbackButton, Card, Column, Row, Slider, Text, TextArea};

use super::Header;

const MIN_SCORE: i64 = 0;
const MAX_SCORE: i64 = 120;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    Stable,
    Inline,
}

impl Variant {
    fn slug(self) -> &'static str {
        match self {
            Variant::Stable => "stable",
            Variant::Inline => "inline",
        }
    }

    fn tag(self) -> &'static str {
        match self {
            Variant::Stable => "use_callback",
            Variant::Inline => "inline handler",
        }
    }
}

/// Props of a skip-render child. Equal props (including the handler's
/// identity) mean the child keeps its last view.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionButtonProps {
    pub title: &'static str,
    pub description: &'static str,
    pub on_action: Callback,
    pub variant: Variant,
}

fn ActionButton(cx: &mut Cx<'_>, props: &ActionButtonProps) -> View {
    let renders = cx.use_ref(|| 0u32);
    renders.update(|n| *n += 1);
    let slug = props.variant.slug();

    Card(
        props.title,
        vec![
            Row(vec![
                Text(props.variant.tag()),
                Text(format!("renders: {}", renders.get())).key(format!("{slug}-renders")),
            ]),
            Text(props.description),
            CallbackButton("Add step to score", props.on_action.clone()).key(format!("{slug}-action")),
        ],
    )
    .key(slug)
}

pub fn UseCallbackPage(cx: &mut Cx<'_>) -> View {
    let score = cx.use_state(|| 42i64);
    let step = cx.use_state(|| 4i64);
    let note = cx.use_state(|| String::from("Type here to force re-renders."));
    let step_v = step.get();

    let stable_increment = cx.use_callback(step_v, {
        let score = score.clone();
        move |()| score.update(move |v| (v + step_v).min(MAX_SCORE))
    });
    let inline_increment = Callback::new({
        let score = score.clone();
        move |()| score.update(move |v| (v + step_v).min(MAX_SCORE))
    });

    let stable = cx.memo_child(
        ActionButtonProps {
            title: "Stable handler",
            description: "Wrapped in use_callback, so the skip-render child sees the same handler until the step changes.",
            on_action: stable_increment.clone(),
            variant: Variant::Stable,
        },
        ActionButton,
    );
    let inline = cx.memo_child(
        ActionButtonProps {
            title: "Inline handler",
            description: "Created fresh every render, so the skip-render child re-renders every time.",
            on_action: inline_increment,
            variant: Variant::Inline,
        },
        ActionButton,
    );

    Column(vec![
        Header(
            "Event memoization",
            "use_callback keeps handlers stable",
            "The left child gets a cached handler and skips unrelated renders; the right one gets a new handler each time.",
        ),
        Row(vec![
            Card(
                "Scoreboard",
                vec![
                    Text(score.get().to_string()).key("score"),
                    Text(format!("Step size: {step_v}")).key("step"),
                    Row(vec![
                        Button("Subtract step", {
                            let score = score.clone();
                            move || score.update(move |v| (v - step_v).max(MIN_SCORE))
                        })
                        .key("subtract"),
                        CallbackButton("Add step", stable_increment).key("add"),
                    ]),
                    Slider(step_v, (1, 10), 1, "Adjust step", {
                        let step = step.clone();
                        move |v| step.set(v)
                    })
                    .key("adjust-step"),
                ],
            ),
            Card(
                "Unrelated edits",
                vec![
                    TextArea(note.get(), "Notes", {
                        let note = note.clone();
                        move |text| note.set(text)
                    })
                    .key("note"),
                ],
            ),
        ]),
        Row(vec![stable, inline]),
    ])
}

#[cfg(test)]
mod tests {
    use hooklab_core::{InstanceKey, Runtime, ViewKind};

    use super::*;

    fn text(rt: &Runtime, page: InstanceKey, key: &str) -> String {
        rt.view(page).unwrap().text_of(key).unwrap().to_string()
    }

    fn handler(rt: &Runtime, page: InstanceKey, key: &str) -> Callback {
        match &rt.view(page).unwrap().find(key).unwrap().kind {
            ViewKind::Button { on_click, .. } => on_click.clone(),
            other => panic!("{key} is {other:?}"),
        }
    }

    #[test]
    fn test_typing_only_rerenders_inline_child() {
        let mut rt = Runtime::new();
        let page = rt.mount("use-callback", UseCallbackPage).unwrap();
        assert_eq!(text(&rt, page, "stable-renders"), "renders: 1");
        assert_eq!(text(&rt, page, "inline-renders"), "renders: 1");
        let before = handler(&rt, page, "stable-action");

        for s in ["a", "ab", "abc"] {
            rt.input(page, "note", s).unwrap();
        }
        assert_eq!(text(&rt, page, "stable-renders"), "renders: 1");
        assert_eq!(text(&rt, page, "inline-renders"), "renders: 4");
        assert!(handler(&rt, page, "stable-action").ptr_eq(&before));
        assert!(handler(&rt, page, "add").ptr_eq(&before));
    }

    #[test]
    fn test_step_change_rerenders_both() {
        let mut rt = Runtime::new();
        let page = rt.mount("use-callback", UseCallbackPage).unwrap();
        let before = handler(&rt, page, "stable-action");

        rt.slide(page, "adjust-step", 6).unwrap();
        assert_eq!(text(&rt, page, "stable-renders"), "renders: 2");
        assert_eq!(text(&rt, page, "inline-renders"), "renders: 2");
        assert!(!handler(&rt, page, "stable-action").ptr_eq(&before));

        rt.click(page, "stable-action").unwrap();
        assert_eq!(text(&rt, page, "score"), "48");
        rt.click(page, "inline-action").unwrap();
        assert_eq!(text(&rt, page, "score"), "54");
        assert_eq!(text(&rt, page, "stable-renders"), "renders: 2");
    }

    #[test]
    fn test_score_bounds() {
        let mut rt = Runtime::new();
        let page = rt.mount("use-callback", UseCallbackPage).unwrap();
        rt.slide(page, "adjust-step", 10).unwrap();
        for _ in 0..10 {
            rt.click(page, "add").unwrap();
        }
        assert_eq!(text(&rt, page, "score"), "120");
        for _ in 0..15 {
            rt.click(page, "Subtract step").unwrap();
        }
        assert_eq!(text(&rt, page, "score"), "0");
    }
}
