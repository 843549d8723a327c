use hooklab_core::{Cx, View};
use hooklab_ui::{Button, Card, Column, Row, Slider, Text, TextFieldWithHint};

use super::Header;

const MIN_SCORE: i64 = 0;
const MAX_SCORE: i64 = 100;

pub fn UseRefPage(cx: &mut Cx<'_>) -> View {
    let nickname = cx.use_state(String::new);
    let score = cx.use_state(|| 65i64);
    let score_v = score.get();

    let input_ref = cx.use_node_ref();
    let previous_score = cx.use_ref(|| None::<i64>);
    let peak_score = cx.use_ref(|| score_v);

    // written during render; no render is scheduled
    if score_v > peak_score.get() {
        peak_score.set(score_v);
    }

    cx.use_effect(score_v, {
        let previous_score = previous_score.clone();
        move || {
            previous_score.set(Some(score_v));
            None
        }
    });

    let previous = previous_score.get();
    let change = previous.map_or(0, |p| score_v - p);
    let nickname_v = nickname.get();
    let current = if nickname_v.trim().is_empty() {
        "—"
    } else {
        nickname_v.as_str()
    };

    Column(vec![
        Header(
            "Core hook",
            "use_ref keeps mutable values around renders",
            "Refs reach a committed node directly and hold data that changes without re-rendering.",
        ),
        Card(
            "Node reference",
            vec![
                TextFieldWithHint(
                    nickname_v.clone(),
                    "Nickname",
                    "Type and then blur to test...",
                    {
                        let nickname = nickname.clone();
                        move |text| nickname.set(text)
                    },
                )
                .key("nickname")
                .node_ref(input_ref.clone()),
                Row(vec![
                    Button("Focus input", {
                        let input_ref = input_ref.clone();
                        move || {
                            input_ref.with(|node| {
                                if let Some(node) = node {
                                    node.focus();
                                }
                            })
                        }
                    })
                    .key("focus"),
                    Text(format!("Current value: {current}")).key("current"),
                ]),
            ],
        ),
        Card(
            "Mutable value reference",
            vec![
                Slider(score_v, (MIN_SCORE, MAX_SCORE), 1, format!("Favorite score: {score_v}"), {
                    let score = score.clone();
                    move |v| score.set(v)
                })
                .key("score"),
                Text(format!(
                    "Previous selection: {}",
                    previous.map_or_else(|| "—".to_string(), |p| p.to_string())
                ))
                .key("previous"),
                Text(format!("Change: {}{change}", if change >= 0 { "+" } else { "" })).key("change"),
                Text(format!("Peak this session: {}", peak_score.get())).key("peak"),
            ],
        ),
    ])
}

#[cfg(test)]
mod tests {
    use hooklab_core::{InstanceKey, Runtime, ViewKind};

    use super::*;

    fn text(rt: &Runtime, page: InstanceKey, key: &str) -> String {
        rt.view(page).unwrap().text_of(key).unwrap().to_string()
    }

    #[test]
    fn test_previous_lags_and_peak_holds() {
        let mut rt = Runtime::new();
        let page = rt.mount("use-ref", UseRefPage).unwrap();
        assert_eq!(text(&rt, page, "previous"), "Previous selection: —");
        assert_eq!(text(&rt, page, "change"), "Change: +0");
        assert_eq!(text(&rt, page, "peak"), "Peak this session: 65");

        rt.slide(page, "score", 80).unwrap();
        assert_eq!(text(&rt, page, "previous"), "Previous selection: 65");
        assert_eq!(text(&rt, page, "change"), "Change: +15");
        assert_eq!(text(&rt, page, "peak"), "Peak this session: 80");

        rt.slide(page, "score", 30).unwrap();
        assert_eq!(text(&rt, page, "previous"), "Previous selection: 80");
        assert_eq!(text(&rt, page, "change"), "Change: -50");
        assert_eq!(text(&rt, page, "peak"), "Peak this session: 80");

        rt.slide(page, "score", 250).unwrap();
        assert_eq!(text(&rt, page, "peak"), "Peak this session: 100");
    }

    #[test]
    fn test_focus_does_not_render() {
        let mut rt = Runtime::new();
        let page = rt.mount("use-ref", UseRefPage).unwrap();
        assert!(rt.focused(page).is_none());
        let renders = rt.render_count(page);

        rt.click(page, "focus").unwrap();
        assert_eq!(rt.render_count(page), renders);
        let focused = rt.focused(page).unwrap();
        assert_eq!(focused.key.as_deref(), Some("nickname"));
        assert!(matches!(focused.kind, ViewKind::TextField { .. }));
    }

    #[test]
    fn test_current_value_trims() {
        let mut rt = Runtime::new();
        let page = rt.mount("use-ref", UseRefPage).unwrap();
        assert_eq!(text(&rt, page, "current"), "Current value: —");
        rt.input(page, "nickname", "   ").unwrap();
        assert_eq!(text(&rt, page, "current"), "Current value: —");
        rt.input(page, "Nickname", "ada").unwrap();
        assert_eq!(text(&rt, page, "current"), "Current value: ada");
    }
}
