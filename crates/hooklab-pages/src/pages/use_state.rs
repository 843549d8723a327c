use hooklab_core::{Cx, View};
use hooklab_ui::{Button, Card, Column, ProgressBar, Row, Slider, Text, TextField};

use super::Header;
use crate::percent_of;

const STEP_PRESETS: [i64; 3] = [1, 5, 10];
const MIN_GOAL: i64 = 5;
const MAX_GOAL: i64 = 40;

/// Four independent state slots: tracker label, count, step and goal.
pub fn UseStatePage(cx: &mut Cx<'_>) -> View {
    let label = cx.use_state(|| String::from("Focus streak"));
    let count = cx.use_state(|| 12i64);
    let step = cx.use_state(|| 1i64);
    let goal = cx.use_state(|| 20i64);

    let (count_v, step_v, goal_v) = (count.get(), step.get(), goal.get());
    let progress = percent_of(count_v, goal_v);

    let presets = STEP_PRESETS
        .iter()
        .map(|&preset| {
            let text = if preset == step_v {
                format!("• {preset}")
            } else {
                preset.to_string()
            };
            Button(text, {
                let step = step.clone();
                move || step.set(preset)
            })
            .key(format!("step-{preset}"))
        })
        .collect();

    Column(vec![
        Header(
            "Stateful basics",
            "use_state drives the interactive bits",
            "Every control writes to its own piece of state and the page re-renders once per change.",
        ),
        Card(
            "Tracker",
            vec![
                Text(label.get()).key("label"),
                Text(count_v.to_string()).key("count"),
                Text(format!("Goal: {goal_v} · Progress: {progress}%")).key("progress"),
                ProgressBar(progress, "Progress"),
                Row(vec![
                    Button("− Step", {
                        let count = count.clone();
                        move || count.update(move |v| (v - step_v).max(0))
                    })
                    .key("decrement"),
                    Button("+ Step", {
                        let count = count.clone();
                        move || count.update(move |v| v + step_v)
                    })
                    .key("increment"),
                ]),
                Button("Reset state", {
                    let (count, step) = (count.clone(), step.clone());
                    move || {
                        count.set(0);
                        step.set(1);
                    }
                })
                .key("reset"),
            ],
        ),
        Card(
            "State controls",
            vec![
                TextField(label.get(), "Rename tracker", {
                    let label = label.clone();
                    move |text| label.set(text)
                })
                .key("rename"),
                Text("Step presets"),
                Row(presets),
                Text(format!("Current step: {step_v}")).key("step"),
                Slider(goal_v, (MIN_GOAL, MAX_GOAL), 1, format!("Goal ({goal_v})"), {
                    let goal = goal.clone();
                    move |v| goal.set(v)
                })
                .key("goal"),
            ],
        ),
    ])
}
