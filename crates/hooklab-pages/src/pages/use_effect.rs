use std::time::Duration;

use hooklab_core::{Cx, View, on_cleanup};
use hooklab_ui::{Button, Card, Column, ProgressBar, Row, Slider, Text};

use super::Header;
use crate::percent_of;

const MIN_DELAY_MS: i64 = 250;
const MAX_DELAY_MS: i64 = 1500;
const MIN_TARGET: i64 = 5;
const MAX_TARGET: i64 = 30;

/// Interval timer whose lifetime follows an effect: starting registers the
/// interval, pausing or changing the delay clears it before a new one runs.
pub fn UseEffectPage(cx: &mut Cx<'_>) -> View {
    let is_counting = cx.use_state(|| false);
    let seconds = cx.use_state(|| 0i64);
    let delay = cx.use_state(|| 1000i64);
    let target = cx.use_state(|| 12i64);
    let sessions = cx.use_state(|| 0u32);

    let counting = is_counting.get();
    let (seconds_v, delay_v, target_v) = (seconds.get(), delay.get(), target.get());

    let timers = cx.timers();
    cx.use_effect((counting, delay_v), {
        let seconds = seconds.clone();
        move || {
            if !counting {
                return None;
            }
            let id = timers.set_interval(Duration::from_millis(delay_v as u64), move || {
                seconds.update(|s| s + 1)
            });
            on_cleanup(move || {
                timers.clear(id);
            })
        }
    });

    cx.use_effect((seconds_v, target_v, counting), {
        let (is_counting, sessions) = (is_counting.clone(), sessions.clone());
        move || {
            if counting && seconds_v >= target_v {
                log::debug!("session finished after {seconds_v}s");
                is_counting.set(false);
                sessions.update(|n| n + 1);
            }
            None
        }
    });

    let status = if counting {
        "Counting..."
    } else if seconds_v >= target_v {
        "Session complete"
    } else {
        "Paused"
    };
    let progress = percent_of(seconds_v, target_v);

    Column(vec![
        Header(
            "Side effects",
            "use_effect wires logic to the clock",
            "Starting the timer registers an interval; changing the delay or pausing tears it down first.",
        ),
        Card(
            "Timer",
            vec![
                Text(status).key("status"),
                Text(format!("{seconds_v}s")).key("seconds"),
                ProgressBar(progress, "Progress"),
                Text(format!("Goal: {target_v} seconds · Delay: {delay_v} ms")).key("goal"),
                Row(vec![
                    Button(if counting { "Pause interval" } else { "Start interval" }, {
                        let (is_counting, seconds) = (is_counting.clone(), seconds.clone());
                        move || {
                            if seconds_v >= target_v {
                                seconds.set(0);
                            }
                            is_counting.update(|c| !c);
                        }
                    })
                    .key("toggle"),
                    Button("Reset", {
                        let (is_counting, seconds, sessions) =
                            (is_counting.clone(), seconds.clone(), sessions.clone());
                        move || {
                            is_counting.set(false);
                            seconds.set(0);
                            sessions.set(0);
                        }
                    })
                    .key("reset"),
                ]),
            ],
        ),
        Card(
            "Effect controls",
            vec![
                Slider(
                    delay_v,
                    (MIN_DELAY_MS, MAX_DELAY_MS),
                    50,
                    format!("Delay per tick ({delay_v} ms)"),
                    {
                        let delay = delay.clone();
                        move |v| delay.set(v)
                    },
                )
                .key("delay"),
                Slider(
                    target_v,
                    (MIN_TARGET, MAX_TARGET),
                    1,
                    format!("Stop after ({target_v} sec)"),
                    {
                        let target = target.clone();
                        move |v| target.set(v)
                    },
                )
                .key("target"),
            ],
        ),
        Card(
            "Effect takeaways",
            vec![
                Text(format!("Sessions completed: {}", sessions.get())).key("sessions"),
                Text(format!("Status: {status}")),
            ],
        ),
    ])
}

#[cfg(test)]
mod tests {
    use hooklab_core::{InstanceKey, Runtime};

    use super::*;

    fn text(rt: &Runtime, page: InstanceKey, key: &str) -> String {
        rt.view(page).unwrap().text_of(key).unwrap().to_string()
    }

    #[test]
    fn test_session_completes_once() {
        let mut rt = Runtime::new();
        let page = rt.mount("use-effect", UseEffectPage).unwrap();
        assert_eq!(text(&rt, page, "status"), "Paused");
        assert_eq!(rt.pending_timers(), 0);

        rt.click(page, "toggle").unwrap();
        assert_eq!(text(&rt, page, "status"), "Counting...");
        assert_eq!(rt.pending_timers(), 1);

        assert_eq!(rt.advance(Duration::from_millis(11_999)).unwrap(), 11);
        assert_eq!(text(&rt, page, "seconds"), "11s");
        assert_eq!(text(&rt, page, "status"), "Counting...");

        rt.advance(Duration::from_millis(1)).unwrap();
        assert_eq!(text(&rt, page, "seconds"), "12s");
        assert_eq!(text(&rt, page, "status"), "Session complete");
        assert_eq!(text(&rt, page, "sessions"), "Sessions completed: 1");
        assert_eq!(rt.pending_timers(), 0);

        rt.advance(Duration::from_secs(10)).unwrap();
        assert_eq!(text(&rt, page, "sessions"), "Sessions completed: 1");
    }

    #[test]
    fn test_restart_after_complete_resets_seconds() {
        let mut rt = Runtime::new();
        let page = rt.mount("use-effect", UseEffectPage).unwrap();
        rt.slide(page, "target", 5).unwrap();
        rt.click(page, "Start interval").unwrap();
        rt.advance(Duration::from_secs(5)).unwrap();
        assert_eq!(text(&rt, page, "status"), "Session complete");

        rt.click(page, "toggle").unwrap();
        assert_eq!(text(&rt, page, "seconds"), "0s");
        rt.advance(Duration::from_secs(5)).unwrap();
        assert_eq!(text(&rt, page, "sessions"), "Sessions completed: 2");
    }

    #[test]
    fn test_delay_change_keeps_one_timer() {
        let mut rt = Runtime::new();
        let page = rt.mount("use-effect", UseEffectPage).unwrap();
        rt.click(page, "toggle").unwrap();
        rt.advance(Duration::from_millis(2500)).unwrap();
        assert_eq!(text(&rt, page, "seconds"), "2s");

        rt.slide(page, "delay", 480).unwrap();
        assert_eq!(text(&rt, page, "goal"), "Goal: 12 seconds · Delay: 500 ms");
        assert_eq!(rt.pending_timers(), 1);

        // new interval starts from the moment of the change
        rt.advance(Duration::from_millis(1000)).unwrap();
        assert_eq!(text(&rt, page, "seconds"), "4s");
        assert_eq!(rt.pending_timers(), 1);
    }

    #[test]
    fn test_pause_and_unmount_clear_timer() {
        let mut rt = Runtime::new();
        let page = rt.mount("use-effect", UseEffectPage).unwrap();
        rt.click(page, "toggle").unwrap();
        rt.click(page, "Pause interval").unwrap();
        assert_eq!(rt.pending_timers(), 0);
        assert_eq!(text(&rt, page, "status"), "Paused");

        rt.click(page, "toggle").unwrap();
        rt.unmount(page).unwrap();
        assert_eq!(rt.pending_timers(), 0);
    }

    #[test]
    fn test_reset() {
        let mut rt = Runtime::new();
        let page = rt.mount("use-effect", UseEffectPage).unwrap();
        rt.click(page, "toggle").unwrap();
        rt.advance(Duration::from_secs(3)).unwrap();
        rt.click(page, "reset").unwrap();
        assert_eq!(text(&rt, page, "seconds"), "0s");
        assert_eq!(text(&rt, page, "status"), "Paused");
        assert_eq!(rt.pending_timers(), 0);
    }
}
