use std::time::Duration;

use hooklab_core::{Cx, View};
use hooklab_ui::{Card, Column, Slider, Text, TextArea};
use web_time::Instant;

use super::Header;

pub const MAX_INDEX: i64 = 45;
const SLOW_WORK: Duration = Duration::from_millis(35);

fn busy_wait(work: Duration) {
    let start = Instant::now();
    while start.elapsed() < work {
        std::hint::spin_loop();
    }
}

/// Iterative Fibonacci behind a deliberate busy wait, so running it on every
/// render would be noticeable.
pub fn expensive_fibonacci(index: u64) -> u64 {
    busy_wait(SLOW_WORK);
    if index <= 1 {
        return index;
    }
    let (mut previous, mut current) = (0u64, 1u64);
    for _ in 2..=index {
        let next = previous + current;
        previous = current;
        current = next;
    }
    current
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FibStats {
    /// Thousands separated with commas.
    pub formatted: String,
    pub digits: usize,
    pub parity: &'static str,
    pub digit_sum: u32,
    pub last_digit: char,
}

pub fn fib_stats(value: u64) -> FibStats {
    let plain = value.to_string();
    let mut formatted = String::with_capacity(plain.len() + plain.len() / 3);
    for (i, ch) in plain.chars().enumerate() {
        if i > 0 && (plain.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(ch);
    }
    FibStats {
        formatted,
        digits: plain.len(),
        parity: if value % 2 == 0 { "Even" } else { "Odd" },
        digit_sum: plain.chars().filter_map(|c| c.to_digit(10)).sum(),
        last_digit: plain.chars().last().unwrap_or('0'),
    }
}

pub fn UseMemoPage(cx: &mut Cx<'_>) -> View {
    let index = cx.use_state(|| 32i64);
    let note = cx.use_state(|| {
        String::from("Typing here re-renders but should not re-run Fibonacci.")
    });
    let compute_count = cx.use_ref(|| 0u32);
    let last_counted = cx.use_ref(|| None::<i64>);

    let index_v = index.get();
    let value = cx.use_memo(index_v, || {
        let value = expensive_fibonacci(index_v.max(0) as u64);
        if last_counted.get() != Some(index_v) {
            compute_count.update(|n| *n += 1);
            last_counted.set(Some(index_v));
        }
        value
    });
    let stats = cx.use_memo(value, || fib_stats(value));

    Column(vec![
        Header(
            "Expensive memo",
            "use_memo keeps heavy work cached",
            "Adjust the index to run the slow calculation, then type in the note: the page re-renders but the counter stays put.",
        ),
        Card(
            "Inputs",
            vec![
                Slider(index_v, (0, MAX_INDEX), 1, format!("Fibonacci index {index_v}"), {
                    let index = index.clone();
                    move |v| index.set(v)
                })
                .key("index"),
                TextArea(note.get(), "Unrelated state", {
                    let note = note.clone();
                    move |text| note.set(text)
                })
                .key("note"),
            ],
        ),
        Card(
            format!("Fibonacci #{index_v}"),
            vec![
                Text(stats.formatted).key("value"),
                Text(format!("Digits: {}", stats.digits)).key("digits"),
                Text(format!("Parity: {}", stats.parity)).key("parity"),
                Text(format!("Digit sum: {}", stats.digit_sum)).key("digit-sum"),
                Text(format!("Last digit: {}", stats.last_digit)).key("last-digit"),
            ],
        ),
        Card(
            "Expensive executions",
            vec![Text(compute_count.get().to_string()).key("executions")],
        ),
    ])
}

#[cfg(test)]
mod tests {
    use hooklab_core::Runtime;

    use super::*;

    #[test]
    fn test_fibonacci() {
        assert_eq!(expensive_fibonacci(0), 0);
        assert_eq!(expensive_fibonacci(1), 1);
        assert_eq!(expensive_fibonacci(10), 55);
        assert_eq!(expensive_fibonacci(45), 1_134_903_170);
    }

    #[test]
    fn test_stats() {
        let s = fib_stats(2_178_309);
        assert_eq!(s.formatted, "2,178,309");
        assert_eq!(s.digits, 7);
        assert_eq!(s.parity, "Odd");
        assert_eq!(s.digit_sum, 30);
        assert_eq!(s.last_digit, '9');
        assert_eq!(fib_stats(144).formatted, "144");
        assert_eq!(fib_stats(0).parity, "Even");
    }

    #[test]
    fn test_note_edits_do_not_recompute() {
        let mut rt = Runtime::new();
        let page = rt.mount("use-memo", UseMemoPage).unwrap();
        let view = |rt: &Runtime| rt.view(page).unwrap().clone();
        assert_eq!(view(&rt).text_of("value"), Some("2,178,309"));
        assert_eq!(view(&rt).text_of("executions"), Some("1"));

        for i in 0..5 {
            rt.input(page, "note", format!("edit {i}")).unwrap();
        }
        assert_eq!(rt.render_count(page), Some(6));
        assert_eq!(view(&rt).text_of("executions"), Some("1"));

        rt.slide(page, "index", 33).unwrap();
        assert_eq!(view(&rt).text_of("executions"), Some("2"));
        assert_eq!(view(&rt).text_of("value"), Some("3,524,578"));
        assert_eq!(view(&rt).text_of("parity"), Some("Parity: Even"));
    }
}
