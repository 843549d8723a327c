use std::fmt;

use crate::{Callback, NodeRef};

pub type ViewId = u64;

#[derive(Clone)]
pub enum ViewKind {
    Column,
    Row,
    Card {
        title: String,
    },
    Text {
        text: String,
    },
    Button {
        text: String,
        on_click: Callback,
    },
    Slider {
        value: i64,
        min: i64,
        max: i64,
        step: i64,
        label: String,
        on_change: Callback<i64>,
    },
    TextField {
        value: String,
        label: String,
        placeholder: String,
        multiline: bool,
        on_input: Callback<String>,
        node_ref: Option<NodeRef>,
    },
    ProgressBar {
        percent: u8,
        label: String,
    },
}

impl fmt::Debug for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewKind::Column => write!(f, "Column"),
            ViewKind::Row => write!(f, "Row"),
            ViewKind::Card { title } => f.debug_struct("Card").field("title", title).finish(),
            ViewKind::Text { text } => f.debug_struct("Text").field("text", text).finish(),
            ViewKind::Button { text, .. } => f
                .debug_struct("Button")
                .field("text", text)
                .field("on_click", &"<callback>")
                .finish(),
            ViewKind::Slider {
                value,
                min,
                max,
                step,
                label,
                ..
            } => f
                .debug_struct("Slider")
                .field("value", value)
                .field("min", min)
                .field("max", max)
                .field("step", step)
                .field("label", label)
                .finish(),
            ViewKind::TextField {
                value,
                label,
                multiline,
                node_ref,
                ..
            } => f
                .debug_struct("TextField")
                .field("value", value)
                .field("label", label)
                .field("multiline", multiline)
                .field("has_ref", &node_ref.is_some())
                .finish(),
            ViewKind::ProgressBar { percent, label } => f
                .debug_struct("ProgressBar")
                .field("percent", percent)
                .field("label", label)
                .finish(),
        }
    }
}

/// One node of a committed page.
///
/// `key` is an optional stable address used by
/// [`Runtime::dispatch`](crate::Runtime::dispatch) when a label alone is
/// ambiguous or changes with state.
#[derive(Clone, Debug)]
pub struct View {
    pub id: ViewId,
    pub kind: ViewKind,
    pub key: Option<String>,
    pub children: Vec<View>,
}

impl View {
    pub fn new(kind: ViewKind) -> Self {
        View {
            id: 0,
            kind,
            key: None,
            children: vec![],
        }
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_children(mut self, kids: Vec<View>) -> Self {
        self.children = kids;
        self
    }

    pub fn child(mut self, kid: View) -> Self {
        self.children.push(kid);
        self
    }

    /// Attaches a node reference. Only text fields accept one; other kinds
    /// are returned unchanged.
    pub fn node_ref(mut self, r: NodeRef) -> Self {
        if let ViewKind::TextField { node_ref, .. } = &mut self.kind {
            *node_ref = Some(r);
        } else {
            log::warn!("node_ref attached to {:?}, which cannot hold one", self.kind);
        }
        self
    }

    /// Human-readable name of the node: button text, control label or text.
    pub fn label(&self) -> Option<&str> {
        match &self.kind {
            ViewKind::Text { text } | ViewKind::Button { text, .. } => Some(text),
            ViewKind::Slider { label, .. }
            | ViewKind::TextField { label, .. }
            | ViewKind::ProgressBar { label, .. } => Some(label),
            ViewKind::Card { title } => Some(title),
            ViewKind::Column | ViewKind::Row => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            ViewKind::Text { text } => Some(text),
            _ => None,
        }
    }

    /// Depth-first, pre-order.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a View)) {
        f(self);
        for c in &self.children {
            c.walk(f);
        }
    }

    pub fn find_by(&self, pred: impl Fn(&View) -> bool) -> Option<&View> {
        self.find_dyn(&pred)
    }

    fn find_dyn(&self, pred: &dyn Fn(&View) -> bool) -> Option<&View> {
        if pred(self) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_dyn(pred))
    }

    /// Looks a node up by key first, then by label.
    pub fn find(&self, target: &str) -> Option<&View> {
        self.find_by(|v| v.key.as_deref() == Some(target))
            .or_else(|| self.find_by(|v| v.label() == Some(target)))
    }

    pub fn find_id(&self, id: ViewId) -> Option<&View> {
        self.find_by(|v| v.id == id)
    }

    /// Text of the node addressed by `target`, if it is a text node.
    pub fn text_of(&self, target: &str) -> Option<&str> {
        self.find(target).and_then(View::text)
    }

    /// Every `Text` node's content, in tree order.
    pub fn texts(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.walk(&mut |v| {
            if let Some(t) = v.text() {
                out.push(t);
            }
        });
        out
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|t| t.contains(needle))
    }

    pub(crate) fn assign_ids(&mut self, next: &mut ViewId) {
        self.id = *next;
        *next += 1;
        for c in &mut self.children {
            c.assign_ids(next);
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn line(v: &View, depth: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{:indent$}", "", indent = depth * 2)?;
            match &v.kind {
                ViewKind::Column => write!(f, "Column")?,
                ViewKind::Row => write!(f, "Row")?,
                ViewKind::Card { title } => write!(f, "Card \"{title}\"")?,
                ViewKind::Text { text } => write!(f, "{text}")?,
                ViewKind::Button { text, .. } => write!(f, "[{text}]")?,
                ViewKind::Slider {
                    value,
                    min,
                    max,
                    label,
                    ..
                } => write!(f, "{label}: <{min} ..{value}.. {max}>")?,
                ViewKind::TextField { value, label, .. } => write!(f, "{label}: \"{value}\"")?,
                ViewKind::ProgressBar { percent, label } => {
                    let filled = usize::from(*percent) / 5;
                    write!(f, "{label} [{:<20}] {percent}%", "#".repeat(filled))?
                }
            }
            writeln!(f)?;
            for c in &v.children {
                line(c, depth + 1, f)?;
            }
            Ok(())
        }
        line(self, 0, f)
    }
}

/// Snaps a raw slider position to the slider's step grid and clamps it into
/// `[min, max]`, the way a range input does.
pub fn snap_to_step(value: i64, min: i64, max: i64, step: i64) -> i64 {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    let clamped = value.clamp(lo, hi);
    if step <= 1 {
        return clamped;
    }
    let offset = clamped - lo;
    let snapped = lo + ((offset + step / 2) / step) * step;
    if snapped > hi { snapped - step } else { snapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_clamps_and_rounds() {
        assert_eq!(snap_to_step(1234, 250, 1500, 50), 1250);
        assert_eq!(snap_to_step(1224, 250, 1500, 50), 1200);
        assert_eq!(snap_to_step(9000, 250, 1500, 50), 1500);
        assert_eq!(snap_to_step(-5, 0, 100, 1), 0);
        assert_eq!(snap_to_step(101, 0, 100, 1), 100);
    }

    #[test]
    fn test_snap_never_leaves_range_on_uneven_grid() {
        // 20 rounds to 21, past max
        assert_eq!(snap_to_step(20, 0, 20, 7), 14);
    }

    #[test]
    fn test_find_prefers_key_over_label() {
        let v = View::new(ViewKind::Column).with_children(vec![
            View::new(ViewKind::Text { text: "status".into() }),
            View::new(ViewKind::Text { text: "Paused".into() }).key("status"),
        ]);
        assert_eq!(v.text_of("status"), Some("Paused"));
        assert!(v.contains_text("Pause"));
    }
}
