//! Render scan: counts how often each component renders and how long it
//! took, so the demos' "this re-renders, that doesn't" claims can be checked
//! while clicking around.
//!
//! ```rust
//! use std::rc::Rc;
//! use hooklab_core::*;
//! use hooklab_devtools::{RenderScan, ScanOptions};
//!
//! let scan = Rc::new(RenderScan::new(ScanOptions { enabled: true, log: false }));
//! let mut rt = Runtime::new();
//! rt.observe(scan.clone());
//! rt.mount("hello", |_| View::new(ViewKind::Text { text: "hi".into() })).unwrap();
//! assert_eq!(scan.renders_of("hello"), 1);
//! ```

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::time::Duration;

use hooklab_core::{RenderInfo, RenderObserver, View, ViewKind};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanOptions {
    pub enabled: bool,
    /// Log every render at info level.
    pub log: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScanEntry {
    pub renders: u64,
    pub effects_run: u64,
    pub last: Duration,
    pub total: Duration,
}

pub struct RenderScan {
    options: ScanOptions,
    frame_count: Cell<u64>,
    entries: RefCell<BTreeMap<String, ScanEntry>>,
}

impl RenderScan {
    pub fn new(options: ScanOptions) -> Self {
        Self {
            options,
            frame_count: Cell::new(0),
            entries: RefCell::new(BTreeMap::new()),
        }
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    pub fn renders_of(&self, name: &str) -> u64 {
        self.entries.borrow().get(name).map_or(0, |e| e.renders)
    }

    pub fn entry(&self, name: &str) -> Option<ScanEntry> {
        self.entries.borrow().get(name).cloned()
    }

    /// Commits observed across all components.
    pub fn frames(&self) -> u64 {
        self.frame_count.get()
    }

    pub fn reset(&self) {
        self.frame_count.set(0);
        self.entries.borrow_mut().clear();
    }

    /// One line per component, sorted by name.
    pub fn report(&self) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .map(|(name, e)| {
                format!(
                    "{name}: {} renders, {} effects, last {:.2} ms",
                    e.renders,
                    e.effects_run,
                    e.last.as_secs_f64() * 1000.0
                )
            })
            .collect()
    }

    /// Appends a summary card to `view`.
    pub fn overlay(&self, view: &mut View) {
        if !self.options.enabled {
            return;
        }
        let mut lines = vec![format!("frames: {}", self.frames())];
        lines.extend(self.report());
        let card = View::new(ViewKind::Card {
            title: "render scan".into(),
        })
        .with_children(
            lines
                .into_iter()
                .map(|text| View::new(ViewKind::Text { text }))
                .collect(),
        )
        .key("render-scan");
        view.children.push(card);
    }
}

impl RenderObserver for RenderScan {
    fn on_render(&self, info: &RenderInfo<'_>) {
        if !self.options.enabled {
            return;
        }
        self.frame_count.set(self.frame_count.get() + 1);
        let mut entries = self.entries.borrow_mut();
        let entry = entries.entry(info.name.to_string()).or_default();
        entry.renders += 1;
        entry.effects_run += info.effects_run as u64;
        entry.last = info.duration;
        entry.total += info.duration;
        if self.options.log {
            log::info!(
                "[scan] {} render #{} in {:.2} ms, {} effects",
                info.name,
                info.render,
                info.duration.as_secs_f64() * 1000.0,
                info.effects_run
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use hooklab_core::{Callback, Runtime};

    use super::*;

    fn counter(cx: &mut hooklab_core::Cx<'_>) -> View {
        let n = cx.use_state(|| 0);
        let n2 = n.clone();
        View::new(ViewKind::Button {
            text: format!("n = {}", n.get()),
            on_click: Callback::new(move |()| n2.update(|v| v + 1)),
        })
        .key("inc")
    }

    #[test]
    fn test_disabled_scan_records_nothing() {
        let scan = Rc::new(RenderScan::new(ScanOptions::default()));
        let mut rt = Runtime::new();
        rt.observe(scan.clone());
        let page = rt.mount("counter", counter).unwrap();
        rt.click(page, "inc").unwrap();
        assert_eq!(scan.frames(), 0);
        assert!(scan.report().is_empty());
    }

    #[test]
    fn test_counts_per_component() {
        let scan = Rc::new(RenderScan::new(ScanOptions {
            enabled: true,
            log: true,
        }));
        let mut rt = Runtime::new();
        rt.observe(scan.clone());
        let a = rt.mount("a", counter).unwrap();
        rt.mount("b", counter).unwrap();
        rt.click(a, "inc").unwrap();
        rt.click(a, "inc").unwrap();

        assert_eq!(scan.renders_of("a"), 3);
        assert_eq!(scan.renders_of("b"), 1);
        assert_eq!(scan.frames(), 4);
        assert_eq!(scan.report().len(), 2);
        assert!(scan.report()[0].starts_with("a: 3 renders"));

        let mut view = rt.view(a).unwrap().clone();
        scan.overlay(&mut view);
        let card = view.find("render-scan").unwrap();
        assert_eq!(card.children[0].text(), Some("frames: 4"));
    }
}
