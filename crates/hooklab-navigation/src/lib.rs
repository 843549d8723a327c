//! Back stack of mounted pages.
//!
//! Every entry owns one mounted instance, so two entries for the same route
//! never share state. Popping an entry unmounts it, which runs its effect
//! cleanups.

use std::fmt::Debug;

use hooklab_core::{Component, InstanceKey, Runtime, RuntimeError};
use serde::{Serialize, de::DeserializeOwned};

pub trait NavKey: Clone + Debug + PartialEq + Serialize + DeserializeOwned + 'static {
    fn path(&self) -> &'static str;
    fn from_path(path: &str) -> Option<Self>;
    fn title(&self) -> &'static str;
    fn component(&self) -> Component;
}

#[derive(Debug, thiserror::Error)]
pub enum NavError {
    #[error("no route at {0}")]
    UnknownPath(String),
    #[error("back stack is empty")]
    EmptyStack,
    #[error("back stack json: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TransitionDir {
    None,
    Push,
    Pop,
}

#[derive(Debug)]
pub struct Entry<K: NavKey> {
    pub id: u64,
    pub key: K,
    pub instance: InstanceKey,
}

#[derive(Debug)]
pub struct Navigator<K: NavKey> {
    entries: Vec<Entry<K>>,
    next_id: u64,
    last_dir: TransitionDir,
}

impl<K: NavKey> Default for Navigator<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: NavKey> Navigator<K> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
            last_dir: TransitionDir::None,
        }
    }

    pub fn top(&self) -> Option<&Entry<K>> {
        self.entries.last()
    }

    pub fn entries(&self) -> &[Entry<K>] {
        &self.entries
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn last_dir(&self) -> TransitionDir {
        self.last_dir
    }

    fn mount(&mut self, rt: &mut Runtime, key: K) -> Result<Entry<K>, NavError> {
        let instance = rt.mount_component(key.path(), key.component())?;
        let id = self.next_id;
        self.next_id += 1;
        Ok(Entry { id, key, instance })
    }

    pub fn push(&mut self, rt: &mut Runtime, key: K) -> Result<InstanceKey, NavError> {
        log::debug!("nav push {}", key.path());
        let entry = self.mount(rt, key)?;
        let instance = entry.instance;
        self.entries.push(entry);
        self.last_dir = TransitionDir::Push;
        Ok(instance)
    }

    pub fn open_path(&mut self, rt: &mut Runtime, path: &str) -> Result<InstanceKey, NavError> {
        let key = K::from_path(path).ok_or_else(|| NavError::UnknownPath(path.to_string()))?;
        self.push(rt, key)
    }

    /// Pops and unmounts the top entry. The last entry is never popped.
    pub fn pop(&mut self, rt: &mut Runtime) -> Result<bool, NavError> {
        if self.entries.len() <= 1 {
            return Ok(false);
        }
        let Some(entry) = self.entries.pop() else {
            return Ok(false);
        };
        log::debug!("nav pop {}", entry.key.path());
        self.last_dir = TransitionDir::Pop;
        rt.unmount(entry.instance)?;
        Ok(true)
    }

    /// Swaps the top entry for a fresh mount of `key`.
    pub fn replace(&mut self, rt: &mut Runtime, key: K) -> Result<InstanceKey, NavError> {
        if let Some(old) = self.entries.pop() {
            rt.unmount(old.instance)?;
        }
        self.push(rt, key)
    }

    pub fn clear_and_push(&mut self, rt: &mut Runtime, key: K) -> Result<InstanceKey, NavError> {
        self.clear(rt)?;
        self.push(rt, key)
    }

    /// Pops until `key` is on top. Returns false, leaving the stack alone,
    /// when `key` is not on it.
    pub fn pop_to(&mut self, rt: &mut Runtime, key: &K) -> Result<bool, NavError> {
        let Some(idx) = self.entries.iter().rposition(|e| &e.key == key) else {
            return Ok(false);
        };
        while self.entries.len() > idx + 1 {
            if let Some(entry) = self.entries.pop() {
                rt.unmount(entry.instance)?;
            }
        }
        self.last_dir = TransitionDir::Pop;
        Ok(true)
    }

    pub fn top_instance(&self) -> Result<InstanceKey, NavError> {
        self.top().map(|e| e.instance).ok_or(NavError::EmptyStack)
    }

    pub fn to_json(&self) -> Result<String, NavError> {
        let keys: Vec<&K> = self.entries.iter().map(|e| &e.key).collect();
        Ok(serde_json::to_string(&keys)?)
    }

    /// Unmounts every entry and mounts the stored routes fresh, bottom first.
    /// Bad JSON leaves the stack untouched.
    pub fn restore_json(&mut self, rt: &mut Runtime, json: &str) -> Result<(), NavError> {
        let keys: Vec<K> = serde_json::from_str(json)?;
        self.clear(rt)?;
        for key in keys {
            let entry = self.mount(rt, key)?;
            self.entries.push(entry);
        }
        self.last_dir = TransitionDir::None;
        Ok(())
    }

    fn clear(&mut self, rt: &mut Runtime) -> Result<(), NavError> {
        // top first, the way repeated pops would
        while let Some(entry) = self.entries.pop() {
            rt.unmount(entry.instance)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use hooklab_core::{Callback, Cx, MutableCell, View, ViewKind, on_cleanup};
    use serde::Deserialize;

    use super::*;

    thread_local! {
        static CLEANUPS: MutableCell<Vec<&'static str>> = MutableCell::new(Vec::new());
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    enum Screen {
        Home,
        Detail,
    }

    fn page(cx: &mut Cx<'_>, name: &'static str) -> View {
        let n = cx.use_state(|| 0);
        cx.use_effect((), move || on_cleanup(move || CLEANUPS.with(|c| c.update(|v| v.push(name)))));
        let n2 = n.clone();
        View::new(ViewKind::Button {
            text: format!("{name} {}", n.get()),
            on_click: Callback::new(move |()| n2.update(|v| v + 1)),
        })
        .key("bump")
    }

    impl NavKey for Screen {
        fn path(&self) -> &'static str {
            match self {
                Screen::Home => "/home",
                Screen::Detail => "/detail",
            }
        }

        fn from_path(path: &str) -> Option<Self> {
            match path {
                "/home" => Some(Screen::Home),
                "/detail" => Some(Screen::Detail),
                _ => None,
            }
        }

        fn title(&self) -> &'static str {
            match self {
                Screen::Home => "Home",
                Screen::Detail => "Detail",
            }
        }

        fn component(&self) -> Component {
            match self {
                Screen::Home => Rc::new(|cx: &mut Cx<'_>| page(cx, "home")),
                Screen::Detail => Rc::new(|cx: &mut Cx<'_>| page(cx, "detail")),
            }
        }
    }

    fn cleanups() -> Vec<&'static str> {
        CLEANUPS.with(|c| c.replace(Vec::new()))
    }

    #[test]
    fn test_pop_runs_cleanups_and_keeps_root() {
        cleanups();
        let mut rt = Runtime::new();
        let mut nav = Navigator::new();
        nav.push(&mut rt, Screen::Home).unwrap();
        let detail = nav.open_path(&mut rt, "/detail").unwrap();
        assert_eq!(nav.last_dir(), TransitionDir::Push);

        assert!(nav.pop(&mut rt).unwrap());
        assert_eq!(cleanups(), vec!["detail"]);
        assert!(!rt.is_mounted(detail));
        assert_eq!(nav.last_dir(), TransitionDir::Pop);

        assert!(!nav.pop(&mut rt).unwrap());
        assert_eq!(nav.size(), 1);
        assert!(cleanups().is_empty());
    }

    #[test]
    fn test_unknown_path() {
        let mut rt = Runtime::new();
        let mut nav = Navigator::<Screen>::new();
        let err = nav.open_path(&mut rt, "/nope").unwrap_err();
        assert!(matches!(err, NavError::UnknownPath(p) if p == "/nope"));
        assert!(matches!(nav.top_instance(), Err(NavError::EmptyStack)));
    }

    #[test]
    fn test_same_route_twice_has_separate_state() {
        let mut rt = Runtime::new();
        let mut nav = Navigator::new();
        let a = nav.push(&mut rt, Screen::Detail).unwrap();
        let b = nav.push(&mut rt, Screen::Detail).unwrap();
        rt.click(a, "bump").unwrap();
        assert_eq!(rt.view(a).unwrap().label(), Some("detail 1"));
        assert_eq!(rt.view(b).unwrap().label(), Some("detail 0"));
        assert_ne!(nav.entries()[0].id, nav.entries()[1].id);
    }

    #[test]
    fn test_json_round_trip_remounts() {
        cleanups();
        let mut rt = Runtime::new();
        let mut nav = Navigator::new();
        nav.push(&mut rt, Screen::Home).unwrap();
        let detail = nav.push(&mut rt, Screen::Detail).unwrap();
        rt.click(detail, "bump").unwrap();

        let json = nav.to_json().unwrap();
        assert_eq!(json, r#"["Home","Detail"]"#);

        assert!(nav.restore_json(&mut rt, "{not json").is_err());
        assert_eq!(nav.size(), 2);

        nav.restore_json(&mut rt, &json).unwrap();
        assert_eq!(cleanups(), vec!["detail", "home"]);
        assert_eq!(rt.instance_count(), 2);
        let top = nav.top_instance().unwrap();
        assert_eq!(rt.view(top).unwrap().label(), Some("detail 0"));
        assert_eq!(nav.last_dir(), TransitionDir::None);
    }

    #[test]
    fn test_pop_to_and_replace() {
        let mut rt = Runtime::new();
        let mut nav = Navigator::new();
        nav.push(&mut rt, Screen::Home).unwrap();
        nav.push(&mut rt, Screen::Detail).unwrap();
        nav.push(&mut rt, Screen::Detail).unwrap();
        assert!(nav.pop_to(&mut rt, &Screen::Home).unwrap());
        assert_eq!(nav.size(), 1);
        assert_eq!(rt.instance_count(), 1);

        nav.replace(&mut rt, Screen::Detail).unwrap();
        assert_eq!(nav.size(), 1);
        assert_eq!(nav.top().unwrap().key, Screen::Detail);
        assert_eq!(nav.top().unwrap().key.title(), "Detail");

        nav.clear_and_push(&mut rt, Screen::Home).unwrap();
        assert_eq!(nav.size(), 1);
        assert_eq!(rt.instance_count(), 1);
    }
}
