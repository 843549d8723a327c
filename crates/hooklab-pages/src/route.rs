use std::rc::Rc;

use hooklab_core::Component;
use hooklab_navigation::NavKey;
use serde::{Deserialize, Serialize};

use crate::pages::{
    PlusThreePage, UseCallbackPage, UseEffectPage, UseMemoPage, UseRefPage, UseStatePage,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Route {
    UseState,
    UseMemo,
    UseEffect,
    UseRef,
    UseCallback,
    PlusThree,
}

impl Route {
    pub const ALL: [Route; 6] = [
        Route::UseState,
        Route::UseMemo,
        Route::UseEffect,
        Route::UseRef,
        Route::UseCallback,
        Route::PlusThree,
    ];
}

impl NavKey for Route {
    fn path(&self) -> &'static str {
        match self {
            Route::UseState => "/hooks/use-state",
            Route::UseMemo => "/hooks/use-memo",
            Route::UseEffect => "/hooks/use-effect",
            Route::UseRef => "/hooks/use-ref",
            Route::UseCallback => "/hooks/use-callback",
            Route::PlusThree => "/hooks/problems/plus-three",
        }
    }

    fn from_path(path: &str) -> Option<Self> {
        let path = path.trim_end_matches('/');
        Route::ALL.into_iter().find(|r| r.path() == path)
    }

    fn title(&self) -> &'static str {
        match self {
            Route::UseState => "Stateful basics",
            Route::UseMemo => "Expensive memo",
            Route::UseEffect => "Side effects",
            Route::UseRef => "Core hook",
            Route::UseCallback => "Event memoization",
            Route::PlusThree => "Plus three",
        }
    }

    fn component(&self) -> Component {
        match self {
            Route::UseState => Rc::new(UseStatePage),
            Route::UseMemo => Rc::new(UseMemoPage),
            Route::UseEffect => Rc::new(UseEffectPage),
            Route::UseRef => Rc::new(UseRefPage),
            Route::UseCallback => Rc::new(UseCallbackPage),
            Route::PlusThree => Rc::new(PlusThreePage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_distinct_and_resolve() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(route));
            assert_eq!(
                Route::ALL.iter().filter(|r| r.path() == route.path()).count(),
                1
            );
        }
        assert_eq!(Route::from_path("/hooks/use-memo/"), Some(Route::UseMemo));
        assert_eq!(Route::from_path("/hooks/use-context"), None);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Route::ALL).unwrap();
        assert_eq!(
            json,
            r#"["use-state","use-memo","use-effect","use-ref","use-callback","plus-three"]"#
        );
        let back: Vec<Route> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Route::ALL);
    }
}
