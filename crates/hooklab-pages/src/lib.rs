#![allow(non_snake_case)]
//! Demo pages, one per primitive, plus the route table that reaches them.
//!
//! ```rust
//! use hooklab_core::Runtime;
//! use hooklab_navigation::Navigator;
//! use hooklab_pages::Route;
//!
//! let mut rt = Runtime::new();
//! let mut nav = Navigator::<Route>::new();
//! let page = nav.open_path(&mut rt, "/hooks/problems/plus-three").unwrap();
//! rt.click(page, "+3").unwrap();
//! assert_eq!(rt.view(page).unwrap().text_of("count"), Some("3"));
//! assert_eq!(nav.top().unwrap().key, Route::PlusThree);
//! ```

pub mod config;
pub mod pages;
pub mod route;

pub use config::{ConfigError, LabConfig};
pub use pages::*;
pub use route::Route;

/// `min(100, round(part / whole * 100))`, never below zero.
pub(crate) fn percent_of(part: i64, whole: i64) -> i64 {
    if whole <= 0 {
        return 0;
    }
    let pct = (part as f64 / whole as f64 * 100.0).round() as i64;
    pct.clamp(0, 100)
}
