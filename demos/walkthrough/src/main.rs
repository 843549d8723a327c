//! Mounts every page, drives a scripted tour through it and prints the
//! resulting view trees.
//!
//! `walkthrough [config.json]`; without a path the config comes from
//! `HOOKLAB_ENV`. `RUST_LOG=debug` shows renders and flushes.

use std::rc::Rc;
use std::time::Duration;

use anyhow::Context;
use hooklab_core::{InstanceKey, Runtime};
use hooklab_devtools::RenderScan;
use hooklab_navigation::{NavKey, Navigator};
use hooklab_pages::{LabConfig, Route};

fn script(rt: &mut Runtime, route: Route, page: InstanceKey) -> anyhow::Result<()> {
    match route {
        Route::UseState => {
            rt.click(page, "step-5")?;
            rt.click(page, "+ Step")?;
            rt.click(page, "+ Step")?;
            rt.slide(page, "goal", 30)?;
            rt.input(page, "rename", "Deep work")?;
        }
        Route::UseMemo => {
            for i in 1..=5 {
                rt.input(page, "note", format!("keystroke {i}"))?;
            }
            rt.slide(page, "index", 33)?;
        }
        Route::UseEffect => {
            rt.click(page, "toggle")?;
            let ticks = rt.advance(Duration::from_secs(12))?;
            log::info!("{ticks} timer ticks, {} timers left", rt.pending_timers());
        }
        Route::UseRef => {
            rt.slide(page, "score", 80)?;
            rt.slide(page, "score", 40)?;
            rt.input(page, "nickname", "ada")?;
            rt.click(page, "focus")?;
            if let Some(node) = rt.focused(page) {
                println!("focused: {}", node.label().unwrap_or("?"));
            }
        }
        Route::UseCallback => {
            for text in ["t", "ty", "typ"] {
                rt.input(page, "note", text)?;
            }
            rt.slide(page, "adjust-step", 6)?;
            rt.click(page, "stable-action")?;
        }
        Route::PlusThree => rt.click(page, "+3")?,
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            LabConfig::load(&path).with_context(|| format!("loading config from {path}"))?
        }
        None => LabConfig::from_env(),
    };
    log::debug!("{config:?}");

    let scan = Rc::new(RenderScan::new(config.scan.clone()));
    let mut rt = Runtime::with_options(config.runtime_options());
    rt.observe(scan.clone());

    let mut nav = Navigator::<Route>::new();
    nav.open_path(&mut rt, &config.start_path)
        .with_context(|| format!("opening {}", config.start_path))?;

    for route in Route::ALL {
        let page = match nav.top().map(|e| (e.key, e.instance)) {
            Some((key, instance)) if key == route => instance,
            _ => nav.push(&mut rt, route)?,
        };
        println!("== {} ({})", route.title(), route.path());
        script(&mut rt, route, page).with_context(|| format!("touring {}", route.path()))?;

        let mut view = rt.view(page).context("page never rendered")?.clone();
        scan.overlay(&mut view);
        print!("{view}");
        println!(
            "renders: {}, timers: {}, clock: {:?}\n",
            rt.render_count(page).unwrap_or(0),
            rt.pending_timers(),
            rt.now()
        );
    }

    let saved = nav.to_json()?;
    println!("back stack: {saved}");
    nav.restore_json(&mut rt, &saved)
        .context("restoring back stack")?;
    println!("restored {} pages", nav.size());

    while nav.pop(&mut rt)? {}
    println!("back at {}", nav.top().map_or("nowhere", |e| e.key.path()));

    for line in scan.report() {
        println!("{line}");
    }
    Ok(())
}
