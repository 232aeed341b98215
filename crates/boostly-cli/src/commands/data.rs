//! Whole-state commands: reset, export, import.

use std::path::Path;

use boostly_core::AppState;

use super::confirm;
use crate::render::{self, Format};
use crate::session::Session;

pub fn reset(yes: bool, format: Format) -> Result<(), Box<dyn std::error::Error>> {
    let (mut session, pending) = Session::open()?;
    render::events(&pending, format, &session.config);

    if !yes && !confirm("Reset app data? Points, levels, tasks and history will be lost.")? {
        println!("Nothing changed");
        return Ok(());
    }
    let outcome = session.tracker.reset();
    render::events(&outcome.events, format, &session.config);
    Ok(())
}

pub fn export() -> Result<(), Box<dyn std::error::Error>> {
    let (session, pending) = Session::open()?;
    render::notices(&pending, &session.config);
    println!("{}", serde_json::to_string_pretty(session.tracker.state())?);
    Ok(())
}

pub fn import(path: &Path, format: Format) -> Result<(), Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    let state: AppState = serde_json::from_str(&content)?;

    let (mut session, pending) = Session::open()?;
    render::events(&pending, format, &session.config);
    let outcome = session.tracker.import(state);
    render::events(&outcome.events, format, &session.config);
    Ok(())
}
