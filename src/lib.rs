//! Site Planner: a construction work-planning desktop application.
//!
//! `layout` holds the pure timeline geometry shared by the interactive
//! chart (`ui`) and the print/export renderer (`export`); `model` and `io`
//! carry the plan document and its persistence.

pub mod app;
pub mod export;
pub mod io;
pub mod layout;
pub mod model;
pub mod ui;
