mod dialog;
mod ipc;
mod model;
mod ops;
mod registry;
mod report;
mod validate;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::dialog::Dialog;
use crate::ipc::StdioDialog;
use crate::registry::Registry;

const MENU_TITLE: &str = "Grades control";
const MENU_OPTIONS: [&str; 6] = [
    "Register student",
    "Search student",
    "Search discipline",
    "Update student data",
    "Delete student",
    "Report",
];

fn main() -> Result<()> {
    init_logging();

    let mut registry = Registry::new();
    let mut ui = StdioDialog::over_stdio();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "gradesd ready");

    // One operation per menu selection; cancelling the menu exits.
    while let Some(choice) = ui.choose_option(MENU_TITLE, &MENU_OPTIONS)? {
        match choice {
            0 => ops::register_student(&mut registry, &mut ui)?,
            1 => ops::search_student(&registry, &mut ui)?,
            2 => ops::search_discipline(&registry, &mut ui)?,
            3 => ops::update_student(&mut registry, &mut ui)?,
            4 => ops::delete_student(&mut registry, &mut ui)?,
            5 => ops::report(&registry, &mut ui)?,
            _ => {}
        }
    }

    tracing::info!(students = registry.len(), "gradesd exiting");
    Ok(())
}

fn init_logging() {
    // stdout carries the dialog protocol; logging stays on stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
