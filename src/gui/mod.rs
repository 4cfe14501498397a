//! egui window for presenting the collected snapshot

mod app;
pub mod constants;

pub use app::run;
