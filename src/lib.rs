#![warn(clippy::all, rust_2018_idioms)]

mod app;
mod ui;
pub mod catalog;
pub mod midi;
pub mod presenter;

pub use app::App;
