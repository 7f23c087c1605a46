mod app;
pub mod login;
pub mod pages;
pub mod route;
mod ui;

pub use app::{App, AppEvent};
pub use route::Route;
