//! Terminal front end: login gate, event loop, and rendering.

mod app;
mod debounce;
mod draw;
mod login;

pub use app::run;
