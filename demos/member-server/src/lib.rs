//! Member lookup server wired through the exhandler resolver chain.

pub mod app_module;
pub mod modules;

pub use app_module::AppModule;
