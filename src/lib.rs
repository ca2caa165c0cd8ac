pub mod app;
pub mod backend;
pub mod command;
pub mod config;
pub mod counter;
pub mod document;
pub mod error;
pub mod event;
pub mod input;
pub mod logging;
pub mod presenter;
pub mod query;
pub mod render;
pub mod transport;
pub mod ui;
pub mod upload;
pub mod viewer;

#[cfg(test)]
mod test_support;
