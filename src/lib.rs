//! Dockdeck: an interactive terminal front-end for Docker resources.
//!
//! This library exposes the core modules for use by the binary and by tests.

pub mod app;
pub mod client;
pub mod config;
pub mod docker;
pub mod keymap;
pub mod layout;
pub mod model;
pub mod pages;
pub mod panel;
pub mod task;
pub mod view;

#[cfg(test)]
mod test_support;
