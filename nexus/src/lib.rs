//! `Nexus` — mission tracker with rank progression.

pub mod app;
pub mod config;
pub mod storage;
pub mod tasks;
pub mod ui;
