//! Generic listing plumbing: a cancel-and-replace fetch coordinator with
//! shared loading/error signals, and the paginator's page-sequence logic.

pub mod config;
pub mod listing;
pub mod logging;
pub mod pagination;
pub mod tracking;
pub mod ui;
