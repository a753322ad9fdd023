//! # andromeda-server
//!
//! HTTP server library for the andromeda Jalali calendar converter.
//!
//! This library provides the API handlers and state management for andromeda.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

pub mod api;
pub mod logging;
pub mod state;
