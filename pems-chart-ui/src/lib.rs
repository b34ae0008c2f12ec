//! Dioxus components and D3.js bridge for the QPeMS dashboard.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for the D3.js flow chart and station map via `js_sys::eval()`
//! - `state`: Reactive AppState wrapping one dashboard session
//! - `components`: RSX controls (station, range, granularity, map button) and containers

pub mod js_bridge;
pub mod state;
pub mod components;
