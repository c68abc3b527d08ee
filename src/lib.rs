//! Hardware-independent core library for the SwapSafe dashboard
//!
//! This crate contains all platform-agnostic logic for the battery safety
//! dashboard: the safety-score trend calculator, the animated score gauge,
//! the score history chart, the frame scheduler that drives animations and
//! the dashboard page that composes them with the static info cards.
//!
//! It is `#![no_std]` with `extern crate alloc` so it renders into any
//! `embedded-graphics` draw target and compiles for desktop hosts (for the
//! simulator and tests).

#![no_std]

extern crate alloc;

pub mod animation;
pub mod app_state;
pub mod config;
pub mod framebuffer;
pub mod metrics;
pub mod model;
pub mod pages;
pub mod trend;
pub mod ui;
