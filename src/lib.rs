//! Box System: place width×height boxes on a 5×5 LED grid with two buttons.
//!
//! The user picks a width and a height with a debounced click counter (button B
//! advances, button A confirms). The placement engine puts the box at the first
//! free spot in row-major order, colors it from a five-color cycle, and the grid
//! is shown on a serpentine-wired WS2812 matrix. A character LCD carries the
//! prompts. The session ends when the grid is full or the user declines to add
//! another box.
//!
//! # Layers
//!
//! - Core logic, testable on the host: [`click_counter`], [`press`], [`grid`],
//!   [`palette`], [`serpentine`], [`wizard`], [`session`].
//! - Capabilities the core talks through: [`display::TextDisplay`],
//!   [`serpentine::PixelStrip`], [`press::ButtonEvents`], and
//!   [`embedded_hal_async::delay::DelayNs`].
//! - Pico adapters (not built with the `host` feature): `button`, `button_task`,
//!   `led_matrix`, `char_lcd`.
//!
//! # Glossary
//!
//! - **Anchor:** top-left cell of a placed box.
//! - **Serpentine:** LED wiring where consecutive rows run in opposite directions.
//! - **PIO ([Programmable I/O](https://medium.com/data-science/nine-pico-pio-wats-with-rust-part-1-9d062067dc25)):**
//!   Pico state machines; one drives the WS2812 data line.
#![cfg_attr(not(feature = "host"), no_std)]
#![cfg_attr(not(feature = "host"), no_main)]
#![allow(async_fn_in_trait, reason = "single-threaded embedded")]

// Compile-time checks: exactly one board must be selected (unless testing with host feature)
#[cfg(all(not(any(feature = "pico1", feature = "pico2")), not(feature = "host")))]
compile_error!("Must enable exactly one board feature: 'pico1' or 'pico2'");

#[cfg(all(feature = "pico1", feature = "pico2"))]
compile_error!("Cannot enable both 'pico1' and 'pico2' features simultaneously");

// Compile-time checks: exactly one architecture must be selected (unless testing with host feature)
#[cfg(all(not(any(feature = "arm", feature = "riscv")), not(feature = "host")))]
compile_error!("Must enable exactly one architecture feature: 'arm' or 'riscv'");

#[cfg(all(feature = "arm", feature = "riscv"))]
compile_error!("Cannot enable both 'arm' and 'riscv' features simultaneously");

// Compile-time check: pico1 only supports ARM
#[cfg(all(feature = "pico1", feature = "riscv"))]
compile_error!("Pico 1 (RP2040) only supports ARM architecture, not RISC-V");

pub mod click_counter;
pub mod dimension;
pub mod display;
mod error;
pub mod grid;
pub mod layout;
pub mod palette;
pub mod press;
pub mod serpentine;
pub mod session;
#[cfg(feature = "host")]
pub mod to_png;
pub mod wizard;
// These modules require embassy_rp and are excluded when testing on host
#[cfg(not(feature = "host"))]
pub mod button;
#[cfg(not(feature = "host"))]
pub mod button_task;
#[cfg(not(feature = "host"))]
pub mod char_lcd;
#[cfg(not(feature = "host"))]
pub mod led_matrix;

// Re-export error types and result (used throughout)
pub use crate::error::{Error, Result};
