//! Platform abstraction layer
//!
//! The simulation and the editor only see input through [`InputSource`].
//! A windowing backend translates its events into an [`InputSnapshot`] once
//! per tick; tests and the headless driver build snapshots by hand.

pub mod input;

pub use input::{InputSnapshot, InputSource, Key, MouseButton};
