//! Core traits and types for cycle-accurate emulation.
//!
//! Components advance one clock cycle per tick and reach memory only
//! through a [`Bus`] lent to them for that tick.

mod bus;
mod cpu;
mod ticks;

pub use bus::{Bus, SimpleBus};
pub use cpu::Cpu;
pub use ticks::Ticks;
