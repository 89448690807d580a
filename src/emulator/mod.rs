//! The machine, its interpreter, and the plumbing a frontend needs.

pub mod config;
pub mod cpu;
pub mod display;
pub mod error;
pub mod input;
pub mod instruction;
pub mod keypad;
pub mod machine;
pub mod memory;
pub mod output;
pub mod runner;
pub mod timers;

pub use config::{Config, Quirks};
pub use display::FrameBuffer;
pub use error::{Fault, RomError, StackFault};
pub use machine::{Machine, Status};
pub use runner::Emulator;
