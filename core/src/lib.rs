#![no_std]

extern crate alloc;

pub use cell::*;
pub use config::*;
pub use controller::*;
pub use error::*;
pub use grid::*;
pub use input::*;
pub use listener::*;
pub use reveal::{OpenOutcome, Opening};
pub use types::*;

mod cell;
mod config;
mod controller;
mod error;
mod grid;
mod input;
mod listener;
pub mod reveal;
mod types;
