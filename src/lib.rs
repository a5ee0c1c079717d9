#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod ai;
mod battle;
mod bitboard;
#[cfg(feature = "std")]
pub mod cli;
mod common;
mod config;
mod deployment;
mod grid;
#[cfg(feature = "std")]
mod logging;
mod ship;
#[cfg(feature = "std")]
pub mod sim;
#[cfg(feature = "std")]
pub mod ui;

pub use battle::*;
pub use bitboard::{BitBoard, BitBoardError};
pub use common::*;
pub use config::*;
pub use deployment::*;
pub use grid::*;
#[cfg(feature = "std")]
pub use logging::init_logging;
pub use ship::*;
