#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod ai;
mod bitboard;
mod common;
mod config;
#[cfg(feature = "std")]
pub mod deploy;
mod display;
mod game;
mod grid;
#[cfg(feature = "std")]
mod logging;
mod placement;
#[cfg(feature = "std")]
pub mod protocol;
#[cfg(feature = "std")]
pub mod session;
mod ship;
mod strategy;
#[cfg(feature = "std")]
pub mod transport;
#[cfg(feature = "std")]
mod ui;

pub use ai::*;
pub use bitboard::{BitBoard, BitBoardError, SetBits};
pub use common::*;
pub use config::*;
pub use display::*;
pub use game::*;
pub use grid::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, parse_level, LOG_ENV};
pub use placement::*;
#[cfg(feature = "std")]
pub use protocol::{Message, PROTOCOL_VERSION};
#[cfg(feature = "std")]
pub use session::{MenuChoice, Session, SessionConfig, StrategyKind};
pub use ship::*;
pub use strategy::*;
#[cfg(feature = "std")]
pub use transport::pipe::PipeTransport;
#[cfg(feature = "std")]
pub use ui::*;
