//! Text shaping, pacing and playback core for RSVP reading.

#![no_std]

extern crate alloc;

pub mod document;
pub mod input;
pub mod pacing;
pub mod player;
pub mod render;
pub mod session;
pub mod state;
pub mod sync;
pub mod text;
