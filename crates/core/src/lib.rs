#![deny(warnings)]

pub mod config;
pub mod demo;
pub mod ring_buffer;

pub use ring_buffer::{RingBuffer, RingBufferError};
