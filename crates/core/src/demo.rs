//! The walkthrough run by the `ring-queue` binary: fill a five slot buffer,
//! overflow it, then inspect and pop the front.

use crate::config::DemoConfig;
use crate::ring_buffer::{RingBuffer, RingBufferError};
use serde::Serialize;
use std::fmt::Write as _;

pub const DEMO_CAPACITY: usize = 5;

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct DemoReport {
    pub capacity: usize,
    pub after_fill: Vec<i64>,
    pub after_overflow: Vec<i64>,
    pub evicted: Vec<i64>,
    pub front: i64,
    pub front_after_pop: Option<i64>,
}

impl DemoReport {
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Contents after pushing {} values:\n{}",
            self.after_fill.len(),
            join(&self.after_fill)
        );
        let _ = writeln!(
            out,
            "Contents after overflow (evicted: {}):\n{}",
            if self.evicted.is_empty() {
                "none".to_owned()
            } else {
                join(&self.evicted)
            },
            join(&self.after_overflow)
        );
        let _ = writeln!(out, "Front element: {}", self.front);
        match self.front_after_pop {
            Some(v) => {
                let _ = writeln!(out, "Front element after pop: {v}");
            }
            None => {
                let _ = writeln!(out, "Buffer is empty after pop");
            }
        }
        out
    }
}

fn join(values: &[i64]) -> String {
    values
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn run_demo(config: &DemoConfig) -> Result<DemoReport, RingBufferError> {
    let mut queue: RingBuffer<i64, DEMO_CAPACITY> = RingBuffer::new();
    let mut evicted = Vec::new();

    for &value in config.fill.values() {
        evicted.extend(queue.push(value));
    }
    let after_fill: Vec<i64> = queue.iter().copied().collect();
    tracing::debug!(len = queue.len(), full = queue.is_full(), "filled buffer");

    for &value in config.overflow.values() {
        evicted.extend(queue.push(value));
    }
    let after_overflow: Vec<i64> = queue.iter().copied().collect();
    tracing::debug!(evicted = evicted.len(), "pushed overflow values");

    let front = *queue.front()?;
    queue.pop()?;
    let front_after_pop = queue.front().ok().copied();

    Ok(DemoReport {
        capacity: queue.capacity(),
        after_fill,
        after_overflow,
        evicted,
        front,
        front_after_pop,
    })
}
