//! Runtime system trait

use crate::event::FieldEvent;
use drift_core::Result;

/// A system that can be ticked by the frame loop
///
/// Systems are updated in registration order. Events queued since the last
/// frame are delivered through `handle_event` before any `update` runs, so a
/// system never sees input change in the middle of its sweep.
pub trait RuntimeSystem {
    /// Called once when the system is first registered
    fn initialize(&mut self) -> Result<()>;

    /// Called for every event drained from the bus, between frames
    fn handle_event(&mut self, event: &FieldEvent) -> Result<()>;

    /// Called once per frame with the clamped frame delta in seconds
    fn update(&mut self, dt: f32) -> Result<()>;

    /// Called when the system is being shut down
    fn shutdown(&mut self) -> Result<()>;

    /// Human-readable name for this system
    fn name(&self) -> &str;
}
