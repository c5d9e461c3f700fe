//! Drift Runtime - Frame loop infrastructure
//!
//! Provides the building blocks that drive a particle field once per frame:
//! - `FrameClock` - wall-clock deltas with clamping
//! - `FieldEvent` / `EventBus` - input queued by handlers between frames
//! - `RuntimeSystem` - trait for systems ticked by the frame loop
//! - `FrameLoop` - delivers queued events, then ticks every system

mod clock;
mod event;
mod event_bus;
mod frame_loop;
mod system;

pub use clock::FrameClock;
pub use event::FieldEvent;
pub use event_bus::EventBus;
pub use frame_loop::FrameLoop;
pub use system::RuntimeSystem;
