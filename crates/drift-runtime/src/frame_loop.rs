//! Frame loop: drains queued events into systems, then ticks them

use crate::clock::FrameClock;
use crate::event::FieldEvent;
use crate::event_bus::EventBus;
use crate::system::RuntimeSystem;
use drift_core::Result;

/// Owns the event queue and clock feeding a set of systems
///
/// Systems stay owned by the caller and are passed in per call, in the order
/// they should run. Keeping ownership outside lets the caller read a system's
/// output buffers between frames.
pub struct FrameLoop {
    bus: EventBus,
    clock: FrameClock,
    frame: u64,
    running: bool,
}

impl FrameLoop {
    pub fn new(max_delta: f32) -> Self {
        Self {
            bus: EventBus::new(),
            clock: FrameClock::with_max_delta(max_delta as f64),
            frame: 0,
            running: true,
        }
    }

    /// Call every system's `initialize` hook in order
    pub fn initialize(&mut self, systems: &mut [&mut dyn RuntimeSystem]) -> Result<()> {
        for system in systems.iter_mut() {
            system.initialize()?;
            log::debug!("Initialized system '{}'", system.name());
        }
        Ok(())
    }

    /// Queue an event for delivery before the next frame
    pub fn push_event(&mut self, event: FieldEvent) {
        self.bus.push(event);
    }

    /// Number of frames run so far
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn total_time(&self) -> f64 {
        self.clock.total_time
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop the loop; takes effect between frames
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Run one frame with an externally measured delta
    pub fn frame(&mut self, systems: &mut [&mut dyn RuntimeSystem], dt: f64) -> Result<()> {
        if !self.running {
            return Ok(());
        }
        let dt = self.clock.advance(dt) as f32;

        for event in self.bus.drain() {
            for system in systems.iter_mut() {
                system.handle_event(&event)?;
            }
        }
        for system in systems.iter_mut() {
            system.update(dt)?;
        }

        self.frame += 1;
        Ok(())
    }

    /// Run one frame timed from the wall clock; the first frame gets a zero delta
    pub fn tick(&mut self, systems: &mut [&mut dyn RuntimeSystem]) -> Result<()> {
        let elapsed = self.clock.measure();
        self.frame(systems, elapsed)
    }

    /// Run `frames` frames at a fixed delta, stopping early if the loop is stopped
    pub fn run_fixed(
        &mut self,
        systems: &mut [&mut dyn RuntimeSystem],
        frames: u64,
        dt: f64,
    ) -> Result<()> {
        for _ in 0..frames {
            if !self.running {
                break;
            }
            self.frame(systems, dt)?;
        }
        Ok(())
    }

    /// Shut down every system in reverse order
    pub fn shutdown(&mut self, systems: &mut [&mut dyn RuntimeSystem]) -> Result<()> {
        self.running = false;
        for system in systems.iter_mut().rev() {
            system.shutdown()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        entries: Vec<String>,
    }

    impl RuntimeSystem for Recorder {
        fn initialize(&mut self) -> Result<()> {
            self.entries.push("init".into());
            Ok(())
        }

        fn handle_event(&mut self, event: &FieldEvent) -> Result<()> {
            self.entries.push(format!("event {event:?}"));
            Ok(())
        }

        fn update(&mut self, dt: f32) -> Result<()> {
            self.entries.push(format!("update {dt:.3}"));
            Ok(())
        }

        fn shutdown(&mut self) -> Result<()> {
            self.entries.push("shutdown".into());
            Ok(())
        }

        fn name(&self) -> &str {
            "recorder"
        }
    }

    #[test]
    fn events_arrive_before_update() {
        let mut recorder = Recorder::default();
        let mut frame_loop = FrameLoop::new(0.25);
        frame_loop.initialize(&mut [&mut recorder]).unwrap();
        frame_loop.push_event(FieldEvent::PrimaryClick);
        frame_loop.frame(&mut [&mut recorder], 0.5).unwrap();

        assert_eq!(recorder.entries[0], "init");
        assert_eq!(recorder.entries[1], "event PrimaryClick");
        // Delta clamped to max_delta
        assert_eq!(recorder.entries[2], "update 0.250");
        assert_eq!(frame_loop.frame_count(), 1);
    }

    #[test]
    fn events_reach_every_system_in_order() {
        let mut first = Recorder::default();
        let mut second = Recorder::default();
        let mut frame_loop = FrameLoop::new(0.25);
        frame_loop.push_event(FieldEvent::RespawnAll);
        frame_loop
            .frame(&mut [&mut first, &mut second], 1.0 / 60.0)
            .unwrap();
        assert_eq!(first.entries, second.entries);
        assert_eq!(first.entries.len(), 2);
    }

    #[test]
    fn first_wall_clock_frame_has_zero_delta() {
        let mut recorder = Recorder::default();
        let mut frame_loop = FrameLoop::new(0.25);
        frame_loop.tick(&mut [&mut recorder]).unwrap();
        frame_loop.tick(&mut [&mut recorder]).unwrap();
        assert_eq!(recorder.entries[0], "update 0.000");
        assert_eq!(frame_loop.frame_count(), 2);
        assert!(frame_loop.total_time() <= 0.25);
    }

    #[test]
    fn pointer_moves_between_frames_arrive_once() {
        let mut recorder = Recorder::default();
        let mut frame_loop = FrameLoop::new(0.25);
        frame_loop.push_event(FieldEvent::PointerMoved(drift_core::Vec3::new(1.0, 0.0, 0.0)));
        frame_loop.push_event(FieldEvent::PointerMoved(drift_core::Vec3::new(2.0, 0.0, 0.0)));
        frame_loop.frame(&mut [&mut recorder], 0.0).unwrap();
        assert_eq!(recorder.entries.len(), 2);
        assert!(recorder.entries[0].contains("x: 2.0"));
    }

    #[test]
    fn stop_halts_between_frames() {
        let mut recorder = Recorder::default();
        let mut frame_loop = FrameLoop::new(0.25);
        frame_loop
            .run_fixed(&mut [&mut recorder], 3, 1.0 / 60.0)
            .unwrap();
        frame_loop.stop();
        frame_loop
            .run_fixed(&mut [&mut recorder], 3, 1.0 / 60.0)
            .unwrap();
        assert_eq!(frame_loop.frame_count(), 3);
        assert!((frame_loop.total_time() - 3.0 / 60.0).abs() < 1e-9);

        frame_loop.shutdown(&mut [&mut recorder]).unwrap();
        assert_eq!(recorder.entries.last().unwrap(), "shutdown");
    }
}
