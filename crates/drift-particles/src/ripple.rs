//! Click ripple: a half-sine swell of the interaction radius

use std::f32::consts::PI;

/// Two-state envelope (idle / rippling) driving the effective interaction radius
#[derive(Debug, Clone)]
pub struct RippleController {
    duration: f32,
    base_radius: f32,
    max_radius: f32,
    elapsed: f32,
    active: bool,
    effective_radius: f32,
}

impl RippleController {
    pub fn new(base_radius: f32, duration: f32) -> Self {
        Self {
            duration,
            base_radius,
            max_radius: base_radius,
            elapsed: 0.0,
            active: false,
            effective_radius: base_radius,
        }
    }

    /// Start (or restart) a ripple. The peak radius captures `scale` now.
    pub fn trigger(&mut self, scale: f32) {
        self.elapsed = 0.0;
        self.active = true;
        self.max_radius = self.base_radius * scale * 2.0;
        self.effective_radius = self.radius_at(0.0);
    }

    /// Change the steady-state radius; an idle controller follows immediately
    pub fn set_base_radius(&mut self, radius: f32) {
        self.base_radius = radius;
        if !self.active {
            self.effective_radius = radius;
        }
    }

    /// Advance by `dt` seconds and return the effective radius for this frame
    pub fn advance(&mut self, dt: f32) -> f32 {
        if self.active {
            self.elapsed += dt;
            if self.elapsed / self.duration <= 1.0 {
                self.effective_radius = self.radius_at(self.elapsed);
            } else {
                self.active = false;
                self.effective_radius = self.base_radius;
            }
        } else {
            self.effective_radius = self.base_radius;
        }
        self.effective_radius
    }

    /// Envelope value `elapsed` seconds into a ripple
    pub fn radius_at(&self, elapsed: f32) -> f32 {
        let t = elapsed / self.duration;
        self.base_radius + (self.max_radius - self.base_radius) * (PI * t).sin()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Seconds since the current ripple started, while one is running
    pub fn elapsed(&self) -> Option<f32> {
        self.active.then_some(self.elapsed)
    }

    pub fn effective_radius(&self) -> f32 {
        self.effective_radius
    }

    pub fn base_radius(&self) -> f32 {
        self.base_radius
    }

    pub fn max_radius(&self) -> f32 {
        self.max_radius
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_tracks_base_radius() {
        let mut ripple = RippleController::new(50.0, 0.5);
        assert_eq!(ripple.advance(0.016), 50.0);
        ripple.set_base_radius(80.0);
        assert_eq!(ripple.effective_radius(), 80.0);
        assert_eq!(ripple.advance(0.016), 80.0);
        assert!(ripple.elapsed().is_none());
    }

    #[test]
    fn envelope_rises_peaks_and_returns() {
        let mut ripple = RippleController::new(50.0, 0.5);
        ripple.trigger(1.0);
        assert!(ripple.is_active());
        assert_eq!(ripple.max_radius(), 100.0);
        // t = 0
        assert!((ripple.effective_radius() - 50.0).abs() < 1e-4);

        // t = 0.5
        let peak = ripple.advance(0.25);
        assert!((peak - ripple.max_radius()).abs() < 1e-3);

        // t = 1 still inside the envelope, back at base
        let end = ripple.advance(0.25);
        assert!(ripple.is_active());
        assert!((end - 50.0).abs() < 1e-3);

        // t > 1 goes idle
        assert_eq!(ripple.advance(0.01), 50.0);
        assert!(!ripple.is_active());
    }

    #[test]
    fn max_radius_captures_scale_at_trigger() {
        let mut ripple = RippleController::new(40.0, 0.5);
        ripple.trigger(1.5);
        assert!((ripple.max_radius() - 120.0).abs() < 1e-4);
    }

    #[test]
    fn retrigger_restarts_envelope() {
        let mut ripple = RippleController::new(50.0, 0.5);
        ripple.trigger(1.0);
        ripple.advance(0.4);
        ripple.trigger(1.0);
        assert_eq!(ripple.elapsed(), Some(0.0));
        ripple.advance(0.2);
        assert!(ripple.is_active());
        assert!((ripple.elapsed().unwrap() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn base_change_during_ripple_keeps_envelope() {
        let mut ripple = RippleController::new(50.0, 0.5);
        ripple.trigger(1.0);
        ripple.advance(0.1);
        let before = ripple.effective_radius();
        ripple.set_base_radius(10.0);
        assert_eq!(ripple.effective_radius(), before);
        assert_eq!(ripple.max_radius(), 100.0);
        ripple.advance(1.0);
        assert_eq!(ripple.effective_radius(), 10.0);
    }
}
