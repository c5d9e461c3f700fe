//! Simulate command - runs the particle field headless with a scripted pointer

use super::shapes::{self, Shape};
use anyhow::{ensure, Context, Result};
use drift_core::{FieldConfig, Vec3};
use drift_particles::{ParticleField, SpawnPool};
use drift_runtime::{FieldEvent, FrameLoop};
use serde::Serialize;
use std::f32::consts::TAU;
use std::path::Path;
use std::time::Duration;

/// Points generated for a built-in shape
const SHAPE_POINTS: usize = 4096;
/// Frames per pointer revolution
const ORBIT_FRAMES: f32 = 240.0;

pub struct SimulateArgs {
    pub config: Option<String>,
    pub frames: u64,
    pub dt: f64,
    pub realtime: bool,
    pub particles: Option<usize>,
    pub seed: Option<u64>,
    pub shape: Shape,
    pub points: Option<String>,
    pub model_scale: f32,
    pub orbit: f32,
    pub click_every: u64,
    pub output: Option<String>,
}

#[derive(Serialize)]
struct Snapshot<'a> {
    frames: u64,
    particle_count: usize,
    /// Flat [x0, y0, z0, x1, ...] buffer
    positions: &'a [f32],
    sizes: &'a [f32],
}

#[derive(Debug, Default, PartialEq)]
struct Summary {
    mean_displacement: f32,
    max_displacement: f32,
    non_finite: usize,
}

pub fn run(args: SimulateArgs) -> Result<()> {
    ensure!(
        args.dt.is_finite() && args.dt > 0.0,
        "--dt must be a positive number of seconds, got {}",
        args.dt
    );
    let config = resolve_config(&args)?;
    let mut field = ParticleField::new(&config).context("Failed to create particle field")?;
    let mut frame_loop = FrameLoop::new(config.simulation.max_frame_delta);
    frame_loop.initialize(&mut [&mut field])?;

    frame_loop.push_event(spawn_event(&args));

    let mut ripple_frames = 0u64;
    let mut idle_frames = 0u64;
    for frame in 0..args.frames {
        let angle = TAU * frame as f32 / ORBIT_FRAMES;
        frame_loop.push_event(FieldEvent::PointerMoved(Vec3::new(
            angle.cos() * args.orbit,
            angle.sin() * args.orbit,
            0.0,
        )));
        if args.click_every > 0 && frame > 0 && frame % args.click_every == 0 {
            frame_loop.push_event(FieldEvent::PrimaryClick);
        }

        if args.realtime {
            std::thread::sleep(Duration::from_secs_f64(args.dt));
            frame_loop.tick(&mut [&mut field])?;
        } else {
            frame_loop.frame(&mut [&mut field], args.dt)?;
        }

        if field.ripple().is_active() {
            ripple_frames += 1;
        }
        if field.last_stats().idle {
            idle_frames += 1;
        }
    }

    let summary = summarize(&field);
    println!("Frames:            {}", frame_loop.frame_count());
    println!("Simulated time:    {:.2}s", frame_loop.total_time());
    println!("Particles:         {}", field.store().len());
    println!("Spawn points:      {}", field.pool().len());
    println!("Respawns:          {}", field.total_respawns());
    println!("Ripple frames:     {ripple_frames}");
    println!("Idle frames:       {idle_frames}");
    println!("Mean displacement: {:.4}", summary.mean_displacement);
    println!("Max displacement:  {:.4}", summary.max_displacement);
    if summary.non_finite > 0 {
        println!("Non-finite:        {}", summary.non_finite);
    }

    if let Some(path) = &args.output {
        let store = field.store_mut();
        store.take_dirty();
        let snapshot = Snapshot {
            frames: frame_loop.frame_count(),
            particle_count: store.len(),
            positions: store.positions_flat(),
            sizes: store.sizes(),
        };
        let json = serde_json::to_string(&snapshot)?;
        std::fs::write(path, json).with_context(|| format!("Failed to write {path}"))?;
        println!("Wrote {path}");
    }

    frame_loop.shutdown(&mut [&mut field])?;
    Ok(())
}

fn resolve_config(args: &SimulateArgs) -> Result<FieldConfig> {
    let mut config = FieldConfig::load(args.config.as_deref().map(Path::new))
        .context("Failed to load config")?;
    if let Some(particles) = args.particles {
        config.simulation.particle_count = particles;
    }
    if let Some(seed) = args.seed {
        config.simulation.seed = Some(seed);
    }
    config.validate()?;
    Ok(config)
}

/// Build the loader event: a point file or a built-in shape.
/// A point file that fails to load is reported like a failed mesh load.
fn spawn_event(args: &SimulateArgs) -> FieldEvent {
    let raw = match &args.points {
        Some(path) => match shapes::load_points(path) {
            Ok(points) => {
                log::info!("Read {} spawn point(s) from {path}", points.len());
                points
            }
            Err(e) => return FieldEvent::SpawnPointsFailed(format!("{e:#}")),
        },
        None => shapes::generate(args.shape, SHAPE_POINTS),
    };
    let pool = SpawnPool::centered(raw, args.model_scale);
    FieldEvent::SpawnPointsLoaded(pool.points().to_vec())
}

fn summarize(field: &ParticleField) -> Summary {
    let store = field.store();
    if store.is_empty() {
        return Summary::default();
    }

    let mut summary = Summary::default();
    let mut total = 0.0f64;
    for i in 0..store.len() {
        let p = store.get(i);
        if !p.position.is_finite() {
            summary.non_finite += 1;
            continue;
        }
        let d = p.position.distance(&p.origin);
        total += d as f64;
        summary.max_displacement = summary.max_displacement.max(d);
    }
    let finite = store.len() - summary.non_finite;
    if finite > 0 {
        summary.mean_displacement = (total / finite as f64) as f32;
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> SimulateArgs {
        SimulateArgs {
            config: None,
            frames: 10,
            dt: 1.0 / 60.0,
            realtime: false,
            particles: Some(64),
            seed: Some(3),
            shape: Shape::Ring,
            points: None,
            model_scale: 100.0,
            orbit: 50.0,
            click_every: 5,
            output: None,
        }
    }

    #[test]
    fn cli_overrides_apply() {
        let config = resolve_config(&args()).unwrap();
        assert_eq!(config.simulation.particle_count, 64);
        assert_eq!(config.simulation.seed, Some(3));
    }

    #[test]
    fn non_positive_dt_is_rejected() {
        let mut a = args();
        a.dt = 0.0;
        assert!(run(a).is_err());
    }

    #[test]
    fn realtime_run_completes() {
        let mut a = args();
        a.realtime = true;
        a.frames = 3;
        a.dt = 0.001;
        run(a).unwrap();
    }

    #[test]
    fn missing_point_file_becomes_failure_event() {
        let mut a = args();
        a.points = Some("/nonexistent/points.json".into());
        assert!(matches!(spawn_event(&a), FieldEvent::SpawnPointsFailed(_)));
    }

    #[test]
    fn shape_event_is_centered_and_scaled() {
        let FieldEvent::SpawnPointsLoaded(points) = spawn_event(&args()) else {
            panic!("expected loaded points");
        };
        assert_eq!(points.len(), SHAPE_POINTS);
        assert!(points.iter().all(|p| (p.length() - 100.0).abs() < 1e-2));
    }

    #[test]
    fn summary_after_short_run_is_finite() {
        let a = args();
        let config = resolve_config(&a).unwrap();
        let mut field = ParticleField::new(&config).unwrap();
        let mut frame_loop = FrameLoop::new(config.simulation.max_frame_delta);
        frame_loop.push_event(spawn_event(&a));
        frame_loop.run_fixed(&mut [&mut field], a.frames, a.dt).unwrap();

        let summary = summarize(&field);
        assert_eq!(summary.non_finite, 0);
        assert!(summary.max_displacement >= summary.mean_displacement);
        assert!(summary.max_displacement < config.simulation.max_distance);
    }
}
