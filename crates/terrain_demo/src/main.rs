//! terrain_demo - headless streaming terrain walkthrough
//!
//! Flies a camera along a straight path over Perlin terrain, streaming
//! chunks through the view frustum and logging per-frame statistics.
//!
//! ```text
//! RUST_LOG=terrain_plugin=debug cargo run -p terrain_demo -- --frames 120
//! cargo run -p terrain_demo -- --fixed 4x2x4
//! ```

use std::mem::size_of;

use anyhow::Context;
use clap::Parser;
use glam::{Mat4, UVec3, Vec3};
use terrain_plugin::{
  ChunkStreamer, DensityOctave, DensitySettings, Frustum, LodProfile, ShapeSettings,
  TerrainConfig, Vertex,
};
use tracing_subscriber::EnvFilter;
use web_time::Instant;

#[derive(Parser, Debug)]
#[command(name = "terrain_demo", about = "Stream Marching Cubes terrain along a camera path")]
struct Args {
  /// Frames to simulate.
  #[arg(long, default_value_t = 240)]
  frames: u32,

  /// Build a static WxHxD chunk lattice instead of streaming.
  #[arg(long, value_parser = parse_dimensions)]
  fixed: Option<UVec3>,

  #[arg(long, default_value_t = 128.0)]
  view_distance: f32,

  /// Camera speed in world units per frame.
  #[arg(long, default_value_t = 4.0)]
  speed: f32,

  #[arg(long, default_value_t = 32)]
  voxels: usize,

  #[arg(long, default_value_t = 32.0)]
  chunk_size: f32,

  #[arg(long, default_value_t = 1337)]
  seed: u32,

  /// Attach colliders to chunk meshes.
  #[arg(long)]
  collisions: bool,

  /// Toggle smooth shading and regenerate every N frames (0 disables).
  #[arg(long, default_value_t = 0)]
  toggle_every: u32,
}

fn parse_dimensions(s: &str) -> Result<UVec3, String> {
  let parts = s
    .split('x')
    .map(|p| p.trim().parse::<u32>().map_err(|e| format!("{p:?}: {e}")))
    .collect::<Result<Vec<_>, _>>()?;

  match parts.as_slice() {
    [x, y, z] => Ok(UVec3::new(*x, *y, *z)),
    _ => Err(format!("expected WxHxD, got {s:?}")),
  }
}

fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    )
    .init();

  run(Args::parse())
}

fn run(args: Args) -> anyhow::Result<()> {
  let mut config = TerrainConfig::default()
    .with_voxels_per_axis(args.voxels)
    .with_chunk_size(args.chunk_size)
    .with_view_distance(args.view_distance)
    .with_lod_profiles(vec![
      LodProfile::new(args.view_distance * 0.5, 1).with_material(0),
      LodProfile::new(args.view_distance, 2).with_material(1),
    ])
    .with_collisions(args.collisions);
  if let Some(dimensions) = args.fixed {
    config = config.with_fixed_dimensions(dimensions);
  }

  let density = DensitySettings::Noise {
    seed: args.seed,
    global_scale: 0.01,
    octaves: vec![
      DensityOctave::new(1.0, 0.6, Vec3::ZERO),
      DensityOctave::new(2.3, 0.3, Vec3::new(31.7, 0.0, -12.9)),
      DensityOctave::new(5.1, 0.1, Vec3::new(-7.3, 4.4, 19.2)),
    ],
  }
  .build();

  let mut streamer = ChunkStreamer::new(config, density).context("invalid terrain config")?;

  let projection = Mat4::perspective_rh(60f32.to_radians(), 16.0 / 9.0, 0.1, args.view_distance);
  let direction = Vec3::new(1.0, -0.2, 0.3).normalize();
  let mut shape = ShapeSettings::default();
  let mut total_triangles = 0usize;
  let start = Instant::now();

  for frame in 0..args.frames {
    let travel = Vec3::new(direction.x, 0.0, direction.z) * args.speed * frame as f32;
    let eye = Vec3::new(0.0, 24.0, 0.0) + travel;
    let view = Mat4::look_to_rh(eye, direction, Vec3::Y);
    let frustum = Frustum::from_view_projection(&(projection * view));

    let stats = streamer
      .update(eye, &frustum)
      .with_context(|| format!("update failed at frame {frame}"))?;
    total_triangles += stats.triangles;

    if stats.built() > 0 || stats.recycled > 0 {
      tracing::info!(
        frame,
        built = stats.built(),
        reused = stats.reused,
        recycled = stats.recycled,
        culled = stats.culled,
        active = stats.active,
        ms = stats.elapsed_us as f64 / 1000.0,
        "frame"
      );
    }

    if args.toggle_every > 0 && frame > 0 && frame % args.toggle_every == 0 {
      shape.smooth = !shape.smooth;
      streamer.set_shape(shape);
      let regen = streamer.regenerate()?;
      tracing::info!(smooth = shape.smooth, chunks = regen.active, "terrain regenerated");
    }
  }

  let mesh_bytes: usize = streamer
    .active_chunks()
    .map(|c| c.mesh.vertices.len() * size_of::<Vertex>() + c.mesh.indices.len() * size_of::<u32>())
    .sum();

  tracing::info!(
    frames = args.frames,
    active = streamer.active_count(),
    allocations = streamer.pool().allocations(),
    destructions = streamer.pool().destructions(),
    triangles = total_triangles,
    mesh_mb = mesh_bytes as f64 / 1_048_576.0,
    seconds = start.elapsed().as_secs_f64(),
    "walkthrough finished"
  );

  #[cfg(feature = "metrics")]
  {
    let metrics = streamer.metrics();
    tracing::info!(
      avg_pass_us = metrics.avg_pass_timing_us(),
      avg_chunk_us = metrics.avg_chunk_timing_us(),
      reuse_ratio = metrics.reuse_ratio(),
      chunks_built = metrics.total_chunks_built(),
      "streaming metrics"
    );
  }

  streamer.shutdown();
  Ok(())
}
