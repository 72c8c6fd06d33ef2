use std::env;
use tracing_subscriber::EnvFilter;

mod game;

use game::constants::{TICK_MS, WORLD_HEIGHT, WORLD_WIDTH};
use game::input::{parse_target, SteerCommand};
use game::types::Vec2;
use game::world::World;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  let seed: u64 = env::var("SEED")
    .ok()
    .and_then(|value| value.parse().ok())
    .unwrap_or(42);
  let max_ticks: u64 = env::var("MAX_TICKS")
    .ok()
    .and_then(|value| value.parse().ok())
    .unwrap_or(2000);

  let mut world = World::new(Vec2::new(WORLD_WIDTH, WORLD_HEIGHT), seed);
  let delta_time = TICK_MS as f64 / 1000.0;

  tracing::info!(seed, max_ticks, "starting headless session");

  let mut interval = tokio::time::interval(std::time::Duration::from_millis(TICK_MS));
  let mut ticks = 0u64;
  while ticks < max_ticks && !world.game_over() {
    interval.tick().await;

    // Chase the nearest pickup so a headless run still exercises pursuit
    // steering, growth and self collision.
    let state = world.snapshot();
    let head = state.segments[0].position;
    let target = state.pickups.iter().copied().min_by(|a, b| {
      let da = (a.x - head.x).powi(2) + (a.y - head.y).powi(2);
      let db = (b.x - head.x).powi(2) + (b.y - head.y).powi(2);
      da.total_cmp(&db)
    });

    let commands: Vec<SteerCommand> = target.and_then(parse_target).into_iter().collect();
    world.tick(delta_time, &commands);
    ticks += 1;
  }

  let snapshot = world.snapshot();
  tracing::info!(
    score = snapshot.score,
    ticks,
    game_over = snapshot.game_over,
    "session finished"
  );
  println!("{}", serde_json::to_string(&snapshot)?);

  Ok(())
}
