//! cabtown: headless run of the city core.
//!
//! Generates a map, prints it as ASCII, drives a few taxis and private cars
//! through the calculation tick, then saves the map and restores it again.

use std::path::Path;
use std::time::Instant;

use anyhow::{Result, ensure};

use cab_core::{CarKind, Direction, MapConfig, SimConfig, Tick, TilePos, TripId};
use cab_map::{TileGrid, TileType};
use cab_sim::{SimBuilder, SimContext, SimObserver};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:              u64   = 42;
const NEIGHBORHOODS:     u32   = 4;
const RANDOM_TRIPS:      usize = 6;
const TAXI_EVERY:        usize = 3;    // every third random trip is a taxi
const MAX_TICKS:         u64   = 200;
const REPORT_EVERY:      u64   = 10;
const FROM_IDLE_STEPS:   usize = 2;
const TO_IDLE_STEPS:     usize = 2;
const OUTPUT_DIR:        &str  = "output/cabtown";

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct TripLog {
    started:     usize,
    finished:    Vec<(Tick, TripId)>,
    last_active: usize,
}

impl SimObserver for TripLog {
    fn on_trip_started(&mut self, _tick: Tick, _trip: TripId) {
        self.started += 1;
    }

    fn on_trip_finished(&mut self, tick: Tick, trip: TripId) {
        self.finished.push((tick, trip));
    }

    fn on_tick_end(&mut self, _tick: Tick, active_trips: usize) {
        self.last_active = active_trips;
    }
}

// ── ASCII map ─────────────────────────────────────────────────────────────────

/// One character per tile.  Roads show their single legal entry direction
/// as an arrow, or `+` where several are legal.
fn glyph(grid: &TileGrid, pos: TilePos) -> char {
    let Some(tile) = grid.tile(pos) else {
        return ' ';
    };
    match tile.tile_type() {
        TileType::Grass        => '.',
        TileType::Nothing      => ' ',
        TileType::Sidewalk     => ':',
        TileType::Neighborhood => tile
            .properties
            .neighborhood_type
            .and_then(|kind| kind.as_str().chars().next())
            .map_or('#', |c| c.to_ascii_uppercase()),
        TileType::Road => {
            let dirs = tile.properties.possible_directions;
            if dirs.len() != 1 {
                return '+';
            }
            match dirs.iter().next() {
                Some(Direction::Up)    => '^',
                Some(Direction::Right) => '>',
                Some(Direction::Down)  => 'v',
                Some(Direction::Left)  => '<',
                None                   => '+',
            }
        }
    }
}

fn print_map(grid: &TileGrid, cars: &[TilePos]) {
    for y in 0..grid.size() as i32 {
        let line: String = (0..grid.size() as i32)
            .map(|x| {
                let pos = TilePos::new(x, y);
                if cars.contains(&pos) { '@' } else { glyph(grid, pos) }
            })
            .collect();
        println!("  {line}");
    }
}

fn print_vehicles(ctx: &SimContext) {
    for v in ctx.vehicles() {
        println!(
            "    {:<10} at {:<10} facing {:<6} {}",
            v.trip.to_string(),
            v.position.to_string(),
            v.heading.as_str(),
            if v.at_destination { "arrived" } else { "" },
        );
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== cabtown ===");
    println!("Neighborhoods: {NEIGHBORHOODS}  |  Seed: {SEED}");
    println!();

    // 1. Config.
    let config = SimConfig {
        seed:            SEED,
        map:             MapConfig { neighborhood_count: NEIGHBORHOODS, ..MapConfig::default() },
        from_idle_steps: FROM_IDLE_STEPS,
        to_idle_steps:   TO_IDLE_STEPS,
        ..SimConfig::default()
    };

    // 2. Build the context (generates and annotates the map).
    let t0 = Instant::now();
    let mut ctx = SimBuilder::new(config.clone()).build()?;
    let grid = ctx.grid();
    println!(
        "Map: {0}x{0} tiles, {1} roads ({2} hidden behind high-rises), built in {3:.3} s",
        grid.size(),
        grid.road_tiles().len(),
        grid.occluded_roads().len(),
        t0.elapsed().as_secs_f64(),
    );
    println!();
    print_map(grid, &[]);
    println!();

    // 3. Trips: one click-style trip, then random ones.
    let centre = grid.size() as i32 / 2;
    match ctx.spawn_trip_near(TilePos::new(centre, centre), CarKind::Taxi) {
        Ok(id) => println!("Click trip {id} from the map centre"),
        Err(e) => println!("Click trip failed: {e}"),
    }
    for i in 0..RANDOM_TRIPS {
        let kind = if i % TAXI_EVERY == 0 { CarKind::Taxi } else { CarKind::Private };
        match ctx.spawn_random_trip(kind) {
            Ok(id) => {
                let trip = ctx.trip(id).map(|t| (t.from(), t.to(), t.car().path().moves()));
                if let Some((from, to, moves)) = trip {
                    println!("  {id} {:<8} {from} -> {to}  ({moves} moves)", kind.as_str());
                }
            }
            Err(e) => println!("  random trip failed: {e}"),
        }
    }
    println!();

    // 4. Run until every car has arrived.
    let mut log = TripLog::default();
    while !ctx.trips().is_empty() && ctx.tick().0 < MAX_TICKS {
        ctx.calculation_tick(&mut log);
        if ctx.tick().0 % REPORT_EVERY == 0 {
            println!("  {}: {} active", ctx.tick(), log.last_active);
            print_vehicles(&ctx);
        }
    }
    println!();
    println!("Trips started: {}  finished: {}", log.started, log.finished.len());
    for (tick, id) in &log.finished {
        println!("  {id} arrived at {tick}");
    }
    if let Some(v) = ctx.vehicles().first() {
        println!("Still driving: {}", serde_json::to_string(v)?);
    }
    println!();

    // 5. Save and restore.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let path = Path::new(OUTPUT_DIR).join("map.json");
    std::fs::write(&path, ctx.save_json()?)?;
    println!("Saved map to {}", path.display());

    let saved = std::fs::read_to_string(&path)?;
    let restored = SimBuilder::new(config).restore_json(saved).build()?;
    ensure!(restored.grid() == ctx.grid(), "restored map differs from the saved one");
    println!("Restored map matches ({} road tiles)", restored.grid().road_tiles().len());

    Ok(())
}
