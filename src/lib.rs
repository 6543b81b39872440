mod frame_timer;

use cfg_if::cfg_if;
use frame_timer::FrameTimer;
use log::{info, trace, LevelFilter};
use sat_mtv::{Collision, GeometryError, Nudge, Polygon, Scene, P2};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Run the playground.
///
/// This is the main entry point for the native binary and the **WASM32**
/// start function. It replays the scripted nudges, and panics if the scene
/// geometry is invalid.
#[cfg_attr(target_arch = "wasm32", wasm_bindgen(start))]
pub fn run() {
    run_app().unwrap(); // Panic on error (intentional).
}

fn run_app() -> Result<(), GeometryError> {
    init_logger(App::LOG_LEVEL_FILTER);

    let mut app = App::new()?;
    let summary = app.run_script()?;
    info!(
        "Replayed {} ticks with {} collisions in {:.3} s; mover ends at {:?}",
        summary.ticks,
        summary.collisions,
        app.frame_timer.total_time_secs_f64(),
        app.mover().vertices()
    );
    Ok(())
}

/// Counts gathered while replaying [`App::SCRIPT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub ticks: usize,
    pub collisions: usize,
}

/// Headless playground: a square nudged around a fixed triangle.
#[derive(Debug)]
pub struct App {
    /// Square and triangle.
    scene: Scene,
    /// Times each tick.
    frame_timer: FrameTimer,
    /// Number of ticks run so far.
    ticks: usize,
}
impl App {
    /// Override the application logging level.
    ///
    /// Set this to override the logging level for both **WASM32** and
    /// **Native** applications. When it is `None`, `RUST_LOG` decides.
    const LOG_LEVEL_FILTER: Option<LevelFilter> = None; // Some(LevelFilter::Debug);

    /// Distance the square moves per nudge.
    const STEP_SIZE: f64 = 1.0;

    /// Nudges to replay, as `(direction, repeat count)`.
    ///
    /// The square drops level with the triangle, then slides into it from
    /// the left twice, and finally climbs back out.
    pub const SCRIPT: &'static [(Nudge, usize)] = &[
        (Nudge::Down, 75),
        (Nudge::Right, 80),
        (Nudge::Down, 20),
        (Nudge::Right, 10),
        (Nudge::Up, 60),
    ];

    /// Create the playground in its starting position.
    ///
    /// A 40 unit square sits at the origin, and a right triangle with 30 unit
    /// legs sits at `(100, 100)`.
    pub fn new() -> Result<Self, GeometryError> {
        let square = Polygon::new(vec![
            P2::new(0.0, 0.0),
            P2::new(40.0, 0.0),
            P2::new(40.0, 40.0),
            P2::new(0.0, 40.0),
        ])?;
        let mut triangle = Polygon::new(vec![
            P2::new(0.0, 0.0),
            P2::new(30.0, 0.0),
            P2::new(0.0, 30.0),
        ])?;
        triangle.translate(100.0, 100.0);

        Ok(App {
            scene: Scene::new(square, triangle, Self::STEP_SIZE),
            frame_timer: FrameTimer::new(),
            ticks: 0,
        })
    }

    /// The polygon being nudged.
    pub fn mover(&self) -> &Polygon {
        &self.scene.mover
    }

    /// The polygon the mover is kept out of.
    pub fn obstacle(&self) -> &Polygon {
        &self.scene.obstacle
    }

    /// Apply one nudge to the scene.
    pub fn tick(&mut self, nudge: Nudge) -> Result<Option<Collision>, GeometryError> {
        let collision = self.scene.advance(nudge)?;
        self.ticks += 1;

        if let Some(collision) = &collision {
            info!(
                "Tick {}: {:?} collided (depth {}), pushed by {:?}",
                self.ticks,
                nudge,
                collision.depth(),
                collision.push_vector()
            );
        }
        trace!("Tick {} took {} us", self.ticks, self.frame_timer.tick_micros());

        Ok(collision)
    }

    /// Replay every nudge in [`App::SCRIPT`].
    pub fn run_script(&mut self) -> Result<Summary, GeometryError> {
        let mut collisions = 0;
        for &(nudge, count) in Self::SCRIPT {
            for _ in 0..count {
                if self.tick(nudge)?.is_some() {
                    collisions += 1;
                }
            }
        }
        Ok(Summary {
            ticks: self.ticks,
            collisions,
        })
    }
}

/// Initializes the logger in a platform-dependent way.
///
/// - **WASM32 (WebAssembly):** Uses `console_log`.
/// - **Native Platforms:** Uses `env_logger`.
///
/// # Parameters
///
/// - `level_filter`: The logging level to be applied globally. If this is
///   not set, then default logging levels are used.
///
/// # Panics
///
/// - On **WASM32**, the function will panic if the `console_log` fails to
///   initialize.
fn init_logger(level_filter: Option<LevelFilter>) {
    cfg_if! {
        if #[cfg(target_arch = "wasm32")] {
            std::panic::set_hook(Box::new(console_error_panic_hook::hook));
            let opt_logger = match level_filter {
                None => console_log::init(),
                Some(level_filt) => {
                    let level = level_filt.to_level().unwrap_or(log::Level::Warn);
                    console_log::init_with_level(level)
                }
            };
            opt_logger.expect("Could not initialize WASM32 logger.")
        } else {
            let mut builder = env_logger::Builder::from_default_env();
            if let Some(level) = level_filter {
                builder.filter_level(level);
            }
            builder.init()
        }
    }
}
