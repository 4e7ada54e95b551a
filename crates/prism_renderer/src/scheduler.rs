//! Parallel frame scheduler.
//!
//! Tiles are rendered as independent jobs on a fixed-size rayon pool and
//! report back over an mpsc channel. The scheduler is the only writer of the
//! framebuffer; every tile covers a disjoint row range.

use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use prism_core::Scene;
use prism_math::Camera;

use crate::error::RenderResult;
use crate::framebuffer::Framebuffer;
use crate::renderer::RenderConfig;
use crate::tile::{generate_tiles, render_tile, Tile, TileResult};

/// Worker count used when the hardware parallelism cannot be queried.
pub const FALLBACK_WORKERS: usize = 4;

/// Shared flag for stopping a render early.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask every tile sharing this token to stop after its current scanline.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// How a frame finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameStatus {
    /// Every row was rendered.
    Complete,
    /// Some tiles kept failing; their rows are left unwritten (alpha 0).
    Degraded { failed_rows: Vec<Range<u32>> },
    /// The render was cancelled; only finished rows are written.
    Cancelled,
}

/// Timing and workload counters for a frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderStats {
    pub elapsed: Duration,
    pub tiles: usize,
    /// Tile jobs that panicked, including ones that later succeeded on retry
    pub tile_failures: usize,
    pub primary_rays: u64,
}

/// A rendered frame.
#[derive(Debug, Clone)]
pub struct Frame {
    pub framebuffer: Framebuffer,
    pub status: FrameStatus,
    pub stats: RenderStats,
}

type RenderFn = Arc<dyn Fn(&Tile, &CancelToken) -> TileResult + Send + Sync>;

enum TileMessage {
    Done(TileResult),
    Failed(Tile, String),
}

/// Renders frames on a fixed-size worker pool.
pub struct Scheduler {
    pool: rayon::ThreadPool,
    workers: usize,
}

impl Scheduler {
    /// Build a scheduler with `workers` threads, or one per hardware thread.
    pub fn new(workers: Option<usize>) -> RenderResult<Self> {
        let workers = workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(FALLBACK_WORKERS)
        });
        let workers = workers.max(1);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("prism-worker-{i}"))
            .build()?;

        log::debug!("Scheduler started with {} workers", workers);
        Ok(Self { pool, workers })
    }

    /// Build a scheduler sized by `config.workers`.
    pub fn from_config(config: &RenderConfig) -> RenderResult<Self> {
        config.validate()?;
        Self::new(config.workers)
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Render one frame.
    ///
    /// The frame is split into one tile per pool thread. `config.workers` only
    /// sizes the pool in [`Scheduler::from_config`]; a different value here is
    /// logged and otherwise ignored.
    ///
    /// Configuration errors are returned as `Err`. Worker failures are not:
    /// a tile that panics is resubmitted up to `config.tile_retries` times
    /// and, if it still fails, the frame comes back `Degraded` with those
    /// rows unwritten.
    pub fn render(
        &self,
        scene: &Scene,
        camera: &Camera,
        config: &RenderConfig,
        cancel: &CancelToken,
    ) -> RenderResult<Frame> {
        self.render_with(scene, camera, config, cancel, Arc::new(render_tile))
    }

    fn render_with(
        &self,
        scene: &Scene,
        camera: &Camera,
        config: &RenderConfig,
        cancel: &CancelToken,
        render_fn: RenderFn,
    ) -> RenderResult<Frame> {
        config.validate()?;

        if let Some(requested) = config.workers {
            if requested != self.workers {
                log::warn!(
                    "Config asks for {} workers but the pool has {}; using {}",
                    requested,
                    self.workers,
                    self.workers
                );
            }
        }
        for (i, object) in scene.objects.iter().enumerate() {
            log::debug!("Object {}: {} at {:?}", i, object.geometry.kind(), object.position);
        }

        let start = Instant::now();
        let frame_seed = config.seed.unwrap_or_else(rand::random);
        let mut framebuffer = Framebuffer::new(config.width, config.height);
        let mut pending = generate_tiles(scene, camera, config, self.workers, frame_seed);
        let mut stats = RenderStats {
            tiles: pending.len(),
            ..Default::default()
        };

        log::info!(
            "Rendering {}x{} @ {} spp, depth {}, {} tiles on {} workers",
            config.width,
            config.height,
            config.samples_per_pixel,
            config.max_depth,
            pending.len(),
            self.workers
        );

        let mut interrupted = false;
        let mut attempt = 0;

        loop {
            let submitted = pending.len();
            let (tx, rx) = mpsc::channel();

            for tile in pending.drain(..) {
                let tx = tx.clone();
                let cancel = cancel.clone();
                let render_fn = Arc::clone(&render_fn);

                self.pool.spawn(move || {
                    let outcome = panic::catch_unwind(AssertUnwindSafe(|| render_fn(&tile, &cancel)));
                    let message = match outcome {
                        Ok(result) => TileMessage::Done(result),
                        Err(payload) => TileMessage::Failed(tile, panic_message(&*payload)),
                    };
                    // Receiver only goes away if the scheduler itself unwound.
                    let _ = tx.send(message);
                });
            }
            // Only the jobs hold senders now; the loop below ends once all of
            // them have reported or been dropped.
            drop(tx);

            let mut received = 0;
            for message in rx {
                received += 1;
                match message {
                    TileMessage::Done(result) => {
                        let stride = framebuffer.row_stride();
                        let done = result.rows.start..result.rows.start + result.rows_done;
                        framebuffer.write_rows(done, &result.pixels[..result.rows_done as usize * stride]);
                        stats.primary_rays += result.rows_done as u64
                            * config.width as u64
                            * config.samples_per_pixel as u64;
                        if !result.is_complete() {
                            interrupted = true;
                        }
                        log::debug!("Tile {} done ({} rows)", result.index, result.rows_done);
                    }
                    TileMessage::Failed(tile, reason) => {
                        stats.tile_failures += 1;
                        log::warn!(
                            "Tile {} (rows {:?}) failed on attempt {}: {}",
                            tile.index,
                            tile.rows,
                            attempt + 1,
                            reason
                        );
                        pending.push(tile);
                    }
                }
            }
            if received < submitted {
                log::warn!("{} tile jobs never reported back", submitted - received);
            }

            if pending.is_empty() || cancel.is_cancelled() || attempt >= config.tile_retries {
                break;
            }
            attempt += 1;
            log::info!("Retrying {} failed tiles", pending.len());
        }

        stats.elapsed = start.elapsed();

        let status = if interrupted || cancel.is_cancelled() {
            FrameStatus::Cancelled
        } else if !pending.is_empty() {
            pending.sort_by_key(|tile| tile.rows.start);
            FrameStatus::Degraded {
                failed_rows: pending.into_iter().map(|tile| tile.rows).collect(),
            }
        } else {
            FrameStatus::Complete
        };

        match &status {
            FrameStatus::Complete => log::info!("Frame complete in {:.2?}", stats.elapsed),
            FrameStatus::Degraded { failed_rows } => {
                log::warn!("Frame degraded; rows never rendered: {:?}", failed_rows)
            }
            FrameStatus::Cancelled => log::info!("Frame cancelled after {:.2?}", stats.elapsed),
        }

        Ok(Frame {
            framebuffer,
            status,
            stats,
        })
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
