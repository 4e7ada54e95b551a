//! Row-range tiles for parallel rendering.
//!
//! The image is split into contiguous bands of rows. Each tile owns a full
//! snapshot of everything it needs, so it can be rendered on any thread
//! without touching shared state.

use std::ops::Range;

use prism_core::Scene;
use prism_math::Camera;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::framebuffer::CHANNELS;
use crate::renderer::{color_to_rgba, render_pixel, Integrator, RenderConfig};
use crate::scheduler::CancelToken;

/// A contiguous band of image rows plus the inputs to trace it.
#[derive(Debug, Clone)]
pub struct Tile {
    /// Index of this tile in submission order
    pub index: usize,
    /// Rows `[start, end)` of the output image
    pub rows: Range<u32>,
    /// Scene snapshot owned by this tile
    pub scene: Scene,
    /// Camera snapshot owned by this tile
    pub camera: Camera,
    /// Image size, depth and sampling settings
    pub config: RenderConfig,
    /// Seed for this tile's sample jitter
    pub seed: u64,
}

impl Tile {
    /// Number of rows covered by this tile.
    pub fn row_count(&self) -> u32 {
        self.rows.end - self.rows.start
    }
}

/// Result of rendering a tile.
#[derive(Debug, Clone)]
pub struct TileResult {
    /// Index of the tile that was rendered
    pub index: usize,
    /// Rows the tile was responsible for
    pub rows: Range<u32>,
    /// RGBA bytes for the whole band, row-major
    pub pixels: Vec<u8>,
    /// Rows actually finished; less than the band when cancelled
    pub rows_done: u32,
}

impl TileResult {
    /// True when every row in the band was rendered.
    pub fn is_complete(&self) -> bool {
        self.rows_done == self.rows.end - self.rows.start
    }
}

/// Split `height` rows into `workers` contiguous, non-overlapping ranges.
///
/// Every range gets `height / workers` rows and the last one also takes the
/// remainder. The worker count is clamped to `[1, height]` so no range is
/// empty.
pub fn partition_rows(height: u32, workers: usize) -> Vec<Range<u32>> {
    if height == 0 {
        return Vec::new();
    }

    let count = (workers.max(1) as u64).min(height as u64) as u32;
    let rows_per_tile = height / count;

    (0..count)
        .map(|i| {
            let start = i * rows_per_tile;
            let end = if i + 1 == count {
                height
            } else {
                start + rows_per_tile
            };
            start..end
        })
        .collect()
}

/// Build self-contained tiles for a frame.
pub fn generate_tiles(
    scene: &Scene,
    camera: &Camera,
    config: &RenderConfig,
    workers: usize,
    frame_seed: u64,
) -> Vec<Tile> {
    partition_rows(config.height, workers)
        .into_iter()
        .enumerate()
        .map(|(index, rows)| Tile {
            index,
            rows,
            scene: scene.clone(),
            camera: *camera,
            config: config.clone(),
            seed: frame_seed.wrapping_add(index as u64),
        })
        .collect()
}

/// Render a single tile to RGBA bytes.
///
/// The cancellation token is checked before each scanline; a cancelled tile
/// returns the rows it finished and leaves the rest zeroed.
pub fn render_tile(tile: &Tile, cancel: &CancelToken) -> TileResult {
    let width = tile.config.width;
    let stride = width as usize * CHANNELS;
    let mut pixels = vec![0u8; tile.row_count() as usize * stride];
    let mut rng = StdRng::seed_from_u64(tile.seed);
    let integrator = Integrator::new(&tile.scene);
    let mut rows_done = 0;

    for (local_y, row) in pixels.chunks_exact_mut(stride).enumerate() {
        if cancel.is_cancelled() {
            log::debug!("tile {} cancelled after {} rows", tile.index, rows_done);
            break;
        }

        let y = tile.rows.start + local_y as u32;
        for (x, px) in row.chunks_exact_mut(CHANNELS).enumerate() {
            let color = render_pixel(&integrator, &tile.camera, x as u32, y, &tile.config, &mut rng);
            px.copy_from_slice(&color_to_rgba(color));
        }
        rows_done += 1;
    }

    TileResult {
        index: tile.index,
        rows: tile.rows.clone(),
        pixels,
        rows_done,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::Color;

    fn assert_covers(ranges: &[Range<u32>], height: u32) {
        let mut next = 0;
        for r in ranges {
            assert_eq!(r.start, next, "ranges must be contiguous and disjoint");
            assert!(r.end > r.start, "no empty ranges");
            next = r.end;
        }
        assert_eq!(next, height);
    }

    #[test]
    fn test_partition_exact_fit() {
        let ranges = partition_rows(120, 4);
        assert_eq!(ranges, vec![0..30, 30..60, 60..90, 90..120]);
    }

    #[test]
    fn test_partition_last_takes_remainder() {
        let ranges = partition_rows(103, 4);
        assert_eq!(ranges.len(), 4);
        assert_eq!(ranges[3], 75..103);
        assert_covers(&ranges, 103);
    }

    #[test]
    fn test_partition_covers_for_many_shapes() {
        for height in [1, 2, 7, 64, 99, 480] {
            for workers in [1, 2, 3, 4, 8, 16, 1000] {
                let ranges = partition_rows(height, workers);
                assert!(ranges.len() <= workers);
                assert_covers(&ranges, height);
            }
        }
    }

    #[test]
    fn test_partition_more_workers_than_rows() {
        let ranges = partition_rows(3, 8);
        assert_eq!(ranges, vec![0..1, 1..2, 2..3]);
        assert!(partition_rows(0, 4).is_empty());
        assert_eq!(partition_rows(5, 0), vec![0..5]);
    }

    #[test]
    fn test_render_tile_fills_band() {
        let scene = Scene::new().with_background(Color::new(1.0, 0.0, 0.0));
        let config = RenderConfig::default().with_resolution(8, 6).with_quality(1, 2);
        let tiles = generate_tiles(&scene, &Camera::default(), &config, 2, 7);
        assert_eq!(tiles.len(), 2);
        assert_eq!(tiles[1].seed, 8);

        let result = render_tile(&tiles[1], &CancelToken::new());
        assert!(result.is_complete());
        assert_eq!(result.rows, 3..6);
        assert_eq!(result.pixels.len(), 8 * 3 * 4);
        assert!(result.pixels.chunks_exact(4).all(|px| px == [255, 0, 0, 255]));
    }

    #[test]
    fn test_cancelled_tile_stops_early() {
        let scene = Scene::new();
        let config = RenderConfig::default().with_resolution(4, 4).with_quality(1, 1);
        let tiles = generate_tiles(&scene, &Camera::default(), &config, 1, 0);

        let cancel = CancelToken::new();
        cancel.cancel();
        let result = render_tile(&tiles[0], &cancel);
        assert_eq!(result.rows_done, 0);
        assert!(!result.is_complete());
    }
}
