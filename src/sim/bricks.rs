//! Brick grid generation

use glam::Vec2;
use rand::Rng;

use super::layout::Layout;
use super::state::{Brick, BrickGrid, BrickStatus};
use crate::tuning::Tuning;

/// Build a fresh columns x rows grid for `layout`.
///
/// The grid is centered horizontally and vertically centered within the top
/// `brick_region_fraction` of the surface, never above the layout's minimum
/// top margin. Rows take their color from the palette by row index; each
/// brick independently rolls for a coin and, if it gets one, a random palette
/// color for the coin highlight.
pub fn generate_grid<R: Rng + ?Sized>(tuning: &Tuning, layout: &Layout, rng: &mut R) -> BrickGrid {
    let columns = tuning.brick_columns;
    let rows = tuning.brick_rows;
    let palette = &tuning.palette;

    let cell_w = layout.brick_width + layout.brick_padding;
    let cell_h = layout.brick_height + layout.brick_padding;
    let total_width = columns as f32 * cell_w - layout.brick_padding;
    let total_height = rows as f32 * cell_h - layout.brick_padding;

    let offset_left = (layout.surface_width - total_width) / 2.0;
    // The top margin is a fixed pixel minimum, not scaled with the surface
    let region = layout.surface_height * tuning.brick_region_fraction;
    let offset_top = tuning.brick_offset_top.max((region - total_height) / 2.0);

    let size = Vec2::new(layout.brick_width, layout.brick_height);
    let mut bricks = Vec::with_capacity(columns * rows);
    let mut coins = 0usize;

    for c in 0..columns {
        for r in 0..rows {
            let entry = palette.for_row(r);

            // Both rolls happen for every brick so the stream stays aligned
            let is_coin = rng.random_bool(tuning.coin_chance);
            let coin_entry = palette.for_row(rng.random_range(0..palette.len()));
            if is_coin {
                coins += 1;
            }

            bricks.push(Brick {
                pos: Vec2::new(offset_left + c as f32 * cell_w, offset_top + r as f32 * cell_h),
                size,
                status: BrickStatus::Alive,
                color: entry.color,
                points: entry.points,
                is_coin,
                coin_color: is_coin.then_some(coin_entry.color),
            });
        }
    }

    log::debug!("Generated {}x{} brick grid with {} coins", columns, rows, coins);
    BrickGrid::from_bricks(columns, rows, bricks)
}
