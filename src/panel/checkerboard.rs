use crate::render::{Color, PaintContext};

const CHECKERBOARD_TILE_PX: f64 = 10.0;
const CHECKERBOARD_LIGHT: Color = Color::rgb(0.87, 0.87, 0.87);
const CHECKERBOARD_DARK: Color = Color::rgb(0.93, 0.93, 0.93);

/// Fills `[start_px, end_px]` x `[0, height]` with a two-tone checkerboard,
/// the placeholder drawn where track data has not loaded yet.
pub fn checkerboard(ctx: &mut PaintContext<'_>, height: f64, start_px: f64, end_px: f64) {
    let width = end_px - start_px;
    if width <= 0.0 || height <= 0.0 {
        return;
    }

    ctx.fill_rect(start_px, 0.0, width, height, CHECKERBOARD_LIGHT);
    let first_column = (start_px / CHECKERBOARD_TILE_PX).floor() as i64;
    let last_column = (end_px / CHECKERBOARD_TILE_PX).ceil() as i64;
    let rows = (height / CHECKERBOARD_TILE_PX).ceil() as i64;
    for column in first_column..last_column {
        let tile_left = column as f64 * CHECKERBOARD_TILE_PX;
        let left = tile_left.max(start_px);
        let right = (tile_left + CHECKERBOARD_TILE_PX).min(end_px);
        if right <= left {
            continue;
        }
        for row in 0..rows {
            if (column + row) % 2 != 0 {
                continue;
            }
            let top = row as f64 * CHECKERBOARD_TILE_PX;
            let tile_height = CHECKERBOARD_TILE_PX.min(height - top);
            ctx.fill_rect(left, top, right - left, tile_height, CHECKERBOARD_DARK);
        }
    }
}

/// Checkerboards the parts of the visible range `[visible_start_px,
/// visible_end_px]` not covered by loaded data `[data_start_px, data_end_px]`.
pub fn checkerboard_except(
    ctx: &mut PaintContext<'_>,
    height: f64,
    visible_start_px: f64,
    visible_end_px: f64,
    data_start_px: f64,
    data_end_px: f64,
) {
    if data_start_px > visible_end_px || data_end_px < visible_start_px {
        checkerboard(ctx, height, visible_start_px, visible_end_px);
        return;
    }
    if data_start_px > visible_start_px {
        checkerboard(ctx, height, visible_start_px, data_start_px);
    }
    if data_end_px < visible_end_px {
        checkerboard(ctx, height, data_end_px, visible_end_px);
    }
}
