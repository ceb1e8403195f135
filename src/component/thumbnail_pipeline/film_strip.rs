use super::engine::FrameFilter;
use image::{Rgb, RgbImage};

const STRIP_COLOR: Rgb<u8> = Rgb([0x1e, 0x1e, 0x1e]);
const HOLE_COLOR: Rgb<u8> = Rgb([0xe6, 0xe6, 0xe6]);

/// 在影格左右兩側畫上底片齒孔
#[derive(Debug, Default, Clone, Copy)]
pub struct FilmStripFilter;

impl FilmStripFilter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// 依影格寬度決定齒孔圖塊的邊長
const fn tile_size(frame_width: u32) -> u32 {
    match frame_width {
        0..=96 => 4,
        97..=192 => 8,
        193..=384 => 16,
        385..=768 => 32,
        _ => 64,
    }
}

/// 圖塊內 (x, y) 是否落在齒孔上
///
/// 齒孔佔圖塊中央一半的面積，四角各切掉一個像素。
const fn is_hole(x: u32, y: u32, tile: u32) -> bool {
    let start = tile / 4;
    let end = tile - tile / 4;
    if x < start || x >= end || y < start || y >= end {
        return false;
    }
    let corner_x = x == start || x == end - 1;
    let corner_y = y == start || y == end - 1;
    !(tile >= 8 && corner_x && corner_y)
}

impl FrameFilter for FilmStripFilter {
    fn process(&self, frame: &mut RgbImage) {
        let (width, height) = frame.dimensions();
        let tile = tile_size(width);
        if width <= tile * 2 {
            return;
        }

        for y in 0..height {
            for x in 0..tile {
                let color = if is_hole(x, y % tile, tile) {
                    HOLE_COLOR
                } else {
                    STRIP_COLOR
                };
                frame.put_pixel(x, y, color);
                frame.put_pixel(width - 1 - x, y, color);
            }
        }
    }
}
