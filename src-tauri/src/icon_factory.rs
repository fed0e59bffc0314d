//! Application icon rasterizer.
//!
//! Renders the blue disc with the white bolt, optionally with an unread badge.
//! Every call builds a fresh bitmap, so windows never share pixel buffers.

use image::{Rgba, RgbaImage};

pub const ICON_SIZE: u32 = 64;

const SUPERSAMPLE: u32 = 4;

const DISC_COLOR: [u8; 3] = [0x00, 0x84, 0xFF];
const BOLT_COLOR: [u8; 3] = [0xFF, 0xFF, 0xFF];
const BADGE_COLOR: [u8; 3] = [0xFA, 0x38, 0x3E];
const BADGE_RING_COLOR: [u8; 3] = [0xFF, 0xFF, 0xFF];

const BOLT_PATH: [(f32, f32); 6] = [
    (0.50, 0.20),
    (0.35, 0.55),
    (0.48, 0.55),
    (0.42, 0.80),
    (0.60, 0.45),
    (0.48, 0.45),
];

const BADGE_CENTER: (f32, f32) = (0.78, 0.22);
const BADGE_RADIUS: f32 = 0.17;
const BADGE_RING_RADIUS: f32 = 0.22;

fn inside_circle(x: f32, y: f32, center: (f32, f32), radius: f32) -> bool {
    let dx = x - center.0;
    let dy = y - center.1;
    dx * dx + dy * dy <= radius * radius
}

fn inside_polygon(x: f32, y: f32, polygon: &[(f32, f32)]) -> bool {
    let mut inside = false;
    let mut previous = polygon[polygon.len() - 1];
    for &current in polygon {
        let (x1, y1) = current;
        let (x2, y2) = previous;
        if (y1 > y) != (y2 > y) && x < (x2 - x1) * (y - y1) / (y2 - y1) + x1 {
            inside = !inside;
        }
        previous = current;
    }
    inside
}

/// Color of a single subsample at normalized coordinates, `None` when
/// transparent. Later layers paint over earlier ones.
fn sample_color(x: f32, y: f32, has_notification: bool) -> Option<[u8; 3]> {
    if has_notification {
        if inside_circle(x, y, BADGE_CENTER, BADGE_RADIUS) {
            return Some(BADGE_COLOR);
        }
        if inside_circle(x, y, BADGE_CENTER, BADGE_RING_RADIUS) {
            return Some(BADGE_RING_COLOR);
        }
    }

    if !inside_circle(x, y, (0.5, 0.5), 0.5) {
        return None;
    }
    if inside_polygon(x, y, &BOLT_PATH) {
        return Some(BOLT_COLOR);
    }
    Some(DISC_COLOR)
}

fn shade_pixel(px: u32, py: u32, size: u32, has_notification: bool) -> Rgba<u8> {
    let samples = SUPERSAMPLE * SUPERSAMPLE;
    let mut covered = 0_u32;
    let mut channels = [0_u32; 3];

    for sy in 0..SUPERSAMPLE {
        for sx in 0..SUPERSAMPLE {
            let x = (px as f32 + (sx as f32 + 0.5) / SUPERSAMPLE as f32) / size as f32;
            let y = (py as f32 + (sy as f32 + 0.5) / SUPERSAMPLE as f32) / size as f32;
            if let Some(color) = sample_color(x, y, has_notification) {
                covered += 1;
                for (sum, value) in channels.iter_mut().zip(color) {
                    *sum += u32::from(value);
                }
            }
        }
    }

    if covered == 0 {
        return Rgba([0, 0, 0, 0]);
    }
    let average = |sum: u32| (sum / covered) as u8;
    Rgba([
        average(channels[0]),
        average(channels[1]),
        average(channels[2]),
        (covered * 255 / samples) as u8,
    ])
}

pub fn render_icon(size: u32, has_notification: bool) -> RgbaImage {
    RgbaImage::from_fn(size, size, |x, y| {
        shade_pixel(x, y, size, has_notification)
    })
}

pub fn render_app_icon(has_notification: bool) -> RgbaImage {
    render_icon(ICON_SIZE, has_notification)
}

pub fn to_tauri_image(bitmap: RgbaImage) -> tauri::image::Image<'static> {
    let (width, height) = bitmap.dimensions();
    tauri::image::Image::new_owned(bitmap.into_raw(), width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scaled(size: u32, x: f32, y: f32) -> (u32, u32) {
        ((x * size as f32) as u32, (y * size as f32) as u32)
    }

    #[test]
    fn render_is_deterministic() {
        assert_eq!(render_app_icon(false), render_app_icon(false));
        assert_eq!(render_app_icon(true), render_app_icon(true));
    }

    #[test]
    fn corners_are_transparent_without_badge() {
        let icon = render_app_icon(false);
        assert_eq!(icon.get_pixel(0, 0)[3], 0);
        assert_eq!(icon.get_pixel(ICON_SIZE - 1, ICON_SIZE - 1)[3], 0);
    }

    #[test]
    fn disc_and_bolt_use_brand_colors() {
        let icon = render_app_icon(false);
        let (dx, dy) = scaled(ICON_SIZE, 0.25, 0.5);
        assert_eq!(icon.get_pixel(dx, dy).0, [0x00, 0x84, 0xFF, 255]);
        let (bx, by) = scaled(ICON_SIZE, 0.46, 0.50);
        assert_eq!(icon.get_pixel(bx, by).0, [0xFF, 0xFF, 0xFF, 255]);
    }

    #[test]
    fn notification_variant_adds_badge() {
        let plain = render_app_icon(false);
        let alert = render_app_icon(true);
        let (x, y) = scaled(ICON_SIZE, BADGE_CENTER.0, BADGE_CENTER.1);
        assert_eq!(alert.get_pixel(x, y).0, [0xFA, 0x38, 0x3E, 255]);
        assert_ne!(plain.get_pixel(x, y), alert.get_pixel(x, y));

        let (dx, dy) = scaled(ICON_SIZE, 0.25, 0.75);
        assert_eq!(plain.get_pixel(dx, dy), alert.get_pixel(dx, dy));
    }

    #[test]
    fn to_tauri_image_keeps_dimensions() {
        let image = to_tauri_image(render_icon(16, true));
        assert_eq!(image.width(), 16);
        assert_eq!(image.height(), 16);
        assert_eq!(image.rgba().len(), 16 * 16 * 4);
    }
}
