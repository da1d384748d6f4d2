//! Icon creation for the system tray.

use crate::error::Result;
use tray_icon::Icon;

/// Creates the tray icon: a black disc on a white square.
///
/// Generated in code so the binary needs no bundled image.
pub fn create_default_icon() -> Result<Icon> {
    Ok(Icon::from_rgba(disc_rgba(ICON_SIZE), ICON_SIZE, ICON_SIZE)?)
}

const ICON_SIZE: u32 = 32;

/// RGBA pixels for a `size`x`size` white square with a centred black disc.
fn disc_rgba(size: u32) -> Vec<u8> {
    let mut rgba = Vec::with_capacity((size * size * 4) as usize);
    let center = size as f32 / 2.0;
    // Same proportions as a 64px canvas with an 8px margin
    let radius = center - size as f32 / 8.0;

    for y in 0..size {
        for x in 0..size {
            let dx = x as f32 + 0.5 - center;
            let dy = y as f32 + 0.5 - center;
            let shade = if (dx * dx + dy * dy).sqrt() <= radius {
                0u8
            } else {
                255u8
            };
            rgba.extend_from_slice(&[shade, shade, shade, 255]);
        }
    }

    rgba
}
