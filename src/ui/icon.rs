use image::{Rgba, RgbaImage};

const FROM: [u8; 3] = [0x34, 0x94, 0xE6];
const TO: [u8; 3] = [0xEC, 0x6E, 0xAD];

/// Square window icon: a diagonal blue-to-pink gradient with a lighter
/// "download arrow" stripe down the middle.
pub fn app_icon(size: u32) -> RgbaImage {
    let span = (2 * size.saturating_sub(1)).max(1) as f32;

    RgbaImage::from_fn(size, size, |x, y| {
        let t = (x + y) as f32 / span;
        let mut pixel = [0u8; 3];
        for (channel, (from, to)) in pixel.iter_mut().zip(FROM.iter().zip(TO.iter())) {
            *channel = (*from as f32 + (*to as f32 - *from as f32) * t).round() as u8;
        }

        if on_arrow(x, y, size) {
            for channel in pixel.iter_mut() {
                *channel = channel.saturating_add(90);
            }
        }

        Rgba([pixel[0], pixel[1], pixel[2], 0xFF])
    })
}

fn on_arrow(x: u32, y: u32, size: u32) -> bool {
    let mid = size / 2;
    let shaft = size / 16 + 1;
    let top = size / 5;
    let head = size * 3 / 5;
    let bottom = size * 4 / 5;

    let in_shaft = x.abs_diff(mid) < shaft && (top..head).contains(&y);
    let in_head = (head..bottom).contains(&y) && x.abs_diff(mid) < bottom - y;
    in_shaft || in_head
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_gradient() {
        let icon = app_icon(64);
        assert_eq!(icon.dimensions(), (64, 64));
        assert_eq!(icon.get_pixel(0, 0).0, [0x34, 0x94, 0xE6, 0xFF]);
        assert_eq!(icon.get_pixel(63, 63).0, [0xEC, 0x6E, 0xAD, 0xFF]);
    }

    #[test]
    fn test_icon_arrow_is_lighter() {
        let icon = app_icon(64);
        let arrow = icon.get_pixel(32, 20);
        let background = icon.get_pixel(5, 20);
        assert!(arrow.0[0] > background.0[0]);
    }

    #[test]
    fn test_tiny_icon() {
        assert_eq!(app_icon(1).dimensions(), (1, 1));
    }
}
