use image::Rgb;
use palette::{FromColor, Hsl, Srgb};

pub const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
pub const GRID: Rgb<u8> = Rgb([220, 220, 220]);
pub const AXIS: Rgb<u8> = Rgb([60, 60, 60]);

/// `count` bar fills with hues spread evenly around the HSL wheel.
pub fn hue_wheel(count: usize) -> Vec<Rgb<u8>> {
    let step = 360.0 / count.max(1) as f32;
    (0..count)
        .map(|i| {
            let fill = Srgb::from_color(Hsl::new(i as f32 * step, 0.75, 0.55)).into_format::<u8>();
            Rgb([fill.red, fill.green, fill.blue])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_are_distinct() {
        let fills = hue_wheel(3);
        assert_eq!(fills.len(), 3);
        assert_ne!(fills[0], fills[1]);
        assert_ne!(fills[1], fills[2]);
        assert!(hue_wheel(0).is_empty());
    }

    #[test]
    fn first_hue_is_red() {
        let Rgb([r, g, b]) = hue_wheel(1)[0];
        assert!(r > g && r > b);
    }
}
