mod tests {
    use matrix_composer::color::{
        BLACK, Rgb, gray, nebula_bias, rgb_from_u32, rgb_to_u32, scale_brightness,
    };

    #[test]
    fn test_rgb_u32_conversion() {
        let color = rgb_from_u32(0x12_AB_34);
        assert_eq!(
            color,
            Rgb {
                r: 0x12,
                g: 0xAB,
                b: 0x34
            }
        );
        assert_eq!(rgb_to_u32(color), 0x12_AB_34);
        assert_eq!(rgb_from_u32(0), BLACK);
    }

    #[test]
    fn test_gray() {
        assert_eq!(gray(7), Rgb { r: 7, g: 7, b: 7 });
    }

    #[test]
    fn test_scale_brightness_clamps() {
        let color = Rgb {
            r: 100,
            g: 200,
            b: 50,
        };
        assert_eq!(
            scale_brightness(color, 0.5),
            Rgb {
                r: 50,
                g: 100,
                b: 25
            }
        );
        assert_eq!(
            scale_brightness(color, 1.5),
            Rgb {
                r: 150,
                g: 255,
                b: 75
            }
        );
        assert_eq!(scale_brightness(color, -1.0), BLACK);
    }

    #[test]
    fn test_nebula_bias() {
        let biased = nebula_bias(Rgb {
            r: 90,
            g: 30,
            b: 30,
        });
        assert_eq!(
            biased,
            Rgb {
                r: 70,
                g: 30,
                b: 40
            }
        );
        assert_eq!(nebula_bias(BLACK), BLACK);
        assert_eq!(nebula_bias(gray(255)), gray(255));
    }
}
