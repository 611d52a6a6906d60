//! End-to-end properties of the tilt-shift entry points.

use approx::assert_abs_diff_eq;
use tilt_core::pixel::{pack_argb, pack_rgb, unpack_argb};
use tilt_core::Image;
use tilt_ops::aperture::{Aperture, ApertureKernel};
use tilt_ops::bands::{merge, split, BandLayout};
use tilt_ops::{adjust_color, apply_tilt_shift, process, OpsError, TiltShiftConfig};

fn photo(width: u32, height: u32) -> Image {
    Image::from_fn(width, height, |x, y| {
        let r = ((x * 255) / width) as u8;
        let g = ((y * 255) / height) as u8;
        let b = (((x ^ y) * 7) % 256) as u8;
        pack_argb(200 + (x % 56) as u8, r, g, b)
    })
}

fn assert_close(a: &Image, b: &Image, tolerance: i32) {
    assert_eq!(a.dimensions(), b.dimensions());
    for (i, (&p, &q)) in a.data().iter().zip(b.data()).enumerate() {
        for (x, y) in unpack_argb(p).into_iter().zip(unpack_argb(q)) {
            assert!(
                (x as i32 - y as i32).abs() <= tolerance,
                "pixel {i}: {p:08x} vs {q:08x}"
            );
        }
    }
}

#[test]
fn test_flat_gray_survives_blur() {
    let gray = Image::filled(256, 256, pack_rgb(128, 128, 128));
    let config = TiltShiftConfig {
        color_adjust: false,
        blur: true,
        radius: 10.0,
        top_percent: 0.3,
        bottom_percent: 0.3,
        bloom: 1.0,
        ..TiltShiftConfig::default()
    };
    let out = process(Some(&gray), &config).unwrap();
    assert_eq!(out.dimensions(), (256, 256));
    assert!(out.data().iter().all(|&p| p == pack_rgb(128, 128, 128)));
}

#[test]
fn test_zero_gain_color_is_near_identity() {
    let img = photo(40, 30);
    let out = adjust_color(&img, 0.0, 0.0, 0.0).unwrap();
    assert_close(&out, &img, 1);
    for (&p, &q) in out.data().iter().zip(img.data()) {
        assert_eq!(p >> 24, q >> 24);
    }
}

#[test]
fn test_full_desaturation() {
    let out = adjust_color(&photo(40, 30), -1.0, 0.0, 0.0).unwrap();
    for &p in out.data() {
        let [_, r, g, b] = unpack_argb(p);
        assert_eq!((r, r), (g, b));
    }
}

#[test]
fn test_split_merge_is_exact() {
    let img = photo(33, 101);
    for (top, bottom) in [(0.3, 0.3), (0.0, 0.0), (0.05, 0.9), (0.49, 0.5)] {
        let layout = BandLayout::compute(img.height(), top, bottom).unwrap();
        let bands = split(&img, &layout).unwrap();
        assert_eq!(merge(&bands).unwrap(), img, "top {top} bottom {bottom}");
    }
}

#[test]
fn test_zero_radius_keeps_bands() {
    let img = photo(90, 60);
    let out = apply_tilt_shift(&img, 0.0, 0.3, 0.3, 1.0, 192.0, 5, 0.0).unwrap();
    assert_close(&out, &img, 2);
}

#[test]
fn test_zero_fractions_are_noop() {
    let img = photo(50, 50);
    let out = apply_tilt_shift(&img, 12.0, 0.0, 0.0, 2.0, 192.0, 6, 0.0).unwrap();
    assert_eq!(out, img);
}

#[test]
fn test_kernel_normalized_for_all_shapes() {
    for sides in [0u32, 3, 4, 5, 7, 12] {
        for radius in [0.0f32, 0.7, 3.0, 10.0, 31.5] {
            let aperture = Aperture { radius, sides, ..Aperture::default() };
            let kernel = ApertureKernel::synthesize(&aperture, 128, 128);
            assert_abs_diff_eq!(kernel.sum(), 1.0, epsilon = 1e-4);
        }
    }
}

#[test]
fn test_bloom_output_stays_in_range() {
    let img = Image::from_fn(80, 80, |x, y| {
        if (x / 10 + y / 10) % 2 == 0 { pack_rgb(250, 250, 250) } else { pack_rgb(5, 5, 5) }
    });
    let out = apply_tilt_shift(&img, 6.0, 0.4, 0.4, 8.0, 100.0, 5, 0.2).unwrap();
    for &p in out.data() {
        let [a, r, g, b] = unpack_argb(p);
        assert_eq!(a, 255);
        assert!(r >= 5 && g >= 5 && b >= 5);
    }
    // Top band centre of a bright square is saturated.
    assert_eq!(unpack_argb(out.pixel(5, 5))[1], 255);
}

#[test]
fn test_degenerate_bands_are_rejected() {
    let img = photo(20, 20);
    assert!(matches!(
        apply_tilt_shift(&img, 5.0, 0.6, 0.4, 2.0, 192.0, 5, 0.0),
        Err(OpsError::InvalidDimensions(_))
    ));
    assert!(matches!(
        apply_tilt_shift(&img, -5.0, 0.3, 0.3, 2.0, 192.0, 5, 0.0),
        Err(OpsError::ParameterOutOfRange { name: "radius", .. })
    ));
    assert!(matches!(
        apply_tilt_shift(&img, 5.0, 0.3, 0.3, 2.0, 192.0, 1, 0.0),
        Err(OpsError::ParameterOutOfRange { name: "sides", .. })
    ));
}

#[test]
fn test_default_pipeline_runs() {
    let img = photo(120, 80);
    let out = process(Some(&img), &TiltShiftConfig::default()).unwrap();
    assert_eq!(out.dimensions(), img.dimensions());
    assert_ne!(out, img);
}
