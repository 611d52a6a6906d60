//! Lens blur against a direct spatial convolution.
//!
//! The tiled FFT path must agree with the plain sum over kernel taps
//! everywhere, including on the rows and columns where tiles meet.

use tilt_core::pixel::{pack_argb, pack_argb_f32, unpack_argb};
use tilt_core::Image;
use tilt_ops::aperture::{Aperture, ApertureKernel};
use tilt_ops::lens_blur::{lens_blur, TileGrid};

/// Deterministic texture with detail at every scale.
fn texture(width: u32, height: u32) -> Image {
    Image::from_fn(width, height, |x, y| {
        let h = (x.wrapping_mul(73_856_093) ^ y.wrapping_mul(19_349_663)).wrapping_mul(2_654_435_761);
        let r = (h >> 24) as u8;
        let g = ((x * 3 + y) % 256) as u8;
        let b = if (x / 9 + y / 7) % 2 == 0 { 230 } else { 20 };
        pack_argb(255 - (y % 64) as u8, r, g, b)
    })
}

/// out(P) = sum over taps d of k(d) * in(P - d), with edge clamping.
fn direct_blur(src: &Image, aperture: &Aperture) -> Image {
    let grid = 4 * (aperture.pixel_radius() as usize + 1);
    let kernel = ApertureKernel::synthesize(aperture, grid.next_power_of_two(), grid.next_power_of_two());
    let taps: Vec<(i64, i64, f32)> = kernel.taps().collect();
    Image::from_fn(src.width(), src.height(), |x, y| {
        let mut acc = [0.0f32; 4];
        for &(dx, dy, w) in &taps {
            let [a, r, g, b] = unpack_argb(src.pixel_clamped(x as i64 - dx, y as i64 - dy));
            acc[0] += a as f32 * w;
            acc[1] += aperture.bloom_channel(r as f32) * w;
            acc[2] += aperture.bloom_channel(g as f32) * w;
            acc[3] += aperture.bloom_channel(b as f32) * w;
        }
        pack_argb_f32(acc[0], acc[1], acc[2], acc[3])
    })
}

fn max_channel_diff(a: &Image, b: &Image) -> i32 {
    assert_eq!(a.dimensions(), b.dimensions());
    a.data()
        .iter()
        .zip(b.data())
        .flat_map(|(&p, &q)| {
            unpack_argb(p)
                .into_iter()
                .zip(unpack_argb(q))
                .map(|(x, y)| (x as i32 - y as i32).abs())
        })
        .max()
        .unwrap_or(0)
}

#[test]
fn test_matches_direct_convolution_across_tiles() {
    let src = texture(260, 150);
    let aperture = Aperture {
        radius: 5.0,
        bloom: 1.0,
        sides: 5,
        angle: 0.4,
        ..Aperture::default()
    };
    // Several tiles on both axes.
    let grid = TileGrid::new(260, 150, aperture.pixel_radius());
    assert!(grid.origins(260, 150).len() >= 6);

    let fft = lens_blur(&src, &aperture).unwrap();
    let direct = direct_blur(&src, &aperture);
    assert!(max_channel_diff(&fft, &direct) <= 1);
}

#[test]
fn test_matches_direct_convolution_with_bloom() {
    let src = texture(140, 70);
    let aperture = Aperture {
        radius: 3.5,
        bloom: 2.5,
        bloom_threshold: 150.0,
        sides: 0,
        ..Aperture::default()
    };
    let fft = lens_blur(&src, &aperture).unwrap();
    let direct = direct_blur(&src, &aperture);
    assert!(max_channel_diff(&fft, &direct) <= 1);
}

#[test]
fn test_bloom_saturates_without_wrapping() {
    let src = Image::from_fn(64, 64, |x, _| {
        if x < 32 { pack_argb(255, 240, 240, 240) } else { pack_argb(255, 30, 30, 30) }
    });
    let aperture = Aperture {
        radius: 4.0,
        bloom: 5.0,
        bloom_threshold: 192.0,
        ..Aperture::default()
    };
    let out = lens_blur(&src, &aperture).unwrap();
    for &p in out.data() {
        let [a, r, g, b] = unpack_argb(p);
        assert_eq!(a, 255);
        assert!(r >= 30 && g >= 30 && b >= 30);
    }
    // Deep inside the bright half every tap is bloomed past 255.
    assert_eq!(unpack_argb(out.pixel(10, 32))[1], 255);
    // Bloom spreads into the dark half.
    assert!(unpack_argb(out.pixel(33, 32))[1] > 30 * 2);
}

#[test]
fn test_matches_direct_convolution_on_large_tiles() {
    let src = texture(300, 280);
    let aperture = Aperture {
        radius: 40.0,
        bloom: 1.0,
        sides: 6,
        angle: 0.25,
        ..Aperture::default()
    };
    let grid = TileGrid::new(300, 280, aperture.pixel_radius());
    assert_eq!((grid.tile_width, grid.tile_height), (256, 256));
    assert_eq!(grid.origins(300, 280).len(), 4);

    let fft = lens_blur(&src, &aperture).unwrap();
    let direct = direct_blur(&src, &aperture);
    assert!(max_channel_diff(&fft, &direct) <= 1);
}

#[test]
fn test_radius_past_capped_tile_grows_grid() {
    let src = texture(40, 30);
    let aperture = Aperture::disc(140.0);
    // 256 would leave no inner block, so the grid grows to cover 4 * pad.
    let grid = TileGrid::new(40, 30, aperture.pixel_radius());
    assert_eq!((grid.tile_width, grid.tile_height), (512, 512));

    let fft = lens_blur(&src, &aperture).unwrap();
    assert_eq!(fft.dimensions(), (40, 30));
    let direct = direct_blur(&src, &aperture);
    assert!(max_channel_diff(&fft, &direct) <= 1);
}
