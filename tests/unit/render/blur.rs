use super::*;

#[test]
fn blur_radius_0_is_identity() {
    let src = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
    let out = blur_rgba8_premul(&src, 1, 2, 0, 1.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn kernel_sums_to_one_in_q16() {
    for (radius, sigma) in [(1, 0.5), (3, 2.0), (30, 10.0)] {
        let k = gaussian_kernel_q16(radius, sigma).unwrap();
        assert_eq!(k.len(), (2 * radius + 1) as usize);
        assert_eq!(k.iter().map(|&w| u64::from(w)).sum::<u64>(), 65536);
        assert!(k[radius as usize] >= k[0]);
    }
}

#[test]
fn bad_sigma_is_rejected() {
    assert!(gaussian_kernel_q16(3, 0.0).is_err());
    assert!(gaussian_kernel_q16(3, f32::NAN).is_err());
    assert!(blur_rgba8_premul(&[0u8; 3], 1, 1, 1, 1.0).is_err());
}

#[test]
fn constant_interior_stays_constant() {
    let (w, h) = (9u32, 9u32);
    let px = [10u8, 20, 30, 40];
    let src = px.repeat((w * h) as usize);
    let out = blur_rgba8_premul(&src, w, h, 2, 1.0).unwrap();

    let center = ((4 * w + 4) * 4) as usize;
    assert_eq!(&out[center..center + 4], &px);
    // Border pixels lose energy to the transparent outside.
    assert!(out[3] < px[3]);
}

#[test]
fn blur_spreads_energy_from_single_pixel() {
    let (w, h) = (9u32, 9u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    let center = ((4 * w + 4) * 4) as usize;
    src[center..center + 4].copy_from_slice(&[0, 0, 0, 255]);

    let out = blur_rgba8_premul(&src, w, h, 2, 1.2).unwrap();

    let nonzero = out.chunks_exact(4).filter(|px| px[3] != 0).count();
    assert!(nonzero > 1);

    let sum_a: u32 = out.chunks_exact(4).map(|px| u32::from(px[3])).sum();
    assert!((sum_a as i32 - 255).abs() <= 6);
}
