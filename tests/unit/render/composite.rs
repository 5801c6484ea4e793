use super::*;

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    assert_eq!(over(dst, [255, 255, 255, 0]), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let src = [255, 0, 0, 255];
    assert_eq!(over([0, 0, 0, 255], src), src);
}

#[test]
fn over_dst_transparent_returns_src() {
    let src = [100, 110, 120, 200];
    assert_eq!(over([0, 0, 0, 0], src), src);
}

#[test]
fn over_half_black_darkens_opaque_white() {
    assert_eq!(over([255, 255, 255, 255], [0, 0, 0, 128]), [127, 127, 127, 255]);
}

#[test]
fn over_in_place_rejects_mismatched_lengths() {
    let mut dst = vec![0u8; 8];
    assert!(over_in_place(&mut dst, &[0u8; 4]).is_err());
}

#[test]
fn clipped_region_is_bounded_by_surface() {
    assert_eq!(
        Region::clipped(-5.5, 2.2, 3.1, 20.0, 10, 10),
        Some(Region {
            x: 0,
            y: 2,
            width: 4,
            height: 8
        })
    );
    assert_eq!(Region::clipped(12.0, 0.0, 20.0, 5.0, 10, 10), None);
    assert_eq!(Region::clipped(f64::NAN, 0.0, 5.0, 5.0, 10, 10), None);
}

#[test]
fn region_round_trips_through_extract_and_over() {
    let (w, h) = (4u32, 3u32);
    let mut surface: Vec<u8> = (0..w * h * 4).map(|i| i as u8).collect();
    let region = Region {
        x: 1,
        y: 1,
        width: 2,
        height: 2,
    };

    let patch = extract_region(&surface, w, region).unwrap();
    assert_eq!(patch.len(), 16);
    assert_eq!(&patch[..4], &surface[20..24]);
    assert_eq!(&patch[8..12], &surface[36..40]);

    let opaque = [9u8, 8, 7, 255].repeat(4);
    over_region_in_place(&mut surface, w, &opaque, region).unwrap();
    assert_eq!(&surface[20..24], &[9, 8, 7, 255]);
    assert_eq!(&surface[40..44], &[9, 8, 7, 255]);
    assert_eq!(&surface[0..4], &[0, 1, 2, 3]);
    assert_eq!(&surface[28..32], &[28, 29, 30, 31]);
}
