use super::*;

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
}

#[test]
fn clamp_finite_rejects_nan_and_infinity() {
    assert_eq!(clamp_finite(150.0, 0.0, 100.0), Some(100.0));
    assert_eq!(clamp_finite(-3.5, 0.0, 100.0), Some(0.0));
    assert_eq!(clamp_finite(42.25, 0.0, 100.0), Some(42.25));
    assert_eq!(clamp_finite(f64::NAN, 0.0, 100.0), None);
    assert_eq!(clamp_finite(f64::INFINITY, 0.0, 100.0), None);
}
