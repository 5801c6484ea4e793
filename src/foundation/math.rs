pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Clamp a finite value into `[lo, hi]`; non-finite input yields `None`.
pub(crate) fn clamp_finite(v: f64, lo: f64, hi: f64) -> Option<f64> {
    v.is_finite().then(|| v.clamp(lo, hi))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
