#[derive(Clone, Copy, Debug)]
pub(crate) struct Fnv1a64(u64);

impl Fnv1a64 {
    pub(crate) const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01B3;

    pub(crate) fn new_default() -> Self {
        Self(Self::OFFSET_BASIS)
    }

    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        let mut h = self.0;
        for &b in bytes {
            h ^= u64::from(b);
            h = h.wrapping_mul(Self::PRIME);
        }
        self.0 = h;
    }

    pub(crate) fn finish(self) -> u64 {
        self.0
    }
}

/// Stable 16-hex-digit digest of `s`, used to derive file names for cached URLs.
pub(crate) fn fnv_hex(s: &str) -> String {
    let mut h = Fnv1a64::new_default();
    h.write_bytes(s.as_bytes());
    format!("{:016x}", h.finish())
}

/// Clamp into `[0, 1]`; NaN maps to `fallback`.
pub(crate) fn unit_clamp(v: f64, fallback: f64) -> f64 {
    if v.is_nan() { fallback } else { v.clamp(0.0, 1.0) }
}
