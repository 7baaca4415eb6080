#[derive(Clone)]
pub struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    pub fn gen_f64(&mut self, min: f64, max: f64) -> f64 {
        let n = self.next_u64() as f64 / u64::MAX as f64;
        min + (max - min) * n
    }

    /// Random box with its origin in `[0, extent)` and sides in `[min_side, max_side)`.
    pub fn gen_box(&mut self, extent: f64, min_side: f64, max_side: f64) -> (f64, f64, f64, f64) {
        let x0 = self.gen_f64(0.0, extent);
        let y0 = self.gen_f64(0.0, extent);
        let w = self.gen_f64(min_side, max_side);
        let h = self.gen_f64(min_side, max_side);
        (x0, y0, x0 + w, y0 + h)
    }
}
