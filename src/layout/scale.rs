//! Linear scales mapping data values to pixels and ems

/// A linear map from a numeric domain onto a numeric range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
    clamp: bool,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain,
            range,
            clamp: false,
        }
    }

    /// Restrict outputs to the range
    pub fn clamped(mut self) -> Self {
        self.clamp = true;
        self
    }

    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        // A collapsed domain maps everything to the middle of the range
        let mut t = if span == 0.0 { 0.5 } else { (value - d0) / span };
        if self.clamp {
            t = t.clamp(0.0, 1.0);
        }
        r0 + (r1 - r0) * t
    }
}
