use serde::Serialize;

/// Linear mapping from a data domain onto a pixel range.
///
/// The range may be inverted (e.g. `(bottom, top)` for a y-axis).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> LinearScale {
        LinearScale { domain, range }
    }

    ///
    /// Scale over `[min, max]` padded by `fraction` of the span on both
    /// sides. A zero span is padded by `fraction` of the magnitude, or by 1
    /// when the value is zero.
    ///
    pub fn padded(min: f64, max: f64, fraction: f64, range: (f64, f64)) -> LinearScale {
        let span = max - min;
        let pad = if span > 0.0 {
            span * fraction
        } else if max.abs() > 0.0 {
            max.abs() * fraction
        } else {
            1.0
        };
        LinearScale::new((min - pad, max + pad), range)
    }

    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    pub fn invert(&self, pixel: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r1 == r0 {
            return (d0 + d1) / 2.0;
        }
        d0 + (pixel - r0) / (r1 - r0) * (d1 - d0)
    }

    pub fn range_width(&self) -> f64 {
        (self.range.1 - self.range.0).abs()
    }

    /// Pixels per domain unit (absolute).
    pub fn unit_width(&self) -> f64 {
        let span = (self.domain.1 - self.domain.0).abs();
        if span == 0.0 {
            return self.range_width();
        }
        self.range_width() / span
    }

    /// Clamp a pixel coordinate into the range.
    pub fn clamp_pixel(&self, pixel: f64) -> f64 {
        let lo = self.range.0.min(self.range.1);
        let hi = self.range.0.max(self.range.1);
        pixel.clamp(lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case(0.0, 100.0)]
    #[case(5.0, 150.0)]
    #[case(10.0, 200.0)]
    fn test_map(#[case] value: f64, #[case] expected: f64) {
        let scale = LinearScale::new((0.0, 10.0), (100.0, 200.0));
        assert_eq!(scale.map(value), expected);
        assert_eq!(scale.invert(expected), value);
    }

    #[rstest]
    fn test_inverted_range() {
        let scale = LinearScale::new((0.0, 4.0), (80.0, 0.0));
        assert_eq!(scale.map(1.0), 60.0);
        assert_eq!(scale.range_width(), 80.0);
        assert_eq!(scale.clamp_pixel(-10.0), 0.0);
    }

    #[rstest]
    fn test_padded_by_ten_percent() {
        let scale = LinearScale::padded(0.0, 50.0, 0.1, (100.0, 0.0));
        assert_eq!(scale.domain, (-5.0, 55.0));
    }

    #[rstest]
    #[case(4.0, (3.6, 4.4))]
    #[case(0.0, (-1.0, 1.0))]
    fn test_padded_degenerate(#[case] value: f64, #[case] expected: (f64, f64)) {
        let scale = LinearScale::padded(value, value, 0.1, (1.0, 0.0));
        assert!((scale.domain.0 - expected.0).abs() < 1e-9);
        assert!((scale.domain.1 - expected.1).abs() < 1e-9);
    }

    #[rstest]
    fn test_degenerate_domain_maps_to_midpoint() {
        let scale = LinearScale::new((3.0, 3.0), (0.0, 10.0));
        assert_eq!(scale.map(3.0), 5.0);
    }
}
