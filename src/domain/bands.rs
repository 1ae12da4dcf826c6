//! Ordered threshold tables.
//!
//! A table is a slice of `(lower_bound, value)` entries sorted by ascending
//! lower bound. The first entry should start at `f64::NEG_INFINITY` so the
//! table covers the whole real line. A value at an exact bound belongs to the
//! band starting there.

/// One band of a threshold table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band<T> {
    pub lower: f64,
    pub value: T,
}

impl<T> Band<T> {
    pub const fn new(lower: f64, value: T) -> Self {
        Self { lower, value }
    }
}

/// Find the band containing `x`.
///
/// Returns `None` for NaN, an empty table, or `x` below the first bound.
pub fn lookup<T>(table: &[Band<T>], x: f64) -> Option<&T> {
    if x.is_nan() {
        return None;
    }
    table
        .iter()
        .take_while(|band| band.lower <= x)
        .last()
        .map(|band| &band.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: [Band<&str>; 3] = [
        Band::new(f64::NEG_INFINITY, "low"),
        Band::new(10.0, "mid"),
        Band::new(20.0, "high"),
    ];

    #[test]
    fn test_lookup_bounds_go_up() {
        assert_eq!(lookup(&TABLE, 9.999), Some(&"low"));
        assert_eq!(lookup(&TABLE, 10.0), Some(&"mid"));
        assert_eq!(lookup(&TABLE, 20.0), Some(&"high"));
        assert_eq!(lookup(&TABLE, f64::INFINITY), Some(&"high"));
        assert_eq!(lookup(&TABLE, f64::NEG_INFINITY), Some(&"low"));
    }

    #[test]
    fn test_lookup_nan_and_gaps() {
        assert_eq!(lookup(&TABLE, f64::NAN), None);

        let partial = [Band::new(0.0, 1u8)];
        assert_eq!(lookup(&partial, -1.0), None);
        assert_eq!(lookup::<u8>(&[], 1.0), None);
    }
}
