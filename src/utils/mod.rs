mod zbrent;

pub use zbrent::zbrent;
use ndarray::Array1;
use std::fmt;
use std::time::Instant;

/// A simple timer based on std::time::Instant, to implement the std::fmt::Display trait on
pub struct Timer {
    time: Instant,
}

impl Timer {
    pub fn start() -> Self {
        Timer {
            time: Instant::now(),
        }
    }
}

impl fmt::Display for Timer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:>68} {:>8.2} s",
            "elapsed time:",
            self.time.elapsed().as_secs_f32()
        )
    }
}

/// Binomial coefficient as floating point number, exact up to n ~ 60.
pub fn binom(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    let k: usize = k.min(n - k);
    let mut result: f64 = 1.0;
    for i in 0..k {
        result = result * (n - i) as f64 / (i + 1) as f64;
    }
    result.round()
}

/// `num` equidistant points in [start, stop], both end points included.
/// A single point is placed at `start`.
pub fn linspace(start: f64, stop: f64, num: usize) -> Array1<f64> {
    if num == 1 {
        return Array1::from_elem(1, start);
    }
    Array1::linspace(start, stop, num)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binomial_coefficients() {
        assert_eq!(binom(0, 0), 1.0);
        assert_eq!(binom(4, 2), 6.0);
        assert_eq!(binom(10, 3), 120.0);
        assert_eq!(binom(3, 5), 0.0);
        assert_eq!(binom(40, 20), 137846528820.0);
    }

    #[test]
    fn linspace_includes_endpoints() {
        let x = linspace(-1.0, 1.0, 5);
        assert_eq!(x.len(), 5);
        assert_eq!(x[0], -1.0);
        assert_eq!(x[4], 1.0);
        assert_eq!(linspace(0.5, 2.0, 1)[0], 0.5);
    }
}
