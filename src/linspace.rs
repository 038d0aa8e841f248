use num::Float;

/// Evenly spaced samples over a closed interval. The last sample is `max`
/// exactly.
pub struct Linspace<F> {
    start: F,
    end: F,
    step: F,
    index: usize,
    len: usize,
}

impl<F: Float> Linspace<F> {
    pub fn new(min: F, max: F, n: usize) -> Self {
        let step = match F::from(n.saturating_sub(1)) {
            Some(num_steps) if n > 1 => (max - min) / num_steps,
            _ => F::zero(),
        };
        Linspace {
            start: min,
            end: max,
            step,
            index: 0,
            len: n,
        }
    }
}

impl<F: Float> Iterator for Linspace<F> {
    type Item = F;

    #[inline]
    fn next(&mut self) -> Option<F> {
        if self.index >= self.len {
            return None;
        }

        let i = F::from(self.index)?;
        self.index += 1;

        if self.index == self.len && self.len > 1 {
            return Some(self.end);
        }

        Some(self.start + self.step * i)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.index;
        (n, Some(n))
    }
}

impl<F: Float> ExactSizeIterator for Linspace<F> {}

#[test]
fn test_linspace() {
    let xs: Vec<f64> = Linspace::new(-1., 1., 5).collect();

    assert_eq!(xs, vec![-1., -0.5, 0., 0.5, 1.]);
    assert_eq!(Linspace::new(3.0f64, 7., 1).collect::<Vec<_>>(), vec![3.]);
    assert_eq!(Linspace::new(3.0f64, 7., 0).count(), 0);
}

#[test]
fn test_linspace_ends_on_max() {
    let xs: Vec<f64> = Linspace::new(0., 0.3, 4).collect();

    assert_eq!(xs.len(), 4);
    assert_eq!(xs[0], 0.);
    assert_eq!(xs[3], 0.3);
}

#[test]
fn test_linspace_41_samples() {
    let xs: Vec<f64> = Linspace::new(-1., 1., 41).collect();

    assert_eq!(xs.len(), 41);
    assert_eq!(xs[0], -1.);
    assert_eq!(xs[20], 0.);
    assert_eq!(xs[40], 1.);
}
