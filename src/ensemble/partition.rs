/// Inclusive range of pass numbers handled by one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Partition {
    lower: usize,
    upper: usize,
}

impl Partition {
    pub fn lower(&self) -> usize {
        self.lower
    }
    pub fn upper(&self) -> usize {
        self.upper
    }
    /// Restart budget handed to the primitive.
    pub fn span(&self) -> usize {
        self.upper - self.lower + 1
    }

    /// Worker count for a pass budget: the hardware concurrency, or a
    /// single worker when there are more threads than passes.
    pub fn threads(hardware: usize, npass: usize) -> usize {
        match hardware {
            0 => 1,
            n if n > npass => 1,
            n => n,
        }
    }

    /// Split passes `1..=npass` into `threads` contiguous ranges of
    /// `npass / threads` passes, the last one absorbing the remainder.
    pub fn split(npass: usize, threads: usize) -> Vec<Self> {
        if npass == 0 {
            return Vec::new();
        }
        let threads = threads.clamp(1, npass);
        let chunk = npass / threads;
        (0..threads)
            .map(|i| Self {
                lower: i * chunk + 1,
                upper: match i + 1 == threads {
                    true => npass,
                    false => (i + 1) * chunk,
                },
            })
            .collect()
    }

    /// Partitions for a pass budget on a machine with `hardware` threads.
    pub fn plan(hardware: usize, npass: usize) -> Vec<Self> {
        Self::split(npass, Self::threads(hardware, npass))
    }
}

impl From<(usize, usize)> for Partition {
    fn from((lower, upper): (usize, usize)) -> Self {
        debug_assert!(lower >= 1 && lower <= upper);
        Self { lower, upper }
    }
}

impl std::fmt::Display for Partition {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}-{}", self.lower, self.upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_threads_four_passes() {
        let plan = Partition::plan(2, 4);
        assert_eq!(plan, vec![Partition::from((1, 2)), Partition::from((3, 4))]);
        assert_eq!(plan.iter().map(Partition::span).collect::<Vec<_>>(), vec![2, 2]);
    }

    #[test]
    fn more_threads_than_passes_collapse() {
        assert_eq!(Partition::threads(8, 5), 1);
        assert_eq!(Partition::plan(8, 5), vec![Partition::from((1, 5))]);
    }

    #[test]
    fn remainder_lands_last() {
        let plan = Partition::plan(4, 10);
        assert_eq!(
            plan,
            vec![
                Partition::from((1, 2)),
                Partition::from((3, 4)),
                Partition::from((5, 6)),
                Partition::from((7, 10)),
            ]
        );
    }

    #[test]
    fn spans_cover_budget() {
        for hardware in 1..=16 {
            for npass in 1..=64 {
                let plan = Partition::plan(hardware, npass);
                let expected = if hardware > npass { 1 } else { hardware };
                assert_eq!(plan.len(), expected, "hw={} npass={}", hardware, npass);
                assert!(plan.iter().all(|p| p.span() >= 1));
                assert!(plan.iter().map(Partition::span).sum::<usize>() >= npass);
                assert_eq!(plan.first().map(Partition::lower), Some(1));
                assert_eq!(plan.last().map(Partition::upper), Some(npass));
                assert!(plan.windows(2).all(|w| w[0].upper() + 1 == w[1].lower()));
            }
        }
    }

    #[test]
    fn single_pass() {
        assert_eq!(Partition::plan(1, 1), vec![Partition::from((1, 1))]);
        assert!(Partition::split(0, 4).is_empty());
    }
}
