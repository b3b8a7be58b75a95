use std::fmt;

use yansi::Color::Blue;

/// Running totals over every accepted record of the whole run.
///
/// `records` is the global record index: it advances exactly once per
/// accepted record, across all files, and doubles as the fallback X value
/// when no X column is configured.  `sum` accumulates every Y value of every
/// column, so with several Y columns the average reported is "sum of all Y
/// values per accepted record".
#[derive(Debug, Default)]
pub struct Totals {
    pub records: usize,
    pub sum: f64,
}

impl Totals {
    /// Registers one accepted record and its Y values.
    pub fn accept(&mut self, ys: &[f64]) {
        self.records += 1;
        self.sum += ys.iter().sum::<f64>();
    }

    pub fn average(&self) -> f64 {
        self.sum / self.records as f64
    }
}

impl fmt::Display for Totals {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Sum={sum}, average={avg}",
            sum = Blue.paint(format!("{:.1}", self.sum)),
            avg = Blue.paint(format!("{:.1}", self.average())),
        )
    }
}
