use std::cmp::Ordering;
use std::collections::BTreeMap;

/// One labeled (x, y) dataset, owned by a single (file, Y column) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

impl Series {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            xs: Vec::new(),
            ys: Vec::new(),
        }
    }

    pub fn push(&mut self, x: f64, y: f64) {
        self.xs.push(x);
        self.ys.push(y);
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }

    /// Sorts the Y values ascending, leaving the X values untouched.
    ///
    /// This only makes visual sense when X is the record index: the result
    /// is then a sorted-distribution curve against rank.  With a real X
    /// column the x/y pairing is knowingly broken.
    pub fn sort_y(&mut self) {
        self.ys
            .sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    }

    /// Buckets the Y values into bins of width `bin`, dropping the X values.
    ///
    /// Returns a new series where each point is (bin start, count), ordered
    /// by bin.  Bins are identified by `floor(y / bin)`, so negative values
    /// land in negative bins.  Empty bins are omitted.  `bin` must be
    /// positive; the caller validates that.
    pub fn histogram(&self, bin: f64) -> Self {
        let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
        for y in &self.ys {
            *counts.entry((y / bin).floor() as i64).or_insert(0) += 1;
        }
        let mut result = Self::new(self.label.clone());
        for (index, count) in counts {
            result.push(index as f64 * bin, count as f64);
        }
        result
    }
}
