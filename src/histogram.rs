//! Histogram
//!
//! Frequency aggregation for the exploration views: equal width histograms
//! over numeric columns, and per label counts over categorical columns.
//! Both render as proportional bar rows through their `Display` impls.
use crate::constants::MAX_BAR_WIDTH;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single histogram bin covering `[start, end)`.
///
/// The last bin of a histogram is closed on the right so the column maximum
/// is counted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    /// Inclusive lower edge.
    pub start: f64,
    /// Exclusive upper edge (inclusive for the last bin).
    pub end: f64,
    /// Number of values falling in the bin.
    pub count: u64,
}

/// Equal width histogram of a numeric column.
///
/// Non finite values are skipped while filling. An empty input, or a bin
/// count of zero, produces a histogram with no bins, which renders as an
/// empty chart rather than failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Histogram {
    /// The bins, ordered by their edges.
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    /// Build a histogram over the finite values of a column.
    ///
    /// * `values` - The values to aggregate.
    /// * `bin_count` - Number of equal width bins to spread the range over.
    pub fn from_values(values: &[f64], bin_count: usize) -> Self {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() || bin_count == 0 {
            return Histogram { bins: Vec::new() };
        }

        let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        // A constant column collapses to a single unit width bin.
        if max == min {
            return Histogram {
                bins: vec![HistogramBin {
                    start: min,
                    end: min + 1.0,
                    count: finite.len() as u64,
                }],
            };
        }

        let width = (max - min) / bin_count as f64;
        let mut bins: Vec<HistogramBin> = (0..bin_count)
            .map(|i| HistogramBin {
                start: min + i as f64 * width,
                end: min + (i + 1) as f64 * width,
                count: 0,
            })
            .collect();

        for v in finite {
            let mut idx = ((v - min) / width) as usize;
            // The maximum lands exactly on the upper edge; close the last bin.
            if idx >= bin_count {
                idx = bin_count - 1;
            }
            bins[idx].count += 1;
        }

        Histogram { bins }
    }

    /// Total number of values counted across all bins.
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|b| b.count).sum()
    }

    /// Whether the histogram holds no bins.
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    fn max_count(&self) -> u64 {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }
}

impl fmt::Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let max_count = self.max_count();
        for (i, b) in self.bins.iter().enumerate() {
            // The last bin absorbs the maximum, so it closes on the right.
            let close = if i + 1 == self.bins.len() { ']' } else { ')' };
            writeln!(
                f,
                "[{:>9.2}, {:>9.2}{} {} {}",
                b.start,
                b.end,
                close,
                bar(b.count, max_count),
                b.count
            )?;
        }
        Ok(())
    }
}

/// Per label counts of a categorical column, in first appearance order.
///
/// First appearance order keeps rendering deterministic and matches the
/// order in which a reader scanning the raw column would meet the labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCounts {
    /// The distinct labels, in the order they first appear.
    pub labels: Vec<String>,
    /// The count for each label, aligned with `labels`.
    pub counts: Vec<u64>,
}

impl CategoryCounts {
    /// Count the labels yielded by an iterator.
    pub fn from_labels<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut labels: Vec<String> = Vec::new();
        let mut counts: Vec<u64> = Vec::new();
        for v in values {
            match index.get(v) {
                Some(&i) => counts[i] += 1,
                None => {
                    index.insert(v, labels.len());
                    labels.push(v.to_string());
                    counts.push(1);
                }
            }
        }
        CategoryCounts { labels, counts }
    }

    /// Count for a single label, zero when the label never occurred.
    pub fn count_of(&self, label: &str) -> u64 {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|i| self.counts[i])
            .unwrap_or(0)
    }

    /// Total number of counted values.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether no labels were counted.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl fmt::Display for CategoryCounts {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let max_count = self.counts.iter().copied().max().unwrap_or(0);
        let label_width = self.labels.iter().map(|l| l.len()).max().unwrap_or(0);
        for (label, count) in self.labels.iter().zip(&self.counts) {
            writeln!(
                f,
                "{:<label_width$} {} {}",
                label,
                bar(*count, max_count),
                count
            )?;
        }
        Ok(())
    }
}

/// Render a bar proportional to `count` against the row with `max_count`.
pub(crate) fn bar(count: u64, max_count: u64) -> String {
    if max_count == 0 {
        return String::new();
    }
    let mut len = ((count * MAX_BAR_WIDTH as u64) / max_count) as usize;
    if count > 0 && len == 0 {
        len = 1;
    }
    "\u{2588}".repeat(len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_bins_cover_range() {
        let v = vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 10.0];
        let hist = Histogram::from_values(&v, 5);
        assert_eq!(hist.bins.len(), 5);
        assert_eq!(hist.total(), 10);
        assert_eq!(hist.bins[0].start, 0.0);
        assert_eq!(hist.bins[4].end, 10.0);
        // The maximum is counted in the final, closed bin.
        assert_eq!(hist.bins[4].count, 2);
    }

    #[test]
    fn test_histogram_skips_non_finite() {
        let v = vec![1.0, f64::NAN, 2.0, f64::INFINITY, 3.0];
        let hist = Histogram::from_values(&v, 2);
        assert_eq!(hist.total(), 3);
    }

    #[test]
    fn test_histogram_empty_input() {
        let hist = Histogram::from_values(&[], 10);
        assert!(hist.is_empty());
        assert_eq!(format!("{}", hist), "");
    }

    #[test]
    fn test_histogram_constant_column() {
        let v = vec![7.5; 4];
        let hist = Histogram::from_values(&v, 10);
        assert_eq!(hist.bins.len(), 1);
        assert_eq!(hist.bins[0].count, 4);
        assert_eq!(hist.bins[0].start, 7.5);
    }

    #[test]
    fn test_category_counts_order_and_totals() {
        let labels = ["b", "a", "b", "c", "a", "b"];
        let counts = CategoryCounts::from_labels(labels.iter().copied());
        assert_eq!(counts.labels, vec!["b", "a", "c"]);
        assert_eq!(counts.counts, vec![3, 2, 1]);
        assert_eq!(counts.count_of("c"), 1);
        assert_eq!(counts.count_of("missing"), 0);
        assert_eq!(counts.total(), 6);
    }

    #[test]
    fn test_display_renders_rows() {
        let labels = ["month-to-month", "two-year", "month-to-month"];
        let counts = CategoryCounts::from_labels(labels.iter().copied());
        let out = format!("{}", counts);
        assert!(out.contains("month-to-month"));
        assert!(out.contains("two-year"));
        assert!(out.contains('\u{2588}'));

        let hist = Histogram::from_values(&[1.0, 2.0, 3.0], 3);
        let out = format!("{}", hist);
        assert_eq!(out.lines().count(), 3);
    }

    #[test]
    fn test_display_closes_last_bin() {
        let hist = Histogram::from_values(&[0.0, 5.0, 10.0], 2);
        let out = format!("{}", hist);
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].contains(')'));
        assert!(lines[1].contains(']'));
        assert!(!lines[1].contains(')'));
    }

    #[test]
    fn test_bar_scaling() {
        assert_eq!(bar(0, 10), "");
        assert_eq!(bar(10, 10).chars().count(), MAX_BAR_WIDTH);
        // Small but non zero counts still show a sliver.
        assert_eq!(bar(1, 1000).chars().count(), 1);
    }
}
