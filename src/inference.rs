//! Inference
//!
//! The hypothesis tests behind the significance checker: a chi-square test
//! of independence over labelled contingency tables, and Welch's two sample
//! t-test. P-values come from the matching reference distributions.
use crate::constants::MIN_EXPECTED_CELL_COUNT;
use crate::data::Churn;
use crate::errors::ExploreError;
use crate::utils::{mean, sample_variance};
use hashbrown::HashMap;
use log::warn;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ChiSquared, ContinuousCDF, StudentsT};

/// A labelled contingency table of counts.
///
/// One row per feature category, one column per churn label, counts stored
/// in row major order. Built either directly from aligned label slices with
/// [`ContingencyTable::from_labels`], or from raw counts with
/// [`ContingencyTable::new`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContingencyTable {
    /// Name of the feature the rows are drawn from.
    pub feature: String,
    /// Row labels, in first appearance order.
    pub row_labels: Vec<String>,
    /// Column labels.
    pub col_labels: Vec<String>,
    /// The raw counts in row major order.
    pub counts: Vec<f64>,
}

impl ContingencyTable {
    /// Create a contingency table from raw counts.
    ///
    /// * `feature` - Name of the feature the rows belong to.
    /// * `row_labels` - One label per row.
    /// * `col_labels` - One label per column.
    /// * `counts` - Counts in row major order, `row_labels.len() * col_labels.len()` long.
    pub fn new(feature: &str, row_labels: Vec<String>, col_labels: Vec<String>, counts: Vec<f64>) -> Self {
        assert_eq!(
            counts.len(),
            row_labels.len() * col_labels.len(),
            "counts must hold one value per row and column pair"
        );
        ContingencyTable {
            feature: feature.to_string(),
            row_labels,
            col_labels,
            counts,
        }
    }

    /// Cross tabulate a categorical feature against churn labels.
    ///
    /// Rows appear in the order their category is first seen; columns are
    /// always retained ("No") then churned ("Yes").
    ///
    /// * `feature` - Name of the feature column, carried into reports.
    /// * `categories` - One category label per customer.
    /// * `churn` - One churn label per customer, aligned with `categories`.
    pub fn from_labels(feature: &str, categories: &[String], churn: &[Churn]) -> Self {
        assert_eq!(categories.len(), churn.len(), "categories and churn labels must align");
        let mut row_index: HashMap<&str, usize> = HashMap::new();
        let mut row_labels: Vec<String> = Vec::new();
        let mut counts: Vec<f64> = Vec::new();
        for (category, label) in categories.iter().zip(churn) {
            let row = match row_index.get(category.as_str()) {
                Some(&r) => r,
                None => {
                    row_index.insert(category, row_labels.len());
                    row_labels.push(category.clone());
                    counts.extend_from_slice(&[0.0, 0.0]);
                    row_labels.len() - 1
                }
            };
            let col = if label.is_churned() { 1 } else { 0 };
            counts[row * 2 + col] += 1.0;
        }
        ContingencyTable {
            feature: feature.to_string(),
            row_labels,
            col_labels: vec![Churn::No.to_string(), Churn::Yes.to_string()],
            counts,
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.row_labels.len()
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.col_labels.len()
    }

    /// Get a single count.
    ///
    /// * `i` - The ith row of the table.
    /// * `j` - The jth column of the table.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.counts[i * self.cols() + j]
    }

    /// Sum of the counts in row `i`.
    pub fn row_total(&self, i: usize) -> f64 {
        (0..self.cols()).map(|j| self.get(i, j)).sum()
    }

    /// Sum of the counts in column `j`.
    pub fn col_total(&self, j: usize) -> f64 {
        (0..self.rows()).map(|i| self.get(i, j)).sum()
    }

    /// Grand total of all counts.
    pub fn n(&self) -> f64 {
        self.counts.iter().sum()
    }
}

/// Result of a chi-square test of independence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChiSquare {
    /// The test statistic.
    pub statistic: f64,
    /// Degrees of freedom, `(rows - 1) * (cols - 1)`.
    pub dof: f64,
    /// Two sided p-value.
    pub p_value: f64,
    /// Number of expected cells below the validity threshold.
    pub low_expected_cells: usize,
}

/// Chi-square test of independence over a contingency table.
///
/// Expected counts come from the products of the marginal totals. Expected
/// cells below [`MIN_EXPECTED_CELL_COUNT`] do not change the statistic, but
/// are counted in the result and logged as a warning, since the test is
/// unreliable on such tables.
pub fn chi_square_independence(table: &ContingencyTable) -> Result<ChiSquare, ExploreError> {
    let r = table.rows();
    let c = table.cols();
    if r < 2 || c < 2 {
        return Err(ExploreError::DegenerateTest(
            "chi-square".to_string(),
            format!(
                "table for '{}' needs at least two rows and two columns, got {}x{}",
                table.feature, r, c
            ),
        ));
    }
    for j in 0..c {
        if table.col_total(j) == 0.0 {
            return Err(ExploreError::DegenerateTest(
                "chi-square".to_string(),
                format!("no observations labelled '{}' for '{}'", table.col_labels[j], table.feature),
            ));
        }
    }
    for i in 0..r {
        if table.row_total(i) == 0.0 {
            return Err(ExploreError::DegenerateTest(
                "chi-square".to_string(),
                format!("no observations labelled '{}' for '{}'", table.row_labels[i], table.feature),
            ));
        }
    }

    let n = table.n();
    let mut statistic = 0.0;
    let mut low_expected_cells = 0;
    for i in 0..r {
        for j in 0..c {
            let expected = table.row_total(i) * table.col_total(j) / n;
            if expected < MIN_EXPECTED_CELL_COUNT {
                low_expected_cells += 1;
            }
            let d = table.get(i, j) - expected;
            statistic += d * d / expected;
        }
    }
    if low_expected_cells > 0 {
        warn!(
            "Chi-square for '{}' has {} of {} expected cells below {}; the result may be unreliable.",
            table.feature,
            low_expected_cells,
            r * c,
            MIN_EXPECTED_CELL_COUNT
        );
    }

    let dof = ((r - 1) * (c - 1)) as f64;
    let dist = ChiSquared::new(dof)
        .map_err(|e| ExploreError::DegenerateTest("chi-square".to_string(), e.to_string()))?;
    let p_value = 1.0 - dist.cdf(statistic);
    Ok(ChiSquare {
        statistic,
        dof,
        p_value,
        low_expected_cells,
    })
}

/// Result of Welch's two sample t-test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WelchT {
    /// The t statistic.
    pub statistic: f64,
    /// Welch-Satterthwaite degrees of freedom.
    pub dof: f64,
    /// Two sided p-value.
    pub p_value: f64,
}

/// Welch's two sample t-test, two sided, without assuming equal variances.
///
/// * `a` - First sample.
/// * `b` - Second sample.
pub fn welch_t_test(a: &[f64], b: &[f64]) -> Result<WelchT, ExploreError> {
    if a.len() < 2 || b.len() < 2 {
        return Err(ExploreError::DegenerateTest(
            "t-test".to_string(),
            format!("both groups need at least two values, got {} and {}", a.len(), b.len()),
        ));
    }
    let (na, nb) = (a.len() as f64, b.len() as f64);
    let (ma, mb) = (mean(a), mean(b));
    let (va, vb) = (sample_variance(a), sample_variance(b));
    let se2 = va / na + vb / nb;
    if se2 == 0.0 {
        return Err(ExploreError::DegenerateTest(
            "t-test".to_string(),
            "zero variance in both groups".to_string(),
        ));
    }

    let statistic = (ma - mb) / se2.sqrt();
    // Welch-Satterthwaite approximation.
    let dof = se2.powi(2) / ((va / na).powi(2) / (na - 1.0) + (vb / nb).powi(2) / (nb - 1.0));
    let dist = StudentsT::new(0.0, 1.0, dof)
        .map_err(|e| ExploreError::DegenerateTest("t-test".to_string(), e.to_string()))?;
    let p_value = 2.0 * (1.0 - dist.cdf(statistic.abs()));
    Ok(WelchT {
        statistic,
        dof,
        p_value,
    })
}
