//! Significance
//!
//! The statistical significance checker. Crosses the categorical churn
//! drivers against the churn label with chi-square tests of independence,
//! compares monthly charges of churned and retained early tenure customers
//! with Welch's t-test, and collects every outcome into one report.
use crate::constants::{
    CONTRACT_TYPE, EARLY_TENURE_CUTOFF, MIN_EXPECTED_CELL_COUNT, MONTHLY_CHARGES, PAYMENT_TYPE, TENURE,
};
use crate::data::CustomerTable;
use crate::errors::ExploreError;
use crate::inference::{chi_square_independence, welch_t_test, ContingencyTable};
use crate::utils::items_to_strings;
use log::info;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The hypothesis tests the checker can run.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum TestKind {
    ChiSquareIndependence,
    WelchTTest,
}

impl FromStr for TestKind {
    type Err = ExploreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ChiSquareIndependence" => Ok(TestKind::ChiSquareIndependence),
            "WelchTTest" => Ok(TestKind::WelchTTest),
            _ => Err(ExploreError::ParseString(
                s.to_string(),
                "TestKind".to_string(),
                items_to_strings(vec!["ChiSquareIndependence", "WelchTTest"]),
            )),
        }
    }
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TestKind::ChiSquareIndependence => write!(f, "ChiSquareIndependence"),
            TestKind::WelchTTest => write!(f, "WelchTTest"),
        }
    }
}

/// Outcome of a single hypothesis test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestReport {
    /// Feature the test ran against.
    pub feature: String,
    /// Which test ran.
    pub test: TestKind,
    /// The test statistic.
    pub statistic: f64,
    /// Degrees of freedom.
    pub dof: f64,
    /// Two sided p-value.
    pub p_value: f64,
    /// Validity warnings collected while running the test.
    pub warnings: Vec<String>,
}

/// Report over every test the checker ran.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignificanceReport {
    /// One record per test, in the order the tests ran.
    pub tests: Vec<TestReport>,
}

impl SignificanceReport {
    /// Tests with a p-value below `alpha`.
    pub fn significant_at(&self, alpha: f64) -> Vec<&TestReport> {
        self.tests.iter().filter(|t| t.p_value < alpha).collect()
    }
}

impl fmt::Display for SignificanceReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let feature_width = self
            .tests
            .iter()
            .map(|t| t.feature.len())
            .chain(std::iter::once("feature".len()))
            .max()
            .unwrap_or(0);
        let test_width = self
            .tests
            .iter()
            .map(|t| t.test.to_string().len())
            .chain(std::iter::once("test".len()))
            .max()
            .unwrap_or(0);
        writeln!(
            f,
            "{:<feature_width$}  {:<test_width$}  {:>12}  {:>8}  {:>10}",
            "feature", "test", "statistic", "dof", "p-value"
        )?;
        for t in &self.tests {
            writeln!(
                f,
                "{:<feature_width$}  {:<test_width$}  {:>12.4}  {:>8.2}  {:>10.6}",
                t.feature,
                t.test.to_string(),
                t.statistic,
                t.dof,
                t.p_value
            )?;
        }
        for t in &self.tests {
            for w in &t.warnings {
                writeln!(f, "warning ({}): {}", t.feature, w)?;
            }
        }
        Ok(())
    }
}

/// IO
pub trait ReportIO: Serialize + DeserializeOwned + Sized {
    /// Dump a report as a json object.
    fn json_dump(&self) -> Result<String, ExploreError> {
        serde_json::to_string(self).map_err(|e| ExploreError::Serialization(e.to_string()))
    }

    /// Load a report from a json string.
    ///
    /// * `json_str` - String object, which can be serialized to json.
    fn from_json(json_str: &str) -> Result<Self, ExploreError> {
        serde_json::from_str::<Self>(json_str).map_err(|e| ExploreError::Serialization(e.to_string()))
    }
}

impl ReportIO for TestReport {}
impl ReportIO for SignificanceReport {}

/// Run the full battery of churn significance checks.
///
/// Contract type and payment type are crossed against the churn label with
/// chi-square tests of independence. Monthly charges of churned and retained
/// customers with tenure at or below [`EARLY_TENURE_CUTOFF`] are compared
/// with Welch's t-test; customers past the cutoff, and non finite charges,
/// never reach that test.
///
/// Tables with expected contingency cells below [`MIN_EXPECTED_CELL_COUNT`]
/// still produce a result, with the problem recorded in the report's
/// warnings. A missing column or a table too small for one of the tests
/// fails the whole battery.
pub fn significance_checks(table: &CustomerTable) -> Result<SignificanceReport, ExploreError> {
    let churn = table.churn()?;
    let mut tests = Vec::new();

    for feature in [CONTRACT_TYPE, PAYMENT_TYPE] {
        let categories = table.categorical(feature)?;
        let contingency = ContingencyTable::from_labels(feature, categories, &churn);
        let res = chi_square_independence(&contingency)?;
        let mut warnings = Vec::new();
        if res.low_expected_cells > 0 {
            warnings.push(format!(
                "{} expected cells below {}; the chi-square approximation may be unreliable",
                res.low_expected_cells, MIN_EXPECTED_CELL_COUNT
            ));
        }
        info!(
            "Chi-square for '{}': statistic {:.4}, p-value {:.6}.",
            feature, res.statistic, res.p_value
        );
        tests.push(TestReport {
            feature: feature.to_string(),
            test: TestKind::ChiSquareIndependence,
            statistic: res.statistic,
            dof: res.dof,
            p_value: res.p_value,
            warnings,
        });
    }

    let tenure = table.numeric(TENURE)?;
    let monthly = table.numeric(MONTHLY_CHARGES)?;
    let mut churned_charges = Vec::new();
    let mut retained_charges = Vec::new();
    for ((label, &months), &charge) in churn.iter().zip(tenure).zip(monthly) {
        if months <= EARLY_TENURE_CUTOFF && charge.is_finite() {
            if label.is_churned() {
                churned_charges.push(charge);
            } else {
                retained_charges.push(charge);
            }
        }
    }
    let res = welch_t_test(&churned_charges, &retained_charges)?;
    info!(
        "Welch t-test for '{}': statistic {:.4}, p-value {:.6}.",
        MONTHLY_CHARGES, res.statistic, res.p_value
    );
    tests.push(TestReport {
        feature: MONTHLY_CHARGES.to_string(),
        test: TestKind::WelchTTest,
        statistic: res.statistic,
        dof: res.dof,
        p_value: res.p_value,
        warnings: Vec::new(),
    });

    Ok(SignificanceReport { tests })
}
