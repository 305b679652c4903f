//! Explore
//!
//! The four exploration views over a customer table. Each view filters the
//! table, aggregates the rows it keeps into a chart and pairs it with the
//! headline finding it illustrates. Views never mutate the table and never
//! write files; [`Chart::show`] prints to standard output.
use crate::constants::{CONTRACT_TYPE, DEFAULT_BIN_COUNT, EARLY_TENURE_CUTOFF, MONTHLY_CHARGES, PAYMENT_TYPE, TENURE};
use crate::data::{Churn, CustomerTable};
use crate::errors::ExploreError;
use crate::histogram::{bar, CategoryCounts, Histogram};
use hashbrown::HashMap;
use log::info;
use std::fmt;

const RETAINED_LEGEND: &str = "Not Churned";
const CHURNED_LEGEND: &str = "Churned";

/// A terminal chart with a headline.
pub trait Chart: fmt::Display {
    /// Headline printed above the chart body.
    fn title(&self) -> &str;

    /// Print the chart to standard output.
    fn show(&self) {
        println!("{}", self.title());
        println!("{}", self);
    }
}

/// Distribution of the churn label across the whole customer table.
#[derive(Debug, Clone)]
pub struct ChurnDistribution {
    /// Counts of each churn label, in first appearance order.
    pub counts: CategoryCounts,
}

impl fmt::Display for ChurnDistribution {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.counts)
    }
}

impl Chart for ChurnDistribution {
    fn title(&self) -> &str {
        "Customers that churn make up roughly a quarter of the customer population"
    }
}

/// Churned and retained counts side by side for one categorical feature.
///
/// Labels follow their first appearance in the full column, so the two
/// groups always line up row for row, and bars in both groups share one
/// scale.
#[derive(Debug, Clone)]
pub struct ChurnBreakdown {
    /// Name of the feature the categories come from.
    pub feature: String,
    /// Category labels, in first appearance order.
    pub labels: Vec<String>,
    /// Customers that have not churned, one count per label.
    pub retained: Vec<u64>,
    /// Customers that have churned, one count per label.
    pub churned: Vec<u64>,
    headline: &'static str,
}

impl fmt::Display for ChurnBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label_width = self.labels.iter().map(|l| l.len()).max().unwrap_or(0);
        let legend_width = RETAINED_LEGEND.len().max(CHURNED_LEGEND.len());
        let max_count = self
            .retained
            .iter()
            .chain(self.churned.iter())
            .copied()
            .max()
            .unwrap_or(0);
        for (i, label) in self.labels.iter().enumerate() {
            writeln!(
                f,
                "{:<label_width$}  {:<legend_width$} {} {}",
                label,
                RETAINED_LEGEND,
                bar(self.retained[i], max_count),
                self.retained[i]
            )?;
            writeln!(
                f,
                "{:<label_width$}  {:<legend_width$} {} {}",
                "",
                CHURNED_LEGEND,
                bar(self.churned[i], max_count),
                self.churned[i]
            )?;
        }
        Ok(())
    }
}

impl Chart for ChurnBreakdown {
    fn title(&self) -> &str {
        self.headline
    }
}

/// Monthly charges of churned customers with tenure at or below the cutoff.
#[derive(Debug, Clone)]
pub struct EarlyTenureCharges {
    /// Share of the churned population with tenure at or below the cutoff.
    /// NaN when the table holds no churned customers.
    pub churn_share: f64,
    /// Monthly charges of the filtered customers.
    pub charges: Histogram,
}

impl fmt::Display for EarlyTenureCharges {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.charges)
    }
}

impl Chart for EarlyTenureCharges {
    fn title(&self) -> &str {
        "Customers with 2 years or less of tenure that have churned"
    }

    fn show(&self) {
        println!(
            "tenure less than or equal to {}, percentage of churn pop.: {:.2}%",
            EARLY_TENURE_CUTOFF,
            self.churn_share * 100.0
        );
        println!("{}", self.title());
        println!("{}", self);
    }
}

/// Build the churn label distribution view.
pub fn churn_distribution(table: &CustomerTable) -> Result<ChurnDistribution, ExploreError> {
    let churn = table.churn()?;
    let counts = CategoryCounts::from_labels(churn.iter().map(Churn::as_str));
    info!("Churn distribution over {} customers.", table.rows());
    Ok(ChurnDistribution { counts })
}

/// Build the churn breakdown over contract types.
pub fn churn_by_contract_type(table: &CustomerTable) -> Result<ChurnBreakdown, ExploreError> {
    churn_breakdown(
        table,
        CONTRACT_TYPE,
        "Most customers that are churning are on the month-to-month contract",
    )
}

/// Build the churn breakdown over payment types.
pub fn churn_by_payment_type(table: &CustomerTable) -> Result<ChurnBreakdown, ExploreError> {
    churn_breakdown(
        table,
        PAYMENT_TYPE,
        "Most customers that are churning use the electronic check payment method",
    )
}

fn churn_breakdown(
    table: &CustomerTable,
    feature: &str,
    headline: &'static str,
) -> Result<ChurnBreakdown, ExploreError> {
    let categories = table.categorical(feature)?;
    let churn = table.churn()?;
    let labels = CategoryCounts::from_labels(categories.iter().map(String::as_str)).labels;
    let mut retained = vec![0u64; labels.len()];
    let mut churned = vec![0u64; labels.len()];
    {
        // The index borrows `labels`; it must go out of scope before the
        // move into the view below.
        let index: HashMap<&str, usize> =
            labels.iter().enumerate().map(|(i, l)| (l.as_str(), i)).collect();
        for (category, label) in categories.iter().zip(&churn) {
            let i = index[category.as_str()];
            if label.is_churned() {
                churned[i] += 1;
            } else {
                retained[i] += 1;
            }
        }
    }
    info!(
        "Churn breakdown of '{}' over {} categories.",
        feature,
        labels.len()
    );
    Ok(ChurnBreakdown {
        feature: feature.to_string(),
        labels,
        retained,
        churned,
        headline,
    })
}

/// Build the monthly charges view for churned customers with tenure at or
/// below [`EARLY_TENURE_CUTOFF`].
///
/// Customers past the cutoff, and customers that have not churned, never
/// reach the histogram or the share. An empty selection yields an empty
/// histogram and a NaN share rather than an error.
pub fn early_tenure_monthly_charges(table: &CustomerTable) -> Result<EarlyTenureCharges, ExploreError> {
    let churn = table.churn()?;
    let tenure = table.numeric(TENURE)?;
    let monthly = table.numeric(MONTHLY_CHARGES)?;
    let churned_total = churn.iter().filter(|c| c.is_churned()).count();
    let mut early_charges = Vec::new();
    for ((label, &months), &charge) in churn.iter().zip(tenure).zip(monthly) {
        if label.is_churned() && months <= EARLY_TENURE_CUTOFF {
            early_charges.push(charge);
        }
    }
    let churn_share = early_charges.len() as f64 / churned_total as f64;
    info!(
        "Early tenure charges view keeps {} of {} churned customers.",
        early_charges.len(),
        churned_total
    );
    Ok(EarlyTenureCharges {
        churn_share,
        charges: Histogram::from_values(&early_charges, DEFAULT_BIN_COUNT),
    })
}
