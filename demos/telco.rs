//! An example exploring the `telco` customer churn dataset
use churnscope::data::CustomerTable;
use churnscope::explore::{
    churn_by_contract_type, churn_by_payment_type, churn_distribution, early_tenure_monthly_charges, Chart,
};
use churnscope::significance::{significance_checks, ReportIO};
use std::error::Error;
use std::fs::File;
use std::io::BufReader;

fn main() -> Result<(), Box<dyn Error>> {
    let categorical_names = ["churn", "contract_type", "payment_type"];
    let numeric_names = ["tenure", "monthly_charges"];

    let file = File::open("resources/telco_churn_sample.csv")?;
    let reader = BufReader::new(file);
    let mut csv_reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let categorical_indices: Vec<usize> = categorical_names
        .iter()
        .map(|&name| headers.iter().position(|h| h == name).unwrap())
        .collect();
    let numeric_indices: Vec<usize> = numeric_names
        .iter()
        .map(|&name| headers.iter().position(|h| h == name).unwrap())
        .collect();

    let mut categorical_columns: Vec<Vec<String>> = vec![Vec::new(); categorical_names.len()];
    let mut numeric_columns: Vec<Vec<f64>> = vec![Vec::new(); numeric_names.len()];

    for result in csv_reader.records() {
        let record = result?;
        for (i, &idx) in categorical_indices.iter().enumerate() {
            categorical_columns[i].push(record[idx].to_string());
        }
        for (i, &idx) in numeric_indices.iter().enumerate() {
            let val_str = &record[idx];
            let val = if val_str.is_empty() {
                f64::NAN
            } else {
                val_str.parse::<f64>().unwrap_or(f64::NAN)
            };
            numeric_columns[i].push(val);
        }
    }

    let mut table = CustomerTable::new();
    for (name, values) in categorical_names.iter().zip(categorical_columns) {
        table = table.with_categorical(*name, values)?;
    }
    for (name, values) in numeric_names.iter().zip(numeric_columns) {
        table = table.with_numeric(*name, values)?;
    }

    churn_distribution(&table)?.show();
    churn_by_contract_type(&table)?.show();
    churn_by_payment_type(&table)?.show();
    early_tenure_monthly_charges(&table)?.show();

    let report = significance_checks(&table)?;
    println!("{}", report);
    println!("Report as json: {}", report.json_dump()?);

    Ok(())
}
