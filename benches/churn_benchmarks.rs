use churnscope::data::CustomerTable;
use churnscope::explore::{churn_by_contract_type, early_tenure_monthly_charges};
use churnscope::histogram::Histogram;
use churnscope::inference::{chi_square_independence, welch_t_test, ContingencyTable};
use churnscope::significance::significance_checks;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

fn synthetic_table(rows: usize, seed: u64) -> CustomerTable {
    let mut rng = StdRng::seed_from_u64(seed);
    let contracts = ["month-to-month", "one-year", "two-year"];
    let payments = ["electronic check", "mailed check", "bank transfer", "credit card"];
    let mut churn = Vec::with_capacity(rows);
    let mut contract = Vec::with_capacity(rows);
    let mut payment = Vec::with_capacity(rows);
    let mut tenure = Vec::with_capacity(rows);
    let mut monthly = Vec::with_capacity(rows);
    for _ in 0..rows {
        let churned = rng.gen::<f64>() < 0.25;
        churn.push(if churned { "Yes" } else { "No" }.to_string());
        contract.push(contracts.choose(&mut rng).unwrap().to_string());
        payment.push(payments.choose(&mut rng).unwrap().to_string());
        tenure.push(rng.gen_range(0.0..72.0));
        monthly.push(rng.gen_range(18.0..120.0));
    }
    CustomerTable::new()
        .with_categorical("churn", churn)
        .unwrap()
        .with_categorical("contract_type", contract)
        .unwrap()
        .with_categorical("payment_type", payment)
        .unwrap()
        .with_numeric("tenure", tenure)
        .unwrap()
        .with_numeric("monthly_charges", monthly)
        .unwrap()
}

pub fn churn_benchmarks(c: &mut Criterion) {
    let table = synthetic_table(100_000, 42);
    let churn = table.churn().unwrap();
    let contract = table.categorical("contract_type").unwrap().to_vec();
    let monthly = table.numeric("monthly_charges").unwrap().to_vec();
    let churned_charges: Vec<f64> = churn
        .iter()
        .zip(&monthly)
        .filter(|(label, _)| label.is_churned())
        .map(|(_, &charge)| charge)
        .collect();
    let retained_charges: Vec<f64> = churn
        .iter()
        .zip(&monthly)
        .filter(|(label, _)| !label.is_churned())
        .map(|(_, &charge)| charge)
        .collect();

    c.bench_function("Histogram Fill", |b| {
        b.iter(|| Histogram::from_values(black_box(&monthly), black_box(10)))
    });

    c.bench_function("Contingency Table", |b| {
        b.iter(|| ContingencyTable::from_labels(black_box("contract_type"), black_box(&contract), black_box(&churn)))
    });

    let contingency = ContingencyTable::from_labels("contract_type", &contract, &churn);
    c.bench_function("Chi-square", |b| {
        b.iter(|| chi_square_independence(black_box(&contingency)).unwrap())
    });

    c.bench_function("Welch T", |b| {
        b.iter(|| welch_t_test(black_box(&churned_charges), black_box(&retained_charges)).unwrap())
    });

    c.bench_function("Contract Breakdown View", |b| {
        b.iter(|| churn_by_contract_type(black_box(&table)).unwrap())
    });

    c.bench_function("Early Tenure View", |b| {
        b.iter(|| early_tenure_monthly_charges(black_box(&table)).unwrap())
    });

    c.bench_function("Significance Checks", |b| {
        b.iter(|| significance_checks(black_box(&table)).unwrap())
    });
}

criterion_group!(benches, churn_benchmarks);
criterion_main!(benches);
