// Canonical column names of the Telco customer table.
pub const CHURN: &str = "churn";
pub const CONTRACT_TYPE: &str = "contract_type";
pub const PAYMENT_TYPE: &str = "payment_type";
pub const TENURE: &str = "tenure";
pub const MONTHLY_CHARGES: &str = "monthly_charges";

pub const EARLY_TENURE_CUTOFF: f64 = 24.0;
pub const MIN_EXPECTED_CELL_COUNT: f64 = 5.0;
pub const DEFAULT_BIN_COUNT: usize = 10;
pub const MAX_BAR_WIDTH: usize = 40;
