use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Divisor for simple interest with a percentage rate on a 365-day year
pub const INTEREST_DIVISOR: Decimal = dec!(36500);

/// Decimal places kept on accrued interest (whole currency units)
pub const INTEREST_DECIMAL_PLACES: u32 = 0;

/// Number of periods on a reconciliation worksheet
pub const RECONCILIATION_PERIOD_COUNT: usize = 12;

/// Canonical worksheet periods, in financial-year order (April to March)
pub const FINANCIAL_YEAR_PERIODS: [&str; RECONCILIATION_PERIOD_COUNT] = [
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
    "January",
    "February",
    "March",
];

/// Audit entity type used for notice-level events
pub const AUDIT_ENTITY_NOTICE: &str = "notice";

/// Audit entity id for events that span every notice
pub const AUDIT_ENTITY_ALL: &str = "*";

/// Audit action recorded after a bulk interest recompute
pub const AUDIT_ACTION_BULK_INTEREST_RECOMPUTE: &str = "BULK_INTEREST_RECOMPUTE";

/// Length of a GSTIN
pub const GSTIN_LENGTH: usize = 15;
