//! Bill domain models and the per-session ledger.

pub mod bill;
#[allow(clippy::module_inception)]
pub mod ledger;

pub use bill::{Bill, Frequency, NO_FREQUENCY};
pub use ledger::{BillTotals, Ledger};
