use super::bill::{Bill, Frequency};

/// Ordered collection of bills for one session.
///
/// Append-only; insertion order is preserved for display and
/// persistence, though totals do not depend on it.
#[derive(Debug, Default, Clone)]
pub struct Ledger {
    bills: Vec<Bill>,
}

/// Aggregate monthly figures folded from a ledger. Recomputed from
/// scratch each session, never persisted.
#[derive(Debug, Default, Clone)]
pub struct BillTotals {
    pub recurring: f64,
    pub non_recurring: f64,
    /// Recurring bills whose frequency matched no recognized token.
    /// They contribute to neither total; the shell warns about each.
    pub excluded: Vec<Bill>,
}

impl BillTotals {
    pub fn monthly_total(&self) -> f64 {
        self.recurring + self.non_recurring
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bills(bills: Vec<Bill>) -> Self {
        Self { bills }
    }

    pub fn add(&mut self, bill: Bill) {
        self.bills.push(bill);
    }

    pub fn bills(&self) -> &[Bill] {
        &self.bills
    }

    pub fn len(&self) -> usize {
        self.bills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bills.is_empty()
    }

    /// Folds the ledger into recurring and non-recurring totals.
    ///
    /// Yearly costs are carried at face value alongside monthly ones
    /// rather than being spread across twelve months; both cadences
    /// land in the same recurring bucket.
    pub fn partition_totals(&self) -> BillTotals {
        let mut totals = BillTotals::default();
        for bill in &self.bills {
            if !bill.recurring {
                totals.non_recurring += bill.cost;
                continue;
            }
            match bill.cadence() {
                Some(Frequency::Monthly) | Some(Frequency::Yearly) => {
                    totals.recurring += bill.cost;
                }
                None => totals.excluded.push(bill.clone()),
            }
        }
        totals
    }
}
