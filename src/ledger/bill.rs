/// Sentinel written in the frequency column of non-recurring bills.
pub const NO_FREQUENCY: &str = "null";

const FIELD_COUNT: usize = 5;

/// One bill as entered during a session or parsed from a persisted file.
///
/// Records are immutable once constructed; a session only appends new
/// ones. `date` is an opaque timestamp string and is never interpreted
/// beyond round-tripping through the CSV form.
#[derive(Debug, Clone, PartialEq)]
pub struct Bill {
    pub date: String,
    pub name: String,
    pub cost: f64,
    pub recurring: bool,
    pub frequency: String,
}

impl Bill {
    pub fn new(
        date: impl Into<String>,
        name: impl Into<String>,
        cost: f64,
        recurring: bool,
        frequency: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            name: name.into(),
            cost,
            recurring,
            frequency: frequency.into(),
        }
    }

    /// Renders the record as one CSV line in the fixed column order
    /// `date,name,cost,recurring,frequency`.
    ///
    /// `cost` uses `f64`'s default textual form so a reloaded file sees
    /// the exact value that was written, independent of the 2-decimal
    /// formatting applied only in the session summary. Embedded commas
    /// in `date` or `name` are not escaped and corrupt column alignment
    /// on the next load; the shell rejects such names at entry time.
    pub fn to_csv_line(&self) -> String {
        format!(
            "{},{},{},{},{}",
            self.date, self.name, self.cost, self.recurring, self.frequency
        )
    }

    /// Parses one CSV line back into a record.
    ///
    /// Returns `None` for lines with fewer than five fields or an
    /// unparseable cost; the loader drops those lines instead of
    /// failing the whole file. The recurring flag parses permissively:
    /// anything other than a case-insensitive `true` reads as `false`,
    /// which keeps historically written files loadable. `frequency` is
    /// taken verbatim; token recognition happens at totals time.
    pub fn from_csv_line(line: &str) -> Option<Self> {
        let parts: Vec<&str> = line.split(',').collect();
        if parts.len() < FIELD_COUNT {
            return None;
        }
        let cost: f64 = parts[2].trim().parse().ok()?;
        let recurring = parts[3].trim().eq_ignore_ascii_case("true");
        Some(Self {
            date: parts[0].to_string(),
            name: parts[1].to_string(),
            cost,
            recurring,
            frequency: parts[4].to_string(),
        })
    }

    /// The recognized cadence of this bill's frequency token, if any.
    pub fn cadence(&self) -> Option<Frequency> {
        Frequency::match_token(&self.frequency)
    }
}

/// Recurring cadences recognized when folding bill totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Monthly,
    Yearly,
}

impl Frequency {
    /// Case-insensitive token match: `monthly`/`m` and `yearly`/`y`.
    pub fn match_token(token: &str) -> Option<Self> {
        let token = token.trim();
        if token.eq_ignore_ascii_case("monthly") || token.eq_ignore_ascii_case("m") {
            Some(Frequency::Monthly)
        } else if token.eq_ignore_ascii_case("yearly") || token.eq_ignore_ascii_case("y") {
            Some(Frequency::Yearly)
        } else {
            None
        }
    }

    pub fn as_token(&self) -> &'static str {
        match self {
            Frequency::Monthly => "monthly",
            Frequency::Yearly => "yearly",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_line_roundtrip_preserves_all_fields() {
        let bill = Bill::new("2025-03-14T09:26:53.589", "Rent", 1250.5, true, "monthly");
        let parsed = Bill::from_csv_line(&bill.to_csv_line()).expect("parse own output");
        assert_eq!(parsed, bill);
    }

    #[test]
    fn non_recurring_sentinel_roundtrips() {
        let bill = Bill::new("2025-03-14T09:26:53.589", "Tires", 412.0, false, NO_FREQUENCY);
        let parsed = Bill::from_csv_line(&bill.to_csv_line()).expect("parse own output");
        assert_eq!(parsed, bill);
        assert_eq!(parsed.cadence(), None);
    }

    #[test]
    fn short_line_is_rejected() {
        assert_eq!(Bill::from_csv_line("2025-01-01,Rent,100"), None);
    }

    #[test]
    fn unparseable_cost_is_rejected() {
        assert_eq!(Bill::from_csv_line("2025-01-01,Rent,abc,true,monthly"), None);
    }

    #[test]
    fn recurring_flag_parses_permissively() {
        let explicit = Bill::from_csv_line("d,Rent,10,TRUE,monthly").expect("parse");
        assert!(explicit.recurring);

        // Anything that is not "true" reads as false, garbage included.
        let garbage = Bill::from_csv_line("d,Rent,10,maybe,monthly").expect("parse");
        assert!(!garbage.recurring);
    }

    #[test]
    fn frequency_tokens_match_case_insensitively() {
        assert_eq!(Frequency::match_token("Monthly"), Some(Frequency::Monthly));
        assert_eq!(Frequency::match_token("m"), Some(Frequency::Monthly));
        assert_eq!(Frequency::match_token("YEARLY"), Some(Frequency::Yearly));
        assert_eq!(Frequency::match_token("y"), Some(Frequency::Yearly));
        assert_eq!(Frequency::match_token("weekly"), None);
        assert_eq!(Frequency::match_token("null"), None);
    }
}
