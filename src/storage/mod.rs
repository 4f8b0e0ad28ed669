//! CSV-backed persistence for bill ledgers plus the dated backup-name
//! scheme used when a session saves.

use std::{
    fs::{self, File},
    io::{BufRead, BufReader, Write},
    path::{Path, PathBuf},
};

use chrono::NaiveDate;

use crate::{
    errors::{PlannerError, Result},
    ledger::Bill,
};

pub const CSV_HEADER: &str = "Date,BillName,Cost,Recurring,Frequency";

const HEADER_PREFIX: &str = "Date,";
const BACKUP_DATE_FORMAT: &str = "%m-%d-%y";
const CSV_EXTENSION: &str = "csv";

/// Reads every well-formed bill line from `path`.
///
/// A leading line starting with `Date,` is skipped as the column
/// header; files written without one load identically. Lines that do
/// not parse as a bill are dropped. An unreadable file is a typed
/// error; the shell warns and continues with an empty ledger rather
/// than aborting.
pub fn load_bills(path: &Path) -> Result<Vec<Bill>> {
    let file = File::open(path).map_err(|err| {
        PlannerError::Storage(format!("cannot open `{}`: {}", path.display(), err))
    })?;
    let reader = BufReader::new(file);
    let mut bills = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if index == 0 && line.starts_with(HEADER_PREFIX) {
            continue;
        }
        if let Some(bill) = Bill::from_csv_line(&line) {
            bills.push(bill);
        }
    }
    tracing::debug!(count = bills.len(), path = %path.display(), "loaded bills");
    Ok(bills)
}

/// Writes the header plus one line per bill, replacing any existing
/// file at `path` unconditionally.
pub fn save_bills(bills: &[Bill], path: &Path) -> Result<()> {
    let mut file = File::create(path).map_err(|err| {
        PlannerError::Storage(format!("cannot write `{}`: {}", path.display(), err))
    })?;
    writeln!(file, "{}", CSV_HEADER)?;
    for bill in bills {
        writeln!(file, "{}", bill.to_csv_line())?;
    }
    file.flush()?;
    tracing::debug!(count = bills.len(), path = %path.display(), "saved bills");
    Ok(())
}

/// Derives the dated backup file name for `today`.
///
/// The base candidate is `MM-dd-yy.csv`. When `overwrite` is false and
/// the probe reports the candidate taken, `_v2`, `_v3`, ... suffixes
/// are tried until a free name turns up. With `overwrite` set (a
/// session that started from an existing file) the base name comes
/// back as-is so today's file is replaced in place. Pure in `today`
/// and the probe; the version counter is unbounded.
pub fn derive_backup_filename<P>(today: NaiveDate, overwrite: bool, mut taken: P) -> String
where
    P: FnMut(&str) -> bool,
{
    let base = today.format(BACKUP_DATE_FORMAT).to_string();
    let candidate = format!("{}.{}", base, CSV_EXTENSION);
    if overwrite || !taken(&candidate) {
        return candidate;
    }
    let mut version = 2;
    loop {
        let candidate = format!("{}_v{}.{}", base, version, CSV_EXTENSION);
        if !taken(&candidate) {
            return candidate;
        }
        version += 1;
    }
}

/// Filesystem-probing wrapper around [`derive_backup_filename`] rooted
/// at `dir`.
pub fn next_backup_path(dir: &Path, today: NaiveDate, overwrite: bool) -> PathBuf {
    let name = derive_backup_filename(today, overwrite, |candidate| dir.join(candidate).exists());
    dir.join(name)
}

/// Candidate `.csv` files offered by the load menu, name-sorted for a
/// stable listing.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case(CSV_EXTENSION) => files.push(path),
            _ => continue,
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn march_14() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid date")
    }

    #[test]
    fn backup_name_uses_base_when_free() {
        let name = derive_backup_filename(march_14(), false, |_| false);
        assert_eq!(name, "03-14-25.csv");
    }

    #[test]
    fn backup_name_probes_versions_on_collision() {
        let existing = ["03-14-25.csv"];
        let name = derive_backup_filename(march_14(), false, |c| existing.contains(&c));
        assert_eq!(name, "03-14-25_v2.csv");

        let existing = ["03-14-25.csv", "03-14-25_v2.csv"];
        let name = derive_backup_filename(march_14(), false, |c| existing.contains(&c));
        assert_eq!(name, "03-14-25_v3.csv");
    }

    #[test]
    fn backup_name_is_stable_for_a_fixed_probe() {
        let existing = ["03-14-25.csv"];
        let first = derive_backup_filename(march_14(), false, |c| existing.contains(&c));
        let second = derive_backup_filename(march_14(), false, |c| existing.contains(&c));
        assert_eq!(first, second);
    }

    #[test]
    fn overwrite_mode_skips_probing() {
        let name = derive_backup_filename(march_14(), true, |_| true);
        assert_eq!(name, "03-14-25.csv");
    }
}
