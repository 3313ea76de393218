//! Tenure in fractional years.

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};

use payroll_core::{DomainError, DomainResult};

/// Years elapsed between `joining_date` and `on`.
///
/// Whole calendar years plus the elapsed fraction of the current anniversary
/// year, so the value is exactly `5.0` on the fifth anniversary and above it the
/// day after. Employees who joined on Feb 29 have their anniversary on Feb 28 in
/// non-leap years.
pub fn years_of_tenure(joining_date: NaiveDate, on: NaiveDate) -> DomainResult<f64> {
    if joining_date > on {
        return Err(DomainError::validation(format!(
            "joining date {joining_date} is after the evaluation date {on}"
        )));
    }

    let mut whole = u32::try_from(on.year() - joining_date.year())
        .map_err(|_| DomainError::invariant("negative year difference"))?;
    let mut last = anniversary(joining_date, whole)?;
    if last > on {
        whole -= 1;
        last = anniversary(joining_date, whole)?;
    }
    let next = anniversary(joining_date, whole + 1)?;

    let elapsed = (on - last).num_days() as f64;
    let span = (next - last).num_days() as f64;
    Ok(f64::from(whole) + elapsed / span)
}

/// [`years_of_tenure`] evaluated at an instant (UTC calendar date).
pub fn years_of_tenure_at(joining_date: NaiveDate, at: DateTime<Utc>) -> DomainResult<f64> {
    years_of_tenure(joining_date, at.date_naive())
}

fn anniversary(joining_date: NaiveDate, years: u32) -> DomainResult<NaiveDate> {
    years
        .checked_mul(12)
        .and_then(|months| joining_date.checked_add_months(Months::new(months)))
        .ok_or_else(|| DomainError::validation(format!("joining date {joining_date} is out of range")))
}
