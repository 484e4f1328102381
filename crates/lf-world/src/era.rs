//! Founding-era parsing.

/// Era used when none is given.
pub const DEFAULT_ERA: &str = "1980s";
/// Year assumed when an era has no digits.
pub const DEFAULT_YEAR: i64 = 2000;
/// Years between renames.
pub const YEARS_PER_RENAME: i64 = 30;
/// Most renames an institution accumulates.
pub const MAX_RENAMES: i64 = 3;

/// The first run of digits in `era`, e.g. 1920 for `1920s`.
pub fn era_year(era: &str) -> Option<i64> {
    era.split(|c: char| !c.is_ascii_digit())
        .find(|run| !run.is_empty())
        .and_then(|run| run.parse().ok())
}

/// The naming-pattern bucket for `era`.
pub fn era_bucket(era: &str) -> &'static str {
    let year = era_year(era).unwrap_or(DEFAULT_YEAR);
    match year {
        y if y < 1900 => "pre-1900",
        y if y < 1950 => "1900-1950",
        y if y < 1970 => "pre-1970",
        y if y < 1980 => "1950-1980",
        y if y < 1990 => "1970-1990",
        y if y < 2000 => "1980-2000",
        y if y < 2010 => "1990-2010",
        _ => "2000-present",
    }
}

/// How many times an institution founded in `era` has been renamed by `reference_year`.
///
/// Eras without digits and eras in the future have none.
pub fn rename_steps(era: &str, reference_year: i32) -> usize {
    let Some(year) = era_year(era) else {
        return 0;
    };
    let steps = (i64::from(reference_year) - year).div_euclid(YEARS_PER_RENAME);
    usize::try_from(steps.clamp(0, MAX_RENAMES)).unwrap_or(0)
}

/// `era` moved by `years`, as a bare year. Eras without digits are unchanged.
pub fn shift_era(era: &str, years: i64) -> String {
    era_year(era).map_or_else(|| era.to_string(), |y| (y + years).to_string())
}
