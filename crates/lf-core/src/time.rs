use chrono::{Datelike, Utc};

/// Today's UTC date as `YYYY-MM-DD`.
pub fn today() -> String {
    Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

/// The current UTC calendar year.
pub fn current_year() -> i32 {
    Utc::now().year()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn today_is_iso_date() {
        let date = today();
        assert_eq!(date.len(), 10);
        assert_eq!(&date[4..5], "-");
        assert_eq!(&date[7..8], "-");
        assert!(date[..4].parse::<i32>().is_ok());
    }

    #[test]
    fn year_matches_today() {
        assert_eq!(today()[..4].parse::<i32>().unwrap(), current_year());
    }
}
