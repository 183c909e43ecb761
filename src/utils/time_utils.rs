use chrono::{Duration, NaiveDate, Utc};

/// The most recent fully closed calendar day, relative to now (UTC).
pub fn get_yesterday() -> NaiveDate {
    Utc::now().date_naive() - Duration::days(1)
}

/// True when `date` falls on the current UTC calendar day.
pub fn is_today(date: NaiveDate) -> bool {
    date == Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yesterday_precedes_today() {
        let yesterday = get_yesterday();
        assert!(yesterday < Utc::now().date_naive());
        assert_eq!(Utc::now().date_naive() - yesterday, Duration::days(1));
    }

    #[test]
    fn test_is_today() {
        assert!(is_today(Utc::now().date_naive()));
        assert!(!is_today(get_yesterday()));
    }
}
