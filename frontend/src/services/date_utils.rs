use chrono::{Datelike, NaiveDate};

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January", 2 => "February", 3 => "March", 4 => "April",
        5 => "May", 6 => "June", 7 => "July", 8 => "August",
        9 => "September", 10 => "October", 11 => "November", 12 => "December",
        _ => "January",
    }
}

/// Today's local date, read from the browser clock
pub fn today() -> Option<NaiveDate> {
    use js_sys::Date;
    let now = Date::new_0();
    let year = now.get_full_year() as i32;
    let month = now.get_month() + 1; // JavaScript months are 0-indexed
    let day = now.get_date();
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse a YYYY-MM-DD date string
pub fn parse_date_string(date_str: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").ok()
}

/// Format a date for display (e.g., "January 15, 2025")
pub fn format_date_for_display(date: NaiveDate) -> String {
    format!("{} {}, {}", month_name(date.month()), date.day(), date.year())
}

/// "Week 12, Day 3" style label
pub fn format_week_day(week: u32, day: u32) -> String {
    if day == 0 {
        format!("Week {}", week)
    } else {
        format!("Week {}, Day {}", week, day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_format() {
        let date = parse_date_string("2025-06-27").unwrap();
        assert_eq!(format_date_for_display(date), "June 27, 2025");
        assert!(parse_date_string("2025-13-01").is_none());
        assert!(parse_date_string("not a date").is_none());
    }

    #[test]
    fn test_format_week_day() {
        assert_eq!(format_week_day(12, 0), "Week 12");
        assert_eq!(format_week_day(12, 3), "Week 12, Day 3");
    }
}
