use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::Date;

const DATE_INPUT_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");
const DATE_DISPLAY_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[month repr:short] [day padding:none], [year]");

/// Parse a due date from the API. Timestamps keep the calendar date as written
/// (the part before `T`); no offset conversion is applied.
pub fn parse_api_date(raw: &str) -> Option<Date> {
    let date_part = raw.trim().split('T').next()?;
    Date::parse(date_part, DATE_INPUT_FORMAT).ok()
}

/// Parse user input from a date-only field (`YYYY-MM-DD`).
pub fn parse_date_input(raw: &str) -> Option<Date> {
    Date::parse(raw.trim(), DATE_INPUT_FORMAT).ok()
}

/// `YYYY-MM-DD`, the format the edit buffer and the API use.
pub fn format_date_input(date: Date) -> String {
    date.format(DATE_INPUT_FORMAT).unwrap_or_else(|_| {
        format!(
            "{:04}-{:02}-{:02}",
            date.year(),
            date.month() as u8,
            date.day()
        )
    })
}

/// Short calendar form for list rows, e.g. "Jan 1, 2024".
pub fn format_due_date(date: Date) -> String {
    date.format(DATE_DISPLAY_FORMAT)
        .unwrap_or_else(|_| format_date_input(date))
}

pub mod due_date {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use time::Date;

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_date_input(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_api_date(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid due date: {raw:?}")))
    }
}
