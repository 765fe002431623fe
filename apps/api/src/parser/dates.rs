//! Date-range parsing for experience and education lines.
//!
//! Months are normalised to full English names (the form's month values);
//! `present`/`current` in any case becomes the `Present` sentinel.

use std::sync::LazyLock;

use regex::Regex;

pub const PRESENT: &str = "Present";

pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const MON: &str = r"(jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?";
const DASH: &str = r"\s*(?:-|–|—|\bto\b)\s*";

static MONTH_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    let end_mon = MON.replacen('(', "(?:", 1);
    Regex::new(&format!(
        r"(?i)\b{MON}\s+(\d{{4}}){DASH}(?:(?:({end_mon})\s+)?(\d{{4}})\b|(present|current)\b)"
    ))
    .expect("valid month range regex")
});

static YEAR_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)(?:^|[^/\d])(\d{{4}}){DASH}(?:(\d{{4}})\b|(present|current)\b)"
    ))
    .expect("valid year range regex")
});

static NUMERIC_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b(\d{{1,2}})/(\d{{4}}){DASH}(?:(\d{{1,2}})/(\d{{4}})\b|(present|current)\b)"
    ))
    .expect("valid numeric range regex")
});

static SINGLE_MONTH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b{MON}\s+(\d{{4}})\b")).expect("valid month regex")
});

static SINGLE_NUMERIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2})/(\d{4})\b").expect("valid numeric date regex"));

static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{4})\b").expect("valid year regex"));

static DATE_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b(?:{MON}\s+\d{{4}}|\d{{1,2}}/\d{{4}}|\d{{4}}|present\b|current\b)"
    ))
    .expect("valid date token regex")
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start_month: String,
    pub start_year: String,
    pub end_month: String,
    pub end_year: String,
}

/// True if the line contains a standalone 4-digit number.
pub fn has_year(line: &str) -> bool {
    YEAR_RE.is_match(line)
}

/// Byte offset of the first date-like token in the line.
pub fn date_token_start(line: &str) -> Option<usize> {
    DATE_TOKEN_RE.find(line).map(|m| m.start())
}

/// True if the line opens with a date-like token (`Jan 2020`, `03/2019`, `2018`, `Present`).
pub fn starts_with_date(line: &str) -> bool {
    date_token_start(line.trim_start()) == Some(0)
}

/// Parses the first date range in `text`. Alternatives in order of preference:
/// `Mon YYYY - Mon YYYY|Present`, `YYYY - YYYY|Present`, `MM/YYYY - MM/YYYY|Present`.
/// A lone date fills only the start.
pub fn parse_date_range(text: &str) -> DateRange {
    if let Some(caps) = MONTH_RANGE_RE.captures(text) {
        let present = caps.get(5).is_some();
        return DateRange {
            start_month: month_from_name(&caps[1]),
            start_year: caps[2].to_string(),
            end_month: caps.get(3).map(|m| month_from_name(m.as_str())).unwrap_or_default(),
            end_year: end_year(caps.get(4).map(|m| m.as_str()), present),
        };
    }

    if let Some(caps) = YEAR_RANGE_RE.captures(text) {
        return DateRange {
            start_year: caps[1].to_string(),
            end_year: end_year(caps.get(2).map(|m| m.as_str()), caps.get(3).is_some()),
            ..DateRange::default()
        };
    }

    if let Some(caps) = NUMERIC_RANGE_RE.captures(text) {
        return DateRange {
            start_month: month_from_number(&caps[1]),
            start_year: caps[2].to_string(),
            end_month: caps
                .get(3)
                .map(|m| month_from_number(m.as_str()))
                .unwrap_or_default(),
            end_year: end_year(caps.get(4).map(|m| m.as_str()), caps.get(5).is_some()),
        };
    }

    parse_single_date(text)
}

fn parse_single_date(text: &str) -> DateRange {
    if let Some(caps) = SINGLE_MONTH_RE.captures(text) {
        return DateRange {
            start_month: month_from_name(&caps[1]),
            start_year: caps[2].to_string(),
            ..DateRange::default()
        };
    }
    if let Some(caps) = SINGLE_NUMERIC_RE.captures(text) {
        return DateRange {
            start_month: month_from_number(&caps[1]),
            start_year: caps[2].to_string(),
            ..DateRange::default()
        };
    }
    YEAR_RE
        .captures(text)
        .map(|caps| DateRange {
            start_year: caps[1].to_string(),
            ..DateRange::default()
        })
        .unwrap_or_default()
}

fn end_year(year: Option<&str>, present: bool) -> String {
    match year {
        Some(y) => y.to_string(),
        None if present => PRESENT.to_string(),
        None => String::new(),
    }
}

/// `jan`, `Sept.`, `MARCH` → full month name.
pub fn month_from_name(token: &str) -> String {
    let prefix: String = token.chars().take(3).collect::<String>().to_lowercase();
    MONTHS
        .iter()
        .find(|m| m[..3].eq_ignore_ascii_case(&prefix))
        .map(|m| m.to_string())
        .unwrap_or_default()
}

/// `1`..`12` → full month name; anything else → empty.
pub fn month_from_number(token: &str) -> String {
    token
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=12).contains(n))
        .map(|n| MONTHS[n - 1].to_string())
        .unwrap_or_default()
}
