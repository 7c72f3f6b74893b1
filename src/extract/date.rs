use crate::helpers::string::{normalize_spaces, to_title_case};
use crate::spreadsheet::grid::Grid;
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::fmt::Write;
use std::sync::LazyLock;

/// Day-month-year tokens such as "22-Jan-26" embedded in free text.
static DATE_TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d{1,2})-([a-z]{3})-(\d{2,4})\b").expect("Hardcode regex pattern"));

/// Finds the first date on a 1-based grid row and renders it with the first accepted format.
///
/// Candidates are tried in priority order:
/// 1. cells holding a typed date or date-time;
/// 2. text cells that, trimmed and with non-breaking spaces normalized,
///    parse exactly with one of `formats` (in order);
/// 3. unless `strict`, day-month-year tokens found inside any text cell,
///    with the month title-cased before parsing.
///
/// Formats use chrono `strftime` syntax. Returns None when nothing matches,
/// when `formats` is empty, or when the row does not exist.
pub fn extract_date<S>(grid: &Grid, row: usize, formats: &[S], strict: bool) -> Option<String>
where
    S: AsRef<str>,
{
    let cells = grid.row(row)?;
    let output_format = formats.first()?.as_ref();

    let typed = || cells.iter().find_map(|cell| cell.as_date());
    let exact = || {
        cells
            .iter()
            .filter_map(|cell| cell.as_text())
            .find_map(|text| parse_with_any(&normalize_spaces(text), formats))
    };
    let embedded = || {
        cells
            .iter()
            .filter_map(|cell| cell.as_text())
            .find_map(|text| find_embedded_date(text, formats))
    };

    let date = if strict {
        typed().or_else(exact)
    } else {
        typed().or_else(exact).or_else(embedded)
    }?;
    render(date, output_format)
}

/// Parses the text with the first format that accepts it.
///
/// chrono's `%Y` also reads short years ("26" as year 26), so a four-digit-year
/// format only accepts years from 1000 on and leaves short years to `%y`.
fn parse_with_any<S: AsRef<str>>(text: &str, formats: &[S]) -> Option<NaiveDate> {
    formats.iter().find_map(|format| {
        let format = format.as_ref();
        NaiveDate::parse_from_str(text, format)
            .ok()
            .filter(|date| !format.contains("%Y") || date.year() >= 1000)
    })
}

/// Scans free text for day-month-year tokens.
fn find_embedded_date<S: AsRef<str>>(text: &str, formats: &[S]) -> Option<NaiveDate> {
    let text = normalize_spaces(text);
    DATE_TOKEN_PATTERN.captures_iter(&text).find_map(|captures| {
        let token = format!("{}-{}-{}", &captures[1], to_title_case(&captures[2]), &captures[3]);
        parse_with_any(&token, formats)
    })
}

/// Renders without panicking on formats that cannot display a plain date.
fn render(date: NaiveDate, format: &str) -> Option<String> {
    let mut output = String::new();
    write!(output, "{}", date.format(format)).ok()?;
    Some(output)
}
