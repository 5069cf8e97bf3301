//! Feed parsing and normalization.
//!
//! The feed is not general CSV: exactly one fixed schema, comma-delimited,
//! with double-quote-quoted fields. Quoting is a plain toggle — a delimiter
//! inside quotes is literal, and there is no escape for an embedded quote
//! character. Unbalanced quotes degrade by treating the rest of the line as
//! quoted.

use crate::snapshot::FraudRecord;

const DELIMITER: char = ',';
const QUOTE: char = '"';

/// Splits one line into raw field strings.
///
/// Empty input yields a single empty field. Quote characters themselves are
/// not part of any field value.
#[must_use]
pub fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        if ch == QUOTE {
            in_quotes = !in_quotes;
        } else if ch == DELIMITER && !in_quotes {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }

    fields.push(current);
    fields
}

/// Canonicalizes a phone number for use as an index key.
///
/// Trims, then strips the leading `0` of an 11-character national-format
/// number so that `07123456789` and `7123456789` converge on one key. Any
/// other shape passes through unchanged. Idempotent: a 10-character result
/// is never re-stripped.
#[must_use]
pub fn normalize_phone(raw: &str) -> String {
    let phone = raw.trim();
    if phone.starts_with('0') && phone.chars().count() == 11 {
        let mut chars = phone.chars();
        chars.next();
        chars.as_str().to_owned()
    } else {
        phone.to_owned()
    }
}

/// Re-inflates a phone number for display, the inverse of
/// [`normalize_phone`]: a 10-character value gets its national `0` prefix
/// back, anything else displays as-is.
#[must_use]
pub fn display_phone(phone: &str) -> String {
    if phone.chars().count() == 10 {
        format!("0{phone}")
    } else {
        phone.to_owned()
    }
}

/// Parses a `customer_ids` cell into its tokens.
///
/// Brackets, newlines, and commas all become spaces, then the cell is split
/// on whitespace with empty tokens discarded. Order and duplicates are
/// preserved.
#[must_use]
pub fn parse_customer_ids(cell: &str) -> Vec<String> {
    cell.chars()
        .map(|c| match c {
            '[' | ']' | '\n' | ',' => ' ',
            other => other,
        })
        .collect::<String>()
        .split_whitespace()
        .map(ToOwned::to_owned)
        .collect()
}

/// Positional mapping from the schema's named columns to field indexes,
/// built once from the header line. Column names are exact and
/// case-sensitive; a missing column reads as an empty string on every row.
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    phone: Option<usize>,
    state: Option<usize>,
    city: Option<usize>,
    zone: Option<usize>,
    distinct_customers: Option<usize>,
    customer_ids: Option<usize>,
}

impl ColumnMap {
    fn from_header(header: &[String]) -> Self {
        let find = |name: &str| header.iter().position(|h| h.trim() == name);
        Self {
            phone: find("Phone"),
            state: find("State"),
            city: find("City"),
            zone: find("Zone"),
            distinct_customers: find("distinct_customers"),
            customer_ids: find("customer_ids"),
        }
    }

    fn get<'a>(fields: &'a [String], column: Option<usize>) -> &'a str {
        column
            .and_then(|i| fields.get(i))
            .map_or("", |s| s.trim())
    }
}

/// Parses the whole feed body (header line + data lines) into records.
///
/// Lines that are blank after trimming contribute nothing. Rows whose phone
/// normalizes to an empty string are dropped — they could never be found by
/// a lookup. Phones are stored normalized so feed values and queries meet
/// on the same key.
#[must_use]
pub fn parse_feed(text: &str) -> Vec<FraudRecord> {
    let mut lines = text.split('\n');
    let Some(header_line) = lines.next() else {
        return Vec::new();
    };
    let columns = ColumnMap::from_header(&split_line(header_line));

    let mut records = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_line(line);

        let phone = normalize_phone(ColumnMap::get(&fields, columns.phone));
        if phone.is_empty() {
            tracing::debug!("skipping feed row without a phone number");
            continue;
        }

        records.push(FraudRecord {
            phone,
            state: ColumnMap::get(&fields, columns.state).to_owned(),
            city: ColumnMap::get(&fields, columns.city).to_owned(),
            zone: ColumnMap::get(&fields, columns.zone).to_owned(),
            distinct_customers: ColumnMap::get(&fields, columns.distinct_customers).to_owned(),
            customer_ids: parse_customer_ids(ColumnMap::get(&fields, columns.customer_ids)),
        });
    }
    records
}
