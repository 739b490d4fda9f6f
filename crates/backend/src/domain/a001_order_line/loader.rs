use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use contracts::domain::a001_order_line::{OrderLineRecord, REQUIRED_COLUMNS};
use contracts::shared::date_range::DateBounds;
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use super::error::DataLoadError;

const TIMESTAMP_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Загруженная таблица, отсортированная по `order_approved_at`
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub source: String,
    pub records: Vec<OrderLineRecord>,
}

impl Dataset {
    /// Wrap already-parsed records; rows are sorted ascending by approval
    /// timestamp, rows without one go last
    pub fn new(source: impl Into<String>, mut records: Vec<OrderLineRecord>) -> Self {
        records.sort_by(|a, b| compare_approved(&a.order_approved_at, &b.order_approved_at));
        Self {
            source: source.into(),
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn bounds(&self) -> DateBounds {
        let mut approved = self.records.iter().filter_map(|r| r.order_approved_at);
        let Some(first) = approved.next() else {
            return DateBounds::default();
        };
        let (min, max) = approved.fold((first, first), |(min, max), ts| (min.min(ts), max.max(ts)));
        DateBounds {
            min: Some(min.date()),
            max: Some(max.date()),
        }
    }
}

fn compare_approved(a: &Option<NaiveDateTime>, b: &Option<NaiveDateTime>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub fn load_from_path(path: &Path) -> Result<Dataset, DataLoadError> {
    let source = path.display().to_string();
    if !path.exists() {
        return Err(DataLoadError::NotFound(source));
    }

    let file = std::fs::File::open(path).map_err(|e| DataLoadError::Io {
        path: source.clone(),
        source: e,
    })?;

    load_from_reader(file, &source)
}

pub fn load_from_reader<R: Read>(reader: R, source: &str) -> Result<Dataset, DataLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let columns: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.trim_start_matches('\u{FEFF}').trim().to_string(), idx))
        .collect();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|name| !columns.contains_key(**name))
        .map(|name| name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DataLoadError::MissingColumns(missing));
    }

    tracing::debug!(
        "Dataset headers: {:?}",
        headers.iter().collect::<Vec<_>>()
    );

    let mut records = Vec::new();
    let mut unparsed_timestamps = 0usize;

    for (index, result) in reader.records().enumerate() {
        let record = result?;
        let row = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(index + 2);

        let field = |name: &str| cell(&record, &columns, name);
        let invalid = |column: &str, value: &str| DataLoadError::InvalidValue {
            row,
            column: column.to_string(),
            value: value.to_string(),
        };

        let order_item_raw = field("order_item_id");
        let order_item_id = if order_item_raw.is_empty() {
            None
        } else {
            Some(parse_integer(order_item_raw).ok_or_else(|| invalid("order_item_id", order_item_raw))?)
        };

        let payment_raw = field("payment_value");
        let payment_value = if payment_raw.is_empty() {
            None
        } else {
            Some(parse_decimal(payment_raw).ok_or_else(|| invalid("payment_value", payment_raw))?)
        };

        let review_raw = field("review_score");
        let review_score = if review_raw.is_empty() {
            None
        } else {
            Some(
                review_raw
                    .parse::<f64>()
                    .map_err(|_| invalid("review_score", review_raw))?,
            )
        };

        let mut timestamp = |name: &str| -> Option<NaiveDateTime> {
            let raw = field(name);
            if raw.is_empty() {
                return None;
            }
            let parsed = parse_timestamp(raw);
            if parsed.is_none() {
                unparsed_timestamps += 1;
            }
            parsed
        };
        let order_approved_at = timestamp("order_approved_at");
        let order_delivered_customer_date = timestamp("order_delivered_customer_date");

        let category = field("product_category_name");

        records.push(OrderLineRecord {
            order_id: field("order_id").to_string(),
            order_item_id,
            seller_id: field("seller_id").to_string(),
            customer_id: field("customer_id").to_string(),
            product_category_name: (!category.is_empty()).then(|| category.to_string()),
            customer_state: field("customer_state").to_string(),
            seller_state: field("seller_state").to_string(),
            payment_value,
            review_score,
            order_approved_at,
            order_delivered_customer_date,
        });
    }

    if unparsed_timestamps > 0 {
        tracing::warn!(
            "{}: {} timestamp values could not be parsed and were treated as missing",
            source,
            unparsed_timestamps
        );
    }

    let dataset = Dataset::new(source, records);
    tracing::info!("Loaded {} order lines from {}", dataset.len(), source);
    Ok(dataset)
}

/// Field by header name, empty string when the row is short
fn cell<'r>(record: &'r csv::StringRecord, columns: &HashMap<String, usize>, name: &str) -> &'r str {
    columns
        .get(name)
        .and_then(|idx| record.get(*idx))
        .map(str::trim)
        .unwrap_or("")
}

/// Parse a timestamp cell; `None` for anything unrecognised
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN))
        })
}

/// Integers may come written as floats ("2.0") by spreadsheet exports
fn parse_integer(raw: &str) -> Option<i64> {
    if let Ok(value) = raw.parse::<i64>() {
        return Some(value);
    }
    let value = raw.parse::<f64>().ok()?;
    (value.is_finite() && value.fract() == 0.0).then_some(value as i64)
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}
