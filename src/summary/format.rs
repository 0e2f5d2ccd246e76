//! Fixed numeric formatting for summary cells
//!
//! Absent values render as `-`.

const ABSENT: &str = "-";

/// Latency with two decimals and a unit: `1.20ms`.
#[must_use]
pub fn format_latency(ms: Option<f64>) -> String {
    ms.map_or_else(|| ABSENT.to_string(), |v| format!("{v:.2}ms"))
}

/// Throughput truncated to an integer with thousands separators: `12,345`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn format_qps(qps: Option<f64>) -> String {
    qps.map_or_else(|| ABSENT.to_string(), |v| group_thousands(v.trunc() as i64))
}

/// Recall fraction as a percentage with one decimal: `82.0%`.
#[must_use]
pub fn format_recall(recall: Option<f64>) -> String {
    recall.map_or_else(|| ABSENT.to_string(), |v| format!("{:.1}%", v * 100.0))
}

/// Insert `,` every three digits.
#[must_use]
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
