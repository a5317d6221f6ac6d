use crate::models::{MeasurementToken, ReconciliationReport, VerificationResult};
use indexmap::IndexSet;
use serde::Serialize;
use std::io;

/// 校验报告: 每条结果一行
pub fn render_verification(results: &[VerificationResult]) -> String {
    results
        .iter()
        .map(|r| r.message.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// 对账报告 (两行: 已匹配 / 缺失)
pub fn render_reconciliation(report: &ReconciliationReport) -> String {
    format!(
        "Matched ({}): {}\nMissing ({}): {}",
        report.matched.len(),
        join_tokens(&report.matched),
        report.missing.len(),
        join_tokens(&report.missing)
    )
}

fn join_tokens(tokens: &IndexSet<MeasurementToken>) -> String {
    tokens
        .iter()
        .map(MeasurementToken::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

const CSV_HEADER: [&str; 6] = ["claim", "base", "count", "expected", "calculated", "verified"];

#[derive(Serialize)]
struct VerificationRow<'a> {
    claim: &'a str,
    base: String,
    count: u64,
    expected: String,
    calculated: String,
    verified: bool,
}

/// 导出校验结果为 CSV (始终写表头)
pub fn write_verification_csv<W: io::Write>(
    writer: W,
    results: &[VerificationResult],
) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(CSV_HEADER)?;
    for r in results {
        wtr.serialize(VerificationRow {
            claim: &r.claim.text,
            base: r.claim.base.to_string(),
            count: r.claim.count,
            expected: r.claim.expected.to_string(),
            calculated: r.calculated.to_string(),
            verified: r.is_verified(),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn verification_csv(results: &[VerificationResult]) -> Result<String, csv::Error> {
    let mut buf = Vec::new();
    write_verification_csv(&mut buf, results)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
