use crate::models::{MeasurementToken, ReconciliationReport};
use crate::service::tokenizer::extract_measurement_tokens;
use std::collections::HashSet;

/// 索引表尺寸与图纸文本对账
///
/// 精确字符串比较, 不做单位/小数归一化; 调用方需要预先统一格式。
pub fn reconcile<S: AsRef<str>>(authoritative: &[S], diagram_text: &str) -> ReconciliationReport {
    let extracted: HashSet<&str> = extract_measurement_tokens(diagram_text).collect();

    let mut report = ReconciliationReport::default();
    for value in authoritative {
        let value = value.as_ref();
        if extracted.contains(value) {
            report.matched.insert(MeasurementToken::from(value));
        } else {
            report.missing.insert(MeasurementToken::from(value));
        }
    }
    report
}
