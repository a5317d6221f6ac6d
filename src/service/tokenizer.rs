use regex::Regex;
use std::sync::OnceLock;

/// 数值 + 可选空格 + 单位 (mm | cm | m | in)
const MEASUREMENT_PATTERN: &str = r"\d+\.?\d*\s?(?:mm|cm|m|in)";

fn measurement_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(MEASUREMENT_PATTERN).expect("measurement pattern compiles"))
}

/// 从文本中提取所有尺寸标记 (整段匹配, 含可选空格)
///
/// 惰性迭代, 按出现顺序返回, 不去重; 再次调用即可重新遍历。
pub fn extract_measurement_tokens(text: &str) -> impl Iterator<Item = &str> + '_ {
    measurement_regex().find_iter(text).map(|m| m.as_str())
}
