use crate::error::VerifyError;
use crate::models::{ExpressionClaim, Verdict, VerificationResult};
use bigdecimal::BigDecimal;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::str::FromStr;
use std::sync::OnceLock;

/// `<base>P x <count> = <expected>`, x 与 = 两侧空白可选
const EXPRESSION_PATTERN: &str = r"(\d+\.?\d*)P\s*x\s*(\d+)\s*=\s*(\d+\.?\d*)";

/// 结果保留的小数位
const ROUND_DIGITS: i64 = 1;

fn expression_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(EXPRESSION_PATTERN).expect("expression pattern compiles"))
}

fn digit_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\A\d\z").expect("digit pattern compiles"))
}

/// 允许误差 0.1
fn tolerance() -> BigDecimal {
    BigDecimal::new(1.into(), 1)
}

/// 校验文本中所有 `base P x count = expected` 公式
///
/// 按出现顺序逐条返回结果; 没有公式时返回空列表。
/// 任何一条解析失败都会使整个调用返回错误。
pub fn verify(text: &str) -> Result<Vec<VerificationResult>, VerifyError> {
    expression_regex()
        .captures_iter(text)
        .map(|caps| parse_claim(&caps).map(check_claim))
        .collect()
}

fn parse_claim(caps: &Captures<'_>) -> Result<ExpressionClaim, VerifyError> {
    let claim = caps[0].to_string();

    let base = parse_decimal("base", &caps[1], &claim)?;
    let count = ascii_digits(&caps[2])
        .parse::<u64>()
        .map_err(|_| VerifyError::Parse {
            field: "count",
            value: caps[2].to_string(),
            claim: claim.clone(),
        })?;
    let expected = parse_decimal("expected", &caps[3], &claim)?;

    Ok(ExpressionClaim {
        text: claim,
        base,
        count,
        expected,
    })
}

fn parse_decimal(field: &'static str, value: &str, claim: &str) -> Result<BigDecimal, VerifyError> {
    let digits = ascii_digits(value);
    BigDecimal::from_str(digits.trim_end_matches('.')).map_err(|_| VerifyError::Parse {
        field,
        value: value.to_string(),
        claim: claim.to_string(),
    })
}

/// 正则 `\d` 匹配任意 Unicode 十进制数字 (全角、阿拉伯-印度数字等), 统一转成 ASCII
fn ascii_digits(value: &str) -> Cow<'_, str> {
    if value.is_ascii() {
        return Cow::Borrowed(value);
    }
    Cow::Owned(
        value
            .chars()
            .map(|c| {
                if c.is_ascii() {
                    c
                } else {
                    char::from_digit(unicode_digit_value(c), 10).unwrap_or(c)
                }
            })
            .collect(),
    )
}

/// Unicode 十进制数字按 0-9 连续编码: 向前数连续数字的个数, 取模 10 即数值
fn unicode_digit_value(c: char) -> u32 {
    let mut buf = [0u8; 4];
    let mut steps = 0;
    let mut cp = c as u32;
    while let Some(prev) = cp.checked_sub(1).and_then(char::from_u32) {
        if !digit_regex().is_match(prev.encode_utf8(&mut buf)) {
            break;
        }
        steps += 1;
        cp -= 1;
    }
    steps % 10
}

/// 计算 round(base * count, 1) 并与 expected 比较 (四舍五入, 精确十进制)
pub fn check_claim(claim: ExpressionClaim) -> VerificationResult {
    let calculated = (&claim.base * &BigDecimal::from(claim.count))
        .round(ROUND_DIGITS)
        .with_scale(ROUND_DIGITS);

    let verdict = if (&calculated - &claim.expected).abs() <= tolerance() {
        Verdict::Verified
    } else {
        Verdict::Mismatch
    };

    let message = format!(
        "{} {}: {} (calculated {})",
        verdict.marker(),
        verdict.label(),
        claim.text,
        calculated
    );

    VerificationResult {
        claim,
        calculated,
        verdict,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn verifies_matching_claim() {
        let results = verify("101.6P x 24 = 2438.4").unwrap();
        assert_eq!(results.len(), 1);
        let r = &results[0];
        assert_eq!(r.calculated, dec("2438.4"));
        assert!(r.is_verified());
        assert_eq!(r.claim.count, 24);
        assert_eq!(r.message, "✔ Verified: 101.6P x 24 = 2438.4 (calculated 2438.4)");
    }

    #[test]
    fn flags_mismatch() {
        let results = verify("101.6P x 24 = 2000").unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].calculated, dec("2438.4"));
        assert_eq!(results[0].verdict, Verdict::Mismatch);
        assert_eq!(
            results[0].message,
            "✘ Mismatch: 101.6P x 24 = 2000 (calculated 2438.4)"
        );
    }

    #[test]
    fn no_claims_yields_empty() {
        assert!(verify("no formulas here").unwrap().is_empty());
        assert!(verify("").unwrap().is_empty());
    }

    #[test]
    fn flexible_whitespace() {
        let results = verify("50P x12=600 and 50P   x   12   =   600.0").unwrap();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.is_verified()));
        assert_eq!(results[0].claim.text, "50P x12=600");
    }

    #[test]
    fn results_follow_text_order() {
        let text = "A: 10P x 3 = 30\nB: 2.5P x 4 = 11\nC: 7P x 7 = 49";
        let results = verify(text).unwrap();
        let claims: Vec<_> = results.iter().map(|r| r.claim.text.as_str()).collect();
        assert_eq!(claims, vec!["10P x 3 = 30", "2.5P x 4 = 11", "7P x 7 = 49"]);
        let verdicts: Vec<_> = results.iter().map(|r| r.verdict).collect();
        assert_eq!(
            verdicts,
            vec![Verdict::Verified, Verdict::Mismatch, Verdict::Verified]
        );
    }

    #[test]
    fn tolerance_boundary_is_inclusive() {
        assert!(verify("101.6P x 24 = 2438.3").unwrap()[0].is_verified());
        assert!(verify("101.6P x 24 = 2438.5").unwrap()[0].is_verified());
        assert!(!verify("101.6P x 24 = 2438.2").unwrap()[0].is_verified());
        assert!(!verify("101.6P x 24 = 2438.51").unwrap()[0].is_verified());
    }

    #[test]
    fn rounds_half_up_to_one_decimal() {
        // 2.25 * 1 = 2.25 -> 2.3
        let r = &verify("2.25P x 1 = 2.3").unwrap()[0];
        assert_eq!(r.calculated, dec("2.3"));
        // 0.333 * 3 = 0.999 -> 1.0
        let r = &verify("0.333P x 3 = 1").unwrap()[0];
        assert_eq!(r.calculated, dec("1.0"));
        assert!(r.is_verified());
    }

    #[test]
    fn lowercase_p_is_not_a_claim() {
        assert!(verify("101.6p x 24 = 2438.4").unwrap().is_empty());
    }

    #[test]
    fn overflowing_count_is_a_parse_fault() {
        let err = verify("1P x 99999999999999999999999 = 1").unwrap_err();
        match err {
            VerifyError::Parse { field, .. } => assert_eq!(field, "count"),
        }
    }

    #[test]
    fn unicode_digits_are_parsed() {
        let results = verify("ROW 1 101.6P x 24 = 2438.4\nROW 2 １２P x 2 = 24").unwrap();
        assert_eq!(results.len(), 2);
        let r = &results[1];
        assert_eq!(r.claim.base, dec("12"));
        assert_eq!(r.claim.count, 2);
        assert_eq!(r.calculated, dec("24.0"));
        assert!(r.is_verified());
        assert_eq!(r.message, "✔ Verified: １２P x 2 = 24 (calculated 24.0)");

        // 阿拉伯-印度数字
        let r = &verify("١٢.٥P x ٢ = ٢٥").unwrap()[0];
        assert_eq!(r.claim.base, dec("12.5"));
        assert_eq!(r.claim.expected, dec("25"));
        assert!(r.is_verified());

        // 数学双线体数字紧跟在粗体数字之后, 数值取模 10
        let r = &verify("𝟚P x 𝟛 = 𝟞").unwrap()[0];
        assert_eq!(r.claim.base, dec("2"));
        assert_eq!(r.claim.count, 3);
        assert!(r.is_verified());
    }

    #[test]
    fn message_keeps_claim_as_printed() {
        let r = &verify("007P x 2 = 14.").unwrap()[0];
        assert_eq!(r.claim.expected, dec("14"));
        assert_eq!(r.message, "✔ Verified: 007P x 2 = 14. (calculated 14.0)");

        let r = &verify("50P x12=601").unwrap()[0];
        assert_eq!(r.message, "✘ Mismatch: 50P x12=601 (calculated 600.0)");
    }

    #[test]
    fn verify_is_idempotent() {
        let text = "3.3P x 3 = 9.9, 4P x 4 = 15";
        assert_eq!(verify(text).unwrap(), verify(text).unwrap());
    }

    #[test]
    fn exact_products_always_verify() {
        for (base, count) in [("0.1", 3u64), ("12.7", 8), ("999.9", 1000), ("1", 0)] {
            let expected = (dec(base) * BigDecimal::from(count)).round(1);
            let text = format!("{base}P x {count} = {expected}");
            let results = verify(&text).unwrap();
            assert!(results[0].is_verified(), "{text}");
        }
    }
}
