use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// 公式声明: `<base>P x <count> = <expected>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpressionClaim {
    /// 原文中匹配到的子串
    pub text: String,
    pub base: BigDecimal,
    pub count: u64,
    pub expected: BigDecimal,
}

/// 校验结论
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Verified,
    Mismatch,
}

impl Verdict {
    pub fn marker(self) -> &'static str {
        match self {
            Verdict::Verified => "✔",
            Verdict::Mismatch => "✘",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Verdict::Verified => "Verified",
            Verdict::Mismatch => "Mismatch",
        }
    }
}

/// 单条公式校验结果
///
/// 不变量: calculated = round(base * count, 1),
/// verdict = Verified 当且仅当 |calculated - expected| <= 0.1
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub claim: ExpressionClaim,
    pub calculated: BigDecimal,
    pub verdict: Verdict,
    pub message: String,
}

impl VerificationResult {
    pub fn is_verified(&self) -> bool {
        self.verdict == Verdict::Verified
    }
}
