use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 尺寸标记: 数值 + 单位 (mm / cm / m / in)
///
/// 比较采用精确字符串相等, "5.0mm" 与 "5mm" 不相等。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeasurementToken(String);

impl MeasurementToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MeasurementToken {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for MeasurementToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for MeasurementToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 对账结果: 索引表尺寸 vs 图纸识别尺寸
///
/// 不变量: matched ∪ missing = 索引表 (集合), matched ∩ missing = ∅。
/// 两个集合按索引表中首次出现的顺序排列。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    pub matched: IndexSet<MeasurementToken>,
    pub missing: IndexSet<MeasurementToken>,
}

impl ReconciliationReport {
    /// 索引表中的尺寸是否全部在图纸中找到
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn total(&self) -> usize {
        self.matched.len() + self.missing.len()
    }
}
