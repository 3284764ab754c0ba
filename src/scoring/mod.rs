//! 评分计算
//!
//! 纯计算逻辑，不做任何 I/O：
//! - `aggregator` 按分组加权汇总单份评估的得分
//! - `period` 把同一员工的多份评估合并成一个汇总视图

mod aggregator;
mod period;

pub use aggregator::{ScoredItem, compute_score};
pub use period::{MergedView, available_periods, merge_records};

/// 四舍五入到两位小数，只在展示边界使用
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::round2;

    #[test]
    fn test_round2() {
        assert_eq!(round2(80.0), 80.0);
        assert_eq!(round2(66.666_666), 66.67);
        assert_eq!(round2(12.344), 12.34);
        assert_eq!(round2(0.0), 0.0);
    }
}
