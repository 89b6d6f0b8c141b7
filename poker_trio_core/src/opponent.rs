use crate::policy::Action;
use serde::{Deserialize, Serialize};

/// 对手历史动作计数
///
/// 由外部（比赛驱动）逐局累积，每次决策时原样传入；
/// 决策过程只读取它，不会修改或保存。
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpponentStats {
    pub fold: u32,
    pub call: u32,
    pub raise: u32,
}

/// 由计数换算出的对手动作频率
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frequencies {
    pub p_fold: f64,
    pub p_raise: f64,
    /// 观察到的动作总数
    pub total: u64,
}

impl OpponentStats {
    /// 动作总数。每项计数都可以到 `u32::MAX`，所以在 u64 中求和
    pub fn total(&self) -> u64 {
        self.fold as u64 + self.call as u64 + self.raise as u64
    }

    /// 记录一次对手动作，只供比赛驱动使用
    pub fn record(&mut self, action: Action) {
        match action {
            Action::Fold => self.fold += 1,
            Action::Call => self.call += 1,
            Action::Raise => self.raise += 1,
        }
    }
}

impl Frequencies {
    /// 没有任何观察时的无信息先验
    pub const PRIOR: Frequencies = Frequencies { p_fold: 1.0 / 3.0, p_raise: 1.0 / 3.0, total: 0 };

    pub fn p_call(&self) -> f64 {
        1.0 - self.p_fold - self.p_raise
    }
}

/// 计算对手弃牌和加注的频率
///
/// 所有历史局同等对待，不做平滑也不做衰减。
pub fn frequencies(stats: &OpponentStats) -> Frequencies {
    let total = stats.total();
    if total == 0 {
        return Frequencies::PRIOR;
    }
    Frequencies {
        p_fold: stats.fold as f64 / total as f64,
        p_raise: stats.raise as f64 / total as f64,
        total,
    }
}
