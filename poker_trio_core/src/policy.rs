use crate::equity::Matchup;
use crate::opponent::{frequencies, Frequencies, OpponentStats};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// 玩家动作，按对自己有利的程度从小到大排列
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Fold,  // 弃牌
    Call,  // 跟注
    Raise, // 加注
}

/// 可调整的弃牌/加注阈值
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub fold: f64,
    pub raise: f64,
}

/// 决策策略的种类。三种机器人共用同一套牌力评估和胜率引擎。
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    /// 根据对手频率自适应调整阈值
    #[default]
    Adaptive,
    /// 固定阈值，只看赢的比例（平局算输）
    Threshold,
    /// 固定阈值，看平局计半的胜率
    Equity,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("未知的策略: {0:?} (可选 adaptive, threshold, equity)")]
pub struct UnknownPolicy(pub String);

const FOLD_BOUNDS: (f64, f64) = (0.15, 0.35);
const RAISE_BOUNDS: (f64, f64) = (0.45, 0.65);
const BLUFF_CHANCE: f64 = 0.30;

impl Thresholds {
    pub const BASE: Thresholds = Thresholds { fold: 0.25, raise: 0.47 };

    /// 根据对手画像调整基础阈值（尚未钳制）
    pub fn against(freq: &Frequencies) -> Thresholds {
        let mut t = Thresholds::BASE;
        if is_maniac(freq) {
            // 尊重疯子，但不要被吓住
            t.fold -= 0.06;
            t.raise += 0.04;
        } else {
            // 被动的对手：更多价值加注
            if freq.p_fold > 0.42 {
                t.raise -= 0.06;
            }
            // 激进的对手：两个阈值都收紧
            if freq.p_raise > 0.45 {
                t.fold += 0.03;
                t.raise += 0.03;
            }
        }
        t
    }

    /// 面对频繁加注的对手时放宽弃牌线，多抓诈唬
    fn catch_bluffs(&mut self, equity: f64, p_raise: f64) {
        if p_raise > 0.40 && equity > 0.42 {
            self.fold = f64::max(0.15, self.fold - 0.10);
        }
        if p_raise > 0.35 && equity > 0.45 {
            self.fold = f64::max(0.18, self.fold - 0.05);
        }
    }

    pub fn clamped(self) -> Thresholds {
        Thresholds {
            fold: self.fold.clamp(FOLD_BOUNDS.0, FOLD_BOUNDS.1),
            raise: self.raise.clamp(RAISE_BOUNDS.0, RAISE_BOUNDS.1),
        }
    }
}

/// 样本足够多且几乎总是加注的对手
pub fn is_maniac(freq: &Frequencies) -> bool {
    freq.total > 30 && freq.p_raise > 0.80
}

/// 自适应决策
///
/// 阈值调整按固定顺序进行，后面的步骤读取前面步骤修改过的值：
/// 1. 按对手画像调整基础阈值；
/// 2. 对手经常弃牌且牌力尚可时，以 30% 的概率直接半诈唬加注；
/// 3. 对手激进且牌力不错时放宽弃牌线；
/// 4. 钳制阈值；
/// 5. 按最终阈值给出动作。
///
/// `rng` 只在第 2 步被使用，测试中可以传入固定种子的生成器来控制这个分支。
pub fn decide<R: Rng + ?Sized>(
    equity: f64,
    p_fold: f64,
    p_raise: f64,
    total_actions: u64,
    rng: &mut R,
) -> Action {
    let freq = Frequencies { p_fold, p_raise, total: total_actions };
    let maniac = is_maniac(&freq);
    let mut thresholds = Thresholds::against(&freq);

    // 半诈唬
    if p_fold > 0.50 && equity > 0.35 && rng.random::<f64>() < BLUFF_CHANCE {
        debug!(equity, p_fold, "半诈唬加注");
        return Action::Raise;
    }

    thresholds.catch_bluffs(equity, p_raise);
    let thresholds = thresholds.clamped();

    let action = if equity >= 0.40 && p_fold > 0.55 {
        // 对非常被动的对手轻度加注
        Action::Raise
    } else if equity < thresholds.fold && !maniac {
        Action::Fold
    } else if equity >= thresholds.raise {
        Action::Raise
    } else {
        Action::Call
    };

    debug!(equity, p_fold, p_raise, total_actions, maniac, fold = thresholds.fold, raise = thresholds.raise, ?action, "自适应决策");
    action
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 3] = [PolicyKind::Adaptive, PolicyKind::Threshold, PolicyKind::Equity];

    /// 按策略种类决策
    pub fn decide<R: Rng + ?Sized>(self, matchup: &Matchup, stats: &OpponentStats, rng: &mut R) -> Action {
        match self {
            PolicyKind::Adaptive => {
                let freq = frequencies(stats);
                decide(matchup.equity(), freq.p_fold, freq.p_raise, freq.total, rng)
            }
            PolicyKind::Threshold => by_fixed_thresholds(matchup.win_rate(), 0.33, 0.66),
            PolicyKind::Equity => by_fixed_thresholds(matchup.equity(), 0.25, 0.50),
        }
    }
}

fn by_fixed_thresholds(strength: f64, fold_below: f64, raise_from: f64) -> Action {
    if strength < fold_below {
        Action::Fold
    } else if strength >= raise_from {
        Action::Raise
    } else {
        Action::Call
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            Action::Fold => "FOLD",
            Action::Call => "CALL",
            Action::Raise => "RAISE",
        })
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            PolicyKind::Adaptive => "adaptive",
            PolicyKind::Threshold => "threshold",
            PolicyKind::Equity => "equity",
        })
    }
}

impl FromStr for PolicyKind {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PolicyKind::ALL
            .into_iter()
            .find(|kind| kind.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownPolicy(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// 找一个第一次抽样满足条件的种子，用于强制走某个随机分支
    fn rng_rolling(pred: impl Fn(f64) -> bool) -> StdRng {
        (0..)
            .map(StdRng::seed_from_u64)
            .find(|rng| pred(rng.clone().random::<f64>()))
            .unwrap()
    }

    fn never_bluff() -> StdRng {
        rng_rolling(|roll| roll >= BLUFF_CHANCE)
    }

    fn always_bluff() -> StdRng {
        rng_rolling(|roll| roll < BLUFF_CHANCE)
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_maniac_thresholds() {
        let freq = frequencies(&OpponentStats { fold: 0, call: 0, raise: 40 });
        assert!(is_maniac(&freq));
        let t = Thresholds::against(&freq);
        assert!(approx(t.fold, 0.19), "{t:?}");
        assert!(approx(t.raise, 0.51), "{t:?}");
    }

    #[test]
    fn test_small_sample_is_not_maniac() {
        let freq = frequencies(&OpponentStats { fold: 0, call: 0, raise: 30 });
        assert!(!is_maniac(&freq));
        // 非疯子分支：激进对手两个阈值都上调
        let t = Thresholds::against(&freq);
        assert!(approx(t.fold, 0.28));
        assert!(approx(t.raise, 0.50));
    }

    #[test]
    fn test_passive_and_aggressive_adjustments() {
        let passive = Thresholds::against(&Frequencies { p_fold: 0.5, p_raise: 0.1, total: 10 });
        assert!(approx(passive.fold, 0.25));
        assert!(approx(passive.raise, 0.41));
        assert!(approx(passive.clamped().raise, 0.45));

        let prior = Thresholds::against(&Frequencies::PRIOR);
        assert_eq!(prior, Thresholds::BASE);
    }

    #[test]
    fn test_catch_bluffs_floors() {
        let mut t = Thresholds::BASE;
        t.catch_bluffs(0.50, 0.50);
        // 0.25 - 0.10 = 0.15，再 max(0.18, 0.10) = 0.18
        assert!(approx(t.fold, 0.18));

        let mut t = Thresholds::BASE;
        t.catch_bluffs(0.43, 0.50);
        assert!(approx(t.fold, 0.15));

        let mut t = Thresholds::BASE;
        t.catch_bluffs(0.50, 0.38);
        assert!(approx(t.fold, 0.20));
    }

    #[test]
    fn test_basic_actions_with_prior() {
        let p = 1.0 / 3.0;
        assert_eq!(decide(0.10, p, p, 0, &mut never_bluff()), Action::Fold);
        assert_eq!(decide(0.30, p, p, 0, &mut never_bluff()), Action::Call);
        assert_eq!(decide(0.47, p, p, 0, &mut never_bluff()), Action::Raise);
    }

    #[test]
    fn test_semi_bluff_branch() {
        // p_fold = 0.52 不满足 "> 0.55" 的轻度加注规则，0.38 低于加注线
        assert_eq!(decide(0.38, 0.52, 0.1, 50, &mut always_bluff()), Action::Raise);
        assert_eq!(decide(0.38, 0.52, 0.1, 50, &mut never_bluff()), Action::Call);
    }

    #[test]
    fn test_rng_untouched_outside_bluff_window() {
        let mut rng = always_bluff();
        let before = rng.clone();
        assert_eq!(decide(0.30, 0.2, 0.2, 50, &mut rng), Action::Call);
        assert_eq!(rng.random::<u64>(), before.clone().random::<u64>());
    }

    #[test]
    fn test_light_raise_against_passive() {
        assert_eq!(decide(0.40, 0.60, 0.1, 50, &mut never_bluff()), Action::Raise);
        assert_eq!(decide(0.39, 0.60, 0.1, 50, &mut never_bluff()), Action::Call);
    }

    #[test]
    fn test_never_fold_against_maniac() {
        for equity in [0.0, 0.05, 0.1, 0.18] {
            assert_eq!(decide(equity, 0.0, 0.9, 40, &mut never_bluff()), Action::Call);
        }
        assert_eq!(decide(0.52, 0.0, 0.9, 40, &mut never_bluff()), Action::Raise);
    }

    #[test]
    fn test_huge_opponent_history() {
        // 接近 u32 上限的计数：一直弃牌的对手仍被识别为被动，而不是退回先验
        let stats = OpponentStats { fold: u32::MAX, call: 0, raise: 1 };
        let matchup = Matchup { wins: 500, ties: 0, losses: 676 };
        assert_eq!(PolicyKind::Adaptive.decide(&matchup, &stats, &mut never_bluff()), Action::Raise);

        let maniac = OpponentStats { fold: 0, call: 0, raise: u32::MAX };
        let weak = Matchup { wins: 100, ties: 0, losses: 1076 };
        assert_eq!(PolicyKind::Adaptive.decide(&weak, &maniac, &mut never_bluff()), Action::Call);
    }

    #[test]
    fn test_monotonic_in_equity() {
        let profiles = [
            (1.0 / 3.0, 1.0 / 3.0, 0),
            (0.6, 0.1, 40),
            (0.45, 0.2, 20),
            (0.1, 0.5, 20),
            (0.0, 0.9, 40),
            (0.2, 0.38, 100),
        ];
        for (p_fold, p_raise, total) in profiles {
            let mut previous = Action::Fold;
            for step in 0..=1000 {
                let equity = step as f64 / 1000.0;
                let action = decide(equity, p_fold, p_raise, total, &mut never_bluff());
                assert!(action >= previous, "equity {equity} 时从 {previous} 退回到 {action}");
                previous = action;
            }
        }
    }

    #[test]
    fn test_best_hand_always_raises() {
        let matchup = crate::equity::enumerate(
            ["AS".parse().unwrap(), "AD".parse().unwrap()],
            "AH".parse().unwrap(),
        )
        .unwrap();
        let line_ups = [
            OpponentStats::default(),
            OpponentStats { fold: 40, call: 0, raise: 0 },
            OpponentStats { fold: 0, call: 40, raise: 0 },
            OpponentStats { fold: 0, call: 0, raise: 40 },
        ];
        for stats in line_ups {
            for mut rng in [never_bluff(), always_bluff()] {
                assert_eq!(PolicyKind::Adaptive.decide(&matchup, &stats, &mut rng), Action::Raise);
            }
        }
        assert_eq!(PolicyKind::Threshold.decide(&matchup, &OpponentStats::default(), &mut never_bluff()), Action::Raise);
        assert_eq!(PolicyKind::Equity.decide(&matchup, &OpponentStats::default(), &mut never_bluff()), Action::Raise);
    }

    #[test]
    fn test_fixed_threshold_policies() {
        let matchup = Matchup { wins: 700, ties: 100, losses: 376 };
        let stats = OpponentStats::default();
        let mut rng = never_bluff();
        // win_rate = 0.595, equity = 0.638
        assert_eq!(PolicyKind::Threshold.decide(&matchup, &stats, &mut rng), Action::Call);
        assert_eq!(PolicyKind::Equity.decide(&matchup, &stats, &mut rng), Action::Raise);

        let weak = Matchup { wins: 250, ties: 100, losses: 826 };
        // win_rate = 0.213, equity = 0.255
        assert_eq!(PolicyKind::Threshold.decide(&weak, &stats, &mut rng), Action::Fold);
        assert_eq!(PolicyKind::Equity.decide(&weak, &stats, &mut rng), Action::Call);
    }

    #[test]
    fn test_policy_kind_text() {
        for kind in PolicyKind::ALL {
            assert_eq!(kind.to_string().parse::<PolicyKind>(), Ok(kind));
        }
        assert_eq!("Adaptive".parse::<PolicyKind>(), Ok(PolicyKind::Adaptive));
        assert_eq!("bogus".parse::<PolicyKind>(), Err(UnknownPolicy("bogus".to_string())));
    }

    #[test]
    fn test_action_wire_form() {
        assert_eq!(serde_json::to_string(&Action::Raise).unwrap(), "\"RAISE\"");
        assert_eq!(serde_json::from_str::<Action>("\"FOLD\"").unwrap(), Action::Fold);
    }
}
