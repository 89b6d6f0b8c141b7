use crate::card::{ensure_distinct, evaluate, Card, CardError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// 剩余 49 张牌中两张组合的数量 C(49, 2)
pub const OPPONENT_COMBOS: u32 = 1176;

/// 对所有可能的对手底牌逐一摊牌后的统计结果
///
/// 由 `enumerate` 产生时总数恒为 1176。手工构造的全零统计没有定义胜率，
/// `equity` 和 `win_rate` 此时返回 NaN。
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matchup {
    pub wins: u32,
    pub ties: u32,
    pub losses: u32,
}

impl Matchup {
    pub fn total(&self) -> u32 {
        self.wins + self.ties + self.losses
    }

    /// 胜率，平局计半: (wins + 0.5 * ties) / total
    pub fn equity(&self) -> f64 {
        (self.wins as f64 + 0.5 * self.ties as f64) / self.total() as f64
    }

    /// 只计算赢的比例，平局算作输
    pub fn win_rate(&self) -> f64 {
        self.wins as f64 / self.total() as f64
    }

    fn record(&mut self, outcome: Ordering) {
        match outcome {
            Ordering::Greater => self.wins += 1,
            Ordering::Equal => self.ties += 1,
            Ordering::Less => self.losses += 1,
        }
    }
}

/// 精确枚举胜率
///
/// 从牌堆中去掉自己的两张底牌和公共牌，剩下 49 张；
/// 对手的每一种两张组合都按相同权重计算（不考虑对手的实际范围），
/// 与同一张公共牌组成 3 张牌后和自己的牌比较。
pub fn enumerate(hole: [Card; 2], table: Card) -> Result<Matchup, CardError> {
    ensure_distinct(&[hole[0], hole[1], table])?;

    let deck: Vec<Card> = Card::deck()
        .into_iter()
        .filter(|c| !hole.contains(c) && *c != table)
        .collect();

    let mine = evaluate([hole[0], hole[1], table]);
    let mut matchup = Matchup::default();

    for (i, &first) in deck.iter().enumerate() {
        for &second in &deck[i + 1..] {
            let theirs = evaluate([first, second, table]);
            matchup.record(mine.cmp(&theirs));
        }
    }

    tracing::trace!(%table, wins = matchup.wins, ties = matchup.ties, losses = matchup.losses, "胜率枚举完成");
    Ok(matchup)
}

/// `enumerate` 的便捷包装，直接返回胜率
pub fn equity(hole: [Card; 2], table: Card) -> Result<f64, CardError> {
    enumerate(hole, table).map(|m| m.equity())
}
