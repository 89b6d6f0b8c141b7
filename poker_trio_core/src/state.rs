use crate::card::Card;
use crate::opponent::OpponentStats;
use crate::policy::Action;
use serde::{Deserialize, Serialize};

/// 一场比赛中的两个座位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    A,
    B,
}

/// 一局发出的牌。两个座位看到的是同样的底牌和公共牌。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deal {
    pub hole: [Card; 2],
    pub table: Card,
}

/// 一场一对一比赛的状态，由比赛驱动逐局推进
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub round: u32,          // 已经结算的局数
    pub scores: [i64; 2],    // 以座位为索引的总得分
    // 每个座位自己做过的动作计数；对手看到的统计就是这里的另一项
    pub actions: [OpponentStats; 2],
}

/// 单局结算结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub round: u32,
    pub actions: [Action; 2],
    pub payoff: (i32, i32),
}

impl Seat {
    pub fn index(self) -> usize {
        match self {
            Seat::A => 0,
            Seat::B => 1,
        }
    }

    pub fn other(self) -> Seat {
        match self {
            Seat::A => Seat::B,
            Seat::B => Seat::A,
        }
    }
}

impl MatchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self, seat: Seat) -> i64 {
        self.scores[seat.index()]
    }

    /// 该座位观察到的对手动作统计
    pub fn opponent_stats(&self, seat: Seat) -> OpponentStats {
        self.actions[seat.other().index()]
    }
}
