use crate::card::Card;
use crate::message::DecisionRequest;
use crate::policy::Action;
use crate::state::*;
use rand::seq::SliceRandom;
use rand::Rng;

// --- 核心比赛流程函数 ---

/// 发一局牌：从一副新牌中随机取出 3 张不同的牌
pub fn deal<R: Rng + ?Sized>(rng: &mut R) -> Deal {
    let mut deck = Card::deck();
    let (picked, _) = deck.partial_shuffle(rng, 3);
    Deal { hole: [picked[0], picked[1]], table: picked[2] }
}

/// 固定的得分表，返回 (A 的得分, B 的得分)
///
/// 一方弃牌而另一方没有弃牌时，弃牌方 -1，对方跟注 +2、加注 +3。
/// 其余情况（双方都弃牌，或双方都跟注/加注）记 0:0，摊牌结果不计分。
pub fn payoff(a: Action, b: Action) -> (i32, i32) {
    fn stake(action: Action) -> i32 {
        match action {
            Action::Fold => 0,
            Action::Call => 2,
            Action::Raise => 3,
        }
    }

    match (a, b) {
        (Action::Fold, Action::Fold) => (0, 0),
        (Action::Fold, other) => (-1, stake(other)),
        (other, Action::Fold) => (stake(other), -1),
        _ => (0, 0),
    }
}

impl MatchState {
    /// 为某个座位构造本局的决策请求，附带它目前观察到的对手统计快照
    pub fn request_for(&self, seat: Seat, deal: &Deal) -> DecisionRequest {
        DecisionRequest {
            your_hole: deal.hole,
            table_card: deal.table,
            opponent_stats: Some(self.opponent_stats(seat)),
            round: Some(self.round + 1),
        }
    }

    /// 结算一局
    ///
    /// - 累积双方的动作计数（也就是对方下一局看到的统计）。
    /// - 按得分表计分。
    pub fn settle(&mut self, actions: [Action; 2]) -> RoundOutcome {
        self.round += 1;
        self.actions[Seat::A.index()].record(actions[0]);
        self.actions[Seat::B.index()].record(actions[1]);

        let payoff = payoff(actions[0], actions[1]);
        self.scores[0] += payoff.0 as i64;
        self.scores[1] += payoff.1 as i64;

        RoundOutcome { round: self.round, actions, payoff }
    }
}

// --- 单元测试 ---
