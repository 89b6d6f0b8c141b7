use crate::card::{Card, CardError};
use crate::equity::enumerate;
use crate::opponent::OpponentStats;
use crate::policy::{Action, PolicyKind};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// --- 比赛驱动 -> 机器人 的请求 ---

/// 一次决策请求
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DecisionRequest {
    /// 自己的两张底牌
    pub your_hole: [Card; 2],
    /// 公共牌
    pub table_card: Card,
    /// 对手历史动作计数，可以缺省或为 null
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opponent_stats: Option<OpponentStats>,
    /// 当前局数，只是随请求附带的信息，策略不会使用
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round: Option<u32>,
}

// --- 机器人 -> 比赛驱动 的响应 ---

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecisionResponse {
    pub action: Action,
}

#[derive(Debug, Error)]
pub enum DecisionError {
    #[error("请求格式错误: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Card(#[from] CardError),
}

impl DecisionRequest {
    /// 解析原始输入，空输入按 `{}` 处理（因此会因缺少底牌而失败）
    pub fn parse(raw: &str) -> Result<Self, DecisionError> {
        let raw = raw.trim();
        let raw = if raw.is_empty() { "{}" } else { raw };
        Ok(serde_json::from_str(raw)?)
    }

    /// 底牌和公共牌必须是 3 张不同的牌，然后按指定策略决策
    pub fn decide<R: Rng + ?Sized>(&self, kind: PolicyKind, rng: &mut R) -> Result<Action, CardError> {
        let matchup = enumerate(self.your_hole, self.table_card)?;
        let stats = self.opponent_stats.unwrap_or_default();
        Ok(kind.decide(&matchup, &stats, rng))
    }
}

/// 解析请求并决策，任何错误都原样返回给调用方处理
pub fn respond<R: Rng + ?Sized>(raw: &str, kind: PolicyKind, rng: &mut R) -> Result<DecisionResponse, DecisionError> {
    let request = DecisionRequest::parse(raw)?;
    let action = request.decide(kind, rng)?;
    Ok(DecisionResponse { action })
}
