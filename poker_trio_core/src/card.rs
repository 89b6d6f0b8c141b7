use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
// --- 核心数据结构定义 ---

/// 花色 (Suit)
/// 花色之间没有大小之分，派生的 Ord 只用于排序和去重
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum Suit {
    Club,    // 梅花 ♣️
    Diamond, // 方块 ♦️
    Heart,   // 红心 ♥️
    Spade,   // 黑桃 ♠️
}

/// 点数 (Rank)
/// Ace 永远是最大的；只有在 A-2-3 顺子中才被当作最小
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

/// 单张扑克牌 (Card)
/// 序列化为两个字符的文本形式，例如 `"AS"`、`"TD"`
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

/// 牌型等级 (HandValue)
/// 三张牌扑克的牌型，顺序从小到大排列，直接利用派生的 `Ord` 比较：
/// 先比较变体（牌型类别），类别相同再比较内部存储的点数。
/// 注意这不是五张牌的标准顺序：同花 < 顺子 < 三条 < 同花顺。
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum HandValue {
    HighCard(Rank, Rank, Rank), // 高牌 (三张点数，从大到小)
    Pair(Rank, Rank),           // 一对 (对子的点数, 踢脚牌)
    Flush(Rank, Rank, Rank),    // 同花 (三张点数，从大到小)
    Straight(Rank),             // 顺子 (最高牌的点数)
    ThreeOfAKind(Rank),         // 三条
    StraightFlush(Rank),        // 同花顺 (最高牌的点数)
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CardError {
    #[error("无法解析的牌: {0:?}")]
    Parse(String),
    #[error("一手牌必须是 3 张，实际为 {0} 张")]
    HandSize(usize),
    #[error("重复的牌: {0}")]
    Duplicate(Card),
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Six, Rank::Seven,
        Rank::Eight, Rank::Nine, Rank::Ten, Rank::Jack, Rank::Queen, Rank::King, Rank::Ace,
    ];

    /// 数值点数，2..=14 (Ace = 14)
    pub fn value(self) -> u8 {
        self as u8 + 2
    }

    fn from_char(c: char) -> Option<Rank> {
        "23456789TJQKA".find(c).map(|i| Rank::ALL[i])
    }

    fn as_char(self) -> char {
        b"23456789TJQKA"[self as usize] as char
    }
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Club, Suit::Diamond, Suit::Heart, Suit::Spade];

    fn from_char(c: char) -> Option<Suit> {
        match c {
            'C' => Some(Suit::Club),
            'D' => Some(Suit::Diamond),
            'H' => Some(Suit::Heart),
            'S' => Some(Suit::Spade),
            _ => None,
        }
    }

    fn as_char(self) -> char {
        match self {
            Suit::Club => 'C',
            Suit::Diamond => 'D',
            Suit::Heart => 'H',
            Suit::Spade => 'S',
        }
    }
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Card {
        Card { rank, suit }
    }

    /// 一副完整的 52 张扑克牌，点数在外层、花色在内层
    pub fn deck() -> Vec<Card> {
        let mut deck = Vec::with_capacity(52);
        for &rank in &Rank::ALL {
            for &suit in &Suit::ALL {
                deck.push(Card { rank, suit });
            }
        }
        deck
    }
}

impl HandValue {
    /// 牌型类别：0=高牌, 1=一对, 2=同花, 3=顺子, 4=三条, 5=同花顺
    pub fn category(&self) -> u8 {
        match self {
            HandValue::HighCard(..) => 0,
            HandValue::Pair(..) => 1,
            HandValue::Flush(..) => 2,
            HandValue::Straight(..) => 3,
            HandValue::ThreeOfAKind(..) => 4,
            HandValue::StraightFlush(..) => 5,
        }
    }
}

// --- 实现辅助功能 ---

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl fmt::Display for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HandValue::HighCard(r1, ..) => write!(f, "高牌({})", r1),
            HandValue::Pair(r1, ..) => write!(f, "一对({})", r1),
            HandValue::Flush(r1, ..) => write!(f, "同花({})", r1),
            HandValue::Straight(r1) => write!(f, "顺子({})", r1),
            HandValue::ThreeOfAKind(r1) => write!(f, "三条({})", r1),
            HandValue::StraightFlush(r1) => write!(f, "同花顺({})", r1),
        }
    }
}

impl FromStr for Card {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(su), None) => match (Rank::from_char(r), Suit::from_char(su)) {
                (Some(rank), Some(suit)) => Ok(Card { rank, suit }),
                _ => Err(CardError::Parse(s.to_string())),
            },
            _ => Err(CardError::Parse(s.to_string())),
        }
    }
}

impl TryFrom<String> for Card {
    type Error = CardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Card> for String {
    fn from(card: Card) -> Self {
        card.to_string()
    }
}

// --- 牌型评估逻辑 ---

/// 评估一手 3 张牌 (两张底牌 + 一张公共牌)
///
/// 检查调用方的前置条件：必须恰好 3 张且互不相同。
pub fn score(hand: &[Card]) -> Result<HandValue, CardError> {
    let cards: [Card; 3] = hand.try_into().map_err(|_| CardError::HandSize(hand.len()))?;
    ensure_distinct(&cards)?;
    Ok(evaluate(cards))
}

/// 检查一组牌中没有重复
pub fn ensure_distinct(cards: &[Card]) -> Result<(), CardError> {
    for (i, card) in cards.iter().enumerate() {
        if cards[i + 1..].contains(card) {
            return Err(CardError::Duplicate(*card));
        }
    }
    Ok(())
}

/// 评估 3 张牌的牌型，不做重复检查（胜率枚举的热路径）
///
/// 判断顺序（先匹配者胜出）：同花顺 → 三条 → 顺子 → 同花 → 一对 → 高牌
pub fn evaluate(cards: [Card; 3]) -> HandValue {
    let mut ranks = cards.map(|c| c.rank);
    // 从大到小排序，方便处理
    ranks.sort_by(|a, b| b.cmp(a));
    let [high, mid, low] = ranks;

    let is_flush = cards.iter().all(|c| c.suit == cards[0].suit);

    // 特殊情况: A-2-3，最大的牌是 3
    let straight_high = if ranks == [Rank::Ace, Rank::Three, Rank::Two] {
        Some(Rank::Three)
    } else if high.value() == mid.value() + 1 && mid.value() == low.value() + 1 {
        Some(high)
    } else {
        None
    };

    match straight_high {
        Some(top) if is_flush => HandValue::StraightFlush(top),
        // 已排序，首尾相同即三张相同
        _ if high == low => HandValue::ThreeOfAKind(high),
        Some(top) => HandValue::Straight(top),
        None if is_flush => HandValue::Flush(high, mid, low),
        None if high == mid => HandValue::Pair(high, low),
        None if mid == low => HandValue::Pair(mid, high),
        None => HandValue::HighCard(high, mid, low),
    }
}

// --- 单元测试 ---
