//! Core card types: Suit, Rank, Card, deck variants and point values.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    fn letter(self) -> char {
        match self {
            Suit::Hearts => 'H',
            Suit::Diamonds => 'D',
            Suit::Clubs => 'C',
            Suit::Spades => 'S',
        }
    }
}

/// Rank order for 200: A high, then K, Q, J, 10, 9, 8, 7, 6, 5.
/// The derived `Ord` encodes exactly that ordering (Five lowest).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Rank {
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

impl Rank {
    fn code(self) -> &'static str {
        match self {
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

// Note: Ord on Card is only for stable sorting: suit order then rank order.
// Trick resolution must go through card_beats, which knows lead and trump.
impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.suit.cmp(&other.suit) {
            std::cmp::Ordering::Equal => self.rank.cmp(&other.rank),
            ord => ord,
        }
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Card {
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }
}

/// Point value of a single card: A = 10, 10 = 10, 5 = 5, everything else 0.
pub fn card_points(card: Card) -> u16 {
    match card.rank {
        Rank::Ace | Rank::Ten => 10,
        Rank::Five => 5,
        _ => 0,
    }
}

/// Deck variant: 36 cards (no sixes) or 40 cards (with sixes, kitty tables).
/// Both decks carry exactly 100 card points, since sixes are worthless.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum DeckVariant {
    #[serde(rename = "36")]
    ThirtySix,
    #[serde(rename = "40")]
    Forty,
}

impl DeckVariant {
    pub fn card_count(self) -> usize {
        match self {
            DeckVariant::ThirtySix => 36,
            DeckVariant::Forty => 40,
        }
    }

    pub fn ranks(self) -> &'static [Rank] {
        const WITHOUT_SIX: [Rank; 9] = [
            Rank::Five,
            Rank::Seven,
            Rank::Eight,
            Rank::Nine,
            Rank::Ten,
            Rank::Jack,
            Rank::Queen,
            Rank::King,
            Rank::Ace,
        ];
        const WITH_SIX: [Rank; 10] = [
            Rank::Five,
            Rank::Six,
            Rank::Seven,
            Rank::Eight,
            Rank::Nine,
            Rank::Ten,
            Rank::Jack,
            Rank::Queen,
            Rank::King,
            Rank::Ace,
        ];
        match self {
            DeckVariant::ThirtySix => &WITHOUT_SIX,
            DeckVariant::Forty => &WITH_SIX,
        }
    }
}

/// Full deck for a variant, in canonical order.
pub fn deck_for(variant: DeckVariant) -> Vec<Card> {
    let mut deck = Vec::with_capacity(variant.card_count());
    for suit in Suit::ALL {
        for &rank in variant.ranks() {
            deck.push(Card { suit, rank });
        }
    }
    deck
}

/// Cards serialize as compact code strings ("AS", "10H") at the boundary.
/// The code doubles as the card's id: unique per deck since no card repeats.
impl Display for Card {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}{}", self.rank.code(), self.suit.letter())
    }
}

impl FromStr for Card {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || {
            DomainError::validation(
                ValidationKind::Other("PARSE_CARD".into()),
                format!("unrecognized card code: {s:?}"),
            )
        };
        if s.len() < 2 {
            return Err(err());
        }
        let (rank_code, suit_code) = s.split_at(s.len() - 1);
        let rank = match rank_code {
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "10" | "T" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            "A" => Rank::Ace,
            _ => return Err(err()),
        };
        let suit = match suit_code {
            "H" => Suit::Hearts,
            "D" => Suit::Diamonds,
            "C" => Suit::Clubs,
            "S" => Suit::Spades,
            _ => return Err(err()),
        };
        Ok(Card { suit, rank })
    }
}

impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
