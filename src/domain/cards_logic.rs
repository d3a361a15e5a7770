//! Card comparisons: suit membership, trick strength, point sums.

use super::cards::{card_points, Card, Suit};

pub fn hand_has_suit(hand: &[Card], suit: Suit) -> bool {
    hand.iter().any(|c| c.suit == suit)
}

/// Total point value of a set of cards.
pub fn points_in(cards: &[Card]) -> u16 {
    cards.iter().map(|&c| card_points(c)).sum()
}

/// Does card `a` beat card `b` in a trick with the given lead and trump?
///
/// Precedence: any trump beats any non-trump; between trumps, rank decides;
/// between lead-suit cards, rank decides; a card that is neither trump nor
/// lead suit never beats anything.
pub fn card_beats(a: Card, b: Card, lead: Suit, trump: Suit) -> bool {
    let a_trump = a.suit == trump;
    let b_trump = b.suit == trump;
    if a_trump && !b_trump {
        return true;
    }
    if b_trump && !a_trump {
        return false;
    }
    if a_trump && b_trump {
        return a.rank > b.rank;
    }
    let a_follows = a.suit == lead;
    let b_follows = b.suit == lead;
    if a_follows && !b_follows {
        return true;
    }
    if b_follows && !a_follows {
        return false;
    }
    if a_follows && b_follows {
        return a.rank > b.rank;
    }
    false
}
