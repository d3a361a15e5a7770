//! Domain layer: pure game logic types and operations.

pub mod bidding;
pub mod cards;
pub mod cards_logic;
pub mod dealing;
pub mod kitty;
pub mod player_view;
pub mod scoring;
pub mod snapshot;
pub mod state;
pub mod tricks;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod tests_kitty;
#[cfg(test)]
mod tests_props_tricks;
#[cfg(test)]
mod tests_scoring;
#[cfg(test)]
mod tests_tricks;

// Re-exports for ergonomics
pub use cards::{card_points, deck_for, Card, DeckVariant, Rank, Suit};
pub use cards_logic::{card_beats, hand_has_suit, points_in};
pub use dealing::{deal_round, Deal, HAND_SIZE, KITTY_SIZE};
pub use player_view::PlayerView;
pub use snapshot::{snapshot, GameSnapshot};
pub use state::{
    next_seat, next_unpassed_seat, opposing_team, partner_of, round_opener, seat_offset, team_of,
    Contract, GameId, GameState, Phase, Player, PlayerKind, RoundState, Seat, Team, SEATS,
};
