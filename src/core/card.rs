//! Card kinds and card values.
//!
//! ## Kind
//!
//! Closed set of roles. Characters and intrigues occupy contiguous
//! discriminant ranges, so classification is a range check.
//!
//! ## Card
//!
//! An immutable `{kind, family, tokens}` value. `tokens >= 0` means the card
//! is face-down with that many hidden tokens; [`Card::REVEALED`] marks a
//! face-up card.

use serde::{Deserialize, Serialize};

use super::error::ValidationError;
use super::family::FamilyId;

/// Role printed on a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Kind {
    // === Characters ===
    Archer = 0,
    Heir,
    Lord,
    Shapeshifter,
    Soldier,
    Spy,

    // === Intrigues ===
    Ambush,
    Assassination,
    Conspiracy,
    RoyalDecree,
}

impl Kind {
    /// Every kind, in discriminant order.
    pub const ALL: [Kind; 10] = [
        Kind::Archer,
        Kind::Heir,
        Kind::Lord,
        Kind::Shapeshifter,
        Kind::Soldier,
        Kind::Spy,
        Kind::Ambush,
        Kind::Assassination,
        Kind::Conspiracy,
        Kind::RoyalDecree,
    ];

    const FIRST_INTRIGUE: u8 = Kind::Ambush as u8;

    /// Look up a kind by discriminant.
    #[must_use]
    pub fn from_index(index: u8) -> Option<Kind> {
        Self::ALL.get(index as usize).copied()
    }

    /// Raw discriminant.
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn is_character(self) -> bool {
        (self as u8) < Self::FIRST_INTRIGUE
    }

    #[must_use]
    pub const fn is_intrigue(self) -> bool {
        (self as u8) >= Self::FIRST_INTRIGUE
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Kind::Archer => "Archer",
            Kind::Heir => "Heir",
            Kind::Lord => "Lord",
            Kind::Shapeshifter => "Shapeshifter",
            Kind::Soldier => "Soldier",
            Kind::Spy => "Spy",
            Kind::Ambush => "Ambush",
            Kind::Assassination => "Assassination",
            Kind::Conspiracy => "Conspiracy",
            Kind::RoyalDecree => "Royal Decree",
        };
        f.write_str(name)
    }
}

/// A card on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub kind: Kind,
    pub family: FamilyId,
    /// Hidden token count, or [`Card::REVEALED`].
    pub tokens: i32,
}

impl Card {
    /// Token sentinel for a face-up card.
    pub const REVEALED: i32 = -1;

    /// Create a card, rejecting token counts below the sentinel.
    pub fn new(kind: Kind, family: FamilyId, tokens: i32) -> Result<Self, ValidationError> {
        if tokens < Self::REVEALED {
            return Err(ValidationError::InvalidTokens { tokens });
        }
        Ok(Self { kind, family, tokens })
    }

    /// A freshly placed face-down card with no tokens.
    #[must_use]
    pub const fn hidden(kind: Kind, family: FamilyId) -> Self {
        Self { kind, family, tokens: 0 }
    }

    /// A face-up card.
    #[must_use]
    pub const fn face_up(kind: Kind, family: FamilyId) -> Self {
        Self { kind, family, tokens: Self::REVEALED }
    }

    #[must_use]
    pub const fn is_revealed(&self) -> bool {
        self.tokens < 0
    }

    /// Hidden tokens on the card; zero once revealed.
    #[must_use]
    pub const fn hidden_tokens(&self) -> i32 {
        if self.is_revealed() { 0 } else { self.tokens }
    }

    /// The same card turned face-up.
    #[must_use]
    pub const fn reveal(self) -> Self {
        Self { tokens: Self::REVEALED, ..self }
    }

    /// The same card with one more hidden token.
    ///
    /// A revealed card stays revealed.
    pub fn accumulate(self) -> Result<Self, ValidationError> {
        if self.is_revealed() {
            return Ok(self);
        }
        let tokens = self
            .tokens
            .checked_add(1)
            .ok_or(ValidationError::TokenOverflow)?;
        Ok(Self { tokens, ..self })
    }

    /// Tokens paid to the owner when this card is revealed.
    ///
    /// Ambush pays a flat bonus, Conspiracy doubles its hidden tokens,
    /// every other kind pays its hidden tokens as they are.
    pub fn reveal_payout(&self) -> Result<i32, ValidationError> {
        match self.kind {
            Kind::Ambush => Ok(1),
            Kind::Conspiracy => self
                .hidden_tokens()
                .checked_mul(2)
                .ok_or(ValidationError::TokenOverflow),
            _ => Ok(self.hidden_tokens()),
        }
    }
}
