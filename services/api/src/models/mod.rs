//! Domain models for the flashcard backend

pub mod card;
pub mod deck;
pub mod friend_request;
pub mod label;
pub mod study_set;
pub mod token;
pub mod user;
pub mod xp;

// Re-export for convenience
pub use card::{Card, NewCard};
pub use deck::{Deck, DeckSummary, NewDeck};
pub use friend_request::FriendRequest;
pub use label::Label;
pub use study_set::{NewStudySet, StudySet, StudySetSummary};
pub use token::Token;
pub use user::{NewUser, PublicUser, User};
pub use xp::{LeaderboardEntry, XpEntry};
