//! Repositories for database operations
//!
//! Each repository is a thin, cloneable handle over the shared pool. All
//! queries are parameterized; all reads filter out soft-deleted rows; every
//! "by uuid" lookup returns `Option` so absence is never confused with a
//! zero-valued row.

pub mod card;
pub mod deck;
pub mod friend_request;
pub mod label;
pub mod study_set;
pub mod token;
pub mod user;
pub mod xp;

pub use card::CardRepository;
pub use deck::DeckRepository;
pub use friend_request::FriendRequestRepository;
pub use label::LabelRepository;
pub use study_set::StudySetRepository;
pub use token::TokenRepository;
pub use user::UserRepository;
pub use xp::XpRepository;
