//! Application state shared across handlers

use crate::{
    config::ServiceConfig,
    mailer::Mailer,
    repositories::{
        CardRepository, DeckRepository, FriendRequestRepository, LabelRepository,
        StudySetRepository, TokenRepository, UserRepository, XpRepository,
    },
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: ServiceConfig,
    pub user_repository: UserRepository,
    pub token_repository: TokenRepository,
    pub deck_repository: DeckRepository,
    pub card_repository: CardRepository,
    pub study_set_repository: StudySetRepository,
    pub label_repository: LabelRepository,
    pub friend_request_repository: FriendRequestRepository,
    pub xp_repository: XpRepository,
    pub mailer: Option<Mailer>,
}
