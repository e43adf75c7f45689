//! Database-backed integration tests
//!
//! These run against the database named by `DATABASE_URL` with migrations
//! applied, so they are ignored by default:
//!
//! ```sh
//! cargo test -p api -- --ignored
//! ```

use common::database::{DatabaseConfig, init_pool};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    models::{NewCard, NewDeck, NewStudySet, NewUser},
    password::{digests_match, generate_random_id, generate_salt, hash_password},
    repositories::{
        CardRepository, DeckRepository, FriendRequestRepository, LabelRepository,
        StudySetRepository, TokenRepository, UserRepository, XpRepository,
    },
};

async fn test_pool() -> PgPool {
    let config = DatabaseConfig::from_env().expect("DATABASE_URL must be set");
    init_pool(&config).await.expect("failed to connect")
}

async fn create_test_user(pool: &PgPool, tag: &str) -> crate::models::User {
    let repo = UserRepository::new(pool.clone());
    let salt = generate_salt();
    let new_user = NewUser {
        user_name: format!("Test {}", tag),
        user_email: format!("{}-{}@example.com", tag, Uuid::new_v4()),
        hashed_password: hash_password("hunter2", &salt),
        password_salt: salt,
        random_id: generate_random_id(),
    };
    repo.create(&new_user).await.expect("failed to create user")
}

#[tokio::test]
#[ignore]
async fn test_register_verify_login_round_trip() {
    let pool = test_pool().await;
    let users = UserRepository::new(pool.clone());
    let tokens = TokenRepository::new(pool.clone(), 259_200);

    let user = create_test_user(&pool, "login").await;
    assert!(!user.email_verified);

    // The stored digest must verify against the original password
    let candidate = hash_password("hunter2", &user.password_salt);
    assert!(digests_match(&candidate, &user.hashed_password));

    assert!(users.mark_email_verified(user.user_id).await.unwrap());
    let verified = users.find_by_id(user.user_id).await.unwrap().unwrap();
    assert!(verified.email_verified);

    // Issue a token, resolve it, revoke it, and see it stop resolving
    let token = tokens.issue(user.user_id).await.unwrap();
    let resolved = tokens
        .resolve(&format!("Bearer {}", token.token_uuid))
        .await
        .unwrap()
        .expect("freshly issued token must resolve");
    assert_eq!(resolved.user_id, user.user_id);

    assert!(tokens.revoke(token.token_id).await.unwrap());
    assert!(
        tokens
            .resolve(&token.token_uuid.to_string())
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
#[ignore]
async fn test_login_reissue_revokes_previous_token() {
    let pool = test_pool().await;
    let tokens = TokenRepository::new(pool.clone(), 259_200);
    let user = create_test_user(&pool, "reissue").await;

    let first = tokens.issue(user.user_id).await.unwrap();
    tokens.revoke_active_for_user(user.user_id).await.unwrap();
    let second = tokens.issue(user.user_id).await.unwrap();

    assert!(
        tokens
            .resolve(&first.token_uuid.to_string())
            .await
            .unwrap()
            .is_none(),
        "old token must be dead after reissue"
    );
    assert!(
        tokens
            .resolve(&second.token_uuid.to_string())
            .await
            .unwrap()
            .is_some()
    );
}

#[tokio::test]
#[ignore]
async fn test_deck_and_card_lifecycle() {
    let pool = test_pool().await;
    let decks = DeckRepository::new(pool.clone());
    let cards = CardRepository::new(pool.clone());
    let user = create_test_user(&pool, "decks").await;

    let deck = decks
        .create(&NewDeck {
            deck_name: "Geography".to_string(),
            creator_user_id: user.user_id,
            is_public: false,
            is_in_set: false,
            study_set_id: None,
        })
        .await
        .unwrap();

    let card = cards
        .create(&NewCard {
            front_text: "Capital of France".to_string(),
            back_text: "Paris".to_string(),
            deck_id: deck.deck_id,
        })
        .await
        .unwrap();

    let listed = cards.list_for_deck(deck.deck_id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].card_uuid, card.card_uuid);

    let updated = cards
        .update_text(card.card_id, "Capital of Italy", "Rome")
        .await
        .unwrap()
        .expect("card must still exist");
    assert_eq!(updated.back_text, "Rome");

    assert!(cards.soft_delete(card.card_id).await.unwrap());
    assert!(cards.list_for_deck(deck.deck_id).await.unwrap().is_empty());

    // Soft-deleting the deck hides it from uuid lookup
    assert!(decks.soft_delete(deck.deck_id).await.unwrap());
    assert!(decks.find_by_uuid(deck.deck_uuid).await.unwrap().is_none());
}

#[tokio::test]
#[ignore]
async fn test_private_decks_hidden_from_other_users() {
    let pool = test_pool().await;
    let decks = DeckRepository::new(pool.clone());
    let user = create_test_user(&pool, "privacy").await;

    decks
        .create(&NewDeck {
            deck_name: "Secret".to_string(),
            creator_user_id: user.user_id,
            is_public: false,
            is_in_set: false,
            study_set_id: None,
        })
        .await
        .unwrap();
    decks
        .create(&NewDeck {
            deck_name: "Shared".to_string(),
            creator_user_id: user.user_id,
            is_public: true,
            is_in_set: false,
            study_set_id: None,
        })
        .await
        .unwrap();

    let own_view = decks.list_for_user(user.user_id, true).await.unwrap();
    assert_eq!(own_view.len(), 2);

    let foreign_view = decks.list_for_user(user.user_id, false).await.unwrap();
    assert_eq!(foreign_view.len(), 1);
    assert_eq!(foreign_view[0].deck_name, "Shared");
}

#[tokio::test]
#[ignore]
async fn test_label_attachment_is_idempotent() {
    let pool = test_pool().await;
    let decks = DeckRepository::new(pool.clone());
    let labels = LabelRepository::new(pool.clone());
    let user = create_test_user(&pool, "labels").await;

    let deck = decks
        .create(&NewDeck {
            deck_name: "Vocab".to_string(),
            creator_user_id: user.user_id,
            is_public: true,
            is_in_set: false,
            study_set_id: None,
        })
        .await
        .unwrap();

    let label_name = format!("language-{}", Uuid::new_v4());
    labels.attach_to_deck(deck.deck_id, &label_name).await.unwrap();
    labels.attach_to_deck(deck.deck_id, &label_name).await.unwrap();

    let names = labels.deck_label_names(deck.deck_id).await.unwrap();
    assert_eq!(names, vec![label_name]);
}

#[tokio::test]
#[ignore]
async fn test_study_set_edit_rights() {
    let pool = test_pool().await;
    let study_sets = StudySetRepository::new(pool.clone());
    let creator = create_test_user(&pool, "set-creator").await;
    let editor = create_test_user(&pool, "set-editor").await;
    let viewer = create_test_user(&pool, "set-viewer").await;

    let set = study_sets
        .create(&NewStudySet {
            study_set_name: "Biology".to_string(),
            creator_user_id: creator.user_id,
            is_public: false,
        })
        .await
        .unwrap();

    study_sets
        .invite_user(set.study_set_id, editor.user_id, true)
        .await
        .unwrap();
    study_sets
        .invite_user(set.study_set_id, viewer.user_id, false)
        .await
        .unwrap();

    assert!(study_sets.can_edit(&set, creator.user_id).await.unwrap());
    assert!(study_sets.can_edit(&set, editor.user_id).await.unwrap());
    assert!(!study_sets.can_edit(&set, viewer.user_id).await.unwrap());

    // Revoking the invitation revokes the rights
    assert!(
        study_sets
            .remove_invite(set.study_set_id, editor.user_id)
            .await
            .unwrap()
    );
    assert!(!study_sets.can_edit(&set, editor.user_id).await.unwrap());
}

#[tokio::test]
#[ignore]
async fn test_same_day_xp_collapses_into_one_row() {
    let pool = test_pool().await;
    let xp = XpRepository::new(pool.clone());
    let user = create_test_user(&pool, "xp").await;

    let first = xp.add(user.user_id, 10).await.unwrap();
    let second = xp.add(user.user_id, 15).await.unwrap();

    assert_eq!(first.xp_id, second.xp_id, "same-day adds share one row");
    assert_eq!(second.xp_count, 25);

    let total = xp.sum(user.user_id, None, None).await.unwrap();
    assert_eq!(total, 25);
}

#[tokio::test]
#[ignore]
async fn test_user_search_matches_exactly() {
    let pool = test_pool().await;
    let users = UserRepository::new(pool.clone());
    let user = create_test_user(&pool, "search").await;

    // A prefix of the name is not a match
    let prefix: String = user.user_name.chars().take(6).collect();
    assert!(users.search(&prefix, 1).await.unwrap().is_empty());

    let found = users.search(&user.user_name, 1).await.unwrap();
    assert!(found.iter().any(|u| u.user_uuid == user.user_uuid));

    let by_email = users.search(&user.user_email, 1).await.unwrap();
    assert_eq!(by_email.len(), 1);
    assert_eq!(by_email[0].user_uuid, user.user_uuid);
}

#[tokio::test]
#[ignore]
async fn test_add_with_duplicate_day_rows_increments_only_one() {
    let pool = test_pool().await;
    let xp = XpRepository::new(pool.clone());
    let user = create_test_user(&pool, "xp-dup").await;

    let first = xp.add(user.user_id, 5).await.unwrap();

    // Simulate the duplicate a lost first-add race would leave behind
    sqlx::query("INSERT INTO xp (user_id, xp_count) VALUES ($1, $2)")
        .bind(user.user_id)
        .bind(7)
        .execute(&pool)
        .await
        .unwrap();

    let updated = xp.add(user.user_id, 10).await.unwrap();

    // Only the oldest row accumulates; the total grows by exactly 10
    assert_eq!(updated.xp_id, first.xp_id);
    assert_eq!(updated.xp_count, 15);
    assert_eq!(xp.sum(user.user_id, None, None).await.unwrap(), 22);
}

#[tokio::test]
#[ignore]
async fn test_leaderboard_does_not_double_count_mutual_requests() {
    let pool = test_pool().await;
    let friends = FriendRequestRepository::new(pool.clone());
    let xp = XpRepository::new(pool.clone());
    let alice = create_test_user(&pool, "dup-alice").await;
    let bob = create_test_user(&pool, "dup-bob").await;

    // Two pending requests between the same pair, one per direction
    friends.create(alice.user_id, bob.user_id).await.unwrap();
    friends.create(bob.user_id, alice.user_id).await.unwrap();

    xp.add(bob.user_id, 40).await.unwrap();

    let (start, end) = crate::repositories::xp::current_week_window(chrono::Utc::now());
    let board = xp
        .leaderboard(alice.user_id, false, start, end)
        .await
        .unwrap();

    let bob_rows: Vec<_> = board
        .iter()
        .filter(|e| e.user_uuid == bob.user_uuid)
        .collect();
    assert_eq!(bob_rows.len(), 1, "each connected user appears once");
    assert_eq!(bob_rows[0].xp_count, 40);
}

#[tokio::test]
#[ignore]
async fn test_leaderboard_covers_connected_users() {
    let pool = test_pool().await;
    let friends = FriendRequestRepository::new(pool.clone());
    let xp = XpRepository::new(pool.clone());
    let alice = create_test_user(&pool, "lb-alice").await;
    let bob = create_test_user(&pool, "lb-bob").await;
    let carol = create_test_user(&pool, "lb-carol").await;

    let request = friends.create(alice.user_id, bob.user_id).await.unwrap();
    friends.accept(request.friend_request_id).await.unwrap();
    // carol sends a request that is never accepted
    friends.create(carol.user_id, alice.user_id).await.unwrap();

    xp.add(bob.user_id, 40).await.unwrap();
    xp.add(carol.user_id, 5).await.unwrap();

    let (start, end) = crate::repositories::xp::current_week_window(chrono::Utc::now());

    let everyone = xp
        .leaderboard(alice.user_id, false, start, end)
        .await
        .unwrap();
    let names: Vec<_> = everyone.iter().map(|e| e.user_uuid).collect();
    assert!(names.contains(&bob.user_uuid));
    assert!(names.contains(&carol.user_uuid));

    let accepted_only = xp
        .leaderboard(alice.user_id, true, start, end)
        .await
        .unwrap();
    let names: Vec<_> = accepted_only.iter().map(|e| e.user_uuid).collect();
    assert!(names.contains(&bob.user_uuid));
    assert!(!names.contains(&carol.user_uuid));
}
