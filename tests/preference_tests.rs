// Like/dislike state machine and liked-list tests

use lume_people::core::PageLimits;
use lume_people::models::{PairState, PreferenceKind, User};
use lume_people::services::{MemoryStore, NewUser, PreferenceService, PreferenceStore};
use lume_people::PeopleError;
use std::sync::Arc;
use std::time::Duration;

async fn seed_user(store: &MemoryStore, name: &str) -> User {
    store
        .insert_user(NewUser {
            device_id: format!("device-{}", name),
            name: name.to_string(),
            age: Some(27),
            ..Default::default()
        })
        .await
        .unwrap()
}

fn service(store: &Arc<MemoryStore>) -> PreferenceService {
    PreferenceService::new(store.clone(), store.clone(), PageLimits::default())
}

#[tokio::test]
async fn test_like_is_idempotent() {
    let store = Arc::new(MemoryStore::new());
    let a = seed_user(&store, "alice").await;
    let t = seed_user(&store, "tom").await;
    let prefs = service(&store);

    prefs.like_user(a.id, t.id).await.unwrap();
    let first = prefs.list_liked_by(t.id, None, None).await.unwrap();

    prefs.like_user(a.id, t.id).await.unwrap();
    let second = prefs.list_liked_by(t.id, None, None).await.unwrap();

    assert_eq!(prefs.pair_state(a.id, t.id).await.unwrap(), PairState::Liked);
    assert_eq!(store.preference_rows(a.id, t.id, PreferenceKind::Like).await, 1);
    assert_eq!(first.total, 1);
    assert_eq!(second.total, 1);
    assert_eq!(first.items[0].person_id, second.items[0].person_id);
    assert_eq!(first.items[0].liked_at, second.items[0].liked_at);
}

#[tokio::test]
async fn test_dislike_after_like_removes_like() {
    let store = Arc::new(MemoryStore::new());
    let a = seed_user(&store, "alice").await;
    let t = seed_user(&store, "tom").await;
    let prefs = service(&store);

    prefs.like_user(a.id, t.id).await.unwrap();
    prefs.dislike_user(a.id, t.id).await.unwrap();

    assert_eq!(prefs.pair_state(a.id, t.id).await.unwrap(), PairState::Disliked);
    assert_eq!(store.preference_rows(a.id, t.id, PreferenceKind::Like).await, 0);
    assert_eq!(prefs.list_liked_by(t.id, None, None).await.unwrap().total, 0);
}

#[tokio::test]
async fn test_like_after_dislike_removes_dislike() {
    let store = Arc::new(MemoryStore::new());
    let a = seed_user(&store, "alice").await;
    let t = seed_user(&store, "tom").await;
    let prefs = service(&store);

    prefs.dislike_user(a.id, t.id).await.unwrap();
    prefs.dislike_user(a.id, t.id).await.unwrap();
    assert_eq!(prefs.pair_state(a.id, t.id).await.unwrap(), PairState::Disliked);

    prefs.like_user(a.id, t.id).await.unwrap();
    assert_eq!(prefs.pair_state(a.id, t.id).await.unwrap(), PairState::Liked);
    assert_eq!(store.preference_rows(a.id, t.id, PreferenceKind::Dislike).await, 0);
}

#[tokio::test]
async fn test_pairs_are_directed() {
    let store = Arc::new(MemoryStore::new());
    let a = seed_user(&store, "alice").await;
    let t = seed_user(&store, "tom").await;
    let prefs = service(&store);

    prefs.like_user(a.id, t.id).await.unwrap();
    prefs.dislike_user(t.id, a.id).await.unwrap();

    assert_eq!(prefs.pair_state(a.id, t.id).await.unwrap(), PairState::Liked);
    assert_eq!(prefs.pair_state(t.id, a.id).await.unwrap(), PairState::Disliked);
}

#[tokio::test]
async fn test_self_preference_rejected() {
    let store = Arc::new(MemoryStore::new());
    let a = seed_user(&store, "alice").await;
    let prefs = service(&store);

    let liked = prefs.like_user(a.id, a.id).await;
    let disliked = prefs.dislike_user(a.id, a.id).await;

    assert!(matches!(liked, Err(PeopleError::InvalidOperation(ref m)) if m == "Cannot like yourself."));
    assert!(matches!(disliked, Err(PeopleError::InvalidOperation(ref m)) if m == "Cannot dislike yourself."));
    assert_eq!(prefs.pair_state(a.id, a.id).await.unwrap(), PairState::None);

    // Self pairs fail the same way even for ids that do not exist
    assert!(matches!(prefs.like_user(999, 999).await, Err(PeopleError::InvalidOperation(_))));
}

#[tokio::test]
async fn test_unknown_target_not_found() {
    let store = Arc::new(MemoryStore::new());
    let a = seed_user(&store, "alice").await;
    let prefs = service(&store);

    assert!(matches!(prefs.like_user(a.id, 404).await, Err(PeopleError::NotFound(_))));
    assert!(matches!(prefs.dislike_user(a.id, 404).await, Err(PeopleError::NotFound(_))));
    assert_eq!(prefs.pair_state(a.id, 404).await.unwrap(), PairState::None);
}

#[tokio::test]
async fn test_liked_list_most_recent_first() {
    let store = Arc::new(MemoryStore::new());
    let t = seed_user(&store, "tom").await;
    let first = seed_user(&store, "first").await;
    let second = seed_user(&store, "second").await;
    let third = seed_user(&store, "third").await;
    let prefs = service(&store);

    for liker in [&first, &second, &third] {
        prefs.like_user(liker.id, t.id).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let result = prefs.list_liked_by(t.id, None, None).await.unwrap();
    let ids: Vec<i64> = result.items.iter().map(|p| p.person_id).collect();
    assert_eq!(ids, vec![third.id, second.id, first.id]);
    assert_eq!(result.total, 3);
    assert_eq!(result.total_pages, 1);
}

#[tokio::test]
async fn test_liked_list_relike_moves_to_front() {
    let store = Arc::new(MemoryStore::new());
    let t = seed_user(&store, "tom").await;
    let a = seed_user(&store, "alice").await;
    let b = seed_user(&store, "bob").await;
    let prefs = service(&store);

    prefs.like_user(a.id, t.id).await.unwrap();
    prefs.like_user(b.id, t.id).await.unwrap();
    prefs.dislike_user(a.id, t.id).await.unwrap();
    prefs.like_user(a.id, t.id).await.unwrap();

    let result = prefs.list_liked_by(t.id, None, None).await.unwrap();
    let ids: Vec<i64> = result.items.iter().map(|p| p.person_id).collect();
    assert_eq!(ids, vec![a.id, b.id]);
}

#[tokio::test]
async fn test_liked_list_pagination() {
    let store = Arc::new(MemoryStore::new());
    let t = seed_user(&store, "tom").await;
    let mut likers = Vec::new();
    for name in ["a", "b", "c"] {
        likers.push(seed_user(&store, name).await);
    }
    let prefs = service(&store);
    for liker in &likers {
        prefs.like_user(liker.id, t.id).await.unwrap();
    }

    let page = prefs.list_liked_by(t.id, Some(2), Some(1)).await.unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].person_id, likers[1].id);
    assert_eq!(page.page, 2);
    assert_eq!(page.page_size, 1);
    assert_eq!(page.total, 3);
    assert_eq!(page.total_pages, 3);

    let tiny = prefs.list_liked_by(t.id, Some(1), Some(0)).await.unwrap();
    assert_eq!(tiny.page_size, 1);
    assert_eq!(tiny.items.len(), 1);

    let huge = prefs.list_liked_by(t.id, Some(1), Some(1000)).await.unwrap();
    assert_eq!(huge.page_size, 100);
    assert_eq!(huge.items.len(), 3);
}

#[tokio::test]
async fn test_liked_list_shape() {
    let store = Arc::new(MemoryStore::new());
    let t = seed_user(&store, "tom").await;
    let a = seed_user(&store, "alice").await;
    store.add_picture(a.id, "https://img.example/2.jpg", 2).await.unwrap();
    store.add_picture(a.id, "https://img.example/1.jpg", 1).await.unwrap();
    let prefs = service(&store);

    prefs.like_user(a.id, t.id).await.unwrap();

    let result = prefs.list_liked_by(t.id, None, None).await.unwrap();
    let person = &result.items[0];
    assert_eq!(person.name, "alice");
    assert_eq!(person.age, Some(27));
    assert_eq!(person.pictures, vec!["https://img.example/1.jpg", "https://img.example/2.jpg"]);

    // YYYY-MM-DD HH:MM:SS
    assert_eq!(person.liked_at.len(), 19);
    assert!(chrono::NaiveDateTime::parse_from_str(&person.liked_at, "%Y-%m-%d %H:%M:%S").is_ok());
}

#[tokio::test]
async fn test_liked_list_empty_and_missing() {
    let store = Arc::new(MemoryStore::new());
    let t = seed_user(&store, "tom").await;
    let prefs = service(&store);

    let empty = prefs.list_liked_by(t.id, None, None).await.unwrap();
    assert!(empty.items.is_empty());
    assert_eq!(empty.total, 0);
    assert_eq!(empty.total_pages, 1);

    assert!(matches!(prefs.list_liked_by(404, None, None).await, Err(PeopleError::NotFound(_))));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_like_dislike_lands_in_one_state() {
    let store = Arc::new(MemoryStore::new());
    let a = seed_user(&store, "alice").await;
    let t = seed_user(&store, "tom").await;
    let prefs = service(&store);

    let mut handles = Vec::new();
    for i in 0..50 {
        let prefs = prefs.clone();
        let (actor, target) = (a.id, t.id);
        handles.push(tokio::spawn(async move {
            if i % 2 == 0 {
                prefs.like_user(actor, target).await
            } else {
                prefs.dislike_user(actor, target).await
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let likes = store.preference_rows(a.id, t.id, PreferenceKind::Like).await;
    let dislikes = store.preference_rows(a.id, t.id, PreferenceKind::Dislike).await;
    assert_eq!(likes + dislikes, 1);
    assert_ne!(prefs.pair_state(a.id, t.id).await.unwrap(), PairState::None);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_duplicate_likes_single_row() {
    let store = Arc::new(MemoryStore::new());
    let a = seed_user(&store, "alice").await;
    let t = seed_user(&store, "tom").await;
    let prefs = service(&store);

    let handles: Vec<_> = (0..20)
        .map(|_| {
            let prefs = prefs.clone();
            let (actor, target) = (a.id, t.id);
            tokio::spawn(async move { prefs.like_user(actor, target).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(store.count_likes_received(t.id).await.unwrap(), 1);
}

#[tokio::test]
async fn test_popular_targets() {
    let store = Arc::new(MemoryStore::new());
    let popular = seed_user(&store, "popular").await;
    let quiet = seed_user(&store, "quiet").await;
    let prefs = service(&store);

    for i in 0..4 {
        let fan = seed_user(&store, &format!("fan-{}", i)).await;
        prefs.like_user(fan.id, popular.id).await.unwrap();
        if i == 0 {
            prefs.like_user(fan.id, quiet.id).await.unwrap();
        } else {
            prefs.dislike_user(fan.id, quiet.id).await.unwrap();
        }
    }

    let counts = prefs.popular_targets(3).await.unwrap();
    assert_eq!(counts.len(), 1);
    assert_eq!(counts[0].user_id, popular.id);
    assert_eq!(counts[0].total_likes, 4);

    // Strictly greater than the threshold
    assert!(prefs.popular_targets(4).await.unwrap().is_empty());
    assert_eq!(prefs.popular_targets(0).await.unwrap().len(), 2);
}
