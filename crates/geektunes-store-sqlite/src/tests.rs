//! Integration tests for `SqliteStore` against an in-memory database.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, Utc};
use geektunes_core::{
  artist::{Artist, ArtistUpdate, NewArtist},
  notification::{NewNotification, NotificationKind},
  project::{NewProject, ProjectStatus, ProjectUpdate},
  store::CatalogStore,
  user::{NewSession, NewUser, User, UserUpdate},
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn artist(name: &str, roles: &[&str], is_active: bool) -> NewArtist {
  NewArtist {
    name: name.into(),
    roles: roles.iter().map(|r| r.to_string()).collect(),
    is_active: Some(is_active),
    ..Default::default()
  }
}

async fn seeded() -> (SqliteStore, Artist, Artist) {
  let s = store().await;
  let klzinn = s
    .create_artist(artist("klzinn", &["cantor", "editor"], true))
    .await
    .unwrap();
  let old = s
    .create_artist(artist("Old One", &["cantor"], false))
    .await
    .unwrap();
  (s, klzinn, old)
}

async fn user(s: &SqliteStore, username: &str) -> User {
  s.create_user(NewUser::new(username, "$argon2id$fake")).await.unwrap()
}

fn names(artists: &[Artist]) -> Vec<&str> {
  artists.iter().map(|a| a.name.as_str()).collect()
}

fn is_invalid(err: &Error) -> bool {
  matches!(err, Error::Core(geektunes_core::Error::InvalidArgument(_)))
}

// ─── Artists ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn artist_round_trips_every_column() {
  let s = store().await;
  let mut links = BTreeMap::new();
  links.insert("instagram".to_owned(), "https://instagram.com/klzinn".to_owned());

  let input = NewArtist {
    name: "klzinn".into(),
    avatar: "/avatars/klzinn.png".into(),
    description: "Vocalista e editor".into(),
    roles: vec!["cantor".into(), "editor".into()],
    social_links: links,
    music_url: Some("https://soundcloud.com/klzinn".into()),
    musical_styles: vec!["trap".into()],
    artist_types: vec!["solo".into()],
    ..Default::default()
  };
  let created = s.create_artist(input).await.unwrap();
  let fetched = s.get_artist(created.id).await.unwrap().unwrap();

  assert_eq!(fetched, created);
  assert!(fetched.is_active);
  assert_eq!(fetched.likes, 0);
  assert_eq!(fetched.social_links["instagram"], "https://instagram.com/klzinn");
}

#[tokio::test]
async fn get_artist_missing_returns_none() {
  let s = store().await;
  assert!(s.get_artist(42).await.unwrap().is_none());
}

#[tokio::test]
async fn inactive_artist_hidden_from_listings() {
  let (s, _, old) = seeded().await;

  assert_eq!(names(&s.get_all_artists().await.unwrap()), ["klzinn"]);
  assert_eq!(names(&s.get_artists_by_role("cantor").await.unwrap()), ["klzinn"]);
  assert!(s.search_artists("old").await.unwrap().is_empty());

  assert!(!s.get_artist(old.id).await.unwrap().unwrap().is_active);
  assert_eq!(s.get_all_artists_including_inactive().await.unwrap().len(), 2);
}

#[tokio::test]
async fn role_filter_is_exact() {
  let (s, ..) = seeded().await;
  assert_eq!(names(&s.get_artists_by_role("editor").await.unwrap()), ["klzinn"]);
  assert!(s.get_artists_by_role("Cantor").await.unwrap().is_empty());
  assert!(s.get_artists_by_role("cant").await.unwrap().is_empty());
  assert!(s.get_artists_by_role("baterista").await.unwrap().is_empty());
}

#[tokio::test]
async fn search_ignores_case_across_fields() {
  let s = store().await;
  s.create_artist(NewArtist {
    description: "Produtor de beats".into(),
    ..NewArtist::named("Ézio")
  })
  .await
  .unwrap();
  s.create_artist(artist("Nina", &["Guitarrista"], true))
    .await
    .unwrap();

  assert_eq!(names(&s.search_artists("éZ").await.unwrap()), ["Ézio"]);
  assert_eq!(names(&s.search_artists("BEATS").await.unwrap()), ["Ézio"]);
  assert_eq!(names(&s.search_artists("guitar").await.unwrap()), ["Nina"]);
  assert!(s.search_artists("zzz").await.unwrap().is_empty());
}

#[tokio::test]
async fn blank_search_is_invalid_argument() {
  let (s, ..) = seeded().await;
  assert!(is_invalid(&s.search_artists("").await.unwrap_err()));
  assert!(is_invalid(&s.search_artists("  ").await.unwrap_err()));
}

#[tokio::test]
async fn update_and_deactivate() {
  let (s, klzinn, old) = seeded().await;

  let revived = s
    .update_artist(old.id, ArtistUpdate { is_active: Some(true), ..Default::default() })
    .await
    .unwrap()
    .unwrap();
  assert!(revived.is_active);

  let renamed = s
    .update_artist(
      klzinn.id,
      ArtistUpdate { name: Some("KLZ".into()), ..Default::default() },
    )
    .await
    .unwrap()
    .unwrap();
  assert_eq!(s.get_artist(klzinn.id).await.unwrap().unwrap(), renamed);

  assert!(s.deactivate_artist(klzinn.id).await.unwrap());
  assert_eq!(names(&s.get_all_artists().await.unwrap()), ["Old One"]);
  assert!(!s.deactivate_artist(9999).await.unwrap());
  assert!(s.update_artist(9999, ArtistUpdate::default()).await.unwrap().is_none());
}

// ─── Users & sessions ────────────────────────────────────────────────────────

#[tokio::test]
async fn duplicate_username_is_duplicate() {
  let s = store().await;
  let first = user(&s, "demo").await;
  let err = s
    .create_user(NewUser::new("demo", "other"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Duplicate(_)));
  assert!(matches!(
    geektunes_core::Error::from(err),
    geektunes_core::Error::DuplicateKey(_)
  ));
  assert_eq!(s.list_users().await.unwrap(), vec![first]);
}

#[tokio::test]
async fn user_update_and_admin_toggle() {
  let s = store().await;
  let u = user(&s, "demo").await;
  assert_eq!(s.get_user_by_username("demo").await.unwrap().unwrap().id, u.id);

  let updated = s
    .update_user(
      &u.id,
      UserUpdate { email: Some("demo@geektunes.dev".into()), ..Default::default() },
    )
    .await
    .unwrap()
    .unwrap();
  assert_eq!(updated.email.as_deref(), Some("demo@geektunes.dev"));
  assert_eq!(s.get_user(&u.id).await.unwrap().unwrap(), updated);

  assert!(s.set_admin(&u.id, true).await.unwrap().unwrap().is_admin);
  assert!(s.set_admin("missing", true).await.unwrap().is_none());
}

#[tokio::test]
async fn sessions_expire_and_delete() {
  let s = store().await;
  let u = user(&s, "demo").await;
  let now = Utc::now();
  s.create_session(NewSession {
    token_hash: "digest".into(),
    user_id:    u.id.clone(),
    created_at: now,
    expires_at: now + Duration::hours(1),
  })
  .await
  .unwrap();

  assert_eq!(s.get_session_user("digest", now).await.unwrap().unwrap().id, u.id);
  assert!(s.get_session_user("digest", now + Duration::hours(2)).await.unwrap().is_none());
  assert!(s.get_session_user("other", now).await.unwrap().is_none());
  assert!(s.delete_session("digest").await.unwrap());
  assert!(!s.delete_session("digest").await.unwrap());
}

#[tokio::test]
async fn new_session_purges_expired_ones() {
  let s = store().await;
  let u = user(&s, "demo").await;
  let now = Utc::now();
  let session = |token: &str, created_at, expires_at| NewSession {
    token_hash: token.into(),
    user_id: u.id.clone(),
    created_at,
    expires_at,
  };

  s.create_session(session("stale", now - Duration::hours(2), now - Duration::hours(1)))
    .await
    .unwrap();
  s.create_session(session("live", now - Duration::hours(2), now + Duration::hours(1)))
    .await
    .unwrap();
  s.create_session(session("fresh", now, now + Duration::hours(1)))
    .await
    .unwrap();

  assert!(!s.delete_session("stale").await.unwrap());
  assert!(s.delete_session("live").await.unwrap());
  assert!(s.delete_session("fresh").await.unwrap());
}

#[test]
fn timestamps_sort_as_text() {
  let early = Utc::now();
  let later = early + Duration::milliseconds(1);
  let (a, b) = (crate::encode::encode_dt(early), crate::encode::encode_dt(later));
  assert_eq!(a.len(), b.len());
  assert!(a < b);
  assert_eq!(crate::encode::decode_dt(&a).unwrap(), early);
}

// ─── Likes ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn likes_are_unique_and_counted() {
  let (s, klzinn, old) = seeded().await;
  let a = user(&s, "a").await;
  let b = user(&s, "b").await;

  let like = s.like_artist(&a.id, klzinn.id).await.unwrap().unwrap();
  assert_eq!(like.artist_id, klzinn.id);
  assert!(matches!(
    s.like_artist(&a.id, klzinn.id).await,
    Err(Error::Duplicate(_))
  ));
  s.like_artist(&b.id, klzinn.id).await.unwrap();
  assert_eq!(s.get_artist(klzinn.id).await.unwrap().unwrap().likes, 2);
  assert_eq!(s.liked_artist_ids(&a.id).await.unwrap(), [klzinn.id]);

  assert!(s.unlike_artist(&a.id, klzinn.id).await.unwrap());
  assert!(!s.unlike_artist(&a.id, klzinn.id).await.unwrap());
  assert_eq!(s.get_artist(klzinn.id).await.unwrap().unwrap().likes, 1);
  assert!(s.liked_artist_ids(&a.id).await.unwrap().is_empty());

  assert!(s.like_artist(&a.id, old.id).await.unwrap().is_none());
  assert!(s.like_artist(&a.id, 9999).await.unwrap().is_none());
  assert!(is_invalid(&s.like_artist("ghost", klzinn.id).await.unwrap_err()));
}

// ─── Projects ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn project_round_trip_and_collaborators() {
  let (s, klzinn, _) = seeded().await;

  let input = NewProject {
    genres: vec!["trap".into()],
    collaborators: vec![klzinn.id],
    status: ProjectStatus::Released,
    release_date: NaiveDate::from_ymd_opt(2024, 3, 1),
    ..NewProject::named("Chaos Squad Vol. 1")
  };
  let project = s.create_project(input).await.unwrap();
  assert_eq!(s.get_project(project.id).await.unwrap().unwrap(), project);
  assert_eq!(s.list_projects().await.unwrap(), vec![project.clone()]);

  let bad = NewProject { collaborators: vec![4242], ..NewProject::named("Ghost feat.") };
  assert!(is_invalid(&s.create_project(bad).await.unwrap_err()));

  let err = s
    .update_project(
      project.id,
      ProjectUpdate { collaborators: Some(vec![4242]), ..Default::default() },
    )
    .await
    .unwrap_err();
  assert!(is_invalid(&err));

  let finished = s
    .update_project(
      project.id,
      ProjectUpdate { status: Some(ProjectStatus::Finished), ..Default::default() },
    )
    .await
    .unwrap()
    .unwrap();
  assert_eq!(
    s.get_project(project.id).await.unwrap().unwrap().status,
    finished.status
  );

  s.update_project(
    project.id,
    ProjectUpdate { release_date: Some(None), ..Default::default() },
  )
  .await
  .unwrap();
  assert_eq!(s.get_project(project.id).await.unwrap().unwrap().release_date, None);

  assert!(s.delete_project(project.id).await.unwrap());
  assert!(s.get_project(project.id).await.unwrap().is_none());
  assert!(!s.delete_project(project.id).await.unwrap());
}

// ─── Notifications ───────────────────────────────────────────────────────────

#[tokio::test]
async fn notifications_newest_first_and_active_only() {
  let s = store().await;
  for (title, is_active) in [("first", true), ("hidden", false), ("second", true)] {
    s.create_notification(NewNotification {
      title: title.into(),
      message: "hello".into(),
      kind: NotificationKind::Mention,
      is_active: Some(is_active),
    })
    .await
    .unwrap();
  }

  let listed = s.list_notifications().await.unwrap();
  let titles: Vec<_> = listed.iter().map(|n| n.title.as_str()).collect();
  assert_eq!(titles, ["second", "first"]);
  assert_eq!(listed[0].kind, NotificationKind::Mention);

  assert!(s.delete_notification(listed[0].id).await.unwrap());
  assert_eq!(s.list_notifications().await.unwrap().len(), 1);
}

// ─── Chat ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn chat_history_last_n_oldest_first() {
  let s = store().await;
  let u = user(&s, "demo").await;
  for text in ["one", "two", "  three  "] {
    s.create_message(&u.id, text).await.unwrap();
  }

  let last_two = s.list_messages(2).await.unwrap();
  let contents: Vec<_> = last_two.iter().map(|m| m.content.as_str()).collect();
  assert_eq!(contents, ["two", "three"]);
  assert_eq!(last_two[1].username, "demo");
  assert_eq!(s.list_messages(50).await.unwrap().len(), 3);

  assert!(is_invalid(&s.create_message("ghost", "hi").await.unwrap_err()));
  assert!(is_invalid(&s.create_message(&u.id, "   ").await.unwrap_err()));
}
