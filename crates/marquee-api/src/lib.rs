//! HTTP surface for Marquee.
//!
//! Exposes an axum [`Router`] backed by any [`BookingStore`]. Each handler
//! returns the JSON view model a page renderer would consume, with the flash
//! messages for that page.
//!
//! | Method | Path | Module |
//! |--------|------|--------|
//! | `GET` | `/` | [`home`] |
//! | `GET`, `POST`, `DELETE` | `/venues/...`, `/get_venue_genres/{id}` | [`venues`] |
//! | `GET`, `POST` | `/artists/...`, `/get_artist_genres/{id}` | [`artists`] |
//! | `GET`, `POST` | `/shows`, `/shows/create` | [`shows`] |

pub mod artists;
pub mod error;
pub mod flash;
pub mod home;
pub mod lookup;
pub mod pages;
pub mod search;
pub mod shows;
pub mod venues;

use std::{fmt, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use chrono::{DateTime, Utc};
use marquee_core::{directory::LocationPolicy, show::whole_seconds, store::BookingStore};
pub use error::ApiError;

// ─── Settings ────────────────────────────────────────────────────────────────

/// Page-building knobs taken from the server configuration.
#[derive(Debug, Clone)]
pub struct Settings {
  /// How many recent artists and venues the home page shows.
  pub recent_limit:    usize,
  pub location_policy: LocationPolicy,
}

impl Default for Settings {
  fn default() -> Self {
    Self { recent_limit: 10, location_policy: LocationPolicy::default() }
  }
}

// ─── Clock ───────────────────────────────────────────────────────────────────

/// Source of the reference instant for past/upcoming decisions.
#[derive(Clone)]
pub struct Clock(Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>);

impl Clock {
  pub fn system() -> Self { Self(Arc::new(Utc::now)) }

  /// A clock frozen at `at`.
  pub fn fixed(at: DateTime<Utc>) -> Self { Self(Arc::new(move || at)) }

  /// The current instant at whole-second precision.
  pub fn now(&self) -> DateTime<Utc> { whole_seconds((self.0)()) }
}

impl fmt::Debug for Clock {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("Clock").field(&self.now()).finish()
  }
}

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: BookingStore> {
  pub store:    Arc<S>,
  pub settings: Arc<Settings>,
  pub clock:    Clock,
}

impl<S: BookingStore> AppState<S> {
  pub fn new(store: S, settings: Settings) -> Self {
    Self { store: Arc::new(store), settings: Arc::new(settings), clock: Clock::system() }
  }

  pub fn with_clock(mut self, clock: Clock) -> Self {
    self.clock = clock;
    self
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build the application router for `state`.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: BookingStore + Clone + Send + Sync + 'static,
{
  Router::new()
    .route("/",                        get(home::index::<S>))
    // Venues
    .route("/venues",                  get(venues::list::<S>))
    .route("/venues/search",           post(venues::search::<S>))
    .route("/venues/create",           get(venues::create_form).post(venues::create::<S>))
    .route("/venues/{id}",             get(venues::detail::<S>).delete(venues::delete::<S>))
    .route("/venues/{id}/edit",        get(venues::edit_form::<S>).post(venues::edit::<S>))
    .route("/get_venue_genres/{id}",   post(venues::genres::<S>))
    // Artists
    .route("/artists",                 get(artists::list::<S>))
    .route("/artists/search",          post(artists::search::<S>))
    .route("/artists/create",          get(artists::create_form).post(artists::create::<S>))
    .route("/artists/{id}",            get(artists::detail::<S>))
    .route("/artists/{id}/edit",       get(artists::edit_form::<S>).post(artists::edit::<S>))
    .route("/get_artist_genres/{id}",  post(artists::genres::<S>))
    // Shows
    .route("/shows",                   get(shows::list::<S>))
    .route("/shows/create",            get(shows::create_form::<S>).post(shows::create::<S>))
    .fallback(not_found)
    .with_state(state)
}

async fn not_found() -> ApiError { ApiError::NotFound("Page not found.".to_string()) }

// ─── Integration tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use chrono::{Duration, TimeZone};
  use marquee_core::{
    artist::NewArtist,
    show::NewShow,
    venue::NewVenue,
  };
  use marquee_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  fn now() -> DateTime<Utc> { Utc.with_ymd_and_hms(2035, 4, 1, 20, 0, 0).unwrap() }

  async fn make_state() -> AppState<SqliteStore> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    AppState::new(store, Settings::default()).with_clock(Clock::fixed(now()))
  }

  fn new_venue(name: &str, city: &str, state: &str) -> NewVenue {
    NewVenue {
      name:                name.into(),
      city:                city.into(),
      state:               state.into(),
      address:             "1015 Folsom Street".into(),
      phone:               "123-123-1234".into(),
      image_link:          "https://images.example.com/venue.jpg".into(),
      facebook_link:       "https://www.facebook.com/venue".into(),
      seeking_talent:      true,
      seeking_description: Some("Looking for local acts".into()),
      genres:              vec!["Jazz".into(), "Folk".into()],
      website:             None,
    }
  }

  fn new_artist(name: &str) -> NewArtist {
    NewArtist {
      name:                name.into(),
      city:                "San Francisco".into(),
      state:               "CA".into(),
      phone:               "326-123-5000".into(),
      image_link:          "https://images.example.com/artist.jpg".into(),
      facebook_link:       "https://www.facebook.com/artist".into(),
      genres:              vec!["Rock n Roll".into()],
      seeking_venue:       false,
      seeking_description: None,
      website:             None,
    }
  }

  fn venue_form(name: &str) -> Value {
    json!({
      "name": name,
      "city": "San Francisco",
      "state": "CA",
      "address": "1015 Folsom Street",
      "phone": "415-000-1234",
      "image_link": "https://images.example.com/hop.jpg",
      "genres": ["Jazz", "Reggae"],
      "facebook_link": "https://www.facebook.com/TheMusicalHop",
      "website_link": "",
      "seeking_talent": false,
      "seeking_description": ""
    })
  }

  async fn send(
    state:  AppState<SqliteStore>,
    method: &str,
    uri:    &str,
    body:   Option<Value>,
  ) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
      Some(v) => builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(v.to_string()))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };
    read(router(state).oneshot(req).await.unwrap()).await
  }

  async fn search(state: AppState<SqliteStore>, uri: &str, term: &str) -> (StatusCode, Value) {
    let req = Request::builder()
      .method("POST")
      .uri(uri)
      .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
      .body(Body::from(format!("search_term={term}")))
      .unwrap();
    read(router(state).oneshot(req).await.unwrap()).await
  }

  async fn read(resp: axum::response::Response) -> (StatusCode, Value) {
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, value)
  }

  // ── Show boundaries ─────────────────────────────────────────────────────────

  #[tokio::test]
  async fn show_starting_now_is_upcoming_but_not_counted() {
    let state = make_state().await;
    let venue = state.store.create_venue(new_venue("The Musical Hop", "San Francisco", "CA")).await.unwrap();
    let artist = state.store.create_artist(new_artist("Guns N Petals")).await.unwrap();
    state
      .store
      .create_show(NewShow { venue_id: venue.id, artist_id: artist.id, start_time: now() })
      .await
      .unwrap();

    let (status, body) = send(state.clone(), "GET", &format!("/artists/{}", artist.id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["upcoming_shows_count"], 1);
    assert_eq!(body["past_shows_count"], 0);
    assert_eq!(body["upcoming_shows"][0]["counterpart_id"], venue.id);
    assert_eq!(body["upcoming_shows"][0]["counterpart_name"], "The Musical Hop");

    let (_, body) = send(state.clone(), "GET", &format!("/venues/{}", venue.id), None).await;
    assert_eq!(body["upcoming_shows_count"], 1);
    assert_eq!(body["upcoming_shows"][0]["counterpart_id"], artist.id);
    assert_eq!(body["upcoming_shows"][0]["counterpart_image_link"], "https://images.example.com/artist.jpg");

    let (status, body) = search(state.clone(), "/artists/search", "petal").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["search_term"], "petal");
    assert_eq!(body["data"][0]["num_upcoming_shows"], 0);

    let (_, body) = send(state, "GET", "/venues", None).await;
    assert_eq!(body["areas"][0]["venues"][0]["num_upcoming_shows"], 0);
  }

  #[tokio::test]
  async fn earlier_shows_are_past_and_later_shows_counted() {
    let state = make_state().await;
    let venue = state.store.create_venue(new_venue("Park Square Live Music & Coffee", "San Francisco", "CA")).await.unwrap();
    let artist = state.store.create_artist(new_artist("Matt Quevedo")).await.unwrap();
    for offset in [-2, 3] {
      state
        .store
        .create_show(NewShow {
          venue_id:   venue.id,
          artist_id:  artist.id,
          start_time: now() + Duration::hours(offset),
        })
        .await
        .unwrap();
    }

    let (_, body) = send(state.clone(), "GET", &format!("/venues/{}", venue.id), None).await;
    assert_eq!(body["past_shows_count"], 1);
    assert_eq!(body["upcoming_shows_count"], 1);
    assert_eq!(body["past_shows"][0]["start_time_formatted"], "Sun 04, 01, 2035 6:00PM");

    let (_, body) = search(state, "/venues/search", "music").await;
    assert_eq!(body["data"][0]["num_upcoming_shows"], 1);
  }

  // ── Venues ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_venue_returns_201_and_is_readable() {
    let state = make_state().await;
    let (status, body) = send(state.clone(), "POST", "/venues/create", Some(venue_form("The Musical Hop"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["flashes"][0]["category"], "alert-info");
    assert_eq!(body["flashes"][0]["message"], "Venue The Musical Hop was successfully listed!");

    let id = body["data"]["id"].as_i64().unwrap();
    let (status, body) = send(state, "GET", &format!("/venues/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "The Musical Hop");
    assert_eq!(body["genres"], json!(["Jazz", "Reggae"]));
    assert_eq!(body["website"], Value::Null);
  }

  #[tokio::test]
  async fn invalid_venue_form_returns_422_with_field_flashes() {
    let state = make_state().await;
    let mut form = venue_form("Dueling Pianos Bar");
    form["city"] = json!("");
    form["phone"] = json!("12");

    let (status, body) = send(state.clone(), "POST", "/venues/create", Some(form)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let messages: Vec<&str> = body["flashes"]
      .as_array()
      .unwrap()
      .iter()
      .map(|f| f["message"].as_str().unwrap())
      .collect();
    assert_eq!(messages, vec![
      "An error occurred. Venue Dueling Pianos Bar could not be listed.",
      "city: This field is required.",
      "phone: Invalid phone number.",
    ]);
    assert_eq!(body["errors"]["city"][0], "This field is required.");

    let (_, body) = send(state, "GET", "/venues", None).await;
    assert_eq!(body["areas"], json!([]));
  }

  #[tokio::test]
  async fn delete_venue_cascades_to_shows() {
    let state = make_state().await;
    let venue = state.store.create_venue(new_venue("The Dueling Pianos Bar", "New York", "NY")).await.unwrap();
    let artist = state.store.create_artist(new_artist("The Wild Sax Band")).await.unwrap();
    let mut show_ids = Vec::new();
    for days in [1, 2] {
      let show = state
        .store
        .create_show(NewShow {
          venue_id:   venue.id,
          artist_id:  artist.id,
          start_time: now() + Duration::days(days),
        })
        .await
        .unwrap();
      show_ids.push(show.id);
    }

    let uri = format!("/venues/{}", venue.id);
    let (status, body) = send(state.clone(), "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["flashes"][0]["message"], "Venue was successfully deleted!");

    let (status, _) = send(state.clone(), "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    for id in show_ids {
      assert!(state.store.get_show(id).await.unwrap().is_none());
    }

    let (_, body) = send(state.clone(), "GET", &format!("/artists/{}", artist.id), None).await;
    assert_eq!(body["upcoming_shows_count"], 0);

    let (status, _) = send(state, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn edit_venue_overwrites_every_field() {
    let state = make_state().await;
    let venue = state.store.create_venue(new_venue("Old Name", "San Francisco", "CA")).await.unwrap();
    let uri = format!("/venues/{}/edit", venue.id);

    let (status, body) = send(state.clone(), "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["form"]["name"], "Old Name");
    assert_eq!(body["form"]["seeking_description"], "Looking for local acts");
    assert_eq!(body["record"]["id"], venue.id);
    assert_eq!(body["states"].as_array().unwrap().len(), 51);

    let (status, body) = send(state.clone(), "POST", &uri, Some(venue_form("New Name"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["flashes"][0]["message"], "Venue New Name was successfully edited!");

    let stored = state.store.get_venue(venue.id).await.unwrap().unwrap();
    assert_eq!(stored.name, "New Name");
    assert!(!stored.seeking_talent);
    assert_eq!(stored.seeking_description, None);

    let (status, _) = send(state, "POST", "/venues/999/edit", Some(venue_form("Ghost"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn venue_list_groups_by_area() {
    let state = make_state().await;
    state.store.create_venue(new_venue("The Musical Hop", "San Francisco", "CA")).await.unwrap();
    state.store.create_venue(new_venue("The Dueling Pianos Bar", "New York", "NY")).await.unwrap();
    state.store.create_venue(new_venue("Park Square", "San Francisco", "CA")).await.unwrap();

    let (status, body) = send(state, "GET", "/venues", None).await;
    assert_eq!(status, StatusCode::OK);
    let areas = body["areas"].as_array().unwrap();
    assert_eq!(areas.len(), 2);
    assert_eq!(areas[0]["city"], "San Francisco");
    let names: Vec<&str> = areas[0]["venues"]
      .as_array()
      .unwrap()
      .iter()
      .map(|v| v["name"].as_str().unwrap())
      .collect();
    assert_eq!(names, vec!["The Musical Hop", "Park Square"]);
    assert_eq!(areas[1]["venues"][0]["name"], "The Dueling Pianos Bar");
  }

  #[tokio::test]
  async fn home_groups_recent_venues_by_city_only() {
    let state = make_state().await;
    let ca = state.store.create_venue(new_venue("Bay Hall", "SF", "CA")).await.unwrap();
    let ny = state.store.create_venue(new_venue("Other SF", "SF", "NY")).await.unwrap();
    state.store.create_artist(new_artist("First")).await.unwrap();
    state.store.create_artist(new_artist("Second")).await.unwrap();

    let (status, body) = send(state, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recent_artists"][0]["name"], "Second");

    let areas = body["areas"].as_array().unwrap();
    assert_eq!(areas.len(), 2);
    assert_eq!(areas[0]["state"], "CA");
    let ids: Vec<i64> = areas[0]["venues"]
      .as_array()
      .unwrap()
      .iter()
      .map(|v| v["id"].as_i64().unwrap())
      .collect();
    assert_eq!(ids, vec![ny.id, ca.id]);
  }

  #[tokio::test]
  async fn city_and_state_policy_separates_areas() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let settings = Settings { location_policy: LocationPolicy::CityAndState, ..Settings::default() };
    let state = AppState::new(store, settings).with_clock(Clock::fixed(now()));
    let ca = state.store.create_venue(new_venue("Bay Hall", "SF", "CA")).await.unwrap();
    let ny = state.store.create_venue(new_venue("Other SF", "SF", "NY")).await.unwrap();

    let (_, body) = send(state, "GET", "/venues", None).await;
    assert_eq!(body["areas"][0]["venues"], json!([{ "id": ca.id, "name": "Bay Hall", "num_upcoming_shows": 0 }]));
    assert_eq!(body["areas"][1]["venues"][0]["id"], ny.id);
  }

  #[tokio::test]
  async fn genres_endpoints_return_stored_genres() {
    let state = make_state().await;
    let venue = state.store.create_venue(new_venue("The Musical Hop", "San Francisco", "CA")).await.unwrap();
    let artist = state.store.create_artist(new_artist("Guns N Petals")).await.unwrap();

    let (status, body) = send(state.clone(), "POST", &format!("/get_venue_genres/{}", venue.id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "venue_genres": ["Jazz", "Folk"] }));

    let (_, body) = send(state.clone(), "POST", &format!("/get_artist_genres/{}", artist.id), None).await;
    assert_eq!(body, json!({ "artist_genres": ["Rock n Roll"] }));

    let (status, _) = send(state, "POST", "/get_artist_genres/404", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  // ── Artists ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn artist_create_list_and_search() {
    let state = make_state().await;
    let form = json!({
      "name": "The Wild Sax Band",
      "city": "San Francisco",
      "state": "CA",
      "phone": "432.325.5432",
      "image_link": "https://images.example.com/sax.jpg",
      "genres": ["Jazz", "Classical"],
      "facebook_link": "https://www.facebook.com/sax",
      "website_link": "https://sax.example.com",
      "seeking_venue": true,
      "seeking_description": "Available for weddings"
    });
    let (status, body) = send(state.clone(), "POST", "/artists/create", Some(form)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["website"], "https://sax.example.com");

    let (_, body) = send(state.clone(), "GET", "/artists", None).await;
    assert_eq!(body, json!([{ "id": 1, "name": "The Wild Sax Band" }]));

    let (_, body) = search(state.clone(), "/artists/search", "SAX").await;
    assert_eq!(body["count"], 1);

    let (_, body) = search(state, "/artists/search", "%25").await;
    assert_eq!(body["count"], 0);
  }

  #[tokio::test]
  async fn artist_edit_rejects_unknown_genre() {
    let state = make_state().await;
    let artist = state.store.create_artist(new_artist("Guns N Petals")).await.unwrap();
    let (_, mut form) = send(state.clone(), "GET", &format!("/artists/{}/edit", artist.id), None).await;
    let mut form = form["form"].take();
    form["genres"] = json!(["Polka"]);

    let (status, body) = send(state, "POST", &format!("/artists/{}/edit", artist.id), Some(form)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["flashes"][0]["message"], "An error occurred. Artist Guns N Petals could not be edited.");
    assert_eq!(body["flashes"][1]["message"], "genres: Not a valid choice.");
  }

  // ── Shows ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_show_and_list() {
    let state = make_state().await;
    let venue = state.store.create_venue(new_venue("The Musical Hop", "San Francisco", "CA")).await.unwrap();
    let artist = state.store.create_artist(new_artist("Guns N Petals")).await.unwrap();

    let (status, body) = send(state.clone(), "GET", "/shows/create", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["form"]["start_time"], "2035-04-01 20:00:00");
    assert_eq!(body["venues"][0]["id"], venue.id);

    let form = json!({ "venue_id": venue.id, "artist_id": artist.id, "start_time": "2035-05-21 21:30:00" });
    let (status, body) = send(state.clone(), "POST", "/shows/create", Some(form)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["flashes"][0]["message"], "Show was successfully listed!");

    let (_, body) = send(state, "GET", "/shows", None).await;
    assert_eq!(body, json!([{
      "venue_id": venue.id,
      "venue_name": "The Musical Hop",
      "artist_id": artist.id,
      "artist_name": "Guns N Petals",
      "artist_image_link": "https://images.example.com/artist.jpg",
      "start_time": "2035-05-21 21:30:00"
    }]));
  }

  #[tokio::test]
  async fn show_for_missing_venue_is_a_conflict() {
    let state = make_state().await;
    let artist = state.store.create_artist(new_artist("Guns N Petals")).await.unwrap();
    let form = json!({ "venue_id": 42, "artist_id": artist.id, "start_time": "2035-05-21 21:30:00" });

    let (status, body) = send(state.clone(), "POST", "/shows/create", Some(form)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["flashes"][0]["message"], "An error occurred. Show could not be listed.");
    assert!(body.get("errors").is_none());

    let (_, body) = send(state, "GET", "/shows", None).await;
    assert_eq!(body, json!([]));
  }

  #[tokio::test]
  async fn show_form_requires_all_fields() {
    let state = make_state().await;
    let (status, body) = send(state, "POST", "/shows/create", Some(json!({ "start_time": "soon" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"]["artist_id"][0], "This field is required.");
    assert_eq!(body["errors"]["start_time"][0], "Not a valid datetime value.");
  }

  // ── Search form ─────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn search_without_term_is_rejected() {
    let state = make_state().await;
    state.store.create_venue(new_venue("The Musical Hop", "San Francisco", "CA")).await.unwrap();

    for uri in ["/venues/search", "/artists/search"] {
      let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("other=1"))
        .unwrap();
      let resp = router(state.clone()).oneshot(req).await.unwrap();
      assert!(resp.status().is_client_error(), "{uri}: {}", resp.status());
    }

    let (status, body) = search(state, "/venues/search", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
  }

  // ── Fallback ────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn unknown_route_returns_404_json() {
    let state = make_state().await;
    let (status, body) = send(state, "GET", "/nowhere", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["flashes"][0]["category"], "alert-danger");
  }
}
