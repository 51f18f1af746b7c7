//! Command handler tests against a mock data store.

use serde_json::json;
use tempfile::TempDir;
use tunify_cli::{App, AppConfig, CliError};
use tunify_core::UserId;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer, dir: &TempDir) -> AppConfig {
    AppConfig {
        store_url: server.uri(),
        search_url: format!("{}/search", server.uri()),
        session_file: dir.path().join("session.json"),
        ..AppConfig::default()
    }
}

fn profile(history: serde_json::Value) -> serde_json::Value {
    json!({
        "id": 1,
        "username": "ana",
        "likedSongIds": ["7"],
        "playlists": [],
        "history": history
    })
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/authUsers"))
        .and(query_param("username", "ana"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "username": "ana", "password": "secret" }
        ])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([profile(json!([]))])))
        .mount(server)
        .await;
}

async fn mount_profile(server: &MockServer, history: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/users/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile(history)))
        .mount(server)
        .await;
}

async fn signed_in_app(server: &MockServer, dir: &TempDir) -> App {
    mount_login(server).await;
    let app = App::from_config(&config_for(server, dir)).unwrap();
    app.login("ana", "secret").await.unwrap();
    app
}

#[tokio::test]
async fn test_login_survives_restart() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    signed_in_app(&mock_server, &dir).await;

    let restarted = App::from_config(&config_for(&mock_server, &dir)).unwrap();
    assert_eq!(restarted.session().user_id(), Some(UserId::new("1")));

    let user = restarted.logout().unwrap();
    assert_eq!(user.username, "ana");
    let again = App::from_config(&config_for(&mock_server, &dir)).unwrap();
    assert!(again.session().current().is_none());
}

#[tokio::test]
async fn test_commands_require_login() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let app = App::from_config(&config_for(&mock_server, &dir)).unwrap();

    let result = app.liked().await;
    assert!(matches!(
        result,
        Err(CliError::Client(tunify_client::ClientError::NotLoggedIn))
    ));
}

#[tokio::test]
async fn test_like_from_search_results() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let app = signed_in_app(&mock_server, &dir).await;
    mount_profile(&mock_server, json!([])).await;

    Mock::given(method("GET"))
        .and(path("/songs"))
        .and(query_param("id", "101"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("term", "yellow"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resultCount": 1,
            "results": [{
                "trackId": 101,
                "trackName": "Yellow",
                "artistName": "Coldplay",
                "previewUrl": "https://audio.example.com/101.m4a"
            }]
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/songs"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/users/1"))
        .and(body_json(json!({ "likedSongIds": ["7", "101"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1, "username": "ana", "likedSongIds": ["7", "101"]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let track = app.like("101", Some("yellow")).await.unwrap();
    assert_eq!(track.title, "Yellow");
    assert_eq!(app.session().current().unwrap().liked_song_ids.len(), 2);
}

#[tokio::test]
async fn test_like_unknown_track() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let app = signed_in_app(&mock_server, &dir).await;
    mount_profile(&mock_server, json!([])).await;

    Mock::given(method("GET"))
        .and(path("/songs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let result = app.like("404", None).await;
    assert!(matches!(result, Err(CliError::TrackNotFound(id)) if id == "404"));
}

#[tokio::test]
async fn test_other_users_playlists_are_hidden() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let app = signed_in_app(&mock_server, &dir).await;
    mount_profile(&mock_server, json!([])).await;

    Mock::given(method("GET"))
        .and(path("/playlists/p9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "p9", "userId": "2", "name": "Not yours", "songIds": []
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let result = app.delete_playlist("p9").await;
    assert!(matches!(result, Err(CliError::PlaylistNotFound(_))));
}

#[tokio::test]
async fn test_remove_history_by_position() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let app = signed_in_app(&mock_server, &dir).await;
    mount_profile(
        &mock_server,
        json!([
            { "songId": "1", "title": "Old", "artist": "Band", "ts": 1000 },
            { "songId": "2", "title": "New", "artist": "Band", "ts": 2000 }
        ]),
    )
    .await;

    Mock::given(method("PATCH"))
        .and(path("/users/1"))
        .and(body_json(json!({
            "history": [{ "songId": "1", "title": "Old", "artist": "Band", "ts": 1000 }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile(json!([
            { "songId": "1", "title": "Old", "artist": "Band", "ts": 1000 }
        ]))))
        .expect(1)
        .mount(&mock_server)
        .await;

    let history = app.history().await.unwrap();
    assert_eq!(history[0].title, "New");

    let removed = app.remove_history(1).await.unwrap();
    assert_eq!(removed.title, "New");

    assert!(matches!(
        app.remove_history(0).await,
        Err(CliError::HistoryIndex(0))
    ));
    assert!(matches!(
        app.remove_history(5).await,
        Err(CliError::HistoryIndex(5))
    ));
}
