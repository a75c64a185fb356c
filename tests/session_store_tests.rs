use capella::config::BackendConfig;
use capella::session::{AuthModel, Session, UserRecord};
use std::collections::BTreeMap;

fn backend_config() -> BackendConfig {
    BackendConfig {
        base_url: url::Url::parse("http://127.0.0.1:8090").unwrap(),
    }
}

fn sample_user() -> UserRecord {
    UserRecord {
        id: "k3p1x9d7q2m8r4t".to_string(),
        collection_id: "_pb_users_auth_".to_string(),
        collection_name: "users".to_string(),
        username: "ada".to_string(),
        email: "ada@example.com".to_string(),
        email_visibility: false,
        verified: true,
        created: "2024-05-17 20:30:00.000Z".to_string(),
        updated: "2024-05-17 20:30:00.000Z".to_string(),
        extra: BTreeMap::new(),
    }
}

#[tokio::test]
async fn test_container_starts_from_the_client_snapshot() {
    let session = Session::new(&backend_config());

    assert_eq!(session.client().auth_snapshot(), None);
    assert_eq!(session.current_user(), None);
}

#[tokio::test]
async fn test_container_observes_login_and_logout() {
    let session = Session::new(&backend_config());
    let mut observer = session.user();
    let client = session.client();

    let model = AuthModel {
        token: "eyJhbGciOiJIUzI1NiJ9.test".to_string(),
        record: sample_user(),
    };

    // Simulated login event on the client.
    client.set_auth(model.clone());
    observer.changed().await.unwrap();
    assert_eq!(observer.borrow().as_ref(), Some(&model));
    assert_eq!(session.current_user(), Some(model.record.clone()));
    assert_eq!(client.auth_snapshot(), Some(model.clone()));

    // Logout is client-side and is observed the same way.
    client.clear_auth();
    observer.changed().await.unwrap();
    assert!(observer.borrow().is_none());
    assert_eq!(session.current_user(), None);
}

#[tokio::test]
async fn test_late_subscribers_see_the_current_value() {
    let session = Session::new(&backend_config());
    let client = session.client();

    let model = AuthModel {
        token: "eyJhbGciOiJIUzI1NiJ9.test".to_string(),
        record: sample_user(),
    };
    client.set_auth(model.clone());

    // A consumer wired up after login still reads the logged-in state.
    let late = client.subscribe();
    assert_eq!(late.borrow().as_ref(), Some(&model));
    assert_eq!(session.current_user(), Some(model.record));
}

#[test]
fn test_auth_response_shape_parses_into_the_model() {
    let payload = serde_json::json!({
        "token": "eyJhbGciOiJIUzI1NiJ9.payload.sig",
        "record": {
            "id": "k3p1x9d7q2m8r4t",
            "collectionId": "_pb_users_auth_",
            "collectionName": "users",
            "username": "ada",
            "email": "ada@example.com",
            "emailVisibility": false,
            "verified": true,
            "created": "2024-05-17 20:30:00.000Z",
            "updated": "2024-05-17 20:30:00.000Z",
            "name": "Ada",
            "avatar": "avatar_123.png"
        }
    });

    let model: AuthModel = serde_json::from_value(payload).unwrap();
    assert_eq!(model.record.id, "k3p1x9d7q2m8r4t");
    assert_eq!(model.record.collection_name, "users");
    // Collection-defined profile fields land in the flatten map.
    assert_eq!(model.record.extra["name"], "Ada");
    assert_eq!(model.record.extra["avatar"], "avatar_123.png");
}
