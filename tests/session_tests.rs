//! Login, logout and locally persisted session state

mod support;

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::{json, Value};

use motormart::entities::Vehicle;
use motormart::session::Credentials;
use motormart::storage::{keys, LocalStore};

use support::{client_with, unseal, ScriptedGateway};

fn identity_token(exp: i64) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        &json!({
            "vendor": { "id": "ven-7", "name": "Lakeside Autos", "phone": "+254700000000" },
            "user": "usr-3",
            "exp": exp
        }),
        &EncodingKey::from_secret(b"gateway-signing-key"),
    )
    .unwrap()
}

fn credentials() -> Credentials {
    Credentials {
        email: "sales@lakeside.test".to_string(),
        password: "correct horse".to_string(),
    }
}

#[tokio::test]
async fn test_login_persists_identity_and_attaches_token() {
    let gateway = ScriptedGateway::new();
    let client = client_with(gateway.clone());
    let session = client.session();
    let token = identity_token(4_102_444_800);

    gateway.respond("loginVendor", json!({ "token": token }));
    let identity = session.login(&credentials()).await.unwrap();

    assert_eq!(identity.vendor.id, "ven-7");
    assert_eq!(identity.user.as_deref(), Some("usr-3"));
    assert_eq!(gateway.token(), Some(token.clone()));
    assert_eq!(
        client.storage().get(keys::AUTH_TOKEN).unwrap(),
        Some(Value::String(token))
    );
    assert_eq!(session.current_identity().unwrap(), Some(identity));

    let request = gateway.last_call();
    assert_eq!(
        request.document,
        "mutation loginVendor($pl: String!) { loginVendor(pl: $pl) { token } }"
    );
    assert_eq!(unseal(&request)["email"], json!("sales@lakeside.test"));
}

#[tokio::test]
async fn test_invalid_credentials_are_not_sent() {
    let gateway = ScriptedGateway::new();
    let client = client_with(gateway.clone());

    let err = client
        .session()
        .login(&Credentials {
            email: "nope".to_string(),
            password: "x".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), "VALIDATION");
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn test_logout_clears_storage_and_store() {
    let gateway = ScriptedGateway::new();
    let client = client_with(gateway.clone());
    let session = client.session();

    gateway.respond("loginVendor", json!({ "token": identity_token(4_102_444_800) }));
    session.login(&credentials()).await.unwrap();
    gateway.respond("vehicleById", json!({ "id": "veh-1", "brand": "Audi" }));
    client.repo::<Vehicle>().fetch_by_id("veh-1").await.unwrap();
    session.record_error("Something failed").unwrap();

    session.logout().await.unwrap();

    assert_eq!(session.current_identity().unwrap(), None);
    assert_eq!(session.last_error().unwrap(), None);
    assert_eq!(client.storage().get(keys::AUTH_TOKEN).unwrap(), None);
    assert_eq!(gateway.token(), None);
    assert_eq!(client.store().vehicles.entity().await, Vehicle::default());
}

#[tokio::test]
async fn test_restore_drops_expired_session() {
    let gateway = ScriptedGateway::new();
    let client = client_with(gateway.clone());
    let session = client.session();

    client
        .storage()
        .set(keys::AUTH_TOKEN, json!(identity_token(1_000)))
        .unwrap();
    assert_eq!(session.restore().unwrap(), None);
    assert_eq!(client.storage().get(keys::AUTH_TOKEN).unwrap(), None);

    let fresh = identity_token(4_102_444_800);
    client.storage().set(keys::AUTH_TOKEN, json!(fresh)).unwrap();
    let identity = session.restore().unwrap().unwrap();
    assert_eq!(identity.vendor.name, "Lakeside Autos");
    assert_eq!(gateway.token(), Some(fresh));
}

#[test]
fn test_reload_marker_is_consumed_once() {
    let client = client_with(ScriptedGateway::new());
    let session = client.session();

    assert_eq!(session.take_reload_marker().unwrap(), None);
    session.mark_reload().unwrap();
    assert!(session.take_reload_marker().unwrap().is_some());
    assert_eq!(session.take_reload_marker().unwrap(), None);
}
