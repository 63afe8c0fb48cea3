//! Repository behaviour against a scripted gateway

mod support;

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

use motormart::codec::SEALED_KEY;
use motormart::entities::{
    Banner, ContactReply, ContactThread, FeaturedVehicle, Role, User, Vehicle, VehicleFilter,
    VehicleModel,
};
use motormart::error::ClientError;
use motormart::gateway::{Gateway, GatewayError, GatewayRequest, OperationKind};
use motormart::models::{ListFilter, PageArgs, PageQuery, YesNo};
use motormart::repository::Repository;
use motormart::store::{Phase, Store};

use support::{client_with, codec, connection, unseal, ScriptedGateway};

fn vehicle_json(id: &str) -> Value {
    json!({
        "id": id,
        "entryNo": "MM-240101-000001",
        "brand": "Toyota",
        "model": "Harrier",
        "year": 2019,
        "price": 4_200_000.0,
        "status": "active",
        "thumbnail": "https://cdn.test/harrier.jpg",
        "views": 10,
        "clicks": 3
    })
}

#[tokio::test]
async fn test_fetch_by_id_replaces_singular_slice() {
    let gateway = ScriptedGateway::new();
    let client = client_with(gateway.clone());
    let vehicles = client.repo::<Vehicle>();

    gateway.respond("vehicleById", vehicle_json("veh-1"));
    vehicles.fetch_by_id("veh-1").await.unwrap();

    gateway.respond(
        "vehicleById",
        json!({ "id": "veh-2", "brand": "Mazda" }),
    );
    let second = vehicles.fetch_by_id("veh-2").await.unwrap();

    let slice = vehicles.slices().snapshot().await;
    assert_eq!(slice.data, second);
    assert_eq!(slice.data.model, "");
    assert_eq!(slice.data.views, 0);
    assert_eq!(slice.phase, Phase::Idle);
    assert_eq!(slice.error, None);

    let request = gateway.last_call();
    assert_eq!(request.operation_name, "vehicleById");
    assert_eq!(request.kind, OperationKind::Query);
    assert_eq!(unseal(&request), json!({ "id": "veh-2" }));
}

#[tokio::test]
async fn test_patch_mutation_keeps_sibling_fields() {
    let gateway = ScriptedGateway::new();
    let client = client_with(gateway.clone());
    let vehicles = client.repo::<Vehicle>();

    gateway.respond("vehicleById", vehicle_json("veh-1"));
    vehicles.fetch_by_id("veh-1").await.unwrap();

    // The server answers with a sparse entity
    gateway.respond("editVehicleSold", json!({ "id": "veh-1", "sold": "Yes" }));
    let updated = vehicles
        .update_field("veh-1", "sold", json!("Yes"))
        .await
        .unwrap();

    assert_eq!(updated.sold, YesNo::Yes);
    assert_eq!(updated.brand, "Toyota");
    assert_eq!(updated.views, 10);
    assert_eq!(
        unseal(&gateway.last_call()),
        json!({ "id": "veh-1", "sold": "Yes" })
    );
}

#[tokio::test]
async fn test_replace_mutation_resets_the_entity() {
    let gateway = ScriptedGateway::new();
    let client = client_with(gateway.clone());
    let featured = client.repo::<FeaturedVehicle>();

    gateway.respond(
        "featuredVehicleById",
        json!({ "id": "fv-1", "position": 2, "clicks": 40, "status": "active" }),
    );
    featured.fetch_by_id("fv-1").await.unwrap();

    gateway.respond(
        "editFeaturedVehicleStatus",
        json!({ "id": "fv-1", "status": "paused" }),
    );
    let updated = featured
        .update_field("fv-1", "status", json!("paused"))
        .await
        .unwrap();

    assert_eq!(updated.status, "paused");
    assert_eq!(updated.position, 0);
    assert_eq!(updated.clicks, 0);
}

#[tokio::test]
async fn test_broad_edit_drops_fields_missing_from_response() {
    let gateway = ScriptedGateway::new();
    let client = client_with(gateway.clone());
    let vehicles = client.repo::<Vehicle>();

    gateway.respond("vehicleById", vehicle_json("veh-1"));
    vehicles.fetch_by_id("veh-1").await.unwrap();

    gateway.respond(
        "editVehicle",
        json!({ "id": "veh-1", "brand": "Toyota", "price": 3_900_000.0 }),
    );
    let edited = vehicles
        .update_whole(&json!({ "id": "veh-1", "price": 3_900_000.0 }))
        .await
        .unwrap();

    assert_eq!(edited.price, 3_900_000.0);
    assert_eq!(edited.thumbnail, "");
    assert_eq!(vehicles.slices().entity().await, edited);
}

#[tokio::test]
async fn test_counter_update_is_idempotent() {
    let gateway = ScriptedGateway::new();
    let client = client_with(gateway.clone());
    let banners = client.repo::<Banner>();

    for _ in 0..2 {
        gateway.respond(
            "editBannerClicks",
            json!({ "id": "ban-1", "clicks": 41 }),
        );
    }

    let first = banners.update_field("ban-1", "clicks", json!(41)).await.unwrap();
    let second = banners.update_field("ban-1", "clicks", json!(41)).await.unwrap();
    assert_eq!(first.clicks, 41);
    assert_eq!(first, second);

    // Counters travel as plain variables, not sealed
    let request = gateway.last_call();
    assert!(request.variables.get(SEALED_KEY).is_none());
    assert_eq!(request.variables["id"], json!("ban-1"));
    assert_eq!(request.variables["clicks"], json!(41));
}

#[tokio::test]
async fn test_repeated_views_update_settles_on_same_value() {
    let gateway = ScriptedGateway::new();
    let client = client_with(gateway.clone());
    let vehicles = client.repo::<Vehicle>();

    gateway.respond("vehicleById", vehicle_json("veh-1"));
    vehicles.fetch_by_id("veh-1").await.unwrap();

    for _ in 0..3 {
        gateway.respond("editVehicleViews", json!({ "id": "veh-1", "views": 11 }));
        let updated = vehicles.update_field("veh-1", "views", json!(11)).await.unwrap();
        assert_eq!(updated.views, 11);
        assert_eq!(updated.brand, "Toyota");
        assert_eq!(vehicles.slices().entity().await.views, 11);
    }

    let calls = gateway.calls();
    let sent: Vec<Value> = calls[1..].iter().map(|call| call.variables["views"].clone()).collect();
    assert_eq!(sent, vec![json!(11); 3]);
    assert!(calls[1..].iter().all(|call| call.operation_name == "editVehicleViews"));
}

#[tokio::test]
async fn test_repeated_impressions_update_settles_on_same_value() {
    let gateway = ScriptedGateway::new();
    let client = client_with(gateway.clone());
    let featured = client.repo::<FeaturedVehicle>();

    gateway.respond(
        "featuredVehicleById",
        json!({ "id": "fv-1", "position": 1, "impressions": 500 }),
    );
    featured.fetch_by_id("fv-1").await.unwrap();

    for _ in 0..2 {
        gateway.respond(
            "editFeaturedVehicleImpressions",
            json!({ "id": "fv-1", "impressions": 501 }),
        );
    }
    let first = featured
        .update_field("fv-1", "impressions", json!(501))
        .await
        .unwrap();
    let second = featured
        .update_field("fv-1", "impressions", json!(501))
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(second.impressions, 501);
    assert_eq!(second.position, 1);
    for call in &gateway.calls()[1..] {
        assert_eq!(call.operation_name, "editFeaturedVehicleImpressions");
        assert!(call.variables.get(SEALED_KEY).is_none());
        assert_eq!(call.variables["impressions"], json!(501));
    }
}

#[tokio::test]
async fn test_contact_reply_is_validated_before_sending() {
    let gateway = ScriptedGateway::new();
    let client = client_with(gateway.clone());
    let contacts = client.repo::<ContactThread>();

    let empty = ContactReply {
        id: "c-1".to_string(),
        sender: "vendor".to_string(),
        body: String::new(),
    };
    let err = contacts.reply(&empty).await.unwrap_err();
    assert_eq!(err.error_code(), "VALIDATION");
    assert!(gateway.calls().is_empty());

    gateway.respond(
        "replyContact",
        json!({
            "id": "c-1",
            "messages": [
                { "sender": "customer", "body": "Still available?" },
                { "sender": "vendor", "body": "Yes, come by Monday" }
            ]
        }),
    );
    let thread = contacts
        .reply(&ContactReply {
            body: "Yes, come by Monday".to_string(),
            ..empty
        })
        .await
        .unwrap();

    assert_eq!(thread.messages.len(), 2);
    assert_eq!(
        unseal(&gateway.last_call()),
        json!({ "id": "c-1", "sender": "vendor", "body": "Yes, come by Monday" })
    );
}

#[tokio::test]
async fn test_fetch_page_normalizes_envelope() {
    let gateway = ScriptedGateway::new();
    let client = client_with(gateway.clone());
    let vehicles = client.repo::<Vehicle>();

    // Two edges for a page of five, yet the server claims more and a
    // smaller total
    gateway.respond(
        "vehicles",
        connection(vec![vehicle_json("veh-1"), vehicle_json("veh-2")], 1, true),
    );
    let page = vehicles
        .fetch_page(&PageQuery::unfiltered(PageArgs::first(5).after("c9")))
        .await
        .unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page.total_count, 2);
    assert!(!page.page_info.has_next_page);
    assert_eq!(vehicles.slices().collection().await, page);

    let request = gateway.last_call();
    assert_eq!(request.variables["first"], json!(5));
    assert_eq!(request.variables["after"], json!("c9"));
    assert!(request.variables.get("last").is_none());
}

#[tokio::test]
async fn test_full_page_keeps_has_next_page() {
    let gateway = ScriptedGateway::new();
    let client = client_with(gateway.clone());
    let vehicles = client.repo::<Vehicle>();

    gateway.respond(
        "vehicles",
        connection(vec![vehicle_json("veh-1"), vehicle_json("veh-2")], 7, true),
    );
    let page = vehicles
        .fetch_page(&PageQuery::unfiltered(PageArgs::first(2)))
        .await
        .unwrap();

    assert_eq!(page.total_count, 7);
    assert!(page.page_info.has_next_page);
}

#[tokio::test]
async fn test_filtered_fetch_seals_filter_and_replaces_on_empty() {
    let gateway = ScriptedGateway::new();
    let client = client_with(gateway.clone());
    let vehicles = client.repo::<Vehicle>();

    gateway.respond("vehicles", connection(vec![vehicle_json("veh-1")], 1, false));
    vehicles
        .fetch_page(&PageQuery::unfiltered(PageArgs::first(10)))
        .await
        .unwrap();

    gateway.respond("filterVehicles", connection(vec![], 0, false));
    let filter = VehicleFilter {
        brand: Some("Lexus".to_string()),
        ..VehicleFilter::default()
    };
    let page = vehicles
        .fetch_filtered(&PageQuery::new(PageArgs::first(10), filter))
        .await
        .unwrap();

    assert!(page.is_empty());
    assert!(vehicles.slices().collection().await.is_empty());

    let request = gateway.last_call();
    assert_eq!(unseal(&request), json!({ "brand": "Lexus" }));
    assert_eq!(request.variables["first"], json!(10));
}

#[tokio::test]
async fn test_back_office_filter_is_sealed() {
    let gateway = ScriptedGateway::new();
    let client = client_with(gateway.clone());

    gateway.respond(
        "filterUsers",
        connection(vec![json!({ "id": "usr-1", "role": { "id": "r-1", "name": "Admin" } })], 1, false),
    );
    let page = client
        .repo::<User>()
        .fetch_filtered(&PageQuery::new(PageArgs::first(25), ListFilter::status("active")))
        .await
        .unwrap();

    assert_eq!(page.nodes().next().unwrap().role.name, "Admin");
    assert_eq!(unseal(&gateway.last_call()), json!({ "status": "active" }));
}

#[tokio::test]
async fn test_plain_filter_is_spread() {
    let gateway = ScriptedGateway::new();
    let client = client_with(gateway.clone());

    gateway.respond("filterModels", connection(vec![], 0, false));
    client
        .repo::<VehicleModel>()
        .fetch_filtered(&PageQuery::new(
            PageArgs::first(50),
            json!({ "brandId": "brand-3" }),
        ))
        .await
        .unwrap();

    let request = gateway.last_call();
    assert_eq!(request.variables["brandId"], json!("brand-3"));
    assert_eq!(request.variables["first"], json!(50));
    assert!(request
        .document
        .starts_with("query filterModels($brandId: ID, $first: Int"));
}

#[tokio::test]
async fn test_remove_leaves_state_until_refetch() {
    let gateway = ScriptedGateway::new();
    let client = client_with(gateway.clone());
    let vehicles = client.repo::<Vehicle>();

    gateway.respond(
        "vehicles",
        connection(vec![vehicle_json("veh-1"), vehicle_json("veh-2")], 2, false),
    );
    vehicles
        .fetch_page(&PageQuery::unfiltered(PageArgs::first(10)))
        .await
        .unwrap();

    gateway.respond("deleteVehicle", json!(true));
    vehicles.remove("veh-1").await.unwrap();

    let listed: Vec<String> = vehicles
        .slices()
        .collection()
        .await
        .nodes()
        .map(|v| v.id.clone())
        .collect();
    assert_eq!(listed, vec!["veh-1", "veh-2"]);
    assert_eq!(unseal(&gateway.last_call()), json!({ "id": "veh-1" }));
}

#[tokio::test]
async fn test_rejection_records_server_message() {
    let gateway = ScriptedGateway::new();
    let client = client_with(gateway.clone());
    let vehicles = client.repo::<Vehicle>();

    gateway.respond("vehicleById", vehicle_json("veh-1"));
    vehicles.fetch_by_id("veh-1").await.unwrap();

    gateway.reject("Vehicle not found");
    let err = vehicles.fetch_by_id("missing").await.unwrap_err();

    assert!(matches!(err, ClientError::Rejected(_)));
    assert!(!err.is_fatal());
    let slice = vehicles.slices().snapshot().await;
    assert_eq!(slice.phase, Phase::Idle);
    assert_eq!(slice.error.as_deref(), Some("Vehicle not found"));
    // The reset before the request already cleared the previous entity
    assert_eq!(slice.data, Vehicle::default());
}

#[tokio::test]
async fn test_transport_failure_is_fatal_and_settles() {
    let gateway = ScriptedGateway::new();
    let client = client_with(gateway.clone());
    let vehicles = client.repo::<Vehicle>();

    gateway.fail_transport("connection refused");
    let err = vehicles
        .fetch_page(&PageQuery::unfiltered(PageArgs::first(10)))
        .await
        .unwrap_err();

    assert!(err.is_fatal());
    assert_eq!(err.error_code(), "TRANSPORT");
    assert_eq!(vehicles.slices().list_snapshot().await.phase, Phase::Idle);
}

#[tokio::test]
async fn test_missing_result_key() {
    let gateway = ScriptedGateway::new();
    let client = client_with(gateway.clone());

    gateway.push(Ok(json!({ "somethingElse": {} })));
    let err = client.repo::<Vehicle>().fetch_by_id("veh-1").await.unwrap_err();
    assert!(matches!(err, ClientError::MissingResult(key) if key == "vehicleById"));
}

#[tokio::test]
async fn test_unsupported_operations() {
    let gateway = ScriptedGateway::new();
    let client = client_with(gateway.clone());

    let err = client
        .repo::<Role>()
        .fetch_filtered(&PageQuery::unfiltered(PageArgs::first(5)))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Unsupported { entity: "Role", .. }));

    let err = client
        .repo::<Vehicle>()
        .update_field("veh-1", "entryNo", json!("x"))
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "UNSUPPORTED");
    assert!(gateway.calls().is_empty());
}

/// Gateway that records the singular vehicle slice's phase mid-request
struct PhaseRecorder {
    store: Arc<Store>,
    seen: Mutex<Vec<Phase>>,
    inner: Arc<ScriptedGateway>,
}

#[async_trait]
impl Gateway for PhaseRecorder {
    async fn execute(&self, request: GatewayRequest) -> Result<Value, GatewayError> {
        let phase = self.store.vehicles.one.read().await.phase;
        self.seen.lock().unwrap().push(phase);
        self.inner.execute(request).await
    }
}

#[tokio::test]
async fn test_phase_is_pending_only_while_in_flight() {
    let store = Store::new();
    let inner = ScriptedGateway::new();
    let recorder = Arc::new(PhaseRecorder {
        store: store.clone(),
        seen: Mutex::new(Vec::new()),
        inner: inner.clone(),
    });
    let vehicles: Repository<Vehicle> = Repository::new(recorder.clone(), codec(), store.clone());

    inner.respond("vehicleById", vehicle_json("veh-1"));
    inner.reject("Forbidden");
    vehicles.fetch_by_id("veh-1").await.unwrap();
    vehicles.fetch_by_id("veh-1").await.unwrap_err();

    assert_eq!(*recorder.seen.lock().unwrap(), vec![Phase::Pending, Phase::Pending]);
    assert_eq!(store.vehicles.snapshot().await.phase, Phase::Idle);
}
