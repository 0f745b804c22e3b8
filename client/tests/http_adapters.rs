//! Integration coverage for the HTTP adapters against a stub marketplace.
//!
//! Each test starts an Actix server on an ephemeral port that serves the
//! product collection from memory, then drives it through the entity
//! services and the session gate over real sockets.

use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::http::header;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use reqwest::Url;
use serde_json::{Value, json};

use client::domain::ports::ListQuery;
use client::domain::{
    AppState, Attachment, Category, ErrorCode, GateSettings, GateState, Price, PriceUnit,
    ProductDraft, ProductId, ProductPatch, Render, SessionContext, SessionGate, SessionToken,
};
use client::outbound::http::{HttpEntityApi, HttpSessionCheck};

const VALID_TOKEN: &str = "tok-valid";

#[derive(Default)]
struct Stub {
    products: Vec<Value>,
    next_id: usize,
    authorizations: Vec<Option<String>>,
    queries: Vec<String>,
    uploads: Vec<(String, String)>,
}

impl Stub {
    fn record(&mut self, req: &HttpRequest) {
        self.authorizations.push(
            req.headers()
                .get(header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned),
        );
        self.queries.push(req.query_string().to_owned());
    }

    fn assign_id(&mut self) -> String {
        self.next_id += 1;
        format!("p-{}", self.next_id + 100)
    }
}

type SharedStub = web::Data<Mutex<Stub>>;

fn seeded_products() -> Vec<Value> {
    vec![
        json!({
            "_id": "p-1",
            "name": "Auditorium",
            "description": "200 seats",
            "category": "space",
            "price": { "amountCents": 15000, "unit": "hour" },
            "availability": [{ "weekday": "Mon", "start": "08:00:00", "end": "12:00:00" }],
            "companyId": "c-1"
        }),
        json!({
            "_id": "p-2",
            "name": "Electron microscope",
            "description": "Imaging lab",
            "category": "equipment",
            "price": { "amountCents": 40000, "unit": "day" }
        }),
    ]
}

async fn list_products(req: HttpRequest, stub: SharedStub) -> HttpResponse {
    let mut stub = stub.lock().expect("stub lock");
    stub.record(&req);
    HttpResponse::Ok().json(&stub.products)
}

async fn create_product(req: HttpRequest, body: web::Bytes, stub: SharedStub) -> HttpResponse {
    let mut stub = stub.lock().expect("stub lock");
    stub.record(&req);
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_owned();

    let mut created = if content_type.starts_with("multipart/form-data") {
        stub.uploads
            .push((content_type, String::from_utf8_lossy(&body).into_owned()));
        json!({
            "name": "Uploaded hall",
            "description": "With photo",
            "category": "space",
            "price": { "amountCents": 1000, "unit": "booking" },
            "imageUrl": "https://cdn.test/hall.png"
        })
    } else {
        match serde_json::from_slice::<Value>(&body) {
            Ok(draft) => draft,
            Err(_) => return HttpResponse::BadRequest().json(json!({ "message": "bad json" })),
        }
    };
    created["_id"] = json!(stub.assign_id());
    stub.products.push(created.clone());
    HttpResponse::Created().json(created)
}

async fn update_product(
    req: HttpRequest,
    path: web::Path<String>,
    patch: web::Json<Value>,
    stub: SharedStub,
) -> HttpResponse {
    let mut stub = stub.lock().expect("stub lock");
    stub.record(&req);
    let id = path.into_inner();
    let Some(product) = stub.products.iter_mut().find(|product| product["_id"] == id) else {
        return HttpResponse::NotFound().json(json!({ "message": "product not found" }));
    };
    if let (Some(target), Some(fields)) = (product.as_object_mut(), patch.as_object()) {
        for (field, value) in fields {
            target.insert(field.clone(), value.clone());
        }
    }
    HttpResponse::Ok().json(product.clone())
}

async fn delete_product(req: HttpRequest, path: web::Path<String>, stub: SharedStub) -> HttpResponse {
    let mut stub = stub.lock().expect("stub lock");
    stub.record(&req);
    let id = path.into_inner();
    stub.products.retain(|product| product["_id"] != id);
    HttpResponse::NoContent().finish()
}

async fn failing_bookings() -> HttpResponse {
    HttpResponse::InternalServerError().body("database unavailable")
}

async fn whoami(req: HttpRequest) -> HttpResponse {
    let expected = format!("Bearer {VALID_TOKEN}");
    let authorised = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == expected);
    if authorised {
        HttpResponse::Ok().json(json!({
            "_id": "u-1",
            "name": "Ada Lovelace",
            "email": "ada@example.com"
        }))
    } else {
        HttpResponse::Unauthorized().json(json!({ "message": "session expired" }))
    }
}

async fn slow_whoami() -> HttpResponse {
    actix_web::rt::time::sleep(Duration::from_secs(5)).await;
    HttpResponse::Ok().json(json!({ "_id": "u-1", "name": "Too late" }))
}

struct StubServer {
    base: Url,
    stub: SharedStub,
    handle: ServerHandle,
}

impl StubServer {
    async fn start() -> Self {
        let stub = web::Data::new(Mutex::new(Stub {
            products: seeded_products(),
            ..Stub::default()
        }));
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
        let addr = listener.local_addr().expect("listener address");

        let data = stub.clone();
        let server = HttpServer::new(move || {
            App::new().app_data(data.clone()).service(
                web::scope("/api")
                    .route("/products", web::get().to(list_products))
                    .route("/products", web::post().to(create_product))
                    .route("/products/{id}", web::patch().to(update_product))
                    .route("/products/{id}", web::delete().to(delete_product))
                    .route("/bookings", web::get().to(failing_bookings))
                    .route("/auth/whoami", web::get().to(whoami))
                    .route("/slow/whoami", web::get().to(slow_whoami)),
            )
        })
        .disable_signals()
        .workers(1)
        .listen(listener)
        .expect("listen on stub socket")
        .run();

        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            base: Url::parse(&format!("http://{addr}/api")).expect("stub base URL"),
            stub,
            handle,
        }
    }

    fn session(token: &str) -> SessionContext {
        SessionContext::new(SessionToken::new(token))
    }

    fn app_state(&self, session: SessionContext) -> AppState {
        let api = HttpEntityApi::new(self.base.clone(), Duration::from_secs(5), session.clone())
            .expect("client builds");
        AppState::new(Arc::new(api), session)
    }

    fn gate(&self, whoami_path: &str, session: SessionContext, timeout: Duration) -> SessionGate {
        let checker = HttpSessionCheck::new(
            self.base.clone(),
            whoami_path,
            Duration::from_secs(30),
            session.clone(),
        )
        .expect("client builds");
        SessionGate::new(
            Arc::new(checker),
            session,
            GateSettings {
                timeout,
                ..GateSettings::default()
            },
        )
    }

    async fn stop(self) {
        self.handle.stop(true).await;
    }
}

fn draft(name: &str) -> ProductDraft {
    ProductDraft {
        name: name.to_owned(),
        description: "Seminar room".to_owned(),
        category: Category::Space,
        price: Price {
            amount_cents: 5_000,
            unit: PriceUnit::Hour,
        },
        availability: Vec::new(),
    }
}

#[actix_web::test]
async fn fetch_all_lists_products_with_filters_and_bearer_token() {
    let server = StubServer::start().await;
    let state = server.app_state(StubServer::session(VALID_TOKEN));

    let query = ListQuery::new().filter("category", "space").search("hall");
    let count = state.products.fetch_all(&query).await.expect("list succeeds");

    assert_eq!(count, 2);
    let auditorium = state
        .products
        .find(&ProductId::new("p-1"))
        .expect("auditorium cached");
    assert_eq!(auditorium.price.amount_cents, 15_000);
    assert_eq!(
        state.products.store().snapshot()[1].category,
        Category::Equipment
    );
    {
        let stub = server.stub.lock().expect("stub lock");
        assert_eq!(stub.queries, vec!["category=space&search=hall".to_owned()]);
        assert_eq!(
            stub.authorizations,
            vec![Some(format!("Bearer {VALID_TOKEN}"))]
        );
    }
    server.stop().await;
}

#[actix_web::test]
async fn json_create_appends_server_assigned_id() {
    let server = StubServer::start().await;
    let state = server.app_state(StubServer::session(VALID_TOKEN));

    let created = state
        .products
        .create(&draft("Seminar room B"), None)
        .await
        .expect("create succeeds");

    assert_eq!(created.id, ProductId::new("p-101"));
    assert_eq!(created.name, "Seminar room B");
    assert_eq!(state.products.store().len(), 1);
    server.stop().await;
}

#[actix_web::test]
async fn create_with_image_sends_multipart_payload_and_file() {
    let server = StubServer::start().await;
    let state = server.app_state(StubServer::session(VALID_TOKEN));
    let image = Attachment::image("hall.png", "image/png", vec![0x89, b'P', b'N', b'G'])
        .expect("valid image");

    let created = state
        .products
        .create(&draft("Photo hall"), Some(&image))
        .await
        .expect("create succeeds");

    assert_eq!(created.image_url.as_deref(), Some("https://cdn.test/hall.png"));
    {
        let stub = server.stub.lock().expect("stub lock");
        let (content_type, body) = stub.uploads.first().expect("multipart upload recorded");
        assert!(content_type.starts_with("multipart/form-data; boundary="));
        let body = body.to_lowercase();
        assert!(body.contains(r#"name="payload""#));
        assert!(body.contains(r#""name":"photo hall""#));
        assert!(body.contains(r#"name="file"; filename="hall.png""#));
        assert!(body.contains("content-type: image/png"));
    }
    server.stop().await;
}

#[actix_web::test]
async fn update_and_delete_round_trip_through_the_store() {
    let server = StubServer::start().await;
    let state = server.app_state(StubServer::session(VALID_TOKEN));
    state
        .products
        .fetch_all(&ListQuery::new())
        .await
        .expect("list succeeds");

    let patch = ProductPatch {
        name: Some("Main auditorium".to_owned()),
        ..ProductPatch::default()
    };
    state
        .products
        .update(&ProductId::new("p-1"), &patch)
        .await
        .expect("update succeeds");
    assert_eq!(
        state
            .products
            .find(&ProductId::new("p-1"))
            .map(|product| product.name),
        Some("Main auditorium".to_owned())
    );

    state
        .products
        .delete(&ProductId::new("p-2"))
        .await
        .expect("delete succeeds");
    assert!(state.products.find(&ProductId::new("p-2")).is_none());
    assert_eq!(state.products.store().len(), 1);
    server.stop().await;
}

#[actix_web::test]
async fn missing_entity_maps_to_not_found_without_touching_store() {
    let server = StubServer::start().await;
    let state = server.app_state(StubServer::session(VALID_TOKEN));
    state
        .products
        .fetch_all(&ListQuery::new())
        .await
        .expect("list succeeds");
    let before = state.products.store().snapshot();

    let error = state
        .products
        .update(&ProductId::new("p-404"), &ProductPatch::default())
        .await
        .expect_err("unknown product");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.details(), Some(&json!({ "status": 404 })));
    assert_eq!(state.products.store().snapshot(), before);
    assert_eq!(state.products.status().error(), Some(error.message()));
    server.stop().await;
}

#[actix_web::test]
async fn server_failure_records_message_in_error_slot() {
    let server = StubServer::start().await;
    let state = server.app_state(StubServer::session(VALID_TOKEN));

    let error = state
        .bookings
        .fetch_all(&ListQuery::new())
        .await
        .expect_err("bookings fail");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    let status = state.bookings.status();
    assert!(!status.is_loading());
    assert_eq!(status.error(), Some(error.message()));
    assert!(state.bookings.store().is_empty());
    server.stop().await;
}

#[actix_web::test]
async fn unreachable_service_is_reported_as_unavailable() {
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral listener");
        listener.local_addr().expect("ephemeral address")
    };
    let base = Url::parse(&format!("http://{addr}/api")).expect("base URL");
    let session = SessionContext::anonymous();
    let api = HttpEntityApi::new(base, Duration::from_secs(2), session.clone())
        .expect("client builds");
    let state = AppState::new(Arc::new(api), session);

    let error = state
        .products
        .fetch_all(&ListQuery::new())
        .await
        .expect_err("nothing listening");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[actix_web::test]
async fn gate_admits_valid_session_and_records_identity() {
    let server = StubServer::start().await;
    let session = StubServer::session(VALID_TOKEN);
    let gate = server.gate("auth/whoami", session.clone(), Duration::from_secs(5));

    let mounted = gate.mount();

    assert_eq!(mounted.settled().await, GateState::Authenticated);
    assert_eq!(mounted.render(), Render::Children);
    let identity = session.identity().expect("identity recorded");
    assert_eq!(identity.name, "Ada Lovelace");
    server.stop().await;
}

#[actix_web::test]
async fn gate_redirects_expired_session() {
    let server = StubServer::start().await;
    let session = StubServer::session("tok-expired");
    let gate = server.gate("/auth/whoami", session.clone(), Duration::from_secs(5));

    let mounted = gate.mount();

    assert_eq!(mounted.settled().await, GateState::Unauthenticated);
    assert_eq!(
        mounted.render(),
        Render::Redirect {
            location: "/login".to_owned()
        }
    );
    assert!(session.identity().is_none());
    server.stop().await;
}

#[actix_web::test]
async fn gate_gives_up_on_slow_session_service() {
    let server = StubServer::start().await;
    let session = StubServer::session(VALID_TOKEN);
    let gate = server.gate("slow/whoami", session.clone(), Duration::from_millis(200));

    let mounted = gate.mount();

    assert_eq!(mounted.settled().await, GateState::Unauthenticated);
    assert!(session.identity().is_none());
    // The abandoned request may still be sleeping server-side.
    server.handle.stop(false).await;
}
