use super::*;
use crate::api::test_support::Doubles;
use crate::infrastructure::ports::{FinishReason, LlmResponse};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
};
use chrono::Utc;
use lorekeeper_domain::{
    Attributes, Campaign, Character, CharacterId, LoreEntry, LoreEntryId, UserId,
};
use std::collections::HashMap;
use std::sync::Mutex;
use tower::ServiceExt;

const TOKEN: &str = "Bearer user-token";

fn signed_in(doubles: &mut Doubles, user_id: UserId) {
    doubles
        .identity
        .expect_verify_token()
        .returning(move |_| Ok(user_id));
}

fn campaign(id: CampaignId, user_id: UserId) -> Campaign {
    let now = Utc::now();
    Campaign {
        id,
        user_id,
        title: "The Sunken Crown".to_string(),
        description: None,
        created_at: now,
        updated_at: now,
    }
}

fn owns(doubles: &mut Doubles, campaign_id: CampaignId, user_id: UserId) {
    doubles
        .campaign
        .expect_get_owned()
        .returning(move |id, user| {
            Ok((id == campaign_id && user == user_id).then(|| campaign(id, user)))
        });
}

fn character(id: CharacterId, campaign_id: CampaignId) -> Character {
    let now = Utc::now();
    Character {
        id,
        campaign_id,
        name: "Bram".to_string(),
        role: "blacksmith".to_string(),
        attributes: Attributes::new(),
        background: None,
        embedding: Some(vec![0.1, 0.2]),
        created_at: now,
        updated_at: now,
    }
}

async fn send(doubles: Doubles, request: Request<Body>) -> Response {
    routes(doubles.into_app())
        .oneshot(request)
        .await
        .expect("response")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, TOKEN)
        .body(Body::empty())
        .expect("request")
}

fn with_json(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, TOKEN)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

#[tokio::test]
async fn health_is_public() {
    let request = Request::builder()
        .uri("/api/health")
        .body(Body::empty())
        .expect("request");

    let response = send(Doubles::default(), request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "status": "ok" }));
}

#[tokio::test]
async fn missing_token_is_rejected_before_any_store_access() {
    // No expectations: any port call would panic the handler.
    for (method, uri) in [
        (Method::GET, "/api/campaigns"),
        (Method::POST, "/api/characters"),
        (Method::DELETE, "/api/lore-entries/00000000-0000-0000-0000-000000000000"),
        (Method::POST, "/api/ai/deep-dive"),
    ] {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("request");

        let response = send(Doubles::default(), request).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(
            json_body(response).await,
            json!({ "error": "authorization header required" })
        );
    }
}

#[tokio::test]
async fn rejected_token_is_unauthorized_without_store_access() {
    let mut doubles = Doubles::default();
    doubles
        .identity
        .expect_verify_token()
        .returning(|_| Err(crate::infrastructure::ports::AuthError::InvalidToken));

    let response = send(doubles, get("/api/campaigns")).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_campaign_returns_created_row() {
    let user_id = UserId::new();
    let mut doubles = Doubles::default();
    signed_in(&mut doubles, user_id);
    doubles
        .campaign
        .expect_insert()
        .withf(move |c| c.user_id == user_id)
        .returning(|c| {
            let mut row = campaign(CampaignId::new(), c.user_id);
            row.title = c.title.clone();
            row.description = c.description.clone();
            Ok(row)
        });

    let response = send(
        doubles,
        with_json(
            Method::POST,
            "/api/campaigns",
            json!({ "title": "Ashfall", "description": "Volcano city" }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["title"], "Ashfall");
    assert_eq!(body["description"], "Volcano city");
    assert_eq!(body["user_id"], json!(user_id));
    assert!(body["id"].is_string());
}

#[tokio::test]
async fn create_campaign_without_title_is_bad_request() {
    let mut doubles = Doubles::default();
    signed_in(&mut doubles, UserId::new());

    let response = send(
        doubles,
        with_json(Method::POST, "/api/campaigns", json!({ "description": "x" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "title is required");
}

#[tokio::test]
async fn malformed_json_body_is_bad_request_envelope() {
    let mut doubles = Doubles::default();
    signed_in(&mut doubles, UserId::new());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/campaigns")
        .header(header::AUTHORIZATION, TOKEN)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .expect("request");
    let response = send(doubles, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(response).await["error"].is_string());
}

#[tokio::test]
async fn foreign_campaign_is_not_found() {
    let campaign_id = CampaignId::new();
    let mut doubles = Doubles::default();
    signed_in(&mut doubles, UserId::new());
    owns(&mut doubles, campaign_id, UserId::new());

    let response = send(doubles, get(&format!("/api/campaigns/{campaign_id}"))).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        json_body(response).await,
        json!({ "error": "campaign not found" })
    );
}

#[tokio::test]
async fn unparsable_path_id_is_bad_request() {
    let mut doubles = Doubles::default();
    signed_in(&mut doubles, UserId::new());

    let response = send(doubles, get("/api/characters/not-a-uuid")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn child_lists_require_campaign_id() {
    for uri in ["/api/characters", "/api/relationships", "/api/lore-entries"] {
        let mut doubles = Doubles::default();
        signed_in(&mut doubles, UserId::new());

        let response = send(doubles, get(uri)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(
            json_body(response).await["error"],
            "campaign_id query parameter is required"
        );
    }
}

#[tokio::test]
async fn character_list_hides_embeddings() {
    let (campaign_id, user_id) = (CampaignId::new(), UserId::new());
    let mut doubles = Doubles::default();
    signed_in(&mut doubles, user_id);
    owns(&mut doubles, campaign_id, user_id);
    doubles
        .character
        .expect_list_for_campaign()
        .returning(|campaign_id| Ok(vec![character(CharacterId::new(), campaign_id)]));

    let response = send(
        doubles,
        get(&format!("/api/characters?campaign_id={campaign_id}")),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body[0]["name"], "Bram");
    assert_eq!(body[0]["attributes"], json!({}));
    assert!(body[0].get("embedding").is_none());
}

#[tokio::test]
async fn character_in_foreign_campaign_is_forbidden() {
    let campaign_id = CampaignId::new();
    let mut doubles = Doubles::default();
    signed_in(&mut doubles, UserId::new());
    owns(&mut doubles, campaign_id, UserId::new());
    doubles
        .character
        .expect_get()
        .returning(move |id| Ok(Some(character(id, campaign_id))));

    let response = send(
        doubles,
        get(&format!("/api/characters/{}", CharacterId::new())),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn empty_update_is_bad_request() {
    let mut doubles = Doubles::default();
    signed_in(&mut doubles, UserId::new());

    let response = send(
        doubles,
        with_json(
            Method::PUT,
            &format!("/api/characters/{}", CharacterId::new()),
            json!({}),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn owned_lore_entry_delete_is_no_content() {
    let (campaign_id, user_id, entry_id) = (CampaignId::new(), UserId::new(), LoreEntryId::new());
    let mut doubles = Doubles::default();
    signed_in(&mut doubles, user_id);
    owns(&mut doubles, campaign_id, user_id);
    doubles.lore_entry.expect_get().returning(move |id| {
        let now = Utc::now();
        Ok(Some(lorekeeper_domain::LoreEntry {
            id,
            campaign_id,
            title: "The Drowning".to_string(),
            category: None,
            content: "The crown sank.".to_string(),
            embedding: None,
            created_at: now,
            updated_at: now,
        }))
    });
    doubles
        .lore_entry
        .expect_delete()
        .withf(move |id| *id == entry_id)
        .times(1)
        .returning(|_| Ok(()));

    let request = Request::builder()
        .method(Method::DELETE)
        .uri(format!("/api/lore-entries/{entry_id}"))
        .header(header::AUTHORIZATION, TOKEN)
        .body(Body::empty())
        .expect("request");
    let response = send(doubles, request).await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn relationship_has_no_single_read() {
    let mut doubles = Doubles::default();
    signed_in(&mut doubles, UserId::new());

    let response = send(
        doubles,
        get("/api/relationships/00000000-0000-0000-0000-000000000000"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn deep_dive_with_malformed_reply_returns_raw_text() {
    let raw = "Bram hides a smuggler's past.";
    let mut doubles = Doubles::default();
    signed_in(&mut doubles, UserId::new());
    doubles.llm.expect_generate().returning(move |_| {
        Ok(LlmResponse {
            content: raw.to_string(),
            finish_reason: FinishReason::Stop,
            usage: None,
        })
    });

    let response = send(
        doubles,
        with_json(
            Method::POST,
            "/api/ai/deep-dive",
            json!({ "input": { "name": "Bram", "role": "blacksmith" } }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "suggestions": [raw] }));
}

#[tokio::test]
async fn consistency_check_returns_verdict_shape() {
    let (campaign_id, user_id) = (CampaignId::new(), UserId::new());
    let mut doubles = Doubles::default();
    signed_in(&mut doubles, user_id);
    owns(&mut doubles, campaign_id, user_id);
    doubles
        .lore_entry
        .expect_list_contents()
        .returning(|_| Ok(vec!["The crown sank.".to_string()]));
    doubles.llm.expect_generate().returning(|_| {
        Ok(LlmResponse {
            content: r#"{"is_consistent": true, "warnings": []}"#.to_string(),
            finish_reason: FinishReason::Stop,
            usage: None,
        })
    });

    let response = send(
        doubles,
        with_json(
            Method::POST,
            "/api/ai/consistency-check",
            json!({ "campaign_id": campaign_id, "new_content": "The crown sank." }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert!(body["is_consistent"].is_boolean());
    assert!(body["warnings"].is_array());
}

// In-memory tables backing the repo doubles, so a request sequence sees its
// own writes.

type Table<K, V> = Arc<Mutex<HashMap<K, V>>>;

fn character_table(doubles: &mut Doubles) -> Table<CharacterId, Character> {
    let table: Table<CharacterId, Character> = Arc::default();

    let rows = table.clone();
    doubles.character.expect_insert().returning(move |new| {
        let now = Utc::now();
        let row = Character {
            id: CharacterId::new(),
            campaign_id: new.campaign_id,
            name: new.name.clone(),
            role: new.role.clone(),
            attributes: new.attributes.clone(),
            background: new.background.clone(),
            embedding: None,
            created_at: now,
            updated_at: now,
        };
        rows.lock().expect("table").insert(row.id, row.clone());
        Ok(row)
    });

    let rows = table.clone();
    doubles
        .character
        .expect_get()
        .returning(move |id| Ok(rows.lock().expect("table").get(&id).cloned()));

    let rows = table.clone();
    doubles.character.expect_delete().returning(move |id| {
        rows.lock().expect("table").remove(&id);
        Ok(())
    });

    table
}

fn lore_entry_table(doubles: &mut Doubles) -> Table<LoreEntryId, LoreEntry> {
    let table: Table<LoreEntryId, LoreEntry> = Arc::default();

    let rows = table.clone();
    doubles.lore_entry.expect_insert().returning(move |new| {
        let now = Utc::now();
        let row = LoreEntry {
            id: LoreEntryId::new(),
            campaign_id: new.campaign_id,
            title: new.title.clone(),
            category: new.category.clone(),
            content: new.content.clone(),
            embedding: None,
            created_at: now,
            updated_at: now,
        };
        rows.lock().expect("table").insert(row.id, row.clone());
        Ok(row)
    });

    let rows = table.clone();
    doubles
        .lore_entry
        .expect_get()
        .returning(move |id| Ok(rows.lock().expect("table").get(&id).cloned()));

    let rows = table.clone();
    doubles.lore_entry.expect_delete().returning(move |id| {
        rows.lock().expect("table").remove(&id);
        Ok(())
    });

    table
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header(header::AUTHORIZATION, TOKEN)
        .body(Body::empty())
        .expect("request")
}

async fn call(router: &Router, request: Request<Body>) -> Response {
    router.clone().oneshot(request).await.expect("response")
}

#[tokio::test]
async fn created_character_reads_back_unchanged() {
    let (campaign_id, user_id) = (CampaignId::new(), UserId::new());
    let mut doubles = Doubles::default();
    signed_in(&mut doubles, user_id);
    owns(&mut doubles, campaign_id, user_id);
    character_table(&mut doubles);
    let router = routes(doubles.into_app());

    let request = json!({
        "campaign_id": campaign_id,
        "name": "Mirela",
        "role": "harbour master",
        "attributes": { "cunning": 16, "allies": ["dock guild"] },
        "background": "Took the seat after the flood.",
    });
    let created = call(&router, with_json(Method::POST, "/api/characters", request.clone())).await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let created = json_body(created).await;

    let id = created["id"].as_str().expect("id");
    let fetched = call(&router, get(&format!("/api/characters/{id}"))).await;
    assert_eq!(fetched.status(), StatusCode::OK);
    let fetched = json_body(fetched).await;

    for field in ["campaign_id", "name", "role", "attributes", "background"] {
        assert_eq!(fetched[field], request[field], "{field}");
    }
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn deleted_character_is_not_found_afterwards() {
    let (campaign_id, user_id, character_id) =
        (CampaignId::new(), UserId::new(), CharacterId::new());
    let mut doubles = Doubles::default();
    signed_in(&mut doubles, user_id);
    owns(&mut doubles, campaign_id, user_id);
    let table = character_table(&mut doubles);
    table
        .lock()
        .expect("table")
        .insert(character_id, character(character_id, campaign_id));
    let router = routes(doubles.into_app());
    let uri = format!("/api/characters/{character_id}");

    let deleted = call(&router, delete(&uri)).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let fetched = call(&router, get(&uri)).await;
    assert_eq!(fetched.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        json_body(fetched).await,
        json!({ "error": "character not found" })
    );
}

#[tokio::test]
async fn created_lore_entry_reads_back_unchanged() {
    let (campaign_id, user_id) = (CampaignId::new(), UserId::new());
    let mut doubles = Doubles::default();
    signed_in(&mut doubles, user_id);
    owns(&mut doubles, campaign_id, user_id);
    lore_entry_table(&mut doubles);
    let router = routes(doubles.into_app());

    let request = json!({
        "campaign_id": campaign_id,
        "title": "The Drowning",
        "category": "history",
        "content": "The crown sank with the old king's barge.",
    });
    let created = call(&router, with_json(Method::POST, "/api/lore-entries", request.clone())).await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let created = json_body(created).await;

    let id = created["id"].as_str().expect("id");
    let fetched = call(&router, get(&format!("/api/lore-entries/{id}"))).await;
    assert_eq!(fetched.status(), StatusCode::OK);
    let fetched = json_body(fetched).await;

    for field in ["campaign_id", "title", "category", "content"] {
        assert_eq!(fetched[field], request[field], "{field}");
    }
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn deleted_lore_entry_is_not_found_afterwards() {
    let (campaign_id, user_id) = (CampaignId::new(), UserId::new());
    let mut doubles = Doubles::default();
    signed_in(&mut doubles, user_id);
    owns(&mut doubles, campaign_id, user_id);
    lore_entry_table(&mut doubles);
    let router = routes(doubles.into_app());

    let created = call(
        &router,
        with_json(
            Method::POST,
            "/api/lore-entries",
            json!({ "campaign_id": campaign_id, "title": "Bells", "content": "They ring twice." }),
        ),
    )
    .await;
    let id = json_body(created).await["id"]
        .as_str()
        .expect("id")
        .to_string();
    let uri = format!("/api/lore-entries/{id}");

    let deleted = call(&router, delete(&uri)).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let fetched = call(&router, get(&uri)).await;
    assert_eq!(fetched.status(), StatusCode::NOT_FOUND);
}
