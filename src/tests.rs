//! Integration tests for the family tree backend.

use std::sync::Arc;

use reqwest::{Client, Method, RequestBuilder};
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::config::Config;
use crate::db::{init_database, Repository};
use crate::models::{UpdateProfileRequest, UserRole};
use crate::{create_router, AppState};

const ADMIN: &str = "admin-user";
const MEMBER: &str = "member-user";

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
    repo: Arc<Repository>,
    _temp_dir: TempDir,
}

impl TestFixture {
    async fn new() -> Self {
        Self::with_psk(Some("test-api-key".to_string())).await
    }

    async fn with_psk(psk: Option<String>) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.sqlite");

        let pool = init_database(&db_path).await.expect("Failed to init DB");
        let repo = Arc::new(Repository::new(pool));

        let config = Config {
            api_psk: psk.clone(),
            db_path,
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            log_level: "warn".to_string(),
            log_json: false,
        };

        let state = AppState {
            repo: repo.clone(),
            config: Arc::new(config),
        };

        let app = create_router(state);

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let base_url = format!("http://{}", addr);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let mut client_builder = Client::builder();
        if let Some(key) = psk {
            let mut headers = reqwest::header::HeaderMap::new();
            headers.insert("x-api-key", key.parse().unwrap());
            client_builder = client_builder.default_headers(headers);
        }

        let fixture = TestFixture {
            client: client_builder.build().unwrap(),
            base_url,
            repo,
            _temp_dir: temp_dir,
        };
        fixture.add_user(ADMIN, "Admin", UserRole::Admin, true).await;
        fixture.add_user(MEMBER, "Mai", UserRole::Member, true).await;
        fixture
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Request without a signed-in user.
    fn guest(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.url(path))
    }

    /// Request on behalf of `user_id`.
    fn user(&self, method: Method, path: &str, user_id: &str) -> RequestBuilder {
        self.guest(method, path).header("x-user-id", user_id)
    }

    async fn add_user(&self, id: &str, name: &str, role: UserRole, is_active: bool) {
        self.repo
            .ensure_profile(id, Some(name), None)
            .await
            .expect("Failed to create profile");
        self.repo
            .update_profile(
                id,
                &UpdateProfileRequest {
                    role: Some(role),
                    is_active: Some(is_active),
                },
            )
            .await
            .expect("Failed to update profile");
    }

    /// Create a person as admin and return its id.
    async fn add_person(&self, name: &str, gender: &str, birth_year: Option<i32>) -> String {
        let resp = self
            .user(Method::POST, "/api/persons", ADMIN)
            .json(&json!({
                "fullName": name,
                "gender": gender,
                "birthYear": birth_year,
                "note": format!("note about {}", name)
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        body["data"]["id"].as_str().unwrap().to_string()
    }

    async fn add_child(&self, parent: &str, child: &str) -> String {
        let resp = self
            .user(Method::POST, "/api/relationships", ADMIN)
            .json(&json!({
                "type": "biological_child",
                "personA": parent,
                "personB": child
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        body["data"]["id"].as_str().unwrap().to_string()
    }

    async fn tree(&self, user_id: Option<&str>, query: &str) -> Value {
        let path = format!("/api/tree{}", query);
        let request = match user_id {
            Some(id) => self.user(Method::GET, &path, id),
            None => self.guest(Method::GET, &path),
        };
        let resp = request.send().await.unwrap();
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        body["data"].clone()
    }

    async fn comment(
        &self,
        person_id: &str,
        user_id: &str,
        content: &str,
        parent_id: Option<&str>,
    ) -> Value {
        let resp = self
            .user(
                Method::POST,
                &format!("/api/persons/{}/comments", person_id),
                user_id,
            )
            .json(&json!({ "content": content, "parentId": parent_id }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        body["data"].clone()
    }
}

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;

    let resp = fixture.guest(Method::GET, "/health").send().await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_auth_missing_psk() {
    let fixture = TestFixture::new().await;

    let resp = Client::new()
        .get(fixture.url("/api/tree"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_auth_invalid_and_bearer_psk() {
    let fixture = TestFixture::new().await;
    let client = Client::new();

    let resp = client
        .get(fixture.url("/api/tree"))
        .header("x-api-key", "wrong-key")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    let resp = client
        .get(fixture.url("/api/tree"))
        .header("authorization", "Bearer test-api-key")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn test_no_psk_configured_allows_requests() {
    let fixture = TestFixture::with_psk(None).await;

    let resp = Client::new()
        .get(fixture.url("/api/tree"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn test_empty_tree() {
    let fixture = TestFixture::new().await;

    let tree = fixture.tree(None, "").await;
    assert!(tree["rootId"].is_null());
    assert_eq!(tree["generations"], 0);
    assert_eq!(tree["totalMembers"], 0);
}

#[tokio::test]
async fn test_tree_root_and_generations() {
    let fixture = TestFixture::new().await;

    let father = fixture.add_person("Nguyen Van A", "male", Some(1900)).await;
    let daughter = fixture.add_person("Nguyen Thi B", "female", Some(1925)).await;
    fixture.add_child(&father, &daughter).await;

    let tree = fixture.tree(Some(MEMBER), "").await;
    assert_eq!(tree["rootId"], father.as_str());
    assert_eq!(tree["generations"], 2);
    assert_eq!(tree["totalMembers"], 2);
    assert_eq!(tree["persons"][0]["id"], father.as_str());
    assert_eq!(tree["relationships"][0]["type"], "biological_child");
}

#[tokio::test]
async fn test_tree_root_hint_priority() {
    let fixture = TestFixture::new().await;

    let grandpa = fixture.add_person("Grandpa", "male", Some(1890)).await;
    let father = fixture.add_person("Father", "male", Some(1920)).await;
    let son = fixture.add_person("Son", "male", Some(1950)).await;
    fixture.add_child(&grandpa, &father).await;
    fixture.add_child(&father, &son).await;

    // Computed fallback
    assert_eq!(fixture.tree(Some(MEMBER), "").await["rootId"], grandpa.as_str());

    // System default beats the fallback
    let resp = fixture
        .user(
            Method::PUT,
            &format!("/api/persons/{}/default-root", father),
            ADMIN,
        )
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(fixture.tree(Some(MEMBER), "").await["rootId"], father.as_str());

    // Personal root beats the system default
    let resp = fixture
        .user(Method::PUT, "/api/me/root-node", MEMBER)
        .json(&json!({ "personId": son }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(fixture.tree(Some(MEMBER), "").await["rootId"], son.as_str());

    // Other users and guests still see the system default
    assert_eq!(fixture.tree(Some(ADMIN), "").await["rootId"], father.as_str());
    assert_eq!(fixture.tree(None, "").await["rootId"], father.as_str());

    // Explicit id beats everything, unknown ids are ignored
    let query = format!("?rootId={}", grandpa);
    assert_eq!(
        fixture.tree(Some(MEMBER), &query).await["rootId"],
        grandpa.as_str()
    );
    assert_eq!(
        fixture.tree(Some(MEMBER), "?rootId=missing").await["rootId"],
        son.as_str()
    );

    // Generations do not depend on the chosen root
    assert_eq!(fixture.tree(Some(MEMBER), &query).await["generations"], 3);
}

#[tokio::test]
async fn test_default_root_is_exclusive() {
    let fixture = TestFixture::new().await;

    let a = fixture.add_person("A", "female", Some(1900)).await;
    let b = fixture.add_person("B", "female", Some(1901)).await;

    for id in [&a, &b] {
        let resp = fixture
            .user(Method::PUT, &format!("/api/persons/{}/default-root", id), ADMIN)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
    }

    let tree = fixture.tree(Some(ADMIN), "").await;
    let flagged: Vec<&str> = tree["persons"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|p| p["isDefaultRootNode"] == true)
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(flagged, vec![b.as_str()]);
    assert_eq!(tree["rootId"], b.as_str());

    let resp = fixture
        .user(Method::PUT, "/api/persons/missing/default-root", ADMIN)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    assert_eq!(fixture.tree(Some(ADMIN), "").await["rootId"], b.as_str());
}

#[tokio::test]
async fn test_guest_tree_hides_private_fields() {
    let fixture = TestFixture::new().await;
    fixture.add_person("Ba", "male", Some(1930)).await;

    let guest = fixture.tree(None, "").await;
    assert!(guest["persons"][0].get("note").is_none());

    let member = fixture.tree(Some(MEMBER), "").await;
    assert_eq!(member["persons"][0]["note"], "note about Ba");
}

#[tokio::test]
async fn test_person_crud() {
    let fixture = TestFixture::new().await;

    let id = fixture.add_person("Tran Van C", "male", Some(1960)).await;

    let resp = fixture
        .user(Method::GET, &format!("/api/persons/{}", id), MEMBER)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["fullName"], "Tran Van C");
    assert_eq!(body["data"]["gender"], "male");

    let resp = fixture
        .user(Method::PUT, &format!("/api/persons/{}", id), ADMIN)
        .json(&json!({ "fullName": "Tran Van D", "isDeceased": true, "deathYear": 2020 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["fullName"], "Tran Van D");
    assert_eq!(body["data"]["isDeceased"], true);
    assert_eq!(body["data"]["birthYear"], 1960);

    let resp = fixture
        .user(Method::GET, "/api/persons?search=van%20d", MEMBER)
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let resp = fixture
        .user(Method::GET, "/api/persons?search=nobody", MEMBER)
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert!(body["data"].as_array().unwrap().is_empty());

    let resp = fixture
        .user(Method::DELETE, &format!("/api/persons/{}", id), ADMIN)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = fixture
        .user(Method::GET, &format!("/api/persons/{}", id), MEMBER)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_update_person_null_clears_field() {
    let fixture = TestFixture::new().await;

    let id = fixture.add_person("Ong", "male", Some(1900)).await;
    let path = format!("/api/persons/{}", id);

    let resp = fixture
        .user(Method::PUT, &path, ADMIN)
        .json(&json!({ "isDeceased": true, "deathYear": 1970, "occupation": "farmer" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = fixture
        .user(Method::PUT, &path, ADMIN)
        .json(&json!({ "birthYear": null, "note": null, "isDeceased": false, "deathYear": null }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let person = &body["data"];
    assert!(person["birthYear"].is_null());
    assert!(person["deathYear"].is_null());
    assert!(person.get("note").is_none());
    assert_eq!(person["isDeceased"], false);
    assert_eq!(person["occupation"], "farmer");
    assert_eq!(person["fullName"], "Ong");

    let resp = fixture
        .user(Method::PUT, "/api/persons/missing", ADMIN)
        .json(&json!({ "note": null }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_concurrent_updates_of_different_fields_all_apply() {
    let fixture = TestFixture::new().await;

    let id = fixture.add_person("Ba", "female", Some(1930)).await;
    let path = format!("/api/persons/{}", id);

    let edits = [
        json!({ "occupation": "teacher" }),
        json!({ "phoneNumber": "0123" }),
        json!({ "currentResidence": "Hue" }),
        json!({ "birthMonth": 4 }),
        json!({ "avatarUrl": "https://example.org/ba.png" }),
    ];
    let handles: Vec<_> = edits
        .iter()
        .map(|edit| tokio::spawn(fixture.user(Method::PUT, &path, ADMIN).json(edit).send()))
        .collect();
    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap().status(), 200);
    }

    let resp = fixture.user(Method::GET, &path, MEMBER).send().await.unwrap();
    let body: Value = resp.json().await.unwrap();
    let person = &body["data"];
    assert_eq!(person["occupation"], "teacher");
    assert_eq!(person["phoneNumber"], "0123");
    assert_eq!(person["currentResidence"], "Hue");
    assert_eq!(person["birthMonth"], 4);
    assert_eq!(person["avatarUrl"], "https://example.org/ba.png");
    assert_eq!(person["birthYear"], 1930);
}

#[tokio::test]
async fn test_person_validation() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .user(Method::POST, "/api/persons", ADMIN)
        .json(&json!({ "fullName": "   ", "gender": "other" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_delete_person_with_relationships_is_refused() {
    let fixture = TestFixture::new().await;

    let parent = fixture.add_person("Parent", "male", Some(1900)).await;
    let child = fixture.add_person("Child", "male", Some(1930)).await;
    let rel = fixture.add_child(&parent, &child).await;

    let resp = fixture
        .user(Method::DELETE, &format!("/api/persons/{}", child), ADMIN)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 409);

    let resp = fixture
        .user(Method::DELETE, &format!("/api/relationships/{}", rel), ADMIN)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = fixture
        .user(Method::DELETE, &format!("/api/persons/{}", child), ADMIN)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn test_relationship_requires_distinct_existing_persons() {
    let fixture = TestFixture::new().await;
    let a = fixture.add_person("A", "male", None).await;

    let resp = fixture
        .user(Method::POST, "/api/relationships", ADMIN)
        .json(&json!({ "type": "marriage", "personA": a, "personB": a }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let resp = fixture
        .user(Method::POST, "/api/relationships", ADMIN)
        .json(&json!({ "type": "marriage", "personA": a, "personB": "ghost" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_capabilities() {
    let fixture = TestFixture::new().await;
    fixture
        .add_user("pending-user", "Pending", UserRole::Member, false)
        .await;

    // No user at all
    let resp = fixture
        .guest(Method::GET, "/api/persons")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    // Not yet activated
    let resp = fixture
        .user(Method::GET, "/api/persons", "pending-user")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);

    // Members cannot edit the tree
    let resp = fixture
        .user(Method::POST, "/api/persons", MEMBER)
        .json(&json!({ "fullName": "X", "gender": "male" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "FORBIDDEN");

    let resp = fixture
        .user(Method::GET, "/api/profiles", MEMBER)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);
}

#[tokio::test]
async fn test_first_request_creates_inactive_profile() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .user(Method::GET, "/api/me", "new-user")
        .header("x-user-name", "Hoa")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["fullName"], "Hoa");
    assert_eq!(body["data"]["role"], "member");
    assert_eq!(body["data"]["isActive"], false);

    // A later provider name does not overwrite the stored one
    let resp = fixture
        .user(Method::GET, "/api/me", "new-user")
        .header("x-user-name", "Someone Else")
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["fullName"], "Hoa");

    let resp = fixture
        .user(Method::PUT, "/api/me", "new-user")
        .json(&json!({ "fullName": "Hoa Nguyen" }))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["fullName"], "Hoa Nguyen");

    let resp = fixture
        .user(Method::PUT, "/api/me", "new-user")
        .json(&json!({ "fullName": "  " }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    // Admin activates the account
    let resp = fixture
        .user(Method::PUT, "/api/profiles/new-user", ADMIN)
        .json(&json!({ "isActive": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = fixture
        .user(Method::GET, "/api/persons", "new-user")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn test_personal_root_node() {
    let fixture = TestFixture::new().await;
    let a = fixture.add_person("A", "male", Some(1900)).await;
    let b = fixture.add_person("B", "male", Some(1950)).await;

    for id in [&a, &b] {
        let resp = fixture
            .user(Method::PUT, "/api/me/root-node", MEMBER)
            .json(&json!({ "personId": id }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
    }

    let resp = fixture
        .user(Method::GET, "/api/me/root-node", MEMBER)
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["rootNodeId"], b.as_str());

    let resp = fixture
        .user(Method::PUT, "/api/me/root-node", MEMBER)
        .json(&json!({ "personId": "ghost" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let resp = fixture
        .user(Method::DELETE, "/api/me/root-node", MEMBER)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = fixture
        .user(Method::GET, "/api/me/root-node", MEMBER)
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn test_update_note() {
    let fixture = TestFixture::new().await;
    let id = fixture.add_person("A", "male", None).await;

    let resp = fixture
        .user(Method::PUT, &format!("/api/persons/{}/note", id), MEMBER)
        .json(&json!({ "note": "  moved to Hue in 1975 " }))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["note"], "moved to Hue in 1975");

    let resp = fixture
        .user(Method::PUT, &format!("/api/persons/{}/note", id), MEMBER)
        .json(&json!({ "note": "   " }))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert!(body["data"].get("note").is_none());
}

#[tokio::test]
async fn test_reply_to_reply_is_flattened() {
    let fixture = TestFixture::new().await;
    fixture.add_user("bao", "Bao", UserRole::Member, true).await;
    fixture.add_user("chi", "Chi", UserRole::Member, true).await;
    let person = fixture.add_person("Ong Noi", "male", Some(1900)).await;

    let a = fixture.comment(&person, MEMBER, "Great grandfather", None).await;
    let a_id = a["id"].as_str().unwrap();
    assert!(a["parentId"].is_null());

    let b = fixture.comment(&person, "bao", "Agreed", Some(a_id)).await;
    let b_id = b["id"].as_str().unwrap();
    assert_eq!(b["parentId"], a_id);
    assert_eq!(b["displayContent"], "Agreed");

    let c = fixture.comment(&person, "chi", "Me too", Some(b_id)).await;
    assert_eq!(c["parentId"], a_id);
    assert_eq!(c["replyToUserId"], "bao");
    assert_eq!(c["content"], "Me too");
    assert_eq!(c["displayContent"], "replying to Bao: Me too");

    let resp = fixture
        .user(
            Method::GET,
            &format!("/api/persons/{}/comments", person),
            MEMBER,
        )
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    let threads = body["data"].as_array().unwrap();
    assert_eq!(threads.len(), 1);
    assert_eq!(threads[0]["id"], a_id);
    assert_eq!(threads[0]["authorName"], "Mai");
    let replies = threads[0]["replies"].as_array().unwrap();
    assert_eq!(replies.len(), 2);
    assert_eq!(replies[0]["id"], b_id);
    assert_eq!(replies[1]["displayContent"], "replying to Bao: Me too");
    assert!(replies[1]["replies"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_comment_validation() {
    let fixture = TestFixture::new().await;
    let p1 = fixture.add_person("P1", "male", None).await;
    let p2 = fixture.add_person("P2", "male", None).await;
    let on_p1 = fixture.comment(&p1, MEMBER, "hello", None).await;

    let resp = fixture
        .user(Method::POST, &format!("/api/persons/{}/comments", p1), MEMBER)
        .json(&json!({ "content": "   " }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let resp = fixture
        .user(Method::POST, &format!("/api/persons/{}/comments", p2), MEMBER)
        .json(&json!({ "content": "hi", "parentId": on_p1["id"] }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let resp = fixture
        .user(Method::POST, &format!("/api/persons/{}/comments", p1), MEMBER)
        .json(&json!({ "content": "hi", "parentId": "ghost" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let resp = fixture
        .guest(Method::GET, &format!("/api/persons/{}/comments", p1))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn test_comment_delete_rights_and_orphan_promotion() {
    let fixture = TestFixture::new().await;
    fixture.add_user("bao", "Bao", UserRole::Member, true).await;
    let person = fixture.add_person("P", "female", None).await;

    let root = fixture.comment(&person, MEMBER, "first", None).await;
    let root_id = root["id"].as_str().unwrap();
    let reply = fixture.comment(&person, "bao", "second", Some(root_id)).await;

    let resp = fixture
        .user(Method::DELETE, &format!("/api/comments/{}", root_id), "bao")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);

    let resp = fixture
        .user(Method::DELETE, &format!("/api/comments/{}", root_id), ADMIN)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = fixture
        .user(
            Method::GET,
            &format!("/api/persons/{}/comments", person),
            "bao",
        )
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    let threads = body["data"].as_array().unwrap();
    assert_eq!(threads.len(), 1);
    assert_eq!(threads[0]["id"], reply["id"]);

    let resp = fixture
        .user(
            Method::DELETE,
            &format!("/api/comments/{}", reply["id"].as_str().unwrap()),
            "bao",
        )
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn test_edit_request_lifecycle() {
    let fixture = TestFixture::new().await;
    let person = fixture.add_person("Co Ba", "female", Some(1940)).await;

    let resp = fixture
        .user(
            Method::POST,
            &format!("/api/persons/{}/edit-requests", person),
            MEMBER,
        )
        .json(&json!({ "content": "Birth year should be 1941" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let request_id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["personName"], "Co Ba");

    let resp = fixture
        .user(Method::GET, "/api/edit-requests?status=pending&search=co%20ba", ADMIN)
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let resp = fixture
        .user(
            Method::PUT,
            &format!("/api/edit-requests/{}/approve", request_id),
            ADMIN,
        )
        .json(&json!({ "adminNote": "Fixed, thanks" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["status"], "approved");
    assert_eq!(body["data"]["adminNote"], "Fixed, thanks");

    // Reviewed exactly once
    for action in ["approve", "reject"] {
        let resp = fixture
            .user(
                Method::PUT,
                &format!("/api/edit-requests/{}/{}", request_id, action),
                ADMIN,
            )
            .json(&json!({}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 409);
    }

    let resp = fixture
        .user(Method::GET, "/api/edit-requests?status=pending", ADMIN)
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert!(body["data"].as_array().unwrap().is_empty());

    let resp = fixture
        .user(Method::GET, "/api/me/edit-requests", MEMBER)
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"][0]["status"], "approved");

    let resp = fixture
        .user(Method::PUT, "/api/edit-requests/ghost/reject", ADMIN)
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_edit_request_needs_active_member() {
    let fixture = TestFixture::new().await;
    fixture
        .add_user("pending-user", "Pending", UserRole::Member, false)
        .await;
    let person = fixture.add_person("P", "male", None).await;

    let resp = fixture
        .user(
            Method::POST,
            &format!("/api/persons/{}/edit-requests", person),
            "pending-user",
        )
        .json(&json!({ "content": "please fix" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);

    let resp = fixture
        .user(
            Method::POST,
            &format!("/api/persons/{}/edit-requests", person),
            MEMBER,
        )
        .json(&json!({ "content": "" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}
