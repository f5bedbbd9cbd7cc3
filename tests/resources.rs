mod common;

use common::spawn_app;
use serde_json::json;

#[tokio::test]
async fn welcome_and_unknown_routes() {
    let app = spawn_app().await;

    let welcome = app.get("/", None).await;
    assert_eq!(welcome.status, 200);
    assert!(welcome.body.as_str().unwrap().starts_with("Welcome"));

    let missing = app.get("/api/does-not-exist", None).await;
    assert_eq!(missing.status, 200);
    assert_eq!(missing.code(), 404);
    assert_eq!(missing.body["title"], "Error");
}

#[tokio::test]
async fn community_round_trip() {
    let app = spawn_app().await;
    let (token, _) = app.register("+15550400", "community@example.com").await;

    let created = app
        .post(
            "/api/communities",
            Some(&token),
            json!({
                "name": "Old Town",
                "emails": ["a@oldtown.org", "b@oldtown.org"],
                "description": "Historic district"
            }),
        )
        .await;
    assert_eq!(created.code(), 0);
    assert_eq!(created.body["identifier"], "COMMUNITY_CREATED");
    let id = created.data()["id"].as_str().unwrap().to_string();

    let read = app
        .get(&format!("/api/communities/{id}"), Some(&token))
        .await;
    assert_eq!(read.code(), 0);
    assert_eq!(read.data()["name"], "Old Town");
    assert_eq!(read.data()["emails"], json!(["a@oldtown.org", "b@oldtown.org"]));
    assert_eq!(read.data()["phoneNumbers"], json!([]));
    assert_eq!(read.data()["createdAt"], created.data()["createdAt"]);

    let updated = app
        .put(
            &format!("/api/communities/{id}"),
            Some(&token),
            json!({ "description": "Historic and lively" }),
        )
        .await;
    assert_eq!(updated.code(), 0);
    assert_eq!(updated.data()["description"], "Historic and lively");
    assert_eq!(updated.data()["name"], "Old Town");

    let listed = app.get("/api/communities", None).await;
    assert_eq!(listed.data().as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn community_email_list_reports_each_bad_address() {
    let app = spawn_app().await;
    let (token, _) = app.register("+15550401", "emails@example.com").await;

    let response = app
        .post(
            "/api/communities",
            Some(&token),
            json!({
                "name": "Old Town",
                "emails": ["ok@oldtown.org", "broken", "also-broken@"],
                "description": "x"
            }),
        )
        .await;

    assert_eq!(response.code(), 400);
    assert_eq!(
        response.body["identifier"],
        "Invalid email format: broken emails, Invalid email format: also-broken@ emails"
    );
}

#[tokio::test]
async fn updates_of_unknown_ids_are_not_found() {
    let app = spawn_app().await;
    let (token, _) = app.register("+15550402", "unknown@example.com").await;

    for (uri, message) in [
        ("/api/communities/nope", "Community not found"),
        ("/api/advertisement/nope", "Advertisement not found"),
        ("/api/directory/nope", "Directory not found"),
        ("/api/cards/nope", "Card not found"),
    ] {
        let response = app
            .put(uri, Some(&token), json!({ "description": "x" }))
            .await;
        assert_eq!(response.code(), 404, "{uri}");
        assert_eq!(response.body["message"], message);
    }

    let notification = app
        .put("/api/notifications/nope", None, json!({ "title": "x" }))
        .await;
    assert_eq!(notification.code(), 404);
}

#[tokio::test]
async fn advertisement_crud() {
    let app = spawn_app().await;
    let (token, _) = app.register("+15550403", "ads@example.com").await;
    let community_id = app.create_community(&token, "Market").await;

    let created = app
        .post(
            "/api/advertisement",
            Some(&token),
            json!({
                "title": "Bake sale",
                "description": "Saturday morning",
                "description2": "Bring a tray",
                "type": "event",
                "backDropImage": "https://cdn.example.org/bake.jpg",
                "expiredDate": "2030-06-01",
                "communityId": community_id
            }),
        )
        .await;
    assert_eq!(created.code(), 0, "{}", created.body);
    let data = created.data();
    assert_eq!(data["type"], "event");
    assert_eq!(data["isPublic"], false);
    assert_eq!(data["description3"], serde_json::Value::Null);
    let id = data["id"].as_str().unwrap().to_string();
    let uri = format!("/api/advertisement/{id}");

    let read = app.get(&uri, Some(&token)).await;
    assert_eq!(read.data()["title"], "Bake sale");
    assert_eq!(read.data()["communityId"], community_id.as_str());

    let updated = app
        .put(&uri, Some(&token), json!({ "isPublic": true, "title": "Bake sale!" }))
        .await;
    assert_eq!(updated.data()["isPublic"], true);
    assert_eq!(updated.data()["description2"], "Bring a tray");

    let empty_title = app.put(&uri, Some(&token), json!({ "title": "" })).await;
    assert_eq!(empty_title.code(), 400);
    assert_eq!(empty_title.body["identifier"], "Title cannot be empty title");

    let listed = app.get("/api/advertisement", Some(&token)).await;
    assert_eq!(listed.data().as_array().unwrap().len(), 1);

    let deleted = app.delete(&uri, Some(&token)).await;
    assert_eq!(deleted.status, 204);
    assert_eq!(app.get(&uri, Some(&token)).await.code(), 404);
}

#[tokio::test]
async fn dangling_community_on_create_is_not_found() {
    let app = spawn_app().await;
    let (token, _) = app.register("+15550404", "dangling-ad@example.com").await;

    let response = app
        .post(
            "/api/advertisement",
            Some(&token),
            json!({ "title": "t", "description": "d", "communityId": "ghost" }),
        )
        .await;
    assert_eq!(response.code(), 404);
    assert_eq!(response.body["message"], "Community not found");

    let listed = app.get("/api/advertisement", Some(&token)).await;
    assert_eq!(listed.data(), &json!([]));
}

#[tokio::test]
async fn directory_entries_may_omit_community() {
    let app = spawn_app().await;
    let (token, _) = app.register("+15550405", "dir@example.com").await;

    let created = app
        .post(
            "/api/directory",
            Some(&token),
            json!({
                "title": "Plumber",
                "description": "24h emergency",
                "phoneNumber": "+15550999",
                "email": "plumber@example.com"
            }),
        )
        .await;
    assert_eq!(created.code(), 0, "{}", created.body);
    assert!(created.data()["communityId"].is_null());
    assert_eq!(created.data()["phoneNumber"], "+15550999");
    let uri = format!("/api/directory/{}", created.data()["id"].as_str().unwrap());

    let bad_email = app
        .put(&uri, Some(&token), json!({ "email": "not-an-email" }))
        .await;
    assert_eq!(bad_email.code(), 400);

    let updated = app
        .put(&uri, Some(&token), json!({ "type": "trade" }))
        .await;
    assert_eq!(updated.data()["type"], "trade");
    assert_eq!(updated.data()["email"], "plumber@example.com");

    assert_eq!(app.delete(&uri, Some(&token)).await.status, 204);
    assert_eq!(app.delete(&uri, Some(&token)).await.code(), 404);
}

#[tokio::test]
async fn deleting_a_community_cascades() {
    let app = spawn_app().await;
    let (token, _) = app.register("+15550406", "cascade@example.com").await;
    let community_id = app.create_community(&token, "Doomed").await;

    app.post(
        "/api/advertisement",
        Some(&token),
        json!({ "title": "t", "description": "d", "communityId": community_id }),
    )
    .await;
    app.post(
        "/api/notifications",
        None,
        json!({ "title": "t", "description": "d", "communityId": community_id }),
    )
    .await;

    let deleted = app
        .delete(&format!("/api/communities/{community_id}"), Some(&token))
        .await;
    assert_eq!(deleted.status, 204);

    assert_eq!(
        app.get("/api/advertisement", Some(&token)).await.data(),
        &json!([])
    );
    assert_eq!(app.get("/api/notifications", None).await.data(), &json!([]));
    assert_eq!(
        app.get(&format!("/api/communities/{community_id}"), Some(&token))
            .await
            .code(),
        404
    );
}

#[tokio::test]
async fn user_create_read_update_delete() {
    let app = spawn_app().await;

    let created = app
        .post(
            "/api/user",
            None,
            json!({
                "name": "Linus",
                "email": "linus@example.com",
                "phoneNumber": "+358401234567",
                "password": "penguins",
                "gender": "male"
            }),
        )
        .await;
    assert_eq!(created.code(), 0, "{}", created.body);
    assert_eq!(created.body["identifier"], "USER_CREATED");
    assert!(created.data().get("passwordHash").is_none());
    let token = created.data()["token"].as_str().unwrap().to_string();
    let id = created.data()["id"].as_str().unwrap().to_string();
    let uri = format!("/api/user/{id}");

    let read = app.get(&uri, Some(&token)).await;
    assert_eq!(read.data()["gender"], "male");
    assert!(read.data().get("password").is_none());

    let updated = app
        .put(&uri, Some(&token), json!({ "age": 54, "password": "tux-rules" }))
        .await;
    assert_eq!(updated.code(), 0);
    assert_eq!(updated.data()["age"], 54);

    let login = app
        .post(
            "/api/login",
            None,
            json!({ "phoneNumber": "+358401234567", "password": "tux-rules" }),
        )
        .await;
    assert_eq!(login.code(), 0);

    let (other_token, _) = app.register("+15550407", "other@example.com").await;
    let forbidden = app.delete(&uri, Some(&other_token)).await;
    assert_eq!(forbidden.code(), 403);

    let deleted = app.delete(&uri, Some(&token)).await;
    assert_eq!(deleted.status, 204);
    assert_eq!(app.get(&uri, Some(&other_token)).await.code(), 404);
}

#[tokio::test]
async fn user_create_validation_and_duplicates() {
    let app = spawn_app().await;

    let invalid = app
        .post(
            "/api/user",
            None,
            json!({ "name": "X", "email": "x@", "phoneNumber": "abc", "password": "12345" }),
        )
        .await;
    assert_eq!(invalid.code(), 400);
    assert_eq!(
        invalid.body["identifier"],
        "Invalid phone number phoneNumber, Invalid email email, \
         Password must be at least 6 characters long password"
    );

    app.register("+15550408", "taken@example.com").await;
    let duplicate = app
        .post(
            "/api/user",
            None,
            json!({
                "name": "Y",
                "email": "taken@example.com",
                "phoneNumber": "+15550409",
                "password": "secret123"
            }),
        )
        .await;
    assert_eq!(duplicate.code(), 400);
    assert_eq!(duplicate.body["message"], "User already exists");
}

#[tokio::test]
async fn blank_directory_community_is_treated_as_absent() {
    let app = spawn_app().await;
    let (token, _) = app.register("+15550410", "blank-dir@example.com").await;

    let created = app
        .post(
            "/api/directory",
            Some(&token),
            json!({ "title": "Locksmith", "description": "Doors", "communityId": "" }),
        )
        .await;
    assert_eq!(created.code(), 0, "{}", created.body);
    assert!(created.data()["communityId"].is_null());

    let uri = format!("/api/directory/{}", created.data()["id"].as_str().unwrap());
    let updated = app
        .put(&uri, Some(&token), json!({ "communityId": "", "title": "Locksmith 24h" }))
        .await;
    assert_eq!(updated.code(), 0);
    assert!(updated.data()["communityId"].is_null());
}
