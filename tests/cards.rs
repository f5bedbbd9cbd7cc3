mod common;

use std::path::Path;

use common::{PHOTOS, card_fields, multipart_request, spawn_app};
use community_backend::database::Store;
use serde_json::json;

#[tokio::test]
async fn missing_photo_is_rejected_before_any_side_effect() {
    let app = spawn_app().await;
    let (token, user_id) = app.register("+15550200", "cards@example.com").await;
    let community_id = app.create_community(&token, "Harbour").await;

    let response = app
        .send(multipart_request(
            "/api/cards",
            &token,
            &card_fields(&community_id),
            &PHOTOS[..2],
        ))
        .await;

    assert_eq!(response.status, 200);
    assert_eq!(response.code(), 400);
    assert_eq!(response.body["message"], "Please upload the required file(s)");
    assert_eq!(response.body["identifier"], "backPhoto is required");

    assert!(app.photo_files().is_empty());
    assert!(app.store.list_cards_for_user(&user_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn photo_check_runs_before_field_validation() {
    let app = spawn_app().await;
    let (token, _) = app.register("+15550201", "order@example.com").await;

    let response = app
        .send(multipart_request("/api/cards", &token, &[], &[]))
        .await;

    assert_eq!(response.code(), 400);
    assert_eq!(response.body["identifier"], "passportPhoto is required");
}

#[tokio::test]
async fn invalid_text_fields_leave_no_trace() {
    let app = spawn_app().await;
    let (token, user_id) = app.register("+15550202", "fields@example.com").await;

    let response = app
        .send(multipart_request(
            "/api/cards",
            &token,
            &[("fullName", "Ada".to_string())],
            &PHOTOS,
        ))
        .await;

    assert_eq!(response.code(), 400);
    assert_eq!(response.body["message"], "Validation failed");
    let identifier = response.body["identifier"].as_str().unwrap();
    assert!(identifier.starts_with("Card number is required cardNumber"));
    assert!(identifier.contains("Community ID is required communityId"));

    assert!(app.photo_files().is_empty());
    assert!(app.store.list_cards_for_user(&user_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn successful_upload_writes_three_files_and_returns_newest_first() {
    let app = spawn_app().await;
    let (token, _) = app.register("+15550203", "upload@example.com").await;
    let community_id = app.create_community(&token, "Harbour").await;

    let first = app
        .send(multipart_request(
            "/api/cards",
            &token,
            &card_fields(&community_id),
            &PHOTOS,
        ))
        .await;
    assert_eq!(first.code(), 0, "{}", first.body);
    assert_eq!(first.body["message"], "Card created successfully");
    assert_eq!(first.body["identifier"], "CARD_CREATED");

    let mut fields = card_fields(&community_id);
    fields[0].1 = "CN-0002".to_string();
    fields.push(("dateOfIssue", "garbage".to_string()));
    fields.push(("active", "false".to_string()));
    let second = app
        .send(multipart_request("/api/cards", &token, &fields, &PHOTOS))
        .await;
    assert_eq!(second.code(), 0, "{}", second.body);

    let cards = second.data().as_array().unwrap();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0]["cardNumber"], "CN-0002");
    assert_eq!(cards[1]["cardNumber"], "CN-0001");
    assert_eq!(cards[0]["active"], false);
    assert_eq!(cards[1]["active"], true);
    assert!(cards[0]["dateOfIssue"].is_string());
    assert!(cards[0]["dateOfExpiry"].is_null());
    assert_eq!(cards[0]["community"]["id"], community_id.as_str());

    for slot in ["passportPhoto", "frontPhoto", "backPhoto"] {
        let path = cards[0][slot].as_str().unwrap();
        assert!(path.ends_with(&format!("-{slot}.jpg")));
        assert!(Path::new(path).exists());
    }
    assert_eq!(
        std::fs::read(cards[0]["frontPhoto"].as_str().unwrap()).unwrap(),
        b"front-bytes"
    );
    assert_eq!(app.photo_files().len(), 6);
}

#[tokio::test]
async fn unknown_community_writes_nothing() {
    let app = spawn_app().await;
    let (token, user_id) = app.register("+15550204", "dangling@example.com").await;

    let response = app
        .send(multipart_request(
            "/api/cards",
            &token,
            &card_fields("no-such-community"),
            &PHOTOS,
        ))
        .await;

    assert_eq!(response.code(), 404);
    assert_eq!(response.body["message"], "Community not found");
    assert!(app.photo_files().is_empty());
    assert!(app.store.list_cards_for_user(&user_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn duplicated_photo_slot_is_rejected() {
    let app = spawn_app().await;
    let (token, _) = app.register("+15550205", "dup@example.com").await;
    let community_id = app.create_community(&token, "Harbour").await;

    let mut files = PHOTOS.to_vec();
    files.push(("frontPhoto", &b"again"[..]));
    let response = app
        .send(multipart_request(
            "/api/cards",
            &token,
            &card_fields(&community_id),
            &files,
        ))
        .await;

    assert_eq!(response.code(), 400);
    assert!(app.photo_files().is_empty());
}

#[tokio::test]
async fn community_card_listing_is_not_found_when_empty() {
    let app = spawn_app().await;
    let (token, _) = app.register("+15550206", "listing@example.com").await;
    let community_id = app.create_community(&token, "Harbour").await;

    let empty = app
        .get(&format!("/api/communities/{community_id}/cards"), None)
        .await;
    assert_eq!(empty.code(), 404);
    assert_eq!(empty.body["message"], "No cards found for this community.");

    app.send(multipart_request(
        "/api/cards",
        &token,
        &card_fields(&community_id),
        &PHOTOS,
    ))
    .await;

    let listed = app
        .get(&format!("/api/communities/{community_id}/cards"), None)
        .await;
    assert_eq!(listed.code(), 0);
    assert_eq!(listed.data().as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn update_and_delete_card() {
    let app = spawn_app().await;
    let (token, _) = app.register("+15550207", "crud@example.com").await;
    let community_id = app.create_community(&token, "Harbour").await;

    let created = app
        .send(multipart_request(
            "/api/cards",
            &token,
            &card_fields(&community_id),
            &PHOTOS,
        ))
        .await;
    let card_id = created.data()[0]["id"].as_str().unwrap().to_string();
    let uri = format!("/api/cards/{card_id}");

    let updated = app
        .put(&uri, Some(&token), json!({ "status": "approved", "active": false }))
        .await;
    assert_eq!(updated.code(), 0);
    assert_eq!(updated.data()["status"], "approved");
    assert_eq!(updated.data()["active"], false);
    assert_eq!(updated.data()["fullName"], "Ada Lovelace");

    let bad_date = app
        .put(&uri, Some(&token), json!({ "dateOfExpiry": "soon" }))
        .await;
    assert_eq!(bad_date.code(), 400);

    let deleted = app.delete(&uri, Some(&token)).await;
    assert_eq!(deleted.status, 204);
    assert!(deleted.body.is_null());
    assert!(app.photo_files().is_empty());

    let gone = app.get(&uri, Some(&token)).await;
    assert_eq!(gone.code(), 404);
    assert_eq!(gone.body["message"], "Card not found");

    let missing = app
        .put(&uri, Some(&token), json!({ "status": "revoked" }))
        .await;
    assert_eq!(missing.code(), 404);
}

#[tokio::test]
async fn card_list_is_scoped_to_the_caller() {
    let app = spawn_app().await;
    let (alice, _) = app.register("+15550208", "alice@example.com").await;
    let (bob, _) = app.register("+15550209", "bob@example.com").await;
    let community_id = app.create_community(&alice, "Harbour").await;

    app.send(multipart_request(
        "/api/cards",
        &alice,
        &card_fields(&community_id),
        &PHOTOS,
    ))
    .await;

    let mine = app.get("/api/cards", Some(&alice)).await;
    assert_eq!(mine.data().as_array().unwrap().len(), 1);
    let theirs = app.get("/api/cards", Some(&bob)).await;
    assert_eq!(theirs.code(), 0);
    assert_eq!(theirs.data(), &json!([]));
}

#[tokio::test]
async fn failed_photo_write_rolls_back_the_card() {
    let app = spawn_app().await;
    let (token, user_id) = app.register("+15550210", "rollback@example.com").await;
    let community_id = app.create_community(&token, "Harbour").await;

    std::fs::remove_dir_all(&app.photo_dir).unwrap();

    let response = app
        .send(multipart_request(
            "/api/cards",
            &token,
            &card_fields(&community_id),
            &PHOTOS,
        ))
        .await;

    assert_eq!(response.status, 200);
    assert_eq!(response.code(), 500);
    assert_eq!(response.body["message"], "Something went wrong");
    assert!(response.data().is_null());

    assert!(app.store.list_cards_for_user(&user_id).await.unwrap().is_empty());
    assert!(
        app.store
            .list_cards_for_community(&community_id)
            .await
            .unwrap()
            .is_empty()
    );
    assert!(!app.photo_dir.exists());
}

#[tokio::test]
async fn deleted_user_is_reported_instead_of_community() {
    let app = spawn_app().await;
    let (token, user_id) = app.register("+15550211", "gone@example.com").await;
    let community_id = app.create_community(&token, "Harbour").await;

    let deleted = app.delete(&format!("/api/user/{user_id}"), Some(&token)).await;
    assert_eq!(deleted.status, 204);

    let response = app
        .send(multipart_request(
            "/api/cards",
            &token,
            &card_fields(&community_id),
            &PHOTOS,
        ))
        .await;

    assert_eq!(response.code(), 404);
    assert_eq!(response.body["message"], "User not found");
    assert!(app.photo_files().is_empty());
}
