mod common;

use anyhow::Result;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use uuid::Uuid;

use common::{event, TestServer};

async fn seed(server: &TestServer) -> Result<(Uuid, Uuid)> {
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    server
        .create(alice, event("Breakfast", "2024-05-01T08:00", "2024-05-01T09:00", "Cafe", "Social event"))
        .await?;
    server
        .create(alice, event("Derby", "2024-05-02T15:00", "2024-05-02T17:00", "Stadium", "Sports event"))
        .await?;
    server
        .create(bob, event("Lecture", "2024-05-03T10:00", "2024-05-03T12:00", "Hall A", "Educational event"))
        .await?;
    server
        .create(bob, event("Concert", "2024-05-04T20:00", "2024-05-04T23:00", "Stadium", "Entertainment event"))
        .await?;

    Ok((alice, bob))
}

fn names(body: &Value) -> Vec<String> {
    let mut names: Vec<String> = body["tasks"]
        .as_array()
        .map(|tasks| tasks.iter().filter_map(|t| t["eventName"].as_str().map(str::to_string)).collect())
        .unwrap_or_default();
    names.sort();
    names
}

#[tokio::test]
async fn no_criteria_returns_every_users_tasks() -> Result<()> {
    let server = common::spawn_server().await?;
    let (alice, _) = seed(&server).await?;

    let (status, body) = server.call(Method::GET, "/api/tasks/filtered", alice, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "Filtered tasks retrieved successfully..");
    assert_eq!(names(&body), ["Breakfast", "Concert", "Derby", "Lecture"]);
    Ok(())
}

#[tokio::test]
async fn time_bounds_are_inclusive() -> Result<()> {
    let server = common::spawn_server().await?;
    let (alice, _) = seed(&server).await?;

    let (_, body) = server
        .call(
            Method::GET,
            "/api/tasks/filtered?startTime=2024-05-02T15:00&endTime=2024-05-03T12:00",
            alice,
            None,
        )
        .await?;
    assert_eq!(names(&body), ["Derby", "Lecture"]);
    Ok(())
}

#[tokio::test]
async fn location_and_category_match_exactly() -> Result<()> {
    let server = common::spawn_server().await?;
    let (alice, _) = seed(&server).await?;

    let (_, body) = server
        .call(Method::GET, "/api/tasks/filtered?location=Stadium", alice, None)
        .await?;
    assert_eq!(names(&body), ["Concert", "Derby"]);

    let (_, body) = server
        .call(Method::GET, "/api/tasks/filtered?location=Stadium&category=Sports%20event", alice, None)
        .await?;
    assert_eq!(names(&body), ["Derby"]);

    let (_, body) = server
        .call(Method::GET, "/api/tasks/filtered?location=stadium", alice, None)
        .await?;
    assert!(names(&body).is_empty());
    Ok(())
}

#[tokio::test]
async fn empty_parameters_do_not_constrain() -> Result<()> {
    let server = common::spawn_server().await?;
    let (alice, _) = seed(&server).await?;

    let (status, body) = server
        .call(Method::GET, "/api/tasks/filtered?location=&startTime=", alice, None)
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body).len(), 4);
    Ok(())
}

#[tokio::test]
async fn unparseable_bounds_are_rejected() -> Result<()> {
    let server = common::spawn_server().await?;
    let (alice, _) = seed(&server).await?;

    let (status, body) = server
        .call(Method::GET, "/api/tasks/filtered?endTime=soon", alice, None)
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], false);
    assert_eq!(body["errors"]["endTime"], "Invalid timestamp format: soon");
    Ok(())
}

#[tokio::test]
async fn no_matches_is_an_empty_list() -> Result<()> {
    let server = common::spawn_server().await?;
    let (alice, _) = seed(&server).await?;

    let (status, body) = server
        .call(Method::GET, "/api/tasks/filtered?category=Exhibition", alice, None)
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tasks"], serde_json::json!([]));
    Ok(())
}
