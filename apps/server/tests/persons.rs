#[allow(unused)]
mod support;

use axum::http::StatusCode;
use movies_api::db::{SearchHits, TotalHits, TotalRelation};
use serde_json::json;
use support::{
    assert_status, capture_logs, hits, ids, person_source, roles_hit, source_hit,
    stub_fields_hit, TestApp, MOVIES, PERSONS,
};

#[tokio::test]
async fn person_detail_resolves_roles_per_film() -> anyhow::Result<()> {
    let app = TestApp::new();
    app.store
        .insert_document(PERSONS, ids::LUCAS, person_source(ids::LUCAS, "George Lucas"));
    app.store.push_search(
        MOVIES,
        hits(vec![
            roles_hit(ids::STAR_WARS, &[ids::LUCAS], &[ids::HAMILL], &[ids::LUCAS]),
            roles_hit(ids::AMERICAN_GRAFFITI, &[ids::LUCAS], &[], &[]),
        ]),
    );

    let (status, person) = app
        .get_json(&format!("/api/v1/persons/{}", ids::LUCAS))
        .await?;

    assert_status(status, StatusCode::OK, "person detail");
    assert_eq!(
        person,
        json!({
            "id": ids::LUCAS,
            "full_name": "George Lucas",
            "films": [
                { "id": ids::STAR_WARS, "roles": ["director", "writer"] },
                { "id": ids::AMERICAN_GRAFFITI, "roles": ["director"] }
            ]
        })
    );

    let body = &app.store.search_bodies(MOVIES)[0];
    assert_eq!(body["_source"], false);
    assert_eq!(
        body["fields"],
        json!(["id", "directors.id", "actors.id", "writers.id"])
    );
    assert_eq!(body["size"], 10000);
    let should = body["query"]["bool"]["filter"]["bool"]["should"]
        .as_array()
        .unwrap();
    assert_eq!(should.len(), 3);
    assert_eq!(
        should[1]["nested"],
        json!({ "path": "actors", "query": { "terms": { "actors.id": [ids::LUCAS] } } })
    );
    Ok(())
}

#[tokio::test]
async fn search_resolves_every_person_with_one_film_query() -> anyhow::Result<()> {
    let app = TestApp::new();
    app.store.push_search(
        PERSONS,
        hits(vec![
            source_hit(person_source(ids::LUCAS, "George Lucas")),
            source_hit(person_source(ids::HAMILL, "Mark Hamill")),
        ]),
    );
    app.store.push_search(
        MOVIES,
        hits(vec![roles_hit(
            ids::STAR_WARS,
            &[ids::LUCAS],
            &[ids::LUCAS, ids::HAMILL],
            &[],
        )]),
    );

    let (status, persons) = app.get_json("/api/v1/persons/search?query=luca").await?;

    assert_status(status, StatusCode::OK, "person search");
    assert_eq!(persons[0]["id"], ids::LUCAS);
    assert_eq!(
        persons[0]["films"],
        json!([{ "id": ids::STAR_WARS, "roles": ["director", "actor"] }])
    );
    assert_eq!(persons[1]["id"], ids::HAMILL);
    assert_eq!(
        persons[1]["films"],
        json!([{ "id": ids::STAR_WARS, "roles": ["actor"] }])
    );

    let film_queries = app.store.search_bodies(MOVIES);
    assert_eq!(film_queries.len(), 1);
    assert_eq!(
        film_queries[0]["query"]["bool"]["filter"]["bool"]["should"][0]["nested"]["query"]
            ["terms"]["directors.id"],
        json!([ids::LUCAS, ids::HAMILL])
    );

    let person_query = &app.store.search_bodies(PERSONS)[0];
    assert_eq!(
        person_query["query"],
        json!({ "match": { "full_name": { "query": "luca", "fuzziness": "auto" } } })
    );
    Ok(())
}

#[tokio::test]
async fn person_without_films_has_empty_filmography() -> anyhow::Result<()> {
    let app = TestApp::new();
    app.store.push_search(
        PERSONS,
        hits(vec![source_hit(person_source(ids::KASDAN, "Lawrence Kasdan"))]),
    );

    let (status, persons) = app.get_json("/api/v1/persons/search?query=kasdan").await?;

    assert_status(status, StatusCode::OK, "person search");
    assert_eq!(persons[0]["films"], json!([]));
    Ok(())
}

#[tokio::test]
async fn search_without_hits_skips_the_film_query() -> anyhow::Result<()> {
    let app = TestApp::new();

    let (status, persons) = app.get_json("/api/v1/persons/search?query=nobody").await?;

    assert_status(status, StatusCode::OK, "empty person search");
    assert_eq!(persons, json!([]));
    assert!(app.store.search_bodies(MOVIES).is_empty());
    Ok(())
}

#[tokio::test]
async fn missing_person_is_404_without_film_query() -> anyhow::Result<()> {
    let app = TestApp::new();

    let (status, _) = app
        .get_json(&format!("/api/v1/persons/{}", ids::KASDAN))
        .await?;

    assert_status(status, StatusCode::NOT_FOUND, "missing person");
    assert_eq!(app.store.call_count(), 1);
    Ok(())
}

#[tokio::test]
async fn person_films_lists_stubs_from_fields() -> anyhow::Result<()> {
    let app = TestApp::new();
    app.store.push_search(
        MOVIES,
        hits(vec![
            stub_fields_hit(ids::STAR_WARS, "Star Wars", 8.6),
            stub_fields_hit(ids::EMPIRE, "The Empire Strikes Back", 8.7),
        ]),
    );

    let (status, films) = app
        .get_json(&format!("/api/v1/persons/{}/film", ids::HAMILL))
        .await?;

    assert_status(status, StatusCode::OK, "person films");
    assert_eq!(
        films,
        json!([
            { "id": ids::STAR_WARS, "title": "Star Wars", "imdb_rating": 8.6 },
            { "id": ids::EMPIRE, "title": "The Empire Strikes Back", "imdb_rating": 8.7 }
        ])
    );

    let body = &app.store.search_bodies(MOVIES)[0];
    assert_eq!(body["fields"], json!(["id", "title", "imdb_rating"]));
    assert_eq!(body["from"], 0);
    assert_eq!(body["size"], 10000);
    Ok(())
}

#[tokio::test]
async fn unknown_person_has_no_films() -> anyhow::Result<()> {
    let app = TestApp::new();

    let (status, films) = app
        .get_json(&format!("/api/v1/persons/{}/film", ids::KASDAN))
        .await?;

    assert_status(status, StatusCode::OK, "unknown person films");
    assert_eq!(films, json!([]));
    Ok(())
}

#[tokio::test]
async fn truncated_filmography_warns_and_resolves_returned_films() -> anyhow::Result<()> {
    let (logs, _guard) = capture_logs();
    let app = TestApp::new();
    app.store
        .insert_document(PERSONS, ids::LUCAS, person_source(ids::LUCAS, "George Lucas"));
    app.store.push_search(
        MOVIES,
        SearchHits::new(vec![roles_hit(ids::STAR_WARS, &[ids::LUCAS], &[], &[])]).with_total(
            TotalHits {
                value: 12_000,
                relation: TotalRelation::Eq,
            },
        ),
    );

    let (status, person) = app
        .get_json(&format!("/api/v1/persons/{}", ids::LUCAS))
        .await?;

    assert_status(status, StatusCode::OK, "truncated filmography");
    assert_eq!(person["films"].as_array().map(Vec::len), Some(1));
    let output = logs.contents();
    assert!(
        output.contains("Person film lookup truncated to the result window"),
        "missing truncation warning in: {output}"
    );
    assert!(output.contains("total=12000"), "unexpected fields in: {output}");
    Ok(())
}

#[tokio::test]
async fn complete_filmography_does_not_warn() -> anyhow::Result<()> {
    let (logs, _guard) = capture_logs();
    let app = TestApp::new();
    app.store
        .insert_document(PERSONS, ids::LUCAS, person_source(ids::LUCAS, "George Lucas"));
    app.store.push_search(
        MOVIES,
        SearchHits::new(vec![roles_hit(ids::STAR_WARS, &[ids::LUCAS], &[], &[])]).with_total(
            TotalHits {
                value: 1,
                relation: TotalRelation::Eq,
            },
        ),
    );

    let (status, _) = app
        .get_json(&format!("/api/v1/persons/{}", ids::LUCAS))
        .await?;

    assert_status(status, StatusCode::OK, "complete filmography");
    assert!(!logs.contains("truncated"), "unexpected warning: {}", logs.contents());
    Ok(())
}

#[tokio::test]
async fn malformed_person_id_is_422() -> anyhow::Result<()> {
    let app = TestApp::new();

    for path in ["/api/v1/persons/123", "/api/v1/persons/123/film"] {
        let (status, _) = app.get_json(path).await?;
        assert_status(status, StatusCode::UNPROCESSABLE_ENTITY, path);
    }
    assert_eq!(app.store.call_count(), 0);
    Ok(())
}
