use bru_gen_bruno::{BrunoCollectionGenerator, CollectionConfig, GeneratorError};
use bru_gen_core::error::ResolveError;
use bru_gen_core::{CodeGenerator, parse};

const EVENTS: &str = include_str!("../../bru-gen-core/tests/fixtures/events-api.json");
const PETSTORE: &str = include_str!("../../bru-gen-core/tests/fixtures/petstore.yaml");
const CIRCULAR: &str = include_str!("../../bru-gen-core/tests/fixtures/circular.json");

fn config(environments: &[&str], base_urls: &[(&str, &str)]) -> CollectionConfig {
    CollectionConfig {
        company: "Acme".to_string(),
        environments: environments.iter().map(|e| e.to_string()).collect(),
        base_urls: base_urls
            .iter()
            .map(|(env, url)| (env.to_string(), url.to_string()))
            .collect(),
    }
}

fn file<'a>(collection: &'a bru_gen_bruno::GeneratedCollection, path: &str) -> &'a str {
    collection
        .files
        .iter()
        .find(|f| f.path == path)
        .unwrap_or_else(|| panic!("missing {path}"))
        .content
        .as_str()
}

#[test]
fn events_collection_layout() {
    let document = parse::from_json(EVENTS).unwrap();
    let collection = BrunoCollectionGenerator
        .generate(&document, &config(&["DEV", "QA", "PROD"], &[]))
        .unwrap();

    assert_eq!(collection.name, "Acme - Events API");
    let paths: Vec<_> = collection.files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(
        paths,
        [
            "bruno.json",
            "environments/DEV.bru",
            "environments/QA.bru",
            "environments/PROD.bru",
            "Events/folder.bru",
            "Events/ListEvents.bru",
            "Events/CreateEvent.bru",
            "Event Admin/folder.bru",
            "Event Admin/Get-Events-ByEventId.bru",
            "Event Admin/Delete-Events-ByEventId.bru",
            "Event/folder.bru",
            "Event/Get-Event-Detail.bru",
            "Health/folder.bru",
            "Health/Get-Health.bru",
            "Sessions/folder.bru",
            "Sessions/UpdateSession.bru",
        ]
    );

    assert_eq!(collection.stats.total_operations, 7);
    assert_eq!(collection.stats.groups["Events"], 2);
    assert_eq!(collection.stats.groups["Event Admin"], 2);
    assert_eq!(
        collection.stats.groups.keys().collect::<Vec<_>>(),
        ["Events", "Event Admin", "Event", "Health", "Sessions"]
    );
}

#[test]
fn every_group_has_one_matching_folder_marker() {
    let document = parse::from_json(EVENTS).unwrap();
    let collection = BrunoCollectionGenerator
        .generate(&document, &CollectionConfig::default())
        .unwrap();

    for request in &collection.requests {
        let (dir, _) = request.file_path.split_once('/').unwrap();
        let markers: Vec<_> = collection
            .files
            .iter()
            .filter(|f| f.path == format!("{dir}/folder.bru"))
            .collect();
        assert_eq!(markers.len(), 1, "group {}", request.group);
        assert!(
            markers[0]
                .content
                .contains(&format!("  name: {}\n", request.group))
        );
    }
}

#[test]
fn request_summaries_carry_operation_summary() {
    let document = parse::from_json(EVENTS).unwrap();
    let collection = BrunoCollectionGenerator
        .generate(&document, &config(&["DEV"], &[]))
        .unwrap();

    let health = collection
        .requests
        .iter()
        .find(|r| r.path == "/health")
        .unwrap();
    assert_eq!(health.summary.as_deref(), Some("Liveness probe"));
    let value = serde_json::to_value(health).unwrap();
    assert_eq!(value["summary"], "Liveness probe");
    assert!(collection.requests[0].summary.is_none());
}

#[test]
fn create_event_request_file() {
    let document = parse::from_json(EVENTS).unwrap();
    let collection = BrunoCollectionGenerator
        .generate(&document, &CollectionConfig::default())
        .unwrap();

    insta::assert_snapshot!(file(&collection, "Events/CreateEvent.bru"), @r#"
    meta {
      name: CreateEvent
      type: http
      seq: 1
    }

    post {
      url: {{baseUrl}}/events
      body: json
      auth: inherit
    }

    body:json {
      {
        "title": "{{PLACEHOLDER}}",
        "startsAt": "{{PLACEHOLDER}}",
        "capacity": 0,
        "price": 0.0,
        "public": false,
        "tags": [
          "{{PLACEHOLDER}}"
        ],
        "venue": {
          "name": "{{PLACEHOLDER}}",
          "location": {
            "lat": 0.0,
            "lng": 0.0
          }
        }
      }
    }

    settings {
      encodeUrl: true
      timeout: 0
    }
    "#);
}

#[test]
fn query_header_and_path_blocks() {
    let document = parse::from_json(EVENTS).unwrap();
    let collection = BrunoCollectionGenerator
        .generate(&document, &CollectionConfig::default())
        .unwrap();

    let list = file(&collection, "Events/ListEvents.bru");
    assert!(list.contains("params:query {\n  ~page: {{PLACEHOLDER}}\n  limit: {{PLACEHOLDER}}\n}"));
    assert!(list.contains("body: none"));

    let delete = file(&collection, "Event Admin/Delete-Events-ByEventId.bru");
    assert!(delete.contains("delete {\n  url: {{baseUrl}}/events/{{eventId}}\n"));
    assert!(delete.contains("headers {\n  X-Admin-Token: {{PLACEHOLDER}}\n}"));
    assert!(delete.contains("vars:pre-request {\n  eventId: {{PLACEHOLDER}}\n}"));

    let session = file(&collection, "Sessions/UpdateSession.bru");
    assert!(!session.contains("tracking"));
    assert!(session.contains("\"active\": false"));
}

#[test]
fn environment_base_urls() {
    let document = parse::from_json(EVENTS).unwrap();
    let collection = BrunoCollectionGenerator
        .generate(
            &document,
            &config(&["DEV", "PROD"], &[("DEV", "https://x")]),
        )
        .unwrap();

    assert!(file(&collection, "environments/DEV.bru").contains("  baseUrl: https://x\n"));
    assert!(
        file(&collection, "environments/PROD.bru")
            .contains("  baseUrl: https://api.events.example.com/v1\n")
    );
}

#[test]
fn legacy_host_base_url_from_yaml() {
    let document = parse::from_yaml(PETSTORE).unwrap();
    let collection = BrunoCollectionGenerator
        .generate(&document, &config(&["QA"], &[]))
        .unwrap();

    assert_eq!(collection.name, "Acme - Petstore");
    assert!(file(&collection, "environments/QA.bru").contains("baseUrl: http://pets.example.com/v2"));
    assert!(file(&collection, "pets/GetPet.bru").contains("url: {{baseUrl}}/pets/{{petId}}"));
    assert_eq!(collection.stats.groups["pets"], 3);
}

#[test]
fn self_referencing_body_aborts_generation() {
    let document = parse::from_json(CIRCULAR).unwrap();
    let err = BrunoCollectionGenerator
        .generate(&document, &config(&["DEV"], &[]))
        .unwrap_err();
    assert!(matches!(
        err,
        GeneratorError::Resolve(ResolveError::CircularRef(_))
    ));
}

#[test]
fn requests_are_serializable_for_reports() {
    let document = parse::from_json(EVENTS).unwrap();
    let collection = BrunoCollectionGenerator
        .generate(&document, &config(&["DEV"], &[]))
        .unwrap();
    let value = serde_json::to_value(&collection.requests[0]).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "method": "GET",
            "path": "/events",
            "group": "Events",
            "file": "ListEvents",
            "file_path": "Events/ListEvents.bru"
        })
    );
}
