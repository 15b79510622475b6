//! End-to-end editor tests against a scripted transport.

use serde_json::{json, Value};
use std::time::Duration;
use wbkit_datamodel::{EntityDocument, EntityId, EntityType, ItemDocument, Snak, Statement, Term};
use wbkit_editor::{
    EditOptions, EditorConfig, EditorError, FixedGuidGenerator, MockTransport,
    StaticTokenProvider, WikibaseEditor,
};
use wbkit_updates::{EntityUpdate, ItemUpdateBuilder};

const SITE: &str = "http://www.wikidata.org/entity/";

fn q42() -> EntityId {
    EntityId::parse("Q42", SITE).unwrap()
}

fn p31() -> EntityId {
    EntityId::parse("P31", SITE).unwrap()
}

fn base_item(revision: u64) -> EntityDocument {
    EntityDocument::Item(
        ItemDocument::empty(q42())
            .unwrap()
            .with_revision_id(revision),
    )
}

fn config() -> EditorConfig {
    EditorConfig::new(SITE)
        .with_max_retries(3)
        .with_first_wait(Duration::from_millis(1))
}

fn error_response(code: &str) -> Value {
    json!({ "error": { "code": code, "info": format!("{code} happened") } })
}

fn param<'a>(request: &'a [(String, String)], key: &str) -> Option<&'a str> {
    request
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

#[test]
fn single_label_change_uses_set_label() {
    let transport = MockTransport::new();
    let tokens = StaticTokenProvider::new("TOKEN+\\");
    transport.enqueue(json!({
        "success": 1,
        "entity": {
            "type": "item",
            "id": "Q42",
            "labels": { "en": { "language": "en", "value": "hello" } },
            "lastrevid": 124,
        },
    }));
    let editor = WikibaseEditor::new(&transport, &tokens, config());

    let mut builder = ItemUpdateBuilder::for_entity(q42(), 123).unwrap();
    builder.set_label(Term::new("en", "hello"));
    let result = editor
        .apply_update(
            &base_item(123),
            &EntityUpdate::from(builder.build()),
            &EditOptions::new().with_summary("add English label"),
        )
        .unwrap()
        .unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(param(request, "action"), Some("wbsetlabel"));
    assert_eq!(param(request, "id"), Some("Q42"));
    assert_eq!(param(request, "language"), Some("en"));
    assert_eq!(param(request, "value"), Some("hello"));
    assert_eq!(param(request, "baserevid"), Some("123"));
    assert_eq!(param(request, "summary"), Some("add English label"));
    assert_eq!(param(request, "maxlag"), Some("5"));
    assert_eq!(param(request, "token"), Some("TOKEN+\\"));

    assert_eq!(result.revision_id(), 124);
}

#[test]
fn single_draft_statement_uses_set_claim_with_fresh_guid() {
    let transport = MockTransport::new();
    let tokens = StaticTokenProvider::new("T");
    transport.enqueue(json!({ "pageinfo": { "lastrevid": 125 }, "success": 1 }));
    let editor = WikibaseEditor::new(&transport, &tokens, config())
        .with_guid_generator(FixedGuidGenerator::new("1234-ABCD"));

    let mut builder = ItemUpdateBuilder::for_entity(q42(), 123).unwrap();
    builder.add_statement(Statement::draft(q42(), Snak::some_value(p31())));
    let result = editor
        .apply_update(
            &base_item(123),
            &EntityUpdate::from(builder.build()),
            &EditOptions::new(),
        )
        .unwrap()
        .unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(param(&requests[0], "action"), Some("wbsetclaim"));
    let claim = param(&requests[0], "claim").unwrap();
    assert!(claim.contains("Q42$1234-ABCD"), "claim was {claim}");

    assert_eq!(result.revision_id(), 125);
    let ids: Vec<_> = result
        .statement_groups()
        .iter()
        .flat_map(|group| group.statements())
        .filter_map(|statement| statement.id())
        .collect();
    assert_eq!(ids, ["Q42$1234-ABCD"]);
}

#[test]
fn removed_statements_use_remove_claims_in_order() {
    let transport = MockTransport::new();
    let tokens = StaticTokenProvider::new("T");
    transport.enqueue(json!({ "pageinfo": { "lastrevid": 130 }, "success": 1 }));
    let editor = WikibaseEditor::new(&transport, &tokens, config());

    let base = EntityDocument::Item(
        ItemDocument::empty(q42())
            .unwrap()
            .with_statement(Statement::draft(q42(), Snak::some_value(p31())).with_id("Q42$B"))
            .with_statement(Statement::draft(q42(), Snak::some_value(p31())).with_id("Q42$A"))
            .with_revision_id(123),
    );
    let mut builder = ItemUpdateBuilder::for_entity(q42(), 123).unwrap();
    builder.remove_statement("Q42$B").remove_statement("Q42$A");
    let result = editor
        .apply_update(
            &base,
            &EntityUpdate::from(builder.build()),
            &EditOptions::new(),
        )
        .unwrap()
        .unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(param(&requests[0], "action"), Some("wbremoveclaims"));
    assert_eq!(param(&requests[0], "claim"), Some("Q42$B|Q42$A"));

    assert!(result.statement_groups().is_empty());
    assert_eq!(result.revision_id(), 130);
}

#[test]
fn label_and_alias_together_use_edit_entity() {
    let transport = MockTransport::new();
    let tokens = StaticTokenProvider::new("T");
    transport.enqueue(json!({
        "success": 1,
        "entity": { "type": "item", "id": "Q42", "lastrevid": 126 },
    }));
    let editor = WikibaseEditor::new(&transport, &tokens, config());

    let mut builder = ItemUpdateBuilder::for_entity(q42(), 123).unwrap();
    builder
        .set_label(Term::new("en", "hello"))
        .add_alias("en", "DNA");
    editor
        .apply_update(
            &base_item(123),
            &EntityUpdate::from(builder.build()),
            &EditOptions::new(),
        )
        .unwrap()
        .unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(param(&requests[0], "action"), Some("wbeditentity"));
    let data: Value = serde_json::from_str(param(&requests[0], "data").unwrap()).unwrap();
    assert_eq!(data["labels"]["en"]["value"], "hello");
    assert_eq!(data["aliases"]["en"][0]["value"], "DNA");
}

#[test]
fn zero_net_changes_make_no_call() {
    let transport = MockTransport::new();
    let tokens = StaticTokenProvider::new("T");
    let editor = WikibaseEditor::new(&transport, &tokens, config());

    let mut builder = ItemUpdateBuilder::for_entity(q42(), 123).unwrap();
    builder.add_alias("en", "DNA").remove_alias("en", "DNA");
    let base = base_item(123);
    let result = editor
        .apply_update(
            &base,
            &EntityUpdate::from(builder.build()),
            &EditOptions::new(),
        )
        .unwrap()
        .unwrap();

    assert_eq!(transport.request_count(), 0);
    assert_eq!(result, base);
}

#[test]
fn budget_of_one_allows_exactly_one_edit() {
    let transport = MockTransport::new();
    let tokens = StaticTokenProvider::new("T");
    transport.enqueue(json!({
        "success": 1,
        "entity": { "type": "item", "id": "Q42", "lastrevid": 124 },
    }));
    let editor = WikibaseEditor::new(&transport, &tokens, config());
    editor.set_remaining_edits(1);

    let mut builder = ItemUpdateBuilder::for_entity(q42(), 123).unwrap();
    builder.set_label(Term::new("en", "hello"));
    let update = EntityUpdate::from(builder.build());

    let first = editor
        .apply_update(&base_item(123), &update, &EditOptions::new())
        .unwrap();
    assert!(first.is_some());
    assert_eq!(editor.remaining_edits(), 0);

    let second = editor
        .apply_update(&base_item(123), &update, &EditOptions::new())
        .unwrap();
    assert!(second.is_none());
    assert_eq!(transport.request_count(), 1);
}

#[test]
fn rate_limit_fails_after_exactly_three_attempts() {
    let transport = MockTransport::new();
    let tokens = StaticTokenProvider::new("T");
    for _ in 0..4 {
        transport.enqueue(error_response("maxlag"));
    }
    let editor = WikibaseEditor::new(&transport, &tokens, config());

    let mut builder = ItemUpdateBuilder::for_entity(q42(), 123).unwrap();
    builder.set_label(Term::new("en", "hello"));
    let result = editor.apply_update(
        &base_item(123),
        &EntityUpdate::from(builder.build()),
        &EditOptions::new(),
    );

    assert!(matches!(
        result,
        Err(EditorError::RateLimitExceeded { attempts: 3 })
    ));
    assert_eq!(transport.request_count(), 3);
}

#[test]
fn rejected_token_is_refreshed_exactly_once() {
    let transport = MockTransport::new();
    let tokens = StaticTokenProvider::with_sequence(vec!["stale".into(), "fresh".into()]);
    transport.enqueue(error_response("badtoken"));
    transport.enqueue(json!({
        "success": 1,
        "entity": { "type": "item", "id": "Q42", "lastrevid": 124 },
    }));
    let editor = WikibaseEditor::new(&transport, &tokens, config());

    let mut builder = ItemUpdateBuilder::for_entity(q42(), 123).unwrap();
    builder.set_label(Term::new("en", "hello"));
    let result = editor
        .apply_update(
            &base_item(123),
            &EntityUpdate::from(builder.build()),
            &EditOptions::new(),
        )
        .unwrap();

    assert!(result.is_some());
    assert_eq!(tokens.invalidations(), 1);
    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(param(&requests[0], "token"), Some("stale"));
    assert_eq!(param(&requests[1], "token"), Some("fresh"));
}

#[test]
fn second_token_rejection_is_fatal() {
    let transport = MockTransport::new();
    let tokens = StaticTokenProvider::with_sequence(vec!["one".into(), "two".into()]);
    transport.enqueue(error_response("badtoken"));
    transport.enqueue(error_response("badtoken"));
    let editor = WikibaseEditor::new(&transport, &tokens, config());

    let mut builder = ItemUpdateBuilder::for_entity(q42(), 123).unwrap();
    builder.set_label(Term::new("en", "hello"));
    let result = editor.apply_update(
        &base_item(123),
        &EntityUpdate::from(builder.build()),
        &EditOptions::new(),
    );

    assert!(matches!(result, Err(EditorError::TokenError { .. })));
    assert_eq!(transport.request_count(), 2);
}

#[test]
fn edit_conflict_surfaces_without_retry() {
    let transport = MockTransport::new();
    let tokens = StaticTokenProvider::new("T");
    transport.enqueue(error_response("editconflict"));
    let editor = WikibaseEditor::new(&transport, &tokens, config());

    let mut builder = ItemUpdateBuilder::for_entity(q42(), 123).unwrap();
    builder.set_label(Term::new("en", "hello"));
    let result = editor.apply_update(
        &base_item(123),
        &EntityUpdate::from(builder.build()),
        &EditOptions::new(),
    );

    assert!(matches!(result, Err(EditorError::EditConflict { .. })));
    assert_eq!(transport.request_count(), 1);
}

#[test]
fn rejected_tag_surfaces() {
    let transport = MockTransport::new();
    let tokens = StaticTokenProvider::new("T");
    transport.enqueue(error_response("badtags"));
    let editor = WikibaseEditor::new(&transport, &tokens, config());

    let mut builder = ItemUpdateBuilder::for_entity(q42(), 123).unwrap();
    builder.set_label(Term::new("en", "hello"));
    let result = editor.apply_update(
        &base_item(123),
        &EntityUpdate::from(builder.build()),
        &EditOptions::new().with_tag("wbkit"),
    );

    assert!(matches!(result, Err(EditorError::TagRejected { .. })));
    assert_eq!(param(&transport.requests()[0], "tags"), Some("wbkit"));
}

#[test]
fn create_new_item_sends_new_instead_of_id() {
    let transport = MockTransport::new();
    let tokens = StaticTokenProvider::new("T");
    transport.enqueue(json!({
        "success": 1,
        "entity": {
            "type": "item",
            "id": "Q55",
            "labels": { "en": { "language": "en", "value": "hello" } },
            "lastrevid": 1,
        },
    }));
    let editor = WikibaseEditor::new(&transport, &tokens, config());

    let mut builder = ItemUpdateBuilder::for_new(SITE);
    builder.set_label(Term::new("en", "hello"));
    let base = EntityDocument::Item(
        ItemDocument::empty(EntityId::placeholder(EntityType::Item, SITE)).unwrap(),
    );
    let result = editor
        .apply_update(&base, &EntityUpdate::from(builder.build()), &EditOptions::new())
        .unwrap()
        .unwrap();

    let requests = transport.requests();
    assert_eq!(param(&requests[0], "action"), Some("wbeditentity"));
    assert_eq!(param(&requests[0], "new"), Some("item"));
    assert_eq!(param(&requests[0], "id"), None);
    assert_eq!(param(&requests[0], "baserevid"), None);

    assert_eq!(result.id().id(), Some("Q55"));
    assert_eq!(result.revision_id(), 1);
}

#[test]
fn success_without_payload_is_malformed() {
    let transport = MockTransport::new();
    let tokens = StaticTokenProvider::new("T");
    transport.enqueue(json!({ "success": 1 }));
    let editor = WikibaseEditor::new(&transport, &tokens, config());

    let mut builder = ItemUpdateBuilder::for_entity(q42(), 123).unwrap();
    builder.set_label(Term::new("en", "hello"));
    let result = editor.apply_update(
        &base_item(123),
        &EntityUpdate::from(builder.build()),
        &EditOptions::new(),
    );

    assert!(matches!(result, Err(EditorError::MalformedResponse { .. })));
}

#[test]
fn other_service_errors_pass_through() {
    let transport = MockTransport::new();
    let tokens = StaticTokenProvider::new("T");
    transport.enqueue(error_response("no-permission"));
    let editor = WikibaseEditor::new(&transport, &tokens, config());

    let mut builder = ItemUpdateBuilder::for_entity(q42(), 123).unwrap();
    builder.set_label(Term::new("en", "hello"));
    let result = editor.apply_update(
        &base_item(123),
        &EntityUpdate::from(builder.build()),
        &EditOptions::new(),
    );

    match result {
        Err(EditorError::Service { code, .. }) => assert_eq!(code, "no-permission"),
        other => panic!("expected service error, got {other:?}"),
    }
}
