//! Navigation engine tests - Traversal, history and variable toggling
//! Drives the engine through a recording frontend and checks what was rendered

use retro_terminal::{
    Choice, ContentStore, FrontendCall, NavigationEngine, NodeId, RecordingFrontend,
};

fn engine(json: &str) -> NavigationEngine<RecordingFrontend> {
    let store = ContentStore::from_json(json, "test").unwrap();
    NavigationEngine::new(store, RecordingFrontend::new())
}

const TOGGLE_DOC: &str = r#"{
    "config": {"startNode": "a", "variables": {"flag": {"value": false, "activeText": "on", "inactiveText": "off"}}},
    "nodes": {
        "a": {
            "text": "v={{flag}}",
            "options": [{"action": {"variable": "flag", "activeText": "disable", "inactiveText": "enable"}, "label": "toggle"}]
        }
    }
}"#;

// Bare-flag variable: body tokens use the default labels, the option label
// uses the action's texts
const BARE_FLAG_TOGGLE_DOC: &str = r#"{"config":{"startNode":"a","variables":{"flag":false}},"nodes":{"a":{"text":"v={{flag}}","options":[{"action":{"variable":"flag","activeText":"on","inactiveText":"off"},"label":"toggle"}]}}}"#;

const FLAT_DOC: &str =
    r#"{"a":{"text":"A","options":[{"goto":"b","label":"go"}]},"b":{"text":"B"}}"#;

const GRAPH_DOC: &str = r#"{
    "config": {"startNode": "hub", "variables": {"lamp": true, "door": false}},
    "nodes": {
        "hub": {
            "text": ["Lamp: {{lamp}}", "Door: {{door}}", "Lamp again: {{lamp}}"],
            "options": [
                {"label": "Room ({{door}})", "goto": "room"},
                {"action": {"variable": "lamp"}, "label": "Switch lamp"},
                {"label": "Nothing"}
            ]
        },
        "room": {"text": "In the room", "options": [{"label": "Deeper", "goto": "cellar"}]},
        "cellar": {"text": "Dark"}
    }
}"#;

#[tokio::test]
async fn toggle_scenario_reloads_in_place() {
    let mut eng = engine(TOGGLE_DOC);

    eng.start().await.unwrap();
    let first = eng.frontend().last_rendered().unwrap().clone();
    assert_eq!(first.lines, vec!["v=off"]);
    assert_eq!(first.choices[0].label, "enable");

    let choice = eng.select_option(0).await.unwrap();
    assert_eq!(choice.variable().map(|v| v.as_str()), Some("flag"));

    let second = eng.frontend().last_rendered().unwrap();
    assert_eq!(second.id, "a");
    assert_eq!(second.lines, vec!["v=on"]);
    assert_eq!(second.choices[0].label, "disable");
    assert!(eng.history().is_empty());
    assert!(eng.variable_state("flag"));
}

#[tokio::test]
async fn bare_flag_toggle_uses_default_labels_in_text() {
    let mut eng = engine(BARE_FLAG_TOGGLE_DOC);

    eng.start().await.unwrap();
    let first = eng.frontend().last_rendered().unwrap().clone();
    assert_eq!(first.lines, vec!["v=INACTIVA"]);
    assert_eq!(first.choices[0].label, "off");

    eng.select_option(0).await.unwrap();

    let second = eng.frontend().last_rendered().unwrap();
    assert_eq!(second.id, "a");
    assert_eq!(second.lines, vec!["v=ACTIVA"]);
    assert_eq!(second.choices[0].label, "on");
    assert!(eng.history().is_empty());
}

#[tokio::test]
async fn flat_document_scenario() {
    let mut eng = engine(FLAT_DOC);

    eng.start().await.unwrap();
    assert_eq!(eng.current_node_id().unwrap(), "a");

    let choice = eng.select_option(0).await;
    assert_eq!(choice, Some(Choice::goto("go", "b")));
    assert_eq!(eng.current_node_id().unwrap(), "b");
    assert_eq!(eng.history(), &[NodeId::from("a")]);

    assert!(eng.go_back().await);
    assert_eq!(eng.current_node_id().unwrap(), "a");
    assert!(eng.history().is_empty());
    assert_eq!(eng.frontend().last_rendered().unwrap().lines, vec!["A"]);
}

#[tokio::test]
async fn go_back_on_empty_history_changes_nothing() {
    let mut eng = engine(FLAT_DOC);
    eng.start().await.unwrap();
    eng.frontend_mut().clear_calls();

    assert!(!eng.go_back().await);
    assert_eq!(eng.current_node_id().unwrap(), "a");
    assert!(eng.history().is_empty());
    assert!(eng.frontend().calls().is_empty());
}

#[tokio::test]
async fn go_back_does_not_leave_returned_node_in_history() {
    let mut eng = engine(GRAPH_DOC);
    eng.start().await.unwrap();
    eng.select_option(0).await;
    eng.select_option(0).await;
    assert_eq!(eng.current_node_id().unwrap(), "cellar");
    assert_eq!(eng.history(), &[NodeId::from("hub"), NodeId::from("room")]);

    assert!(eng.go_back().await);
    assert_eq!(eng.current_node_id().unwrap(), "room");
    assert_eq!(eng.history(), &[NodeId::from("hub")]);

    assert!(eng.go_back().await);
    assert_eq!(eng.current_node_id().unwrap(), "hub");
    assert!(eng.history().is_empty());
    assert!(!eng.go_back().await);
}

#[tokio::test]
async fn navigate_to_unknown_node_is_noop() {
    let mut eng = engine(GRAPH_DOC);
    eng.start().await.unwrap();
    eng.select_option(0).await;
    eng.frontend_mut().clear_calls();

    assert!(eng.navigate_to("attic").await.is_err());

    assert_eq!(eng.current_node_id().unwrap(), "room");
    assert_eq!(eng.history(), &[NodeId::from("hub")]);
    assert!(eng.frontend().calls().is_empty());
}

#[tokio::test]
async fn every_navigation_clears_before_render() {
    let mut eng = engine(GRAPH_DOC);
    eng.start().await.unwrap();
    eng.select_option(1).await;
    eng.select_option(0).await;
    eng.go_back().await;

    let calls = eng.frontend().calls();
    assert_eq!(calls.len(), 8);
    for pair in calls.chunks(2) {
        assert_eq!(pair[0], FrontendCall::Clear);
        assert!(matches!(pair[1], FrontendCall::Render(_)));
    }
}

#[tokio::test]
async fn toggle_flips_every_occurrence_and_only_named_variable() {
    let mut eng = engine(GRAPH_DOC);
    eng.start().await.unwrap();
    assert_eq!(
        eng.frontend().last_rendered().unwrap().lines,
        vec!["Lamp: ACTIVA", "Door: INACTIVA", "Lamp again: ACTIVA"]
    );

    eng.select_option(1).await;

    let resolved = eng.frontend().last_rendered().unwrap();
    assert_eq!(
        resolved.lines,
        vec!["Lamp: INACTIVA", "Door: INACTIVA", "Lamp again: INACTIVA"]
    );
    assert_eq!(resolved.choices[0].label, "Room (INACTIVA)");
    assert!(!eng.variable_state("lamp"));
    assert!(!eng.variable_state("door"));
}

#[tokio::test]
async fn toggle_label_without_action_text_uses_static_label() {
    let mut eng = engine(GRAPH_DOC);
    eng.start().await.unwrap();

    assert_eq!(
        eng.frontend().last_rendered().unwrap().choices[1].label,
        "Switch lamp"
    );
}

#[tokio::test]
async fn out_of_range_selection_returns_none() {
    let mut eng = engine(GRAPH_DOC);
    eng.start().await.unwrap();
    eng.select_option(0).await;
    eng.select_option(0).await;
    eng.frontend_mut().clear_calls();

    // cellar is terminal
    assert_eq!(eng.select_option(0).await, None);
    assert_eq!(eng.select_option(7).await, None);
    assert_eq!(eng.current_node_id().unwrap(), "cellar");
    assert!(eng.frontend().calls().is_empty());
}

#[tokio::test]
async fn resolution_is_stable_between_calls() {
    let mut eng = engine(GRAPH_DOC);
    eng.start().await.unwrap();

    let node = eng.current_node().unwrap().clone();
    assert_eq!(eng.resolve_node(&node), eng.resolve_node(&node));
    assert_eq!(
        eng.resolve_current().as_ref(),
        eng.frontend().last_rendered()
    );
}

#[tokio::test]
async fn revisited_node_reflects_current_variables() {
    let mut eng = engine(GRAPH_DOC);
    eng.start().await.unwrap();
    eng.select_option(0).await;

    eng.toggle_variable("door");
    assert!(eng.go_back().await);

    let hub = eng.frontend().last_rendered().unwrap();
    assert_eq!(hub.lines[1], "Door: ACTIVA");
}

#[tokio::test]
async fn reload_keeps_history() {
    let mut eng = engine(GRAPH_DOC);
    eng.start().await.unwrap();
    eng.select_option(0).await;

    assert!(eng.reload_current_node().await);
    assert_eq!(eng.current_node_id().unwrap(), "room");
    assert_eq!(eng.history(), &[NodeId::from("hub")]);
}

#[tokio::test]
async fn goto_current_node_rerenders_without_history() {
    let mut eng = engine(r#"{"start":{"text":"again?","options":[{"label":"again","goto":"start"}]}}"#);
    eng.start().await.unwrap();
    eng.frontend_mut().clear_calls();

    let choice = eng.select_option(0).await;

    assert_eq!(choice, Some(Choice::goto("again", "start")));
    assert_eq!(eng.current_node_id().unwrap(), "start");
    assert!(eng.history().is_empty());
    assert_eq!(eng.frontend().calls().len(), 2);
    assert_eq!(eng.frontend().calls()[0], FrontendCall::Clear);
    assert!(!eng.go_back().await);
}

#[tokio::test]
async fn history_top_never_equals_current_node() {
    let mut eng = engine(
        r#"{"start":{"options":[{"label":"again","goto":"start"},{"label":"on","goto":"next"}]},
            "next":{"options":[{"label":"again","goto":"next"}]}}"#,
    );
    eng.start().await.unwrap();

    for index in [0, 1, 0, 0] {
        eng.select_option(index).await;
        assert_ne!(eng.history().last(), eng.current_node_id());
    }

    assert_eq!(eng.current_node_id().unwrap(), "next");
    assert_eq!(eng.history(), &[NodeId::from("start")]);
    assert!(eng.go_back().await);
    assert_eq!(eng.current_node_id().unwrap(), "start");
}
