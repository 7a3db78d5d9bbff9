//! Integration tests from composition JSON to diagram state.

use socomo_view::components::diagram::scale::ScaleConfig;
use socomo_view::components::diagram::{DiagramElements, DiagramLayout, DiagramState, ElementClass};
use socomo_view::shell::ShellPage;
use socomo_view::{Composition, ViewError};

const ACME: &str = r#"{
	"packages": {
		"components": {
			"web": { "size": 0.5 },
			"service": { "size": 1.0 },
			"db": {}
		},
		"dependencies": {
			"web -> service": { "strength": 1.0 },
			"service -> db": { "strength": 0.4 },
			"web -> ghost": { "strength": 0.1 }
		}
	},
	"classes": {
		"components": { "Main": {} },
		"dependencies": {}
	}
}"#;

fn acme_state() -> DiagramState {
	let composition = Composition::from_json(ACME).unwrap();
	let (_, level) = composition.first_level().unwrap();
	let elements = DiagramElements::from_level(level);
	let layout = DiagramLayout {
		settle_ticks: 0,
		..DiagramLayout::default()
	};
	DiagramState::new(&elements, 800.0, 600.0, &layout, &ScaleConfig::default().zoom)
}

#[test]
fn test_only_the_first_level_is_drawn() {
	let composition = Composition::from_json(ACME).unwrap();
	let (name, level) = composition.first_level().unwrap();
	assert_eq!(name, "packages");

	let elements = DiagramElements::from_level(level);
	let ids: Vec<_> = elements.nodes.iter().map(|n| n.id.as_str()).collect();
	assert_eq!(ids, vec!["web", "service", "db"]);
	assert_eq!(elements.edges.len(), 3);
	assert_eq!(elements.edges[1].source, "service");
	assert_eq!(elements.edges[1].target, "db");
	assert_eq!(elements.edges[1].strength, 0.4);
}

#[test]
fn test_unknown_components_are_kept_but_not_drawn() {
	let composition = Composition::from_json(ACME).unwrap();
	let (_, level) = composition.first_level().unwrap();
	let elements = DiagramElements::from_level(level);
	let dangling: Vec<_> = elements.dangling_edges().map(|e| e.target.as_str()).collect();
	assert_eq!(dangling, vec!["ghost"]);

	let state = acme_state();
	assert_eq!(state.nodes().len(), 3);
	assert_eq!(state.edges().len(), 2);
	assert!(state.edge_classes("web", "ghost").is_none());
}

#[test]
fn test_dragging_upward_marks_a_violation() {
	let mut state = acme_state();
	assert!(state.edges().iter().all(|e| !e.classes.has(ElementClass::Violation)));

	let web = state.node_idx("web").unwrap();
	let (_, service_y) = state.position(state.node_idx("service").unwrap()).unwrap();
	state.move_node(web, 0.0, (service_y + 500.0) as f32);

	assert!(state.edge_classes("web", "service").unwrap().has(ElementClass::Violation));
	assert!(!state.edge_classes("service", "db").unwrap().has(ElementClass::Violation));
}

#[test]
fn test_hover_round_trip_restores_classes() {
	let mut state = acme_state();
	let before: Vec<_> = state.edges().iter().map(|e| e.classes.clone()).collect();

	state.set_hover(state.node_idx("db"));
	assert!(state.node_classes("web").unwrap().has(ElementClass::Hushed));
	assert!(state.node_classes("service").unwrap().has(ElementClass::HighlightIngoer));

	state.set_hover(None);
	let after: Vec<_> = state.edges().iter().map(|e| e.classes.clone()).collect();
	assert_eq!(before, after);
	assert!(state.nodes().iter().all(|n| n.classes.is_empty()));
}

#[test]
fn test_invalid_composition_is_rejected() {
	let err = Composition::from_json(r#"{ "L": { "components": [] } }"#).unwrap_err();
	assert!(matches!(err, ViewError::Parse(_)));
}

#[test]
fn test_shell_page_carries_the_first_level() {
	let composition = Composition::from_json(ACME).unwrap();
	let mut page = ShellPage::new("acme");
	for (name, level) in &composition.levels {
		page.add_level(name, level);
	}
	let html = page.render();

	let packages = html.find("['packages']: // level").unwrap();
	let classes = html.find("['classes']: // level").unwrap();
	assert!(packages < classes);
	assert!(html.contains(&format!("{:<36} :{{ strength: 0.4 }},", "'service -> db'")));
}
