use std::cell::RefCell;
use std::rc::Rc;

use search_widget::{
    ButtonActivated, InputChanged, Notification, SearchElement, SearchError, SearchProperty,
    SearchWidget, BUTTON_ACTIVATED, INPUT_CHANGED, INPUT_BORDER_COLOR_PROPERTY,
};
use shadowdom::{Color, Document, Key, Modifiers, NodeId, Rgb};

fn setup() -> Document {
    let mut doc = Document::new();
    search_widget::define(&mut doc).unwrap();
    doc
}

/// Create a widget, apply `attributes`, then connect it under a wrapper div.
fn attach(doc: &mut Document, attributes: &[(&str, &str)]) -> (SearchElement, NodeId) {
    let search = SearchElement::create(doc).unwrap();
    for (name, value) in attributes {
        doc.set_attribute(search.node(), name, *value).unwrap();
    }
    let wrapper = doc.create_element("div").unwrap();
    doc.append_child(wrapper, search.node()).unwrap();
    let root = doc.root();
    doc.append_child(root, wrapper).unwrap();
    (search, wrapper)
}

fn collect<N: Notification + 'static>(doc: &mut Document, node: NodeId) -> Rc<RefCell<Vec<N>>> {
    let seen: Rc<RefCell<Vec<N>>> = Rc::default();
    let captured = Rc::clone(&seen);
    doc.add_event_listener(node, N::NAME, move |_, event| {
        if let Some(payload) = N::from_event(event) {
            captured.borrow_mut().push(payload);
        }
    })
    .unwrap();
    seen
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_defaults_are_empty() {
    let mut doc = setup();
    let search = SearchElement::create(&mut doc).unwrap();

    assert_eq!(search.button(&doc), "");
    assert_eq!(search.label(&doc), "");
    assert_eq!(search.placeholder(&doc), "");
    assert_eq!(search.value(&doc), "");
    assert!(!search.widget(&doc).unwrap().is_rendered());
}

#[test]
fn test_property_attribute_round_trip() {
    let mut doc = setup();
    let search = SearchElement::create(&mut doc).unwrap();
    let host = search.node();

    for property in SearchProperty::ALL {
        for sample in ["", "plain", "with spaces", "ünïcödé ✓", "<b>&amp;</b>"] {
            property.set(&mut doc, host, sample).unwrap();
            assert_eq!(doc.attribute(host, property.as_str()), Some(sample));

            doc.set_attribute(host, property.as_str(), sample).unwrap();
            assert_eq!(property.get(&doc, host), sample);
        }
    }
}

#[test]
fn test_property_by_name() {
    let mut doc = setup();
    let search = SearchElement::create(&mut doc).unwrap();

    search.set_property(&mut doc, "label", "Find").unwrap();
    assert_eq!(search.label(&doc), "Find");
    assert_eq!(search.property(&doc, "label").unwrap(), "Find");
    assert!(matches!(
        search.property(&doc, "color"),
        Err(SearchError::UnknownProperty(name)) if name == "color"
    ));
    assert_eq!("value".parse::<SearchProperty>().unwrap(), SearchProperty::Value);
    assert_eq!(SearchProperty::Placeholder.to_string(), "placeholder");
}

#[test]
fn test_equal_values_are_not_reapplied() {
    let mut doc = setup();
    let (search, _) = attach(&mut doc, &[("value", "Hello")]);
    let applied = |doc: &Document| search.widget(doc).unwrap().applied_changes();
    let before = applied(&doc);

    search.set_value(&mut doc, "Hello").unwrap();
    assert_eq!(applied(&doc), before);

    // Unset and empty read back the same
    search.set_label(&mut doc, "").unwrap();
    assert_eq!(applied(&doc), before);

    search.set_value(&mut doc, "Goodbye").unwrap();
    assert_eq!(applied(&doc), before + 1);
    search.set_value(&mut doc, "Goodbye").unwrap();
    assert_eq!(applied(&doc), before + 1);
}

#[test]
fn test_from_node_checks_tag() {
    let mut doc = setup();
    let search = SearchElement::create(&mut doc).unwrap();
    let div = doc.create_element("div").unwrap();

    assert_eq!(SearchElement::from_node(&doc, search.node()).unwrap(), search);
    assert!(matches!(
        SearchElement::from_node(&doc, div),
        Err(SearchError::NotASearchWidget)
    ));
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_renders_on_first_connection() {
    let mut doc = setup();
    let (search, _) = attach(
        &mut doc,
        &[
            ("label", "I'm a label"),
            ("placeholder", "Search..."),
            ("value", "Hello World"),
            ("button", "I'm a button"),
        ],
    );

    let widget = search.widget(&doc).unwrap();
    assert!(widget.is_rendered());
    assert!(widget.is_listening());
    drop(widget);

    let label = search.label_element(&doc).unwrap();
    let input = search.input(&doc).unwrap();
    let button = search.action_button(&doc).unwrap();
    let shadow = doc.shadow_root(search.node()).unwrap();

    assert_eq!(doc.children(shadow), &[label, input, button]);
    assert_eq!(doc.text_content(label), "I'm a label");
    assert_eq!(doc.input_value(input), "Hello World");
    assert_eq!(doc.attribute(input, "placeholder"), Some("Search..."));
    assert_eq!(doc.attribute(input, "type"), Some("text"));
    assert_eq!(doc.flat_text(button), "I'm a button");
}

#[test]
fn test_render_once_keeps_seeded_value() {
    let mut doc = setup();
    let (search, _) = attach(&mut doc, &[("value", "Hello"), ("label", "Before")]);
    let input = search.input(&doc).unwrap();
    let label = search.label_element(&doc).unwrap();
    assert_eq!(doc.input_value(input), "Hello");

    search.set_value(&mut doc, "Goodbye").unwrap();
    search.set_label(&mut doc, "After").unwrap();

    assert_eq!(search.value(&doc), "Goodbye");
    assert_eq!(doc.attribute(search.node(), "value"), Some("Goodbye"));
    assert_eq!(doc.input_value(input), "Hello");
    assert_eq!(doc.text_content(label), "Before");
}

#[test]
fn test_reconnection_does_not_render_again() {
    let mut doc = setup();
    let (search, wrapper) = attach(&mut doc, &[("value", "Hello")]);
    let input = search.input(&doc).unwrap();
    let root = doc.root();

    doc.remove_child(root, wrapper).unwrap();
    search.set_value(&mut doc, "Later").unwrap();
    doc.append_child(root, wrapper).unwrap();

    assert_eq!(search.input(&doc), Some(input));
    assert_eq!(doc.input_value(input), "Hello");
    assert!(search.widget(&doc).unwrap().is_listening());
}

#[test]
fn test_widget_defined_after_creation_is_upgraded() {
    let mut doc = Document::new();
    let host = doc.create_element("search-widget").unwrap();
    doc.set_attribute(host, "label", "Late").unwrap();
    let root = doc.root();
    doc.append_child(root, host).unwrap();
    assert!(doc.custom_element::<SearchWidget>(host).is_none());

    search_widget::define(&mut doc).unwrap();

    let search = SearchElement::from_node(&doc, host).unwrap();
    assert!(search.widget(&doc).unwrap().is_rendered());
    let label = search.label_element(&doc).unwrap();
    assert_eq!(doc.text_content(label), "Late");
}

#[test]
fn test_border_color_follows_custom_property() {
    let mut doc = setup();
    let (search, wrapper) = attach(&mut doc, &[]);
    let input = search.input(&doc).unwrap();
    let border = doc.computed_style(input).border_color.unwrap();

    assert_eq!(doc.resolve_color(input, &border), Rgb::new(0xcc, 0xcc, 0xcc));

    doc.set_custom_property(wrapper, INPUT_BORDER_COLOR_PROPERTY, Color::rgb(255, 0, 0))
        .unwrap();
    assert_eq!(doc.resolve_color(input, &border), Rgb::new(255, 0, 0));
}

#[test]
fn test_oversized_attributes_lay_out_within_the_screen() {
    let mut doc = setup();
    let search = SearchElement::create(&mut doc).unwrap();
    search.set_button(&mut doc, "x".repeat(65_533)).unwrap();
    search.set_label(&mut doc, "l".repeat(70_000)).unwrap();
    let root = doc.root();
    doc.append_child(root, search.node()).unwrap();

    let area = shadowdom::Rect::from_size(80, 24);
    let result = shadowdom::layout(&doc, area);
    let button = search.action_button(&doc).unwrap();
    let label = search.label_element(&doc).unwrap();
    for node in [button, label] {
        assert!(result.get(node).unwrap().right() <= area.right());
    }

    let mut buf = shadowdom::Buffer::new(80, 24);
    shadowdom::render_to_buffer(&doc, &result, &mut buf);
}

// ============================================================================
// Notifications
// ============================================================================

#[test]
fn test_button_payload_uses_slot_fallback() {
    let mut doc = setup();
    let search = SearchElement::create(&mut doc).unwrap();
    let text = doc.create_text("Search");
    doc.append_child(search.node(), text).unwrap();
    let root = doc.root();
    doc.append_child(root, search.node()).unwrap();
    let seen = collect::<ButtonActivated>(&mut doc, search.node());

    let button = search.action_button(&doc).unwrap();
    doc.click(button).unwrap();

    assert_eq!(
        *seen.borrow(),
        vec![ButtonActivated {
            button: "Search".to_string(),
            value: String::new(),
        }]
    );
}

#[test]
fn test_button_payload_uses_explicit_fields() {
    let mut doc = setup();
    let (search, _) = attach(&mut doc, &[("button", "Go"), ("value", "abc")]);
    let seen = collect::<ButtonActivated>(&mut doc, search.node());

    let button = search.action_button(&doc).unwrap();
    doc.click(button).unwrap();

    assert_eq!(
        *seen.borrow(),
        vec![ButtonActivated {
            button: "Go".to_string(),
            value: "abc".to_string(),
        }]
    );
}

#[test]
fn test_button_payload_reads_fields_at_activation() {
    let mut doc = setup();
    let (search, _) = attach(&mut doc, &[("button", "Go"), ("value", "abc")]);
    let seen = collect::<ButtonActivated>(&mut doc, search.node());

    search.set_value(&mut doc, "typed elsewhere").unwrap();
    let button = search.action_button(&doc).unwrap();
    doc.handle_key(button, Key::Enter, Modifiers::new()).unwrap();

    assert_eq!(seen.borrow()[0].value, "typed elsewhere");
}

#[test]
fn test_input_payload_is_live_text() {
    let mut doc = setup();
    let (search, _) = attach(&mut doc, &[("value", "Hello World")]);
    let seen = collect::<InputChanged>(&mut doc, search.node());
    let input = search.input(&doc).unwrap();

    doc.handle_key(input, Key::Char('a'), Modifiers::ctrl()).unwrap();
    doc.type_text(input, "xyz").unwrap();

    let values: Vec<String> = seen.borrow().iter().map(|p| p.value.clone()).collect();
    assert_eq!(values, vec!["x", "xy", "xyz"]);
    // The field keeps its seeded value
    assert_eq!(search.value(&doc), "Hello World");
}

#[test]
fn test_fill_dispatches_single_input_notification() {
    let mut doc = setup();
    let (search, _) = attach(&mut doc, &[("value", "seed")]);
    let seen = collect::<InputChanged>(&mut doc, search.node());
    let input = search.input(&doc).unwrap();

    doc.fill(input, "xyz").unwrap();

    assert_eq!(
        *seen.borrow(),
        vec![InputChanged {
            value: "xyz".to_string()
        }]
    );
}

#[test]
fn test_notifications_reach_document_ancestors() {
    let mut doc = setup();
    let (search, wrapper) = attach(&mut doc, &[("button", "Go")]);
    let root = doc.root();
    let targets: Rc<RefCell<Vec<(String, Option<NodeId>)>>> = Rc::default();
    for name in [BUTTON_ACTIVATED, INPUT_CHANGED] {
        let captured = Rc::clone(&targets);
        doc.add_event_listener(root, name, move |_, event| {
            captured.borrow_mut().push((event.name.clone(), event.target));
        })
        .unwrap();
    }
    let wrapper_seen = collect::<InputChanged>(&mut doc, wrapper);

    let button = search.action_button(&doc).unwrap();
    let input = search.input(&doc).unwrap();
    doc.click(button).unwrap();
    doc.type_text(input, "q").unwrap();

    assert_eq!(
        *targets.borrow(),
        vec![
            (BUTTON_ACTIVATED.to_string(), Some(search.node())),
            (INPUT_CHANGED.to_string(), Some(search.node())),
        ]
    );
    assert_eq!(wrapper_seen.borrow().len(), 1);
}

#[test]
fn test_notification_events_bubble_and_compose() {
    let payload = ButtonActivated {
        button: "Go".to_string(),
        value: "abc".to_string(),
    };
    let event = payload.to_event().unwrap();

    assert_eq!(event.name, BUTTON_ACTIVATED);
    assert!(event.bubbles);
    assert!(event.composed);
    assert_eq!(event.detail_str("button"), Some("Go"));
    assert_eq!(ButtonActivated::from_event(&event), Some(payload));
    assert_eq!(InputChanged::from_event(&event), None);
}

#[test]
fn test_widgets_are_independent() {
    let mut doc = setup();
    let (first, _) = attach(&mut doc, &[("button", "One")]);
    let (second, _) = attach(&mut doc, &[("button", "Two")]);
    let root = doc.root();
    let seen = collect::<ButtonActivated>(&mut doc, root);

    let button = second.action_button(&doc).unwrap();
    doc.click(button).unwrap();

    assert_ne!(first.action_button(&doc), second.action_button(&doc));
    assert_eq!(seen.borrow().len(), 1);
    assert_eq!(seen.borrow()[0].button, "Two");
}

// ============================================================================
// Teardown
// ============================================================================

#[test]
fn test_detached_widget_is_silent() {
    let mut doc = setup();
    let (search, wrapper) = attach(&mut doc, &[("button", "Go"), ("value", "abc")]);
    let activations = collect::<ButtonActivated>(&mut doc, search.node());
    let changes = collect::<InputChanged>(&mut doc, search.node());
    let button = search.action_button(&doc).unwrap();
    let input = search.input(&doc).unwrap();

    let root = doc.root();
    doc.remove_child(root, wrapper).unwrap();
    assert!(!search.widget(&doc).unwrap().is_listening());

    doc.click(button).unwrap();
    doc.type_text(input, "xyz").unwrap();
    doc.fill(input, "more").unwrap();

    assert!(activations.borrow().is_empty());
    assert!(changes.borrow().is_empty());
}

#[test]
fn test_reattached_widget_notifies_again() {
    let mut doc = setup();
    let (search, wrapper) = attach(&mut doc, &[("button", "Go")]);
    let activations = collect::<ButtonActivated>(&mut doc, search.node());
    let button = search.action_button(&doc).unwrap();
    let root = doc.root();

    doc.remove_child(root, wrapper).unwrap();
    doc.append_child(root, wrapper).unwrap();
    doc.click(button).unwrap();

    assert_eq!(activations.borrow().len(), 1);
    assert_eq!(doc.listener_count(button, "click"), 1);
}
