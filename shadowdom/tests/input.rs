use std::cell::RefCell;
use std::rc::Rc;

use shadowdom::{Document, DomError, Key, Modifiers, NodeId, TextEditResult, TextInputData};

fn connected_input(doc: &mut Document) -> NodeId {
    let input = doc.create_element("input").unwrap();
    let root = doc.root();
    doc.append_child(root, input).unwrap();
    input
}

fn count_events(doc: &mut Document, node: NodeId, event: &str) -> Rc<RefCell<Vec<String>>> {
    let seen: Rc<RefCell<Vec<String>>> = Rc::default();
    let captured = Rc::clone(&seen);
    doc.add_event_listener(node, event, move |_, event| {
        captured.borrow_mut().push(event.name.clone());
    })
    .unwrap();
    seen
}

// ============================================================================
// Editing
// ============================================================================

#[test]
fn test_insert_and_delete() {
    let mut data = TextInputData::new("ab");
    assert_eq!(data.cursor, 2);

    assert_eq!(data.handle_key(Key::Char('c'), Modifiers::new()), TextEditResult::Changed);
    assert_eq!(data.text, "abc");

    data.handle_key(Key::Left, Modifiers::new());
    data.handle_key(Key::Backspace, Modifiers::new());
    assert_eq!(data.text, "ac");
    assert_eq!(data.cursor, 1);

    assert_eq!(data.handle_key(Key::Delete, Modifiers::new()), TextEditResult::Changed);
    assert_eq!(data.text, "a");
    assert_eq!(data.handle_key(Key::Delete, Modifiers::new()), TextEditResult::Handled);
}

#[test]
fn test_backspace_at_start_is_not_a_change() {
    let mut data = TextInputData::new("x");
    data.handle_key(Key::Home, Modifiers::new());
    assert_eq!(data.handle_key(Key::Backspace, Modifiers::new()), TextEditResult::Handled);
    assert_eq!(data.text, "x");
}

#[test]
fn test_select_all_then_type_replaces() {
    let mut data = TextInputData::new("Hello World");
    assert_eq!(data.handle_key(Key::Char('a'), Modifiers::ctrl()), TextEditResult::Handled);
    assert_eq!(data.selection(), Some((0, 11)));

    data.handle_key(Key::Char('h'), Modifiers::new());
    assert_eq!(data.text, "h");
    assert_eq!(data.selection(), None);
}

#[test]
fn test_shift_selection_and_collapse() {
    let mut data = TextInputData::new("abcd");
    data.handle_key(Key::Left, Modifiers::shift());
    data.handle_key(Key::Left, Modifiers::shift());
    assert_eq!(data.selection(), Some((2, 4)));

    data.handle_key(Key::Left, Modifiers::new());
    assert_eq!(data.selection(), None);
    assert_eq!(data.cursor, 2);

    data.handle_key(Key::End, Modifiers::shift());
    assert_eq!(data.handle_key(Key::Backspace, Modifiers::new()), TextEditResult::Changed);
    assert_eq!(data.text, "ab");
}

#[test]
fn test_multibyte_editing() {
    let mut data = TextInputData::new("héllo");
    data.handle_key(Key::Home, Modifiers::new());
    data.handle_key(Key::Right, Modifiers::new());
    data.handle_key(Key::Delete, Modifiers::new());
    assert_eq!(data.text, "hllo");
    data.insert_char('ë');
    assert_eq!(data.text, "hëllo");
}

#[test]
fn test_enter_submits() {
    let mut data = TextInputData::new("q");
    assert_eq!(data.handle_key(Key::Enter, Modifiers::new()), TextEditResult::Submitted);
    assert_eq!(data.handle_key(Key::Escape, Modifiers::new()), TextEditResult::Ignored);
}

// ============================================================================
// Document Integration
// ============================================================================

#[test]
fn test_value_attribute_seeds_until_edited() {
    let mut doc = Document::new();
    let input = connected_input(&mut doc);
    doc.set_attribute(input, "value", "seed").unwrap();
    assert_eq!(doc.input_value(input), "seed");
    assert!(doc.input_data(input).is_none());

    doc.type_text(input, "!").unwrap();
    assert_eq!(doc.input_value(input), "seed!");

    doc.set_attribute(input, "value", "ignored").unwrap();
    assert_eq!(doc.input_value(input), "seed!");
}

#[test]
fn test_typing_dispatches_input_events() {
    let mut doc = Document::new();
    let input = connected_input(&mut doc);
    let root = doc.root();
    let seen = count_events(&mut doc, root, "input");

    doc.type_text(input, "abc").unwrap();
    doc.handle_key(input, Key::Left, Modifiers::new()).unwrap();

    assert_eq!(seen.borrow().len(), 3);
    assert_eq!(doc.input_value(input), "abc");
}

#[test]
fn test_enter_dispatches_change() {
    let mut doc = Document::new();
    let input = connected_input(&mut doc);
    let root = doc.root();
    let seen = count_events(&mut doc, root, "change");

    let result = doc.handle_key(input, Key::Enter, Modifiers::new()).unwrap();
    assert_eq!(result, TextEditResult::Submitted);
    assert_eq!(*seen.borrow(), vec!["change".to_string()]);
}

#[test]
fn test_input_event_escapes_shadow_root() {
    let mut doc = Document::new();
    let host = doc.create_element("div").unwrap();
    let shadow = doc.attach_shadow(host).unwrap();
    let input = doc.create_element("input").unwrap();
    doc.append_child(shadow, input).unwrap();
    let root = doc.root();
    doc.append_child(root, host).unwrap();

    let inputs = count_events(&mut doc, root, "input");
    let changes = count_events(&mut doc, root, "change");

    doc.type_text(input, "x").unwrap();
    doc.handle_key(input, Key::Enter, Modifiers::new()).unwrap();

    assert_eq!(inputs.borrow().len(), 1);
    assert!(changes.borrow().is_empty());
}

#[test]
fn test_fill_replaces_value_with_one_event() {
    let mut doc = Document::new();
    let input = connected_input(&mut doc);
    doc.set_attribute(input, "value", "old").unwrap();
    let seen = count_events(&mut doc, input, "input");

    assert_eq!(doc.fill(input, "new value"), Ok(1));
    assert_eq!(doc.input_value(input), "new value");
    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn test_fill_requires_input() {
    let mut doc = Document::new();
    let div = doc.create_element("div").unwrap();
    assert_eq!(doc.fill(div, "x"), Err(DomError::NotAnInput(div)));
}

#[test]
fn test_set_input_value_is_silent() {
    let mut doc = Document::new();
    let input = connected_input(&mut doc);
    let seen = count_events(&mut doc, input, "input");

    doc.set_input_value(input, "quiet").unwrap();
    assert_eq!(doc.input_value(input), "quiet");
    assert!(seen.borrow().is_empty());
}

#[test]
fn test_disabled_input_ignores_keys() {
    let mut doc = Document::new();
    let input = connected_input(&mut doc);
    doc.set_attribute(input, "disabled", "").unwrap();

    let result = doc.handle_key(input, Key::Char('a'), Modifiers::new()).unwrap();
    assert_eq!(result, TextEditResult::Ignored);
    assert_eq!(doc.input_value(input), "");
}

#[test]
fn test_button_activates_on_enter_and_space() {
    let mut doc = Document::new();
    let button = doc.create_element("button").unwrap();
    let root = doc.root();
    doc.append_child(root, button).unwrap();
    let clicks = count_events(&mut doc, root, "click");

    doc.handle_key(button, Key::Enter, Modifiers::new()).unwrap();
    doc.handle_key(button, Key::Char(' '), Modifiers::new()).unwrap();
    let result = doc.handle_key(button, Key::Char('x'), Modifiers::new()).unwrap();

    assert_eq!(clicks.borrow().len(), 2);
    assert_eq!(result, TextEditResult::Ignored);
}
