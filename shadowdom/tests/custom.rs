use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use shadowdom::{CustomElement, Document, DomError, NodeId};

type Log = Rc<RefCell<Vec<String>>>;

struct Recorder {
    log: Log,
    mark_ready: bool,
}

impl CustomElement for Recorder {
    fn observed_attributes(&self) -> &[&str] {
        &["state", "title"]
    }

    fn connected(&mut self, doc: &mut Document, host: NodeId) -> Result<(), DomError> {
        self.log.borrow_mut().push("connected".to_string());
        if self.mark_ready {
            doc.set_attribute(host, "state", "ready")?;
        }
        Ok(())
    }

    fn disconnected(&mut self, _doc: &mut Document, _host: NodeId) -> Result<(), DomError> {
        self.log.borrow_mut().push("disconnected".to_string());
        Ok(())
    }

    fn attribute_changed(
        &mut self,
        _doc: &mut Document,
        _host: NodeId,
        name: &str,
        old: Option<&str>,
        new: Option<&str>,
    ) -> Result<(), DomError> {
        self.log
            .borrow_mut()
            .push(format!("{name}: {old:?} -> {new:?}"));
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn define_recorder(doc: &mut Document, tag: &str, mark_ready: bool) -> Log {
    let log = Log::default();
    let captured = Rc::clone(&log);
    doc.define(tag, move |_, _| {
        Ok(Box::new(Recorder {
            log: Rc::clone(&captured),
            mark_ready,
        }) as Box<dyn CustomElement>)
    })
    .unwrap();
    log
}

fn entries(log: &Log) -> Vec<String> {
    log.borrow().clone()
}

// ============================================================================
// Definitions
// ============================================================================

#[test]
fn test_define_requires_valid_name() {
    let mut doc = Document::new();
    let constructor = |_: &mut Document, _: NodeId| -> Result<Box<dyn CustomElement>, DomError> {
        Err(DomError::AlreadyDefined(String::new()))
    };
    assert_eq!(
        doc.define("widget", constructor),
        Err(DomError::InvalidCustomElementName("widget".to_string()))
    );
    assert!(doc.define("-widget", constructor).is_err());
    assert!(!doc.is_defined("widget"));
}

#[test]
fn test_define_twice_fails() {
    let mut doc = Document::new();
    define_recorder(&mut doc, "x-rec", false);
    assert!(doc.is_defined("X-REC"));

    let result = doc.define("x-rec", |_, _| {
        Err(DomError::AlreadyDefined("unreachable".to_string()))
    });
    assert_eq!(result, Err(DomError::AlreadyDefined("x-rec".to_string())));
}

#[test]
fn test_custom_element_downcast() {
    let mut doc = Document::new();
    define_recorder(&mut doc, "x-rec", false);
    let node = doc.create_element("x-rec").unwrap();
    let plain = doc.create_element("div").unwrap();

    assert!(doc.custom_element::<Recorder>(node).is_some());
    assert!(doc.custom_element::<String>(node).is_none());
    assert!(doc.custom_element::<Recorder>(plain).is_none());
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn test_connected_and_disconnected() {
    let mut doc = Document::new();
    let log = define_recorder(&mut doc, "x-rec", false);
    let node = doc.create_element("x-rec").unwrap();
    let wrapper = doc.create_element("div").unwrap();
    doc.append_child(wrapper, node).unwrap();
    assert!(entries(&log).is_empty());

    let root = doc.root();
    doc.append_child(root, wrapper).unwrap();
    assert_eq!(entries(&log), vec!["connected"]);

    doc.remove_child(root, wrapper).unwrap();
    assert_eq!(entries(&log), vec!["connected", "disconnected"]);
}

#[test]
fn test_element_inside_shadow_tree_is_connected_with_host() {
    let mut doc = Document::new();
    let log = define_recorder(&mut doc, "x-rec", false);
    let host = doc.create_element("div").unwrap();
    let shadow = doc.attach_shadow(host).unwrap();
    let node = doc.create_element("x-rec").unwrap();
    doc.append_child(shadow, node).unwrap();

    let root = doc.root();
    doc.append_child(root, host).unwrap();
    assert_eq!(entries(&log), vec!["connected"]);
}

#[test]
fn test_observed_attributes_only() {
    let mut doc = Document::new();
    let log = define_recorder(&mut doc, "x-rec", false);
    let node = doc.create_element("x-rec").unwrap();

    doc.set_attribute(node, "title", "a").unwrap();
    doc.set_attribute(node, "class", "ignored").unwrap();
    doc.set_attribute(node, "title", "a").unwrap();
    doc.remove_attribute(node, "title").unwrap();

    assert_eq!(
        entries(&log),
        vec![
            r#"title: None -> Some("a")"#,
            r#"title: Some("a") -> Some("a")"#,
            r#"title: Some("a") -> None"#,
        ]
    );
}

#[test]
fn test_define_upgrades_existing_elements() {
    let mut doc = Document::new();
    let node = doc.create_element("x-rec").unwrap();
    doc.set_attribute(node, "title", "early").unwrap();
    doc.set_attribute(node, "class", "ignored").unwrap();
    let root = doc.root();
    doc.append_child(root, node).unwrap();

    let log = define_recorder(&mut doc, "x-rec", false);

    assert_eq!(
        entries(&log),
        vec![r#"title: None -> Some("early")"#, "connected"]
    );
}

#[test]
fn test_mutation_inside_callback_is_queued() {
    let mut doc = Document::new();
    let log = define_recorder(&mut doc, "x-rec", true);
    let node = doc.create_element("x-rec").unwrap();
    let root = doc.root();
    doc.append_child(root, node).unwrap();

    assert_eq!(
        entries(&log),
        vec!["connected", r#"state: None -> Some("ready")"#]
    );
    assert_eq!(doc.attribute(node, "state"), Some("ready"));
}

#[test]
fn test_constructor_error_propagates() {
    let mut doc = Document::new();
    doc.define("x-broken", |_, host| Err(DomError::NotAShadowRoot(host)))
        .unwrap();
    assert!(matches!(
        doc.create_element("x-broken"),
        Err(DomError::NotAShadowRoot(_))
    ));
}
