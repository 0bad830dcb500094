use arpa_core::dom::TreeNode;
use arpa_core::{DomNode, PageState};
use arpa_engine::config::ArpaConfig;
use arpa_engine::runtime::{PageEffects, RunLoop};
use arpa_engine::session::Session;
use arpa_engine::store::{MemoryStore, Store};
use std::cell::RefCell;
use std::rc::Rc;

/// Records every effect call instead of touching a page.
#[derive(Clone, Default)]
struct RecordingEffects {
    highlights: Rc<RefCell<Vec<Option<String>>>>,
    triggered: Rc<RefCell<Vec<String>>>,
}

fn node_id(node: &TreeNode) -> String {
    node.attribute("id").unwrap_or_default()
}

impl PageEffects<TreeNode> for RecordingEffects {
    fn highlight(&mut self, target: Option<&TreeNode>) {
        self.highlights.borrow_mut().push(target.map(node_id));
    }

    fn trigger(&mut self, target: &TreeNode) {
        self.triggered.borrow_mut().push(node_id(target));
    }
}

fn page_with_button() -> (TreeNode, TreeNode) {
    let body = TreeNode::new("body");
    let button = TreeNode::new("button").attr("id", "send");
    body.append(&button);
    (body, button)
}

#[tokio::test]
async fn refresh_highlights_the_learned_target() {
    let effects = RecordingEffects::default();
    let mut runloop = RunLoop::new(
        Session::new(MemoryStore::new(), ArpaConfig::default()),
        effects.clone(),
    );
    let (body, button) = page_with_button();
    let page = PageState::new("example.com", "/compose", "");

    // Nothing learned yet: the marker is cleared.
    runloop.refresh(&body, &page).await;
    assert_eq!(effects.highlights.borrow().as_slice(), &[None]);

    runloop.click(&button, &body, &page).await;
    runloop.refresh(&body, &page).await;

    assert_eq!(
        effects.highlights.borrow().last().unwrap().as_deref(),
        Some("send")
    );
    assert!(runloop.state().target.as_ref().unwrap().same_node(&button));
}

#[tokio::test]
async fn request_replays_and_counts_the_current_target() {
    let store = MemoryStore::new();
    let effects = RecordingEffects::default();
    let mut runloop = RunLoop::new(
        Session::new(store.clone(), ArpaConfig::default()),
        effects.clone(),
    );
    let (body, button) = page_with_button();
    let page = PageState::new("example.com", "/compose", "");

    runloop.click(&button, &body, &page).await;
    runloop.refresh(&body, &page).await;
    runloop.request(&body, &page).await;

    assert_eq!(effects.triggered.borrow().as_slice(), &["send".to_string()]);

    // The replay counted another use.
    let blob = store.get("example.com").await.unwrap().unwrap();
    assert_eq!(blob["contexts"]["2-1-0"]["actions"][0]["count"], 2);
}

#[tokio::test]
async fn request_without_a_target_is_a_no_op() {
    let effects = RecordingEffects::default();
    let mut runloop = RunLoop::new(
        Session::new(MemoryStore::new(), ArpaConfig::default()),
        effects.clone(),
    );
    let (body, _) = page_with_button();
    let page = PageState::new("example.com", "/compose", "");

    runloop.request(&body, &page).await;
    assert!(effects.triggered.borrow().is_empty());
}

#[tokio::test]
async fn blacklisted_hostnames_are_left_alone() {
    let store = MemoryStore::new();
    let effects = RecordingEffects::default();
    let mut runloop = RunLoop::new(
        Session::new(store.clone(), ArpaConfig::default()),
        effects.clone(),
    );
    let (body, button) = page_with_button();
    let page = PageState::new("www.notion.so", "/workspace", "");

    runloop.click(&button, &body, &page).await;
    runloop.refresh(&body, &page).await;
    runloop.request(&body, &page).await;

    assert!(store.keys().await.unwrap().is_empty());
    assert!(effects.highlights.borrow().is_empty());
    assert!(effects.triggered.borrow().is_empty());
}

#[tokio::test]
async fn navigated_reports_href_changes_once() {
    let mut runloop: RunLoop<_, TreeNode, _> = RunLoop::new(
        Session::new(MemoryStore::new(), ArpaConfig::default()),
        RecordingEffects::default(),
    );

    assert!(runloop.navigated("https://example.com/a"));
    assert!(!runloop.navigated("https://example.com/a"));
    assert!(runloop.navigated("https://example.com/b"));
}
