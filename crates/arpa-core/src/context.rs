use crate::action::Action;
use crate::dom::DomNode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One action and how often it has been used in this context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedAction {
    pub action: Action,
    pub count: u64,
}

/// Usage-ranked actions observed within one context of a domain.
///
/// `actions` stays sorted by descending count; `index` maps an action hash to
/// its current position and is rebuilt whenever the order changes, so it can
/// never point at a divorced copy. Equal counts keep insertion order (the
/// sort is stable), which is a documented policy rather than a guarantee
/// callers may rely on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "ContextBlob", into = "ContextBlob")]
pub struct Context {
    actions: Vec<RankedAction>,
    index: HashMap<String, usize>,
}

/// Persisted shape: `{ "actions": [ { "action": ..., "count": n }, ... ] }`.
#[derive(Serialize, Deserialize)]
struct ContextBlob {
    actions: Vec<RankedAction>,
}

impl From<ContextBlob> for Context {
    fn from(blob: ContextBlob) -> Self {
        let mut ctx = Self {
            actions: blob.actions,
            index: HashMap::new(),
        };
        ctx.resort();
        ctx
    }
}

impl From<Context> for ContextBlob {
    fn from(ctx: Context) -> Self {
        Self {
            actions: ctx.actions,
        }
    }
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one use of `action`: the first use inserts a record, every use
    /// increments its count, and the ranking is re-sorted.
    pub fn save_action(&mut self, action: Action) {
        match self.index.get(&action.hash) {
            Some(&pos) => self.actions[pos].count += 1,
            None => {
                self.actions.push(RankedAction { action, count: 1 });
            }
        }
        self.resort();
    }

    /// The element of the highest-ranked action that still resolves, trying
    /// the ranking top-down and falling through on resolution failure.
    pub fn target<N: DomNode>(&self, root: &N) -> Option<N> {
        self.actions.iter().find_map(|r| r.action.target(root))
    }

    /// Records in rank order, most used first.
    pub fn actions(&self) -> &[RankedAction] {
        &self.actions
    }

    pub fn get(&self, hash: &str) -> Option<&RankedAction> {
        self.index.get(hash).map(|&pos| &self.actions[pos])
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    fn resort(&mut self) {
        self.actions.sort_by(|a, b| b.count.cmp(&a.count));
        self.index = self
            .actions
            .iter()
            .enumerate()
            .map(|(pos, r)| (r.action.hash.clone(), pos))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{DomNode, TreeNode};
    use crate::path::PathNode;

    fn action(hash: &str) -> Action {
        Action::new(vec![PathNode::new("a", 0, "", "", "", None)], Some(hash))
    }

    #[test]
    fn first_save_yields_count_one() {
        let mut ctx = Context::new();
        ctx.save_action(action("action-1"));
        assert_eq!(ctx.get("action-1").unwrap().count, 1);
    }

    #[test]
    fn repeat_saves_increment_the_same_record() {
        let mut ctx = Context::new();
        ctx.save_action(action("action-1"));
        ctx.save_action(action("action-1"));
        assert_eq!(ctx.get("action-1").unwrap().count, 2);
        assert_eq!(ctx.actions().len(), 1);
    }

    #[test]
    fn ranking_is_by_descending_count_regardless_of_insertion_order() {
        let mut ctx = Context::new();
        for _ in 0..3 {
            ctx.save_action(action("action-a"));
        }
        ctx.save_action(action("action-c"));
        for _ in 0..5 {
            ctx.save_action(action("action-b"));
        }

        let order: Vec<&str> = ctx.actions().iter().map(|r| r.action.hash.as_str()).collect();
        assert_eq!(order, vec!["action-b", "action-a", "action-c"]);
    }

    #[test]
    fn index_tracks_records_across_resorts() {
        let mut ctx = Context::new();
        ctx.save_action(action("action-a"));
        for _ in 0..2 {
            ctx.save_action(action("action-b"));
        }
        // "b" outranks "a"; the index must still find both at their new slots.
        assert_eq!(ctx.get("action-b").unwrap().count, 2);
        assert_eq!(ctx.get("action-a").unwrap().count, 1);
        assert!(ctx.get("action-x").is_none());
    }

    #[test]
    fn target_falls_through_the_ranking_on_resolution_failure() {
        // Document with a single link; rank a phantom action above it.
        let body = TreeNode::new("body");
        let link = TreeNode::new("a");
        body.append(&link);

        let real = Action::from_element(&link, &body).unwrap();
        let phantom = Action::new(
            vec![PathNode::new("button", 4, "", "", "", None)],
            None,
        );

        let mut ctx = Context::new();
        ctx.save_action(real.clone());
        for _ in 0..9 {
            ctx.save_action(phantom.clone());
        }
        assert_eq!(ctx.actions()[0].action.hash, phantom.hash);

        let resolved = ctx.target(&body).unwrap();
        assert!(resolved.same_node(&link));
    }

    #[test]
    fn target_is_none_when_nothing_resolves() {
        let body = TreeNode::new("body");
        let mut ctx = Context::new();
        ctx.save_action(Action::new(
            vec![PathNode::new("button", 0, "", "", "", None)],
            None,
        ));
        assert!(ctx.target(&body).is_none());
    }

    #[test]
    fn blob_round_trip_restores_rank_order_and_index() {
        let mut ctx = Context::new();
        ctx.save_action(action("action-low"));
        for _ in 0..4 {
            ctx.save_action(action("action-high"));
        }

        let json = serde_json::to_string(&ctx).unwrap();
        let back: Context = serde_json::from_str(&json).unwrap();

        assert_eq!(back.actions()[0].action.hash, "action-high");
        assert_eq!(back.get("action-low").unwrap().count, 1);
    }

    #[test]
    fn unsorted_blob_is_resorted_on_load() {
        let json = r#"{"actions":[
            {"action":{"path":[],"hash":"action-1"},"count":1},
            {"action":{"path":[],"hash":"action-2"},"count":7}
        ]}"#;
        let ctx: Context = serde_json::from_str(json).unwrap();
        assert_eq!(ctx.actions()[0].action.hash, "action-2");
    }
}
