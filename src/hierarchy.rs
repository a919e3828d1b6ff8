//! Problem hierarchy builder.
//!
//! Turns the flat list of problem-tree leaves into the full set of pages the
//! site needs: one page per leaf, one section page per parent that directly
//! holds problems, and one index page per higher ancestor up to the root.
//!
//! ## Worklist
//!
//! The tree is materialized with a FIFO worklist consumed by index while it
//! grows. It starts with every leaf. Visiting an item computes its parent id;
//! the first visitor of a parent creates the [`Node`] and enqueues the parent
//! itself, tagged [`PageKind::Section`] when the visitor is a leaf and
//! [`PageKind::Index`] otherwise. Every later visitor just joins the node's
//! child list. Each enqueue strictly shortens the id, so the walk ends at the
//! root.
//!
//! ```text
//! leaves   1.1  1.2  2.1        worklist after the walk:
//!            \  /     |         1.1 1.2 2.1 | 1 2 | ""
//! sections    1       2           problems   sections root
//!              \     /
//! root          ""
//! ```
//!
//! ## Rollup
//!
//! A node's [`Totals`] always equal the sum of its children's contributions.
//! A leaf contributes `(1, 0)`, or `(0, links)` for an extra group; a node
//! contributes its own totals. When a child joins a node its contribution is
//! added to that node and to every ancestor already linked above it; a node
//! carries its accumulated totals with it when it is linked to its own
//! parent. Nothing is ever recounted from scratch.

use crate::ident::{self, ROOT_ID};
use crate::types::{Record, Totals};
use std::collections::HashMap;

/// What kind of page a worklist item produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// A single problem or extra-link group.
    Problem,
    /// A section whose first child was a leaf ("index1").
    Section,
    /// A higher section whose first child was itself a section.
    Index,
}

impl PageKind {
    pub fn label(self) -> &'static str {
        match self {
            PageKind::Problem => "problem",
            PageKind::Section => "section",
            PageKind::Index => "index",
        }
    }
}

/// A child of a hierarchy node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Child {
    /// Index into [`Hierarchy::records`].
    Record(usize),
    /// Index into [`Hierarchy::nodes`].
    Node(usize),
}

/// One entry of the worklist, in visiting order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub id: String,
    pub kind: PageKind,
    /// Record index for problems, node index for sections and indices.
    pub target: usize,
}

/// A synthesized section of the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    pub kind: PageKind,
    /// Children in arrival order. Sort with [`Hierarchy::sorted_children`].
    pub children: Vec<Child>,
    pub totals: Totals,
    /// Set once this node has been visited and attached to its parent.
    pub parent: Option<usize>,
}

/// The materialized problem tree.
#[derive(Debug, Clone)]
pub struct Hierarchy<'a> {
    pub records: &'a [Record],
    pub nodes: Vec<Node>,
    /// Every visited item in worklist order.
    pub order: Vec<WorkItem>,
}

/// Build the hierarchy for a set of leaves.
pub fn build(records: &[Record]) -> Hierarchy<'_> {
    let mut worklist: Vec<WorkItem> = records
        .iter()
        .enumerate()
        .map(|(i, r)| WorkItem {
            id: r.id.clone(),
            kind: PageKind::Problem,
            target: i,
        })
        .collect();
    let mut nodes: Vec<Node> = Vec::new();
    let mut by_id: HashMap<String, usize> = HashMap::new();

    let mut head = 0;
    while head < worklist.len() {
        let item = worklist[head].clone();
        head += 1;

        let Some(parent_id) = ident::parent_id(&item.id) else {
            continue;
        };
        let (child, contribution) = match item.kind {
            PageKind::Problem => (Child::Record(item.target), records[item.target].totals()),
            PageKind::Section | PageKind::Index => {
                (Child::Node(item.target), nodes[item.target].totals)
            }
        };

        let parent = match by_id.get(parent_id) {
            Some(&idx) => {
                nodes[idx].children.push(child);
                add_up(&mut nodes, idx, contribution);
                idx
            }
            None => {
                let idx = nodes.len();
                let kind = if item.kind == PageKind::Problem {
                    PageKind::Section
                } else {
                    PageKind::Index
                };
                nodes.push(Node {
                    id: parent_id.to_string(),
                    kind,
                    children: vec![child],
                    totals: contribution,
                    parent: None,
                });
                by_id.insert(parent_id.to_string(), idx);
                worklist.push(WorkItem {
                    id: parent_id.to_string(),
                    kind,
                    target: idx,
                });
                idx
            }
        };

        if let Child::Node(own) = child {
            nodes[own].parent = Some(parent);
        }
    }

    Hierarchy {
        records,
        nodes,
        order: worklist,
    }
}

/// Add a contribution to a node and every ancestor linked above it.
fn add_up(nodes: &mut [Node], start: usize, contribution: Totals) {
    let mut cursor = Some(start);
    while let Some(idx) = cursor {
        nodes[idx].totals += contribution;
        cursor = nodes[idx].parent;
    }
}

impl<'a> Hierarchy<'a> {
    /// Id of a child.
    pub fn child_id(&self, child: Child) -> &str {
        match child {
            Child::Record(i) => &self.records[i].id,
            Child::Node(i) => &self.nodes[i].id,
        }
    }

    /// Rollup contribution of a child.
    pub fn child_totals(&self, child: Child) -> Totals {
        match child {
            Child::Record(i) => self.records[i].totals(),
            Child::Node(i) => self.nodes[i].totals,
        }
    }

    /// A node's children in hierarchy-id order.
    pub fn sorted_children(&self, node: &Node) -> Vec<Child> {
        let mut children = node.children.clone();
        children.sort_by(|a, b| ident::compare_ids(self.child_id(*a), self.child_id(*b)));
        children
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn root(&self) -> Option<&Node> {
        self.node(ROOT_ID)
    }

    pub fn count_kind(&self, kind: PageKind) -> usize {
        self.order.iter().filter(|i| i.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ExtraLink, Problem};

    fn leaves(ids: &[&str]) -> Vec<Record> {
        ids.iter()
            .map(|id| {
                if ident::is_extra(id) {
                    Record::extra(*id, links(4))
                } else {
                    Record::problem(*id, Problem::default())
                }
            })
            .collect()
    }

    fn links(n: usize) -> Vec<ExtraLink> {
        (0..n)
            .map(|i| ExtraLink {
                name: format!("judge {i}"),
                link: format!("https://judge.example/{i}"),
            })
            .collect()
    }

    fn order<'h>(h: &'h Hierarchy<'_>) -> Vec<(&'h str, PageKind)> {
        h.order.iter().map(|i| (i.id.as_str(), i.kind)).collect()
    }

    #[test]
    fn three_leaves_two_sections_one_root() {
        let records = leaves(&["1.1", "1.2", "2.1"]);
        let h = build(&records);

        assert_eq!(h.count_kind(PageKind::Problem), 3);
        assert_eq!(h.count_kind(PageKind::Section), 2);
        assert_eq!(h.count_kind(PageKind::Index), 1);
        assert_eq!(
            order(&h),
            vec![
                ("1.1", PageKind::Problem),
                ("1.2", PageKind::Problem),
                ("2.1", PageKind::Problem),
                ("1", PageKind::Section),
                ("2", PageKind::Section),
                ("", PageKind::Index),
            ]
        );
        let root = h.root().unwrap();
        assert_eq!(root.totals, Totals { count: 3, count_code: 0 });
        assert_eq!(h.node("1").unwrap().totals.count, 2);
        assert_eq!(h.node("2").unwrap().totals.count, 1);
    }

    #[test]
    fn extra_group_counts_links_not_problems() {
        let records = leaves(&["3.1", "3.extra"]);
        let h = build(&records);
        let section = h.node("3").unwrap();
        assert_eq!(section.totals, Totals { count: 1, count_code: 4 });
        assert_eq!(h.root().unwrap().totals, Totals { count: 1, count_code: 4 });
    }

    #[test]
    fn shared_parent_totals() {
        let mut records = leaves(&["5.1", "5.2", "5.3"]);
        records.push(Record::extra("5.extra", links(2)));
        records.push(Record::extra("5.more.extra", links(7)));
        let h = build(&records);
        // 5.more sits under 5, so its links roll into 5 as well.
        assert_eq!(h.node("5").unwrap().totals, Totals { count: 3, count_code: 9 });
        assert_eq!(h.node("5.more").unwrap().totals, Totals { count: 0, count_code: 7 });
        assert_eq!(h.root().unwrap().totals, Totals { count: 3, count_code: 9 });
    }

    #[test]
    fn deep_tree_tags_sections_and_indices() {
        let records = leaves(&["1.1.1", "1.2.1", "2.1.1"]);
        let h = build(&records);
        assert_eq!(h.node("1.1").unwrap().kind, PageKind::Section);
        assert_eq!(h.node("1").unwrap().kind, PageKind::Index);
        assert_eq!(h.root().unwrap().kind, PageKind::Index);
        assert_eq!(h.root().unwrap().totals.count, 3);
        assert_eq!(h.node("1").unwrap().totals.count, 2);
    }

    #[test]
    fn root_enqueued_once() {
        let records = leaves(&["1.1", "2.1", "3.1", "4"]);
        let h = build(&records);
        let roots = h.order.iter().filter(|i| i.id.is_empty()).count();
        assert_eq!(roots, 1);
    }

    #[test]
    fn late_sibling_after_parent_visit_still_rolls_up() {
        // "1" reaches the root before "2" does; the root is visited before
        // "2" joins it, so the rollup has to arrive through the link.
        let records = leaves(&["1.1", "2.1.1"]);
        let h = build(&records);
        let pos = |id: &str| h.order.iter().position(|i| i.id == id).unwrap();
        assert!(pos("") < pos("2"));

        let root = h.root().unwrap();
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.totals.count, 2);
    }

    #[test]
    fn late_section_propagates_through_linked_ancestors() {
        // "1" is linked to the root before "1.2" joins it, so the deep
        // problem has to reach the root through the parent chain.
        let records = leaves(&["1.1", "1.2.1.1"]);
        let h = build(&records);
        let pos = |id: &str| h.order.iter().position(|i| i.id == id).unwrap();
        assert!(pos("1") < pos("1.2"));

        assert_eq!(h.node("1").unwrap().totals.count, 2);
        assert_eq!(h.root().unwrap().totals.count, 2);
    }

    #[test]
    fn every_node_equals_sum_of_children() {
        let mut records = leaves(&["1.1", "1.2.1", "1.2.2", "2.9.1", "2.10.1", "2.10.2", "3"]);
        records.push(Record::extra("2.10.extra", links(3)));
        records.push(Record::extra("1.extra", links(1)));
        let h = build(&records);
        for node in &h.nodes {
            let mut sum = Totals::default();
            for &child in &node.children {
                sum += h.child_totals(child);
            }
            assert_eq!(node.totals, sum, "node '{}'", node.id);
        }
        assert_eq!(h.root().unwrap().totals, Totals { count: 7, count_code: 4 });
    }

    #[test]
    fn children_sorted_numerically() {
        let records = leaves(&["2.10", "2.9", "2.extra", "2.1"]);
        let h = build(&records);
        let section = h.node("2").unwrap();
        let ids: Vec<&str> = h
            .sorted_children(section)
            .into_iter()
            .map(|c| h.child_id(c))
            .collect();
        assert_eq!(ids, vec!["2.1", "2.9", "2.10", "2.extra"]);
    }

    #[test]
    fn top_level_leaf_hangs_off_root() {
        let records = leaves(&["4"]);
        let h = build(&records);
        assert_eq!(order(&h), vec![("4", PageKind::Problem), ("", PageKind::Section)]);
    }

    #[test]
    fn no_records_no_pages() {
        let h = build(&[]);
        assert!(h.order.is_empty());
        assert!(h.root().is_none());
    }
}
