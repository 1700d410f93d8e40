use super::*;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Node {
  Comment {
    comment: Comment,
    replies: Vec<Node>,
  },
  More(MoreComments),
}

impl Node {
  fn adopt(
    nodes: Vec<Node>,
    by_parent: &mut HashMap<String, Vec<Node>>,
  ) -> Vec<Node> {
    let mut adopted = Vec::with_capacity(nodes.len());

    for mut node in nodes {
      if let Node::Comment { comment, replies } = &mut node
        && let Some(children) = by_parent.remove(&comment.fullname())
      {
        replies.extend(Self::adopt(children, by_parent));
      }

      adopted.push(node);
    }

    adopted
  }

  /// Rebuilds a subtree from a flat list whose nodes point at their parents
  /// through `parent_id`. Nodes under `root_parent` become the roots; nodes
  /// whose parent is missing are appended after them, in arrival order. A
  /// comment that arrives twice keeps its first copy.
  pub(crate) fn assemble(root_parent: &str, flat: Vec<Node>) -> Vec<Node> {
    let mut known = HashSet::new();
    let mut order = Vec::new();
    let mut by_parent = HashMap::<String, Vec<Node>>::new();

    for node in flat {
      if let Node::Comment { comment, .. } = &node
        && !known.insert(comment.fullname())
      {
        warn!(id = %comment.id, "dropping comment that was already loaded");
        continue;
      }

      let parent = node.parent_id().unwrap_or(root_parent).to_string();

      if !by_parent.contains_key(&parent) {
        order.push(parent.clone());
      }

      by_parent.entry(parent).or_default().push(node);
    }

    let roots = by_parent.remove(root_parent).unwrap_or_default();

    let mut assembled = Self::adopt(roots, &mut by_parent);

    for parent in order {
      if known.contains(&parent) {
        continue;
      }

      if let Some(orphans) = by_parent.remove(&parent) {
        warn!(
          %parent,
          count = orphans.len(),
          "parent not found for loaded comments"
        );
        assembled.extend(Self::adopt(orphans, &mut by_parent));
      }
    }

    assembled
  }

  pub(crate) fn parent_id(&self) -> Option<&str> {
    match self {
      Node::Comment { comment, .. } => comment.parent_id.as_deref(),
      Node::More(more) => Some(&more.parent_id),
    }
  }
}
