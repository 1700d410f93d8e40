use super::*;

/// The comment tree of one submission.
#[derive(Debug)]
pub(crate) struct CommentForest {
  link_id: String,
  roots: Vec<Node>,
}

struct Expansion<'a, S> {
  comments: HashSet<String>,
  link_id: &'a str,
  seen: HashSet<String>,
  source: &'a S,
}

impl CommentForest {
  /// Pre-order: each comment precedes its replies, siblings keep the order
  /// they were served in.
  pub(crate) fn flatten(self) -> Vec<Comment> {
    let mut comments = Vec::new();

    let mut stack = self.roots;
    stack.reverse();

    while let Some(node) = stack.pop() {
      match node {
        Node::Comment { comment, replies } => {
          comments.push(comment);
          stack.extend(replies.into_iter().rev());
        }
        Node::More(more) => {
          warn!(
            parent = %more.parent_id,
            count = more.count,
            "skipping unexpanded placeholder"
          );
        }
      }
    }

    comments
  }

  /// Builds the forest from the `[submission, comments]` listing pair served
  /// by the comments endpoint.
  pub(crate) fn from_listings(listings: Vec<Listing>) -> Result<Self> {
    let mut listings = listings.into_iter();

    let (Some(submission), Some(comments)) = (listings.next(), listings.next())
    else {
      bail!("expected a submission listing followed by a comment listing");
    };

    let link_id = submission
      .into_things()
      .into_iter()
      .find(|thing| thing.kind() == "t3")
      .and_then(|thing| thing.fullname().map(str::to_string))
      .context("response did not include the submission")?;

    Ok(Self {
      link_id,
      roots: comments.into_nodes()?,
    })
  }

  /// Takes the replies of the top-level comment `comment_id`, which is how a
  /// "continue this thread" page nests its subtree.
  pub(crate) fn into_replies_of(self, comment_id: &str) -> Vec<Node> {
    for node in self.roots {
      if let Node::Comment { comment, replies } = node
        && comment.id == comment_id
      {
        return replies;
      }
    }

    warn!(comment_id, "continued thread did not include its parent comment");

    Vec::new()
  }

  pub(crate) fn link_id(&self) -> &str {
    &self.link_id
  }

  /// Resolves every placeholder, including ones uncovered by earlier
  /// expansions, until none remain. Returns the number of placeholders
  /// expanded. Each comment is kept once, at its first position in document
  /// order.
  pub(crate) async fn replace_more<S: CommentSource>(
    &mut self,
    source: &S,
  ) -> Result<usize> {
    let mut expansion = Expansion {
      comments: HashSet::new(),
      link_id: &self.link_id,
      seen: HashSet::new(),
      source,
    };

    let roots = std::mem::take(&mut self.roots);

    self.roots = expansion.expand(roots).await?;

    Ok(expansion.seen.len())
  }
}

impl<S: CommentSource> Expansion<'_, S> {
  async fn expand(&mut self, nodes: Vec<Node>) -> Result<Vec<Node>> {
    let mut expanded = Vec::with_capacity(nodes.len());

    for node in nodes {
      match node {
        Node::Comment { comment, replies } => {
          if !self.comments.insert(comment.fullname()) {
            warn!(id = %comment.id, "dropping comment that was already loaded");
            continue;
          }

          let replies = Box::pin(self.expand(replies)).await?;
          expanded.push(Node::Comment { comment, replies });
        }
        Node::More(more) => {
          if !self.seen.insert(more.key()) {
            warn!(
              parent = %more.parent_id,
              "dropping placeholder that was already expanded"
            );
            continue;
          }

          let resolved = more
            .resolve(self.source, self.link_id)
            .await
            .with_context(|| {
              format!("failed to load more comments under `{}`", more.parent_id)
            })?;

          expanded.extend(Box::pin(self.expand(resolved)).await?);
        }
      }
    }

    Ok(expanded)
  }
}

#[cfg(test)]
mod tests {
  use {super::*, std::cell::RefCell};

  const LINK_ID: &str = "t3_sub";

  /// Serves canned nodes: `more` by child id, `continued` by parent comment id.
  #[derive(Default)]
  struct FakeSource {
    continued: HashMap<String, Vec<Node>>,
    fail: bool,
    more: HashMap<String, Vec<Node>>,
    requests: RefCell<usize>,
  }

  impl CommentSource for FakeSource {
    async fn continue_thread(
      &self,
      link_id: &str,
      comment_id: &str,
    ) -> Result<Vec<Node>> {
      assert_eq!(link_id, LINK_ID);
      *self.requests.borrow_mut() += 1;
      Ok(self.continued.get(comment_id).cloned().unwrap_or_default())
    }

    async fn more_children(
      &self,
      link_id: &str,
      children: &[String],
    ) -> Result<Vec<Node>> {
      assert_eq!(link_id, LINK_ID);
      *self.requests.borrow_mut() += 1;

      if self.fail {
        bail!("503 Service Unavailable");
      }

      Ok(
        children
          .iter()
          .filter_map(|id| self.more.get(id))
          .flatten()
          .cloned()
          .collect(),
      )
    }
  }

  fn comment(id: &str, parent_id: &str) -> Node {
    reply(id, parent_id, Vec::new())
  }

  fn ids(comments: &[Comment]) -> Vec<&str> {
    comments.iter().map(|comment| comment.id.as_str()).collect()
  }

  fn more(parent_id: &str, children: &[&str]) -> Node {
    Node::More(MoreComments {
      children: children.iter().map(|id| (*id).to_string()).collect(),
      count: children.len() as u64,
      id: children.first().map_or("_", |id| *id).to_string(),
      parent_id: parent_id.into(),
    })
  }

  fn reply(id: &str, parent_id: &str, replies: Vec<Node>) -> Node {
    Node::Comment {
      comment: Comment {
        id: id.into(),
        link_id: Some(LINK_ID.into()),
        parent_id: Some(parent_id.into()),
        ..Comment::default()
      },
      replies,
    }
  }

  fn forest(roots: Vec<Node>) -> CommentForest {
    CommentForest {
      link_id: LINK_ID.into(),
      roots,
    }
  }

  #[test]
  fn flatten_is_pre_order() {
    let comments = forest(vec![
      reply(
        "a",
        LINK_ID,
        vec![reply("b", "t1_a", vec![comment("c", "t1_b")]), comment("d", "t1_a")],
      ),
      comment("e", LINK_ID),
    ])
    .flatten();

    assert_eq!(ids(&comments), ["a", "b", "c", "d", "e"]);
  }

  #[test]
  fn flatten_of_an_empty_thread_is_empty() {
    assert!(forest(Vec::new()).flatten().is_empty());
  }

  #[tokio::test]
  async fn top_level_comments_keep_served_order() {
    let source = FakeSource::default();

    let mut forest = forest(vec![
      comment("x", LINK_ID),
      comment("y", LINK_ID),
      comment("z", LINK_ID),
    ]);

    assert_eq!(forest.replace_more(&source).await.unwrap(), 0);
    assert_eq!(*source.requests.borrow(), 0);
    assert_eq!(ids(&forest.flatten()), ["x", "y", "z"]);
  }

  #[tokio::test]
  async fn placeholders_are_spliced_in_place() {
    let source = FakeSource {
      more: HashMap::from([
        ("b".to_string(), vec![comment("b", LINK_ID)]),
        ("c".to_string(), vec![comment("c", "t1_b")]),
      ]),
      ..FakeSource::default()
    };

    let mut forest = forest(vec![
      comment("a", LINK_ID),
      more(LINK_ID, &["b", "c"]),
      comment("d", LINK_ID),
    ]);

    assert_eq!(forest.replace_more(&source).await.unwrap(), 1);
    assert_eq!(ids(&forest.flatten()), ["a", "b", "c", "d"]);
  }

  #[tokio::test]
  async fn uncovered_placeholders_are_expanded_too() {
    let source = FakeSource {
      more: HashMap::from([
        (
          "b".to_string(),
          vec![comment("b", "t1_a"), more("t1_b", &["c"])],
        ),
        ("c".to_string(), vec![comment("c", "t1_b")]),
      ]),
      ..FakeSource::default()
    };

    let mut forest =
      forest(vec![reply("a", LINK_ID, vec![more("t1_a", &["b"])])]);

    assert_eq!(forest.replace_more(&source).await.unwrap(), 2);
    assert_eq!(*source.requests.borrow(), 2);
    assert_eq!(ids(&forest.flatten()), ["a", "b", "c"]);
  }

  #[tokio::test]
  async fn continue_links_splice_the_parent_replies() {
    let source = FakeSource {
      continued: HashMap::from([(
        "a".to_string(),
        vec![reply("b", "t1_a", vec![comment("c", "t1_b")])],
      )]),
      ..FakeSource::default()
    };

    let mut forest = forest(vec![
      reply("a", LINK_ID, vec![more("t1_a", &[])]),
      comment("d", LINK_ID),
    ]);

    forest.replace_more(&source).await.unwrap();

    assert_eq!(ids(&forest.flatten()), ["a", "b", "c", "d"]);
  }

  #[tokio::test]
  async fn repeated_placeholders_are_dropped() {
    let source = FakeSource {
      more: HashMap::from([(
        "b".to_string(),
        vec![comment("b", LINK_ID), more(LINK_ID, &["b"])],
      )]),
      ..FakeSource::default()
    };

    let mut forest = forest(vec![more(LINK_ID, &["b"])]);

    assert_eq!(forest.replace_more(&source).await.unwrap(), 1);
    assert_eq!(*source.requests.borrow(), 1);
    assert_eq!(ids(&forest.flatten()), ["b"]);
  }

  #[tokio::test]
  async fn comments_loaded_twice_are_kept_once() {
    let source = FakeSource {
      continued: HashMap::from([(
        "a".to_string(),
        vec![comment("b", "t1_a"), comment("c", "t1_a")],
      )]),
      more: HashMap::from([(
        "d".to_string(),
        vec![comment("a", LINK_ID), comment("d", LINK_ID)],
      )]),
      ..FakeSource::default()
    };

    let mut forest = forest(vec![
      reply("a", LINK_ID, vec![comment("b", "t1_a"), more("t1_a", &[])]),
      more(LINK_ID, &["d"]),
    ]);

    assert_eq!(forest.replace_more(&source).await.unwrap(), 2);
    assert_eq!(ids(&forest.flatten()), ["a", "b", "c", "d"]);
  }

  #[tokio::test]
  async fn source_errors_abort_the_expansion() {
    let source = FakeSource {
      fail: true,
      ..FakeSource::default()
    };

    let mut forest = forest(vec![more(LINK_ID, &["b"])]);

    let error = forest.replace_more(&source).await.unwrap_err();

    assert_eq!(
      error.to_string(),
      format!("failed to load more comments under `{LINK_ID}`")
    );
  }

  #[test]
  fn from_listings_reads_the_submission_and_comments() {
    let listings = serde_json::from_str::<Vec<Listing>>(
      r#"[
        {"kind": "Listing", "data": {"children": [
          {"kind": "t3", "data": {"id": "sub", "name": "t3_sub"}}
        ]}},
        {"kind": "Listing", "data": {"children": [
          {"kind": "t1", "data": {"id": "a", "parent_id": "t3_sub", "replies": ""}},
          {"kind": "more", "data": {"id": "b", "parent_id": "t3_sub", "count": 1, "children": ["b"]}}
        ]}}
      ]"#,
    )
    .unwrap();

    let forest = CommentForest::from_listings(listings).unwrap();

    assert_eq!(forest.link_id(), "t3_sub");
    assert_eq!(forest.roots.len(), 2);
    assert!(matches!(forest.roots[1], Node::More(_)));
  }

  #[test]
  fn from_listings_requires_both_listings() {
    let listings = serde_json::from_str::<Vec<Listing>>(
      r#"[{"kind": "Listing", "data": {"children": []}}]"#,
    )
    .unwrap();

    assert!(CommentForest::from_listings(listings).is_err());
  }

  #[test]
  fn into_replies_of_finds_the_continued_comment() {
    let forest = forest(vec![reply("a", LINK_ID, vec![comment("b", "t1_a")])]);

    assert_eq!(forest.into_replies_of("a"), vec![comment("b", "t1_a")]);
  }

  #[test]
  fn into_replies_of_a_missing_comment_is_empty() {
    assert!(forest(Vec::new()).into_replies_of("a").is_empty());
  }
}
