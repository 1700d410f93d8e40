use super::*;

/// Stand-in for comments the listing left out. With no `children` it is a
/// "continue this thread" link to the subtree under `parent_id`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub(crate) struct MoreComments {
  #[serde(default)]
  pub(crate) children: Vec<String>,
  #[serde(default)]
  pub(crate) count: u64,
  pub(crate) id: String,
  pub(crate) parent_id: String,
}

impl MoreComments {
  pub(crate) fn is_continue_thread(&self) -> bool {
    self.children.is_empty()
  }

  pub(crate) fn key(&self) -> String {
    format!("{}/{}/{}", self.parent_id, self.id, self.children.join(","))
  }

  /// Fetches the hidden comments and returns them as a subtree rooted at
  /// this placeholder's parent. The result may hold further placeholders.
  pub(crate) async fn resolve<S: CommentSource>(
    &self,
    source: &S,
    link_id: &str,
  ) -> Result<Vec<Node>> {
    if self.is_continue_thread() {
      let Some(comment_id) = self.parent_id.strip_prefix("t1_") else {
        warn!(parent = %self.parent_id, "placeholder has nothing to load");
        return Ok(Vec::new());
      };

      return source.continue_thread(link_id, comment_id).await;
    }

    let mut flat = Vec::with_capacity(self.children.len());

    for batch in self.children.chunks(MORE_CHILDREN_BATCH_SIZE) {
      debug!(
        parent = %self.parent_id,
        size = batch.len(),
        "loading more comments"
      );

      flat.extend(source.more_children(link_id, batch).await?);
    }

    Ok(Node::assemble(&self.parent_id, flat))
  }
}
