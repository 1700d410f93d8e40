use super::*;

/// Where hidden comments are loaded from.
pub(crate) trait CommentSource {
  /// Loads the replies below `comment_id` for a "continue this thread" link.
  async fn continue_thread(
    &self,
    link_id: &str,
    comment_id: &str,
  ) -> Result<Vec<Node>>;

  /// Loads the listed comment ids as a flat list; nodes keep `parent_id`.
  async fn more_children(
    &self,
    link_id: &str,
    children: &[String],
  ) -> Result<Vec<Node>>;
}
