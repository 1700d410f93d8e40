use super::*;

/// Snapshot of a single comment as it looked when fetched.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Comment {
  pub(crate) author: Option<String>,
  pub(crate) author_flair_text: Option<String>,
  pub(crate) body: Option<String>,
  pub(crate) created_utc: Option<i64>,
  pub(crate) downs: Option<i64>,
  pub(crate) gilded: Option<i64>,
  pub(crate) id: String,
  pub(crate) link_id: Option<String>,
  pub(crate) parent_id: Option<String>,
  pub(crate) score: Option<i64>,
  pub(crate) subreddit: Option<String>,
  pub(crate) subreddit_id: Option<String>,
  pub(crate) ups: Option<i64>,
}

impl Comment {
  pub(crate) fn field(&self, field: Field) -> Option<String> {
    let integer = |value: Option<i64>| value.map(|value| value.to_string());

    match field {
      Field::Author => self.author.clone(),
      Field::AuthorFlairText => self.author_flair_text.clone(),
      Field::Body => self.body.clone(),
      Field::CreatedUtc => integer(self.created_utc),
      Field::Downs => integer(self.downs),
      Field::Gilded => integer(self.gilded),
      Field::Id => Some(self.id.clone()),
      Field::IsRoot => self
        .is_root()
        .map(|root| (if root { "True" } else { "False" }).to_string()),
      Field::LinkId => self.link_id.clone(),
      Field::ParentId => self.parent_id.clone(),
      Field::Score => integer(self.score),
      Field::Subreddit => self.subreddit.clone(),
      Field::SubredditId => self.subreddit_id.clone(),
      Field::Ups => integer(self.ups),
    }
  }

  pub(crate) fn fullname(&self) -> String {
    format!("t1_{}", self.id)
  }

  /// Top-level comments hang directly off the submission (`t3_` parent).
  pub(crate) fn is_root(&self) -> Option<bool> {
    self
      .parent_id
      .as_deref()
      .map(|parent| parent.starts_with("t3_"))
  }

  pub(crate) fn row(&self, fields: &[Field]) -> Vec<String> {
    fields
      .iter()
      .map(|field| self.field(*field).unwrap_or_default())
      .collect()
  }
}
