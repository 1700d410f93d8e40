use self::Field::*;

/// Export columns, in file order. `is_root` and `link_id` appear twice and
/// downstream consumers rely on that layout.
pub(crate) const COMMENT_FIELDS: [Field; 16] = [
  Id,
  LinkId,
  ParentId,
  IsRoot,
  CreatedUtc,
  Author,
  Gilded,
  Downs,
  Ups,
  Score,
  IsRoot,
  AuthorFlairText,
  Subreddit,
  SubredditId,
  LinkId,
  Body,
];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Field {
  Author,
  AuthorFlairText,
  Body,
  CreatedUtc,
  Downs,
  Gilded,
  Id,
  IsRoot,
  LinkId,
  ParentId,
  Score,
  Subreddit,
  SubredditId,
  Ups,
}

impl Field {
  pub(crate) fn name(self) -> &'static str {
    match self {
      Author => "author",
      AuthorFlairText => "author_flair_text",
      Body => "body",
      CreatedUtc => "created_utc",
      Downs => "downs",
      Gilded => "gilded",
      Id => "id",
      IsRoot => "is_root",
      LinkId => "link_id",
      ParentId => "parent_id",
      Score => "score",
      Subreddit => "subreddit",
      SubredditId => "subreddit_id",
      Ups => "ups",
    }
  }
}
