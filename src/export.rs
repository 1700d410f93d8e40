use super::*;

/// Writes a header row of `fields` followed by one row per comment,
/// replacing whatever `path` held before.
pub(crate) fn write_comment_csv(
  path: &Path,
  comments: &[Comment],
  fields: &[Field],
) -> Result {
  let mut writer = csv::WriterBuilder::new()
    .terminator(csv::Terminator::CRLF)
    .from_path(path)
    .with_context(|| format!("could not create `{}`", path.display()))?;

  writer
    .write_record(fields.iter().map(|field| field.name()))
    .with_context(|| format!("could not write to `{}`", path.display()))?;

  for comment in comments {
    writer
      .write_record(comment.row(fields))
      .with_context(|| format!("could not write to `{}`", path.display()))?;
  }

  writer
    .flush()
    .with_context(|| format!("could not write to `{}`", path.display()))?;

  debug!(path = %path.display(), rows = comments.len(), "wrote csv");

  Ok(())
}
