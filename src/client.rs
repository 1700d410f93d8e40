use super::*;

/// An authenticated connection to reddit.
pub(crate) struct Client {
  client: reqwest::Client,
  session: Session,
}

impl Client {
  /// "Continue this thread" pages live under the submission id, without the
  /// `t3_` prefix of its fullname.
  fn continue_thread_request(
    &self,
    link_id: &str,
    comment_id: &str,
  ) -> reqwest::RequestBuilder {
    let submission_id = link_id.strip_prefix("t3_").unwrap_or(link_id);

    self.request(
      &format!("/comments/{submission_id}/_/{comment_id}.json"),
      &[("limit", SUBMISSION_COMMENT_LIMIT)],
    )
  }

  pub(crate) async fn fetch_submission(
    &self,
    submission_id: &str,
  ) -> Result<CommentForest> {
    let request = self.submission_request(submission_id);

    let listings = Self::send::<Vec<Listing>>(request)
      .await
      .with_context(|| format!("failed to fetch submission `{submission_id}`"))?;

    CommentForest::from_listings(listings)
      .with_context(|| format!("unexpected response for `{submission_id}`"))
  }

  pub(crate) async fn login(
    config: &Config,
    username: &str,
    password: &str,
  ) -> Result<Self> {
    let client = reqwest::Client::builder()
      .user_agent(&config.user_agent)
      .cookie_store(true)
      .build()?;

    let session = Session::establish(&client, config, username, password)
      .await
      .with_context(|| format!("failed to log in as `{username}`"))?;

    Ok(Self { client, session })
  }

  fn more_children_request(
    &self,
    link_id: &str,
    children: &[String],
  ) -> reqwest::RequestBuilder {
    self.request(
      "/api/morechildren",
      &[
        ("api_type", "json"),
        ("children", children.join(",").as_str()),
        ("limit_children", "false"),
        ("link_id", link_id),
      ],
    )
  }

  fn request(
    &self,
    path: &str,
    query: &[(&str, &str)],
  ) -> reqwest::RequestBuilder {
    let url = format!("{}{path}", self.session.api_base());

    debug!(%url, ?query, "requesting");

    self.session.authorize(self.client.get(url)).query(query)
  }

  async fn send<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
  ) -> Result<T> {
    Ok(
      request
        .send()
        .await?
        .error_for_status()?
        .json::<T>()
        .await?,
    )
  }

  fn submission_request(&self, submission_id: &str) -> reqwest::RequestBuilder {
    self.request(
      &format!("/comments/{submission_id}.json"),
      &[("limit", SUBMISSION_COMMENT_LIMIT)],
    )
  }
}

impl CommentSource for Client {
  async fn continue_thread(
    &self,
    link_id: &str,
    comment_id: &str,
  ) -> Result<Vec<Node>> {
    let request = self.continue_thread_request(link_id, comment_id);

    let listings = Self::send::<Vec<Listing>>(request).await?;

    Ok(CommentForest::from_listings(listings)?.into_replies_of(comment_id))
  }

  async fn more_children(
    &self,
    link_id: &str,
    children: &[String],
  ) -> Result<Vec<Node>> {
    Self::send::<MoreChildrenResponse>(
      self.more_children_request(link_id, children),
    )
    .await?
    .into_nodes()
  }
}
