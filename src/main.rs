use {
  anyhow::{Context, bail},
  arguments::Arguments,
  clap::{CommandFactory, Parser},
  client::Client,
  comment::Comment,
  comment_source::CommentSource,
  config::{AppCredentials, Config},
  crossterm::style::Stylize,
  field::{COMMENT_FIELDS, Field},
  forest::CommentForest,
  more_comments::MoreComments,
  node::Node,
  platform::Platform,
  serde::{
    Deserialize, Deserializer,
    de::{self, DeserializeOwned, Unexpected},
  },
  serde_json::Value,
  session::Session,
  std::{
    backtrace::BacktraceStatus,
    collections::{HashMap, HashSet},
    env,
    io::{self, IsTerminal},
    path::{Path, PathBuf},
    process,
  },
  thing::{Listing, MoreChildrenResponse},
  tracing::{debug, info, warn},
  tracing_subscriber::EnvFilter,
  utils::{decode_entities, deserialize_optional_integer, deserialize_replies},
};

mod arguments;
mod client;
mod comment;
mod comment_source;
mod config;
mod export;
mod field;
mod forest;
mod more_comments;
mod node;
mod platform;
mod session;
mod thing;
mod utils;

const DEFAULT_USER_AGENT: &str = "Comment Scraper 1.0";

const MORE_CHILDREN_BATCH_SIZE: usize = 100;

const SUBMISSION_COMMENT_LIMIT: &str = "500";

const USAGE_EXIT_CODE: i32 = 2;

type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;

async fn run(arguments: Arguments) -> Result {
  let path = Platform::current()
    .csv_file_path(&arguments.submission_id, |key| env::var(key).ok())?;

  let config = Config::from_env(|key| env::var(key).ok());

  let client =
    Client::login(&config, &arguments.username, &arguments.password).await?;

  println!(
    "Fetching all comments for submission '{}'. This could take a while...\n\n\
     When finished, the results will be saved to:\n  {}",
    arguments.submission_id,
    path.display()
  );

  let mut forest = client.fetch_submission(&arguments.submission_id).await?;

  debug!(link_id = forest.link_id(), "resolved submission");

  let expanded = forest.replace_more(&client).await?;

  let comments = forest.flatten();

  info!(
    comments = comments.len(),
    placeholders = expanded,
    "fetched submission"
  );

  export::write_comment_csv(&path, &comments, &COMMENT_FIELDS)?;

  println!("Saved {} comments.", comments.len());

  Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn")),
    )
    .with_writer(io::stderr)
    .init();

  let arguments = Arguments::parse_or_exit();

  if let Err(error) = run(arguments).await {
    let use_color = io::stderr().is_terminal();

    if use_color {
      eprintln!("{} {error}", "error:".bold().red());
    } else {
      eprintln!("error: {error}");
    }

    for (i, error) in error.chain().skip(1).enumerate() {
      if i == 0 {
        eprintln!();

        if use_color {
          eprintln!("{}", "because:".bold().red());
        } else {
          eprintln!("because:");
        }
      }

      if use_color {
        eprintln!("{} {error}", "-".bold().red());
      } else {
        eprintln!("- {error}");
      }
    }

    let backtrace = error.backtrace();

    if backtrace.status() == BacktraceStatus::Captured {
      if use_color {
        eprintln!("{}", "backtrace:".bold().red());
      } else {
        eprintln!("backtrace:");
      }

      eprintln!("{backtrace}");
    }

    process::exit(1);
  }
}
