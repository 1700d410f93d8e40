use super::*;

const ABOUT: &str = "\
A simple program to extract comments from a single Reddit thread and save
them to a CSV file.";

const EXAMPLES: &str = "\
Examples:
  scrape-comments -u farmerje -p waffles123 2qmp46
  scrape-comments -u username -p password submission_id";

#[derive(Debug, Parser)]
#[command(name = "scrape-comments", about = ABOUT, after_help = EXAMPLES)]
pub(crate) struct Arguments {
  /// Your Reddit password
  #[arg(short, long, display_order = 1)]
  pub(crate) password: String,
  /// A Reddit submission ID
  #[arg(value_name = "SUBMISSION_ID")]
  pub(crate) submission_id: String,
  /// Your Reddit username
  #[arg(short, long, display_order = 0)]
  pub(crate) username: String,
}

impl Arguments {
  /// Strips clap's own `error:` label and trailing usage hints, leaving the
  /// message body.
  fn error_message(error: &clap::Error) -> String {
    let rendered = error.to_string();

    let message = rendered.split("\n\n").next().unwrap_or_default();

    message
      .strip_prefix("error: ")
      .unwrap_or(message)
      .trim_end()
      .to_string()
  }

  pub(crate) fn parse_or_exit() -> Self {
    match Self::try_parse() {
      Ok(arguments) => arguments,
      Err(error) if !error.use_stderr() => error.exit(),
      Err(error) => {
        eprintln!("{}", Self::usage_error(&error));
        process::exit(USAGE_EXIT_CODE);
      }
    }
  }

  /// The `Error: ` line followed by the full help text.
  fn usage_error(error: &clap::Error) -> String {
    format!(
      "Error: {}\n{}",
      Self::error_message(error),
      Self::command().render_help()
    )
  }
}
