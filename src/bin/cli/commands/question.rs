use chrono::{DateTime, Utc};
use clap::Subcommand;

use crate::client::PollsClient;
use crate::output::{self, OutputConfig};

/// Question commands
#[derive(Subcommand, Debug)]
pub enum QuestionCommands {
    /// Show published questions, newest first
    Index {
        /// Maximum number of questions to show
        #[clap(long)]
        limit: Option<i64>,
    },
    /// Show questions published within the last 24 hours
    Recent,
    /// Show a published question
    Show {
        /// The question ID
        id: String,
    },
    /// Create a new question
    Create {
        /// Text of the question
        #[clap(long)]
        text: String,
        /// Publish this many days from now (negative for the past)
        #[clap(long, allow_hyphen_values = true, conflicts_with = "pub_date")]
        days: Option<i64>,
        /// Absolute publish date (RFC 3339)
        #[clap(long)]
        pub_date: Option<DateTime<Utc>>,
    },
    /// List every question, including unpublished ones
    ListAll,
}

/// Executes a question command
pub async fn execute(
    client: &PollsClient,
    cmd: QuestionCommands,
    config: &OutputConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        QuestionCommands::Index { limit } => {
            let index = client.index(limit).await?;
            output::print_index(&index, config)?;
        }
        QuestionCommands::Recent => {
            let questions = client.recent().await?;
            output::print_questions(&questions, config)?;
        }
        QuestionCommands::Show { id } => {
            let detail = client.detail(&id).await?;
            output::print_detail(&detail, config)?;
        }
        QuestionCommands::Create { text, days, pub_date } => {
            let question = client.create_question(text, pub_date, days).await?;
            output::print_question(&question, config)?;
        }
        QuestionCommands::ListAll => {
            let questions = client.list_all().await?;
            output::print_questions(&questions, config)?;
        }
    }
    Ok(())
}
