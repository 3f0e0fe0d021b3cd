use clap::ValueEnum;
use polls::dto::{IndexDto, QuestionDetailDto};
use polls::models::Question;
use polls::publication::NO_POLLS_MESSAGE;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

/// Bundled output configuration passed to all print functions
#[derive(Debug, Clone, Copy)]
pub struct OutputConfig {
    /// The output format
    pub format: OutputFormat,
    /// When true, print minimal output (just IDs)
    pub quiet: bool,
}

fn print_table(questions: &[Question], config: &OutputConfig) {
    if config.quiet {
        for q in questions {
            println!("{}", q.get_id());
        }
        return;
    }
    let max_id = questions.iter().map(|q| q.get_id().len()).max().unwrap_or(2);
    println!("{:<width$}  {:<25}  QUESTION", "ID", "PUBLISHED", width = max_id);
    for q in questions {
        println!(
            "{:<width$}  {:<25}  {}",
            q.get_id(),
            q.get_pub_date().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            q.get_question_text(),
            width = max_id
        );
    }
}

/// Prints the index of published questions
pub fn print_index(index: &IndexDto, config: &OutputConfig) -> serde_json::Result<()> {
    match config.format {
        OutputFormat::Human => {
            if index.latest_question_list.is_empty() {
                if !config.quiet {
                    let message = index.message.as_deref().unwrap_or(NO_POLLS_MESSAGE);
                    println!("{}", message);
                }
                return Ok(());
            }
            print_table(&index.latest_question_list, config);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(index)?);
        }
    }
    Ok(())
}

/// Prints a list of questions
pub fn print_questions(questions: &[Question], config: &OutputConfig) -> serde_json::Result<()> {
    match config.format {
        OutputFormat::Human => {
            if questions.is_empty() {
                if !config.quiet {
                    println!("No questions found.");
                }
                return Ok(());
            }
            print_table(questions, config);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(questions)?);
        }
    }
    Ok(())
}

/// Prints a single question
pub fn print_question(question: &Question, config: &OutputConfig) -> serde_json::Result<()> {
    match config.format {
        OutputFormat::Human => {
            if config.quiet {
                println!("{}", question.get_id());
                return Ok(());
            }
            println!("ID:        {}", question.get_id());
            println!("Question:  {}", question.get_question_text());
            println!("Published: {}", question.get_pub_date());
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(question)?);
        }
    }
    Ok(())
}

/// Prints the detail of a published question
pub fn print_detail(detail: &QuestionDetailDto, config: &OutputConfig) -> serde_json::Result<()> {
    match config.format {
        OutputFormat::Human => {
            print_question(&detail.question, config)?;
            if !config.quiet {
                println!("Recent:    {}", if detail.was_published_recently { "yes" } else { "no" });
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(detail)?);
        }
    }
    Ok(())
}
