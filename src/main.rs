//! `quizgen` command-line front end.
//!
//! # Usage
//!
//! ```bash
//! # Generate a quiz (falls back to templates without OPENAI_API_KEY)
//! quizgen generate --topic Fractions --subject Math --difficulty hard --count 3 --type multiple-choice
//!
//! # Same, printed as JSON and without contacting the service
//! quizgen --offline generate --topic Photosynthesis --subject Science --json
//!
//! # Topic suggestions for a subject
//! quizgen suggest --subject History
//!
//! # Interactive teaching assistant
//! quizgen chat --view students
//!
//! # Show the effective configuration
//! quizgen config
//! ```

use lms_quizgen::application::services::assistant_service::{
    contextual_suggestions, quick_suggestions,
};
use lms_quizgen::config::{self, Config};
use lms_quizgen::prelude::*;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Input;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// AI-assisted quiz generation for learning management systems.
#[derive(Parser)]
#[command(name = "quizgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Never contact the generative service
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a quiz
    Generate {
        /// Quiz topic (e.g., "Fractions", "Photosynthesis")
        #[arg(short, long)]
        topic: String,

        /// Subject (Math, Science, English, History or any other name)
        #[arg(short, long)]
        subject: Subject,

        /// Grade level (e.g., "5th")
        #[arg(short, long)]
        grade: Option<String>,

        /// easy, medium or hard
        #[arg(short, long, default_value = "medium")]
        difficulty: Difficulty,

        /// Number of questions (1-20)
        #[arg(short = 'n', long, default_value_t = 5)]
        count: u32,

        /// Question type; repeat for several (default: multiple-choice, true-false, short-answer)
        #[arg(long = "type", value_name = "TYPE")]
        types: Vec<QuestionType>,

        /// Print the quiz as JSON
        #[arg(long)]
        json: bool,
    },

    /// Suggest quiz topics for a subject
    Suggest {
        #[arg(short, long)]
        subject: Subject,
    },

    /// Chat with the teaching assistant
    Chat {
        /// LMS view used to pick conversation starters
        #[arg(long, default_value = "dashboard")]
        view: String,
    },

    /// Show the configuration summary
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env().context("Invalid configuration")?;
    init_tracing(&config);
    config.print_summary();

    let generator: Arc<dyn TextGenerator> = if cli.offline {
        Arc::new(NullGenerator::new())
    } else {
        Arc::new(OpenAiGenerator::new(config.generator_config()))
    };
    let random = Arc::new(StdRandom::from_os());

    match cli.command {
        Commands::Generate {
            topic,
            subject,
            grade,
            difficulty,
            count,
            types,
            json,
        } => {
            let mut params = QuizParameters::new(topic, subject)
                .with_difficulty(difficulty)
                .with_question_count(count);
            if let Some(grade) = grade {
                params = params.with_grade_level(grade);
            }
            if !types.is_empty() {
                params = params.with_question_types(types);
            }

            let service = QuizService::new(generator, random);
            generate(&service, &params, json).await?;
        }
        Commands::Suggest { subject } => {
            let service = SuggestionService::new(generator);
            let suggestions = service.get_suggestions(&subject).await;

            println!(
                "{} {}",
                "Topic suggestions for".bright_blue().bold(),
                subject.to_string().cyan()
            );
            for topic in &suggestions.topics {
                println!("  • {}", topic);
            }
            println!("  {}", format!("({})", suggestions.provenance).bright_black());
        }
        Commands::Chat { view } => {
            let service = AssistantService::new(generator, random);
            chat(&service, &view).await?;
        }
        Commands::Config => print_config(&config),
    }

    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn generate<G, R>(service: &QuizService<G, R>, params: &QuizParameters, json: bool) -> Result<()>
where
    G: TextGenerator + ?Sized,
    R: RandomSource + ?Sized,
{
    let quiz = match service.generate_quiz(params).await {
        Ok(quiz) => quiz,
        Err(QuizError::InvalidParameters { message, details }) => {
            if !details.is_null() {
                eprintln!("{}", serde_json::to_string_pretty(&details)?);
            }
            anyhow::bail!("Invalid parameters: {message}");
        }
        Err(other) => return Err(other.into()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&quiz)?);
        return Ok(());
    }

    println!("{}", quiz.title.bright_blue().bold());
    println!("{}", quiz.description.bright_black());
    println!(
        "  {} questions, {} points, ~{} min ({})",
        quiz.question_count().to_string().bright_white().bold(),
        quiz.total_points.to_string().bright_white().bold(),
        quiz.estimated_time,
        quiz.provenance
    );
    println!();

    for question in &quiz.questions {
        println!(
            "{} {} {}",
            format!("{}.", question.id).cyan(),
            question.prompt,
            format!("[{} pts]", question.points).bright_black()
        );
        match &question.answer {
            Answer::MultipleChoice {
                options,
                correct_answer,
            } => {
                for (i, option) in options.iter().enumerate() {
                    let letter = (b'A' + i as u8) as char;
                    if i == *correct_answer {
                        println!("   {}) {}", letter, option.green());
                    } else {
                        println!("   {}) {}", letter, option);
                    }
                }
            }
            Answer::TrueFalse { correct_answer } => {
                println!("   {} {}", "Answer:".bright_white(), correct_answer.to_string().green());
            }
            Answer::ShortAnswer { correct_answer } | Answer::FillInBlank { correct_answer } => {
                println!("   {} {}", "Answer:".bright_white(), correct_answer.green());
            }
        }
        if let Some(explanation) = &question.explanation {
            println!("   {}", explanation.bright_black());
        }
        println!();
    }

    Ok(())
}

async fn chat<G, R>(service: &AssistantService<G, R>, view: &str) -> Result<()>
where
    G: TextGenerator + ?Sized,
    R: RandomSource + ?Sized,
{
    println!("{}", "Teaching Assistant".bright_blue().bold());
    println!("{}", "Type /quit to exit, /clear to start over.".bright_black());
    println!();
    println!("{}", "Try asking:".bright_white());
    for prompt in contextual_suggestions(view).iter().chain(quick_suggestions().iter().take(3)) {
        println!("  • {}", prompt.cyan());
    }
    println!();

    let mut session = ChatSession::new();
    loop {
        let line: String = Input::new().with_prompt("You").interact_text()?;
        match line.trim() {
            "/quit" | "/exit" => break,
            "/clear" => {
                session.clear();
                println!("{}", "Conversation cleared.".bright_black());
                continue;
            }
            _ => {}
        }

        match service.send_message(&mut session, &line).await {
            Ok(reply) => {
                let label = if reply.from_service {
                    "Assistant:".green().bold()
                } else {
                    "Assistant (offline):".yellow().bold()
                };
                println!("{} {}", label, reply.message);
                println!();
            }
            Err(err) => println!("{} {}", "Error:".red().bold(), err),
        }
    }

    Ok(())
}

fn print_config(config: &Config) {
    println!("{}", "Configuration".bright_blue().bold());
    println!("  Endpoint:    {}", config.openai_base_url.cyan());
    println!("  Model:       {}", config.openai_model.cyan());

    let key = match config.openai_api_key.as_deref() {
        Some(key) if config.is_generation_enabled() => config::mask_api_key(key).green(),
        _ => "not configured (offline fallback)".yellow(),
    };
    println!("  API key:     {}", key);
    println!("  Timeout:     {}s", config.generation_timeout_seconds);
    println!("  Temperature: {}", config.generation_temperature);
    println!("  Log:         {} ({})", config.log_level, config.log_format);
}
