//! Adverse-event query CLI.
//!
//! Command-line interface for asking natural language questions about an
//! adverse-event CSV file.

use adae_agent::{schema, ClinicalAgent, Dataset, RemoteClassifier};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Natural language queries over clinical adverse event data
#[derive(Parser)]
#[command(name = "adae")]
#[command(about = "Natural language queries over clinical adverse event data", long_about = None)]
#[command(version)]
struct Cli {
    /// Adverse event CSV file (overrides ADAE_DATA)
    #[arg(long, env = "ADAE_DATA", default_value = "adae.csv")]
    data: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a question about the dataset
    Ask {
        /// Natural language question
        question: String,

        /// Use the remote LLM classifier (falls back to rules on failure)
        #[arg(long)]
        remote: bool,

        /// Emit the raw result as JSON instead of a report
        #[arg(long)]
        json: bool,
    },

    /// Run the built-in demonstration questions
    Demo {
        /// Use the remote LLM classifier
        #[arg(long)]
        remote: bool,
    },

    /// Print the schema description given to the remote classifier
    Schema,
}

const DEMO_QUESTIONS: [&str; 3] = [
    "Give me the subjects who had Adverse events of Moderate severity",
    "Which subjects experienced cardiac disorders?",
    "Show me patients with erythema",
];

fn build_agent(data: &PathBuf, remote: bool) -> anyhow::Result<ClinicalAgent> {
    let dataset = Dataset::load(data)?;
    if remote {
        let classifier = RemoteClassifier::from_env()?;
        Ok(ClinicalAgent::with_classifier(dataset, Box::new(classifier)))
    } else {
        Ok(ClinicalAgent::new(dataset))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Ask {
            question,
            remote,
            json,
        } => {
            let agent = build_agent(&cli.data, remote)?;
            if json {
                let result = agent.query(&question).await?;
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", agent.display(&question).await?);
            }
        }
        Commands::Demo { remote } => {
            let agent = build_agent(&cli.data, remote)?;
            for question in DEMO_QUESTIONS {
                println!("{}", agent.display(question).await?);
            }
        }
        Commands::Schema => {
            println!("{}", schema::SCHEMA_DESCRIPTION);
        }
    }

    Ok(())
}
