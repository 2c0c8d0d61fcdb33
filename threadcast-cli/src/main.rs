//! threadcast - generate and publish short-form posts and threads

use std::sync::Arc;

use clap::{Parser, Subcommand};

use libthreadcast::api::http::HttpApi;
use libthreadcast::logging::{self, LogFormat};
use libthreadcast::{
    Config, GenerationApi, Language, Mode, PostingApi, Result, ThreadcastError, Workflow,
};

#[derive(Parser, Debug)]
#[command(name = "threadcast")]
#[command(about = "Generate and publish short-form posts and threads", long_about = None)]
struct Cli {
    /// Path to a config file (defaults to the XDG location)
    #[arg(short, long, env = "THREADCAST_CONFIG")]
    config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a single post from a topic
    Single {
        /// Topic to generate from
        topic: String,

        /// Generation language (english, hindi, hinglish)
        #[arg(short, long, default_value = "english")]
        language: Language,

        /// Publish the generated draft instead of just printing it
        #[arg(short, long)]
        post: bool,
    },

    /// Generate a thread from a topic
    Thread {
        /// Topic to generate from
        topic: String,

        /// Number of parts to request (2-5)
        #[arg(short = 'n', long, default_value_t = 3)]
        parts: usize,

        /// Generation language (english, hindi, hinglish)
        #[arg(short, long, default_value = "english")]
        language: Language,

        /// Publish the generated draft instead of just printing it
        #[arg(short, long)]
        post: bool,
    },

    /// Show the remaining daily posting quota
    Quota,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        logging::init(LogFormat::Text, "debug");
    } else {
        logging::init_default();
    }

    // Run the main logic and handle errors
    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => {
            let path = shellexpand::tilde(path).to_string();
            Config::load_from_path(&path.into())?
        }
        None => Config::load_or_default(),
    };

    let api = Arc::new(
        HttpApi::new(&config.api.base_url)
            .map_err(|e| ThreadcastError::InvalidInput(e.to_string()))?,
    );
    let mut workflow = Workflow::new(
        Arc::clone(&api) as Arc<dyn GenerationApi>,
        api as Arc<dyn PostingApi>,
        &config,
    );

    // Best-effort sync with the server's view of today's quota.
    workflow.refresh_rate_limit().await;

    match cli.command {
        Command::Single {
            topic,
            language,
            post,
        } => {
            workflow.set_topic(topic);
            workflow.set_language(language);
            workflow.generate().await.map_err(ThreadcastError::from)?;

            let draft = workflow
                .state()
                .single_draft()
                .ok_or_else(|| ThreadcastError::InvalidInput("no draft produced".to_string()))?;
            println!("{}", draft.text());
            println!("({} characters)", draft.char_count());

            if post {
                publish(&mut workflow).await?;
            }
        }
        Command::Thread {
            topic,
            parts,
            language,
            post,
        } => {
            workflow
                .set_mode(Mode::Thread)
                .map_err(ThreadcastError::from)?;
            workflow.set_topic(topic);
            workflow.set_language(language);
            workflow.set_thread_part_count(parts);
            workflow.generate().await.map_err(ThreadcastError::from)?;

            let buffer = workflow
                .state()
                .thread_draft()
                .ok_or_else(|| ThreadcastError::InvalidInput("no draft produced".to_string()))?;
            for (i, item) in buffer.items().iter().enumerate() {
                println!("{}/{}: {}", i + 1, buffer.size(), item.text());
            }

            if post {
                publish(&mut workflow).await?;
            }
        }
        Command::Quota => {
            println!("{} posts remaining today", workflow.remaining_quota());
        }
    }

    Ok(())
}

async fn publish(workflow: &mut Workflow) -> Result<()> {
    workflow.post().await.map_err(ThreadcastError::from)?;
    println!("Posted. {} posts remaining today.", workflow.remaining_quota());
    Ok(())
}
