use clap::{ArgAction, Parser, Subcommand};
use commands::{browse, config, health, suggest, watchlist};
use movieflix_models::{FeedbackAction, UserId};
use std::path::PathBuf;

mod commands;
mod context;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "movieflix")]
#[command(about = "MovieFlix - movie recommendations, search and watchlist from your terminal")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Path to the config file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Act as this user for this invocation
    #[arg(long, global = true, value_name = "ID")]
    user: Option<UserId>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Session(SessionCommands),
    /// View or change configuration
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

/// Commands that talk to the backend.
#[derive(Subcommand)]
enum SessionCommands {
    /// Personalised recommendations for the current user
    Recommend,
    /// Find movies similar to a title
    Search {
        /// Movie title to search for
        title: Vec<String>,
    },
    /// Interactive search with live suggestions
    #[command(long_about = "Start an interactive search prompt. Every line you enter becomes the new contents of the search box and suggestions appear once you stop typing. Use :pick N to search for a suggestion, :focus to refresh suggestions, :click to close them, and :quit to leave.")]
    Suggest,
    /// Show details for one movie
    Movie {
        movie_id: u64,
    },
    /// Tell the recommender you liked a movie
    Like {
        movie_id: u64,
    },
    /// Tell the recommender you want fewer movies like this one
    Dislike {
        movie_id: u64,
    },
    /// Manage your watchlist
    Watchlist {
        #[command(subcommand)]
        cmd: WatchlistCommands,
    },
    /// Check that the backend is reachable
    Health,
}

#[derive(Subcommand)]
pub enum WatchlistCommands {
    /// Show the watchlist
    List,
    /// Add a movie to the watchlist
    Add {
        movie_id: u64,
        /// Title shown in the confirmation
        #[arg(long)]
        title: String,
        /// Poster URL
        #[arg(long)]
        poster: Option<String>,
    },
    /// Remove a movie from the watchlist
    Remove {
        movie_id: u64,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
    /// Set the backend base URL
    SetApi {
        url: String,
    },
    /// Set the default user
    SetUser {
        user_id: UserId,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config_path = context::config_path(cli.config);

    let command = match cli.command {
        // Config commands must work even when the file on disk is broken
        Commands::Config { cmd } => {
            let output = output::Output::new(cli.output, cli.quiet, Default::default());
            logging::init_logging(cli.verbose, cli.quiet, &Default::default())
                .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
            return config::run_config(cmd, &config_path, &output);
        }
        Commands::Session(command) => command,
    };

    let config = context::load_config(&config_path, cli.user)?;
    logging::init_logging(cli.verbose, cli.quiet, &config.logging).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet, config.ui.theme);
    let mut ctx = context::AppContext::new(config)?;

    match command {
        SessionCommands::Recommend => browse::run_recommend(&ctx, &output).await,
        SessionCommands::Search { title } => browse::run_search(&ctx, &title.join(" "), &output).await,
        SessionCommands::Suggest => suggest::run_suggest(&ctx, &output).await,
        SessionCommands::Movie { movie_id } => browse::run_movie(&ctx, movie_id, &output).await,
        SessionCommands::Like { movie_id } => browse::run_feedback(&ctx, movie_id, FeedbackAction::Like, &output).await,
        SessionCommands::Dislike { movie_id } => {
            browse::run_feedback(&ctx, movie_id, FeedbackAction::Dislike, &output).await
        }
        SessionCommands::Watchlist { cmd } => watchlist::run_watchlist(cmd, &mut ctx, &output).await,
        SessionCommands::Health => health::run_health(&ctx, &output).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("movieflix").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_config_commands_are_separate_from_session_commands() {
        assert!(matches!(parse(&["config", "show"]).command, Commands::Config { cmd: ConfigCommands::Show }));
        assert!(matches!(
            parse(&["config", "init", "--force"]).command,
            Commands::Config { cmd: ConfigCommands::Init { force: true } }
        ));
        assert!(matches!(parse(&["health"]).command, Commands::Session(SessionCommands::Health)));
        assert!(matches!(
            parse(&["like", "42"]).command,
            Commands::Session(SessionCommands::Like { movie_id: 42 })
        ));
    }

    #[test]
    fn test_search_title_words_and_global_flags() {
        let cli = parse(&["search", "the", "dark", "knight", "--user", "3", "-vv"]);
        assert_eq!(cli.user, Some(UserId(3)));
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Session(SessionCommands::Search { title }) => assert_eq!(title.join(" "), "the dark knight"),
            _ => panic!("expected search"),
        }
    }
}
