use crate::context::AppContext;
use crate::output::Output;
use color_eyre::Result;
use movieflix_core::{ControllerUpdate, SuggestSettings, SuggestionController};
use tokio::io::{AsyncBufReadExt, BufReader};

const PROMPT: &str = "search> ";
const HELP: &str = "Type to search. Commands: :pick N  :focus  :click  :clear  :help  :quit";

/// One line typed at the interactive prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PromptInput {
    /// New contents of the search box.
    Text(String),
    Focus,
    ClickOutside,
    /// 1-based index into the visible suggestions.
    Pick(usize),
    Clear,
    Help,
    Quit,
    Invalid(String),
}

fn parse_input(line: &str) -> PromptInput {
    let Some(command) = line.trim().strip_prefix(':') else {
        return PromptInput::Text(line.to_string());
    };

    let mut words = command.split_whitespace();
    match (words.next(), words.next()) {
        (Some("focus"), None) => PromptInput::Focus,
        (Some("click"), None) => PromptInput::ClickOutside,
        (Some("clear"), None) => PromptInput::Clear,
        (Some("help"), None) => PromptInput::Help,
        (Some("quit") | Some("q"), None) => PromptInput::Quit,
        (Some("pick"), Some(n)) => match n.parse::<usize>() {
            Ok(n) if n > 0 => PromptInput::Pick(n),
            _ => PromptInput::Invalid(format!("'{}' is not a suggestion number", n)),
        },
        _ => PromptInput::Invalid(format!("Unknown command ':{}'", command)),
    }
}

pub async fn run_suggest(ctx: &AppContext, output: &Output) -> Result<()> {
    let settings = SuggestSettings::from(&ctx.config.search);
    let mut controller = SuggestionController::new(ctx.backend.clone(), settings);
    let recommender = ctx.recommender();

    output.banner("Search");
    output.info(HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    output.prompt(PROMPT)?;
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };

                match parse_input(&line) {
                    PromptInput::Text(text) => controller.on_input(text),
                    PromptInput::Focus => controller.on_focus(),
                    PromptInput::ClickOutside => {
                        controller.on_click_outside();
                        output.dropdown(controller.dropdown());
                    }
                    PromptInput::Pick(n) => match controller.select(n - 1) {
                        Some(title) => {
                            output.banner(&format!("Because you searched for \"{}\"", title));
                            let spinner = output.spinner("Finding similar movies...");
                            let outcome = recommender.search_by_title(&title).await;
                            if let Some(spinner) = spinner {
                                spinner.finish_and_clear();
                            }
                            output.movies(&outcome.view);
                            if let Some(toast) = &outcome.toast {
                                output.toast(toast);
                            }
                        }
                        None => output.warn(format!("No suggestion number {}", n)),
                    },
                    PromptInput::Clear => {
                        controller.reset();
                        output.info("Search box cleared");
                    }
                    PromptInput::Help => output.info(HELP),
                    PromptInput::Quit => break,
                    PromptInput::Invalid(message) => output.warn(message),
                }
                output.prompt(PROMPT)?;
            }
            update = controller.step(), if controller.is_busy() => match update {
                ControllerUpdate::LookupIssued(query) => tracing::debug!(%query, "Suggestion lookup issued"),
                ControllerUpdate::Rendered(query) => {
                    tracing::debug!(%query, "Suggestions rendered");
                    output.dropdown(controller.dropdown());
                }
            },
        }
    }

    controller.hide();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_search_input() {
        assert_eq!(parse_input("ince"), PromptInput::Text("ince".to_string()));
        assert_eq!(parse_input("  the matrix "), PromptInput::Text("  the matrix ".to_string()));
        assert_eq!(parse_input(""), PromptInput::Text(String::new()));
    }

    #[test]
    fn test_commands() {
        assert_eq!(parse_input(":focus"), PromptInput::Focus);
        assert_eq!(parse_input(":click"), PromptInput::ClickOutside);
        assert_eq!(parse_input(":clear"), PromptInput::Clear);
        assert_eq!(parse_input(" :help "), PromptInput::Help);
        assert_eq!(parse_input(":q"), PromptInput::Quit);
        assert_eq!(parse_input(":quit"), PromptInput::Quit);
    }

    #[test]
    fn test_pick_is_one_based() {
        assert_eq!(parse_input(":pick 3"), PromptInput::Pick(3));
        assert!(matches!(parse_input(":pick 0"), PromptInput::Invalid(_)));
        assert!(matches!(parse_input(":pick x"), PromptInput::Invalid(_)));
        assert!(matches!(parse_input(":pick"), PromptInput::Invalid(_)));
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(parse_input(":nope"), PromptInput::Invalid("Unknown command ':nope'".to_string()));
    }
}
