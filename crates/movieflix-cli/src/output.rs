use clap::ValueEnum;
use comfy_table::{Cell, Table};
use indicatif::{ProgressBar, ProgressStyle};
use movieflix_config::Theme;
use movieflix_core::{Dropdown, MoviesView, Toast, ToastKind, WatchlistView};
use movieflix_models::Movie;
use owo_colors::OwoColorize;
use serde_json::json;
use std::io::{self, IsTerminal, Write};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

pub struct Output {
    format: OutputFormat,
    quiet: bool,
    theme: Theme,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool, theme: Theme) -> Self {
        Self { format, quiet, theme }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    fn accent(&self, text: &str) -> String {
        match self.theme {
            Theme::Movieflix => text.red().bold().to_string(),
            Theme::Cinescope => text.purple().bold().to_string(),
        }
    }

    pub fn banner(&self, subtitle: &str) {
        if self.quiet || !self.is_human() {
            return;
        }
        println!("{} {}", self.accent(self.theme.app_name()), subtitle.dimmed());
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => {
                println!("{} {}", "✓".green(), msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({ "type": "success", "message": msg.as_ref() }));
            }
        }
    }

    pub fn error(&self, msg: impl AsRef<str>) {
        // Errors should always be shown, even in quiet mode
        match self.format {
            OutputFormat::Human => {
                eprintln!("{} {}", "✗".red(), msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({ "type": "error", "message": msg.as_ref() }));
            }
        }
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => {
                println!("{}", msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({ "type": "info", "message": msg.as_ref() }));
            }
        }
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => {
                println!("{} {}", "⚠".yellow(), msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({ "type": "warning", "message": msg.as_ref() }));
            }
        }
    }

    pub fn toast(&self, toast: &Toast) {
        match toast.kind {
            ToastKind::Success => self.success(&toast.message),
            ToastKind::Error => self.error(&toast.message),
        }
    }

    pub fn json(&self, data: &serde_json::Value) {
        if self.quiet && !self.is_human() {
            return;
        }

        self.print_json(data);
    }

    fn print_json(&self, data: &serde_json::Value) {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(data).unwrap_or_default());
            }
            OutputFormat::JsonPretty => {
                println!("{}", serde_json::to_string_pretty(data).unwrap_or_default());
            }
            OutputFormat::Human => {
                println!("{}", data);
            }
        }
    }

    pub fn prompt(&self, msg: impl AsRef<str>) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        print!("{}", msg.as_ref());
        io::stdout().flush()
    }

    /// Spinner for a pending request. Human mode on a terminal only.
    pub fn spinner(&self, msg: &str) -> Option<ProgressBar> {
        if self.quiet || !self.is_human() || !io::stderr().is_terminal() {
            return None;
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(msg.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        Some(spinner)
    }

    fn movie_table(&self, movies: &[Movie]) -> Table {
        let mut table = Table::new();
        table.load_preset(comfy_table::presets::UTF8_FULL);
        table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
        table.set_header(vec![
            Cell::new("ID").add_attribute(comfy_table::Attribute::Bold),
            Cell::new("Title").add_attribute(comfy_table::Attribute::Bold),
            Cell::new("Year").add_attribute(comfy_table::Attribute::Bold),
            Cell::new("Rating").add_attribute(comfy_table::Attribute::Bold),
            Cell::new("Genres").add_attribute(comfy_table::Attribute::Bold),
        ]);
        for movie in movies {
            table.add_row(vec![
                Cell::new(movie.id),
                Cell::new(&movie.title),
                Cell::new(movie.year.as_deref().unwrap_or("")),
                Cell::new(format!("⭐ {}", movie.rating_display())),
                Cell::new(movie.genres_display()),
            ]);
        }
        table
    }

    pub fn movies(&self, view: &MoviesView) {
        if !self.is_human() {
            self.json(&serde_json::to_value(view).unwrap_or_default());
            return;
        }
        if self.quiet {
            return;
        }

        match view {
            MoviesView::Movies(movies) => println!("{}", self.movie_table(movies)),
            MoviesView::NoResults => {
                println!("{}", "No similar movies found".bold());
                println!("{}", "Try searching for a different movie".dimmed());
            }
        }
    }

    pub fn watchlist(&self, view: &WatchlistView) {
        if !self.is_human() {
            self.json(&serde_json::to_value(view).unwrap_or_default());
            return;
        }
        if self.quiet {
            return;
        }

        match view {
            WatchlistView::Movies(movies) => println!("{}", self.movie_table(movies)),
            WatchlistView::Empty => {
                println!("{}", "Your watchlist is empty".bold());
                println!("{}", "Start adding movies to watch later".dimmed());
            }
        }
    }

    pub fn movie_details(&self, movie: &Movie) {
        if !self.is_human() {
            self.json(&serde_json::to_value(movie).unwrap_or_default());
            return;
        }
        if self.quiet {
            return;
        }

        println!("{}", self.accent(&movie.title));
        println!(
            "{}  {}  {}",
            format!("{}% Match", movie.match_percent()).green(),
            movie.year.as_deref().unwrap_or("N/A"),
            movie.runtime.as_deref().unwrap_or("N/A"),
        );
        println!();
        println!("{}", movie.description.as_deref().unwrap_or("No overview available."));
        println!();

        let mut table = Table::new();
        table.load_preset(comfy_table::presets::UTF8_FULL);
        table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
        table.add_row(vec![Cell::new("Genres"), Cell::new(movie.genres_display())]);
        table.add_row(vec![Cell::new("Rating"), Cell::new(format!("⭐ {}/5.0", movie.rating_display()))]);
        table.add_row(vec![
            Cell::new("Release Date"),
            Cell::new(movie.release_date.as_deref().unwrap_or("TBA")),
        ]);
        if let Some(cast) = &movie.cast {
            table.add_row(vec![Cell::new("Cast"), Cell::new(cast)]);
        }
        table.add_row(vec![Cell::new("Poster"), Cell::new(movie.poster_or_placeholder())]);
        if let Some(banner) = movie.banner_image() {
            table.add_row(vec![Cell::new("Banner"), Cell::new(banner)]);
        }
        println!("{}", table);
    }

    pub fn dropdown(&self, dropdown: &Dropdown) {
        if !self.is_human() {
            self.json(&serde_json::to_value(dropdown).unwrap_or_default());
            return;
        }
        if self.quiet {
            return;
        }

        match dropdown {
            Dropdown::Hidden => {}
            Dropdown::NoResults => println!("  {}", "No movies found".dimmed()),
            Dropdown::Suggestions(rows) => {
                for (i, row) in rows.iter().enumerate() {
                    let title = row.title.render(|matched| self.accent(matched));
                    match &row.year {
                        Some(year) => println!("  {:>2}. {} {}", i + 1, title, format!("({})", year).dimmed()),
                        None => println!("  {:>2}. {}", i + 1, title),
                    }
                }
            }
        }
    }
}
