use crate::output::{Output, OutputFormat};
use crate::ConfigCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use movieflix_config::Config;
use movieflix_models::UserId;
use std::path::Path;

pub fn run_config(cmd: ConfigCommands, path: &Path, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show_config(path, output),
        ConfigCommands::Init { force } => init_config(path, force, output),
        ConfigCommands::SetApi { url } => set_api(path, url, output),
        ConfigCommands::SetUser { user_id } => set_user(path, user_id, output),
    }
}

fn load(path: &Path) -> Result<Config> {
    Config::load_or_default(path).map_err(|e| eyre!("Failed to load config from {}: {}", path.display(), e))
}

fn save(config: &Config, path: &Path) -> Result<()> {
    config
        .validate()
        .map_err(|e| eyre!("Refusing to save invalid configuration: {}", e))?;
    config
        .save_to_file(path)
        .map_err(|e| eyre!("Failed to write config to {}: {}", path.display(), e))
}

fn show_config(path: &Path, output: &Output) -> Result<()> {
    let exists = path.exists();
    let mut config = load(path)?;
    config.apply_env_overrides().map_err(|e| eyre!("{}", e))?;

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }

            let mut table = Table::new();
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            table.set_header(vec![
                Cell::new("Setting").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Value").add_attribute(comfy_table::Attribute::Bold),
            ]);

            let file = if exists {
                path.display().to_string()
            } else {
                format!("{} (not created yet)", path.display())
            };
            table.add_row(vec![Cell::new("Config file"), Cell::new(file)]);
            table.add_row(vec![Cell::new("api.base_url"), Cell::new(&config.api.base_url)]);
            table.add_row(vec![
                Cell::new("api.timeout_secs"),
                Cell::new(config.api.timeout_secs.map(|t| t.to_string()).unwrap_or_else(|| "default".to_string())),
            ]);
            table.add_row(vec![Cell::new("session.user_id"), Cell::new(config.session.user_id)]);
            table.add_row(vec![Cell::new("search.debounce_ms"), Cell::new(config.search.debounce_ms)]);
            table.add_row(vec![Cell::new("search.min_query_len"), Cell::new(config.search.min_query_len)]);
            table.add_row(vec![Cell::new("ui.theme"), Cell::new(config.ui.theme.app_name())]);
            table.add_row(vec![Cell::new("logging.level"), Cell::new(&config.logging.level)]);
            table.add_row(vec![Cell::new("logging.json"), Cell::new(config.logging.json)]);
            if let Some(file) = &config.logging.file {
                table.add_row(vec![Cell::new("logging.file"), Cell::new(file.display())]);
            }
            println!("{}", table);

            if let Err(e) = config.validate() {
                output.warn(format!("Configuration is invalid: {}", e));
            }
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            let value = serde_json::to_value(&config).map_err(|e| eyre!("Failed to serialize config: {}", e))?;
            output.json(&value);
        }
    }
    Ok(())
}

fn init_config(path: &Path, force: bool, output: &Output) -> Result<()> {
    if path.exists() && !force {
        output.warn(format!("Config file already exists at {}", path.display()));
        output.info("Use --force to overwrite it with defaults.");
        return Ok(());
    }

    save(&Config::default(), path)?;
    output.success(format!("Wrote default configuration to {}", path.display()));
    Ok(())
}

fn set_api(path: &Path, url: String, output: &Output) -> Result<()> {
    let mut config = load(path)?;
    config.api.base_url = url.trim().to_string();
    save(&config, path)?;
    tracing::info!(base_url = %config.api.base_url, "Backend URL updated");
    output.success(format!("Backend set to {}", config.api_base()));
    Ok(())
}

fn set_user(path: &Path, user_id: UserId, output: &Output) -> Result<()> {
    let mut config = load(path)?;
    config.session.user_id = user_id;
    save(&config, path)?;
    output.success(format!("Default user set to {}", user_id));
    Ok(())
}
