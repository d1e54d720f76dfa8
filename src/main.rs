use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use pis::album::AlbumRecord;
use pis::config::Config;
use pis::style::{find_template, template_css_variables, StylePresetConfig};

/// PIS album delivery tools - style presets and watermark previews
#[derive(Parser, Debug)]
#[command(name = "pis")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file (defaults apply when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate the configuration file and exit
    CheckConfig,
    /// List the style preset registry
    Presets,
    /// Print the CSS filter for a preset
    Filter {
        /// Preset id, e.g. film-portrait
        preset: String,
    },
    /// Print the render state, filter and template variables of an album file
    Preview {
        /// Album record as JSON or YAML
        file: PathBuf,
    },
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::from_file(path)
            .map_err(|e| anyhow!(e))
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Config::default(),
    };
    config
        .validate()
        .map_err(|e| anyhow!("Invalid configuration: {}", e))?;
    Ok(config)
}

fn load_album(path: &Path) -> Result<AlbumRecord> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read album file {}", path.display()))?;

    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let album = if is_yaml {
        serde_yaml::from_str(&contents).context("Invalid album YAML")?
    } else {
        serde_json::from_str(&contents).context("Invalid album JSON")?
    };
    Ok(album)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    pis::logging::init_subscriber(&config.logging)
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    tracing::debug!(
        config_file = ?args.config,
        auth_enabled = config.auth.enabled,
        extra_presets = config.style_presets.len(),
        "Configuration loaded"
    );

    let registry = config.preset_registry();

    match args.command {
        Command::CheckConfig => {
            tracing::info!(
                presets = registry.len(),
                locales = ?config.gallery.locales,
                "Configuration is valid"
            );
            println!("Configuration OK");
        }
        Command::Presets => {
            println!("# preset registry v{}", registry.version());
            for preset in registry.presets() {
                println!(
                    "{:<22} {:<10} {}",
                    preset.id,
                    format!("{:?}", preset.category).to_lowercase(),
                    preset.filter()
                );
            }
        }
        Command::Filter { preset } => {
            println!("{}", registry.resolve(Some(&StylePresetConfig::new(preset))));
        }
        Command::Preview { file } => {
            let album = load_album(&file)?;
            let state = album.render_state(config.editor.default_margin);
            let filter = album.filter(&registry);
            let template = find_template(album.template_id.as_deref());

            let output = serde_json::json!({
                "title": album.title,
                "filter": filter,
                "render": state,
                "template": template.map(|t| {
                    serde_json::json!({
                        "id": t.id,
                        "variables": template_css_variables(t)
                            .into_iter()
                            .map(|(name, value)| (name, serde_json::Value::String(value)))
                            .collect::<serde_json::Map<_, _>>(),
                    })
                }),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
