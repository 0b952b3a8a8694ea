//! prompt-forge - enhance text and prompts from the command line

use std::collections::HashMap;
use std::io::Read;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use prompt_forge::app::{App, Theme};
use prompt_forge::config::{Config, ConfigOptions};
use prompt_forge::enhancer::{EnhancementResult, Intensity, PromptEnhancer};
use prompt_forge::store::FileStore;
use prompt_forge::style::example_inputs;
use prompt_forge::template::{extract_placeholders, render};
use prompt_forge::utils::data_dir::default_data_dir;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "prompt-forge")]
#[command(about = "Enhance text and AI prompts with styles, intensity levels and templates")]
struct Args {
    /// Directory for styles, templates, history and theme (default: ~/.prompt-forge)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Enhance text (argument, template, or stdin)
    Enhance(EnhanceArgs),

    /// Manage rewriting styles
    Styles {
        #[command(subcommand)]
        action: StyleAction,
    },

    /// Show quick-start example inputs for a style
    Examples {
        #[arg(long, default_value = "creative")]
        style: String,
    },

    /// Manage prompt templates
    Templates {
        #[command(subcommand)]
        action: TemplateAction,
    },

    /// Inspect or clear enhancement history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Show or change the theme preference
    Theme {
        #[arg(value_enum)]
        value: Option<ThemeArg>,
    },
}

#[derive(clap::Args, Debug)]
struct EnhanceArgs {
    /// Text to enhance; overrides a template's rendered text
    text: Option<String>,

    /// Style id
    #[arg(long, default_value = "creative")]
    style: String,

    /// Intensity level, 1 (subtle) to 5 (extreme)
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=5))]
    intensity: u8,

    /// Template id to render as the input
    #[arg(long)]
    template: Option<String>,

    /// Template variable, NAME=VALUE (repeatable)
    #[arg(long = "var", value_parser = parse_key_val)]
    vars: Vec<(String, String)>,

    /// Generation model
    #[arg(long)]
    model: Option<String>,

    /// Generation service base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout in seconds (no timeout by default)
    #[arg(long)]
    timeout: Option<u64>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum StyleAction {
    /// List predefined and custom styles
    List,
    /// Create a custom style
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        instruction: String,
    },
    /// Remove a custom style
    Remove { id: String },
}

#[derive(Subcommand, Debug)]
enum TemplateAction {
    /// List templates
    List,
    /// Create a template, or replace one when --id is given
    Save {
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        name: String,
        #[arg(long)]
        content: String,
    },
    /// Delete a template
    Delete { id: String },
    /// Show a template and its placeholders
    Show { id: String },
    /// Render a template with variable values
    Render {
        id: String,
        #[arg(long = "var", value_parser = parse_key_val)]
        vars: Vec<(String, String)>,
    },
}

#[derive(Subcommand, Debug)]
enum HistoryAction {
    /// List past enhancements, newest first
    List,
    /// Show one past enhancement
    Show { id: String },
    /// Remove all history
    Clear,
}

#[derive(ValueEnum, Debug, Copy, Clone)]
enum ThemeArg {
    Light,
    Dark,
    Toggle,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("invalid NAME=VALUE: no '=' found in '{}'", s))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries results
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let data_dir = args.data_dir.clone().unwrap_or_else(default_data_dir);
    let mut app = App::load(FileStore::new(&data_dir));

    match args.command {
        Command::Enhance(enhance) => run_enhance(&mut app, enhance, data_dir).await?,
        Command::Styles { action } => run_styles(&mut app, action)?,
        Command::Examples { style } => {
            for example in example_inputs(&style) {
                println!("{}", example);
            }
        }
        Command::Templates { action } => run_templates(&mut app, action)?,
        Command::History { action } => run_history(&mut app, action)?,
        Command::Theme { value } => {
            let theme = match value {
                None => app.state().theme,
                Some(ThemeArg::Toggle) => app.toggle_theme(),
                Some(ThemeArg::Light) => {
                    app.set_theme(Theme::Light);
                    Theme::Light
                }
                Some(ThemeArg::Dark) => {
                    app.set_theme(Theme::Dark);
                    Theme::Dark
                }
            };
            println!("{}", theme);
        }
    }

    Ok(())
}

async fn run_enhance(
    app: &mut App<FileStore>,
    args: EnhanceArgs,
    data_dir: PathBuf,
) -> Result<()> {
    if !app.select_style(&args.style) {
        return Err(anyhow!("unknown style '{}'", args.style));
    }
    app.set_intensity(Intensity::try_from(args.intensity)?);

    if let Some(template_id) = &args.template {
        if !app.select_template(template_id) {
            return Err(anyhow!("unknown template '{}'", template_id));
        }
        for (name, value) in &args.vars {
            app.set_variable(name, value);
        }
    }

    match args.text {
        Some(text) => app.edit_input(&text),
        None if args.template.is_none() => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read text from stdin")?;
            app.edit_input(&buf);
        }
        None => {}
    }

    if app.state().composer.text().trim().is_empty() {
        return Err(anyhow!("nothing to enhance: input is empty"));
    }

    let config = Config::from_env(ConfigOptions {
        base_url: args.base_url,
        model: args.model,
        request_timeout_secs: args.timeout,
        data_dir: Some(data_dir),
    })?;
    info!("Using model {} at {}", config.model, config.base_url);

    let enhancer = PromptEnhancer::new(config)?;
    match app.enhance(&enhancer).await {
        Ok(Some(result)) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_result(&result);
            }
            Ok(())
        }
        Ok(None) => Err(anyhow!("nothing to enhance: input is empty")),
        Err(e) => {
            error!("Enhancement failed: {:?}", e.kind());
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

fn run_styles(app: &mut App<FileStore>, action: StyleAction) -> Result<()> {
    match action {
        StyleAction::List => {
            for style in app.all_styles() {
                let marker = if style.is_custom { " (custom)" } else { "" };
                println!("{:<16} {}{}", style.id, style.name, marker);
            }
        }
        StyleAction::Add { name, instruction } => {
            let style = app.add_custom_style(&name, &instruction)?;
            println!("{}", style.id);
        }
        StyleAction::Remove { id } => {
            if !app.delete_custom_style(&id) {
                return Err(anyhow!("no custom style with id '{}'", id));
            }
        }
    }
    Ok(())
}

fn run_templates(app: &mut App<FileStore>, action: TemplateAction) -> Result<()> {
    match action {
        TemplateAction::List => {
            for template in &app.state().templates {
                println!("{:<20} {}", template.id, template.name);
            }
        }
        TemplateAction::Save { id, name, content } => match id {
            Some(id) => {
                app.save_template(prompt_forge::PromptTemplate {
                    id: id.clone(),
                    name: name.trim().to_string(),
                    content: content.trim().to_string(),
                })?;
                println!("{}", id);
            }
            None => {
                let template = app.create_template(&name, &content)?;
                println!("{}", template.id);
            }
        },
        TemplateAction::Delete { id } => {
            if !app.delete_template(&id) {
                return Err(anyhow!("no template with id '{}'", id));
            }
        }
        TemplateAction::Show { id } => {
            let template = app
                .template(&id)
                .ok_or_else(|| anyhow!("no template with id '{}'", id))?;
            println!("{}\n\n{}", template.name, template.content);
            let placeholders = extract_placeholders(&template.content);
            if !placeholders.is_empty() {
                println!("\nVariables: {}", placeholders.join(", "));
            }
        }
        TemplateAction::Render { id, vars } => {
            let template = app
                .template(&id)
                .ok_or_else(|| anyhow!("no template with id '{}'", id))?;
            let values: HashMap<String, String> = vars.into_iter().collect();
            println!("{}", render(&template.content, &values));
        }
    }
    Ok(())
}

fn run_history(app: &mut App<FileStore>, action: HistoryAction) -> Result<()> {
    match action {
        HistoryAction::List => {
            for item in app.state().history.iter() {
                let when = chrono::DateTime::from_timestamp_millis(item.timestamp)
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_default();
                println!(
                    "{:<15} {} [{}] {}",
                    item.id,
                    when,
                    item.style_name,
                    first_line(&item.result.original)
                );
            }
        }
        HistoryAction::Show { id } => {
            let item = app
                .restore_history_item(&id)
                .ok_or_else(|| anyhow!("no history item with id '{}'", id))?;
            println!("Style: {}\n", item.style_name);
            print_result(&item.result);
        }
        HistoryAction::Clear => app.clear_history(),
    }
    Ok(())
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("")
}

fn print_result(result: &EnhancementResult) {
    println!("=== Enhanced ===\n{}\n", result.enhanced);
    println!("=== Explanation ===\n{}\n", result.explanation);
    if !result.key_changes.is_empty() {
        println!("=== Key changes ===");
        for change in &result.key_changes {
            println!("- {}", change);
        }
        println!();
    }
    if !result.tips.is_empty() {
        println!("=== Tips ===");
        for tip in &result.tips {
            println!("- {}", tip);
        }
    }
}
