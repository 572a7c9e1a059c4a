use anyhow::{bail, Context, Result};
use clap::Parser;
use console::style;
use dialoguer::{Input, Password};
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use recipe_assistant::render::{recipe_details, render_message, results_block};
use recipe_assistant::{Config, Conversation, Message, RecipeAssistant};

#[derive(Parser)]
#[command(name = "recipe-assistant")]
#[command(about = "Chat about food; recipe questions are answered with a live recipe search")]
#[command(version)]
struct Cli {
    /// Chat model to use
    #[arg(long, env = "RECIPE_ASSISTANT_MODEL")]
    model: Option<String>,

    /// Return the raw search results without asking the model to summarise them
    #[arg(long)]
    no_narrate: bool,
}

/// What the user typed at the prompt.
enum Command {
    Quit,
    History,
    Recipe(String),
    Ask(String),
}

impl Command {
    fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        Some(match line {
            "/quit" | "/exit" | "quit" | "exit" => Command::Quit,
            "/history" => Command::History,
            _ => match line.strip_prefix("/recipe") {
                Some(id) => Command::Recipe(id.trim().to_string()),
                None => Command::Ask(line.to_string()),
            },
        })
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = run().await {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

async fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("recipe_assistant=info".parse()?)
                .add_directive("spoonacular_client=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(model) = cli.model {
        config.model = model;
    }
    if cli.no_narrate {
        config.narrate_results = false;
    }
    let config = prompt_for_missing_keys(config)?;
    config.log_redacted();

    let assistant = RecipeAssistant::from_config(&config)?;

    println!("{}", style("🍳 AI Recipe Assistant").bold());
    println!("I'm here to help with recipes, cooking tips, and food-related queries!");
    println!(
        "{}",
        style("Commands: /history, /recipe <id>, /quit").dim()
    );

    chat_loop(&assistant).await
}

/// Prompt for whichever API key the environment did not provide.
fn prompt_for_missing_keys(config: Config) -> Result<Config> {
    if config.has_keys() {
        return Ok(config);
    }
    if !console::user_attended() {
        config.validate()?;
    }

    let mistral = match config.mistral_api_key.clone() {
        Some(key) if !key.trim().is_empty() => key,
        _ => Password::new()
            .with_prompt("Mistral API Key")
            .interact()
            .context("Failed to read Mistral API key")?,
    };
    let spoonacular = match config.spoonacular_api_key.clone() {
        Some(key) if !key.trim().is_empty() => key,
        _ => Password::new()
            .with_prompt("Spoonacular API Key")
            .interact()
            .context("Failed to read Spoonacular API key")?,
    };

    let config = config.with_keys(mistral, spoonacular);
    config.validate()?;
    Ok(config)
}

async fn chat_loop(assistant: &RecipeAssistant) -> Result<()> {
    let mut conversation = Conversation::new();

    loop {
        let line = match Input::<String>::new()
            .with_prompt("Ask me about food or recipes!")
            .allow_empty(true)
            .interact_text()
        {
            Ok(line) => line,
            Err(e) => {
                info!(error = %e, "Input closed, ending session");
                break;
            }
        };

        match Command::parse(&line) {
            None => continue,
            Some(Command::Quit) => break,
            Some(Command::History) => {
                if conversation.is_empty() {
                    println!("{}", style("No messages yet.").dim());
                }
                for message in conversation.messages() {
                    println!("{}\n", render_message(message));
                }
            }
            Some(Command::Recipe(id)) => {
                if let Err(e) = show_recipe(assistant, &id).await {
                    print_error(&e);
                }
            }
            Some(Command::Ask(message)) => {
                conversation.push_user(&message);

                match assistant.process_message(&message).await {
                    Ok(reply) => {
                        println!("\n{} {}", style("Assistant:").cyan().bold(), reply.text);
                        if let Some(block) = results_block(reply.results.as_ref()) {
                            println!("\n{block}");
                        } else if reply.is_recipe && reply.results.is_some() {
                            println!("\n{}", style("No recipes matched.").dim());
                        }
                        println!();

                        if let Some(ref criteria) = reply.search {
                            conversation.push(Message::tool(serde_json::to_string(criteria)?));
                        }
                        conversation.push_assistant(reply.text, reply.results);
                    }
                    Err(e) => print_error(&e),
                }
            }
        }
    }

    println!("Goodbye!");
    Ok(())
}

async fn show_recipe(assistant: &RecipeAssistant, id: &str) -> Result<()> {
    let Ok(recipe_id) = id.parse::<u64>() else {
        bail!("Usage: /recipe <numeric id>");
    };

    let detail = assistant.get_recipe_details(recipe_id).await?;
    println!("\n{}\n", recipe_details(&detail));
    Ok(())
}

fn print_error(e: &anyhow::Error) {
    warn!(error = %format!("{e:#}"), "Turn failed");
    eprintln!("{} {:#}", style("An error occurred:").red(), e);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_parse() {
        assert!(Command::parse("   ").is_none());
        assert!(matches!(Command::parse("/quit"), Some(Command::Quit)));
        assert!(matches!(Command::parse("exit"), Some(Command::Quit)));
        assert!(matches!(Command::parse("/history"), Some(Command::History)));
        assert!(matches!(
            Command::parse("/recipe 716429"),
            Some(Command::Recipe(id)) if id == "716429"
        ));
        assert!(matches!(
            Command::parse(" chicken and rice "),
            Some(Command::Ask(m)) if m == "chicken and rice"
        ));
    }
}
