use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::chat::handle_chat;
use commands::map::handle_map;
use commands::ports::handle_ports;
use commands::say::handle_say;
use std::error::Error;
use std::path::PathBuf;
use text_to_mouth::{Config, ConsoleOpener, SerialOpener};

#[derive(Parser)]
#[command(name = "text-to-mouth")]
#[command(about = "Animate a mouth display from chatbot replies over a serial link")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Serial port of the mouth controller (e.g. COM4, /dev/ttyACM0)
    #[arg(short, long, global = true)]
    port: Option<String>,

    /// Baud rate, matching the controller's Serial.begin()
    #[arg(short, long, global = true)]
    baud: Option<u32>,

    /// Draw the mouth in the terminal instead of writing to a serial port
    #[arg(long, global = true)]
    simulate: bool,

    /// Config file (defaults to config.json in the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show debug diagnostics
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only show errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the assistant and animate every reply (default)
    Chat {
        /// Chat model to use (e.g. llama-3.1-8b-instant)
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Animate a single piece of text and exit
    Say {
        /// Text to animate
        #[arg(default_value = "Hello there! It is nice to meet you.")]
        text: String,
    },

    /// Print the shapes a text would send, without touching any hardware
    Map {
        /// Text to map
        text: String,

        /// Print as a JSON array
        #[arg(long)]
        json: bool,

        /// One shape per character, repeats and trailing close not applied
        #[arg(long)]
        raw: bool,
    },

    /// List available serial ports
    Ports {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

mod commands {
    pub mod chat;
    pub mod map;
    pub mod ports;
    pub mod say;
}
mod logger;

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    // GROQ_API_KEY and friends may live in a .env file; real env vars win
    dotenvy::dotenv().ok();
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(baud) = cli.baud {
        config.baud = baud;
    }
    if cli.simulate {
        // nothing to reset on a simulated face
        config.settle_ms = 0;
    }

    match cli.command.unwrap_or(Commands::Chat { model: None }) {
        Commands::Chat { model } => {
            if let Some(model) = model {
                config.model = model;
            }
            if cli.simulate {
                handle_chat(ConsoleOpener, &config)
            } else {
                handle_chat(SerialOpener, &config)
            }
        }
        Commands::Say { text } => {
            if cli.simulate {
                handle_say(ConsoleOpener, &config, &text)
            } else {
                handle_say(SerialOpener, &config, &text)
            }
        }
        Commands::Map { text, json, raw } => handle_map(&text, json, raw),
        Commands::Ports { json } => handle_ports(json),
    }
}

fn main() {
    let cli = Cli::parse();
    logger::init(cli.verbose, cli.quiet);

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
