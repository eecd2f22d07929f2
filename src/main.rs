use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::Parser;

#[derive(Parser)]
#[command(name = "txt")]
#[command(about = "Convert Markdown files to width-limited plain text")]
struct Cli {
    /// Input Markdown file (reads stdin when omitted or `-`)
    input: Option<PathBuf>,

    /// Output text file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Maximum line width, overriding the config file
    #[arg(short, long)]
    width: Option<usize>,

    /// Config file
    #[arg(short, long, default_value = "txt.toml")]
    config: PathBuf,
}

fn read_input(input: Option<&Path>) -> io::Result<String> {
    match input {
        Some(path) if path != Path::new("-") => fs::read_to_string(path),
        _ => {
            let mut content = String::new();
            io::stdin().read_to_string(&mut content)?;
            Ok(content)
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    // Read input
    let markdown = match read_input(cli.input.as_deref()) {
        Ok(content) => content,
        Err(e) => {
            let name = cli.input.as_deref().unwrap_or(Path::new("-"));
            eprintln!("Error reading {}: {}", name.display(), e);
            std::process::exit(1);
        }
    };

    let mut config = txt::Config::load(&cli.config);
    if let Some(width) = cli.width {
        config = config.with_max_width(width);
    }

    // Convert markdown to text
    let text = match txt::markdown_to_text_with_config(&markdown, &config) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    // Write text
    let written = match &cli.output {
        Some(output) => fs::write(output, text),
        None => io::stdout().lock().write_all(text.as_bytes()),
    };
    if let Err(e) = written {
        let name = cli.output.as_deref().unwrap_or(Path::new("-"));
        eprintln!("Error writing {}: {}", name.display(), e);
        std::process::exit(1);
    }
}
