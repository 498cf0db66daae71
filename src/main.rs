use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use markdown_model::Config;

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Rust debug output of the block tree
    Debug,
    /// JSON document model
    Json,
    /// The intermediate HTML the model is built from
    Html,
}

#[derive(Parser)]
#[command(name = "mdmodel")]
#[command(about = "Print the document model of a Markdown file")]
struct Cli {
    /// Input Markdown file, or `-` for stdin
    input: PathBuf,

    /// Config file (defaults to the bundled config)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Debug)]
    format: Format,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None => Config::compiled_default(),
    };

    // Read input
    let markdown = match read_input(&cli.input) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading {}: {}", cli.input.display(), e);
            std::process::exit(1);
        }
    };

    let rendered = match render(&markdown, &config, cli.format) {
        Ok(rendered) => rendered,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    match cli.output {
        Some(output) => {
            if let Err(e) = fs::write(&output, rendered) {
                eprintln!("Error writing {}: {}", output.display(), e);
                std::process::exit(1);
            }
            log::info!("Wrote {}", output.display());
        }
        None => println!("{}", rendered),
    }
}

fn read_input(path: &Path) -> io::Result<String> {
    if path == Path::new("-") {
        let mut content = String::new();
        io::stdin().read_to_string(&mut content)?;
        Ok(content)
    } else {
        fs::read_to_string(path)
    }
}

fn render(markdown: &str, config: &Config, format: Format) -> Result<String, String> {
    if let Format::Html = format {
        return Ok(markdown_model::markdown_to_html(markdown, &config.markdown));
    }

    let blocks = markdown_model::parse_with_config(markdown, config).map_err(|e| e.to_string())?;

    match format {
        Format::Json => serde_json::to_string_pretty(&blocks).map_err(|e| e.to_string()),
        _ => Ok(format!("{:#?}", blocks)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_format_prints_the_compiled_html() {
        let rendered = render("*a*\nb", &Config::default(), Format::Html).unwrap();

        assert_eq!(rendered, "<p><em>a</em> b</p>\n");
    }

    #[test]
    fn json_format_prints_the_block_tree() {
        let rendered = render("# Title", &Config::default(), Format::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value[0]["heading"]["level"], 1);
        assert_eq!(value[0]["heading"]["content"][0]["text"], "Title");
    }

    #[test]
    fn debug_format_prints_the_block_tree() {
        let rendered = render("---", &Config::default(), Format::Debug).unwrap();

        assert_eq!(rendered, "[\n    ThematicBreak,\n]");
    }
}
