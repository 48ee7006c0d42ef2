use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use comptrace::{AnalyzerConfig, ComponentPathConfig, UsageAnalyzer};

#[derive(Parser)]
#[command(name = "comptrace")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Static component usage analyzer with Markdown, Mermaid and JSON output", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze components and generate documentation
    Analyze {
        /// Report title and artifact name prefix
        #[arg(short, long, default_value = "Component")]
        name: String,

        /// Component root, relative to the project root
        #[arg(short, long, default_value = "src/components")]
        target_path: String,

        /// Page root scanned for component usage
        #[arg(short, long, default_value = "src/pages")]
        pages_path: String,

        /// File extensions, first entry used for file-location guessing
        #[arg(short, long, default_values_t = vec![".tsx".to_string()])]
        extensions: Vec<String>,

        /// Import roots as `path=prefix` pairs (e.g. src/components=@/components)
        #[arg(short, long)]
        component_path: Vec<String>,

        /// Directory receiving the aggregate reports
        #[arg(short, long, default_value = "tools/usageAnalyzer")]
        output_dir: String,

        /// Filter applied to extracted export names
        #[arg(long, default_value = "^[A-Z]")]
        export_pattern: String,

        /// Skip writing per-component files next to the sources
        #[arg(long)]
        no_component_docs: bool,
    },
    /// Show version information
    Version,
}

fn parse_component_paths(pairs: &[String]) -> Result<Vec<ComponentPathConfig>> {
    let mut paths = Vec::new();
    for pair in pairs {
        let Some((path, prefix)) = pair.split_once('=') else {
            bail!("Invalid component path '{pair}', expected path=prefix");
        };
        paths.push(ComponentPathConfig::new(path, prefix));
    }
    Ok(paths)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Analyze {
            name,
            target_path,
            pages_path,
            extensions,
            component_path,
            output_dir,
            export_pattern,
            no_component_docs,
        }) => {
            let mut config = AnalyzerConfig {
                name,
                target_path,
                pages_path,
                file_extensions: extensions,
                output_dir,
                export_name_pattern: export_pattern,
                ..Default::default()
            };
            if !component_path.is_empty() {
                config.component_paths = parse_component_paths(&component_path)?;
            }

            let mut analyzer =
                UsageAnalyzer::new(config).context("Failed to construct analyzer")?;
            analyzer.run().context("Analysis failed")?;

            analyzer.generate_index()?;
            analyzer.generate_full_documentation()?;
            analyzer.generate_tree()?;
            analyzer.generate_json()?;
            if !no_component_docs {
                analyzer.generate_component_docs()?;
            }

            println!(
                "Analyzed {} components, reports written to {}",
                analyzer.usage().len(),
                analyzer.config().output_dir
            );
        }
        Some(Commands::Version) => {
            println!("comptrace v{}", env!("CARGO_PKG_VERSION"));
        }
        None => {
            println!("CompTrace - Static Component Usage Analyzer");
            println!("Run 'comptrace analyze' to generate documentation");
            println!("Run 'comptrace --help' for more information");
        }
    }

    Ok(())
}
