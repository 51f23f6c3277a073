//! ebbe CLI - query and reshape nested JSON/YAML documents

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Read};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing::debug;

use ebbe::{
    grouped_by, indexed_into, indexed_strict, omit, partitioned_by, pick, EbbeError,
    FixSuggestion, Key, Node, Path, PathGetter, PathOptions, Precision, Resolved, TimerOptions,
};

#[derive(Parser)]
#[command(name = "ebbe")]
#[command(about = "ebbe - query and reshape nested JSON/YAML documents")]
#[command(version)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Report how long the command took (on stderr)
    #[arg(long, global = true)]
    time: bool,

    /// Finest unit shown by --time
    #[arg(long, global = true, default_value = "microseconds")]
    precision: Precision,

    /// Input format (inferred from the file extension when omitted)
    #[arg(long, value_enum, global = true)]
    format: Option<Format>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

impl Format {
    fn infer(file: &str) -> Self {
        if file.ends_with(".yaml") || file.ends_with(".yml") {
            Format::Yaml
        } else {
            Format::Json
        }
    }
}

/// Path flags shared by subcommands taking paths
#[derive(clap::Args)]
struct PathArgs {
    /// Path separator
    #[arg(short, long, default_value = ".")]
    split_char: char,

    /// Treat numeric segments as indices
    #[arg(short = 'i', long)]
    parse_indices: bool,

    /// Resolve segments against object attributes (YAML tagged mappings)
    #[arg(short, long)]
    attributes: bool,

    /// Skip key/index lookup entirely
    #[arg(long)]
    no_items: bool,
}

impl PathArgs {
    fn options(&self) -> PathOptions {
        PathOptions::new()
            .split_char(self.split_char)
            .parse_indices(self.parse_indices)
            .attributes(self.attributes)
            .items(!self.no_items)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve one or more paths
    Get {
        /// Document to read ("-" for stdin)
        file: String,

        /// Paths to resolve (e.g. a.b.0)
        #[arg(required = true)]
        paths: Vec<String>,

        #[command(flatten)]
        path: PathArgs,

        /// Value printed for unresolved paths (JSON, or a plain string)
        #[arg(short, long)]
        default: Option<String>,
    },

    /// Keep only the given top-level keys
    Pick {
        /// Document to read ("-" for stdin)
        file: String,

        #[arg(required = true)]
        keys: Vec<String>,

        /// Fail when a key is missing
        #[arg(long)]
        strict: bool,
    },

    /// Drop the given top-level keys
    Omit {
        /// Document to read ("-" for stdin)
        file: String,

        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// Group the items of a top-level list by the value at a path
    Group {
        /// Document to read ("-" for stdin)
        file: String,

        /// Path to the grouping key inside each item
        #[arg(long)]
        by: String,

        /// Print buckets in first-seen order, without keys
        #[arg(long)]
        partition: bool,

        #[command(flatten)]
        path: PathArgs,
    },

    /// Index the items of a top-level list by the value at a path
    Index {
        /// Document to read ("-" for stdin)
        file: String,

        /// Path to the index key inside each item
        #[arg(long)]
        by: String,

        /// Fail on duplicate keys instead of keeping the last item
        #[arg(long)]
        strict: bool,

        #[command(flatten)]
        path: PathArgs,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Get { .. } => "get",
            Commands::Pick { .. } => "pick",
            Commands::Omit { .. } => "omit",
            Commands::Group { .. } => "group",
            Commands::Index { .. } => "index",
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(suggestion) = e.fix_suggestion() {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), EbbeError> {
    let _timer = cli.time.then(|| {
        TimerOptions::named(cli.command.name())
            .precision(cli.precision)
            .start()
    });

    let output = match &cli.command {
        Commands::Get {
            file,
            paths,
            path,
            default,
        } => {
            let doc = load(file, cli.format)?;
            let default = match default {
                Some(raw) => Node::from_json_str(raw).unwrap_or_else(|_| Node::from(raw.as_str())),
                None => Node::Null,
            };
            let getter = PathGetter::new(paths.iter().map(String::as_str), path.options())?
                .with_default(default);

            let resolved = getter.get(&doc);
            match resolved {
                Resolved::One(value) => serde_json::to_value(value)?,
                Resolved::Many(values) => serde_json::to_value(values)?,
            }
        }

        Commands::Pick { file, keys, strict } => {
            let doc = load(file, cli.format)?;
            let map = root_map(&doc, "pick")?;
            let keys = map_keys(map, keys);
            let refs: Vec<&Key> = keys.iter().collect();
            let picked = pick(map, &refs, *strict)?;
            serde_json::to_value(Node::Map(picked))?
        }

        Commands::Omit { file, keys } => {
            let doc = load(file, cli.format)?;
            let map = root_map(&doc, "omit")?;
            let keys = map_keys(map, keys);
            let refs: Vec<&Key> = keys.iter().collect();
            let omitted = omit(map, &refs);
            serde_json::to_value(Node::Map(omitted))?
        }

        Commands::Group {
            file,
            by,
            partition,
            path,
        } => {
            let doc = load(file, cli.format)?;
            let items = root_list(&doc, "group")?;
            let options = path.options();
            let key_path = Path::parse(by.as_str(), &options)?;
            let key = |item: &&Node| render_key(key_path.resolve(*item, &options));

            if *partition {
                let buckets: Vec<Vec<&Node>> = partitioned_by(items, key);
                serde_json::to_value(buckets)?
            } else {
                let groups: rustc_hash::FxHashMap<String, Vec<&Node>> = grouped_by(items, key);
                let ordered: BTreeMap<String, Vec<&Node>> = groups.into_iter().collect();
                serde_json::to_value(ordered)?
            }
        }

        Commands::Index {
            file,
            by,
            strict,
            path,
        } => {
            let doc = load(file, cli.format)?;
            let items = root_list(&doc, "index")?;
            let options = path.options();
            let key_path = Path::parse(by.as_str(), &options)?;
            let key = |item: &&Node| render_key(key_path.resolve(*item, &options));

            let index: BTreeMap<String, &Node> = if *strict {
                indexed_strict(items, key)?.into_iter().collect()
            } else {
                indexed_into(items, key)
            };
            serde_json::to_value(index)?
        }
    };

    let rendered = serde_json::to_string_pretty(&output)?;
    println!("{rendered}");
    Ok(())
}

fn load(file: &str, format: Option<Format>) -> Result<Node, EbbeError> {
    let text = if file == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(file)?
    };

    let format = format.unwrap_or_else(|| Format::infer(file));
    debug!(file, ?format, bytes = text.len(), "loaded document");

    match format {
        Format::Json => Node::from_json_str(&text),
        Format::Yaml => Node::from_yaml_str(&text),
    }
}

fn root_map<'a>(doc: &'a Node, command: &str) -> Result<&'a BTreeMap<Key, Node>, EbbeError> {
    doc.as_map().ok_or_else(|| EbbeError::InvalidDocument {
        details: format!("{command} needs a mapping at the root, got {}", doc.type_name()),
    })
}

fn root_list<'a>(doc: &'a Node, command: &str) -> Result<&'a [Node], EbbeError> {
    doc.as_list().ok_or_else(|| EbbeError::InvalidDocument {
        details: format!("{command} needs a list at the root, got {}", doc.type_name()),
    })
}

/// CLI tokens are strings; fall back to an integer key when only that exists.
fn map_keys(map: &BTreeMap<Key, Node>, tokens: &[String]) -> Vec<Key> {
    tokens
        .iter()
        .map(|token| {
            let as_str = Key::Str(token.clone());
            match token.parse::<i64>() {
                Ok(n) if !map.contains_key(&as_str) && map.contains_key(&Key::Int(n)) => Key::Int(n),
                _ => as_str,
            }
        })
        .collect()
}

/// Group/index key for a resolved value: strings verbatim, the rest as JSON
fn render_key(value: Option<&Node>) -> String {
    match value {
        Some(Node::Str(s)) => s.clone(),
        Some(node) => serde_json::to_string(node).unwrap_or_else(|_| node.type_name().to_string()),
        None => "null".to_string(),
    }
}
