use orrery::{Layout, LayoutConfig, TopicEdge, TopicNode};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Layout(orrery::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Layout(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<orrery::Error> for CliError {
    fn from(value: orrery::Error) -> Self {
        Self::Layout(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Layout,
    Place,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    version: bool,
    input: Option<String>,
    pretty: bool,
    with_meta: bool,
    seed: Option<u64>,
    max_iterations: Option<usize>,
    out: Option<String>,
}

/// `{ nodes, edges, root, config? }` as accepted on the command line.
#[derive(Debug, Deserialize)]
struct Request {
    nodes: Vec<TopicNode>,
    #[serde(default)]
    edges: Vec<TopicEdge>,
    root: String,
    #[serde(default)]
    config: LayoutConfig,
}

fn usage() -> &'static str {
    "orrery-cli\n\
\n\
USAGE:\n\
  orrery-cli [layout] [--pretty] [--meta] [--seed <n>] [--max-iterations <n>] [--out <path>] [<path>|-]\n\
  orrery-cli place [--pretty] [--meta] [--seed <n>] [--out <path>] [<path>|-]\n\
  orrery-cli --version\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', the request is read from stdin.\n\
  - The request is JSON: { \"nodes\": [...], \"edges\": [...], \"root\": \"...\", \"config\": {...} }.\n\
  - layout prints node positions by default; --meta prints warnings and run statistics too.\n\
  - place stops after the initial ring placement.\n\
  - Warnings are echoed to stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "--version" | "-V" => args.version = true,
            "layout" => args.command = Command::Layout,
            "place" => args.command = Command::Place,
            "--pretty" => args.pretty = true,
            "--meta" => args.with_meta = true,
            "--seed" => {
                let Some(seed) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.seed = Some(seed.parse::<u64>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--max-iterations" => {
                let Some(n) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.max_iterations =
                    Some(n.parse::<usize>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool, out: Option<&str>) -> Result<(), CliError> {
    let mut text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    text.push('\n');
    match out {
        None => std::io::stdout().lock().write_all(text.as_bytes())?,
        Some(path) => std::fs::write(path, text)?,
    }
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    if args.version {
        println!("orrery-cli {}", orrery::VERSION);
        return Ok(());
    }

    let text = read_input(args.input.as_deref())?;
    let mut request: Request = serde_json::from_str(&text)?;
    if let Some(seed) = args.seed {
        request.config.random_seed = seed;
    }
    if let Some(n) = args.max_iterations {
        request.config.max_iterations = n;
    }

    let layout: Layout = match args.command {
        Command::Layout => orrery::compute_layout(
            &request.nodes,
            &request.edges,
            &request.root,
            request.config,
        )?,
        Command::Place => {
            orrery::place_only(&request.nodes, &request.edges, &request.root, request.config)?
        }
    };

    for warning in &layout.warnings {
        eprintln!("warning: {warning}");
    }

    if args.with_meta {
        write_json(&layout, args.pretty, args.out.as_deref())
    } else {
        write_json(&layout.positions, args.pretty, args.out.as_deref())
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
