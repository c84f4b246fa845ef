//! Computes the dominator tree of an edge-list dataset and prints one
//! `node: dominator` record per line.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use dominator_analyzer::checker::check_dominator_tree;
use dominator_analyzer::config::RunConfig;
use dominator_analyzer::dataset::{read_edge_list, write_dominator_tree};
use dominator_analyzer::{AdjacencyGraph, DominatorTree, RootStrategy};
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Edge-list dataset, one `from,to` pair per line
    #[arg(value_hint = clap::ValueHint::FilePath)]
    input: Option<PathBuf>,

    /// TOML run configuration; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Root node; picked by `--strategy` when absent
    #[arg(short, long)]
    root: Option<u64>,

    #[arg(long, value_enum)]
    strategy: Option<Strategy>,

    /// Fail if some node is unreachable from the root
    #[arg(long)]
    strict: bool,

    /// Check the result by brute force (slow on large graphs)
    #[arg(long)]
    verify: bool,

    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Strategy {
    Source,
    First,
}

impl From<Strategy> for RootStrategy {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Source => RootStrategy::Source,
            Strategy::First => RootStrategy::First,
        }
    }
}

impl Args {
    fn into_config(self) -> anyhow::Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::load(path)?,
            None => RunConfig::default(),
        };
        if self.input.is_some() {
            config.input = self.input;
        }
        if self.output.is_some() {
            config.output = self.output;
        }
        if self.root.is_some() {
            config.root = self.root;
        }
        if let Some(strategy) = self.strategy {
            config.root_strategy = strategy.into();
        }
        config.strict |= self.strict;
        config.verify |= self.verify;
        Ok(config)
    }
}

fn run(config: RunConfig) -> anyhow::Result<()> {
    let Some(input) = &config.input else {
        bail!("no input dataset given");
    };
    let graph: AdjacencyGraph<u64> = read_edge_list(input)?;

    let root = match config.root {
        Some(root) => root,
        None => config
            .root_strategy
            .select(&graph)
            .context("no root candidate in dataset; pass one with --root")?,
    };
    info!("computing dominators of {} nodes from root {root}", graph.node_count());

    let tree = if config.strict {
        DominatorTree::compute_total(&graph, root)?
    } else {
        DominatorTree::compute(&graph, root)?
    };

    if config.verify {
        let violations = check_dominator_tree(&graph, &tree);
        for violation in &violations {
            error!("{violation}");
        }
        if !violations.is_empty() {
            bail!("dominator tree failed {} check(s)", violations.len());
        }
        info!("dominator tree verified");
    }

    let mut writer: Box<dyn Write> = match &config.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("cannot create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };
    write_dominator_tree(&mut writer, &tree)?;
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    let filter = EnvFilter::from_default_env().add_directive(
        match args.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
        .into(),
    );
    tracing_subscriber::fmt()
        .without_time()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();

    match args.into_config().and_then(run) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
