#![warn(clippy::all, clippy::pedantic)]
use std::collections::BTreeMap;
use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};
use csv::Writer;
use serde::Serialize;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use ffstages::{Edge, FlowNetwork, FordFulkerson, RawEdge, Solution, StageKind};

/// Computes a maximum flow and records every residual graph, path and flow along the way.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// CSV file with `source,target,capacity` rows
    #[arg(short, long)]
    input: PathBuf,

    /// Label of the source node
    #[arg(short, long)]
    source: String,

    /// Label of the sink node
    #[arg(short = 't', long)]
    sink: String,

    /// Write every recorded stage to this CSV file
    #[arg(long)]
    stages: Option<PathBuf>,

    /// Write the final flow per edge to this CSV file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
enum Item {
    Residual,
    Path,
    Flow,
}

#[derive(Debug, Serialize)]
struct StageRecord<'a> {
    stage: usize,
    iteration: usize,
    kind: StageKind,
    item: Item,
    from: &'a str,
    to: &'a str,
    value: i64,
}

#[derive(Debug, Serialize)]
struct FlowRecord<'a> {
    source: &'a str,
    target: &'a str,
    capacity: i64,
    flow: i64,
}

/// Node labels interned to dense ids in first-seen order.
#[derive(Debug, Default)]
struct Labels {
    names: Vec<String>,
    ids: BTreeMap<String, usize>,
}

impl Labels {
    fn intern(&mut self, label: String) -> usize {
        if let Some(&id) = self.ids.get(&label) {
            return id;
        }
        let id = self.names.len();
        self.ids.insert(label.clone(), id);
        self.names.push(label);
        id
    }

    fn id(&self, label: &str) -> Result<usize, Box<dyn Error>> {
        self.ids
            .get(label)
            .copied()
            .ok_or_else(|| ffstages::Error::UnknownNode(label.to_string()).to_string().into())
    }

    fn name(&self, id: usize) -> &str {
        &self.names[id]
    }
}

fn read_edges_csv(path: &Path) -> Result<Vec<RawEdge<String, i64>>, Box<dyn Error>> {
    let mut rdr = csv::Reader::from_path(path)?;
    let rows: Result<Vec<_>, _> = rdr.deserialize().collect();
    Ok(rows?)
}

fn build_network(
    rows: Vec<RawEdge<String, i64>>,
) -> Result<(FlowNetwork<usize, i64>, Labels), Box<dyn Error>> {
    let mut labels = Labels::default();
    let mut network = FlowNetwork::new();
    for row in rows {
        let source = labels.intern(row.source);
        let target = labels.intern(row.target);
        let edge = Edge::new(source, target, row.capacity).map_err(|e| e.to_string())?;
        network.add_edge(edge).map_err(|e| e.to_string())?;
    }
    Ok((network, labels))
}

fn write_stages_csv(
    solution: &Solution<usize, i64>,
    labels: &Labels,
    path: &Path,
) -> Result<(), Box<dyn Error>> {
    let mut wtr = Writer::from_path(path)?;
    for (stage_idx, stage) in solution.stages().iter().enumerate() {
        let record = move |item, from: usize, to: usize, value| StageRecord {
            stage: stage_idx,
            iteration: stage.iteration(),
            kind: stage.kind(),
            item,
            from: labels.name(from),
            to: labels.name(to),
            value,
        };
        for (u, v, c) in stage.residual().edges() {
            wtr.serialize(record(Item::Residual, u, v, c))?;
        }
        for w in stage.path().windows(2) {
            let c = stage.residual().capacity(w[0], w[1]).unwrap_or_default();
            wtr.serialize(record(Item::Path, w[0], w[1], c))?;
        }
        for (u, v, f) in stage.flow().iter() {
            wtr.serialize(record(Item::Flow, u, v, f))?;
        }
    }
    wtr.flush()?;
    Ok(())
}

fn write_flow_csv(
    network: &FlowNetwork<usize, i64>,
    solution: &Solution<usize, i64>,
    labels: &Labels,
    path: &Path,
) -> Result<(), Box<dyn Error>> {
    let mut wtr = Writer::from_path(path)?;
    for (u, v, capacity) in network.edges() {
        wtr.serialize(FlowRecord {
            source: labels.name(u),
            target: labels.name(v),
            capacity,
            flow: solution.flow().get(u, v).unwrap_or_default(),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    let (network, labels) = build_network(read_edges_csv(&args.input)?)?;
    let source = labels.id(&args.source)?;
    let sink = labels.id(&args.sink)?;

    let mut solver = FordFulkerson::new();
    let solution = solver
        .solve(&network, source, sink)
        .map_err(|e| e.to_string())?;
    solver
        .check(&network, source, sink, &solution)
        .map_err(|e| e.to_string())?;

    if let Some(path) = &args.stages {
        write_stages_csv(&solution, &labels, path)?;
        log::info!("wrote {} stages to {}", solution.stages().len(), path.display());
    }
    if let Some(path) = &args.output {
        write_flow_csv(&network, &solution, &labels, path)?;
    }

    println!("{}", solution.value());
    Ok(())
}
