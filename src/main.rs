use std::fs::File;
use std::io::{self, BufReader, Write};
use std::process::exit;

use clap::{Parser, ValueEnum};

use rust_polyhedra::facet_enum::enumerate_facets;
use rust_polyhedra::format::{read_polyhedron, write_representation, PolyFile, Representation};
use rust_polyhedra::polyhedron::{HRep, VRep};
use rust_polyhedra::reverse_search::{enumerate_vertices, EnumConfig};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Input file in lrs format; reads stdin when absent
    file: Option<String>,
    /// Conversion to run; defaults to the direction the input header implies
    #[arg(long, value_enum)]
    mode: Option<Mode>,
    /// DFS depth cap for vertex enumeration (0 = unlimited)
    #[arg(long, default_value_t = 0)]
    max_depth: usize,
    /// Label the run as integer input in the statistics
    #[arg(long)]
    integer_input: bool,
    /// Append the last visited cobasis as a trailing comment
    #[arg(long)]
    print_cobasis: bool,
    /// Reserved; accepted and ignored
    #[arg(long, default_value_t = 1)]
    threads: usize,
    /// Reserved; accepted and ignored
    #[arg(long)]
    seed: Option<u64>,
    /// Columns to eliminate before converting (not yet applied)
    #[arg(long)]
    eliminate: Option<String>,
    /// Columns to project onto before converting (not yet applied)
    #[arg(long)]
    project: Option<String>,
    /// Rows to treat as equalities by splitting (not yet applied)
    #[arg(long)]
    linearity: Option<String>,
    /// Remove redundant rows before converting (not yet applied)
    #[arg(long)]
    redund: bool,
    /// Reduce to a minimal representation first (not yet applied)
    #[arg(long)]
    minrep: bool,
    /// Report statistics as JSON on stdout after the result
    #[arg(long)]
    json: bool,
    #[arg(short, long)]
    verbose: bool,
}

/// ve converts halfspaces to generators, ch converts generators to
/// halfspaces.
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Mode {
    Ve,
    Ch,
}

fn main() {
    let cli = Cli::parse();

    if cli.eliminate.is_some()
        || cli.project.is_some()
        || cli.linearity.is_some()
        || cli.redund
        || cli.minrep
    {
        eprintln!("*transform options are accepted but not applied yet");
    }
    if cli.threads != 1 || cli.seed.is_some() {
        eprintln!("*threads and seed are reserved; running single-threaded");
    }

    let input = match read_input(cli.file.as_deref()) {
        Ok(input) => input,
        Err(err) => {
            eprintln!("{}", err);
            exit(1);
        }
    };

    let mode = match cli.mode {
        Some(mode) => mode,
        None => match input.representation {
            Representation::H => Mode::Ve,
            Representation::V => Mode::Ch,
        },
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = match mode {
        Mode::Ve => run_vertex_enumeration(&cli, input, &mut out),
        Mode::Ch => run_facet_enumeration(&cli, input, &mut out),
    };
    if let Err(err) = result {
        eprintln!("write failed: {}", err);
        exit(1);
    }
}

fn read_input(path: Option<&str>) -> Result<PolyFile, String> {
    match path {
        Some(path) => {
            let file = File::open(path).map_err(|err| format!("{}: {}", path, err))?;
            read_polyhedron(BufReader::new(file)).map_err(|err| format!("{}: {}", path, err))
        }
        None => {
            let stdin = io::stdin();
            let locked = stdin.lock();
            read_polyhedron(locked).map_err(|err| err.to_string())
        }
    }
}

fn run_vertex_enumeration<W: Write>(cli: &Cli, input: PolyFile, out: &mut W) -> io::Result<()> {
    let h = HRep::new(input.matrix);
    let conf = EnumConfig {
        max_depth: cli.max_depth,
        verbose: cli.verbose,
    };
    let result = enumerate_vertices(&h, &conf);
    write_representation(
        out,
        Representation::V,
        h.dim() + 1,
        &result.generators.to_rows(),
    )?;
    if let Some(failure) = result.failure {
        writeln!(out, "*{}", failure)?;
    }
    writeln!(
        out,
        "*Totals: vertices={} rays={} bases={} integer_vertices={}",
        result.stats.vertices, result.stats.rays, result.stats.bases, result.stats.integer_vertices
    )?;
    if cli.print_cobasis {
        if let Some(cobasis) = &result.stats.last_cobasis {
            let indices: Vec<String> = cobasis.iter().map(|i| i.to_string()).collect();
            writeln!(out, "*lastcobasis: {}", indices.join(" "))?;
        }
    }
    if cli.json {
        let mut object = serde_json::Map::new();
        object.insert(
            "stats".to_string(),
            serde_json::to_value(&result.stats).unwrap(),
        );
        object.insert(
            "integer_input".to_string(),
            serde_json::Value::Bool(input.integer_input || cli.integer_input),
        );
        writeln!(out, "{}", serde_json::to_string_pretty(&object).unwrap())?;
    }
    Ok(())
}

fn run_facet_enumeration<W: Write>(cli: &Cli, input: PolyFile, out: &mut W) -> io::Result<()> {
    let v = VRep::new(input.matrix);
    let result = enumerate_facets(&v);
    write_representation(
        out,
        Representation::H,
        v.dim() + 1,
        &result.halfspaces.to_rows(),
    )?;
    writeln!(
        out,
        "*Totals: facets={} bases={}",
        result.stats.facets, result.stats.bases
    )?;
    if cli.json {
        let mut object = serde_json::Map::new();
        object.insert(
            "stats".to_string(),
            serde_json::to_value(&result.stats).unwrap(),
        );
        writeln!(out, "{}", serde_json::to_string_pretty(&object).unwrap())?;
    }
    Ok(())
}
