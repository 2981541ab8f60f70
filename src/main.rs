use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use featurise::config::ClusterConfig;
use featurise::features::FeatureSet;
use featurise::pipeline::Featuriser;

#[derive(Parser, Debug)]
#[command(name = "featurise")]
#[command(about = "Featurise a labelled context stream for a downstream classifier")]
#[command(version)]
struct Args {
    /// Feature set to generate; repeatable, merged in the given order
    #[arg(short = 'f', long = "features", required = true, value_parser = FeatureSet::parse)]
    features: Vec<FeatureSet>,

    /// Cluster table configuration file
    #[arg(short, long, default_value = "configs/clusters.yaml")]
    config: PathBuf,

    /// Input file (defaults to stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = load_config(&args)?;
    let mut featuriser = Featuriser::new(args.features, config)?;

    let input: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("failed to open input {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };
    let mut output: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("failed to create output {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    featuriser.run(input, &mut output)?;
    output.flush()?;
    Ok(())
}

/// The config file is only required when a selected feature set references a
/// cluster table; `bow`/`comp` runs work without one.
fn load_config(args: &Args) -> Result<ClusterConfig> {
    if args.config.exists() {
        return ClusterConfig::from_yaml_file(&args.config);
    }
    if args.features.iter().any(FeatureSet::needs_clusters) {
        return Err(anyhow!(
            "cluster config {} not found, but the selected feature sets need cluster tables",
            args.config.display()
        ));
    }
    Ok(ClusterConfig::default())
}
