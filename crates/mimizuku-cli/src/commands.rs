//! CLI command definitions and handlers

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mimizuku_core::{Class, Individual, Iri};
use mimizuku_ofn::{parse_functional_syntax, to_functional_syntax};
use mimizuku_store::Ontology;
use mimizuku_subgraph::{ExtractedPath, ExtractionConfig, FilterResult, SubgraphExtractor, TraversalDirection};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Main CLI structure
#[derive(Parser, Debug)]
#[command(name = "mimizuku")]
#[command(about = "OWL2 ontology statistics and subgraph extraction")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Extraction settings as a JSON file; flags override it
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands. Every command reads a functional-syntax
/// ontology; IRIs may be given in full, as `<...>`, or as prefixed names
/// declared by the document.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show axiom and entity counts
    Stats {
        /// Ontology file (functional-style syntax)
        input: PathBuf,
    },

    /// Extract the neighborhood of an individual
    Neighborhood {
        input: PathBuf,

        /// Seed individual
        #[arg(short, long)]
        seed: String,

        /// Maximum number of hops (defaults to the configured depth)
        #[arg(short, long)]
        depth: Option<usize>,

        #[arg(long)]
        direction: Option<Direction>,

        /// Include superclasses of the reached individuals' classes
        #[arg(long)]
        superclasses: bool,

        /// Include subclasses of the reached individuals' classes
        #[arg(long)]
        subclasses: bool,

        /// Write the extracted subgraph to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Find the shortest path between two individuals
    Path {
        input: PathBuf,

        #[arg(long)]
        from: String,

        #[arg(long)]
        to: String,

        #[arg(long)]
        direction: Option<Direction>,

        /// Write the subgraph along the path to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Extract a subgraph from combined criteria
    Filter {
        input: PathBuf,

        /// Individual to keep (repeatable)
        #[arg(short, long = "individual")]
        individuals: Vec<String>,

        /// Keep instances of this class (repeatable)
        #[arg(short, long = "class")]
        classes: Vec<String>,

        /// Restrict to the neighborhood of this individual
        #[arg(short, long)]
        seed: Option<String>,

        #[arg(short, long)]
        depth: Option<usize>,

        #[arg(long)]
        direction: Option<Direction>,

        #[arg(long)]
        superclasses: bool,

        /// Also match instances of subclasses
        #[arg(long)]
        subclasses: bool,

        /// Keep a random sample of this many selected individuals
        #[arg(long)]
        sample: Option<usize>,

        #[arg(long, default_value = "0")]
        rng_seed: u64,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Extract a seeded random sample of individuals
    Sample {
        input: PathBuf,

        /// Number of individuals
        #[arg(short = 'n', long)]
        count: usize,

        #[arg(long, default_value = "0")]
        rng_seed: u64,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Output format options
#[derive(Clone, Debug, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    JsonPretty,
}

/// Edge direction followed by traversals
#[derive(Clone, Copy, Debug, PartialEq, clap::ValueEnum)]
pub enum Direction {
    Outgoing,
    Incoming,
    Both,
}

impl From<Direction> for TraversalDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Outgoing => TraversalDirection::Outgoing,
            Direction::Incoming => TraversalDirection::Incoming,
            Direction::Both => TraversalDirection::Both,
        }
    }
}

/// Command execution result
#[derive(Debug)]
pub struct CommandResult {
    pub success: bool,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

impl CommandResult {
    /// Render for stdout in the requested format.
    pub fn render(&self, format: &OutputFormat) -> Result<String> {
        let data = self
            .data
            .clone()
            .unwrap_or_else(|| serde_json::json!({ "message": self.message }));
        Ok(match format {
            OutputFormat::Text => self.message.clone(),
            OutputFormat::Json => serde_json::to_string(&data)?,
            OutputFormat::JsonPretty => serde_json::to_string_pretty(&data)?,
        })
    }
}

/// Execute CLI commands
#[derive(Debug, Default)]
pub struct CommandExecutor {
    config: ExtractionConfig,
}

impl CommandExecutor {
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Load the extraction config from `path`, or use the defaults.
    pub fn from_config_file(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                serde_json::from_str(&content)
                    .with_context(|| format!("invalid config {}", path.display()))?
            }
            None => ExtractionConfig::default(),
        };
        debug!(?config, "extraction config loaded");
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Execute a CLI command
    pub fn execute(&self, command: Commands) -> Result<CommandResult> {
        match command {
            Commands::Stats { input } => self.execute_stats(&input),
            Commands::Neighborhood {
                input,
                seed,
                depth,
                direction,
                superclasses,
                subclasses,
                output,
            } => self.execute_neighborhood(&input, &seed, depth, direction, superclasses, subclasses, output),
            Commands::Path {
                input,
                from,
                to,
                direction,
                output,
            } => self.execute_path(&input, &from, &to, direction, output),
            Commands::Filter {
                input,
                individuals,
                classes,
                seed,
                depth,
                direction,
                superclasses,
                subclasses,
                sample,
                rng_seed,
                output,
            } => {
                let ontology = load_ontology(&input)?;
                let extractor = self.extractor(&ontology, direction);
                let mut request = extractor
                    .request()
                    .with_superclasses(superclasses)
                    .with_subclasses(subclasses);
                if !individuals.is_empty() {
                    request = request.with_individuals(individuals.iter().map(|i| resolve_individual(&ontology, i)));
                }
                if !classes.is_empty() {
                    request = request.with_classes(classes.iter().map(|c| Class(resolve_iri(&ontology, c))));
                }
                if let Some(seed) = seed {
                    request = request.with_seed(resolve_individual(&ontology, &seed));
                }
                if let Some(depth) = depth {
                    request = request.with_max_depth(depth);
                }
                if let Some(n) = sample {
                    request = request.with_sample(n, rng_seed);
                }
                let result = request.execute()?;
                self.report(&result, output.as_deref())
            }
            Commands::Sample {
                input,
                count,
                rng_seed,
                output,
            } => {
                let ontology = load_ontology(&input)?;
                let result = self.extractor(&ontology, None).random_sample(count, rng_seed);
                self.report(&result, output.as_deref())
            }
        }
    }

    fn extractor<'a>(&self, ontology: &'a Ontology, direction: Option<Direction>) -> SubgraphExtractor<'a> {
        let mut config = self.config.clone();
        if let Some(direction) = direction {
            config = config.with_direction(direction.into());
        }
        SubgraphExtractor::with_config(ontology, config)
    }

    fn execute_stats(&self, input: &Path) -> Result<CommandResult> {
        let ontology = load_ontology(input)?;
        let stats = ontology.statistics();

        let mut lines = vec![
            format!("Ontology: {}", ontology.iri().map_or("(anonymous)", |iri| iri.full())),
            format!(
                "Axioms: {} ({} TBox, {} ABox)",
                stats.axiom_count, stats.tbox_axiom_count, stats.abox_axiom_count
            ),
            format!("Classes: {}", stats.class_count),
            format!("Object properties: {}", stats.object_property_count),
            format!("Data properties: {}", stats.data_property_count),
            format!("Annotation properties: {}", stats.annotation_property_count),
            format!("Datatypes: {}", stats.datatype_count),
            format!("Individuals: {}", stats.individual_count),
        ];
        if !stats.axioms_by_kind.is_empty() {
            lines.push("Axioms by kind:".to_string());
            lines.extend(stats.axioms_by_kind.iter().map(|(kind, n)| format!("  {}: {}", kind, n)));
        }

        Ok(CommandResult {
            success: true,
            message: lines.join("\n"),
            data: Some(serde_json::to_value(&stats)?),
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn execute_neighborhood(
        &self,
        input: &Path,
        seed: &str,
        depth: Option<usize>,
        direction: Option<Direction>,
        superclasses: bool,
        subclasses: bool,
        output: Option<PathBuf>,
    ) -> Result<CommandResult> {
        let ontology = load_ontology(input)?;
        let extractor = self.extractor(&ontology, direction);
        let seed = resolve_individual(&ontology, seed);
        let depth = depth.unwrap_or(extractor.config().default_depth);
        let result = extractor.extract_neighborhood(&seed, depth, superclasses, subclasses);
        self.report(&result, output.as_deref())
    }

    fn execute_path(
        &self,
        input: &Path,
        from: &str,
        to: &str,
        direction: Option<Direction>,
        output: Option<PathBuf>,
    ) -> Result<CommandResult> {
        let ontology = load_ontology(input)?;
        let extractor = self.extractor(&ontology, direction);
        let source = resolve_individual(&ontology, from);
        let target = resolve_individual(&ontology, to);
        let path = extractor.extract_path(&source, &target);

        if path.is_empty() {
            return Ok(CommandResult {
                success: false,
                message: format!("No path from {} to {}", from, to),
                data: Some(serde_json::to_value(&path)?),
            });
        }

        if let Some(output) = &output {
            write_ontology(output, &extractor.path_subgraph(&path).ontology)?;
        }
        let mut message = format!("Path ({} hops): {}", path.len(), render_path(&ontology, &path));
        if let Some(output) = &output {
            message.push_str(&format!("\nWritten to {}", output.display()));
        }
        Ok(CommandResult {
            success: true,
            message,
            data: Some(serde_json::to_value(&path)?),
        })
    }

    fn report(&self, result: &FilterResult, output: Option<&Path>) -> Result<CommandResult> {
        let mut message = format!(
            "Extracted {} of {} axioms: {} individuals, {} classes, {} edges",
            result.filtered_axiom_count,
            result.original_axiom_count,
            result.individual_count,
            result.class_count,
            result.edge_count
        );
        if let Some(output) = output {
            write_ontology(output, &result.ontology)?;
            message.push_str(&format!("\nWritten to {}", output.display()));
        }
        Ok(CommandResult {
            success: true,
            message,
            data: Some(serde_json::to_value(result.summary())?),
        })
    }
}

/// Read and parse a functional-syntax ontology file.
pub fn load_ontology(path: &Path) -> Result<Ontology> {
    let content = std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let ontology = parse_functional_syntax(&content).with_context(|| format!("failed to parse {}", path.display()))?;
    info!(path = %path.display(), axioms = ontology.axiom_count(), "ontology loaded");
    Ok(ontology)
}

fn write_ontology(path: &Path, ontology: &Ontology) -> Result<()> {
    let text = to_functional_syntax(ontology).with_context(|| format!("failed to serialize {}", path.display()))?;
    std::fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), axioms = ontology.axiom_count(), "subgraph written");
    Ok(())
}

/// `<full>` and plain full IRIs are taken as-is; anything else is tried as
/// a prefixed name of the loaded document first.
pub fn resolve_iri(ontology: &Ontology, raw: &str) -> Iri {
    if let Some(full) = raw.strip_prefix('<').and_then(|r| r.strip_suffix('>')) {
        return Iri::new(full);
    }
    ontology.prefixes().expand(raw).unwrap_or_else(|| Iri::new(raw))
}

pub fn resolve_individual(ontology: &Ontology, raw: &str) -> Individual {
    match raw.strip_prefix("_:") {
        Some(id) => Individual::anonymous(id),
        None => Individual::named(resolve_iri(ontology, raw)),
    }
}

fn short_name(ontology: &Ontology, individual: &Individual) -> String {
    match individual.iri() {
        Some(iri) => iri.abbreviate_with(ontology.prefixes()),
        None => individual.to_string(),
    }
}

/// `a -[p]-> b <-[q]- c`, arrows following the asserted edge direction.
fn render_path(ontology: &Ontology, path: &ExtractedPath) -> String {
    let mut out = String::new();
    for (i, node) in path.individuals.iter().enumerate() {
        if let Some(edge) = i.checked_sub(1).and_then(|j| path.edges.get(j)) {
            let property = edge.property.iri().abbreviate_with(ontology.prefixes());
            if &edge.target == node {
                out.push_str(&format!(" -[{}]-> ", property));
            } else {
                out.push_str(&format!(" <-[{}]- ", property));
            }
        }
        out.push_str(&short_name(ontology, node));
    }
    out
}
