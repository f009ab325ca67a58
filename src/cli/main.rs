use structopt::*;
use anyhow::Context;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use keygraph::config::{self, ProviderConfig, ProviderKind};
use keygraph::embed::{EmbeddingSource, OpenAiEmbeddings, StoredEmbeddings};
use keygraph::pipeline::{self, Outcome};
use keygraph::{FileSink, SampleTable};

/// Embed words and project them onto their two principal directions, for plotting.
#[derive(StructOpt, Debug)]
struct KeyGraph {

    /// Log level (debug, info, warn, error)
    #[structopt(
        long,
        global = true,
        default_value = "info",
        possible_values = &["debug", "info", "warn", "error"]
    )]
    log_level : Level,

    #[structopt(subcommand)]
    cmd : Command

}

#[derive(StructOpt, Debug)]
enum Command {

    /// Embeds the informed words (or a built-in list) with the configured provider
    /// and writes their projection as a title,x,y table.
    Embed {
        words : Vec<String>,

        #[structopt(short, long, default_value = "embeddings.csv")]
        output : String,

        /// Embedding provider (azure or openai)
        #[structopt(short, long, default_value = "azure")]
        provider : ProviderKind,

        /// Embedding size requested from the provider
        #[structopt(short, long, default_value = "512")]
        dimensions : usize,

        /// Also save the raw embeddings as JSON, for later use with project
        #[structopt(short, long)]
        vectors : Option<String>
    },

    /// Projects embeddings previously saved with embed --vectors, without
    /// contacting any provider.
    Project {
        src : String,

        #[structopt(short, long, default_value = "embeddings.csv")]
        output : String
    }

}

fn init_logging(level : Level) {
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn report(outcome : Outcome, output : &str) {
    match outcome {
        Outcome::Written(_) => info!("Saved {}", output),
        Outcome::Empty => { }
    }
}

/// Embeds the words and assembles their table. The raw vectors are saved only
/// once every vector has the same length.
fn assemble_and_save<E>(words : &[String], source : &E, vectors : Option<&str>) -> anyhow::Result<SampleTable>
where
    E : EmbeddingSource + ?Sized
{
    let tbl = pipeline::assemble(words, source)?;
    if let Some(path) = vectors {
        StoredEmbeddings::from(&tbl).save(path)
            .with_context(|| format!("Unable to save embeddings to {}", path))?;
        info!("Saved {}", path);
    }
    Ok(tbl)
}

fn run_embed(words : Vec<String>, output : &str, kind : ProviderKind, dims : usize, vectors : Option<String>) -> anyhow::Result<()> {
    let words : Vec<String> = if words.is_empty() {
        config::DEFAULT_WORDS.iter().map(|w| w.to_string() ).collect()
    } else {
        words
    };
    let cfg = ProviderConfig::from_env(kind, dims)?;
    info!("Using {} embeddings ({} dimensions)", kind, cfg.dimensions);
    let client = OpenAiEmbeddings::new(cfg)?;
    let tbl = assemble_and_save(&words[..], &client, vectors.as_deref())?;
    let outcome = pipeline::run_table(&tbl, &mut FileSink::new(output))
        .with_context(|| format!("Unable to project embeddings into {}", output))?;
    report(outcome, output);
    Ok(())
}

fn run_project(src : &str, output : &str) -> anyhow::Result<()> {
    let stored = StoredEmbeddings::open(src)
        .with_context(|| format!("Unable to read embeddings from {}", src))?;
    let tbl = stored.into_table()
        .with_context(|| format!("Unable to assemble embeddings from {}", src))?;
    let outcome = pipeline::run_table(&tbl, &mut FileSink::new(output))
        .with_context(|| format!("Unable to project embeddings into {}", output))?;
    report(outcome, output);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = KeyGraph::from_args();
    init_logging(args.log_level);
    match args.cmd {
        Command::Embed { words, output, provider, dimensions, vectors } => {
            run_embed(words, &output, provider, dimensions, vectors)
        },
        Command::Project { src, output } => {
            run_project(&src, &output)
        }
    }
}
