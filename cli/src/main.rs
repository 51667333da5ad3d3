//! Lexigraph CLI: build a vocabulary graph, inspect it, or serve it

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use lexigraph::embed::{EmbeddingClient, EmbeddingProvider, LLMProvider, PrecomputedEmbeddings};
use lexigraph::{AppConfig, AppState, FlashcardStore, GraphBuilder, GraphDocument, HttpServer, Vocabulary};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lexigraph", version, about = "Vocabulary graph builder and viewer")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true, env = "LEXIGRAPH_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Clone, clap::ValueEnum)]
enum ProviderArg {
    Openai,
    Ollama,
    Gemini,
    Azure,
}

impl From<ProviderArg> for LLMProvider {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Openai => LLMProvider::OpenAI,
            ProviderArg::Ollama => LLMProvider::Ollama,
            ProviderArg::Gemini => LLMProvider::Gemini,
            ProviderArg::Azure => LLMProvider::AzureOpenAI,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Build the graph document from a vocabulary file
    Generate {
        /// Vocabulary JSON: {"category": [{"term": ..., "details": ...}]}
        #[arg(long)]
        vocab: PathBuf,

        /// Where to write the graph document
        #[arg(long, default_value = "data.json")]
        output: PathBuf,

        /// Precomputed {term: vector} JSON instead of an embedding API
        #[arg(long, conflicts_with = "provider")]
        vectors: Option<PathBuf>,

        /// Embedding API to call
        #[arg(long)]
        provider: Option<ProviderArg>,

        /// Embedding model name
        #[arg(long)]
        model: Option<String>,

        /// API key for the embedding provider
        #[arg(long, env = "LEXIGRAPH_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Override the same-category similarity threshold
        #[arg(long)]
        similarity_threshold: Option<f64>,

        /// Override the hub similarity threshold
        #[arg(long)]
        hub_threshold: Option<f64>,
    },
    /// Serve a graph document, the flashcard API and the frontend
    Serve {
        #[arg(long)]
        data: Option<PathBuf>,

        #[arg(long)]
        flashcards: Option<PathBuf>,

        #[arg(long)]
        static_dir: Option<PathBuf>,

        #[arg(long)]
        address: Option<String>,

        #[arg(long, env = "LEXIGRAPH_PORT")]
        port: Option<u16>,
    },
    /// Summarize a graph document
    Stats {
        #[arg(long, default_value = "data.json")]
        data: PathBuf,

        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = AppConfig::load_or_default(cli.config.as_deref())
        .context("failed to load configuration")?;

    match cli.command {
        Commands::Generate {
            vocab,
            output,
            vectors,
            provider,
            model,
            api_key,
            similarity_threshold,
            hub_threshold,
        } => {
            if let Some(t) = similarity_threshold {
                config.graph.similarity_threshold = t;
            }
            if let Some(t) = hub_threshold {
                config.graph.hub_similarity_threshold = t;
            }
            if let Some(p) = provider {
                config.embedding.provider = p.into();
                config.embedding.vectors_path = None;
            }
            if let Some(m) = model {
                config.embedding.model = m;
            }
            if api_key.is_some() {
                config.embedding.api_key = api_key;
            }
            if vectors.is_some() {
                config.embedding.vectors_path = vectors;
            }
            run_generate(&config, &vocab, &output).await
        }
        Commands::Serve {
            data,
            flashcards,
            static_dir,
            address,
            port,
        } => {
            let server = &mut config.server;
            if let Some(d) = data {
                server.data_path = d;
            }
            if let Some(f) = flashcards {
                server.flashcards_path = f;
            }
            if static_dir.is_some() {
                server.static_dir = static_dir;
            }
            if let Some(a) = address {
                server.address = a;
            }
            if let Some(p) = port {
                server.port = p;
            }
            run_serve(&config).await
        }
        Commands::Stats { data, format } => run_stats(&data, &format),
    }
}

async fn run_generate(config: &AppConfig, vocab_path: &Path, output: &Path) -> Result<()> {
    let vocab = Vocabulary::from_path(vocab_path)
        .with_context(|| format!("failed to load vocabulary {:?}", vocab_path))?;

    let provider: Box<dyn EmbeddingProvider> = match &config.embedding.vectors_path {
        Some(path) => Box::new(
            PrecomputedEmbeddings::from_path(path)
                .with_context(|| format!("failed to load vectors {:?}", path))?,
        ),
        None => Box::new(EmbeddingClient::new(&config.embedding).context("invalid embedding configuration")?),
    };

    let builder = GraphBuilder::new(config.graph.clone())?;
    let document = builder.build(&vocab, provider.as_ref()).await?;

    document
        .save(output)
        .with_context(|| format!("failed to write {:?}", output))?;
    info!(
        "Generated {} nodes and {} edges into {:?}",
        document.node_count(),
        document.edge_count(),
        output
    );
    Ok(())
}

async fn run_serve(config: &AppConfig) -> Result<()> {
    let server = &config.server;
    let graph = GraphDocument::load(&server.data_path)
        .with_context(|| format!("failed to load graph document {:?}", server.data_path))?;
    let flashcards = FlashcardStore::open(&server.flashcards_path);

    let mut http = HttpServer::new(AppState::new(graph, flashcards), &server.address, server.port);
    if let Some(dir) = &server.static_dir {
        if dir.is_dir() {
            http = http.with_static_dir(dir);
        } else {
            info!("Static directory {:?} not found; serving the API only", dir);
        }
    }

    if let Err(e) = http.start().await {
        bail!("server error: {}", e);
    }
    Ok(())
}

fn run_stats(data: &Path, format: &OutputFormat) -> Result<()> {
    let document = GraphDocument::load(data)
        .with_context(|| format!("failed to load graph document {:?}", data))?;
    let stats = document.stats();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Category", "Nodes", "Edges", "Hub"]);

            for category in &stats.categories {
                table.add_row(vec![
                    category.category.to_string(),
                    category.nodes.to_string(),
                    category.edges.to_string(),
                    category.hub.clone().unwrap_or_else(|| "-".to_string()),
                ]);
            }

            println!("{}", table);
            println!("Nodes:                 {}", stats.node_count);
            println!("Edges:                 {}", stats.edge_count);
            println!("Cross-category edges:  {}", stats.cross_category_edges);
        }
    }

    Ok(())
}
