use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use imgsearch_core::{Bm25Params, EngineConfig, QueryEngine, SearchMethod};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "imgsearch")]
#[command(about = "Build an in-memory index over image surrogates and query it", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CorpusArgs {
    /// Path to the metadata JSON store
    #[arg(long, default_value = "./images/metadata.json")]
    corpus: String,
    /// BM25 term frequency saturation
    #[arg(long, default_value_t = 1.5)]
    k1: f64,
    /// BM25 length normalization
    #[arg(long, default_value_t = 0.75)]
    b: f64,
    /// Print JSON instead of plain text
    #[arg(long, default_value_t = false)]
    json: bool,
}

impl CorpusArgs {
    fn open(&self) -> Result<QueryEngine> {
        let config = EngineConfig { bm25: Bm25Params { k1: self.k1, b: self.b } };
        Ok(QueryEngine::open(&self.corpus, config)?)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index and report corpus statistics
    Stats {
        #[command(flatten)]
        corpus: CorpusArgs,
    },
    /// List loaded documents in id order
    List {
        #[command(flatten)]
        corpus: CorpusArgs,
    },
    /// Rank the corpus against a free-text query
    Search {
        #[command(flatten)]
        corpus: CorpusArgs,
        /// Ranking method: vsm or bm25
        #[arg(long, default_value = "vsm")]
        method: String,
        /// Maximum number of results to print
        #[arg(long)]
        limit: Option<usize>,
        /// Query text
        query: Vec<String>,
    },
}

#[derive(Serialize)]
struct Stats<'a> {
    num_docs: usize,
    num_terms: usize,
    avg_doc_len: f64,
    empty_docs: usize,
    skipped: Vec<&'a str>,
}

#[derive(Serialize)]
struct SearchOutput<'a> {
    query: &'a str,
    method: SearchMethod,
    total_hits: usize,
    results: Vec<imgsearch_core::Hit<'a>>,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Stats { corpus } => stats(&corpus),
        Commands::List { corpus } => list(&corpus),
        Commands::Search { corpus, method, limit, query } => {
            // Parse the method before building the index
            let method: SearchMethod = method.parse()?;
            search(&corpus, method, &query.join(" "), limit)
        }
    }
}

fn stats(args: &CorpusArgs) -> Result<()> {
    let engine = args.open()?;
    let index = engine.index();
    let stats = Stats {
        num_docs: index.num_docs(),
        num_terms: index.num_terms(),
        avg_doc_len: index.avg_doc_len(),
        empty_docs: (0..index.num_docs() as u32).filter(|&id| index.doc_len(id) == 0).count(),
        skipped: engine.skipped().iter().map(|s| s.filename.as_str()).collect(),
    };
    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }
    println!("documents:   {}", stats.num_docs);
    println!("terms:       {}", stats.num_terms);
    println!("avg length:  {:.2}", stats.avg_doc_len);
    println!("empty docs:  {}", stats.empty_docs);
    println!("skipped:     {}", stats.skipped.len());
    for s in engine.skipped() {
        println!("  {}: {}", s.filename, s.error);
    }
    Ok(())
}

fn list(args: &CorpusArgs) -> Result<()> {
    let engine = args.open()?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(engine.all_documents())?);
        return Ok(());
    }
    for doc in engine.all_documents() {
        println!("{:>6}  {}  {}", doc.id, doc.filename, doc.caption);
    }
    Ok(())
}

fn search(args: &CorpusArgs, method: SearchMethod, query: &str, limit: Option<usize>) -> Result<()> {
    let engine = args.open()?;
    let mut results = engine.search(method, query);
    let total_hits = results.len();
    if let Some(limit) = limit {
        results.truncate(limit);
    }
    tracing::info!(query, %method, total_hits, "search complete");

    if args.json {
        let out = SearchOutput { query, method, total_hits, results };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }
    if results.is_empty() {
        println!("no results for {query:?}");
        return Ok(());
    }
    for (rank, hit) in results.iter().enumerate() {
        println!("{:>3}. {:.6}  {}  {}", rank + 1, hit.score, hit.document.filename, hit.document.caption);
    }
    Ok(())
}
