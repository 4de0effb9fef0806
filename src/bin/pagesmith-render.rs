use pagesmith::export::export_page;
use pagesmith::{BuilderConfig, BuilderError, FileStore, Page, PageRepository, Registry};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Default)]
struct Args {
    config: Option<PathBuf>,
    store: Option<PathBuf>,
    user: Option<String>,
    page: Option<String>,
    files: Vec<String>,
}

fn usage() -> ! {
    eprintln!("Usage: pagesmith-render [--config builder.yaml] <page.json>...");
    eprintln!("       pagesmith-render [--config builder.yaml] --store <dir> [--user <name>] --page <id>");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  pagesmith-render home.json > home.html");
    eprintln!("  pagesmith-render --store ./data --user alice --page home");
    process::exit(1);
}

fn parse_args() -> Args {
    let mut args = Args::default();
    let mut it = env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--config" => args.config = Some(it.next().unwrap_or_else(|| usage()).into()),
            "--store" => args.store = Some(it.next().unwrap_or_else(|| usage()).into()),
            "--user" => args.user = Some(it.next().unwrap_or_else(|| usage())),
            "--page" => args.page = Some(it.next().unwrap_or_else(|| usage())),
            "-h" | "--help" => usage(),
            _ => args.files.push(arg),
        }
    }
    if args.files.is_empty() && args.page.is_none() {
        usage();
    }
    args
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args();
    let config = match &args.config {
        Some(path) => match BuilderConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("✗ {}", e);
                process::exit(1);
            }
        },
        None => BuilderConfig::default(),
    };
    let registry = Registry::builtin();

    let mut exit_code = 0;
    if let Some(page_id) = &args.page {
        match load_from_store(&args, &config, page_id).await {
            Ok(page) => render(&page, page_id, &registry, &config),
            Err(e) => {
                eprintln!("✗ {}: {}", page_id, e);
                exit_code = 1;
            }
        }
    }
    for file_path in &args.files {
        match load_file(Path::new(file_path)) {
            Ok(page) => render(&page, file_path, &registry, &config),
            Err(e) => {
                eprintln!("✗ {}: {}", file_path, e);
                exit_code = 1;
            }
        }
    }

    process::exit(exit_code);
}

async fn load_from_store(
    args: &Args,
    config: &BuilderConfig,
    page_id: &str,
) -> Result<Page, BuilderError> {
    let root = args.store.clone().unwrap_or_else(|| config.storage_root.clone());
    let user = args.user.clone().unwrap_or_else(|| config.user.clone());
    tracing::info!(root = %root.display(), user = %user, "opening file store");
    let repo = PageRepository::new(Arc::new(FileStore::new(root, user)), config);
    repo.get_page(page_id).await
}

fn load_file(path: &Path) -> Result<Page, BuilderError> {
    let content = fs::read_to_string(path)
        .map_err(|e| BuilderError::Config(format!("Failed to read file: {}", e)))?;
    Ok(serde_json::from_str(&content)?)
}

fn render(page: &Page, source: &str, registry: &Registry, config: &BuilderConfig) {
    let (html, notice) = export_page(page, registry, &config.export);
    if let Some(notice) = notice {
        eprintln!("! {}: {}", source, notice);
    }
    print!("{}", html);
}
