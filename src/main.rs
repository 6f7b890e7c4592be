use clap::{Parser, Subcommand};
use slide_carousel::availability::AvailabilityCache;
use slide_carousel::config::{self, CarouselConfig};
use slide_carousel::fetch::{FetchError, Fetcher, FsFetcher, HttpFetcher};
use slide_carousel::resolve::{DiscoveryError, ImageResolver, resolver_from_config};
use slide_carousel::types::SlideDescriptor;
use slide_carousel::widgets::forms::{FormSubmitter, parse_field};
use slide_carousel::widgets::reviews::{Review, load_reviews};
use slide_carousel::{generate, inventory, output};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once; version_string runs a single time per process
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "slide-carousel")]
#[command(about = "Image carousel builder for small marketing sites")]
#[command(long_about = "\
Image carousel builder for small marketing sites

Slides are discovered from a site root, either a local directory or a
base URL, in one of two ways:

  manifest  assets/carousel.json lists { url, altText?, width?, height? }
  probe     assets/carousel/1.webp, 1.jpg, ... 20.png are tried in order;
            the first extension found per number wins

Site layout (defaults):

  site/
  ├── carousel.toml                # Config (optional)
  └── assets/
      ├── carousel.json            # Manifest mode
      └── carousel/
          ├── 1.webp               # Probe mode
          ├── 2.jpg
          └── 3.png

Run 'slide-carousel manifest assets/carousel' to write a manifest from a
directory of NNN-name images, and 'slide-carousel gen-config' for a
documented carousel.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Site root: a directory or an http(s) base URL
    #[arg(long, default_value = ".", global = true)]
    site: String,

    /// Directory holding carousel.toml (defaults to the site root when local)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Discover slides and list them
    Discover,
    /// Discover slides and write index.html plus the carousel stylesheet
    Build,
    /// Write a carousel.json manifest from a directory of images
    Manifest {
        /// Directory of images named NNN-name.ext
        dir: PathBuf,
        /// URL prefix for entries (defaults to the directory path)
        #[arg(long)]
        url_prefix: Option<String>,
        /// Manifest file to write
        #[arg(long, default_value = "carousel.json")]
        out: PathBuf,
    },
    /// Submit a form to the configured forms endpoint
    Submit {
        /// Form field as key=value (repeatable)
        #[arg(long = "field", value_name = "KEY=VALUE")]
        fields: Vec<String>,
    },
    /// Print a stock carousel.toml with all options documented
    GenConfig,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    match &cli.command {
        Command::Discover => {
            let config = load_config(&cli)?;
            let discovered = discover(site_fetcher(&cli.site)?, &config).await;
            output::print_discovery(config.discovery.mode, &discovered);
        }
        Command::Build => {
            let config = load_config(&cli)?;
            let fetcher = site_fetcher(&cli.site)?;
            println!("==> Discovering slides in {}", cli.site);
            let discovered = discover(fetcher.clone(), &config).await;
            output::print_discovery(config.discovery.mode, &discovered);
            let reviews = reviews_or_empty(fetcher.as_ref(), &config).await;

            println!("==> Generating HTML → {}", cli.output.display());
            let site = generate::generate(discovered, &reviews, &config, &cli.output)?;
            output::print_generate(&site, &cli.output);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Manifest {
            dir,
            url_prefix,
            out,
        } => {
            let prefix = url_prefix
                .clone()
                .unwrap_or_else(|| dir.to_string_lossy().replace('\\', "/"));
            let entries = inventory::write_manifest(dir, &prefix, out)?;
            output::print_manifest(&entries, out);
        }
        Command::Submit { fields } => {
            let config = load_config(&cli)?;
            let fields = fields
                .iter()
                .map(|f| parse_field(f))
                .collect::<Result<Vec<_>, _>>()?;
            let submitter = FormSubmitter::new(&config.forms)?;
            let message = submitter.submit(&fields).await?;
            output::print_submit(submitter.endpoint(), message.as_deref());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// `RUST_LOG` controls diagnostics; warnings only by default so command
/// output stays readable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn is_url(site: &str) -> bool {
    site.starts_with("http://") || site.starts_with("https://")
}

fn load_config(cli: &Cli) -> Result<CarouselConfig, config::ConfigError> {
    let dir = match &cli.config_dir {
        Some(dir) => dir.clone(),
        None if is_url(&cli.site) => PathBuf::from("."),
        None => PathBuf::from(&cli.site),
    };
    config::load_config(&dir)
}

/// Fetcher for the site root: HTTP for URLs, the filesystem otherwise.
fn site_fetcher(site: &str) -> Result<Arc<dyn Fetcher>, FetchError> {
    if is_url(site) {
        Ok(Arc::new(HttpFetcher::new(site)?))
    } else {
        Ok(Arc::new(FsFetcher::new(Path::new(site))))
    }
}

/// Run the configured resolver against the site. Discovery failures are
/// returned for the page to render.
async fn discover(
    fetcher: Arc<dyn Fetcher>,
    config: &CarouselConfig,
) -> Result<Vec<SlideDescriptor>, DiscoveryError> {
    resolver_from_config(&config.discovery, fetcher, AvailabilityCache::new())
        .resolve()
        .await
}

/// Reviews are decoration: a broken document is reported and skipped.
async fn reviews_or_empty(fetcher: &dyn Fetcher, config: &CarouselConfig) -> Vec<Review> {
    load_reviews(fetcher, &config.reviews.url)
        .await
        .unwrap_or_else(|e| {
            warn!(error = %e, "reviews skipped");
            Vec::new()
        })
}
