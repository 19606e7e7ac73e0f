//! Replay a load balancer event through a demo router.
//!
//! Reads one inbound event (file or stdin), serves it the way the function
//! runtime would, and prints the outbound payload.

use std::io::Read;
use std::path::PathBuf;

use clap::Parser;
use tower::ServiceExt;

use alb_lambda::config::{load_config, AdapterConfig};
use alb_lambda::handler::{handler_fn, wrap, Invocation};
use alb_lambda::http::{Request, ResponseWriter};
use alb_lambda::observability::logging::init_logging;
use alb_lambda::routing::Router;
use alb_lambda::Context;

#[derive(Parser)]
#[command(name = "alb-lambda")]
#[command(about = "Serve a load balancer event through the demo router", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Emit multiValueHeaders (overrides the config file).
    #[arg(long)]
    multi_value_headers: bool,

    /// Event file, `-` for stdin.
    #[arg(default_value = "-")]
    event: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AdapterConfig::default(),
    };
    if cli.multi_value_headers {
        config.response.multi_value_headers = true;
    }

    init_logging(&config.logging)?;

    tracing::info!(
        multi_value_headers = config.response.multi_value_headers,
        "Configuration loaded"
    );

    let raw = if cli.event == "-" {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf)?;
        buf
    } else {
        std::fs::read(&cli.event)?
    };
    let payload: serde_json::Value = serde_json::from_slice(&raw)?;

    let context = Context::background().with_request_id(uuid::Uuid::new_v4().to_string());
    let adapter = wrap(demo_router(), config.response);

    let response = adapter.oneshot(Invocation::new(context, payload)).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

const LINKS: &str =
    r#"<a href="/">Home</a><br/><a href="/products">Products</a><br/><a href="/articles">Articles</a><br/>"#;

fn page(title: &'static str) -> impl alb_lambda::Handler {
    handler_fn(move |w: &mut dyn ResponseWriter, _req: Request| {
        w.write_body(format!("<h1>{title}</h1>{LINKS}").as_bytes());
    })
}

fn demo_router() -> Router {
    Router::new()
        .path("/", page("Home"))
        .path("/products", page("Products"))
        .path("/articles", page("Articles"))
}
