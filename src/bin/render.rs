use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use netflix_clone_rs::config::default_image_base_url;
use netflix_clone_rs::render::{App, HttpFetcher};

#[derive(Parser, Debug)]
#[command(name = "netflix-clone-render")]
#[command(about = "Fetch the movie list from a running backend and print the page", long_about = None)]
struct Args {
    #[arg(short, long, default_value = "http://localhost:4000")]
    backend: String,
    #[arg(short, long)]
    image_base: Option<String>,
    /// Print only the page body instead of a full HTML document.
    #[arg(long)]
    fragment: bool,
    /// Emit log lines as JSON.
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "netflix_clone_rs=info".into());

    // Logs go to stderr so the page on stdout stays clean.
    if args.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    let image_base = args.image_base.unwrap_or_else(default_image_base_url);
    let fetcher = HttpFetcher::new(&args.backend);

    let mut app = App::new(&image_base);
    app.mount(&fetcher).await;

    if args.fragment {
        println!("{}", app.render());
    } else {
        print!("{}", app.render_document());
    }
}
