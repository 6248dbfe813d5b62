//! Command relme retrieves all rel="me" links from a URL, and optionally
//! verifies that they also point back to the URL.

use anyhow::Result;
use clap::Parser;
use relme::{resolve_profile_url, Verifier};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "relme", version, about = "Retrieve rel=\"me\" links from a URL")]
struct Args {
    /// Profile URL to fetch (a bare domain is treated as https)
    url: String,

    /// Only print links that also link back to the profile
    #[arg(long)]
    verify: bool,
}

fn run(args: &Args) -> Result<Vec<String>> {
    let profile = resolve_profile_url(&args.url)?;
    let verifier = Verifier::new()?;

    let links = verifier.find_links(profile.as_str())?;
    if args.verify {
        return Ok(verifier.verify(profile.as_str(), &links)?);
    }

    Ok(links)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("RELME_LOG"))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(links) => {
            for link in links {
                println!("{link}");
            }
        }
        Err(err) => {
            eprintln!("relme error: {:#}", err);
            std::process::exit(1);
        }
    }
}
