//! Interactive report: read a ticker, print the sentiment verdict and a few
//! sample posts.
//!
//! Every failure is printed as a single `Error: ...` line and the process
//! still exits 0.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::Result;
use log::debug;

use stocksentiment::config::{AppConfig, Config, CONFIG_FILE};
use stocksentiment::report::{render_error, write_report, PROMPT};
use stocksentiment::utils::{init_logging, normalize_symbol};
use stocksentiment::TrendPredictor;

fn read_symbol() -> Result<String> {
    print!("{}", PROMPT);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(normalize_symbol(&line))
}

async fn run(config: Result<Config>, symbol: &str) -> Result<()> {
    let config = config?;
    let predictor = TrendPredictor::from_config(&config)?;
    let mut out = io::stdout();
    let color = out.is_terminal();
    write_report(&mut out, &predictor, symbol, config.analysis.sample_limit, color).await?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = Config::load(CONFIG_FILE).map_err(anyhow::Error::from);
    let fallback = AppConfig::default();
    let app = config.as_ref().map(|c| &c.app).unwrap_or(&fallback);
    init_logging(&app.log_level);

    let outcome = match read_symbol() {
        | Ok(symbol) => {
            debug!("analysing {}", symbol);
            run(config, &symbol).await
        }
        | Err(e) => Err(e),
    };
    if let Err(e) = outcome {
        println!("{}", render_error(&e));
    }
    Ok(())
}
