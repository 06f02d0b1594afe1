//! deckcode CLI: scan deck images, inspect codebooks, render test decks.

use clap::{Parser, Subcommand};
use deckcode::codebook::{Codebook, Codeword};
use deckcode::core::{canonical_order, decode_deck, encode_deck, is_complete, Card};
use deckcode::detect::{load_gray, save_rendered_deck, scan_image, trace_image_row};
use deckcode::print::PrintSpec;
use deckcode::scan::{ScanConfig, ScanReport};
use log::LevelFilter;
use std::path::{Path, PathBuf};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "deckcode")]
#[command(about = "Read the order of an edge-coded deck of cards from an image")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a cropped deck image and write a JSON report.
    Scan {
        /// Path to the input image.
        #[arg(long)]
        image: Option<PathBuf>,

        /// JSON scan config; command-line flags override its fields.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Tabulated codebook (JSON); the generated codebook is used otherwise.
        #[arg(long)]
        codebook: Option<PathBuf>,

        /// Grey level at or above which a pixel counts as paper.
        #[arg(long)]
        threshold: Option<u8>,

        /// Path to write the report (JSON).
        #[arg(long)]
        out: Option<PathBuf>,

        /// Score the deck against the canonical order.
        #[arg(long)]
        score: bool,

        /// Print the decode trace of one image row (JSON) to stdout.
        #[arg(long)]
        trace_row: Option<usize>,
    },

    /// Print the codebook, or write it as a JSON table.
    Codebook {
        #[arg(long)]
        codebook: Option<PathBuf>,

        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Look up the card printed with a codeword, e.g. "01 10 11 01".
    Lookup {
        codeword: String,

        #[arg(long)]
        codebook: Option<PathBuf>,
    },

    /// Render a synthetic deck image.
    Render {
        /// Output image path (PNG).
        #[arg(long)]
        out: PathBuf,

        #[arg(long)]
        codebook: Option<PathBuf>,

        /// Deck string giving the card order; the canonical order otherwise.
        #[arg(long)]
        cards: Option<String>,

        /// Only render cards whose codeword can be scanned back.
        #[arg(long)]
        printable_only: bool,

        #[arg(long, default_value_t = 6)]
        row_height: usize,

        #[arg(long, default_value_t = 15)]
        unit: usize,

        #[arg(long, default_value_t = 20)]
        spacer: usize,

        #[arg(long, default_value_t = 312)]
        width: usize,
    },

    /// Print the cards of a deck string, one per line.
    Deck {
        /// Deck string; the canonical order otherwise.
        data: Option<String>,
    },
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();

    #[cfg(feature = "tracing")]
    deckcode::core::init_tracing(false);
    #[cfg(not(feature = "tracing"))]
    deckcode::core::init_with_level(log_level(cli.verbose))?;

    match cli.command {
        Commands::Scan {
            image,
            config,
            codebook,
            threshold,
            out,
            score,
            trace_row,
        } => {
            let cfg = scan_config(image, config, codebook, threshold, out, score)?;
            run_scan(&cfg, trace_row)
        }
        Commands::Codebook { codebook, out } => run_codebook(codebook.as_deref(), out.as_deref()),
        Commands::Lookup { codeword, codebook } => run_lookup(&codeword, codebook.as_deref()),
        Commands::Render {
            out,
            codebook,
            cards,
            printable_only,
            row_height,
            unit,
            spacer,
            width,
        } => {
            let spec = PrintSpec {
                row_height,
                unit_px: unit,
                spacer_px: spacer,
                width,
            };
            run_render(
                &out,
                codebook.as_deref(),
                cards.as_deref(),
                printable_only,
                &spec,
            )
        }
        Commands::Deck { data } => run_deck(data.as_deref()),
    }
}

#[cfg_attr(feature = "tracing", allow(dead_code))]
fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn load_codebook(path: Option<&Path>) -> CliResult<Codebook> {
    Ok(match path {
        Some(path) => Codebook::load_json(path)?,
        None => Codebook::generate()?,
    })
}

fn scan_config(
    image: Option<PathBuf>,
    config: Option<PathBuf>,
    codebook: Option<PathBuf>,
    threshold: Option<u8>,
    out: Option<PathBuf>,
    score: bool,
) -> CliResult<ScanConfig> {
    let mut cfg = match (config, image.as_ref()) {
        (Some(path), _) => ScanConfig::load_json(path)?,
        (None, Some(image)) => ScanConfig::new(image.to_string_lossy()),
        (None, None) => return Err("either --image or --config is required".into()),
    };
    if let Some(image) = image {
        cfg.image_path = image.to_string_lossy().into_owned();
    }
    if let Some(codebook) = codebook {
        cfg.codebook_path = Some(codebook.to_string_lossy().into_owned());
    }
    if let Some(threshold) = threshold {
        cfg.threshold = threshold;
    }
    if let Some(out) = out {
        cfg.output_path = Some(out.to_string_lossy().into_owned());
    }
    cfg.score |= score;
    Ok(cfg)
}

fn run_scan(cfg: &ScanConfig, trace_row: Option<usize>) -> CliResult<()> {
    let scanner = cfg.build_scanner()?;
    let img = load_gray(&cfg.image_path)?;

    if let Some(y) = trace_row {
        let trace = trace_image_row(&img, cfg.threshold, &scanner, y)?;
        println!("{}", serde_json::to_string_pretty(&trace)?);
    }

    let scan = scan_image(&img, cfg.threshold, &scanner);
    let report = ScanReport::from_scan(&scan, cfg.score);
    let out_path = cfg.output_path();
    report.write_json(&out_path)?;

    log::info!(
        "decoded {}/{} rows, {} cards",
        report.decoded_rows,
        report.rows,
        scan.deck.len()
    );
    if let Some(score) = report.score {
        log::info!("score {score:.2}");
    }
    log::info!("report written to {}", out_path.display());
    println!("{}", report.data);
    Ok(())
}

fn run_codebook(codebook: Option<&Path>, out: Option<&Path>) -> CliResult<()> {
    let book = load_codebook(codebook)?;
    if let Some(out) = out {
        book.write_json(out)?;
        log::info!("codebook written to {}", out.display());
        return Ok(());
    }
    for (card, codeword) in book.entries() {
        let note = if codeword.is_printable() {
            ""
        } else {
            "  (not printable)"
        };
        println!("{:02}  {codeword}  {card}{note}", card.index());
    }
    Ok(())
}

fn run_lookup(codeword: &str, codebook: Option<&Path>) -> CliResult<()> {
    let book = load_codebook(codebook)?;
    let codeword: Codeword = codeword.parse()?;
    match book.lookup(codeword) {
        Some(card) => {
            println!("{card}");
            Ok(())
        }
        None => Err(format!("codeword {codeword} is not in the codebook").into()),
    }
}

fn run_render(
    out: &Path,
    codebook: Option<&Path>,
    cards: Option<&str>,
    printable_only: bool,
    spec: &PrintSpec,
) -> CliResult<()> {
    let book = load_codebook(codebook)?;
    let mut deck: Vec<Card> = match cards {
        Some(data) => decode_deck(data)?,
        None => canonical_order(),
    };
    if printable_only {
        deck.retain(|card| book.encode(*card).is_printable());
    }
    save_rendered_deck(&deck, &book, spec, out)?;
    log::info!("rendered {} cards to {}", deck.len(), out.display());
    println!("{}", encode_deck(&deck));
    Ok(())
}

fn run_deck(data: Option<&str>) -> CliResult<()> {
    let deck = match data {
        Some(data) => decode_deck(data)?,
        None => canonical_order(),
    };
    for card in &deck {
        println!("{:02}  {card}", card.index());
    }
    if !is_complete(&deck) {
        log::info!("{} cards, not a complete deck", deck.len());
    }
    Ok(())
}
