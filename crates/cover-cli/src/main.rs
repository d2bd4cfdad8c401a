use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cover_core::units::{format_inches, format_millimeters, get_wrap_dimensions};
use cover_core::{
    Action, ExportOptions, SourceDecoder, create_default_document, export_pdf, load_document,
    save_document, save_pdf,
};
use cover_runtime::{EditorSession, SessionLogger};
use log::{Level, LevelFilter};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "covers", about = "Notebook cover layout tools", version)]
struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a document with the default front and back layout
    New {
        /// Output JSON file
        #[arg(short, long)]
        output: PathBuf,

        /// Spine width in inches
        #[arg(long, default_value = "0.125")]
        spine: f64,

        /// Enable bleed in the document settings
        #[arg(long)]
        bleed: bool,
    },

    /// Show dimensions, object counts and image resolution
    Info {
        /// Document JSON file
        document: PathBuf,
    },

    /// Apply actions from a JSON file (one action or an array) to a document
    Apply {
        /// Document JSON file
        document: PathBuf,

        /// Actions JSON file
        #[arg(short, long)]
        actions: PathBuf,

        /// Write the result here instead of over the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export the unfolded cover as a print-ready PDF
    Export {
        /// Document JSON file
        document: PathBuf,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,

        /// Export options JSON file (flags below override it)
        #[arg(long)]
        options: Option<PathBuf>,

        /// Include the document's bleed
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        bleed: Option<bool>,

        /// Draw fold lines at the spine
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        fold_lines: Option<bool>,

        /// Draw the safe area outline
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        safe_area: Option<bool>,

        /// Draw the centerline
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        centerline: Option<bool>,

        /// Resolution of the raster layer
        #[arg(long)]
        dpi: Option<f64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    SessionLogger::new(256)
        .with_level(level)
        .with_echo(if cli.verbose { Level::Debug } else { Level::Warn })
        .init()
        .context("Failed to install logger")?;

    match cli.command {
        Commands::New {
            output,
            spine,
            bleed,
        } => {
            let mut document = create_default_document();
            document.settings.spine_width = spine;
            document.settings.bleed_enabled = bleed;
            document.wrap_image.size.width = document.wrap_width();
            save_document(&document, &output).await?;
            println!("Created cover → {}", output.display());
        }

        Commands::Info { document } => {
            let path = document;
            let document = open(&path).await?;
            let session = EditorSession::new(document);
            let document = session.document();
            let settings = &document.settings;
            let stats = session.statistics();

            let wrap = get_wrap_dimensions(
                settings.spine_width,
                settings.bleed_enabled,
                settings.bleed_amount,
            );
            println!("Cover: {}", path.display());
            println!(
                "  Wrap: {} x {} ({} x {})",
                format_inches(wrap.width, 3),
                format_inches(wrap.height, 3),
                format_millimeters(wrap.width),
                format_millimeters(wrap.height)
            );
            println!("  Spine: {}", format_inches(settings.spine_width, 3));
            if settings.bleed_enabled {
                println!("  Bleed: {}", format_inches(settings.bleed_amount, 3));
            }
            println!("  Front objects: {}", stats.front_objects);
            println!("  Back objects: {}", stats.back_objects);
            if stats.hidden_objects > 0 {
                println!("  Hidden objects: {}", stats.hidden_objects);
            }
            for image in &stats.images {
                let name = match image.side {
                    Some(side) => format!("{} {}", side.name(), image.object_id),
                    None => "wrap image".to_string(),
                };
                println!(
                    "  Image {}: {:.0} DPI{}",
                    name,
                    image.dpi.min_dpi,
                    if image.adequate { "" } else { " (low resolution)" }
                );
            }
        }

        Commands::Apply {
            document,
            actions,
            output,
        } => {
            let mut session = EditorSession::new(open(&document).await?);
            let actions = read_actions(&actions).await?;

            let total = actions.len();
            let changed = actions
                .into_iter()
                .map(|action| session.dispatch(action))
                .filter(|changed| *changed)
                .count();

            let output = output.unwrap_or(document);
            save_document(session.document(), &output).await?;
            println!(
                "Applied {} of {} action(s) → {}",
                changed,
                total,
                output.display()
            );
        }

        Commands::Export {
            document,
            output,
            options,
            bleed,
            fold_lines,
            safe_area,
            centerline,
            dpi,
        } => {
            let document = open(&document).await?;
            let mut export_options = match options {
                Some(path) => ExportOptions::load(&path)
                    .await
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                None => ExportOptions::from_settings(&document.settings),
            };
            if let Some(bleed) = bleed {
                export_options.include_bleed = bleed;
            }
            if let Some(fold_lines) = fold_lines {
                export_options.include_fold_lines = fold_lines;
            }
            if let Some(safe_area) = safe_area {
                export_options.include_safe_area = safe_area;
            }
            if let Some(centerline) = centerline {
                export_options.include_centerline = centerline;
            }
            if let Some(dpi) = dpi {
                export_options.raster_dpi = dpi;
            }

            let artifact = export_pdf(&document, &export_options, &SourceDecoder).await?;
            let layout = artifact.layout;
            for src in &artifact.skipped_images {
                eprintln!("Skipped image: {}", abbreviate(src));
            }
            save_pdf(artifact.document, &output).await?;
            println!(
                "Exported {} x {} pt page → {}",
                layout.page_width_pt,
                layout.page_height_pt,
                output.display()
            );
        }
    }

    Ok(())
}

async fn open(path: &Path) -> Result<cover_core::Document> {
    load_document(path)
        .await
        .with_context(|| format!("Failed to load {}", path.display()))
}

async fn read_actions(path: &Path) -> Result<Vec<Action>> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_slice(&bytes)?;
    let actions = match value {
        serde_json::Value::Array(_) => serde_json::from_value(value)?,
        single => vec![serde_json::from_value(single)?],
    };
    Ok(actions)
}

/// Data URLs are long; show only their header
fn abbreviate(src: &str) -> &str {
    match src.split_once(',') {
        Some((header, _)) if src.starts_with("data:") => header,
        _ => src,
    }
}
