// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// The entry point for all user interaction. Uses the `clap`
// crate to parse command line arguments; all work is delegated
// to Layer 2 (application).
//
// Commands:
//   1. `train`   — trains on a CSV and prints the evaluation
//   2. `predict` — loads a saved model and classifies one text
//   3. `menu`    — the interactive menu (also the default)
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;
pub mod menu;
pub mod render;

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};

use crate::application::session::ClassifierSession;
use crate::application::train_use_case::TrainConfig;
use crate::data::normalizer::Normalizer;
use crate::infra::artifacts::ArtifactStore;
use commands::{Commands, PredictArgs, TrainCommand};
use menu::Menu;

/// Clap reads the fields and generates the argument parser via the
/// Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "fake-news-detector",
    version,
    about = "Train a TF-IDF + passive-aggressive classifier to tell real news from fake."
)]
pub struct Cli {
    /// The subcommand to run; the interactive menu when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Route to the matching handler. This layer only routes and
    /// prints, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Some(Commands::Train(cmd))    => run_train(cmd),
            Some(Commands::Predict(args)) => run_predict(args),
            Some(Commands::Menu(args))    => run_menu(args.train.into()),
            None                          => run_menu(TrainConfig::default()),
        }
    }
}

fn run_train(cmd: TrainCommand) -> Result<()> {
    let config  = TrainConfig::from(cmd.train);
    let mut out = io::stdout().lock();

    let mut session = ClassifierSession::new(Normalizer::english());
    let report      = session.train(&config)?;
    render::train_report(&mut out, &report)?;

    if cmd.save {
        let store = config.artifact_store();
        session.save(&store).context("Saving the trained model failed")?;
        writeln!(
            out,
            "Saved to '{}' and '{}'.",
            store.model_path().display(),
            store.vectorizer_path().display()
        )?;
    }
    Ok(())
}

fn run_predict(args: PredictArgs) -> Result<()> {
    let store = ArtifactStore::new(&args.model_path, &args.vectorizer_path);

    let mut session = ClassifierSession::new(Normalizer::english());
    session
        .load(&store)
        .context("Loading the saved model failed")?;

    let prediction = session.predict(&args.text)?;
    render::prediction(&mut io::stdout().lock(), &prediction)?;
    Ok(())
}

fn run_menu(config: TrainConfig) -> Result<()> {
    tracing::info!("Starting interactive menu (dataset '{}')", config.data_path);
    let session = ClassifierSession::new(Normalizer::english());
    Menu::new(session, config, io::stdin().lock(), io::stdout()).run()
}
