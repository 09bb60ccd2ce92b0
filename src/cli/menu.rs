// ============================================================
// Layer 1 — Interactive Menu
// ============================================================
// A finite command dispatcher over one ClassifierSession:
//
//   1  Train a new model, then offer to save it
//   2  Load a saved model and classify the sample articles
//   3  Classify one text typed by the user
//   4  Exit
//
// Every failure inside an action is printed and the menu comes
// back. Only end of input or option 4 ends the loop. Reads from
// any BufRead and writes to any Write, so tests drive it with
// in-memory buffers.

use anyhow::Result;
use std::io::{BufRead, Write};

use crate::application::session::ClassifierSession;
use crate::application::train_use_case::TrainConfig;
use crate::cli::render;
use crate::infra::artifacts::ArtifactStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Train,
    LoadAndSample,
    Classify,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Train),
            "2" => Some(Self::LoadAndSample),
            "3" => Some(Self::Classify),
            "4" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Whether the loop keeps going after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

pub struct Menu<'r, R, W> {
    session: ClassifierSession<'r>,
    config:  TrainConfig,
    store:   ArtifactStore,
    input:   R,
    output:  W,
}

impl<'r, R: BufRead, W: Write> Menu<'r, R, W> {
    pub fn new(session: ClassifierSession<'r>, config: TrainConfig, input: R, output: W) -> Self {
        let store = config.artifact_store();
        Self { session, config, store, input, output }
    }

    pub fn session(&self) -> &ClassifierSession<'r> {
        &self.session
    }

    /// Run until the user exits or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.print_options()?;
            let Some(line) = self.read_line()? else {
                writeln!(self.output)?;
                break;
            };
            let Some(choice) = MenuChoice::parse(&line) else {
                writeln!(self.output, "Invalid choice '{}'. Enter 1-4.", line.trim())?;
                continue;
            };
            if self.dispatch(choice)? == Flow::Exit {
                break;
            }
        }
        writeln!(self.output, "Goodbye.")?;
        Ok(())
    }

    fn print_options(&mut self) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "=== Fake News Detector ===")?;
        writeln!(self.output, "1. Train new model")?;
        writeln!(self.output, "2. Load saved model and run sample predictions")?;
        writeln!(self.output, "3. Classify a news text")?;
        writeln!(self.output, "4. Exit")?;
        self.prompt("Choice: ")
    }

    fn prompt(&mut self, text: &str) -> Result<()> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        Ok(())
    }

    /// One line without its terminator, or None at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn dispatch(&mut self, choice: MenuChoice) -> Result<Flow> {
        match choice {
            MenuChoice::Train => self.train(),
            MenuChoice::LoadAndSample => self.load_and_sample(),
            MenuChoice::Classify => self.classify(),
            MenuChoice::Exit => Ok(Flow::Exit),
        }
    }

    fn train(&mut self) -> Result<Flow> {
        let report = match self.session.train(&self.config) {
            Ok(report) => report,
            Err(e) => {
                writeln!(self.output, "Training failed: {e:#}")?;
                return Ok(Flow::Continue);
            }
        };
        render::train_report(&mut self.output, &report)?;

        self.prompt("Save model? (y/n): ")?;
        let Some(answer) = self.read_line()? else {
            return Ok(Flow::Exit);
        };
        if answer.trim().eq_ignore_ascii_case("y") {
            match self.session.save(&self.store) {
                Ok(()) => writeln!(
                    self.output,
                    "Saved to '{}' and '{}'.",
                    self.store.model_path().display(),
                    self.store.vectorizer_path().display()
                )?,
                Err(e) => writeln!(self.output, "Could not save model: {e}")?,
            }
        }
        Ok(Flow::Continue)
    }

    fn load_and_sample(&mut self) -> Result<Flow> {
        if let Err(e) = self.session.load(&self.store) {
            writeln!(self.output, "Could not load model: {e}")?;
            return Ok(Flow::Continue);
        }
        writeln!(self.output, "Model loaded.")?;

        match self.session.predict_samples() {
            Ok(predictions) => {
                for p in &predictions {
                    writeln!(self.output)?;
                    render::prediction(&mut self.output, p)?;
                }
            }
            Err(e) => writeln!(self.output, "Prediction failed: {e}")?,
        }
        Ok(Flow::Continue)
    }

    fn classify(&mut self) -> Result<Flow> {
        if !self.session.is_fitted() {
            writeln!(self.output, "No model available. Train (1) or load (2) one first.")?;
            return Ok(Flow::Continue);
        }

        self.prompt("Enter news text: ")?;
        let Some(text) = self.read_line()? else {
            return Ok(Flow::Exit);
        };
        if text.trim().is_empty() {
            writeln!(self.output, "No text entered.")?;
            return Ok(Flow::Continue);
        }

        match self.session.predict(&text) {
            Ok(p) => render::prediction(&mut self.output, &p)?,
            Err(e) => writeln!(self.output, "Prediction failed: {e}")?,
        }
        Ok(Flow::Continue)
    }
}
