// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the subcommands `train`, `predict` and `menu` and all
// their configurable flags.
//
// clap's derive macros generate --help, error messages for missing
// args, and type conversion (string → usize, f64, ...).
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};

use crate::application::train_use_case::{TrainConfig, DEFAULT_DATA_PATH};
use crate::infra::artifacts::{DEFAULT_MODEL_PATH, DEFAULT_VECTORIZER_PATH};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train a new model on a labelled CSV and report test metrics
    Train(TrainCommand),

    /// Classify one text with a saved model
    Predict(PredictArgs),

    /// Interactive menu (the default when no subcommand is given)
    Menu(MenuArgs),
}

/// Dataset, artifact and hyperparameter flags shared by `train`
/// and `menu`.
#[derive(Args, Debug, Clone)]
pub struct TrainArgs {
    /// CSV file with `text` and `label` (0 = real, 1 = fake) columns
    #[arg(long, default_value = DEFAULT_DATA_PATH)]
    pub data: String,

    /// Where the fitted classifier is saved / loaded
    #[arg(long, default_value = DEFAULT_MODEL_PATH)]
    pub model_path: String,

    /// Where the fitted TF-IDF vectorizer is saved / loaded
    #[arg(long, default_value = DEFAULT_VECTORIZER_PATH)]
    pub vectorizer_path: String,

    /// Fraction of the dataset held out for evaluation
    #[arg(long, default_value_t = 0.2)]
    pub test_fraction: f64,

    /// Seed for the train/test split and the per-epoch shuffle
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Ignore terms present in more than this fraction of documents
    #[arg(long, default_value_t = 0.7)]
    pub max_df: f64,

    /// Ignore terms present in fewer than this many documents
    #[arg(long, default_value_t = 1)]
    pub min_df: usize,

    /// Maximum step size of the passive-aggressive update
    #[arg(long, default_value_t = 1.0)]
    pub c: f64,

    /// Maximum number of passes over the training data
    #[arg(long, default_value_t = 1000)]
    pub max_iter: usize,

    /// Early-stopping tolerance (0 runs all max_iter epochs)
    #[arg(long, default_value_t = 1e-3)]
    pub tol: f64,

    /// Epochs without improvement before stopping
    #[arg(long, default_value_t = 5)]
    pub n_iter_no_change: usize,

    /// Directory for a per-epoch metrics.csv
    #[arg(long)]
    pub metrics_dir: Option<String>,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// The application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            data_path:        a.data,
            model_path:       a.model_path,
            vectorizer_path:  a.vectorizer_path,
            test_fraction:    a.test_fraction,
            seed:             a.seed,
            max_df:           a.max_df,
            min_df:           a.min_df,
            c:                a.c,
            max_iter:         a.max_iter,
            tol:              a.tol,
            n_iter_no_change: a.n_iter_no_change,
            metrics_dir:      a.metrics_dir,
        }
    }
}

#[derive(Args, Debug)]
pub struct TrainCommand {
    #[command(flatten)]
    pub train: TrainArgs,

    /// Save the fitted model and vectorizer after training
    #[arg(long)]
    pub save: bool,
}

#[derive(Args, Debug)]
pub struct PredictArgs {
    /// The article text to classify
    #[arg(long)]
    pub text: String,

    #[arg(long, default_value = DEFAULT_MODEL_PATH)]
    pub model_path: String,

    #[arg(long, default_value = DEFAULT_VECTORIZER_PATH)]
    pub vectorizer_path: String,
}

#[derive(Args, Debug)]
pub struct MenuArgs {
    #[command(flatten)]
    pub train: TrainArgs,
}
