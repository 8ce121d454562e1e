//! Trainer CLI: fit the card classifier on a folder-per-class image tree
//! and write the model artifacts the app loads.

use std::path::PathBuf;

use cogpal::config;
use cogpal::logging;
use cogpal::ml::metrics::precision_recall_by_class;
use cogpal::ml::{TrainOptions, train};

fn main() {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let cli = parse_args(std::env::args().skip(1).collect())?;
    let (data_dir, out_dir) = resolve_dirs(&cli)?;
    if !data_dir.is_dir() {
        return Err(format!(
            "Training data folder not found: {}",
            data_dir.display()
        ));
    }

    println!(
        "Training on {} -> {}",
        data_dir.display(),
        out_dir.display()
    );
    let report = train(&data_dir, &out_dir, &cli.options).map_err(|err| err.to_string())?;

    println!(
        "Done: {} classes, {} train / {} val samples",
        report.classes.len(),
        report.train_samples,
        report.val_samples
    );
    println!(
        "Best epoch {} of {} (accuracy {:.4}){}",
        report.best_epoch,
        report.epochs_run,
        report.best_accuracy,
        if report.stopped_early {
            ", stopped early"
        } else {
            ""
        }
    );

    let per_class = precision_recall_by_class(&report.confusion);
    for (idx, stats) in per_class.iter().enumerate() {
        println!(
            "class {:>2} {:<16}  precision={:.3}  recall={:.3}  support={}",
            idx, report.classes[idx], stats.precision, stats.recall, stats.support
        );
    }
    println!("confusion matrix (rows=true, cols=pred):");
    for truth in 0..report.confusion.n_classes {
        let mut row = String::new();
        for pred in 0..report.confusion.n_classes {
            row.push_str(&format!("{:6}", report.confusion.get(truth, pred)));
        }
        println!("{row}");
    }
    println!("Model and class mapping saved to {}", out_dir.display());
    Ok(())
}

#[derive(Debug, Clone)]
struct CliOptions {
    data_dir: Option<PathBuf>,
    out_dir: Option<PathBuf>,
    options: TrainOptions,
}

/// Fall back to the configured app folders when `--data`/`--out` are not
/// given, so a bare invocation trains from the app's own content.
fn resolve_dirs(cli: &CliOptions) -> Result<(PathBuf, PathBuf), String> {
    if let (Some(data_dir), Some(out_dir)) = (&cli.data_dir, &cli.out_dir) {
        return Ok((data_dir.clone(), out_dir.clone()));
    }
    let settings = config::load_or_default().map_err(|err| err.to_string())?;
    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => settings
            .resolved_images_dir()
            .map_err(|err| err.to_string())?,
    };
    let out_dir = match &cli.out_dir {
        Some(dir) => dir.clone(),
        None => settings
            .resolved_models_dir()
            .map_err(|err| err.to_string())?,
    };
    Ok((data_dir, out_dir))
}

fn parse_args(args: Vec<String>) -> Result<CliOptions, String> {
    let mut cli = CliOptions {
        data_dir: None,
        out_dir: None,
        options: TrainOptions::default(),
    };

    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "-h" | "--help" => return Err(help_text()),
            "--data" => cli.data_dir = Some(PathBuf::from(take_value(&args, &mut idx, "--data")?)),
            "--out" => cli.out_dir = Some(PathBuf::from(take_value(&args, &mut idx, "--out")?)),
            "--pretrained" => {
                cli.options.pretrained_backbone =
                    Some(PathBuf::from(take_value(&args, &mut idx, "--pretrained")?));
            }
            "--epochs" => cli.options.epochs = parse_value(&args, &mut idx, "--epochs")?,
            "--batch" => cli.options.batch_size = parse_value(&args, &mut idx, "--batch")?,
            "--learning-rate" => {
                cli.options.learning_rate = parse_value(&args, &mut idx, "--learning-rate")?;
            }
            "--image-size" => cli.options.image_size = parse_value(&args, &mut idx, "--image-size")?,
            "--hidden" => cli.options.hidden_size = parse_value(&args, &mut idx, "--hidden")?,
            "--val-fraction" => {
                cli.options.val_fraction = parse_value(&args, &mut idx, "--val-fraction")?;
            }
            "--patience" => cli.options.patience = parse_value(&args, &mut idx, "--patience")?,
            "--seed" => cli.options.seed = parse_value(&args, &mut idx, "--seed")?,
            "--no-augment" => cli.options.augment = false,
            other => return Err(format!("Unknown argument: {other}\n\n{}", help_text())),
        }
        idx += 1;
    }
    Ok(cli)
}

fn take_value<'a>(args: &'a [String], idx: &mut usize, flag: &str) -> Result<&'a str, String> {
    *idx += 1;
    args.get(*idx)
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} requires a value"))
}

fn parse_value<T: std::str::FromStr>(
    args: &[String],
    idx: &mut usize,
    flag: &str,
) -> Result<T, String> {
    let value = take_value(args, idx, flag)?;
    value
        .parse::<T>()
        .map_err(|_| format!("Invalid {flag} value: {value}"))
}

fn help_text() -> String {
    "Usage: cogpal-train [options]

Options:
  --data <dir>           Folder with one subfolder of images per class
                         (default: the app's configured images folder)
  --out <dir>            Output folder for the model artifacts
                         (default: the app's configured models folder)
  --pretrained <dir>     Model folder whose backbone is reused and frozen
  --epochs <n>           Training epochs (default 12)
  --batch <n>            Mini-batch size (default 32)
  --learning-rate <f>    Adam learning rate (default 0.001)
  --image-size <n>       Square input size in pixels (default 160)
  --hidden <n>           Hidden layer width (default 128)
  --val-fraction <f>     Per-class validation fraction (default 0.2)
  --patience <n>         Early-stop patience in epochs, 0 disables (default 4)
  --seed <n>             RNG seed (default 42)
  --no-augment           Disable training-set augmentation
  -h, --help             Show this help"
        .to_string()
}
