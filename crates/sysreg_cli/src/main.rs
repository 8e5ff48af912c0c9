mod args;

use std::{
  path::{Component, Path, PathBuf},
  process::ExitCode,
  time::Instant,
};

use ansi_term::Colour;
use anyhow::Context;
use args::{InputArgs, OutputArgs, RegisterArgs};
use clap::Parser;
use sysreg::{RegisterTransformer, TransformOptions, TransformOutput};
use sugar_path::SugarPath;
use sysreg_error::{BuildError, BuildResult};
use sysreg_utils::{
  collections::FxHashMap,
  rayon::{IntoParallelRefIterator, ParallelIterator},
};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Commands {
  #[clap(flatten)]
  input: InputArgs,

  #[clap(flatten)]
  output: OutputArgs,

  #[clap(flatten)]
  register: RegisterArgs,
}

struct TransformedFile {
  input: PathBuf,
  written_to: Option<PathBuf>,
  output: TransformOutput,
}

fn init_tracing(enabled: bool) {
  if !enabled {
    return;
  }
  let _ = tracing_subscriber::fmt()
    .with_span_events(FmtSpan::CLOSE)
    .with_max_level(Level::DEBUG)
    .with_writer(std::io::stderr)
    .json()
    .with_ansi(false)
    .try_init();
}

fn load_options(input: &InputArgs, register: RegisterArgs) -> BuildResult<TransformOptions> {
  let options = register.into_options(input.cwd.clone());
  let Some(config) = &input.config else {
    return Ok(options);
  };
  let json = std::fs::read_to_string(config)
    .with_context(|| format!("Failed to read config {}", config.display()))?;
  let from_file = TransformOptions::from_json(&json)
    .with_context(|| format!("Invalid config {}", config.display()))?;
  Ok(options.merge(from_file))
}

/// Maps every input to `out_dir` joined with its path relative to `cwd`.
///
/// Inputs outside `cwd` lose their leading `..` segments. Two inputs that land on the same
/// target are an error.
fn output_targets(inputs: &[PathBuf], cwd: &Path, out_dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
  let mut seen: FxHashMap<PathBuf, &Path> = FxHashMap::default();
  let mut targets = Vec::with_capacity(inputs.len());
  for input in inputs {
    let absolute = if input.is_absolute() { input.clone() } else { cwd.join(input) };
    let relative = absolute.relative(cwd);
    let target = relative
      .components()
      .filter(|component| matches!(component, Component::Normal(_)))
      .fold(out_dir.to_path_buf(), |target, component| target.join(component));
    if target == out_dir {
      anyhow::bail!("{} has no file name", input.display());
    }
    if let Some(previous) = seen.insert(target.clone(), input) {
      anyhow::bail!(
        "{} and {} would both be written to {}",
        previous.display(),
        input.display(),
        target.display()
      );
    }
    targets.push(target);
  }
  Ok(targets)
}

fn transform_file(
  transformer: &RegisterTransformer,
  input: &Path,
  target: Option<&Path>,
) -> BuildResult<TransformedFile> {
  let source = std::fs::read_to_string(input)
    .with_context(|| format!("Failed to read {}", input.display()))?;
  let output = transformer.transform(source, &input.to_string_lossy())?;

  if let Some(target) = target {
    if let Some(parent) = target.parent() {
      std::fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(target, &output.code)
      .with_context(|| format!("Failed to write {}", target.display()))?;
  }

  let written_to = target.map(Path::to_path_buf);
  Ok(TransformedFile { input: input.to_path_buf(), written_to, output })
}

fn print_summary(files: &[TransformedFile]) {
  let left = files.iter().map(|file| file.input.to_string_lossy().len()).max().unwrap_or(0);

  let dim = Colour::White.dimmed();
  let color = Colour::Cyan;

  for file in files {
    let input = file.input.to_string_lossy();
    let target =
      file.written_to.as_ref().map_or_else(|| "<stdout>".to_string(), |p| p.display().to_string());
    println!(
      "{}{:pad$} {} {}{}{}",
      color.paint(input.as_ref()),
      "",
      dim.paint("→"),
      target,
      dim.paint(" │ dependencies: "),
      file.output.dependencies.len(),
      pad = left - input.len(),
    );
  }
}

fn print_errors(input: &Path, errors: &BuildError) {
  for error in &**errors {
    eprintln!("{} {}: {:#}", Colour::Red.paint("Error:"), input.display(), error);
  }
}

fn main() -> ExitCode {
  let args = Commands::parse();
  init_tracing(args.output.trace);

  let options = match load_options(&args.input, args.register) {
    Ok(options) => options,
    Err(errors) => {
      for error in &*errors {
        eprintln!("{} {:#}", Colour::Red.paint("Error:"), error);
      }
      return ExitCode::FAILURE;
    }
  };

  let OutputArgs { out_dir, json, silent, .. } = args.output;
  let inputs = args.input.inputs;
  if out_dir.is_none() && inputs.len() > 1 {
    eprintln!("{} --out-dir is required for several inputs", Colour::Red.paint("Error:"));
    return ExitCode::FAILURE;
  }
  let targets: Vec<Option<PathBuf>> = match &out_dir {
    Some(out_dir) => {
      let cwd = match args.input.cwd.map_or_else(std::env::current_dir, Ok) {
        Ok(cwd) => cwd,
        Err(error) => {
          eprintln!("{} {error}", Colour::Red.paint("Error:"));
          return ExitCode::FAILURE;
        }
      };
      match output_targets(&inputs, &cwd, out_dir) {
        Ok(targets) => targets.into_iter().map(Some).collect(),
        Err(error) => {
          eprintln!("{} {error:#}", Colour::Red.paint("Error:"));
          return ExitCode::FAILURE;
        }
      }
    }
    None => vec![None; inputs.len()],
  };
  let jobs = inputs.iter().zip(targets).collect::<Vec<_>>();

  let transformer = RegisterTransformer::new(options);
  let start = Instant::now();
  let results = jobs
    .par_iter()
    .map(|(input, target)| (*input, transform_file(&transformer, input, target.as_deref())))
    .collect::<Vec<_>>();

  let mut transformed = Vec::with_capacity(results.len());
  let mut failed = false;
  for (input, result) in results {
    match result {
      Ok(file) => transformed.push(file),
      Err(errors) => {
        print_errors(input, &errors);
        failed = true;
      }
    }
  }

  if out_dir.is_none() {
    for file in &transformed {
      if json {
        match file.output.to_json() {
          Ok(metadata) => println!("{metadata}"),
          Err(error) => {
            eprintln!("{} {error}", Colour::Red.paint("Error:"));
            failed = true;
          }
        }
      } else {
        print!("{}", file.output.code);
      }
    }
  } else if !silent {
    print_summary(&transformed);
    let elapsed = format!("{:.2} ms", start.elapsed().as_secs_f64() * 1000.0);
    println!(
      "\n{} Finished in {}",
      Colour::Green.paint("✔"),
      Colour::White.bold().paint(elapsed)
    );
  }

  if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn same_file_names_in_different_directories_keep_their_layout() {
    let inputs = [PathBuf::from("/project/a/index.js"), PathBuf::from("b/index.js")];
    let targets = output_targets(&inputs, Path::new("/project"), Path::new("/out")).unwrap();
    assert_eq!(targets, [PathBuf::from("/out/a/index.js"), PathBuf::from("/out/b/index.js")]);
  }

  #[test]
  fn inputs_landing_on_one_target_are_rejected() {
    let inputs = [PathBuf::from("/project/a.js"), PathBuf::from("/a.js")];
    let error = output_targets(&inputs, Path::new("/project"), Path::new("/out")).unwrap_err();
    assert_eq!(error.to_string(), "/project/a.js and /a.js would both be written to /out/a.js");

    let inputs = [PathBuf::from("src/a.js"), PathBuf::from("./src/a.js")];
    assert!(output_targets(&inputs, Path::new("/project"), Path::new("/out")).is_err());
  }
}
