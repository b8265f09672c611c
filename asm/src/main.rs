use color_print::ceprintln;
use hlspl::Format;
use std::process::ExitCode;
use thiserror::Error;

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {author}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(author, version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// SPL source file
    input: String,

    /// Output file [default: standard output]
    #[clap(short, long)]
    output: Option<String>,

    /// Output format
    #[clap(short, long, value_enum, default_value_t = Format::C)]
    format: Format,

    /// Print progress to stderr
    #[clap(short, long)]
    verbose: bool,
}

#[derive(Error, Debug)]
enum CliError {
    #[error("Failed to read file: {0}")]
    FileRead(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),

    #[error(transparent)]
    Encode(#[from] hlspl::Error),
}

impl CliError {
    fn print(&self) {
        ceprintln!("<red,bold>error</>: {}", self);
        if let CliError::FileRead(_, err) | CliError::FileWrite(_, err) = self {
            ceprintln!("      <blue>=</> {}", err);
        }
    }
}

fn main() -> ExitCode {
    use clap::Parser;

    let args = Args::parse();
    let progress = |msg: &str| {
        if args.verbose {
            ceprintln!("<green,bold>{:>10}</> {}", "hlspl", msg);
        }
    };

    progress(&format!("< {}", args.input));
    let source = match std::fs::read_to_string(&args.input) {
        Ok(source) => source,
        Err(err) => {
            CliError::FileRead(args.input.clone(), err).print();
            return ExitCode::FAILURE;
        }
    };

    let result = match hlspl::assemble(&source) {
        Ok(result) => result,
        Err(err) => {
            err.print_diag(&args.input, &source);
            return ExitCode::FAILURE;
        }
    };
    progress(&format!(
        "{} bytes, {} symbols, origin {}",
        result.size(),
        result.defines.len(),
        result.origin
    ));

    match emit(&args, &result) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            err.print();
            ExitCode::FAILURE
        }
    }
}

fn emit(args: &Args, result: &hlspl::Assembled) -> Result<(), CliError> {
    let text = args.format.render(result)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, text).map_err(|err| CliError::FileWrite(path.clone(), err))?;
            if args.verbose {
                ceprintln!("<green,bold>{:>10}</> > {}", "hlspl", path);
            }
        }
        None => println!("{}", text),
    }
    Ok(())
}
