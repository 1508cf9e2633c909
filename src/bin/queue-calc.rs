use queue_calc::cli::{self, FormatArg, Invocation};
use queue_calc::engine;
use queue_calc::error::Result;
use queue_calc::logging::init_logging;
use queue_calc::models::ModelConfig;
use queue_calc::output::{Formatter, HumanFormatter, JsonFormatter};

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        std::process::exit(err.exit_code());
    }
}

fn run() -> Result<()> {
    let args = cli::parse_args()?;
    init_logging(&args.log_level);

    match cli::resolve(args.command)? {
        Invocation::ListModels => {
            for id in ModelConfig::IDS {
                println!("{}", id);
            }
        }
        Invocation::Evaluate(model) => {
            let report = engine::evaluate(&model)?;
            let formatter = formatter_for(&args.format);
            let output = formatter.write(&model.label(), &report)?;
            print!("{}", output);
        }
    }

    Ok(())
}

fn formatter_for(format: &FormatArg) -> Box<dyn Formatter> {
    match format {
        FormatArg::Human => Box::new(HumanFormatter),
        FormatArg::Json => Box::new(JsonFormatter),
    }
}
