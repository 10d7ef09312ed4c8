/// C3D lab coordinate system transform entry point
use c3d_reorient::config::{CliOptions, Command, USAGE};
use c3d_reorient::{CoordinateTransformer, TransformError};
use env_logger::Env;
use std::env;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        if matches!(e, TransformError::Usage(_)) {
            eprintln!("{USAGE}");
        }
        std::process::exit(1);
    }
}

fn run() -> Result<(), TransformError> {
    let options = match CliOptions::parse(env::args().skip(1))? {
        Command::Run(options) => options,
        Command::Help => {
            println!("{USAGE}");
            return Ok(());
        }
    };

    CoordinateTransformer::new(&options.input, options.mode, options.overwrite)
        .with_report(options.report)
        .run()?;

    Ok(())
}
