use std::io::Write;
use std::process::ExitCode;

use paciente_extractor::cli::{self, Invocation};
use paciente_extractor::logging::{self, LogConfig};
use paciente_extractor::{resolve_config, ExtractorError, Pipeline};

fn main() -> ExitCode {
    logging::init(&LogConfig::from_env());

    let invocation = match cli::parse_args(std::env::args_os().skip(1)) {
        Err(rejected) => rejected,
        Ok(path) => match build_pipeline() {
            Ok(pipeline) => cli::execute(&path, &pipeline),
            Err(e) => {
                tracing::error!("{}", e);
                Invocation::rejected(e.to_string())
            }
        },
    };

    let line = invocation.outcome.to_json().unwrap_or_else(|e| {
        tracing::error!("Failed to serialize result: {}", e);
        r#"{"error": "Failed to serialize result"}"#.to_string()
    });

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = writeln!(stdout, "{}", line).and_then(|_| stdout.flush()) {
        tracing::error!("Failed to write result: {}", e);
        return ExitCode::from(cli::EXIT_FAILURE);
    }

    ExitCode::from(invocation.exit_code)
}

fn build_pipeline() -> Result<Pipeline, ExtractorError> {
    let config = resolve_config()?;
    Ok(Pipeline::new(&config)?)
}
