use edmv::errors::RenameError;
use edmv::{app, cli};

fn main() {
    let args = cli::parse();
    if let Err(e) = app::run(args) {
        // Distinct exit codes per failure category so callers can tell a
        // wholesale refusal from a halt mid-execution.
        let code = e
            .downcast_ref::<RenameError>()
            .map(RenameError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}
