use std::process::ExitCode;

fn main() -> ExitCode {
    loanbot_cli::run()
}
