use std::process::ExitCode;

fn main() -> ExitCode {
    sensible_env_logger::init!();

    match cricket_horoscope::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
