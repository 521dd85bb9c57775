use std::env;
use std::fs;
use std::process::ExitCode;

use log::LevelFilter;
use nemu::bus::Console;
use nemu::rom::Rom;

fn main() -> ExitCode {
    setup_logging().expect("Logger setup failed");

    let path = match env::args().nth(1) {
        Some(path) => path,
        None => {
            log::error!("usage: nemu <rom-path>");
            return ExitCode::FAILURE;
        }
    };

    let raw = match fs::read(&path) {
        Ok(raw) => raw,
        Err(err) => {
            log::error!("failed to read {path}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let rom = match Rom::parse(&raw) {
        Ok(rom) => rom,
        Err(err) => {
            log::error!("failed to parse {path}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let console = match Console::new(rom) {
        Ok(console) => console,
        Err(err) => {
            log::error!("failed to build mapper for {path}: {err}");
            return ExitCode::FAILURE;
        }
    };

    nemu::screen::run(console);
    ExitCode::SUCCESS
}

fn setup_logging() -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        // Format each log message
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}] {}",
                record.target(),
                record.level(),
                message
            ))
        })
        .level(LevelFilter::Info)
        .chain(std::io::stderr())
        .apply()?;
    Ok(())
}
