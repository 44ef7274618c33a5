use std::error::Error;
use std::path::PathBuf;

use log::LevelFilter;
use structopt::StructOpt;

use chip_8_vm::emulator::{Driver, DriverConfig, Emulator};

mod crossterm_io;
mod key_buffer;
mod key_manager;
use crossterm_io::{CrosstermInput, CrosstermOutput};
use key_manager::KeyManager;

/// Run a program in the terminal. Keys 0-9 and a-f are the keypad, space pauses and Esc quits.
#[derive(StructOpt, Debug)]
#[structopt(name = "crossterm_frontend")]
struct Opt {
    /// Verbose mode (-v, -vv, -vvv). Logs go to stderr, so redirect it somewhere
    #[structopt(short, long, parse(from_occurrences))]
    verbose: u8,

    /// Instruction cycles per second
    #[structopt(long, default_value = "540")]
    cycles_per_second: u32,

    /// Timer ticks and screen refreshes per second
    #[structopt(long, default_value = "60")]
    timer_hz: u32,

    /// The program to execute
    #[structopt(parse(from_os_str))]
    input: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {

    // Get configuration and read input file
    let opt = Opt::from_args();
    let mut builder = env_logger::Builder::from_default_env();
    match opt.verbose {
        0 => {}
        1 => {
            builder.filter_level(LevelFilter::Info);
        }
        2 => {
            builder.filter_level(LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(LevelFilter::Trace);
        }
    }
    builder.init();

    log::info!("Executing {:?}", &opt.input);
    let program = std::fs::read(&opt.input)?;

    // Load instructions into emulator memory
    let mut emulator = Emulator::new();
    emulator.load(&program)?;

    let key_manager = KeyManager::new();
    let config = DriverConfig {
        cycles_per_second: opt.cycles_per_second,
        timer_hz: opt.timer_hz,
    };
    let mut driver = Driver::new(
        emulator,
        CrosstermInput::new(key_manager.key_buffer()),
        CrosstermOutput::new()?,
        config,
    );

    // Start execution, and give the terminal back before reporting anything
    let result = driver.run();
    drop(driver);
    drop(key_manager);
    result?;

    Ok(())
}
