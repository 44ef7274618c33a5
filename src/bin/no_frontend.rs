use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use log::LevelFilter;
use structopt::StructOpt;

use chip_8_vm::emulator::input::DummyInput;
use chip_8_vm::emulator::output::DummyOutput;
use chip_8_vm::emulator::{Driver, DriverConfig, Emulator};

/// Run a program without a screen or keyboard, then print the final screen.
#[derive(StructOpt, Debug)]
#[structopt(name = "no_frontend")]
struct Opt {
    /// Verbose mode (-v, -vv, -vvv)
    #[structopt(short, long, parse(from_occurrences))]
    verbose: u8,

    /// How many timer frames to run before stopping
    #[structopt(long, default_value = "600")]
    frames: usize,

    /// Instruction cycles per second
    #[structopt(long, default_value = "540")]
    cycles_per_second: u32,

    /// Timer ticks per second
    #[structopt(long, default_value = "60")]
    timer_hz: u32,

    /// Seed for the random number instruction, for reproducible runs
    #[structopt(long)]
    seed: Option<u64>,

    /// The program to execute
    #[structopt(parse(from_os_str))]
    input: PathBuf,
}

fn init_logger(verbose: u8) {
    let mut builder = pretty_env_logger::formatted_builder();
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    match verbose {
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
}

fn main() -> Result<(), Box<dyn Error>> {

    // Get configuration and read input file
    let opt = Opt::from_args();
    init_logger(opt.verbose);
    log::info!("Executing {:?}", &opt.input);

    let mut emulator = match opt.seed {
        Some(seed) => Emulator::with_seed(seed),
        None => Emulator::new(),
    };
    emulator.load_from_reader(BufReader::new(File::open(&opt.input)?))?;

    let config = DriverConfig {
        cycles_per_second: opt.cycles_per_second,
        timer_hz: opt.timer_hz,
    };
    let mut driver = Driver::new(emulator, DummyInput, DummyOutput::new(), config);
    let state = driver.run_frames(opt.frames)?;
    log::info!(
        "Stopped {:?} at {:#05x} after {} presented frames",
        state,
        driver.emulator().program_counter(),
        driver.output().frames()
    );

    print!("{}", driver.emulator().framebuffer());
    Ok(())
}
