use std::fmt::{Display, Formatter};

use clap::{Parser, ValueEnum};
use log::info;

/// Zip or Unzip
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Zip,
    Unzip,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Command Line Interpretation - uses external CLAP crate.
/// (Define author, version and about here.)
#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about = "sbro, a single-shot LZ77 + Huffman file compressor.",
    long_about = None)]
struct Args {
    /// File to read
    input: String,

    /// File to write
    output: String,

    /// zip to compress, unzip to decompress
    #[clap(value_enum)]
    mode: Mode,

    /// Overwrite the output file if it already exists
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Sets verbosity. -v 1 shows very little, -v 5 is chatty
    #[clap(short = 'v', default_value_t = 3)]
    v: u8,
}

/// Define all user settable options that control driver behavior
#[derive(Debug)]
pub struct SbroOpts {
    /// Name of the file to read for input
    pub input: String,
    /// Name of the file to write
    pub output: String,
    /// Compress or decompress
    pub op_mode: Mode,
    /// Silently overwrite an existing file with the same name
    pub force_overwrite: bool,
}

/// Copy command line stuff from clap's structure into our internal
/// structure, then log initialization status to the user.
pub fn sbro_opts_init() -> SbroOpts {
    let args = Args::parse();

    // Set the log level
    match args.v {
        0 => log::set_max_level(log::LevelFilter::Off),
        1 => log::set_max_level(log::LevelFilter::Error),
        2 => log::set_max_level(log::LevelFilter::Warn),
        3 => log::set_max_level(log::LevelFilter::Info),
        4 => log::set_max_level(log::LevelFilter::Debug),
        _ => log::set_max_level(log::LevelFilter::Trace),
    };

    let opts = SbroOpts {
        input: args.input,
        output: args.output,
        op_mode: args.mode,
        force_overwrite: args.force,
    };

    info!("---- sbro Initialization Start ----");
    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    info!("Getting input from the file {}", opts.input);
    info!("Sending output to the file {}", opts.output);
    if opts.force_overwrite {
        info!("Forcing file overwriting");
    }
    info!("---- sbro Initialization End ----\n");

    opts
}
