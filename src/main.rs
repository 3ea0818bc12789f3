//Enable more cargo lint tests
#![warn(rust_2018_idioms)]

use std::{
    fs, io,
    path::Path,
    time::Instant,
};

use log::{error, info, LevelFilter};
use simplelog::{Config, TermLogger, TerminalMode};

use sbro::tools::cli::{sbro_opts_init, Mode};
use sbro::{compress, decompress};

fn main() -> Result<(), io::Error> {
    // Available log levels are Error, Warn, Info, Debug, Trace
    TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stdout,
        simplelog::ColorChoice::AlwaysAnsi,
    )
    .unwrap();

    let opts = sbro_opts_init();

    if Path::new(&opts.output).exists() && !opts.force_overwrite {
        error!("Output file {} exists. Use --force to overwrite.", opts.output);
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "output file exists",
        ));
    }

    let data = fs::read(&opts.input)?;

    let time = Instant::now();
    let result = match opts.op_mode {
        Mode::Zip => compress(&data),
        Mode::Unzip => decompress(&data),
    };
    let out = match result {
        Ok(out) => out,
        Err(err) => {
            error!("Fatal error: {}", err);
            return Err(io::Error::new(io::ErrorKind::InvalidData, err.to_string()));
        }
    };
    let elapsed = time.elapsed();

    fs::write(&opts.output, &out)?;

    match opts.op_mode {
        Mode::Zip => {
            info!("Compression completed in {} ms", elapsed.as_millis());
            info!("Original size: {} bytes", data.len());
            info!("Compressed size: {} bytes", out.len());
            if !data.is_empty() {
                info!(
                    "Compression ratio: {:.2}%",
                    out.len() as f64 / data.len() as f64 * 100.0
                );
            }
        }
        Mode::Unzip => {
            info!("Decompression completed in {} ms", elapsed.as_millis());
            info!("Compressed size: {} bytes", data.len());
            info!("Decompressed size: {} bytes", out.len());
            if !out.is_empty() {
                info!(
                    "Decompression ratio: {:.2}%",
                    data.len() as f64 / out.len() as f64 * 100.0
                );
            }
        }
    }

    info!("Done.\n");
    Ok(())
}
