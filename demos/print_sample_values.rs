use anyhow::Context;
use pcm_orbit::source::{load_samples, ByteSource, FileSource};
use pcm_orbit::{inspect_header, PcmDecoder};
use std::{env, fs, io::Write};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let source = match env::args().nth(1) {
        Some(path) => FileSource::new(path),
        None => FileSource::in_assets("Assets"),
    };
    let raw = source.read_bytes()?;
    println!("Wave length in bytes: {}", raw.len());
    match inspect_header(&raw) {
        Ok(format) => println!("Declared format: {:?}", format),
        Err(e) => println!("Header not inspected: {e}"),
    }

    let samples = load_samples(&raw, &PcmDecoder::default())?;
    let mut file = fs::File::create("samples.txt").context("create samples.txt")?;

    // Print and export the first 3000 sample values to a txt file
    for (i, s) in samples.iter().take(3000).enumerate() {
        println!("{i}: {s}");
        write!(file, "{s}f32, ")?;
    }
    Ok(())
}
