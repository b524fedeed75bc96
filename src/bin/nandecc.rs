//! nandecc - compute and apply Reed-Solomon block ECC for flash images

use anyhow::{Context, Result};
use nandecc::args::parse_args;
use nandecc::config::EccConfig;
use nandecc::ecc::BlockCodec;
use nandecc::image::{compute_image_ecc, correct_image, read_file, write_file};
use nandecc::reporters::{ConsoleImageReporter, Reporter, SilentImageReporter};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let matches = parse_args();
    let Some((command, sub_matches)) = matches.subcommand() else {
        anyhow::bail!("No command specified");
    };

    let mut logger = env_logger::Builder::from_default_env();
    logger
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);
    if sub_matches.get_flag("verbose") {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    let config = EccConfig::from_args(sub_matches)?;
    let codec = config.block_codec().context("Invalid ECC configuration")?;
    let quiet = sub_matches.get_flag("quiet");
    let image_path = sub_matches
        .get_one::<String>("image")
        .map(PathBuf::from)
        .context("image is required")?;

    match command {
        "encode" => {
            let ecc_path = required_path(sub_matches, "ecc")?;
            handle_encode(&codec, &config, &image_path, &ecc_path, quiet)
        }
        "correct" => {
            let ecc_path = required_path(sub_matches, "ecc")?;
            let output = sub_matches.get_one::<String>("output").map(PathBuf::from);
            let success = handle_correct(
                &codec,
                &config,
                &image_path,
                &ecc_path,
                output.as_deref(),
                quiet,
            )?;
            if !success {
                std::process::exit(1);
            }
            Ok(())
        }
        "block" => handle_block(&codec, &config, &image_path),
        other => anyhow::bail!("Unknown command: {}", other),
    }
}

fn required_path(matches: &clap::ArgMatches, name: &str) -> Result<PathBuf> {
    matches
        .get_one::<String>(name)
        .map(PathBuf::from)
        .with_context(|| format!("{} is required", name))
}

fn handle_encode(
    codec: &BlockCodec,
    config: &EccConfig,
    image_path: &Path,
    ecc_path: &Path,
    quiet: bool,
) -> Result<()> {
    let image = read_file(image_path)?;
    let ecc = compute_image_ecc(codec, &image, config)
        .with_context(|| format!("Failed to compute ECC for {}", image_path.display()))?;
    write_file(ecc_path, &ecc)?;

    if !quiet {
        ConsoleImageReporter::new().report_complete(&format!(
            "Wrote {} bytes of ECC for {} blocks to {}",
            ecc.len(),
            ecc.len() / codec.ecc_len(),
            ecc_path.display()
        ));
    }
    Ok(())
}

fn handle_correct(
    codec: &BlockCodec,
    config: &EccConfig,
    image_path: &Path,
    ecc_path: &Path,
    output: Option<&Path>,
    quiet: bool,
) -> Result<bool> {
    let mut image = read_file(image_path)?;
    let ecc = read_file(ecc_path)?;

    let result = if quiet {
        correct_image(codec, &mut image, &ecc, config, &SilentImageReporter::new())
    } else {
        correct_image(codec, &mut image, &ecc, config, &ConsoleImageReporter::new())
    };
    let summary = result.with_context(|| format!("Failed to correct {}", image_path.display()))?;

    let target = output.unwrap_or(image_path);
    if summary.corrected_blocks > 0 || output.is_some() {
        write_file(target, &image)?;
    }
    Ok(summary.is_success())
}

fn handle_block(codec: &BlockCodec, config: &EccConfig, image_path: &Path) -> Result<()> {
    let image = read_file(image_path)?;
    let ecc = compute_image_ecc(codec, &image, config)?;
    for (index, entry) in ecc.chunks(codec.ecc_len()).enumerate() {
        println!("{:6} {}", index, hex::encode(entry));
    }
    Ok(())
}
