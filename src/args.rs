use clap::{Arg, ArgAction, Command};

fn image_arg() -> Arg {
    Arg::new("image")
        .help("Data image, protected in blocks of --block-size bytes")
        .required(true)
        .index(1)
}

/// Command-line definition of the `nandecc` tool
pub fn build_cli() -> Command {
    Command::new("nandecc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Reed-Solomon ECC for NAND flash blocks (10 bytes per 512-byte block)")
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("block-size")
                .long("block-size")
                .help("Bytes per ECC block")
                .value_name("BYTES")
                .global(true),
        )
        .arg(
            Arg::new("threads")
                .short('t')
                .long("threads")
                .help("Number of CPU threads for computation (0 = auto-detect)")
                .value_name("N")
                .default_value("0")
                .global(true),
        )
        .arg(
            Arg::new("no-parallel")
                .long("no-parallel")
                .help("Disable all parallel processing")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Quiet mode - minimal output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Show debug logging")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("encode")
                .visible_alias("e")
                .about("Write the ECC stream for an image")
                .arg(image_arg())
                .arg(
                    Arg::new("ecc")
                        .help("Output ECC file")
                        .required(true)
                        .index(2),
                ),
        )
        .subcommand(
            Command::new("correct")
                .visible_alias("c")
                .about("Correct an image against its ECC stream")
                .arg(image_arg())
                .arg(
                    Arg::new("ecc")
                        .help("ECC file written by `encode`")
                        .required(true)
                        .index(2),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help("Write the corrected image here instead of in place")
                        .value_name("FILE"),
                ),
        )
        .subcommand(
            Command::new("block")
                .visible_alias("b")
                .about("Print the ECC of every block as hex")
                .arg(image_arg()),
        )
}

pub fn parse_args() -> clap::ArgMatches {
    build_cli().get_matches()
}
