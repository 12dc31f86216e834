use clap::*;
use std::io::Write;

use seqmatch::libs::penalty::PenaltyMatrix;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("matrix")
        .about("Prints a penalty matrix")
        .after_help(
            r###"
Loads a penalty matrix, a built-in preset or a file, and prints it in the
`$`-header layout accepted by `--matrix`.

Notes:
* Presets: blosum62
* Files may use the `$ A R N ...` header or an NCBI-style header line
* Only characters present in the matrix are printed

Examples:
1. Dump the built-in BLOSUM62:
   seqmatch matrix blosum62

2. Normalize a matrix file:
   seqmatch matrix tests/seqmatch/blosum62.txt -o blosum62.norm.txt

"###,
        )
        .arg(
            Arg::new("matrix")
                .required(true)
                .index(1)
                .help("Preset name or matrix file"),
        )
        .arg(
            Arg::new("outfile")
                .long("outfile")
                .short('o')
                .num_args(1)
                .default_value("stdout")
                .help("Output filename. [stdout] for screen"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let matrix = PenaltyMatrix::from_name(args.get_one::<String>("matrix").unwrap())?;

    let mut writer = seqmatch::writer(args.get_one::<String>("outfile").unwrap())?;
    matrix.to_writer(&mut writer)?;
    writer.flush()?;

    Ok(())
}
