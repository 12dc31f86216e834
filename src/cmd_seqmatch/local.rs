use clap::*;
use std::io::Write;

use seqmatch::libs::local::{local_alignment, ScanMode};
use seqmatch::libs::penalty::PenaltyMatrix;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("local")
        .about("Local alignment of two sequences")
        .after_help(
            r###"
Aligns two sequences locally under a penalty matrix and prints
`score<TAB>aligned1<TAB>aligned2`. Gaps are written as `*`.

Notes:
* `--matrix` is `blosum62` (built-in) or a matrix file
    * The file has a `$ A R N ... *` header line, then one row per residue
    * `*` is the gap row/column
    * Pairs absent from the file score 0
* By default the alignment must end at the last residue of seq1
    * `--full-scan` searches the whole table, as classic Smith-Waterman does

Examples:
1. Align with BLOSUM62:
   seqmatch local HEAGAWGHEE PAWHEAE

2. Use a matrix file and a full table scan:
   seqmatch local HEAGAWGHEE PAWHEAE --matrix tests/seqmatch/blosum62.txt --full-scan

"###,
        )
        .arg(
            Arg::new("seq1")
                .required(true)
                .index(1)
                .help("The first sequence, e.g. the query"),
        )
        .arg(
            Arg::new("seq2")
                .required(true)
                .index(2)
                .help("The second sequence"),
        )
        .arg(
            Arg::new("matrix")
                .long("matrix")
                .short('m')
                .num_args(1)
                .default_value("blosum62")
                .help("Penalty matrix, a preset name or a file"),
        )
        .arg(
            Arg::new("full_scan")
                .long("full-scan")
                .action(ArgAction::SetTrue)
                .help("Search the whole DP table for the best cell"),
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
    //----------------------------
    // Args
    //----------------------------
    let seq1 = args.get_one::<String>("seq1").unwrap().as_bytes();
    let seq2 = args.get_one::<String>("seq2").unwrap().as_bytes();
    let matrix = PenaltyMatrix::from_name(args.get_one::<String>("matrix").unwrap())?;
    let scan = scan_mode(args);

    let mut writer = seqmatch::writer(args.get_one::<String>("outfile").unwrap())?;

    //----------------------------
    // Ops
    //----------------------------
    let aln = local_alignment(seq1, seq2, &matrix, scan);

    writer.write_fmt(format_args!(
        "{}\t{}\t{}\n",
        aln.score, aln.aligned1, aln.aligned2
    ))?;

    Ok(())
}

pub fn scan_mode(args: &ArgMatches) -> ScanMode {
    if args.get_flag("full_scan") {
        ScanMode::FullTable
    } else {
        ScanMode::LastRow
    }
}
