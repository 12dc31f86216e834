use clap::*;
use std::io::Write;

use seqmatch::libs::lcs;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("lcs")
        .about("Length of the longest common subsequence of two sequences")
        .after_help(
            r###"
Computes the length of the longest common subsequence (LCS) of two sequences.

Notes:
* The default engine is dynamic programming, O(n*m)
* `--exhaustive` enumerates every subsequence of both inputs instead
    * Exponential in the input lengths, meant for cross-checking
    * Sequences longer than 20 residues are rejected

Examples:
1. LCS by dynamic programming:
   seqmatch lcs AGCAT GAC

2. The same by brute force:
   seqmatch lcs AGCAT GAC --exhaustive

"###,
        )
        .arg(
            Arg::new("seq1")
                .required(true)
                .index(1)
                .help("The first sequence"),
        )
        .arg(
            Arg::new("seq2")
                .required(true)
                .index(2)
                .help("The second sequence"),
        )
        .arg(
            Arg::new("exhaustive")
                .long("exhaustive")
                .action(ArgAction::SetTrue)
                .help("Use exhaustive subsequence enumeration"),
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
    let is_exhaustive = args.get_flag("exhaustive");

    let mut writer = seqmatch::writer(args.get_one::<String>("outfile").unwrap())?;

    //----------------------------
    // Ops
    //----------------------------
    let len = if is_exhaustive {
        lcs::check_exhaustive_len(seq1)?;
        lcs::check_exhaustive_len(seq2)?;
        lcs::lcs_exhaustive(seq1, seq2)
    } else {
        lcs::lcs_dp(seq1, seq2)
    };

    //----------------------------
    // Output
    //----------------------------
    writer.write_fmt(format_args!("{}\n", len))?;

    Ok(())
}
