extern crate clap;
use clap::*;

mod cmd_seqmatch;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let app = Command::new("seqmatch")
        .version(crate_version!())
        .author(crate_authors!())
        .about("`seqmatch` - Best-match search by LCS and local alignment")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .subcommand(cmd_seqmatch::lcs::make_subcommand())
        .subcommand(cmd_seqmatch::local::make_subcommand())
        .subcommand(cmd_seqmatch::best::make_subcommand())
        .subcommand(cmd_seqmatch::matrix::make_subcommand())
        .after_help(
            r###"Subcommand groups:

* Pairwise:
    * lcs   - Longest common subsequence length
    * local - Local alignment under a penalty matrix

* Search:
    * best  - Best match of a query in a FASTA corpus

* Matrices:
    * matrix - Print a penalty matrix

Set RUST_LOG=info (or debug) for progress messages on stderr.

"###,
        );

    // Check which subcomamnd the user ran...
    match app.get_matches().subcommand() {
        Some(("lcs", sub_matches)) => cmd_seqmatch::lcs::execute(sub_matches),
        Some(("local", sub_matches)) => cmd_seqmatch::local::execute(sub_matches),
        Some(("best", sub_matches)) => cmd_seqmatch::best::execute(sub_matches),
        Some(("matrix", sub_matches)) => cmd_seqmatch::matrix::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}
