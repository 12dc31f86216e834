use clap::*;
use std::io::Write;

use seqmatch::libs::corpus::Corpus;
use seqmatch::libs::penalty::PenaltyMatrix;
use seqmatch::libs::search::{self, Engine};

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("best")
        .about("Finds the sequence in a FASTA file that best matches a query")
        .after_help(
            r###"
Scores the query against every record of the FASTA file and reports the best one.

Output is tab separated:
* lcs engines:   name, score
* local engine:  name, score, aligned query, aligned record

Notes:
* Supports both plain text and gzipped (.gz) files
* Reads from stdin if input file is 'stdin'
* Engines:
    * `--engine dp` (default): LCS length by dynamic programming
    * `--engine exhaustive`: LCS length by brute force, sequences up to 20 residues
    * `--engine local`: local alignment score under `--matrix`
* When several records share the best score, the first one in the file wins
* `--all` reports every record in file order instead of the best one
* `--parallel` scores records on several threads; results are identical

Examples:
1. Best LCS match:
   seqmatch best tests/seqmatch/proteins.fa ACDEFG

2. Best local alignment with BLOSUM62, 4 threads:
   seqmatch best tests/seqmatch/proteins.fa MKTAYIAK --engine local --parallel 4

3. Scores of all records:
   seqmatch best tests/seqmatch/proteins.fa MKTAYIAK --engine local --all

"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .index(1)
                .help("Input FASTA file holding the corpus"),
        )
        .arg(
            Arg::new("query")
                .required(true)
                .index(2)
                .help("The query sequence"),
        )
        .arg(
            Arg::new("engine")
                .long("engine")
                .short('e')
                .value_parser(["dp", "exhaustive", "local"])
                .default_value("dp")
                .help("Scoring engine"),
        )
        .arg(
            Arg::new("matrix")
                .long("matrix")
                .short('m')
                .num_args(1)
                .default_value("blosum62")
                .help("Penalty matrix for the local engine, a preset name or a file"),
        )
        .arg(
            Arg::new("full_scan")
                .long("full-scan")
                .action(ArgAction::SetTrue)
                .help("Local engine: search the whole DP table for the best cell"),
        )
        .arg(
            Arg::new("all")
                .long("all")
                .action(ArgAction::SetTrue)
                .help("Report every record, not only the best"),
        )
        .arg(
            Arg::new("parallel")
                .long("parallel")
                .short('p')
                .value_parser(value_parser!(usize))
                .num_args(1)
                .default_value("1")
                .help("Number of threads for parallel processing"),
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
    let infile = args.get_one::<String>("infile").unwrap();
    let query = args.get_one::<String>("query").unwrap().as_bytes();
    let opt_engine = args.get_one::<String>("engine").unwrap();
    let is_all = args.get_flag("all");

    let opt_parallel = *args.get_one::<usize>("parallel").unwrap();
    if opt_parallel > 1 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(opt_parallel)
            .build_global()?;
    }

    //----------------------------
    // Load
    //----------------------------
    let corpus = Corpus::from_path(infile)?;

    let matrix = if opt_engine == "local" {
        PenaltyMatrix::from_name(args.get_one::<String>("matrix").unwrap())?
    } else {
        PenaltyMatrix::default()
    };
    let engine = match opt_engine.as_str() {
        "exhaustive" => Engine::LcsExhaustive,
        "local" => Engine::Local {
            matrix: &matrix,
            scan: super::local::scan_mode(args),
        },
        _ => Engine::LcsDp,
    };

    let mut writer = seqmatch::writer(args.get_one::<String>("outfile").unwrap())?;

    //----------------------------
    // Ops
    //----------------------------
    if is_all {
        let hits = if opt_parallel > 1 {
            search::par_score_all(&corpus, query, &engine)?
        } else {
            search::score_all(&corpus, query, &engine)?
        };
        for (record, hit) in corpus.iter().zip(&hits) {
            writer.write_all(
                format_line(record.name(), hit.score, hit.alignment.as_ref()).as_ref(),
            )?;
        }
    } else {
        let best = if opt_parallel > 1 {
            search::par_best_match(&corpus, query, &engine)?
        } else {
            search::best_match(&corpus, query, &engine)?
        };
        writer.write_all(
            format_line(best.record.name(), best.score, best.alignment.as_ref()).as_ref(),
        )?;
    }

    Ok(())
}

fn format_line(
    name: &str,
    score: i32,
    alignment: Option<&seqmatch::libs::local::Alignment>,
) -> String {
    match alignment {
        Some(aln) => format!("{}\t{}\t{}\t{}\n", name, score, aln.aligned1, aln.aligned2),
        None => format!("{}\t{}\n", name, score),
    }
}
