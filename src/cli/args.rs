// args.rs - Command line arguments definition

use argh::FromArgs;

#[derive(FromArgs)]
/// kmersig - K-mer difference signatures for per-variant-group alignments
pub struct Args {
    /// directory of aligned group FASTA files (Group_*_*_aligned.fasta)
    #[argh(option)]
    pub alignments: Option<String>,

    /// output directory for comparison tables
    #[argh(option)]
    pub out: Option<String>,

    /// k-mer window size (default: 4)
    #[argh(option, default = "4")]
    pub window_size: usize,

    /// maximum number of worker threads (default: 10)
    #[argh(option)]
    pub threads: Option<usize>,

    /// column reducer for the final table: identity, adjacent (default: identity)
    #[argh(option, default = "String::from(\"identity\")")]
    pub reducer: String,

    /// reduce an existing comparison table instead of reading alignments
    #[argh(option)]
    pub input_table: Option<String>,

    /// write failed groups to this file, one line each
    #[argh(option)]
    pub error_log: Option<String>,

    /// write a JSON run summary to this file
    #[argh(option)]
    pub summary: Option<String>,

    /// hide the progress bar
    #[argh(switch)]
    pub no_progress: bool,

    /// enable debug logging
    #[argh(switch, short = 'v')]
    pub verbose: bool,

    /// load alignments and report counts without comparing
    #[argh(switch)]
    pub dry_run: bool,

    /// path to TOML configuration file
    #[argh(option)]
    pub config: Option<String>,

    /// generate sample configuration file and exit
    #[argh(switch)]
    pub generate_config: bool,
}
