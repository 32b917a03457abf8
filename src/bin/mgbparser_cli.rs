use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use mgbparser_rs::report_file::{read_report, OutputPaths, DEFAULT_CLUSTERFILE};
use mgbparser_rs::sighits::check_rank_consistency;
use mgbparser_rs::{parse, parse_each_hit, HitRecord, MgbReport};

/// Parse and extract data from the output of MultiGeneBlast.
#[derive(Parser, Debug)]
#[command(name = "mgbparser-rs")]
#[command(author, version, about)]
struct Cli {
    /// Verbose behaviour, logging each parsing and writing step
    #[arg(short, long)]
    verbose: bool,

    /// Display relevant references and exit
    #[arg(short, long)]
    references: bool,

    /// Output the query sequence information (and write a file)
    #[arg(short, long)]
    query: bool,

    /// Output the table of significant hits (and write a file)
    #[arg(short, long)]
    sighits: bool,

    /// Output the table of BLAST hits for each match (and write a file)
    #[arg(short, long)]
    blastfile: bool,

    /// Name stem for all output files (extensions are set internally)
    #[arg(short, long, value_name = "STEM")]
    outfile: Option<String>,

    /// Return results for just the top n details sections
    #[arg(short, long, alias = "max_result", default_value_t = 50)]
    max_result: usize,

    /// The text file of hits output by MultiGeneBlast (may be gzipped)
    #[arg(long, default_value = DEFAULT_CLUSTERFILE)]
    clusterfile: PathBuf,

    /// Log and skip malformed hit blocks instead of aborting
    #[arg(long)]
    skip_bad_hits: bool,
}

const REFERENCES: &str = "
    - MultiGeneBlast has been previously published here:
        Medema MH, Takano E, Breitling R.
        \"Detecting Sequence Homology at the Gene Cluster Level with MultiGeneBlast.\"
         Molecular Biology and Evolution. 2013;30(5):1218-1223. doi:10.1093/molbev/mst025.
";

fn spinner(color: &str, msg: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&[
                "⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏",
            ])
            .template(&format!("{{spinner:.{color}}} {{msg}}"))
            .expect("Invalid spinner template"),
    );
    spinner.set_message(msg);
    spinner
}

fn load_report(cli: &Cli) -> Result<MgbReport, Box<dyn Error>> {
    log::info!("Opening {} for reading...", cli.clusterfile.display());
    let content = read_report(&cli.clusterfile)?;

    if !cli.skip_bad_hits {
        return Ok(parse(&content)?);
    }

    let partial = parse_each_hit(&content)?;
    let mut hits = Vec::with_capacity(partial.hits.len());
    for (index, hit) in partial.hits.into_iter().enumerate() {
        match hit {
            Ok(hit) => hits.push(hit),
            Err(e) => log::warn!("Skipping hit block {}: {}", index, e),
        }
    }
    Ok(MgbReport {
        query: partial.query,
        significant_hits: partial.significant_hits,
        hits,
    })
}

fn write_hit(cli: &Cli, paths: &OutputPaths, hit: &HitRecord, i: usize, total: usize) -> std::io::Result<()> {
    let location_outfile = paths.location(&hit.id);
    log::info!(
        "Writing Hit details for: {}. {} to {} ({} of {})",
        hit.rank,
        hit.id,
        location_outfile.display(),
        i + 1,
        total
    );
    fs::write(&location_outfile, hit.get_location_table())?;

    if cli.blastfile {
        let blast_outfile = paths.blast(&hit.id);
        log::info!(
            "Writing Hit BLAST details for: {}. {} to {} ({} of {})",
            hit.rank,
            hit.id,
            blast_outfile.display(),
            i + 1,
            total
        );
        fs::write(&blast_outfile, hit.get_blast_table())?;
    }

    let coords = hit.get_coords_line();
    if cli.verbose {
        println!("Hit coordinate information:");
        println!("===========================");
        println!("{}", HitRecord::coords_header());
        println!("{}", coords);
    }
    fs::write(paths.coords(&hit.id), coords)
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    if cli.references {
        println!("{}", REFERENCES);
        return Ok(());
    }

    // 1. Parse the report
    let spinner_parse = spinner("green", "Parsing MultiGeneBlast report...");
    let report = load_report(&cli)?;
    spinner_parse.finish_with_message(format!("Parsed {} detailed hit(s).", report.hits.len()));

    for mismatch in check_rank_consistency(&report.significant_hits, &report.hits) {
        log::warn!("Significant hits and details disagree: {}", mismatch);
    }

    // 2. Write outputs
    let spinner_write = spinner("yellow", "Writing output files...");
    let paths = OutputPaths::new(&cli.clusterfile, cli.outfile.as_deref());

    if cli.query {
        let query_outfile = paths.query();
        log::info!("Writing query details to file: {}", query_outfile.display());
        println!("Query sequence information:");
        println!("===========================");
        let table = report.get_query_table();
        print!("{}", table);
        fs::write(&query_outfile, table)?;
    }

    if cli.sighits {
        let sighit_outfile = paths.sighits();
        log::info!("Writing Significant hit details to file: {}", sighit_outfile.display());
        let table = report.get_sighits_table(Some(cli.max_result));
        println!("Significant Hit information:");
        println!("============================");
        print!("{}", table);
        fs::write(&sighit_outfile, table)?;
    }

    let total = report.hits.len().min(cli.max_result);
    for (i, hit) in report.hits.iter().take(total).enumerate() {
        write_hit(&cli, &paths, hit, i, total)?;
    }

    spinner_write.finish_with_message(format!("Output files created for {} hit(s).", total));
    Ok(())
}
