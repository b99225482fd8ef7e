use repo_sbom::cli::Args;
use repo_sbom::error::{ExitCode, Result};
use repo_sbom::scan;
use std::process;

fn main() {
    if let Err(e) = run() {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        for cause in e.chain().skip(1) {
            eprintln!("\nCaused by: {}", cause);
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

fn run() -> Result<()> {
    let args = Args::parse_args();

    let report = scan::run(&args.root)?;
    if !report.skipped.is_empty() {
        println!(
            "Done: {} records, {} repositories skipped",
            report.records.len(),
            report.skipped.len()
        );
    }

    Ok(())
}
