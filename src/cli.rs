use clap::Parser;
use std::path::PathBuf;

/// Generate a consolidated SBOM for a directory of repositories
#[derive(Parser, Debug)]
#[command(name = "repo-sbom")]
#[command(version)]
#[command(
    about = "Scan a parent directory of repositories and write sbom.csv / sbom.json",
    long_about = None
)]
pub struct Args {
    /// Parent directory containing the repositories to scan; the SBOM files
    /// are written into this directory
    pub root: PathBuf,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse_root() {
        let args = Args::try_parse_from(["repo-sbom", "/tmp/repos"]).unwrap();
        assert_eq!(args.root, PathBuf::from("/tmp/repos"));
    }

    #[test]
    fn test_args_require_root() {
        assert!(Args::try_parse_from(["repo-sbom"]).is_err());
    }

    #[test]
    fn test_args_reject_extra_positionals() {
        assert!(Args::try_parse_from(["repo-sbom", "/a", "/b"]).is_err());
    }
}
