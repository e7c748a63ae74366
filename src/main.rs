use std::io;
use std::path::PathBuf;

use clap::Parser;

use hashbench::{Runner, DEFAULT_BUFFER_CAPS, STRATEGIES};

/// Benchmarks file-hashing read strategies against a sha256sum manifest.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about=None)]
struct Args {
    /// Manifest of expected digests, as produced by `sha256sum -z`
    manifest: PathBuf,
}

fn main() {
    env_logger::init();

    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }

    // usage errors exit 1 like every other failure; --help/--version exit 0
    let args = Args::try_parse().unwrap_or_else(|err| {
        let _ = err.print();
        std::process::exit(if err.use_stderr() { 1 } else { 0 });
    });
    if let Err(err) = run(&args) {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let mut runner = Runner::new(&args.manifest, &DEFAULT_BUFFER_CAPS);

    let stdout = io::stdout();
    runner.run(&mut stdout.lock(), &STRATEGIES, &DEFAULT_BUFFER_CAPS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_argument_is_a_stderr_usage_error() {
        let err = Args::try_parse_from(["hashbench"]).unwrap_err();
        assert!(err.use_stderr());
    }

    #[test]
    fn test_help_is_not_an_error() {
        let err = Args::try_parse_from(["hashbench", "--help"]).unwrap_err();
        assert!(!err.use_stderr());
    }

    #[test]
    fn test_manifest_argument() {
        let args = Args::try_parse_from(["hashbench", "SHA256SUM"]).unwrap();
        assert_eq!(args.manifest, PathBuf::from("SHA256SUM"));
    }
}
