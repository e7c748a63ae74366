use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use crate::aggregate::aggregate;
use crate::error::BenchError;
use crate::filesystem::file_size;
use crate::manifest::ManifestReader;
use crate::report::render;
use crate::strategy::Strategy;

/// Capacities swept by the binary, matching the spread a tuning session cares
/// about: small enough to stress per-call overhead, large enough to exceed any
/// file in a typical manifest.
pub const DEFAULT_BUFFER_CAPS: [usize; 6] = [
    1024,
    256 * 1024,
    512 * 1024,
    1024 * 1024,
    256 * 1024 * 1024,
    512 * 1024 * 1024,
];

/// One timed, verified measurement of a strategy on one file at one buffer
/// capacity.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct SampleRecord {
    pub buffer_cap: usize,
    pub file_size: u64,
    pub elapsed: Duration,
}

/// Drives the strategy x buffer-capacity x manifest-entry experiment matrix.
///
/// The working buffer is allocated once at the maximum requested capacity and
/// sliced down per iteration, keeping allocation cost out of the measured
/// window. Everything is strictly sequential: measurements must be serialized
/// against each other, and a benchmark gains nothing from overlapping I/O with
/// timing.
pub struct Runner {
    manifest_path: PathBuf,
    buffer: Vec<u8>,
}

impl Runner {
    pub fn new<P: Into<PathBuf>>(manifest_path: P, buffer_caps: &[usize]) -> Self {
        let max_cap = buffer_caps.iter().copied().max().unwrap_or(0);
        Runner {
            manifest_path: manifest_path.into(),
            buffer: vec![0u8; max_cap],
        }
    }

    /// Runs the full matrix, aggregating and reporting each strategy's sweep
    /// before the next strategy begins. No partial report survives a failure:
    /// a truncated benchmark report is worse than none.
    pub fn run<W: Write>(
        &mut self,
        out: &mut W,
        strategies: &[Strategy],
        buffer_caps: &[usize],
    ) -> anyhow::Result<()> {
        for strategy in strategies {
            let samples = self.sweep(strategy, buffer_caps)?;

            writeln!(out, "==============================")?;
            writeln!(out, "{}", strategy.label)?;
            writeln!(out, "==============================")?;

            let by_file_size = aggregate(&samples, |r| r.file_size, |r| r.buffer_cap as u64);
            render(out, &by_file_size, "file_size", "buffer_cap", "elapsed_nsecs")?;
        }
        Ok(())
    }

    /// Collects one strategy's full sweep: every buffer capacity against every
    /// manifest entry, in manifest line order per capacity. Returns a fresh
    /// collection each call, so sample data cannot leak across strategies.
    pub fn sweep(
        &mut self,
        strategy: &Strategy,
        buffer_caps: &[usize],
    ) -> Result<Vec<SampleRecord>, BenchError> {
        let mut samples = Vec::new();
        for &cap in buffer_caps {
            log::debug!("{}: sweeping buffer capacity {}", strategy.label, cap);

            // the manifest cursor is single-pass, so each capacity re-parses it
            let mut manifest = ManifestReader::open(&self.manifest_path)?;
            while let Some(entry) = manifest.next_entry()? {
                let metadata = fs::metadata(&entry.path)
                    .map_err(|e| BenchError::io(&entry.path, e))?;

                let start = monotonic_now()?;
                let actual = (strategy.hash)(&entry.path, &mut self.buffer[..cap])?;
                let end = monotonic_now()?;

                if actual != entry.expected {
                    return Err(BenchError::HashMismatch {
                        path: entry.path,
                        expected: entry.expected,
                        actual,
                    });
                }

                samples.push(SampleRecord {
                    buffer_cap: cap,
                    file_size: file_size(&metadata),
                    elapsed: end.saturating_sub(start),
                });
            }
        }
        Ok(samples)
    }
}

/// Samples CLOCK_MONOTONIC as a duration since an arbitrary epoch.
fn monotonic_now() -> Result<Duration, BenchError> {
    let mut ts = libc::timespec {
        tv_sec: 0,
        tv_nsec: 0,
    };
    let rc = unsafe { libc::clock_gettime(libc::CLOCK_MONOTONIC, &mut ts) };
    if rc < 0 {
        return Err(BenchError::Clock(io::Error::last_os_error()));
    }
    Ok(Duration::new(ts.tv_sec as u64, ts.tv_nsec as u32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::Digest;
    use crate::strategy::STRATEGIES;
    use std::io::Write;

    struct Fixture {
        dir: tempfile::TempDir,
        manifest: PathBuf,
    }

    impl Fixture {
        fn new(files: &[(&str, &[u8])]) -> Self {
            let dir = tempfile::tempdir().unwrap();
            let mut manifest_content = Vec::new();
            for (name, contents) in files {
                let path = dir.path().join(name);
                fs::write(&path, contents).unwrap();
                write!(
                    manifest_content,
                    "{}  {}\0",
                    Digest::from_contents(contents),
                    path.display()
                )
                .unwrap();
            }

            let manifest = dir.path().join("SHA256SUM");
            fs::write(&manifest, manifest_content).unwrap();
            Fixture { dir, manifest }
        }
    }

    #[test]
    fn test_sweep_matrix_shape() {
        let big = vec![0xabu8; 1024 * 1024];
        let fixture = Fixture::new(&[("a.bin", b"0123456789"), ("b.bin", &big)]);
        let caps = [1024, 1024 * 1024];

        let mut runner = Runner::new(&fixture.manifest, &caps);
        let samples = runner.sweep(&STRATEGIES[0], &caps).unwrap();
        assert_eq!(samples.len(), 4);

        let by_file_size = aggregate(&samples, |r| r.file_size, |r| r.buffer_cap as u64);
        assert_eq!(by_file_size.len(), 2);
        assert_eq!(by_file_size[0].key, 10);
        assert_eq!(by_file_size[1].key, 1024 * 1024);
        for bucket in &by_file_size {
            assert_eq!(
                bucket.points.iter().map(|p| p.x).collect::<Vec<_>>(),
                vec![1024, 1024 * 1024]
            );
        }
    }

    #[test]
    fn test_sweeps_are_isolated() {
        let fixture = Fixture::new(&[("a.bin", b"0123456789")]);
        let caps = [1024];

        let mut runner = Runner::new(&fixture.manifest, &caps);
        let first = runner.sweep(&STRATEGIES[0], &caps).unwrap();
        let second = runner.sweep(&STRATEGIES[1], &caps).unwrap();

        // fresh collection per sweep, same shape, nothing carried over
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
        assert_eq!(first[0].file_size, second[0].file_size);
    }

    #[test]
    fn test_mismatch_is_fatal() {
        let fixture = Fixture::new(&[("a.bin", b"0123456789")]);
        let tampered = fixture.dir.path().join("a.bin");
        fs::write(&tampered, b"tampered!!").unwrap();

        let caps = [1024];
        let mut runner = Runner::new(&fixture.manifest, &caps);
        match runner.sweep(&STRATEGIES[0], &caps) {
            Err(BenchError::HashMismatch {
                path,
                expected,
                actual,
            }) => {
                assert_eq!(path, tampered);
                assert_eq!(expected, Digest::from_contents(b"0123456789"));
                assert_eq!(actual, Digest::from_contents(b"tampered!!"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_missing_input_file_is_fatal() {
        let fixture = Fixture::new(&[("a.bin", b"0123456789")]);
        fs::remove_file(fixture.dir.path().join("a.bin")).unwrap();

        let caps = [1024];
        let mut runner = Runner::new(&fixture.manifest, &caps);
        match runner.sweep(&STRATEGIES[0], &caps) {
            Err(BenchError::Io { .. }) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_run_reports_every_strategy() {
        let fixture = Fixture::new(&[("a.bin", b"0123456789")]);
        let caps = [1024];

        let mut runner = Runner::new(&fixture.manifest, &caps);
        let mut out = Vec::new();
        runner.run(&mut out, &STRATEGIES, &caps).unwrap();

        let output = String::from_utf8(out).unwrap();
        for strategy in &STRATEGIES {
            assert!(output.contains(strategy.label), "{}", strategy.label);
        }
        assert!(output.contains("file_size = 10"));
        assert!(output.contains("buffer_cap, elapsed_nsecs"));
    }

    #[test]
    fn test_monotonic_now() {
        let start = monotonic_now().unwrap();
        let end = monotonic_now().unwrap();
        assert!(end >= start);
    }
}
