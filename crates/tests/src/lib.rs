//! # Integration Tests
//!
//! Cross-crate end-to-end tests.
//!
//! Covers:
//! - Partition properties (no loss, no duplication, per-stream order)
//! - Boundary inputs (empty, all matching, none matching)
//! - Deadlock freedom under backpressure and mid-stream read failure

#[cfg(test)]
mod contract_tests {
    use contracts::{Category, SplitConfig};

    #[test]
    fn test_contracts_compile() {
        let config = SplitConfig::default();
        assert_eq!(Category::ALL.len(), Category::COUNT);
        assert_eq!(config.marker, contracts::DEFAULT_MARKER);
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::path::{Path, PathBuf};
    use std::time::Duration;

    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::{Category, ContractError, Line, LineSink, SplitConfig};
    use dispatcher::{create_dispatcher, Dispatcher, DispatcherError, FileSink, SplitReport};
    use ingestion::{FileLineSource, MockLineSource};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use tokio::time::timeout;

    const RUN_TIMEOUT: Duration = Duration::from_secs(30);

    struct SplitOutput {
        primary: Vec<u8>,
        secondary: Vec<u8>,
        report: SplitReport,
    }

    /// Write `input` to a temp file and split it: FileLineSource -> Dispatcher -> FileSinks
    async fn split_bytes(dir: &Path, input: &[u8], config: &SplitConfig) -> SplitOutput {
        let input_path = dir.join("input.log");
        std::fs::write(&input_path, input).unwrap();

        let source = FileLineSource::open(&input_path).await.unwrap();
        let dispatcher = create_dispatcher(config, &input_path).await.unwrap();
        let report = timeout(RUN_TIMEOUT, dispatcher.run(source))
            .await
            .expect("split timed out")
            .unwrap();

        let [primary, secondary] = config.output_paths(&input_path).map(read);
        SplitOutput {
            primary,
            secondary,
            report,
        }
    }

    fn read(path: PathBuf) -> Vec<u8> {
        std::fs::read(&path).unwrap_or_else(|e| panic!("read {}: {e}", path.display()))
    }

    fn join_lines<S: AsRef<str>>(lines: &[S]) -> Vec<u8> {
        let mut out = Vec::new();
        for line in lines {
            out.extend_from_slice(line.as_ref().as_bytes());
            out.push(b'\n');
        }
        out
    }

    /// Concrete scenario from the docs
    #[tokio::test]
    async fn test_e2e_concrete_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let out = split_bytes(
            dir.path(),
            b"INFO start\nERR disk full\nINFO done\n",
            &SplitConfig::default(),
        )
        .await;

        assert_eq!(out.primary, b"INFO start\nINFO done\n");
        assert_eq!(out.secondary, b"ERR disk full\n");
        assert_eq!(out.report.lines_read, 3);
    }

    #[tokio::test]
    async fn test_e2e_empty_input_creates_empty_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let out = split_bytes(dir.path(), b"", &SplitConfig::default()).await;

        assert!(out.primary.is_empty());
        assert!(out.secondary.is_empty());
        assert_eq!(out.report.lines_read, 0);
        assert!(dir.path().join("input.log.stdout").exists());
        assert!(dir.path().join("input.log.stderr").exists());
    }

    #[tokio::test]
    async fn test_e2e_all_matching_and_none_matching() {
        let dir = tempfile::tempdir().unwrap();
        let matching = join_lines(&["ERR one", "two ERR", "ERRERR"]);
        let out = split_bytes(dir.path(), &matching, &SplitConfig::default()).await;
        assert!(out.primary.is_empty());
        assert_eq!(out.secondary, matching);

        let dir = tempfile::tempdir().unwrap();
        let clean = join_lines(&["INFO one", "err lowercase", "", "WARN three"]);
        let out = split_bytes(dir.path(), &clean, &SplitConfig::default()).await;
        assert_eq!(out.primary, clean);
        assert!(out.secondary.is_empty());
    }

    #[tokio::test]
    async fn test_e2e_rerun_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let input = join_lines(
            &(0..5_000)
                .map(|i| format!("{} event {i}", if i % 7 == 0 { "ERR" } else { "INFO" }))
                .collect::<Vec<_>>(),
        );
        let config = SplitConfig {
            queue_capacity: 3,
            ..Default::default()
        };

        let first = split_bytes(dir.path(), &input, &config).await;
        let second = split_bytes(dir.path(), &input, &config).await;
        assert_eq!(first.primary, second.primary);
        assert_eq!(first.secondary, second.secondary);
    }

    /// Random inputs: every line lands in exactly one output, in input order
    #[tokio::test]
    async fn test_e2e_random_partition_properties() {
        const TOKENS: [&str; 6] = ["INFO", "ERR", "E", "RR", "warn", "[ERROR]"];

        for seed in 0..8u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let line_count = rng.random_range(0..2_000);
            let lines: Vec<String> = (0..line_count)
                .map(|_| {
                    let words = rng.random_range(0..5);
                    (0..words)
                        .map(|_| TOKENS[rng.random_range(0..TOKENS.len())])
                        .collect::<Vec<_>>()
                        .join(" ")
                })
                .collect();

            let config = SplitConfig {
                queue_capacity: rng.random_range(1..16),
                ..Default::default()
            };
            let dir = tempfile::tempdir().unwrap();
            let out = split_bytes(dir.path(), &join_lines(&lines), &config).await;

            let (expected_secondary, expected_primary): (Vec<_>, Vec<_>) =
                lines.iter().partition(|l| l.contains("ERR"));
            assert_eq!(out.primary, join_lines(&expected_primary), "seed {seed}");
            assert_eq!(out.secondary, join_lines(&expected_secondary), "seed {seed}");

            let written = out.report.sink(Category::Primary).metrics.write_count
                + out.report.sink(Category::Secondary).metrics.write_count;
            assert_eq!(written, lines.len() as u64, "seed {seed}");
            assert_eq!(out.report.lines_read, lines.len() as u64, "seed {seed}");
        }
    }

    /// Input far larger than channel capacity completes without deadlock
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_e2e_backpressure_large_input() {
        let dir = tempfile::tempdir().unwrap();
        let lines: Vec<String> = (0..200_000)
            .map(|i| {
                if i % 2 == 0 {
                    format!("ERR {i}")
                } else {
                    format!("INFO {i}")
                }
            })
            .collect();
        let config = SplitConfig {
            queue_capacity: 1,
            ..Default::default()
        };

        let out = split_bytes(dir.path(), &join_lines(&lines), &config).await;
        assert_eq!(out.report.sink(Category::Primary).metrics.write_count, 100_000);
        assert_eq!(out.report.sink(Category::Secondary).metrics.write_count, 100_000);
        assert!(out.primary.ends_with(b"INFO 199999\n"));
        assert!(out.secondary.ends_with(b"ERR 199998\n"));
    }

    /// Mid-stream read failure: channels close, workers drain, error surfaces
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_e2e_read_failure_mid_stream() {
        let dir = tempfile::tempdir().unwrap();
        let input_path = dir.path().join("failing.log");
        let lines: Vec<String> = (1..=50_000)
            .map(|i| {
                if i % 5 == 0 {
                    format!("ERR {i}")
                } else {
                    format!("INFO {i}")
                }
            })
            .collect();
        let source = MockLineSource::from_lines(lines.clone()).fail_after(30_000);
        let config = SplitConfig {
            queue_capacity: 2,
            ..Default::default()
        };

        let dispatcher = create_dispatcher(&config, &input_path).await.unwrap();
        let barrier = dispatcher.barrier().clone();
        let handle = dispatcher.spawn(source);

        let result = timeout(RUN_TIMEOUT, handle)
            .await
            .expect("dispatcher deadlocked after read failure")
            .unwrap();
        let err = result.unwrap_err();
        assert!(err.is_read_failure(), "unexpected error: {err:?}");
        assert_eq!(barrier.remaining(), 0);

        let read_before_failure = &lines[..30_000];
        let (expected_secondary, expected_primary): (Vec<_>, Vec<_>) = read_before_failure
            .iter()
            .partition(|l| l.starts_with("ERR"));
        let [primary, secondary] = config.output_paths(&input_path).map(read);
        assert_eq!(primary, join_lines(&expected_primary));
        assert_eq!(secondary, join_lines(&expected_secondary));
    }

    #[tokio::test]
    async fn test_e2e_missing_input_is_resource_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let input_path = dir.path().join("nope.log");

        let result = FileLineSource::open(&input_path).await;
        assert!(matches!(
            result,
            Err(ContractError::ResourceUnavailable { .. })
        ));
        assert!(!dir.path().join("nope.log.stdout").exists());
    }

    #[tokio::test]
    async fn test_e2e_config_file_prefix_mode() {
        let config = ConfigLoader::load_from_str(
            r#"
marker = "[ERROR]"
match_mode = "prefix"
primary_suffix = ".out"
secondary_suffix = ".err"
queue_capacity = 4
"#,
            ConfigFormat::Toml,
        )
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let input = join_lines(&["[ERROR] a", "[INFO] b [ERROR]", "[ERROR] c", "d"]);
        let out = split_bytes(dir.path(), &input, &config).await;

        assert_eq!(out.primary, b"[INFO] b [ERROR]\nd\n");
        assert_eq!(out.secondary, b"[ERROR] a\n[ERROR] c\n");
        assert!(dir.path().join("input.log.out").exists());
        assert!(dir.path().join("input.log.err").exists());
    }

    /// Sink whose every write fails
    struct BrokenSink;

    impl LineSink for BrokenSink {
        fn name(&self) -> &str {
            "broken"
        }

        async fn write(&mut self, _line: &Line) -> Result<(), ContractError> {
            Err(ContractError::write_failure("broken", "disk on fire"))
        }

        async fn flush(&mut self) -> Result<(), ContractError> {
            Ok(())
        }

        async fn close(&mut self) -> Result<(), ContractError> {
            Ok(())
        }
    }

    async fn run_with_broken_secondary(strict_writes: bool) -> (Result<SplitReport, DispatcherError>, Vec<u8>) {
        let dir = tempfile::tempdir().unwrap();
        let primary_path = dir.path().join("primary.out");
        let config = SplitConfig {
            queue_capacity: 1,
            strict_writes,
            ..Default::default()
        };

        let primary = FileSink::create("primary", &primary_path).await.unwrap();
        let dispatcher = Dispatcher::with_sinks(&config, primary, BrokenSink);
        let lines: Vec<String> = (0..1_000)
            .map(|i| if i % 2 == 0 { format!("ERR {i}") } else { format!("ok {i}") })
            .collect();

        let result = timeout(RUN_TIMEOUT, dispatcher.run(MockLineSource::from_lines(lines)))
            .await
            .expect("write failures must not block the dispatcher");
        (result, read(primary_path))
    }

    #[tokio::test]
    async fn test_e2e_write_failures_are_recorded_not_fatal() {
        let (result, primary) = run_with_broken_secondary(false).await;
        let report = result.unwrap();

        assert_eq!(report.sink(Category::Secondary).metrics.failure_count, 500);
        assert_eq!(report.sink(Category::Primary).metrics.write_count, 500);
        assert_eq!(primary.iter().filter(|b| **b == b'\n').count(), 500);
    }

    #[tokio::test]
    async fn test_e2e_strict_writes_fail_after_draining() {
        let (result, primary) = run_with_broken_secondary(true).await;

        match result {
            Err(DispatcherError::Contract(ContractError::WriteFailure { sink_name, .. })) => {
                assert_eq!(sink_name, "broken");
            }
            other => panic!("expected write failure, got {other:?}"),
        }
        // The healthy stream is still complete
        assert_eq!(primary.iter().filter(|b| **b == b'\n').count(), 500);
    }
}
