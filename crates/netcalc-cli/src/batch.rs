//! Parallel batch calculation using Rayon
//!
//! Each input line is analyzed independently: one bad line yields an error
//! entry for that line and never aborts the batch. Results keep input order.

use anyhow::{Context, Result};
use netcalc_cidr::{calculate_cidr, CidrCalculation};
use rayon::prelude::*;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info};

/// Batch processing result
#[derive(Debug, Clone)]
pub struct BatchResult {
    pub input: String,
    pub result: Result<CidrCalculation, String>,
}

/// Batch processor with parallel execution
pub struct BatchProcessor {
    thread_pool: rayon::ThreadPool,
}

impl BatchProcessor {
    /// Create a new batch processor
    ///
    /// # Arguments
    ///
    /// * `num_threads` - Number of threads (default: CPU cores)
    pub fn new(num_threads: Option<usize>) -> Result<Self> {
        let num_threads = num_threads.unwrap_or_else(num_cpus::get);

        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()?;

        Ok(Self { thread_pool })
    }

    /// Analyze a batch of CIDR strings in parallel
    pub fn process(&self, inputs: Vec<String>) -> Vec<BatchResult> {
        let total = inputs.len();
        let processed = AtomicUsize::new(0);

        self.thread_pool.install(|| {
            inputs
                .into_par_iter()
                .map(|input| {
                    let result = calculate_cidr(&input).map_err(|e| e.to_string());

                    let count = processed.fetch_add(1, Ordering::Relaxed) + 1;
                    if count % 1000 == 0 || count == total {
                        info!("Processed {}/{} entries", count, total);
                    }

                    BatchResult { input, result }
                })
                .collect()
        })
    }

    /// Get thread pool info
    pub fn thread_count(&self) -> usize {
        self.thread_pool.current_num_threads()
    }
}

/// Read batch inputs from a file, or stdin for `None` / `-`
pub fn read_inputs(file: Option<&str>) -> Result<Vec<String>> {
    match file {
        None | Some("-") => {
            debug!("reading inputs from stdin");
            parse_inputs(io::stdin().lock())
        }
        Some(path) => {
            debug!(path, "reading inputs from file");
            let file = File::open(path).with_context(|| format!("Failed to open {}", path))?;
            parse_inputs(BufReader::new(file))
        }
    }
}

/// One trimmed entry per line; blank lines and `#` comments are skipped
///
/// Lines that are not valid UTF-8 are kept (lossily decoded) so they fail
/// as their own entries.
pub fn parse_inputs<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut inputs = Vec::new();
    for line in reader.split(b'\n') {
        let line = line?;
        let line = String::from_utf8_lossy(&line);
        let entry = line.trim();
        if entry.is_empty() || entry.starts_with('#') {
            continue;
        }
        inputs.push(entry.to_string());
    }
    Ok(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_processor_creation() {
        let processor = BatchProcessor::new(Some(4));
        assert!(processor.is_ok());
        assert_eq!(processor.unwrap().thread_count(), 4);
    }

    #[test]
    fn test_batch_processor_default_threads() {
        let processor = BatchProcessor::new(None).unwrap();
        assert!(processor.thread_count() > 0);
    }

    #[test]
    fn test_parse_inputs() {
        let text = "# office\n10.0.0.0/8\n\n  192.168.1.0/24  \n#end\n";
        let inputs = parse_inputs(text.as_bytes()).unwrap();
        assert_eq!(inputs, ["10.0.0.0/8", "192.168.1.0/24"]);
    }

    #[test]
    fn test_parse_inputs_keeps_invalid_utf8_line() {
        let bytes: &[u8] = b"10.0.0.0/8\r\n\xff\n192.168.1.0/24\n";
        let inputs = parse_inputs(bytes).unwrap();
        assert_eq!(inputs.len(), 3);
        assert_eq!(inputs[0], "10.0.0.0/8");
        assert_eq!(inputs[2], "192.168.1.0/24");

        let processor = BatchProcessor::new(Some(1)).unwrap();
        let results = processor.process(inputs);
        assert!(results[0].result.is_ok());
        assert!(results[1].result.is_err());
        assert!(results[2].result.is_ok());
    }

    #[test]
    fn test_process_keeps_order_and_isolates_errors() {
        let processor = BatchProcessor::new(Some(2)).unwrap();
        let inputs: Vec<String> = (0..50)
            .map(|i| format!("10.{}.0.0/16", i))
            .chain(["bogus".to_string()])
            .collect();

        let results = processor.process(inputs);
        assert_eq!(results.len(), 51);
        assert_eq!(results[7].input, "10.7.0.0/16");
        assert_eq!(
            results[7].result.as_ref().unwrap().broadcast_address,
            "10.7.255.255"
        );
        assert_eq!(
            results[50].result.as_ref().unwrap_err(),
            "Invalid CIDR format. Expected e.g., 192.168.1.0/24."
        );
    }
}
