//! Streaming word count, the two-pass way a cluster would run it: a map
//! pass tokenizes raw text into `word\t1` records, the intermediate output
//! is sorted by key (the cluster's shuffle), and a reduce pass sums each
//! word's counts.
//!
//! Run with: `cargo run --example wordcount`

use anyhow::Result;
use localmr::{map_fn, reduce_fn, run_map, run_reduce};

fn main() -> Result<()> {
    let text = "the quick brown fox\njumps over the lazy dog\nthe end";

    // Map pass: one line in, N word records out.
    let mut intermediate = Vec::new();
    run_map(
        text.as_bytes(),
        &mut intermediate,
        map_fn(|record, output| {
            for word in record[0].split_whitespace() {
                output.collect(&[word.to_string(), "1".to_string()])?;
            }
            Ok(())
        }),
    )?;

    // The cluster shuffles and sorts between the phases; locally we sort
    // the intermediate lines ourselves.
    let mut lines: Vec<&str> = std::str::from_utf8(&intermediate)?.lines().collect();
    lines.sort_unstable();
    let sorted = lines.join("\n");

    // Reduce pass: sum the counts of each word's group.
    let mut out = Vec::new();
    run_reduce(
        sorted.as_bytes(),
        &mut out,
        reduce_fn(|key, records, output| {
            let mut total = 0u64;
            while records.has_next() {
                total += records.next_record()?[1].parse::<u64>()?;
            }
            output.collect(&[key.to_string(), total.to_string()])
        }),
    )?;

    print!("{}", String::from_utf8(out)?);
    Ok(())
}
