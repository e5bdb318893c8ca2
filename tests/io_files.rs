use anyhow::Context;
use localmr::testing::fixture_file;
use localmr::{reduce_fn, run_map, run_reduce};
use localmr::{Mapper, Output};
use std::fs::File;
use std::io::BufReader;

#[test]
fn map_runs_over_a_file_backed_stream() -> anyhow::Result<()> {
    struct UpperFirst;
    impl Mapper for UpperFirst {
        fn map(&mut self, record: &[String], output: &mut dyn Output) -> anyhow::Result<()> {
            let mut record = record.to_vec();
            record[0] = record[0].to_uppercase();
            output.collect(&record)
        }
    }

    let input = fixture_file("ab\t1\ncd\t2\n")?;
    let reader = BufReader::new(File::open(input.path()).context("open fixture")?);

    let out_file = tempfile::NamedTempFile::new()?;
    run_map(reader, out_file.as_file(), UpperFirst)?;

    let written = std::fs::read_to_string(out_file.path())?;
    assert_eq!(written, "AB\t1\nCD\t2\n");
    Ok(())
}

#[test]
fn reduce_runs_over_a_file_backed_stream() -> anyhow::Result<()> {
    let input = fixture_file("a\t1\na\t2\nb\t5\n")?;
    let reader = BufReader::new(File::open(input.path()).context("open fixture")?);

    let out_file = tempfile::NamedTempFile::new()?;
    run_reduce(
        reader,
        out_file.as_file(),
        reduce_fn(|key, records, output| {
            let mut total = 0u64;
            while records.has_next() {
                total += records.next_record()?[1].parse::<u64>()?;
            }
            output.collect(&[key.to_string(), total.to_string()])
        }),
    )?;

    let written = std::fs::read_to_string(out_file.path())?;
    assert_eq!(written, "a\t3\nb\t5\n");
    Ok(())
}
