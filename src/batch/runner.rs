use csv::ByteRecord;
use std::fmt;
use std::io::{Read, Write};
use std::path::Path;
use crate::batch::table::{output_headers, output_row, ColumnMap};
use crate::batch::BatchError;
use crate::models::MatchOutcome;
use crate::services::IdentityMatcher;

/// Run-level counters reported after the last row
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total_searched: usize,
    pub positive_matches: usize,
}

const RULE: &str = "---------------------------------";

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary Table:")?;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "| {:<21} | {:<5} |", "Metric", "Count")?;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "| {:<21} | {:<5} |", "Total People Searched", self.total_searched)?;
        writeln!(f, "| {:<21} | {:<5} |", "Positive Matches", self.positive_matches)?;
        write!(f, "{}", RULE)
    }
}

/// Mutable state owned by a single run: the output writer and the counters
struct RunContext<W: Write> {
    writer: csv::Writer<W>,
    width: usize,
    summary: RunSummary,
}

impl<W: Write> RunContext<W> {
    fn start(mut writer: csv::Writer<W>, headers: &ByteRecord) -> Result<Self, BatchError> {
        writer.write_byte_record(&output_headers(headers))?;
        writer.flush()?;

        Ok(Self {
            writer,
            width: headers.len(),
            summary: RunSummary::default(),
        })
    }

    /// Write one finished row; it is on disk before the next row is read
    fn record(&mut self, record: &ByteRecord, outcome: &MatchOutcome) -> Result<(), BatchError> {
        self.writer.write_byte_record(&output_row(record, self.width, outcome))?;
        self.writer.flush()?;

        self.summary.total_searched += 1;
        if outcome.is_match() {
            self.summary.positive_matches += 1;
        }
        Ok(())
    }

    fn finish(mut self) -> Result<RunSummary, BatchError> {
        self.writer.flush()?;
        Ok(self.summary)
    }
}

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(true).flexible(true);
    builder
}

/// Process the input table and write the annotated output table
///
/// Header validation happens before the output file is created, so a
/// misconfigured input leaves no output behind.
pub async fn run(
    input: &Path,
    output: &Path,
    matcher: &IdentityMatcher,
) -> Result<RunSummary, BatchError> {
    let mut reader = reader_builder().from_path(input)?;
    let headers = reader.byte_headers()?.clone();
    let columns = ColumnMap::from_headers(&headers)?;

    tracing::info!("Reading {} -> writing {}", input.display(), output.display());

    let writer = csv::Writer::from_path(output)?;
    process(&mut reader, &headers, &columns, writer, matcher).await
}

/// Resolve every remaining row of `reader`, one at a time
///
/// Rows are read as raw bytes, so a field that is not UTF-8 only affects its
/// own lookup and is written back unchanged.
pub async fn process<R: Read, W: Write>(
    reader: &mut csv::Reader<R>,
    headers: &ByteRecord,
    columns: &ColumnMap,
    writer: csv::Writer<W>,
    matcher: &IdentityMatcher,
) -> Result<RunSummary, BatchError> {
    let mut ctx = RunContext::start(writer, headers)?;

    for result in reader.byte_records() {
        let record = result?;
        let identity = columns.identity(&record);

        tracing::info!("Processing {} {}...", identity.first_name, identity.last_name);

        let outcome = matcher.match_identity(&identity).await;
        ctx.record(&record, &outcome)?;
    }

    let summary = ctx.finish()?;
    tracing::info!(
        "Processing complete: {} searched, {} positive",
        summary.total_searched,
        summary.positive_matches
    );
    Ok(summary)
}
