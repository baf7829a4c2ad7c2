// ============================================================================
// Result Sinks
// CSV, JSON lines and in-memory destinations for day records
// ============================================================================

use crate::interfaces::RecordSink;
use std::io::{self, Write};

use super::DayRecord;

/// Comma-separated output with a header line written before the first record
pub struct CsvSink<W: Write> {
    writer: W,
    header_written: bool,
}

impl<W: Write> CsvSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            header_written: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for CsvSink<W> {
    fn write_record(&mut self, record: &DayRecord) -> io::Result<()> {
        if !self.header_written {
            writeln!(self.writer, "{}", DayRecord::CSV_HEADER)?;
            self.header_written = true;
        }
        writeln!(self.writer, "{}", record.to_csv_row())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// One JSON object per line
#[cfg(feature = "serde")]
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

#[cfg(feature = "serde")]
impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(feature = "serde")]
impl<W: Write> RecordSink for JsonLinesSink<W> {
    fn write_record(&mut self, record: &DayRecord) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Keeps every record; for tests and in-process analysis
#[derive(Debug, Default)]
pub struct MemorySink {
    pub records: Vec<DayRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordSink for MemorySink {
    fn write_record(&mut self, record: &DayRecord) -> io::Result<()> {
        self.records.push(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn record(day: u32) -> DayRecord {
        DayRecord {
            run: 0,
            day,
            date: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
            avg_balance: Decimal::ZERO,
            total_demand: Decimal::from(3),
            central_energy_bought: Decimal::ONE,
            total_produced: Decimal::from(2),
            avg_price: Decimal::new(12, 2),
            central_energy_absorbed: Decimal::ZERO,
            peer_volume: Decimal::ONE,
        }
    }

    #[test]
    fn test_csv_header_written_once() {
        let mut sink = CsvSink::new(Vec::new());
        sink.write_all(&[record(0), record(1)]).unwrap();
        sink.flush().unwrap();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], DayRecord::CSV_HEADER);
        assert!(lines[2].starts_with("0,1,2022-01-01,"));
    }

    #[test]
    fn test_empty_csv_has_no_header() {
        let sink = CsvSink::new(Vec::new());
        assert!(sink.into_inner().is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_lines_round_trip() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.write_record(&record(4)).unwrap();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let parsed: DayRecord = serde_json::from_str(text.trim_end()).unwrap();
        assert_eq!(parsed, record(4));
    }

    #[test]
    fn test_memory_sink_keeps_order() {
        let mut sink = MemorySink::new();
        sink.write_all(&[record(2), record(0)]).unwrap();
        let days: Vec<u32> = sink.records.iter().map(|r| r.day).collect();
        assert_eq!(days, vec![2, 0]);
    }
}
