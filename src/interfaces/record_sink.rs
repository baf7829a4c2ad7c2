// ============================================================================
// Record Sink Interface
// Destination for per-day simulation records
// ============================================================================

use crate::simulation::DayRecord;
use std::io;

pub trait RecordSink {
    fn write_record(&mut self, record: &DayRecord) -> io::Result<()>;

    fn write_all(&mut self, records: &[DayRecord]) -> io::Result<()> {
        for record in records {
            self.write_record(record)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
