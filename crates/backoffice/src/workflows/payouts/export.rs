use std::io::Write;

use super::domain::PayoutRecord;

/// Column order of the statement export, kept stable for downstream
/// bookkeeping imports.
const STATEMENT_HEADER: [&str; 8] = [
    "payout_id",
    "trainer_id",
    "amount",
    "method",
    "status",
    "transaction_id",
    "created_at",
    "completed_at",
];

/// Serialize a payout statement to CSV. Pending payouts leave the transaction
/// and completion columns empty.
pub fn write_statement<W: Write>(writer: W, records: &[PayoutRecord]) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(STATEMENT_HEADER)?;

    for record in records {
        csv_writer.write_record([
            record.payout_id.0.to_string(),
            record.trainer_id.0.to_string(),
            record.amount.to_string(),
            record.method.clone(),
            record.status.label().to_string(),
            record.transaction_id.clone().unwrap_or_default(),
            record.created_at.to_rfc3339(),
            record
                .completed_at
                .map(|stamp| stamp.to_rfc3339())
                .unwrap_or_default(),
        ])?;
    }

    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Statement rendered to an in-memory string, for HTTP responses and stdout.
pub fn statement_to_string(records: &[PayoutRecord]) -> Result<String, csv::Error> {
    let mut buffer = Vec::new();
    write_statement(&mut buffer, records)?;
    Ok(String::from_utf8(buffer).expect("csv output is valid utf-8"))
}
