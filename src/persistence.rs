// Flat-file persistence for the reservation ledger
//
// One reservation per line, fields joined by a bare comma:
//
//     customerName,customerContact,idType,roomNumber,roomType
//
// Commas inside a field are not escaped and will break the line on reload.
// Room capacity is not stored; loaded snapshots carry capacity 0.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::inventory::Room;
use crate::reservation::{Customer, Ledger, Reservation};

const FIELD_SEPARATOR: char = ',';
const FIELD_COUNT: usize = 5;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Malformed reservation on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("Reservation file {path} is unavailable: {source}")]
    Unavailable {
        path: PathBuf,
        source: std::io::Error,
    },
}

// Everything a load produced. Errors never stop the remaining lines.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub reservations: Vec<Reservation>,
    pub errors: Vec<PersistenceError>,
}

impl LoadOutcome {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

pub fn encode_record(reservation: &Reservation) -> String {
    format!(
        "{}{sep}{}{sep}{}{sep}{}{sep}{}",
        reservation.customer.name,
        reservation.customer.contact,
        reservation.customer.id_type,
        reservation.room.number,
        reservation.room.room_type,
        sep = FIELD_SEPARATOR
    )
}

/// Parses one record line. `line_number` is 1-based and only used for errors.
pub fn parse_record(line: &str, line_number: usize) -> Result<Reservation, PersistenceError> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    if fields.len() != FIELD_COUNT {
        return Err(PersistenceError::MalformedRecord {
            line: line_number,
            reason: format!("expected {} fields, found {}", FIELD_COUNT, fields.len()),
        });
    }

    let room_number = fields[3]
        .trim()
        .parse::<u32>()
        .map_err(|e| PersistenceError::MalformedRecord {
            line: line_number,
            reason: format!("invalid room number {:?}: {}", fields[3], e),
        })?;

    let customer = Customer::new(fields[0], fields[1], fields[2]);
    let mut room = Room::new(room_number, fields[4], 0);
    room.available = false;

    Ok(Reservation::new(room, customer))
}

// Raw file line to text, dropping a trailing carriage return
fn decode_line(mut raw: Vec<u8>, line_number: usize) -> Result<String, PersistenceError> {
    if raw.last() == Some(&b'\r') {
        raw.pop();
    }
    String::from_utf8(raw).map_err(|e| PersistenceError::MalformedRecord {
        line: line_number,
        reason: format!("not valid UTF-8: {}", e),
    })
}

#[derive(Debug, Clone)]
pub struct ReservationStore {
    path: PathBuf,
}

impl ReservationStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every record in the file.
    ///
    /// Bad lines are skipped and reported in `LoadOutcome::errors`. A missing or
    /// unreadable file gives an empty outcome with a single `Unavailable` error.
    pub fn load(&self) -> LoadOutcome {
        let mut outcome = LoadOutcome::default();

        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(source) => {
                if source.kind() == ErrorKind::NotFound {
                    tracing::warn!(
                        path = %self.path.display(),
                        "no reservation file, starting empty"
                    );
                } else {
                    tracing::warn!(
                        path = %self.path.display(),
                        error = %source,
                        "unable to open reservation file"
                    );
                }
                outcome.errors.push(self.unavailable(source));
                return outcome;
            }
        };

        for (index, raw) in BufReader::new(file).split(b'\n').enumerate() {
            let line_number = index + 1;
            let raw = match raw {
                Ok(raw) => raw,
                Err(source) => {
                    // Only a failing read ends the load, keeping what was parsed so far
                    tracing::warn!(
                        line = line_number,
                        error = %source,
                        "reservation file read failed"
                    );
                    outcome.errors.push(self.unavailable(source));
                    break;
                }
            };

            let record = decode_line(raw, line_number)
                .and_then(|line| parse_record(&line, line_number));
            match record {
                Ok(reservation) => outcome.reservations.push(reservation),
                Err(e) => {
                    tracing::warn!("Error loading reservation: {}", e);
                    outcome.errors.push(e);
                }
            }
        }

        tracing::info!(
            path = %self.path.display(),
            loaded = outcome.reservations.len(),
            skipped = outcome.errors.len(),
            "loaded reservations"
        );
        outcome
    }

    /// Overwrites the file with one line per ledger entry, in ledger order.
    /// Returns the number of records written.
    pub fn save(&self, ledger: &Ledger) -> Result<usize, PersistenceError> {
        let file = File::create(&self.path).map_err(|e| self.unavailable(e))?;
        let mut writer = BufWriter::new(file);

        for reservation in ledger {
            writeln!(writer, "{}", encode_record(reservation))
                .map_err(|e| self.unavailable(e))?;
        }
        writer.flush().map_err(|e| self.unavailable(e))?;

        tracing::info!(path = %self.path.display(), saved = ledger.len(), "saved reservations");
        Ok(ledger.len())
    }

    fn unavailable(&self, source: std::io::Error) -> PersistenceError {
        PersistenceError::Unavailable {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn booking(
        number: u32,
        room_type: &str,
        capacity: u32,
        name: &str,
        id_type: &str,
    ) -> Reservation {
        let mut room = Room::new(number, room_type, capacity);
        room.available = false;
        Reservation::new(room, Customer::new(name, "9876543210", id_type))
    }

    fn tuples(reservations: &[Reservation]) -> Vec<(String, String, String, u32, String)> {
        reservations
            .iter()
            .map(|r| {
                (
                    r.customer.name.clone(),
                    r.customer.contact.clone(),
                    r.customer.id_type.clone(),
                    r.room.number,
                    r.room.room_type.clone(),
                )
            })
            .collect()
    }

    #[test]
    fn test_encode_record_field_order() {
        let reservation = booking(101, "Single", 1, "Asha Rao", "Aadhar");
        assert_eq!(
            encode_record(&reservation),
            "Asha Rao,9876543210,Aadhar,101,Single"
        );
    }

    #[test]
    fn test_parse_record_resets_capacity() {
        let reservation = parse_record("Bob,1234567890,Driver's License,205,Double", 1).unwrap();
        assert_eq!(reservation.customer.name, "Bob");
        assert_eq!(reservation.customer.id_type, "Driver's License");
        assert_eq!(reservation.room.number, 205);
        assert_eq!(reservation.room.room_type, "Double");
        assert_eq!(reservation.room.capacity, 0);
        assert!(!reservation.room.available);
    }

    #[test_case(""; "blank line")]
    #[test_case("Bob,1234567890,Passport,205"; "four fields")]
    #[test_case("Rao, Asha,1234567890,Passport,205,Double"; "comma in name")]
    #[test_case("Bob,1234567890,Passport,two-oh-five,Double"; "non numeric room")]
    #[test_case("Bob,1234567890,Passport,-5,Double"; "negative room")]
    fn test_parse_record_rejects(line: &str) {
        let result = parse_record(line, 7);
        assert!(
            matches!(result, Err(PersistenceError::MalformedRecord { line: 7, .. })),
            "expected malformed record, got {:?}",
            result
        );
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReservationStore::new(dir.path().join("reservations.txt"));

        let ledger: Ledger = vec![
            booking(301, "Suite", 4, "Carol", "Passport"),
            booking(101, "Single", 1, "Asha Rao", "Aadhar"),
            booking(202, "Double", 2, "Bob", "Driver's License"),
        ]
        .into_iter()
        .collect();

        assert_eq!(store.save(&ledger).unwrap(), 3);

        let outcome = store.load();
        assert!(outcome.is_clean(), "unexpected errors: {:?}", outcome.errors);

        let saved: Vec<Reservation> = ledger.iter().cloned().collect();
        assert_eq!(tuples(&outcome.reservations), tuples(&saved));
        assert!(outcome.reservations.iter().all(|r| r.room.capacity == 0));
    }

    #[test]
    fn test_save_truncates_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReservationStore::new(dir.path().join("reservations.txt"));

        let full: Ledger = vec![
            booking(101, "Single", 1, "Alice", "Aadhar"),
            booking(102, "Single", 1, "Bob", "Passport"),
        ]
        .into_iter()
        .collect();
        store.save(&full).unwrap();

        store.save(&Ledger::new()).unwrap();
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "");
        let outcome = store.load();
        assert!(outcome.reservations.is_empty());
        assert!(outcome.is_clean());
    }

    #[test]
    fn test_load_skips_malformed_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reservations.txt");
        std::fs::write(
            &path,
            "Alice,1111111111,Aadhar,101,Single\n\
             Bob,2222222222,Passport,201,Double\n\
             Broken line without enough fields\n\
             Carol,3333333333,Passport,301,Suite\n\
             Dave,4444444444,Driver's License,102,Single\n\
             Erin,5555555555,Aadhar,202,Double\n",
        )
        .unwrap();

        let outcome = ReservationStore::new(&path).load();
        assert_eq!(outcome.reservations.len(), 5);
        assert_eq!(outcome.errors.len(), 1);
        assert!(matches!(
            outcome.errors[0],
            PersistenceError::MalformedRecord { line: 3, .. }
        ));

        let names: Vec<&str> = outcome
            .reservations
            .iter()
            .map(|r| r.customer.name.as_str())
            .collect();
        assert_eq!(names, vec!["Alice", "Bob", "Carol", "Dave", "Erin"]);
    }

    #[test]
    fn test_load_one_bad_among_five() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reservations.txt");
        std::fs::write(
            &path,
            "Alice,1111111111,Aadhar,101,Single\n\
             Bob,2222222222,Passport,xyz,Double\n\
             Carol,3333333333,Passport,301,Suite\n\
             Dave,4444444444,Driver's License,102,Single\n\
             Erin,5555555555,Aadhar,202,Double\n",
        )
        .unwrap();

        let outcome = ReservationStore::new(&path).load();
        assert_eq!(outcome.reservations.len(), 4);
        assert_eq!(outcome.errors.len(), 1);
    }

    #[test]
    fn test_load_skips_line_with_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reservations.txt");
        let mut content = b"Alice,1111111111,Aadhar,101,Single\n".to_vec();
        content.extend_from_slice(b"Bo\xffb,2222222222,Passport,201,Double\n");
        content.extend_from_slice(b"Carol,3333333333,Passport,301,Suite\n");
        content.extend_from_slice(b"Dave,4444444444,Driver's License,102,Single\n");
        std::fs::write(&path, content).unwrap();

        let outcome = ReservationStore::new(&path).load();

        let names: Vec<&str> = outcome
            .reservations
            .iter()
            .map(|r| r.customer.name.as_str())
            .collect();
        assert_eq!(names, vec!["Alice", "Carol", "Dave"]);
        assert_eq!(outcome.errors.len(), 1);
        assert!(matches!(
            outcome.errors[0],
            PersistenceError::MalformedRecord { line: 2, .. }
        ));
    }

    #[test]
    fn test_load_accepts_crlf_line_endings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reservations.txt");
        std::fs::write(&path, "Alice,1111111111,Aadhar,101,Single\r\n").unwrap();

        let outcome = ReservationStore::new(&path).load();
        assert!(outcome.is_clean());
        assert_eq!(outcome.reservations[0].room.room_type, "Single");
        assert_eq!(outcome.reservations[0].customer.name, "Alice");
    }

    #[test]
    fn test_load_missing_file_is_recoverable() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = ReservationStore::new(dir.path().join("absent.txt")).load();

        assert!(outcome.reservations.is_empty());
        assert_eq!(outcome.errors.len(), 1);
        assert!(matches!(
            &outcome.errors[0],
            PersistenceError::Unavailable { source, .. } if source.kind() == ErrorKind::NotFound
        ));
    }

    #[test]
    fn test_save_to_unwritable_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("reservations.txt");
        let store = ReservationStore::new(path);

        let result = store.save(&Ledger::new());
        assert!(matches!(result, Err(PersistenceError::Unavailable { .. })));
    }
}
