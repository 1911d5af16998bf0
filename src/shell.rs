// Interactive menu driving the reservation manager
// Generic over its input and output so it can run against stdin/stdout or in-memory buffers.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use crate::manager::ReservationManager;
use crate::persistence::ReservationStore;

const RULE: &str = "-------------------------------------------";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ListRooms,
    Reserve,
    Checkout,
    Quit,
}

impl FromStr for Command {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Command::ListRooms),
            "2" => Ok(Command::Reserve),
            "3" => Ok(Command::Checkout),
            "4" => Ok(Command::Quit),
            _ => Err(()),
        }
    }
}

pub struct Shell<R, W> {
    manager: ReservationManager,
    store: ReservationStore,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(manager: ReservationManager, store: ReservationStore, input: R, output: W) -> Self {
        Self {
            manager,
            store,
            input,
            output,
        }
    }

    pub fn into_parts(self) -> (ReservationManager, W) {
        (self.manager, self.output)
    }

    /// Runs the menu loop until the operator quits or input ends. Either way
    /// the ledger is saved before returning.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.print_menu()?;
            let Some(choice) = self.prompt("Enter your choice: ")? else {
                tracing::info!("input closed, saving and exiting");
                self.save()?;
                return Ok(());
            };

            match choice.parse::<Command>() {
                Ok(Command::ListRooms) => self.list_rooms()?,
                Ok(Command::Reserve) => self.reserve()?,
                Ok(Command::Checkout) => self.checkout()?,
                Ok(Command::Quit) => {
                    writeln!(self.output, "Exiting program. Saving reservations to file...")?;
                    self.save()?;
                    return Ok(());
                }
                Err(()) => {
                    writeln!(self.output, "Invalid choice. Please enter a number from 1 to 4.")?;
                }
            }
        }
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "{}", RULE)?;
        writeln!(self.output, "Welcome to the Hotel Reservation System!")?;
        writeln!(self.output, "{}", RULE)?;
        writeln!(self.output, "1. Display available rooms")?;
        writeln!(self.output, "2. Reserve a room")?;
        writeln!(self.output, "3. Check out from a room")?;
        writeln!(self.output, "4. Quit")?;
        writeln!(self.output, "{}", RULE)
    }

    // Prints `message` and reads one line without its line ending. None at end of input.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn prompt_room_number(&mut self, message: &str) -> io::Result<Option<u32>> {
        let Some(raw) = self.prompt(message)? else {
            return Ok(None);
        };
        match raw.trim().parse::<u32>() {
            Ok(number) => Ok(Some(number)),
            Err(_) => {
                writeln!(self.output, "Invalid room number.")?;
                Ok(None)
            }
        }
    }

    fn list_rooms(&mut self) -> io::Result<()> {
        writeln!(self.output, "Available Rooms:")?;
        for status in self.manager.list_availability() {
            writeln!(self.output, "{}", status)?;
        }
        Ok(())
    }

    fn reserve(&mut self) -> io::Result<()> {
        let Some(room_number) = self.prompt_room_number("Enter room number: ")? else {
            return Ok(());
        };
        let Some(name) = self.prompt("Enter customer name: ")? else {
            return Ok(());
        };
        let Some(contact) = self.prompt("Enter customer contact: ")? else {
            return Ok(());
        };
        let id_prompt = format!(
            "Enter ID type ({}): ",
            self.manager.rules().id_types.join("/")
        );
        let Some(id_type) = self.prompt(&id_prompt)? else {
            return Ok(());
        };

        match self
            .manager
            .reserve(room_number, name.trim(), contact.trim(), id_type.trim())
        {
            Ok(reservation) => {
                writeln!(self.output, "Room {} reserved successfully.", room_number)?;
                writeln!(self.output, "Customer Name: {}", reservation.customer.name)?;
                writeln!(self.output, "Customer Contact: {}", reservation.customer.contact)?;
                writeln!(self.output, "ID Type: {}", reservation.customer.id_type)?;
                writeln!(self.output, "Room Type: {}", reservation.room.room_type)?;
            }
            Err(e) => writeln!(self.output, "{}", e)?,
        }
        Ok(())
    }

    fn checkout(&mut self) -> io::Result<()> {
        let Some(room_number) = self.prompt_room_number("Enter room number to check out: ")?
        else {
            return Ok(());
        };

        match self.manager.checkout(room_number) {
            Ok(_) => writeln!(
                self.output,
                "Room {} has been checked out and is now available.",
                room_number
            )?,
            Err(e) => writeln!(self.output, "{}", e)?,
        }
        Ok(())
    }

    // Save failures are reported to the operator but do not fail the shell
    fn save(&mut self) -> io::Result<()> {
        if let Err(e) = self.store.save(self.manager.ledger()) {
            tracing::error!("Unable to save reservations: {}", e);
            writeln!(self.output, "Unable to open reservation file for writing.")?;
        }
        Ok(())
    }
}
