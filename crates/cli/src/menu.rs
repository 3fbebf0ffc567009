//! Interactive text menu over a [`RecordStore`].
//!
//! Lines arrive over a channel so the loop can stop on shutdown without
//! waiting for the next line of input.

use std::io::Write;
use std::sync::Arc;
use rollbook_core::{RollNo, Student};
use rollbook_storage::{RecordStore, StoreError};
use rollbook_work::InterruptHandle;
use tokio::sync::mpsc;
use tracing::debug;

use crate::prompt::{parse_marks, parse_roll_no, parse_text, InvalidInput};

/// Roll number of the sample record added by the demo entry.
const DEMO_ROLL_NO: i32 = 102;

#[derive(Debug, thiserror::Error)]
enum ActionError {
    #[error("{0}")]
    Input(String),

    #[error("{0}")]
    NotFound(String),

    #[error("input closed")]
    Closed,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl From<InvalidInput> for ActionError {
    fn from(e: InvalidInput) -> Self {
        Self::Input(e.0)
    }
}

impl From<StoreError> for ActionError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Validation(msg) => Self::Input(msg),
            StoreError::NotFound(msg) => Self::NotFound(msg),
        }
    }
}

/// The interactive menu.
pub struct Menu<S: ?Sized, W> {
    store: Arc<S>,
    input: mpsc::Receiver<String>,
    out: W,
    shutdown: InterruptHandle,
    json: bool,
}

impl<S, W> Menu<S, W>
where
    S: RecordStore + ?Sized,
    W: Write,
{
    /// Create a menu reading lines from `input` and writing to `out`.
    pub fn new(store: Arc<S>, input: mpsc::Receiver<String>, out: W, shutdown: InterruptHandle) -> Self {
        Self {
            store,
            input,
            out,
            shutdown,
            json: false,
        }
    }

    /// Render "Display All" as JSON.
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Run until Exit, end of input, or shutdown.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            if self.shutdown.is_interrupted() {
                debug!("shutdown requested, leaving menu");
                break;
            }

            self.print_menu()?;
            let Some(line) = self.read_line("Choice: ").await? else {
                break;
            };

            let choice: i32 = match line.parse() {
                Ok(choice) => choice,
                Err(_) => {
                    writeln!(self.out, "Enter a valid number.")?;
                    continue;
                }
            };

            let result = match choice {
                1 => self.add_student().await,
                2 => self.display_all().await,
                3 => self.search_student().await,
                4 => self.update_student().await,
                5 => self.delete_student().await,
                6 => self.add_demo().await,
                7 => {
                    writeln!(self.out, "Program execution completed.")?;
                    break;
                }
                _ => {
                    writeln!(self.out, "Invalid choice.")?;
                    continue;
                }
            };

            match result {
                Ok(()) => {}
                Err(ActionError::Input(msg)) => writeln!(self.out, "Input error: {}", msg)?,
                Err(ActionError::NotFound(msg)) => writeln!(self.out, "Not found: {}", msg)?,
                Err(ActionError::Json(e)) => writeln!(self.out, "Error: {}", e)?,
                Err(ActionError::Closed) => break,
                Err(ActionError::Io(e)) => return Err(e.into()),
            }
        }

        Ok(())
    }

    fn print_menu(&mut self) -> std::io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "===== Menu =====")?;
        writeln!(self.out, "1. Add Student")?;
        writeln!(self.out, "2. Display All Students")?;
        writeln!(self.out, "3. Search Student")?;
        writeln!(self.out, "4. Update Student")?;
        writeln!(self.out, "5. Delete Student")?;
        writeln!(self.out, "6. Demo: Add sample student (quick)")?;
        writeln!(self.out, "7. Exit")
    }

    // === Actions ===

    async fn add_student(&mut self) -> Result<(), ActionError> {
        let roll_no = self.ask_roll_no("Enter Roll No (Integer): ").await?;
        let student = self.ask_fields(roll_no, "").await?;
        self.store.add(student).await?;
        writeln!(self.out, "Student added.")?;
        Ok(())
    }

    async fn display_all(&mut self) -> Result<(), ActionError> {
        let students = self.store.list_all().await;
        if students.is_empty() {
            writeln!(self.out, "No records.")?;
        } else if self.json {
            writeln!(self.out, "{}", serde_json::to_string_pretty(&students)?)?;
        } else {
            for student in &students {
                writeln!(self.out, "{}", student)?;
            }
        }
        Ok(())
    }

    async fn search_student(&mut self) -> Result<(), ActionError> {
        let roll_no = self.ask_roll_no("Enter Roll No to search: ").await?;
        let found = self.store.search(roll_no).await?;
        writeln!(self.out, "Student found:")?;
        writeln!(self.out, "{}", found)?;
        Ok(())
    }

    async fn update_student(&mut self) -> Result<(), ActionError> {
        let roll_no = self.ask_roll_no("Enter Roll No to update: ").await?;
        let existing = self.store.search(roll_no).await?;
        writeln!(self.out, "Existing record:")?;
        writeln!(self.out, "{}", existing)?;

        let student = self.ask_fields(roll_no, "New ").await?;
        self.store.update(roll_no, student).await?;
        writeln!(self.out, "Student updated.")?;
        Ok(())
    }

    async fn delete_student(&mut self) -> Result<(), ActionError> {
        let roll_no = self.ask_roll_no("Enter Roll No to delete: ").await?;
        self.store.delete(roll_no).await?;
        writeln!(self.out, "Student deleted.")?;
        Ok(())
    }

    async fn add_demo(&mut self) -> Result<(), ActionError> {
        let demo = Student::new(DEMO_ROLL_NO, "Karan", "karan@mail.com", "BCA", 77.5);
        match self.store.add(demo.clone()).await {
            Ok(()) => {
                writeln!(self.out, "Student added.")?;
                writeln!(self.out, "Loading.....")?;
                writeln!(self.out, "{}", demo)?;
            }
            Err(e) => writeln!(self.out, "Demo error: {}", e)?,
        }
        Ok(())
    }

    // === Prompts ===

    async fn read_line(&mut self, prompt: &str) -> std::io::Result<Option<String>> {
        write!(self.out, "{}", prompt)?;
        self.out.flush()?;

        let line = tokio::select! {
            biased;
            _ = self.shutdown.interrupted() => None,
            line = self.input.recv() => line,
        };
        Ok(line.map(|l| l.trim().to_string()))
    }

    async fn ask(&mut self, prompt: &str) -> Result<String, ActionError> {
        self.read_line(prompt).await?.ok_or(ActionError::Closed)
    }

    async fn ask_roll_no(&mut self, prompt: &str) -> Result<RollNo, ActionError> {
        let line = self.ask(prompt).await?;
        Ok(parse_roll_no(&line)?)
    }

    async fn ask_text(&mut self, prompt: &str) -> Result<String, ActionError> {
        let line = self.ask(prompt).await?;
        Ok(parse_text(&line)?)
    }

    async fn ask_marks(&mut self, prompt: &str) -> Result<f64, ActionError> {
        let line = self.ask(prompt).await?;
        Ok(parse_marks(&line)?)
    }

    /// Prompt for every field except the roll number.
    async fn ask_fields(&mut self, roll_no: RollNo, qualifier: &str) -> Result<Student, ActionError> {
        let name = self.ask_text(&format!("Enter {}Name: ", qualifier)).await?;
        let email = self.ask_text(&format!("Enter {}Email: ", qualifier)).await?;
        let course = self.ask_text(&format!("Enter {}Course: ", qualifier)).await?;
        let marks = self.ask_marks(&format!("Enter {}Marks (0-100): ", qualifier)).await?;
        Ok(Student::new(roll_no, name, email, course, marks))
    }
}
