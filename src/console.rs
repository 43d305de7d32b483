//! Line based front end for the reservation view.

use std::str::FromStr;
use std::sync::Arc;
use anyhow::{anyhow, bail, Context};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{info, warn};
use crate::controller::reservation_controller::ReservationController;
use crate::controller::{Router, View};
use crate::helpers::handler_404::page_not_found_handler;
use crate::helpers::snackbar::Snackbar;
use crate::models::reservation::Reservation;
use crate::repositories::reservation_repo::ReservationRepo;
use crate::views::reservation_view;

pub const HELP: &str = "\
Commands:
  list                 reload reservations
  new                  start a new reservation
  edit <id>            edit a listed reservation
  dates <d1,d2,...>    set the dates field (YYYY-MM-DD,...)
  set <field> <value>  set a field on the form
  save                 create or update the form's reservation
  cancel               discard the form
  delete <id>          delete a listed reservation
  dismiss              close the current notification
  go <path>            open another page
  help                 show this help
  quit                 exit
";

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    List,
    New,
    Edit(i64),
    Dates(String),
    Set { field: String, value: Value },
    Save,
    Cancel,
    Delete(i64),
    Dismiss,
    Go(String),
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        let command = match name {
            "list" | "refresh" => Command::List,
            "new" => Command::New,
            "edit" => Command::Edit(parse_id(rest)?),
            "dates" => Command::Dates(rest.to_string()),
            "set" => {
                let (field, value) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| anyhow!("usage: set <field> <value>"))?;
                if field == "id" || field == "reservationDates" {
                    bail!("'{}' cannot be set directly", field);
                }
                Command::Set { field: field.to_string(), value: parse_value(value.trim()) }
            }
            "save" => Command::Save,
            "cancel" => Command::Cancel,
            "delete" => Command::Delete(parse_id(rest)?),
            "dismiss" | "close" => Command::Dismiss,
            "go" => Command::Go(rest.to_string()),
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "" => bail!("type 'help' for a list of commands"),
            other => bail!("unknown command '{}', type 'help' for a list of commands", other),
        };

        Ok(command)
    }
}

fn parse_id(text: &str) -> anyhow::Result<i64> {
    text.parse::<i64>()
        .with_context(|| format!("expected a reservation id, got '{}'", text))
}

/// JSON when the text is valid JSON, otherwise the raw text as a string.
fn parse_value(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

pub struct Console<R> {
    controller: ReservationController<R, Arc<Snackbar>>,
    snackbar: Arc<Snackbar>,
    router: Router,
}

impl<R: ReservationRepo> Console<R> {
    pub fn new(repo: R, router: Router) -> Self {
        let snackbar = Arc::new(Snackbar::default());
        Self {
            controller: ReservationController::new(repo, snackbar.clone()),
            snackbar,
            router,
        }
    }

    pub fn controller(&self) -> &ReservationController<R, Arc<Snackbar>> {
        &self.controller
    }

    pub fn snackbar(&self) -> &Snackbar {
        &self.snackbar
    }

    /// Opens `path`, then executes commands from `input` until `quit` or end
    /// of input, rendering the page to `output` after each one.
    pub async fn run<I, O>(&mut self, path: &str, input: I, mut output: O) -> anyhow::Result<()>
    where
        I: AsyncBufRead + Unpin,
        O: AsyncWrite + Unpin,
    {
        let mut on_page = self.navigate(path, &mut output).await?;
        let mut lines = input.lines();

        while let Some(line) = lines.next_line().await.context("Failed to read command")? {
            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(e) => {
                    output.write_all(format!("{:#}\n", e).as_bytes()).await?;
                    continue;
                }
            };

            match command {
                Command::Quit => break,
                Command::Help => output.write_all(HELP.as_bytes()).await?,
                Command::Go(path) => on_page = self.navigate(&path, &mut output).await?,
                _ if !on_page => {
                    output.write_all(b"not on the reservation page, try 'go reservation'\n").await?;
                }
                command => {
                    if let Err(e) = self.execute(command).await {
                        output.write_all(format!("{:#}\n", e).as_bytes()).await?;
                    }
                    self.render(&mut output).await?;
                }
            }
        }

        output.flush().await?;
        Ok(())
    }

    /// Returns whether `path` opened the reservation page.
    async fn navigate<O: AsyncWrite + Unpin>(&mut self, path: &str, output: &mut O) -> anyhow::Result<bool> {
        match self.router.resolve(path) {
            Some(View::Reservation) => {
                info!("Opening reservation page");
                self.controller.initialize().await;
                self.render(output).await?;
                Ok(true)
            }
            None => {
                warn!("No route for path '{}'", path);
                output.write_all(format!("{}\n", page_not_found_handler(path)).as_bytes()).await?;
                Ok(false)
            }
        }
    }

    pub async fn execute(&mut self, command: Command) -> anyhow::Result<()> {
        match command {
            Command::List => self.controller.get_all_reservations().await,
            Command::New | Command::Cancel => self.controller.cancel_edit(),
            Command::Edit(id) => {
                let reservation = self.listed(id)?;
                self.controller.begin_edit(&reservation);
            }
            Command::Dates(dates) => self.controller.set_reservation_dates_str(dates),
            Command::Set { field, value } => self.controller.set_detail(field, value),
            Command::Save => self.controller.save().await,
            Command::Delete(id) => {
                let reservation = self.listed(id)?;
                self.controller.delete(&reservation).await;
            }
            Command::Dismiss => {
                self.snackbar.dismiss();
            }
            Command::Go(_) | Command::Help | Command::Quit => {}
        }
        Ok(())
    }

    fn listed(&self, id: i64) -> anyhow::Result<Reservation> {
        self.controller
            .find(id)
            .cloned()
            .ok_or_else(|| anyhow!("no listed reservation with id {}", id))
    }

    async fn render<O: AsyncWrite + Unpin>(&self, output: &mut O) -> anyhow::Result<()> {
        let notification = self.snackbar.current();
        let page = reservation_view::render(&self.controller, notification.as_ref());
        output.write_all(page.as_bytes()).await?;
        output.write_all(b"\n> ").await?;
        output.flush().await?;
        Ok(())
    }
}
