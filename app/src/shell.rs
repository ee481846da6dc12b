//! Line-oriented shell over the store
//!
//! Reads one command per line, dispatches it, waits for the resulting
//! effects to settle and prints the current screen.
//!
//! ```text
//! go /article/how-to-train-your-dragon
//! press favorite-article
//! submit form-comment body=Great read, thanks
//! show
//! quit
//! ```

use crate::AppStore;
use crate::actions::AppAction;
use crate::error::{AppError, Result};
use crate::render::render;
use crate::views::{self, FormKind, Intent};
use conduit_api::ConduitApi;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Shown for `help` and unknown commands
pub const HELP: &str = "\
commands:
  go <path>                       navigate to a location
  press <control>                 activate a link or button
  submit <form> key=value ...     submit a form (values may contain spaces)
  show                            print the current page
  quit                            exit";

/// A parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Navigate to a location
    Go(String),
    /// Activate a control
    Press(String),
    /// Submit a form control with already separated fields
    Submit {
        /// Form control id
        form: String,
        /// Entered `key=value` pairs
        fields: Vec<(String, String)>,
    },
    /// Submit a form control with the `key=value ...` text typed after its id
    ///
    /// The text is split on the form's own field names, so values keep
    /// their spacing and may contain `=`.
    SubmitLine {
        /// Form control id
        form: String,
        /// Everything after the form id
        input: String,
    },
    /// Print the current screen
    Show,
    /// Print the command list
    Help,
    /// Exit
    Quit,
}

impl Command {
    /// Parse one input line; blank lines yield `None`
    ///
    /// `go` and `press` take the rest of the line, so control ids may contain
    /// spaces.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UnknownCommand`] for unrecognised or incomplete
    /// commands.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let unknown = || AppError::UnknownCommand(line.to_string());
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(verb, rest)| (verb, rest.trim_start()));
        let argument = || {
            if rest.is_empty() {
                Err(unknown())
            } else {
                Ok(rest.to_string())
            }
        };

        let command = match verb {
            "go" => Self::Go(argument()?),
            "press" => Self::Press(argument()?),
            "submit" => {
                let (form, input) = rest
                    .split_once(char::is_whitespace)
                    .map_or((rest, ""), |(form, input)| (form, input.trim_start()));
                if form.is_empty() {
                    return Err(unknown());
                }
                if !input.is_empty() && !first_word(input).contains('=') {
                    return Err(unknown());
                }
                Self::SubmitLine {
                    form: form.to_string(),
                    input: input.to_string(),
                }
            },
            "show" => Self::Show,
            "help" => Self::Help,
            "quit" | "exit" => Self::Quit,
            _ => return Err(unknown()),
        };
        Ok(Some(command))
    }
}

fn first_word(text: &str) -> &str {
    text.split_whitespace().next().unwrap_or_default()
}

/// Split `key=value ...` text on the given field names
///
/// A field starts at a word beginning with `name=` for one of `names`; every
/// other word belongs to the value before it. Values keep their inner
/// spacing.
///
/// # Errors
///
/// Returns [`AppError::UnknownField`] when the text does not start with one
/// of `names`.
pub fn split_fields(form: &str, input: &str, names: &[&str]) -> Result<Vec<(String, String)>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(Vec::new());
    }

    let starts: Vec<(usize, &str)> = input
        .char_indices()
        .filter(|&(at, c)| {
            !c.is_whitespace() && input[..at].chars().next_back().is_none_or(char::is_whitespace)
        })
        .filter_map(|(at, _)| {
            let word = &input[at..];
            names
                .iter()
                .find(|name| word.strip_prefix(**name).is_some_and(|rest| rest.starts_with('=')))
                .map(|name| (at, *name))
        })
        .collect();

    if starts.first().is_none_or(|&(at, _)| at != 0) {
        let word = first_word(input);
        let field = word.split_once('=').map_or(word, |(key, _)| key);
        return Err(AppError::UnknownField {
            form: form.to_string(),
            field: field.to_string(),
        });
    }

    let fields = starts
        .iter()
        .enumerate()
        .map(|(i, &(at, name))| {
            let end = starts.get(i + 1).map_or(input.len(), |&(next, _)| next);
            let value = input[at + name.len() + 1..end].trim_end();
            (name.to_string(), value.to_string())
        })
        .collect();
    Ok(fields)
}

/// Whether the shell keeps reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next command
    Continue,
    /// Stop
    Quit,
}

/// The shell: a store plus command execution
pub struct Shell<C: ConduitApi> {
    store: AppStore<C>,
}

impl<C: ConduitApi> Shell<C> {
    /// Wrap a store
    #[must_use]
    pub const fn new(store: AppStore<C>) -> Self {
        Self { store }
    }

    /// The underlying store
    #[must_use]
    pub const fn store(&self) -> &AppStore<C> {
        &self.store
    }

    /// Dispatch an action and wait for its effects to settle
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] if the store is shutting down.
    pub async fn dispatch(&self, action: AppAction) -> Result<()> {
        self.store.send(action).await?;
        self.store.settle().await;
        Ok(())
    }

    /// The current screen as text
    pub async fn screen_text(&self) -> String {
        self.store.state(|state| render(&views::screen(state))).await
    }

    /// Execute one command
    ///
    /// # Errors
    ///
    /// Fails when the command names a control that is not on screen, presses
    /// a form, submits something that is not a form, or enters a field the
    /// form does not have.
    pub async fn execute(&self, command: Command) -> Result<Flow> {
        match command {
            Command::Go(path) => self.dispatch(AppAction::Navigate { path }).await?,
            Command::Press(id) => {
                let intent = self.intent(&id).await?;
                let action = match intent {
                    Intent::Navigate(path) => AppAction::Navigate { path },
                    Intent::Dispatch(action) => action,
                    Intent::Form { .. } => return Err(AppError::NotPressable(id)),
                };
                self.dispatch(action).await?;
            },
            Command::Submit { form, fields } => {
                let (kind, prefilled) = self.form(&form).await?;
                let action = views::submit(&kind, &prefilled, &fields)?;
                self.dispatch(action).await?;
            },
            Command::SubmitLine { form, input } => {
                let (kind, prefilled) = self.form(&form).await?;
                let fields = split_fields(&form, &input, kind.field_names())?;
                let action = views::submit(&kind, &prefilled, &fields)?;
                self.dispatch(action).await?;
            },
            Command::Show | Command::Help => {},
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    async fn form(&self, id: &str) -> Result<(FormKind, Vec<(String, String)>)> {
        match self.intent(id).await? {
            Intent::Form { kind, fields } => Ok((kind, fields)),
            _ => Err(AppError::NotAForm(id.to_string())),
        }
    }

    async fn intent(&self, id: &str) -> Result<Intent> {
        self.store
            .state(|state| {
                views::screen(state)
                    .control(id)
                    .map(|control| control.intent.clone())
            })
            .await
            .ok_or_else(|| AppError::UnknownControl(id.to_string()))
    }

    /// Read commands from `input` until EOF or `quit`, printing to `output`
    ///
    /// Command errors are printed and do not stop the loop.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Io`] if reading input or writing output fails.
    pub async fn run<R, W>(&self, input: R, mut output: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        output.write_all(self.screen_text().await.as_bytes()).await?;
        output.flush().await?;

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            let reply = match Command::parse(&line) {
                Ok(None) => continue,
                Ok(Some(Command::Help)) => format!("{HELP}\n"),
                Ok(Some(command)) => match self.execute(command).await {
                    Ok(Flow::Quit) => break,
                    Ok(Flow::Continue) => self.screen_text().await,
                    Err(error) => {
                        tracing::debug!(%error, "Command failed");
                        format!("error: {error}\n")
                    },
                },
                Err(error) => format!("error: {error}\n{HELP}\n"),
            };
            output.write_all(reply.as_bytes()).await?;
            output.flush().await?;
        }

        Ok(())
    }
}
