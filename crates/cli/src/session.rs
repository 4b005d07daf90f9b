//! The interactive session: one catalog, one input stream, one output stream.

use std::io::{BufRead, Write};

use storekeep_catalog::Catalog;
use storekeep_core::{AggregateRoot, SessionId};

use crate::command::{Command, CommandKind};
use crate::config::{Config, OutputFormat};
use crate::error::SessionError;
use crate::render::{render, Outcome, MENU};

/// Whether the read loop should keep going.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Session controller.
///
/// Owns the catalog for the lifetime of the session. Commands run one at a
/// time; a rejected command is reported and the loop carries on. Only I/O
/// failures on the streams end the session early.
pub struct Session<R, W> {
    id: SessionId,
    catalog: Catalog,
    input: R,
    output: W,
    format: OutputFormat,
    prompt: bool,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, config: &Config) -> Self {
        Self {
            id: SessionId::new(),
            catalog: Catalog::new(),
            input,
            output,
            format: config.output,
            prompt: config.prompt,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Everything written so far (useful with in-memory writers).
    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Read and execute commands until `exit` or end of input.
    pub fn run(&mut self) -> Result<(), SessionError> {
        let span = tracing::info_span!("session", session_id = %self.id);
        let _enter = span.enter();
        tracing::info!("session started");

        if self.prompt {
            self.write_line(MENU)?;
        }

        loop {
            match self.step() {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(e) if e.is_recoverable() => self.report(&e)?,
                Err(e) => return Err(e),
            }
        }

        tracing::info!(
            products = self.catalog.len(),
            version = self.catalog.version(),
            "session ended"
        );
        Ok(())
    }

    /// Run a single parsed command and write its result.
    pub fn execute(&mut self, command: Command) -> Result<Flow, SessionError> {
        let format = self.format;
        let catalog = &mut self.catalog;

        let text = match &command {
            Command::Add { name, price } => {
                catalog.add_product(name, *price)?;
                render(format, &Outcome::Added(name))
            }
            Command::Update { name, price } => {
                catalog.update_product(name, *price)?;
                render(format, &Outcome::Updated(name))
            }
            Command::Delete { name } => {
                catalog.delete_product(name)?;
                render(format, &Outcome::Deleted(name))
            }
            Command::Bundle {
                bundle,
                first,
                second,
            } => {
                let outcome = catalog.assign_pair_to_bundle(bundle, first, second);
                for e in outcome.failures() {
                    tracing::warn!(bundle = bundle.as_str(), error = %e, "bundle assignment rejected");
                }
                render(
                    format,
                    &Outcome::PairAssigned {
                        bundle,
                        first,
                        second,
                        outcome: &outcome,
                    },
                )
            }
            Command::Assign { bundle, product } => {
                catalog.assign_to_bundle(bundle, product)?;
                render(format, &Outcome::Assigned { bundle, product })
            }
            Command::Show { bundle } => {
                let members: Vec<_> = catalog.bundle_members(bundle)?.collect();
                render(format, &Outcome::BundleMembers { bundle, members })
            }
            Command::List => render(format, &Outcome::Products(catalog.products().collect())),
            Command::Bundles => render(format, &Outcome::Bundles(catalog.bundles().collect())),
            Command::History => render(format, &Outcome::History(catalog.history().collect())),
            Command::Help => render(format, &Outcome::Menu),
            Command::Exit => {
                self.write_line(&render(format, &Outcome::Goodbye))?;
                return Ok(Flow::Exit);
            }
        };

        self.write_line(&text)?;
        Ok(Flow::Continue)
    }

    fn step(&mut self) -> Result<Flow, SessionError> {
        if self.prompt {
            self.write_prompt("Enter your choice: ")?;
        }
        let Some(line) = self.read_line()? else {
            return Ok(Flow::Exit);
        };

        let mut tokens = line.split_whitespace();
        let Some(choice) = tokens.next() else {
            return Ok(Flow::Continue);
        };
        let kind: CommandKind = choice.parse()?;
        let mut args: Vec<String> = tokens.map(str::to_string).collect();

        for prompt in kind.arg_prompts().iter().skip(args.len()) {
            if self.prompt {
                self.write_prompt(&format!("Enter {prompt}: "))?;
            }
            match self.read_line()? {
                Some(value) => args.push(value.trim().to_string()),
                None => return Err(SessionError::MissingArgument(*prompt)),
            }
        }

        let command = Command::build(kind, args)?;
        tracing::debug!(?command, "executing command");
        self.execute(command)
    }

    fn report(&mut self, error: &SessionError) -> Result<(), SessionError> {
        tracing::warn!(error = %error, kind = error.kind(), "command rejected");
        let text = render(self.format, &Outcome::Failed(error));
        self.write_line(&text)
    }

    /// Next input line, or `None` at end of input.
    ///
    /// A line that is not UTF-8 is consumed and rejected with `InvalidInput`,
    /// so the next read starts on the following line.
    fn read_line(&mut self) -> Result<Option<String>, SessionError> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        String::from_utf8(buf)
            .map(Some)
            .map_err(|_| SessionError::InvalidInput)
    }

    fn write_line(&mut self, text: &str) -> Result<(), SessionError> {
        writeln!(self.output, "{text}")?;
        self.output.flush()?;
        Ok(())
    }

    fn write_prompt(&mut self, text: &str) -> Result<(), SessionError> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        Ok(())
    }
}
