//! Interactive console
//!
//! Reads one command per line, runs it against the [`LinkService`] and
//! prints a single-line summary of the outcome. Command failures are
//! printed and the loop keeps going; only I/O errors end it.

use std::io::Write;
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use colored::Colorize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};
use uuid::Uuid;

use super::CliError;
use super::parser::{CommandParser, ParsedCommand, normalize_shortlink_input};
use super::session::Session;
use crate::services::LinkService;
use crate::storage::LinkStatus;
use crate::system::BrowserOpener;

const HELP: &str = "\
Commands:
  help
  whoami
  new-user
  login <uuid>
  create \"<url>\" <maxClicks>
  open <code>
  list
  update-limit <code> <newLimit>
  delete <code>
  cleanup
  stats
  exit|quit
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplControl {
    Continue,
    Exit,
}

pub struct Repl<W: Write> {
    service: Arc<LinkService>,
    session: Session,
    parser: CommandParser,
    browser: Option<BrowserOpener>,
    out: W,
}

fn format_time(at: Option<DateTime<Utc>>) -> String {
    at.map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_else(|| "-".to_string())
}

fn parse_count(raw: &str, what: &str) -> Result<i64, CliError> {
    raw.parse::<i64>()
        .map_err(|_| CliError::ParseError(format!("{} must be an integer, got '{}'", what, raw)))
}

impl<W: Write> Repl<W> {
    pub fn new(service: Arc<LinkService>, open_browser: bool, out: W) -> Self {
        let session = Session::new(service.identity_provider());
        Self {
            service,
            session,
            parser: CommandParser::new(),
            browser: open_browser.then(BrowserOpener::new),
            out,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Run until `exit`/`quit` or end of input
    pub async fn run<R: AsyncBufRead + Unpin>(&mut self, input: R) -> Result<(), CliError> {
        writeln!(self.out, "{}", "URL Shortener CLI".bold().green())?;
        writeln!(self.out, "Type 'help'.")?;

        let mut lines = input.lines();
        loop {
            write!(self.out, "> ")?;
            self.out.flush()?;

            let Some(line) = lines.next_line().await? else {
                debug!("Repl: end of input");
                break;
            };
            if self.handle_line(&line)? == ReplControl::Exit {
                break;
            }
        }
        Ok(())
    }

    /// Execute one console line, printing its result
    pub fn handle_line(&mut self, line: &str) -> std::io::Result<ReplControl> {
        let line = normalize_shortlink_input(line, self.service.base_url());
        let cmd = self.parser.parse(&line);
        if cmd.is_empty() {
            return Ok(ReplControl::Continue);
        }

        match self.dispatch(&cmd) {
            Ok(control) => Ok(control),
            Err(CliError::Io(e)) => Err(e),
            Err(e) => {
                writeln!(self.out, "{} {}", "ERROR:".red().bold(), e.message())?;
                Ok(ReplControl::Continue)
            }
        }
    }

    fn usage(&mut self, text: &str) -> Result<ReplControl, CliError> {
        writeln!(self.out, "Usage: {}", text)?;
        Ok(ReplControl::Continue)
    }

    fn dispatch(&mut self, cmd: &ParsedCommand) -> Result<ReplControl, CliError> {
        let args = &cmd.args;
        match cmd.name.as_str() {
            "help" => write!(self.out, "{}", HELP)?,
            "whoami" => {
                let user = self.session.ensure_user();
                writeln!(self.out, "user={}", user)?;
            }
            "new-user" => {
                let user = self.session.new_user();
                writeln!(self.out, "user={}", user)?;
            }
            "login" => {
                if args.len() != 1 {
                    return self.usage("login <uuid>");
                }
                let user = Uuid::parse_str(&args[0])
                    .map_err(|_| CliError::ParseError(format!("Invalid UUID: {}", args[0])))?;
                self.session.login(user);
                writeln!(self.out, "user={}", user)?;
            }
            "create" => {
                if args.len() != 2 {
                    return self.usage("create \"<url>\" <maxClicks>");
                }
                let max_clicks = parse_count(&args[1], "maxClicks")?;
                let user = self.session.ensure_user();
                let res = self.service.create(Some(user), &args[0], max_clicks)?;
                writeln!(
                    self.out,
                    "OK short={} code={} expiresAt={} user={}",
                    res.short_url,
                    res.code,
                    format_time(Some(res.expires_at)),
                    res.owner_id
                )?;
            }
            "open" => {
                if args.len() != 1 {
                    return self.usage("open <code>");
                }
                self.open(&args[0])?;
            }
            "list" => {
                let user = self.session.ensure_user();
                let links = self.service.list(&user);
                if links.is_empty() {
                    writeln!(self.out, "No links for user={}", user)?;
                }
                for link in links {
                    writeln!(
                        self.out,
                        "- code={} url={} clicks={}/{} expiresAt={}",
                        link.code,
                        link.url,
                        link.click_count,
                        link.click_limit,
                        format_time(Some(link.expires_at))
                    )?;
                }
            }
            "update-limit" => {
                if args.len() != 2 {
                    return self.usage("update-limit <code> <newLimit>");
                }
                let new_limit = parse_count(&args[1], "newLimit")?;
                let user = self.session.ensure_user();
                let res = self.service.update_limit(&user, &args[0], new_limit);
                writeln!(self.out, "status={} msg={}", res.status, res.message)?;
            }
            "delete" => {
                if args.len() != 1 {
                    return self.usage("delete <code>");
                }
                let user = self.session.ensure_user();
                let res = self.service.delete(&user, &args[0]);
                writeln!(self.out, "status={} msg={}", res.status, res.message)?;
            }
            "cleanup" => {
                let removed = self.service.cleanup_expired_now();
                writeln!(self.out, "removed={}", removed)?;
            }
            "stats" => {
                writeln!(
                    self.out,
                    "links={} codeLength={} baseUrl={}",
                    self.service.link_count(),
                    self.service.code_length(),
                    self.service.base_url()
                )?;
            }
            "exit" | "quit" => {
                writeln!(self.out, "Bye")?;
                return Ok(ReplControl::Exit);
            }
            _ => writeln!(self.out, "Unknown command. Type 'help'.")?,
        }
        Ok(ReplControl::Continue)
    }

    fn open(&mut self, code: &str) -> Result<(), CliError> {
        let res = self.service.open(code);
        writeln!(
            self.out,
            "status={} clicks={}/{} expiresAt={} msg={}",
            res.status,
            res.click_count,
            res.click_limit,
            format_time(res.expires_at),
            res.message
        )?;

        if res.status != LinkStatus::Active {
            return Ok(());
        }
        let Some(url) = res.url else {
            return Ok(());
        };

        match self.browser.as_ref().map(|b| b.open(&url)) {
            Some(Ok(())) => writeln!(self.out, "Opened: {}", url)?,
            Some(Err(e)) => {
                warn!("Repl: could not open browser: {}", e);
                writeln!(self.out, "URL: {}", url)?;
            }
            None => writeln!(self.out, "URL: {}", url)?,
        }
        Ok(())
    }
}
