// crates/logging/src/formatter.rs
use std::fmt;
use time::{OffsetDateTime, macros::format_description};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, format::Writer};
use tracing_subscriber::registry::LookupSpan;

use crate::visitor::FieldVisitor;

/// Event formatter that prefixes every line with the emitting pid.
///
/// Forked demonstrations log from several processes into the same stream, so
/// the pid is the only way to tell the lines apart. An optional `%`-format
/// replaces the default layout:
///
/// | token | expands to |
/// |-------|------------|
/// | `%p`  | process id |
/// | `%t`  | local time |
/// | `%l`  | level      |
/// | `%T`  | target     |
/// | `%m`  | message and fields |
/// | `%%`  | a literal `%` |
pub struct DemoFormatter {
    tokens: Option<Vec<Token>>,
    timestamps: bool,
}

impl DemoFormatter {
    pub fn new(format: Option<String>) -> Self {
        Self {
            tokens: format.map(|f| parse_tokens(&f)),
            timestamps: false,
        }
    }

    pub fn with_timestamps(mut self, timestamps: bool) -> Self {
        self.timestamps = timestamps;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Token {
    Lit(String),
    Percent,
    Pid,
    Time,
    Level,
    Target,
    Message,
}

fn parse_tokens(fmt: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = fmt.chars();
    let mut lit = String::new();
    while let Some(c) = chars.next() {
        if c != '%' {
            lit.push(c);
            continue;
        }
        let tok = match chars.next() {
            Some('%') => Token::Percent,
            Some('p') => Token::Pid,
            Some('t') => Token::Time,
            Some('l') => Token::Level,
            Some('T') => Token::Target,
            Some('m') => Token::Message,
            Some(other) => {
                lit.push('%');
                lit.push(other);
                continue;
            }
            None => {
                lit.push('%');
                continue;
            }
        };
        if !lit.is_empty() {
            tokens.push(Token::Lit(std::mem::take(&mut lit)));
        }
        tokens.push(tok);
    }
    if !lit.is_empty() {
        tokens.push(Token::Lit(lit));
    }
    tokens
}

fn format_time() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let fmt = format_description!("[year]/[month]/[day] [hour]:[minute]:[second]");
    now.format(&fmt).unwrap_or_default()
}

impl<S, N> FormatEvent<S, N> for DemoFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        let meta = event.metadata();
        let pid = std::process::id();
        let mut out = String::new();
        match &self.tokens {
            Some(tokens) => {
                for tok in tokens {
                    match tok {
                        Token::Lit(s) => out.push_str(s),
                        Token::Percent => out.push('%'),
                        Token::Pid => out.push_str(&pid.to_string()),
                        Token::Time => out.push_str(&format_time()),
                        Token::Level => out.push_str(meta.level().as_str()),
                        Token::Target => out.push_str(meta.target()),
                        Token::Message => out.push_str(&visitor.render()),
                    }
                }
            }
            None => {
                if self.timestamps {
                    out.push_str(&format_time());
                    out.push(' ');
                }
                out.push_str(&format!("[{pid}] "));
                let msg = visitor.render();
                if msg.is_empty() {
                    out.push_str(meta.target());
                } else {
                    out.push_str(&msg);
                }
            }
        }
        writer.write_str(&out)?;
        writer.write_char('\n')
    }
}
