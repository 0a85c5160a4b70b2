//! Query source handling.
//!
//! A query is treated as lines of text with inline parameter declarations
//! such as `%%user_id i64%%` or `%%order_by String,interpolate%%`. The SQL
//! itself is never parsed.

use crate::error::{Error, Result};
use crate::model::QueryParam;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use tracing::debug;

/// Default parameter delimiter.
pub const DEFAULT_PARAM_DELIMITER: &str = "%%";

/// Bind placeholder syntax of the target dialect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceholderStyle {
    /// `$1`, `$2`, ... (PostgreSQL).
    #[default]
    Dollar,
    /// `?` (MySQL, SQLite).
    Question,
    /// `:1`, `:2`, ... (Oracle).
    Colon,
}

impl PlaceholderStyle {
    /// Render the placeholder for the one-based bind position `n`.
    pub fn render(self, n: usize) -> String {
        match self {
            PlaceholderStyle::Dollar => format!("${n}"),
            PlaceholderStyle::Question => "?".to_string(),
            PlaceholderStyle::Colon => format!(":{n}"),
        }
    }

    /// Whether a placeholder can refer back to an earlier bind position.
    pub const fn is_numbered(self) -> bool {
        !matches!(self, PlaceholderStyle::Question)
    }
}

impl FromStr for PlaceholderStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "dollar" => Ok(PlaceholderStyle::Dollar),
            "question" => Ok(PlaceholderStyle::Question),
            "colon" => Ok(PlaceholderStyle::Colon),
            other => Err(Error::UnknownPlaceholderStyle(other.to_string())),
        }
    }
}

/// Options controlling how query text is split and substituted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryOptions {
    /// Trim each line and drop blank ones.
    pub trim: bool,
    /// Remove whole-line `--` comments, attaching them to the next line.
    pub strip_comments: bool,
    /// Interpolate parameters unless they opt out with `,bind`.
    pub interpolate: bool,
    /// Default for queries returning at most one row.
    pub only_one: bool,
    /// Delimiter around parameter declarations.
    pub param_delimiter: String,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            trim: false,
            strip_comments: false,
            interpolate: false,
            only_one: false,
            param_delimiter: DEFAULT_PARAM_DELIMITER.to_string(),
        }
    }
}

/// Query text split into lines, with parameters substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySource {
    /// Lines with placeholders in place of declarations.
    pub lines: Vec<String>,
    /// Leading comment of each line, empty for none.
    pub line_comments: Vec<String>,
    /// Declared parameters in order of first use.
    pub params: Vec<QueryParam>,
}

impl QuerySource {
    /// Split and substitute the text of query `name`.
    pub fn parse(
        name: &str,
        text: &str,
        options: &QueryOptions,
        placeholder: PlaceholderStyle,
    ) -> Result<Self> {
        if options.param_delimiter.is_empty() {
            return Err(Error::EmptyParamDelimiter {
                query: name.to_string(),
            });
        }

        let mut subst = Substitution {
            query: name,
            options,
            placeholder,
            params: Vec::new(),
            slots: HashMap::new(),
        };

        let mut lines = Vec::new();
        let mut line_comments = Vec::new();
        let mut pending: Vec<String> = Vec::new();

        for (number, raw) in text.lines().enumerate() {
            let line = if options.trim { raw.trim() } else { raw };

            if options.strip_comments {
                if let Some(comment) = line.trim_start().strip_prefix("--") {
                    pending.push(comment.trim().to_string());
                    continue;
                }
            }
            if options.trim && line.is_empty() {
                continue;
            }

            lines.push(subst.line(number + 1, line)?);
            line_comments.push(pending.join(" "));
            pending.clear();
        }

        if !pending.is_empty() {
            debug!(query = name, dropped = pending.len(), "dropping trailing query comments");
        }

        Ok(Self {
            lines,
            line_comments,
            params: subst.params,
        })
    }
}

struct Substitution<'a> {
    query: &'a str,
    options: &'a QueryOptions,
    placeholder: PlaceholderStyle,
    params: Vec<QueryParam>,
    slots: HashMap<String, usize>,
}

impl Substitution<'_> {
    fn line(&mut self, number: usize, line: &str) -> Result<String> {
        let delim = self.options.param_delimiter.as_str();
        let mut out = String::with_capacity(line.len());
        let mut rest = line;

        while let Some(start) = rest.find(delim) {
            out.push_str(&rest[..start]);
            let after = &rest[start + delim.len()..];
            let end = after.find(delim).ok_or_else(|| Error::UnterminatedParam {
                query: self.query.to_string(),
                line: number,
            })?;

            out.push_str(&self.declare(&after[..end])?);
            rest = &after[end + delim.len()..];
        }

        out.push_str(rest);
        Ok(out)
    }

    fn declare(&mut self, decl: &str) -> Result<String> {
        let param = self.parse_decl(decl)?;

        match self.params.iter().position(|p| p.name == param.name) {
            Some(i) => {
                if self.params[i] != param {
                    return Err(self.invalid(decl, "redeclared with a different type or mode"));
                }
                if !param.interpolate && !self.placeholder.is_numbered() {
                    return Err(
                        self.invalid(decl, "positional placeholders cannot repeat a parameter")
                    );
                }
            }
            None => {
                if !param.interpolate {
                    let slot = self.slots.len() + 1;
                    self.slots.insert(param.name.clone(), slot);
                }
                self.params.push(param.clone());
            }
        }

        if param.interpolate {
            return Ok(format!("{{{}}}", param.name));
        }
        let slot = self.slots.get(&param.name).copied().unwrap_or_default();
        Ok(self.placeholder.render(slot))
    }

    fn parse_decl(&self, decl: &str) -> Result<QueryParam> {
        // A comma inside brackets belongs to the type, e.g. `HashMap<String,i32>`.
        let option = decl
            .rsplit_once(',')
            .filter(|(body, _)| brackets_balanced(body));
        let (body, interpolate) = match option {
            Some((body, flag)) => match flag.trim() {
                "interpolate" => (body, true),
                "bind" => (body, false),
                _ => {
                    return Err(
                        self.invalid(decl, "unknown option, expected 'interpolate' or 'bind'")
                    )
                }
            },
            None => (decl, self.options.interpolate),
        };

        let mut parts = body.split_whitespace();
        let (Some(name), Some(ty), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(self.invalid(decl, "expected '<name> <type>'"));
        };
        if !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return Err(self.invalid(decl, "name must be an identifier"));
        }

        Ok(QueryParam {
            name: name.to_string(),
            ty: ty.to_string(),
            interpolate,
        })
    }

    fn invalid(&self, decl: &str, reason: &str) -> Error {
        Error::InvalidQueryParam {
            query: self.query.to_string(),
            param: decl.to_string(),
            reason: reason.to_string(),
        }
    }
}

fn brackets_balanced(text: &str) -> bool {
    let depth = text.chars().fold(0i32, |depth, c| match c {
        '<' | '(' | '[' => depth + 1,
        '>' | ')' | ']' => depth - 1,
        _ => depth,
    });
    depth == 0
}
