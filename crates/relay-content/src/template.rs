//! Text templates with variable interpolation and conditionals.
//!
//! Supported actions:
//! ```text
//! {{.name}}                       interpolate a variable
//! {{if .a}} .. {{else if .b}} .. {{else}} .. {{end}}
//! {{/* comment */}}               dropped from the output
//! {{- .name -}}                   trim surrounding whitespace
//! ```
//!
//! A variable is truthy when its value is non-empty. Referencing a
//! variable that is not defined is an error, also inside conditions.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::{Error, Result};

/// Matches one action. The trim markers need whitespace next to the dash.
static ACTION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\{\{(-\s)?(.*?)(\s-)?\}\}").expect("Invalid action regex")
});

static IDENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_-]*$").expect("Invalid identifier regex")
});

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Text(String),
    Var { name: String, position: usize },
    If {
        branches: Vec<(Condition, Vec<Node>)>,
        otherwise: Vec<Node>,
    },
}

#[derive(Debug, Clone, PartialEq)]
struct Condition {
    name: String,
    position: usize,
}

#[derive(Debug)]
enum Token {
    Text(String),
    Action { body: String, position: usize },
}

/// Marks where a nested node list stopped.
enum Stop {
    ElseIf(Condition),
    Else(usize),
    End(usize),
}

/// A parsed template.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    nodes: Vec<Node>,
}

impl Template {
    /// Parse template source.
    ///
    /// # Errors
    ///
    /// Returns `TemplateParse` for an unterminated `{{`, an unknown
    /// action, or unbalanced `if`/`else`/`end`.
    pub fn parse(source: &str) -> Result<Self> {
        let tokens = lex(source)?;
        let mut parser = Parser {
            tokens: tokens.into_iter(),
        };
        let (nodes, stop) = parser.parse_list()?;
        match stop {
            None => Ok(Self { nodes }),
            Some(Stop::ElseIf(cond)) => Err(Error::parse(cond.position, "unexpected {{else if}}")),
            Some(Stop::Else(position)) => Err(Error::parse(position, "unexpected {{else}}")),
            Some(Stop::End(position)) => Err(Error::parse(position, "unexpected {{end}}")),
        }
    }

    /// Render with the given variables.
    pub fn render(&self, vars: &BTreeMap<String, String>) -> Result<String> {
        let mut out = String::new();
        render_nodes(&self.nodes, vars, &mut out)?;
        Ok(out)
    }
}

/// Parse and render `source` in one step.
///
/// Input without any `{{` is returned unchanged.
pub fn render(source: &str, vars: &BTreeMap<String, String>) -> Result<String> {
    if !source.contains("{{") {
        return Ok(source.to_string());
    }
    Template::parse(source)?.render(vars)
}

fn lex(source: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut cursor = 0;
    let mut trim_next = false;

    for caps in ACTION_REGEX.captures_iter(source) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        push_text(&mut tokens, source, cursor, whole.start(), trim_next)?;

        if caps.get(1).is_some()
            && let Some(Token::Text(text)) = tokens.last_mut()
        {
            text.truncate(text.trim_end().len());
        }
        trim_next = caps.get(3).is_some();

        let body = caps.get(2).map_or("", |m| m.as_str());
        tokens.push(Token::Action {
            body: body.trim().to_string(),
            position: whole.start(),
        });
        cursor = whole.end();
    }

    push_text(&mut tokens, source, cursor, source.len(), trim_next)?;
    Ok(tokens)
}

fn push_text(
    tokens: &mut Vec<Token>,
    source: &str,
    start: usize,
    end: usize,
    trim_start: bool,
) -> Result<()> {
    let mut text = &source[start..end];
    if let Some(offset) = text.find("{{") {
        return Err(Error::parse(start + offset, "unclosed action"));
    }
    if trim_start {
        text = text.trim_start();
    }
    if !text.is_empty() {
        tokens.push(Token::Text(text.to_string()));
    }
    Ok(())
}

struct Parser {
    tokens: std::vec::IntoIter<Token>,
}

impl Parser {
    fn parse_list(&mut self) -> Result<(Vec<Node>, Option<Stop>)> {
        let mut nodes = Vec::new();

        while let Some(token) = self.tokens.next() {
            let (body, position) = match token {
                Token::Text(text) => {
                    nodes.push(Node::Text(text));
                    continue;
                }
                Token::Action { body, position } => (body, position),
            };

            if body.starts_with("/*") && body.ends_with("*/") {
                continue;
            }
            if body == "end" {
                return Ok((nodes, Some(Stop::End(position))));
            }
            if body == "else" {
                return Ok((nodes, Some(Stop::Else(position))));
            }
            if let Some(rest) = body.strip_prefix("else if ") {
                let cond = condition(rest, position)?;
                return Ok((nodes, Some(Stop::ElseIf(cond))));
            }
            if let Some(rest) = body.strip_prefix("if ") {
                let cond = condition(rest, position)?;
                nodes.push(self.parse_if(cond, position)?);
                continue;
            }
            if let Some(name) = body.strip_prefix('.')
                && IDENT_REGEX.is_match(name)
            {
                nodes.push(Node::Var {
                    name: name.to_string(),
                    position,
                });
                continue;
            }

            return Err(Error::parse(position, format!("unknown action {{{{{body}}}}}")));
        }

        Ok((nodes, None))
    }

    fn parse_if(&mut self, first: Condition, if_position: usize) -> Result<Node> {
        let mut branches = Vec::new();
        let mut cond = first;

        loop {
            let (nodes, stop) = self.parse_list()?;
            match stop {
                None => return Err(Error::parse(if_position, "unclosed {{if}}")),
                Some(Stop::End(_)) => {
                    branches.push((cond, nodes));
                    return Ok(Node::If {
                        branches,
                        otherwise: Vec::new(),
                    });
                }
                Some(Stop::ElseIf(next)) => {
                    branches.push((cond, nodes));
                    cond = next;
                }
                Some(Stop::Else(_)) => {
                    branches.push((cond, nodes));
                    let (otherwise, stop) = self.parse_list()?;
                    return match stop {
                        Some(Stop::End(_)) => Ok(Node::If {
                            branches,
                            otherwise,
                        }),
                        None => Err(Error::parse(if_position, "unclosed {{if}}")),
                        Some(Stop::Else(position)) => {
                            Err(Error::parse(position, "{{else}} after {{else}}"))
                        }
                        Some(Stop::ElseIf(c)) => {
                            Err(Error::parse(c.position, "{{else if}} after {{else}}"))
                        }
                    };
                }
            }
        }
    }
}

fn condition(expr: &str, position: usize) -> Result<Condition> {
    let expr = expr.trim();
    match expr.strip_prefix('.') {
        Some(name) if IDENT_REGEX.is_match(name) => Ok(Condition {
            name: name.to_string(),
            position,
        }),
        _ => Err(Error::parse(position, format!("unsupported condition '{expr}'"))),
    }
}

fn lookup<'a>(vars: &'a BTreeMap<String, String>, name: &str) -> Result<&'a str> {
    vars.get(name)
        .map(String::as_str)
        .ok_or_else(|| Error::UndefinedVariable {
            name: name.to_string(),
        })
}

fn render_nodes(nodes: &[Node], vars: &BTreeMap<String, String>, out: &mut String) -> Result<()> {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Var { name, position } => {
                let value = lookup(vars, name).inspect_err(|_| {
                    tracing::debug!(variable = %name, position, "Undefined template variable");
                })?;
                out.push_str(value);
            }
            Node::If {
                branches,
                otherwise,
            } => {
                let mut taken = None;
                for (cond, body) in branches {
                    if !lookup(vars, &cond.name)?.is_empty() {
                        taken = Some(body);
                        break;
                    }
                }
                render_nodes(taken.unwrap_or(otherwise), vars, out)?;
            }
        }
    }
    Ok(())
}
