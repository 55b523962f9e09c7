// Copyright 2016 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at

//     http://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Errors of the grammar author are collected as diagnostics and never stop the analysis by themselves. Errors of the analysis pipeline itself are `StructuralError` and stop it.

use crate::ast::*;
use std::cell::RefCell;
use std::io::Write;
use term::Terminal;

/// Faults internal to the construction of the grammar model. After one of them, the grammar-wide action and predicate counters are inconsistent and the model must not be used.
#[derive(Clone, PartialEq, Eq, Debug, thiserror::Error)]
pub enum StructuralError
{
  #[error("alternative {alt} is out of range for rule `{rule}` ({num_alts} alternative(s))")]
  AltOutOfRange { rule: String, alt: usize, num_alts: usize },
  #[error("rule `{0}` must have at least one alternative")]
  NoAlternative(String),
  #[error("rule index {rule} is out of range ({num_rules} rule(s))")]
  RuleOutOfRange { rule: usize, num_rules: usize }
}

#[derive(Clone, PartialEq, Eq, Debug, thiserror::Error)]
pub enum SemanticError
{
  #[error("at least one rule must be declared")]
  NoRule,
  #[error("duplicate definition of {what} with name `{name}`")]
  Duplicate { what: String, name: String },
  #[error("previous definition of `{0}` here")]
  PreviousDefinition(String),
  #[error("reference to undefined rule `{0}`")]
  UnknownRuleReference(String),
  #[error("label `{label}` type mismatch with previous definition: {current} != {previous}")]
  LabelTypeConflict { label: String, previous: LabelType, current: LabelType },
  #[error("label `{0}` conflicts with rule with same name")]
  LabelConflictsWithRule(String),
  #[error("unknown attribute reference `{0}` in action")]
  UnknownSimpleAttribute(String),
  #[error("unknown attribute `{attr}` for rule `{rule}` in `${rule}.{attr}`")]
  UnknownRuleAttribute { rule: String, attr: String },
  #[error("parameter `{attr}` of rule `{rule}` is not accessible in this scope: `${rule}.{attr}`")]
  InvalidRuleParameterRef { rule: String, attr: String },
  #[error("attribute `{attr}` isn't a valid property in `${scope}.{attr}`")]
  UnknownAttributeInScope { scope: String, attr: String },
  #[error("missing attribute access on rule reference `{0}` in `${0}`")]
  IsolatedRuleRef(String),
  #[error("unknown dynamic scope `{0}`")]
  UnknownDynamicScope(String),
  #[error("unknown dynamically-scoped attribute `{attr}` in `${scope}::{attr}`")]
  UnknownDynamicScopeAttribute { scope: String, attr: String },
  #[error("action code could not be tokenized: {0}")]
  UnreadableAction(String),
  #[error("unknown grammar attribute `{0}`: it will be ignored")]
  UnknownGrammarAttribute(String)
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Level
{
  Error,
  Warning
}

#[derive(Clone, Debug)]
pub struct Diagnostic
{
  pub level: Level,
  pub error: SemanticError,
  pub span: Span,
  pub notes: Vec<(Span, SemanticError)>
}

impl Diagnostic
{
  pub fn error(span: Span, error: SemanticError) -> Diagnostic {
    Diagnostic {
      level: Level::Error,
      error: error,
      span: span,
      notes: vec![]
    }
  }

  pub fn warning(span: Span, error: SemanticError) -> Diagnostic {
    Diagnostic {
      level: Level::Warning,
      .. Diagnostic::error(span, error)
    }
  }

  pub fn note(mut self, span: Span, note: SemanticError) -> Diagnostic {
    self.notes.push((span, note));
    self
  }
}

/// Collects the diagnostics of one analysis run. Passes share it by reference, like a compiler session.
#[derive(Default)]
pub struct Diagnostics
{
  reported: RefCell<Vec<Diagnostic>>
}

impl Diagnostics
{
  pub fn new() -> Diagnostics {
    Diagnostics::default()
  }

  pub fn report(&self, diagnostic: Diagnostic) {
    tracing::debug!(level = ?diagnostic.level, "{}", diagnostic.error);
    self.reported.borrow_mut().push(diagnostic);
  }

  pub fn span_err(&self, span: Span, error: SemanticError) {
    self.report(Diagnostic::error(span, error));
  }

  pub fn span_warn(&self, span: Span, error: SemanticError) {
    self.report(Diagnostic::warning(span, error));
  }

  /// The first element of `errors` is rendered as an error and the other ones as notes.
  pub fn multi_locations_err(&self, errors: Vec<(Span, SemanticError)>) {
    let mut errors_iter = errors.into_iter();
    if let Some((span, error)) = errors_iter.next() {
      let diagnostic = errors_iter.fold(Diagnostic::error(span, error),
        |diagnostic, (span, note)| diagnostic.note(span, note));
      self.report(diagnostic);
    }
  }

  pub fn has_errors(&self) -> bool {
    self.reported.borrow().iter().any(|d| d.level == Level::Error)
  }

  pub fn error_count(&self) -> usize {
    self.reported.borrow().iter().filter(|d| d.level == Level::Error).count()
  }

  pub fn errors(&self) -> Vec<SemanticError> {
    self.with_level(Level::Error)
  }

  pub fn warnings(&self) -> Vec<SemanticError> {
    self.with_level(Level::Warning)
  }

  fn with_level(&self, level: Level) -> Vec<SemanticError> {
    self.reported.borrow().iter()
      .filter(|d| d.level == level)
      .map(|d| d.error.clone())
      .collect()
  }

  pub fn into_vec(self) -> Vec<Diagnostic> {
    self.reported.into_inner()
  }

  /// Prints every diagnostic on the standard error, in colors if the terminal supports it.
  pub fn emit(&self, grammar_name: &str) {
    match term::stderr() {
      Some(mut terminal) => {
        for diagnostic in self.reported.borrow().iter() {
          if emit_colored(&mut *terminal, grammar_name, diagnostic).is_err() {
            eprintln!("{}", render(grammar_name, diagnostic));
          }
        }
      }
      None => {
        for diagnostic in self.reported.borrow().iter() {
          eprintln!("{}", render(grammar_name, diagnostic));
        }
      }
    }
  }
}

fn level_name(level: Level) -> &'static str {
  match level {
    Level::Error => "error",
    Level::Warning => "warning"
  }
}

/// Plain text rendering: `grammar:line:column: error: message`, followed by one line per note.
pub fn render(grammar_name: &str, diagnostic: &Diagnostic) -> String {
  let mut text = format!("{}:{}: {}: {}",
    grammar_name, display_position(diagnostic.span),
    level_name(diagnostic.level), diagnostic.error);
  for (span, note) in &diagnostic.notes {
    text.push_str(&format!("\n{}:{}: note: {}",
      grammar_name, display_position(*span), note));
  }
  text
}

fn emit_colored(terminal: &mut term::StderrTerminal, grammar_name: &str,
  diagnostic: &Diagnostic) -> term::Result<()>
{
  let color = match diagnostic.level {
    Level::Error => term::color::BRIGHT_RED,
    Level::Warning => term::color::BRIGHT_YELLOW
  };
  write!(terminal, "{}:{}: ", grammar_name, display_position(diagnostic.span))?;
  terminal.fg(color)?;
  write!(terminal, "{}: ", level_name(diagnostic.level))?;
  terminal.reset()?;
  writeln!(terminal, "{}", diagnostic.error)?;
  for (span, note) in &diagnostic.notes {
    write!(terminal, "{}:{}: ", grammar_name, display_position(*span))?;
    terminal.fg(term::color::BRIGHT_GREEN)?;
    write!(terminal, "note: ")?;
    terminal.reset()?;
    writeln!(terminal, "{}", note)?;
  }
  Ok(())
}
