// Copyright 2015 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at

//     http://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! AST nodes handed over by the grammar walker and shared across all the resolution steps.

pub use crate::identifier::*;
pub use partial::Partial;

pub use crate::ast::LabelType::*;

use proc_macro2::{TokenStream, LexError};
use std::fmt::{Formatter, Display, Error};

/// A piece of grammar text together with its position, for example a rule name, a label or a modifier.
#[derive(Clone, Debug)]
pub struct Token
{
  pub text: String,
  pub span: Span
}

impl Token
{
  pub fn new(text: &str, span: Span) -> Token {
    Token {
      text: String::from(text),
      span: span
    }
  }

  /// A token without a meaningful position, mostly useful when the grammar is built by hand.
  pub fn synthetic(text: &str) -> Token {
    Token::new(text, Span::call_site())
  }
}

// Positions are not part of the identity of a token.
impl PartialEq for Token
{
  fn eq(&self, other: &Self) -> bool {
    self.text == other.text
  }
}

impl Eq for Token {}

impl ItemName for Token
{
  fn name(&self) -> &str {
    &self.text
  }
}

impl ItemSpan for Token
{
  fn span(&self) -> Span {
    self.span
  }
}

impl Display for Token
{
  fn fmt(&self, formatter: &mut Formatter) -> Result<(), Error> {
    formatter.write_str(&self.text)
  }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum GrammarKind
{
  Lexer,
  Parser,
  Tree,
  Combined
}

impl GrammarKind
{
  pub fn is_lexer(self) -> bool {
    self == GrammarKind::Lexer
  }
}

impl Display for GrammarKind
{
  fn fmt(&self, formatter: &mut Formatter) -> Result<(), Error> {
    use self::GrammarKind::*;
    formatter.write_str(match *self {
      Lexer => "lexer",
      Parser => "parser",
      Tree => "tree",
      Combined => "combined"
    })
  }
}

/// The kind of element a label is bound to. The last three kinds only exist to select a predefined scope.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum LabelType
{
  RuleLabel, // e=expr
  RuleListLabel, // es+=expr
  TokenLabel, // id=ID
  TokenListLabel, // ids+=ID
  LexerStringLabel, // s='abc' in a lexer rule
  WildcardTreeLabel, // t=.
  WildcardTreeListLabel // ts+=.
}

impl LabelType
{
  pub fn is_list(self) -> bool {
    match self {
      RuleListLabel | TokenListLabel | WildcardTreeListLabel => true,
      _ => false
    }
  }
}

impl Display for LabelType
{
  fn fmt(&self, formatter: &mut Formatter) -> Result<(), Error> {
    formatter.write_str(match *self {
      RuleLabel => "RULE_LABEL",
      RuleListLabel => "RULE_LIST_LABEL",
      TokenLabel => "TOKEN_LABEL",
      TokenListLabel => "TOKEN_LIST_LABEL",
      LexerStringLabel => "LEXER_STRING_LABEL",
      WildcardTreeLabel => "WILDCARD_TREE_LABEL",
      WildcardTreeListLabel => "WILDCARD_TREE_LIST_LABEL"
    })
  }
}

/// `label=element` where `element` is the name of the referenced rule or token.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct LabelElementPair
{
  pub label: Token,
  pub element: Token,
  pub kind: LabelType
}

impl LabelElementPair
{
  pub fn new(label: Token, element: Token, kind: LabelType) -> LabelElementPair {
    LabelElementPair {
      label: label,
      element: element,
      kind: kind
    }
  }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ActionKind
{
  Action,
  /// Fires independently of the selected alternative, e.g. `channel` or `skip` directives.
  ForcedAction,
  SemanticPredicate
}

/// Target code embedded in the grammar. The code is opaque: only the attribute references it contains are inspected.
#[derive(Clone, Debug)]
pub struct ActionAst
{
  pub kind: ActionKind,
  pub code: TokenStream,
  pub span: Span,
  /// Grammar-wide 1-based index, set when the action or predicate is registered in the grammar.
  pub index: Option<usize>
}

impl ActionAst
{
  pub fn new(kind: ActionKind, code: TokenStream, span: Span) -> ActionAst {
    ActionAst {
      kind: kind,
      code: code,
      span: span,
      index: None
    }
  }

  /// The text must be made of Rust tokens even though the code is otherwise opaque. Target code that does not lex as Rust, such as the Java character literal `'\u0041'`, gives a `LexError`.
  pub fn parse(kind: ActionKind, text: &str, span: Span) -> Result<ActionAst, LexError> {
    let code = text.parse::<TokenStream>()?;
    Ok(ActionAst::new(kind, code, span))
  }

  pub fn action(code: TokenStream) -> ActionAst {
    ActionAst::new(ActionKind::Action, code, Span::call_site())
  }

  pub fn forced(code: TokenStream) -> ActionAst {
    ActionAst::new(ActionKind::ForcedAction, code, Span::call_site())
  }

  pub fn predicate(code: TokenStream) -> ActionAst {
    ActionAst::new(ActionKind::SemanticPredicate, code, Span::call_site())
  }

  pub fn is_forced(&self) -> bool {
    self.kind == ActionKind::ForcedAction
  }
}

impl ItemSpan for ActionAst
{
  fn span(&self) -> Span {
    self.span
  }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PrintLevel
{
  Debug,
  Show,
  Nothing
}

impl PrintLevel
{
  pub fn merge(self, other: PrintLevel) -> PrintLevel {
    use self::PrintLevel::*;
    match (self, other) {
        (Nothing, Debug)
      | (Show, Debug) => Debug,
      (Nothing, Show) => Show,
      _ => self
    }
  }

  pub fn debug(self) -> bool {
    self == PrintLevel::Debug
  }

  pub fn show(self) -> bool {
    self == PrintLevel::Show
  }
}

impl Default for PrintLevel
{
  fn default() -> PrintLevel {
    PrintLevel::Nothing
  }
}
