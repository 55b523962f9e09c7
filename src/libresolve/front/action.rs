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

//! The action code is opaque except for the attribute references it contains:
//!
//! * `$x`: attribute, label or token reference.
//! * `$x.y`: property `y` of the rule, label or reference `x`.
//! * `$x::y`: attribute `y` of the dynamic scope `x`.

use crate::ast::*;
use crate::diagnostic::*;
use proc_macro2::{TokenStream, TokenTree, Ident, Spacing};

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum AttrRef
{
  Simple(Token),
  Qualified(Token, Token),
  Dynamic(Token, Token)
}

impl AttrRef
{
  /// The token following `$`.
  pub fn head(&self) -> &Token {
    match self {
      AttrRef::Simple(x)
    | AttrRef::Qualified(x, _)
    | AttrRef::Dynamic(x, _) => x
    }
  }
}

/// Reads the text of an action. An action that cannot be tokenized is reported and dropped.
pub fn parse_action(kind: ActionKind, text: &str, span: Span, diagnostics: &Diagnostics)
  -> Option<ActionAst>
{
  match ActionAst::parse(kind, text, span) {
    Ok(action) => Some(action),
    Err(err) => {
      diagnostics.span_err(span, SemanticError::UnreadableAction(err.to_string()));
      None
    }
  }
}

/// References in order of appearance, nested groups included.
pub fn attribute_refs(code: &TokenStream) -> Vec<AttrRef> {
  let mut refs = vec![];
  collect_refs(code.clone(), &mut refs);
  refs
}

fn collect_refs(code: TokenStream, refs: &mut Vec<AttrRef>) {
  let tokens: Vec<TokenTree> = code.into_iter().collect();
  let mut i = 0;
  while i < tokens.len() {
    match &tokens[i] {
      TokenTree::Group(group) => {
        collect_refs(group.stream(), refs);
        i += 1;
      }
      TokenTree::Punct(dollar) if dollar.as_char() == '$' => {
        match tokens.get(i + 1) {
          Some(TokenTree::Ident(x)) => {
            let x = ident_token(x);
            let (attr_ref, consumed) = qualify(x, &tokens[i + 2..]);
            refs.push(attr_ref);
            i += 2 + consumed;
          }
          _ => i += 1
        }
      }
      _ => i += 1
    }
  }
}

/// `tokens` follow `$x`. Returns the reference and how many of these tokens it spans.
fn qualify(x: Token, tokens: &[TokenTree]) -> (AttrRef, usize) {
  match tokens {
    [TokenTree::Punct(dot), TokenTree::Ident(y), ..] if dot.as_char() == '.' =>
      (AttrRef::Qualified(x, ident_token(y)), 2),
    [TokenTree::Punct(c1), TokenTree::Punct(c2), TokenTree::Ident(y), ..]
      if c1.as_char() == ':' && c1.spacing() == Spacing::Joint && c2.as_char() == ':' =>
      (AttrRef::Dynamic(x, ident_token(y)), 3),
    _ => (AttrRef::Simple(x), 0)
  }
}

fn ident_token(ident: &Ident) -> Token {
  Token::new(&ident.to_string(), ident.span())
}
