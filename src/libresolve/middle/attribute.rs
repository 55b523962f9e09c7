// Copyright 2014 Pierre Talbot (IRCAM)

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at

//     http://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Grammar attributes configure the analysis, for example `#[show_rules]` prints the rules once they are checked.

use crate::ast::*;
use crate::grammar::Grammar;
use crate::diagnostic::*;
use syn::spanned::Spanned;

pub fn decorate_with_attributes(mut grammar: Grammar, attributes: &[syn::Attribute],
  diagnostics: &Diagnostics) -> Partial<Grammar>
{
  merge_grammar_attributes(&mut grammar, attributes, diagnostics);
  Partial::Value(grammar)
}

fn warn_ignore_attr(diagnostics: &Diagnostics, span: Span, name: String) {
  diagnostics.span_warn(span, SemanticError::UnknownGrammarAttribute(name));
}

fn merge_grammar_attributes(grammar: &mut Grammar, attributes: &[syn::Attribute],
  diagnostics: &Diagnostics)
{
  for attr in attributes {
    if let Some(ident) = attr.path.get_ident() {
      merge_grammar_attr(grammar, ident, diagnostics);
    }
    else {
      let name = attr.path.segments.iter()
        .map(|segment| segment.ident.to_string())
        .collect::<Vec<_>>()
        .join("::");
      warn_ignore_attr(diagnostics, attr.span(), name);
    }
  }
}

fn merge_grammar_attr(grammar: &mut Grammar, ident: &syn::Ident, diagnostics: &Diagnostics) {
  match &*ident.to_string() {
    "debug_rules" => {
      grammar.merge_print_rules(PrintLevel::Debug);
    },
    "show_rules" => {
      grammar.merge_print_rules(PrintLevel::Show);
    },
    _ => {
      warn_ignore_attr(diagnostics, ident.span(), ident.to_string());
    }
  }
}

#[cfg(test)]
mod test
{
  use super::*;
  use syn::parse_quote;

  fn decorate(attributes: Vec<syn::Attribute>) -> (Grammar, Diagnostics) {
    let diagnostics = Diagnostics::new();
    let grammar = decorate_with_attributes(Grammar::new("G", GrammarKind::Parser), &attributes, &diagnostics)
      .unwrap();
    (grammar, diagnostics)
  }

  #[test]
  fn print_levels_are_merged() {
    let (grammar, diagnostics) = decorate(vec![parse_quote!(#[show_rules]), parse_quote!(#[debug_rules])]);
    assert_eq!(grammar.attributes.print_rules, PrintLevel::Debug);
    assert!(diagnostics.warnings().is_empty());
  }

  #[test]
  fn unknown_attributes_are_ignored() {
    let (grammar, diagnostics) = decorate(vec![parse_quote!(#[show_typing]), parse_quote!(#[oak::show_rules])]);
    assert_eq!(grammar.attributes.print_rules, PrintLevel::Nothing);
    assert_eq!(diagnostics.warnings(), vec![
      SemanticError::UnknownGrammarAttribute(String::from("show_typing")),
      SemanticError::UnknownGrammarAttribute(String::from("oak::show_rules"))]);
    assert!(!diagnostics.has_errors());
  }
}
