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

//! Labels are kept with all their definitions so we can report a label redefined with another kind of element, e.g. `x=ID` in one alternative and `x=expr` in another.

use crate::ast::*;
use crate::rule::Rule;
use crate::grammar::Grammar;
use crate::diagnostic::*;
use partial::Partial::*;

pub struct LabelConflict<'a>
{
  grammar: &'a Grammar,
  diagnostics: &'a Diagnostics,
  has_conflict: bool
}

impl<'a> LabelConflict<'a>
{
  pub fn analyse(grammar: Grammar, diagnostics: &Diagnostics) -> Partial<Grammar> {
    if LabelConflict::has_conflict(&grammar, diagnostics) {
      Fake(grammar)
    } else {
      Value(grammar)
    }
  }

  fn has_conflict(grammar: &Grammar, diagnostics: &Diagnostics) -> bool {
    let mut analyser = LabelConflict {
      grammar: grammar,
      diagnostics: diagnostics,
      has_conflict: false
    };
    for rule in &grammar.rules {
      analyser.visit_rule(rule);
    }
    analyser.has_conflict
  }

  fn visit_rule(&mut self, rule: &Rule) {
    let mut defs: Vec<(String, Vec<LabelElementPair>)> = rule.get_label_defs().into_iter().collect();
    defs.sort_by(|a, b| a.0.cmp(&b.0));
    for (name, pairs) in defs {
      let first = &pairs[0];
      if self.grammar.get_rule(&name).is_some() {
        self.error(first.label.span, SemanticError::LabelConflictsWithRule(name.clone()));
      }
      for pair in &pairs[1..] {
        if pair.kind != first.kind {
          self.diagnostics.multi_locations_err(vec![
            (pair.label.span, SemanticError::LabelTypeConflict {
              label: name.clone(),
              previous: first.kind,
              current: pair.kind
            }),
            (first.label.span, SemanticError::PreviousDefinition(name.clone()))]);
          self.has_conflict = true;
        }
      }
    }
  }

  fn error(&mut self, span: Span, error: SemanticError) {
    self.diagnostics.span_err(span, error);
    self.has_conflict = true;
  }
}

#[cfg(test)]
mod test
{
  use super::*;

  fn label(grammar: &mut Grammar, rule: usize, alt: usize, label: &str, element: &str, kind: LabelType) {
    grammar.rule_mut(rule)
      .define_label_in_alt(alt, Token::synthetic(label), Token::synthetic(element), kind)
      .unwrap();
  }

  #[test]
  fn label_kind_mismatch() {
    let diagnostics = Diagnostics::new();
    let mut grammar = Grammar::new("G", GrammarKind::Parser);
    let r = grammar.define_rule(Token::synthetic("r"), 3).unwrap();
    grammar.define_rule(Token::synthetic("e"), 1).unwrap();
    label(&mut grammar, r, 1, "x", "ID", TokenLabel);
    label(&mut grammar, r, 2, "x", "e", RuleLabel);
    label(&mut grammar, r, 3, "x", "ID", TokenLabel);
    label(&mut grammar, r, 3, "ids", "ID", TokenListLabel);
    label(&mut grammar, r, 3, "ids", "ID", TokenListLabel);
    match LabelConflict::analyse(grammar, &diagnostics) {
      Fake(_) => (),
      _ => panic!("a label conflict must give a `Fake` grammar")
    }
    assert_eq!(diagnostics.errors(), vec![SemanticError::LabelTypeConflict {
      label: String::from("x"), previous: TokenLabel, current: RuleLabel }]);
  }

  #[test]
  fn label_named_like_a_rule() {
    let diagnostics = Diagnostics::new();
    let mut grammar = Grammar::new("G", GrammarKind::Parser);
    let r = grammar.define_rule(Token::synthetic("r"), 1).unwrap();
    grammar.define_rule(Token::synthetic("e"), 1).unwrap();
    label(&mut grammar, r, 1, "e", "e", RuleLabel);
    let _ = LabelConflict::analyse(grammar, &diagnostics);
    assert_eq!(diagnostics.errors(), vec![SemanticError::LabelConflictsWithRule(String::from("e"))]);
  }
}
