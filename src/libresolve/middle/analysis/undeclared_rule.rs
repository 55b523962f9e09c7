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

use crate::ast::*;
use crate::rule::Rule;
use crate::grammar::Grammar;
use crate::diagnostic::*;
use partial::Partial::*;

/// Reports the references to rules that are not declared in the grammar.
pub struct UndeclaredRule<'a>
{
  grammar: &'a Grammar,
  diagnostics: &'a Diagnostics,
  has_undeclared: bool
}

impl<'a> UndeclaredRule<'a>
{
  pub fn analyse(grammar: Grammar, diagnostics: &Diagnostics) -> Partial<Grammar> {
    if UndeclaredRule::has_undeclared(&grammar, diagnostics) {
      Fake(grammar)
    } else {
      Value(grammar)
    }
  }

  fn has_undeclared(grammar: &Grammar, diagnostics: &Diagnostics) -> bool {
    let mut analyser = UndeclaredRule {
      grammar: grammar,
      diagnostics: diagnostics,
      has_undeclared: false
    };
    for rule in &grammar.rules {
      analyser.visit_rule(rule);
    }
    analyser.has_undeclared
  }

  fn visit_rule(&mut self, rule: &Rule) {
    for alt in rule.alts() {
      let mut refs: Vec<&Token> = alt.rule_refs.values()
        .flat_map(|tokens| tokens.iter())
        .collect();
      refs.sort_by(|a, b| a.text.cmp(&b.text));
      for rule_ref in refs {
        self.visit_rule_ref(rule_ref);
      }
    }
  }

  fn visit_rule_ref(&mut self, rule_ref: &Token) {
    if self.grammar.get_rule(&rule_ref.text).is_none() {
      self.diagnostics.span_err(rule_ref.span,
        SemanticError::UnknownRuleReference(rule_ref.text.clone()));
      self.has_undeclared = true;
    }
  }
}
